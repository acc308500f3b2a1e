use crate::core::catalog::descriptor::{Category, ModuleDescriptor};
use crate::core::compatibility::resolver::CompatibilityResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPosition {
    pub x: f64,
    pub y: f64,
}

/// Optional limits supplied alongside a goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// `Some(false)` removes GPU-bound modules from heuristic pipelines.
    pub gpu_available: Option<bool>,
    pub max_modules: Option<usize>,
    pub notes: Option<String>,
}

/// Where a draft came from, so consumers can weigh it accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineNode {
    pub module_id: String,
    pub name: String,
    pub category: Category,
    pub position: CanvasPosition,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub reasoning: Option<String>,
}

impl PipelineNode {
    pub fn from_descriptor(
        descriptor: &ModuleDescriptor,
        position: CanvasPosition,
        reasoning: Option<String>,
    ) -> Self {
        Self {
            module_id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            category: descriptor.category,
            position,
            inputs: descriptor.inputs.clone(),
            outputs: descriptor.outputs.clone(),
            reasoning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineEdge {
    pub source: usize,
    pub target: usize,
    pub data_type: String,
    pub learning_note: String,
    pub valid: bool,
}

/// A composed pipeline, rebuilt from scratch for every composition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDraft {
    pub name: String,
    pub description: String,
    pub nodes: Vec<PipelineNode>,
    pub edges: Vec<PipelineEdge>,
    pub confidence: f64,
    pub warnings: Vec<String>,
    pub clarifying_question: Option<String>,
    pub provenance: Provenance,
}

impl PipelineDraft {
    pub fn module_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.module_id.as_str()).collect()
    }

    /// Every edge references existing nodes.
    pub fn edges_in_bounds(&self) -> bool {
        self.edges
            .iter()
            .all(|e| e.source < self.nodes.len() && e.target < self.nodes.len())
    }
}

/// One adjacent pair of a user-assembled pipeline and its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCheck {
    pub source: usize,
    pub target: usize,
    pub from_id: String,
    pub to_id: String,
    pub result: CompatibilityResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub valid: bool,
    pub edges: Vec<EdgeCheck>,
    pub unknown_modules: Vec<String>,
    pub requires_gpu: bool,
}
