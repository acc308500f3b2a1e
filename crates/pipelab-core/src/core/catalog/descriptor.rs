use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Design,
    Sequence,
    Structure,
    Docking,
    Analysis,
    Evolution,
    Stability,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Design,
        Category::Sequence,
        Category::Structure,
        Category::Docking,
        Category::Analysis,
        Category::Evolution,
        Category::Stability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Sequence => "sequence",
            Category::Structure => "structure",
            Category::Docking => "docking",
            Category::Analysis => "analysis",
            Category::Evolution => "evolution",
            Category::Stability => "stability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown module category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ComputeRequirements {
    pub gpu: bool,
    pub time_estimate: String,
}

/// Teaching material attached to a module, shown alongside it in the workbench.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LearningMetadata {
    pub summary: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
}

/// A named computational step with declared input and output data formats.
///
/// Descriptors are owned by the catalog and never change at runtime. Format lists
/// keep their declared order, which is also the order used when reporting shared
/// formats between two modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub compute: ComputeRequirements,
    #[serde(default)]
    pub learning: LearningMetadata,
}

impl ModuleDescriptor {
    #[inline]
    pub fn requires_gpu(&self) -> bool {
        self.compute.gpu
    }

    /// Formats produced by `self` that `downstream` accepts, in `self.outputs` order.
    pub fn shared_formats<'a>(&'a self, downstream: &ModuleDescriptor) -> Vec<&'a str> {
        self.outputs
            .iter()
            .filter(|format| downstream.inputs.contains(format))
            .map(String::as_str)
            .collect()
    }

    pub fn can_feed(&self, downstream: &ModuleDescriptor) -> bool {
        self.outputs
            .iter()
            .any(|format| downstream.inputs.contains(format))
    }
}
