use crate::core::mastery::rules::ProgressionThresholds;
use crate::core::pipeline::CanvasPosition;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' is out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerConfig {
    /// Horizontal distance between consecutive nodes on the canvas.
    pub node_spacing_x: f64,
    pub node_origin: CanvasPosition,
    /// Fixed confidence of heuristic drafts; always below `min_ai_confidence`.
    pub fallback_confidence: f64,
    /// Lowest confidence an AI draft is reported with.
    pub min_ai_confidence: f64,
    /// Used when no goal keyword matches.
    pub default_module: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            node_spacing_x: 250.0,
            node_origin: CanvasPosition { x: 100.0, y: 200.0 },
            fallback_confidence: 0.6,
            min_ai_confidence: 0.7,
            default_module: "esmfold".to_string(),
        }
    }
}

impl ComposerConfig {
    pub fn position_for(&self, index: usize) -> CanvasPosition {
        CanvasPosition {
            x: self.node_origin.x + self.node_spacing_x * index as f64,
            y: self.node_origin.y,
        }
    }
}

#[derive(Default)]
pub struct ComposerConfigBuilder {
    node_spacing_x: Option<f64>,
    node_origin: Option<CanvasPosition>,
    fallback_confidence: Option<f64>,
    min_ai_confidence: Option<f64>,
    default_module: Option<String>,
}

impl ComposerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_spacing_x(mut self, spacing: f64) -> Self {
        self.node_spacing_x = Some(spacing);
        self
    }
    pub fn node_origin(mut self, origin: CanvasPosition) -> Self {
        self.node_origin = Some(origin);
        self
    }
    pub fn fallback_confidence(mut self, confidence: f64) -> Self {
        self.fallback_confidence = Some(confidence);
        self
    }
    pub fn min_ai_confidence(mut self, confidence: f64) -> Self {
        self.min_ai_confidence = Some(confidence);
        self
    }
    pub fn default_module(mut self, id: impl Into<String>) -> Self {
        self.default_module = Some(id.into());
        self
    }

    pub fn build(self) -> Result<ComposerConfig, ConfigError> {
        let config = ComposerConfig {
            node_spacing_x: self
                .node_spacing_x
                .ok_or(ConfigError::MissingParameter("node_spacing_x"))?,
            node_origin: self
                .node_origin
                .ok_or(ConfigError::MissingParameter("node_origin"))?,
            fallback_confidence: self
                .fallback_confidence
                .ok_or(ConfigError::MissingParameter("fallback_confidence"))?,
            min_ai_confidence: self
                .min_ai_confidence
                .ok_or(ConfigError::MissingParameter("min_ai_confidence"))?,
            default_module: self
                .default_module
                .ok_or(ConfigError::MissingParameter("default_module"))?,
        };
        validate_composer(&config)?;
        Ok(config)
    }
}

fn validate_composer(config: &ComposerConfig) -> Result<(), ConfigError> {
    if !(config.node_spacing_x > 0.0) {
        return Err(ConfigError::OutOfRange {
            name: "node_spacing_x",
            reason: format!("must be positive, got {}", config.node_spacing_x),
        });
    }
    for (name, value) in [
        ("fallback_confidence", config.fallback_confidence),
        ("min_ai_confidence", config.min_ai_confidence),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::OutOfRange {
                name,
                reason: format!("must lie in [0, 1], got {value}"),
            });
        }
    }
    if config.fallback_confidence >= config.min_ai_confidence {
        return Err(ConfigError::OutOfRange {
            name: "fallback_confidence",
            reason: format!(
                "must be below min_ai_confidence ({}), got {}",
                config.min_ai_confidence, config.fallback_confidence
            ),
        });
    }
    if config.default_module.trim().is_empty() {
        return Err(ConfigError::MissingParameter("default_module"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressionConfig {
    pub thresholds: ProgressionThresholds,
}

#[derive(Default)]
pub struct ProgressionConfigBuilder {
    thresholds: Option<ProgressionThresholds>,
}

impl ProgressionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(mut self, thresholds: ProgressionThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn build(self) -> Result<ProgressionConfig, ConfigError> {
        let thresholds = self
            .thresholds
            .ok_or(ConfigError::MissingParameter("thresholds"))?;
        for (name, evidence) in [
            ("to_intermediate.min_quiz_score", thresholds.to_intermediate.evidence),
            ("to_advanced.min_quiz_score", thresholds.to_advanced.evidence),
        ] {
            if let Some(gate) = evidence {
                if gate.min_quiz_score > 100 {
                    return Err(ConfigError::OutOfRange {
                        name,
                        reason: format!("quiz scores are percentages, got {}", gate.min_quiz_score),
                    });
                }
            }
        }
        Ok(ProgressionConfig { thresholds })
    }
}
