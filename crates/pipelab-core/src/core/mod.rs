//! # Core Module
//!
//! Stateless data models and pure functions shared by the engine and the workflows.
//!
//! ## Architecture
//!
//! - **Module Catalog** ([`catalog`]) - Module descriptors and the indexed, read-only registry
//! - **Compatibility** ([`compatibility`]) - Format-intersection resolver and curated learning notes
//! - **Goal Suggestion** ([`suggestion`]) - Keyword table mapping research goals to modules
//! - **Pipelines** ([`pipeline`]) - Draft, node, edge and constraint types produced by composition
//! - **Mastery** ([`mastery`]) - Skill levels, per-(user, module) records and transition rules
//! - **Quizzes** ([`quiz`]) - Grading of multiple-choice quizzes into percentage scores

pub mod catalog;
pub mod compatibility;
pub mod mastery;
pub mod pipeline;
pub mod quiz;
pub mod suggestion;
