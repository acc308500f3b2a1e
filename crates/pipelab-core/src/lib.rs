//! # PipeLab Core Library
//!
//! Pipeline composition and mastery progression for a guided computational-biology
//! learning workbench. Users chain typed computational modules (protein design,
//! structure prediction, docking, ...) into pipelines, and the library tracks how
//! their understanding of each module deepens over time.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Read-only module catalog, the pure compatibility
//!   resolver, the goal suggestion table, the mastery data model and quiz grading.
//!
//! - **[`engine`]: The Logic Core.** Error taxonomy, configuration builders, progress
//!   reporting, the external-reasoning seam with its parse-or-fail boundary, mastery
//!   persistence and the Mastery Progression Engine.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie `core` and `engine`
//!   together: composing a pipeline from a free-text goal and validating a
//!   user-assembled pipeline.

pub mod core;
pub mod engine;
pub mod workflows;
