//! # Engine Module
//!
//! Stateful collaborators and configuration that sit between the pure [`crate::core`]
//! layer and the public [`crate::workflows`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Composer settings and progression thresholds, built with validation
//! - **Error Handling** ([`error`]) - Caller-visible failures of the library
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting for long phases
//! - **External Reasoning** ([`reasoning`]) - Client seam, prompt construction and the parse-or-fail boundary
//! - **Persistence** ([`store`]) - Mastery record storage with upsert semantics
//! - **Progression** ([`progression`]) - The Mastery Progression Engine

pub mod config;
pub mod error;
pub mod progress;
pub mod progression;
pub mod reasoning;
pub mod store;
