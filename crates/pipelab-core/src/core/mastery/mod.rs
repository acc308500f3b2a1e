//! # Mastery Module
//!
//! Data model for per-user, per-module learning progress.
//!
//! - [`level`] - The four ordered skill levels
//! - [`record`] - Append-only learning signals for one (user, module) pair
//! - [`rules`] - Forward-only transition rules between adjacent levels
//!
//! Records are written only by [`crate::engine::progression::ProgressionEngine`];
//! everything else reads them.

pub mod level;
pub mod record;
pub mod rules;
