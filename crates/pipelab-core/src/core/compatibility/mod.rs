//! # Compatibility Module
//!
//! Decides whether one module's output can feed another module's input.
//!
//! - [`resolver`] - Format-intersection checks and neighbour queries over the catalog
//! - [`notes`] - Curated learning annotations for well-known module pairs
//!
//! Compatibility is directional: `resolve(a, b)` asks whether `a` can feed `b`,
//! which says nothing about `b` feeding `a`.

pub mod notes;
pub mod resolver;
