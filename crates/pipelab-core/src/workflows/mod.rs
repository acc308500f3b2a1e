//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow validates its input,
//! pulls what it needs from the catalog and the engine, and returns a plain
//! serialisable result.
//!
//! - **Composition** ([`compose`]) - Turns a free-text research goal into a
//!   pipeline draft, through the reasoning service when one is configured and the
//!   keyword heuristic otherwise.
//! - **Validation** ([`validate`]) - Checks an ordered, user-assembled list of
//!   modules edge by edge.

pub mod compose;
pub mod validate;
