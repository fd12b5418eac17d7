//! Strategy definition module
//!
//! Provides the rule descriptors, strategy configuration, and condition
//! evaluation.

pub mod config;
pub mod evaluator;
pub mod rules;

pub use config::*;
pub use evaluator::*;
pub use rules::*;
