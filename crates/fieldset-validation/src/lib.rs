//! # fieldset-validation
//!
//! Pure validation predicates shared by the fieldset rule engine.
//! Every function here is a side-effect-free check over string input;
//! the rule engine decides what a failure means and how it is presented.

pub mod numeric;
pub mod string;

// Re-export all predicates
pub use numeric::*;
pub use string::*;
