//! Session Management Module
//!
//! Tracks the single in-flight local/remote comparison.

pub mod comparison;

pub use comparison::{ComparisonSession, SessionSlot};
