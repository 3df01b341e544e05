//! Integration test utilities for the moderation engine
//!
//! This crate provides helpers for driving whole conversations through the
//! console gateway against ledgers in a temporary directory.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
