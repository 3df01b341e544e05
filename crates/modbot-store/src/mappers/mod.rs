//! Entity ↔ Model mappers
//!
//! Conversions between domain entities and their stored JSON shape.

mod report;
