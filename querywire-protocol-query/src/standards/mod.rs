//! Protocol standards.

pub mod query;
