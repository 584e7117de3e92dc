//! # Support Utilities

pub mod json;
pub mod strings;
