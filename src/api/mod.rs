//! Fluent builder entry points for file level embedding and extraction.

pub mod embed;
pub mod extract;
