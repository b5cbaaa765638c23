//! Command handlers

pub mod active;
pub mod entry;
