//! Common utility functions.

pub mod data;
pub mod fs;
