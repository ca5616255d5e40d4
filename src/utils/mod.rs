//! Utility functions for file handling and array manipulation

pub mod file_utils;
pub mod misc;

// Re-export commonly used utility functions for convenience
pub use file_utils::*;
pub use misc::*;
