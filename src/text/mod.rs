//! Text processing for console output
//!
//! - `ansi`: escape-sequence boundaries and visible width
//! - `wordwrap`: greedy wrapping that keeps escape sequences intact

pub mod ansi;
pub mod wordwrap;

pub use wordwrap::WrapOptions;
