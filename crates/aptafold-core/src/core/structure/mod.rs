//! Dot-bracket structure utilities.
//!
//! - [`dot_bracket`] - Alphabet checks for structures reported by a folding backend
//! - [`loops`] - Loop-region descriptors computed by a single depth-tracking scan

pub mod dot_bracket;
pub mod loops;

pub use loops::analyze;
