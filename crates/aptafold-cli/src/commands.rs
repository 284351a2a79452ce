pub mod analyze;
pub mod fold;
