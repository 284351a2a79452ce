//! Folding capability and its invocation contract.
//!
//! The external folding program is reached only through the [`FoldingBackend`] trait,
//! which turns a sequence into raw reply text. [`FoldingInvoker`] owns the rest of the
//! contract: parsing the reply, validating it against the sequence, and downgrading
//! every failure to a sentinel result.
//!
//! - [`backend`] - The raw text channel trait
//! - [`process`] - RNAfold launched as a child process
//! - [`reply`] - Parser for the two-line RNAfold reply
//! - [`invoker`] - Fail-soft wrapper producing [`FoldResult`](crate::core::models::fold::FoldResult)s

pub mod backend;
pub mod invoker;
pub mod process;
pub mod reply;

pub use backend::FoldingBackend;
pub use invoker::FoldingInvoker;
pub use process::RnaFoldProcess;
