use crate::engine::cancel::CancellationToken;
use crate::engine::error::FoldError;

/// A capability that folds one sequence and answers with raw reply text.
///
/// Implementors must never let sequence content be interpreted as command syntax, and
/// should stop early with [`FoldError::Cancelled`] once `cancel` is set. The reply is
/// returned unparsed; interpreting it is the invoker's job.
pub trait FoldingBackend: Send + Sync {
    /// Sends `sequence` to the folding capability and returns its reply.
    ///
    /// # Errors
    ///
    /// Returns a [`FoldError`] if the capability cannot be reached, fails, exceeds its
    /// time budget, or is cancelled.
    fn execute(&self, sequence: &str, cancel: &CancellationToken) -> Result<String, FoldError>;
}

impl<B: FoldingBackend + ?Sized> FoldingBackend for &B {
    fn execute(&self, sequence: &str, cancel: &CancellationToken) -> Result<String, FoldError> {
        (**self).execute(sequence, cancel)
    }
}

impl<B: FoldingBackend + ?Sized> FoldingBackend for Box<B> {
    fn execute(&self, sequence: &str, cancel: &CancellationToken) -> Result<String, FoldError> {
        (**self).execute(sequence, cancel)
    }
}
