use super::backend::FoldingBackend;
use super::reply::parse_reply;
use crate::core::models::fold::FoldResult;
use crate::engine::cancel::CancellationToken;
use crate::engine::error::FoldError;
use tracing::{debug, warn};

/// Folds sequences through a [`FoldingBackend`] without ever failing the caller.
///
/// Every [`FoldError`] other than cancellation is logged and replaced by
/// [`FoldResult::failed`], so a batch keeps going when individual invocations break.
#[derive(Debug, Clone)]
pub struct FoldingInvoker<B> {
    backend: B,
}

impl<B: FoldingBackend> FoldingInvoker<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Folds `sequence`, returning the sentinel result on any failure.
    pub fn invoke(&self, sequence: &str) -> FoldResult {
        self.invoke_cancellable(sequence, &CancellationToken::new())
            .unwrap_or_else(FoldResult::failed)
    }

    /// Folds `sequence` unless `cancel` is set first.
    ///
    /// Returns `None` when the invocation was cancelled, including failures that
    /// surface after `cancel` was set (a killed child exits non-zero). Every other
    /// failure yields `Some(FoldResult::failed())`.
    pub fn invoke_cancellable(
        &self,
        sequence: &str,
        cancel: &CancellationToken,
    ) -> Option<FoldResult> {
        match self.try_fold(sequence, cancel) {
            Ok(result) => Some(result),
            Err(e) if matches!(e, FoldError::Cancelled) || cancel.is_cancelled() => {
                debug!(length = sequence.len(), error = %e, "Folding cancelled.");
                None
            }
            Err(e) => {
                warn!(
                    length = sequence.len(),
                    error = %e,
                    "Folding failed; recording an empty structure."
                );
                Some(FoldResult::failed())
            }
        }
    }

    /// Folds `sequence` and reports the precise failure instead of downgrading it.
    pub fn try_fold(
        &self,
        sequence: &str,
        cancel: &CancellationToken,
    ) -> Result<FoldResult, FoldError> {
        let reply = self.backend.execute(sequence, cancel)?;
        let parsed = parse_reply(sequence, &reply)?;
        Ok(FoldResult::success(parsed.structure, parsed.energy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedBackend {
        reply: Result<&'static str, fn() -> FoldError>,
    }

    impl FoldingBackend for CannedBackend {
        fn execute(&self, _: &str, cancel: &CancellationToken) -> Result<String, FoldError> {
            if cancel.is_cancelled() {
                return Err(FoldError::Cancelled);
            }
            self.reply.map(str::to_string).map_err(|make| make())
        }
    }

    fn invoker(reply: Result<&'static str, fn() -> FoldError>) -> FoldingInvoker<CannedBackend> {
        FoldingInvoker::new(CannedBackend { reply })
    }

    #[test]
    fn valid_reply_becomes_successful_result() {
        let result = invoker(Ok("GGGAAACCC\n(((...))) ( -1.20)\n")).invoke("GGGAAACCC");
        assert_eq!(
            result,
            FoldResult::success("(((...)))".to_string(), -1.2)
        );
    }

    #[test]
    fn backend_failure_becomes_sentinel() {
        let result = invoker(Err(|| FoldError::Timeout {
            timeout: std::time::Duration::from_secs(1),
        }))
        .invoke("ACGU");
        assert_eq!(result, FoldResult::failed());
    }

    #[test]
    fn unparsable_reply_becomes_sentinel() {
        for reply in ["ACGU\n", "ACGU\n.... (x)", "ACGU\n((...)) (-1.0)"] {
            assert_eq!(invoker(Ok(reply)).invoke("ACGU"), FoldResult::failed());
        }
    }

    #[test]
    fn try_fold_exposes_precise_error() {
        let result = invoker(Ok("ACGU\n")).try_fold("ACGU", &CancellationToken::new());
        assert!(matches!(result, Err(FoldError::MissingStructureLine)));
    }

    #[test]
    fn cancelled_invocation_yields_no_result() {
        let token = CancellationToken::new();
        token.cancel();
        let result = invoker(Ok("ACGU\n.... (0.00)")).invoke_cancellable("ACGU", &token);
        assert!(result.is_none());
    }

    struct InterruptedBackend;

    impl FoldingBackend for InterruptedBackend {
        fn execute(&self, _: &str, cancel: &CancellationToken) -> Result<String, FoldError> {
            cancel.cancel();
            Err(FoldError::NonZeroExit {
                status: "signal: 2 (SIGINT)".to_string(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn failure_after_cancellation_counts_as_cancelled() {
        let token = CancellationToken::new();
        let result = FoldingInvoker::new(InterruptedBackend).invoke_cancellable("ACGU", &token);
        assert!(result.is_none());
    }
}
