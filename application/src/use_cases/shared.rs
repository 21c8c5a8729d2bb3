//! Shared utilities for use cases.

use crate::use_cases::run_roundtable::RunRoundtableError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Check if cancellation has been requested or the session deadline passed.
///
/// Returns `Err(RunRoundtableError::Cancelled)` in either case.
pub(crate) fn check_cancelled(
    token: &Option<CancellationToken>,
    deadline: Option<Instant>,
) -> Result<(), RunRoundtableError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunRoundtableError::Cancelled);
    }
    if let Some(deadline) = deadline
        && Instant::now() >= deadline
    {
        info!("Session deadline reached");
        return Err(RunRoundtableError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn no_token_no_deadline_passes() {
        assert!(check_cancelled(&None, None).is_ok());
    }

    #[test]
    fn cancelled_token_stops() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            check_cancelled(&Some(token), None),
            Err(RunRoundtableError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn passed_deadline_stops() {
        let deadline = Instant::now();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(check_cancelled(&None, Some(deadline)).is_err());
        assert!(check_cancelled(&None, Some(Instant::now() + Duration::from_secs(60))).is_ok());
    }
}
