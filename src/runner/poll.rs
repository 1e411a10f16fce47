use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// One observation of an in-flight operation.
pub enum Probe<T> {
    /// Terminal success, carry the value out of the loop.
    Ready(T),
    /// Not there yet; the string is logged as the progress record.
    Pending(String),
}

/// Polls `probe` at a fixed interval until it reports [`Probe::Ready`],
/// it returns an error, or `cancel` fires.
///
/// The cancellation signal is checked on every iteration boundary and
/// raced against the interval sleep, so a fired token surfaces as
/// [`Error::Cancelled`] within one interval and no further probes are
/// issued. There is deliberately no internal timeout: on a test network
/// the operations either converge or the caller pulls the plug.
pub async fn wait_for<T, F, Fut>(cancel: &CancellationToken, interval: Duration, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe<T>>>,
{
    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        match probe().await? {
            Probe::Ready(value) => return Ok(value),
            Probe::Pending(note) => log::warn!("{}", note),
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn resolves_once_probe_is_ready() {
        let cancel = CancellationToken::new();
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();

        let value = wait_for(&cancel, Duration::from_millis(5), || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Ok(Probe::Pending("still waiting".to_string()))
                } else {
                    Ok(Probe::Ready(42))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn probe_error_is_fatal() {
        let cancel = CancellationToken::new();
        let err = wait_for::<(), _, _>(&cancel, Duration::from_millis(5), || async {
            Err(Error::Rejected { op: "probe", reason: "nope".to_string() })
        })
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Rejected { .. }));
    }

    #[tokio::test]
    async fn fired_token_suppresses_all_probes() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();

        let err = wait_for::<(), _, _>(&cancel, Duration::from_millis(5), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Probe::Pending("unreachable".to_string()))
            }
        })
        .await
        .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancellation_mid_wait_returns_within_one_interval() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let started = tokio::time::Instant::now();
        let err = wait_for::<(), _, _>(&cancel, Duration::from_secs(3600), || async {
            Ok(Probe::Pending("never ready".to_string()))
        })
        .await
        .unwrap_err();

        assert!(err.is_cancelled());
        // Well under the interval: the sleep is raced against the token.
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
