//! Concurrent join of two independent operations.
//!
//! Both operations are spawned as tasks that report into a channel with one
//! slot per operation. The join returns on the first error it reads; the
//! other task keeps running to completion and its result is dropped.

use std::future::Future;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

enum Slot<A, B> {
    First(A),
    Second(B),
}

/// Run `first` and `second` concurrently and wait for both.
///
/// Fails fast with the first error read from the channel. There is no
/// timeout and no cancellation of the operation still in flight.
pub async fn join_pair<A, B, FA, FB>(first: FA, second: FB) -> Result<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
    FA: Future<Output = Result<A>> + Send + 'static,
    FB: Future<Output = Result<B>> + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Result<Slot<A, B>>>(2);
    let tx_second = tx.clone();

    tokio::spawn(async move {
        let _ = tx.send(first.await.map(Slot::First)).await;
    });
    tokio::spawn(async move {
        let _ = tx_second.send(second.await.map(Slot::Second)).await;
    });

    let mut a = None;
    let mut b = None;
    for _ in 0..2 {
        match rx.recv().await {
            Some(Ok(Slot::First(value))) => a = Some(value),
            Some(Ok(Slot::Second(value))) => b = Some(value),
            Some(Err(e)) => return Err(e),
            // A task panicked before reporting
            None => break,
        }
    }

    match (a, b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(Error::Other(
            "concurrent operation ended without reporting a result".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::{oneshot, Notify};

    #[tokio::test]
    async fn test_both_succeed() {
        let (a, b) = join_pair(async { Ok(1) }, async { Ok("two") }).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_runs_concurrently() {
        // Each side waits for the other to start; sequential execution would deadlock.
        let (tx_a, rx_a) = oneshot::channel::<()>();
        let (tx_b, rx_b) = oneshot::channel::<()>();

        let first = async move {
            tx_a.send(()).ok();
            rx_b.await.map_err(|e| Error::Other(e.to_string()))?;
            Ok::<_, Error>("a")
        };
        let second = async move {
            tx_b.send(()).ok();
            rx_a.await.map_err(|e| Error::Other(e.to_string()))?;
            Ok::<_, Error>("b")
        };

        assert_eq!(join_pair(first, second).await.unwrap(), ("a", "b"));
    }

    #[tokio::test]
    async fn test_fails_fast_without_waiting_for_other() {
        let gate = Arc::new(Notify::new());
        let waiter = Arc::clone(&gate);

        let slow = async move {
            waiter.notified().await;
            Ok(1)
        };
        let failing = async { Err::<i32, _>(Error::Other("config fetch failed".to_string())) };

        let err = join_pair(slow, failing).await.unwrap_err();
        assert_eq!(err.to_string(), "config fetch failed");
        gate.notify_one();
    }

    #[tokio::test]
    async fn test_in_flight_operation_runs_to_completion() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let (done_tx, done_rx) = oneshot::channel();

        let slow = async move {
            tokio::task::yield_now().await;
            flag.store(true, Ordering::SeqCst);
            done_tx.send(()).ok();
            Ok(())
        };
        let failing = async { Err::<(), _>(Error::Other("boom".to_string())) };

        assert!(join_pair(slow, failing).await.is_err());
        done_rx.await.unwrap();
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicked_operation_is_error() {
        let err = join_pair(async { Ok(1) }, async {
            if true {
                panic!("operation panicked");
            }
            Ok(2)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }
}
