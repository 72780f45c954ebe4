//! Concurrent fan-out / fan-in of independent fetches.
//!
//! One task is spawned per item, each delivering at most one result into a
//! bounded channel. A supervisor task waits for every worker and only then
//! drops the last sender, which is what ends the consumer's drain loop.

use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Starts one fetch per item and returns the receiving end of the results.
///
/// Failed fetches are logged and deliver nothing. The channel holds at most
/// `buffer_size` undelivered results; once full, finished workers wait for
/// the consumer before completing.
pub fn fan_out<T, R, E, F, Fut>(items: Vec<T>, buffer_size: usize, fetch_one: F) -> mpsc::Receiver<R>
where
    R: Send + 'static,
    E: Display + Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(buffer_size.max(1));

    let workers: Vec<_> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let tx = tx.clone();
            let fetch = fetch_one(item);
            tokio::spawn(async move {
                match fetch.await {
                    Ok(result) => {
                        // The consumer may have stopped listening, nothing to do then.
                        let _ = tx.send(result).await;
                    }
                    Err(err) => warn!(index, error = %err, "Fetch failed, item dropped"),
                }
            })
        })
        .collect();

    tokio::spawn(async move {
        for outcome in join_all(workers).await {
            if let Err(err) = outcome {
                error!(error = %err, "Fetch worker did not complete");
            }
        }
        drop(tx);
    });

    rx
}

/// Fetches every item concurrently and collects the successful results, in
/// completion order. Never fails as a whole: the result is simply shorter
/// than the input when some fetches fail.
pub async fn fetch_all<T, R, E, F, Fut>(items: Vec<T>, buffer_size: usize, fetch_one: F) -> Vec<R>
where
    R: Send + 'static,
    E: Display + Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let expected = items.len();
    let mut rx = fan_out(items, buffer_size, fetch_one);

    let mut results = Vec::with_capacity(expected);
    while let Some(result) = rx.recv().await {
        results.push(result);
    }
    results
}
