//! Joining independent fetches into one all-or-nothing result.
//!
//! Callers launch every fetch together (e.g. with `tokio::join!`), wrapping each in
//! [`CompletionOrder::track`]. Nothing is cancelled: every fetch runs to completion.
//! Once all have settled, [`all2`] or [`all3`] hands back either every payload or the
//! failure that settled first, never a partial set.

use crate::error::Error;
use log::*;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stamps each tracked future with the order in which it settled.
#[derive(Debug, Default)]
pub struct CompletionOrder {
    next: AtomicUsize,
}

/// A fetch that has run to completion.
#[derive(Debug)]
pub struct Settled<T> {
    /// 0 for the first future to settle, 1 for the second, and so on.
    pub rank: usize,
    pub result: Result<T, Error>,
}

impl CompletionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn track<T, F>(&self, fetch: F) -> Settled<T>
    where
        F: Future<Output = Result<T, Error>>,
    {
        let result = fetch.await;
        let rank = self.next.fetch_add(1, Ordering::SeqCst);
        Settled { rank, result }
    }
}

fn failure<T>(settled: Settled<T>) -> Option<(usize, Error)> {
    settled.result.err().map(|err| (settled.rank, err))
}

/// The failure with the lowest completion rank.
fn first_failure(failures: impl IntoIterator<Item = Option<(usize, Error)>>) -> Error {
    let first = failures
        .into_iter()
        .flatten()
        .min_by_key(|(rank, _)| *rank);

    match first {
        Some((rank, err)) => {
            debug!("Aggregate failed, first failure settled at position {rank}: {err}");
            err
        }
        None => Error::internal("aggregate reported failure without a failing fetch"),
    }
}

pub fn all2<A, B>(a: Settled<A>, b: Settled<B>) -> Result<(A, B), Error> {
    match (a.result, b.result) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (a_result, b_result) => Err(first_failure([
            failure(Settled { rank: a.rank, result: a_result }),
            failure(Settled { rank: b.rank, result: b_result }),
        ])),
    }
}

pub fn all3<A, B, C>(a: Settled<A>, b: Settled<B>, c: Settled<C>) -> Result<(A, B, C), Error> {
    match (a.result, b.result, c.result) {
        (Ok(a), Ok(b), Ok(c)) => Ok((a, b, c)),
        (a_result, b_result, c_result) => Err(first_failure([
            failure(Settled { rank: a.rank, result: a_result }),
            failure(Settled { rank: b.rank, result: b_result }),
            failure(Settled { rank: c.rank, result: c_result }),
        ])),
    }
}
