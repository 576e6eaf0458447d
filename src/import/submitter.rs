//! Batch Submitter
//!
//! Submit-in-order, abort-on-first-failure. Each call is awaited before the
//! next one is issued, so a failed batch always has a well-defined prefix of
//! completed items. Nothing is retried.

use std::fmt::Display;
use std::future::Future;

/// Where a sequential batch stopped
#[derive(Debug)]
pub struct BatchFailure<T, R, E> {
    /// Responses for the items that went through, in order
    pub completed: Vec<R>,
    /// Index of the item that failed
    pub index: usize,
    /// The item that failed
    pub item: T,
    pub error: E,
}

impl<T, R, E> BatchFailure<T, R, E> {
    /// Number of items that succeeded before the failure
    pub fn succeeded(&self) -> usize {
        self.completed.len()
    }
}

/// Submit `items` one at a time, stopping at the first error
pub async fn submit_in_order<T, R, E, F, Fut>(
    items: Vec<T>,
    mut submit: F,
) -> Result<Vec<R>, BatchFailure<T, R, E>>
where
    T: Clone,
    E: Display,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let total = items.len();
    let mut completed = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        tracing::debug!(index, total, "Submitting batch item");

        match submit(item.clone()).await {
            Ok(response) => completed.push(response),
            Err(error) => {
                tracing::warn!(
                    index,
                    succeeded = completed.len(),
                    error = %error,
                    "Batch aborted at first failure"
                );
                return Err(BatchFailure {
                    completed,
                    index,
                    item,
                    error,
                });
            }
        }
    }

    Ok(completed)
}
