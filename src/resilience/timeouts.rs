//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap outbound calls (upstream fetch, translation) with a deadline
//! - Cancel operations cleanly on timeout
//! - Bound the gap between chunks of a streamed body
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Timed-out upstream fetches return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use futures_util::{stream, Stream, StreamExt};
use thiserror::Error;

/// Boxed error for streamed bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The wrapped operation did not finish in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {}ms exceeded", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut` with a deadline.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}

/// Fail `body` when no item arrives within `idle`.
///
/// The stream ends after its first error, whether from `body` or a stall.
pub fn with_idle_deadline<S, T, E>(idle: Duration, body: S) -> impl Stream<Item = Result<T, BoxError>> + Send + 'static
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    stream::unfold(Some(Box::pin(body)), move |state| async move {
        let mut body = state?;
        match with_deadline(idle, body.next()).await {
            Ok(Some(Ok(item))) => Some((Ok(item), Some(body))),
            Ok(Some(Err(e))) => Some((Err(e.into()), None)),
            Ok(None) => None,
            Err(stalled) => Some((Err(stalled.into()), None)),
        }
    })
}
