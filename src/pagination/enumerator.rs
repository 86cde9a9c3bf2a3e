//! Streaming task enumerator
//!
//! Walks the task list page by page, retrying transient failures, and hands
//! every task to a bounded channel as soon as its page arrives.
//!
//! ```text
//! Fetching ──page(N>0)──▶ Delivering ──▶ Fetching(offset+N)
//!    │  ╲──page(0)──▶ Done
//!    │   ╲─transient, attempt < max──▶ Waiting ──▶ Fetching(attempt+1)
//!    │    ╲─transient, attempt == max / fatal──▶ Failed
//!    ╰──── cancel (Fetching | Waiting | Delivering) ──▶ Cancelled
//! ```
//!
//! A consumer that goes away ends the run with [`Error::ConsumerClosed`],
//! including while a fetch or a retry wait is pending.

use super::retry::{RetryDecision, RetryPolicy};
use super::types::{EnumerationStats, PageSource, PaginationConfig, PaginationState};
use crate::error::{Error, Result};
use crate::types::Task;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

/// Where the enumeration currently is
#[derive(Debug)]
enum State {
    Fetching,
    Waiting { delay: Duration },
    Delivering { page: Vec<Task> },
    Done,
    Failed(Error),
    Cancelled,
}

/// Enumerates every task a [`PageSource`] can produce
#[derive(Debug)]
pub struct TaskEnumerator<S> {
    source: S,
    page_size: u32,
    policy: RetryPolicy,
}

impl<S: PageSource> TaskEnumerator<S> {
    /// Create an enumerator using the given pagination settings
    pub fn new(source: S, config: &PaginationConfig) -> Self {
        Self {
            source,
            page_size: config.page_size.max(1),
            policy: RetryPolicy::from_config(config),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Page size used for every request
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run the enumeration to completion.
    ///
    /// Tasks are sent to `sink` in server order. `sink` is dropped when this
    /// returns, which closes the channel for the consumer whatever the
    /// outcome. Returns the run statistics on exhaustion, otherwise the one
    /// error that stopped it: a fatal fetch error, [`Error::RetriesExhausted`],
    /// [`Error::Cancelled`] or [`Error::ConsumerClosed`].
    pub async fn run(
        self,
        cancel: CancellationToken,
        sink: mpsc::Sender<Task>,
    ) -> Result<EnumerationStats> {
        let mut cursor = PaginationState::new();
        let mut stats = EnumerationStats::default();
        let mut state = State::Fetching;

        loop {
            state = match state {
                State::Fetching => self.fetch(&cancel, &sink, &mut cursor, &mut stats).await,
                State::Waiting { delay } => {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => State::Cancelled,
                        () = sink.closed() => State::Failed(Error::ConsumerClosed),
                        () = tokio::time::sleep(delay) => {
                            cursor.record_failure();
                            stats.retries += 1;
                            State::Fetching
                        }
                    }
                }
                State::Delivering { page } => {
                    Self::deliver(page, &cancel, &sink, &mut cursor, &mut stats).await
                }
                State::Done => {
                    stats.final_offset = cursor.offset;
                    info!(
                        tasks = stats.tasks_delivered,
                        pages = stats.pages_fetched,
                        retries = stats.retries,
                        "task enumeration complete"
                    );
                    return Ok(stats);
                }
                State::Failed(error) => {
                    warn!(offset = cursor.offset, error = %error, "task enumeration failed");
                    return Err(error);
                }
                State::Cancelled => {
                    debug!(offset = cursor.offset, "task enumeration cancelled");
                    return Err(Error::Cancelled);
                }
            };
        }
    }

    async fn fetch(
        &self,
        cancel: &CancellationToken,
        sink: &mpsc::Sender<Task>,
        cursor: &mut PaginationState,
        stats: &mut EnumerationStats,
    ) -> State {
        debug!(offset = cursor.offset, attempt = cursor.attempt, "fetching task page");

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return State::Cancelled,
            () = sink.closed() => return State::Failed(Error::ConsumerClosed),
            result = self.source.fetch_page(self.page_size, cursor.offset) => result,
        };

        match result {
            Ok(page) => {
                stats.pages_fetched += 1;
                cursor.reset_attempts();
                if page.is_empty() {
                    State::Done
                } else {
                    State::Delivering { page }
                }
            }
            Err(error) => match self.policy.decide(&error, cursor.attempt) {
                RetryDecision::Retry { delay } => {
                    warn!(
                        offset = cursor.offset,
                        attempt = cursor.attempt + 1,
                        max_retries = self.policy.max_retries(),
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "transient error listing tasks, retrying"
                    );
                    State::Waiting { delay }
                }
                RetryDecision::GiveUp => State::Failed(Error::RetriesExhausted {
                    attempts: cursor.attempt + 1,
                    source: Box::new(error),
                }),
                RetryDecision::Fail if error.is_cancelled() => State::Cancelled,
                RetryDecision::Fail => State::Failed(error),
            },
        }
    }

    async fn deliver(
        page: Vec<Task>,
        cancel: &CancellationToken,
        sink: &mpsc::Sender<Task>,
        cursor: &mut PaginationState,
        stats: &mut EnumerationStats,
    ) -> State {
        let count = page.len() as u32;

        for task in page {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return State::Cancelled,
                sent = sink.send(task) => {
                    if sent.is_err() {
                        return State::Failed(Error::ConsumerClosed);
                    }
                }
            }
            stats.tasks_delivered += 1;
        }

        cursor.advance(count);
        debug!(delivered = count, next_offset = cursor.offset, "task page delivered");
        State::Fetching
    }
}

impl<S: PageSource + 'static> TaskEnumerator<S> {
    /// Run the enumeration on a background tokio task
    pub fn spawn(self, cancel: &CancellationToken, capacity: usize) -> TaskStream {
        TaskStream::spawn(self, cancel, capacity)
    }
}

/// Tasks produced by an enumerator running in the background.
///
/// Yields tasks in server order and ends when the enumeration stops; call
/// [`finish`](TaskStream::finish) afterwards to learn why it stopped.
/// Dropping the stream cancels the enumeration.
pub struct TaskStream {
    receiver: mpsc::Receiver<Task>,
    handle: JoinHandle<Result<EnumerationStats>>,
    token: CancellationToken,
    guard: DropGuard,
}

impl TaskStream {
    /// Spawn `enumerator` with a channel of `capacity` slots
    pub fn spawn<S: PageSource + 'static>(
        enumerator: TaskEnumerator<S>,
        cancel: &CancellationToken,
        capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let token = cancel.child_token();
        let guard_token = token.clone();
        let guard = token.clone().drop_guard();
        let handle = tokio::spawn(enumerator.run(token, sender));

        Self {
            receiver,
            handle,
            token: guard_token,
            guard,
        }
    }

    /// Receive the next task, `None` once the enumeration has stopped
    pub async fn next_task(&mut self) -> Option<Task> {
        self.receiver.recv().await
    }

    /// Stop the enumeration
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the enumeration to end and return its outcome.
    ///
    /// Tasks still buffered are discarded. A run that had not finished
    /// stops without issuing further requests and ends with
    /// [`Error::ConsumerClosed`].
    pub async fn finish(self) -> Result<EnumerationStats> {
        let TaskStream {
            mut receiver,
            handle,
            token: _,
            guard,
        } = self;
        receiver.close();
        drop(receiver);

        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(Error::Cancelled),
        };
        drop(guard);
        result
    }
}

impl Stream for TaskStream {
    type Item = Task;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Task>> {
        self.receiver.poll_recv(cx)
    }
}

impl std::fmt::Debug for TaskStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStream")
            .field("finished", &self.handle.is_finished())
            .finish_non_exhaustive()
    }
}
