//! Ctrl+C handling for long-running commands.
//!
//! Responsibilities:
//! - Provide a cloneable cancellation token set by the SIGINT listener.
//! - Define the `Cancelled` marker error carried through `anyhow::Result`.
//! - Offer `cancellable!` to race a client future against cancellation.
//!
//! Does NOT handle:
//! - Installing the signal listener (see `main`).
//!
//! Invariants:
//! - Once cancelled, the token stays cancelled.
//! - Racing a watch against the token drops the watch future, which stops
//!   polling immediately.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// The `notified()` future is created before the flag is checked so a
    /// concurrent `cancel()` is never missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

/// Await `$fut`, returning `Err(Cancelled)` from the enclosing function if
/// the token fires first. Evaluates to the future's own `Result`.
macro_rules! cancellable {
    ($fut:expr, $cancel:expr) => {
        tokio::select! {
            res = $fut => res,
            _ = $cancel.cancelled() => {
                return Err($crate::cancellation::Cancelled.into());
            }
        }
    };
}
