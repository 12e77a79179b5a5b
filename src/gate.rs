//! One-shot token gate.
//!
//! Connects the `/capture` route of the callback server with the main flow
//! waiting for authorization. The token itself travels through the gate, so
//! there is no side channel to read once the gate opens.
//!
//! ```rust,ignore
//! let (signal, waiter) = gate::token_gate();
//! // hand `signal` to the callback server...
//! let token = waiter.await_token(config::AUTH_TIMEOUT).await?;
//! ```

use std::{fmt, time::Duration};

use tokio::sync::{Mutex, oneshot};

use crate::types::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No token arrived within the waiting window.
    TimedOut(Duration),
    /// The gate already delivered its token.
    AlreadyResolved,
    /// The other half was dropped before a token was delivered.
    Closed,
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::TimedOut(d) => {
                write!(f, "no authorization received within {} seconds", d.as_secs())
            }
            GateError::AlreadyResolved => write!(f, "authorization was already completed"),
            GateError::Closed => write!(f, "authorization channel closed"),
        }
    }
}

impl std::error::Error for GateError {}

/// Creates a connected signal/waiter pair.
pub fn token_gate() -> (TokenSignal, TokenWaiter) {
    let (tx, rx) = oneshot::channel();
    (
        TokenSignal {
            sender: Mutex::new(Some(tx)),
        },
        TokenWaiter { receiver: rx },
    )
}

/// Sending half, shared with the callback route handlers.
#[derive(Debug)]
pub struct TokenSignal {
    sender: Mutex<Option<oneshot::Sender<Token>>>,
}

impl TokenSignal {
    /// Builds a token and delivers it through the gate.
    ///
    /// `make` runs while the lock is held, so the capture instant and the
    /// expiry derived from it belong to the request that actually opens the
    /// gate. Only the first call delivers; later calls return
    /// [`GateError::AlreadyResolved`] without invoking `make`.
    pub async fn send_with<F>(&self, make: F) -> Result<Token, GateError>
    where
        F: FnOnce() -> Token,
    {
        let mut slot = self.sender.lock().await;
        let Some(tx) = slot.take() else {
            return Err(GateError::AlreadyResolved);
        };

        let token = make();
        tx.send(token.clone()).map_err(|_| GateError::Closed)?;
        Ok(token)
    }

    pub async fn is_resolved(&self) -> bool {
        self.sender.lock().await.is_none()
    }
}

/// Receiving half, owned by the flow that waits for authorization.
#[derive(Debug)]
pub struct TokenWaiter {
    receiver: oneshot::Receiver<Token>,
}

impl TokenWaiter {
    /// Blocks until a token arrives or `timeout` elapses.
    ///
    /// Consumes the waiter; a gate resolves at most once.
    pub async fn await_token(self, timeout: Duration) -> Result<Token, GateError> {
        match tokio::time::timeout(timeout, self.receiver).await {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(_)) => Err(GateError::Closed),
            Err(_) => Err(GateError::TimedOut(timeout)),
        }
    }
}
