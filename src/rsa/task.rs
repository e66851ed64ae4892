// Background Key Generation
// Runs RSA key generation on the blocking pool with cooperative cancellation

use rand::rngs::OsRng;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{CryptoError, Result};
use crate::util::{CancelToken, CoreConfig};

use super::keygen::{generate_keypair, RsaKeyPair};

/// Handle to a key generation running in the background.
///
/// Await [`join`](KeyGenTask::join) for the key pair. Calling
/// [`cancel`](KeyGenTask::cancel), or dropping the handle before it
/// finishes, stops the prime search at its next candidate.
#[derive(Debug)]
pub struct KeyGenTask {
    handle: Option<JoinHandle<Result<RsaKeyPair>>>,
    cancel: CancelToken,
    bits: u32,
}

impl KeyGenTask {
    /// Start generating a `bits`-bit key pair from OS randomness.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(bits: u32, config: CoreConfig) -> Self {
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let handle = tokio::task::spawn_blocking(move || {
            generate_keypair(bits, &config, &mut OsRng, &token)
        });

        Self {
            handle: Some(handle),
            cancel,
            bits,
        }
    }

    /// Ask the search to stop; `join` then resolves to `Cancelled`
    pub fn cancel(&self) {
        debug!(bits = self.bits, "cancelling key generation");
        self.cancel.cancel();
    }

    /// A token that cancels this task, usable from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the key pair.
    ///
    /// Dropping this future before it completes cancels the search.
    pub async fn join(mut self) -> Result<RsaKeyPair> {
        let outcome = match self.handle.as_mut() {
            Some(handle) => handle.await,
            None => return Err(CryptoError::Cancelled),
        };
        self.handle = None;

        match outcome {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(CryptoError::Cancelled),
        }
    }
}

impl Drop for KeyGenTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}
