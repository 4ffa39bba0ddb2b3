//! # Shared Cart Handle
//!
//! A cloneable handle for consumers that live on different threads (a UI
//! event loop and a background catalog refresher, for example).
//!
//! The cart itself does no coordination: the handle serializes access with
//! a mutex, so every mutation still appends exactly one command.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::CartSession;

/// Mutex-guarded, reference-counted cart session.
///
/// ## Why Not RwLock?
/// Most calls mutate, and reads are a handful of arithmetic over a short
/// list. A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SharedCart {
    session: Arc<Mutex<CartSession>>,
}

impl SharedCart {
    pub fn new(session: CartSession) -> Self {
        SharedCart {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use swcart_session::{CartSession, SharedCart};
    ///
    /// let cart = SharedCart::new(CartSession::default());
    /// let totals = cart.with_cart(|c| c.totals());
    /// assert_eq!(totals.item_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartSession) -> R,
    {
        f(&mut self.lock())
    }

    // A listener that panicked mid-notification leaves the history intact
    // (the command was pushed before notifying), so a poisoned lock is usable.
    fn lock(&self) -> MutexGuard<'_, CartSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedCart {
    fn default() -> Self {
        Self::new(CartSession::default())
    }
}
