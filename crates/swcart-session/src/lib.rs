//! # swcart-session: The Cart Session
//!
//! Explicitly constructed cart state for one user session. Consumers receive
//! the session (or a [`SharedCart`] handle) by injection; there is no global
//! instance.
//!
//! ## Module Organization
//! ```text
//! swcart_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── CartSession: history, fold, observers
//! ├── shared.rs       ◄─── SharedCart: Arc<Mutex<CartSession>>
//! ├── command_log.rs  ◄─── JSON command logs (read, write, replay)
//! ├── config.rs       ◄─── CartConfig: TOML + environment
//! ├── telemetry.rs    ◄─── tracing subscriber setup
//! └── error.rs        ◄─── SessionError
//! ```
//!
//! ## Example Usage
//! ```rust
//! use swcart_core::Vehicle;
//! use swcart_session::{CartConfig, CartSession};
//!
//! let mut cart = CartSession::new(&CartConfig::default());
//! cart.add_to_cart(Vehicle::new("TIE", "50000"));
//!
//! let line = cart.cart_items()[0].clone();
//! cart.update_in_cart(&line, 3);
//!
//! assert_eq!(cart.cart_items()[0].quantity, 3);
//! assert_eq!(cart.sub_total().value(), 150_000.0);
//! assert_eq!(cart.delivery_fee().value(), 0.0);
//! ```

pub mod command_log;
pub mod config;
pub mod error;
pub mod session;
pub mod shared;
pub mod telemetry;

pub use command_log::{parse_command_log, read_command_log, to_command_log};
pub use config::CartConfig;
pub use error::{SessionError, SessionResult};
pub use session::{CartSession, CartSnapshot, HistoryEntry, ListenerId};
pub use shared::SharedCart;
pub use telemetry::init_tracing;
