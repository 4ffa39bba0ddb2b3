//! # Cart Session
//!
//! The explicitly owned cart: an append-only command history, the lines it
//! folds into, and the observers that hear about every change.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  Caller                   Command appended          Observers           │
//! │  ──────                   ────────────────          ─────────           │
//! │                                                                         │
//! │  add_to_cart(v) ────────► add {v, 1} ────────┐                          │
//! │                                              │                          │
//! │  update_in_cart(l, q) ──► update {l.v, q} ───┼──► fold::apply ──► notify│
//! │                                              │         │                │
//! │  remove_from_cart(l) ───► delete {l.v, 0} ───┘         ▼                │
//! │                                                  lines, totals          │
//! │                                                                         │
//! │  snapshot() / cart_items() / totals() ──────────► (read only)           │
//! │  subscribe(f)  ─► f(latest) now, f(next) after every append             │
//! │  watch()       ─► tokio watch receiver holding the latest snapshot      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is removed from the history. There is no `clear`: a new cart is a
//! new session.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swcart_core::validation::validate_quantity;
use swcart_core::{
    fold, CartCommand, CartLine, CartTotals, Credits, PricingPolicy, QuantityMode, Vehicle,
};
use tokio::sync::watch;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::CartConfig;

// =============================================================================
// History Entry
// =============================================================================

/// One recorded command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Position in the history, starting at 1.
    pub sequence: usize,
    pub recorded_at: DateTime<Utc>,
    pub command: CartCommand,
}

// =============================================================================
// Snapshot
// =============================================================================

/// The cart as of a given point in the history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Number of commands folded into this snapshot.
    pub revision: usize,
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

// =============================================================================
// Listeners
// =============================================================================

/// Handle returned by [`CartSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CartSnapshot) + Send>;

// =============================================================================
// Cart Session
// =============================================================================

/// A shopping cart owned by one session.
///
/// ## Invariants
/// - `lines` always equals `fold::fold` over the recorded commands
/// - Every append produces exactly one notification, in order
/// - Totals are computed from `lines` on demand, never cached
pub struct CartSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    policy: PricingPolicy,
    quantity_mode: QuantityMode,
    history: Vec<HistoryEntry>,
    lines: Vec<CartLine>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    snapshots: watch::Sender<Arc<CartSnapshot>>,
}

impl CartSession {
    /// Creates an empty session from configuration.
    pub fn new(config: &CartConfig) -> Self {
        Self::with_policy(config.policy(), config.quantity_mode())
    }

    /// Creates an empty session with explicit pricing and quantity handling.
    pub fn with_policy(policy: PricingPolicy, quantity_mode: QuantityMode) -> Self {
        let initial = CartSnapshot {
            revision: 0,
            items: Vec::new(),
            totals: policy.totals(&[]),
        };
        let (snapshots, _) = watch::channel(Arc::new(initial));

        let session = CartSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            policy,
            quantity_mode,
            history: Vec::new(),
            lines: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
            snapshots,
        };

        info!(session_id = %session.id, %quantity_mode, "Cart session created");
        session
    }

    /// Rebuilds a session by dispatching every command of a log in order.
    pub fn replay<I>(config: &CartConfig, commands: I) -> Self
    where
        I: IntoIterator<Item = CartCommand>,
    {
        let mut session = Self::new(config);
        for command in commands {
            session.dispatch(command);
        }
        debug!(session_id = %session.id, revision = session.revision(), "Command log replayed");
        session
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one of `vehicle` as a new line, even if the vehicle is already
    /// in the cart.
    pub fn add_to_cart(&mut self, vehicle: Vehicle) {
        self.dispatch(CartCommand::add(CartLine::new(vehicle, 1)));
    }

    /// Removes every line holding `line`'s vehicle.
    pub fn remove_from_cart(&mut self, line: &CartLine) {
        self.dispatch(CartCommand::delete(CartLine::new(line.vehicle.clone(), 0)));
    }

    /// Sets the quantity of every line holding `line`'s vehicle.
    ///
    /// In [`QuantityMode::Permissive`] the quantity is taken as given, zero
    /// and negative included. In [`QuantityMode::Normalize`] a quantity below
    /// one removes the lines instead.
    pub fn update_in_cart(&mut self, line: &CartLine, quantity: i64) {
        let vehicle = line.vehicle.clone();

        if self.quantity_mode == QuantityMode::Normalize && validate_quantity(quantity).is_err() {
            debug!(vehicle = %vehicle.name, quantity, "Normalizing non-positive update to delete");
            self.dispatch(CartCommand::delete(CartLine::new(vehicle, 0)));
            return;
        }

        self.dispatch(CartCommand::update(CartLine::new(vehicle, quantity)));
    }

    /// Appends a command to the history, folds it in and notifies observers.
    ///
    /// Returns the command's sequence number. Unknown command kinds are
    /// recorded and fold to an unchanged cart.
    pub fn dispatch(&mut self, command: CartCommand) -> usize {
        let sequence = self.history.len() + 1;

        debug!(
            session_id = %self.id,
            sequence,
            action = %command.kind,
            vehicle = %command.line.vehicle.name,
            quantity = command.line.quantity,
            "Cart command"
        );

        self.lines = fold::apply(&self.lines, &command);
        self.history.push(HistoryEntry {
            sequence,
            recorded_at: Utc::now(),
            command,
        });

        self.notify();
        sequence
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// The current lines, in fold order.
    pub fn cart_items(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn sub_total(&self) -> Credits {
        self.policy.sub_total(&self.lines)
    }

    pub fn delivery_fee(&self) -> Credits {
        self.policy.delivery_fee_for(self.sub_total())
    }

    pub fn tax(&self) -> Credits {
        self.policy.tax_for(self.sub_total())
    }

    pub fn total_price(&self) -> Credits {
        self.totals().total_price
    }

    pub fn totals(&self) -> CartTotals {
        self.policy.totals(&self.lines)
    }

    /// Number of commands folded so far.
    pub fn revision(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            revision: self.revision(),
            items: self.lines.clone(),
            totals: self.totals(),
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The recorded commands, oldest first.
    pub fn commands(&self) -> impl Iterator<Item = &CartCommand> + '_ {
        self.history.iter().map(|entry| &entry.command)
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Registers a listener.
    ///
    /// The listener is called immediately with the current snapshot, then once
    /// per appended command.
    pub fn subscribe<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(&CartSnapshot) + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;

        let current = Arc::clone(&self.snapshots.borrow());
        listener(current.as_ref());
        self.listeners.push((id, Box::new(listener)));

        debug!(session_id = %self.id, listener = id.0, "Cart listener subscribed");
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Returns a receiver that always holds the latest snapshot.
    ///
    /// Slow receivers see only the most recent value; use [`subscribe`]
    /// to observe every emission.
    ///
    /// [`subscribe`]: CartSession::subscribe
    pub fn watch(&self) -> watch::Receiver<Arc<CartSnapshot>> {
        self.snapshots.subscribe()
    }

    fn notify(&mut self) {
        let snapshot = Arc::new(self.snapshot());

        for (_, listener) in self.listeners.iter_mut() {
            listener(snapshot.as_ref());
        }

        self.snapshots.send_replace(snapshot);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn quantity_mode(&self) -> QuantityMode {
        self.quantity_mode
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new(&CartConfig::default())
    }
}

impl fmt::Debug for CartSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartSession")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("policy", &self.policy)
            .field("quantity_mode", &self.quantity_mode)
            .field("revision", &self.history.len())
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use swcart_core::CommandKind;

    fn tie() -> Vehicle {
        Vehicle::new("TIE", "50000")
    }

    fn x_wing() -> Vehicle {
        Vehicle::new("X-Wing", "149999")
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = CartSession::default();
        assert!(session.cart_items().is_empty());
        assert_eq!(session.revision(), 0);
        assert_eq!(session.delivery_fee().value(), 999.0);
        assert_eq!(session.total_price().value(), 999.0);
    }

    #[test]
    fn test_each_call_appends_exactly_one_command() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        let line = session.cart_items()[0].clone();
        session.update_in_cart(&line, 2);
        session.remove_from_cart(&line);

        assert_eq!(session.revision(), 3);
        let sequences: Vec<_> = session.history().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        let kinds: Vec<_> = session.commands().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CommandKind::Add, CommandKind::Update, CommandKind::Delete]);
    }

    #[test]
    fn test_remove_records_zero_quantity() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        let line = session.cart_items()[0].clone();
        session.remove_from_cart(&line);

        let last = session.commands().last().unwrap();
        assert_eq!(last.kind, CommandKind::Delete);
        assert_eq!(last.line.quantity, 0);
    }

    #[test]
    fn test_permissive_mode_keeps_negative_quantity() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        let line = session.cart_items()[0].clone();
        session.update_in_cart(&line, -2);

        assert_eq!(session.cart_items()[0].quantity, -2);
        assert_eq!(session.sub_total().value(), -100_000.0);
    }

    #[test]
    fn test_huge_quantity_on_duplicate_lines_does_not_panic() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        session.add_to_cart(tie());
        let line = session.cart_items()[0].clone();

        session.update_in_cart(&line, i64::MAX);

        assert_eq!(session.revision(), 3);
        assert!(session.cart_items().iter().all(|l| l.quantity == i64::MAX));
        assert_eq!(session.totals().total_quantity, i64::MAX);
        assert!(session.sub_total().value() > 0.0);
    }

    #[test]
    fn test_normalize_mode_turns_zero_update_into_delete() {
        let mut session = CartSession::with_policy(PricingPolicy::default(), QuantityMode::Normalize);
        session.add_to_cart(tie());
        session.add_to_cart(x_wing());
        let line = session.cart_items()[0].clone();

        session.update_in_cart(&line, 0);

        assert_eq!(session.cart_items().len(), 1);
        assert_eq!(session.cart_items()[0].vehicle.name, "X-Wing");
        assert_eq!(session.commands().last().unwrap().kind, CommandKind::Delete);

        let remaining = session.cart_items()[0].clone();
        session.update_in_cart(&remaining, 5);
        assert_eq!(session.cart_items()[0].quantity, 5);
    }

    #[test]
    fn test_session_lines_match_full_fold() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        session.add_to_cart(x_wing());
        session.add_to_cart(tie());
        let line = session.cart_items()[0].clone();
        session.update_in_cart(&line, 7);

        let refolded = fold::fold(session.commands());
        assert_eq!(session.cart_items(), refolded.as_slice());
    }

    #[test]
    fn test_unknown_dispatch_is_recorded_but_changes_nothing() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());
        let before = session.cart_items().to_vec();

        let sequence = session.dispatch(CartCommand::new(
            CommandKind::Unknown,
            CartLine::new(tie(), 9),
        ));

        assert_eq!(sequence, 2);
        assert_eq!(session.cart_items(), before.as_slice());
    }

    #[test]
    fn test_subscribe_replays_latest_then_every_change() {
        let mut session = CartSession::default();
        session.add_to_cart(tie());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session.subscribe(move |snapshot| {
            sink.lock().unwrap().push((snapshot.revision, snapshot.items.len()));
        });

        session.add_to_cart(x_wing());
        let line = session.cart_items()[0].clone();
        session.remove_from_cart(&line);

        assert_eq!(*seen.lock().unwrap(), vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = CartSession::default();
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);

        let id = session.subscribe(move |_| *counter.lock().unwrap() += 1);
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));

        session.add_to_cart(tie());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_watch_late_subscriber_sees_latest() {
        let mut session = CartSession::default();
        session.add_to_cart(x_wing());
        session.add_to_cart(tie());

        let receiver = session.watch();
        let latest = receiver.borrow();
        assert_eq!(latest.revision, 2);
        assert_eq!(latest.totals.sub_total.value(), 199_999.0);
    }

    #[tokio::test]
    async fn test_watch_receiver_is_notified() {
        let mut session = CartSession::default();
        let mut receiver = session.watch();

        session.add_to_cart(tie());

        receiver.changed().await.unwrap();
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.items[0].vehicle.name, "TIE");
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut session = CartSession::default();
        session.add_to_cart(x_wing());

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["revision"], 1);
        assert_eq!(json["totals"]["subTotal"], 149999.0);
        assert_eq!(json["totals"]["deliveryFee"], 0.0);
        assert_eq!(json["items"][0]["vehicle"]["cost_in_credits"], "149999");
    }

    #[test]
    fn test_replay_rebuilds_same_cart() {
        let mut original = CartSession::default();
        original.add_to_cart(tie());
        original.add_to_cart(x_wing());
        let line = original.cart_items()[0].clone();
        original.update_in_cart(&line, 3);

        let commands: Vec<_> = original.commands().cloned().collect();
        let replayed = CartSession::replay(&CartConfig::default(), commands);

        assert_eq!(replayed.cart_items(), original.cart_items());
        assert_eq!(replayed.totals(), original.totals());
        assert_ne!(replayed.id(), original.id());
    }
}
