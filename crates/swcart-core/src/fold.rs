//! # Cart Fold
//!
//! The single derivation from command history to cart lines.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  history:  [add X-Wing] [add TIE] [update TIE ×3] [delete X-Wing]       │
//! │                 │           │            │               │              │
//! │  lines:    [X1] ──► [X1, T1] ──► [X1, T3] ────────► [T3]                │
//! │                                                                         │
//! │  add     → append to the end (never merges with an existing line)      │
//! │  update  → every line with the same name becomes the command's line    │
//! │  delete  → every line with the same name is dropped                    │
//! │  unknown → lines pass through unchanged                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Applying one command to the previous lines and folding the full history
//! from empty always agree; the session uses the former, replay the latter.

use tracing::warn;

use crate::types::{CartCommand, CartLine, CommandKind};

/// Applies one command to the current lines and returns the next lines.
///
/// The input is never modified; unmatched lines keep their order.
pub fn apply(lines: &[CartLine], command: &CartCommand) -> Vec<CartLine> {
    let target = &command.line.vehicle;

    match command.kind {
        CommandKind::Add => {
            let mut next = Vec::with_capacity(lines.len() + 1);
            next.extend_from_slice(lines);
            next.push(command.line.clone());
            next
        }
        CommandKind::Update => lines
            .iter()
            .map(|line| {
                if line.is_for(target) {
                    command.line.clone()
                } else {
                    line.clone()
                }
            })
            .collect(),
        CommandKind::Delete => lines
            .iter()
            .filter(|line| !line.is_for(target))
            .cloned()
            .collect(),
        CommandKind::Unknown => {
            warn!(vehicle = %target.name, "Ignoring cart command with unknown action");
            lines.to_vec()
        }
    }
}

/// Folds a full history, left to right, starting from an empty cart.
pub fn fold<'a, I>(commands: I) -> Vec<CartLine>
where
    I: IntoIterator<Item = &'a CartCommand>,
{
    commands
        .into_iter()
        .fold(Vec::new(), |lines, command| apply(&lines, command))
}
