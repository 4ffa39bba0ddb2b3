//! # Command Log
//!
//! Reading and writing a cart's command history as JSON.
//!
//! ## Format
//! A JSON array of commands in the order they were issued:
//! ```json
//! [
//!   { "action": "add",    "item": { "vehicle": { "name": "TIE", "cost_in_credits": "50000" }, "quantity": 1 } },
//!   { "action": "update", "item": { "vehicle": { "name": "TIE", "cost_in_credits": "50000" }, "quantity": 3 } }
//! ]
//! ```
//! Unrecognized `action` values are kept and fold to a no-op.

use std::path::Path;

use swcart_core::CartCommand;
use tracing::debug;

use crate::error::SessionResult;
use crate::session::CartSession;

/// Parses a JSON command log.
pub fn parse_command_log(json: &str) -> SessionResult<Vec<CartCommand>> {
    let commands: Vec<CartCommand> = serde_json::from_str(json)?;
    debug!(count = commands.len(), "Parsed command log");
    Ok(commands)
}

/// Reads and parses a JSON command log from disk.
pub fn read_command_log(path: &Path) -> SessionResult<Vec<CartCommand>> {
    let contents = std::fs::read_to_string(path)?;
    parse_command_log(&contents)
}

/// Serializes a session's history as a command log.
pub fn to_command_log(session: &CartSession) -> SessionResult<String> {
    let commands: Vec<&CartCommand> = session.commands().collect();
    Ok(serde_json::to_string_pretty(&commands)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use crate::error::SessionError;
    use swcart_core::{CommandKind, Vehicle};

    const LOG: &str = r#"[
        {"action":"add","item":{"vehicle":{"name":"TIE","cost_in_credits":"50000"},"quantity":1}},
        {"action":"add","item":{"vehicle":{"name":"X-Wing","cost_in_credits":149999},"quantity":1}},
        {"action":"update","item":{"vehicle":{"name":"TIE","cost_in_credits":"50000"},"quantity":3}},
        {"action":"wishlist","item":{"vehicle":{"name":"X-Wing","cost_in_credits":"149999"},"quantity":0}},
        {"action":"delete","item":{"vehicle":{"name":"X-Wing","cost_in_credits":"149999"},"quantity":0}}
    ]"#;

    #[test]
    fn test_parse_and_replay() {
        let commands = parse_command_log(LOG).unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[3].kind, CommandKind::Unknown);

        let session = CartSession::replay(&CartConfig::default(), commands);
        assert_eq!(session.revision(), 5);
        assert_eq!(session.cart_items().len(), 1);
        assert_eq!(session.cart_items()[0].quantity, 3);
        assert_eq!(session.sub_total().value(), 150_000.0);
    }

    #[test]
    fn test_malformed_log_is_parse_error() {
        let err = parse_command_log(r#"[{"action":"add"}]"#).unwrap_err();
        assert!(matches!(err, SessionError::LogParseFailed(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("swcart-no-such-log.json");
        let err = read_command_log(&path).unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
    }

    #[test]
    fn test_written_log_reads_back() {
        let mut session = CartSession::default();
        session.add_to_cart(Vehicle::new("Snowspeeder", "unknown"));
        session.add_to_cart(Vehicle::new("TIE", "50000"));

        let log = to_command_log(&session).unwrap();
        let commands = parse_command_log(&log).unwrap();
        let replayed = CartSession::replay(&CartConfig::default(), commands);

        assert_eq!(replayed.cart_items(), session.cart_items());
    }
}
