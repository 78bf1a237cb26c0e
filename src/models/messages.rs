use serde::{Deserialize, Serialize};

use super::{Side, Snapshot};

/// Message sent from the board page to the server
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientMessage {
    pub message_type: String,
    pub square: Option<String>,
    /// Seat of the person clicking; absent on a shared board.
    pub side: Option<Side>,
}

/// Message sent from the server to the board page
#[derive(Serialize, Debug, Clone, Default)]
pub struct ServerMessage {
    pub message_type: String,
    pub snapshot: Option<Snapshot>,
    pub advisory: Option<String>,
    pub advisory_text: Option<String>,
    pub error: Option<String>,
    pub redirect: Option<String>,
}

impl ServerMessage {
    pub fn snapshot(snapshot: Snapshot) -> Self {
        Self {
            message_type: "snapshot".to_string(),
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self {
            message_type: "redirect".to_string(),
            redirect: Some(to.into()),
            ..Self::default()
        }
    }
}

/// Response to a successful `POST /api/setup`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SetupCreated {
    pub setup_id: String,
    pub match_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_with_optional_fields() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"message_type":"select_square","square":"e2"}"#).unwrap();
        assert_eq!(msg.square.as_deref(), Some("e2"));
        assert_eq!(msg.side, None);

        let msg: ClientMessage =
            serde_json::from_str(r#"{"message_type":"select_square","square":"e7","side":"black"}"#)
                .unwrap();
        assert_eq!(msg.side, Some(Side::Black));
    }

    #[test]
    fn redirect_carries_only_the_target() {
        let value = serde_json::to_value(ServerMessage::redirect("/")).unwrap();
        assert_eq!(value["message_type"], "redirect");
        assert_eq!(value["redirect"], "/");
        assert!(value["snapshot"].is_null());
    }
}
