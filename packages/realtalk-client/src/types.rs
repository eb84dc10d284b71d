//! Domain types exchanged with the RealTalk service.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// User
// =============================================================================

/// Credentials identifying a user to the service.
///
/// Every authenticated operation sends all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Push registration identifier of the user's device
    pub registration_id: String,

    pub username: String,

    pub password: String,
}

impl User {
    pub fn new(
        registration_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Chat Room
// =============================================================================

/// Snapshot of a chat room as known to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub name: String,

    /// Server-assigned identity of the room
    pub id: String,

    pub description: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Username of the room's creator
    pub creator: String,

    /// Number of users currently joined
    pub member_count: i32,

    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    /// Describe a room locally, e.g. before asking the server to create it.
    ///
    /// Creator and member count are filled in by the server.
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            description: description.into(),
            latitude,
            longitude,
            creator: String::new(),
            member_count: 0,
            created_at: now_millis(),
        }
    }
}

// =============================================================================
// Message
// =============================================================================

/// A chat message. Timestamps carry millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub body: String,

    /// Username of the sender
    pub sender: String,

    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn new(body: impl Into<String>, sender: impl Into<String>) -> Self {
        Self::at(body, sender, now_millis())
    }

    /// Create a message with an explicit timestamp.
    pub fn at(
        body: impl Into<String>,
        sender: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            body: body.into(),
            sender: sender.into(),
            timestamp,
        }
    }
}

// =============================================================================
// Location Query
// =============================================================================

/// Search area for nearby rooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl LocationQuery {
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }
}

/// Current time truncated to the millisecond precision the server stores.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_has_millisecond_precision() {
        let message = Message::new("hello", "alice");
        assert_eq!(message.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn local_room_leaves_server_fields_empty() {
        let room = ChatRoom::new("Lobby", "r-1", "General chat", 47.6, -122.3);

        assert_eq!(room.creator, "");
        assert_eq!(room.member_count, 0);
        assert_eq!(room.latitude, 47.6);
    }

    #[test]
    fn user_serializes_camel_case() {
        let user = User::new("reg-1", "alice", "secret");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["registrationId"], "reg-1");
        assert_eq!(json["username"], "alice");
    }
}
