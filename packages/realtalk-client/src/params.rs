//! Form parameters sent with each request.
//!
//! Builders map domain types onto the field names the service expects.
//! They never fail and do no validation; empty values are sent as-is.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{ChatRoom, LocationQuery, Message, User};

// Request field names
pub const REGISTRATION_ID: &str = "registrationId";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const NEW_PASSWORD: &str = "newPassword";
pub const NEW_REGISTRATION_ID: &str = "newId";
pub const ROOM_NAME: &str = "roomName";
pub const ROOM_ID: &str = "roomId";
pub const ROOM_DESCRIPTION: &str = "roomDescription";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const RADIUS: &str = "radius";
pub const TIMESTAMP: &str = "timestamp";
pub const BODY: &str = "body";
pub const SENDER: &str = "sender";

/// Ordered name/value pairs, encoded as an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single parameter.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    /// Append a parameter, builder style.
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Append every parameter of `other`, keeping its order.
    pub fn chain(mut self, other: Params) -> Self {
        self.0.extend(other.0);
        self
    }

    /// First value sent under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameter names in send order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|(key, _)| *key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `registrationId`, `username`, `password`
pub fn user_params(user: &User) -> Params {
    Params::new()
        .with(REGISTRATION_ID, user.registration_id.as_str())
        .with(USERNAME, user.username.as_str())
        .with(PASSWORD, user.password.as_str())
}

/// `roomName`, `roomId`, `roomDescription`, `latitude`, `longitude`
pub fn room_params(room: &ChatRoom) -> Params {
    Params::new()
        .with(ROOM_NAME, room.name.as_str())
        .with(ROOM_ID, room.id.as_str())
        .with(ROOM_DESCRIPTION, room.description.as_str())
        .with(LATITUDE, decimal(room.latitude))
        .with(LONGITUDE, decimal(room.longitude))
}

/// `timestamp`, `body`, `sender`
pub fn message_params(message: &Message) -> Params {
    Params::new()
        .with(TIMESTAMP, epoch_millis(&message.timestamp))
        .with(BODY, message.body.as_str())
        .with(SENDER, message.sender.as_str())
}

/// `latitude`, `longitude`, `radius`
pub fn location_params(query: &LocationQuery) -> Params {
    Params::new()
        .with(LATITUDE, decimal(query.latitude))
        .with(LONGITUDE, decimal(query.longitude))
        .with(RADIUS, decimal(query.radius_meters))
}

/// Shortest text that parses back to the same value, always with a decimal
/// point (`10.0`, `12.345`).
pub fn decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// Milliseconds since the Unix epoch, as sent in `timestamp` fields.
pub fn epoch_millis(timestamp: &DateTime<Utc>) -> String {
    timestamp.timestamp_millis().to_string()
}

/// Cursor for incremental chat pulls.
///
/// Returns `None` for times before the Unix epoch, which the server cannot
/// compare against its tick counts.
pub fn since_cursor(since: &DateTime<Utc>) -> Option<String> {
    let millis = since.timestamp_millis();
    (millis >= 0).then(|| millis.to_string())
}
