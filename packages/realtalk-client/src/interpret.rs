//! Response interpreters.
//!
//! Each interpreter turns the transport result into an [`Outcome`]. A decode
//! fault anywhere in the document, including in a single list entry, yields
//! the generic `REQUEST FAILED` outcome rather than a partial payload.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::outcome::{MessagesOutcome, Outcome, RequestOutcome, RoomsOutcome};
use crate::types::{ChatRoom, Message};

// Response field names
pub const SUCCESS: &str = "success";
pub const ERROR_CODE: &str = "errorCode";
pub const ERROR_MESSAGE: &str = "errorMessage";
pub const MESSAGES: &str = "messages";
pub const ROOMS: &str = "rooms";
pub const MESSAGE_BODY: &str = "body";
pub const MESSAGE_SENDER: &str = "sender";
pub const TIMESTAMP: &str = "timestamp";
pub const ROOM_NAME: &str = "roomName";
pub const ROOM_ID: &str = "roomId";
pub const ROOM_DESCRIPTION: &str = "roomDescription";
pub const ROOM_LATITUDE: &str = "latitude";
pub const ROOM_LONGITUDE: &str = "longitude";
pub const ROOM_CREATOR: &str = "creator";
pub const ROOM_NUM_USERS: &str = "numUsers";

/// Why a response document could not be decoded.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("field `{0}` is out of range")]
    OutOfRange(String),
}

/// Interpret a response that carries no payload.
pub fn interpret_plain(response: Result<Value, TransportError>) -> RequestOutcome {
    interpret(response, |_| Ok(()))
}

/// Interpret a response carrying a `messages` array.
pub fn interpret_messages(response: Result<Value, TransportError>) -> MessagesOutcome {
    interpret(response, |doc| decode_list(doc, MESSAGES, decode_message))
}

/// Interpret a response carrying a `rooms` array.
pub fn interpret_rooms(response: Result<Value, TransportError>) -> RoomsOutcome {
    interpret(response, |doc| decode_list(doc, ROOMS, decode_room))
}

fn interpret<T>(
    response: Result<Value, TransportError>,
    decode_payload: impl FnOnce(&Map<String, Value>) -> Result<T, DecodeError>,
) -> Outcome<T> {
    let doc = match response {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "No response document from RealTalk");
            return Outcome::request_failed();
        }
    };

    match decode(&doc, decode_payload) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(error = %e, "Undecodable RealTalk response");
            Outcome::request_failed()
        }
    }
}

fn decode<T>(
    doc: &Value,
    decode_payload: impl FnOnce(&Map<String, Value>) -> Result<T, DecodeError>,
) -> Result<Outcome<T>, DecodeError> {
    let doc = doc.as_object().ok_or(DecodeError::NotAnObject)?;

    if !success_flag(doc)? {
        let code = string_field(doc, ERROR_CODE)?;
        let message = string_field(doc, ERROR_MESSAGE)?;
        return Ok(Outcome::failure(code, message));
    }

    decode_payload(doc).map(Outcome::Success)
}

/// Read `success` as a boolean or as the text `"true"`.
fn success_flag(doc: &Map<String, Value>) -> Result<bool, DecodeError> {
    match field(doc, SUCCESS)? {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => Ok(text == "true"),
        _ => Err(wrong_type(SUCCESS, "a boolean")),
    }
}

fn decode_list<T>(
    doc: &Map<String, Value>,
    name: &str,
    decode_entry: fn(&Map<String, Value>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let entries = field(doc, name)?
        .as_array()
        .ok_or_else(|| wrong_type(name, "an array"))?;

    entries
        .iter()
        .map(|entry| {
            let entry = entry
                .as_object()
                .ok_or_else(|| wrong_type(name, "an array of objects"))?;
            decode_entry(entry)
        })
        .collect()
}

fn decode_message(entry: &Map<String, Value>) -> Result<Message, DecodeError> {
    let body = string_field(entry, MESSAGE_BODY)?;
    let timestamp = time_field(entry, TIMESTAMP)?;
    let sender = string_field(entry, MESSAGE_SENDER)?;
    Ok(Message::at(body, sender, timestamp))
}

fn decode_room(entry: &Map<String, Value>) -> Result<ChatRoom, DecodeError> {
    let member_count = int_field(entry, ROOM_NUM_USERS)?;
    Ok(ChatRoom {
        name: string_field(entry, ROOM_NAME)?,
        id: string_field(entry, ROOM_ID)?,
        description: string_field(entry, ROOM_DESCRIPTION)?,
        latitude: float_field(entry, ROOM_LATITUDE)?,
        longitude: float_field(entry, ROOM_LONGITUDE)?,
        creator: string_field(entry, ROOM_CREATOR)?,
        member_count: i32::try_from(member_count)
            .map_err(|_| DecodeError::OutOfRange(ROOM_NUM_USERS.to_string()))?,
        created_at: time_field(entry, TIMESTAMP)?,
    })
}

// =============================================================================
// Field access
//
// The service is loose about scalar types: numbers sometimes arrive as
// strings and ids sometimes as numbers. Scalars are coerced accordingly.
// =============================================================================

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value, DecodeError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(name.to_string())),
        Some(value) => Ok(value),
    }
}

fn wrong_type(name: &str, expected: &'static str) -> DecodeError {
    DecodeError::WrongType {
        field: name.to_string(),
        expected,
    }
}

fn string_field(obj: &Map<String, Value>, name: &str) -> Result<String, DecodeError> {
    match field(obj, name)? {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(wrong_type(name, "a string")),
    }
}

fn float_field(obj: &Map<String, Value>, name: &str) -> Result<f64, DecodeError> {
    let value = match field(obj, name)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| wrong_type(name, "a number"))
}

fn int_field(obj: &Map<String, Value>, name: &str) -> Result<i64, DecodeError> {
    let value = match field(obj, name)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    value.ok_or_else(|| wrong_type(name, "an integer"))
}

/// Epoch milliseconds.
fn time_field(obj: &Map<String, Value>, name: &str) -> Result<DateTime<Utc>, DecodeError> {
    let millis = int_field(obj, name)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DecodeError::OutOfRange(name.to_string()))
}
