//! Operation facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::config::{ClientConfig, Endpoints, Operation};
use crate::error::{Result, TransportError};
use crate::interpret::{interpret_messages, interpret_plain, interpret_rooms};
use crate::outcome::{MessagesOutcome, Outcome, RequestOutcome, RoomsOutcome, ServiceError};
use crate::params::{
    location_params, message_params, room_params, since_cursor, user_params, Params,
    NEW_PASSWORD, NEW_REGISTRATION_ID, TIMESTAMP,
};
use crate::transport::{HttpTransport, Transport};
use crate::types::{ChatRoom, LocationQuery, Message, User};

/// RealTalk service client.
///
/// Each method is one independent round trip: no retries, no caching. The
/// client holds no mutable state and can be cloned and shared freely.
#[derive(Clone)]
pub struct ChatClient {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
}

impl ChatClient {
    pub fn new(endpoints: Endpoints, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoints,
            transport,
        }
    }

    /// Build an HTTP client from [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(config.endpoints(), Arc::new(transport)))
    }

    /// Build an HTTP client from `REALTALK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn authenticate(&self, user: &User) -> RequestOutcome {
        interpret_plain(self.send(Operation::Authenticate, user_params(user)).await)
    }

    pub async fn register(&self, user: &User) -> RequestOutcome {
        interpret_plain(self.send(Operation::Register, user_params(user)).await)
    }

    pub async fn unregister(&self, user: &User) -> RequestOutcome {
        interpret_plain(self.send(Operation::Unregister, user_params(user)).await)
    }

    pub async fn change_password(&self, user: &User, new_password: &str) -> RequestOutcome {
        let params = user_params(user).with(NEW_PASSWORD, new_password);
        interpret_plain(self.send(Operation::ChangePassword, params).await)
    }

    /// Replace the user's device registration id.
    pub async fn change_registration_id(
        &self,
        user: &User,
        new_registration_id: &str,
    ) -> RequestOutcome {
        let params = user_params(user).with(NEW_REGISTRATION_ID, new_registration_id);
        interpret_plain(self.send(Operation::ChangeRegistrationId, params).await)
    }

    // =========================================================================
    // Rooms
    // =========================================================================

    /// Create `room` with `user` as its creator.
    pub async fn create_room(&self, room: &ChatRoom, user: &User) -> RequestOutcome {
        let params = room_params(room).chain(user_params(user));
        interpret_plain(self.send(Operation::CreateRoom, params).await)
    }

    pub async fn join_room(&self, user: &User, room: &ChatRoom) -> RequestOutcome {
        let params = user_params(user).chain(room_params(room));
        interpret_plain(self.send(Operation::JoinRoom, params).await)
    }

    pub async fn leave_room(&self, user: &User, room: &ChatRoom) -> RequestOutcome {
        let params = user_params(user).chain(room_params(room));
        interpret_plain(self.send(Operation::LeaveRoom, params).await)
    }

    pub async fn post_message(
        &self,
        user: &User,
        room: &ChatRoom,
        message: &Message,
    ) -> RequestOutcome {
        let params = user_params(user)
            .chain(room_params(room))
            .chain(message_params(message));
        interpret_plain(self.send(Operation::PostMessage, params).await)
    }

    /// Every message in `room`, in server order.
    pub async fn chat_log(&self, room: &ChatRoom) -> MessagesOutcome {
        interpret_messages(self.send(Operation::ChatLog, room_params(room)).await)
    }

    /// Messages posted to `room` after `since`.
    ///
    /// Times before the Unix epoch fail with `ERROR_INVALID_TIMESTAMP`
    /// without contacting the server.
    pub async fn recent_chat(&self, room: &ChatRoom, since: DateTime<Utc>) -> MessagesOutcome {
        let Some(cursor) = since_cursor(&since) else {
            debug!(since = %since, "Rejected recent chat cursor");
            return Outcome::Failure(ServiceError::invalid_timestamp());
        };

        let params = room_params(room).with(TIMESTAMP, cursor);
        interpret_messages(self.send(Operation::RecentChat, params).await)
    }

    /// Rooms within `query.radius_meters` of the given point.
    pub async fn nearby_rooms(&self, query: &LocationQuery) -> RoomsOutcome {
        interpret_rooms(self.send(Operation::NearbyRooms, location_params(query)).await)
    }

    /// Rooms `user` has joined.
    pub async fn user_rooms(&self, user: &User) -> RoomsOutcome {
        interpret_rooms(self.send(Operation::UserRooms, user_params(user)).await)
    }

    async fn send(
        &self,
        operation: Operation,
        params: Params,
    ) -> std::result::Result<Value, TransportError> {
        let url = self.endpoints.url_for(operation);
        debug!(%operation, %url, params = params.len(), "Sending RealTalk request");
        self.transport.post_form(&url, &params).await
    }
}
