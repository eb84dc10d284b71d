//! RealTalk chat service client.
//!
//! Turns typed users, rooms, and messages into the service's form
//! parameters, posts them, and decodes each JSON response into an
//! [`Outcome`]. Wire details (endpoints, field names, response shapes) stay
//! inside this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use realtalk_client::{ChatClient, LocationQuery, User};
//!
//! let client = ChatClient::from_env()?;
//! let user = User::new("device-reg-id", "alice", "secret");
//!
//! let outcome = client.authenticate(&user).await;
//! if !outcome.is_success() {
//!     eprintln!("{}: {}", outcome.error_code(), outcome.error_message());
//! }
//!
//! let rooms = client.nearby_rooms(&LocationQuery::new(47.6, -122.3, 500.0)).await;
//! for room in rooms.payload().into_iter().flatten() {
//!     println!("{} ({} members)", room.name, room.member_count);
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod interpret;
pub mod outcome;
pub mod params;
pub mod transport;
pub mod types;

pub use client::ChatClient;
pub use config::{ClientConfig, Endpoints, Operation};
pub use error::{ClientError, Result, TransportError};
pub use outcome::{MessagesOutcome, Outcome, RequestOutcome, RoomsOutcome, ServiceError};
pub use params::Params;
pub use transport::{HttpTransport, Transport};
pub use types::{ChatRoom, LocationQuery, Message, User};
