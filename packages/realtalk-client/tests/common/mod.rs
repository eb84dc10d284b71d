// Common test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use realtalk_client::{ChatClient, Endpoints, Params, Transport, TransportError};
use serde_json::Value;

pub const BASE_URL: &str = "http://realtalk.test/";

/// Install a tracing subscriber that respects RUST_LOG.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Arguments captured from a post_form call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum Reply {
    Document(Value),
    Unreachable,
    NotJson,
}

/// Transport returning a canned reply and recording every call.
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: Reply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn replying(doc: Value) -> Self {
        Self::with_reply(Reply::Document(doc))
    }

    /// Every call fails as if the server were down.
    pub fn unreachable() -> Self {
        Self::with_reply(Reply::Unreachable)
    }

    /// Every call gets a body that is not JSON.
    pub fn not_json() -> Self {
        Self::with_reply(Reply::NotJson)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no calls recorded")
    }

    /// Client wired to this transport against [`BASE_URL`].
    pub fn client(&self) -> ChatClient {
        init_tracing();
        ChatClient::new(Endpoints::new(BASE_URL), Arc::new(self.clone()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_form(&self, url: &str, params: &Params) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params.clone(),
        });

        match &self.reply {
            Reply::Document(doc) => Ok(doc.clone()),
            Reply::Unreachable => Err(TransportError::Network("connection refused".into())),
            Reply::NotJson => Err(TransportError::InvalidJson(
                "expected value at line 1 column 1".into(),
            )),
        }
    }
}
