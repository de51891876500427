//! Realtime database adapter.
//!
//! This module wraps the REST protocol of a hosted, path-addressed realtime
//! database behind four primitives: point reads, pushes, sets and
//! subscriptions.

mod client;
mod error;
mod resource;
mod stream;

pub use error::StoreError;
pub use resource::*;
pub use stream::{apply_patch, apply_put, EventDecoder, ServerEvent, StreamEvent};

use client::Client;
use log::*;
use reqwest::{Method, Response};
use serde::Serialize;
use serde_json::Value;

/// Responsible for asynchronous interaction with the database, including
/// transformation of response data into explicitly-defined types.
///
#[derive(Clone)]
pub struct Database {
    client: Client,
}

impl Database {
    /// Returns a new instance for the given database URL and optional auth
    /// token.
    ///
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Database {
        debug!("Initializing database client for {}...", base_url);
        Database {
            client: Client::new(base_url, auth_token),
        }
    }

    /// Returns the value at `path`, or `None` when nothing is stored there.
    ///
    pub async fn get_once(&self, path: &str) -> Result<Option<Value>, StoreError> {
        debug!("Reading '{}'...", path);
        let value: Value = self.client.call(Method::GET, path, None).await?.json().await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    /// Append `record` under `path` with a generated key and return the key.
    ///
    pub async fn push<T: Serialize>(&self, path: &str, record: &T) -> Result<String, StoreError> {
        debug!("Pushing new record to '{}'...", path);
        let body = serde_json::to_value(record)?;
        let response: Value = self
            .client
            .call(Method::POST, path, Some(&body))
            .await?
            .json()
            .await?;
        response
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::MissingKey {
                path: path.to_owned(),
            })
    }

    /// Overwrite the value at `path` with `record`.
    ///
    pub async fn set<T: Serialize>(&self, path: &str, record: &T) -> Result<(), StoreError> {
        debug!("Setting record at '{}'...", path);
        let body = serde_json::to_value(record)?;
        self.client.call(Method::PUT, path, Some(&body)).await?;
        Ok(())
    }

    /// Open a realtime subscription to `path`.
    ///
    pub async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        debug!("Subscribing to '{}'...", path);
        let response = self.client.stream(path).await?;
        Ok(Subscription {
            response,
            decoder: EventDecoder::new(),
            pending: vec![],
            snapshot: Value::Null,
        })
    }
}

/// Live subscription yielding the full value at its path after each change.
///
pub struct Subscription {
    response: Response,
    decoder: EventDecoder,
    pending: Vec<ServerEvent>,
    snapshot: Value,
}

impl Subscription {
    /// Wait for the next change and return the updated snapshot, or `None`
    /// once the server ends the stream.
    ///
    pub async fn next_snapshot(&mut self) -> Result<Option<Value>, StoreError> {
        loop {
            while !self.pending.is_empty() {
                let raw = self.pending.remove(0);
                match StreamEvent::parse(&raw)? {
                    Some(StreamEvent::Put { path, data }) => {
                        apply_put(&mut self.snapshot, &path, data);
                        return Ok(Some(self.snapshot.clone()));
                    }
                    Some(StreamEvent::Patch { path, data }) => {
                        apply_patch(&mut self.snapshot, &path, data);
                        return Ok(Some(self.snapshot.clone()));
                    }
                    Some(StreamEvent::KeepAlive) | None => {}
                    Some(StreamEvent::Cancel(reason)) => {
                        return Err(StoreError::StreamClosed(reason))
                    }
                    Some(StreamEvent::AuthRevoked) => return Err(StoreError::AuthRevoked),
                }
            }
            match self.response.chunk().await? {
                Some(chunk) => self.pending.extend(self.decoder.feed(&chunk)),
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn get_once_success() -> Result<(), StoreError> {
        let token: Uuid = UUIDv4.fake();
        let item: StoredItem = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/items/-Na.json")
                    .query_param("auth", &token.to_string());
                then.status(200).json_body(serde_json::to_value(&item).unwrap());
            })
            .await;

        let database = Database::new(&server.base_url(), Some(&token.to_string()));
        let value = database.get_once("items/-Na").await?;
        mock.assert_async().await;
        let fetched: StoredItem = serde_json::from_value(value.unwrap())?;
        assert_eq!(fetched.name, item.name);
        Ok(())
    }

    #[tokio::test]
    async fn get_once_missing() -> Result<(), StoreError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/items/-Nx.json");
                then.status(200).body("null");
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        assert_eq!(database.get_once("items/-Nx").await?, None);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn get_once_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/items.json");
                then.status(401)
                    .json_body(json!({ "error": "Permission denied" }));
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        let result = database.get_once("items").await;
        mock.assert_async().await;
        match result {
            Err(StoreError::ApiError { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Permission denied");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn push_returns_generated_key() -> Result<(), StoreError> {
        let item = StoredItem {
            category: "Drinks".to_string(),
            name: "Iced Tea".to_string(),
            is_single_sized: true,
            sizes: vec![Variant {
                kind: DEFAULT_SIZE.to_string(),
                price: 15.0,
                cost: 10.0,
                stocks: 5,
            }],
        };

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/items.json").json_body(json!({
                    "category": "Drinks",
                    "name": "Iced Tea",
                    "is_single_sized": true,
                    "sizes": [{ "type": "Default", "price": 15.0, "cost": 10.0, "stocks": 5 }]
                }));
                then.status(200).json_body(json!({ "name": "-NnewKey" }));
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        let key = database.push("items", &item).await?;
        mock.assert_async().await;
        assert_eq!(key, "-NnewKey");
        Ok(())
    }

    #[tokio::test]
    async fn push_without_key() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/items.json");
                then.status(200).json_body(json!({}));
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        let result = database.push("items", &StoredItem::default()).await;
        assert!(matches!(result, Err(StoreError::MissingKey { .. })));
    }

    #[tokio::test]
    async fn set_overwrites_path() -> Result<(), StoreError> {
        let item: StoredItem = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/items/-Na.json")
                    .json_body(serde_json::to_value(&item).unwrap());
                then.status(200).json_body(serde_json::to_value(&item).unwrap());
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        database.set("items/-Na", &item).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn subscribe_yields_snapshots() -> Result<(), StoreError> {
        let body = concat!(
            "event: put\n",
            "data: {\"path\":\"/\",\"data\":{\"-Na\":{\"name\":\"Tea\"}}}\n\n",
            "event: keep-alive\n",
            "data: null\n\n",
            "event: patch\n",
            "data: {\"path\":\"/-Na\",\"data\":{\"category\":\"Drinks\"}}\n\n",
        );

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/items.json");
                then.status(200)
                    .header("content-type", "text/event-stream")
                    .body(body);
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        let mut subscription = database.subscribe("items").await?;
        mock.assert_async().await;

        let first = subscription.next_snapshot().await?;
        assert_eq!(first, Some(json!({ "-Na": { "name": "Tea" } })));
        let second = subscription.next_snapshot().await?;
        assert_eq!(
            second,
            Some(json!({ "-Na": { "name": "Tea", "category": "Drinks" } }))
        );
        assert_eq!(subscription.next_snapshot().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn subscribe_cancelled() -> Result<(), StoreError> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/items.json");
                then.status(200)
                    .header("content-type", "text/event-stream")
                    .body("event: cancel\ndata: \"Permission denied\"\n\n");
            })
            .await;

        let database = Database::new(&server.base_url(), None);
        let mut subscription = database.subscribe("items").await?;
        let result = subscription.next_snapshot().await;
        assert!(matches!(
            result,
            Err(StoreError::StreamClosed(reason)) if reason == "Permission denied"
        ));
        Ok(())
    }
}
