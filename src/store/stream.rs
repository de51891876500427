//! Event stream decoding for realtime subscriptions.
//!
//! The database streams changes as `text/event-stream`. Each event names an
//! operation (`put`, `patch`, `keep-alive`, `cancel`, `auth_revoked`) and,
//! for writes, carries `{"path": ..., "data": ...}` relative to the
//! subscribed location. This module turns raw chunks into typed events and
//! folds writes into a local copy of the subscribed value.

use super::StoreError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw server-sent event.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    pub event: String,
    pub data: String,
}

/// Decoded database event.
///
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
}

#[derive(Deserialize)]
struct WritePayload {
    path: String,
    data: Value,
}

impl StreamEvent {
    /// Interpret a raw event, returning `None` for unknown event names.
    ///
    pub fn parse(raw: &ServerEvent) -> Result<Option<StreamEvent>, StoreError> {
        let event = match raw.event.as_str() {
            "put" | "patch" => {
                let payload: WritePayload = serde_json::from_str(&raw.data)?;
                if raw.event == "put" {
                    StreamEvent::Put {
                        path: payload.path,
                        data: payload.data,
                    }
                } else {
                    StreamEvent::Patch {
                        path: payload.path,
                        data: payload.data,
                    }
                }
            }
            "keep-alive" => StreamEvent::KeepAlive,
            "cancel" => StreamEvent::Cancel(raw.data.trim_matches('"').to_string()),
            "auth_revoked" => StreamEvent::AuthRevoked,
            other => {
                log::debug!("Ignoring unknown stream event '{}'", other);
                return Ok(None);
            }
        };
        Ok(Some(event))
    }
}

/// Incremental decoder; chunks may split lines and multi-byte characters.
///
#[derive(Debug, Default)]
pub struct EventDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event it completed.
    ///
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ServerEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = vec![];
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<ServerEvent> {
        if line.is_empty() {
            let data = self.data.join("\n");
            self.data.clear();
            let event = self.event.take()?;
            return Some(ServerEvent { event, data });
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Replace the value at `path` (relative to `root`) with `data`; `null`
/// removes the entry.
///
pub fn apply_put(root: &mut Value, path: &str, data: Value) {
    let parts = segments(path);
    let Some((last, parents)) = parts.split_last() else {
        *root = data;
        return;
    };

    let mut node = root;
    for part in parents {
        node = child_mut(node, part);
    }
    if data.is_null() {
        match node {
            Value::Object(map) => {
                map.remove(*last);
            }
            Value::Array(list) => {
                if let Ok(index) = last.parse::<usize>() {
                    if index < list.len() {
                        list[index] = Value::Null;
                    }
                }
            }
            _ => {}
        }
    } else {
        *child_mut(node, last) = data;
    }
}

/// Merge each key of `data` into the value at `path`.
///
pub fn apply_patch(root: &mut Value, path: &str, data: Value) {
    match data {
        Value::Object(map) => {
            let base = path.trim_end_matches('/');
            for (key, value) in map {
                apply_put(root, &format!("{}/{}", base, key), value);
            }
        }
        other => apply_put(root, path, other),
    }
}

fn child_mut<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    let index = key.parse::<usize>().ok();
    match (node.as_array().map(|list| list.len()), index) {
        (Some(len), Some(i)) if i < len => {}
        (Some(len), Some(i)) if i == len => {
            if let Value::Array(list) = node {
                list.push(Value::Null);
            }
        }
        (Some(_), _) => {
            if let Value::Array(list) = node.take() {
                let map: Map<String, Value> = list
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect();
                *node = Value::Object(map);
            }
        }
        (None, _) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
        }
    }
    match node {
        // Only still an array when the index is in range.
        Value::Array(list) => &mut list[index.unwrap_or_default()],
        Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
        _ => unreachable!("node was just made a container"),
    }
}
