//! Document collection protocol
//!
//! One request, one reply. All messages are JSON-serialized and
//! length-prefixed on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: a key plus a JSON object body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Delete every document in the collection, then write these, atomically
    ReplaceCollection {
        collection: String,
        documents: Vec<Document>,
    },

    /// Read every document in the collection
    FetchCollection { collection: String },

    Ping,
}

/// Server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Reply {
    Replaced { count: usize },

    Snapshot { documents: Vec<Document> },

    /// The request was not applied
    Failed { reason: String },

    Pong,
}
