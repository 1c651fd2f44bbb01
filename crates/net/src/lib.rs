//! Projtrack Network Library
//!
//! Remote document collections over TCP.
//!
//! # Architecture
//!
//! - **Server**: Holds named collections, optionally snapshotted to disk
//! - **Client**: One request/reply exchange at a time over a single connection
//! - **Protocol**: Length-prefixed JSON messages
//!
//! # Usage
//!
//! ```ignore
//! let server = DocumentServer::start(DEFAULT_PORT, None).await?;
//!
//! let mut client = DocumentClient::connect("127.0.0.1:7341", Duration::from_secs(10)).await?;
//! client.replace_collection("projects", documents).await?;
//! let documents = client.fetch_collection("projects").await?;
//! ```

pub mod client;
pub mod error;
mod frame;
pub mod protocol;
pub mod remote_url;
pub mod server;

pub use client::DocumentClient;
pub use error::{Error, Result};
pub use frame::MAX_FRAME_SIZE;
pub use protocol::{Document, Reply, Request};
pub use remote_url::{RemoteUrl, DEFAULT_COLLECTION};
pub use server::DocumentServer;

/// Default port for document servers
pub const DEFAULT_PORT: u16 = 7341;
