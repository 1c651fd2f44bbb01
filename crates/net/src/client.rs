//! TCP client for a document server

use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::protocol::{Document, Reply, Request};

/// Connection to a document server
///
/// Every exchange is bounded by the timeout given at connect time.
pub struct DocumentClient {
    stream: TcpStream,
    timeout: Duration,
}

impl DocumentClient {
    /// Connect to `host:port`
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        info!(addr = %addr, "Connecting to document server");

        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::Timeout(timeout))??;

        Ok(Self { stream, timeout })
    }

    async fn exchange(&mut self, request: &Request) -> Result<Reply> {
        let timeout = self.timeout;
        let stream = &mut self.stream;
        let round_trip = async move {
            write_frame(&mut *stream, request).await?;
            read_frame::<_, Reply>(&mut *stream).await
        };

        match tokio::time::timeout(timeout, round_trip).await {
            Ok(Ok(Reply::Failed { reason })) => Err(Error::Rejected(reason)),
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(timeout)),
        }
    }

    /// Replace the whole collection; returns the number of documents written
    pub async fn replace_collection(
        &mut self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize> {
        let request = Request::ReplaceCollection {
            collection: collection.to_string(),
            documents,
        };
        match self.exchange(&request).await? {
            Reply::Replaced { count } => {
                debug!(collection = %collection, count, "Collection replaced");
                Ok(count)
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Read every document in the collection
    pub async fn fetch_collection(&mut self, collection: &str) -> Result<Vec<Document>> {
        let request = Request::FetchCollection {
            collection: collection.to_string(),
        };
        match self.exchange(&request).await? {
            Reply::Snapshot { documents } => {
                debug!(collection = %collection, count = documents.len(), "Collection fetched");
                Ok(documents)
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Round trip time of a ping
    pub async fn ping(&mut self) -> Result<Duration> {
        let started = Instant::now();
        match self.exchange(&Request::Ping).await? {
            Reply::Pong => Ok(started.elapsed()),
            other => Err(unexpected(&other)),
        }
    }
}

fn unexpected(reply: &Reply) -> Error {
    Error::Protocol(format!("Unexpected reply: {:?}", reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::DocumentServer;
    use serde_json::{json, Map};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn doc(id: &str, name: &str) -> Document {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(id));
        fields.insert("projectName".into(), json!(name));
        Document::new(id, fields)
    }

    async fn connect(server: &DocumentServer) -> DocumentClient {
        let addr = format!("127.0.0.1:{}", server.addr().port());
        DocumentClient::connect(&addr, TIMEOUT).await.unwrap()
    }

    #[tokio::test]
    async fn test_push_then_pull() {
        let server = DocumentServer::start(0, None).await.unwrap();
        let mut client = connect(&server).await;

        let pushed: Vec<Document> = (1..=6)
            .map(|i| doc(&format!("id-{}", i), &format!("Project {}", i)))
            .collect();
        let count = client
            .replace_collection("projects", pushed.clone())
            .await
            .unwrap();
        assert_eq!(count, 6);

        let pulled = client.fetch_collection("projects").await.unwrap();
        let mut pulled_ids: Vec<_> = pulled.iter().map(|d| d.id.clone()).collect();
        let mut pushed_ids: Vec<_> = pushed.iter().map(|d| d.id.clone()).collect();
        pulled_ids.sort();
        pushed_ids.sort();
        assert_eq!(pulled_ids, pushed_ids);
        assert_eq!(pulled[0].fields["projectName"], "Project 1");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_rejected_replace_is_an_error() {
        let server = DocumentServer::start(0, None).await.unwrap();
        let mut client = connect(&server).await;

        let result = client
            .replace_collection("projects", vec![doc("same", "A"), doc("same", "B")])
            .await;
        assert!(matches!(result, Err(Error::Rejected(_))));

        // The connection stays usable after a refused request
        client.ping().await.unwrap();
        server.shutdown();
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let server = DocumentServer::start(0, None).await.unwrap();
        let port = server.addr().port();
        server.shutdown();
        drop(server);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let result = DocumentClient::connect(&format!("127.0.0.1:{}", port), TIMEOUT).await;
        assert!(result.is_err());
    }
}
