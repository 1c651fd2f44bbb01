//! TCP document server
//!
//! Holds named collections in memory. A replace swaps the whole collection
//! under one write lock, so readers see either the old or the new contents.
//! With a snapshot path the collections survive restarts.

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::protocol::{Document, Reply, Request};

type Collections = BTreeMap<String, Vec<Document>>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    collections: Collections,
}

/// Server state shared across connection tasks
struct ServerState {
    collections: Collections,
    snapshot_path: Option<PathBuf>,
}

/// Document server handle
pub struct DocumentServer {
    addr: SocketAddr,
    state: Arc<RwLock<ServerState>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl DocumentServer {
    /// Start a new server on the given port (0 picks a free one)
    pub async fn start(port: u16, snapshot_path: Option<PathBuf>) -> Result<Self> {
        let collections = match &snapshot_path {
            Some(path) => load_snapshot(path).await?,
            None => Collections::new(),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await?;
        let bound_addr = listener.local_addr()?;

        info!(
            addr = %bound_addr,
            collections = collections.len(),
            "Document server started"
        );

        let (shutdown_tx, _) = broadcast::channel(1);
        let state = Arc::new(RwLock::new(ServerState {
            collections,
            snapshot_path,
        }));

        let shutdown_rx = shutdown_tx.subscribe();
        tokio::spawn(accept_loop(listener, state.clone(), shutdown_rx));

        Ok(DocumentServer {
            addr: bound_addr,
            state,
            shutdown_tx,
        })
    }

    /// Get the server's bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of documents currently stored in a collection
    pub async fn collection_len(&self, collection: &str) -> usize {
        self.state
            .read()
            .await
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Stop accepting connections
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        info!("Document server shutdown initiated");
    }
}

async fn load_snapshot(path: &Path) -> Result<Collections> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let snapshot: Snapshot = serde_json::from_slice(&bytes)
                .map_err(|e| Error::Protocol(format!("Invalid snapshot file: {}", e)))?;
            info!(path = %path.display(), "Loaded collection snapshot");
            Ok(snapshot.collections)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Collections::new()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Write the snapshot next to its final path, then rename over it
async fn save_snapshot(path: &Path, collections: &Collections) -> Result<()> {
    let snapshot = Snapshot {
        collections: collections.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| Error::Protocol(format!("Snapshot serialization failed: {}", e)))?;

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Accept incoming connections
async fn accept_loop(
    listener: TcpListener,
    state: Arc<RwLock<ServerState>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!(addr = %addr, "New connection");
                        tokio::spawn(handle_connection(stream, addr, state.clone()));
                    }
                    Err(e) => {
                        error!(error = %e, "Accept failed");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Accept loop shutting down");
                break;
            }
        }
    }
}

/// Serve requests from one client until it disconnects
async fn handle_connection(mut stream: TcpStream, addr: SocketAddr, state: Arc<RwLock<ServerState>>) {
    loop {
        let request: Request = match read_frame(&mut stream).await {
            Ok(request) => request,
            Err(Error::ConnectionClosed) => {
                debug!(addr = %addr, "Connection closed");
                break;
            }
            Err(e) => {
                warn!(addr = %addr, error = %e, "Read error");
                break;
            }
        };

        let reply = handle_request(request, &state).await;
        if let Err(e) = write_frame(&mut stream, &reply).await {
            debug!(addr = %addr, error = %e, "Write failed");
            break;
        }
    }
}

fn check_documents(documents: &[Document]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for doc in documents {
        if doc.id.is_empty() {
            return Err("Document with empty id".into());
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(format!("Duplicate document id '{}'", doc.id));
        }
    }
    Ok(())
}

async fn handle_request(request: Request, state: &Arc<RwLock<ServerState>>) -> Reply {
    match request {
        Request::ReplaceCollection {
            collection,
            documents,
        } => {
            if let Err(reason) = check_documents(&documents) {
                warn!(collection = %collection, reason = %reason, "Replace refused");
                return Reply::Failed { reason };
            }

            let count = documents.len();
            let mut s = state.write().await;

            if let Some(path) = s.snapshot_path.clone() {
                let mut next = s.collections.clone();
                next.insert(collection.clone(), documents);
                if let Err(e) = save_snapshot(&path, &next).await {
                    error!(error = %e, "Snapshot write failed, collection unchanged");
                    return Reply::Failed {
                        reason: format!("Could not persist collection: {}", e),
                    };
                }
                s.collections = next;
            } else {
                s.collections.insert(collection.clone(), documents);
            }

            info!(collection = %collection, count, "Collection replaced");
            Reply::Replaced { count }
        }
        Request::FetchCollection { collection } => {
            let documents = state
                .read()
                .await
                .collections
                .get(&collection)
                .cloned()
                .unwrap_or_default();
            debug!(collection = %collection, count = documents.len(), "Collection fetched");
            Reply::Snapshot { documents }
        }
        Request::Ping => Reply::Pong,
    }
}
