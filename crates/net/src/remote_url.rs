//! Remote collection URLs
//!
//! Format: projtrack://<host>:<port>/<collection>

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::DEFAULT_PORT;

const SCHEME: &str = "projtrack://";

/// Collection used when a URL does not name one
pub const DEFAULT_COLLECTION: &str = "projects";

/// Location of a remote document collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    pub host: String,
    pub port: u16,
    pub collection: String,
}

impl RemoteUrl {
    pub fn new(host: impl Into<String>, port: u16, collection: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            collection: collection.into(),
        }
    }

    /// `host:port` suitable for connecting, with IPv6 hosts bracketed
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Parse from URL string
    ///
    /// The port defaults to [`DEFAULT_PORT`] and the collection to
    /// [`DEFAULT_COLLECTION`].
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s
            .trim()
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::Protocol("Invalid remote URL: missing projtrack:// prefix".into()))?;

        let (authority, collection) = match rest.split_once('/') {
            Some((authority, collection)) => (authority, collection.trim_end_matches('/')),
            None => (rest, ""),
        };
        if collection.contains('/') {
            return Err(Error::Protocol(format!(
                "Invalid remote URL: bad collection '{}'",
                collection
            )));
        }

        let (host, port) = split_authority(authority)?;
        if host.is_empty() {
            return Err(Error::Protocol("Invalid remote URL: empty host".into()));
        }

        let collection = if collection.is_empty() {
            DEFAULT_COLLECTION
        } else {
            collection
        };

        Ok(Self::new(host, port, collection))
    }
}

fn split_authority(authority: &str) -> Result<(&str, u16)> {
    let bad_port = |p: &str| Error::Protocol(format!("Invalid remote URL: bad port '{}'", p));

    if let Some(rest) = authority.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| Error::Protocol("Invalid remote URL: unclosed '['".into()))?;
        return match after.strip_prefix(':') {
            Some(p) => Ok((host, p.parse().map_err(|_| bad_port(p))?)),
            None if after.is_empty() => Ok((host, DEFAULT_PORT)),
            None => Err(bad_port(after)),
        };
    }

    match authority.rsplit_once(':') {
        Some((host, p)) => Ok((host, p.parse().map_err(|_| bad_port(p))?)),
        None => Ok((authority, DEFAULT_PORT)),
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", SCHEME, self.authority(), self.collection)
    }
}

impl FromStr for RemoteUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
