//! Answering gateway requests.
//!
//! [`ArchiveGateway`] turns a request path into the bytes of an archive
//! entry. Whatever goes wrong on the way, be it a malformed path, an
//! unreadable archive, a missing entry or a broken read, the caller gets
//! [`Reply::NotFound`] and the cause only shows up in the debug log.

use anyhow::Result;
use log::debug;
use tokio::sync::Mutex;

use crate::archive::ArchiveSession;
use crate::resolve::ResolvedRequest;

/// The body served for every failed request.
pub const NOT_FOUND_BODY: &str = "<html><body>File not found</body></html>";

/// The outcome of a gateway request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The complete content of the requested entry.
    Entry(Vec<u8>),
    NotFound,
}

impl Reply {
    pub fn is_found(&self) -> bool {
        matches!(self, Reply::Entry(_))
    }

    pub fn body(&self) -> &[u8] {
        match self {
            Reply::Entry(data) => data,
            Reply::NotFound => NOT_FOUND_BODY.as_bytes(),
        }
    }
}

/// Serves archive entries to any number of callers.
///
/// The session is locked for the whole of each request, so requests are
/// handled strictly one after another and an archive switch completes
/// before the next request looks at the session.
#[derive(Default)]
pub struct ArchiveGateway {
    session: Mutex<ArchiveSession>,
}

impl ArchiveGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer a request for the percent-decoded `path`.
    pub async fn respond(&self, path: &str) -> Reply {
        match self.fetch(path).await {
            Ok(data) => {
                debug!("Serving {} ({} bytes)", path, data.len());
                Reply::Entry(data)
            }
            Err(err) => {
                debug!("Not found: {}: {:#}", path, err);
                Reply::NotFound
            }
        }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let request = ResolvedRequest::parse(path)?;
        let mut session = self.session.lock().await;
        let archive = session.ensure_open(request.archive_id()).await?;
        let entry = request.locate(archive.index())?;
        archive.read(entry).await
    }

    /// Number of archive open attempts so far.
    pub async fn opens(&self) -> u64 {
        self.session.lock().await.opens()
    }
}
