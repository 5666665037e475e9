//! The open archive and its entry index.
//!
//! Only one archive is open at any time. [`ArchiveSession`] owns it
//! together with its [`ArchiveIndex`]; both are replaced as a whole
//! whenever a request names a different archive.

mod index;
mod session;

pub use index::ArchiveIndex;
pub use session::{ArchiveSession, OpenArchive};
