mod local;

pub use local::LocalFileReader;

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Trait for random access reading from an archive source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer.
    ///
    /// May return fewer bytes than requested; zero means end of source.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;

    /// Fill the whole buffer starting at `offset`.
    ///
    /// Fails if the source ends before the buffer is full.
    async fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_at(offset + filled as u64, &mut buf[filled..]).await?;
            if n == 0 {
                bail!(
                    "Unexpected end of archive at offset {} ({} of {} bytes read)",
                    offset + filled as u64,
                    filled,
                    buf.len()
                );
            }
            filled += n;
        }
        Ok(())
    }
}
