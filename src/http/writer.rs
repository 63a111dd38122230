use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;
use crate::store::ContentStore;

/// Chunk size for pulling streamed bodies out of the content store. Keeps
/// each store read short so one large transfer cannot monopolise the serving
/// thread.
const STREAM_CHUNK: usize = 8192;

/// Streaming descriptor: a resolved blob and the cursor of the next byte to
/// send. Stays alive for the connection's whole streaming lifetime.
pub struct BlobStream {
    store: Arc<dyn ContentStore>,
    rowid: u64,
    cursor: u64,
    end: u64,
}

impl BlobStream {
    pub fn new(store: Arc<dyn ContentStore>, rowid: u64, length: u64) -> Self {
        Self {
            store,
            rowid,
            cursor: 0,
            end: length,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.end - self.cursor
    }
}

/// Drains a response to the socket: first the serialized status line and
/// headers (plus any literal body), then the attached blob stream in fixed
/// chunks. Partial writes advance the offset and continue; a write failure
/// tears down only this connection.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    stream: Option<BlobStream>,
}

impl ResponseWriter {
    /// Fully buffered response; the connection closes once it drains.
    pub fn buffered(response: Response) -> Self {
        Self {
            buffer: response.into_bytes(),
            written: 0,
            stream: None,
        }
    }

    /// Header-only response followed by a streamed blob.
    pub fn streaming(header: Response, stream: BlobStream) -> Self {
        Self {
            buffer: header.into_bytes(),
            written: 0,
            stream: Some(stream),
        }
    }

    pub async fn write_to_stream<W>(&mut self, sink: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = sink.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        if let Some(blob) = &mut self.stream {
            while blob.cursor < blob.end {
                let want = STREAM_CHUNK.min((blob.end - blob.cursor) as usize);
                let chunk = blob.store.read_range(blob.rowid, blob.cursor, want)?;

                if chunk.is_empty() {
                    return Err(anyhow::anyhow!(
                        "content store returned no bytes at offset {}",
                        blob.cursor
                    ));
                }

                sink.write_all(&chunk).await?;
                blob.cursor += chunk.len() as u64;
            }
        }

        sink.flush().await?;
        Ok(())
    }
}
