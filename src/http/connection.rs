use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, trace};

use crate::http::parser::{self, Route, RouteError};
use crate::http::request::{ReadOutcome, RequestBuffer};
use crate::http::response::Response;
use crate::http::writer::{BlobStream, ResponseWriter};
use crate::store::ContentStore;

const GROUP_LIST_BODY: &str = "<html><h1>List of groups</h1></html>\r\n";
const NOT_FOUND_BODY: &str = "<html><h1>Sorry, can't find that here.</h1></html>\r\n";
const MANIFEST_BODY: &str = "<html><h1>A specific manifest</h1></html>\r\n";

pub struct Connection<S> {
    stream: S,
    store: Arc<dyn ContentStore>,
    request: RequestBuffer,
    state: ConnectionState,
}

pub enum ConnectionState {
    /// Accumulating request bytes until a header block completes.
    Receiving,
    /// Draining the response buffer, then any attached blob stream.
    Sending(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, store: Arc<dyn ContentStore>) -> Self {
        Self {
            stream,
            store,
            request: RequestBuffer::new(),
            state: ConnectionState::Receiving,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Receiving => {
                    match self.read_request().await? {
                        Some(writer) => {
                            self.state = ConnectionState::Sending(writer);
                        }
                        None => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Sending(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One response per connection, then close.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a header block completes, then routes the request and
    /// returns the writer for its response. `None` means the peer closed
    /// before completing a request.
    async fn read_request(&mut self) -> anyhow::Result<Option<ResponseWriter>> {
        loop {
            let mut chunk = [0u8; 1024];
            let n = self.stream.read(&mut chunk).await?;

            if n == 0 {
                return Ok(None);
            }
            trace!("received {} bytes", n);

            match self.request.extend(&chunk[..n]) {
                ReadOutcome::Complete => {
                    trace!(
                        request = %String::from_utf8_lossy(self.request.as_bytes()),
                        "header block complete"
                    );
                    let route = parser::parse(self.request.as_bytes());
                    debug!(?route, "routing request");
                    return Ok(Some(self.respond(route)));
                }

                ReadOutcome::TooLong => {
                    debug!("request buffer filled without a complete header block");
                    return Ok(Some(ResponseWriter::buffered(Response::simple(
                        400,
                        RouteError::TooLong.body(),
                    ))));
                }

                ReadOutcome::Incomplete => {}
            }
        }
    }

    fn respond(&self, route: Route) -> ResponseWriter {
        match route {
            Route::ListGroups => {
                ResponseWriter::buffered(Response::simple(200, GROUP_LIST_BODY))
            }

            Route::StreamFile(id) => self.stream_file(&id),

            // Manifest streaming is not implemented; the route answers with
            // a fixed placeholder.
            Route::StreamManifest(_) => {
                ResponseWriter::buffered(Response::simple(400, MANIFEST_BODY))
            }

            Route::Deny(err) => ResponseWriter::buffered(Response::simple(400, err.body())),
        }
    }

    fn stream_file(&self, id: &str) -> ResponseWriter {
        let not_found = || ResponseWriter::buffered(Response::simple(404, NOT_FOUND_BODY));

        let rowid = match self.store.resolve(id) {
            Ok(rowid) => rowid,
            Err(e) => {
                debug!("resolve {} failed: {}", id, e);
                return not_found();
            }
        };

        let length = match self.store.open_length(rowid) {
            Ok(length) => length,
            Err(e) => {
                debug!("open_length for {} failed: {}", id, e);
                return not_found();
            }
        };

        ResponseWriter::streaming(
            Response::stream_header(200, "application/binary", length),
            BlobStream::new(Arc::clone(&self.store), rowid, length),
        )
    }
}
