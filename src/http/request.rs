use bytes::BytesMut;

/// Cap on accumulated request bytes. A connection whose header block has not
/// completed by the time the buffer fills is answered with 400 rather than
/// left stalling.
pub const REQUEST_BUFFER_CAP: usize = 8192;

/// Outcome of feeding freshly received bytes into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Header block complete; the request is ready to route.
    Complete,
    /// No terminator run yet, keep reading.
    Incomplete,
    /// Buffer filled without completing a header block.
    TooLong,
}

/// Bounded per-connection request accumulator.
///
/// The header block ends at a run of two line feeds. Carriage returns and
/// NUL bytes do not break a run (telnet and similar tools inject them);
/// every other byte resets it. The run counter carries across `extend`
/// calls, so detection does not depend on how bytes are chunked over reads,
/// and completion is reported exactly once, at the first qualifying run.
pub struct RequestBuffer {
    buf: BytesMut,
    capacity: usize,
    scanned: usize,
    lf_run: u8,
    complete: bool,
}

impl RequestBuffer {
    pub fn new() -> Self {
        Self::with_capacity(REQUEST_BUFFER_CAP)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
            scanned: 0,
            lf_run: 0,
            complete: false,
        }
    }

    /// Appends received bytes and scans the unscanned tail for a terminator
    /// run. Bytes past the first completing terminator are not scanned.
    pub fn extend(&mut self, bytes: &[u8]) -> ReadOutcome {
        if self.complete {
            return ReadOutcome::Complete;
        }

        let room = self.capacity - self.buf.len();
        let take = bytes.len().min(room);
        self.buf.extend_from_slice(&bytes[..take]);

        while self.scanned < self.buf.len() {
            let byte = self.buf[self.scanned];
            self.scanned += 1;

            match byte {
                b'\n' => {
                    self.lf_run += 1;
                    if self.lf_run == 2 {
                        self.complete = true;
                        return ReadOutcome::Complete;
                    }
                }
                b'\r' | 0 => {}
                _ => self.lf_run = 0,
            }
        }

        if self.buf.len() == self.capacity {
            ReadOutcome::TooLong
        } else {
            ReadOutcome::Incomplete
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for RequestBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_crlf_terminator() {
        let mut req = RequestBuffer::new();
        assert_eq!(
            req.extend(b"GET /rhizome/groups HTTP/1.0\r\n\r\n"),
            ReadOutcome::Complete
        );
    }

    #[test]
    fn run_counter_survives_chunk_boundaries() {
        let mut req = RequestBuffer::new();
        assert_eq!(req.extend(b"GET / HTTP/1.0\r\n"), ReadOutcome::Incomplete);
        assert_eq!(req.extend(b"\r"), ReadOutcome::Incomplete);
        assert_eq!(req.extend(b"\n"), ReadOutcome::Complete);
    }
}
