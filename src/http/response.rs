/// Reason phrase for an HTTP status code, known or unknown. The phrases are
/// part of the wire contract with existing mesh clients and must round-trip
/// exactly.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        206 => "Partial Content",
        404 => "Not found",
        _ if status > 4 => "A suffusion of yellow",
        _ => {
            "THE JUDGEMENT OF KING WEN: Chun Signifies Difficulties At Outset, As Of Blade Of Grass Pushing Up Against Stone."
        }
    }
}

/// A formatted HTTP/1.0 response: status line, Content-type, Content-length,
/// blank line, and the literal body when one is attached. Header order and
/// spelling are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    bytes: Vec<u8>,
}

impl Response {
    /// Complete literal response with a text/html body.
    pub fn simple(status: u16, body: &str) -> Self {
        let head = format!(
            "HTTP/1.0 {status:03} {}\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n",
            reason_phrase(status),
            body.len()
        );

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(body.as_bytes());
        Self { status, bytes }
    }

    /// Header-only envelope for a streamed body of `length` bytes. The body
    /// itself follows the blank line on the wire.
    pub fn stream_header(status: u16, mime_type: &str, length: u64) -> Self {
        let head = format!(
            "HTTP/1.0 {status:03} {}\r\nContent-type: {mime_type}\r\nContent-length: {length}\r\n\r\n",
            reason_phrase(status)
        );

        Self {
            status,
            bytes: head.into_bytes(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
