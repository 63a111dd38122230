use rhizome_httpd::http::request::{ReadOutcome, RequestBuffer};

const REQUEST: &[u8] = b"GET /rhizome/groups HTTP/1.0\r\n\r\n";

#[test]
fn test_complete_in_single_read() {
    let mut buf = RequestBuffer::new();
    assert_eq!(buf.extend(REQUEST), ReadOutcome::Complete);
    assert_eq!(buf.as_bytes(), REQUEST);
}

#[test]
fn test_byte_at_a_time_agrees_with_single_read() {
    // Detection must not depend on how bytes are chunked across reads: the
    // header block completes exactly at the final terminator byte.
    let mut buf = RequestBuffer::new();
    for (i, byte) in REQUEST.iter().enumerate() {
        let outcome = buf.extend(std::slice::from_ref(byte));
        if i < REQUEST.len() - 1 {
            assert_eq!(outcome, ReadOutcome::Incomplete, "byte {}", i);
        } else {
            assert_eq!(outcome, ReadOutcome::Complete);
        }
    }
}

#[test]
fn test_every_chunking_agrees() {
    for chunk_len in 1..=REQUEST.len() {
        let mut buf = RequestBuffer::new();
        let mut outcome = ReadOutcome::Incomplete;
        for chunk in REQUEST.chunks(chunk_len) {
            outcome = buf.extend(chunk);
        }
        assert_eq!(outcome, ReadOutcome::Complete, "chunk_len {}", chunk_len);
    }
}

#[test]
fn test_terminator_split_across_reads() {
    let mut buf = RequestBuffer::new();
    assert_eq!(
        buf.extend(b"GET /rhizome/groups HTTP/1.0\r"),
        ReadOutcome::Incomplete
    );
    assert_eq!(buf.extend(b"\n\r"), ReadOutcome::Incomplete);
    assert_eq!(buf.extend(b"\n"), ReadOutcome::Complete);
}

#[test]
fn test_bare_lf_terminators() {
    let mut buf = RequestBuffer::new();
    assert_eq!(
        buf.extend(b"GET /rhizome/groups HTTP/1.0\n\n"),
        ReadOutcome::Complete
    );
}

#[test]
fn test_nul_bytes_do_not_break_a_run() {
    // telnet inserts NULs; they must not reset terminator detection.
    let mut buf = RequestBuffer::new();
    assert_eq!(
        buf.extend(b"GET /rhizome/groups HTTP/1.0\r\n\0\r\n"),
        ReadOutcome::Complete
    );
}

#[test]
fn test_ordinary_bytes_reset_the_run() {
    let mut buf = RequestBuffer::new();
    assert_eq!(
        buf.extend(b"GET /rhizome/groups HTTP/1.0\r\nHost: x\r\n"),
        ReadOutcome::Incomplete
    );
    assert_eq!(buf.extend(b"\r\n"), ReadOutcome::Complete);
}

#[test]
fn test_completion_reported_once_and_sticks() {
    let mut buf = RequestBuffer::new();
    assert_eq!(buf.extend(REQUEST), ReadOutcome::Complete);
    let len = buf.len();
    assert_eq!(buf.extend(b"trailing"), ReadOutcome::Complete);
    // Nothing is appended once the header block completed.
    assert_eq!(buf.len(), len);
}

#[test]
fn test_fills_without_terminator() {
    let mut buf = RequestBuffer::with_capacity(64);
    assert_eq!(buf.extend(&[b'a'; 63]), ReadOutcome::Incomplete);
    assert_eq!(buf.extend(&[b'a'; 10]), ReadOutcome::TooLong);
    assert_eq!(buf.len(), 64);
}

#[test]
fn test_terminator_on_last_byte_of_capacity_still_completes() {
    let mut buf = RequestBuffer::with_capacity(8);
    assert_eq!(buf.extend(b"abcdef\n\n"), ReadOutcome::Complete);
}
