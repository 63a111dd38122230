use rhizome_httpd::http::response::{Response, reason_phrase};

#[test]
fn test_reason_phrases_round_trip_exactly() {
    assert_eq!(reason_phrase(200), "OK");
    assert_eq!(reason_phrase(206), "Partial Content");
    assert_eq!(reason_phrase(404), "Not found");
}

#[test]
fn test_unknown_status_reason_phrase() {
    assert_eq!(reason_phrase(400), "A suffusion of yellow");
    assert_eq!(reason_phrase(500), "A suffusion of yellow");
    assert_eq!(reason_phrase(999), "A suffusion of yellow");
}

#[test]
fn test_tiny_status_reason_phrase() {
    // Unreachable for real HTTP statuses, but part of the table's contract.
    assert!(reason_phrase(2).starts_with("THE JUDGEMENT OF KING WEN"));
    assert!(reason_phrase(4).starts_with("THE JUDGEMENT OF KING WEN"));
    assert_eq!(reason_phrase(5), "A suffusion of yellow");
}

#[test]
fn test_simple_response_exact_bytes() {
    let body = "<html><h1>List of groups</h1></html>\r\n";
    let response = Response::simple(200, body);

    let expected = format!(
        "HTTP/1.0 200 OK\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    assert_eq!(response.as_bytes(), expected.as_bytes());
    assert_eq!(response.status(), 200);
}

#[test]
fn test_simple_response_404() {
    let body = "<html><h1>Sorry, can't find that here.</h1></html>\r\n";
    let response = Response::simple(404, body);

    let text = String::from_utf8(response.into_bytes()).unwrap();
    assert!(text.starts_with("HTTP/1.0 404 Not found\r\n"));
    assert!(text.ends_with(body));
}

#[test]
fn test_simple_response_400_uses_default_phrase() {
    let response = Response::simple(400, "nope");
    let text = String::from_utf8(response.into_bytes()).unwrap();
    assert!(text.starts_with("HTTP/1.0 400 A suffusion of yellow\r\n"));
}

#[test]
fn test_simple_response_content_length_matches_body() {
    let body = "0123456789";
    let response = Response::simple(200, body);
    let text = String::from_utf8(response.into_bytes()).unwrap();
    assert!(text.contains("Content-length: 10\r\n"));
}

#[test]
fn test_stream_header_exact_bytes() {
    let response = Response::stream_header(200, "application/binary", 12345);
    assert_eq!(
        response.as_bytes(),
        b"HTTP/1.0 200 OK\r\nContent-type: application/binary\r\nContent-length: 12345\r\n\r\n"
    );
}

#[test]
fn test_stream_header_carries_no_body() {
    let response = Response::stream_header(200, "application/binary", 1 << 32);
    let text = String::from_utf8(response.into_bytes()).unwrap();
    assert!(text.ends_with("\r\n\r\n"));
    assert!(text.contains(&format!("Content-length: {}\r\n", 1u64 << 32)));
}

#[test]
fn test_status_is_zero_padded() {
    let response = Response::simple(99, "x");
    let text = String::from_utf8(response.into_bytes()).unwrap();
    assert!(text.starts_with("HTTP/1.0 099 "));
}
