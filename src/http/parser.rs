use thiserror::Error;

/// Longest request the router will look at. Anything longer is answered
/// with 400 before routing.
pub const MAX_REQUEST_MATCH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("request too long")]
    TooLong,

    #[error("content id is not hex")]
    NotHex,

    #[error("could not parse request")]
    Unparsable,
}

impl RouteError {
    /// Literal 400 body for this rejection. These bodies are part of the
    /// wire contract with existing clients.
    pub fn body(&self) -> &'static str {
        match self {
            RouteError::TooLong => "<html><h1>Sorry, your request was too long.</h1></html>\r\n",
            RouteError::NotHex => "<html><h1>That doesn't look like hex to me.</h1></html>\r\n",
            RouteError::Unparsable => "<html><h1>Sorry, couldn't parse your request.</h1></html>\r\n",
        }
    }
}

/// Where a completed request is routed. `Deny` carries the classification
/// of a request the server refuses; every variant maps to one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /rhizome/groups`
    ListGroups,
    /// `GET /rhizome/file/<hex>`: stream the blob with that content id.
    StreamFile(String),
    /// `GET /rhizome/manifest/<hex>`: recognised, but manifest streaming is
    /// not implemented and the route always answers 400.
    StreamManifest(String),
    Deny(RouteError),
}

/// Classifies a completed request. Only the request line is interpreted;
/// any header lines after it are ignored.
pub fn parse(request: &[u8]) -> Route {
    if request.len() >= MAX_REQUEST_MATCH {
        return Route::Deny(RouteError::TooLong);
    }

    let line_end = request
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(request.len());
    let line = match std::str::from_utf8(&request[..line_end]) {
        Ok(line) => line.trim_end_matches(['\r', '\0']),
        Err(_) => return Route::Deny(RouteError::Unparsable),
    };

    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    let (method, path, version) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(m), Some(p), Some(v)) => (m, p, v),
        _ => return Route::Deny(RouteError::Unparsable),
    };

    if !method.eq_ignore_ascii_case("GET") || !version.starts_with("HTTP/1.") {
        return Route::Deny(RouteError::Unparsable);
    }

    route_path(path)
}

fn route_path(path: &str) -> Route {
    if path == "/rhizome/groups" {
        return Route::ListGroups;
    }

    if let Some(id) = path.strip_prefix("/rhizome/file/") {
        return match check_hex(id) {
            Ok(()) => Route::StreamFile(id.to_string()),
            Err(e) => Route::Deny(e),
        };
    }

    if let Some(id) = path.strip_prefix("/rhizome/manifest/") {
        return match check_hex(id) {
            Ok(()) => Route::StreamManifest(id.to_string()),
            Err(e) => Route::Deny(e),
        };
    }

    Route::Deny(RouteError::Unparsable)
}

/// Content ids are validated byte-by-byte before any store lookup: lowercase
/// hex only, so quotes and anything else a client might smuggle into a store
/// query never get that far.
fn check_hex(id: &str) -> Result<(), RouteError> {
    if id.is_empty() {
        return Err(RouteError::NotHex);
    }

    for byte in id.bytes() {
        match byte {
            b'0'..=b'9' | b'a'..=b'f' => {}
            _ => return Err(RouteError::NotHex),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_groups_request() {
        let req = b"GET /rhizome/groups HTTP/1.0\r\n\r\n";
        assert_eq!(parse(req), Route::ListGroups);
    }
}
