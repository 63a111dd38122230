//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 subset the content server speaks:
//! request-line-only parsing, literal and streamed responses, and one
//! response per connection (no keep-alive).
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine driving read, route
//!   and write
//! - **`request`**: bounded request accumulator with header-block detection
//! - **`parser`**: classifies a completed request into a route
//! - **`response`**: formats literal and stream-header responses
//! - **`writer`**: drains a response to the socket, pumping streamed blobs
//!   in chunks
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │  Receiving  │ ← Accumulate bytes until a header block completes
//!        └──────┬──────┘
//!               │ Header block complete (or classified early as too long)
//!               ▼
//!        ┌──────────────────┐
//!        │     Sending      │ ← Drain response buffer, then streamed blob
//!        └──────┬───────────┘
//!               │ Response fully sent
//!               ▼
//!        ┌──────────────────┐
//!        │      Closed      │ ← Always: HTTP/1.0, no persistent connections
//!        └──────────────────┘
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
