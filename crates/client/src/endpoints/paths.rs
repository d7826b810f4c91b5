//! Path construction for resource endpoints.
//!
//! Identifiers and names coming from users are percent-encoded before they
//! are spliced into a path, so `a/b` addresses one resource instead of a
//! nested one and `x?y` never starts a query string.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters is encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// `{collection}/{id}` with the id encoded.
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), encode_segment(id))
}

/// `{collection}/{id}/{action}` with the id encoded. `action` is a fixed
/// route word and is not encoded.
pub fn action_path(collection: &str, id: &str, action: &str) -> String {
    format!("{}/{}", item_path(collection, id), action.trim_start_matches('/'))
}
