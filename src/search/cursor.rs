// src/search/cursor.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Sort key of the last row of the previous page.
///
/// `created_at` is carried as the string the row serialized to, so the
/// token round-trips without caring about timestamp precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorKey {
    pub created_at: String,
    pub id: String,
}

/// Serialize a cursor key to an opaque token.
///
/// The token is base64 over a two-field JSON object. It is not signed; it
/// only marks where the previous page ended.
pub fn encode(key: &CursorKey) -> String {
    let json = serde_json::to_string(key).unwrap_or_default();
    STANDARD.encode(json)
}

/// Decode a token back into a cursor key.
///
/// Returns `None` for absent input, invalid base64, invalid JSON, a missing
/// field, or a non-string field. Decode failure is never an error: the
/// caller simply starts from the first page.
pub fn decode(raw: Option<&str>) -> Option<CursorKey> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let bytes = STANDARD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}
