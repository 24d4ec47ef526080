//! Canonical JSON serialization helpers.
//!
//! Values go through `serde_json::Value`, whose object map is key-ordered
//! (the `preserve_order` feature is not enabled), and are printed with a
//! fixed two-space indent. Two identical artifacts therefore serialize to
//! identical bytes and hash to the same value.

use serde::{ser::Error as _, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer};

/// Serialize a value into sorted-key, two-space-indented JSON.
pub fn canonical_json_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize,
{
    let sorted = serde_json::to_value(value)?;
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    sorted.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

/// Hex-encoded BLAKE3 hash of a canonical JSON document.
pub fn content_hash_hex(json: &str) -> String {
    hex::encode(blake3::hash(json.as_bytes()).as_bytes())
}
