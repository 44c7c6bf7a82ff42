//! Local draft save/restore
//!
//! The editor's working document serializes to a flat JSON blob with no
//! versioning: the document's field set verbatim. On load, missing fields
//! fall back to their defaults and a malformed blob yields a fresh default
//! document instead of an error, so a stale draft can never lock the
//! editor out.

use crate::level::LevelDocument;

/// Serialize a document to the draft blob format
pub fn encode(document: &LevelDocument) -> String {
    // A document is plain data; serialization cannot fail in practice,
    // and an empty blob decodes to a default document anyway
    serde_json::to_string(document).unwrap_or_default()
}

/// Restore a document from a draft blob, falling back to defaults
pub fn decode(blob: &str) -> LevelDocument {
    match serde_json::from_str::<LevelDocument>(blob) {
        Ok(doc) => {
            log::info!(
                "restored draft {:?} ({} obstacles)",
                doc.name,
                doc.obstacles.len()
            );
            doc.sanitized()
        }
        Err(err) => {
            log::warn!("draft blob unreadable ({err}); starting fresh");
            LevelDocument::default()
        }
    }
}
