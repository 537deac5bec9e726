//! Document provenance tagging and Extended JSON rendering

use mongodb::bson::{doc, Bson, Document};

use crate::domain::DomainError;

/// Field added to each record in merged output.
pub const META_FIELD: &str = "_meta";

/// Extended JSON flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonMode {
    /// Native JSON numbers where lossless, `{"$date": "<iso>"}` dates
    #[default]
    Relaxed,
    /// Type-preserving wrappers for every non-string scalar
    Canonical,
}

/// Record which database and collection a document came from.
///
/// An existing `_meta` field is replaced.
pub fn tag_provenance(document: &mut Document, database: &str, collection: &str) {
    document.insert(
        META_FIELD,
        doc! { "db": database, "collection": collection },
    );
}

/// Renders documents as single-line Extended JSON records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentRenderer {
    pub mode: JsonMode,
}

impl DocumentRenderer {
    pub fn new(mode: JsonMode) -> Self {
        Self { mode }
    }

    /// Render one document as compact JSON followed by `\n`.
    ///
    /// A record never spans more than one line. `collection` only labels
    /// the error.
    pub fn render_line(&self, collection: &str, document: Document) -> Result<Vec<u8>, DomainError> {
        let value = match self.mode {
            JsonMode::Relaxed => Bson::Document(document).into_relaxed_extjson(),
            JsonMode::Canonical => Bson::Document(document).into_canonical_extjson(),
        };

        let mut line = serde_json::to_vec(&value).map_err(|e| DomainError::Render {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;
        line.push(b'\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    fn parse(line: &[u8]) -> Value {
        serde_json::from_slice(line).expect("valid json")
    }

    #[test]
    fn given_document_when_tagging_then_adds_meta() {
        let mut document = doc! { "name": "ada" };
        tag_provenance(&mut document, "shop", "users");

        let meta = document.get_document(META_FIELD).expect("meta present");
        assert_eq!(meta.get_str("db").unwrap(), "shop");
        assert_eq!(meta.get_str("collection").unwrap(), "users");
        assert_eq!(document.get_str("name").unwrap(), "ada");
    }

    #[test]
    fn given_existing_meta_when_tagging_then_replaces_it() {
        let mut document = doc! { "_meta": "stale" };
        tag_provenance(&mut document, "shop", "orders");

        assert_eq!(document.len(), 1);
        assert_eq!(
            document.get_document(META_FIELD).unwrap().get_str("collection").unwrap(),
            "orders"
        );
    }

    #[test]
    fn given_relaxed_mode_when_rendering_then_numbers_stay_native() {
        let renderer = DocumentRenderer::new(JsonMode::Relaxed);
        let line = renderer
            .render_line("c", doc! { "n": 1_i32, "big": 5_i64, "s": "x" })
            .unwrap();

        assert_eq!(line.last(), Some(&b'\n'));
        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
        assert_eq!(parse(&line), json!({ "n": 1, "big": 5, "s": "x" }));
    }

    #[test]
    fn given_canonical_mode_when_rendering_then_numbers_are_wrapped() {
        let renderer = DocumentRenderer::new(JsonMode::Canonical);
        let line = renderer
            .render_line("c", doc! { "n": 1_i32, "big": 5_i64 })
            .unwrap();

        assert_eq!(
            parse(&line),
            json!({ "n": { "$numberInt": "1" }, "big": { "$numberLong": "5" } })
        );
    }

    #[test]
    fn given_object_id_when_rendering_then_uses_oid_wrapper() {
        let oid = ObjectId::new();
        let renderer = DocumentRenderer::default();
        let line = renderer.render_line("c", doc! { "_id": oid }).unwrap();

        assert_eq!(parse(&line), json!({ "_id": { "$oid": oid.to_hex() } }));
    }

    #[test]
    fn given_nested_document_when_rendering_canonical_then_stays_on_one_line() {
        let renderer = DocumentRenderer::new(JsonMode::Canonical);
        let line = renderer
            .render_line(
                "c",
                doc! { "a": { "b": [1, 2, { "c": "multi\nline" }] }, "d": 2.5 },
            )
            .unwrap();

        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
        assert_eq!(line.last(), Some(&b'\n'));
        let value = parse(&line);
        assert_eq!(value["a"]["b"][2]["c"], "multi\nline");
        assert_eq!(value["d"]["$numberDouble"], "2.5");
    }
}
