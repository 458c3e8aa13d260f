//! Boundary codec
//!
//! Text-based intermediate encoding for record values crossing the isolation
//! boundary. Each codec instance is stamped with the context it belongs to:
//! decoding always yields a value whose type identity matches the decoding
//! side, which is the whole point of the serialize/deserialize round trip.

use crate::module::value::{RecordValue, TypeIdentity, HOST_CONTEXT_ID};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Wire form of a record value. Identity is carried as the qualified name
/// only; the context id is reassigned by whichever side decodes.
#[derive(Debug, Serialize, Deserialize)]
struct WireRecord {
    #[serde(rename = "type")]
    type_name: String,
    fields: Map<String, serde_json::Value>,
}

/// Serialization facility bound to one loading context
#[derive(Debug)]
pub(crate) struct BoundaryCodec {
    context_id: u64,
}

impl BoundaryCodec {
    pub fn new(context_id: u64) -> Self {
        Self { context_id }
    }

    /// The codec instance used on the caller side of the boundary
    pub fn host() -> Self {
        Self::new(HOST_CONTEXT_ID)
    }

    pub fn context_id(&self) -> u64 {
        self.context_id
    }

    pub fn encode(&self, record: &RecordValue) -> Result<String, serde_json::Error> {
        serde_json::to_string(&WireRecord {
            type_name: record.identity.qualified_name.clone(),
            fields: record.fields.clone(),
        })
    }

    /// Decode a record; its identity is rebound to this codec's context.
    pub fn decode(&self, text: &str) -> Result<RecordValue, serde_json::Error> {
        let wire: WireRecord = serde_json::from_str(text)?;
        Ok(RecordValue::new(
            TypeIdentity::new(wire.type_name, self.context_id),
            wire.fields,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(context_id: u64) -> RecordValue {
        let mut fields = Map::new();
        fields.insert("retries".to_string(), serde_json::json!(3));
        fields.insert("label".to_string(), serde_json::json!("ok"));
        RecordValue::new(TypeIdentity::new("Targets.WorkOptions", context_id), fields)
    }

    #[test]
    fn round_trip_rebinds_identity_to_decoding_context() {
        let host = BoundaryCodec::host();
        assert_eq!(host.context_id(), HOST_CONTEXT_ID);
        let target = BoundaryCodec::new(42);

        let original = sample_record(HOST_CONTEXT_ID);
        let text = host.encode(&original).unwrap();
        let decoded = target.decode(&text).unwrap();

        assert_eq!(decoded.identity.qualified_name, "Targets.WorkOptions");
        assert_eq!(decoded.identity.context_id, 42);
        assert_eq!(decoded.fields, original.fields);
    }

    #[test]
    fn decode_rejects_malformed_text() {
        let target = BoundaryCodec::new(7);
        assert!(target.decode("not json at all").is_err());
        assert!(target.decode("{\"fields\":{}}").is_err());
    }
}
