//! Evidence extraction from feature records

use flowsentry_core::{EvidenceEntry, FeatureRecord};

/// Marker substituted when a watched field is absent from the record
pub const MISSING_FIELD_MARKER: &str = "N/A";

/// Outcome of a single field lookup
///
/// Lookups are total: a schema mismatch between the feature source and the
/// watched-field list surfaces as `Absent`, never as a fault.
enum FieldLookup {
    Present(String),
    Absent,
}

fn lookup(record: &FeatureRecord, name: &str) -> FieldLookup {
    match record.get(name) {
        Some(value) => FieldLookup::Present(value.to_string()),
        None => FieldLookup::Absent,
    }
}

/// Extract evidence for the watched fields, preserving the caller-supplied
/// field order
///
/// Never fails; missing fields are substituted with
/// [`MISSING_FIELD_MARKER`] so alert logging is never blocked by a schema
/// mismatch.
pub fn extract<S: AsRef<str>>(record: &FeatureRecord, fields: &[S]) -> Vec<EvidenceEntry> {
    fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            let value = match lookup(record, field) {
                FieldLookup::Present(value) => value,
                FieldLookup::Absent => MISSING_FIELD_MARKER.to_string(),
            };
            EvidenceEntry::new(field, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_preserves_configured_order() {
        let record = FeatureRecord::new()
            .with_field("Flow Duration", 120.0)
            .with_field("Destination Port", 443.0)
            .with_field("Bwd Packet Length Std", 12.5);

        let fields = ["Bwd Packet Length Std", "Destination Port", "Flow Duration"];
        let evidence = extract(&record, &fields);

        assert_eq!(
            evidence,
            vec![
                EvidenceEntry::new("Bwd Packet Length Std", "12.5"),
                EvidenceEntry::new("Destination Port", "443"),
                EvidenceEntry::new("Flow Duration", "120"),
            ]
        );
    }

    #[test]
    fn test_extract_substitutes_missing_fields() {
        let record = FeatureRecord::new().with_field("A", 10.0);

        let evidence = extract(&record, &["A", "B"]);

        assert_eq!(
            evidence,
            vec![
                EvidenceEntry::new("A", "10"),
                EvidenceEntry::new("B", MISSING_FIELD_MARKER),
            ]
        );
    }

    #[test]
    fn test_extract_never_fails_on_empty_record() {
        let record = FeatureRecord::new();

        let evidence = extract(&record, &["Destination Port"]);

        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].value, MISSING_FIELD_MARKER);
    }

    #[test]
    fn test_extract_with_no_watched_fields() {
        let record = FeatureRecord::new().with_field("A", 10.0);
        let fields: [&str; 0] = [];

        assert!(extract(&record, &fields).is_empty());
    }
}
