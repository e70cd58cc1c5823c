//! Integration tests for the porting layer, driven by JSON payloads of the
//! shape a remote template API returns.

use bladepost::{
    port_templates, MemorySink, MemorySource, PortError, TemplateRecord, TemplateSource,
};

fn source_from_json(payload: &str) -> MemorySource {
    let records: Vec<TemplateRecord> = serde_json::from_str(payload).expect("valid fixture");
    let mut source = MemorySource::new();
    for record in records {
        source.add(record);
    }
    source
}

#[test]
fn ports_records_deserialized_from_json() {
    let source = source_from_json(
        r#"[
            {
                "slug": "order-confirmation",
                "name": "Order Confirmation",
                "html": "<h1>Thanks {{ $user->name }}</h1>@foreach($items as $item)<li>{{ $item->title }}</li>@endforeach"
            },
            {
                "slug": "empty-draft",
                "name": "Empty Draft"
            }
        ]"#,
    );
    let mut sink = MemorySink::new();

    let summary = port_templates(&source, &mut sink).unwrap();

    assert_eq!(summary.converted, ["order-confirmation"]);
    assert_eq!(summary.skipped, ["empty-draft"]);
    assert_eq!(
        sink.get("order-confirmation"),
        Some(
            "<h1>Thanks {{user.name}}</h1>{{#each items}}<li>{{this.title}}</li>{{/each}}"
        )
    );
}

#[test]
fn missing_html_field_defaults_to_an_empty_body() {
    let record: TemplateRecord = serde_json::from_str(r#"{"slug": "s", "name": "N"}"#).unwrap();
    assert_eq!(record.html, "");
    assert!(!record.has_body());
}

#[test]
fn source_errors_propagate() {
    struct FailingSource;
    impl TemplateSource for FailingSource {
        fn list(&self) -> Result<Vec<TemplateRecord>, PortError> {
            Err(PortError::Source("connection refused".into()))
        }
    }

    let mut sink = MemorySink::new();
    let err = port_templates(&FailingSource, &mut sink).unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert!(sink.entries().is_empty());
}

#[test]
fn writes_happen_in_source_order() {
    let source = source_from_json(
        r#"[
            {"slug": "b", "name": "B", "html": "two"},
            {"slug": "a", "name": "A", "html": "one"}
        ]"#,
    );
    let mut sink = MemorySink::new();

    port_templates(&source, &mut sink).unwrap();

    let order: Vec<&str> = sink.entries().iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(order, ["b", "a"]);
}
