use avro2model::avro::Schema;
use avro2model::validation::validate_schemas;
use avro2model::{GeneratorError, SchemaError, render_module, validate_schema};
use rstest::rstest;
use serde_json::{Value, json};

fn record_with(fields: Value) -> Value {
    json!({"type": "record", "name": "User", "fields": fields})
}

#[test]
fn record_without_fields_is_rejected() {
    let err = validate_schema(&json!({"type": "record", "name": "User"})).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingKey {
            path: "User".to_string(),
            kind: "record".to_string(),
            key: "fields",
        }
    );
}

#[test]
fn render_refuses_invalid_schema() {
    let err = render_module(&[json!({"type": "record", "name": "User"})]).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Schema(SchemaError::MissingKey { key: "fields", .. })
    ));
}

#[test]
fn one_invalid_schema_fails_the_module() {
    let good = record_with(json!([{"name": "id", "type": "long"}]));
    let bad = json!({"type": "record", "name": "Broken", "fields": [{"name": "x"}]});
    let err = render_module(&[good, bad]).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Schema(SchemaError::MissingKey { key: "type", .. })
    ));
}

#[test]
fn unknown_type_reports_its_path() {
    let schema = record_with(json!([
        {"name": "name", "type": "string"},
        {"name": "email", "type": "strin"}
    ]));
    let err = validate_schema(&schema).unwrap_err();
    assert_eq!(err.to_string(), "User.fields[1].type: unknown type 'strin'");
}

#[rstest]
#[case(json!({"type": "enum", "name": "Color", "symbols": ["RED"]}))]
#[case(json!("string"))]
#[case(json!(["null", "string"]))]
#[case(json!({"name": "User", "fields": []}))]
fn top_level_must_be_a_record(#[case] schema: Value) {
    let err = validate_schema(&schema).unwrap_err();
    assert!(matches!(err, SchemaError::NotARecord { .. }), "{err}");
}

#[rstest]
#[case(json!({"type": "fixed", "name": "Hash"}), "size")]
#[case(json!({"type": "array"}), "items")]
#[case(json!({"type": "map"}), "values")]
#[case(json!({"type": "enum", "name": "Color"}), "symbols")]
#[case(json!({"type": "enum", "symbols": ["RED"]}), "name")]
#[case(json!({"type": "record", "name": "Inner"}), "fields")]
#[case(json!({"type": "bytes", "logicalType": "decimal", "scale": 2}), "precision")]
#[case(json!({"items": "string"}), "type")]
fn missing_keys_are_rejected(#[case] field_type: Value, #[case] missing: &str) {
    let schema = record_with(json!([{"name": "value", "type": field_type}]));
    match validate_schema(&schema).unwrap_err() {
        SchemaError::MissingKey { key, path, .. } => {
            assert_eq!(key, missing);
            assert_eq!(path, "User.fields[0].type");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(json!({"type": "fixed", "name": "Hash", "size": -1}), "size")]
#[case(json!({"type": "fixed", "name": "Hash", "size": "16"}), "size")]
#[case(json!({"type": "enum", "name": "Color", "symbols": "RED"}), "symbols")]
#[case(json!({"type": "enum", "name": "Color", "symbols": ["RED"], "default": "BLUE"}), "default")]
#[case(json!({"type": "bytes", "logicalType": "decimal", "precision": 0}), "precision")]
#[case(json!({"type": "bytes", "logicalType": "decimal", "precision": 2, "scale": 3}), "scale")]
#[case(json!({"type": "string", "logicalType": 7}), "logicalType")]
#[case(json!(42), "type")]
fn malformed_values_are_rejected(#[case] field_type: Value, #[case] bad_key: &str) {
    let schema = record_with(json!([{"name": "value", "type": field_type}]));
    match validate_schema(&schema).unwrap_err() {
        SchemaError::InvalidValue { key, .. } => assert_eq!(key, bad_key),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(record_with(json!([{"name": "1st", "type": "string"}])), "1st")]
#[case(record_with(json!([{"name": "first-name", "type": "string"}])), "first-name")]
#[case(json!({"type": "record", "name": "My Record", "fields": []}), "My Record")]
#[case(json!({"type": "record", "name": "User", "namespace": "com..x", "fields": []}), "com..x")]
#[case(
    record_with(json!([{"name": "c", "type": {"type": "enum", "name": "C", "symbols": ["ok", "not ok"]}}])),
    "not ok"
)]
fn invalid_names_are_rejected(#[case] schema: Value, #[case] bad_name: &str) {
    match validate_schema(&schema).unwrap_err() {
        SchemaError::InvalidName { name, .. } => assert_eq!(name, bad_name),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(json!([{"name": "a", "type": "string"}, {"name": "a", "type": "long"}]), "field")]
#[case(json!([{"name": "c", "type": {"type": "enum", "name": "C", "symbols": ["A", "A"]}}]), "symbol")]
#[case(
    json!([
        {"name": "a", "type": {"type": "fixed", "name": "Hash", "size": 4}},
        {"name": "b", "type": {"type": "fixed", "name": "Hash", "size": 4}}
    ]),
    "type"
)]
#[case(json!([{"name": "a", "type": {"type": "record", "name": "User", "fields": []}}]), "type")]
fn duplicates_are_rejected(#[case] fields: Value, #[case] kind: &str) {
    match validate_schema(&record_with(fields)).unwrap_err() {
        SchemaError::DuplicateName { what, .. } => assert_eq!(what, kind),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(json!([]))]
#[case(json!([["null", "string"], "long"]))]
#[case(json!(["string", "string"]))]
#[case(json!([{"type": "array", "items": "long"}, {"type": "array", "items": "string"}]))]
fn malformed_unions_are_rejected(#[case] union: Value) {
    let schema = record_with(json!([{"name": "value", "type": union}]));
    let err = validate_schema(&schema).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidUnion { .. }), "{err}");
}

#[test]
fn named_types_resolve_within_their_namespace() {
    let schema = json!({
        "type": "record",
        "name": "User",
        "namespace": "com.example",
        "fields": [
            {"name": "home", "type": {"type": "record", "name": "Address", "fields": [
                {"name": "street", "type": "string"}
            ]}},
            {"name": "work", "type": "Address"},
            {"name": "billing", "type": "com.example.Address"}
        ]
    });
    let validated = validate_schema(&schema).unwrap();

    assert_eq!(validated.root.fullname(), "com.example.User");
    assert!(validated.named_types.contains_key("com.example.User"));
    let Some(Schema::Record(address)) = validated.named_types.get("com.example.Address") else {
        panic!("Address not registered");
    };
    assert_eq!(address.namespace.as_deref(), Some("com.example"));
    assert_eq!(address.declared_namespace, None);
    assert_eq!(validated.root.declared_namespace.as_deref(), Some("com.example"));

    for field in &validated.root.fields[1..] {
        let Schema::Reference(reference) = &field.schema else {
            panic!("expected a reference for {}", field.name);
        };
        assert_eq!(reference.fullname, "com.example.Address");
        assert!(validated.lookup(reference).is_some());
    }
}

#[test]
fn records_may_refer_to_themselves() {
    let schema = json!({
        "type": "record",
        "name": "Node",
        "fields": [{"name": "next", "type": ["null", "Node"], "default": null}]
    });
    assert!(validate_schema(&schema).is_ok());
}

#[test]
fn types_must_be_defined_before_use() {
    let schema = record_with(json!([
        {"name": "first", "type": "Color"},
        {"name": "second", "type": {"type": "enum", "name": "Color", "symbols": ["RED"]}}
    ]));
    let err = validate_schema(&schema).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownType {
            path: "User.fields[0].type".to_string(),
            token: "Color".to_string(),
        }
    );
}

#[test]
fn schemas_are_validated_independently() {
    let address = json!({"type": "record", "name": "Address", "fields": []});
    let user = record_with(json!([{"name": "home", "type": "Address"}]));
    let err = validate_schemas(&[address, user]).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType { .. }));
}

#[test]
fn unknown_logical_types_fall_back_to_the_base_type() {
    let schema = record_with(json!([
        {"name": "a", "type": {"type": "string", "logicalType": "iso-8601"}},
        {"name": "b", "type": {"type": "long", "logicalType": "uuid"}}
    ]));
    let validated = validate_schema(&schema).unwrap();
    let kinds: Vec<&str> = validated.root.fields.iter().map(|f| f.schema.kind()).collect();
    assert_eq!(kinds, vec!["string", "long"]);
}
