use avro2model::{BaseClass, GeneratorError, ModelGenerator, render_module};
use rstest::rstest;
use serde_json::{Value, json};

fn render_default(field_type: Value, default: Value) -> Result<String, GeneratorError> {
    let schema = json!({
        "type": "record",
        "name": "Sample",
        "fields": [{"name": "value", "type": field_type, "default": default}]
    });
    render_module(&[schema])
}

fn field_line(module: &str) -> &str {
    module
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("value: "))
        .unwrap_or_else(|| panic!("no field in:\n{module}"))
}

#[rstest]
#[case(json!("string"), json!("hello"), "value: str = \"hello\"")]
#[case(json!("string"), json!("say \"hi\""), "value: str = \"say \\\"hi\\\"\"")]
#[case(json!("bytes"), json!("\u{00ff}\u{0000}a"), "value: bytes = b\"\\xff\\x00a\"")]
#[case(json!("boolean"), json!(true), "value: bool = True")]
#[case(json!("boolean"), json!(false), "value: bool = False")]
#[case(json!("long"), json!(10), "value: int = 10")]
#[case(json!("double"), json!(1.5), "value: float = 1.5")]
#[case(json!("null"), json!(null), "value: None = None")]
#[case(json!(["null", "string"]), json!(null), "value: typing.Optional[str] = None")]
#[case(json!(["string", "null"]), json!("x"), "value: typing.Optional[str] = \"x\"")]
#[case(json!(["long", "string"]), json!(3), "value: typing.Union[int, str] = 3")]
#[case(
    json!({"type": "string", "logicalType": "uuid"}),
    json!("d7a2f1e4-1c2b-4f39-9d52-0c2f4b0b7e11"),
    "value: uuid.UUID = \"d7a2f1e4-1c2b-4f39-9d52-0c2f4b0b7e11\""
)]
#[case(
    json!({"type": "enum", "name": "Suit", "symbols": ["spades", "hearts"]}),
    json!("hearts"),
    "value: Suit = Suit.HEARTS"
)]
#[case(
    json!({"type": "fixed", "name": "two", "size": 2}),
    json!("ab"),
    "value: types.confixed(size=2) = b\"ab\""
)]
fn renders_scalar_defaults(#[case] field_type: Value, #[case] default: Value, #[case] expected: &str) {
    let module = render_default(field_type, default).unwrap();
    assert_eq!(field_line(&module), expected);
}

#[rstest]
#[case(
    json!({"type": "array", "items": "long"}),
    json!([]),
    "value: typing.List[int] = dataclasses.field(default_factory=list)"
)]
#[case(
    json!({"type": "array", "items": "long"}),
    json!([1, 2]),
    "value: typing.List[int] = dataclasses.field(default_factory=lambda: [1, 2])"
)]
#[case(
    json!({"type": "map", "values": "string"}),
    json!({}),
    "value: typing.Dict[str, str] = dataclasses.field(default_factory=dict)"
)]
#[case(
    json!({"type": "map", "values": "string"}),
    json!({"a": "b"}),
    "value: typing.Dict[str, str] = dataclasses.field(default_factory=lambda: {'a': 'b'})"
)]
#[case(
    json!({"type": "array", "items": ["null", "boolean"]}),
    json!([true, null]),
    "value: typing.List[typing.Optional[bool]] = dataclasses.field(default_factory=lambda: [True, None])"
)]
fn collection_defaults_are_never_shared(
    #[case] field_type: Value,
    #[case] default: Value,
    #[case] expected: &str,
) {
    let module = render_default(field_type, default).unwrap();
    assert_eq!(field_line(&module), expected);
}

#[test]
fn pydantic_collection_defaults_use_field() {
    let schema = json!({
        "type": "record",
        "name": "Sample",
        "fields": [{"name": "value", "type": {"type": "array", "items": "string"}, "default": []}]
    });
    let module = ModelGenerator::new()
        .with_base_class(BaseClass::BaseModel)
        .render(&schema)
        .unwrap();
    assert_eq!(field_line(&module), "value: typing.List[str] = Field(default_factory=list)");
    assert!(module.lines().any(|line| line == "from pydantic import Field"));
}

#[rstest]
#[case(json!({"type": "int", "logicalType": "date"}), json!(0), "datetime.date(1970, 1, 1)")]
#[case(json!({"type": "int", "logicalType": "date"}), json!(19000), "datetime.date(2022, 1, 8)")]
#[case(json!({"type": "int", "logicalType": "time-millis"}), json!(3723000), "datetime.time(1, 2, 3)")]
#[case(
    json!({"type": "int", "logicalType": "time-millis"}),
    json!(3723004),
    "datetime.time(1, 2, 3, 4000)"
)]
#[case(
    json!({"type": "long", "logicalType": "time-micros"}),
    json!(3723000005i64),
    "datetime.time(1, 2, 3, 5)"
)]
#[case(
    json!({"type": "long", "logicalType": "timestamp-millis"}),
    json!(1640995200000i64),
    "datetime.datetime(2022, 1, 1, 0, 0, 0, tzinfo=datetime.timezone.utc)"
)]
#[case(
    json!({"type": "long", "logicalType": "timestamp-micros"}),
    json!(1640995200000001i64),
    "datetime.datetime(2022, 1, 1, 0, 0, 0, 1, tzinfo=datetime.timezone.utc)"
)]
fn temporal_defaults_use_constructors(
    #[case] field_type: Value,
    #[case] default: Value,
    #[case] expected: &str,
) {
    let module = render_default(field_type, default).unwrap();
    assert!(
        field_line(&module).ends_with(&format!(" = {expected}")),
        "unexpected field line in:\n{module}"
    );
    assert!(module.lines().any(|line| line == "import datetime"));
}

#[rstest]
#[case(4, 2, json!("10.00"), "10.00")]
#[case(4, 2, json!("10"), "10.00")]
#[case(4, 2, json!("-1.5"), "-1.50")]
#[case(1, 0, json!("7"), "7")]
#[case(1, 0, json!("0"), "0")]
#[case(4, 2, json!("0.5"), "0.50")]
#[case(60, 2, json!("1"), "1.00")]
#[case(4, 2, json!("\u{0003}\u{00e8}"), "10.00")]
#[case(4, 2, json!("\u{00ff}"), "-0.01")]
fn decimal_defaults_use_decimal_constructor(
    #[case] precision: u32,
    #[case] scale: u32,
    #[case] default: Value,
    #[case] expected: &str,
) {
    let field_type = json!({"type": "bytes", "logicalType": "decimal", "precision": precision, "scale": scale});
    let module = render_default(field_type, default).unwrap();
    assert_eq!(
        field_line(&module),
        format!(
            "value: condecimal(max_digits={precision}, decimal_places={scale}) = decimal.Decimal('{expected}')"
        )
    );
    assert!(module.lines().any(|line| line == "import decimal"));
}

#[rstest]
#[case(json!("string"), json!(1))]
#[case(json!("long"), json!(1.5))]
#[case(json!("boolean"), json!("yes"))]
#[case(json!("bytes"), json!("\u{0100}"))]
#[case(json!({"type": "array", "items": "long"}), json!({}))]
#[case(json!({"type": "map", "values": "long"}), json!([]))]
#[case(json!({"type": "enum", "name": "Suit", "symbols": ["spades"]}), json!("clubs"))]
#[case(json!({"type": "int", "logicalType": "date"}), json!("2022-01-01"))]
#[case(json!({"type": "int", "logicalType": "time-millis"}), json!(86400000))]
#[case(json!({"type": "bytes", "logicalType": "decimal", "precision": 4, "scale": 2}), json!("10.001"))]
#[case(json!({"type": "bytes", "logicalType": "decimal", "precision": 2, "scale": 1}), json!("100.0"))]
#[case(
    json!({"type": "bytes", "logicalType": "decimal", "precision": 100000, "scale": 99999}),
    json!("1")
)]
#[case(
    json!({"type": "bytes", "logicalType": "decimal", "precision": 50, "scale": 0}),
    json!("1234567890123456789012345678901234567890")
)]
fn mismatched_defaults_are_reported(#[case] field_type: Value, #[case] default: Value) {
    let err = render_default(field_type, default).unwrap_err();
    assert!(
        matches!(&err, GeneratorError::AmbiguousDefault { field, .. } if field == "value"),
        "unexpected error: {err}"
    );
}
