use std::rc::Rc;

use schema_view::{
    ArrayView, Buffer, Endian, Error, RecordView, Schema, Value, ViewOptions, float32,
    nested_array, nested_record, reserved, uint8, uint16, utf8,
};

fn point() -> Schema {
    Schema::new([("x", float32(Endian::Big)), ("y", float32(Endian::Big))]).unwrap()
}

fn shape() -> Schema {
    let point = point();
    Schema::new([
        ("kind", uint8()),
        ("origin", nested_record(&point)),
        ("corners", nested_array(2, &point)),
        ("label", utf8(3)),
    ])
    .unwrap()
}

#[test]
fn test_nested_record_reads_in_place() {
    let schema = shape();
    let buffer = Buffer::new(schema.size() + 2);
    let shape = RecordView::at(&buffer, &schema, 2).unwrap();

    let origin = shape.get("origin").unwrap().into_record().unwrap();
    assert_eq!(origin.byte_offset(), 3);
    origin.set("y", 2.5f32).unwrap();

    assert_eq!(buffer.to_vec()[7..11], [0x40, 0x20, 0x00, 0x00]);
    let again = shape.get("origin").unwrap();
    assert_eq!(again.as_record().unwrap().get("y").unwrap(), Value::F32(2.5));
}

#[test]
fn test_nested_record_set_assigns_fields() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();

    shape
        .set("origin", Value::record([("x", 1.0f32), ("y", -1.0f32)]))
        .unwrap();
    assert_eq!(
        shape.get("origin").unwrap().to_value().unwrap(),
        Value::record([("x", 1.0f32), ("y", -1.0f32)])
    );

    // partial assignment keeps the other fields
    shape.set("origin", Value::record([("y", 4.0f32)])).unwrap();
    assert_eq!(
        shape.get("origin").unwrap().to_value().unwrap(),
        Value::record([("x", 1.0f32), ("y", 4.0f32)])
    );
}

#[test]
fn test_nested_record_set_failure_writes_nothing() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();
    shape.set("kind", 1u8).unwrap();
    let before = buffer.to_vec();

    assert!(matches!(
        shape.set("origin", Value::record([("x", Value::F32(1.0)), ("y", Value::from("no"))])),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        shape.set("origin", Value::record([("z", 1.0f32)])),
        Err(Error::UnknownField(_))
    ));
    assert!(matches!(
        shape.set("origin", 5u8),
        Err(Error::TypeMismatch {
            expected: "record",
            ..
        })
    ));
    assert_eq!(buffer.to_vec(), before);
}

#[test]
fn test_nested_array_reads_in_place() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();

    let corners = shape.get("corners").unwrap().into_array().unwrap();
    assert_eq!(corners.len(), 2);
    assert_eq!(corners.byte_offset(), 9);
    assert!(matches!(
        corners.get(2),
        Err(Error::IndexOutOfRange { index: 2, len: 2 })
    ));

    corners.get(1).unwrap().set("x", 8.0f32).unwrap();
    let independent = RecordView::at(&buffer, &point(), 17).unwrap();
    assert_eq!(independent.get("x").unwrap(), Value::F32(8.0));

    let element = corners.get(1).unwrap();
    assert!(Rc::ptr_eq(&element, &corners.get(1).unwrap()));
}

#[test]
fn test_nested_array_set() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();

    shape
        .set(
            "corners",
            Value::Array(vec![
                Value::record([("x", 1.0f32), ("y", 2.0f32)]),
                Value::record([("x", 3.0f32), ("y", 4.0f32)]),
            ]),
        )
        .unwrap();
    let corners = shape.get("corners").unwrap();
    assert_eq!(
        corners.to_value().unwrap(),
        Value::Array(vec![
            Value::record([("x", 1.0f32), ("y", 2.0f32)]),
            Value::record([("x", 3.0f32), ("y", 4.0f32)]),
        ])
    );
}

#[test]
fn test_nested_array_length_mismatch_writes_nothing() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();

    let error = shape
        .set(
            "corners",
            Value::Array(vec![Value::record([("x", 1.0f32)])]),
        )
        .unwrap_err();
    assert!(matches!(
        error,
        Error::LengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
    assert!(matches!(
        shape.set("corners", Value::record([("x", 1.0f32)])),
        Err(Error::TypeMismatch {
            expected: "array",
            found: "record"
        })
    ));
    assert_eq!(buffer.to_vec(), vec![0; schema.size()]);
}

#[test]
fn test_nested_to_value() {
    let schema = shape();
    let buffer = Buffer::new(schema.size());
    let shape = RecordView::at(&buffer, &schema, 0).unwrap();
    shape.set("kind", 2u8).unwrap();
    shape.set("label", "abc").unwrap();

    let zero = || Value::record([("x", 0.0f32), ("y", 0.0f32)]);
    assert_eq!(
        shape.to_value().unwrap(),
        Value::record([
            ("kind", Value::U8(2)),
            ("origin", zero()),
            ("corners", Value::Array(vec![zero(), zero()])),
            ("label", Value::from("abc")),
        ])
    );
}

#[test]
fn test_zero_length_nested_array() {
    let point = point();
    let schema = Schema::new([("none", nested_array(0, &point)), ("n", uint8())]).unwrap();
    let buffer = Buffer::new(1);
    let record = RecordView::at(&buffer, &schema, 0).unwrap();

    let none = record.get("none").unwrap().into_array().unwrap();
    assert!(none.is_empty());
    record.set("none", Value::Array(vec![])).unwrap();
    assert_eq!(
        record.to_value().unwrap(),
        Value::record([("none", Value::Array(vec![])), ("n", Value::U8(0))])
    );
}

#[test]
fn test_nested_array_of_empty_schema() {
    let empty = Schema::new([("pad", reserved(0))]).unwrap();
    let schema = Schema::new([("items", nested_array(3, &empty))]).unwrap();
    let record = RecordView::at(&Buffer::new(0), &schema, 0).unwrap();
    assert!(matches!(record.get("items"), Err(Error::EmptySchema)));
}

#[test]
fn test_deeply_nested_array_of_records_with_arrays() {
    let cell = Schema::new([("v", uint16(Endian::Little))]).unwrap();
    let row = Schema::new([("cells", nested_array(3, &cell))]).unwrap();
    let grid = Schema::new([("rows", nested_array(2, &row))]).unwrap();
    assert_eq!(grid.size(), 12);

    let buffer = Buffer::new(24);
    let grids = ArrayView::new(&buffer, &grid, ViewOptions::default()).unwrap();
    assert_eq!(grids.len(), 2);

    let rows = grids.get(1).unwrap().get("rows").unwrap().into_array().unwrap();
    let cells = rows.get(1).unwrap().get("cells").unwrap().into_array().unwrap();
    cells.get(2).unwrap().set("v", 0xbeefu16).unwrap();

    // 12 (grid 0) + 6 (row 0) + 4 (cells 0 and 1)
    assert_eq!(buffer.to_vec()[22..24], [0xef, 0xbe]);
}
