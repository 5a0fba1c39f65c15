use honggfuzz::fuzz;
use schema_view::{
    ArrayView, Buffer, Endian, RecordView, Schema, Value, ViewOptions, float32, float64, int64,
    nested_array, nested_record, raw_bytes, reserved, uint16, utf8,
};

fn schema() -> Schema {
    let inner = Schema::new([("a", uint16(Endian::Big)), ("pad", reserved(1))]).unwrap();
    Schema::new([
        ("n", int64(Endian::Little)),
        ("f", float64(Endian::Big)),
        ("g", float32(Endian::Little)),
        ("s", utf8(5)),
        ("raw", raw_bytes(3)),
        ("one", nested_record(&inner)),
        ("many", nested_array(2, &inner)),
    ])
    .unwrap()
}

fn main() {
    let schema = schema();
    loop {
        fuzz!(|data: &[u8]| {
            let buffer = Buffer::from(data);
            let offset = data.first().copied().unwrap_or(0) as usize % 8;

            if let Ok(record) = RecordView::at(&buffer, &schema, offset) {
                if let Ok(value) = record.to_value() {
                    // writing back what was read must leave the bytes unchanged
                    let before = buffer.to_vec();
                    record.assign(&value).unwrap();
                    assert_eq!(buffer.to_vec(), before);
                }
                let _ = record.set("s", Value::from("hello!"));
            }

            if let Ok(array) = ArrayView::new(&buffer, &schema, ViewOptions::default()) {
                for element in &array {
                    let _ = element.get("many").and_then(|many| many.to_value());
                }
            }
        });
    }
}
