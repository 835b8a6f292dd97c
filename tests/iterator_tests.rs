use microprop::{FieldKind, Store, Value};

#[test]
fn test_field_next_offsets() {
    let mut buffer = [0u8; 200];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("bool", true).unwrap();
    store.append("byte1", 1i8).unwrap();
    store.append("word1", 2u16).unwrap();
    store.append("dword1", 3i32).unwrap();
    store.append("ddword1", 4i64).unwrap();

    let mut offsets = [0usize; 5];
    let mut field = store.first_field();
    let mut count = 0;
    while let Some(current) = field {
        offsets[count] = current.offset();
        count += 1;
        field = store.field_next(&current);
    }

    assert_eq!(count, 5);
    assert_eq!(offsets, [0, 6, 13, 21, 32]);
}

#[test]
fn test_fields_iterator() {
    let mut buffer = [0u8; 100];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("a", 1u8).unwrap();
    store.append_str("b", "two").unwrap();
    store.append_array("c", &[3u32]).unwrap();

    let mut iter = store.fields();

    let a = iter.next().unwrap();
    assert_eq!(a.name(), b"a");
    assert_eq!(a.kind(), FieldKind::Byte);
    assert_eq!(a.data(), &[1]);
    assert_eq!(a.total_len(), 3);

    let b = iter.next().unwrap();
    assert_eq!(b.name(), b"b");
    assert_eq!(b.kind(), FieldKind::String);
    assert_eq!(b.data(), b"two\0");
    assert_eq!(b.data_size(), 4);

    let c = iter.next().unwrap();
    assert_eq!(c.name(), b"c");
    assert_eq!(c.kind(), FieldKind::Array32);
    assert_eq!(c.data_size(), 4);
    assert_eq!(c.end(), store.used());

    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_for_loop_over_store() {
    let mut buffer = [0u8; 100];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("x", 1u8).unwrap();
    store.append("y", 2u8).unwrap();

    let mut total = 0u64;
    for field in &store {
        if let Some(Value::Byte(v)) = field.value() {
            total += u64::from(v);
        }
    }
    assert_eq!(total, 3);
}

#[test]
fn test_find_returns_first_match() {
    let mut buffer = [0u8; 64];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("k", 1u8).unwrap();
    store.append("k", 2u16).unwrap();

    let field = store.find("k").unwrap();
    assert_eq!(field.offset(), 0);
    assert_eq!(store.get::<_, u16>("k").unwrap(), 1);
}

#[test]
fn test_find_compares_length_and_content() {
    let mut buffer = [0u8; 64];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("abc", 1u8).unwrap();

    assert!(store.contains("abc"));
    assert!(!store.contains("ab"));
    assert!(!store.contains("abcd"));
    assert!(!store.contains("abd"));
    assert!(!store.contains(""));
    assert!(!store.contains("0123456789abcdef"));
}

#[test]
fn test_decoded_values() {
    let mut buffer = [0u8; 128];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("b", true).unwrap();
    store.append("w", 513u16).unwrap();
    store.append("f", 2.5f32).unwrap();
    store.append("d", 0.25f64).unwrap();
    store.append_blob("blob", &[1, 2, 3]).unwrap();
    store.append_str("s", "text").unwrap();
    store.append_array("arr", &[7u64, 8, 9]).unwrap();

    let mut iter = store.fields();
    assert_eq!(iter.next().unwrap().value(), Some(Value::Bool(true)));
    assert_eq!(iter.next().unwrap().value(), Some(Value::Word(513)));
    assert_eq!(iter.next().unwrap().value(), Some(Value::Float(2.5)));
    assert_eq!(iter.next().unwrap().value(), Some(Value::Double(0.25)));
    assert_eq!(iter.next().unwrap().value(), Some(Value::Blob(&[1, 2, 3])));
    assert_eq!(iter.next().unwrap().value(), Some(Value::String("text")));

    let Some(Value::Array(view)) = iter.next().unwrap().value() else {
        panic!("Expected array value");
    };
    assert_eq!(view.kind(), FieldKind::Array64);
    assert_eq!(view.len(), 3);
    assert!(view.iter::<u32>().is_none());
    let items: Vec<u64> = view.iter::<u64>().unwrap().collect();
    assert_eq!(items, vec![7, 8, 9]);
}

#[test]
fn test_clear_hides_fields() {
    let mut buffer = [0u8; 32];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("a", 1u8).unwrap();
    store.append("b", 2u8).unwrap();
    assert_eq!(store.fields().count(), 2);

    store.clear();

    assert_eq!(store.used(), 0);
    assert_eq!(store.fields().count(), 0);
    assert!(store.find("a").is_none());
    assert!(store.is_bound());

    store.append("c", 3u8).unwrap();
    assert_eq!(store.used(), 3);
    assert_eq!(store.get::<_, u8>("c").unwrap(), 3);
}

#[test]
fn test_unwritten_tail_not_scanned_in_read_write_mode() {
    // Bytes past `used` look like a valid field but must not be visited
    let mut buffer = [0x11u8, b'z', 0x01, 0, 0, 0, 0, 0];
    let store = Store::with_buffer(&mut buffer).unwrap();

    assert_eq!(store.fields().count(), 0);
    assert!(!store.contains("z"));
}
