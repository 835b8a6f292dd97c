use microprop::{FieldKind, MicropropError, Store};

#[test]
fn test_scalar_round_trip() {
    let mut buffer = [0u8; 256];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("bool", true).unwrap();
    store.append("u8", 0xABu8).unwrap();
    store.append("i8", -5i8).unwrap();
    store.append("u16", 0xBEEFu16).unwrap();
    store.append("i16", -1234i16).unwrap();
    store.append("u32", 0xDEAD_BEEFu32).unwrap();
    store.append("i32", -123_456i32).unwrap();
    store.append("u64", 0x0123_4567_89AB_CDEFu64).unwrap();
    store.append("i64", i64::MIN).unwrap();
    store.append("f32", 0.123_456f32).unwrap();
    store.append("f64", -0.121_212f64).unwrap();

    let mut b = false;
    assert_eq!(store.read("bool", &mut b).unwrap(), 1);
    assert!(b);

    let mut v8 = 0u8;
    assert_eq!(store.read("u8", &mut v8).unwrap(), 1);
    assert_eq!(v8, 0xAB);

    let mut i8v = 0i8;
    assert_eq!(store.read("i8", &mut i8v).unwrap(), 1);
    assert_eq!(i8v, -5);

    let mut v16 = 0u16;
    assert_eq!(store.read("u16", &mut v16).unwrap(), 2);
    assert_eq!(v16, 0xBEEF);

    let mut i16v = 0i16;
    assert_eq!(store.read("i16", &mut i16v).unwrap(), 2);
    assert_eq!(i16v, -1234);

    let mut v32 = 0u32;
    assert_eq!(store.read("u32", &mut v32).unwrap(), 4);
    assert_eq!(v32, 0xDEAD_BEEF);

    let mut i32v = 0i32;
    assert_eq!(store.read("i32", &mut i32v).unwrap(), 4);
    assert_eq!(i32v, -123_456);

    let mut v64 = 0u64;
    assert_eq!(store.read("u64", &mut v64).unwrap(), 8);
    assert_eq!(v64, 0x0123_4567_89AB_CDEF);

    let mut i64v = 0i64;
    assert_eq!(store.read("i64", &mut i64v).unwrap(), 8);
    assert_eq!(i64v, i64::MIN);

    let mut f = 0f32;
    assert_eq!(store.read("f32", &mut f).unwrap(), 4);
    assert_eq!(f, 0.123_456f32);

    let mut d = 0f64;
    assert_eq!(store.read("f64", &mut d).unwrap(), 8);
    assert_eq!(d, -0.121_212f64);
}

#[test]
fn test_widening_read() {
    let mut buffer = [0u8; 64];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("id", 200u8).unwrap();
    store.append("word", 2u16).unwrap();
    store.append("dword", 3u32).unwrap();

    let mut out = 0u64;
    assert_eq!(store.read("id", &mut out).unwrap(), 1);
    assert_eq!(out, 200);

    assert_eq!(store.get::<_, u64>("word").unwrap(), 2);
    assert_eq!(store.get::<_, u64>("dword").unwrap(), 3);
    assert_eq!(store.get::<_, u32>("id").unwrap(), 200);
    assert_eq!(store.get::<_, i16>("id").unwrap(), 200);
}

#[test]
fn test_widening_zero_extends() {
    let mut buffer = [0u8; 16];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("n", -1i8).unwrap();

    // The tag carries no sign, so a wider read sees the raw byte
    assert_eq!(store.get::<_, i8>("n").unwrap(), -1);
    assert_eq!(store.get::<_, i32>("n").unwrap(), 255);
}

#[test]
fn test_narrowing_read_fails() {
    let mut buffer = [0u8; 64];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("big", 70_000u32).unwrap();
    store.append("d", 0.5f64).unwrap();

    let mut out = 7u16;
    assert_eq!(
        store.read("big", &mut out),
        Err(MicropropError::DestinationTooSmall {
            required: 4,
            provided: 2
        })
    );
    // Destination untouched on error
    assert_eq!(out, 7);

    assert_eq!(
        store.get::<_, f32>("d"),
        Err(MicropropError::DestinationTooSmall {
            required: 8,
            provided: 4
        })
    );
    assert!(store.get::<_, bool>("big").is_err());
}

#[test]
fn test_float_widening() {
    let mut buffer = [0u8; 32];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("f", 1.5f32).unwrap();

    let mut d = 0f64;
    assert_eq!(store.read("f", &mut d).unwrap(), 4);
    assert_eq!(d, 1.5);
}

#[test]
fn test_integer_float_mismatch() {
    let mut buffer = [0u8; 32];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("i", 3u8).unwrap();
    store.append("f", 3.0f32).unwrap();

    assert_eq!(
        store.get::<_, f64>("i"),
        Err(MicropropError::TypeMismatch {
            stored: FieldKind::Byte,
            requested: FieldKind::Double
        })
    );
    assert_eq!(
        store.get::<_, u64>("f"),
        Err(MicropropError::TypeMismatch {
            stored: FieldKind::Float,
            requested: FieldKind::DDWord
        })
    );
}

#[test]
fn test_scalar_read_of_variable_field() {
    let mut buffer = [0u8; 32];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append_blob("b", &[1, 2]).unwrap();
    store.append_str("s", "x").unwrap();

    assert_eq!(
        store.get::<_, u8>("b"),
        Err(MicropropError::TypeMismatch {
            stored: FieldKind::Blob,
            requested: FieldKind::Byte
        })
    );
    assert!(matches!(
        store.get::<_, u64>("s"),
        Err(MicropropError::TypeMismatch { .. })
    ));
}

#[test]
fn test_bool_reads() {
    let mut buffer = [0u8; 16];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("false", false).unwrap();
    assert_eq!(store.used(), 7);
    store.append("true", true).unwrap();
    assert_eq!(store.used(), 13);

    // 4 bytes needed, 3 left
    assert!(store.append("lg", false).is_err());
    store.append("s", false).unwrap();
    assert_eq!(store.used(), 16);

    assert_eq!(store.find("false").unwrap().offset(), 0);
    assert!(!store.get::<_, bool>("false").unwrap());

    assert_eq!(store.find("true").unwrap().offset(), 7);
    assert!(store.get::<_, bool>("true").unwrap());

    assert_eq!(store.find("s").unwrap().offset(), 13);
    assert!(!store.get::<_, bool>("s").unwrap());

    // Bool widens like a byte
    assert_eq!(store.get::<_, u32>("true").unwrap(), 1);
}

#[test]
fn test_integer_keys() {
    let mut buffer = [0u8; 64];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append(123_456i32, 0.121_212f64).unwrap();
    store.append(100u16, 7u8).unwrap();

    assert_eq!(store.get::<_, f64>(123_456i32).unwrap(), 0.121_212);
    assert_eq!(store.get::<_, u8>(100u16).unwrap(), 7);

    // Same digits, different width: a different name
    assert_eq!(store.get::<_, u8>(100u32), Err(MicropropError::NotFound));
    assert_eq!(store.find(100u16).unwrap().name(), &[0x00, 0x64]);
    assert_eq!(store.get::<_, u8>(&[0x00u8, 0x64]).unwrap(), 7);
}

#[test]
fn test_read_missing_field() {
    let mut buffer = [0u8; 32];
    let mut store = Store::with_buffer(&mut buffer).unwrap();

    store.append("ddword1", 4u64).unwrap();

    let mut out = 9u64;
    assert_eq!(store.read("ddword1_bad", &mut out), Err(MicropropError::NotFound));
    assert_eq!(store.read("ddword", &mut out), Err(MicropropError::NotFound));
    assert_eq!(out, 9);
}
