use rawbuf::{BufferOptions, ByteOrder, Error, IoBuffer, Result};

#[test]
fn test_new_buffer_is_empty() {
    let buffer = IoBuffer::with_capacity(16);

    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.capacity(), 16);
    assert_eq!(buffer.remaining(), 0);
    assert!(!buffer.has_remaining());
    assert!(buffer.as_slice().is_empty());
}

#[test]
fn test_primitive_roundtrip() -> Result<()> {
    let mut buffer = IoBuffer::new();

    buffer.put_bool(true);
    buffer.put_i8(-3);
    buffer.put_i16(-1234);
    buffer.put_i32(123_456_789);
    buffer.put_i64(-9_876_543_210);
    buffer.put_u32(u32::MAX);
    buffer.put_f32(1.5);
    buffer.put_f64(-0.5);

    assert_eq!(buffer.len(), 1 + 1 + 2 + 4 + 8 + 4 + 4 + 8);

    buffer.rewind();
    assert!(buffer.get_bool()?);
    assert_eq!(buffer.get_i8()?, -3);
    assert_eq!(buffer.get_i16()?, -1234);
    assert_eq!(buffer.get_i32()?, 123_456_789);
    assert_eq!(buffer.get_i64()?, -9_876_543_210);
    assert_eq!(buffer.get_u32()?, u32::MAX);
    assert_eq!(buffer.get_f32()?, 1.5);
    assert_eq!(buffer.get_f64()?, -0.5);
    assert!(!buffer.has_remaining());

    Ok(())
}

#[test]
fn test_byte_order_layout() {
    let mut little = IoBuffer::with_options(ByteOrder::LittleEndian);
    little.put_i32(0x1234_5678);
    assert_eq!(little.as_slice(), &[0x78, 0x56, 0x34, 0x12]);

    let mut big = IoBuffer::with_options(ByteOrder::BigEndian);
    big.put_i32(0x1234_5678);
    assert_eq!(big.as_slice(), &[0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn test_big_endian_roundtrip() -> Result<()> {
    let options = BufferOptions::default().with_byte_order(ByteOrder::BigEndian);
    let mut buffer = IoBuffer::with_options(options);
    buffer.put_f64(std::f64::consts::PI);
    buffer.put_string("big")?;

    let mut reader = IoBuffer::from_bytes_with(buffer.into_bytes(), options);
    assert_eq!(reader.get_f64()?, std::f64::consts::PI);
    assert_eq!(reader.get_string()?, "big");

    Ok(())
}

#[test]
fn test_string_roundtrip() -> Result<()> {
    let mut buffer = IoBuffer::new();
    buffer.put_string("")?;
    buffer.put_string("a.u.")?;
    buffer.put_string("größe")?;

    assert_eq!(
        buffer.len(),
        IoBuffer::string_size("") + IoBuffer::string_size("a.u.") + IoBuffer::string_size("größe")
    );

    buffer.rewind();
    assert_eq!(buffer.get_string()?, "");
    assert_eq!(buffer.get_string()?, "a.u.");
    assert_eq!(buffer.get_string()?, "größe");

    Ok(())
}

#[test]
fn test_growth_preserves_bytes_and_cursor() -> Result<()> {
    let mut buffer = IoBuffer::with_capacity(4);

    for i in 0..100 {
        buffer.put_i32(i);
    }

    assert_eq!(buffer.len(), 400);
    assert_eq!(buffer.position(), 400);
    assert!(buffer.capacity() >= 400);

    buffer.rewind();
    for i in 0..100 {
        assert_eq!(buffer.get_i32()?, i);
    }

    Ok(())
}

#[test]
fn test_growth_from_zero_capacity() {
    let mut buffer = IoBuffer::with_capacity(0);
    buffer.put_u8(7);
    assert_eq!(buffer.as_slice(), &[7]);
    assert!(buffer.capacity() >= 1);
}

#[test]
fn test_reserve() {
    let mut buffer = IoBuffer::with_capacity(8);
    buffer.put_i32(1);
    buffer.reserve(1000);
    assert!(buffer.capacity() >= 1004);
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.position(), 4);
}

#[test]
fn test_seek_and_overwrite_keeps_length() -> Result<()> {
    let mut buffer = IoBuffer::new();
    buffer.put_i32(0);
    buffer.put_string("payload")?;
    let len = buffer.len();

    buffer.seek(0)?;
    buffer.put_i32(99);
    assert_eq!(buffer.len(), len);
    assert_eq!(buffer.position(), 4);

    buffer.rewind();
    assert_eq!(buffer.get_i32()?, 99);
    assert_eq!(buffer.get_string()?, "payload");

    Ok(())
}

#[test]
fn test_seek_out_of_bounds() {
    let mut buffer = IoBuffer::new();
    buffer.put_i64(1);

    assert!(buffer.seek(8).is_ok());
    let err = buffer.seek(9).unwrap_err();
    assert!(matches!(err, Error::SeekOutOfBounds { offset: 9, len: 8 }));
    assert_eq!(buffer.position(), 8);
}

#[test]
fn test_underrun_does_not_consume() {
    let mut buffer = IoBuffer::from_bytes(vec![1, 2, 3]);

    let err = buffer.get_i32().unwrap_err();
    assert!(err.is_underrun());
    assert!(matches!(
        err,
        Error::BufferUnderrun {
            position: 0,
            needed: 4,
            remaining: 3
        }
    ));
    assert_eq!(buffer.position(), 0);
}

#[test]
fn test_truncated_string_is_underrun() -> Result<()> {
    let mut buffer = IoBuffer::new();
    buffer.put_string("truncated")?;
    let mut bytes = buffer.into_bytes();
    bytes.pop();

    let mut reader = IoBuffer::from_bytes(bytes);
    let err = reader.get_string().unwrap_err();
    assert!(err.is_underrun());

    Ok(())
}

#[test]
fn test_invalid_utf8() {
    let mut bytes = 2u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFE]);

    let mut reader = IoBuffer::from_bytes(bytes);
    assert!(matches!(reader.get_string(), Err(Error::InvalidUtf8(_))));
}

#[test]
fn test_string_too_long() {
    let options = BufferOptions::default().with_max_string_len(4);
    let mut buffer = IoBuffer::with_options(options);

    assert!(buffer.put_string("four").is_ok());
    let err = buffer.put_string("five!").unwrap_err();
    assert!(matches!(err, Error::StringTooLong { len: 5, max: 4 }));

    let mut bytes = 100u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[b'x'; 100]);
    let mut reader = IoBuffer::from_bytes_with(bytes, options);
    assert!(matches!(
        reader.get_string(),
        Err(Error::StringTooLong { len: 100, max: 4 })
    ));
}

#[test]
fn test_skip_and_peek() -> Result<()> {
    let mut buffer = IoBuffer::from_bytes(vec![10, 20, 30, 40]);

    assert_eq!(buffer.peek_u8()?, 10);
    assert_eq!(buffer.position(), 0);

    buffer.skip_bytes(2)?;
    assert_eq!(buffer.peek_u8()?, 30);
    assert!(buffer.skip_bytes(3).unwrap_err().is_underrun());

    assert_eq!(buffer.get_bytes(2)?, &[30, 40]);
    assert!(buffer.peek_u8().unwrap_err().is_underrun());

    Ok(())
}

#[test]
fn test_clear_keeps_capacity() {
    let mut buffer = IoBuffer::with_capacity(32);
    buffer.put_i64(1);
    buffer.put_i64(2);

    buffer.clear();
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.capacity(), 32);
}

#[test]
fn test_into_bytes_truncates_to_len() {
    let mut buffer = IoBuffer::with_capacity(64);
    buffer.put_i16(5);
    assert_eq!(buffer.into_bytes(), vec![5, 0]);
}

#[test]
fn test_truncate_pulls_cursor_back() -> Result<()> {
    let mut buffer = IoBuffer::new();
    buffer.put_i32(1);
    buffer.put_i32(2);

    buffer.truncate(4);
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.position(), 4);

    buffer.truncate(16);
    assert_eq!(buffer.len(), 4);

    buffer.put_i32(3);
    buffer.rewind();
    assert_eq!(buffer.get_i32()?, 1);
    assert_eq!(buffer.get_i32()?, 3);
    Ok(())
}

#[test]
fn test_check_string_len_matches_put_string() {
    let buffer = IoBuffer::with_options(BufferOptions::default().with_max_string_len(3));

    assert!(buffer.check_string_len("abc").is_ok());
    assert!(matches!(
        buffer.check_string_len("abcd"),
        Err(Error::StringTooLong { len: 4, max: 3 })
    ));
}
