use fieldbuf::{
    DataType, Error, IoBuffer, MAX_ESTIMATE_RESERVE, Result, begin_sized_block, end_sized_block,
    get_field_header,
};

fn write_block(estimate: usize) -> Result<IoBuffer> {
    let mut buffer = IoBuffer::new();
    let patch = begin_sized_block(&mut buffer, "entries", DataType::List, &[10], estimate)?;
    buffer.put_u32(10);
    buffer.put_bytes(&[0xAB; 1000]);
    let len = end_sized_block(&mut buffer, patch)?;
    assert_eq!(len, 1004);
    Ok(buffer)
}

#[test]
fn test_patch_replaces_estimate() -> Result<()> {
    let mut buffer = IoBuffer::new();
    let patch = begin_sized_block(&mut buffer, "entries", DataType::List, &[10], 4)?;
    assert_eq!(patch.estimate(), 4);
    assert_eq!(patch.data_start(), buffer.position());

    buffer.put_u32(10);
    buffer.put_bytes(&[0xAB; 1000]);
    let len_before = buffer.len();
    let len = end_sized_block(&mut buffer, patch)?;

    assert_eq!(len, 1000 + 4);
    assert_eq!(buffer.len(), len_before);
    assert_eq!(buffer.position(), len_before);

    buffer.rewind();
    let header = get_field_header(&mut buffer)?;
    assert_eq!(header.payload_len(), 1004);
    assert_eq!(header.data_end(), buffer.len());
    assert_eq!(buffer.get_u32()?, 10);
    Ok(())
}

#[test]
fn test_patch_independent_of_estimate() -> Result<()> {
    let reference = write_block(0)?;
    for estimate in [4, 1004, 100_000] {
        let buffer = write_block(estimate)?;
        assert_eq!(buffer.as_slice(), reference.as_slice());
    }
    Ok(())
}

#[test]
fn test_patch_out_of_order() -> Result<()> {
    let mut buffer = IoBuffer::new();
    let patch = begin_sized_block(&mut buffer, "entries", DataType::List, &[0], 0)?;
    let slot = patch.length_slot();
    buffer.seek(slot)?;

    let result = end_sized_block(&mut buffer, patch);
    assert!(matches!(
        result,
        Err(Error::PatchOutOfOrder { position, .. }) if position == slot
    ));
    Ok(())
}

#[test]
fn test_empty_block() -> Result<()> {
    let mut buffer = IoBuffer::new();
    let patch = begin_sized_block(&mut buffer, "nothing", DataType::List, &[0], 64)?;
    assert_eq!(end_sized_block(&mut buffer, patch)?, 0);

    buffer.rewind();
    let header = get_field_header(&mut buffer)?;
    assert_eq!(header.payload_len(), 0);
    assert!(!buffer.has_remaining());
    Ok(())
}

#[test]
fn test_huge_estimate_reserves_bounded_capacity() -> Result<()> {
    let mut buffer = IoBuffer::with_capacity(0);
    let patch = begin_sized_block(&mut buffer, "entries", DataType::List, &[1], usize::MAX)?;
    assert_eq!(patch.estimate(), u32::MAX as usize);
    assert!(buffer.capacity() < 2 * MAX_ESTIMATE_RESERVE);

    buffer.put_u32(1);
    assert_eq!(end_sized_block(&mut buffer, patch)?, 4);
    Ok(())
}
