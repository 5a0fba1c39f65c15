use schema_view::{Buffer, ByteBlock, Error};

#[test]
fn test_buffer_new_is_zeroed() {
    let buffer = Buffer::new(8);
    assert_eq!(buffer.len(), 8);
    assert!(!buffer.is_empty());
    assert_eq!(buffer.to_vec(), vec![0; 8]);
    assert!(Buffer::default().is_empty());
}

#[test]
fn test_buffer_clones_share_storage() {
    let buffer = Buffer::from(vec![1, 2, 3, 4]);
    let alias = buffer.clone();
    alias.write_bytes(1, &[9, 9]).unwrap();
    assert_eq!(buffer.to_vec(), vec![1, 9, 9, 4]);
    assert!(buffer.ptr_eq(&alias));
    assert!(!buffer.ptr_eq(&Buffer::from([1u8, 9, 9, 4])));
}

#[test]
fn test_buffer_read_write_array() {
    let buffer = Buffer::new(4);
    buffer.write_array(1, [0xaa, 0xbb]).unwrap();
    assert_eq!(buffer.read_array::<2>(1).unwrap(), [0xaa, 0xbb]);
    assert_eq!(buffer.read_array::<4>(0).unwrap(), [0, 0xaa, 0xbb, 0]);

    let mut dst = [0u8; 3];
    buffer.read_bytes(1, &mut dst).unwrap();
    assert_eq!(dst, [0xaa, 0xbb, 0]);
}

#[test]
fn test_buffer_bounds() {
    let buffer = Buffer::new(4);
    assert!(buffer.check_range(0, 4).is_ok());
    assert!(buffer.check_range(4, 0).is_ok());
    assert!(matches!(
        buffer.check_range(3, 2),
        Err(Error::OutOfBounds {
            offset: 3,
            len: 2,
            buffer_len: 4
        })
    ));
    assert!(buffer.check_range(usize::MAX, 2).is_err());
    assert!(buffer.read_array::<4>(1).is_err());
    assert!(buffer.write_bytes(2, &[1, 2, 3]).is_err());
    assert_eq!(buffer.to_vec(), vec![0; 4]);
}

#[test]
fn test_buffer_fill_and_scoped_access() {
    let buffer = Buffer::new(6);
    buffer.fill(2, 3, 7).unwrap();
    assert_eq!(buffer.with_bytes(|bytes| bytes.to_vec()), vec![0, 0, 7, 7, 7, 0]);
    buffer.with_bytes_mut(|bytes| bytes[0] = 1);
    assert_eq!(buffer.with_range(0, 3, |bytes| bytes.to_vec()).unwrap(), vec![1, 0, 7]);
    buffer.with_range_mut(5, 1, |bytes| bytes[0] = 2).unwrap();
    assert_eq!(buffer.to_vec(), vec![1, 0, 7, 7, 7, 2]);
}

#[test]
fn test_buffer_transact_restores_on_error() {
    let buffer = Buffer::from(vec![1, 2, 3, 4]);
    let result: schema_view::Result<()> = buffer.transact(0, 4, || {
        buffer.write_bytes(0, &[9, 9, 9])?;
        Err(Error::EmptySchema)
    });
    assert!(matches!(result, Err(Error::EmptySchema)));
    assert_eq!(buffer.to_vec(), vec![1, 2, 3, 4]);

    let value = buffer
        .transact(0, 4, || {
            buffer.write_bytes(0, &[5])?;
            Ok(7)
        })
        .unwrap();
    assert_eq!(value, 7);
    assert_eq!(buffer.to_vec(), vec![5, 2, 3, 4]);
}

#[test]
fn test_byte_block_window() {
    let buffer = Buffer::from(vec![0, 1, 2, 3, 4, 5]);
    let block = ByteBlock::new(&buffer, 2, 3).unwrap();
    assert_eq!(block.len(), 3);
    assert_eq!(block.byte_offset(), 2);
    assert_eq!(block.to_vec(), vec![2, 3, 4]);
    assert_eq!(block.get(1).unwrap(), 3);

    block.set(0, 42).unwrap();
    assert_eq!(buffer.to_vec()[2], 42);

    buffer.write_bytes(4, &[99]).unwrap();
    assert_eq!(block.to_vec(), vec![42, 3, 99]);
    assert!(block == [42u8, 3, 99][..]);

    assert!(matches!(
        block.get(3),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(ByteBlock::new(&buffer, 4, 3).is_err());
}

#[test]
fn test_byte_block_copy_from_slice() {
    let buffer = Buffer::new(4);
    let block = ByteBlock::new(&buffer, 1, 2).unwrap();
    block.copy_from_slice(&[7, 8]).unwrap();
    assert_eq!(buffer.to_vec(), vec![0, 7, 8, 0]);

    assert!(matches!(
        block.copy_from_slice(&[1, 2, 3]),
        Err(Error::SizeMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(buffer.to_vec(), vec![0, 7, 8, 0]);
}

#[cfg(feature = "shared")]
#[test]
fn test_buffer_bytes_interop() {
    use bytes::{Bytes, BytesMut};

    let buffer = Buffer::from(Bytes::from_static(&[1, 2, 3]));
    assert_eq!(buffer.to_vec(), vec![1, 2, 3]);

    let mut source = BytesMut::with_capacity(2);
    source.extend_from_slice(&[4, 5]);
    let buffer = Buffer::from(source);
    buffer.write_bytes(0, &[6]).unwrap();
    assert_eq!(buffer.to_bytes(), Bytes::from_static(&[6, 5]));
}
