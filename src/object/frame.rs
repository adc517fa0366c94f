use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

use crate::error::IoContext;
use crate::utils::cursor::EasyRead;
use crate::{Error, Result};

use super::{NULL_BYTE, ObjectKind, SPACE_BYTE, parse_decimal};

/// Returns the framed version of an object payload, with the following format:
///
/// `{kind} {payload_length}\0{payload}`
///
/// This is the exact byte sequence that gets hashed and compressed.
pub fn encode(kind: ObjectKind, payload: &[u8]) -> Result<Vec<u8>> {
    // Encoding to this format: blob 4\0abcd
    let mut cursor = Cursor::new(Vec::with_capacity(payload.len() + 16));

    cursor
        .write_all(kind.as_str().as_bytes())
        .io_context("could not write object type")?;
    cursor.write_u8(SPACE_BYTE).io_context("could not write space")?;
    cursor
        .write_all(payload.len().to_string().as_bytes())
        .io_context("could not write object data length")?;
    cursor.write_u8(NULL_BYTE).io_context("could not write null byte")?;
    cursor
        .write_all(payload)
        .io_context("could not write object data")?;

    Ok(cursor.into_inner())
}

/// Reads a frame, returning its kind and a slice with the payload.
///
/// This function assumes the data is not compressed.
///
/// # Errors
///
/// This function will fail with `CorruptData` if:
/// - The kind or the length were not terminated.
/// - The kind is unknown.
/// - The declared length does not match the amount of bytes after the null byte.
pub fn decode(bytes: &[u8]) -> Result<(ObjectKind, &[u8])> {
    let mut cursor = Cursor::new(bytes);

    let kind_buf = cursor.read_until_checked(SPACE_BYTE, "object type")?;
    let kind_str = String::from_utf8_lossy(&kind_buf);
    let kind: ObjectKind = kind_str
        .parse()
        .map_err(|_| Error::CorruptData(format!("unknown object type {:?}", kind_str)))?;

    let len_buf = cursor.read_until_checked(NULL_BYTE, "object data length")?;
    let data_len: usize = parse_decimal(&len_buf).ok_or_else(|| {
        Error::CorruptData(format!(
            "could not read object data length {:?} as a number",
            String::from_utf8_lossy(&len_buf)
        ))
    })?;

    let payload = &bytes[cursor.position() as usize..];
    if data_len != payload.len() {
        return Err(Error::CorruptData(format!(
            "length read \"{}\" did not match actual data length \"{}\"",
            data_len,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_blob() {
        let framed = encode(ObjectKind::Blob, b"abcd").unwrap();
        assert_eq!(b"blob 4\0abcd".to_vec(), framed);
    }

    #[test]
    fn test_encode_empty_tree() {
        let framed = encode(ObjectKind::Tree, b"").unwrap();
        assert_eq!(b"tree 0\0".to_vec(), framed);
    }

    #[test]
    fn test_decode() {
        let (kind, payload) = decode(b"commit 3\0a\0b").unwrap();
        assert_eq!(ObjectKind::Commit, kind);
        assert_eq!(b"a\0b", payload);
    }

    #[test]
    fn test_decode_length_mismatch() {
        assert!(matches!(
            decode(b"blob 5\0abcd"),
            Err(Error::CorruptData(_))
        ));
        assert!(matches!(
            decode(b"blob 3\0abcd"),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn test_decode_unknown_kind() {
        assert!(matches!(
            decode(b"blobby 0\0"),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn test_decode_missing_separators() {
        assert!(matches!(decode(b"blob"), Err(Error::CorruptData(_))));
        assert!(matches!(decode(b"blob 4"), Err(Error::CorruptData(_))));
        assert!(matches!(decode(b"blob x\0"), Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_decode_length_only_digits() {
        for framed in [
            b"blob +4\0abcd".as_slice(),
            b"blob 4 \0abcd".as_slice(),
            b"blob \0".as_slice(),
        ] {
            assert!(matches!(decode(framed), Err(Error::CorruptData(_))));
        }
    }
}
