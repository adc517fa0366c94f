use std::io::BufRead;
use std::io::Cursor;

use crate::{Error, Result};

pub trait EasyRead {
    fn read_until_checked(&mut self, byte: u8, what: &str) -> Result<Vec<u8>>;
    fn is_exhausted(&self) -> bool;
}

impl<T: AsRef<[u8]>> EasyRead for Cursor<T> {
    /// This function is just an abstraction to simplify the parsers since this process is used
    /// a lot.
    ///
    /// It already handles the errors (not reading until the expected byte or not reading at all)
    /// and returns them as `CorruptData`, so it can just be handled with the `?` operator.
    fn read_until_checked(&mut self, byte: u8, what: &str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        BufRead::read_until(self, byte, &mut buf)
            .map_err(|e| Error::CorruptData(format!("could not read {}: {}", what, e)))?;
        if buf.pop() != Some(byte) {
            return Err(Error::CorruptData(format!(
                "expected {:?} after {}",
                byte as char, what
            )));
        }
        Ok(buf)
    }

    fn is_exhausted(&self) -> bool {
        self.position() as usize >= self.get_ref().as_ref().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_until_checked() {
        let mut cursor = Cursor::new(b"blob 12\0rest".as_slice());
        assert_eq!(b"blob".to_vec(), cursor.read_until_checked(b' ', "kind").unwrap());
        assert_eq!(b"12".to_vec(), cursor.read_until_checked(b'\0', "length").unwrap());
        assert!(!cursor.is_exhausted());
        assert!(matches!(
            cursor.read_until_checked(b'\0', "name"),
            Err(Error::CorruptData(_))
        ));
        assert!(cursor.is_exhausted());
    }
}
