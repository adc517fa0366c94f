use std::ffi::OsString;
use std::fmt::Display;
use std::io::{Cursor, Read, Write};
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use byteorder::WriteBytesExt;

use crate::byteable::Byteable;
use crate::error::IoContext;
use crate::hashing::{HASH_BYTE_LEN, Hash};
use crate::object::{NULL_BYTE, SPACE_BYTE, parse_decimal};
use crate::utils::cursor::EasyRead;
use crate::{Error, Result};

/// Struct that represents a single leaf in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLeaf {
    /// The mode is kept as the number written in the entry, so `100644` stays `100644`
    pub mode: u32,
    pub name: PathBuf,
    pub hash: Hash,
}

impl TreeLeaf {
    pub fn new<P: Into<PathBuf>>(mode: u32, name: P, hash: Hash) -> Self {
        Self {
            mode,
            name: name.into(),
            hash,
        }
    }
}

impl Display for TreeLeaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}\t{}\t{}",
            self.mode,
            self.name.to_string_lossy(),
            self.hash,
        ))
    }
}

/// Directory snapshot: leaves in the order they were encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub leaves: Vec<TreeLeaf>,
}

impl Tree {
    pub fn new(leaves: Vec<TreeLeaf>) -> Self {
        Self { leaves }
    }

    pub fn push(&mut self, leaf: TreeLeaf) {
        self.leaves.push(leaf)
    }
}

impl Byteable for Tree {
    /// Will encode this tree to a binary format, where every leaf follows this layout:
    ///
    /// "`{mode} {name}\0{hash}`"
    ///
    /// Leaves are written in the order they are stored, nothing is sorted.
    fn as_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        for leaf in self.leaves.iter() {
            cursor
                .write_all(leaf.mode.to_string().as_bytes())
                .io_context("could not write tree leaf mode")?;
            cursor.write_u8(SPACE_BYTE).io_context("could not write space")?;
            cursor
                .write_all(leaf.name.as_os_str().as_encoded_bytes())
                .io_context("could not write tree leaf name")?;
            cursor.write_u8(NULL_BYTE).io_context("could not write null byte")?;
            cursor
                .write_all(leaf.hash.as_ref())
                .io_context("could not write tree leaf hash")?;
        }
        Ok(cursor.into_inner())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let mut leaves = Vec::new();

        let mut hash_buf = [0; HASH_BYTE_LEN];
        // No bytes left before a mode means every leaf has been read
        while !cursor.is_exhausted() {
            let mode_buf = cursor.read_until_checked(SPACE_BYTE, "tree leaf mode")?;
            let mode = parse_decimal::<u32>(&mode_buf).ok_or_else(|| {
                Error::CorruptData(format!(
                    "invalid tree leaf mode {:?}",
                    String::from_utf8_lossy(&mode_buf)
                ))
            })?;

            let name_buf = cursor.read_until_checked(NULL_BYTE, "tree leaf name")?;

            cursor.read_exact(&mut hash_buf).map_err(|_| {
                Error::CorruptData(format!(
                    "tree leaf {:?} has less than {} hash bytes",
                    String::from_utf8_lossy(&name_buf),
                    HASH_BYTE_LEN
                ))
            })?;

            leaves.push(TreeLeaf {
                mode,
                name: PathBuf::from(OsString::from_vec(name_buf)),
                hash: Hash::from(hash_buf),
            });
        }

        Ok(Self { leaves })
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, leaf) in self.leaves.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", leaf)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // Constants for test data
    const TEST_MODE_FILE: u32 = 100644;
    const TEST_MODE_EXECUTABLE: u32 = 100755;
    const TEST_MODE_DIR: u32 = 40000;
    const TEST_HASH_1: &str = "99ad2293829e9638b4dfeeb7bc405a4d140e84e3";
    const TEST_HASH_2: &str = "3e9713cc8320cc020e39b53566b2a34022608edc";
    const TEST_HASH_3: &str = "99800b85d3383e3a2fb45eb7d0066a4879a9dad0";
    const TEST_FILENAME_1: &str = "file1.txt";
    const TEST_FILENAME_2: &str = "script.sh";
    const TEST_FILENAME_3: &str = "subdir";

    // Helper functions
    fn create_test_leaf(mode: u32, name: &str, hash: &str) -> TreeLeaf {
        TreeLeaf::new(mode, name, Hash::from_str(hash).unwrap())
    }

    fn create_test_tree() -> Tree {
        Tree::new(vec![
            create_test_leaf(TEST_MODE_FILE, TEST_FILENAME_1, TEST_HASH_1),
            create_test_leaf(TEST_MODE_EXECUTABLE, TEST_FILENAME_2, TEST_HASH_2),
            create_test_leaf(TEST_MODE_DIR, TEST_FILENAME_3, TEST_HASH_3),
        ])
    }

    fn raw_leaf(mode: &str, name: &str, hash: &str) -> Vec<u8> {
        let mut bytes = format!("{} {}\0", mode, name).into_bytes();
        bytes.extend_from_slice(Hash::from_str(hash).unwrap().as_ref());
        bytes
    }

    #[test]
    fn test_as_bytes_empty_tree() {
        assert!(Tree::default().as_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_as_bytes_single_leaf() {
        let tree = Tree::new(vec![create_test_leaf(
            TEST_MODE_FILE,
            TEST_FILENAME_1,
            TEST_HASH_1,
        )]);
        let expected = raw_leaf("100644", TEST_FILENAME_1, TEST_HASH_1);
        assert_eq!(expected, tree.as_bytes().unwrap());
    }

    #[test]
    fn test_from_bytes_empty_tree() {
        let tree = Tree::from_bytes(b"").unwrap();
        assert_eq!(0, tree.leaves.len());
    }

    #[test]
    fn test_from_bytes_multiple_leaves() {
        let mut input = raw_leaf("100644", TEST_FILENAME_1, TEST_HASH_1);
        input.extend(raw_leaf("40000", TEST_FILENAME_3, TEST_HASH_3));

        let tree = Tree::from_bytes(&input).unwrap();

        assert_eq!(2, tree.leaves.len());
        assert_eq!(TEST_MODE_FILE, tree.leaves[0].mode);
        assert_eq!(PathBuf::from(TEST_FILENAME_1), tree.leaves[0].name);
        assert_eq!(Hash::from_str(TEST_HASH_1).unwrap(), tree.leaves[0].hash);
        assert_eq!(TEST_MODE_DIR, tree.leaves[1].mode);
        assert_eq!(PathBuf::from(TEST_FILENAME_3), tree.leaves[1].name);
        assert_eq!(Hash::from_str(TEST_HASH_3).unwrap(), tree.leaves[1].hash);
    }

    #[test]
    fn test_roundtrip_keeps_order() {
        // Deliberately unsorted, order must survive as is
        let mut tree = create_test_tree();
        tree.leaves.reverse();
        tree.push(create_test_leaf(0, "zero_mode_file", TEST_HASH_1));

        let bytes = tree.as_bytes().unwrap();
        assert_eq!(tree, Tree::from_bytes(&bytes).unwrap());
    }

    #[test]
    fn test_from_bytes_missing_space_after_mode() {
        let result = Tree::from_bytes(b"100644filename\0");
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_from_bytes_missing_null_after_name() {
        let result = Tree::from_bytes(b"100644 filename ");
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_from_bytes_incomplete_hash() {
        let result = Tree::from_bytes(b"100644 file\0short_hash");
        let error = result.unwrap_err();
        assert!(matches!(error, Error::CorruptData(_)));
        assert!(error.to_string().contains("hash bytes"));
    }

    #[test]
    fn test_from_bytes_invalid_mode() {
        let input = raw_leaf("invalid", TEST_FILENAME_1, TEST_HASH_1);
        let error = Tree::from_bytes(&input).unwrap_err();
        assert!(matches!(error, Error::CorruptData(_)));
        assert!(error.to_string().contains("invalid tree leaf mode"));
    }

    #[test]
    fn test_from_bytes_signed_mode() {
        for mode in ["+100644", "-1", " 100644"] {
            let input = raw_leaf(mode, TEST_FILENAME_1, TEST_HASH_1);
            assert!(matches!(
                Tree::from_bytes(&input),
                Err(Error::CorruptData(_))
            ));
        }
    }

    #[test]
    fn test_special_characters_in_name() {
        let special_name = "file with spaces-and.special_chars";
        let tree = Tree::new(vec![create_test_leaf(
            TEST_MODE_FILE,
            special_name,
            TEST_HASH_1,
        )]);
        let parsed = Tree::from_bytes(&tree.as_bytes().unwrap()).unwrap();
        assert_eq!(PathBuf::from(special_name), parsed.leaves[0].name);
    }

    #[test]
    fn test_display() {
        let tree = create_test_tree();
        let shown = tree.to_string();
        assert_eq!(3, shown.lines().count());
        assert_eq!(
            format!("100644\tfile1.txt\t{}", TEST_HASH_1),
            shown.lines().next().unwrap()
        );
    }
}
