use std::fs;
use std::path::PathBuf;

use crate::byteable::Byteable;
use crate::hashing::Hash;
use crate::object::{Object, ObjectKind, frame};
use crate::utils::zlib;
use crate::{Constants, Error, Result};

use super::{Repository, atomic_write};

impl Repository {
    /// Returns the path where the object with `hash` is stored: `objects/{2 hex}/{38 hex}`.
    pub fn object_path(&self, hash: &Hash) -> PathBuf {
        let (dir, file_name) = hash.fan_out();
        self.path(&[Constants::OBJECTS_FOLDER_NAME, dir.as_str(), file_name.as_str()])
    }

    pub fn has_object(&self, hash: &Hash) -> bool {
        self.object_path(hash).is_file()
    }

    /// Frames, hashes, compresses and stores `payload` as an object of type `kind`, returning the
    /// hash used to find said object.
    ///
    /// Writing the same object twice gives the same hash and the same file.
    ///
    /// # Errors
    ///
    /// This function fails with `InvalidArgument` if `kind` is not an object type, or if the
    /// object file could not be written.
    pub fn write_object(&self, kind: &str, payload: &[u8]) -> Result<Hash> {
        let kind: ObjectKind = kind.parse()?;
        self.store(kind, payload)
    }

    /// Serializes and stores `object`.
    pub fn write(&self, object: &Object) -> Result<Hash> {
        self.store(object.kind(), &object.payload()?)
    }

    fn store(&self, kind: ObjectKind, payload: &[u8]) -> Result<Hash> {
        let framed = frame::encode(kind, payload)?;
        let hash = Hash::compute(&framed);

        let (dir, file_name) = hash.fan_out();
        let folder_path = self.dir_path(true, &[Constants::OBJECTS_FOLDER_NAME, dir.as_str()])?;

        let compressed = zlib::compress(&framed)?;
        atomic_write(&folder_path.join(file_name), &compressed)?;

        log::debug!("wrote {} object {} ({} bytes)", kind, hash, payload.len());
        Ok(hash)
    }

    /// Reads the object identified by the raw bytes in `sha`.
    ///
    /// # Errors
    ///
    /// This function fails with `InvalidArgument` if `sha` is not exactly 20 bytes long, before
    /// touching the filesystem. See `read` for the rest.
    pub fn read_object(&self, sha: &[u8]) -> Result<Object> {
        let hash = Hash::try_from(sha)?;
        self.read(&hash)
    }

    /// Reads, decompresses and parses the object with `hash`.
    ///
    /// # Errors
    ///
    /// This function will fail if:
    /// - There is no such object (`NotFound`).
    /// - The file is not valid zlib or the frame is malformed (`CorruptData`).
    /// - The payload could not be parsed (`Deserialize`).
    pub fn read(&self, hash: &Hash) -> Result<Object> {
        let path = self.object_path(hash);
        let data = fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(format!("object {}", hash)),
            _ => Error::Io {
                context: format!("could not read object file {:?}", path),
                source: e,
            },
        })?;

        let bytes = zlib::decompress(&data).map_err(|e| match e {
            Error::CorruptData(msg) => Error::CorruptData(format!("object {}: {}", hash, msg)),
            other => other,
        })?;
        let object = Object::from_bytes(&bytes)?;

        log::debug!("read {} object {}", object.kind(), hash);
        Ok(object)
    }
}

/// Returns the hash `payload` would have as an object of type `kind`, without writing anything.
pub fn hash_object(kind: &str, payload: &[u8]) -> Result<Hash> {
    let kind: ObjectKind = kind.parse()?;
    Ok(Hash::compute(&frame::encode(kind, payload)?))
}
