//! Results-container file: header parsing, key lookup, payload reads.

use std::fs;
use std::path::{Path, PathBuf};

use crate::datasource::DataSource;
use crate::decompress::decompress;
use crate::directory::Directory;
use crate::error::{Result, RootError};
use crate::histogram::Hist1D;
use crate::key::{Key, KeyInfo};
use crate::objects::{self, RootObject};
use crate::rbuffer::RBuffer;

const ROOT_MAGIC: &[u8; 4] = b"root";

/// Parsed file-level header fields.
struct FileHeader {
    #[allow(dead_code)]
    begin: u64,
    is_large: bool,
    #[allow(dead_code)]
    nbytes_name: u32,
    seek_keys: u64,
    nbytes_keys: u32,
}

/// An open results container.
pub struct RootFile {
    data: DataSource,
    header: FileHeader,
    path: PathBuf,
}

impl RootFile {
    /// Open and parse a container from disk using memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = fs::File::open(&path)?;
        // SAFETY: the mapping is only read, and the QA results files are
        // written once by the upstream job before this tool ever sees them.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Self::from_datasource(DataSource::Mmap(mmap), path)
    }

    /// Parse a container from a byte vector (for testing).
    pub fn from_bytes(data: Vec<u8>, path: PathBuf) -> Result<Self> {
        Self::from_datasource(DataSource::Owned(data), path)
    }

    fn from_datasource(data: DataSource, path: PathBuf) -> Result<Self> {
        if data.len() < 64 {
            return Err(RootError::BadMagic);
        }
        if &data[0..4] != ROOT_MAGIC {
            return Err(RootError::BadMagic);
        }

        let header = Self::parse_header(&data)?;
        Ok(Self { data, header, path })
    }

    /// Path this container was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file-level header and locate the top-level key list.
    ///
    /// ROOT file header layout (small file, version < 1000000):
    /// ```text
    /// offset  size  field
    ///    0      4   magic "root"
    ///    4      4   fVersion
    ///    8      4   fBEGIN
    ///   12      4   fEND
    ///   16      4   fSeekFree
    ///   20      4   fNbytesFree
    ///   24      4   nfree
    ///   28      4   fNbytesName
    ///   32      1   fUnits
    ///   33      4   fCompress
    ///   37      4   fSeekInfo
    ///   41      4   fNbytesInfo
    ///   45     18   fUUID
    /// ```
    /// The TDirectory streamer is located at `fBEGIN + fNbytesName`.
    fn parse_header(data: &[u8]) -> Result<FileHeader> {
        let mut r = RBuffer::new(data);
        r.skip(4)?; // magic

        let version = r.read_u32()?;
        let is_large = version >= 1_000_000;

        let begin = r.read_u32()? as u64;

        if is_large {
            let _end = r.read_u64()?;
            let _seek_free = r.read_u64()?;
        } else {
            let _end = r.read_u32()?;
            let _seek_free = r.read_u32()?;
        }
        let _nbytes_free = r.read_u32()?;
        let _nfree = r.read_u32()?;
        let nbytes_name = r.read_u32()?;
        let _units = r.read_u8()?;
        let _compress = r.read_u32()?;
        if is_large {
            let _seek_info = r.read_u64()?;
        } else {
            let _seek_info = r.read_u32()?;
        }
        let _nbytes_info = r.read_u32()?;
        // 18-byte UUID follows — not needed.

        let (seek_keys, nbytes_keys) =
            Self::parse_top_directory(data, begin as usize, nbytes_name as usize)?;

        Ok(FileHeader { begin, is_large, nbytes_name, seek_keys, nbytes_keys })
    }

    /// Parse the TDirectory streamer at `begin + nbytes_name`.
    fn parse_top_directory(data: &[u8], begin: usize, nbytes_name: usize) -> Result<(u64, u32)> {
        let dir_offset = begin + nbytes_name;
        if dir_offset >= data.len() {
            return Err(RootError::Deserialization("TDirectory offset past end of file".into()));
        }

        let mut r = RBuffer::new(data);
        r.set_pos(dir_offset);

        let dir_version = r.read_u16()?;
        let _datime_c = r.read_u32()?;
        let _datime_m = r.read_u32()?;
        let nbytes_keys = r.read_u32()?;
        let _nbytes_name = r.read_u32()?;

        let is_dir_large = dir_version > 1000;

        if is_dir_large {
            let _seek_dir = r.read_u64()?;
            let _seek_parent = r.read_u64()?;
            Ok((r.read_u64()?, nbytes_keys))
        } else {
            let _seek_dir = r.read_u32()? as u64;
            let _seek_parent = r.read_u32()? as u64;
            Ok((r.read_u32()? as u64, nbytes_keys))
        }
    }

    /// List all keys in the top-level directory.
    pub fn list_keys(&self) -> Result<Vec<KeyInfo>> {
        let dir = self.read_top_directory()?;
        Ok(dir.keys().iter().map(KeyInfo::from_key).collect())
    }

    /// List the keys of the directory at a `/`-separated path
    /// (empty path = top level).
    pub fn list_keys_at(&self, path: &str) -> Result<Vec<KeyInfo>> {
        let dir = self.resolve_directory(path)?;
        Ok(dir.keys().iter().map(KeyInfo::from_key).collect())
    }

    /// Get a histogram-like object by its full path
    /// (e.g. `"track-jet-qa/Kine/pt"`).
    pub fn get_object(&self, path: &str) -> Result<RootObject> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((&leaf, dirs)) = parts.split_last() else {
            return Err(RootError::KeyNotFound(path.to_string()));
        };

        let mut dir = self.read_top_directory()?;
        for &part in dirs {
            dir = self.descend(&dir, part, path)?;
        }

        let key =
            dir.find_key(leaf).ok_or_else(|| RootError::KeyNotFound(path.to_string()))?;
        let payload = self.read_key_payload(key)?;
        objects::read_object(&payload, &key.class_name)
    }

    /// Get a 1D histogram by path, failing on any other dimensionality.
    pub fn get_hist1d(&self, path: &str) -> Result<Hist1D> {
        match self.get_object(path)? {
            RootObject::H1(h) => Ok(h),
            other => Err(RootError::UnsupportedClass(format!(
                "{path}: expected a 1D histogram, found {}",
                other.kind()
            ))),
        }
    }

    fn read_top_directory(&self) -> Result<Directory> {
        Directory::read_key_list(
            &self.data,
            self.header.seek_keys as usize,
            self.header.nbytes_keys as usize,
            self.header.is_large,
        )
    }

    fn resolve_directory(&self, path: &str) -> Result<Directory> {
        let mut dir = self.read_top_directory()?;
        for part in path.split('/').filter(|s| !s.is_empty()) {
            dir = self.descend(&dir, part, path)?;
        }
        Ok(dir)
    }

    fn descend(&self, dir: &Directory, part: &str, full_path: &str) -> Result<Directory> {
        let key = dir
            .find_key(part)
            .ok_or_else(|| RootError::KeyNotFound(format!("{part} (in path {full_path})")))?;

        if key.class_name != "TDirectoryFile" && key.class_name != "TDirectory" {
            return Err(RootError::Deserialization(format!(
                "'{part}' is not a directory (class: {})",
                key.class_name
            )));
        }

        let payload = self.read_key_payload(key)?;
        Directory::read_from_payload(&payload, key, self.header.is_large, &self.data)
    }

    /// Read and decompress the payload of a TKey.
    pub(crate) fn read_key_payload(&self, key: &Key) -> Result<Vec<u8>> {
        let start = key.seek_key as usize + key.key_len as usize;
        let stored = (key.n_bytes as usize).saturating_sub(key.key_len as usize);
        let end = start + stored;
        if end > self.data.len() {
            return Err(RootError::BufferUnderflow {
                offset: start,
                need: stored,
                have: self.data.len().saturating_sub(start),
            });
        }
        let src = &self.data[start..end];

        if stored == key.obj_len as usize {
            // Stored uncompressed.
            Ok(src.to_vec())
        } else {
            log::debug!(
                "decompressing {} ({} -> {} bytes)",
                key.name,
                stored,
                key.obj_len
            );
            decompress(src, key.obj_len as usize)
        }
    }
}
