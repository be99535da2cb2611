use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::bank::Bank;

/// bankbook binary version
const BANKBOOK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The first 1024 bytes of a database file are reserved for metadata.
const HEADER_SIZE: usize = 1024;

/// Metadata of database file. Contains the version of bankbook that was used to write the database
/// to disk, so future versions can upgrade files written by older binaries.
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct Metadata {
    version: String,
}

/// Where the bank lives between runs.
pub(crate) trait Store {
    /// Load the bank, or `None` if nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<Bank>>;

    /// Persist the whole bank. A failed commit leaves the previously committed bank intact.
    fn commit(&mut self, bank: &Bank) -> anyhow::Result<()>;
}

/// Single file store: metadata header followed by the bincode encoded bank.
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore { path: path.into() }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new content is written to before it replaces the database file.
    fn staging_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().map(OsString::from).unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl Store for FileStore {
    fn load(&self) -> anyhow::Result<Option<Bank>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)
            .with_context(|| format!("Unable to read database file {}", self.path.display()))?;
        let (metadata, bank) = decode(&bytes)
            .with_context(|| format!("Unable to decode database file {}", self.path.display()))?;
        info!("Database version {}", metadata.version);
        debug!("Loaded from {}", self.path.display());
        Ok(Some(bank))
    }

    fn commit(&mut self, bank: &Bank) -> anyhow::Result<()> {
        let encoded = encode(bank)?;

        let staging_path = self.staging_path();
        let mut file = fs::File::create(&staging_path)
            .with_context(|| format!("Unable to create {}", staging_path.display()))?;
        file.write_all(&encoded)?;
        file.sync_all()?;

        fs::rename(&staging_path, &self.path)
            .with_context(|| format!("Unable to write to database file {}", self.path.display()))?;
        debug!("Saved to {}", self.path.display());
        Ok(())
    }
}

fn encode(bank: &Bank) -> anyhow::Result<Vec<u8>> {
    // Create metadata using current binary version
    let metadata = Metadata { version: BANKBOOK_VERSION.to_string() };
    let metadata_encoded: Vec<u8> = bincode::serialize(&metadata)?;
    let metadata_length = metadata_encoded.len();
    if metadata_length > HEADER_SIZE - 2 {
        bail!("Metadata of {metadata_length} bytes does not fit in the file header");
    }

    let mut buffer: Vec<u8> = Vec::with_capacity(HEADER_SIZE);
    // Using first 2 bytes to write metadata length
    buffer.write_u16::<LittleEndian>(metadata_length as u16)?;
    buffer.write_all(&metadata_encoded)?;
    // Write 0s for remaining bytes to fill up the header.
    buffer.resize(HEADER_SIZE, 0);

    bincode::serialize_into(&mut buffer, bank)?;
    Ok(buffer)
}

fn decode(bytes: &[u8]) -> anyhow::Result<(Metadata, Bank)> {
    if bytes.len() < HEADER_SIZE {
        bail!("File is too short to be a bankbook database");
    }

    let mut length_bytes = &bytes[..2];
    let metadata_length = length_bytes.read_u16::<LittleEndian>()? as usize;
    if metadata_length > HEADER_SIZE - 2 {
        bail!("Invalid metadata length {metadata_length}");
    }

    let metadata: Metadata = bincode::deserialize(&bytes[2..2 + metadata_length])?;
    let bank: Bank = bincode::deserialize(&bytes[HEADER_SIZE..])?;
    Ok((metadata, bank))
}

/// Keeps the encoded bank in memory. Goes through the same encoding as [FileStore].
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStore {
    bytes: Option<Vec<u8>>,
    pub(crate) commits: usize,
    /// Make every commit fail, e.g. to simulate a full disk
    pub(crate) fail_commits: bool,
}

#[cfg(test)]
impl Store for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<Bank>> {
        match &self.bytes {
            Some(bytes) => Ok(Some(decode(bytes)?.1)),
            None => Ok(None),
        }
    }

    fn commit(&mut self, bank: &Bank) -> anyhow::Result<()> {
        if self.fail_commits {
            bail!("Simulated commit failure");
        }
        self.bytes = Some(encode(bank)?);
        self.commits += 1;
        Ok(())
    }
}
