//! EEPROM device abstraction.
//!
//! RULE: Only device implementations touch storage bytes.
//! The store calls `probe`, `read_bytes` and `write_bytes`; it never
//! reaches into an image directly.

use crate::error::{SaveError, SaveResult};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Save chip fitted to the cartridge, as reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EepromKind {
    None,
    Eeprom4k,
    Eeprom16k,
}

impl EepromKind {
    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        match self {
            EepromKind::None      => 0,
            EepromKind::Eeprom4k  => 512,
            EepromKind::Eeprom16k => 2048,
        }
    }

    pub fn is_present(&self) -> bool {
        *self != EepromKind::None
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(EepromKind::None),
            "4k" | "eeprom4k" => Some(EepromKind::Eeprom4k),
            "16k" | "eeprom16k" => Some(EepromKind::Eeprom16k),
            _ => None,
        }
    }
}

/// The contract every save chip backend fulfills.
///
/// Reads and writes are synchronous and either complete in full or fail.
pub trait EepromDevice {
    /// Detect the fitted chip. Called once, at store initialization.
    fn probe(&mut self) -> EepromKind;

    fn read_bytes(&mut self, offset: usize, buf: &mut [u8]) -> SaveResult<()>;

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> SaveResult<()>;
}

fn check_bounds(kind: EepromKind, offset: usize, len: usize) -> SaveResult<()> {
    let capacity = kind.capacity();
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(SaveError::OutOfBounds { offset, len, capacity }),
    }
}

// ── No chip ────────────────────────────────────────────────────

/// A cartridge without a save chip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEeprom;

impl EepromDevice for NoEeprom {
    fn probe(&mut self) -> EepromKind {
        EepromKind::None
    }

    fn read_bytes(&mut self, offset: usize, buf: &mut [u8]) -> SaveResult<()> {
        check_bounds(EepromKind::None, offset, buf.len())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> SaveResult<()> {
        check_bounds(EepromKind::None, offset, data.len())
    }
}

// ── In-memory chip ─────────────────────────────────────────────

/// An EEPROM image held in memory (used in tests and dry runs).
#[derive(Debug, Clone)]
pub struct MemoryEeprom {
    kind:        EepromKind,
    bytes:       Vec<u8>,
    writes:      usize,
    write_fault: bool,
}

impl MemoryEeprom {
    /// A blank chip of the given kind, every byte zero.
    pub fn new(kind: EepromKind) -> Self {
        Self::with_contents(kind, &[])
    }

    /// A chip whose leading bytes are `contents`; the rest is zero.
    /// Contents longer than the chip are cut to its capacity.
    pub fn with_contents(kind: EepromKind, contents: &[u8]) -> Self {
        let mut bytes = vec![0u8; kind.capacity()];
        let n = contents.len().min(bytes.len());
        bytes[..n].copy_from_slice(&contents[..n]);
        Self {
            kind,
            bytes,
            writes: 0,
            write_fault: false,
        }
    }

    pub fn contents(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of successful `write_bytes` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Make every subsequent write fail with an I/O error.
    pub fn set_write_fault(&mut self, on: bool) {
        self.write_fault = on;
    }
}

impl EepromDevice for MemoryEeprom {
    fn probe(&mut self) -> EepromKind {
        self.kind
    }

    fn read_bytes(&mut self, offset: usize, buf: &mut [u8]) -> SaveResult<()> {
        check_bounds(self.kind, offset, buf.len())?;
        buf.copy_from_slice(&self.bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> SaveResult<()> {
        check_bounds(self.kind, offset, data.len())?;
        if self.write_fault {
            return Err(io::Error::new(io::ErrorKind::Other, "injected EEPROM write fault").into());
        }
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

// ── Image file ─────────────────────────────────────────────────

/// An EEPROM image stored in a host file, as emulators keep them.
#[derive(Debug)]
pub struct FileEeprom {
    kind: EepromKind,
    file: File,
}

impl FileEeprom {
    /// Open (or create) the image at `path`. A short file is zero-padded to the
    /// chip capacity so every in-bounds read succeeds.
    pub fn open<P: AsRef<Path>>(path: P, kind: EepromKind) -> SaveResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_ref())?;
        let capacity = kind.capacity() as u64;
        if file.metadata()?.len() < capacity {
            file.set_len(capacity)?;
            log::debug!("Padded EEPROM image {} to {capacity} bytes", path.as_ref().display());
        }
        Ok(Self { kind, file })
    }
}

impl EepromDevice for FileEeprom {
    fn probe(&mut self) -> EepromKind {
        self.kind
    }

    fn read_bytes(&mut self, offset: usize, buf: &mut [u8]) -> SaveResult<()> {
        check_bounds(self.kind, offset, buf.len())?;
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> SaveResult<()> {
        check_bounds(self.kind, offset, data.len())?;
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.write_all(data)?;
        self.file.sync_data()?;
        Ok(())
    }
}
