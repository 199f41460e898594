//! In-memory ZIP container for export members.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::DatevError;

/// Deflate-compressed ZIP built in memory.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
    reserved: HashSet<String>,
    members: Vec<String>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            names: HashSet::new(),
            reserved: HashSet::new(),
            members: Vec::new(),
        }
    }

    /// Hold `name` back for a later [`add_reserved`](Self::add_reserved).
    ///
    /// Members added with [`add`](Self::add) under that name are renamed.
    pub fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.to_string());
    }

    /// Add a member under `name`, renaming it if the name is already taken
    /// or reserved.
    ///
    /// Returns the name actually written.
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<String, DatevError> {
        let unique = self.unique_name(name);
        if unique != name {
            warn!(original = name, renamed = %unique, "duplicate archive member renamed");
        }
        self.write_member(unique, data)
    }

    /// Add a member under a name claimed earlier with [`reserve`](Self::reserve).
    pub fn add_reserved(&mut self, name: &str, data: &[u8]) -> Result<String, DatevError> {
        if !self.reserved.remove(name) {
            return Err(DatevError::Archive(format!("{name} was not reserved")));
        }
        if self.names.contains(name) {
            return Err(DatevError::Archive(format!("{name} already written")));
        }
        self.write_member(name.to_string(), data)
    }

    fn write_member(&mut self, unique: String, data: &[u8]) -> Result<String, DatevError> {
        self.zip
            .start_file(unique.as_str(), self.options)
            .map_err(|e| DatevError::Archive(format!("failed to add {unique}: {e}")))?;
        self.zip
            .write_all(data)
            .map_err(|e| DatevError::Archive(format!("failed to write {unique}: {e}")))?;

        self.names.insert(unique.clone());
        self.members.push(unique.clone());
        Ok(unique)
    }

    /// Member names in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Finalize the archive and return its bytes.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), DatevError> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| DatevError::Archive(format!("failed to finalize archive: {e}")))?;
        Ok((cursor.into_inner(), self.members))
    }

    fn is_taken(&self, name: &str) -> bool {
        self.names.contains(name) || self.reserved.contains(name)
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.is_taken(name) {
            return name.to_string();
        }
        let (stem, ext) = match name.rfind('.') {
            Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
            _ => (name, ""),
        };
        (2..)
            .map(|n| format!("{stem}_{n}{ext}"))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
