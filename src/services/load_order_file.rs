//! Codec for the load order block of the game's `usersettings.ini`.
//!
//! The game keeps its mod list in a section that looks like:
//!
//! ```text
//! [LoadOrder]
//! Slot1Directory=2871823014
//! Slot2Directory=2899415331
//!
//! [Graphics]
//! ...
//! ```
//!
//! The section starts at the line equal to the marker and ends at the first blank
//! line (or end of file). Only the `Slot<N>Directory=` lines inside that range are
//! ever rewritten. Every other byte of the file, including line endings, unknown
//! lines inside the section and the marker itself, is copied through unchanged.
//!
//! Writes stream the file line by line into a temporary file next to the target
//! and rename it over the original, so a failed write leaves the game's file as it
//! was and only the section body is held in memory.

use crate::error::{ModOrderError, Result};
use crate::models::{DEFAULT_SECTION_MARKER, DEFAULT_SLOT_KEY_PREFIX, LoadOrder};
use camino::Utf8Path;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use tempfile::NamedTempFile;

/// One line inside the section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    /// A recognized `Slot<N>Directory=<identity>` entry.
    Slot {
        slot: usize,
        identity: String,
        raw: String,
    },
    /// Anything else; re-emitted verbatim.
    Other(String),
}

impl BodyLine {
    pub fn raw(&self) -> &str {
        match self {
            BodyLine::Slot { raw, .. } => raw,
            BodyLine::Other(raw) => raw,
        }
    }
}

/// A parsed game settings file, split around the load order section.
///
/// All lines keep their original terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOrderSection {
    /// Lines before the section, ending with the marker line.
    pub preamble: Vec<String>,
    pub body: Vec<BodyLine>,
    /// The terminating blank line and everything after it.
    pub postamble: Vec<String>,
}

impl LoadOrderSection {
    /// Identities in the order their slot lines appear in the file.
    pub fn current_order(&self) -> Vec<String> {
        self.body
            .iter()
            .filter_map(|line| match line {
                BodyLine::Slot { identity, .. } => Some(identity.clone()),
                BodyLine::Other(_) => None,
            })
            .collect()
    }
}

/// Reads and rewrites the slot entries of one section.
#[derive(Debug, Clone)]
pub struct LoadOrderCodec {
    marker: String,
    key_prefix: String,
    slot_pattern: Regex,
}

impl Default for LoadOrderCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_MARKER)
    }
}

impl LoadOrderCodec {
    /// Codec for `Slot<N>Directory` entries under `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self::with_key_prefix(marker, DEFAULT_SLOT_KEY_PREFIX)
    }

    /// Codec for `<prefix><N>Directory` entries under `marker`.
    pub fn with_key_prefix(marker: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        let key_prefix = key_prefix.into();
        let pattern = format!(r"^{}(\d+)Directory=(.*)$", regex::escape(&key_prefix));
        Self {
            marker: marker.into(),
            // The prefix is escaped, so the pattern is always valid.
            slot_pattern: Regex::new(&pattern).expect("Invalid slot regex"),
            key_prefix,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parse the section out of the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ModOrderError::Io`] if the file cannot be opened or read
    /// - [`ModOrderError::SectionNotFound`] if no line equals the marker
    pub fn read(&self, path: &Utf8Path) -> Result<LoadOrderSection> {
        let file = File::open(path).map_err(|e| ModOrderError::io(path, e))?;
        let mut reader = BufReader::new(file);

        let mut section = LoadOrderSection::default();
        let mut region = Region::Before;
        let mut buf = Vec::new();

        while read_raw_line(&mut reader, &mut buf).map_err(|e| ModOrderError::io(path, e))? {
            let (content, _) = split_terminator(&buf);
            let line = String::from_utf8_lossy(&buf).into_owned();

            match region {
                Region::Before => {
                    if self.is_marker(content) {
                        region = Region::Body;
                    }
                    section.preamble.push(line);
                }
                Region::Body if is_blank(content) => {
                    region = Region::After;
                    section.postamble.push(line);
                }
                Region::Body => section.body.push(self.parse_body_line(content, line)),
                Region::After => section.postamble.push(line),
            }
        }

        if region == Region::Before {
            return Err(self.section_not_found(path));
        }

        tracing::debug!(
            "Read {} load order entries from {}",
            section.current_order().len(),
            path
        );
        Ok(section)
    }

    /// The persisted order, or `None` when the file has no load order section yet.
    pub fn read_order(&self, path: &Utf8Path) -> Result<Option<Vec<String>>> {
        match self.read(path) {
            Ok(section) => Ok(Some(section.current_order())),
            Err(ModOrderError::SectionNotFound { .. }) => {
                tracing::debug!("No {} section in {}", self.marker, path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the slot entries of the section with `order`.
    ///
    /// The regenerated `Slot1Directory=...` block goes where the first existing slot
    /// line was, or right after the marker when the section had none. Other slot
    /// lines are dropped; non-slot lines keep their place. New lines use the
    /// marker's line ending.
    ///
    /// # Errors
    ///
    /// - [`ModOrderError::Io`] on any read, write or rename failure; the original
    ///   file is left untouched
    /// - [`ModOrderError::SectionNotFound`] if no line equals the marker
    pub fn write(&self, path: &Utf8Path, order: &LoadOrder) -> Result<()> {
        let io_err = |e: std::io::Error| ModOrderError::io(path, e);

        let file = File::open(path).map_err(io_err)?;
        let permissions = file.metadata().map_err(io_err)?.permissions();
        let mut reader = BufReader::new(file);

        let dir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;

        let found = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let found = self
                .rewrite(&mut reader, &mut writer, order)
                .map_err(io_err)?;
            writer.flush().map_err(io_err)?;
            found
        };

        if !found {
            // Dropping `temp` removes it.
            return Err(self.section_not_found(path));
        }

        temp.as_file().sync_all().map_err(io_err)?;
        fs::set_permissions(temp.path(), permissions).map_err(io_err)?;
        temp.persist(path).map_err(|e| io_err(e.error))?;

        tracing::debug!("Wrote {} load order entries to {}", order.len(), path);
        Ok(())
    }

    /// Stream `reader` into `writer`, replacing the section's slot lines.
    ///
    /// Returns `false` when the marker was never seen.
    fn rewrite<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        order: &LoadOrder,
    ) -> std::io::Result<bool> {
        let mut region = Region::Before;
        let mut newline: &[u8] = b"\n";
        let mut marker_unterminated = false;
        let mut body: Vec<Vec<u8>> = Vec::new();
        let mut buf = Vec::new();

        while read_raw_line(reader, &mut buf)? {
            let (content, terminator) = split_terminator(&buf);

            match region {
                Region::Before => {
                    writer.write_all(&buf)?;
                    if self.is_marker(content) {
                        region = Region::Body;
                        if terminator.is_empty() {
                            marker_unterminated = true;
                        } else {
                            newline = if terminator == b"\r\n" {
                                &b"\r\n"[..]
                            } else {
                                &b"\n"[..]
                            };
                        }
                    }
                }
                Region::Body if is_blank(content) => {
                    self.write_body(writer, &body, order, newline, marker_unterminated)?;
                    writer.write_all(&buf)?;
                    region = Region::After;
                }
                Region::Body => body.push(buf.clone()),
                Region::After => writer.write_all(&buf)?,
            }
        }

        match region {
            Region::Before => Ok(false),
            Region::Body => {
                self.write_body(writer, &body, order, newline, marker_unterminated)?;
                Ok(true)
            }
            Region::After => Ok(true),
        }
    }

    fn write_body<W: Write>(
        &self,
        writer: &mut W,
        body: &[Vec<u8>],
        order: &LoadOrder,
        newline: &[u8],
        marker_unterminated: bool,
    ) -> std::io::Result<()> {
        let is_slot: Vec<bool> = body.iter().map(|raw| self.is_slot_line(raw)).collect();
        let insert_at = is_slot.iter().position(|slot| *slot).unwrap_or(0);
        let ends_unterminated = body
            .last()
            .map_or(marker_unterminated, |raw| split_terminator(raw).1.is_empty());

        let mut lines: Vec<Vec<u8>> = Vec::with_capacity(body.len() + order.len());
        lines.extend(body[..insert_at].iter().cloned());
        for (index, identity) in order.iter().enumerate() {
            let mut line = self.slot_line(index + 1, identity).into_bytes();
            line.extend_from_slice(newline);
            lines.push(line);
        }
        lines.extend(
            body[insert_at..]
                .iter()
                .zip(&is_slot[insert_at..])
                .filter(|(_, slot)| !**slot)
                .map(|(raw, _)| raw.clone()),
        );

        if lines.is_empty() {
            return Ok(());
        }
        if marker_unterminated {
            writer.write_all(newline)?;
        }

        let last = lines.len() - 1;
        for (index, line) in lines.iter().enumerate() {
            let (content, terminator) = split_terminator(line);
            writer.write_all(content)?;
            if index == last && ends_unterminated {
                continue;
            }
            if terminator.is_empty() {
                writer.write_all(newline)?;
            } else {
                writer.write_all(terminator)?;
            }
        }
        Ok(())
    }

    fn slot_line(&self, slot: usize, identity: &str) -> String {
        format!("{}{}Directory={}", self.key_prefix, slot, identity)
    }

    fn is_marker(&self, content: &[u8]) -> bool {
        content == self.marker.as_bytes()
    }

    fn is_slot_line(&self, raw: &[u8]) -> bool {
        self.parse_slot(split_terminator(raw).0).is_some()
    }

    fn parse_body_line(&self, content: &[u8], raw: String) -> BodyLine {
        match self.parse_slot(content) {
            Some((slot, identity)) => BodyLine::Slot {
                slot,
                identity,
                raw,
            },
            None => BodyLine::Other(raw),
        }
    }

    /// Slot number and trimmed value of a `<prefix><N>Directory=` line.
    ///
    /// Both reading and rewriting go through here, so a line that reads as
    /// [`BodyLine::Other`] is never dropped on write.
    fn parse_slot(&self, content: &[u8]) -> Option<(usize, String)> {
        let content = std::str::from_utf8(content).ok()?;
        let caps = self.slot_pattern.captures(content)?;
        let slot = caps[1].parse().ok()?;
        Some((slot, caps[2].trim().to_string()))
    }

    fn section_not_found(&self, path: &Utf8Path) -> ModOrderError {
        ModOrderError::SectionNotFound {
            marker: self.marker.clone(),
            path: path.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Before,
    Body,
    After,
}

/// Read one line including its terminator into `buf`. Returns `false` at EOF.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

/// Split a raw line into content and terminator (`\r\n`, `\n` or nothing).
fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    if line.ends_with(b"\r\n") {
        line.split_at(line.len() - 2)
    } else if line.ends_with(b"\n") {
        line.split_at(line.len() - 1)
    } else {
        (line, &[])
    }
}

fn is_blank(content: &[u8]) -> bool {
    content.iter().all(u8::is_ascii_whitespace)
}
