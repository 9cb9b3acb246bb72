// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bidirectional primitive codec.
//!
//! A [`Translator`] is fixed to one direction for its lifetime. Every
//! operation takes `&mut T`: when writing, the value is encoded; when
//! reading, it is overwritten with the decoded value. Frame layouts are
//! therefore written once and cannot drift between the two directions.
//!
//! Encodings (all little-endian):
//!
//! | Value     | Bytes                                         |
//! |-----------|-----------------------------------------------|
//! | bool      | 1 byte, `0` or `1`                            |
//! | i32       | 4 bytes                                       |
//! | string    | u32 byte length + UTF-8                       |
//! | bytes     | u32 length + raw bytes                        |
//! | count     | i32, negative is rejected                     |
//! | timestamp | i64 nanoseconds since the Unix epoch (UTC)    |
//! | optional  | bool presence flag, then the value if present |

use std::io::{BufRead, Read, Write};

use bw_core::{EventType, MessageImportance, TargetBuiltReason};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ProtocolError, Result};

/// Current protocol version spoken by this build.
pub const PROTOCOL_VERSION: i32 = 3;

/// Oldest protocol version this build can still talk to.
pub const MIN_PROTOCOL_VERSION: i32 = 1;

/// Version that appended `help_link` to error and warning frames.
pub const HELP_LINK_VERSION: i32 = 2;

/// Version that appended argument kinds to lazily formatted frames.
pub const TYPED_ARGS_VERSION: i32 = 3;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Upper bounds applied to lengths and counts read from the wire.
///
/// A length beyond these bounds is treated as stream corruption rather than
/// an allocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireLimits {
    pub max_string_len: usize,
    pub max_collection_len: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self { max_string_len: 16 * 1024 * 1024, max_collection_len: 1024 * 1024 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// Enumerations carried on the wire as their i32 code.
pub trait WireEnum: Copy {
    const NAME: &'static str;

    fn code(self) -> i32;
    fn from_code(code: i32) -> Option<Self>;
}

impl WireEnum for TargetBuiltReason {
    const NAME: &'static str = "target built reason";

    fn code(self) -> i32 {
        TargetBuiltReason::code(self)
    }

    fn from_code(code: i32) -> Option<Self> {
        TargetBuiltReason::from_code(code)
    }
}

impl WireEnum for MessageImportance {
    const NAME: &'static str = "message importance";

    fn code(self) -> i32 {
        MessageImportance::code(self)
    }

    fn from_code(code: i32) -> Option<Self> {
        MessageImportance::from_code(code)
    }
}

impl WireEnum for EventType {
    const NAME: &'static str = "event type";

    fn code(self) -> i32 {
        EventType::code(self)
    }

    fn from_code(code: i32) -> Option<Self> {
        EventType::from_code(code)
    }
}

/// One direction of the primitive codec.
pub trait Translator {
    fn direction(&self) -> Direction;

    /// Negotiated protocol version; gates appended fields.
    fn version(&self) -> i32;

    fn limits(&self) -> &WireLimits;

    fn translate_bool(&mut self, value: &mut bool) -> Result<()>;

    fn translate_u8(&mut self, value: &mut u8) -> Result<()>;

    fn translate_i32(&mut self, value: &mut i32) -> Result<()>;

    fn translate_i64(&mut self, value: &mut i64) -> Result<()>;

    fn translate_string(&mut self, value: &mut String) -> Result<()>;

    fn translate_bytes(&mut self, value: &mut Vec<u8>) -> Result<()>;

    /// True when a reader sits at a clean end of stream. Writers are never at the end.
    fn at_end(&mut self) -> Result<bool>;

    fn is_reading(&self) -> bool {
        self.direction() == Direction::Read
    }

    /// Element count of a collection, checked against the limits.
    fn translate_count(&mut self, what: &'static str, count: &mut usize) -> Result<()> {
        let max = self.limits().max_collection_len;
        let mut raw = match i32::try_from(*count) {
            Ok(raw) if *count <= max => raw,
            _ => return Err(ProtocolError::LengthOutOfRange { what, len: *count as i64, max }),
        };
        self.translate_i32(&mut raw)?;
        match usize::try_from(raw) {
            Ok(n) if n <= max => {
                *count = n;
                Ok(())
            }
            _ => Err(ProtocolError::LengthOutOfRange { what, len: i64::from(raw), max }),
        }
    }

    /// Presence flag for an optional value. Returns whether the value follows.
    fn translate_nullable(&mut self, present: bool) -> Result<bool> {
        let mut flag = present;
        self.translate_bool(&mut flag)?;
        Ok(flag)
    }

    fn translate_option_string(&mut self, value: &mut Option<String>) -> Result<()> {
        if self.translate_nullable(value.is_some())? {
            self.translate_string(value.get_or_insert_with(String::new))
        } else {
            *value = None;
            Ok(())
        }
    }

    fn translate_timestamp(&mut self, value: &mut DateTime<Utc>) -> Result<()> {
        let mut nanos = if self.is_reading() {
            0
        } else {
            value.timestamp_nanos_opt().ok_or(ProtocolError::TimestampOutOfRange)?
        };
        self.translate_i64(&mut nanos)?;
        if self.is_reading() {
            let secs = nanos.div_euclid(NANOS_PER_SEC);
            let subsec = nanos.rem_euclid(NANOS_PER_SEC) as u32;
            *value = DateTime::from_timestamp(secs, subsec)
                .ok_or(ProtocolError::TimestampOutOfRange)?;
        }
        Ok(())
    }

    fn translate_enum<E: WireEnum>(&mut self, value: &mut E) -> Result<()>
    where
        Self: Sized,
    {
        let mut code = value.code();
        self.translate_i32(&mut code)?;
        *value = E::from_code(code)
            .ok_or(ProtocolError::InvalidEnum { name: E::NAME, value: code })?;
        Ok(())
    }

    /// Count-prefixed list of non-null strings.
    fn translate_string_list(&mut self, values: &mut Vec<String>) -> Result<()> {
        let mut count = values.len();
        self.translate_count("string list", &mut count)?;
        if self.is_reading() {
            values.clear();
            values.resize_with(count, String::new);
        }
        for value in values.iter_mut() {
            self.translate_string(value)?;
        }
        Ok(())
    }

    /// Nullable list whose entries are themselves nullable.
    ///
    /// Null entries decode as empty strings.
    fn translate_option_string_list(&mut self, values: &mut Option<Vec<String>>) -> Result<()> {
        if !self.translate_nullable(values.is_some())? {
            *values = None;
            return Ok(());
        }
        let values = values.get_or_insert_with(Vec::new);
        let mut count = values.len();
        self.translate_count("argument list", &mut count)?;
        if self.is_reading() {
            values.clear();
            values.resize_with(count, String::new);
        }
        for value in values.iter_mut() {
            if self.translate_nullable(true)? {
                self.translate_string(value)?;
            }
        }
        Ok(())
    }

    /// Nullable name/value table.
    ///
    /// Entries with an empty name or value are dropped before the count is
    /// written, so they never reach the peer.
    fn translate_properties(&mut self, table: &mut Option<IndexMap<String, String>>) -> Result<()> {
        if !self.translate_nullable(table.is_some())? {
            *table = None;
            return Ok(());
        }
        let table = table.get_or_insert_with(IndexMap::new);
        if self.is_reading() {
            let mut count = 0;
            self.translate_count("property table", &mut count)?;
            table.clear();
            for _ in 0..count {
                let (mut name, mut value) = (String::new(), String::new());
                self.translate_string(&mut name)?;
                self.translate_string(&mut value)?;
                table.insert(name, value);
            }
        } else {
            let mut valid: Vec<(String, String)> = table
                .iter()
                .filter(|(name, value)| !name.is_empty() && !value.is_empty())
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            let mut count = valid.len();
            self.translate_count("property table", &mut count)?;
            for (name, value) in valid.iter_mut() {
                self.translate_string(name)?;
                self.translate_string(value)?;
            }
        }
        Ok(())
    }

    /// Optional string added to a frame in protocol `since`.
    ///
    /// Skipped entirely when talking to an older peer. Once the session
    /// version includes the field its presence flag is required: a stream
    /// that ends there was cut mid-frame.
    fn translate_appended_option_string(
        &mut self,
        since: i32,
        value: &mut Option<String>,
    ) -> Result<()> {
        if self.version() < since {
            if self.is_reading() {
                *value = None;
            }
            return Ok(());
        }
        self.translate_option_string(value)
    }
}

/// Encoding side of the codec.
pub struct WriteTranslator<W> {
    writer: W,
    version: i32,
    limits: WireLimits,
}

impl<W: Write> WriteTranslator<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, version: PROTOCOL_VERSION, limits: WireLimits::default() }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn with_limits(mut self, limits: WireLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_len(&mut self, what: &'static str, len: usize) -> Result<()> {
        let max = self.limits.max_string_len;
        let encoded = match u32::try_from(len) {
            Ok(encoded) if len <= max => encoded,
            _ => return Err(ProtocolError::LengthOutOfRange { what, len: len as i64, max }),
        };
        self.writer.write_all(&encoded.to_le_bytes())?;
        Ok(())
    }
}

impl<W: Write> Translator for WriteTranslator<W> {
    fn direction(&self) -> Direction {
        Direction::Write
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn limits(&self) -> &WireLimits {
        &self.limits
    }

    fn translate_bool(&mut self, value: &mut bool) -> Result<()> {
        self.writer.write_all(&[u8::from(*value)])?;
        Ok(())
    }

    fn translate_u8(&mut self, value: &mut u8) -> Result<()> {
        self.writer.write_all(&[*value])?;
        Ok(())
    }

    fn translate_i32(&mut self, value: &mut i32) -> Result<()> {
        self.writer.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn translate_i64(&mut self, value: &mut i64) -> Result<()> {
        self.writer.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn translate_string(&mut self, value: &mut String) -> Result<()> {
        self.write_len("string", value.len())?;
        self.writer.write_all(value.as_bytes())?;
        Ok(())
    }

    fn translate_bytes(&mut self, value: &mut Vec<u8>) -> Result<()> {
        self.write_len("byte buffer", value.len())?;
        self.writer.write_all(value)?;
        Ok(())
    }

    fn at_end(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// Decoding side of the codec.
pub struct ReadTranslator<R> {
    reader: R,
    version: i32,
    limits: WireLimits,
}

impl<R: BufRead> ReadTranslator<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, version: PROTOCOL_VERSION, limits: WireLimits::default() }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn with_limits(mut self, limits: WireLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a u32 length prefix followed by that many bytes.
    ///
    /// The body is read through `take`, so a corrupt length on a short
    /// stream fails with `UnexpectedEof` instead of allocating up front.
    fn read_sized(&mut self, what: &'static str) -> Result<Vec<u8>> {
        let len = u32::from_le_bytes(self.read_array()?);
        let max = self.limits.max_string_len;
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= max)
            .ok_or(ProtocolError::LengthOutOfRange { what, len: i64::from(len), max })?;
        let mut buf = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }
}

impl<R: BufRead> Translator for ReadTranslator<R> {
    fn direction(&self) -> Direction {
        Direction::Read
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn limits(&self) -> &WireLimits {
        &self.limits
    }

    fn translate_bool(&mut self, value: &mut bool) -> Result<()> {
        let [byte] = self.read_array::<1>()?;
        *value = match byte {
            0 => false,
            1 => true,
            other => return Err(ProtocolError::InvalidBool(other)),
        };
        Ok(())
    }

    fn translate_u8(&mut self, value: &mut u8) -> Result<()> {
        let [byte] = self.read_array::<1>()?;
        *value = byte;
        Ok(())
    }

    fn translate_i32(&mut self, value: &mut i32) -> Result<()> {
        *value = i32::from_le_bytes(self.read_array()?);
        Ok(())
    }

    fn translate_i64(&mut self, value: &mut i64) -> Result<()> {
        *value = i64::from_le_bytes(self.read_array()?);
        Ok(())
    }

    fn translate_string(&mut self, value: &mut String) -> Result<()> {
        let bytes = self.read_sized("string")?;
        *value = String::from_utf8(bytes)?;
        Ok(())
    }

    fn translate_bytes(&mut self, value: &mut Vec<u8>) -> Result<()> {
        *value = self.read_sized("byte buffer")?;
        Ok(())
    }

    fn at_end(&mut self) -> Result<bool> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
