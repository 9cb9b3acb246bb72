// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error frames.
//!
//! Each error is translated field by field into a caller-owned slot. Reading
//! fills the slot with a new value; writing requires the slot to hold one.

use bw_core::{InternalLoggerError, InvalidProjectFileError};

use crate::error::{ProtocolError, Result};
use crate::event::translate_option_event;
use crate::translator::Translator;

fn prepare_slot<'a, T: Translator, E: Default>(
    t: &T,
    slot: &'a mut Option<E>,
    what: &'static str,
) -> Result<&'a mut E> {
    if t.is_reading() {
        Ok(slot.insert(E::default()))
    } else {
        slot.as_mut().ok_or(ProtocolError::MissingValue(what))
    }
}

/// message? file? line column end_line end_column subcategory? code? help_keyword? logged
pub fn translate_invalid_project_file<T: Translator>(
    t: &mut T,
    slot: &mut Option<InvalidProjectFileError>,
) -> Result<()> {
    let err = prepare_slot(t, slot, "invalid project file error")?;
    t.translate_option_string(&mut err.message)?;
    t.translate_option_string(&mut err.project_file)?;
    t.translate_i32(&mut err.span.line)?;
    t.translate_i32(&mut err.span.column)?;
    t.translate_i32(&mut err.span.end_line)?;
    t.translate_i32(&mut err.span.end_column)?;
    t.translate_option_string(&mut err.subcategory)?;
    t.translate_option_string(&mut err.code)?;
    t.translate_option_string(&mut err.help_keyword)?;
    t.translate_bool(&mut err.has_been_logged)
}

/// message? inner_message? event? error_code? help_keyword? initialization
pub fn translate_internal_logger_error<T: Translator>(
    t: &mut T,
    slot: &mut Option<InternalLoggerError>,
) -> Result<()> {
    let err = prepare_slot(t, slot, "internal logger error")?;
    t.translate_option_string(&mut err.message)?;
    t.translate_option_string(&mut err.inner_message)?;
    translate_option_event(t, &mut err.event)?;
    t.translate_option_string(&mut err.error_code)?;
    t.translate_option_string(&mut err.help_keyword)?;
    t.translate_bool(&mut err.initialization_error)
}

#[cfg(test)]
#[path = "exception_tests.rs"]
mod tests;
