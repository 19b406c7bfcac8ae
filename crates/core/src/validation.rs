//! Input validation utilities.
//!
//! Checks applied to configuration values at startup, before they are used to build the
//! layout registry or to filter admissions.

use crate::bed_id::{normalize, BedId};
use crate::constants::MAX_WARD_CODE_LEN;
use crate::{WardError, WardResult};

/// Validates a layout bed id and returns it as a [`BedId`].
///
/// Layout entries must already be canonical: the registry compares normalised admission codes
/// against them verbatim, so an entry such as `s1` would never match anything.
///
/// # Errors
///
/// Returns `WardError::InvalidLayout` if the id is empty or not in canonical form.
pub fn validate_layout_bed_id(zone_id: &str, raw: &str) -> WardResult<BedId> {
    let Some(id) = normalize(raw) else {
        return Err(WardError::InvalidLayout(format!(
            "zone {zone_id} contains an empty room id"
        )));
    };

    if id.as_str() != raw {
        return Err(WardError::InvalidLayout(format!(
            "room id {raw:?} in zone {zone_id} is not canonical (expected {id:?})",
            id = id.as_str()
        )));
    }

    Ok(id)
}

/// Validates a ward code used to filter admission exports.
///
/// Ward codes are short ASCII alphanumerics (`07`, `ICU1`).
///
/// # Errors
///
/// Returns `WardError::InvalidInput` if the code is empty, too long, or contains other
/// characters.
pub fn validate_ward_code(code: &str) -> WardResult<()> {
    if code.trim().is_empty() {
        return Err(WardError::InvalidInput("ward code cannot be empty".into()));
    }

    if code.len() > MAX_WARD_CODE_LEN {
        return Err(WardError::InvalidInput(format!(
            "ward code exceeds maximum length of {} characters",
            MAX_WARD_CODE_LEN
        )));
    }

    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(WardError::InvalidInput(
            "ward code contains invalid characters (only ASCII letters and digits allowed)".into(),
        ));
    }

    Ok(())
}
