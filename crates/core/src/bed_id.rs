//! Bed identifier normalisation.
//!
//! Admission rows carry bed codes typed by ward staff: lower case, stray spaces, Thai digits,
//! missing zero padding. This module turns such a code into the canonical form used by the
//! layout registry, so that `" s 1"`, `"S1"` and `"S๑"` all resolve to `S01`.
//!
//! Canonical form:
//! - no whitespace anywhere
//! - ASCII letters upper-cased, other scripts untouched
//! - Thai digits replaced with ASCII digits
//! - codes made of ASCII letters followed by ASCII digits have the digits padded to at least
//!   [`BED_NUMBER_WIDTH`] characters
//!
//! Any other non-empty code (for example Thai room words such as `ชบ2`) is kept as is and only
//! validates if the layout lists it verbatim.

use crate::constants::BED_NUMBER_WIDTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalised bed identifier, directly comparable against the layout registry.
///
/// Values are only produced by [`normalize`] (or by layout validation, which checks that
/// configured ids are already canonical), so two `BedId`s are equal exactly when they name the
/// same physical slot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BedId(String);

impl BedId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shape of a cleaned bed code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BedCode<'a> {
    /// One or more ASCII letters immediately followed by one or more ASCII digits.
    Numbered { letters: &'a str, digits: &'a str },
    /// Anything else; compared against the layout verbatim.
    Verbatim(&'a str),
}

impl BedCode<'_> {
    /// Render the canonical text for this code.
    fn render(&self) -> String {
        match self {
            BedCode::Numbered { letters, digits } => {
                format!("{letters}{digits:0>width$}", width = BED_NUMBER_WIDTH)
            }
            BedCode::Verbatim(code) => (*code).to_string(),
        }
    }
}

/// Classify an already cleaned code (no whitespace, Thai digits translated).
pub fn parse_bed_code(code: &str) -> BedCode<'_> {
    let split = code
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(code.len());
    let (letters, digits) = code.split_at(split);

    if !letters.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        BedCode::Numbered { letters, digits }
    } else {
        BedCode::Verbatim(code)
    }
}

/// Normalise a raw bed code, or return `None` when nothing usable is left.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> Option<BedId> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| translate_thai_digit(c).to_ascii_uppercase())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Some(BedId(parse_bed_code(&cleaned).render()))
}

/// Map `๐`..`๙` to `0`..`9`; every other character is returned unchanged.
fn translate_thai_digit(c: char) -> char {
    match c {
        '\u{0E50}'..='\u{0E59}' => {
            let offset = c as u32 - 0x0E50;
            char::from_digit(offset, 10).unwrap_or(c)
        }
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> Option<String> {
        normalize(raw).map(BedId::into_string)
    }

    #[test]
    fn pads_single_digit_codes() {
        assert_eq!(norm("s1").as_deref(), Some("S01"));
        assert_eq!(norm("B12").as_deref(), Some("B12"));
        assert_eq!(norm("p005").as_deref(), Some("P005"));
        assert_eq!(norm("ab7").as_deref(), Some("AB07"));
    }

    #[test]
    fn strips_all_whitespace() {
        assert_eq!(norm("  s 1 ").as_deref(), Some("S01"));
        assert_eq!(norm("B\t0\n3").as_deref(), Some("B03"));
    }

    #[test]
    fn empty_and_blank_codes_are_absent() {
        assert_eq!(norm(""), None);
        assert_eq!(norm("   "), None);
        assert_eq!(norm("\u{3000}"), None);
    }

    #[test]
    fn translates_thai_digits_before_padding() {
        assert_eq!(norm("s๑").as_deref(), Some("S01"));
        assert_eq!(norm("B๑๒").as_deref(), Some("B12"));
    }

    #[test]
    fn thai_room_words_keep_their_letters() {
        assert_eq!(norm("ชบ๒").as_deref(), Some("ชบ2"));
        assert_eq!(norm(" ชบ 2").as_deref(), Some("ชบ2"));
    }

    #[test]
    fn codes_outside_the_numbered_shape_are_kept_verbatim() {
        assert_eq!(norm("a1b").as_deref(), Some("A1B"));
        assert_eq!(norm("12").as_deref(), Some("12"));
        assert_eq!(norm("icu").as_deref(), Some("ICU"));
        assert_eq!(norm("s-1").as_deref(), Some("S-1"));
    }

    #[test]
    fn parse_bed_code_tags_the_shape() {
        assert_eq!(
            parse_bed_code("S1"),
            BedCode::Numbered {
                letters: "S",
                digits: "1"
            }
        );
        assert_eq!(parse_bed_code("S"), BedCode::Verbatim("S"));
        assert_eq!(parse_bed_code("1"), BedCode::Verbatim("1"));
        assert_eq!(parse_bed_code("ชบ2"), BedCode::Verbatim("ชบ2"));
    }

    #[test]
    fn normalisation_is_idempotent() {
        let samples = [
            "s1", "S01", " b 12 ", "p005", "ชบ๒", "a1b", "icu", "Z๙๙", "x0", "ก๑", "12",
        ];
        for raw in samples {
            let once = normalize(raw).expect("sample normalises");
            let twice = normalize(once.as_str()).expect("canonical form normalises");
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }
}
