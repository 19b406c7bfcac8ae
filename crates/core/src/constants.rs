//! Constants used throughout the ward core crate.
//!
//! Defaults for configuration and the fixed values of the board format live here so the
//! binaries and the core agree on them.

/// Default address for the REST server when `WARD_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Default admissions export read by the file-backed source.
pub const DEFAULT_ADMISSIONS_FILE: &str = "data/admissions.json";

/// Layout file looked up relative to the working directory and the manifest ancestors.
pub const LAYOUT_FILE: &str = "config/layout.yaml";

/// Layout description compiled into the crate, used when no layout file is found.
pub const DEFAULT_LAYOUT_YAML: &str = include_str!("../layout/default.yaml");

/// Layout document version understood by this build.
pub const LAYOUT_VERSION: u32 = 1;

/// Minimum width of the numeric part of a letter+digit bed code.
pub const BED_NUMBER_WIDTH: usize = 2;

/// Default nurse-station header shown above the waiting list.
pub const DEFAULT_STATION_TITLE: &str = "NURSE STATION";
pub const DEFAULT_STATION_SUBTITLE: &str = "รอรับ";

/// Maximum length accepted for a `WARD_CODE` filter.
pub const MAX_WARD_CODE_LEN: usize = 16;
