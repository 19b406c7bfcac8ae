//! Physical layout registry.
//!
//! The layout is the single source of truth for which bed ids exist on the ward and how they
//! group into zones and rooms. It is parsed once at startup from a versioned YAML document and
//! is immutable afterwards; callers share it behind an `Arc`.
//!
//! Layout documents look like:
//!
//! ```yaml
//! version: 1
//! station:
//!   title: NURSE STATION
//!   subtitle: รอรับ
//! zones:
//!   - id: A
//!     title: Private rooms
//!     color: pink
//!     rooms: [S01, S02]
//! ```
//!
//! Each room holds exactly one bed, so a room id is also its bed id.

use crate::bed_id::BedId;
use crate::constants::{DEFAULT_STATION_SUBTITLE, DEFAULT_STATION_TITLE, LAYOUT_VERSION};
use crate::validation::validate_layout_bed_id;
use crate::{WardError, WardResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Display colour hint for a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoneColor {
    Pink,
    Blue,
    Green,
    Orange,
    Purple,
}

/// Header shown above the waiting list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Station {
    pub title: String,
    pub subtitle: String,
}

impl Default for Station {
    fn default() -> Self {
        Self {
            title: DEFAULT_STATION_TITLE.into(),
            subtitle: DEFAULT_STATION_SUBTITLE.into(),
        }
    }
}

/// A group of rooms drawn together on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub title: String,
    pub color: Option<ZoneColor>,
    /// Room ids in display order; one bed per room.
    pub rooms: Vec<BedId>,
}

/// The validated, immutable ward layout.
#[derive(Clone, Debug)]
pub struct Layout {
    station: Station,
    zones: Vec<Zone>,
    beds: Vec<BedId>,
    index: HashSet<BedId>,
}

impl Layout {
    /// Parse and validate a layout document.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::LayoutParse`] when the YAML does not match the schema (the failing
    /// path is included), [`WardError::UnsupportedLayoutVersion`] for other versions, and
    /// [`WardError::InvalidLayout`] when the structure breaks a registry invariant.
    pub fn parse(yaml_text: &str) -> WardResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, LayoutWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(WardError::LayoutParse {
                    path,
                    message: source.to_string(),
                });
            }
        };

        Self::from_wire(wire)
    }

    /// Read and parse a layout file.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::LayoutRead`] if the file cannot be read, and any error
    /// [`Layout::parse`] returns for its contents.
    pub fn load(path: &Path) -> WardResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WardError::LayoutRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Build a layout from already constructed zones, using the default station header.
    ///
    /// Applies the same validation as [`Layout::parse`].
    pub fn from_zones(zones: Vec<(String, Vec<String>)>) -> WardResult<Self> {
        Self::from_wire(LayoutWire {
            version: LAYOUT_VERSION,
            station: None,
            zones: zones
                .into_iter()
                .map(|(id, rooms)| ZoneWire {
                    title: id.clone(),
                    id,
                    color: None,
                    rooms,
                })
                .collect(),
        })
    }

    /// Every valid bed id, in layout order.
    pub fn all_beds(&self) -> &[BedId] {
        &self.beds
    }

    /// Membership test against the registry.
    pub fn is_valid(&self, id: &BedId) -> bool {
        self.index.contains(id)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    fn from_wire(wire: LayoutWire) -> WardResult<Self> {
        if wire.version != LAYOUT_VERSION {
            return Err(WardError::UnsupportedLayoutVersion {
                found: wire.version,
                expected: LAYOUT_VERSION,
            });
        }

        if wire.zones.is_empty() {
            return Err(WardError::InvalidLayout("layout has no zones".into()));
        }

        let mut zone_ids = HashSet::new();
        let mut beds = Vec::new();
        let mut index = HashSet::new();
        let mut zones = Vec::with_capacity(wire.zones.len());

        for zone in wire.zones {
            let id = zone.id.trim().to_string();
            if id.is_empty() {
                return Err(WardError::InvalidLayout("zone id cannot be empty".into()));
            }
            if !zone_ids.insert(id.clone()) {
                return Err(WardError::InvalidLayout(format!("duplicate zone id {id}")));
            }

            let title = zone.title.trim().to_string();
            if title.is_empty() {
                return Err(WardError::InvalidLayout(format!(
                    "zone {id} has an empty title"
                )));
            }
            if zone.rooms.is_empty() {
                return Err(WardError::InvalidLayout(format!("zone {id} has no rooms")));
            }

            let mut rooms = Vec::with_capacity(zone.rooms.len());
            for raw in &zone.rooms {
                let bed = validate_layout_bed_id(&id, raw)?;
                if !index.insert(bed.clone()) {
                    return Err(WardError::InvalidLayout(format!(
                        "bed {bed} appears more than once in the layout"
                    )));
                }
                beds.push(bed.clone());
                rooms.push(bed);
            }

            zones.push(Zone {
                id,
                title,
                color: zone.color,
                rooms,
            });
        }

        let station = wire
            .station
            .map(|s| Station {
                title: s.title,
                subtitle: s.subtitle,
            })
            .unwrap_or_default();

        tracing::debug!(zones = zones.len(), beds = beds.len(), "layout loaded");

        Ok(Self {
            station,
            zones,
            beds,
            index,
        })
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutWire {
    version: u32,
    #[serde(default)]
    station: Option<StationWire>,
    zones: Vec<ZoneWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StationWire {
    title: String,
    #[serde(default)]
    subtitle: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ZoneWire {
    id: String,
    title: String,
    #[serde(default)]
    color: Option<ZoneColor>,
    rooms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed_id::normalize;
    use crate::constants::DEFAULT_LAYOUT_YAML;

    fn bed(raw: &str) -> BedId {
        normalize(raw).expect("valid bed code")
    }

    #[test]
    fn default_layout_is_valid() {
        let layout = Layout::parse(DEFAULT_LAYOUT_YAML).expect("default layout parses");
        assert!(!layout.zones().is_empty());
        assert!(layout.is_valid(&bed("S01")));
        assert!(layout.is_valid(&bed("ชบ๑")));
        assert_eq!(layout.station().title, DEFAULT_STATION_TITLE);

        let total: usize = layout.zones().iter().map(|z| z.rooms.len()).sum();
        assert_eq!(layout.all_beds().len(), total);
    }

    #[test]
    fn beds_are_listed_in_layout_order() {
        let layout = Layout::parse(
            r#"version: 1
zones:
  - id: A
    title: Zone A
    color: blue
    rooms: [A02, A01]
  - id: B
    title: Zone B
    rooms: [B01]
"#,
        )
        .expect("parse layout");

        let beds: Vec<&str> = layout.all_beds().iter().map(BedId::as_str).collect();
        assert_eq!(beds, vec!["A02", "A01", "B01"]);
        assert_eq!(layout.zones()[0].color, Some(ZoneColor::Blue));
        assert_eq!(layout.zones()[1].color, None);
        assert!(!layout.is_valid(&bed("Z99")));
    }

    #[test]
    fn custom_station_header_is_kept() {
        let layout = Layout::parse(
            r#"version: 1
station:
  title: Ward 7
  subtitle: Waiting
zones:
  - id: A
    title: Zone A
    rooms: [A01]
"#,
        )
        .expect("parse layout");
        assert_eq!(layout.station().title, "Ward 7");
        assert_eq!(layout.station().subtitle, "Waiting");
    }

    #[test]
    fn rejects_bed_listed_twice() {
        let err = Layout::from_zones(vec![
            ("A".into(), vec!["A01".into()]),
            ("B".into(), vec!["B01".into(), "A01".into()]),
        ])
        .expect_err("duplicate bed");
        match err {
            WardError::InvalidLayout(msg) => assert!(msg.contains("A01")),
            other => panic!("expected InvalidLayout, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_canonical_room() {
        let err = Layout::from_zones(vec![("A".into(), vec!["a1".into()])])
            .expect_err("non canonical room");
        assert!(matches!(err, WardError::InvalidLayout(_)));
    }

    #[test]
    fn rejects_duplicate_and_empty_zones() {
        assert!(Layout::from_zones(vec![
            ("A".into(), vec!["A01".into()]),
            ("A".into(), vec!["A02".into()]),
        ])
        .is_err());
        assert!(Layout::from_zones(vec![("A".into(), vec![])]).is_err());
        assert!(Layout::from_zones(vec![]).is_err());
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = Layout::parse("version: 2\nzones: []\n").expect_err("version 2");
        assert!(matches!(
            err,
            WardError::UnsupportedLayoutVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn schema_errors_report_the_failing_path() {
        let err = Layout::parse(
            r#"version: 1
zones:
  - id: A
    title: Zone A
    rooms: [A01]
    beds: 4
"#,
        )
        .expect_err("unknown key");
        match err {
            WardError::LayoutParse { path, message } => {
                assert!(path.starts_with("zones"), "path was {path}");
                assert!(message.contains("beds"));
            }
            other => panic!("expected LayoutParse, got {other:?}"),
        }
    }

    #[test]
    fn loads_layout_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("layout.yaml");
        std::fs::write(
            &path,
            "version: 1\nzones:\n  - id: A\n    title: A\n    rooms: [A01]\n",
        )
        .expect("write layout");

        let layout = Layout::load(&path).expect("load layout");
        assert_eq!(layout.all_beds().len(), 1);

        let missing = Layout::load(&dir.path().join("missing.yaml")).expect_err("missing file");
        assert!(matches!(missing, WardError::LayoutRead { .. }));
    }
}
