//! # Ward Core
//!
//! Core logic for the ward bed board.
//!
//! This crate turns one batch of admission rows into a board snapshot:
//! - Bed code normalisation ([`bed_id`])
//! - The fixed physical layout registry ([`layout`])
//! - Occupancy reconciliation into occupied beds and a waiting list ([`reconcile`])
//! - Board assembly for the display ([`board`])
//! - Admission sources and the pipeline service ([`source`], [`service`])
//!
//! **No API concerns**: HTTP serving and response envelopes belong in `api-rest` and
//! `api-shared`.

pub mod admission;
pub mod bed_id;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod reconcile;
pub mod service;
pub mod source;
pub mod validation;

pub use admission::AdmissionRecord;
pub use bed_id::{normalize, BedId};
pub use board::{assemble, assemble_at, Board, PatientView};
pub use config::{BoardConfig, LayoutOrigin};
pub use error::{WardError, WardResult};
pub use layout::Layout;
pub use reconcile::{reconcile, Reconciliation, WaitingReason};
pub use service::WardBoardService;
pub use source::{AdmissionSource, FileAdmissionSource, InMemorySource};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BedStatus;
    use std::path::Path;

    #[test]
    fn sample_export_fills_the_default_layout() {
        let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/admissions.sample.json");
        let source = FileAdmissionSource::new(sample, Some("07".into())).expect("source");
        let layout = Layout::parse(constants::DEFAULT_LAYOUT_YAML).expect("default layout");

        let records = source.fetch().expect("read sample export");
        let total = records.len();
        let result = reconcile(&layout, records);
        assert_eq!(result.len(), total);

        let board = assemble(&layout, &result);
        let occupied = board
            .zones
            .iter()
            .flat_map(|z| &z.rooms)
            .filter(|r| r.beds[0].status == BedStatus::Occupied)
            .count();
        assert_eq!(occupied, result.occupied.len());
        assert_eq!(board.center.waiting.len(), result.waiting.len());
        assert_eq!(board.summary.total, total);

        let reasons: Vec<WaitingReason> = board.center.waiting.iter().map(|w| w.reason).collect();
        assert!(reasons.contains(&WaitingReason::NoBed));
        assert!(reasons.contains(&WaitingReason::InvalidBedCode));
        assert!(reasons.contains(&WaitingReason::DuplicateBed));
    }
}
