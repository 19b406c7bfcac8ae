//! Occupancy reconciliation.
//!
//! Splits one batch of admissions into patients placed on a unique, valid bed and patients
//! left on the waiting list. Records are visited in the order the source returned them and the
//! first record to claim a bed keeps it. The source contract orders records by registration
//! time, so in practice the earliest registered patient wins a contested bed.

use crate::admission::AdmissionRecord;
use crate::bed_id::{normalize, BedId};
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why an admitted patient could not be placed on a bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitingReason {
    /// The bed field was absent or blank.
    NoBed,
    /// The bed code normalised to an id the layout does not know.
    InvalidBedCode,
    /// An earlier record in the same batch already holds this bed.
    DuplicateBed,
}

/// An admission that stays on the waiting list for this cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct WaitingAdmission {
    pub record: AdmissionRecord,
    pub reason: WaitingReason,
    /// The normalised code that was rejected, when there was one.
    pub bed_code: Option<BedId>,
}

/// Outcome of one reconciliation cycle.
///
/// Every input record ends up in exactly one of `occupied` or `waiting`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub occupied: BTreeMap<BedId, AdmissionRecord>,
    pub waiting: Vec<WaitingAdmission>,
}

impl Reconciliation {
    /// Number of records this result was built from.
    pub fn len(&self) -> usize {
        self.occupied.len() + self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty() && self.waiting.is_empty()
    }
}

/// Match a batch of admissions against the layout.
///
/// Total over any input, including an empty batch. Occupied records have `bedno` rewritten to
/// the canonical id; waiting records are kept as received.
pub fn reconcile(layout: &Layout, records: Vec<AdmissionRecord>) -> Reconciliation {
    let mut result = Reconciliation::default();

    for mut record in records {
        let Some(bed) = record.bedno.as_deref().and_then(normalize) else {
            result.waiting.push(WaitingAdmission {
                record,
                reason: WaitingReason::NoBed,
                bed_code: None,
            });
            continue;
        };

        if !layout.is_valid(&bed) {
            tracing::debug!(an = ?record.an, bed = %bed, "bed code not in layout");
            result.waiting.push(WaitingAdmission {
                record,
                reason: WaitingReason::InvalidBedCode,
                bed_code: Some(bed),
            });
            continue;
        }

        if result.occupied.contains_key(&bed) {
            tracing::debug!(an = ?record.an, bed = %bed, "bed already claimed in this batch");
            result.waiting.push(WaitingAdmission {
                record,
                reason: WaitingReason::DuplicateBed,
                bed_code: Some(bed),
            });
            continue;
        }

        record.bedno = Some(bed.as_str().to_string());
        result.occupied.insert(bed, record);
    }

    tracing::debug!(
        occupied = result.occupied.len(),
        waiting = result.waiting.len(),
        "reconciled admissions"
    );

    result
}
