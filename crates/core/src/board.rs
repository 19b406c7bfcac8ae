//! Board assembly.
//!
//! Projects the layout and one [`Reconciliation`] into the serialisable [`Board`] the display
//! renders: zones, rooms and bed slots in layout order, the nurse-station waiting list in
//! reconciler order, and a snapshot timestamp. A board is built fresh each cycle and never
//! patched in place.

use crate::admission::AdmissionRecord;
use crate::layout::{Layout, ZoneColor};
use crate::reconcile::{Reconciliation, WaitingAdmission, WaitingReason};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Board types
// ============================================================================

/// Occupancy state of one bed slot.
///
/// Only `Occupied` and `Empty` are produced here; `Cleaning` and `Reserved` are kept for
/// workflow signals that come from outside the reconciliation core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Occupied,
    Empty,
    Cleaning,
    Reserved,
}

/// Patient sex derived from the HIS sex code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("1") => Sex::Male,
            Some("2") => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    /// Label shown on the board.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "ชาย",
            Sex::Female => "หญิง",
            Sex::Unknown => "ไม่ระบุ",
        }
    }
}

/// Coarse age band used for the bed icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Adult,
    Elder,
}

impl AgeGroup {
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=11 => AgeGroup::Child,
            12..=59 => AgeGroup::Adult,
            _ => AgeGroup::Elder,
        }
    }
}

/// Patient fields needed by the display.
///
/// `lab_status` and `xray_status` are the raw HIS codes; turning them into text is left to the
/// display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PatientView {
    pub an: Option<String>,
    pub hn: Option<String>,
    pub vn: Option<String>,
    pub bedno: Option<String>,
    pub roomname: Option<String>,
    pub spclty_ward_name: Option<String>,
    pub patient_name: Option<String>,
    pub sex: Option<String>,
    pub sex_name: String,
    pub age_y: Option<u32>,
    pub age_m: Option<u32>,
    pub age_d: Option<u32>,
    pub age_group: Option<AgeGroup>,
    pub pttype_name: Option<String>,
    pub admdoctor_name: Option<String>,
    pub incharge_doctor_name: Option<String>,
    pub regdate: Option<String>,
    pub regtime: Option<String>,
    pub admdate: Option<u32>,
    pub ipt_admit_type_name: Option<String>,
    pub bw: Option<f64>,
    pub body_height: Option<f64>,
    pub lab_status: Option<String>,
    pub xray_status: Option<String>,
}

impl From<&AdmissionRecord> for PatientView {
    fn from(record: &AdmissionRecord) -> Self {
        Self {
            an: record.an.clone(),
            hn: record.hn.clone(),
            vn: record.vn.clone(),
            bedno: record.bedno.clone(),
            roomname: record.roomname.clone(),
            spclty_ward_name: record.spclty_ward_name.clone(),
            patient_name: record.patient_name.clone(),
            sex: record.sex.clone(),
            sex_name: Sex::from_code(record.sex.as_deref()).label().to_string(),
            age_y: record.age_y,
            age_m: record.age_m,
            age_d: record.age_d,
            age_group: record.age_y.map(AgeGroup::from_years),
            pttype_name: record.pttype_name.clone(),
            admdoctor_name: record.admdoctor_name.clone(),
            incharge_doctor_name: record.incharge_doctor_name.clone(),
            regdate: record.regdate.clone(),
            regtime: record.regtime.clone(),
            admdate: record.admdate,
            ipt_admit_type_name: record.ipt_admit_type_name.clone(),
            bw: record.bw,
            body_height: record.body_height,
            lab_status: record.lab_status.clone(),
            xray_status: record.xray_status.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BedSlot {
    pub bed: String,
    pub status: BedStatus,
    pub patient: Option<PatientView>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoomView {
    pub room: String,
    pub beds: Vec<BedSlot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ZoneView {
    pub id: String,
    pub title: String,
    pub color: Option<ZoneColor>,
    pub rooms: Vec<RoomView>,
}

/// A waiting-list entry: the patient fields plus why no bed was assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WaitingEntry {
    #[serde(flatten)]
    pub patient: PatientView,
    pub reason: WaitingReason,
    pub bed_code: Option<String>,
}

impl From<&WaitingAdmission> for WaitingEntry {
    fn from(waiting: &WaitingAdmission) -> Self {
        Self {
            patient: PatientView::from(&waiting.record),
            reason: waiting.reason,
            bed_code: waiting.bed_code.as_ref().map(|b| b.as_str().to_string()),
        }
    }
}

/// Nurse-station panel holding the waiting list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StationView {
    pub title: String,
    pub subtitle: String,
    pub waiting: Vec<WaitingEntry>,
}

/// Patient counts across beds and the waiting list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BoardSummary {
    pub total: usize,
    pub male: usize,
    pub female: usize,
}

impl BoardSummary {
    fn count(&mut self, sex: Option<&str>) {
        self.total += 1;
        match Sex::from_code(sex) {
            Sex::Male => self.male += 1,
            Sex::Female => self.female += 1,
            Sex::Unknown => {}
        }
    }
}

/// One snapshot of the ward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Board {
    /// Assembly time, RFC 3339 UTC with milliseconds.
    pub updated_at: String,
    pub zones: Vec<ZoneView>,
    pub center: StationView,
    pub summary: BoardSummary,
}

// ============================================================================
// Assembly
// ============================================================================

/// Assemble a board stamped with the current time.
pub fn assemble(layout: &Layout, reconciliation: &Reconciliation) -> Board {
    assemble_at(layout, reconciliation, Utc::now())
}

/// Assemble a board stamped with `updated_at`.
///
/// Identical inputs give identical boards.
pub fn assemble_at(
    layout: &Layout,
    reconciliation: &Reconciliation,
    updated_at: DateTime<Utc>,
) -> Board {
    let mut summary = BoardSummary::default();

    let zones = layout
        .zones()
        .iter()
        .map(|zone| ZoneView {
            id: zone.id.clone(),
            title: zone.title.clone(),
            color: zone.color,
            rooms: zone
                .rooms
                .iter()
                .map(|bed| {
                    let record = reconciliation.occupied.get(bed);
                    if let Some(record) = record {
                        summary.count(record.sex.as_deref());
                    }
                    RoomView {
                        room: bed.as_str().to_string(),
                        beds: vec![BedSlot {
                            bed: bed.as_str().to_string(),
                            status: if record.is_some() {
                                BedStatus::Occupied
                            } else {
                                BedStatus::Empty
                            },
                            patient: record.map(PatientView::from),
                        }],
                    }
                })
                .collect(),
        })
        .collect();

    let waiting: Vec<WaitingEntry> = reconciliation
        .waiting
        .iter()
        .inspect(|w| summary.count(w.record.sex.as_deref()))
        .map(WaitingEntry::from)
        .collect();

    let station = layout.station();

    Board {
        updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        zones,
        center: StationView {
            title: station.title.clone(),
            subtitle: station.subtitle.clone(),
            waiting,
        },
        summary,
    }
}
