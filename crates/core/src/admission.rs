//! Admission rows as exported by the hospital information system.
//!
//! One [`AdmissionRecord`] describes one currently admitted patient. Every field is optional:
//! HIS exports routinely leave columns empty and the board treats an absent value as empty
//! rather than rejecting the row. Only the bed field drives reconciliation.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// One admitted patient, as delivered by an [`AdmissionSource`](crate::source::AdmissionSource).
///
/// Field names follow the HIS column names so exports can be read without a mapping layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub ward: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub spclty_ward_name: Option<String>,
    /// Raw bed code as typed on the ward.
    #[serde(deserialize_with = "lenient_text")]
    pub bedno: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub roomno: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub roomname: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub patient_name: Option<String>,
    /// Sex code: `1` male, `2` female.
    #[serde(deserialize_with = "lenient_text")]
    pub sex: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub hn: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub vn: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub an: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_y: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_m: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_d: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub pttype_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub admdoctor_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub incharge_doctor_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub regdate: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub regtime: Option<String>,
    /// Length of stay in days.
    #[serde(deserialize_with = "lenient_count")]
    pub admdate: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub ipt_admit_type_name: Option<String>,
    /// Body weight in kilograms.
    #[serde(deserialize_with = "lenient_measure")]
    pub bw: Option<f64>,
    #[serde(deserialize_with = "lenient_measure")]
    pub body_height: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub lab_status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub xray_status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub confirm_discharge: Option<String>,
}

impl AdmissionRecord {
    /// True when the discharge has been confirmed and the row should not be on the board.
    pub fn is_discharged(&self) -> bool {
        self.confirm_discharge
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("Y"))
    }
}

/// Any scalar a HIS export may put in a column. Values of any other shape are kept as
/// `Other` so one odd cell reads as empty instead of failing the whole export.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl Cell {
    fn into_text(self) -> Option<String> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Integer(n) => Some(n.to_string()),
            Cell::Float(n) => Some(n.to_string()),
            Cell::Other(_) => None,
        }
    }

    fn into_number(self) -> Option<f64> {
        let n = match self {
            Cell::Text(text) => text.trim().parse::<f64>().ok()?,
            Cell::Integer(n) => n as f64,
            Cell::Float(n) => n,
            Cell::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

/// Accept a string or a number for text columns; some exports emit `"7"`, others `7`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?.and_then(Cell::into_text))
}

/// Whole non-negative counts (ages, length of stay). Numeric strings such as `"40"` are
/// accepted; fractions, negatives and unparseable values read as `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .and_then(Cell::into_number)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Measurements. PostgreSQL `numeric` columns arrive as strings (`"61.5000"`).
fn lenient_measure<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?.and_then(Cell::into_number))
}
