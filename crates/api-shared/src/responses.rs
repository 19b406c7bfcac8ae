//! Response envelopes returned by the board API.
//!
//! Every body carries an `ok` flag so the display can tell a failed refresh from an empty
//! ward without looking at the status code.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use ward_core::{Board, PatientView};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardRes {
    pub ok: bool,
    pub data: Board,
}

impl BoardRes {
    pub fn new(board: Board) -> Self {
        Self {
            ok: true,
            data: board,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BedsRes {
    pub ok: bool,
    pub beds: Vec<String>,
}

impl BedsRes {
    pub fn new<I, S>(beds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ok: true,
            beds: beds.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BedDetailRes {
    pub ok: bool,
    pub data: PatientView,
}

impl BedDetailRes {
    pub fn new(patient: PatientView) -> Self {
        Self {
            ok: true,
            data: patient,
        }
    }
}

/// Body returned with every non-2xx status.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub ok: bool,
    pub message: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}
