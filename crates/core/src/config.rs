//! Board runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the service. Request
//! handling never reads environment variables, so every cycle in a process sees the same layout
//! and the same source settings. Changing the layout means restarting the process.

use crate::constants::{DEFAULT_LAYOUT_YAML, LAYOUT_FILE};
use crate::layout::Layout;
use crate::source::FileAdmissionSource;
use crate::validation::validate_ward_code;
use crate::{WardError, WardResult};
use std::path::{Path, PathBuf};

/// Where the layout came from, for startup logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutOrigin {
    File(PathBuf),
    Embedded,
}

/// Board configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    admissions_file: PathBuf,
    ward_code: Option<String>,
    layout_file: Option<PathBuf>,
}

impl BoardConfig {
    /// Create a new `BoardConfig`.
    ///
    /// Blank ward codes are treated as "no filter".
    ///
    /// # Errors
    ///
    /// Returns `WardError::InvalidInput` if the ward code is malformed.
    pub fn new(
        admissions_file: PathBuf,
        ward_code: Option<String>,
        layout_file: Option<PathBuf>,
    ) -> WardResult<Self> {
        let ward_code = ward_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(code) = &ward_code {
            validate_ward_code(code)?;
        }

        Ok(Self {
            admissions_file,
            ward_code,
            layout_file,
        })
    }

    pub fn admissions_file(&self) -> &Path {
        &self.admissions_file
    }

    pub fn ward_code(&self) -> Option<&str> {
        self.ward_code.as_deref()
    }

    pub fn layout_file(&self) -> Option<&Path> {
        self.layout_file.as_deref()
    }

    /// Resolve and parse the layout for this configuration.
    pub fn load_layout(&self) -> WardResult<(Layout, LayoutOrigin)> {
        match resolve_layout_file(self.layout_file.clone())? {
            Some(path) => {
                let layout = Layout::load(&path)?;
                Ok((layout, LayoutOrigin::File(path)))
            }
            None => Ok((Layout::parse(DEFAULT_LAYOUT_YAML)?, LayoutOrigin::Embedded)),
        }
    }

    /// Build the file-backed admission source for this configuration.
    pub fn admission_source(&self) -> WardResult<FileAdmissionSource> {
        FileAdmissionSource::new(self.admissions_file.clone(), self.ward_code.clone())
    }
}

/// Resolve the layout file without reading environment variables.
///
/// If `override_file` is provided it must be an existing file. Otherwise this looks for
/// `config/layout.yaml` relative to the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`. `Ok(None)` means the embedded default should be used.
pub fn resolve_layout_file(override_file: Option<PathBuf>) -> WardResult<Option<PathBuf>> {
    if let Some(file) = override_file {
        if file.is_file() {
            return Ok(Some(file));
        }
        return Err(WardError::InvalidInput(format!(
            "WARD_LAYOUT_FILE override is not a file: {}",
            file.display()
        )));
    }

    let cwd_relative = PathBuf::from(LAYOUT_FILE);
    if cwd_relative.is_file() {
        return Ok(Some(cwd_relative));
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(LAYOUT_FILE);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
