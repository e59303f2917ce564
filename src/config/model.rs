use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    beam::profile::BeamShapeParams,
    color::gamma::GammaParams,
    crop::content::ContentBox,
    foundation::error::{ScanbeamError, ScanbeamResult},
    interlace::field::InterlaceParams,
    resample::convergence::MisconvergenceParams,
    resample::horizontal::HorizontalFilterParams,
};

/// Complete effect configuration.
///
/// Built once (usually from JSON), validated, then borrowed immutably by every pass of every
/// frame. Missing sections and fields take their defaults; unknown fields are rejected.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrtConfig {
    pub beam: BeamShapeParams,
    pub horizontal: HorizontalFilterParams,
    pub misconvergence: MisconvergenceParams,
    pub interlace: InterlaceParams,
    pub gamma: GammaParams,
    /// Region of the input holding the emulated screen. `None` uses the whole input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentBox>,
}

impl CrtConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScanbeamResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScanbeamError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScanbeamResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScanbeamError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_json_str(s: &str) -> ScanbeamResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn to_json_pretty(&self) -> ScanbeamResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanbeamError::serde(format!("serialize config JSON: {e}")))
    }

    /// Check every parameter domain the numeric core relies on.
    ///
    /// The content box is checked against the input size at render time.
    pub fn validate(&self) -> ScanbeamResult<()> {
        self.beam.validate()?;
        self.horizontal.validate()?;
        self.misconvergence.validate()?;
        self.interlace.validate()?;
        self.gamma.validate()?;
        if let Some(content) = self.content
            && (content.width == 0 || content.height == 0)
        {
            return Err(ScanbeamError::validation("content box must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
