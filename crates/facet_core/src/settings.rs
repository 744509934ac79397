//! Render mode flags, loadable from JSON.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading settings files.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which pipeline renders the frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    Wireframe,
    #[default]
    Rasterized,
    Raytraced,
    /// Ray traced with 5-sample quincunx anti-aliasing.
    RaytracedAa,
}

/// The per-frame configuration the renderer reads.
///
/// These are external configuration, owned by the caller and read-only
/// during a render pass. All toggles default to off; the defaults render a
/// plain rasterized frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub mode: RenderMode,
    pub backface_culling: bool,
    pub hard_shadows: bool,
    pub soft_shadows: bool,
    pub gouraud: bool,
    pub phong: bool,
    pub reflections: bool,
    pub refractions: bool,
    pub metallic: bool,
    pub wu_lines: bool,
}

impl RenderSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = RenderSettings::default();
        assert_eq!(s.mode, RenderMode::Rasterized);
        assert!(!s.hard_shadows);
        assert!(!s.reflections);
    }

    #[test]
    fn test_parse_partial_json() {
        let s: RenderSettings =
            serde_json::from_str(r#"{"mode": "raytraced", "soft_shadows": true}"#).unwrap();
        assert_eq!(s.mode, RenderMode::Raytraced);
        assert!(s.soft_shadows);
        assert!(!s.hard_shadows);
    }

    #[test]
    fn test_parse_aa_mode() {
        let s: RenderSettings = serde_json::from_str(r#"{"mode": "raytraced-aa"}"#).unwrap();
        assert_eq!(s.mode, RenderMode::RaytracedAa);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let r: Result<RenderSettings, _> = serde_json::from_str(r#"{"shadows": true}"#);
        assert!(r.is_err());
    }
}
