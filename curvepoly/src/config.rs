use crate::error::{EditError, EditResult};
use serde::{Deserialize, Serialize};

/// Runtime knobs of the editor. Tolerances live in `geometry::tolerance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Fraction of the chord used to seed each handle when an edge becomes a Bezier.
    pub handle_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig { handle_ratio: 0.3 }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> EditResult<()> {
        if !self.handle_ratio.is_finite() || self.handle_ratio <= 0.0 || self.handle_ratio > 0.5 {
            return Err(EditError::InvalidConfig(format!(
                "handle_ratio must lie in (0, 0.5], got {}",
                self.handle_ratio
            )));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> EditResult<Self> {
        let cfg: EditorConfig =
            serde_json::from_str(s).map_err(|e| EditError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> EditResult<Self> {
        let cfg: EditorConfig =
            serde_json::from_value(v).map_err(|e| EditError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
