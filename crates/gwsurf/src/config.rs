//! Layered surface configuration: defaults, then a JSON file, then flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gordon_wixom::SurfaceCfg;
use serde::{Deserialize, Serialize};

/// Optional overrides read from `--config <file.json>`. Missing keys keep
/// the library defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CfgFile {
    pub curve_samples: Option<usize>,
    pub directions: Option<usize>,
    pub phase: Option<f64>,
    pub eps_parallel: Option<f64>,
    pub eps_vertex: Option<f64>,
    pub eps_concave: Option<f64>,
    pub eps_boundary: Option<f64>,
    pub exclude_concave_hits: Option<bool>,
    /// Interior grid spacing used by `mesh`.
    pub spacing: Option<f64>,
}

impl CfgFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn apply(&self, base: SurfaceCfg) -> SurfaceCfg {
        SurfaceCfg {
            curve_samples: self.curve_samples.unwrap_or(base.curve_samples),
            directions: self.directions.unwrap_or(base.directions),
            phase: self.phase.unwrap_or(base.phase),
            eps_parallel: self.eps_parallel.unwrap_or(base.eps_parallel),
            eps_vertex: self.eps_vertex.unwrap_or(base.eps_vertex),
            eps_concave: self.eps_concave.unwrap_or(base.eps_concave),
            eps_boundary: self.eps_boundary.unwrap_or(base.eps_boundary),
            exclude_concave_hits: self.exclude_concave_hits.unwrap_or(base.exclude_concave_hits),
        }
    }
}

/// Resolve the final configuration: defaults < file < flags.
pub fn resolve(
    file: Option<&Path>,
    samples: Option<usize>,
    directions: Option<usize>,
) -> Result<(SurfaceCfg, CfgFile)> {
    let overlay = match file {
        Some(path) => CfgFile::load(path)?,
        None => CfgFile::default(),
    };
    let mut cfg = overlay.apply(SurfaceCfg::default());
    if let Some(n) = samples {
        cfg.curve_samples = n;
    }
    if let Some(m) = directions {
        cfg.directions = m;
    }
    cfg.validate()?;
    Ok((cfg, overlay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flags_override_file_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"curve_samples": 128, "directions": 50, "spacing": 0.2}"#).unwrap();
        let (cfg, file) = resolve(Some(&path), None, Some(64)).unwrap();
        assert_eq!(cfg.curve_samples, 128);
        assert_eq!(cfg.directions, 64);
        assert_eq!(cfg.phase, SurfaceCfg::default().phase);
        assert_eq!(file.spacing, Some(0.2));
    }

    #[test]
    fn unknown_keys_and_invalid_values_are_rejected() {
        let dir = tempdir().unwrap();
        let typo = dir.path().join("typo.json");
        fs::write(&typo, r#"{"curve_sample": 128}"#).unwrap();
        assert!(resolve(Some(&typo), None, None).is_err());
        assert!(resolve(None, Some(2), None).is_err());
        assert!(resolve(None, None, None).is_ok());
    }
}
