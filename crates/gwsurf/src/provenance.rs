//! `<mesh>.provenance.json` sidecars: which code, preset, and parameters
//! produced an output file.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a generated mesh.
pub struct Payload {
    pub preset: String,
    pub params: Value,
}

impl Payload {
    pub fn new(preset: impl Into<String>, params: Value) -> Self {
        Self {
            preset: preset.into(),
            params,
        }
    }
}

/// Write the sidecar for `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, payload: Payload) -> Result<PathBuf> {
    let path = provenance_path(artifact);
    let doc = json!({
        "code_rev": current_git_rev(),
        "lib_version": gordon_wixom::VERSION,
        "preset": payload.preset,
        "params": payload.params,
        "output": artifact.to_string_lossy(),
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/surface3.obj` → `dir/surface3.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "mesh".into(), |s| s.to_string_lossy());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `$GIT_COMMIT` if set, else `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
