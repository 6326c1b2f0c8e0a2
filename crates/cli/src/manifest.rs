use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::report::{Context, Error, Report};

#[derive(Deserialize)]
struct CargoManifest {
    name: String,
    version: String,
}

#[derive(Deserialize)]
struct Metadata {
    target_directory: PathBuf,
}

pub struct Manifest {
    pub crate_name: String,
    pub crate_version: String,
    pub target: PathBuf,
}

/// Describe the app crate in the current directory: its name, version, and
/// the cargo target directory its wasm artifacts land in.
pub fn manifest() -> Report<Manifest> {
    let out = Command::new("cargo")
        .arg("read-manifest")
        .output()
        .context("failed to run cargo")?;

    if !out.status.success() {
        let err = String::from_utf8_lossy(&out.stderr);
        return Err(Error::message(format!(
            "failed to read cargo manifest\n{err}",
        )));
    }

    let manifest: CargoManifest =
        parse_manifest(&out.stdout).context("failed to parse cargo manifest")?;

    let out = Command::new("cargo")
        .args([
            "metadata",
            "--format-version=1",
            "--filter-platform=wasm32-unknown-unknown",
            "--no-deps",
        ])
        .output()
        .context("failed to run cargo")?;

    if !out.status.success() {
        let err = String::from_utf8_lossy(&out.stderr);
        return Err(Error::message(format!(
            "failed to read cargo metadata\n{err}",
        )));
    }

    let metadata: Metadata =
        parse_metadata(&out.stdout).context("failed to parse cargo metadata")?;

    Ok(Manifest {
        crate_name: manifest.name,
        crate_version: manifest.version,
        target: metadata.target_directory,
    })
}

fn parse_manifest(bytes: &[u8]) -> serde_json::Result<CargoManifest> {
    serde_json::from_slice(bytes)
}

fn parse_metadata(bytes: &[u8]) -> serde_json::Result<Metadata> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_name_and_version() {
        let json = br#"{
            "name": "counter",
            "version": "0.1.0",
            "id": "path+file:///work/app#counter@0.1.0",
            "targets": [{ "kind": ["cdylib", "rlib"], "name": "counter" }],
            "features": {}
        }"#;

        let manifest = parse_manifest(json).unwrap();
        assert_eq!(manifest.name, "counter");
        assert_eq!(manifest.version, "0.1.0");
    }

    #[test]
    fn metadata_target_directory() {
        let json = br#"{
            "packages": [],
            "workspace_members": [],
            "target_directory": "/work/target",
            "version": 1
        }"#;

        let metadata = parse_metadata(json).unwrap();
        assert_eq!(metadata.target_directory, PathBuf::from("/work/target"));
    }
}
