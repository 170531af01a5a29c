use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use super::sql::SqlSchema;
use crate::data::datasets::RunManifest;
use crate::error::SeedResult;

pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

pub fn manifest_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".manifest.json");
    artifact.with_file_name(name)
}

pub fn sha256_file(path: &Path) -> SeedResult<String> {
    let digest = Sha256::digest(fs::read(path)?);
    Ok(format!("{digest:x}"))
}

pub fn write_run_manifest(
    artifact: &Path,
    seed: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    entries: usize,
    schema: SqlSchema,
) -> SeedResult<PathBuf> {
    let manifest = RunManifest {
        schema_version: MANIFEST_SCHEMA_VERSION,
        seed,
        start_date,
        end_date,
        entries,
        schema: schema.as_str().to_string(),
        sha256: sha256_file(artifact)?,
    };
    let path = manifest_path(artifact);
    fs::write(&path, serde_json::to_vec_pretty(&manifest)?)?;
    Ok(path)
}

pub fn load_run_manifest(path: &Path) -> SeedResult<RunManifest> {
    let manifest: RunManifest = serde_json::from_slice(&fs::read(path)?)?;
    Ok(manifest)
}
