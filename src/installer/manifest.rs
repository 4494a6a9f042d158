//! Package manifest (`system.json` / `module.json`)

use std::fs;
use std::io;
use std::path::{Component, Path};

use serde::Deserialize;

use crate::domain::PackageKind;
use crate::error::Result;
use crate::error::fs::failure;
use crate::error::package::{manifest_not_found, manifest_unreadable};

/// The only manifest field fvm reads; everything else is ignored.
#[derive(Debug, Deserialize)]
struct Manifest {
    id: String,
}

/// Read the declared `id` from `<payload_dir>/<kind>.json`.
///
/// The id names the install folder, so it must be a single plain path
/// component.
pub fn read_manifest_id(payload_dir: &Path, kind: PackageKind) -> Result<String> {
    let manifest_file = kind.manifest_file();
    let path = payload_dir.join(&manifest_file);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(manifest_not_found(&manifest_file, payload_dir));
        }
        Err(e) => return Err(failure("Failed to read", &path, &e)),
    };

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| manifest_unreadable(&path, e.to_string()))?;

    if !is_plain_component(&manifest.id) {
        return Err(manifest_unreadable(
            &path,
            format!("id '{}' is not a valid folder name", manifest.id),
        ));
    }

    Ok(manifest.id)
}

fn is_plain_component(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.contains(['/', '\\'])
}
