//! Enumeration of the YAML documents available to the viewer.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gateway::resolver::has_yaml_extension;

/// Names of the YAML files directly inside the YAML directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    pub files: Vec<String>,
}

/// List `.yaml`/`.yml` regular files directly under `dir`, sorted
/// case-insensitively.
///
/// A missing directory is an empty project, not an error. Other I/O
/// failures are logged and whatever was read so far is returned.
pub async fn list_yaml_files(dir: &Path) -> FileListing {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(dir = %dir.display(), error = %e, "Cannot read YAML directory");
            }
            return FileListing::default();
        }
    };

    let mut files = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "YAML directory listing interrupted");
                break;
            }
        };

        let path = entry.path();
        if !has_yaml_extension(&path) {
            continue;
        }
        // follows symlinks, like the save path does
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => continue,
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(raw) => tracing::warn!(name = ?raw, "Skipping non UTF-8 file name"),
        }
    }

    sort_case_insensitive(&mut files);
    FileListing { files }
}

fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}
