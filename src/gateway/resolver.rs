//! Resolution of client-supplied paths into YAML file references.
//!
//! # Responsibilities
//! - Normalize separators and leading `./` / `../` markers
//! - Resolve against the project root the way the filesystem would
//! - Enforce the `.yaml` / `.yml` extension
//! - Prove the resolved path lies inside the YAML directory
//!
//! # Design Decisions
//! - Containment is checked on resolved absolute paths, never on the raw string
//! - Every symlink on the path is followed, dangling ones included, so a
//!   link inside the YAML directory cannot point writes elsewhere
//! - `..` is applied after the links before it are followed, as the
//!   filesystem does
//! - Path comparison is per component (`YAML2/` is not inside `YAML/`)

use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Why a requested path was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathRejection {
    #[error("path is empty")]
    Empty,

    #[error("path must not contain '..' segments")]
    Traversal,

    #[error("only .yaml and .yml files are allowed")]
    Extension,

    #[error("path is outside the YAML directory")]
    OutsideYamlDirectory,

    #[error("path cannot be resolved: {0}")]
    Unresolvable(io::ErrorKind),
}

/// A resolved path that passed the extension and containment checks.
///
/// Only [`PathResolver::resolve`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlFileRef {
    path: PathBuf,
}

impl YamlFileRef {
    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for YamlFileRef {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Turns untrusted path strings into [`YamlFileRef`]s.
#[derive(Debug, Clone)]
pub struct PathResolver {
    project_root: PathBuf,
    yaml_directory: PathBuf,
    strict: bool,
}

impl PathResolver {
    /// Both directories are resolved once here; neither needs to exist yet.
    pub fn new(project_root: &Path, yaml_directory: &Path, strict: bool) -> Self {
        Self {
            project_root: resolve_dir(project_root),
            yaml_directory: resolve_dir(yaml_directory),
            strict,
        }
    }

    /// Resolved YAML directory every accepted path lies under.
    pub fn yaml_directory(&self) -> &Path {
        &self.yaml_directory
    }

    /// Validate `requested` and resolve it to a file inside the YAML directory.
    pub fn resolve(&self, requested: &str) -> Result<YamlFileRef, PathRejection> {
        if self.strict && has_traversal(requested) {
            return Err(PathRejection::Traversal);
        }

        let normalized = normalize(requested);
        if normalized.is_empty() {
            return Err(PathRejection::Empty);
        }

        let resolved = resolve_path(&self.project_root.join(normalized))
            .map_err(|e| PathRejection::Unresolvable(e.kind()))?;

        if !has_yaml_extension(&resolved) {
            return Err(PathRejection::Extension);
        }
        if !resolved.starts_with(&self.yaml_directory) {
            return Err(PathRejection::OutsideYamlDirectory);
        }

        Ok(YamlFileRef { path: resolved })
    }
}

fn resolve_dir(dir: &Path) -> PathBuf {
    resolve_path(dir).unwrap_or_else(|e| {
        tracing::warn!(dir = %dir.display(), error = %e, "Cannot resolve directory, using it as given");
        dir.to_path_buf()
    })
}

/// Unify separators, then drop one leading `./` and every leading `../`.
///
/// Clients address files relative to the YAML viewer page, so
/// `../YAML/features.yaml` and `YAML/features.yaml` mean the same file.
pub fn normalize(requested: &str) -> String {
    let unified = requested.replace('\\', "/");
    let mut rest = unified.strip_prefix("./").unwrap_or(&unified);
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    rest.to_string()
}

fn has_traversal(requested: &str) -> bool {
    requested.split(['/', '\\']).any(|segment| segment == "..")
}

/// True when the extension is `yaml` or `yml`, ignoring case.
pub fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| YAML_EXTENSIONS.iter().any(|y| ext.eq_ignore_ascii_case(y)))
}

/// Symbolic links followed while resolving one path before giving up.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve `path` one component at a time, the way the kernel walks it.
///
/// Every symlink is followed, including dangling ones, so the result names
/// the file a write would actually create. `..` applies to the directory
/// reached so far, after any link before it was followed. Components that
/// do not exist are kept as they are.
pub(crate) fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let mut pending: Vec<PathBuf> = components_reversed(path);
    let mut resolved = PathBuf::new();
    let mut hops = 0;

    while let Some(part) = pending.pop() {
        match part.components().next() {
            None | Some(Component::CurDir) => {}
            // popping past the root is a no-op
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::RootDir) | Some(Component::Prefix(_)) => resolved.push(&part),
            Some(Component::Normal(name)) => {
                let candidate = resolved.join(name);
                let is_link = std::fs::symlink_metadata(&candidate)
                    .is_ok_and(|meta| meta.file_type().is_symlink());
                if !is_link {
                    resolved = candidate;
                    continue;
                }

                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::other("too many levels of symbolic links"));
                }
                // relative targets continue from the link's directory
                let target = std::fs::read_link(&candidate)?;
                pending.extend(components_reversed(&target));
            }
        }
    }

    Ok(resolved)
}

fn components_reversed(path: &Path) -> Vec<PathBuf> {
    path.components()
        .rev()
        .map(|c| PathBuf::from(c.as_os_str()))
        .collect()
}
