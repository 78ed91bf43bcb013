//! Save request decoding and the verbatim file write.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::error::GatewayError;
use crate::gateway::resolver::{PathResolver, YamlFileRef};

/// Confirmation returned after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub ok: bool,
    /// Absolute path that was written.
    pub saved: String,
}

/// A decoded save request whose target already passed validation.
#[derive(Debug)]
pub struct SaveRequest {
    pub target: YamlFileRef,
    pub yaml: String,
}

impl SaveRequest {
    /// Decode `body` and validate it, in order: JSON object, `path`, `yaml`.
    ///
    /// A missing or non-string `path` is treated as empty.
    pub fn decode(body: &[u8], resolver: &PathResolver) -> Result<Self, GatewayError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|e| GatewayError::MalformedBody(e.to_string()))?;
        let fields = payload
            .as_object()
            .ok_or_else(|| GatewayError::MalformedBody("expected a JSON object".to_string()))?;

        let requested = fields.get("path").and_then(Value::as_str).unwrap_or_default();
        let target = resolver.resolve(requested)?;

        let yaml = fields
            .get("yaml")
            .and_then(Value::as_str)
            .ok_or(GatewayError::MissingYaml)?
            .to_string();

        Ok(Self { target, yaml })
    }
}

/// Replace the file's content with `yaml`, byte for byte.
pub async fn write_yaml(target: &Path, yaml: &str) -> Result<SaveOutcome, GatewayError> {
    tokio::fs::write(target, yaml.as_bytes())
        .await
        .map_err(|source| GatewayError::Write {
            path: target.display().to_string(),
            source,
        })?;

    Ok(SaveOutcome {
        ok: true,
        saved: target.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::resolver::PathRejection;
    use std::fs;

    fn setup() -> (tempfile::TempDir, PathResolver) {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("YAML");
        fs::create_dir(&yaml).unwrap();
        let resolver = PathResolver::new(dir.path(), &yaml, false);
        (dir, resolver)
    }

    #[test]
    fn test_decode_valid_request() {
        let (_dir, resolver) = setup();
        let req = SaveRequest::decode(
            br#"{"path":"YAML/features.yaml","yaml":"version: 1\n"}"#,
            &resolver,
        )
        .unwrap();
        assert_eq!(req.yaml, "version: 1\n");
        assert!(req.target.path().ends_with("YAML/features.yaml"));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let (_dir, resolver) = setup();
        let err = SaveRequest::decode(b"{not json", &resolver).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedBody(_)));

        let err = SaveRequest::decode(b"[1, 2]", &resolver).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedBody(_)));
    }

    #[test]
    fn test_path_is_checked_before_yaml() {
        let (_dir, resolver) = setup();
        let err = SaveRequest::decode(br#"{"path":"notes.txt"}"#, &resolver).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidPath(PathRejection::Extension)
        ));

        let err = SaveRequest::decode(br#"{"yaml":"a: 1"}"#, &resolver).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidPath(PathRejection::Empty)));

        let err = SaveRequest::decode(br#"{"path":7,"yaml":"a: 1"}"#, &resolver).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidPath(PathRejection::Empty)));
    }

    #[test]
    fn test_yaml_must_be_a_string() {
        let (_dir, resolver) = setup();
        for body in [
            br#"{"path":"YAML/a.yaml"}"#.as_slice(),
            br#"{"path":"YAML/a.yaml","yaml":null}"#.as_slice(),
            br#"{"path":"YAML/a.yaml","yaml":{"a":1}}"#.as_slice(),
        ] {
            let err = SaveRequest::decode(body, &resolver).unwrap_err();
            assert!(matches!(err, GatewayError::MissingYaml));
        }
    }

    #[tokio::test]
    async fn test_write_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.yaml");
        fs::write(&target, "old content that is longer\n").unwrap();

        let outcome = write_yaml(&target, "k: v").await.unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.saved, target.display().to_string());
        assert_eq!(fs::read(&target).unwrap(), b"k: v");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("a.yaml");
        let err = write_yaml(&target, "k: v").await.unwrap_err();
        assert!(matches!(err, GatewayError::Write { .. }));
    }
}
