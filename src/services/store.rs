//! Glossary persistence
//!
//! Loading never refuses a broken file: a glossary that is not valid JSON
//! is replaced by an empty one. Saving goes through a temporary file in
//! the target directory so a failed write leaves the old file in place.

use crate::models::Glossary;
use crate::utils::error::{AppResult, ErrorContext};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Load the glossary at `path`
///
/// Missing, blank and non-JSON files yield an empty glossary. Entries of
/// a JSON file that do not read as records are carried along unchanged.
/// Only an existing file that cannot be read at all is an error.
pub fn load_glossary(path: &Path) -> AppResult<Glossary> {
    if !path.exists() {
        debug!("Glossary {:?} does not exist, starting empty", path);
        return Ok(Glossary::new());
    }

    let content = match fs::read_to_string(path) {
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            warn!(
                "Glossary {:?} is not valid UTF-8. Starting with empty glossary.",
                path
            );
            return Ok(Glossary::new());
        }
        result => result.glossary_read_context(path)?,
    };

    if content.trim().is_empty() {
        debug!("Glossary {:?} is empty, starting empty", path);
        return Ok(Glossary::new());
    }

    // only text that is not JSON at all is discarded wholesale
    let value = match serde_json::from_str::<Value>(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Could not decode JSON from {:?} ({}). Starting with empty glossary.",
                path, e
            );
            return Ok(Glossary::new());
        }
    };

    let glossary = Glossary::from_value(value);
    debug!("Loaded {} glossary entries from {:?}", glossary.len(), path);
    Ok(glossary)
}

/// Write the glossary to `path`, replacing any previous content
pub fn save_glossary(path: &Path, glossary: &Glossary) -> AppResult<()> {
    let json = glossary.to_pretty_json()?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).glossary_write_context(path)?;
    file.write_all(json.as_bytes()).glossary_write_context(path)?;
    file.flush().glossary_write_context(path)?;
    file.persist(path)
        .map_err(|e| e.error)
        .glossary_write_context(path)?;

    debug!("Wrote {} glossary records to {:?}", glossary.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GlossaryError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let glossary = load_glossary(&dir.path().join("absent.json")).unwrap();
        assert!(glossary.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossary.json");
        fs::write(&path, "{ this is not json").unwrap();
        assert!(load_glossary(&path).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossary.json");
        fs::write(&path, r#"[1, 2, 3]"#).unwrap();
        assert!(load_glossary(&path).unwrap().is_empty());
    }

    #[test]
    fn test_mistyped_record_does_not_discard_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossary.json");
        fs::write(
            &path,
            r#"{"llm_errors": [
                {"code": "X", "http_status_code": 500, "provider": "gemini", "exact_message": "keep me"},
                {"code": 7, "http_status_code": "503", "provider": "gemini", "exact_message": "odd"}
            ]}"#,
        )
        .unwrap();

        let glossary = load_glossary(&path).unwrap();

        assert_eq!(glossary.len(), 2);
        let kept: Vec<_> = glossary.records().map(|r| r.exact_message.as_str()).collect();
        assert_eq!(kept, vec!["keep me"]);
    }

    #[test]
    fn test_save_preserves_non_ascii_and_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossary.json");
        let mut glossary = Glossary::new();
        glossary
            .extra
            .insert("note".to_string(), serde_json::json!("配额"));

        save_glossary(&path, &glossary).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("配额"));
        assert!(written.contains("\n  \"llm_errors\": []"));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("glossary.json");
        let result = save_glossary(&path, &Glossary::new());
        assert!(matches!(
            result,
            Err(GlossaryError::GlossaryWrite { .. })
        ));
    }
}
