use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{ExtendError, Result};

const LANGUAGES_KEY: &str = "languages";

/// Append `language` to the `languages` array of a model config
///
/// # Returns
/// * `true` if the code was appended, `false` if it was already listed
///
/// # Errors
/// Returns `InvalidConfig` if the document is not an object holding a
/// `languages` array, `EmptyLanguage` for an empty code
pub fn patch_languages(config: &mut Value, language: &str) -> Result<bool> {
    if language.is_empty() {
        return Err(ExtendError::EmptyLanguage);
    }
    let languages = config
        .as_object_mut()
        .ok_or_else(|| ExtendError::InvalidConfig("expected a JSON object".into()))?
        .get_mut(LANGUAGES_KEY)
        .ok_or_else(|| ExtendError::InvalidConfig(format!("missing \"{LANGUAGES_KEY}\" field")))?
        .as_array_mut()
        .ok_or_else(|| ExtendError::InvalidConfig(format!("\"{LANGUAGES_KEY}\" is not an array")))?;

    if languages.iter().any(|l| l.as_str() == Some(language)) {
        return Ok(false);
    }
    languages.push(Value::String(language.to_owned()));
    Ok(true)
}

/// Patch the config file at `path` in place
///
/// The file is rewritten with 4-space indentation even when the language was
/// already present. Key order of the document is preserved.
pub fn adjust_config<P: AsRef<Path>>(path: P, language: &str) -> Result<bool> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ExtendError::io(path, e))?;
    let mut config: Value = serde_json::from_str(&text).map_err(|e| ExtendError::json(path, e))?;

    let appended = patch_languages(&mut config, language)?;
    if appended {
        info!("Added language {:?} to {}", language, path.display());
    } else {
        info!("Language {:?} already listed in {}", language, path.display());
    }

    write_json_indented(path, &config)?;
    Ok(appended)
}

fn write_json_indented(path: &Path, value: &Value) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| ExtendError::json(path, e))?;
    fs::write(path, buf).map_err(|e| ExtendError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_appends_at_end() {
        let mut config = json!({"languages": ["en"]});

        let appended = patch_languages(&mut config, "fa").unwrap();

        assert!(appended);
        assert_eq!(config, json!({"languages": ["en", "fa"]}));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let mut once = json!({"languages": ["en", "de"]});
        patch_languages(&mut once, "fa").unwrap();
        let mut twice = once.clone();

        let appended = patch_languages(&mut twice, "fa").unwrap();

        assert!(!appended);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_patch_existing_language_is_noop() {
        let mut config = json!({"languages": ["en", "fa", "de"]});

        assert!(!patch_languages(&mut config, "fa").unwrap());
        assert_eq!(config, json!({"languages": ["en", "fa", "de"]}));
    }

    #[test]
    fn test_patch_rejects_bad_shapes() {
        let cases = vec![
            json!(["en"]),
            json!({"model": "xtts"}),
            json!({"languages": "en"}),
        ];

        for mut config in cases {
            let result = patch_languages(&mut config, "fa");
            assert!(matches!(result, Err(ExtendError::InvalidConfig(_))), "accepted {config}");
        }
    }

    #[test]
    fn test_adjust_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"output_path": "out", "languages": ["en"], "model": {"gpt": 1}}"#).unwrap();

        assert!(adjust_config(&path, "fa").unwrap());
        let first = fs::read_to_string(&path).unwrap();
        assert!(!adjust_config(&path, "fa").unwrap());
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            "{\n    \"output_path\": \"out\",\n    \"languages\": [\n        \"en\",\n        \"fa\"\n    ],\n    \"model\": {\n        \"gpt\": 1\n    }\n}"
        );
    }

    #[test]
    fn test_adjust_config_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = adjust_config(tmp.path().join("config.json"), "fa");
        assert!(matches!(missing, Err(ExtendError::Io { .. })));

        let path = tmp.path().join("broken.json");
        fs::write(&path, "{\"languages\": [").unwrap();
        let malformed = adjust_config(&path, "fa");
        assert!(matches!(malformed, Err(ExtendError::Json { .. })));
    }
}
