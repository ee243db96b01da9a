//! Request loading from JSON.
//!
//! A request is either a bare array of parts or a full configuration object
//! (`{"parts": [...], "customer": {...}}`).

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::model::{CuttingConfiguration, CuttingPart};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse a request body.
pub fn parse_configuration(content: &str) -> Result<CuttingConfiguration> {
    let value: Value = serde_json::from_str(content)?;
    let configuration = if value.is_array() {
        CuttingConfiguration::new(serde_json::from_value::<Vec<CuttingPart>>(value)?)
    } else {
        serde_json::from_value(value)?
    };
    debug!("Parsed request with {} part(s)", configuration.parts.len());
    Ok(configuration)
}

fn read_non_empty(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(EngineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(EngineError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(content)
}

/// Load a request file.
pub fn load_configuration_file(path: &Path) -> Result<CuttingConfiguration> {
    parse_configuration(&read_non_empty(path)?)
}

/// Load an engine configuration file. Missing keys keep their defaults.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(&read_non_empty(path)?)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    const PARTS: &str = r#"[
        {"id": "a", "width": 300, "height": 500, "quantity": 3,
         "material": {"id": "m", "name": "Board", "pricePerUnit": 10, "thickness": 19, "category": "chipboard"}}
    ]"#;

    #[test]
    fn test_parse_bare_parts() {
        let configuration = parse_configuration(PARTS).expect("Should parse");
        assert_eq!(configuration.parts.len(), 1);
        assert!(configuration.customer.is_empty());
    }

    #[test]
    fn test_parse_configuration_object() {
        let body = format!(r#"{{"parts": {}, "customer": {{"name": "Ada", "email": "ada@example.com"}}}}"#, PARTS);
        let configuration = parse_configuration(&body).expect("Should parse");
        assert_eq!(configuration.parts[0].quantity, 3);
        assert_eq!(configuration.customer.name, "Ada");
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_configuration("{not json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_configuration_file(Path::new("/nonexistent/parts.json")).unwrap_err();
        assert!(matches!(err, EngineError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Temp file");
        writeln!(file, "   ").expect("Write");
        let err = load_configuration_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyFile { .. }));
    }

    #[test]
    fn test_load_engine_config() {
        let mut file = tempfile::NamedTempFile::new().expect("Temp file");
        write!(file, r#"{{"labor_rate": 0.2}}"#).expect("Write");
        let config = load_engine_config(file.path()).expect("Should load");
        assert_eq!(config.labor_rate, 0.2);
        assert_eq!(config.sheet_width, crate::config::STANDARD_SHEET_WIDTH_MM);
    }
}
