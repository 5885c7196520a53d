//! Static content configuration.
//!
//! Every table the app ships (zodiac ranges, numerology interpretations,
//! daily horoscopes) can be replaced by a JSON document. Sections that are
//! left out keep their built-in content.
//!
//! ```json
//! {
//!   "zodiac": [{ "sign": "aries", "start": "03-21", "end": "04-19" }, ...],
//!   "interpretations": [{ "number": 1, "life_path_meaning": "...", "destiny_meaning": "..." }],
//!   "horoscopes": [{ "sign": "aries", "description": "...", "lucky_number": 7,
//!                    "lucky_color": "Red", "mood": "Energetic" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::horoscope::{DailyHoroscope, HoroscopeTable};
use crate::zodiac::SignRange;
use crate::{Interpretation, InterpretationTable, ZodiacClassifier, ZodiacTable};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read content file {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid content table: {0}")]
    InvalidTable(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentConfig {
    pub zodiac:          ZodiacTable,
    pub interpretations: InterpretationTable,
    pub horoscopes:      HoroscopeTable,
}

/// Unvalidated document shape; tables are checked in [`ContentConfig::from_raw`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawContent {
    zodiac:          Option<Vec<SignRange>>,
    interpretations: Option<Vec<Interpretation>>,
    horoscopes:      Option<Vec<DailyHoroscope>>,
}

impl ContentConfig {
    /// # Errors
    /// Returns `ConfigError::Json` for malformed JSON and
    /// `ConfigError::InvalidTable` for a table that fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawContent = serde_json::from_str(json)?;
        let config = Self::from_raw(raw)?;
        tracing::debug!(
            interpretations = config.interpretations.len(),
            horoscopes = config.horoscopes.len(),
            "content configuration parsed"
        );
        Ok(config)
    }

    fn from_raw(raw: RawContent) -> Result<Self, ConfigError> {
        Ok(Self {
            zodiac:          raw.zodiac.map(ZodiacTable::new).transpose()?.unwrap_or_default(),
            interpretations: raw
                .interpretations
                .map(InterpretationTable::new)
                .transpose()?
                .unwrap_or_default(),
            horoscopes:      raw
                .horoscopes
                .map(HoroscopeTable::new)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// # Errors
    /// Returns `ConfigError::Io` when the file cannot be read, otherwise as
    /// [`ContentConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loading content configuration");
        Self::from_json_str(&json)
    }

    pub fn classifier(&self) -> ZodiacClassifier {
        ZodiacClassifier::new(&self.zodiac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZodiacSign;
    use crate::test_utils::date;

    #[test]
    fn test_empty_document_uses_builtin_tables() {
        let config = ContentConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ContentConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "interpretations": [
                { "number": 7, "life_path_meaning": "seeker", "destiny_meaning": "sage" }
            ]
        }"#;
        let config = ContentConfig::from_json_str(json).unwrap();
        assert_eq!(config.interpretations.len(), 1);
        assert_eq!(config.zodiac, ZodiacTable::default());
        assert_eq!(config.horoscopes, HoroscopeTable::default());
    }

    #[test]
    fn test_invalid_zodiac_table_is_rejected() {
        let mut ranges: Vec<serde_json::Value> =
            serde_json::from_str(&serde_json::to_string(&ZodiacTable::default()).unwrap()).unwrap();
        ranges.pop();
        let json = serde_json::json!({ "zodiac": ranges }).to_string();
        let err = ContentConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTable(_)), "{err:?}");
        assert!(err.to_string().contains("Pisces"));
    }

    #[test]
    fn test_invalid_tables_report_invalid_table() {
        struct TestCase {
            description: &'static str,
            json:        String,
        }

        let mut shifted = serde_json::to_value(ZodiacTable::default()).unwrap();
        shifted[0]["start"] = "03-25".into();
        let mut horoscope = serde_json::to_value(HoroscopeTable::default()).unwrap();
        horoscope[1]["sign"] = horoscope[0]["sign"].clone();
        let entry = r#"{ "number": 4, "life_path_meaning": "a", "destiny_meaning": "b" }"#;

        let cases = [
            TestCase {
                description: "zodiac gap after shifted start",
                json:        serde_json::json!({ "zodiac": shifted }).to_string(),
            },
            TestCase {
                description: "duplicate interpretation",
                json:        format!(r#"{{ "interpretations": [{entry}, {entry}] }}"#),
            },
            TestCase {
                description: "duplicate horoscope sign",
                json:        serde_json::json!({ "horoscopes": horoscope }).to_string(),
            },
        ];

        for case in cases {
            let err = ContentConfig::from_json_str(&case.json).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTable(_)),
                "{}: {err:?}",
                case.description
            );
        }
    }

    #[test]
    fn test_malformed_json_reports_json() {
        let err = ContentConfig::from_json_str(r#"{ "zodiac": [ "#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(ContentConfig::from_json_str(r#"{ "zodiak": [] }"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ContentConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_classifier_from_config() {
        let config = ContentConfig::default();
        assert_eq!(config.classifier().classify(date(1990, 1, 1)), ZodiacSign::Capricorn);
    }
}
