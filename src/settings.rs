//! Layered settings: built-in defaults, an optional TOML file, then
//! `QUERY_RESOLVE__*` environment variables.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [array]
//! delimiter = { pattern = "[,;]" }
//! flat = true
//! flat_delimiter = "|"
//!
//! [string]
//! missing_message = "parameter is required"
//! ```

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::delimiter::{ArrayOptions, Delimiter};
use crate::error::{DEFAULT_MISSING_MESSAGE, Result};

pub const DEFAULT_CONFIG_FILE: &str = "query-resolve.toml";
pub const ENV_PREFIX: &str = "QUERY_RESOLVE";

/// A delimiter as written in configuration: a bare string is a literal
/// separator, `{ pattern = "..." }` a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DelimiterSetting {
    Literal(String),
    Pattern { pattern: String },
}

impl Default for DelimiterSetting {
    fn default() -> Self {
        DelimiterSetting::Literal(",".to_string())
    }
}

impl DelimiterSetting {
    pub fn compile(&self) -> Result<Delimiter> {
        match self {
            DelimiterSetting::Literal(separator) => Ok(Delimiter::literal(separator.as_str())),
            DelimiterSetting::Pattern { pattern } => Delimiter::pattern(pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: "127.0.0.1:8080".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArraySettings {
    pub delimiter: DelimiterSetting,
    pub flat: bool,
    pub flat_delimiter: Option<DelimiterSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StringSettings {
    pub missing_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub array: ArraySettings,
    pub string: StringSettings,
}

impl Settings {
    /// Reads `path` when given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] if present, then applies environment overrides
    /// such as `QUERY_RESOLVE__ARRAY__FLAT=true`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                info!(path = %path.display(), "loading settings");
                File::from(path).format(FileFormat::Toml).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_FILE).format(FileFormat::Toml).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn array_options(&self) -> Result<ArrayOptions> {
        Ok(ArrayOptions {
            delimiter: self.array.delimiter.compile()?,
            flat: self.array.flat,
            flat_delimiter: self.array.flat_delimiter.as_ref().map(DelimiterSetting::compile).transpose()?,
        })
    }

    pub fn missing_message(&self) -> &str {
        self.string.missing_message.as_deref().unwrap_or(DEFAULT_MISSING_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide; loads that read them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn settings_file(toml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_reads_given_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = settings_file("[server]\nbind = \"0.0.0.0:9000\"\n[array]\ndelimiter = { pattern = \"\\\\s+\" }\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:9000");
        assert_eq!(settings.array_options().unwrap().delimiter, Delimiter::whitespace());
        assert!(!settings.array.flat);
    }

    #[test]
    fn load_missing_given_file_is_a_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Settings::load(Some(&missing)), Err(QueryError::Config(_))));
    }

    #[test]
    fn load_without_default_file_gives_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(!Path::new(DEFAULT_CONFIG_FILE).exists());
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = settings_file("[server]\nbind = \"127.0.0.1:1\"\n[array]\ndelimiter = \";\"\nflat = false\n");
        let vars = [
            ("QUERY_RESOLVE__ARRAY__FLAT", "true"),
            ("QUERY_RESOLVE__ARRAY__DELIMITER", "|"),
            ("QUERY_RESOLVE__SERVER__BIND", "0.0.0.0:9"),
        ];
        for (key, value) in vars {
            // SAFETY: every test touching the environment holds ENV_LOCK.
            unsafe { std::env::set_var(key, value) };
        }
        let loaded = Settings::load(Some(file.path()));
        for (key, _) in vars {
            // SAFETY: as above.
            unsafe { std::env::remove_var(key) };
        }
        let settings = loaded.unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:9");
        assert!(settings.array.flat);
        assert_eq!(settings.array.delimiter, DelimiterSetting::Literal("|".to_string()));
    }

    #[test]
    fn empty_source_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.bind, "127.0.0.1:8080");
        assert_eq!(settings.array_options().unwrap(), ArrayOptions::default());
        assert_eq!(settings.missing_message(), DEFAULT_MISSING_MESSAGE);
    }

    #[test]
    fn literal_and_pattern_delimiters() {
        let settings = Settings::from_toml_str(
            r#"
            [array]
            delimiter = "|"
            flat = true
            flat_delimiter = { pattern = "[,;]" }

            [string]
            missing_message = "needed"
            "#,
        )
        .unwrap();
        let options = settings.array_options().unwrap();
        assert_eq!(options.delimiter, Delimiter::from("|"));
        assert!(options.flat);
        assert_eq!(options.flat_delimiter, Some(Delimiter::pattern("[,;]").unwrap()));
        assert_eq!(settings.missing_message(), "needed");
    }

    #[test]
    fn bad_pattern_surfaces_when_compiling() {
        let settings = Settings::from_toml_str("[array]\ndelimiter = { pattern = \"(\" }").unwrap();
        assert!(matches!(settings.array_options(), Err(QueryError::Pattern(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(Settings::from_toml_str("[array"), Err(QueryError::Config(_))));
    }
}
