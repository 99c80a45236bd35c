use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizerSettings {
    /// Language the page renders in when it records no state.
    pub default_language: String,
    /// The other half of the two-language set a toggle switches to.
    pub alternate_language: String,

    /// Attribute that marks an element as localizable and carries its key.
    pub key_attribute: String,
    /// Attribute on `<body>` that records the active language.
    pub state_attribute: String,

    /// `id` of the control whose label names the language a toggle
    /// would switch to.
    pub toggle_control_id: String,
    /// Table key holding that label, per active language.
    pub toggle_label_key: String,

    pub key_separator: String,

    pub translation_files: TranslationFilesConfig,
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckConfig {
    /// Report table keys no page binding uses.
    pub unused_keys: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { unused_keys: true }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/*.json".to_string() }
    }
}

impl Default for LocalizerSettings {
    fn default() -> Self {
        Self {
            default_language: "ja".to_string(),
            alternate_language: "en".to_string(),
            key_attribute: "data-i18n".to_string(),
            state_attribute: "data-lang".to_string(),
            toggle_control_id: "lang-switch".to_string(),
            toggle_label_key: "langSwitch".to_string(),
            key_separator: ".".to_string(),
            translation_files: TranslationFilesConfig::default(),
            check: CheckConfig::default(),
        }
    }
}

impl LocalizerSettings {
    /// The language a toggle switches to from `lang`.
    ///
    /// Anything that is not the default language (including an unknown
    /// code recorded in the page) toggles back to the default.
    #[must_use]
    pub fn opposite_of(&self, lang: &str) -> &str {
        if lang == self.default_language { &self.alternate_language } else { &self.default_language }
    }

    /// # Errors
    /// - Required field is empty
    /// - Language codes are not distinct
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field_path, value, example) in [
            ("defaultLanguage", &self.default_language, "\"ja\""),
            ("alternateLanguage", &self.alternate_language, "\"en\""),
            ("keyAttribute", &self.key_attribute, "\"data-i18n\""),
            ("stateAttribute", &self.state_attribute, "\"data-lang\""),
            ("toggleControlId", &self.toggle_control_id, "\"lang-switch\""),
            ("toggleLabelKey", &self.toggle_label_key, "\"langSwitch\""),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::new(
                    field_path,
                    format!("The value cannot be empty. Example: {example}"),
                ));
            }
        }

        if !self.default_language.is_empty()
            && self.default_language == self.alternate_language
        {
            errors.push(ValidationError::new(
                "defaultLanguage/alternateLanguage",
                "The two language codes must be distinct. Example: \"ja\" and \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Example: \".\" (dot)",
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
