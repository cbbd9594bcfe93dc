//! Display preferences: UI language and theme.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Active UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(CoreError::Validation(format!(
                "Unknown language '{other}'. Must be one of: en, ar"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for this language.
    pub fn direction(self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }

    /// Short numeric date in the language's conventional order.
    pub fn format_date(self, at: Timestamp) -> String {
        match self {
            Self::En => at.format("%-m/%-d/%Y").to_string(),
            Self::Ar => at.format("%d/%m/%Y").to_string(),
        }
    }
}

/// Active color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(CoreError::Validation(format!(
                "Unknown theme '{other}'. Must be one of: light, dark"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Language and theme together, as persisted for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

/// DTO for changing preferences. Omitted fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePreferences {
    pub language: Option<String>,
    pub theme: Option<String>,
}

impl Preferences {
    /// Apply an update, rejecting unknown names before changing anything.
    pub fn apply(&mut self, update: &UpdatePreferences) -> Result<(), CoreError> {
        let language = update
            .language
            .as_deref()
            .map(Language::from_name)
            .transpose()?;
        let theme = update.theme.as_deref().map(Theme::from_name).transpose()?;

        if let Some(language) = language {
            self.language = language;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        Ok(())
    }
}
