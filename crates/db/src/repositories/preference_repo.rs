//! Repository for the language and theme keys.

use showcase_core::preferences::{Language, Preferences, Theme};

use crate::keys;
use crate::store::{read_json, write_json, KeyValueStore, StoreError};

/// Reads and writes display preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Load preferences, falling back to defaults for absent or unknown values.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Preferences, StoreError> {
        let language: Option<Language> = read_json(store, keys::LANGUAGE).await?;
        let theme: Option<Theme> = read_json(store, keys::THEME).await?;
        Ok(Preferences {
            language: language.unwrap_or_default(),
            theme: theme.unwrap_or_default(),
        })
    }

    pub async fn save(store: &dyn KeyValueStore, prefs: &Preferences) -> Result<(), StoreError> {
        write_json(store, keys::LANGUAGE, &prefs.language).await?;
        write_json(store, keys::THEME, &prefs.theme).await
    }
}
