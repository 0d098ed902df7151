//! Persisted app collection under the `appConfigData` key.
//!
//! # Responsibility
//! - Round-trip the whole app collection between memory and storage.
//! - Fall back to the bundled default dataset when nothing usable is stored.
//!
//! # Invariants
//! - `load` never fails; absent or malformed blobs yield the defaults.
//! - `save` never surfaces an error; failures are logged.
//! - `load` after a successful `save(x)` returns `x`.

use crate::model::app::AppPortal;
use crate::storage::{keys, read_json, write_json, LocalStorage, StorageResult};
use crate::store::mirror::{LogOnlyMirror, MirrorHook};
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const DEFAULT_APPS_JSON: &str = include_str!("default_apps.json");

static DEFAULT_COLLECTION: Lazy<AppCollection> = Lazy::new(|| {
    serde_json::from_str(DEFAULT_APPS_JSON).expect("bundled default app dataset is valid")
});

/// Root object of the `appConfigData` blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCollection {
    pub apps: Vec<AppPortal>,
}

impl AppCollection {
    /// The bundled two-app dataset used on first run.
    pub fn defaults() -> Self {
        DEFAULT_COLLECTION.clone()
    }

    pub fn find(&self, id: &str) -> Option<&AppPortal> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut AppPortal> {
        self.apps.iter_mut().find(|app| app.id == id)
    }
}

/// Load/save owner of the app collection blob.
pub struct AppConfigStore<S: LocalStorage> {
    storage: S,
    mirror: Box<dyn MirrorHook>,
}

impl<S: LocalStorage> AppConfigStore<S> {
    /// Creates a store whose mirror step only logs.
    pub fn new(storage: S) -> Self {
        Self::with_mirror(storage, Box::new(LogOnlyMirror))
    }

    pub fn with_mirror(storage: S, mirror: Box<dyn MirrorHook>) -> Self {
        Self { storage, mirror }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored collection, or the defaults when absent or malformed.
    pub fn load(&self) -> AppCollection {
        match read_json::<AppCollection>(&self.storage, keys::APP_CONFIG_DATA) {
            Ok(Some(collection)) => {
                debug!(
                    "event=app_store_load module=store status=ok apps={}",
                    collection.apps.len()
                );
                collection
            }
            Ok(None) => {
                debug!("event=app_store_load module=store status=defaults reason=absent");
                AppCollection::defaults()
            }
            Err(err) => {
                error!(
                    "event=app_store_load module=store status=defaults error_code=malformed_storage error={err}"
                );
                AppCollection::defaults()
            }
        }
    }

    /// Writes the collection; failures are logged and swallowed.
    pub fn save(&self, collection: &AppCollection) {
        if let Err(err) = self.try_save(collection) {
            error!(
                "event=app_store_save module=store status=error error_code=save_failed apps={} error={err}",
                collection.apps.len()
            );
        }
    }

    /// Writes the collection and reports primary write failures.
    ///
    /// Mirror failures are logged only.
    pub fn try_save(&self, collection: &AppCollection) -> StorageResult<()> {
        write_json(&self.storage, keys::APP_CONFIG_DATA, collection)?;
        debug!(
            "event=app_store_save module=store status=ok apps={}",
            collection.apps.len()
        );

        if let Err(err) = self.mirror.mirror(collection) {
            warn!("event=app_store_mirror module=store status=error error={err}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCollection, AppConfigStore};
    use crate::model::permission::Permission;
    use crate::storage::{keys, LocalStorage, MemoryStorage};

    #[test]
    fn defaults_contain_bundled_apps() {
        let defaults = AppCollection::defaults();
        let titles: Vec<&str> = defaults.apps.iter().map(|app| app.title.as_str()).collect();
        assert_eq!(titles, vec!["Customer Portal", "Employee Dashboard"]);
        assert_eq!(
            defaults.find("2").unwrap().users[1].permission,
            Permission::Editor
        );
    }

    #[test]
    fn load_falls_back_to_defaults_when_absent() {
        let store = AppConfigStore::new(MemoryStorage::new());
        assert_eq!(store.load(), AppCollection::defaults());
    }

    #[test]
    fn load_falls_back_to_defaults_when_malformed() {
        let storage = MemoryStorage::new();
        storage
            .set_item(keys::APP_CONFIG_DATA, "{\"apps\": [ {\"id\": ")
            .unwrap();
        let store = AppConfigStore::new(storage);
        assert_eq!(store.load(), AppCollection::defaults());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = AppConfigStore::new(MemoryStorage::new());
        let mut collection = AppCollection::defaults();
        collection.apps.truncate(1);
        collection.apps[0].title = "Renamed".to_string();
        collection.apps[0].touch();

        store.save(&collection);
        assert_eq!(store.load(), collection);
    }

    #[test]
    fn empty_collection_is_kept_not_replaced_by_defaults() {
        let store = AppConfigStore::new(MemoryStorage::new());
        store.save(&AppCollection::default());
        assert!(store.load().apps.is_empty());
    }
}
