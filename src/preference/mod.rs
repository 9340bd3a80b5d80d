use std::{
    str::FromStr,
    sync::{Arc, LazyLock, RwLock},
};

use log::warn;
use preferences::{AppInfo, Preferences, PreferencesMap};

const PREFS_PATH: &str = "route";
pub const APP_INFO: AppInfo = AppInfo {
    name: "kelpie-flight-route",
    author: "shartrec.com",
};

// Preference constants
pub const UNITS: &str = "Units";
pub const AIRCRAFT_NAME: &str = "Aircraft.name";
pub const WIND_SPEED: &str = "Wind.speedKT";
pub const WIND_DIRECTION: &str = "Wind.directionDEG";
pub const ROUTE_FILE: &str = "Route.file";

static MANAGER: LazyLock<PreferenceManager> = LazyLock::new(|| PreferenceManager {
    preferences: {
        match PreferencesMap::<String>::load(&APP_INFO, PREFS_PATH) {
            Ok(map) => Arc::new(RwLock::new(map)),
            Err(e) => {
                warn!("Error opening preferences {}", e);
                Arc::new(RwLock::new(PreferencesMap::new()))
            }
        }
    },
    path: Some(PREFS_PATH),
});

pub struct PreferenceManager {
    preferences: Arc<RwLock<PreferencesMap>>,
    path: Option<&'static str>,
}

impl PreferenceManager {
    /// A manager that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            preferences: Arc::new(RwLock::new(PreferencesMap::new())),
            path: None,
        }
    }

    pub fn get<T: FromStr>(&self, key: &str) -> Option<T> {
        let prefs = self.preferences.read().ok()?;
        prefs.get(key).and_then(|s| s.parse::<T>().ok())
    }

    pub fn put<T: ToString>(&self, key: &str, value: T) {
        if let Ok(mut prefs) = self.preferences.write() {
            prefs.insert(key.to_string(), value.to_string());
        }
        self.store();
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut prefs) = self.preferences.write() {
            let _e = prefs.remove(key);
        }
        self.store();
    }

    pub fn clear(&self) {
        if let Ok(mut prefs) = self.preferences.write() {
            prefs.clear();
        }
        self.store();
    }

    fn store(&self) {
        let Some(path) = self.path else {
            return;
        };
        if let Ok(prefs) = self.preferences.read() {
            if let Err(e) = prefs.save(&APP_INFO, path) {
                warn!("Unable to save preferences {}", e);
            }
        }
    }
}

pub fn manager() -> &'static PreferenceManager {
    &MANAGER
}
