//! Session facade handed to plugins

use super::{HostError, VersionInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The game being managed
pub trait GameInfo: Send + Sync {
    /// Display name of the game
    fn name(&self) -> &str;

    /// Directory the game is installed in
    fn game_directory(&self) -> &Path;

    /// Directory the game loads its data files from
    fn data_directory(&self) -> PathBuf {
        self.game_directory().join("data")
    }
}

/// An installed mod
pub trait ModHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Absolute path of the mod's directory
    fn absolute_path(&self) -> PathBuf;

    fn version(&self) -> VersionInfo;

    fn set_version(&self, version: VersionInfo);
}

/// Shared handle to a mod
pub type ModRef = Arc<dyn ModHandle>;

/// Information about the running session, and the operations plugins may
/// perform on it
pub trait Organizer: Send + Sync {
    fn game_info(&self) -> &dyn GameInfo;

    /// Name of the active profile
    fn profile_name(&self) -> String;

    /// Absolute path of the active profile
    fn profile_path(&self) -> PathBuf;

    /// Absolute path of the download directory
    fn downloads_path(&self) -> PathBuf;

    /// Version of the running host application
    fn app_version(&self) -> VersionInfo;

    /// The mod called `name`, if one is installed
    fn get_mod(&self, name: &str) -> Option<ModRef>;

    /// Create a new, empty mod
    ///
    /// # Errors
    ///
    /// [`HostError::ModExists`] if the name is taken; check with
    /// [`get_mod`](Self::get_mod) first.
    fn create_mod(&self, name: &str) -> Result<ModRef, HostError>;

    /// Remove a mod from disk and from the mod list
    fn remove_mod(&self, handle: &dyn ModHandle) -> Result<(), HostError>;

    /// Tell the host that the contents of a mod changed
    fn mod_data_changed(&self, handle: &dyn ModHandle);

    /// Value of a setting declared by a plugin
    ///
    /// # Errors
    ///
    /// [`HostError::UndeclaredSetting`] if the plugin never declared `key`.
    fn plugin_setting(&self, plugin: &str, key: &str) -> Result<serde_json::Value, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entry, Level, Logger};
    use crate::sinks::{Callback, ConsoleSink};
    use parking_lot::{Mutex, RwLock};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    struct TestGame {
        dir: PathBuf,
    }

    impl GameInfo for TestGame {
        fn name(&self) -> &str {
            "Test Game"
        }

        fn game_directory(&self) -> &Path {
            &self.dir
        }
    }

    struct TestMod {
        name: String,
        root: PathBuf,
        version: RwLock<VersionInfo>,
    }

    impl ModHandle for TestMod {
        fn name(&self) -> &str {
            &self.name
        }

        fn absolute_path(&self) -> PathBuf {
            self.root.join(&self.name)
        }

        fn version(&self) -> VersionInfo {
            *self.version.read()
        }

        fn set_version(&self, version: VersionInfo) {
            *self.version.write() = version;
        }
    }

    /// In-memory host that reports its activity through a logger
    struct TestOrganizer {
        game: TestGame,
        mods: Mutex<HashMap<String, ModRef>>,
        settings: HashMap<(String, String), Value>,
        changed: Mutex<Vec<String>>,
        logger: Logger,
    }

    impl TestOrganizer {
        fn new(logger: Logger) -> Self {
            let mut settings = HashMap::new();
            settings.insert(("checker".to_string(), "enabled".to_string()), json!(true));
            Self {
                game: TestGame {
                    dir: PathBuf::from("/games/test"),
                },
                mods: Mutex::new(HashMap::new()),
                settings,
                changed: Mutex::new(Vec::new()),
                logger,
            }
        }
    }

    impl Organizer for TestOrganizer {
        fn game_info(&self) -> &dyn GameInfo {
            &self.game
        }

        fn profile_name(&self) -> String {
            "Default".to_string()
        }

        fn profile_path(&self) -> PathBuf {
            PathBuf::from("/profiles/Default")
        }

        fn downloads_path(&self) -> PathBuf {
            PathBuf::from("/downloads")
        }

        fn app_version(&self) -> VersionInfo {
            VersionInfo::new(2, 5, 0)
        }

        fn get_mod(&self, name: &str) -> Option<ModRef> {
            self.mods.lock().get(name).cloned()
        }

        fn create_mod(&self, name: &str) -> Result<ModRef, HostError> {
            let mut mods = self.mods.lock();
            if mods.contains_key(name) {
                self.logger.warn(format!("refusing to overwrite mod '{}'", name));
                return Err(HostError::ModExists(name.to_string()));
            }
            let handle: ModRef = Arc::new(TestMod {
                name: name.to_string(),
                root: PathBuf::from("/mods"),
                version: RwLock::new(VersionInfo::default()),
            });
            mods.insert(name.to_string(), Arc::clone(&handle));
            self.logger.info(format!("created mod '{}'", name));
            Ok(handle)
        }

        fn remove_mod(&self, handle: &dyn ModHandle) -> Result<(), HostError> {
            self.mods
                .lock()
                .remove(handle.name())
                .map(|_| ())
                .ok_or_else(|| HostError::ModNotFound(handle.name().to_string()))
        }

        fn mod_data_changed(&self, handle: &dyn ModHandle) {
            self.changed.lock().push(handle.name().to_string());
        }

        fn plugin_setting(&self, plugin: &str, key: &str) -> Result<Value, HostError> {
            self.settings
                .get(&(plugin.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| HostError::undeclared_setting(plugin, key))
        }
    }

    fn organizer() -> (TestOrganizer, Arc<Mutex<Vec<Entry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let target = Arc::clone(&entries);
        let callback: Callback = Arc::new(move |e: Entry| target.lock().push(e));
        let logger = Logger::builder("host")
            .console(ConsoleSink::with_writer(std::io::sink()))
            .pattern("%v")
            .callback(callback)
            .build()
            .unwrap();
        (TestOrganizer::new(logger), entries)
    }

    #[test]
    fn test_session_information() {
        let (host, _) = organizer();
        let host: &dyn Organizer = &host;

        assert_eq!(host.game_info().name(), "Test Game");
        assert_eq!(host.game_info().data_directory(), PathBuf::from("/games/test/data"));
        assert_eq!(host.profile_name(), "Default");
        assert!(host.app_version() > "2.4.9".parse::<VersionInfo>().unwrap());
    }

    #[test]
    fn test_create_mod_rejects_duplicates() {
        let (host, entries) = organizer();

        let created = host.create_mod("Better Trees").unwrap();
        assert_eq!(created.absolute_path(), PathBuf::from("/mods/Better Trees"));
        assert!(matches!(
            host.create_mod("Better Trees"),
            Err(HostError::ModExists(name)) if name == "Better Trees"
        ));

        let entries = entries.lock();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].level, Level::Warning);
    }

    #[test]
    fn test_mod_lifecycle() {
        let (host, _) = organizer();
        let handle = host.create_mod("Patch").unwrap();

        handle.set_version(VersionInfo::new(1, 2, 0));
        host.mod_data_changed(handle.as_ref());
        assert_eq!(host.get_mod("Patch").unwrap().version(), VersionInfo::new(1, 2, 0));
        assert_eq!(*host.changed.lock(), vec!["Patch"]);

        host.remove_mod(handle.as_ref()).unwrap();
        assert!(host.get_mod("Patch").is_none());
        assert!(matches!(
            host.remove_mod(handle.as_ref()),
            Err(HostError::ModNotFound(_))
        ));
    }

    #[test]
    fn test_plugin_setting() {
        let (host, _) = organizer();
        assert_eq!(host.plugin_setting("checker", "enabled").unwrap(), json!(true));

        let err = host.plugin_setting("checker", "missing").unwrap_err();
        assert_eq!(err.to_string(), "plugin 'checker' has no setting 'missing'");
    }
}
