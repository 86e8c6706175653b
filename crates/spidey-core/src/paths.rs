//! Common filesystem paths used by spidey.

use std::path::PathBuf;

/// Base directory for spidey state (currently just the config file).
///
/// Defaults to `$XDG_CONFIG_HOME/spidey` or `~/.config/spidey`, but can be
/// overridden via `SPIDEY_DIR` for testing or multi-instance setups.
pub fn spidey_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SPIDEY_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("spidey");
        }
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config").join("spidey")
}

/// Path to the spidey configuration file.
pub fn config_path() -> PathBuf {
    spidey_dir().join("config.toml")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock, PoisonError};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spidey_dir_honours_override() {
        let _lock = test_env_lock();
        std::env::set_var("SPIDEY_DIR", "/tmp/spidey-test-dir");

        assert_eq!(spidey_dir(), PathBuf::from("/tmp/spidey-test-dir"));
        assert_eq!(
            config_path(),
            PathBuf::from("/tmp/spidey-test-dir/config.toml")
        );

        std::env::remove_var("SPIDEY_DIR");
    }
}
