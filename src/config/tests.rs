use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadenza-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_previous_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_volume = 80
previous_mode = "previous-track"
seek_step_seconds = 9
volume_step = 10

[audio]
position_interval_ms = 100
quit_fade_out_ms = 123

[ui]
header_text = "hello"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false

[logging]
level = "debug"
file = "/tmp/cadenza.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__PLAYBACK__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.initial_volume, 80);
    assert_eq!(s.playback.previous_mode, PreviousModeSetting::Navigate);
    assert_eq!(s.playback.seek_step_seconds, 9);
    assert_eq!(s.playback.volume_step, 10);
    assert_eq!(s.audio.position_interval_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/cadenza.log"))
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_volume = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__PLAYBACK__INITIAL_VOLUME", "65");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.initial_volume, 65);
}

#[test]
fn defaults_match_the_widget() {
    let s = Settings::default();
    assert_eq!(s.playback.initial_volume, 30);
    assert_eq!(s.playback.previous_mode, PreviousModeSetting::Restart);
    assert!(s.logging.file.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.position_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.logging.level = "loud".to_string();
    assert!(s.validate().is_err());
}
