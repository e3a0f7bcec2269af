use delaycalc::config::{Settings, SettingsOverrides, ENV_PREFIX};
use delaycalc::convert::DisplayMode;
use delaycalc::Error;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

// Every load reads the process environment, so tests that touch it must not
// overlap with the others.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn env_key(name: &str) -> String {
    format!("{}_{}", ENV_PREFIX, name)
}

/// Sets `DELAYCALC_*` variables and removes them again on drop.
struct EnvVars(Vec<String>);

impl EnvVars {
    fn set(vars: &[(&str, &str)]) -> Self {
        let keys = vars
            .iter()
            .map(|(name, value)| {
                let key = env_key(name);
                std::env::set_var(&key, value);
                key
            })
            .collect();
        EnvVars(keys)
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.0 {
            std::env::remove_var(key);
        }
    }
}

fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults() {
    let _guard = env_lock();
    let settings = Settings::load(None, &SettingsOverrides::default()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.bpm, 120.0);
    assert_eq!(settings.unit, DisplayMode::Milliseconds);
    assert_eq!(settings.precision, 2);
}

#[test]
fn test_file_overrides_defaults() {
    let _guard = env_lock();
    let file = settings_file("bpm = 90.0\nunit = \"hz\"\nprecision = 3\n");
    let settings = Settings::load(Some(file.path()), &SettingsOverrides::default()).unwrap();
    assert_eq!(settings.bpm, 90.0);
    assert_eq!(settings.unit, DisplayMode::Hertz);
    assert_eq!(settings.precision, 3);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let _guard = env_lock();
    let file = settings_file("precision = 0\n");
    let settings = Settings::load(Some(file.path()), &SettingsOverrides::default()).unwrap();
    assert_eq!(settings.bpm, 120.0);
    assert_eq!(settings.precision, 0);
}

#[test]
fn test_command_line_wins_over_file() {
    let _guard = env_lock();
    let file = settings_file("bpm = 90.0\nunit = \"hz\"\n");
    let overrides = SettingsOverrides {
        bpm: Some(174.0),
        unit: Some(DisplayMode::Milliseconds),
        precision: None,
    };
    let settings = Settings::load(Some(file.path()), &overrides).unwrap();
    assert_eq!(settings.bpm, 174.0);
    assert_eq!(settings.unit, DisplayMode::Milliseconds);
    assert_eq!(settings.precision, 2);
}

#[test]
fn test_missing_file_is_an_error() {
    let _guard = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let result = Settings::load(Some(&path), &SettingsOverrides::default());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_unit_is_an_error() {
    let _guard = env_lock();
    let file = settings_file("unit = \"seconds\"\n");
    let result = Settings::load(Some(file.path()), &SettingsOverrides::default());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_session_from_settings() {
    let _guard = env_lock();
    let settings = Settings {
        bpm: 60.0,
        unit: DisplayMode::Hertz,
        precision: 1,
    };
    let session = settings.session().unwrap();
    assert_eq!(session.mode(), DisplayMode::Hertz);
    assert_eq!(session.precision(), 1);
    assert_eq!(session.table().rows[2].straight, 1.0);

    let bad = Settings {
        bpm: -1.0,
        ..settings
    };
    assert!(matches!(bad.session(), Err(Error::InvalidBpm(_))));
}

#[test]
fn test_environment_sits_between_file_and_command_line() {
    let _guard = env_lock();
    let file = settings_file("bpm = 90.0\nunit = \"ms\"\nprecision = 3\n");

    {
        let _env = EnvVars::set(&[("BPM", "100"), ("UNIT", "Hz")]);

        // env beats the file, the file still beats the defaults
        let settings = Settings::load(Some(file.path()), &SettingsOverrides::default()).unwrap();
        assert_eq!(settings.bpm, 100.0);
        assert_eq!(settings.unit, DisplayMode::Hertz);
        assert_eq!(settings.precision, 3);

        // the command line beats env
        let overrides = SettingsOverrides {
            bpm: Some(140.0),
            unit: None,
            precision: Some(4),
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.bpm, 140.0);
        assert_eq!(settings.unit, DisplayMode::Hertz);
        assert_eq!(settings.precision, 4);
    }

    let settings = Settings::load(Some(file.path()), &SettingsOverrides::default()).unwrap();
    assert_eq!(settings.bpm, 90.0);
    assert_eq!(settings.unit, DisplayMode::Milliseconds);
}

#[test]
fn test_environment_alone_over_defaults() {
    let _guard = env_lock();
    let _env = EnvVars::set(&[("BPM", "87.5"), ("UNIT", "hz"), ("PRECISION", "0")]);

    let settings = Settings::load(None, &SettingsOverrides::default()).unwrap();
    assert_eq!(settings.bpm, 87.5);
    assert_eq!(settings.unit, DisplayMode::Hertz);
    assert_eq!(settings.precision, 0);
}

#[test]
fn test_bad_environment_value_is_an_error() {
    let _guard = env_lock();
    let _env = EnvVars::set(&[("BPM", "fast")]);

    let result = Settings::load(None, &SettingsOverrides::default());
    assert!(matches!(result, Err(Error::Config(_))));
}
