pub mod color;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use cwmaze::Algorithm;
use ron::{extensions::Extensions, ser::PrettyConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::{Color, ColorScheme};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("there is no preference directory on this system")]
    NoPreferenceDir,
    #[error("cannot access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_rows: Option<usize>,
    #[serde(default)]
    pub default_cols: Option<usize>,
    #[serde(default)]
    pub default_algorithm: Option<Algorithm>,
    #[serde(default)]
    pub replay_delay_ms: Option<u64>,
    #[serde(default)]
    pub strict_parsing: Option<bool>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    #[serde(default)]
    pub color_scheme: Option<ColorScheme>,
}

impl Settings {
    const DEFAULT_SIZE: usize = 8;
    const DEFAULT_DELAY_MS: u64 = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Fills every missing key with its default value.
    pub fn populate(mut self) -> Self {
        self.default_rows = Some(self.get_default_rows());
        self.default_cols = Some(self.get_default_cols());
        self.default_algorithm = Some(self.get_default_algorithm());
        self.replay_delay_ms = Some(self.get_replay_delay_ms());
        self.strict_parsing = Some(self.get_strict_parsing());
        self.log_level = Some(self.get_log_level());
        self.color_scheme = Some(self.get_color_scheme());

        self
    }

    pub fn set_default_rows(mut self, value: usize) -> Self {
        self.default_rows = Some(value);
        self
    }

    pub fn get_default_rows(&self) -> usize {
        self.default_rows.unwrap_or(Self::DEFAULT_SIZE)
    }

    pub fn set_default_cols(mut self, value: usize) -> Self {
        self.default_cols = Some(value);
        self
    }

    pub fn get_default_cols(&self) -> usize {
        self.default_cols.unwrap_or(Self::DEFAULT_SIZE)
    }

    pub fn set_default_algorithm(mut self, value: Algorithm) -> Self {
        self.default_algorithm = Some(value);
        self
    }

    pub fn get_default_algorithm(&self) -> Algorithm {
        self.default_algorithm.unwrap_or(Algorithm::BreadthFirst)
    }

    pub fn set_replay_delay_ms(mut self, value: u64) -> Self {
        self.replay_delay_ms = Some(value);
        self
    }

    pub fn get_replay_delay_ms(&self) -> u64 {
        self.replay_delay_ms.unwrap_or(Self::DEFAULT_DELAY_MS)
    }

    pub fn set_strict_parsing(mut self, value: bool) -> Self {
        self.strict_parsing = Some(value);
        self
    }

    pub fn get_strict_parsing(&self) -> bool {
        self.strict_parsing.unwrap_or_default()
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn set_color_scheme(mut self, value: ColorScheme) -> Self {
        self.color_scheme = Some(value);
        self
    }

    pub fn get_color_scheme(&self) -> ColorScheme {
        self.color_scheme.clone().unwrap_or_default()
    }

    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let base = dirs::preference_dir().ok_or(SettingsError::NoPreferenceDir)?;
        Ok(base.join("wmaze").join("settings.ron"))
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(text)
            .map_err(|source| SettingsError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Settings shipped with the binary.
    pub fn bundled() -> Result<Self, SettingsError> {
        Self::parse(DEFAULT_SETTINGS, Path::new("default_settings.ron"))
    }

    /// Reads the settings file, writing the bundled one first if there is none yet.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loading settings from {}", path.display());
                Self::parse(&text, path)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, writing defaults", path.display());
                Self::reset_config(path)?;
                Self::bundled()
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Overwrites the settings file with the bundled one.
    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        write_file(path, DEFAULT_SETTINGS)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = Self::options().to_string_pretty(self, PrettyConfig::default())?;
        write_file(path, &text)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wmaze-settings-{}-{}", name, std::process::id()))
            .join("settings.ron")
    }

    #[test]
    fn bundled_settings_are_complete() {
        let bundled = Settings::bundled().unwrap();
        assert_eq!(bundled, Settings::new().populate());
    }

    #[test]
    fn getters_fall_back_to_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.get_default_rows(), 8);
        assert_eq!(settings.get_default_algorithm(), Algorithm::BreadthFirst);
        assert_eq!(settings.get_log_level(), LogLevel::Warn);
        assert!(!settings.get_strict_parsing());

        let settings = settings
            .set_default_algorithm(Algorithm::DepthFirst)
            .set_strict_parsing(true);
        assert_eq!(settings.get_default_algorithm(), Algorithm::DepthFirst);
        assert!(settings.get_strict_parsing());
    }

    #[test]
    fn partial_file_keeps_missing_keys_empty() {
        let settings =
            Settings::parse("(default_rows: 3, log_level: Debug)", Path::new("x")).unwrap();
        assert_eq!(settings.default_rows, Some(3));
        assert_eq!(settings.default_cols, None);
        assert_eq!(settings.get_default_cols(), 8);
        assert_eq!(
            log::LevelFilter::from(settings.get_log_level()),
            log::LevelFilter::Debug
        );
    }

    #[test]
    fn missing_file_gets_written() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings, Settings::bundled().unwrap());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("save");
        let settings = Settings::new()
            .set_default_rows(12)
            .set_replay_delay_ms(5)
            .set_color_scheme(ColorScheme {
                walls: Color::Rgb(10, 20, 30),
                ..ColorScheme::default()
            });

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn broken_file_is_an_error() {
        let path = temp_path("broken");
        write_file(&path, "(default_rows: \"many\")").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "{err}");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
