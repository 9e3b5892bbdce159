//=========================================================================
// Configuration
//=========================================================================
//
// Tuning parameters loaded from `autobus.toml`. Every section falls back
// to built-in defaults, so a partial file only overrides what it names.
//
// Flow:
//   Config::load_or_default(path)
//     ├─ file missing  → Config::default()
//     └─ file present  → toml::from_str() → validate()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::bus::Timing;
use crate::core::input::KeyCode;
use crate::core::route::{Route, Vec2};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "autobus.toml";

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== Config ==============================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for the path wiggle and inspection draws.
    pub seed: u64,
    pub window: WindowConfig,
    pub route: RouteConfig,
    pub timing: TimingConfig,
    pub passengers: PassengerConfig,
    pub input: InputConfig,
    pub assets: AssetConfig,
}

/// Window surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// RGBA clear colour.
    pub background: [f32; 4],
}

/// Station layout and path wiggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub stations: usize,
    pub center: [f32; 2],
    pub radius_x: f32,
    pub radius_y: f32,
    /// Interior points per segment of the drawn path.
    pub wiggle_samples: usize,
    /// Maximum sideways displacement of an interior point.
    pub wiggle_amplitude: f32,
}

/// Phase durations, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub dwell_seconds: f32,
    pub travel_seconds: f32,
    /// Upper bound on a single frame's delta time.
    pub max_frame_delta: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerConfig {
    pub capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key that starts a ticket inspection (e.g. `"K"`, `"Space"`).
    pub inspect_key: String,
}

/// Shader sources (required) and textures (optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub textured_vertex: PathBuf,
    pub textured_fragment: PathBuf,
    pub flat_vertex: PathBuf,
    pub flat_fragment: PathBuf,
    pub bus_texture: PathBuf,
    pub station_texture: PathBuf,
    pub boarding_icon: PathBuf,
    pub inspection_icon: PathBuf,
    pub controls_icon: PathBuf,
}

//--- Defaults ------------------------------------------------------------

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 42,
            window: WindowConfig::default(),
            route: RouteConfig::default(),
            timing: TimingConfig::default(),
            passengers: PassengerConfig::default(),
            input: InputConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Autobus".to_string(),
            width: 800,
            height: 600,
            background: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            stations: 10,
            center: [0.0, 0.0],
            radius_x: 0.75,
            radius_y: 0.6,
            wiggle_samples: 8,
            wiggle_amplitude: 0.03,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dwell_seconds: 10.0,
            travel_seconds: 5.0,
            max_frame_delta: 0.25,
        }
    }
}

impl Default for PassengerConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            inspect_key: "K".to_string(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            textured_vertex: "assets/shaders/textured.vert".into(),
            textured_fragment: "assets/shaders/textured.frag".into(),
            flat_vertex: "assets/shaders/flat.vert".into(),
            flat_fragment: "assets/shaders/flat.frag".into(),
            bus_texture: "assets/textures/bus.png".into(),
            station_texture: "assets/textures/station.png".into(),
            boarding_icon: "assets/textures/boarding.png".into(),
            inspection_icon: "assets/textures/inspection.png".into(),
            controls_icon: "assets/textures/controls.png".into(),
        }
    }
}

//--- Loading -------------------------------------------------------------

impl Config {
    /// Reads, parses and validates the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)))
            }
        }

        if self.route.stations < 2 {
            return Err(ConfigError::Invalid(format!(
                "route.stations must be at least 2, got {}",
                self.route.stations
            )));
        }
        positive("route.radius_x", self.route.radius_x)?;
        positive("route.radius_y", self.route.radius_y)?;
        if !self.route.wiggle_amplitude.is_finite() || self.route.wiggle_amplitude < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "route.wiggle_amplitude must be non-negative, got {}",
                self.route.wiggle_amplitude
            )));
        }

        positive("timing.dwell_seconds", self.timing.dwell_seconds)?;
        positive("timing.travel_seconds", self.timing.travel_seconds)?;
        positive("timing.max_frame_delta", self.timing.max_frame_delta)?;

        if self.passengers.capacity < 0 {
            return Err(ConfigError::Invalid(format!(
                "passengers.capacity must be non-negative, got {}",
                self.passengers.capacity
            )));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }

        self.inspect_key()?;
        Ok(())
    }

    //--- Derived Values ---------------------------------------------------

    /// Parsed inspection key binding.
    ///
    /// `Escape` is reserved for closing the window.
    pub fn inspect_key(&self) -> Result<KeyCode, ConfigError> {
        match KeyCode::from_name(&self.input.inspect_key) {
            Some(KeyCode::Escape) => Err(ConfigError::Invalid(
                "input.inspect_key cannot be Escape (closes the window)".to_string(),
            )),
            Some(key) => Ok(key),
            None => Err(ConfigError::Invalid(format!(
                "unknown input.inspect_key {:?}",
                self.input.inspect_key
            ))),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            dwell: self.timing.dwell_seconds,
            travel: self.timing.travel_seconds,
        }
    }

    pub fn build_route(&self) -> Route {
        Route::ellipse(
            self.route.stations,
            Vec2::from(self.route.center),
            self.route.radius_x,
            self.route.radius_y,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("autobus.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    //=====================================================================
    // Defaults
    //=====================================================================

    #[test]
    fn defaults_match_the_stock_route() {
        let config = Config::default();
        assert_eq!(config.route.stations, 10);
        assert_eq!(config.timing.dwell_seconds, 10.0);
        assert_eq!(config.timing.travel_seconds, 5.0);
        assert_eq!(config.passengers.capacity, 50);
        assert_eq!(config.inspect_key().unwrap(), KeyCode::KeyK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_survive_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    //=====================================================================
    // Loading
    //=====================================================================

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "seed = 7\n\n[timing]\ndwell_seconds = 3.0\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.timing.dwell_seconds, 3.0);
        assert_eq!(config.timing.travel_seconds, 5.0);
        assert_eq!(config.route, RouteConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file_is_an_error_for_strict_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[timing\ndwell_seconds = ");
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    //=====================================================================
    // Validation
    //=====================================================================

    #[test]
    fn rejects_degenerate_values() {
        let mut config = Config::default();
        config.route.stations = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timing.travel_seconds = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timing.dwell_seconds = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.passengers.capacity = -1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.inspect_key = "F13".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.inspect_key = "Esc".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_file_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[route]\nstations = 0\n");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn build_route_uses_route_section() {
        let mut config = Config::default();
        config.route.stations = 6;
        let route = config.build_route();
        assert_eq!(route.len(), 6);
        assert_eq!(route.position(0), Vec2::new(0.75, 0.0));
    }
}
