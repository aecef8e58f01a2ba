//! Run configuration – reads/writes `sprinter.toml`.

use serde::{Deserialize, Serialize};
use sprinter_gait::{Direction, GaitParameters, GaitPreset};
use sprinter_types::SprinterError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Selected once at startup; immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Travel direction.
    #[serde(default)]
    pub direction: Direction,

    /// Named parameter set, used unless `[gait]` is given.
    #[serde(default)]
    pub preset: GaitPreset,

    /// Simulated basic time step in milliseconds.
    #[serde(default = "default_timestep_ms")]
    pub timestep_ms: u32,

    /// Simulated seconds to walk.  `0` runs until Ctrl-C.
    #[serde(default = "default_duration_s")]
    pub duration_s: f64,

    /// Full custom tuning; overrides `preset` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gait: Option<GaitParameters>,
}

fn default_timestep_ms() -> u32 {
    20
}
fn default_duration_s() -> f64 {
    10.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            preset: GaitPreset::default(),
            timestep_ms: default_timestep_ms(),
            duration_s: default_duration_s(),
            gait: None,
        }
    }
}

impl Config {
    /// The parameters the run will use.
    pub fn gait_parameters(&self) -> GaitParameters {
        self.gait.unwrap_or_else(|| self.preset.params())
    }

    /// Reject values that would prevent the loop from starting.
    pub fn validate(&self) -> Result<(), SprinterError> {
        if self.timestep_ms == 0 {
            return Err(invalid("timestep_ms", "must be at least 1"));
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(invalid("duration_s", "must be finite and non-negative"));
        }
        self.gait_parameters().validate()
    }
}

fn invalid(field: &str, details: impl Into<String>) -> SprinterError {
    SprinterError::Configuration {
        field: field.to_string(),
        details: details.into(),
    }
}

/// Return the config path: `$SPRINTER_CONFIG`, or `./sprinter.toml`.
pub fn config_path() -> PathBuf {
    std::env::var("SPRINTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("sprinter.toml"))
}

/// Load the config from disk with environment overrides applied.
/// Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, SprinterError> {
    let mut cfg = load_from(&config_path())?;
    if let Some(cfg) = cfg.as_mut() {
        apply_env_overrides(cfg);
    }
    Ok(cfg)
}

/// Load the config from a specific path, without overrides.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, SprinterError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| invalid("config", format!("failed to read {}: {}", path.display(), e)))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| invalid("config", format!("failed to parse: {}", e)))?;
    Ok(Some(cfg))
}

/// Apply `SPRINTER_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `SPRINTER_DIRECTION` | `direction` |
/// | `SPRINTER_PRESET` | `preset` |
/// | `SPRINTER_DURATION` | `duration_s` |
/// | `SPRINTER_TIMESTEP_MS` | `timestep_ms` |
pub fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

/// Override logic behind [`apply_env_overrides`], with an injectable lookup.
/// Unparseable values are logged and ignored.
pub(crate) fn apply_overrides(cfg: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SPRINTER_DIRECTION") {
        match v.parse() {
            Ok(d) => cfg.direction = d,
            Err(e) => warn!(error = %e, "ignoring SPRINTER_DIRECTION"),
        }
    }
    if let Some(v) = lookup("SPRINTER_PRESET") {
        match v.parse() {
            Ok(p) => {
                cfg.preset = p;
                // An explicit preset wins over a custom [gait] table.
                cfg.gait = None;
            }
            Err(e) => warn!(error = %e, "ignoring SPRINTER_PRESET"),
        }
    }
    if let Some(v) = lookup("SPRINTER_DURATION")
        && let Ok(secs) = v.parse::<f64>()
    {
        cfg.duration_s = secs;
    }
    if let Some(v) = lookup("SPRINTER_TIMESTEP_MS")
        && let Ok(ms) = v.parse::<u32>()
    {
        cfg.timestep_ms = ms;
    }
}

/// Write `cfg` to `path`, creating parent directories if necessary.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), SprinterError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| invalid("config", format!("failed to create directory: {}", e)))?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| invalid("config", format!("failed to serialize: {}", e)))?;
    fs::write(path, raw)
        .map_err(|e| invalid("config", format!("failed to write {}: {}", path.display(), e)))
}
