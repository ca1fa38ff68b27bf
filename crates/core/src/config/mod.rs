use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{render::Color, Result, StarfieldError};

const SETTINGS_DIR: &str = "starfield";
const SETTINGS_FILE: &str = "settings.json";

const MIN_TIMER_FPS: u32 = 15;
const MAX_TIMER_FPS: u32 = 240;
const MIN_TIMER_INTERVAL_MS: u64 = 5;

/// Snapshot of every parameter that shapes the simulation and its rendering.
///
/// The engine treats a value as immutable; hosts swap in a new snapshot when
/// the user edits settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub star_count: usize,
    /// Depth units a star travels towards the viewer per second.
    pub warp_speed: f32,
    /// Scale applied to lateral offsets after the perspective divide.
    pub field_of_view: f32,
    /// Half-width of the lateral spawn distribution.
    pub spread: f32,
    /// Far plane depth; recycled stars reappear here.
    pub max_depth: f32,
    pub draw_trails: bool,
    pub trail_thickness: f32,
    pub star_size_min: f32,
    pub star_size_max: f32,
    pub star_alpha_min: i32,
    pub star_alpha_max: i32,
    /// Antialiased drawing.
    pub smooth: bool,
    pub target_fps: u32,
    /// Pointer travel (in pixels) a windowed host tolerates before exiting.
    pub exit_mouse_move_threshold_px: i32,
    pub background_color: Color,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 800,
            warp_speed: 120.0,
            field_of_view: 500.0,
            spread: 350.0,
            max_depth: 220.0,
            draw_trails: true,
            trail_thickness: 1.0,
            star_size_min: 1.0,
            star_size_max: 3.2,
            star_alpha_min: 40,
            star_alpha_max: 255,
            smooth: false,
            target_fps: 60,
            exit_mouse_move_threshold_px: 12,
            background_color: Color::BLACK,
        }
    }
}

impl StarfieldConfig {
    /// Location of the persisted settings document, if the platform exposes a
    /// local data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Loads the settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no local data directory available, using default settings");
                Self::default()
            }
        }
    }

    /// Loads the settings stored at `path`. A missing or unreadable document
    /// yields the default configuration.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// Strict variant of [`StarfieldConfig::load_from`] that reports failures.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Persists the settings to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or("no local data directory available to store settings")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Writes the settings as pretty-printed JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Period of the host's frame timer for the configured target rate.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.target_fps.clamp(MIN_TIMER_FPS, MAX_TIMER_FPS) as u64;
        Duration::from_millis((1000 / fps).max(MIN_TIMER_INTERVAL_MS))
    }

    /// Assigns one editable setting from its textual form.
    ///
    /// Numeric values are clamped to the range the settings editor allows,
    /// so a persisted document never carries an out-of-range value.
    pub fn set_field(&mut self, field: SettingField, value: &str) -> Result<()> {
        match field {
            SettingField::StarCount => {
                self.star_count = parse::<usize>(field, value)?.clamp(100, 5000);
            }
            SettingField::WarpSpeed => self.warp_speed = parse_clamped(field, value, 10.0, 600.0)?,
            SettingField::FieldOfView => {
                self.field_of_view = parse_clamped(field, value, 100.0, 1500.0)?;
            }
            SettingField::Spread => self.spread = parse_clamped(field, value, 50.0, 2000.0)?,
            SettingField::MaxDepth => self.max_depth = parse_clamped(field, value, 50.0, 800.0)?,
            SettingField::DrawTrails => self.draw_trails = parse_flag(field, value)?,
            SettingField::TrailThickness => {
                self.trail_thickness = parse_clamped(field, value, 1.0, 6.0)?;
            }
            SettingField::Smooth => self.smooth = parse_flag(field, value)?,
            SettingField::TargetFps => {
                self.target_fps = parse::<u32>(field, value)?.clamp(MIN_TIMER_FPS, MAX_TIMER_FPS);
            }
        }
        Ok(())
    }
}

/// Settings exposed to the editor, addressed by their document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    StarCount,
    WarpSpeed,
    FieldOfView,
    Spread,
    MaxDepth,
    DrawTrails,
    TrailThickness,
    Smooth,
    TargetFps,
}

impl SettingField {
    pub const ALL: [SettingField; 9] = [
        SettingField::StarCount,
        SettingField::WarpSpeed,
        SettingField::FieldOfView,
        SettingField::Spread,
        SettingField::MaxDepth,
        SettingField::DrawTrails,
        SettingField::TrailThickness,
        SettingField::Smooth,
        SettingField::TargetFps,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SettingField::StarCount => "star_count",
            SettingField::WarpSpeed => "warp_speed",
            SettingField::FieldOfView => "field_of_view",
            SettingField::Spread => "spread",
            SettingField::MaxDepth => "max_depth",
            SettingField::DrawTrails => "draw_trails",
            SettingField::TrailThickness => "trail_thickness",
            SettingField::Smooth => "smooth",
            SettingField::TargetFps => "target_fps",
        }
    }
}

impl FromStr for SettingField {
    type Err = StarfieldError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().replace('-', "_");
        SettingField::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| StarfieldError::msg(format!("unknown setting `{s}`")))
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn parse<T: FromStr>(field: SettingField, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| StarfieldError::msg(format!("invalid value `{value}` for {field}")))
}

fn parse_clamped(field: SettingField, value: &str, min: f32, max: f32) -> Result<f32> {
    let parsed: f32 = parse(field, value)?;
    if parsed.is_nan() {
        return Err(StarfieldError::msg(format!("invalid value `{value}` for {field}")));
    }
    Ok(parsed.clamp(min, max))
}

fn parse_flag(field: SettingField, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(StarfieldError::msg(format!("invalid value `{value}` for {field}"))),
    }
}
