use std::path::Path;

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config;

/// User-facing configuration persisted as a flat JSON document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Settings {
    pub base_speed: f64,
    pub ball_size: u32,
    pub show_trail: bool,
    pub show_scanlines: bool,
    pub canvas_w: u32,
    pub canvas_h: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_speed: config::DEFAULT_BASE_SPEED,
            ball_size: config::DEFAULT_BALL_SIZE,
            show_trail: true,
            show_scanlines: true,
            canvas_w: config::DEFAULT_CANVAS_W,
            canvas_h: config::DEFAULT_CANVAS_H,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings document is not a JSON object")]
    NotAnObject,
}

fn float_field(doc: &Map<String, Value>, key: &str, fallback: f64) -> f64 {
    match doc.get(key) {
        None => fallback,
        Some(v) => match v.as_f64().filter(|f| f.is_finite()) {
            Some(f) => f,
            None => {
                warn!("settings: `{key}` is not a number ({v}), keeping {fallback}");
                fallback
            }
        },
    }
}

fn int_field(doc: &Map<String, Value>, key: &str, fallback: u32) -> u32 {
    let Some(v) = doc.get(key) else {
        return fallback;
    };
    let parsed = v
        .as_i64()
        .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
    match parsed {
        Some(n) if n >= 1 => n.min(u32::MAX as i64) as u32,
        Some(n) => {
            warn!("settings: `{key}` = {n} is not a valid dimension, clamping to 1");
            1
        }
        None => {
            warn!("settings: `{key}` is not an integer ({v}), keeping {fallback}");
            fallback
        }
    }
}

fn bool_field(doc: &Map<String, Value>, key: &str, fallback: bool) -> bool {
    match doc.get(key) {
        None => fallback,
        Some(Value::Bool(b)) => *b,
        Some(v) => {
            warn!("settings: `{key}` is not a boolean ({v}), keeping {fallback}");
            fallback
        }
    }
}

impl Settings {
    /// Read each known key independently; anything missing or mistyped keeps
    /// the value from `current`. Unknown keys are ignored.
    pub fn merge_document(doc: &Map<String, Value>, current: &Settings) -> Settings {
        Settings {
            base_speed: float_field(doc, "base_speed", current.base_speed),
            ball_size: int_field(doc, "ball_size", current.ball_size),
            show_trail: bool_field(doc, "show_trail", current.show_trail),
            show_scanlines: bool_field(doc, "show_scanlines", current.show_scanlines),
            canvas_w: int_field(doc, "canvas_w", current.canvas_w),
            canvas_h: int_field(doc, "canvas_h", current.canvas_h),
        }
    }

    pub fn from_json_str(text: &str, current: &Settings) -> Result<Settings, SettingsError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(doc) => Ok(Self::merge_document(&doc, current)),
            _ => Err(SettingsError::NotAnObject),
        }
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Save settings as pretty-printed JSON.
pub fn save_to_file(settings: &Settings, path: impl AsRef<Path>) -> Result<(), SettingsError> {
    std::fs::write(path, settings.to_json_string()?)?;
    Ok(())
}

/// Load settings, falling back to `current` field by field.
pub fn load_from_file(path: impl AsRef<Path>, current: &Settings) -> Result<Settings, SettingsError> {
    let text = std::fs::read_to_string(path)?;
    Settings::from_json_str(&text, current)
}
