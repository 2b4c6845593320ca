//! User settings.
//!
//! Stored as one JSON document under [`crate::storage::SETTINGS_KEY`].
//! Every field has a default, so a stored document missing some keys (for
//! example one written by an older version) is merged over the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest accepted session length: one day.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Dark,
}

/// What happens to the weekly counters when a new week starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekRollover {
    /// Weekly counters accumulate forever.
    #[default]
    Never,
    /// Weekly counters restart on the first completion of a new
    /// Sunday-started week.
    Calendar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub auto_start_break: bool,
    pub auto_start_focus: bool,
    pub sound_enabled: bool,
    pub desktop_notify: bool,
    pub show_companion: bool,
    pub theme: Theme,
    pub volume: u8,
    pub week_rollover: WeekRollover,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            auto_start_break: false,
            auto_start_focus: false,
            sound_enabled: true,
            desktop_notify: false,
            show_companion: true,
            theme: Theme::Blue,
            volume: 50,
            week_rollover: WeekRollover::Never,
        }
    }
}

/// Partial settings update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub focus_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
    pub auto_start_break: Option<bool>,
    pub auto_start_focus: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub desktop_notify: Option<bool>,
    pub show_companion: Option<bool>,
    pub theme: Option<Theme>,
    pub volume: Option<u8>,
    pub week_rollover: Option<WeekRollover>,
}

/// A patch that overwrites every field.
impl From<Settings> for SettingsPatch {
    fn from(s: Settings) -> Self {
        Self {
            focus_minutes: Some(s.focus_minutes),
            break_minutes: Some(s.break_minutes),
            auto_start_break: Some(s.auto_start_break),
            auto_start_focus: Some(s.auto_start_focus),
            sound_enabled: Some(s.sound_enabled),
            desktop_notify: Some(s.desktop_notify),
            show_companion: Some(s.show_companion),
            theme: Some(s.theme),
            volume: Some(s.volume),
            week_rollover: Some(s.week_rollover),
        }
    }
}

pub(crate) fn validate_minutes(field: &str, minutes: u32) -> Result<(), ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::invalid(field, "must be at least 1 minute"));
    }
    if minutes > MAX_SESSION_MINUTES {
        return Err(ValidationError::invalid(
            field,
            format!("must be at most {MAX_SESSION_MINUTES} minutes"),
        ));
    }
    Ok(())
}

impl Settings {
    /// Check every range-restricted field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_minutes("focusMinutes", self.focus_minutes)?;
        validate_minutes("breakMinutes", self.break_minutes)?;
        if self.volume > MAX_VOLUME {
            return Err(ValidationError::invalid(
                "volume",
                format!("must be between 0 and {MAX_VOLUME}"),
            ));
        }
        Ok(())
    }

    /// Apply `patch` to a copy and validate the result.
    ///
    /// `self` is untouched either way, so a rejected patch leaves the
    /// previous settings in effect.
    pub fn patched(&self, patch: &SettingsPatch) -> Result<Settings, ValidationError> {
        let mut next = self.clone();
        if let Some(v) = patch.focus_minutes {
            next.focus_minutes = v;
        }
        if let Some(v) = patch.break_minutes {
            next.break_minutes = v;
        }
        if let Some(v) = patch.auto_start_break {
            next.auto_start_break = v;
        }
        if let Some(v) = patch.auto_start_focus {
            next.auto_start_focus = v;
        }
        if let Some(v) = patch.sound_enabled {
            next.sound_enabled = v;
        }
        if let Some(v) = patch.desktop_notify {
            next.desktop_notify = v;
        }
        if let Some(v) = patch.show_companion {
            next.show_companion = v;
        }
        if let Some(v) = patch.theme {
            next.theme = v;
        }
        if let Some(v) = patch.volume {
            next.volume = v;
        }
        if let Some(v) = patch.week_rollover {
            next.week_rollover = v;
        }
        next.validate()?;
        Ok(next)
    }

    /// Get a setting as a string. Accepts camelCase or snake_case keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(normalize_key(key).as_str())? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Build a patch that sets `key` to the parsed `value`.
    ///
    /// The value is parsed according to the type of the existing field, so
    /// `"true"` sets a flag and `"30"` sets a duration.
    pub fn patch_for(&self, key: &str, value: &str) -> Result<SettingsPatch, ValidationError> {
        let key = normalize_key(key);
        let current = serde_json::to_value(self)
            .map_err(|e| ValidationError::invalid(&key, e.to_string()))?;
        let existing = current
            .get(key.as_str())
            .ok_or_else(|| ValidationError::UnknownKey(key.clone()))?;

        let parsed = match existing {
            serde_json::Value::Bool(_) => value
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|_| ValidationError::invalid(&key, format!("cannot parse '{value}' as bool")))?,
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| {
                    ValidationError::invalid(&key, format!("cannot parse '{value}' as number"))
                })?,
            _ => serde_json::Value::String(value.to_string()),
        };

        let mut patch = serde_json::Map::new();
        patch.insert(key.clone(), parsed);
        serde_json::from_value(serde_json::Value::Object(patch))
            .map_err(|e| ValidationError::invalid(&key, e.to_string()))
    }

    /// All keys accepted by [`Settings::get`] and [`Settings::patch_for`].
    pub fn keys() -> Vec<String> {
        match serde_json::to_value(Settings::default()) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' || c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let s = Settings::default();
        assert_eq!(s.focus_minutes, 25);
        assert_eq!(s.break_minutes, 5);
        assert!(!s.auto_start_break);
        assert!(s.sound_enabled);
        assert!(s.show_companion);
        assert_eq!(s.theme, Theme::Blue);
        assert_eq!(s.volume, 50);
        assert_eq!(s.week_rollover, WeekRollover::Never);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str(r#"{"focusMinutes": 50, "theme": "dark"}"#).unwrap();
        assert_eq!(s.focus_minutes, 50);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.break_minutes, 5);
        assert_eq!(s.volume, 50);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["focusMinutes"], 25);
        assert_eq!(json["autoStartBreak"], false);
        assert_eq!(json["weekRollover"], "never");
    }

    #[test]
    fn patch_applies_only_given_fields() {
        let s = Settings::default();
        let patch = SettingsPatch {
            break_minutes: Some(10),
            auto_start_focus: Some(true),
            ..Default::default()
        };
        let next = s.patched(&patch).unwrap();
        assert_eq!(next.break_minutes, 10);
        assert!(next.auto_start_focus);
        assert_eq!(next.focus_minutes, 25);
    }

    #[test]
    fn patch_rejects_zero_duration() {
        let s = Settings::default();
        let patch = SettingsPatch {
            focus_minutes: Some(0),
            ..Default::default()
        };
        let err = s.patched(&patch).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "focusMinutes"));
    }

    #[test]
    fn patch_rejects_loud_volume() {
        let patch = SettingsPatch {
            volume: Some(101),
            ..Default::default()
        };
        assert!(Settings::default().patched(&patch).is_err());
    }

    #[test]
    fn get_accepts_both_key_styles() {
        let s = Settings::default();
        assert_eq!(s.get("focusMinutes").as_deref(), Some("25"));
        assert_eq!(s.get("focus_minutes").as_deref(), Some("25"));
        assert_eq!(s.get("theme").as_deref(), Some("blue"));
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn patch_for_parses_by_field_type() {
        let s = Settings::default();
        assert_eq!(
            s.patch_for("auto_start_break", "true").unwrap().auto_start_break,
            Some(true)
        );
        assert_eq!(s.patch_for("volume", "75").unwrap().volume, Some(75));
        assert_eq!(s.patch_for("theme", "green").unwrap().theme, Some(Theme::Green));
    }

    #[test]
    fn patch_for_rejects_bad_input() {
        let s = Settings::default();
        assert_eq!(
            s.patch_for("nope", "1").unwrap_err(),
            ValidationError::UnknownKey("nope".into())
        );
        assert!(s.patch_for("soundEnabled", "maybe").is_err());
        assert!(s.patch_for("theme", "neon").is_err());
        assert!(s.patch_for("volume", "300").is_err());
    }

    #[test]
    fn full_patch_restores_defaults() {
        let custom = Settings {
            focus_minutes: 50,
            theme: Theme::Orange,
            volume: 5,
            ..Default::default()
        };
        let restored = custom.patched(&SettingsPatch::from(Settings::default())).unwrap();
        assert_eq!(restored, Settings::default());
    }

    #[test]
    fn keys_lists_every_field() {
        let keys = Settings::keys();
        assert_eq!(keys.len(), 10);
        assert!(keys.contains(&"showCompanion".to_string()));
    }
}
