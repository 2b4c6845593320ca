//! Export document: the full settings and statistics as one JSON file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::settings::Settings;
use crate::stats::Statistics;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub stats: Statistics,
}

impl ExportDocument {
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| CoreError::CorruptData {
            key: "export".into(),
            source,
        })
    }
}

/// `focusbuddy-data-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("focusbuddy-data-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert_eq!(export_file_name(date), "focusbuddy-data-2026-07-04.json");
    }

    #[test]
    fn document_has_two_top_level_keys() {
        let json = ExportDocument::default().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("settings"));
        assert!(obj.contains_key("stats"));
        assert!(json.contains('\n'), "expected pretty-printed output");
    }

    #[test]
    fn malformed_json_is_corrupt_data() {
        assert!(matches!(
            ExportDocument::from_json("{ not json"),
            Err(CoreError::CorruptData { .. })
        ));
    }
}
