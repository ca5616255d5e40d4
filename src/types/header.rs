//! Types for the key/value header of a Nanonis scan

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{LoadError, Result};
use crate::parser::{parse_leading_number, parse_number};

/// A single header value, shaped the way the backend recorded it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
    Column(Vec<String>),
    Table(BTreeMap<String, Vec<String>>),
}

/// Format-native header of a Nanonis scan: a string-keyed mapping with typed lookups.
///
/// Lookups never substitute defaults: an absent key is a [`LoadError::MissingField`], a value of
/// the wrong shape a [`LoadError::InvalidField`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NanonisHeader {
    entries: BTreeMap<String, HeaderValue>,
}

impl NanonisHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: HeaderValue) -> Option<HeaderValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn require(&self, key: &str) -> Result<&HeaderValue> {
        self.get(key).ok_or_else(|| LoadError::missing_field(key))
    }

    /// Look up a text value. A single-element column counts as text.
    pub fn text(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            HeaderValue::Text(text) => Ok(text.as_str()),
            HeaderValue::Column(column) if column.len() == 1 => Ok(column[0].as_str()),
            _ => Err(LoadError::invalid_field(key, "text")),
        }
    }

    /// Look up a scalar number. Text is accepted when its leading characters form a number,
    /// so both `1.0` and `"1V"` resolve to `1.0`.
    pub fn number(&self, key: &str) -> Result<f64> {
        match self.require(key)? {
            HeaderValue::Number(value) => Ok(*value),
            HeaderValue::Numbers(values) if values.len() == 1 => Ok(values[0]),
            HeaderValue::Text(text) => {
                parse_leading_number(text).ok_or_else(|| LoadError::UnitParse {
                    field: key.to_string(),
                    value: text.clone(),
                })
            }
            _ => Err(LoadError::invalid_field(key, "number")),
        }
    }

    /// Look up a scalar number. Text must be a number and nothing else, so `"30deg"` is a
    /// [`LoadError::UnitParse`].
    pub fn exact_number(&self, key: &str) -> Result<f64> {
        match self.require(key)? {
            HeaderValue::Number(value) => Ok(*value),
            HeaderValue::Numbers(values) if values.len() == 1 => Ok(values[0]),
            HeaderValue::Text(text) => parse_number(text).ok_or_else(|| LoadError::UnitParse {
                field: key.to_string(),
                value: text.clone(),
            }),
            _ => Err(LoadError::invalid_field(key, "number")),
        }
    }

    /// Look up element `index` of a numeric list
    pub fn number_at(&self, key: &str, index: usize) -> Result<f64> {
        match self.require(key)? {
            HeaderValue::Numbers(values) => values
                .get(index)
                .copied()
                .ok_or_else(|| LoadError::missing_field(format!("{key}[{index}]"))),
            _ => Err(LoadError::invalid_field(key, "list of numbers")),
        }
    }

    /// Look up element `index` of a numeric list as a pixel count
    pub fn count_at(&self, key: &str, index: usize) -> Result<usize> {
        let value = self.number_at(key, index)?;
        if value >= 0.0 && value.fract() == 0.0 {
            Ok(value as usize)
        } else {
            Err(LoadError::invalid_field(
                format!("{key}[{index}]"),
                "non-negative integer",
            ))
        }
    }

    /// Look up a column of strings. Plain text counts as a column of one.
    pub fn column(&self, key: &str) -> Result<Vec<&str>> {
        match self.require(key)? {
            HeaderValue::Column(column) => Ok(column.iter().map(String::as_str).collect_vec()),
            HeaderValue::Text(text) => Ok(vec![text.as_str()]),
            _ => Err(LoadError::invalid_field(key, "column of text")),
        }
    }

    /// Look up a table of named columns
    pub fn table(&self, key: &str) -> Result<&BTreeMap<String, Vec<String>>> {
        match self.require(key)? {
            HeaderValue::Table(table) => Ok(table),
            _ => Err(LoadError::invalid_field(key, "table")),
        }
    }
}

impl FromIterator<(String, HeaderValue)> for NanonisHeader {
    fn from_iter<T: IntoIterator<Item = (String, HeaderValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> NanonisHeader {
        [
            ("scan_dir".to_string(), HeaderValue::Text("up".into())),
            ("scan_range".to_string(), HeaderValue::Numbers(vec![20.0, 10.0])),
            ("scan_pixels".to_string(), HeaderValue::Numbers(vec![256.0, 128.0])),
            ("bias".to_string(), HeaderValue::Text("1V".into())),
            ("scan_angle".to_string(), HeaderValue::Text("0.000E+0".into())),
            ("Setpoint".to_string(), HeaderValue::Column(vec!["100 pA".into()])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_typed_lookups() {
        let header = sample_header();
        assert_eq!(header.text("scan_dir").unwrap(), "up");
        assert_eq!(header.number_at("scan_range", 1).unwrap(), 10.0);
        assert_eq!(header.count_at("scan_pixels", 0).unwrap(), 256);
        assert_eq!(header.number("bias").unwrap(), 1.0);
        assert_eq!(header.number("scan_angle").unwrap(), 0.0);
        assert_eq!(header.column("Setpoint").unwrap(), vec!["100 pA"]);
        assert_eq!(header.text("Setpoint").unwrap(), "100 pA");
    }

    #[test]
    fn test_exact_number_rejects_units() {
        let mut header = sample_header();
        assert_eq!(header.exact_number("scan_angle").unwrap(), 0.0);
        assert!(matches!(
            header.exact_number("bias"),
            Err(LoadError::UnitParse { .. })
        ));

        header.insert("scan_angle", HeaderValue::Text("30deg".into()));
        match header.exact_number("scan_angle") {
            Err(LoadError::UnitParse { field, value }) => {
                assert_eq!(field, "scan_angle");
                assert_eq!(value, "30deg");
            }
            other => panic!("expected UnitParse, got {other:?}"),
        }
        assert_eq!(header.number("scan_angle").unwrap(), 30.0);
    }

    #[test]
    fn test_missing_key_is_reported() {
        let header = sample_header();
        match header.text("scan_offset") {
            Err(LoadError::MissingField { field }) => assert_eq!(field, "scan_offset"),
            other => panic!("expected MissingField, got {other:?}"),
        }
        assert!(matches!(
            header.number_at("scan_range", 2),
            Err(LoadError::MissingField { .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_reported() {
        let header = sample_header();
        assert!(matches!(
            header.number_at("scan_dir", 0),
            Err(LoadError::InvalidField { .. })
        ));
        assert!(matches!(
            header.table("scan_range"),
            Err(LoadError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_fractional_pixel_count_rejected() {
        let mut header = NanonisHeader::new();
        header.insert("scan_pixels", HeaderValue::Numbers(vec![12.5, 3.0]));
        assert!(header.count_at("scan_pixels", 0).is_err());
        assert_eq!(header.count_at("scan_pixels", 1).unwrap(), 3);
    }

    #[test]
    fn test_serializes_as_plain_mapping() -> std::result::Result<(), serde_json::Error> {
        let mut header = NanonisHeader::new();
        header.insert("scan_dir", HeaderValue::Text("down".into()));
        header.insert("bias", HeaderValue::Number(0.5));
        let json = serde_json::to_value(&header)?;
        assert_eq!(json, serde_json::json!({"bias": 0.5, "scan_dir": "down"}));
        Ok(())
    }
}
