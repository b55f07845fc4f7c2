//! Static reference tables.
//!
//! These are loaded once at startup (see `hsat-reference`) and passed by
//! reference into the stages that need them. Nothing mutates them after
//! loading.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The replacement for a raw survey code.
///
/// Recoding tables map codes either to labels (`1 -> "male"`) or to other
/// numbers (reverse-scored items, `1 -> 5`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappedValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl MappedValue {
    /// The numeric value, if this mapping target is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

impl fmt::Display for MappedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) if *v == 0.0 => f.write_str("0"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MappedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for MappedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MappedValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Column name -> (raw code -> replacement).
///
/// Raw codes are matched against a cell's canonical text form, so an integer
/// cell `2` and a float cell `2.0` both hit the key `"2"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMappings {
    columns: BTreeMap<String, BTreeMap<String, MappedValue>>,
}

impl ValueMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one `raw -> mapped` entry for `column`.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        raw: impl Into<String>,
        mapped: impl Into<MappedValue>,
    ) {
        self.columns
            .entry(column.into())
            .or_default()
            .insert(raw.into(), mapped.into());
    }

    /// Builder form of [`ValueMappings::insert`].
    #[must_use]
    pub fn with(
        mut self,
        column: impl Into<String>,
        raw: impl Into<String>,
        mapped: impl Into<MappedValue>,
    ) -> Self {
        self.insert(column, raw, mapped);
        self
    }

    pub fn column(&self, name: &str) -> Option<&BTreeMap<String, MappedValue>> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, MappedValue>)> {
        self.columns.iter().map(|(name, map)| (name.as_str(), map))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Question number -> question text.
///
/// Several variants of one question (`q4`, `q4r`, `q4r_dicho`) share the
/// text stored under their number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionTexts {
    texts: BTreeMap<u32, String>,
}

impl QuestionTexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: u32, text: impl Into<String>) {
        self.texts.insert(number, text.into());
    }

    #[must_use]
    pub fn with(mut self, number: u32, text: impl Into<String>) -> Self {
        self.insert(number, text);
        self
    }

    pub fn get(&self, number: u32) -> Option<&str> {
        self.texts.get(&number).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.texts.iter().map(|(number, text)| (*number, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl FromIterator<(u32, String)> for QuestionTexts {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            texts: iter.into_iter().collect(),
        }
    }
}

/// A hospital participating in the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub code: i64,
    pub name: String,
    pub district: Option<String>,
    pub ownership: Option<String>,
    pub size: Option<String>,
}

/// Hospital code -> hospital record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalDirectory {
    hospitals: BTreeMap<i64, Hospital>,
}

impl HospitalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hospital: Hospital) {
        self.hospitals.insert(hospital.code, hospital);
    }

    pub fn get(&self, code: i64) -> Option<&Hospital> {
        self.hospitals.get(&code)
    }

    /// Display name for a code, if the hospital is known.
    pub fn name_of(&self, code: i64) -> Option<&str> {
        self.get(code).map(|hospital| hospital.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hospital> {
        self.hospitals.values()
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

impl FromIterator<Hospital> for HospitalDirectory {
    fn from_iter<I: IntoIterator<Item = Hospital>>(iter: I) -> Self {
        let mut directory = Self::new();
        for hospital in iter {
            directory.insert(hospital);
        }
        directory
    }
}
