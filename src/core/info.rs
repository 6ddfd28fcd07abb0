//! INFO field parsing
//!
//! Tokenizes the semicolon-delimited annotation column of a VCF line into
//! a key → value map. Keys are never validated; unknown keys are kept as
//! opaque strings.

use std::collections::HashMap;

/// Value of a single INFO entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    /// `KEY=value`
    Value(String),
    /// Bare `KEY` with no `=`
    Flag,
}

impl InfoValue {
    /// String value, `None` for flags
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Value(v) => Some(v),
            InfoValue::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, InfoValue::Flag)
    }
}

/// Parsed INFO column of one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoMap {
    entries: HashMap<String, InfoValue>,
}

impl InfoMap {
    /// Raw entry for `key`
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.get(key)
    }

    /// String value for `key`; flags and missing keys both yield `None`
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(InfoValue::as_str)
    }

    /// String value for `key`, or `""`
    pub fn value_or_empty(&self, key: &str) -> &str {
        self.value(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse an INFO blob such as `RS=123;CLNSIG=Pathogenic;DB`
///
/// Splits on `;`, then on the first `=` of each token. Tokens without `=`
/// become flags. Empty tokens from doubled or trailing separators are
/// ignored.
///
/// # Examples
/// ```
/// use clinvar_report::core::info::{parse_info, InfoValue};
///
/// let info = parse_info("RS=80357906;CLNSIG=Pathogenic;DB");
/// assert_eq!(info.value("RS"), Some("80357906"));
/// assert_eq!(info.get("DB"), Some(&InfoValue::Flag));
/// ```
pub fn parse_info(blob: &str) -> InfoMap {
    let mut entries = HashMap::new();

    for token in blob.split(';') {
        if token.is_empty() {
            continue;
        }
        match token.split_once('=') {
            Some((key, value)) => {
                entries.insert(key.to_string(), InfoValue::Value(value.to_string()));
            }
            None => {
                entries.insert(token.to_string(), InfoValue::Flag);
            }
        }
    }

    InfoMap { entries }
}
