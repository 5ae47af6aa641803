//! Flat parameter mapping produced by serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Dotted wire key to wire string.
///
/// Keys are unique. Iteration is in key order so that rendering is stable, but
/// equality is plain set-of-pairs equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Insert a pair produced by the tree walk.
    ///
    /// A second contribution for the same key means two shapes map onto one
    /// wire name, which is a model defect.
    pub fn insert_unique(&mut self, key: String, value: String) -> Result<()> {
        if self.0.contains_key(&key) {
            return Err(QueryError::ModelInconsistency { key });
        }
        self.0.insert(key, value);
        Ok(())
    }

    /// Disjoint union with `other`.
    pub fn merge(&mut self, other: Parameters) -> Result<()> {
        for (key, value) in other.0 {
            self.insert_unique(key, value)?;
        }
        Ok(())
    }

    /// Insert or replace. Used for envelope keys such as `Action`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Render as `application/x-www-form-urlencoded`, in key order.
    pub fn to_form_urlencoded(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Parameters {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Parameters> for BTreeMap<String, String> {
    fn from(params: Parameters) -> Self {
        params.0
    }
}
