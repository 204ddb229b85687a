//! Scenario inputs: a display name plus the trip log it was simulated into.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSource {
    pub name: String,
    pub path: PathBuf,
}

impl ScenarioSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpecError(String);

impl fmt::Display for ScenarioSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ScenarioSpecError {}

/// Parses `NAME=PATH`. The name may contain spaces; the first `=` splits.
impl FromStr for ScenarioSource {
    type Err = ScenarioSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, path) = spec.split_once('=').ok_or_else(|| {
            ScenarioSpecError(format!("expected NAME=PATH, got {spec:?}"))
        })?;
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() {
            return Err(ScenarioSpecError(format!("empty scenario name in {spec:?}")));
        }
        if path.is_empty() {
            return Err(ScenarioSpecError(format!("empty path in {spec:?}")));
        }
        Ok(Self::new(name, path))
    }
}

/// File-name-safe form of a scenario name: lowercase, runs of other
/// characters collapsed to `_`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("scenario");
    }
    slug
}

/// Slugs for a list of names, in order, with no two alike.
///
/// A name whose slug is already taken gets the first free `_2`, `_3`, ...
/// suffix, so "Base Case" and "base-case" map to `base_case` and
/// `base_case_2`.
pub fn unique_slugs<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let base = slug(name);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}
