use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user-selectable group of related input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Body-composition scale
    Scale,
    /// Wearable activity tracker
    Wearable,
    /// Self-reported symptoms and notes
    Symptoms,
}

impl Source {
    #[cfg(test)]
    pub const ALL: [Source; 3] = [Source::Scale, Source::Wearable, Source::Symptoms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Scale => "scale",
            Source::Wearable => "wearable",
            Source::Symptoms => "symptoms",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scale" => Ok(Source::Scale),
            "wearable" => Ok(Source::Wearable),
            "symptoms" => Ok(Source::Symptoms),
            other => Err(format!("Unknown data source: {}", other)),
        }
    }
}

/// The set of sources selected for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSet(BTreeSet<Source>);

impl SourceSet {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Scale and symptoms, matching the entry form's initial selection
    pub fn form_default() -> Self {
        [Source::Scale, Source::Symptoms].into_iter().collect()
    }

    pub fn contains(&self, source: Source) -> bool {
        self.0.contains(&source)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a comma-separated list such as `scale,wearable`.
    /// Blank segments are ignored so `""` yields the empty set.
    pub fn parse_list(raw: &str) -> Result<Self, String> {
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Source::from_str)
            .collect()
    }

    /// Every subset of {scale, wearable, symptoms}
    #[cfg(test)]
    pub fn all_subsets() -> Vec<SourceSet> {
        (0u8..8)
            .map(|mask| {
                Source::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, s)| *s)
                    .collect()
            })
            .collect()
    }
}

impl FromIterator<Source> for SourceSet {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
