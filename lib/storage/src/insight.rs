use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_INSIGHTS: &str = include_str!("../data/city_insights.json");

/// Points of interest and notable food for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInsight {
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub food: Vec<String>,
}

/// Lookup of descriptive records keyed by the graph's node labels.
pub trait InsightSource: Send + Sync {
    fn lookup(&self, label: &str) -> Option<CityInsight>;
}

/// Insight table held in memory, loaded from a JSON object of
/// `label -> {places, food}`.
#[derive(Debug, Clone, Default)]
pub struct StaticInsights {
    entries: HashMap<String, CityInsight>,
}

impl StaticInsights {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_INSIGHTS)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(s)?,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CityInsight)> for StaticInsights {
    fn from_iter<I: IntoIterator<Item = (String, CityInsight)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl InsightSource for StaticInsights {
    fn lookup(&self, label: &str) -> Option<CityInsight> {
        self.entries.get(label).cloned()
    }
}
