//! Type definitions for predictions and recommendations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hospitals returned when the caller gives no limit
pub const DEFAULT_TOP_N: usize = 5;

/// Disease name produced by a classifier
pub type DiseaseLabel = String;

/// One dense feature row
pub type FeatureRow = Vec<f64>;

/// Filters forwarded verbatim to the hospital recommender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    /// Medical specialty (e.g., "Cardiology")
    #[serde(default)]
    pub specialty: Option<String>,

    /// District (e.g., "Ernakulam")
    #[serde(default)]
    pub district: Option<String>,

    /// Cost tier (e.g., "Paid/Private")
    #[serde(default)]
    pub cost: Option<String>,

    /// Maximum number of hospitals to return
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for RecommendationQuery {
    fn default() -> Self {
        Self {
            specialty: None,
            district: None,
            cost: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommendationQuery {
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = Some(cost.into());
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// A hospital row from the recommender's dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    /// Hospital name
    pub name: String,

    /// Specialty offered
    pub specialty: String,

    /// District the hospital is located in
    pub district: String,

    /// Cost tier (e.g., "Free/Government", "Paid/Private")
    pub cost: String,

    /// Rating used for ranking, if the dataset has one
    #[serde(default)]
    pub rating: Option<f64>,

    /// Remaining dataset columns, kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for HospitalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.name, self.specialty, self.district, self.cost
        )?;
        if let Some(rating) = self.rating {
            write!(f, " rating {:.1}", rating)?;
        }
        Ok(())
    }
}
