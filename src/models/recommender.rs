//! Table-backed hospital recommender
//!
//! Filters a hospital dataset by specialty, district and cost tier, then
//! ranks the matches by rating.

use crate::errors::Result;
use crate::models::traits::HospitalRecommender;
use crate::models::types::{HospitalRecord, RecommendationQuery};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Hospital dataset exported as a JSON array of records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalTable {
    hospitals: Vec<HospitalRecord>,
}

impl HospitalTable {
    pub fn new(hospitals: Vec<HospitalRecord>) -> Self {
        Self { hospitals }
    }

    /// Parse a JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

/// Absent filter matches everything; present filter compares trimmed,
/// case-insensitive
fn matches_filter(filter: &Option<String>, value: &str) -> bool {
    match filter {
        Some(wanted) => wanted.trim().eq_ignore_ascii_case(value.trim()),
        None => true,
    }
}

/// Highest rating first, unrated last
fn by_rating(a: &HospitalRecord, b: &HospitalRecord) -> Ordering {
    match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl HospitalRecommender for HospitalTable {
    fn recommend(&self, query: &RecommendationQuery) -> Result<Vec<HospitalRecord>> {
        let mut matches: Vec<&HospitalRecord> = self
            .hospitals
            .iter()
            .filter(|h| matches_filter(&query.specialty, &h.specialty))
            .filter(|h| matches_filter(&query.district, &h.district))
            .filter(|h| matches_filter(&query.cost, &h.cost))
            .collect();

        // Stable sort keeps table order among equal ratings
        matches.sort_by(|a, b| by_rating(a, b));

        Ok(matches.into_iter().take(query.top_n).cloned().collect())
    }
}
