//! Per-user progress stats and personal records.
//!
//! Values are free-form strings stored as per-user stat entries, so they
//! survive logout.

use fitlife_core::credential::CredentialStore;
use fitlife_core::error::Result;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Body measurements tracked on the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStat {
    Weight,
    Fat,
    Muscle,
}

impl ProgressStat {
    pub const ALL: [ProgressStat; 3] = [ProgressStat::Weight, ProgressStat::Fat, ProgressStat::Muscle];

    pub fn key(self) -> &'static str {
        match self {
            ProgressStat::Weight => "weight",
            ProgressStat::Fat => "fat",
            ProgressStat::Muscle => "muscle",
        }
    }

    /// Value shown before the user records anything.
    pub fn default_value(self) -> &'static str {
        match self {
            ProgressStat::Weight => "75",
            ProgressStat::Fat => "15",
            ProgressStat::Muscle => "40",
        }
    }
}

impl fmt::Display for ProgressStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for ProgressStat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stat '{s}', expected weight, fat or muscle"))
    }
}

/// Exercises listed on the progress screen, with their default weights.
pub const DEFAULT_RECORDS: [(&str, &str); 4] = [
    ("Bench Press", "100"),
    ("Squat", "140"),
    ("Deadlift", "180"),
    ("Overhead Press", "60"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalRecord {
    pub index: usize,
    pub name: String,
    pub weight: String,
}

/// Reads and writes progress values for one user.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn CredentialStore>,
    email: String,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn CredentialStore>, email: impl Into<String>) -> Self {
        Self {
            store,
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub async fn get(&self, stat: ProgressStat) -> Result<String> {
        Ok(self
            .store
            .get_user_stat(&self.email, stat.key())
            .await?
            .unwrap_or_else(|| stat.default_value().to_string()))
    }

    /// Stores a new value. Blank values are ignored; returns whether the
    /// value was stored.
    pub async fn set(&self, stat: ProgressStat, value: &str) -> Result<bool> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(false);
        }
        self.store
            .save_user_stat(&self.email, stat.key(), value)
            .await?;
        tracing::debug!(email = %self.email, stat = stat.key(), "Progress stat saved");
        Ok(true)
    }

    /// All stats in display order.
    pub async fn snapshot(&self) -> Result<Vec<(ProgressStat, String)>> {
        let mut values = Vec::with_capacity(ProgressStat::ALL.len());
        for stat in ProgressStat::ALL {
            values.push((stat, self.get(stat).await?));
        }
        Ok(values)
    }

    pub async fn records(&self) -> Result<Vec<PersonalRecord>> {
        let mut records = Vec::with_capacity(DEFAULT_RECORDS.len());
        for (index, (name, weight)) in DEFAULT_RECORDS.into_iter().enumerate() {
            let name = self
                .store
                .get_user_stat(&self.email, &record_key(index, "name"))
                .await?
                .unwrap_or_else(|| name.to_string());
            let weight = self
                .store
                .get_user_stat(&self.email, &record_key(index, "weight"))
                .await?
                .unwrap_or_else(|| weight.to_string());
            records.push(PersonalRecord {
                index,
                name,
                weight,
            });
        }
        Ok(records)
    }

    /// Updates the weight of one personal record. Blank values and unknown
    /// indexes are ignored; returns whether the value was stored.
    pub async fn set_record_weight(&self, index: usize, weight: &str) -> Result<bool> {
        let weight = weight.trim();
        if weight.is_empty() || index >= DEFAULT_RECORDS.len() {
            return Ok(false);
        }
        self.store
            .save_user_stat(&self.email, &record_key(index, "weight"), weight)
            .await?;
        Ok(true)
    }
}

fn record_key(index: usize, field: &str) -> String {
    format!("rec_{index}_{field}")
}
