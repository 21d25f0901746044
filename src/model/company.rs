//! Company records and the immutable dataset snapshot.

use super::RawValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// One row per company: an identifier plus raw metric values.
///
/// Absent metrics are simply not present in `values`. Records are never
/// mutated once loaded into a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    /// Unique company identifier
    #[serde(rename = "company")]
    pub id: String,
    /// Raw metric values keyed by metric name
    #[serde(flatten)]
    pub values: IndexMap<String, RawValue>,
}

impl CompanyRecord {
    /// Create a record with no metric values.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: IndexMap::new(),
        }
    }

    /// Builder-style setter for a metric value.
    #[must_use]
    pub fn with_value(mut self, metric: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(metric.into(), value.into());
        self
    }

    /// Raw value of a metric, if present.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&RawValue> {
        self.values.get(metric)
    }
}

/// An immutable, deduplicated-by-identifier view of all company rows.
///
/// Input order is preserved; ranking ties are broken by this order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CompanyRecord>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset, keeping the first occurrence of each identifier.
    pub fn from_records(records: impl IntoIterator<Item = CompanyRecord>) -> Self {
        let mut dataset = Self::default();
        for record in records {
            if dataset.index.contains_key(&record.id) {
                tracing::warn!("Duplicate company identifier '{}' ignored", record.id);
                continue;
            }
            dataset
                .index
                .insert(record.id.clone(), dataset.records.len());
            dataset.records.push(record);
        }
        dataset
    }

    /// The three-company sample used by the web demo.
    #[must_use]
    pub fn demo() -> Self {
        Self::from_records([
            CompanyRecord::new("Samsung")
                .with_value("stockPrice", 800)
                .with_value("ESGScore", 75)
                .with_value("GovernanceRating", "A")
                .with_value("RiskLevel", "Low"),
            CompanyRecord::new("Apple")
                .with_value("stockPrice", 1200)
                .with_value("ESGScore", 90)
                .with_value("GovernanceRating", "A+")
                .with_value("RiskLevel", "Medium"),
            CompanyRecord::new("Microsoft")
                .with_value("stockPrice", 900)
                .with_value("ESGScore", 85)
                .with_value("GovernanceRating", "B+")
                .with_value("RiskLevel", "High"),
        ])
    }

    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CompanyRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Company identifiers in input order.
    pub fn company_ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Shared handle to the current dataset snapshot.
///
/// Readers take an `Arc` snapshot and keep using it for the whole request.
/// Reloading swaps the pointer; a snapshot already handed out is never
/// modified.
#[derive(Debug)]
pub struct DatasetHandle {
    current: RwLock<Arc<Dataset>>,
}

impl DatasetHandle {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Dataset> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Atomically install a new dataset, returning the previous snapshot.
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            "Dataset replaced: {} -> {} companies",
            guard.len(),
            dataset.len()
        );
        std::mem::replace(&mut *guard, Arc::new(dataset))
    }
}

impl Default for DatasetHandle {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}
