//! Variety store: the in-memory system of record
//!
//! Every mutation goes through [`VarietyStore`]. The collection sits behind a
//! single read/write lock, so each operation is one atomic step and readers
//! never see a half-applied update.

use std::sync::Arc;

use serde_json::json;
use shared::{
    run_query, validate_variety, FilterOptions, NewVariety, PaginatedResponse, Variety,
    VarietyUpdate,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Handle to the variety collection. Clones share the same collection.
#[derive(Clone, Default)]
pub struct VarietyStore {
    varieties: Arc<RwLock<Vec<Variety>>>,
    strict: bool,
}

impl VarietyStore {
    /// Create an empty, permissive store
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject records that fail validation instead of storing them as given
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Create a store holding the sample varieties
    pub fn seeded() -> Self {
        let varieties = sample_varieties()
            .into_iter()
            .map(|input| input.into_variety(Uuid::new_v4().to_string()))
            .collect();
        Self {
            varieties: Arc::new(RwLock::new(varieties)),
            strict: false,
        }
    }

    /// Insert a new variety under a freshly generated id
    pub async fn create(&self, input: NewVariety) -> AppResult<Variety> {
        let variety = input.into_variety(Uuid::new_v4().to_string());
        self.check(&variety)?;

        let mut varieties = self.varieties.write().await;
        varieties.push(variety.clone());
        tracing::info!(id = %variety.id, "Variety created");

        Ok(variety)
    }

    /// Get a variety by ID
    pub async fn get(&self, id: &str) -> AppResult<Variety> {
        self.varieties
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(AppError::variety_not_found)
    }

    /// All varieties, in insertion order
    pub async fn list(&self) -> Vec<Variety> {
        self.varieties.read().await.clone()
    }

    /// Number of stored varieties
    pub async fn count(&self) -> usize {
        self.varieties.read().await.len()
    }

    /// Merge `update` over the stored record
    pub async fn update(&self, id: &str, update: VarietyUpdate) -> AppResult<Variety> {
        let mut varieties = self.varieties.write().await;
        let existing = varieties
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(AppError::variety_not_found)?;

        let mut merged = existing.clone();
        update.apply_to(&mut merged);
        self.check(&merged)?;

        *existing = merged.clone();
        tracing::info!(id = %id, "Variety updated");

        Ok(merged)
    }

    /// Remove a variety. A second delete of the same id is NotFound.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut varieties = self.varieties.write().await;
        let index = varieties
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(AppError::variety_not_found)?;

        varieties.remove(index);
        tracing::info!(id = %id, "Variety deleted");

        Ok(())
    }

    /// Filter, sort and paginate over a consistent snapshot of the collection
    pub async fn query(&self, filters: &FilterOptions, page: u32) -> PaginatedResponse<Variety> {
        let varieties = self.varieties.read().await;
        run_query(&varieties, filters, page)
    }

    fn check(&self, variety: &Variety) -> AppResult<()> {
        if self.strict {
            validate_variety(variety)?;
        }
        Ok(())
    }
}

fn sample(
    crop_name: &str,
    variety_name: &str,
    expected_yield: f64,
    sowing_date: &str,
    expected_harvest_days: u32,
    estimated_harvest_date: &str,
    health_rating: i32,
) -> NewVariety {
    NewVariety::from_parts(
        crop_name,
        variety_name,
        expected_yield,
        estimated_harvest_date,
        health_rating,
    )
    .with("sowingDate", sowing_date)
    .with("expectedHarvestDays", json!(expected_harvest_days))
}

/// Sample varieties loaded on startup
pub fn sample_varieties() -> Vec<NewVariety> {
    vec![
        sample("Lettuce", "Butterhead", 85.0, "2024-03-01", 60, "2024-04-30", 4),
        sample("Tomato", "Cherry", 92.0, "2024-03-15", 75, "2024-05-29", 5),
        sample("Spinach", "Bloomsdale", 78.0, "2024-03-10", 45, "2024-04-24", 3),
    ]
}
