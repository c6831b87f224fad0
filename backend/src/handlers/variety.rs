//! Variety HTTP handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{FilterOptions, NewVariety, PaginatedResponse, SortBy, Variety, VarietyUpdate};

use crate::error::AppResult;
use crate::AppState;

/// List all varieties
pub async fn list_varieties(State(state): State<AppState>) -> Json<Vec<Variety>> {
    Json(state.store.list().await)
}

/// Query parameters for the server-side query endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarietyQueryParams {
    pub search: Option<String>,
    pub health_rating: Option<i32>,
    pub min_yield: Option<f64>,
    pub max_yield: Option<f64>,
    pub sort_by: Option<SortBy>,
    pub page: Option<u32>,
}

impl VarietyQueryParams {
    /// Split into filter settings and the requested page, filling defaults
    pub fn into_parts(self) -> (FilterOptions, u32) {
        let defaults = FilterOptions::default();
        let filters = FilterOptions {
            search: self.search.unwrap_or(defaults.search),
            health_rating: self.health_rating,
            min_yield: self.min_yield.unwrap_or(defaults.min_yield),
            max_yield: self.max_yield.unwrap_or(defaults.max_yield),
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
        };
        (filters, self.page.unwrap_or(1))
    }
}

/// Filter, sort and paginate varieties server-side
pub async fn query_varieties(
    State(state): State<AppState>,
    params: Result<Query<VarietyQueryParams>, QueryRejection>,
) -> AppResult<Json<PaginatedResponse<Variety>>> {
    let Query(params) = params?;
    let (filters, page) = params.into_parts();
    Ok(Json(state.store.query(&filters, page).await))
}

/// Get a variety by ID
pub async fn get_variety(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Variety>> {
    let variety = state.store.get(&id).await?;
    Ok(Json(variety))
}

/// Create a new variety
pub async fn create_variety(
    State(state): State<AppState>,
    payload: Result<Json<NewVariety>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Variety>)> {
    let Json(input) = payload?;
    let variety = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(variety)))
}

/// Update a variety. PUT and PATCH both merge the body over the stored record.
pub async fn update_variety(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VarietyUpdate>, JsonRejection>,
) -> AppResult<Json<Variety>> {
    let Json(update) = payload?;
    let variety = state.store.update(&id, update).await?;
    Ok(Json(variety))
}

/// Delete a variety
pub async fn delete_variety(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_fill_defaults() {
        let (filters, page) = VarietyQueryParams::default().into_parts();
        assert_eq!(filters, FilterOptions::default());
        assert_eq!(page, 1);
    }

    #[test]
    fn query_params_override_defaults() {
        let params = VarietyQueryParams {
            search: Some("tom".to_string()),
            health_rating: Some(5),
            max_yield: Some(95.0),
            sort_by: Some(SortBy::YieldDesc),
            page: Some(2),
            ..Default::default()
        };
        let (filters, page) = params.into_parts();
        assert_eq!(filters.search, "tom");
        assert_eq!(filters.health_rating, Some(5));
        assert_eq!(filters.min_yield, 0.0);
        assert_eq!(filters.max_yield, 95.0);
        assert_eq!(filters.sort_by, SortBy::YieldDesc);
        assert_eq!(page, 2);
    }
}
