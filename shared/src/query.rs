//! Variety query engine
//!
//! Turns the full collection into one displayable page. The pipeline always
//! runs filter, then sort, then paginate, and keeps no state between calls.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Variety;
use crate::types::{PaginatedResponse, PaginationMeta};

/// Fixed number of varieties per page
pub const PAGE_SIZE: usize = 10;

/// Orderings offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    YieldAsc,
    YieldDesc,
    #[default]
    HarvestAsc,
    HarvestDesc,
}

impl SortBy {
    fn compare(self, a: &Variety, b: &Variety) -> Ordering {
        match self {
            SortBy::YieldAsc => compare_yield(a.expected_yield(), b.expected_yield()),
            SortBy::YieldDesc => compare_yield(b.expected_yield(), a.expected_yield()),
            // Unparseable dates are None and order before every real date
            SortBy::HarvestAsc => a.harvest_date().cmp(&b.harvest_date()),
            SortBy::HarvestDesc => b.harvest_date().cmp(&a.harvest_date()),
        }
    }
}

// Missing or non-numeric yields order before every number
fn compare_yield(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::YieldAsc => write!(f, "yield-asc"),
            SortBy::YieldDesc => write!(f, "yield-desc"),
            SortBy::HarvestAsc => write!(f, "harvest-asc"),
            SortBy::HarvestDesc => write!(f, "harvest-desc"),
        }
    }
}

/// Filter and sort settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Matched case-insensitively against crop and variety names
    pub search: String,
    /// `None` matches every rating
    pub health_rating: Option<i32>,
    pub min_yield: f64,
    pub max_yield: f64,
    pub sort_by: SortBy,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            health_rating: None,
            min_yield: 0.0,
            max_yield: 100.0,
            sort_by: SortBy::default(),
        }
    }
}

impl FilterOptions {
    /// Whether a variety passes the search, rating and yield range predicates.
    /// A yield that is missing or not a number is outside every range.
    pub fn matches(&self, variety: &Variety) -> bool {
        let matches_search = variety.matches_search(&self.search);
        let matches_health = self
            .health_rating
            .map_or(true, |rating| variety.health_rating() == Some(f64::from(rating)));
        let matches_yield = variety
            .expected_yield()
            .is_some_and(|y| y >= self.min_yield && y <= self.max_yield);

        matches_search && matches_health && matches_yield
    }
}

/// Keep the varieties matching every filter, in their original order
pub fn filter_varieties(varieties: &[Variety], filters: &FilterOptions) -> Vec<Variety> {
    varieties
        .iter()
        .filter(|v| filters.matches(v))
        .cloned()
        .collect()
}

/// Stable sort; ties keep their incoming order
pub fn sort_varieties(varieties: &mut [Variety], sort_by: SortBy) {
    varieties.sort_by(|a, b| sort_by.compare(a, b));
}

/// Slice out 1-indexed `page`. Page 0 or a page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: u32) -> Vec<T> {
    if page == 0 {
        return Vec::new();
    }
    let offset = (page as usize - 1).saturating_mul(PAGE_SIZE);
    items.into_iter().skip(offset).take(PAGE_SIZE).collect()
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize) -> u32 {
    u32::try_from(total.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// Run filter, sort and paginate over the collection
pub fn run_query(
    varieties: &[Variety],
    filters: &FilterOptions,
    page: u32,
) -> PaginatedResponse<Variety> {
    let mut matched = filter_varieties(varieties, filters);
    sort_varieties(&mut matched, filters.sort_by);

    let total_items = matched.len();
    PaginatedResponse {
        data: paginate(matched, page),
        pagination: PaginationMeta {
            page,
            per_page: PAGE_SIZE as u32,
            total_items: total_items as u64,
            total_pages: page_count(total_items),
        },
    }
}
