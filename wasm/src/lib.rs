//! WebAssembly module for the crop variety tracker
//!
//! Runs the dashboard's filter/sort/paginate pipeline in the browser with the
//! same code the server uses, plus the form-side record checks.

use shared::{
    page_count as pages_for, run_query, validate_variety, FilterOptions, NewVariety, Variety,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::query::*;
pub use shared::types::*;

/// Filter, sort and paginate a fetched variety list.
///
/// Returns the page envelope (`data` plus `pagination`) as JSON.
#[wasm_bindgen]
pub fn query_varieties(
    varieties_json: &str,
    filters_json: &str,
    page: u32,
) -> Result<String, JsValue> {
    query_page(varieties_json, filters_json, page).map_err(|message| {
        web_sys::console::error_1(&JsValue::from_str(&message));
        js_sys::Error::new(&message).into()
    })
}

/// Number of dashboard pages for `total` matching varieties
#[wasm_bindgen]
pub fn page_count(total: u32) -> u32 {
    pages_for(total as usize)
}

/// Check a variety against the field rules.
///
/// Returns an empty string when the record passes, otherwise the message of
/// the first failing field.
#[wasm_bindgen]
pub fn validate_variety_json(variety_json: &str) -> String {
    match check_variety(variety_json) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

fn query_page(varieties_json: &str, filters_json: &str, page: u32) -> Result<String, String> {
    let varieties: Vec<Variety> = serde_json::from_str(varieties_json)
        .map_err(|e| format!("Invalid varieties JSON: {}", e))?;
    let filters: FilterOptions = if filters_json.trim().is_empty() {
        FilterOptions::default()
    } else {
        serde_json::from_str(filters_json).map_err(|e| format!("Invalid filters JSON: {}", e))?
    };

    let result = run_query(&varieties, &filters, page);
    serde_json::to_string(&result).map_err(|e| format!("Failed to encode page: {}", e))
}

fn check_variety(variety_json: &str) -> Result<(), String> {
    let input: NewVariety =
        serde_json::from_str(variety_json).map_err(|e| format!("Invalid variety JSON: {}", e))?;
    // Forms validate before the server assigns an id
    let variety = input.into_variety(String::new());
    validate_variety(&variety).map_err(|e| e.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn varieties() -> String {
        json!([
            {
                "id": "1",
                "cropName": "Lettuce",
                "varietyName": "Butterhead",
                "expectedYield": 85,
                "estimatedHarvestDate": "2024-04-30",
                "healthRating": 4
            },
            {
                "id": "2",
                "cropName": "Tomato",
                "varietyName": "Cherry",
                "expectedYield": 92,
                "estimatedHarvestDate": "2024-05-29",
                "healthRating": 5
            }
        ])
        .to_string()
    }

    #[test]
    fn test_query_page_filters_and_sorts() {
        let filters = json!({ "search": "", "sortBy": "yield-desc" }).to_string();
        let page: Value =
            serde_json::from_str(&query_page(&varieties(), &filters, 1).unwrap()).unwrap();
        assert_eq!(page["data"][0]["cropName"], "Tomato");
        assert_eq!(page["pagination"]["totalItems"], 2);
    }

    #[test]
    fn test_query_page_uses_default_filters() {
        let page: Value = serde_json::from_str(&query_page(&varieties(), "", 1).unwrap()).unwrap();
        // harvest-asc by default
        assert_eq!(page["data"][0]["cropName"], "Lettuce");
    }

    #[test]
    fn test_query_page_rejects_bad_json() {
        assert!(query_page("not json", "", 1).is_err());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(21), 3);
    }

    #[test]
    fn test_validate_variety_json() {
        let valid = json!({
            "cropName": "Spinach",
            "varietyName": "Bloomsdale",
            "expectedYield": 78,
            "estimatedHarvestDate": "2024-04-24",
            "healthRating": 3
        });
        assert_eq!(validate_variety_json(&valid.to_string()), "");

        let mut invalid = valid.clone();
        invalid["varietyName"] = json!("");
        assert_eq!(
            validate_variety_json(&invalid.to_string()),
            "Variety name is required"
        );

        let mut text_yield = valid;
        text_yield["expectedYield"] = json!("80");
        assert_eq!(
            validate_variety_json(&text_yield.to_string()),
            "Expected yield must be a number"
        );
        assert!(validate_variety_json("[1, 2]").starts_with("Invalid variety JSON"));
    }

    #[test]
    fn test_query_page_keeps_odd_typed_records() {
        let varieties = json!([
            { "id": "1", "cropName": "Kale", "expectedYield": "80", "healthRating": 3.5 }
        ])
        .to_string();
        let page: Value = serde_json::from_str(&query_page(&varieties, "", 1).unwrap()).unwrap();
        // A text yield never falls inside the range
        assert_eq!(page["pagination"]["totalItems"], 0);
    }
}
