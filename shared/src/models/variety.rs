//! Crop variety models

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON keys of the known variety fields
pub mod field {
    pub const CROP_NAME: &str = "cropName";
    pub const VARIETY_NAME: &str = "varietyName";
    pub const EXPECTED_YIELD: &str = "expectedYield";
    pub const ESTIMATED_HARVEST_DATE: &str = "estimatedHarvestDate";
    pub const HEALTH_RATING: &str = "healthRating";
}

/// A crop variety tracked by the system
///
/// Everything but the id is kept exactly as the client sent it, whatever the
/// JSON type. The accessors give typed views of the known fields and return
/// `None` when a field is absent or holds the wrong kind of value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Variety {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Variety {
    pub fn crop_name(&self) -> Option<&str> {
        self.fields.get(field::CROP_NAME).and_then(Value::as_str)
    }

    pub fn variety_name(&self) -> Option<&str> {
        self.fields.get(field::VARIETY_NAME).and_then(Value::as_str)
    }

    /// Expected yield in percent, when it is a JSON number
    pub fn expected_yield(&self) -> Option<f64> {
        self.fields.get(field::EXPECTED_YIELD).and_then(Value::as_f64)
    }

    /// Raw harvest date string
    pub fn estimated_harvest_date(&self) -> Option<&str> {
        self.fields
            .get(field::ESTIMATED_HARVEST_DATE)
            .and_then(Value::as_str)
    }

    /// Health rating when it is a JSON number. 0 = unrated.
    pub fn health_rating(&self) -> Option<f64> {
        self.fields.get(field::HEALTH_RATING).and_then(Value::as_f64)
    }

    /// Parsed harvest date, if the stored value is a valid ISO 8601 date
    pub fn harvest_date(&self) -> Option<NaiveDate> {
        self.estimated_harvest_date().and_then(parse_harvest_date)
    }

    /// Case-insensitive substring match against crop and variety names.
    /// A name that is missing or not a string counts as empty.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        let crop = self.crop_name().unwrap_or_default().to_lowercase();
        let name = self.variety_name().unwrap_or_default().to_lowercase();
        crop.contains(&term) || name.contains(&term)
    }
}

/// Parse a harvest date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (only the date part is kept)
pub fn parse_harvest_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Body of a create request: any JSON object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NewVariety(pub Map<String, Value>);

impl NewVariety {
    /// Build an input from the five known fields
    pub fn from_parts(
        crop_name: &str,
        variety_name: &str,
        expected_yield: f64,
        estimated_harvest_date: &str,
        health_rating: i32,
    ) -> Self {
        Self::default()
            .with(field::CROP_NAME, crop_name)
            .with(field::VARIETY_NAME, variety_name)
            .with(field::EXPECTED_YIELD, expected_yield)
            .with(field::ESTIMATED_HARVEST_DATE, estimated_harvest_date)
            .with(field::HEALTH_RATING, health_rating)
    }

    /// Set one field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Attach a store-assigned id. A client-supplied `id` is discarded.
    pub fn into_variety(mut self, id: String) -> Variety {
        self.0.remove("id");
        Variety {
            id,
            fields: self.0,
        }
    }
}

/// Body of an update request: the fields to merge over the stored record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct VarietyUpdate(pub Map<String, Value>);

impl VarietyUpdate {
    /// Set one field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Merge this update over an existing record. Supplied keys replace the
    /// stored values, omitted keys are kept, and the id never changes.
    pub fn apply_to(mut self, variety: &mut Variety) {
        self.0.remove("id");
        variety.fields.extend(self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lettuce() -> Variety {
        serde_json::from_value(json!({
            "id": "1",
            "cropName": "Lettuce",
            "varietyName": "Butterhead",
            "expectedYield": 85,
            "estimatedHarvestDate": "2024-04-30",
            "healthRating": 4,
            "sowingDate": "2024-03-01"
        }))
        .unwrap()
    }

    #[test]
    fn reads_known_fields_and_keeps_extra_ones() {
        let variety = lettuce();
        assert_eq!(variety.crop_name(), Some("Lettuce"));
        assert_eq!(variety.expected_yield(), Some(85.0));
        assert_eq!(variety.health_rating(), Some(4.0));
        assert_eq!(variety.fields.get("sowingDate"), Some(&json!("2024-03-01")));

        let value = serde_json::to_value(&variety).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["varietyName"], "Butterhead");
        assert_eq!(value["sowingDate"], "2024-03-01");
    }

    #[test]
    fn odd_typed_values_are_kept_verbatim() {
        let input: NewVariety = serde_json::from_value(json!({
            "cropName": 7,
            "expectedYield": "80",
            "healthRating": 3.5
        }))
        .unwrap();
        let variety = input.into_variety("x".to_string());

        assert_eq!(variety.fields["expectedYield"], json!("80"));
        assert_eq!(variety.fields["healthRating"], json!(3.5));
        assert_eq!(variety.crop_name(), None);
        assert_eq!(variety.expected_yield(), None);
        assert_eq!(variety.health_rating(), Some(3.5));
    }

    #[test]
    fn new_variety_drops_client_id_and_leaves_absent_fields_absent() {
        let input: NewVariety =
            serde_json::from_value(json!({ "id": "", "cropName": "Kale" })).unwrap();
        let variety = input.into_variety("abc".to_string());
        assert_eq!(variety.id, "abc");
        assert_eq!(variety.crop_name(), Some("Kale"));
        assert_eq!(variety.variety_name(), None);
        assert_eq!(variety.expected_yield(), None);
        assert!(!variety.fields.contains_key("id"));
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let mut variety = lettuce();
        let update: VarietyUpdate =
            serde_json::from_value(json!({ "healthRating": 5, "id": "other" })).unwrap();
        update.apply_to(&mut variety);

        assert_eq!(variety.id, "1");
        assert_eq!(variety.health_rating(), Some(5.0));
        assert_eq!(variety.crop_name(), Some("Lettuce"));
        assert_eq!(variety.estimated_harvest_date(), Some("2024-04-30"));
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 30);
        assert_eq!(parse_harvest_date("2024-04-30"), expected);
        assert_eq!(parse_harvest_date("2024-04-30T08:00:00Z"), expected);
        assert_eq!(parse_harvest_date("next spring"), None);
    }

    #[test]
    fn search_is_case_insensitive_on_both_names() {
        let variety = lettuce();
        assert!(variety.matches_search("LETT"));
        assert!(variety.matches_search("butter"));
        assert!(variety.matches_search(""));
        assert!(!variety.matches_search("tom"));
    }

    #[test]
    fn from_parts_builds_known_fields() {
        let variety = NewVariety::from_parts("Spinach", "Bloomsdale", 78.0, "2024-04-24", 3)
            .into_variety("s".to_string());
        assert_eq!(variety.variety_name(), Some("Bloomsdale"));
        assert_eq!(variety.expected_yield(), Some(78.0));
        assert_eq!(variety.health_rating(), Some(3.0));
    }
}
