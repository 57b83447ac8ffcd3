use serde::{Deserialize, Serialize};

/// `object_type` of the record the model emits when it sees no luggage.
pub const NO_LUGGAGE_OBJECT_TYPE: &str = "No Luggage";

/// Description carried by the placeholder returned when the model reply is not JSON.
pub const ERROR_PLACEHOLDER_DESCRIPTION: &str = "Failed to process luggage information";

/// A numeric estimate as the model wrote it.
///
/// Models return either JSON numbers or numeric strings ("60"); both are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(serde_json::Number),
    Text(String),
}

/// Confidence label attached to an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    High,
    Medium,
    Low,
    Other(String),
}

impl From<String> for Confidence {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            "low" => Confidence::Low,
            _ => Confidence::Other(label),
        }
    }
}

impl From<Confidence> for String {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::High => "High".to_string(),
            Confidence::Medium => "Medium".to_string(),
            Confidence::Low => "Low".to_string(),
            Confidence::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: Option<Measurement>,
    pub y_min: Option<Measurement>,
    pub x_max: Option<Measurement>,
    pub y_max: Option<Measurement>,
}

/// One detected piece of luggage.
///
/// Every estimate is nullable so the same shape can carry the "No Luggage" record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuggageItem {
    pub object_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub length_cm: Option<Measurement>,
    #[serde(default)]
    pub width_cm: Option<Measurement>,
    #[serde(default)]
    pub height_cm: Option<Measurement>,
    #[serde(default)]
    pub sum_dimensions_cm: Option<Measurement>,
    #[serde(default)]
    pub volumetric_capacity_cubic_cm: Option<Measurement>,
    #[serde(default)]
    pub estimated_weight_kg: Option<Measurement>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

impl LuggageItem {
    /// The sentinel record for an image without luggage.
    pub fn no_luggage() -> Self {
        Self {
            object_type: NO_LUGGAGE_OBJECT_TYPE.to_string(),
            description: Some("No luggage detected in the image.".to_string()),
            length_cm: None,
            width_cm: None,
            height_cm: None,
            sum_dimensions_cm: None,
            volumetric_capacity_cubic_cm: None,
            estimated_weight_kg: None,
            confidence: None,
            bounding_box: None,
        }
    }

    pub fn is_no_luggage(&self) -> bool {
        self.object_type.eq_ignore_ascii_case(NO_LUGGAGE_OBJECT_TYPE)
    }
}

/// Item returned when the model reply cannot be parsed.
///
/// Keeps the `*_inches` field names existing clients already receive; these do not match
/// [`LuggageItem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPlaceholder {
    pub object_type: &'static str,
    pub description: &'static str,
    pub length_inches: Option<Measurement>,
    pub width_inches: Option<Measurement>,
    pub height_inches: Option<Measurement>,
    pub confidence: Option<Confidence>,
    pub bounding_box: Option<BoundingBox>,
}

impl Default for ErrorPlaceholder {
    fn default() -> Self {
        Self {
            object_type: "Error",
            description: ERROR_PLACEHOLDER_DESCRIPTION,
            length_inches: None,
            width_inches: None,
            height_inches: None,
            confidence: None,
            bounding_box: None,
        }
    }
}
