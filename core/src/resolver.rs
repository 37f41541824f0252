//! Barcode → food → measure URI → nutrient attribute.
//!
//! Measurement URIs are per food: the same label ("Ounce", "Serving") can map
//! to different URIs, and not every food offers every unit. The resolver
//! bridges a human label to whatever URI the provider listed for the first
//! candidate of the barcode.

use crate::classify::pretty_json;
use crate::client::NutritionClient;
use crate::config::Credentials;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{validate_quantity, AttributeRequest, AttributeValue, FoodCandidate, Qualifiers, DEFAULT_ATTRIBUTE};

pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_MEASURE: &str = "Ounce";

/// What to ask for once the barcode has been resolved to a food.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    pub quantity: f64,
    /// Measure label, matched exactly and case-sensitively.
    pub measure: String,
    pub attribute: String,
    pub qualifiers: Option<Qualifiers>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            quantity: DEFAULT_QUANTITY,
            measure: DEFAULT_MEASURE.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            qualifiers: None,
        }
    }
}

/// URI of the first measure labelled `label`, in provider order.
pub fn resolve_measure_uri<'a>(candidate: &'a FoodCandidate, label: &str) -> Result<&'a str, ApiError> {
    if let Some(measure) = candidate.measures.iter().find(|m| m.label == label) {
        return Ok(&measure.uri);
    }
    let rendered = pretty_json(&candidate.raw_measures).unwrap_or_else(|_| candidate.raw_measures.to_string());
    tracing::warn!(
        requested = label,
        food_id = %candidate.food_id,
        "measure not available, available measures:\n{rendered}"
    );
    Err(ApiError::MeasureNotFound {
        requested: label.to_string(),
        available: candidate.measure_labels(),
    })
}

impl NutritionClient {
    /// Look up `options.attribute` for the first food matching `barcode`.
    ///
    /// The quantity is checked before the parser request goes out.
    pub fn resolve_by_barcode<T: Transport + ?Sized>(
        &self,
        transport: &T,
        credentials: &Credentials,
        barcode: &str,
        options: &ResolveOptions,
    ) -> Result<AttributeValue, ApiError> {
        validate_quantity(options.quantity)?;
        let found = self.lookup_food(transport, credentials, barcode)?;
        let candidate = found.first_candidate()?;
        let measure_uri = resolve_measure_uri(&candidate, &options.measure)?;
        tracing::debug!(
            barcode = found.barcode(),
            food_id = %candidate.food_id,
            measure = %options.measure,
            measure_uri,
            "resolved measure"
        );

        let request = AttributeRequest {
            food_id: candidate.food_id.clone(),
            quantity: options.quantity,
            measure_uri: measure_uri.to_string(),
            attribute: options.attribute.clone(),
            qualifiers: options.qualifiers.clone(),
        };
        self.lookup_attribute(transport, credentials, &request)
    }
}
