//! Domain DTOs for the food database API.
//!
//! # Design
//! The parser response is kept as raw JSON (`FoodLookup`) because callers
//! sometimes want fields this crate never looks at. Only the pieces the
//! resolver needs are lifted into typed form (`FoodCandidate`, `Measure`).
//! Nutrient values have a provider-defined type per attribute, so they come
//! back as the `AttributeValue` union and the caller narrows them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ApiError;

pub const DEFAULT_ATTRIBUTE: &str = "calories";

/// One unit of measure a food supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub label: String,
    pub uri: String,
}

/// The part of a parser hint the resolver works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodCandidate {
    pub food_id: String,
    pub label: Option<String>,
    /// In provider order.
    pub measures: Vec<Measure>,
    /// The hint's `measures` array as the provider sent it, weights included.
    pub raw_measures: Value,
}

impl FoodCandidate {
    pub fn measure_labels(&self) -> Vec<String> {
        self.measures.iter().map(|m| m.label.clone()).collect()
    }
}

#[derive(Deserialize)]
struct HintWire {
    food: FoodWire,
    #[serde(default)]
    measures: Vec<Measure>,
}

#[derive(Deserialize)]
struct FoodWire {
    #[serde(rename = "foodId")]
    food_id: String,
    label: Option<String>,
}

/// Parsed body of the parser endpoint, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLookup {
    barcode: String,
    raw: Value,
}

impl FoodLookup {
    pub fn new(barcode: impl Into<String>, raw: Value) -> Self {
        Self {
            barcode: barcode.into(),
            raw,
        }
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// The `hints` array. A body without one is malformed.
    pub fn hints(&self) -> Result<&[Value], ApiError> {
        self.raw
            .get("hints")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| ApiError::MalformedResponse("parser response has no `hints` array".to_string()))
    }

    pub fn candidates(&self) -> Result<Vec<FoodCandidate>, ApiError> {
        self.hints()?.iter().map(candidate_from_hint).collect()
    }

    /// The first hint, which the provider ranks as the best match.
    pub fn first_candidate(&self) -> Result<FoodCandidate, ApiError> {
        let hint = self
            .hints()?
            .first()
            .ok_or_else(|| ApiError::NoFoodCandidates {
                barcode: self.barcode.clone(),
            })?;
        candidate_from_hint(hint)
    }
}

fn candidate_from_hint(hint: &Value) -> Result<FoodCandidate, ApiError> {
    let wire: HintWire = serde_json::from_value(hint.clone())
        .map_err(|e| ApiError::MalformedResponse(format!("invalid hint: {e}")))?;
    Ok(FoodCandidate {
        food_id: wire.food.food_id,
        label: wire.food.label,
        measures: wire.measures,
        raw_measures: hint.get("measures").cloned().unwrap_or_else(|| Value::Array(Vec::new())),
    })
}

/// Ordered list of qualifier URIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualifiers(Vec<String>);

impl Qualifiers {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Conversion into `Qualifiers` that rejects anything not shaped as a list.
///
/// Bare strings implement this too and always fail: a single qualifier has
/// to be passed as a one-element list.
pub trait IntoQualifiers {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError>;
}

impl IntoQualifiers for Qualifiers {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        Ok(self)
    }
}

impl IntoQualifiers for Vec<String> {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        Ok(Qualifiers(self))
    }
}

impl IntoQualifiers for &[String] {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        Ok(Qualifiers(self.to_vec()))
    }
}

impl IntoQualifiers for Vec<&str> {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        self.as_slice().into_qualifiers()
    }
}

impl IntoQualifiers for &[&str] {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        Ok(Qualifiers(self.iter().map(|s| s.to_string()).collect()))
    }
}

impl<const N: usize> IntoQualifiers for [&str; N] {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        self.as_slice().into_qualifiers()
    }
}

impl IntoQualifiers for &str {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        Err(ApiError::QualifierType(format!("got bare string {self:?}")))
    }
}

impl IntoQualifiers for String {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        self.as_str().into_qualifiers()
    }
}

/// JSON `null` means no qualifiers, like `None`.
impl IntoQualifiers for Value {
    fn into_qualifiers(self) -> Result<Qualifiers, ApiError> {
        if self.is_null() {
            return Ok(Qualifiers::default());
        }
        let Value::Array(items) = self else {
            return Err(ApiError::QualifierType(format!("got {}", json_kind(&self))));
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(ApiError::QualifierType(format!("list item is {}", json_kind(&other)))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Qualifiers)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a bare string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Negative, NaN and infinite quantities never reach the provider.
pub(crate) fn validate_quantity(quantity: f64) -> Result<(), ApiError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ApiError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Inputs of one nutrient lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRequest {
    pub food_id: String,
    pub quantity: f64,
    pub measure_uri: String,
    pub attribute: String,
    pub qualifiers: Option<Qualifiers>,
}

impl AttributeRequest {
    /// Request for `calories` with no qualifiers.
    pub fn new(food_id: impl Into<String>, quantity: f64, measure_uri: impl Into<String>) -> Self {
        Self {
            food_id: food_id.into(),
            quantity,
            measure_uri: measure_uri.into(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            qualifiers: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Attach qualifiers. Anything not shaped as a list of strings fails here,
    /// before a request can be built from `self`.
    pub fn with_qualifiers(mut self, qualifiers: impl IntoQualifiers) -> Result<Self, ApiError> {
        self.qualifiers = Some(qualifiers.into_qualifiers()?);
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        validate_quantity(self.quantity)
    }

    pub(crate) fn to_wire(&self) -> NutrientsRequest<'_> {
        NutrientsRequest {
            ingredients: [Ingredient {
                food_id: &self.food_id,
                quantity: self.quantity,
                measure_uri: &self.measure_uri,
                qualifiers: self
                    .qualifiers
                    .as_ref()
                    .filter(|q| !q.is_empty())
                    .map(Qualifiers::as_slice),
            }],
        }
    }
}

/// JSON body of the nutrients endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct NutrientsRequest<'a> {
    pub ingredients: [Ingredient<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct Ingredient<'a> {
    #[serde(rename = "foodId")]
    pub food_id: &'a str,
    pub quantity: f64,
    #[serde(rename = "measureURI")]
    pub measure_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<&'a [String]>,
}

/// Value found under an attribute key of the nutrients response.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<AttributeValue>),
    Object(Map<String, Value>),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            AttributeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn into_json(self) -> Value {
        match self {
            AttributeValue::Null => Value::Null,
            AttributeValue::Bool(b) => Value::Bool(b),
            AttributeValue::Number(n) => Value::Number(n),
            AttributeValue::Text(s) => Value::String(s),
            AttributeValue::List(items) => Value::Array(items.into_iter().map(AttributeValue::into_json).collect()),
            AttributeValue::Object(map) => Value::Object(map),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::Number(n) => AttributeValue::Number(n),
            Value::String(s) => AttributeValue::Text(s),
            Value::Array(items) => AttributeValue::List(items.into_iter().map(AttributeValue::from).collect()),
            Value::Object(map) => AttributeValue::Object(map),
        }
    }
}
