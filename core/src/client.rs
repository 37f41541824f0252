//! Request builder and response parser for the food database API.
//!
//! # Design
//! `NutritionClient` holds only a base URL and a verbosity flag and carries
//! no state between calls. Each endpoint is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The `lookup_*` methods join the two over a `Transport`.
//! Credentials are passed into every call, never stored.

use serde_json::Value;

use crate::classify::classify;
use crate::config::{Credentials, DEFAULT_BASE_URL};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{AttributeRequest, AttributeValue, FoodLookup};

/// Synchronous, stateless client for the food database API.
#[derive(Debug, Clone)]
pub struct NutritionClient {
    base_url: String,
    verbose: bool,
}

impl Default for NutritionClient {
    /// Client for the provider's public endpoint, logging failed bodies.
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl NutritionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            verbose: true,
        }
    }

    /// Whether non-2xx bodies are logged before the error is returned.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_food_lookup(&self, credentials: &Credentials, barcode: &str) -> HttpRequest {
        let mut query = vec![("upc".to_string(), barcode.to_string())];
        query.extend(credentials.query_pairs());
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/parser", self.base_url),
            query,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Validate the request and encode it. Nothing is sent if this fails.
    pub fn build_attribute_lookup(
        &self,
        credentials: &Credentials,
        request: &AttributeRequest,
    ) -> Result<HttpRequest, ApiError> {
        request.validate()?;
        let body = serde_json::to_string(&request.to_wire()).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/nutrients", self.base_url),
            query: credentials.query_pairs().to_vec(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_food_lookup(&self, barcode: &str, response: HttpResponse) -> Result<FoodLookup, ApiError> {
        classify(response.status, &response.body, self.verbose)?;
        let raw: Value = serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        Ok(FoodLookup::new(barcode, raw))
    }

    /// Classify the response, then pull `attribute` out of the JSON object.
    pub fn parse_attribute_lookup(&self, attribute: &str, response: HttpResponse) -> Result<AttributeValue, ApiError> {
        classify(response.status, &response.body, self.verbose)?;
        let raw: Value = serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        let Value::Object(mut fields) = raw else {
            return Err(ApiError::MalformedResponse(
                "nutrients response is not a JSON object".to_string(),
            ));
        };
        fields
            .remove(attribute)
            .map(AttributeValue::from)
            .ok_or_else(|| ApiError::AttributeNotFound {
                attribute: attribute.to_string(),
            })
    }

    /// Fetch the raw parser hints for `barcode`.
    pub fn lookup_food<T: Transport + ?Sized>(
        &self,
        transport: &T,
        credentials: &Credentials,
        barcode: &str,
    ) -> Result<FoodLookup, ApiError> {
        let request = self.build_food_lookup(credentials, barcode);
        tracing::debug!(method = request.method.as_str(), path = %request.path, barcode, "looking up food");
        let response = transport.execute(request)?;
        self.parse_food_lookup(barcode, response)
    }

    /// Fetch one attribute of the nutrient breakdown for `request`.
    pub fn lookup_attribute<T: Transport + ?Sized>(
        &self,
        transport: &T,
        credentials: &Credentials,
        request: &AttributeRequest,
    ) -> Result<AttributeValue, ApiError> {
        let http = self.build_attribute_lookup(credentials, request)?;
        tracing::debug!(
            method = http.method.as_str(),
            path = %http.path,
            food_id = %request.food_id,
            attribute = %request.attribute,
            "looking up attribute"
        );
        let response = transport.execute(http)?;
        self.parse_attribute_lookup(&request.attribute, response)
    }
}
