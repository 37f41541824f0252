//! Synchronous client core for a barcode-driven food database API.
//!
//! # Overview
//! Turns a product barcode into a nutrient value in three hops: the parser
//! endpoint maps the barcode to a food and its available measures, a unit
//! label such as "Ounce" is resolved to that food's measurement URI, and the
//! nutrients endpoint returns the requested attribute.
//!
//! # Design
//! - `NutritionClient` is stateless: it holds a base URL and a verbosity flag.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response); `lookup_*` joins them over a `Transport`.
//! - Every response is status-classified before its body is read.
//! - Credentials are explicit arguments on every call.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resolver;
#[cfg(test)]
mod test_log;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use classify::{classify, pretty_json, StatusClass};
pub use client::NutritionClient;
pub use config::Credentials;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use resolver::{resolve_measure_uri, ResolveOptions};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{AttributeRequest, AttributeValue, FoodCandidate, FoodLookup, IntoQualifiers, Measure, Qualifiers};
