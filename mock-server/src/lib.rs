//! In-process stand-in for the food database provider.
//!
//! Serves the parser and nutrients endpoints from a fixed `Catalog`, with the
//! same credential query parameters and error statuses the real service uses.

pub mod catalog;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use catalog::{Catalog, MeasureDef, Product};
use catalog::{qualifier_factor, ONTOLOGY};

pub const DEFAULT_APP_ID: &str = "test-app-id";
pub const DEFAULT_APP_KEY: &str = "test-app-key";

/// Credentials the mock accepts.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub app_id: String,
    pub app_key: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            app_key: DEFAULT_APP_KEY.to_string(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    catalog: Arc<Catalog>,
}

type Failure = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct ParserQuery {
    pub upc: String,
    pub app_id: String,
    pub app_key: String,
}

#[derive(Deserialize)]
pub struct CredentialQuery {
    pub app_id: String,
    pub app_key: String,
}

#[derive(Deserialize)]
pub struct NutrientsRequest {
    pub ingredients: Vec<IngredientInput>,
}

#[derive(Deserialize)]
pub struct IngredientInput {
    #[serde(rename = "foodId")]
    pub food_id: String,
    pub quantity: f64,
    #[serde(rename = "measureURI")]
    pub measure_uri: String,
    #[serde(default)]
    pub qualifiers: Vec<String>,
}

pub fn app() -> Router {
    app_with(MockConfig::default(), Catalog::default())
}

pub fn app_with(config: MockConfig, catalog: Catalog) -> Router {
    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
    };
    Router::new()
        .route("/api/food-database/parser", get(parser))
        .route("/api/food-database/nutrients", post(nutrients))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config, Catalog::default())).await
}

fn failure(status: StatusCode, error: &str, message: String) -> Failure {
    (status, Json(json!({ "status": "error", "error": error, "message": message })))
}

fn authorize(config: &MockConfig, app_id: &str, app_key: &str) -> Result<(), Failure> {
    if app_id == config.app_id && app_key == config.app_key {
        return Ok(());
    }
    tracing::info!(app_id, "rejecting request with unknown credentials");
    Err(failure(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        format!("Unauthorized app_id = {app_id}"),
    ))
}

async fn parser(State(state): State<AppState>, Query(query): Query<ParserQuery>) -> Result<Json<Value>, Failure> {
    authorize(&state.config, &query.app_id, &query.app_key)?;
    let product = state.catalog.by_upc(&query.upc).ok_or_else(|| {
        failure(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No food found for upc {}", query.upc),
        )
    })?;
    Ok(Json(json!({
        "text": query.upc,
        "parsed": [],
        "hints": [hint(product)],
    })))
}

fn hint(product: &Product) -> Value {
    let n = &product.per_100g;
    json!({
        "food": {
            "foodId": product.food_id,
            "label": product.label,
            "brand": product.brand,
            "category": product.category,
            "categoryLabel": "food",
            "nutrients": {
                "ENERC_KCAL": n.kcal,
                "FAT": n.fat,
                "CHOCDF": n.carbs,
                "PROCNT": n.protein,
            },
        },
        "measures": product.measures,
    })
}

async fn nutrients(
    State(state): State<AppState>,
    Query(query): Query<CredentialQuery>,
    Json(input): Json<NutrientsRequest>,
) -> Result<Json<Value>, Failure> {
    authorize(&state.config, &query.app_id, &query.app_key)?;
    let [ingredient] = input.ingredients.as_slice() else {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "bad_request",
            format!("expected exactly one ingredient, got {}", input.ingredients.len()),
        ));
    };
    let unprocessable = |message: String| failure(StatusCode::UNPROCESSABLE_ENTITY, "bad_request", message);

    if !ingredient.quantity.is_finite() || ingredient.quantity < 0.0 {
        return Err(unprocessable(format!("invalid quantity {}", ingredient.quantity)));
    }
    let product = state
        .catalog
        .by_food_id(&ingredient.food_id)
        .ok_or_else(|| unprocessable(format!("unknown foodId {}", ingredient.food_id)))?;
    let measure = product
        .measure(&ingredient.measure_uri)
        .ok_or_else(|| unprocessable(format!("measure {} not valid for {}", ingredient.measure_uri, product.food_id)))?;
    let mut factor = 1.0;
    for qualifier in &ingredient.qualifiers {
        factor *= qualifier_factor(qualifier).ok_or_else(|| unprocessable(format!("unknown qualifier {qualifier}")))?;
    }

    let weight = ingredient.quantity * measure.weight * factor;
    Ok(Json(nutrient_breakdown(product, measure, ingredient, weight)))
}

fn nutrient_breakdown(product: &Product, measure: &MeasureDef, ingredient: &IngredientInput, weight: f64) -> Value {
    let n = &product.per_100g;
    let scale = weight / 100.0;
    let kcal = n.kcal * scale;
    let nutrient = |label: &str, quantity: f64, unit: &str| json!({ "label": label, "quantity": quantity, "unit": unit });

    let mut parsed = json!({
        "quantity": ingredient.quantity,
        "measure": measure.label,
        "foodMatch": product.label,
        "food": product.label,
        "foodId": product.food_id,
        "weight": weight,
        "retainedWeight": weight,
        "measureURI": measure.uri,
        "status": "OK",
    });
    if !ingredient.qualifiers.is_empty() {
        parsed["qualifiers"] = json!(ingredient.qualifiers);
    }

    json!({
        "uri": format!("{ONTOLOGY}#recipe_{}", Uuid::new_v4().simple()),
        "yield": 1.0,
        "calories": kcal.round() as i64,
        "totalWeight": weight,
        "dietLabels": product.diet_labels,
        "healthLabels": product.health_labels,
        "cautions": [],
        "totalNutrients": {
            "ENERC_KCAL": nutrient("Energy", kcal, "kcal"),
            "FAT": nutrient("Fat", n.fat * scale, "g"),
            "CHOCDF": nutrient("Carbs", n.carbs * scale, "g"),
            "PROCNT": nutrient("Protein", n.protein * scale, "g"),
            "NA": nutrient("Sodium", n.sodium_mg * scale, "mg"),
        },
        "ingredients": [{ "parsed": [parsed] }],
    })
}
