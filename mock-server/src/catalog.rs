//! Fixed product catalog served by the mock provider.
//!
//! Nutrient figures are per 100 g. Measure weights are grams per one unit.

use serde::Serialize;

pub const ONTOLOGY: &str = "http://www.edamam.com/ontologies/edamam.owl";

#[derive(Debug, Clone, Serialize)]
pub struct MeasureDef {
    pub uri: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct Nutrients {
    pub kcal: f64,
    pub fat: f64,
    pub carbs: f64,
    pub protein: f64,
    pub sodium_mg: f64,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub upc: &'static str,
    pub food_id: &'static str,
    pub label: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub per_100g: Nutrients,
    pub measures: Vec<MeasureDef>,
    pub diet_labels: &'static [&'static str],
    pub health_labels: &'static [&'static str],
}

impl Product {
    pub fn measure(&self, uri: &str) -> Option<&MeasureDef> {
        self.measures.iter().find(|m| m.uri == uri)
    }
}

/// Weight multiplier of a qualifier URI, if the catalog knows it.
pub fn qualifier_factor(uri: &str) -> Option<f64> {
    match uri.strip_prefix(ONTOLOGY)?.strip_prefix('#')? {
        "Qualifier_small" => Some(0.75),
        "Qualifier_medium" => Some(1.0),
        "Qualifier_large" => Some(1.5),
        _ => None,
    }
}

fn measure(fragment: &str, label: &str, weight: f64) -> MeasureDef {
    MeasureDef {
        uri: format!("{ONTOLOGY}#{fragment}"),
        label: label.to_string(),
        weight,
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn by_upc(&self, upc: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.upc == upc)
    }

    pub fn by_food_id(&self, food_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.food_id == food_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Product {
                upc: "079298000078",
                food_id: "food_aeqymyrb3waczza6m7kgvbhmkh9q",
                label: "Natural Spring Water",
                brand: "Crystal Geyser",
                category: "Packaged foods",
                per_100g: Nutrients {
                    kcal: 0.0,
                    fat: 0.0,
                    carbs: 0.0,
                    protein: 0.0,
                    sodium_mg: 0.4,
                },
                measures: vec![
                    measure("Measure_serving", "Serving", 591.0),
                    measure("Measure_ounce", "Ounce", 28.349_523_125),
                    measure("Measure_gram", "Gram", 1.0),
                    measure("Measure_pound", "Pound", 453.592_37),
                    measure("Measure_kilogram", "Kilogram", 1000.0),
                    measure("Measure_fluid_ounce", "Fluid ounce", 29.573_529_562_5),
                    measure("Measure_milliliter", "Milliliter", 1.0),
                    measure("Measure_liter", "Liter", 1000.0),
                    measure("Measure_gallon", "Gallon", 3785.411_784),
                ],
                diet_labels: &["LOW_FAT", "LOW_SODIUM"],
                health_labels: &["VEGAN", "VEGETARIAN", "GLUTEN_FREE"],
            },
            Product {
                upc: "016000275287",
                food_id: "food_b4ud3w0a1e2xm3b2qz5k9bdrk7sv",
                label: "Honey Nut Cheerios",
                brand: "General Mills",
                category: "Packaged foods",
                per_100g: Nutrients {
                    kcal: 378.0,
                    fat: 5.4,
                    carbs: 78.4,
                    protein: 8.1,
                    sodium_mg: 568.0,
                },
                measures: vec![
                    measure("Measure_serving", "Serving", 37.0),
                    measure("Measure_cup", "Cup", 37.0),
                    measure("Measure_ounce", "Ounce", 28.349_523_125),
                    measure("Measure_unit", "Serving", 28.0),
                    measure("Measure_gram", "Gram", 1.0),
                ],
                diet_labels: &["LOW_FAT"],
                health_labels: &["VEGETARIAN", "PEANUT_FREE"],
            },
        ])
    }
}
