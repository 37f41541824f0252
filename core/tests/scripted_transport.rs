//! Resolver behavior against canned responses, with every outgoing request
//! recorded so tests can assert what was (and was not) sent.

use std::cell::RefCell;
use std::collections::VecDeque;

use nutrition_core::{
    ApiError, AttributeRequest, Credentials, HttpMethod, HttpRequest, HttpResponse, IntoQualifiers, NutritionClient,
    ResolveOptions, StatusClass, Transport,
};
use serde_json::{json, Value};

const UPC: &str = "079298000078";
const FOOD_ID: &str = "food_aeqymyrb3waczza6m7kgvbhmkh9q";
const OUNCE: &str = "http://www.edamam.com/ontologies/edamam.owl#Measure_ounce";
const LARGE: &str = "http://www.edamam.com/ontologies/edamam.owl#Qualifier_large";

/// Replays queued responses in order and records each request.
#[derive(Default)]
struct Scripted {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    fn reply(self, status: u16, body: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    fn reply_raw(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for Scripted {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response left".to_string())))
    }
}

fn client() -> NutritionClient {
    NutritionClient::new("https://food.test/api/food-database").with_verbose(false)
}

fn creds() -> Credentials {
    Credentials::new("id", "key")
}

fn hints() -> Value {
    json!({
        "text": UPC,
        "hints": [{
            "food": {"foodId": FOOD_ID, "label": "Water"},
            "measures": [
                {"uri": "u#Measure_serving", "label": "Serving", "weight": 591.0},
                {"uri": OUNCE, "label": "Ounce", "weight": 28.35},
                {"uri": "u#Measure_ounce_dup", "label": "Ounce", "weight": 28.35}
            ]
        }]
    })
}

fn request_body(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

#[test]
fn bare_string_qualifier_fails_before_any_request() {
    let transport = Scripted::default();
    let err = AttributeRequest::new(FOOD_ID, 1.0, OUNCE)
        .with_qualifiers(LARGE)
        .and_then(|request| client().lookup_attribute(&transport, &creds(), &request))
        .unwrap_err();
    assert!(matches!(err, ApiError::QualifierType(_)));
    assert!(transport.sent().is_empty());
}

#[test]
fn single_qualifier_list_is_sent() {
    let transport = Scripted::default().reply(200, json!({"calories": 0}));
    let request = AttributeRequest::new(FOOD_ID, 1.0, OUNCE)
        .with_qualifiers(json!([LARGE]))
        .unwrap();
    let value = client().lookup_attribute(&transport, &creds(), &request).unwrap();
    assert_eq!(value.as_f64(), Some(0.0));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(request_body(&sent[0])["ingredients"][0]["qualifiers"], json!([LARGE]));
}

#[test]
fn negative_quantity_fails_before_any_request() {
    let transport = Scripted::default();
    let request = AttributeRequest::new(FOOD_ID, -1.0, OUNCE);
    let err = client().lookup_attribute(&transport, &creds(), &request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidQuantity(_)));
    assert!(transport.sent().is_empty());
}

#[test]
fn resolve_rejects_bad_quantity_before_food_lookup() {
    for quantity in [-1.0, f64::NAN, f64::INFINITY] {
        let transport = Scripted::default().reply(200, hints());
        let options = ResolveOptions {
            quantity,
            ..ResolveOptions::default()
        };
        let err = client()
            .resolve_by_barcode(&transport, &creds(), UPC, &options)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuantity(_)), "{quantity}: {err:?}");
        assert!(transport.sent().is_empty(), "{quantity}");
    }
}

#[test]
fn resolve_chains_lookup_then_nutrients() {
    let transport = Scripted::default()
        .reply(200, hints())
        .reply(200, json!({"calories": 12, "totalWeight": 85.05}));
    let options = ResolveOptions {
        quantity: 3.0,
        qualifiers: Some([LARGE].into_qualifiers().unwrap()),
        ..ResolveOptions::default()
    };
    let value = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &options)
        .unwrap();
    assert_eq!(value.as_f64(), Some(12.0));

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].query_param("upc"), Some(UPC));
    assert_eq!(sent[0].query_param("app_key"), Some("key"));

    let body = request_body(&sent[1]);
    assert_eq!(
        body,
        json!({"ingredients": [{
            "foodId": FOOD_ID,
            "quantity": 3.0,
            "measureURI": OUNCE,
            "qualifiers": [LARGE]
        }]})
    );
}

#[test]
fn unknown_measure_stops_after_food_lookup() {
    let transport = Scripted::default().reply(200, hints());
    let options = ResolveOptions {
        measure: "Penguins".to_string(),
        ..ResolveOptions::default()
    };
    let err = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &options)
        .unwrap_err();
    match err {
        ApiError::MeasureNotFound { requested, available } => {
            assert_eq!(requested, "Penguins");
            assert_eq!(available, vec!["Serving", "Ounce", "Ounce"]);
        }
        other => panic!("expected MeasureNotFound, got {other:?}"),
    }
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn empty_hints_is_no_candidates() {
    let transport = Scripted::default().reply(200, json!({"text": UPC, "hints": []}));
    let err = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &ResolveOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::NoFoodCandidates { .. }));
}

#[test]
fn food_lookup_status_failure_propagates() {
    let transport = Scripted::default().reply(503, json!({"error": "maintenance"}));
    let err = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &ResolveOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnexpectedStatus { status: 503, class: StatusClass::ServerError, .. }
    ));
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn nutrient_status_failure_is_not_reported_as_missing_key() {
    let transport = Scripted::default()
        .reply(200, hints())
        .reply(401, json!({"status": "error", "message": "Unauthorized app_id = id"}));
    let err = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &ResolveOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnexpectedStatus { status: 401, class: StatusClass::ClientError, .. }
    ));
}

#[test]
fn redirect_is_not_followed() {
    let transport = Scripted::default().reply(302, json!({}));
    let err = client().lookup_food(&transport, &creds(), UPC).unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { class: StatusClass::Redirect, .. }));
}

#[test]
fn missing_attribute_key_surfaces() {
    let transport = Scripted::default()
        .reply(200, hints())
        .reply(200, json!({"calories": 0}));
    let options = ResolveOptions {
        attribute: "caffeine".to_string(),
        ..ResolveOptions::default()
    };
    let err = client()
        .resolve_by_barcode(&transport, &creds(), UPC, &options)
        .unwrap_err();
    assert!(matches!(err, ApiError::AttributeNotFound { attribute } if attribute == "caffeine"));
}

#[test]
fn transport_failure_propagates_unchanged() {
    let transport = Scripted::default().fail("connection refused");
    let err = client().lookup_food(&transport, &creds(), UPC).unwrap_err();
    assert!(matches!(err, ApiError::Transport(msg) if msg == "connection refused"));
}

#[test]
fn malformed_lookup_body_is_reported() {
    let transport = Scripted::default().reply_raw(200, "<html>oops</html>");
    let err = client().lookup_food(&transport, &creds(), UPC).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}
