use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use property_view::{configure, json_config};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

async fn spawn_app(
    pool: SqlitePool,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(json_config())
            .configure(configure),
    )
    .await
}

fn hotel_request(name: &str, brand: Option<&str>, city: &str) -> Value {
    json!({
        "name": name,
        "brand": brand,
        "address": {
            "houseNumber": "1",
            "street": "Main Street",
            "city": city,
            "county": "Russia",
            "postCode": "100001"
        },
        "contacts": {"phone": "+7 495 111-11-11"}
    })
}

async fn create_hotel<S>(app: &S, body: &Value) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let response = test::TestRequest::post()
        .uri("/property-view/hotels")
        .set_json(body)
        .send_request(app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let summary: Value = test::read_body_json(response).await;
    summary["id"].as_i64().expect("created hotel id")
}

async fn get_json<S>(app: &S, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let response = test::TestRequest::get().uri(uri).send_request(app).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    test::read_body_json(response).await
}

#[actix_web::test]
async fn create_then_fetch_round_trip() {
    let app = spawn_app(test_pool().await).await;

    let request = json!({
        "name": "DoubleTree by Hilton Minsk",
        "description": "The DoubleTree by Hilton Hotel",
        "brand": "Hilton",
        "address": {
            "houseNumber": "9",
            "street": "Pobediteley Avenue",
            "city": "Minsk",
            "county": "Belarus",
            "postCode": "220004"
        },
        "contacts": {
            "phone": "+375 17 309-80-00",
            "email": "doubletreeminsk.info@hilton.com"
        },
        "arrivalTime": {"checkIn": "14:00", "checkOut": "12:00"}
    });

    let response = test::TestRequest::post()
        .uri("/property-view/hotels")
        .set_json(&request)
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let summary: Value = test::read_body_json(response).await;
    assert_eq!(summary["name"], "DoubleTree by Hilton Minsk");
    assert_eq!(
        summary["address"],
        "9 Pobediteley Avenue, Minsk, Belarus, 220004"
    );
    assert_eq!(summary["phone"], "+375 17 309-80-00");

    let id = summary["id"].as_i64().unwrap();
    let detail = get_json(&app, &format!("/property-view/hotels/{id}")).await;
    assert_eq!(detail["name"], "DoubleTree by Hilton Minsk");
    assert_eq!(detail["brand"], "Hilton");
    assert_eq!(detail["address"]["city"], "Minsk");
    assert_eq!(detail["address"]["postCode"], "220004");
    assert_eq!(detail["contacts"]["phone"], "+375 17 309-80-00");
    assert_eq!(detail["contacts"]["email"], "doubletreeminsk.info@hilton.com");
    assert_eq!(detail["arrivalTime"]["checkIn"], "14:00");
    assert_eq!(detail["arrivalTime"]["checkOut"], "12:00");
    assert_eq!(detail["amenities"], json!([]));
}

#[actix_web::test]
async fn summary_address_renders_missing_fields_as_null() {
    let app = spawn_app(test_pool().await).await;

    let request = json!({
        "name": "Plain Hotel",
        "address": {"street": "Tverskaya Street", "city": "Moscow"},
        "contacts": {"phone": "+7 495 222-22-22"}
    });
    let response = test::TestRequest::post()
        .uri("/property-view/hotels")
        .set_json(&request)
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let summary: Value = test::read_body_json(response).await;
    assert_eq!(summary["address"], "null Tverskaya Street, Moscow, null, null");
}

#[actix_web::test]
async fn list_returns_every_hotel() {
    let app = spawn_app(test_pool().await).await;
    create_hotel(&app, &hotel_request("Hotel One", Some("Hilton"), "Minsk")).await;
    create_hotel(&app, &hotel_request("Hotel Two", None, "Moscow")).await;

    let hotels = get_json(&app, "/property-view/hotels").await;
    assert_eq!(hotels.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn missing_hotel_returns_not_found() {
    let app = spawn_app(test_pool().await).await;

    let response = test::TestRequest::get()
        .uri("/property-view/hotels/999")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Hotel not found with id: 999");
}

#[actix_web::test]
async fn add_amenities_is_idempotent() {
    let app = spawn_app(test_pool().await).await;
    let id = create_hotel(&app, &hotel_request("Amenity Hotel", None, "Minsk")).await;

    let response = test::TestRequest::post()
        .uri(&format!("/property-view/hotels/{id}/amenities"))
        .set_json(json!(["Free WiFi", "Pool"]))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Overlapping list, including a duplicate within the request itself.
    let response = test::TestRequest::post()
        .uri(&format!("/property-view/hotels/{id}/amenities"))
        .set_json(json!(["Pool", "Spa", "Spa"]))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let detail = get_json(&app, &format!("/property-view/hotels/{id}")).await;
    assert_eq!(detail["amenities"], json!(["Free WiFi", "Pool", "Spa"]));
}

#[actix_web::test]
async fn add_amenities_to_missing_hotel_returns_not_found() {
    let app = spawn_app(test_pool().await).await;

    let response = test::TestRequest::post()
        .uri("/property-view/hotels/777/amenities")
        .set_json(json!(["Free WiFi"]))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Hotel not found with id: 777");
}

#[actix_web::test]
async fn search_filters_are_conjunctive_and_case_insensitive() {
    let app = spawn_app(test_pool().await).await;
    create_hotel(&app, &hotel_request("Hilton Minsk", Some("Hilton"), "Minsk")).await;
    create_hotel(&app, &hotel_request("Azimut Moscow", Some("Azimut"), "Moscow")).await;
    create_hotel(&app, &hotel_request("Hilton Moscow", Some("Hilton"), "Moscow")).await;

    let all = get_json(&app, "/property-view/search").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    // Blank filter values are skipped entirely.
    let all = get_json(&app, "/property-view/search?city=&name=").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let moscow = get_json(&app, "/property-view/search?city=MOSCOW").await;
    assert_eq!(moscow.as_array().unwrap().len(), 2);

    let hiltons = get_json(&app, "/property-view/search?name=hilton").await;
    assert_eq!(hiltons.as_array().unwrap().len(), 2);

    let both = get_json(&app, "/property-view/search?brand=hilton&city=Moscow").await;
    let both = both.as_array().unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["name"], "Hilton Moscow");
}

#[actix_web::test]
async fn search_applies_only_the_first_amenity() {
    let app = spawn_app(test_pool().await).await;
    let id = create_hotel(&app, &hotel_request("Wired Hotel", None, "Minsk")).await;
    create_hotel(&app, &hotel_request("Bare Hotel", None, "Minsk")).await;

    let response = test::TestRequest::post()
        .uri(&format!("/property-view/hotels/{id}/amenities"))
        .set_json(json!(["Free WiFi"]))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let matched = get_json(&app, "/property-view/search?amenities=free%20wifi").await;
    let matched = matched.as_array().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["name"], "Wired Hotel");

    // "Sauna" comes first in the list, so the WiFi hotel does not match.
    let none = get_json(&app, "/property-view/search?amenities=Sauna,Free%20WiFi").await;
    assert_eq!(none.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn amenities_histogram_includes_unlinked_amenities() {
    let pool = test_pool().await;
    let app = spawn_app(pool.clone()).await;
    let first = create_hotel(&app, &hotel_request("Hotel One", None, "Minsk")).await;
    let second = create_hotel(&app, &hotel_request("Hotel Two", None, "Moscow")).await;

    for id in [first, second] {
        let response = test::TestRequest::post()
            .uri(&format!("/property-view/hotels/{id}/amenities"))
            .set_json(json!(["Free WiFi"]))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    // An amenity row with no hotel links.
    sqlx::query("INSERT INTO amenities (name) VALUES ('Sauna')")
        .execute(&pool)
        .await
        .unwrap();

    let histogram = get_json(&app, "/property-view/histogram/amenities").await;
    assert_eq!(histogram, json!({"Free WiFi": 2, "Sauna": 0}));
}

#[actix_web::test]
async fn brand_histogram_excludes_hotels_without_brand() {
    let app = spawn_app(test_pool().await).await;
    create_hotel(&app, &hotel_request("Hilton Minsk", Some("Hilton"), "Minsk")).await;
    create_hotel(&app, &hotel_request("Hilton Moscow", Some("Hilton"), "Moscow")).await;
    create_hotel(&app, &hotel_request("No Brand Inn", None, "Moscow")).await;

    let histogram = get_json(&app, "/property-view/histogram/brand").await;
    assert_eq!(histogram, json!({"Hilton": 2}));

    let by_city = get_json(&app, "/property-view/histogram/city").await;
    assert_eq!(by_city, json!({"Minsk": 1, "Moscow": 2}));
}

#[actix_web::test]
async fn unsupported_histogram_param_returns_bad_request() {
    let app = spawn_app(test_pool().await).await;

    let response = test::TestRequest::get()
        .uri("/property-view/histogram/stars")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Unsupported histogram parameter: stars");
}

#[actix_web::test]
async fn invalid_create_request_returns_field_error_map() {
    let app = spawn_app(test_pool().await).await;

    let request = json!({
        "name": "   ",
        "address": {"street": "Main Street", "city": ""},
        "contacts": {"phone": "+7 495 333-33-33", "email": "not-an-email"}
    });
    let response = test::TestRequest::post()
        .uri("/property-view/hotels")
        .set_json(&request)
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["name"], "Hotel name is required");
    assert_eq!(body["address.city"], "City is required");
    assert_eq!(body["contacts.email"], "Email should be valid");
}

#[actix_web::test]
async fn unparseable_check_in_time_fails_the_create() {
    let app = spawn_app(test_pool().await).await;

    let mut request = hotel_request("Clock Hotel", None, "Minsk");
    request["arrivalTime"] = json!({"checkIn": "noon"});
    let response = test::TestRequest::post()
        .uri("/property-view/hotels")
        .set_json(&request)
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid time value: noon");
}
