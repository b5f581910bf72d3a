use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetablegen_api::handlers::timetable::resolve_seed;
use timetablegen_core::models::request::GenerateTimetableResponse;

use crate::test_utils::{TestContext, scenario_body};

#[tokio::test]
async fn test_generate_timetable_scenario() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["seed"] = json!(7);

    let response = server.post("/api/timetables").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let payload: GenerateTimetableResponse = response.json();
    assert_eq!(payload.seed, 7);
    let grid: Vec<String> = payload.grid.iter().map(ToString::to_string).collect();
    assert_eq!(grid, vec!["08:30", "09:20", "10:10"]);

    let section = payload.timetables.get("A").expect("section A present");
    assert_eq!(section.len(), 3);
    assert_eq!(section.entries()[1].subject, "Tea Break");
    assert!(section.entries()[1].is_break());
}

#[tokio::test]
async fn test_generate_timetable_is_reproducible_from_seed() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["days"] = json!(["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]);
    body["seed"] = json!(123);

    let first: Value = server.post("/api/timetables").json(&body).await.json();
    let second: Value = server.post("/api/timetables").json(&body).await.json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_default_seed_is_used_when_request_has_none() {
    let server = TestContext::new().with_default_seed(42).server();

    let payload: GenerateTimetableResponse = server
        .post("/api/timetables")
        .json(&scenario_body())
        .await
        .json();

    assert_eq!(payload.seed, 42);
}

#[tokio::test]
async fn test_generate_timetable_validation_failure() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["department"] = json!("");
    body["totalStudents"] = json!(25);

    let response = server.post("/api/timetables").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let error: Value = response.json();
    let fields: Vec<&str> = error["details"]
        .as_array()
        .expect("details array")
        .iter()
        .filter_map(|issue| issue["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["department", "sections"]);
}

#[tokio::test]
async fn test_generate_timetable_bad_grid() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["dayStart"] = json!("11:00");

    let response = server.post("/api/timetables").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().starts_with("Configuration error"));
}

#[tokio::test]
async fn test_export_timetable_rows() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["seed"] = json!(3);

    let response = server.post("/api/timetables/export").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let rows: Value = response.json();
    let section = rows["A"].as_array().expect("rows for section A");
    assert_eq!(section.len(), 3);
    assert_eq!(
        section[1],
        json!({ "day": "Monday", "time": "09:20", "subject": "Tea Break", "faculty": "" })
    );
    assert!(section[0].get("type").is_none());
}

#[tokio::test]
async fn test_generate_timetable_rejects_oversize_request() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["dayStart"] = json!("00:00");
    body["dayEnd"] = json!("23:55");
    body["periodMinutes"] = json!(5);
    body["days"] = json!(["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]);
    let sections: Vec<Value> = (0..20)
        .map(|i| json!({ "name": format!("S{i}"), "studentCount": 1 }))
        .collect();
    body["sections"] = json!(sections);
    body["totalStudents"] = json!(20);

    let response = server.post("/api/timetables").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let error: Value = response.json();
    assert_eq!(error["details"][0]["field"], json!("timetable"));
}

#[tokio::test]
async fn test_generate_timetable_keeps_section_order() {
    let server = TestContext::new().server();
    let mut body = scenario_body();
    body["totalStudents"] = json!(20);
    body["sections"] = json!([
        { "name": "B", "studentCount": 10 },
        { "name": "A", "studentCount": 10 }
    ]);

    let response = server.post("/api/timetables").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let text = response.text();
    let b = text.find("\"B\":").expect("section B present");
    let a = text.find("\"A\":").expect("section A present");
    assert!(b < a);
}

#[tokio::test]
async fn test_health_reports_model_backend() {
    let server = TestContext::new().server();

    let health: Value = server.get("/health").await.json();
    assert_eq!(health, json!({ "status": "ok", "assistedGeneration": false }));
}

#[test]
fn test_resolve_seed_priority() {
    assert_eq!(resolve_seed(Some(1), Some(2)), 1);
    assert_eq!(resolve_seed(None, Some(2)), 2);
}
