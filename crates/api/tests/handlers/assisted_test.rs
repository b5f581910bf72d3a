use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetablegen_core::{
    external::{OPTIMIZE_SYSTEM_PROMPT, SYSTEM_PROMPT},
    models::external::ModelTimetable,
};

use crate::test_utils::{MockModel, TestContext};

fn constraints() -> Value {
    json!({
        "courses": [{ "name": "Math 101", "code": "MATH101" }],
        "faculty": [{ "name": "John Doe", "employeeId": "F001" }],
        "classrooms": [{ "name": "Room 101", "capacity": 30 }]
    })
}

fn model_reply() -> String {
    json!({
        "schedule": [{
            "time": "8:30 - 9:20",
            "Monday": { "subject": "MATH101", "room": "Room 101", "type": "lecture" }
        }],
        "subjects": [{ "code": "MATH101", "name": "Math 101", "faculty": "John Doe" }]
    })
    .to_string()
}

#[tokio::test]
async fn test_assisted_generation_success() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .withf(|system: &str, prompt: &str| system == SYSTEM_PROMPT && prompt.contains("MATH101"))
        .times(1)
        .returning(|_, _| Ok(model_reply()));
    let server = TestContext::new().with_model(model).server();

    let response = server.post("/api/timetables/assisted").json(&constraints()).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let timetable: ModelTimetable = response.json();
    assert_eq!(timetable.schedule[0].days["Monday"].subject, "MATH101");
    assert_eq!(timetable.subjects[0].faculty, "John Doe");
}

#[tokio::test]
async fn test_assisted_generation_malformed_reply() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .times(1)
        .returning(|_, _| Ok("Monday: Math 101 (Room 101) - John Doe".to_string()));
    let server = TestContext::new().with_model(model).server();

    let response = server.post("/api/timetables/assisted").json(&constraints()).await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().contains("not well-formed JSON"));
}

#[tokio::test]
async fn test_assisted_generation_transport_failure() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("connection refused")));
    let server = TestContext::new().with_model(model).server();

    let response = server.post("/api/timetables/assisted").json(&constraints()).await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_assisted_generation_requires_configuration() {
    let server = TestContext::new().server();

    let response = server.post("/api/timetables/assisted").json(&constraints()).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_assisted_generation_forwards_only_constraint_keys() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .withf(|_: &str, prompt: &str| prompt.contains("Room 101") && !prompt.contains("sessionToken"))
        .times(1)
        .returning(|_, _| Ok(model_reply()));
    let server = TestContext::new().with_model(model).server();

    let mut body = constraints();
    body["sessionToken"] = json!("abc123");
    let response = server.post("/api/timetables/assisted").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_assisted_optimize_success() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .withf(|system: &str, prompt: &str| {
            system == OPTIMIZE_SYSTEM_PROMPT
                && prompt.contains("Optimize this timetable")
                && prompt.contains("CS101")
                && prompt.contains("MATH101")
        })
        .times(1)
        .returning(|_, _| Ok(model_reply()));
    let server = TestContext::new().with_model(model).server();

    let body = json!({
        "timetable": {
            "schedule": [{
                "time": "8:30 - 9:20",
                "Monday": { "subject": "CS101", "room": "Room 101", "type": "lecture" }
            }],
            "subjects": []
        },
        "constraints": constraints()
    });
    let response = server
        .post("/api/timetables/assisted/optimize")
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let timetable: ModelTimetable = response.json();
    assert_eq!(timetable.schedule[0].days["Monday"].subject, "MATH101");
}

#[tokio::test]
async fn test_assisted_optimize_malformed_reply() {
    let mut model = MockModel::new();
    model
        .expect_complete()
        .times(1)
        .returning(|_, _| Ok(json!({ "schedule": "Monday: Math 101" }).to_string()));
    let server = TestContext::new().with_model(model).server();

    let body = json!({ "timetable": { "schedule": [], "subjects": [] }, "constraints": constraints() });
    let response = server
        .post("/api/timetables/assisted/optimize")
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    let error: Value = response.json();
    assert!(
        error["error"]
            .as_str()
            .unwrap()
            .contains("does not match the timetable structure")
    );
}

#[tokio::test]
async fn test_assisted_optimize_requires_configuration() {
    let server = TestContext::new().server();

    let body = json!({ "timetable": { "schedule": [], "subjects": [] } });
    let response = server
        .post("/api/timetables/assisted/optimize")
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
