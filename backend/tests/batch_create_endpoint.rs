//! End-to-end coverage for the users endpoints over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use users_api::Trace;
use users_api::domain::ports::{FixtureActionLog, FixtureUserRepository};
use users_api::domain::{ActionNotifier, TRACE_ID_HEADER, UserAccountsService, UserBatchCoordinator};
use users_api::inbound::http::state::{HttpState, HttpStatePorts};
use users_api::inbound::http::users::{batch_create, create_user, list_users};

fn http_state() -> web::Data<HttpState> {
    let repository = Arc::new(FixtureUserRepository::new());
    let notifier = ActionNotifier::new(Arc::new(FixtureActionLog));
    let accounts = Arc::new(UserAccountsService::new(
        Arc::clone(&repository),
        notifier.clone(),
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        users: accounts.clone(),
        user_creation: accounts,
        user_batch: Arc::new(UserBatchCoordinator::new(repository, notifier)),
    }))
}

macro_rules! init_app {
    () => {
        actix_test::init_service(
            App::new()
                .app_data(http_state())
                .wrap(Trace)
                .service(list_users)
                .service(create_user)
                .service(batch_create),
        )
        .await
    };
}

fn post_json(path: &str, body: &Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(path)
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn duplicate_in_batch_is_reported_per_item() {
    let app = init_app!();
    let item_b = json!({"name": "B", "email": "a@x.com"});

    let res = actix_test::call_service(
        &app,
        post_json(
            "/batch-create",
            &json!([
                {"name": "A", "email": "a@x.com"},
                {"email": "noname@x.com"},
                item_b.clone()
            ]),
        )
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["results"][0]["user"]["name"], "A");
    assert_eq!(body["results"][0]["user"]["email"], "a@x.com");
    assert_eq!(body["results"][1]["status"], "error");
    assert_eq!(body["results"][1]["data"], item_b);
    let message = body["results"][1]["error"].as_str().expect("error message");
    assert!(message.contains("duplicate key"), "unexpected message: {message}");
}

#[rstest]
#[case(json!({"name": "A", "email": "a@x.com"}).to_string())]
#[case("\"users\"".to_owned())]
#[case("not json".to_owned())]
#[case(String::new())]
#[actix_web::test]
async fn non_array_body_is_rejected_without_writes(#[case] payload: String) {
    let app = init_app!();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/batch-create")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Request body should be an array");
    assert_eq!(body["code"], "invalid_request");

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn empty_array_yields_empty_report() {
    let app = init_app!();

    let res =
        actix_test::call_service(&app, post_json("/batch-create", &json!([])).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"total": 0, "results": []}));
}

#[actix_web::test]
async fn results_keep_input_order_and_ids_ascend() {
    let app = init_app!();
    let names = ["C", "A", "B", "D"];
    let payload = Value::Array(
        names
            .iter()
            .map(|name| json!({"name": name, "email": format!("{name}@x.com")}))
            .collect(),
    );

    let body: Value =
        actix_test::call_and_read_body_json(&app, post_json("/batch-create", &payload).to_request())
            .await;

    let results = body["results"].as_array().expect("results array");
    let returned: Vec<&str> = results
        .iter()
        .filter_map(|result| result["user"]["name"].as_str())
        .collect();
    assert_eq!(returned, names);
    let ids: Vec<i64> = results
        .iter()
        .filter_map(|result| result["user"]["id"].as_i64())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), names.len());

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(names.len()));
}

#[actix_web::test]
async fn single_create_then_list_and_conflict() {
    let app = init_app!();
    let payload = json!({"name": "Ada", "email": "ada@example.com"});

    let created: Value =
        actix_test::call_and_read_body_json(&app, post_json("/users", &payload).to_request())
            .await;
    assert_eq!(created["name"], "Ada");

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(listed, json!([created]));

    let res = actix_test::call_service(&app, post_json("/users", &payload).to_request()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn empty_single_create_body_is_rejected() {
    let app = init_app!();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/users").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Request body is empty");
}
