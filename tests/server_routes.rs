use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use query_resolve::server::{AppState, ResolveResponse, ResolvedParam, router};
use query_resolve::settings::Settings;

fn app(toml: &str) -> axum::Router {
    let settings = Settings::from_toml_str(toml).expect("settings");
    router(Arc::new(AppState::new(&settings).expect("state")))
}

async fn call(app: axum::Router, request: Request<Body>) -> (StatusCode, ResolveResponse) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json"))
}

fn post(json: &str) -> Request<Body> {
    Request::post("/v1/resolve")
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

#[tokio::test]
async fn get_groups_repeated_parameters() {
    let request = Request::get("/v1/resolve?tag=a,b&tag=c&debug=true&name=").body(Body::empty()).unwrap();
    let (status, body) = call(app("[array]\nflat = true"), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    let params = body.params.expect("params");
    assert_eq!(
        params["tag"],
        ResolvedParam { string: Some("a,b".into()), array: vec!["a".into(), "b".into(), "c".into()], boolean: false }
    );
    assert!(params["debug"].boolean);
    assert_eq!(params["name"], ResolvedParam { string: None, array: Vec::new(), boolean: false });
}

#[tokio::test]
async fn get_decodes_before_resolving() {
    let request = Request::get("/v1/resolve?email=hello%40example.com&ids=1%7C2").body(Body::empty()).unwrap();
    let (status, body) = call(app("[array]\ndelimiter = \"|\""), request).await;
    assert_eq!(status, StatusCode::OK);
    let params = body.params.expect("params");
    assert_eq!(params["email"].string.as_deref(), Some("hello@example.com"));
    assert_eq!(params["ids"].array, vec!["1", "2"]);
}

#[tokio::test]
async fn post_with_present_required_parameter() {
    let (status, body) = call(app(""), post(r#"{"params": {"id": ["7", "8"], "skip": null}, "required": ["id"]}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let params = body.params.expect("params");
    assert_eq!(params["id"].string.as_deref(), Some("7"));
    assert_eq!(params["skip"], ResolvedParam { string: None, array: Vec::new(), boolean: false });
}

#[tokio::test]
async fn post_missing_required_parameter_is_bad_request() {
    let (status, body) = call(app(""), post(r#"{"params": {"id": ""}, "required": ["id"]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.status, "error");
    assert_eq!(body.error.as_deref(), Some("Missing required query parameter"));
    assert!(body.params.is_none());
}

#[tokio::test]
async fn configured_missing_message() {
    let (status, body) = call(app("[string]\nmissing_message = \"id please\""), post(r#"{"required": ["id"]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error.as_deref(), Some("id please"));
}
