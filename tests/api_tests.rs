//! End-to-end tests for the `/temperatura/{cep}` endpoint
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` while
//! both upstreams are served by wiremock.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use cep_weather::{AppConfig, AppState, router};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

struct Upstreams {
    viacep: MockServer,
    weather: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        let viacep = MockServer::start().await;
        let weather = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/99999999/json/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })),
            )
            .mount(&viacep)
            .await;

        Mock::given(method("GET"))
            .and(path("/ws/01001000/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": "01001000",
                "localidade": "São Paulo",
                "uf": "SP",
                "erro": false
            })))
            .mount(&viacep)
            .await;

        Mock::given(method("GET"))
            .and(path("/ws/22222222/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&viacep)
            .await;

        Mock::given(method("GET"))
            .and(path("/ws/33333333/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": "33333333",
                "localidade": "Nowhere",
                "uf": "XX"
            })))
            .mount(&viacep)
            .await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "São Paulo,SP"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "current": { "temp_c": 25 } })),
            )
            .mount(&weather)
            .await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("q", "Nowhere,XX"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&weather)
            .await;

        Self { viacep, weather }
    }

    fn app(&self) -> Router {
        let config = AppConfig {
            weather_api_key: Some("test-key".to_string()),
            viacep_base_url: self.viacep.uri(),
            weather_base_url: self.weather.uri(),
            http_timeout_seconds: 5,
            ..AppConfig::default()
        };
        router(AppState::from_config(&config).expect("Failed to build state"))
    }
}

async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).expect("content type"),
        "application/json"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
}

#[tokio::test]
async fn test_invalid_cep_format() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::GET, "/temperatura/123").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, r#"{"message":"CEP inválido"}"#);
}

#[tokio::test]
async fn test_unknown_cep() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::GET, "/temperatura/99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"message":"CEP não encontrado"}"#);
}

#[tokio::test]
async fn test_valid_cep() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::GET, "/temperatura/01001000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"temp_C":25,"temp_F":77,"temp_K":298}"#);
}

#[tokio::test]
async fn test_post_not_allowed() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::POST, "/temperatura/01001000").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, r#"{"message":"Método não permitido"}"#);
}

#[tokio::test]
async fn test_malformed_lookup_response_reports_not_found() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::GET, "/temperatura/22222222").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"message":"CEP não encontrado"}"#);
}

#[tokio::test]
async fn test_lookup_without_mock_reports_not_found() {
    let upstreams = Upstreams::start().await;

    // wiremock answers unmatched requests with 404
    let (status, _) = call(upstreams.app(), Method::GET, "/temperatura/44444444").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_weather_failure() {
    let upstreams = Upstreams::start().await;

    let (status, body) = call(upstreams.app(), Method::GET, "/temperatura/33333333").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"message":"Erro ao obter temperatura"}"#);
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let upstreams = Upstreams::start().await;

    let (first_status, first) = call(upstreams.app(), Method::GET, "/temperatura/01001000").await;
    let (second_status, second) =
        call(upstreams.app(), Method::GET, "/temperatura/01001000").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
}
