//! Integration tests for the village forecast client against a mock server.

use chrono::NaiveDate;
use forecast_common::{FailureKind, ForecastWindow, GridCell, IssueSlot};
use forecast_engine::{ForecastSource, SourceError};
use kma_client::{KmaClient, KmaConfig};
use test_utils::generators::{api_error_payload, gateway_error_xml, hourly_series, village_forecast_payload};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn window() -> ForecastWindow {
    ForecastWindow::new(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(), IssueSlot::H1100)
}

fn client_for(server: &MockServer) -> KmaClient {
    let mut config = KmaConfig::new(server.uri(), "test+key/==");
    config.request_timeout_secs = 2;
    KmaClient::new(config).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .and(query_param("serviceKey", "test+key/=="))
        .and(query_param("pageNo", "1"))
        .and(query_param("numOfRows", "1000"))
        .and(query_param("dataType", "JSON"))
        .and(query_param("base_date", "20240515"))
        .and(query_param("base_time", "1100"))
        .and(query_param("nx", "60"))
        .and(query_param("ny", "127"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_series(&window(), &["TMP", "POP"], 4, 20)))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap();

    assert_eq!(records.len(), 8);
    assert!(records.iter().any(|r| r.category == "POP"));
    assert_eq!(records[0].forecast_at, window().issued_at());
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Status { status: 503 }));
    assert_eq!(err.failure_kind(), FailureKind::UpstreamFetchFailed);
}

#[tokio::test]
async fn test_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::EmptyBody));
}

#[tokio::test]
async fn test_api_error_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_error_payload("10", "INVALID_REQUEST_PARAMETER_ERROR")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), FailureKind::ParseFailed);
}

#[tokio::test]
async fn test_gateway_xml_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/xml;charset=UTF-8")
                .set_body_string(gateway_error_xml("22", "LIMITED_NUMBER_OF_SERVICE_REQUESTS_EXCEEDS_ERROR")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    match err {
        SourceError::Api { code, .. } => assert_eq!(code, "22"),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"response\": [1, 2"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Malformed(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(village_forecast_payload(&[("TMP", "20240515", "1200", "21")]))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let config = KmaConfig::new("http://127.0.0.1:9", "key");
    let err = KmaClient::new(config)
        .unwrap()
        .fetch(GridCell::new(60, 127), &window())
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), FailureKind::UpstreamFetchFailed);
}
