//! ApiClient against the mock backend's echo surface.

use serde_json::{json, Value};
use std::time::Duration;
use veritas_common::{ApiClient, Error, Service, ServiceRegistry};
use veritas_e2e::{init_tracing, MockBackend};

fn client_for(mock: &MockBackend) -> ApiClient {
    let registry = Service::ALL
        .iter()
        .fold(ServiceRegistry::empty(), |r, svc| {
            r.with_override(*svc, mock.service_url())
        });
    ApiClient::new(registry)
}

#[tokio::test]
async fn verbs_send_json_to_registry_urls() {
    init_tracing();
    let mock = MockBackend::start().await.expect("mock backend");
    let client = client_for(&mock);

    let got: Value = client.get(Service::TestManager, "/suites").await.unwrap();
    assert_eq!(got["method"], "GET");
    assert_eq!(got["path"], "/svc/suites");

    let payload = json!({"title": "login works", "priority": "high"});
    let got: Value = client
        .post(Service::TestManager, "/cases", &payload)
        .await
        .unwrap();
    assert_eq!(got["method"], "POST");
    assert_eq!(got["body"], payload);

    let got: Value = client
        .put(Service::ExecutionEngine, "/runs/3", &json!({"state": "done"}))
        .await
        .unwrap();
    assert_eq!(got["method"], "PUT");
    assert_eq!(got["body"]["state"], "done");

    let got: Value = client
        .delete(Service::EvidenceManager, "/evidence/9")
        .await
        .unwrap();
    assert_eq!(got["method"], "DELETE");

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    for req in &requests {
        assert_eq!(req.content_type.as_deref(), Some("application/json"), "{:?}", req);
    }
    assert_eq!(requests[1].body, Some(payload));
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    init_tracing();
    let mock = MockBackend::start().await.expect("mock backend");
    let client = client_for(&mock);
    mock.fail("GET", "/svc/missing", 404);
    mock.fail("POST", "/svc/cases", 500);

    let err = client
        .get::<Value>(Service::QualityAnalytics, "/missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http { status: 404, .. }), "{:?}", err);
    assert!(err.to_string().contains("404"));

    let err = client
        .post::<_, Value>(Service::TestManager, "/cases", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));

    // One attempt each, no retries.
    mock.expect_count("GET", "/svc/missing", 1).unwrap();
    mock.expect_count("POST", "/svc/cases", 1).unwrap();
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let mock = MockBackend::start().await.expect("mock backend");
    let client = client_for(&mock);

    let got: Value = client.delete(Service::Portal, "/empty").await.unwrap();
    assert_eq!(got, Value::Null);

    let got: Option<Value> = client.get(Service::Portal, "/empty").await.unwrap();
    assert_eq!(got, None);
}

#[tokio::test]
async fn unparseable_body_is_a_serialization_error() {
    let mock = MockBackend::start().await.expect("mock backend");
    let client = client_for(&mock);

    let err = client
        .get::<Value>(Service::Portal, "/not-json")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)), "{:?}", err);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let registry = ServiceRegistry::empty().with_override(Service::Portal, "http://127.0.0.1:9/api");
    let client = ApiClient::new(registry);

    let err = client.get::<Value>(Service::Portal, "/health").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{:?}", err);

    let err = client
        .get::<Value>(Service::TestManager, "/health")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownService(_)), "{:?}", err);
}

#[tokio::test]
async fn stalled_service_times_out() {
    init_tracing();
    let mock = MockBackend::start().await.expect("mock backend");
    mock.stall("GET", "/svc/slow");
    let registry = ServiceRegistry::empty().with_override(Service::Portal, mock.service_url());
    let client = ApiClient::with_timeout(registry, Duration::from_millis(200));

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        client.get::<Value>(Service::Portal, "/slow"),
    )
    .await
    .expect("client timeout did not fire")
    .unwrap_err();
    assert!(matches!(err, Error::Transport(ref e) if e.is_timeout()), "{:?}", err);
    assert_eq!(mock.count("GET", "/svc/slow"), 1);
}
