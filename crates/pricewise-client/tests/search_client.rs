//! Integration tests for `SearchClient` and `SearchController`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, each user-visible failure
//! kind, and the stale-response gate for overlapping searches.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricewise_client::controller::{EMPTY_QUERY_MESSAGE, FETCH_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
use pricewise_client::{SearchClient, SearchController, SearchError, SearchOutcome};
use pricewise_core::{Source, SourceFilter};

fn test_client(base_url: &str) -> SearchClient {
    SearchClient::with_base_url(base_url, Some(5), "pricewise-test/0.1")
        .expect("failed to build test SearchClient")
}

fn product_json(title: &str, source: &str, price_num: u32) -> serde_json::Value {
    json!({
        "title": title,
        "price": format!("₹{price_num}"),
        "price_num": price_num,
        "rating": "4.2",
        "category": "Mobile Phones",
        "source": source,
        "url": format!("https://example.com/{title}"),
        "image": "N/A"
    })
}

fn success_body(products: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "success": true,
        "query": "phone",
        "total_products": products.len(),
        "products": products
    })
}

// ---------------------------------------------------------------------------
// SearchClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_posts_query_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": "iphone 15"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("iPhone 15", "Flipkart", 69_999),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.search("iphone 15").await.expect("expected Ok");

    assert!(response.success);
    assert_eq!(response.products.len(), 1);
    assert_eq!(response.products[0]["title"], "iPhone 15");
}

#[tokio::test]
async fn search_returns_envelope_on_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "chromedriver crashed",
            "products": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.search("tv").await.expect("expected envelope, not Err");

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("chromedriver crashed"));
}

#[tokio::test]
async fn search_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("tv").await.unwrap_err();

    assert!(
        matches!(err, SearchError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn health_reports_backend_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "message": "Server is running"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let health = client.health().await.expect("expected Ok");

    assert!(health.is_healthy());
}

#[tokio::test]
async fn health_non_success_status_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.health().await.unwrap_err();

    assert!(
        matches!(err, SearchError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// SearchController
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_query_is_rejected_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));

    for query in ["", "   ", "\t\n"] {
        assert_eq!(controller.submit(query).await, SearchOutcome::Rejected);
        let state = controller.snapshot().await;
        assert_eq!(state.error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
        assert!(!state.loading);
    }
}

#[tokio::test]
async fn successful_search_populates_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("a", "Amazon", 300),
            product_json("b", "Flipkart", 100),
            product_json("c", "Amazon", 200),
        ])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    let outcome = controller.submit("phone").await;

    assert_eq!(outcome, SearchOutcome::Loaded { count: 3 });
    let state = controller.snapshot().await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.query, "phone");

    let view = state.view();
    let prices: Vec<f64> = view.products.iter().map(|p| p.price_num).collect();
    assert_eq!(prices, vec![100.0, 200.0, 300.0]);
    assert_eq!(state.headline_deal().map(|p| p.title.as_str()), Some("b"));
}

#[tokio::test]
async fn source_filter_applies_to_loaded_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("a", "Amazon", 300),
            product_json("b", "Flipkart", 100),
            product_json("c", "Amazon", 200),
        ])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    controller.submit("phone").await;
    controller
        .set_source(SourceFilter::Only(Source::Amazon))
        .await;

    let state = controller.snapshot().await;
    let view = state.view();
    let titles: Vec<&str> = view.products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a"]);
    assert_eq!(view.summary(), "Showing 2 of 3 products");
}

#[tokio::test]
async fn empty_result_sets_no_results_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));

    assert_eq!(controller.submit("zzzz").await, SearchOutcome::NoResults);
    let state = controller.snapshot().await;
    assert!(state.products.is_empty());
    assert_eq!(state.error.as_deref(), Some(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn failed_response_never_populates_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "scraper timed out",
            "products": [product_json("leaked", "Amazon", 10)]
        })))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    let outcome = controller.submit("tv").await;

    assert_eq!(
        outcome,
        SearchOutcome::Failed {
            message: "scraper timed out".to_string()
        }
    );
    let state = controller.snapshot().await;
    assert!(state.products.is_empty());
    assert!(state.headline_deal().is_none());
}

#[tokio::test]
async fn failure_without_message_uses_generic_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    let outcome = controller.submit("tv").await;

    assert_eq!(
        outcome,
        SearchOutcome::Failed {
            message: FETCH_FAILED_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn unreadable_response_reports_connection_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    let outcome = controller.submit("tv").await;

    let expected = format!(
        "Failed to connect to server. Make sure the backend is running on {}",
        server.uri()
    );
    assert_eq!(outcome, SearchOutcome::Failed { message: expected });
}

#[tokio::test]
async fn new_search_clears_previous_results_and_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "first"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("old", "Amazon", 100),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "second"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("new", "JioMart", 500),
        ])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));
    controller.submit("   ").await;
    controller.submit("first").await;
    controller.submit("second").await;

    let state = controller.snapshot().await;
    assert!(state.error.is_none());
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].title, "new");
    assert_eq!(state.products[0].source, Source::JioMart);
}

#[tokio::test]
async fn slow_earlier_response_does_not_overwrite_later_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "slow"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(vec![product_json("stale", "Amazon", 1)]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "fast"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            product_json("fresh", "Flipkart", 2),
        ])))
        .mount(&server)
        .await;

    let controller = Arc::new(SearchController::new(test_client(&server.uri())));

    let slow = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit("slow").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let fast_outcome = controller.submit("fast").await;
    let slow_outcome = slow.await.expect("slow search task panicked");

    assert_eq!(fast_outcome, SearchOutcome::Loaded { count: 1 });
    assert_eq!(slow_outcome, SearchOutcome::Superseded);

    let state = controller.snapshot().await;
    assert_eq!(state.query, "fast");
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].title, "fresh");
    assert!(!state.loading);
}

#[tokio::test]
async fn blank_submit_during_search_lets_in_flight_result_land() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "slow"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(vec![product_json("landed", "Amazon", 7)]))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = Arc::new(SearchController::new(test_client(&server.uri())));

    let slow = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit("slow").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(controller.submit("   ").await, SearchOutcome::Rejected);
    let slow_outcome = slow.await.expect("slow search task panicked");

    assert_eq!(slow_outcome, SearchOutcome::Loaded { count: 1 });
    let state = controller.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].title, "landed");
    // The validation message set mid-flight is not cleared by the landing result.
    assert_eq!(state.error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
}

#[tokio::test]
async fn products_carrying_both_link_and_url_are_loaded() {
    let server = MockServer::start().await;

    let mut first = product_json("a", "Amazon", 300);
    first["link"] = json!("https://example.com/a-link");
    let mut second = product_json("b", "Flipkart", 100);
    second["link"] = json!("https://example.com/b-link");

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![first, second])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));

    assert_eq!(controller.submit("phone").await, SearchOutcome::Loaded { count: 2 });
    let state = controller.snapshot().await;
    let links: Vec<&str> = state.products.iter().map(|p| p.link.as_str()).collect();
    assert_eq!(links, vec!["https://example.com/a-link", "https://example.com/b-link"]);
}

#[tokio::test]
async fn malformed_product_is_skipped_without_failing_search() {
    let server = MockServer::start().await;

    let mut malformed = product_json("broken", "Amazon", 50);
    malformed["title"] = serde_json::Value::Null;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(vec![
            malformed,
            product_json("good", "JioMart", 80),
        ])))
        .mount(&server)
        .await;

    let controller = SearchController::new(test_client(&server.uri()));

    assert_eq!(controller.submit("tv").await, SearchOutcome::Loaded { count: 1 });
    let state = controller.snapshot().await;
    assert!(state.error.is_none());
    assert_eq!(state.products[0].title, "good");
}
