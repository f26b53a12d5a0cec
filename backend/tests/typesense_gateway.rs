use backend::api::documents::get_document::get_document;
use backend::api::health::health_check;
use backend::api::search::{search_facets, search_for_results, try_search_for_results};
use backend::db_utils::typesense_utils::{SearchService, SearchServiceError, TypesenseClient};
use common::filter_expression::FilterExpression;
use common::search_query::{RawSearchParams, SearchRequest};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "search-only-key";

fn client_for(uri: &str) -> TypesenseClient {
    TypesenseClient::with_http_client(reqwest::Client::new(), uri, API_KEY).unwrap()
}

fn unreachable_client() -> TypesenseClient {
    client_for("http://127.0.0.1:1")
}

fn search_response() -> serde_json::Value {
    serde_json::json!({
        "facet_counts": [
            {"field_name": "category", "counts": [{"count": 1, "highlighted": "Electronics", "value": "Electronics"}]},
            {"field_name": "brand", "counts": [{"count": 1, "highlighted": "SoundMax", "value": "SoundMax"}]},
            {"field_name": "in_stock", "counts": [{"count": 1, "highlighted": "true", "value": "true"}]}
        ],
        "found": 1,
        "hits": [{
            "document": {
                "id": "42",
                "name": "Studio Headphones",
                "description": "Closed-back studio monitoring headphones.",
                "category": "Electronics",
                "price": 149.0,
                "rating": 4.7,
                "in_stock": true,
                "brand": "SoundMax",
                "tags": ["studio"]
            },
            "highlights": [{"field": "name", "snippet": "Studio <mark>Headphones</mark>", "matched_tokens": ["Headphones"]}],
            "text_match": 1157451471441100800u64
        }],
        "out_of": 100,
        "page": 1,
        "request_params": {"collection_name": "products", "per_page": 12, "q": "headphones"},
        "search_time_ms": 2
    })
}

fn headphones_request() -> SearchRequest {
    SearchRequest::from_params(&RawSearchParams {
        q: Some("headphones".to_string()),
        filter_by: Some("in_stock:=true".to_string()),
        sort_by: None,
        page: Some("1".to_string()),
    })
}

#[tokio::test]
async fn search_sends_normalized_parameters_and_maps_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/products/documents/search"))
        .and(header("X-TYPESENSE-API-KEY", API_KEY))
        .and(query_param("q", "headphones"))
        .and(query_param("query_by", "name,description,content,category,tags"))
        .and(query_param("filter_by", "in_stock:=true"))
        .and(query_param("sort_by", "_text_match:desc,rating:desc"))
        .and(query_param("facet_by", "category,brand,in_stock"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "12"))
        .and(query_param("highlight_fields", "name,description"))
        .and(query_param("highlight_start_tag", "<mark>"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = search_for_results(&client, "products", &headphones_request()).await;

    assert!(!result.served_from_fallback);
    assert_eq!(result.found, 1);
    assert_eq!(result.search_time_ms, 2);
    assert_eq!(result.hits[0].document.id, "42");
    assert_eq!(result.hits[0].document.brand, "SoundMax");
    let spans = &result.hits[0].highlights[0].spans;
    assert_eq!(spans[1].text, "Headphones");
    assert!(spans[1].is_highlighted);
    assert_eq!(result.facet("brand").unwrap().counts[0].value, "SoundMax");
}

#[tokio::test]
async fn toggled_filter_reaches_the_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/products/documents/search"))
        .and(query_param("filter_by", "in_stock:=true && category:[`Home & Garden`]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SearchRequest {
        filter: FilterExpression::parse("in_stock:=true").toggle("category", "Home & Garden"),
        ..SearchRequest::default()
    };
    let client = client_for(&mock_server.uri());
    let result = try_search_for_results(&client, "products", &request).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn service_error_status_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/products/documents/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = try_search_for_results(&client, "products", &headphones_request())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchServiceError::Status { status: 503, .. }));

    let result = search_for_results(&client, "products", &headphones_request()).await;
    assert!(result.served_from_fallback);
}

#[tokio::test]
async fn undecodable_response_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = search_for_results(&client, "products", &SearchRequest::default()).await;
    assert!(result.served_from_fallback);
    assert_eq!(result.found, 2);
}

#[tokio::test]
async fn unreachable_service_returns_filtered_fallback() {
    let client = unreachable_client();

    let result = search_for_results(&client, "products", &headphones_request()).await;
    assert!(result.served_from_fallback);
    assert_eq!(result.found, 1);
    assert_eq!(result.hits.len(), 1);
    assert!(result.hits[0].document.name.to_lowercase().contains("headphones"));

    let request = SearchRequest {
        query_string: "xyz-no-match".to_string(),
        ..SearchRequest::default()
    };
    let result = search_for_results(&client, "products", &request).await;
    assert_eq!(result.found, 0);
    assert!(result.hits.is_empty());
}

#[tokio::test]
async fn facet_only_query_and_its_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/products/documents/search"))
        .and(query_param("q", "*"))
        .and(query_param("per_page", "0"))
        .and(query_param("facet_by", "brand"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "facet_counts": [{"field_name": "brand", "counts": [
                {"count": 2, "highlighted": "A", "value": "A"},
                {"count": 7, "highlighted": "B", "value": "B"}
            ]}],
            "found": 9,
            "hits": [],
            "page": 1,
            "search_time_ms": 0
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let facets = search_facets(&client, "products", &["brand".to_string()]).await;
    assert_eq!(facets.len(), 1);
    assert_eq!(facets[0].counts[0].value, "B");

    let facets = search_facets(&unreachable_client(), "products", &["brand".to_string()]).await;
    assert!(facets.is_empty());
}

#[tokio::test]
async fn document_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/products/documents/42"))
        .and(header("X-TYPESENSE-API-KEY", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42", "name": "Studio Headphones", "category": "Electronics", "price": 149.0
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/products/documents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Could not find a document with id: missing"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let product = get_document(&client, "products", "42").await.unwrap();
    assert_eq!(product.name, "Studio Headphones");

    let err = get_document(&client, "products", "missing").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SearchServiceError>(),
        Some(SearchServiceError::NotFound(id)) if id == "missing"
    ));
}

#[tokio::test]
async fn health_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    assert!(client.health().await.unwrap());
    assert!(health_check(&client).await);
    assert!(!health_check(&unreachable_client()).await);
}
