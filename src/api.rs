//! HTTP client for the receipt service
//!
//! Unauthenticated GET requests returning JSON. Any non-success status or
//! transport failure comes back as an `ApiError`; error bodies are never
//! parsed.

use crate::error::ApiError;
use crate::model::{ReceiptRecord, SearchResponse, SearchResultSummary};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the search and receipt endpoints.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ReceiptClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReceiptClient {
    /// Create a client for the service rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Receipt client targeting {}", base_url);

        Ok(Self { client, base_url })
    }

    /// `GET /search?query=<query>`
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, ApiError> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut().append_pair("query", query);

        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.into_results())
    }

    /// `GET /receipt/adm/<admission_no>`
    pub async fn receipt(&self, admission_no: &str) -> Result<ReceiptRecord, ApiError> {
        let url = self.endpoint(&["receipt", "adm", admission_no])?;
        self.get_json(url).await
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!("GET {} -> {}", url, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn search_handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let query = params.get("query").cloned().unwrap_or_default();
        if query == "nobody" {
            return Json(json!({}));
        }
        Json(json!({
            "results": [
                { "Receipt": 11, "Student's Name": "Zoya", "Adm No": "1003", "Mobile No": "1", "session": "2024-25" },
                { "Receipt": 12, "Student's Name": "Aman", "Adm No": "1001", "Mobile No": "2", "session": "2024-25" },
                { "Receipt": 13, "Student's Name": query, "Adm No": "1002", "Mobile No": "3", "session": "2023-24" }
            ]
        }))
    }

    async fn receipt_handler(Path(adm): Path<String>) -> Result<Json<Value>, StatusCode> {
        match adm.as_str() {
            "1001" | "A/12" => Ok(Json(json!({
                "admission_no": adm,
                "receipt_no": "4521",
                "fee_items": [{ "fee_head": "Tuition Fee", "amount": 1500 }],
                "fee_total": 1500,
                "user": "ramesh"
            }))),
            "garbled" => Ok(Json(json!("not a receipt"))),
            "boom" => Err(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn spawn_service() -> String {
        let app = Router::new()
            .route("/search", get(search_handler))
            .route("/receipt/adm/:adm", get(receipt_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base: &str) -> ReceiptClient {
        ReceiptClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_handles_base_paths() {
        let c = client("https://example.com");
        assert_eq!(
            c.endpoint(&["receipt", "adm", "1001"]).unwrap().as_str(),
            "https://example.com/receipt/adm/1001"
        );

        let c = client("https://example.com/api/");
        assert_eq!(
            c.endpoint(&["search"]).unwrap().as_str(),
            "https://example.com/api/search"
        );

        // Admission numbers are single path segments
        let c = client("https://example.com");
        assert_eq!(
            c.endpoint(&["receipt", "adm", "A/12 b"]).unwrap().as_str(),
            "https://example.com/receipt/adm/A%2F12%20b"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(matches!(
            ReceiptClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ReceiptClient::new("mailto:office@example.com", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn search_preserves_service_order() {
        let base = spawn_service().await;
        let results = client(&base).search("Simran Kaur").await.unwrap();

        let adms: Vec<_> = results.iter().map(|r| r.admission_no.as_str()).collect();
        assert_eq!(adms, ["1003", "1001", "1002"]);
        // Query arrives decoded, spaces intact
        assert_eq!(results[2].student_name, "Simran Kaur");
    }

    #[tokio::test]
    async fn search_without_results_key_is_empty() {
        let base = spawn_service().await;
        let results = client(&base).search("nobody").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn receipt_round_trip() {
        let base = spawn_service().await;
        let c = client(&base);

        let record = c.receipt("1001").await.unwrap();
        assert_eq!(record.admission_no, "1001");
        assert_eq!(record.clerk_user, "ramesh");

        let record = c.receipt("A/12").await.unwrap();
        assert_eq!(record.admission_no, "A/12");
    }

    #[tokio::test]
    async fn receipt_failures_are_typed() {
        let base = spawn_service().await;
        let c = client(&base);

        assert!(matches!(c.receipt("9999").await, Err(ApiError::Status(404))));
        assert!(matches!(c.receipt("boom").await, Err(ApiError::Status(500))));
        assert!(matches!(c.receipt("garbled").await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(&format!("http://{}", addr)).search("1001").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
