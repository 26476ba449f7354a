//! HTTP fetch abstraction used by backends

use std::time::Duration;

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use reqwest::StatusCode;
use reqwest::header::IF_MODIFIED_SINCE;
use tracing::debug;

use crate::config::HttpConfig;

/// Status and body of an upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Issues conditional GET requests
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetches `url`; when `last_change` is set the request only succeeds with a body
    /// if upstream changed since then, otherwise upstream answers 304.
    async fn fetch(
        &self,
        url: &str,
        last_change: Option<DateTime<Utc>>,
    ) -> Result<HttpResponse, reqwest::Error>;
}

/// Formats a timestamp as an HTTP date (RFC 7231 IMF-fixdate)
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `HttpClient` backed by reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn fetch(
        &self,
        url: &str,
        last_change: Option<DateTime<Utc>>,
    ) -> Result<HttpResponse, reqwest::Error> {
        let mut request = self.client.get(url);
        if let Some(time) = last_change {
            request = request.header(IF_MODIFIED_SINCE, http_date(time));
        }

        debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("GET {} returned {}", url, status);

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};

    #[test]
    fn http_date_uses_imf_fixdate() {
        let time = Utc.with_ymd_and_hms(1994, 11, 15, 8, 12, 31).unwrap();

        assert_eq!(http_date(time), "Tue, 15 Nov 1994 08:12:31 GMT");
    }

    #[tokio::test]
    async fn fetch_sends_if_modified_since_when_last_change_is_set() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_header("if-modified-since", "Tue, 15 Nov 1994 08:12:31 GMT")
            .with_status(304)
            .create_async()
            .await;

        let client = ReqwestClient::new(&HttpConfig::default()).unwrap();
        let last_change = Utc.with_ymd_and_hms(1994, 11, 15, 8, 12, 31).unwrap();
        let response = client
            .fetch(&format!("{}/tags", server.url()), Some(last_change))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn fetch_omits_if_modified_since_without_last_change() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_header("if-modified-since", Matcher::Missing)
            .match_header("user-agent", "release-monitor")
            .with_status(200)
            .with_body(r#"{"tags": []}"#)
            .create_async()
            .await;

        let client = ReqwestClient::new(&HttpConfig::default()).unwrap();
        let response = client
            .fetch(&format!("{}/tags", server.url()), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response, HttpResponse::new(StatusCode::OK, r#"{"tags": []}"#));
    }

    #[tokio::test]
    async fn fetch_returns_error_status_without_failing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error": "Project not found"}"#)
            .create_async()
            .await;

        let client = ReqwestClient::new(&HttpConfig::default()).unwrap();
        let response = client
            .fetch(&format!("{}/missing", server.url()), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
