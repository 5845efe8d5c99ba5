use http;
use reqwest::header::HeaderMap;
use std::time::Duration;
use std::{future::Future, pin::Pin};

use crate::constants::REQUEST_TIMEOUT_SECS;

/// A trait that represents an HTTP client for making requests to the Gemini
/// API. This abstraction enables real HTTP requests to the endpoint while
/// also supporting mock implementations for testing.
pub trait HttpClient: Send + Sync {
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        // The checker makes exactly one request; the client timeout is the
        // only cancellation mechanism. Building fails only when no TLS
        // backend can be initialized, where reqwest::Client::new panics too.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        ReqwestClient { client }
    }
}

impl HttpClient for ReqwestClient {
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .post(url)
                .json(&body)
                .headers(headers)
                .send()
                .await
        })
    }
}

/// A mock client that replays a canned response with a configurable status
/// code, so tests can drive every status branch of the checker.
#[derive(Debug)]
pub struct MockHttpClient<T: Send + Sync + Clone> {
    pub status: u16,
    pub response: T,
}

impl<T: serde::Serialize + Send + Sync + Clone> MockHttpClient<T> {
    pub fn new(response: T) -> Self {
        Self {
            status: 200,
            response,
        }
    }

    pub fn with_status(status: u16, response: T) -> Self {
        Self { status, response }
    }
}

impl<T: serde::Serialize + Send + Sync + Clone> HttpClient for MockHttpClient<T> {
    #[allow(unused_variables)]
    fn post_json<'a, U: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a U,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        let status = self.status;
        let response = self.response.clone();
        Box::pin(async move {
            // Serialize the response to JSON and create a reqwest::Response
            let json = serde_json::to_string(&response).unwrap();
            let bytes = bytes::Bytes::from(json);

            let builder = http::Response::builder()
                .status(status)
                .header("content-type", "application/json");

            let http_response = builder.body(bytes).unwrap();

            Ok(reqwest::Response::from(http_response))
        })
    }
}
