//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint; the `query` argument is the
//! raw query string including the leading `?` (or empty for none). When
//! routes change, update only this file.

use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get(&self, path_and_query: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path_and_query))
            .send()
            .await
            .expect("Request failed")
    }

    /// A request with a real transport verb instead of the usual GET.
    pub async fn request(&self, method: reqwest::Method, path_and_query: &str) -> Response {
        self.client
            .request(method, format!("{}{}", self.base_url, path_and_query))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn home(&self) -> Response {
        self.get("/").await
    }

    pub async fn music(&self, query: &str) -> Response {
        self.get(&format!("/music{}", query)).await
    }

    pub async fn music_by_id(&self, id: &str) -> Response {
        self.get(&format!("/music/{}", id)).await
    }

    pub async fn album(&self, query: &str) -> Response {
        self.get(&format!("/album{}", query)).await
    }

    pub async fn artist(&self, query: &str) -> Response {
        self.get(&format!("/artist{}", query)).await
    }

    pub async fn group(&self, query: &str) -> Response {
        self.get(&format!("/group{}", query)).await
    }

    pub async fn genre(&self, query: &str) -> Response {
        self.get(&format!("/genre{}", query)).await
    }

    pub async fn link(&self, query: &str) -> Response {
        self.get(&format!("/link{}", query)).await
    }

    pub async fn search(&self, query: &str) -> Response {
        self.get(&format!("/search{}", query)).await
    }

    pub async fn mjoinl(&self, query: &str) -> Response {
        self.get(&format!("/mjoinl{}", query)).await
    }

    pub async fn arjoing(&self, query: &str) -> Response {
        self.get(&format!("/arjoing{}", query)).await
    }

    pub async fn joinall(&self, query: &str) -> Response {
        self.get(&format!("/joinall{}", query)).await
    }

    pub async fn viewlinks(&self, query: &str) -> Response {
        self.get(&format!("/viewlinks{}", query)).await
    }
}
