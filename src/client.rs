//! A thin wrapper around a blocking HTTP client shared by all of the data
//! fetchers.

use std::time::Duration;

pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new() -> Result<Client, reqwest::Error> {
        Ok(Client {
            http: reqwest::blocking::Client::builder()
                .user_agent(concat!("presence/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(60))
                .build()?,
        })
    }

    /// Starts a GET request. Callers attach their own headers and query
    /// parameters, then `send()` and map non-success statuses with
    /// `error_for_status()`.
    pub fn get(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.http.get(url)
    }
}
