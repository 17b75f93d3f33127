use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::Error;
use crate::repositories::supabase::config::SupabaseConfig;

/// Thin REST client for a Supabase project.
///
/// Constructed once at startup and handed to whatever needs it; there is no
/// global handle.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    pub fn rest_url(&self, relation: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base(), relation)
    }

    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.config.base(), path)
    }

    /// Request with the project key attached as both `apikey` and bearer token.
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> RequestBuilder {
        self.http
            .request(method, url.as_ref())
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
    }

    /// Sends the request and turns transport failures and non-success statuses into errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await.map_err(Error::from_backend_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!("Supabase returned {}: {}", status, body);
        Err(Error::Backend(format!("{status}: {body}")))
    }

    /// `POST /rest/v1/{table}` with `return=representation`, yielding the stored row.
    pub async fn insert_one<T, R>(&self, table: &str, row: &T) -> Result<R, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("Inserting into {}", table);
        let request = self
            .request(Method::POST, self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&[row]);
        let response = self.send(request).await?;
        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            return Err(Error::Backend(format!("insert into {table} returned no rows")));
        }
        Ok(rows.swap_remove(0))
    }

    /// `GET /rest/v1/{relation}` with PostgREST query parameters.
    pub async fn select<R>(&self, relation: &str, query: &[(&str, String)]) -> Result<Vec<R>, Error>
    where
        R: DeserializeOwned,
    {
        let request = self
            .request(Method::GET, self.rest_url(relation))
            .query(query);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Exact row count via `HEAD` and the `Content-Range` header.
    pub async fn count_rows(&self, table: &str) -> Result<Option<u64>, Error> {
        let request = self
            .request(Method::HEAD, self.rest_url(table))
            .query(&[("select", "count")])
            .header("Prefer", "count=exact");
        let response = self.send(request).await?;
        Ok(response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total))
    }
}

/// `0-24/25` or `*/0` → total after the slash.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/').and_then(|(_, total)| total.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_total() {
        assert_eq!(parse_content_range_total("0-24/25"), Some(25));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn urls_are_built_from_the_project_base() {
        let client =
            SupabaseClient::new(SupabaseConfig::new("https://x.supabase.co/", "k").unwrap()).unwrap();
        assert_eq!(client.rest_url("users"), "https://x.supabase.co/rest/v1/users");
        assert_eq!(
            client.storage_url("object/medical-images/a.png"),
            "https://x.supabase.co/storage/v1/object/medical-images/a.png"
        );
    }
}
