//! Cache administration endpoints (`{api}/cache`).
//!
//! These are not part of the refresh cycle; the CLI uses them to inspect and
//! edit keys in the backend's cache.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use stackwatch_types::{ApiErrorBody, CacheDeleteResult, CacheEntry, CacheKeyList, NewCacheEntry};

use crate::{ClientError, StackwatchClient, read_json};

/// Characters escaped when a cache key is used as a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

impl StackwatchClient {
    fn cache_key_path(&self, key: &str) -> String {
        self.api_path(&format!("/cache/{}", utf8_percent_encode(key, PATH_SEGMENT)))
    }

    /// List every key currently stored in the cache.
    pub async fn cache_keys(&self) -> Result<CacheKeyList, ClientError> {
        let path = self.api_path("/cache");
        self.cache_call(Method::GET, &path, None::<&()>, StatusCode::OK).await
    }

    /// Fetch one key's value and remaining TTL.
    pub async fn cache_get(&self, key: &str) -> Result<CacheEntry, ClientError> {
        let path = self.cache_key_path(key);
        self.cache_call(Method::GET, &path, None::<&()>, StatusCode::OK).await
    }

    /// Store a value, optionally with an expiry in seconds.
    pub async fn cache_set(&self, entry: &NewCacheEntry) -> Result<CacheEntry, ClientError> {
        let path = self.api_path("/cache");
        self.cache_call(Method::POST, &path, Some(entry), StatusCode::CREATED).await
    }

    /// Remove a key.
    pub async fn cache_delete(&self, key: &str) -> Result<CacheDeleteResult, ClientError> {
        let path = self.cache_key_path(key);
        self.cache_call(Method::DELETE, &path, None::<&()>, StatusCode::OK).await
    }

    async fn cache_call<B, T>(&self, method: Method, path: &str, body: Option<&B>, expected: StatusCode) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(method, path, builder).await?;
        let status = response.status();
        if status == expected {
            let (_, payload) = read_json(response, path).await?;
            return Ok(payload);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        let (_, error) = read_json::<ApiErrorBody>(response, path).await?;
        Err(ClientError::server(status, error.error))
    }
}
