use std::env;
use std::time::Duration;

const DEFAULT_BUCKET: &str = "post-images";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote data service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Anonymous API key sent with every request.
    pub api_key: String,
    /// Storage bucket holding post images.
    pub bucket: String,
    /// Bound on every remote call; expiry surfaces as a network error.
    pub request_timeout: Duration,
}

impl RemoteConfig {
    /// Load configuration from environment variables, reading `.env` if present.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let base_url = env::var("SUPABASE_URL").map_err(|_| "SUPABASE_URL is required")?;
        let api_key = env::var("SUPABASE_ANON_KEY").map_err(|_| "SUPABASE_ANON_KEY is required")?;
        let bucket =
            env::var("KHINSTA_STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());
        let timeout_secs = match env::var("KHINSTA_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| "KHINSTA_REQUEST_TIMEOUT_SECS must be an integer")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_normalizes_trailing_slash() {
        let config = RemoteConfig::new("https://demo.supabase.co/", "anon-key")
            .with_bucket("avatars")
            .with_request_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, "https://demo.supabase.co");
        assert_eq!(config.bucket, "avatars");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }
}
