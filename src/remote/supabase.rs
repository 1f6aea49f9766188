use async_trait::async_trait;
use log::debug;

use crate::config::RemoteConfig;
use crate::post::post_model::{ImageFile, LikePatch, Post, PostRecord};
use crate::remote::{RemoteDataService, RemoteError};

const POSTS_TABLE: &str = "posts";

/// Supabase-backed implementation of the remote data service: storage
/// objects for images, PostgREST for post rows.
pub struct SupabaseRemote {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl SupabaseRemote {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.config.base_url, bucket, key)
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, bucket, key
        )
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", &self.config.api_key))
    }

    fn classify(err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout
        } else {
            RemoteError::Transport(err.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());
        Err(RemoteError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RemoteDataService for SupabaseRemote {
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        file: &ImageFile,
    ) -> Result<String, RemoteError> {
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        debug!("uploading {} bytes to {}/{}", file.data.len(), bucket, key);

        let response = self
            .authed(self.client.post(self.object_url(bucket, key)))
            .header("Content-Type", content_type)
            .body(file.data.clone())
            .send()
            .await
            .map_err(Self::classify)?;
        Self::check_status(response).await?;

        Ok(self.public_url(bucket, key))
    }

    async fn insert_row(&self, record: PostRecord) -> Result<Post, RemoteError> {
        let response = self
            .authed(self.client.post(self.rest_url(POSTS_TABLE)))
            .header("Prefer", "return=representation")
            .json(&vec![record])
            .send()
            .await
            .map_err(Self::classify)?;
        let response = Self::check_status(response).await?;

        let mut rows: Vec<Post> = response.json().await.map_err(Self::classify)?;
        if rows.is_empty() {
            return Err(RemoteError::Service {
                status: 200,
                message: "insert returned no representation".to_string(),
            });
        }
        Ok(rows.remove(0))
    }

    async fn select_rows(&self) -> Result<Vec<Post>, RemoteError> {
        let response = self
            .authed(self.client.get(self.rest_url(POSTS_TABLE)))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(Self::classify)?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(Self::classify)
    }

    async fn update_row(&self, id: &str, patch: LikePatch) -> Result<(), RemoteError> {
        let response = self
            .authed(self.client.patch(self.rest_url(POSTS_TABLE)))
            .query(&[("id", format!("eq.{id}"))])
            .json(&patch)
            .send()
            .await
            .map_err(Self::classify)?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_supabase_layout() {
        let remote =
            SupabaseRemote::new(RemoteConfig::new("https://demo.supabase.co", "anon")).unwrap();
        assert_eq!(
            remote.rest_url("posts"),
            "https://demo.supabase.co/rest/v1/posts"
        );
        assert_eq!(
            remote.public_url("post-images", "abc.png"),
            "https://demo.supabase.co/storage/v1/object/public/post-images/abc.png"
        );
    }
}
