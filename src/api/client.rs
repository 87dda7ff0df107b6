//! The five control-plane operations consumed by the dashboard.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};

use super::error::{ApiError, Result};
use super::models::{
    ApiErrorBody, DeleteQueryRequest, Instance, ListQueriesResponse, QueryPayload, SavedQuery,
    SaveQueryRequest,
};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        user_id: String,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/users/{}/{}", self.base_url, self.user_id, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Turn a non-2xx response into an `ApiError` carrying the server's
    /// message when the body has one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::from_status(status, message))
    }

    /// All instances owned by the user.
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        let response = self.authed(self.http.get(self.url("instances"))).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// All queries stored on one instance.
    pub async fn list_queries(&self, instance_id: &str) -> Result<Vec<SavedQuery>> {
        let url = self.url(&format!("instances/{instance_id}/queries"));
        let response = self.authed(self.http.get(url)).send().await?;
        let body: ListQueriesResponse = Self::check(response).await?.json().await?;
        Ok(body.queries)
    }

    /// Persist one query. The server echoes the stored query back.
    pub async fn save_query(
        &self,
        instance_id: &str,
        instance_name: &str,
        cluster_id: &str,
        region: &str,
        query: QueryPayload,
    ) -> Result<SavedQuery> {
        let url = self.url(&format!("instances/{instance_id}/queries"));
        let body = SaveQueryRequest {
            instance_name: instance_name.to_string(),
            cluster_id: cluster_id.to_string(),
            region: region.to_string(),
            query,
        };
        let response = self.authed(self.http.post(url).json(&body)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete one query from an instance.
    pub async fn delete_query(
        &self,
        instance_id: &str,
        instance_name: &str,
        cluster_id: &str,
        region: &str,
        query: QueryPayload,
    ) -> Result<()> {
        let url = self.url(&format!("instances/{instance_id}/queries/{}", query.id));
        let body = DeleteQueryRequest {
            instance_name: instance_name.to_string(),
            cluster_id: cluster_id.to_string(),
            region: region.to_string(),
            query,
        };
        let response = self.authed(self.http.delete(url).json(&body)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Tear down one instance.
    pub async fn delete_instance(
        &self,
        cluster_id: &str,
        region: &str,
        instance_id: &str,
    ) -> Result<()> {
        let url = self.url(&format!(
            "instances/{instance_id}?clusterId={cluster_id}&region={region}"
        ));
        let response = self.authed(self.http.delete(url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
