//! HTTP client for the cluster-management API
//!
//! All resources live under `/api/clusters_mgmt/v1`. List endpoints are paged
//! and accept a `search` expression; this client walks every page.

use super::types::{Cluster, Ingress, MachinePool, NodePool, OidcConfig};
use super::{ClusterManager, ControlPlaneError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_PREFIX: &str = "/api/clusters_mgmt/v1";
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    reason: String,
}

/// Quote a value for use inside a search expression
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub struct OcmClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl OcmClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        OcmClient {
            http: reqwest::Client::new(),
            base_url: format!("{}{}", api_url.trim_end_matches('/'), API_PREFIX),
            token: token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn non-2xx responses into `ControlPlaneError::Api`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ControlPlaneError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(|e| e.reason)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(ControlPlaneError::Api {
            status: status.as_u16(),
            reason,
        })
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: usize,
        size: usize,
        search: Option<&str>,
    ) -> Result<Page<T>, ControlPlaneError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        debug!(path = %path, page, search = ?search, "Listing resources");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        search: Option<&str>,
    ) -> Result<Vec<T>, ControlPlaneError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch: Page<T> = self.fetch_page(path, page, PAGE_SIZE, search).await?;
            let count = batch.items.len();
            items.extend(batch.items);
            let reached_total = batch.total.is_some_and(|total| items.len() >= total);
            if count < PAGE_SIZE || reached_total {
                return Ok(items);
            }
            page += 1;
        }
    }

    /// True when at least one item matches `search`
    async fn any_match(&self, path: &str, search: &str) -> Result<bool, ControlPlaneError> {
        let page: Page<serde_json::Value> = self.fetch_page(path, 1, 1, Some(search)).await?;
        Ok(page.total.unwrap_or(0) > 0 || !page.items.is_empty())
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ControlPlaneError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(path = %path, "Creating resource");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), ControlPlaneError> {
        debug!(path = %path, "Deleting resource");
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ClusterManager for OcmClient {
    async fn get_cluster(&self, key: &str) -> Result<Cluster, ControlPlaneError> {
        let quoted = quote(key);
        let search = format!(
            "id = {q} or name = {q} or external_id = {q}",
            q = quoted
        );
        let page: Page<Cluster> = self.fetch_page("/clusters", 1, 1, Some(&search)).await?;
        page.items
            .into_iter()
            .next()
            .ok_or_else(|| ControlPlaneError::ClusterNotFound(key.to_string()))
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>, ControlPlaneError> {
        self.list_all("/clusters", None).await
    }

    async fn create_ingress(
        &self,
        cluster_id: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, ControlPlaneError> {
        self.post(&format!("/clusters/{}/ingresses", cluster_id), ingress)
            .await
    }

    async fn list_ingresses(&self, cluster_id: &str) -> Result<Vec<Ingress>, ControlPlaneError> {
        self.list_all(&format!("/clusters/{}/ingresses", cluster_id), None)
            .await
    }

    async fn delete_ingress(
        &self,
        cluster_id: &str,
        ingress_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.delete(&format!("/clusters/{}/ingresses/{}", cluster_id, ingress_id))
            .await
    }

    async fn create_node_pool(
        &self,
        cluster_id: &str,
        node_pool: &NodePool,
    ) -> Result<NodePool, ControlPlaneError> {
        self.post(&format!("/clusters/{}/node_pools", cluster_id), node_pool)
            .await
    }

    async fn list_node_pools(&self, cluster_id: &str) -> Result<Vec<NodePool>, ControlPlaneError> {
        self.list_all(&format!("/clusters/{}/node_pools", cluster_id), None)
            .await
    }

    async fn delete_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.delete(&format!(
            "/clusters/{}/node_pools/{}",
            cluster_id, node_pool_id
        ))
        .await
    }

    async fn create_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool: &MachinePool,
    ) -> Result<MachinePool, ControlPlaneError> {
        self.post(
            &format!("/clusters/{}/machine_pools", cluster_id),
            machine_pool,
        )
        .await
    }

    async fn list_machine_pools(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<MachinePool>, ControlPlaneError> {
        self.list_all(&format!("/clusters/{}/machine_pools", cluster_id), None)
            .await
    }

    async fn delete_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.delete(&format!(
            "/clusters/{}/machine_pools/{}",
            cluster_id, machine_pool_id
        ))
        .await
    }

    async fn has_cluster_using_oidc_config(
        &self,
        bucket_or_id: &str,
    ) -> Result<bool, ControlPlaneError> {
        let search = format!(
            "aws.sts.oidc_endpoint_url like {}",
            quote(&format!("%{}%", bucket_or_id))
        );
        self.any_match("/clusters", &search).await
    }

    async fn has_cluster_using_oidc_endpoint_url(
        &self,
        url: &str,
    ) -> Result<bool, ControlPlaneError> {
        let search = format!("aws.sts.oidc_endpoint_url = {}", quote(url));
        self.any_match("/clusters", &search).await
    }

    async fn list_oidc_configs(&self) -> Result<Vec<OidcConfig>, ControlPlaneError> {
        self.list_all("/oidc_configs", None).await
    }

    async fn delete_hosted_oidc_config(&self, id: &str) -> Result<(), ControlPlaneError> {
        self.delete(&format!("/oidc_configs/{}", id)).await
    }
}
