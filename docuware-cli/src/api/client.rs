//! Authenticated client for one file cabinet

use async_trait::async_trait;
use log::{debug, info};

use super::models::{CreateEntryRequest, IndexField, ListResponse};
use super::{auth, SelectionListApi};
use crate::config::Config;
use crate::error::SyncError;

pub struct DocuwareClient {
    http: reqwest::Client,
    base_url: String,
    cabinet_id: String,
}

impl DocuwareClient {
    /// Build a cookie-carrying client and log on. Fatal on failure; the
    /// caller is expected to abort, not retry.
    pub async fn logon(config: &Config) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        auth::logon(
            &http,
            &config.dw_url,
            &config.dw_user,
            &config.dw_password,
            &config.dw_organization,
        )
        .await?;

        Ok(Self {
            http,
            base_url: config.dw_url.clone(),
            cabinet_id: config.file_cabinet_id.clone(),
        })
    }

    pub async fn logoff(&self) {
        auth::logoff(&self.http, &self.base_url).await;
    }

    fn documents_url(&self) -> String {
        format!("{}/FileCabinets/{}/Documents", self.base_url, self.cabinet_id)
    }
}

#[async_trait]
impl SelectionListApi for DocuwareClient {
    async fn create_entry(&self, fields: &[IndexField]) -> Result<(), SyncError> {
        let response = self
            .http
            .post(self.documents_url())
            .header("Accept", "application/json")
            .json(&CreateEntryRequest { fields })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Upload {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn list_entries(&self, limit: usize) -> Result<Vec<String>, SyncError> {
        let response = self
            .http
            .get(self.documents_url())
            .query(&[("count", limit.to_string()), ("query", "DWDocID:*".to_string())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Delete {
                status: status.as_u16(),
                body,
            });
        }

        let listing: ListResponse = response.json().await?;
        let ids: Vec<String> = listing
            .items
            .iter()
            .filter_map(|entry| entry.identifier())
            .collect();
        debug!("listed {} entries from cabinet {}", ids.len(), self.cabinet_id);
        Ok(ids)
    }

    async fn delete_entries(&self, ids: &[String]) -> Result<(), SyncError> {
        for id in ids {
            let response = self
                .http
                .delete(format!("{}/{}", self.documents_url(), id))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SyncError::Delete {
                    status: status.as_u16(),
                    body,
                });
            }
            debug!("deleted entry {id}");
        }
        info!("deleted batch of {} entries", ids.len());
        Ok(())
    }
}
