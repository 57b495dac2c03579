//! HTTP delivery backend for the cloud mirror.
//!
//! Posts each payload as JSON to `<base>/sync/<kind>`. Authentication is
//! out of scope; the anonymous user id rides in the body.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::error::SyncError;
use crate::sync::{CloudSync, SyncPayload};

/// JSON POST client for the sync service.
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    client: reqwest::Client,
    base: Url,
}

#[derive(Serialize)]
struct Envelope<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    payload: &'a SyncPayload,
}

impl HttpSyncClient {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, kind: &str) -> Result<Url, SyncError> {
        self.base
            .join(&format!("sync/{kind}"))
            .map_err(|e| SyncError::Rejected(format!("bad endpoint url: {e}")))
    }
}

#[async_trait]
impl CloudSync for HttpSyncClient {
    async fn deliver(&self, user_id: &str, payload: SyncPayload) -> Result<(), SyncError> {
        let url = self.endpoint(payload.kind())?;
        let response = self
            .client
            .post(url)
            .json(&Envelope {
                user_id,
                payload: &payload,
            })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SyncError::Rejected(format!(
                "status {}",
                response.status()
            )))
        }
    }
}
