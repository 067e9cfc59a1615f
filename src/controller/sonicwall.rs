//! SonicWall appliance implementation of the LHM callback

use crate::controller::LhmController;
use crate::http::HttpClient;
use crate::models::CallbackPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;

pub struct SonicWallController {
    client: HttpClient,
}

impl SonicWallController {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LhmController for SonicWallController {
    async fn authorize(&self, url: &str, payload: &CallbackPayload) -> Result<String> {
        tracing::debug!("POSTing to SonicWall {} with payload: {:?}", url, payload);

        let resp = self.client.post_form(url, payload).await?;
        let body = resp
            .text()
            .await
            .context("Failed to read SonicWall response body")?;

        tracing::debug!("SonicWall response: {}", body);
        Ok(body)
    }
}
