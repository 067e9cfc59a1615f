//! HTTP client with bounded timeouts for the LHM callback

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::{HttpConfig, SonicWallConfig};

pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(http: &HttpConfig, sonicwall: &SonicWallConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("lhm-portal/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/xml, text/xml, */*"),
        );

        if !sonicwall.verify_tls {
            tracing::warn!("TLS certificate validation is disabled for LHM callbacks");
        }

        // The appliance usually serves its management interface with a
        // self-signed certificate
        let client = Client::builder()
            .danger_accept_invalid_certs(!sonicwall.verify_tls)
            .timeout(Duration::from_secs(http.timeout))
            .connect_timeout(Duration::from_secs(http.connect_timeout))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { inner: client })
    }

    /// POST a form-encoded body. One attempt only, non-2xx statuses are
    /// returned to the caller rather than treated as errors.
    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
    ) -> Result<Response> {
        let resp = self
            .inner
            .post(url)
            .form(form)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        if !resp.status().is_success() {
            tracing::warn!("POST {} returned {}", url, resp.status());
        }

        Ok(resp)
    }
}
