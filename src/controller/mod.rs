//! Hotspot controller abstraction
//!
//! The portal talks to the controller through the `LhmController` trait so
//! the authorization flow does not depend on a live appliance.

pub mod sonicwall;

pub use sonicwall::SonicWallController;

use crate::models::CallbackPayload;
use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Server-to-server side of the LHM handshake
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LhmController: Send + Sync {
    /// POST the callback payload to `url` and return the raw reply body
    async fn authorize(&self, url: &str, payload: &CallbackPayload) -> Result<String>;
}
