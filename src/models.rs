//! Data models for the LHM authorization exchange

use serde::Serialize;
use std::collections::HashMap;

/// Query parameter names sent by the SonicWall in its redirect
pub mod params {
    pub const SESSION_ID: &str = "sessionId";
    pub const MAC: &str = "mac";
    pub const MGMT_BASE_URL: &str = "mgmtBaseUrl";
    pub const REQ: &str = "req";
    pub const ERROR_CODE: &str = "cc";
}

/// The LHM callback on the SonicWall
pub const CALLBACK_PATH: &str = "externalGuestLogin.cgi";

/// Decoded query string of an inbound request
pub type QueryParams = HashMap<String, String>;

/// Session limits sent to the appliance with every authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Session timeout in seconds
    pub session_lifetime: u64,
    /// Idle timeout in seconds
    pub idle_timeout: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_lifetime: 3600,
            idle_timeout: 300,
        }
    }
}

/// Form body POSTed to `externalGuestLogin.cgi`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackPayload {
    #[serde(rename = "sessId")]
    pub sess_id: String,

    #[serde(rename = "userName")]
    pub user_name: String,

    #[serde(rename = "sessionLifetime")]
    pub session_lifetime: u64,

    #[serde(rename = "idleTimeout")]
    pub idle_timeout: u64,
}

/// Parameters required to submit an authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub session_id: String,
    pub mac: String,
    pub mgmt_base_url: String,
    pub redirect_to: String,
}

impl Submission {
    /// Combine mgmtBaseUrl from the original redirect with the login cgi
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.mgmt_base_url, CALLBACK_PATH)
    }

    pub fn payload(&self, settings: SessionSettings) -> CallbackPayload {
        CallbackPayload {
            sess_id: self.session_id.clone(),
            user_name: self.mac.clone(),
            session_lifetime: settings.session_lifetime,
            idle_timeout: settings.idle_timeout,
        }
    }
}

/// What the portal should send back to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Authorization succeeded, send the user on to their destination
    Redirect(String),
    /// Show the authorization page, optionally with an error message
    Page { error: Option<&'static str> },
}
