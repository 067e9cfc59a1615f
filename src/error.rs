//! Failure kinds of an authorization attempt

use crate::error_codes;
use crate::parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A query parameter required for the callback was not sent
    #[error("missing request parameter {0:?}")]
    Parameter(&'static str),

    /// The callback to the appliance did not complete
    #[error("failed to communicate with LHM: {0:#}")]
    Communication(anyhow::Error),

    /// The appliance replied with something we could not read
    #[error("failed to parse LHM response: {0}")]
    Parsing(#[from] ParseError),

    /// The appliance rejected the authorization
    #[error("LHM rejected authorization with response code {0}")]
    Controller(String),
}

impl AuthError {
    /// Message safe to show to the user.
    ///
    /// Internal failures all collapse into the generic message; only codes
    /// reported by the appliance get a specific one.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Controller(code) => error_codes::message_for(code),
            Self::Parameter(_) | Self::Communication(_) | Self::Parsing(_) => {
                error_codes::GENERIC_ERROR
            }
        }
    }
}
