//! LHM authorization handler
//!
//! Handles one request of the authorization flow:
//!
//! 1. Display the authorization page, with the error carried in `cc` if any
//! 2. On submission, POST the authorization to the SonicWall LHM appliance
//! 3. Redirect the user to the page they originally requested
//!
//! Sample LHM redirect query string:
//!
//! ```text
//! sessionId=0b712fd83b9f5313db5af1cea6b1004f&ip=10.50.165.231&mac=00:0e:35:bd:c9:37
//! &ufi=0006b11184300&mgmtBaseUrl=https://10.50.165.193:4043/
//! &clientRedirectUrl=https://10.50.165.193:444/&req=http%3A//www.google.com/ig
//! ```

use std::sync::Arc;

use crate::controller::LhmController;
use crate::error::AuthError;
use crate::error_codes;
use crate::models::{params, Outcome, QueryParams, SessionSettings, Submission};
use crate::parser;

pub struct Authorizer {
    controller: Arc<dyn LhmController>,
    settings: SessionSettings,
}

impl Authorizer {
    pub fn new(controller: Arc<dyn LhmController>, settings: SessionSettings) -> Self {
        Self {
            controller,
            settings,
        }
    }

    pub async fn handle(&self, query: &QueryParams, is_submission: bool) -> Outcome {
        // The SonicWall sends the user back with "cc" set after a failure:
        // session expiration (2), idle timeout (3) or max sessions (4)
        let mut error = query.get(params::ERROR_CODE).map(|code| {
            tracing::info!("Displaying LHM error code {}", code);
            error_codes::message_for(code)
        });

        if is_submission {
            match self.authorize(query).await {
                Ok(redirect_to) => {
                    tracing::info!("Successful LHM authorization; redirecting to: {}", redirect_to);
                    return Outcome::Redirect(redirect_to);
                }
                Err(err) => {
                    match &err {
                        AuthError::Controller(_) => tracing::warn!("{}", err),
                        _ => tracing::error!("{}", err),
                    }
                    error = Some(err.user_message());
                }
            }
        }

        Outcome::Page { error }
    }

    /// Run the callback and return the URL to redirect to
    async fn authorize(&self, query: &QueryParams) -> Result<String, AuthError> {
        let submission = submission_from(query)?;

        let url = submission.callback_url();
        let payload = submission.payload(self.settings);

        let body = self
            .controller
            .authorize(&url, &payload)
            .await
            .map_err(AuthError::Communication)?;

        let code = parser::parse_response_code(&body)?;
        tracing::debug!("SonicWall response code: {}", code);

        if code == error_codes::SUCCESS {
            Ok(submission.redirect_to)
        } else {
            Err(AuthError::Controller(code))
        }
    }
}

fn submission_from(query: &QueryParams) -> Result<Submission, AuthError> {
    let get = |name: &'static str| {
        query
            .get(name)
            .cloned()
            .ok_or(AuthError::Parameter(name))
    };

    Ok(Submission {
        session_id: get(params::SESSION_ID)?,
        mac: get(params::MAC)?,
        mgmt_base_url: get(params::MGMT_BASE_URL)?,
        redirect_to: get(params::REQ)?,
    })
}
