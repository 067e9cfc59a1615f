//! HTTP surface of the portal
//!
//! Maps axum requests onto [`Authorizer::handle`] and its [`Outcome`] back
//! onto a rendered page or a redirect.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::config::ServerConfig;
use crate::error_codes;
use crate::handler::Authorizer;
use crate::models::{Outcome, QueryParams};

#[derive(Clone)]
pub struct AppState {
    authorizer: Arc<Authorizer>,
    title: Arc<str>,
}

pub fn router(server: &ServerConfig, authorizer: Authorizer) -> Router {
    Router::new()
        .route(&server.path, get(authorize).post(authorize))
        .route("/healthz", get(healthz))
        .with_state(AppState {
            authorizer: Arc::new(authorizer),
            title: Arc::from(server.title.as_str()),
        })
}

#[derive(Template)]
#[template(path = "authorize.html")]
pub struct AuthorizePage {
    pub title: String,
    pub error: Option<&'static str>,
    /// Form target, the current path and query so the LHM parameters survive
    pub action: String,
}

pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("Failed to render page: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

#[tracing::instrument(name = "authorize", skip_all, fields(method = %method))]
async fn authorize(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<QueryParams>,
) -> Response {
    let outcome = state.authorizer.handle(&query, method == Method::POST).await;

    let action = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    match outcome {
        Outcome::Redirect(url) => match HeaderValue::from_str(&url) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(err) => {
                tracing::error!("Cannot redirect to {:?}: {}", url, err);
                HtmlTemplate(AuthorizePage {
                    title: state.title.to_string(),
                    error: Some(error_codes::GENERIC_ERROR),
                    action,
                })
                .into_response()
            }
        },
        Outcome::Page { error } => HtmlTemplate(AuthorizePage {
            title: state.title.to_string(),
            error,
            action,
        })
        .into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}
