use crate::store::SharedStore;
use anyhow::{Context, Result, anyhow};
use axum::{
    Extension, Json, Router,
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::{CONTENT_TYPE, ORIGIN},
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, info, info_span, warn};
use ulid::Ulid;
use url::Url;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
// OpenAPI router wiring and route registration live in openapi.rs.
mod openapi;
pub mod validation;

pub use openapi::openapi;

const CORS_REJECTED: &str = "Error de CORS";

/// Build the API router with all documented routes registered.
#[must_use]
pub fn router() -> OpenApiRouter {
    openapi::api_router()
}

/// Build the full application: documented routes, Swagger UI and the
/// middleware stack, sharing `store` with every handler.
///
/// `frontend_origin` is the only origin browsers may call from; `None`
/// rejects every request that declares an origin.
#[must_use]
pub fn app(store: SharedStore, frontend_origin: Option<HeaderValue>) -> Router {
    let (router, openapi) = router().split_for_parts();

    let mut cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]);
    if let Some(origin) = frontend_origin.clone() {
        cors = cors.allow_origin(AllowOrigin::exact(origin));
    }

    router
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(middleware::from_fn_with_state(frontend_origin, origin_gate))
                .layer(cors)
                .layer(Extension(store)),
        )
}

/// Start the server
/// # Errors
/// Return error if the frontend URL is invalid or the listener fails
pub async fn new(port: u16, store: SharedStore, frontend_url: Option<&str>) -> Result<()> {
    let frontend_origin = frontend_url.map(frontend_origin).transpose()?;
    if frontend_origin.is_none() {
        warn!("No frontend URL configured; requests carrying an Origin header will be rejected");
    }

    let app = app(store, frontend_origin);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("REST API working on port {}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

/// Reject requests whose declared `Origin` is not the configured frontend.
/// Requests without an `Origin` header (curl, server-to-server) pass through.
async fn origin_gate(
    State(allowed): State<Option<HeaderValue>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN)
        && allowed.as_ref() != Some(origin)
    {
        warn!("Rejected request from origin {:?}", origin);
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": CORS_REJECTED })),
        )
            .into_response();
    }

    next.run(request).await
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

/// Reduce a frontend URL to the `scheme://host[:port]` origin browsers send.
fn frontend_origin(frontend_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_url)
        .with_context(|| format!("Invalid frontend URL: {frontend_url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("Frontend URL must include a valid host: {frontend_url}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_origin_drops_path_and_keeps_port() -> Result<()> {
        assert_eq!(
            frontend_origin("http://localhost:5173/products?x=1")?,
            HeaderValue::from_static("http://localhost:5173")
        );
        assert_eq!(
            frontend_origin("https://shop.example.com/")?,
            HeaderValue::from_static("https://shop.example.com")
        );
        Ok(())
    }

    #[test]
    fn frontend_origin_rejects_garbage() {
        assert!(frontend_origin("not a url").is_err());
        assert!(frontend_origin("mailto:team@products.dev").is_err());
    }
}
