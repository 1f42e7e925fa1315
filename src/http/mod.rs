use std::{net::SocketAddr, str::FromStr};

use axum::{
    extract::Extension,
    http::{header, HeaderValue},
    response::Html,
    routing::{get, post},
    Json, Router,
};

use tower::ServiceBuilder;
use tower_http::{trace::TraceLayer, ServiceBuilderExt};

use crate::{
    backends::github::{self, middleware::VerifyGitHubSignatureLayer},
    config::Config,
    server_info::ServerInfo,
    service::ServiceHandler,
};

#[tracing::instrument(skip(services))]
async fn root(services: Extension<ServiceHandler>) -> Json<ServerInfo> {
    Json(ServerInfo::new(services.store().backend_name()))
}

#[tracing::instrument]
async fn dashboard() -> Html<&'static str> {
    Html(include_str!("dashboard.html"))
}

#[tracing::instrument(skip(config, services))]
pub async fn start_server(config: Config, services: ServiceHandler) -> color_eyre::Result<()> {
    let addr = SocketAddr::from_str(config.bind_ip())?;
    let app = build_http_router(config, services);
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub fn build_http_router(config: Config, services: ServiceHandler) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .insert_response_header_if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

    Router::new()
        .route("/", get(root))
        .route("/webhook/", get(dashboard))
        .route("/webhook/events", get(github::latest_events))
        .route(
            "/webhook/receiver",
            post(github::webhook).layer(VerifyGitHubSignatureLayer::new(
                config.webhook_secret().map(|x| x.to_owned()),
            )),
        )
        .layer(middleware.into_inner())
        .layer(Extension(services))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::{
        config::Config,
        server_info::{APP_NAME, APP_VERSION},
        service::ServiceHandler,
        store::MemoryEventStore,
    };

    use super::build_http_router;

    fn create_test_router() -> axum::Router {
        build_http_router(
            Config::empty(),
            ServiceHandler::new(Arc::new(MemoryEventStore::new())),
        )
    }

    #[tokio::test]
    async fn test_root() {
        let response = create_test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let data: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            data,
            serde_json::json!({
                "message": format!("{}, listening for GitHub events!", APP_NAME),
                "version": APP_VERSION,
                "storage": "memory"
            })
        );
    }

    #[tokio::test]
    async fn test_dashboard_is_html() {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .uri("/webhook/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/webhook/events"));
    }

    #[tokio::test]
    async fn test_receiver_requires_post() {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .uri("/webhook/receiver")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
