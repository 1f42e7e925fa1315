use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use tower::{Layer, Service};

use crate::{crypto::is_valid_signature, error::ErrorCode};

const GITHUB_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
const SIGNATURE_PREFIX: &str = "sha256=";

/// Rejects POST requests whose body does not match `X-Hub-Signature-256`.
///
/// Without a secret every request is forwarded untouched.
pub struct VerifyGitHubSignatureLayer {
    secret: Option<String>,
}

impl VerifyGitHubSignatureLayer {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }
}

impl<S> Layer<S> for VerifyGitHubSignatureLayer {
    type Service = VerifyGitHubSignatureMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        VerifyGitHubSignatureMiddleware::new(self.secret.clone(), inner)
    }
}

#[derive(Clone)]
pub struct VerifyGitHubSignatureMiddleware<S> {
    secret: Option<String>,
    inner: S,
}

impl<S> VerifyGitHubSignatureMiddleware<S> {
    pub fn new(secret: Option<String>, inner: S) -> Self {
        Self { secret, inner }
    }
}

type BoxFuture<'a, Output> = Pin<Box<dyn Future<Output = Output> + Send + 'a>>;

impl<S> Service<Request<Body>> for VerifyGitHubSignatureMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static + Clone,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let secret = self.secret.clone();
        let fut = async move {
            let secret = secret.filter(|_| request.method() == Method::POST);

            if let Some(secret) = secret {
                let signature = match request
                    .headers()
                    .get(GITHUB_SIGNATURE_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix(SIGNATURE_PREFIX))
                {
                    Some(signature) => signature.to_string(),
                    None => {
                        tracing::warn!("rejecting unsigned webhook delivery");
                        return Ok(ErrorCode::InvalidSignature.into_response());
                    }
                };

                let body = match hyper::body::to_bytes(std::mem::take(request.body_mut())).await {
                    Ok(body) => body,
                    Err(e) => return Ok(ErrorCode::UnhandledError(e.to_string()).into_response()),
                };

                if !is_valid_signature(&signature, &body, &secret) {
                    tracing::warn!("rejecting webhook delivery with invalid signature");
                    return Ok(ErrorCode::InvalidSignature.into_response());
                }

                *request.body_mut() = Body::from(body);
            }

            let response: Response = inner.call(request).await?;
            Ok(response)
        };

        Box::pin(fut)
    }
}
