//! Server middlewares.

#![allow(clippy::type_complexity)]

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::BytesMut,
    Error, HttpMessage,
};
use futures::{
    future::{ok, Ready},
    stream::StreamExt,
    Future,
};
use hubsync_config::Config;
use hubsync_crypto::Signature;
use tracing::warn;

use crate::{
    constants::{GITHUB_SIGNATURE_HEADER, SIGNATURE_PREFIX_LENGTH},
    ServerError,
};

/// Signature verification configuration.
pub struct VerifySignature {
    enabled: bool,
    secret: Option<String>,
}

impl VerifySignature {
    /// Create a new configuration.
    pub fn new(config: &Config) -> Self {
        let mut enabled = !config.server.disable_webhook_signature;
        let secret = if enabled {
            if config.server.webhook_secret.is_empty() {
                // Disable signature verification on empty secret
                warn!("Environment variable 'HUBSYNC_SERVER_WEBHOOK_SECRET' is invalid or not set. Disabling signature verification.");
                enabled = false;
                None
            } else {
                Some(config.server.webhook_secret.clone())
            }
        } else {
            warn!("Signature verification is disabled. This can be a security concern.");
            None
        };

        Self { enabled, secret }
    }
}

// Middleware factory is `Transform` trait from actix-service crate
// `S` - type of the next service
// `B` - type of response's body
impl<S, B> Transform<S, ServiceRequest> for VerifySignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = VerifySignatureMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(VerifySignatureMiddleware {
            enabled: self.enabled,
            secret: self.secret.clone(),
            service: Rc::new(service),
        })
    }
}

/// Signature verification middleware.
pub struct VerifySignatureMiddleware<S> {
    enabled: bool,
    secret: Option<String>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for VerifySignatureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let enabled = self.enabled;
        let secret = self.secret.clone();

        Box::pin(async move {
            if enabled && req.method() == Method::POST {
                if let Some(secret) = secret {
                    let headers = req.headers().clone();
                    let signature = headers
                        .get(GITHUB_SIGNATURE_HEADER)
                        .ok_or(ServerError::MissingWebhookSignature)?
                        .to_str()
                        .map_err(|_| {
                            actix_web::Error::from(ServerError::InvalidWebhookSignature)
                        })?;

                    // Quick check because split_at can panic.
                    if signature.len() <= SIGNATURE_PREFIX_LENGTH {
                        return Err(ServerError::InvalidWebhookSignature.into());
                    }

                    // Strip signature prefix
                    let (_, sig) = signature.split_at(SIGNATURE_PREFIX_LENGTH);

                    let mut body = BytesMut::new();
                    let mut stream = req.take_payload();

                    while let Some(chunk) = stream.next().await {
                        body.extend_from_slice(&chunk?);
                    }

                    match Signature(sig).is_valid(&body, &secret) {
                        Ok(false) | Err(_) => {
                            return Err(ServerError::InvalidWebhookSignature.into())
                        }
                        _ => (),
                    }

                    // Re-inject the consumed payload for the handlers.
                    let (_, mut payload) = actix_http::h1::Payload::create(true);
                    payload.unread_data(body.freeze());
                    req.set_payload(payload.into());
                }
            }

            svc.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::StatusCode,
        test::{self, TestRequest},
        web, App, HttpResponse,
    };
    use hubsync_config::Config;
    use pretty_assertions::assert_eq;

    use super::VerifySignature;
    use crate::constants::GITHUB_SIGNATURE_HEADER;

    const BODY: &str = r#"{"secret": "hello"}"#;
    const SECRET: &str = "iAmAsEcReTkEy";
    const GOOD_SIG: &str = "sha256=a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1408";

    fn signing_config() -> Config {
        let mut config = Config::from_env_no_version();
        config.server.disable_webhook_signature = false;
        config.server.webhook_secret = SECRET.into();
        config
    }

    async fn send(config: Config, request: TestRequest) -> StatusCode {
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(VerifySignature::new(&config))
                    .route("/", web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        match test::try_call_service(&app, request.uri("/").to_request()).await {
            Ok(response) => response.status(),
            Err(err) => err.error_response().status(),
        }
    }

    #[actix_web::test]
    async fn valid_signature_passes_with_payload_intact() {
        let status = send(
            signing_config(),
            TestRequest::post()
                .insert_header((GITHUB_SIGNATURE_HEADER, GOOD_SIG))
                .set_payload(BODY),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_signature_is_unauthorized() {
        let status = send(signing_config(), TestRequest::post().set_payload(BODY)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_body_is_unauthorized() {
        let status = send(
            signing_config(),
            TestRequest::post()
                .insert_header((GITHUB_SIGNATURE_HEADER, GOOD_SIG))
                .set_payload(r#"{"secret": "h3llo"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn truncated_signature_is_unauthorized() {
        let status = send(
            signing_config(),
            TestRequest::post()
                .insert_header((GITHUB_SIGNATURE_HEADER, "sha256="))
                .set_payload(BODY),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn disabled_verification_lets_everything_through() {
        let mut config = Config::from_env_no_version();
        config.server.disable_webhook_signature = true;

        let status = send(config, TestRequest::post().set_payload(BODY)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
