use crate::HandlerOutput;
use crate::config::ConfigError;
use crate::exchange::AttachmentKey;
use crate::handler::Handler;
use crate::implementation::headauth::config::{HeaderAuthConfig, MethodPolicy, ResponseFormat};
use crate::implementation::{BoxedHttpHandler, HttpExchange, HttpRequest, HttpResponse};
use crate::status::{Code, HandlerStatus};
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, StatusCode};
use serde::Serialize;

/// Attachment holding the allow-listed header value of an authorized request,
/// for downstream handlers that want to know who passed the check.
pub const AUTHORIZED_VALUE: AttachmentKey = AttachmentKey(1);

#[derive(Serialize)]
struct ResponseMessage {
    message: &'static str,
}

/// Authorization filter: checks the configured request header against an
/// allow-list and either delegates to the next handler or rejects with 403.
pub struct HeaderAuthHandler {
    header: HeaderName,
    allowed: Vec<String>,
    methods: Vec<String>,
    response_format: ResponseFormat,
    method_policy: MethodPolicy,
    next: BoxedHttpHandler,
    name: String,
}

impl HeaderAuthHandler {
    /// Validates the configuration and builds the filter around `next`.
    /// Validation runs here exactly once; the per-request path cannot fail.
    pub fn new(
        config: HeaderAuthConfig,
        next: BoxedHttpHandler,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let header = config.header_name()?;
        if config.allowed.is_empty() {
            return Err(ConfigError::EmptyAllowed);
        }
        if config.methods.is_empty() {
            return Err(ConfigError::EmptyMethods);
        }
        let response_format = config.response_format()?;
        let method_policy = config.method_policy()?;

        Ok(Self {
            header,
            allowed: config.allowed,
            methods: config.methods,
            response_format,
            method_policy,
            next,
            name: name.into(),
        })
    }

    /// Absent or non-UTF-8 header values read as "", which no allow-list
    /// entry can match.
    fn header_value<'r>(&self, request: &'r HttpRequest) -> &'r str {
        request
            .headers()
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    }

    fn rejects(&self, value_allowed: bool, method_listed: bool) -> bool {
        match self.method_policy {
            MethodPolicy::Strict => !value_allowed || !method_listed,
            MethodPolicy::Scoped => !value_allowed && method_listed,
        }
    }

    fn reject(&self, exchange: &mut HttpExchange) {
        let reason = StatusCode::FORBIDDEN
            .canonical_reason()
            .unwrap_or("Forbidden");

        let mut response = HttpResponse::new(Vec::new());
        *response.status_mut() = StatusCode::FORBIDDEN;
        match self.response_format {
            ResponseFormat::Json => {
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                *response.body_mut() = serde_json::to_vec(&ResponseMessage { message: reason })
                    .unwrap_or_else(|_| reason.as_bytes().to_vec());
            }
            ResponseFormat::Text => {
                *response.body_mut() = reason.as_bytes().to_vec();
            }
        }

        /* the response is committed once; a failed write is logged, never retried */
        if let Err(err) = exchange.save_output(response) {
            tracing::warn!(
                handler = %self.name,
                "unable to write reject response: {}",
                err
            );
        }
    }
}

impl Handler<HttpRequest, HttpResponse> for HeaderAuthHandler {
    fn process<'i1, 'i2, 'o>(&'i1 self, exchange: &'i2 mut HttpExchange) -> HandlerOutput<'o>
    where
        'i1: 'o,
        'i2: 'o,
        Self: 'o,
    {
        Box::pin(async move {
            let request = exchange.input();
            let value = self.header_value(request).to_owned();
            let method = request.method().as_str().to_owned();

            let value_allowed = self.allowed.iter().any(|allowed| allowed == &value);
            let method_listed = self.methods.iter().any(|listed| listed == &method);

            if self.rejects(value_allowed, method_listed) {
                tracing::debug!(handler = %self.name, method = %method, "request rejected");
                self.reject(exchange);
                return Ok(HandlerStatus::new(Code::REQUEST_COMPLETED | Code::CLIENT_ERROR)
                    .set_message("request forbidden"));
            }

            if value_allowed {
                exchange
                    .attachments_mut()
                    .add_attachment::<String>(AUTHORIZED_VALUE, Box::new(value));
            }

            self.next.process(exchange).await
        })
    }
}
