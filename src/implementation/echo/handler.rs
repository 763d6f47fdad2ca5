use crate::HandlerOutput;
use crate::config::Config;
use crate::handler::Handler;
use crate::implementation::echo::config::EchoHandlerConfig;
use crate::implementation::{HttpExchange, HttpRequest, HttpResponse};
use crate::status::{Code, HandlerStatus};
use http::StatusCode;

/// Terminal handler that answers 200 with the request body (or a configured
/// static body) echoed back. Useful as the tail of a handler chain in tests
/// and demos.
pub struct EchoHandler {
    config: Config<EchoHandlerConfig>,
}

impl EchoHandler {
    pub fn new(config: Config<EchoHandlerConfig>) -> Self {
        Self { config }
    }
}

impl Handler<HttpRequest, HttpResponse> for EchoHandler {
    fn process<'i1, 'i2, 'o>(&'i1 self, exchange: &'i2 mut HttpExchange) -> HandlerOutput<'o>
    where
        'i1: 'o,
        'i2: 'o,
        Self: 'o,
    {
        Box::pin(async move {
            let request = exchange.consume_input();
            let (parts, request_body) = request.into_parts();

            let echo_body = match self.config.get().static_body.as_ref() {
                Some(text) if !text.is_empty() => text.clone().into_bytes(),
                _ => request_body,
            };

            let mut response = HttpResponse::new(echo_body);
            *response.status_mut() = StatusCode::OK;
            if self.config.get().echo_headers {
                response.headers_mut().extend(parts.headers);
            }

            if let Err(err) = exchange.save_output(response) {
                tracing::warn!("unable to write echo response: {}", err);
                return Ok(HandlerStatus::new(Code::SERVER_ERROR)
                    .set_message("response already committed"));
            }
            Ok(HandlerStatus::new(Code::OK))
        })
    }
}
