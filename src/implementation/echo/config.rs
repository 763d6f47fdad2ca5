use serde::Deserialize;

#[derive(Default, Deserialize)]
pub struct EchoHandlerConfig {
    pub echo_headers: bool,
    pub static_body: Option<String>,
}
