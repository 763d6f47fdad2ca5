use crate::status::{HandlerExecutionError, HandlerStatus};
use std::pin::Pin;

pub mod config;
pub mod exchange;
pub mod handler;
pub mod implementation;
pub mod status;

pub type HandlerOutput<'a> =
    Pin<Box<dyn Future<Output = Result<HandlerStatus, HandlerExecutionError>> + Send + 'a>>;
