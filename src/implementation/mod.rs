pub mod echo;
pub mod headauth;

use crate::exchange::Exchange;
use crate::handler::Handler;
use http::{Request, Response};

pub type HttpRequest = Request<Vec<u8>>;
pub type HttpResponse = Response<Vec<u8>>;
pub type HttpExchange = Exchange<HttpRequest, HttpResponse>;
pub type BoxedHttpHandler = Box<dyn Handler<HttpRequest, HttpResponse> + Send + Sync>;
