//! The HTTP server.
//!
//! Only `GET` is answered. Every other method is refused with
//! `405 Method Not Allowed`. A `GET` always gets a `200 OK`, carrying
//! either the requested entry or the not-found page.

use hyper::{Body, Method, Request, Response};
use log::debug;
use percent_encoding::percent_decode_str;

use crate::gateway::{ArchiveGateway, Reply};

use self::response::{method_not_allowed, reply};

mod listener;
mod response;

pub use self::listener::{bind, http_listener};

/// Answer one request through `gateway`.
pub async fn handle_request(req: Request<Body>, gateway: &ArchiveGateway) -> Response<Body> {
    if *req.method() != Method::GET {
        debug!("Refusing {} {}", req.method(), req.uri().path());
        return method_not_allowed();
    }

    let path = match percent_decode_str(req.uri().path()).decode_utf8() {
        Ok(path) => path.into_owned(),
        Err(_) => {
            debug!("Not found: {} is not UTF-8", req.uri().path());
            return reply(Reply::NotFound);
        }
    };
    reply(gateway.respond(&path).await)
}
