use hyper::{Body, Response, StatusCode};

use crate::gateway::{NOT_FOUND_BODY, Reply};

/// The `200 OK` response for a gateway reply.
///
/// The entry's buffer becomes the body as is. There is no content type,
/// the browser sniffs it.
pub fn reply(reply: Reply) -> Response<Body> {
    match reply {
        Reply::Entry(data) => Response::new(Body::from(data)),
        Reply::NotFound => Response::new(Body::from(NOT_FOUND_BODY)),
    }
}

pub fn method_not_allowed() -> Response<Body> {
    let mut resp = Response::new(Body::empty());
    *resp.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    resp
}
