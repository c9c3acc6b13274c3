//! Request rewriting applied before routing.

use std::collections::HashMap;

use axum::extract::{Query, Request};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

const OVERRIDE_PARAM: &str = "_method";

/// Let HTML forms, which can only POST, reach PUT and DELETE routes through
/// `?_method=PUT` or `?_method=DELETE`.
pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(method) = override_target(&req) {
            *req.method_mut() = method;
        }
    }
    next.run(req).await
}

fn override_target(req: &Request) -> Option<Method> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(req.uri()).ok()?;
    match params.get(OVERRIDE_PARAM)?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
