use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

use crate::types::ErrorBody;

/// JSON response with the standard headers
pub fn api_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(body)?.into())
        .map_err(Box::new)?)
}

/// `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Result<Response<Body>, Error> {
    api_response(status, &ErrorBody::new(message))
}
