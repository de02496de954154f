use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use users_shared::{
    response::{api_response, error_response},
    users, AppState,
};

/// Body returned for any method other than GET/POST/PUT/DELETE
pub(crate) const METHOD_NOT_ALLOWED: &str = "method Not allowed";

/// Main Lambda handler - routes requests on HTTP method to the user operations
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let body = event.body();
    tracing::info!(
        "Users Lambda invoked - Method: {} Path: {}",
        method,
        event.uri().path()
    );

    let store = state.store.as_ref();
    let table_name = state.table_name.as_str();
    let email = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("email"))
        .unwrap_or("");

    match method {
        &Method::GET if !email.is_empty() => {
            match users::fetch_user(store, table_name, email).await {
                Ok(user) => api_response(StatusCode::OK, &user),
                Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
            }
        }
        &Method::GET => match users::fetch_users(store, table_name).await {
            Ok(all) => api_response(StatusCode::OK, &all),
            Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        &Method::POST => match users::create_user(store, table_name, body).await {
            Ok(user) => api_response(StatusCode::CREATED, &user),
            Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        // 201 kept for existing clients even though nothing is created
        &Method::PUT => match users::update_user(store, table_name, body).await {
            Ok(user) => api_response(StatusCode::CREATED, &user),
            Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        &Method::DELETE => match users::delete_user(store, table_name, email).await {
            Ok(()) => api_response(StatusCode::OK, &()),
            Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        _ => {
            tracing::warn!("Unhandled method {}", method);
            api_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
        }
    }
}
