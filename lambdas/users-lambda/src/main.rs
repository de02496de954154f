use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use users_shared::{config::Config, store::DynamoRecordStore, AppState};

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch stamps time and request id already
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    // Initialize the store client once at startup
    let config = Config::from_env();
    let sdk_config = config.load_sdk_config().await;
    tracing::info!(
        "Users Lambda starting - table: {} region: {}",
        config.table_name,
        sdk_config.region().map(|r| r.as_ref()).unwrap_or("default")
    );

    let store = DynamoRecordStore::new(DynamoClient::new(&sdk_config));
    let state = AppState::new(Arc::new(store), config.table_name);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
