use aws_config::{Region, SdkConfig};
use std::env;

/// Table used when `TABLE_NAME` is not set
pub const DEFAULT_TABLE_NAME: &str = "Users";

/// Settings read once at cold start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    /// Falls back to the SDK's default provider chain when unset
    pub region: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            table_name: non_empty("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            region: non_empty("AWS_REGION"),
        }
    }

    /// Load the AWS SDK configuration, pinning the region if one was given
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::from_env();
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}
