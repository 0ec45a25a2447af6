use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};
use upload_issuer::{post_policy::UploadGrantIssuer, server, types::Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, plain format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let aws_config = environment.aws_config().await;
    let credentials_provider = aws_config
        .credentials_provider()
        .context("no AWS credentials provider configured")?;
    let region = aws_config
        .region()
        .map_or_else(|| "us-east-1".to_string(), ToString::to_string);

    let issuer = Arc::new(UploadGrantIssuer::new(
        credentials_provider,
        region,
        environment.s3_bucket(),
        environment.override_aws_endpoint_url().map(ToString::to_string),
        environment.upload_grant_ttl_secs(),
    ));

    server::start(environment, issuer).await
}
