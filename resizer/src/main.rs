use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use media_bucket::S3ObjectStore;
use resizer::{derivative::DerivativeGenerator, server, types::Environment};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production (CloudWatch), plain format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let aws_config = environment.aws_config().await;
    let region = aws_config.region().map(ToString::to_string);

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&aws_config),
    ));
    let store = Arc::new(S3ObjectStore::new(s3_client, environment.s3_bucket()));

    let site_base_url = environment.site_base_url(region.as_deref());
    tracing::info!(
        "Serving derivatives of bucket {} from {}",
        store.bucket_name(),
        site_base_url
    );

    let generator = Arc::new(DerivativeGenerator::new(store, site_base_url));

    server::start(generator).await
}
