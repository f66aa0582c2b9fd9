use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minibucket::{Client, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minibucket=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let bucket = match args.next() {
        Some(bucket) => bucket,
        None => bail!("usage: minibucket <bucket>"),
    };

    let config = Config::from_env()?;
    info!(endpoint = %config.endpoint, bucket = %bucket, "fetching bucket ACL");

    let client = Client::new(config);
    let acl = client.get_bucket_acl(&bucket).await?;
    println!("{acl}");

    Ok(())
}
