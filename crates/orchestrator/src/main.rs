use anyhow::Result;
use common::Config;
use orchestrator::Pipeline;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Read while the process is still single-threaded.
    let utc_offset = blog_post::local_offset();

    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    config.validate()?;
    info!(
        "Starting trend blog run with {} generator, up to {} posts",
        config.generator, config.max_posts
    );

    let pipeline = Pipeline::from_config(&config)?.with_utc_offset(utc_offset);
    let summary = pipeline.run().await?;

    info!(
        "Run finished. Topics collected: {}, posts written: {}, published: {}",
        summary.topics_collected,
        summary.posts_written.len(),
        summary.published
    );
    Ok(())
}
