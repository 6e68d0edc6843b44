use anyhow::Context;
use mirrorsync::{
    cli,
    gitea_provider::GiteaProvider,
    github_provider::GithubProvider,
    progress::ProgressCallback,
    report::{print_progress, print_summary},
    ReconciliationDriver,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("mirrorsync=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli::run()?;
    tracing::debug!(?settings, "configuration resolved");

    let source = GithubProvider::configure_provider(
        &settings.source_token,
        settings.source_api_url.as_deref(),
    )
    .context("could not set up the source client")?;
    let destination =
        GiteaProvider::configure_provider(&settings.destination_url, &settings.destination_token)
            .context("could not set up the destination client")?;

    let on_progress: ProgressCallback = Box::new(print_progress);
    let report = ReconciliationDriver::new(&settings, &source, &destination)
        .run(Some(&on_progress))
        .await
        .context("could not list source repositories")?;

    if !report.is_empty() {
        print_summary(&report);
    }

    Ok(())
}
