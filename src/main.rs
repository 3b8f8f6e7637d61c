use anyhow::Context;
use clap::Parser;
use page_object_gen::cli::Cli;
use page_object_gen::{PageObjectGenerator, RunSummary, StaticPage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.to_config().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .init();

    let generator = PageObjectGenerator::new(config);

    info!("Generating page object for {}", cli.url);
    let summary = match &cli.html {
        Some(path) => {
            let page = StaticPage::from_file(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            generator.run(page, &cli.url).await?
        }
        None => run_chrome(&generator, &cli.url).await?,
    };

    report(&summary);
    Ok(())
}

#[cfg(feature = "chrome")]
async fn run_chrome(generator: &PageObjectGenerator, url: &str) -> anyhow::Result<RunSummary> {
    use page_object_gen::browser::ChromeBrowser;
    Ok(generator.run(ChromeBrowser::new(), url).await?)
}

#[cfg(not(feature = "chrome"))]
async fn run_chrome(_generator: &PageObjectGenerator, _url: &str) -> anyhow::Result<RunSummary> {
    anyhow::bail!("built without the `chrome` feature; use --html <file>")
}

fn report(summary: &RunSummary) {
    if let Some(path) = &summary.output_path {
        println!("Page object written to {}", path.display());
    }
    println!(
        "{} methods from {} discovered elements ({} skipped, {} failed, {} labelled by OCR)",
        summary.methods,
        summary.discovered,
        summary.skipped(),
        summary.failed,
        summary.ocr_relabelled
    );
}
