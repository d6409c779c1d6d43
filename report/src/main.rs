use clap::Parser;
use eyre::WrapErr;

use chuni_http_client::ChuniClient;
use chuni_report::cli::{Command, RootArgs};
use chuni_report::config::ReportConfig;
use chuni_report::pipeline::Pipeline;
use chuni_report::report::{build_report, load_catalog, write_json, ReportOptions};
use chuni_songdb::HttpJacketSource;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    if let Some(output) = args.command.offline_output() {
        println!("{output}");
        return Ok(());
    }

    let config = ReportConfig::from_env_and_args(&args).wrap_err("load config")?;

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .wrap_err("build http client")?;
    let jackets = HttpJacketSource::new(http.clone(), config.jacket_catalog_url.clone());

    match args.command {
        Command::Report {
            output,
            recent,
            allow_missing_profile,
        } => {
            let client =
                ChuniClient::new(&config.base_url, &config.cookie_path, config.http_timeout)
                    .wrap_err("initialize CHUNITHM-NET client")?;
            let catalog = load_catalog(&http, &config.catalog)
                .await
                .wrap_err("load difficulty catalog")?;

            let options = ReportOptions {
                include_recent: recent,
                allow_missing_profile,
                malformed_policy: config.malformed_policy,
            };
            let report = build_report(&client, catalog, jackets, options)
                .await
                .wrap_err("build report")?;

            write_json(&report, &output)?;
            tracing::info!("Report written to {}", output.display());
        }
        Command::Enrich { html, output } => {
            let page = std::fs::read_to_string(&html)
                .wrap_err_with(|| format!("read html: {}", html.display()))?;
            let catalog = load_catalog(&http, &config.catalog)
                .await
                .wrap_err("load difficulty catalog")?;

            let records = Pipeline::new(catalog, jackets, config.malformed_policy)
                .run(&page)
                .await
                .wrap_err("enrich records")?;
            write_json(&records, &output)?;
        }
        // answered by offline_output above
        Command::Rating { .. } => {}
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chuni_report=info,chuni_songdb=info,chuni_parsers=warn".into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}
