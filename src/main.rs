use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use remote_list_source::auth::TokenProvider;
use remote_list_source::config::Settings;
use remote_list_source::display::{format_rows_table, format_total};
use remote_list_source::source::{
    FetchResult, FilterSpec, Paging, RemoteListSource, SortDirection, SortSpec,
};
use remote_list_source::transport::ReqwestClient;
use remote_list_source::{ListSourceError, Result};

#[derive(Parser)]
#[command(name = "remote-list")]
#[command(about = "Fetch a paged, sorted and filtered list from a remote endpoint")]
#[command(version)]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List endpoint URL (overrides the settings file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Sort key as field[:asc|desc]; repeat for secondary keys
    #[arg(short, long, value_parser = parse_sort)]
    sort: Vec<SortSpec>,

    /// Filter as field=term; repeatable
    #[arg(short, long, value_parser = parse_filter)]
    filter: Vec<FilterSpec>,

    /// Page number (starting at 1)
    #[arg(short, long)]
    page: Option<u32>,

    /// Rows per page
    #[arg(long)]
    per_page: Option<u32>,

    /// Print rows and total as JSON
    #[arg(long)]
    json: bool,

    /// Log requests to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_sort(s: &str) -> std::result::Result<SortSpec, String> {
    let (field, direction) = match s.split_once(':') {
        Some((field, direction)) => (
            field,
            direction
                .parse::<SortDirection>()
                .map_err(|e| e.to_string())?,
        ),
        None => (s, SortDirection::Asc),
    };
    if field.is_empty() {
        return Err("sort field cannot be empty".to_string());
    }
    Ok(SortSpec::new(field, direction))
}

fn parse_filter(s: &str) -> std::result::Result<FilterSpec, String> {
    match s.split_once('=') {
        Some((field, search)) if !field.is_empty() => Ok(FilterSpec::new(field, search)),
        _ => Err("expected format: field=term".to_string()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Paging from `--page`/`--per-page`. A lone `--per-page` starts at page 1.
fn paging(cli: &Cli) -> Option<Paging> {
    if cli.page.is_none() && cli.per_page.is_none() {
        return None;
    }
    Some(Paging::new(
        cli.page.unwrap_or(1),
        cli.per_page.unwrap_or_default(),
    ))
}

async fn list<A: TokenProvider>(cli: &Cli, settings: &Settings, auth: A) -> Result<()> {
    let client = ReqwestClient::new(settings.timeout(), settings.connect_timeout())?;
    let mut source = RemoteListSource::with_config(client, auth, settings.source.clone())?;

    source.set_sort(cli.sort.clone());
    source.set_filters(cli.filter.clone());
    source.set_paging(paging(cli));

    source.get_elements().await?;

    if cli.json {
        let result = FetchResult {
            items: source.data().to_vec(),
            total_count: source.count(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_rows_table(source.data()));
        println!("{}", format_total(source.data().len(), source.count()));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::from_env(),
    };
    if let Some(endpoint) = &cli.endpoint {
        settings.source.endpoint = endpoint.clone();
    }
    if settings.source.endpoint.trim().is_empty() {
        return Err(ListSourceError::Config(
            "no endpoint given. Pass --endpoint, set it in the settings file, or set REMOTE_LIST_ENDPOINT"
                .to_string(),
        ));
    }

    let auth = settings.auth.provider();
    list(&cli, &settings, auth).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
