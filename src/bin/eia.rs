use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eia_rs::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use eia_rs::{Client, ClientConfig, ExportOutcome, Params, QueryResult, storage};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "eia",
    version,
    about = "Query the U.S. EIA API v2 and export the results"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// EIA API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// API root.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10, global = true)]
    timeout: u64,
    /// Save `response.data` to file (format inferred by --format or extension).
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum, global = true)]
    format: Option<OutFormat>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a single series by id.
    Series { id: String },
    /// Fetch several series; ids separated by comma or semicolon.
    Multi { ids: String },
    /// Search series by keyword.
    Search { value: String },
    /// GET an arbitrary API URL with extra parameters.
    Query {
        url: String,
        /// Query parameter as key=value (repeatable).
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("invalid parameter '{}', expected key=value", s))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();

    let client = build_client(&cli.global)?;
    let result = match cli.cmd {
        Command::Series { id } => client.series(&id),
        Command::Multi { ids } => {
            let ids = parse_list(&ids);
            if ids.is_empty() {
                bail!("at least one series id required");
            }
            client.multi_series(&ids)
        }
        Command::Search { value } => client.search(&value),
        Command::Query { url, params } => {
            let params: Params = params.into_iter().collect();
            client.query(&url, Some(&params))
        }
    }
    .context("EIA request")?;

    match cli.global.out.as_ref() {
        Some(path) => save(&result, path, cli.global.format.as_ref()),
        None => {
            println!("{}", serde_json::to_string_pretty(result.as_value())?);
            Ok(())
        }
    }
}

fn build_client(g: &GlobalArgs) -> Result<Client> {
    let key = g
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .with_context(|| format!("missing API key: pass --api-key or set {}", API_KEY_ENV))?;
    let cfg = ClientConfig::new(key)
        .with_base_url(g.base_url.as_str())
        .with_timeout(Duration::from_secs(g.timeout));
    Ok(Client::new(cfg)?)
}

fn save(result: &QueryResult, path: &Path, format: Option<&OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    let outcome = match fmt.as_str() {
        "csv" => storage::export_csv(result, path)?,
        "json" => storage::export_json(result, path)?,
        other => bail!("unsupported format: {}", other),
    };
    match outcome {
        ExportOutcome::Written { rows } => eprintln!("Saved {} rows to {}", rows, path.display()),
        ExportOutcome::NoData => eprintln!("No data available to export."),
    }
    Ok(())
}
