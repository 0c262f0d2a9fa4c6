use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use futures::future;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::catalog::view::GalleryView;
use crate::catalog::{Record, RecordStore};
use crate::cli::args::{CliArgs, Command, GalleryArgs, StatsArgs, StatsEndpoint, StatsQueryArgs};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::stats::{ClientOptions, StatsClient, StatsQuery};

fn print_banner(no_color: bool) {
    let _ = no_color;
    const BANNER: &str = r#"
    __    _
   / /_  (_)___  _____________  ____  ___
  / __ \/ / __ \/ ___/ ___/ _ \/ __ \/ _ \
 / /_/ / / /_/ (__  ) /__/ /_/ / /_/ /  __/
/_.___/_/\____/____/\___/\____/ .___/\___/
                             /_/
       v0.1.0 - ecological monitoring toolkit
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<18}: {}", label, value);
}

#[derive(Debug, Clone)]
struct RunConfig {
    command: Command,
    output: Option<String>,
    format: Option<OutputFormat>,
    no_color: bool,
    base_url: String,
    timeout: usize,
    proxy: Option<String>,
    records_path: Option<String>,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw)
                .ok_or_else(|| format!("invalid output format '{raw}'"))?,
        ),
        None => None,
    };

    let (base_url, timeout, proxy) = match &args.command {
        Command::Stats(stats) => (
            stats
                .base_url
                .clone()
                .or(cfg.base_url)
                .unwrap_or_else(|| "http://localhost:8080/api".to_string()),
            stats.timeout.or(cfg.timeout).unwrap_or(10),
            stats.proxy.clone().or(cfg.proxy),
        ),
        Command::Gallery(_) => (
            cfg.base_url
                .unwrap_or_else(|| "http://localhost:8080/api".to_string()),
            cfg.timeout.unwrap_or(10),
            cfg.proxy,
        ),
    };

    let records_path = match &args.command {
        Command::Gallery(gallery) => gallery
            .records
            .clone()
            .or(cfg.records)
            .map(|p| config::expand_tilde_string(&p)),
        Command::Stats(_) => None,
    };

    Ok(RunConfig {
        command: args.command,
        output,
        format,
        no_color,
        base_url,
        timeout,
        proxy,
        records_path,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);

    match run.command.clone() {
        Command::Gallery(gallery) => run_gallery(&run, gallery).await,
        Command::Stats(stats) => run_stats(&run, stats).await,
    }
}

async fn load_store(records_path: Option<&str>) -> Result<RecordStore, String> {
    let Some(path) = records_path else {
        return Ok(RecordStore::sample());
    };
    let store = if path.trim().to_lowercase().ends_with(".csv") {
        RecordStore::from_csv_file(path).await
    } else {
        RecordStore::from_json_file(path).await
    };
    store.map_err(|e| e.to_string())
}

async fn run_gallery(run: &RunConfig, gallery: GalleryArgs) -> Result<(), String> {
    let store = load_store(run.records_path.as_deref()).await?;
    let total = store.len();

    let mut view = GalleryView::new(store);
    if let Some(search) = gallery.search {
        view.set_search(search);
    }
    if let Some(taxa) = gallery.taxa {
        view.set_taxa(taxa);
    }
    if let Some(species) = gallery.species {
        view.set_species(species);
    }
    if let Some(origin) = gallery.origin {
        // Normalize to the canonical label so "non-native" still matches.
        let origin = origin
            .parse::<crate::catalog::OriginStatus>()
            .map_err(|e| format!("invalid origin '{origin}': {e}"))?;
        view.set_origin(origin.label());
    }

    let records = view.filtered();
    if let Some(path) = run.output.as_deref() {
        let format = run
            .format
            .or_else(|| output::infer_format_from_path(path))
            .unwrap_or(OutputFormat::Json);
        let bytes = output::render_records(records, format);
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
        format_kv_line("Saved", &format!("{} of {} records -> {}", records.len(), total, path));
        return Ok(());
    }

    match run.format {
        Some(OutputFormat::Json) | Some(OutputFormat::Csv) => {
            let bytes = output::render_records(records, run.format.unwrap_or(OutputFormat::Json));
            print!("{}", String::from_utf8_lossy(&bytes));
        }
        _ => print_gallery_text(records, total),
    }
    Ok(())
}

fn print_gallery_text(records: &[Record], total: usize) {
    format_kv_line("Gallery", &format!("{} of {} records", records.len(), total));
    println!();
    if records.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }
    for r in records {
        println!(
            "{} {} {} {}",
            r.common_name.bold().green(),
            format!("({})", r.scientific_name).italic().white(),
            format!(":: {} / {}", r.taxa, r.species).cyan(),
            r.origin.label().magenta(),
        );
    }
}

fn loading_spinner(message: &str) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} Loading :: {msg}")
            .map_err(|e| format!("failed to build spinner style: {e}"))?,
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

fn build_query(args: &StatsQueryArgs) -> StatsQuery {
    StatsQuery {
        from: args.from.clone(),
        to: args.to.clone(),
        block: args.block,
        site_code: args.site_code.clone(),
        taxa: args.taxa.clone(),
        common_name: args.common_name.clone(),
    }
}

async fn run_stats(run: &RunConfig, stats: StatsArgs) -> Result<(), String> {
    let client = StatsClient::new(ClientOptions {
        base_url: run.base_url.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let query = build_query(stats.endpoint.query_args());
    let spinner = loading_spinner(&run.base_url)?;

    let rendered: Result<Vec<u8>, String> = match &stats.endpoint {
        StatsEndpoint::Overview(_) => client
            .observations_overview(&query)
            .await
            .map(|resp| output::render_stats(&resp))
            .map_err(|e| e.to_string()),
        StatsEndpoint::Timeseries(_) => client
            .observations_timeseries(&query)
            .await
            .map(|resp| output::render_stats(&resp))
            .map_err(|e| e.to_string()),
        StatsEndpoint::Blocks(_) => client
            .observations_blocks(&query)
            .await
            .map(|resp| output::render_stats(&resp))
            .map_err(|e| e.to_string()),
        StatsEndpoint::Sites(_) => client
            .observations_sites(&query)
            .await
            .map(|resp| output::render_stats(&resp))
            .map_err(|e| e.to_string()),
        StatsEndpoint::Dashboard(_) => {
            // The dashboard page shows both card sets, so fetch them together.
            future::try_join(
                client.dashboard_stats(&query),
                client.observations_overview(&query),
            )
            .await
            .map(|(dashboard, overview)| {
                output::render_stats(&serde_json::json!({
                    "dashboard": dashboard,
                    "overview": overview,
                }))
            })
            .map_err(|e| e.to_string())
        }
    };
    spinner.finish_and_clear();
    let bytes = rendered?;

    if let Some(path) = run.output.as_deref() {
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
        format_kv_line("Saved", path);
    } else {
        print!("{}", String::from_utf8_lossy(&bytes));
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", e.render());
                return Ok(());
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let mut cmd = CliArgs::command();
                let _ = cmd.print_help();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.as_deref() {
        Some(path) => {
            let path = config::expand_tilde(path);
            config::load_config(&path, false)?
        }
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
