use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bioscope",
    version,
    about = "ecological monitoring catalogue and stats toolkit",
    long_about = "Bioscope browses a species observation catalogue with faceted filtering and queries the monitoring stats API.\n\nExamples:\n  bioscope gallery -q snake\n  bioscope gallery -t Reptiles --origin Native -R ./records.csv\n  bioscope stats overview --from 2025-01-01 --to 2025-06-30\n  bioscope stats dashboard -U http://monitoring.local/api\n\nTip: Use --config to persist the API base URL and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.bioscope/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write results to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, or csv)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse and filter the species gallery.
    Gallery(GalleryArgs),
    /// Query the monitoring stats API.
    Stats(StatsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GalleryArgs {
    #[arg(
        short = 'q',
        long = "search",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Free-text search over common and scientific names."
    )]
    pub search: Option<String>,

    #[arg(
        short = 't',
        long = "taxa",
        value_name = "TAXA",
        help_heading = "Filters",
        help = "Keep only records of this taxa (e.g. Birds)."
    )]
    pub taxa: Option<String>,

    #[arg(
        short = 's',
        long = "species",
        value_name = "GROUP",
        help_heading = "Filters",
        help = "Keep only records of this species group (e.g. Fairywren)."
    )]
    pub species: Option<String>,

    #[arg(
        long = "origin",
        value_name = "STATUS",
        help_heading = "Filters",
        help = "Keep only records with this origin status (Native or Non-native)."
    )]
    pub origin: Option<String>,

    #[arg(
        short = 'R',
        long = "records",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load gallery records from a JSON or CSV file instead of the built-in sample set."
    )]
    pub records: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(
        short = 'U',
        long = "url",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Stats API base URL (e.g. http://localhost:8080/api)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub endpoint: StatsEndpoint,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StatsEndpoint {
    /// Observation overview counts.
    Overview(StatsQueryArgs),
    /// Observation counts bucketed over time.
    Timeseries(StatsQueryArgs),
    /// Observation counts grouped by survey block.
    Blocks(StatsQueryArgs),
    /// Observation counts grouped by monitoring site.
    Sites(StatsQueryArgs),
    /// Aggregated dashboard cards (fetched together with the overview).
    Dashboard(StatsQueryArgs),
}

impl StatsEndpoint {
    pub fn query_args(&self) -> &StatsQueryArgs {
        match self {
            Self::Overview(q)
            | Self::Timeseries(q)
            | Self::Blocks(q)
            | Self::Sites(q)
            | Self::Dashboard(q) => q,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct StatsQueryArgs {
    #[arg(
        long = "from",
        value_name = "DATE",
        help_heading = "Query",
        help = "Start date (YYYY-MM-DD)."
    )]
    pub from: Option<String>,

    #[arg(
        long = "to",
        value_name = "DATE",
        help_heading = "Query",
        help = "End date (YYYY-MM-DD)."
    )]
    pub to: Option<String>,

    #[arg(
        short = 'b',
        long = "block",
        value_name = "N",
        help_heading = "Query",
        help = "Filter by survey block number."
    )]
    pub block: Option<i32>,

    #[arg(
        long = "site",
        visible_alias = "site-code",
        value_name = "CODE",
        help_heading = "Query",
        help = "Filter by monitoring site code."
    )]
    pub site_code: Option<String>,

    #[arg(
        long = "taxa",
        value_name = "TAXA",
        help_heading = "Query",
        help = "Filter by taxa."
    )]
    pub taxa: Option<String>,

    #[arg(
        long = "common-name",
        value_name = "NAME",
        help_heading = "Query",
        help = "Filter by species common name."
    )]
    pub common_name: Option<String>,
}
