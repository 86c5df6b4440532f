use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifecal", version, about = "Generate a printable life calendar")]
struct Cli {
    /// Birth date, as dd/mm/yyyy or dd-mm-yyyy.
    date: String,

    /// Output file; the extension is replaced to match `--format`.
    #[arg(short = 'f', long, default_value = "life_calendar.svg")]
    filename: PathBuf,

    /// Calendar title.
    #[arg(short = 't', long, default_value = lifecal::DEFAULT_TITLE)]
    title: String,

    /// Text drawn under the title.
    #[arg(short = 's', long)]
    subtitle: Option<String>,

    /// Text drawn rotated down the left side of the grid.
    #[arg(long)]
    sidebar: Option<String>,

    /// Number of rows (years) to draw.
    #[arg(short = 'a', long, default_value_t = lifecal::DEFAULT_AGE_ROWS)]
    age: u32,

    /// Darken weeks before DATE (`-d=DATE`); today when no value is given.
    #[arg(short = 'd', long, value_name = "DATE", num_args = 0..=1, require_equals = true)]
    darken_past: Option<Option<String>>,

    /// Render one calendar per day from `date` to DATE inclusive.
    #[arg(short = 'e', long, value_name = "DATE")]
    end: Option<String>,

    /// Output format; inferred from `--filename` when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Plain boxes, rows numbered by age and no colour key.
    #[arg(long, default_value_t = false)]
    classic: bool,

    /// Layout configuration JSON.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render sweep days in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Pixels per page unit for PNG output.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Log debug output to stderr.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
}

impl From<FormatChoice> for lifecal::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Svg => Self::Svg,
            FormatChoice::Png => Self::Png,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(paths) => {
            for path in paths {
                println!("Created {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
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

fn run(cli: Cli) -> anyhow::Result<Vec<PathBuf>> {
    let config = match &cli.config {
        Some(path) => lifecal::LayoutConfig::from_path(path)?,
        None => lifecal::LayoutConfig::default(),
    };

    let birthdate = lifecal::parse_date(&cli.date)?;
    let darken_until = match &cli.darken_past {
        None => None,
        Some(None) => Some(chrono::Local::now().date_naive()),
        Some(Some(s)) => Some(lifecal::parse_date(s)?),
    };

    let request = lifecal::CalendarRequest::builder(birthdate)
        .title(cli.title.clone())
        .age_rows(cli.age)
        .darken_until(darken_until)
        .subtitle_text(cli.subtitle.clone())
        .sidebar_text(cli.sidebar.clone())
        .build(&config)?;

    let format = cli
        .format
        .map(lifecal::OutputFormat::from)
        .or_else(|| lifecal::OutputFormat::from_path(&cli.filename))
        .unwrap_or_default();
    let naming = lifecal::OutputNaming::new(&cli.filename, format);
    let style = if cli.classic {
        lifecal::RenderStyle::Classic
    } else {
        lifecal::RenderStyle::Modern
    };
    let settings = lifecal::BackendSettings {
        raster_scale: cli.scale,
    };

    match &cli.end {
        None => {
            let mut backend = lifecal::create_backend(format, &settings)?;
            let out = lifecal::render_document(
                backend.as_mut(),
                &request,
                &config,
                style,
                &naming.single(),
            )
            .with_context(|| format!("render calendar for {birthdate}"))?;
            Ok(vec![out])
        }
        Some(end) => {
            let end = lifecal::parse_date(end)?;
            let range = lifecal::DateRange::new(birthdate, end)?;
            let opts = lifecal::SweepOpts {
                parallel: cli.parallel,
                threads: cli.threads,
            };
            tracing::info!(days = range.len_days(), parallel = opts.parallel, "starting sweep");
            Ok(lifecal::render_sweep(
                range, &request, &config, style, &naming, &settings, &opts,
            )?)
        }
    }
}
