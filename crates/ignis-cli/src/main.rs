use futures::StreamExt;
use futures::stream;
use ignis::recommend::Product;
use ignis::views::Metric;
use ignis::{
    AuthContext, CommercialView, CompanySnapshot, FilePolygonSource, HttpPolygonSource,
    IgnisConfig, PolygonSource, Prediction, PredictionClient, RiskView, Role, Session, animate,
    cnpj,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Ignis(ignis::Error),
    Json(serde_json::Error),
    InvalidIdentifiers(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Ignis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::InvalidIdentifiers(n) => write!(f, "{n} invalid CNPJ(s)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ignis::Error> for CliError {
    fn from(value: ignis::Error) -> Self {
        Self::Ignis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Validate,
    Normalize,
    Report,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    pretty: bool,
    verbosity: u8,
    config: Option<String>,
    role: Option<Role>,
    response: Option<String>,
    id: Option<String>,
    geojson: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "ignis-cli\n\
\n\
USAGE:\n\
  ignis-cli validate <cnpj>...\n\
  ignis-cli normalize [--pretty] [<path>|-]\n\
  ignis-cli report [--role risk|commercial] [--config <path>] (--response <path> | --id <cnpj>) [--geojson <path>] [--out <dir>] [--pretty]\n\
\n\
OPTIONS:\n\
  -v, --verbose   more logging on stderr (repeatable); IGNIS_LOG=<level> also works\n\
\n\
NOTES:\n\
  - normalize reads a raw prediction response and prints the normalized JSON.\n\
  - report renders the dashboard widgets as SVG files into --out (default: .) and prints a\n\
    JSON summary. Without --geojson the region dataset is fetched from geo.url.\n\
  - --id queries the prediction service at prediction.url.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = || it.next().cloned().ok_or(CliError::Usage(usage()));
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "validate" => args.command = Command::Validate,
            "normalize" => args.command = Command::Normalize,
            "report" => args.command = Command::Report,
            "--pretty" => args.pretty = true,
            "-v" | "--verbose" => args.verbosity = args.verbosity.saturating_add(1),
            "--config" => args.config = Some(value()?),
            "--role" => {
                let role = value()?;
                args.role = Some(role.parse().map_err(|_| CliError::Usage(usage()))?);
            }
            "--response" => args.response = Some(value()?),
            "--id" => args.id = Some(value()?),
            "--geojson" => args.geojson = Some(value()?),
            "--out" => args.out = Some(value()?),
            "-" => args.inputs.push("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            other => args.inputs.push(other.to_string()),
        }
    }

    Ok(args)
}

fn init_logging(verbosity: u8) {
    let from_env = std::env::var("IGNIS_LOG")
        .ok()
        .and_then(|v| v.parse::<tracing::Level>().ok());
    let level = match verbosity {
        0 => from_env.unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<IgnisConfig, CliError> {
    let Some(path) = path else {
        return Ok(IgnisConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if is_yaml {
        IgnisConfig::from_yaml_str(&text)
    } else {
        IgnisConfig::from_json_str(&text)
    };
    config.map_err(|e| CliError::Ignis(e.into()))
}

fn run_validate(args: &Args) -> Result<(), CliError> {
    if args.inputs.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    let mut invalid = 0;
    for raw in &args.inputs {
        match cnpj::format(raw) {
            Some(formatted) => println!("{raw}\tvalid\t{formatted}"),
            None => {
                invalid += 1;
                println!("{raw}\tinvalid");
            }
        }
    }
    if invalid > 0 {
        return Err(CliError::InvalidIdentifiers(invalid));
    }
    Ok(())
}

fn run_normalize(args: &Args) -> Result<(), CliError> {
    if args.inputs.len() > 1 {
        return Err(CliError::Usage(usage()));
    }
    let text = read_input(args.inputs.first().map(String::as_str))?;
    let response: Value = serde_json::from_str(&text)?;
    write_json(&Prediction::from_response(&response), args.pretty)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskReport<'a> {
    role: &'static str,
    company: &'a CompanySnapshot,
    fraud_notice: Option<&'a str>,
    network_ticks: usize,
    files: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommercialReport<'a> {
    role: &'static str,
    company: &'a CompanySnapshot,
    metrics: Vec<MetricOut<'a>>,
    insight: &'a str,
    recommendation: Option<&'static str>,
    files: Vec<String>,
}

#[derive(Serialize)]
struct MetricOut<'a> {
    label: &'static str,
    value: &'a str,
}

async fn fetch_prediction(args: &Args, config: &IgnisConfig) -> Result<Prediction, CliError> {
    match (&args.response, &args.id) {
        (Some(path), None) => {
            let response: Value = serde_json::from_str(&read_input(Some(path))?)?;
            Ok(Prediction::from_response(&response))
        }
        (None, Some(id)) => {
            let client = PredictionClient::from_config(config)?;
            let mut session = Session::from_config(config);
            session.submit(&client, id).await?;
            Ok(session.prediction().clone())
        }
        _ => Err(CliError::Usage(usage())),
    }
}

fn write_svg(dir: &Path, name: &str, svg: &str) -> Result<String, CliError> {
    let path = dir.join(format!("{name}.svg"));
    std::fs::write(&path, svg)?;
    tracing::debug!(path = %path.display(), "wrote widget");
    Ok(path.display().to_string())
}

async fn run_report(args: &Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let prediction = fetch_prediction(args, &config).await?;
    let out_dir = PathBuf::from(args.out.as_deref().unwrap_or("."));
    std::fs::create_dir_all(&out_dir)?;

    match &args.geojson {
        Some(path) => {
            let source = FilePolygonSource::new(path);
            report(args, &config, &prediction, &out_dir, &source).await
        }
        None => {
            let source = HttpPolygonSource::from_config(&config)?;
            report(args, &config, &prediction, &out_dir, &source).await
        }
    }
}

async fn report<P: PolygonSource>(
    args: &Args,
    config: &IgnisConfig,
    prediction: &Prediction,
    out_dir: &Path,
    polygons: &P,
) -> Result<(), CliError> {
    let auth = AuthContext::new(args.role.unwrap_or(Role::Risk));
    match auth.role {
        Role::Risk => {
            let mut view = RiskView::new(&auth, config)?;
            view.update(prediction, polygons).await;
            let budget = config.network_max_iterations();
            let network_ticks = animate(view.network_mut(), stream::repeat(()).take(budget)).await;

            let mut files = Vec::new();
            for (name, svg) in view.svg_documents() {
                files.push(write_svg(out_dir, name, &svg)?);
            }
            write_json(
                &RiskReport {
                    role: auth.role.as_str(),
                    company: &prediction.snapshot,
                    fraud_notice: view.fraud_notice(),
                    network_ticks,
                    files,
                },
                args.pretty,
            )
        }
        Role::Commercial => {
            let mut view = CommercialView::new(&auth, config)?;
            view.update(&prediction.snapshot, polygons).await;
            let files = vec![write_svg(out_dir, "map", &view.map().to_svg_string())?];
            write_json(
                &CommercialReport {
                    role: auth.role.as_str(),
                    company: &prediction.snapshot,
                    metrics: view
                        .metrics()
                        .iter()
                        .map(|m: &Metric| MetricOut {
                            label: m.label,
                            value: &m.value,
                        })
                        .collect(),
                    insight: view.insight(),
                    recommendation: view.recommendation().map(Product::label),
                    files,
                },
                args.pretty,
            )
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Validate => run_validate(&args),
        Command::Normalize => run_normalize(&args),
        Command::Report => run_report(&args).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging(args.verbosity);

    match run(args).await {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err @ CliError::InvalidIdentifiers(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
