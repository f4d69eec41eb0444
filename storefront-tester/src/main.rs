use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use storefront_tester::browser::{new_session, BrowserConfig, Session};
use storefront_tester::profile::{ProfileKind, StoreProfile};
use storefront_tester::report;
use storefront_tester::runner::{run_all, RunOptions, ScenarioResult};
use storefront_tester::scenario::{
    default_keys, get_scenario, list_scenarios, CarriedState, ScenarioCtx, StoreScenario,
    TestAccount,
};
use storefront_tester::util::split_csv;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run the browser in headless mode
    Headless,
    /// Run the browser with a visible window
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "storefront-tester", version = "0.4.0")]
#[command(about = "Automated browser smoke tests for the storefront web application")]
struct Args {
    /// Base URL of the storefront under test
    #[arg(long, env = "STOREFRONT_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// WebDriver endpoint (chromedriver)
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Scenarios to run (comma-separated, "all" for the full suite)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Marker profile of the target storefront build
    #[arg(long, value_enum, default_value_t = ProfileKind::Classic)]
    profile: ProfileKind,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run headless or windowed
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,

    /// Deadline in seconds for each element wait
    #[arg(long, default_value_t = 10)]
    wait_timeout_secs: u64,

    /// Test account email for the login scenario
    #[arg(long, env = "STOREFRONT_TEST_EMAIL", default_value = "testuser@example.com")]
    email: String,

    /// Test account password for the login scenario
    #[arg(long, env = "STOREFRONT_TEST_PASSWORD", default_value = "password123")]
    password: String,

    /// Artifacts directory for failure screenshots and DOM dumps
    #[arg(long, default_value = "target/smoke-artifacts")]
    artifacts_dir: String,

    /// Disable failure artifact capture
    #[arg(long)]
    no_artifacts: bool,

    /// Exit non-zero when any scenario failed
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let scenarios = resolve_scenarios(&args.scenarios);
    if scenarios.is_empty() {
        eprintln!("⚠️  No runnable scenarios selected");
        return Ok(());
    }

    let cfg = build_browser_config(&args);
    let driver = new_session(&cfg).await.with_context(|| {
        format!(
            "could not start a browser session via {} - is chromedriver running?",
            args.webdriver_url
        )
    })?;
    let session = Session::new(driver, args.base_url.clone(), cfg.wait_timeout);

    let mut ctx = ScenarioCtx {
        profile: StoreProfile::for_kind(args.profile),
        account: TestAccount {
            email: args.email.clone(),
            password: args.password.clone(),
        },
        verbose: args.verbose,
        carried: CarriedState::default(),
    };
    let options = RunOptions {
        profile_label: profile_label(args.profile),
        artifacts_dir: args.artifacts_dir.clone(),
        capture_artifacts: !args.no_artifacts,
    };

    let start_time = Instant::now();
    let results = run_all(&session, &scenarios, &mut ctx, &options).await;

    // Release the browser before reporting, on this one path regardless of
    // how the scenarios concluded.
    if let Err(e) = session.close().await {
        log::warn!("browser session did not shut down cleanly: {e}");
    }

    write_reports(&args, &results, start_time)?;

    if args.strict && results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🛒 Storefront Smoke Tester".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn profile_label(kind: ProfileKind) -> String {
    format!("{kind:?}").to_lowercase()
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut out = open_output(args.output.clone())?;
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:18} - {description}")?;
    }
    out.flush()?;
    Ok(true)
}

fn expand_scenario_keys(scenarios_arg: &str) -> Vec<String> {
    let keys = split_csv(scenarios_arg);
    if keys.iter().any(|k| k == "all") {
        default_keys()
    } else {
        keys
    }
}

fn resolve_scenarios(scenarios_arg: &str) -> Vec<(String, Box<dyn StoreScenario>)> {
    let mut resolved = Vec::new();
    for key in expand_scenario_keys(scenarios_arg) {
        if let Some(scenario) = get_scenario(&key) {
            resolved.push((key, scenario));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
        }
    }
    resolved
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        webdriver_url: args.webdriver_url.clone(),
        wait_timeout: Duration::from_secs(args.wait_timeout_secs),
        ..BrowserConfig::default()
    }
}

fn open_output(path: Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(stdout())),
    })
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut out = open_output(args.output.clone())?;

    match args.report.as_str() {
        "json" => report::generate_json_report(out.as_mut(), results)?,
        "markdown" => report::generate_markdown_report(out.as_mut(), results)?,
        _ => report::generate_console_report(out.as_mut(), results, start_time.elapsed())?,
    }

    out.flush()?;
    Ok(())
}
