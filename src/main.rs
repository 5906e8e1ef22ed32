use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

use zepto_scout::config::{load_scout_config, CsvLayout, Timings};
use zepto_scout::scraping::browser_manager::pace;
use zepto_scout::scraping::{BrowserSession, LaunchOptions};
use zepto_scout::tools::{export, scrape_category, summary};
use zepto_scout::{Catalog, CategoryProfile, PageRenderer};

const USAGE: &str = "\
Usage: zepto-scout <category>... [options]

Options:
  --all            scrape every known category
  --list           print the known categories and exit
  --headless       run the browser without a window
  --no-prompt      skip the delivery-location confirmation
  --output DIR     write CSV/JSON files under DIR
  --extended-csv   add original_price and discount_percent columns
  -h, --help       show this help";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    slugs: Vec<String>,
    all: bool,
    list: bool,
    headless: bool,
    no_prompt: bool,
    output: Option<PathBuf>,
    extended_csv: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--all" => parsed.all = true,
            "--list" => parsed.list = true,
            "--headless" => parsed.headless = true,
            "--no-prompt" => parsed.no_prompt = true,
            "--extended-csv" => parsed.extended_csv = true,
            "-h" | "--help" => parsed.help = true,
            "--output" => match args.next() {
                Some(dir) => parsed.output = Some(PathBuf::from(dir)),
                None => return Err("--output needs a directory".to_string()),
            },
            other => {
                if let Some(dir) = other.strip_prefix("--output=") {
                    parsed.output = Some(PathBuf::from(dir));
                } else if other.starts_with('-') {
                    return Err(format!("unknown option: {}", other));
                } else {
                    parsed.slugs.push(other.to_string());
                }
            }
        }
    }
    Ok(parsed)
}

/// Profiles named on the command line, in the order given.
fn select_profiles<'c>(catalog: &'c Catalog, args: &CliArgs) -> Result<Vec<&'c CategoryProfile>, String> {
    if args.all {
        return Ok(catalog.profiles().iter().collect());
    }
    let mut selected: Vec<&CategoryProfile> = Vec::new();
    for slug in &args.slugs {
        let profile = catalog.get(slug).ok_or_else(|| {
            format!(
                "unknown category '{}' (known: {})",
                slug,
                catalog.slugs().join(", ")
            )
        })?;
        if !selected.iter().any(|p| p.slug == profile.slug) {
            selected.push(profile);
        }
    }
    Ok(selected)
}

struct RunPlan<'c> {
    profiles: Vec<&'c CategoryProfile>,
    home_url: String,
    prompt_for_location: bool,
    timings: Timings,
    output_dir: PathBuf,
    csv_layout: CsvLayout,
}

async fn wait_for_location() -> Result<()> {
    info!("📍 Set the delivery location in the browser window, then press Enter here to continue...");
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await
    .context("location prompt task failed")?
    .context("could not read from stdin")?;
    Ok(())
}

async fn run<R: PageRenderer + ?Sized>(renderer: &R, plan: &RunPlan<'_>) -> Result<()> {
    info!("🏠 Opening {}", plan.home_url);
    renderer
        .navigate(&plan.home_url)
        .await
        .context("could not open the storefront home page")?;
    pace(plan.timings.page_load, plan.timings.jitter).await;

    if plan.prompt_for_location {
        wait_for_location().await?;
    }

    let mut failed = Vec::new();
    for profile in &plan.profiles {
        let outcome = match scrape_category(renderer, profile, &plan.timings).await {
            Ok(run) => {
                summary::log_audit(&run.audit);
                export::save(&plan.output_dir, &profile.output_stem(), &run.records, plan.csv_layout)
                    .map(|_| {
                        let report = summary::breakdown(&run.records, &profile.breakdown);
                        summary::log_breakdown(&run.title, &report);
                    })
                    .map_err(anyhow::Error::from)
            }
            Err(e) => Err(anyhow::Error::from(e)),
        };
        if let Err(e) = outcome {
            error!("❌ {} failed: {:#}", profile.display_title(), e);
            failed.push(profile.slug.as_str());
        }
    }

    if !plan.timings.close_delay.is_zero() {
        info!("⏳ Closing the browser in {:?}", plan.timings.close_delay);
        tokio::time::sleep(plan.timings.close_delay).await;
    }

    if !failed.is_empty() && failed.len() == plan.profiles.len() {
        bail!("every category failed: {}", failed.join(", "));
    }
    if !failed.is_empty() {
        warn!("⚠️ Some categories failed: {}", failed.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,chromiumoxide=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = load_scout_config();
    let catalog = Catalog::from_config(&config);

    if args.list {
        for profile in catalog.profiles() {
            println!("{:<22} {}", profile.slug, profile.display_title());
        }
        return Ok(());
    }

    let profiles = match select_profiles(&catalog, &args) {
        Ok(p) if !p.is_empty() => p,
        Ok(_) => {
            eprintln!("no category given\n\n{}", USAGE);
            std::process::exit(2);
        }
        Err(msg) => {
            error!("{}", msg);
            std::process::exit(2);
        }
    };

    let mut launch = LaunchOptions::from_config(&config);
    if args.headless {
        launch.headless = true;
    }
    let prompt_for_location =
        !args.no_prompt && !launch.headless && config.resolve_prompt_for_location();
    let plan = RunPlan {
        profiles,
        home_url: config.resolve_home_url(),
        prompt_for_location,
        timings: config.resolve_timings(),
        output_dir: args.output.clone().unwrap_or_else(|| config.resolve_output_dir()),
        csv_layout: if args.extended_csv {
            CsvLayout::Extended
        } else {
            config.resolve_csv_layout()
        },
    };

    let session = match BrowserSession::launch(&launch).await {
        Ok(session) => session,
        Err(e) => {
            error!("❌ {}", e);
            for step in e.remediation() {
                error!("   • {}", step);
            }
            std::process::exit(1);
        }
    };

    let outcome = tokio::select! {
        result = run(session.renderer(), &plan) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
    };
    session.close().await;

    if let Err(e) = outcome {
        error!("❌ {:#}", e);
        // a pending stdin read would keep the runtime from shutting down
        std::process::exit(1);
    }
    info!("🎉 Done");
    Ok(())
}
