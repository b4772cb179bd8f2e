//! Hierarchy configuration checker.
//!
//! Loads a rules file (or the built-in one), reports what it configures and
//! prints the effective rule sets for a country as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use placetree::geometry::Point;
use placetree::hierarchy::{HierarchyConfig, HierarchyConfigResolver};
use placetree::models::{AdminCodeKey, HierarchyLevel, LocationRecord};
use placetree::taxonomy::FeatureClass;

#[derive(Parser, Debug)]
#[command(name = "placetree-config")]
#[command(about = "Validate hierarchy rules and show the effective configuration")]
struct Args {
    /// Rules file; the built-in rules when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Country to resolve rules for (ISO 3166-1 alpha-2)
    #[arg(long)]
    country: Option<String>,

    /// Single level to resolve (district, borough, city, state)
    #[arg(long)]
    level: Option<HierarchyLevel>,

    /// Admin code of the sample record, e.g. a1=16 (repeatable)
    #[arg(long = "admin", value_parser = parse_admin_code)]
    admin_codes: Vec<(AdminCodeKey, String)>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_admin_code(raw: &str) -> Result<(AdminCodeKey, String), String> {
    let (key, code) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=CODE, got '{}'", raw))?;
    Ok((key.parse()?, code.trim().to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading hierarchy rules from {}", path.display());
            HierarchyConfig::load_from_file(path)?
        }
        None => {
            info!("Using built-in hierarchy rules");
            HierarchyConfig::builtin().context("Built-in hierarchy rules are invalid")?
        }
    };

    info!(
        "Search radius {} m, limit {}",
        config.search().radius_meters,
        config.search().limit
    );
    info!("Countries with own rules: {}", config.countries().join(", "));

    let Some(country) = args.country else {
        return Ok(());
    };

    let origin = Point::wgs84(0.0, 0.0)?;
    let mut sample =
        LocationRecord::new(0, "sample", FeatureClass::P, "PPL", origin).with_country(&country);
    for (key, code) in &args.admin_codes {
        sample.admin_codes.set(*key, code);
    }

    info!(
        "Must-match admin code depth for {}: {}",
        country,
        config.district_match_key(Some(&country))
    );

    let resolver = HierarchyConfigResolver::new(Arc::new(config));
    let levels = match args.level {
        Some(level) => vec![level],
        None => HierarchyLevel::all().to_vec(),
    };

    for level in levels {
        let rules = resolver
            .resolve(&sample, level)
            .with_context(|| format!("Failed to resolve {} rules for {}", level, country))?;
        println!("{}", serde_json::to_string_pretty(&rules)?);
    }

    Ok(())
}
