use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use launch_dash::{load_file, view, DashboardConfig, DashboardState, ALL_SITES};

#[derive(Parser)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: chart view-models as JSON")]
#[command(version)]
struct Cli {
    /// Launch records file (.csv, .tsv, .json, .parquet)
    data: PathBuf,

    /// Path to config file (default: ./launch-dash.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Site dropdown options and payload slider
    Controls,
    /// Outcome proportions for a site (or all sites)
    Pie {
        /// Launch site, or ALL
        #[arg(long, default_value = ALL_SITES)]
        site: String,
    },
    /// Payload vs. outcome scatter for a site and payload range
    Scatter(Selection),
    /// Controls plus both charts
    Dashboard(Selection),
}

#[derive(Args)]
struct Selection {
    /// Launch site, or ALL
    #[arg(long, default_value = ALL_SITES)]
    site: String,

    /// Lower payload bound in kg (default: dataset minimum)
    #[arg(long)]
    low: Option<f64>,

    /// Upper payload bound in kg (default: dataset maximum)
    #[arg(long)]
    high: Option<f64>,
}

impl Selection {
    fn apply(&self, state: &mut DashboardState) {
        state.select_site(&self.site);
        if self.low.is_some() || self.high.is_some() {
            let low = self.low.unwrap_or(state.dataset().min_payload());
            let high = self.high.unwrap_or(state.dataset().max_payload());
            state.set_payload_range(low, high);
        }
    }
}

#[derive(Serialize)]
struct Controls {
    site_options: Vec<view::SiteOption>,
    placeholder: String,
    payload_slider: view::RangeSlider,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = DashboardConfig::discover(cli.config.as_deref(), &cwd)?;
    let dataset =
        load_file(&cli.data).with_context(|| format!("loading launch records from {}", cli.data.display()))?;
    let mut state = DashboardState::new(dataset, config);

    let output = match &cli.command {
        Commands::Controls => {
            let options = &state.config().view;
            serde_json::to_value(Controls {
                site_options: view::site_options(state.dataset(), options),
                placeholder: options.dropdown_placeholder.clone(),
                payload_slider: view::payload_slider(state.dataset(), options),
            })?
        }
        Commands::Pie { site } => {
            state.select_site(site);
            serde_json::to_value(state.pie())?
        }
        Commands::Scatter(selection) => {
            selection.apply(&mut state);
            serde_json::to_value(state.scatter())?
        }
        Commands::Dashboard(selection) => {
            selection.apply(&mut state);
            serde_json::to_value(state.snapshot())?
        }
    };

    if let Some(status) = &state.status_message {
        eprintln!("warning: {status}");
    }

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}
