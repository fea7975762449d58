//! Binary shell: wires configuration, acquisition, and the refresh scheduler.
//!
//! The shell runs one acquisition cycle at startup, then re-triggers the
//! pipeline once per calendar day (at local midnight) and whenever the
//! location provider reports new coordinates. Rendering is someone else's
//! job; `--once` mode prints the synthesized gradient for the current window
//! so the engine can be inspected from a terminal.

use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use solarium::args::{CliAction, ParsedArgs};
use solarium::config::Config;
use solarium::constants::{EXIT_FAILURE, LOCATION_POLL_INTERVAL_SECS, REFRESH_RETRY_DELAY_SECS};
use solarium::fetch::HttpSolarDayFetcher;
use solarium::gradient::gradient_stops;
use solarium::location::{ConfigLocationProvider, LocationProvider};
use solarium::logger::Log;
use solarium::pipeline::{
    AcquisitionPipeline, CycleCounter, RefreshOutcome, acquisition_range, time_until_next_refresh,
};
use solarium::store::SolarDayStore;
use solarium::time_window::TimeWindow;

fn main() {
    let parsed = ParsedArgs::parse(std::env::args().skip(1));

    let result = match parsed.action {
        CliAction::ShowHelp => {
            ParsedArgs::show_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            ParsedArgs::show_version();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            ParsedArgs::show_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            config_path,
        } => run(debug_enabled, config_path, false),
        CliAction::RunOnce {
            debug_enabled,
            config_path,
        } => run(debug_enabled, config_path, true),
    };

    if let Err(e) = result {
        Log::log_error(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(debug_enabled: bool, config_path: Option<PathBuf>, once: bool) -> Result<()> {
    Log::log_version();

    let config = match config_path {
        Some(path) => Config::load_from_path(&path)?,
        None => Config::load()?,
    };

    let provider = ConfigLocationProvider::new(config.latitude, config.longitude)?;
    let fetcher = HttpSolarDayFetcher::new(config.api_url(), config.fetch_timeout())?;
    let store_path = match &config.backup_path {
        Some(path) => path.clone(),
        None => SolarDayStore::default_path()?,
    };
    let store = SolarDayStore::new(store_path);
    let pipeline = AcquisitionPipeline::new(fetcher, store, CycleCounter::new());

    if once {
        run_refresh_cycle(&pipeline, &provider, &config);
        print_gradient_summary(&pipeline, &config, debug_enabled);
        Log::log_end();
        return Ok(());
    }

    // Refresh scheduler: once per calendar day, plus on location change.
    let mut last_location = provider.current_location();
    loop {
        if !run_refresh_cycle(&pipeline, &provider, &config) {
            Log::log_indented(&format!(
                "Retrying acquisition in {} seconds",
                REFRESH_RETRY_DELAY_SECS
            ));
            thread::sleep(Duration::from_secs(REFRESH_RETRY_DELAY_SECS));
            continue;
        }

        let cycle_date = Local::now().date_naive();
        loop {
            let remaining = time_until_next_refresh(Local::now());
            let nap = remaining.min(Duration::from_secs(LOCATION_POLL_INTERVAL_SECS));
            thread::sleep(nap);

            if Local::now().date_naive() != cycle_date {
                Log::log_block_start("Day rollover, refreshing solar data");
                break;
            }
            let location = provider.current_location();
            if location != last_location {
                Log::log_block_start("Location changed, refreshing solar data");
                last_location = location;
                break;
            }
        }
    }
}

/// One acquisition cycle. Failures are soft: the display degrades to the
/// flat noon fallback and the scheduler retries on a short delay. Returns
/// false when nothing could be published at all.
fn run_refresh_cycle<F: solarium::SolarDayFetcher>(
    pipeline: &AcquisitionPipeline<F>,
    provider: &impl LocationProvider,
    config: &Config,
) -> bool {
    let Some((latitude, longitude)) = provider.current_location() else {
        Log::log_warning("No location available; skipping solar data refresh");
        return false;
    };

    let today = Local::now().date_naive();
    let (min_day, max_day) = acquisition_range(today, config.max_future_days());

    match pipeline.refresh(latitude, longitude, min_day, max_day) {
        Ok(RefreshOutcome::Live) => true,
        Ok(RefreshOutcome::Backup) => {
            Log::log_warning("Serving solar data from the persisted backup");
            if let Some(days) = pipeline.days_since_last_fetch() {
                if days >= config.stale_warning_days() as i64 {
                    Log::log_indented(&format!(
                        "No successful fetch for {} day(s); display data may be stale",
                        days
                    ));
                }
            }
            true
        }
        Ok(RefreshOutcome::Superseded) => true,
        Err(e) => {
            Log::log_error(&format!(
                "Solar data unavailable ({}); background will fall back to flat noon",
                e
            ));
            false
        }
    }
}

/// Print the gradient the renderer would receive right now.
fn print_gradient_summary<F: solarium::SolarDayFetcher>(
    pipeline: &AcquisitionPipeline<F>,
    config: &Config,
    debug_enabled: bool,
) {
    let window = TimeWindow::at(
        Local::now(),
        config.now_location(),
        config.default_span_secs(),
        config.min_span_secs(),
        config.max_span_secs(),
    );

    let days = pipeline.published();
    let stops = gradient_stops(&days, &window, config.noon_split_fraction());

    Log::log_block_start(&format!(
        "Gradient for span {:.1}h with {} stop(s)",
        window.span() / 3600.0,
        stops.len()
    ));
    if debug_enabled {
        for stop in &stops {
            Log::log_indented(&format!(
                "location {:.4}  hsb({:.3}, {:.3}, {:.3})",
                stop.location, stop.color.hue, stop.color.saturation, stop.color.brightness
            ));
        }
    }
}
