use std::time::{Duration, Instant};

use avalia_saude::core::cpf;
use avalia_saude::core::dashboard::DashboardSummary;
use avalia_saude::core::debounce::Debouncer;
use avalia_saude::core::search::SearchEngine;
use avalia_saude::core::ConfigProvider;
use avalia_saude::utils::error::ErrorSeverity;
use avalia_saude::utils::monitor::SystemMonitor;
use avalia_saude::utils::{logger, validation::Validate};
use avalia_saude::{
    AccountFlow, CliConfig, HttpUserDirectory, LocalStorage, MunicipalStore, Result, TomlConfig,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting avalia-saude");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => {
                validate_or_exit(&config);
                run(&config, &cli).await
            }
            Err(e) => Err(e),
        },
        None => {
            validate_or_exit(&cli);
            run(&cli, &cli).await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ avalia-saude failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn validate_or_exit(config: &impl Validate) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(3);
    }
}

async fn run<C: ConfigProvider>(config: &C, cli: &CliConfig) -> Result<()> {
    let storage = LocalStorage::new(".".to_string());

    // One-time load; a failure here is the session's terminal error state.
    let store = MunicipalStore::load(&storage, config.data_path()).await?;

    let mut monitor = if cli.monitor {
        SystemMonitor::new()
    } else {
        None
    };
    if let Some(monitor) = monitor.as_mut() {
        monitor.log_snapshot();
    }

    let engine = SearchEngine::new(&store);

    if let Some(label) = &cli.label {
        match engine.match_by_display_label(label) {
            Some(record) => tracing::info!(
                "📍 '{}' resolved to {} ({} - {})",
                label,
                record.name,
                record.code,
                record.state
            ),
            None => tracing::info!("📍 '{}' did not resolve to any municipality", label),
        }
    }

    if let Some(query) = &cli.query {
        report_results(query, &engine.search(query));
    }

    if let Some(cpf_raw) = &cli.check_cpf {
        let flow = AccountFlow::new(HttpUserDirectory::new(config.api_endpoint()));
        match flow.recover(cpf_raw).await {
            Ok(user) => tracing::info!(
                "🪪 CPF {} is registered to {}",
                cpf::format(&user.cpf),
                user.name
            ),
            Err(e) => tracing::warn!("🪪 {}", e.user_friendly_message()),
        }
    }

    let summary = DashboardSummary::compute(&store);
    log_summary(&summary);

    if cli.watch {
        watch_loop(config, &store, monitor.as_mut()).await?;
    }

    tracing::info!("✅ Done");
    Ok(())
}

/// Interactive mode: stdin lines are treated as keystrokes into the search
/// box (debounced, single slot), while the dashboard summary refreshes on
/// its own fixed interval. Each tick fully recomputes from the store.
async fn watch_loop<C: ConfigProvider>(
    config: &C,
    store: &MunicipalStore,
    mut monitor: Option<&mut SystemMonitor>,
) -> Result<()> {
    let engine = SearchEngine::new(store);
    let mut debouncer = Debouncer::new(config.debounce());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(config.refresh_interval());
    refresh.tick().await;
    let mut poll = tokio::time::interval(Duration::from_millis(50));

    tracing::info!(
        "👀 Watching: type to search, refresh every {}s",
        config.refresh_interval().as_secs()
    );

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.submit(line.trim(), Instant::now()),
                None => break,
            },
            _ = refresh.tick() => {
                let summary = DashboardSummary::compute(store);
                log_summary(&summary);
                if let Some(monitor) = monitor.as_deref_mut() {
                    monitor.log_snapshot();
                }
            }
            _ = poll.tick() => {
                if let Some(query) = debouncer.poll(Instant::now()) {
                    report_results(&query, &engine.search(&query));
                }
            }
        }
    }

    Ok(())
}

fn report_results(query: &str, results: &[&avalia_saude::Municipality]) {
    if results.is_empty() {
        tracing::info!("🔎 '{}': no municipalities matched", query);
        return;
    }

    tracing::info!("🔎 '{}': {} municipalities matched", query, results.len());
    for record in results {
        tracing::info!(
            "   {} - {} ({}, {:.1} km²)",
            record.code,
            record.name,
            record.state,
            record.area_km2
        );
    }
}

fn log_summary(summary: &DashboardSummary) {
    tracing::info!(
        "📊 {} municipalities, {} states, {:.0} km² total, {} evaluations ({:.1}% complete)",
        summary.municipality_count,
        summary.state_count,
        summary.total_area_km2,
        summary.total_evaluations,
        summary.completion_rate_percent
    );
}
