//! CLI entry point for CDN Refresh
//!
//! Reads the tag list and refresh options from environment variables, refreshes every
//! CDN / DCDN group configured for those tags and prints the aggregated report as JSON.
//!
//! # Exit codes
//!
//! - `0`: the run completed, even if some groups or tags failed
//! - `1`: invalid configuration, or the HTTP clients could not be created

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cdn_refresh_core::types::RefreshReport;
use cdn_refresh_core::{CoreError, HttpTagResolver, RefreshConfig, RefreshOrchestrator};
use cdn_refresh_provider::{ProviderKind, create_provider_with_retries};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout carries the JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = run().await;
    match &result {
        Ok(report) => {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("Failed to serialize refresh report: {e}"),
            }
            tracing::info!("Cache refresh completed");
        }
        Err(e) => {
            if e.downcast_ref::<CoreError>().is_some_and(CoreError::is_expected) {
                tracing::warn!("Cache refresh failed: {e:#}");
            } else {
                tracing::error!("Cache refresh failed: {e:#}");
            }
        }
    }
    ExitCode::from(exit_status(&result))
}

/// A completed run exits 0 even when groups or tags failed; setup errors exit 1.
fn exit_status(result: &anyhow::Result<RefreshReport>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn run() -> anyhow::Result<RefreshReport> {
    let config = RefreshConfig::from_env()
        .map_err(CoreError::from)
        .context("Invalid configuration")?;

    tracing::info!(
        "Pending tags: {} (refresh type: {}, api: {})",
        config.tag_names.join(" | "),
        config.object_type,
        config.api_url
    );

    let resolver = HttpTagResolver::new(config.api_url.as_str())
        .map_err(CoreError::from)
        .context("Failed to create tag resolver")?;
    let cdn = create_provider_with_retries(ProviderKind::Cdn, config.max_retries)
        .map_err(CoreError::from)
        .context("Failed to create CDN provider")?;
    let dcdn = create_provider_with_retries(ProviderKind::Dcdn, config.max_retries)
        .map_err(CoreError::from)
        .context("Failed to create DCDN provider")?;

    let orchestrator = RefreshOrchestrator::new(Arc::new(resolver), cdn, dcdn);

    Ok(orchestrator
        .run(&config.tag_names, config.object_type)
        .await)
}

#[cfg(test)]
mod tests {
    use cdn_refresh_core::ConfigError;
    use cdn_refresh_core::types::RefreshResult;
    use cdn_refresh_provider::ProviderKind;

    use super::*;

    #[test]
    fn configuration_error_exits_with_failure() {
        let result: anyhow::Result<RefreshReport> = Err(anyhow::Error::from(CoreError::from(
            ConfigError::MissingTagNames {
                var: "CDN_RESOURCE_TAG_NAME".into(),
            },
        ))
        .context("Invalid configuration"));

        assert_eq!(exit_status(&result), 1);
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CoreError>().is_some());
    }

    #[test]
    fn completed_run_with_failures_exits_with_success() {
        let mut report = RefreshReport::default();
        report.record_failed_tag("site-x", "tag not found");
        report.dcdn_items.push(RefreshResult::failed(
            "g1",
            vec!["a.example.com".to_string()],
            ProviderKind::Dcdn,
            "invalid credentials",
        ));

        assert_eq!(exit_status(&Ok(report)), 0);
    }

    #[test]
    fn empty_run_exits_with_success() {
        assert_eq!(exit_status(&Ok(RefreshReport::default())), 0);
    }
}
