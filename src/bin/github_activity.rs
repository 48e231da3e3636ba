//! github-activity - show a GitHub user's recent public activity.

use clap::Parser;
use devtrack::cli::ActivityCli;
use devtrack::config::{ActivityOverrides, resolve_activity_settings};
use devtrack::github::{ActivityClient, ActivityError, render_activity};
use devtrack::logging;
use std::process;

fn main() {
    logging::init();
    let cli = ActivityCli::parse();

    match run(cli) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run(cli: ActivityCli) -> Result<String, ActivityError> {
    let overrides = ActivityOverrides {
        api_url: cli.api_url,
        token: cli.token,
        timeout_secs: cli.timeout,
    };
    let settings = resolve_activity_settings(&overrides)
        .map_err(|e| ActivityError::Unexpected(e.to_string()))?;

    let masked_token = settings.masked_token();
    tracing::debug!(
        api_base = %settings.api_base.value,
        api_base_source = %settings.api_base.source,
        token = masked_token.as_deref().unwrap_or("none"),
        timeout_secs = settings.timeout.value.as_secs(),
        "resolved settings"
    );

    let client = ActivityClient::new(
        &settings.api_base.value,
        settings.token().map(str::to_string),
        settings.timeout.value,
    );
    let events = client.fetch_events(&cli.username)?;

    Ok(render_activity(&events))
}
