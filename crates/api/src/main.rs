//! Operator entry point: prints the role catalogue or the effective access
//! configuration as JSON.

use edupath_api::AccessConfig;
use edupath_auth::RoleCatalogue;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    edupath_observability::init();

    let config = AccessConfig::from_env();
    tracing::info!(?config, "access configuration loaded");

    let command = std::env::args().nth(1).unwrap_or_else(|| "catalogue".to_string());
    let output = match command.as_str() {
        "catalogue" => serde_json::to_value(RoleCatalogue::build())?,
        "config" => json!({
            "unauthenticated_scope": format!("{:?}", config.unauthenticated_scope),
            "strict_scope_overrides": config.strict_scope_overrides,
            "state_policy": format!("{:?}", config.state_policy),
        }),
        other => anyhow::bail!("unknown command '{other}' (expected 'catalogue' or 'config')"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
