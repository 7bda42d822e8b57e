//! Default plan configuration commands.

use anyhow::Result;
use colored::Colorize;
use planr_core::types::{AutoMode, PlanConfig};
use planr_core::RemoteService;

use crate::cli::{ConfigAction, ConfigCommand};
use crate::config::Config;

pub async fn execute(cmd: ConfigCommand, config: &Config) -> Result<()> {
    match cmd.action {
        ConfigAction::Show => show(config).await,
        ConfigAction::Set {
            auto_mode,
            auto_load_context,
            model_pack,
        } => set(auto_mode, auto_load_context, model_pack, config).await,
    }
}

async fn show(config: &Config) -> Result<()> {
    let client = super::client(config)?;
    let plan_config = client
        .get_default_plan_config()
        .await
        .map_err(|e| e.during("getting plan config"))?;

    print_config(&plan_config);
    Ok(())
}

/// Overlay the given settings onto `base`. Returns `None` when nothing changes.
fn apply_changes(
    base: &PlanConfig,
    auto_mode: Option<AutoMode>,
    auto_load_context: Option<bool>,
    model_pack: Option<String>,
) -> Option<PlanConfig> {
    if auto_mode.is_none() && auto_load_context.is_none() && model_pack.is_none() {
        return None;
    }

    let mut updated = base.clone();
    if let Some(mode) = auto_mode {
        updated.auto_mode = mode;
    }
    if let Some(auto_load) = auto_load_context {
        updated.auto_load_context = auto_load;
    }
    if let Some(pack) = model_pack {
        updated.model_pack_name = pack;
    }
    Some(updated)
}

async fn set(
    auto_mode: Option<AutoMode>,
    auto_load_context: Option<bool>,
    model_pack: Option<String>,
    config: &Config,
) -> Result<()> {
    let client = super::client(config)?;
    let current = client
        .get_default_plan_config()
        .await
        .map_err(|e| e.during("getting plan config"))?;

    let Some(updated) = apply_changes(&current, auto_mode, auto_load_context, model_pack) else {
        anyhow::bail!("Nothing to update. Pass --auto-mode, --auto-load-context or --model-pack");
    };

    let saved = client
        .update_default_plan_config(&updated)
        .await
        .map_err(|e| e.during("updating plan config"))?;

    println!("{}", "✓ Default plan config updated".green());
    println!();
    print_config(&saved);
    Ok(())
}

fn print_config(plan_config: &PlanConfig) {
    println!("{}", "Default plan config".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("  Auto mode:          {}", plan_config.auto_mode.label());
    println!(
        "  Auto-load context:  {}",
        if plan_config.auto_load_context {
            "enabled".green()
        } else {
            "disabled".yellow()
        }
    );
    println!("  Model pack:         {}", plan_config.model_pack_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_without_flags() {
        assert_eq!(apply_changes(&PlanConfig::default(), None, None, None), None);
    }

    #[test]
    fn test_apply_changes_keeps_unset_fields() {
        let updated = apply_changes(
            &PlanConfig::default(),
            None,
            Some(false),
            Some("reasoning".to_string()),
        )
        .unwrap();

        assert_eq!(updated.auto_mode, AutoMode::Semi);
        assert!(!updated.auto_load_context);
        assert_eq!(updated.model_pack_name, "reasoning");
    }
}
