//! Terminal output: spinners, status lines and command suggestions.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use planr_core::orchestrator::{BootstrapReport, Status};
use std::time::Duration;

/// Start a spinner with `msg`. Call `finish_and_clear` before printing.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One line per bootstrap status.
pub fn status_line(status: &Status) -> String {
    match status {
        Status::Started { name } => format!(
            "✅ Started new plan {} and set it to current plan",
            name.bold()
        ),
        Status::UsingDefaultConfig => "⚙️  Using default config".to_string(),
        Status::GlobalContextLoaded { path } => {
            format!("📋 Loaded global context from {}", path.display())
        }
        Status::GlobalContextDisabled => "🚫 Global context disabled for this plan".to_string(),
        Status::AutoLoadEnabled => "📥 Automatic context loading is enabled".to_string(),
        Status::ContextLoaded(resp) => format!(
            "   {} context entries loaded (~{} tokens)",
            resp.loaded, resp.total_tokens
        ),
    }
}

/// Help text for a suggested command.
pub fn describe_command(cmd: &str) -> &'static str {
    match cmd {
        "load" => "load files, directories or notes into context",
        "tell" => "describe a task to the plan",
        "chat" => "ask questions without making changes",
        "config" => "show or change the plan config",
        "plans" => "list plans in this project",
        "cd" => "switch to a different plan",
        "models" => "show the plan's model settings",
        _ => "",
    }
}

pub fn print_cmds(cmds: &[&str]) {
    let width = cmds.iter().map(|c| c.len()).max().unwrap_or(0);
    for cmd in cmds {
        println!(
            "  {} {:<width$}  {}",
            "planr".dimmed(),
            cmd.cyan().bold(),
            describe_command(cmd),
            width = width
        );
    }
}

/// Config summary and suggestions. Statuses are printed as they happen.
pub fn render_summary(report: &BootstrapReport) {
    println!();
    println!("  {} {}", "Auto mode:".dimmed(), report.auto_mode.label());
    println!("  {} {}", "Model pack:".dimmed(), report.model_pack);
    println!();

    print_cmds(&report.suggested_commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use planr_core::types::LoadContextResponse;
    use std::path::PathBuf;

    #[test]
    fn test_status_lines() {
        colored::control::set_override(false);

        assert_eq!(
            status_line(&Status::Started {
                name: "foo".to_string()
            }),
            "✅ Started new plan foo and set it to current plan"
        );
        assert_eq!(
            status_line(&Status::GlobalContextLoaded {
                path: PathBuf::from("notes.txt")
            }),
            "📋 Loaded global context from notes.txt"
        );
        assert_eq!(
            status_line(&Status::GlobalContextDisabled),
            "🚫 Global context disabled for this plan"
        );
        assert_eq!(
            status_line(&Status::ContextLoaded(LoadContextResponse {
                loaded: 3,
                total_tokens: 120
            })),
            "   3 context entries loaded (~120 tokens)"
        );
    }

    #[test]
    fn test_every_suggestion_is_described() {
        for cmd in ["load", "tell", "chat", "config", "plans", "cd", "models"] {
            assert!(!describe_command(cmd).is_empty(), "{} has no description", cmd);
        }
        assert_eq!(describe_command("unknown"), "");
    }
}
