//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};
use planr_core::types::AutoMode;
use std::path::PathBuf;

/// planr - plan-based coding sessions
#[derive(Parser, Debug)]
#[command(name = "planr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Mark this as an interactive session (also PLANR_REPL=1)
    #[arg(long, global = true)]
    pub repl: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the global context attached to every new plan
    #[command(name = "global-context", visible_alias = "gc")]
    GlobalContext(GlobalContextCommand),

    /// Start a new plan and make it the current plan
    #[command(visible_alias = "n")]
    New(NewArgs),

    /// Load files, directories or a note into the current plan
    Load(LoadArgs),

    /// Default plan configuration
    Config(ConfigCommand),

    /// Show the current plan and branch
    Current,
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Context Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct GlobalContextCommand {
    #[command(subcommand)]
    pub action: Option<GlobalContextAction>,
}

#[derive(Subcommand, Debug)]
pub enum GlobalContextAction {
    /// Set the global context from FILE, or from stdin
    Set {
        /// File to read (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Print the global context
    Show,

    /// Remove the global context
    Clear,
}

// ─────────────────────────────────────────────────────────────────────────────
// Plan Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name for the plan (defaults to "draft")
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to auto-load context from (defaults to the current directory)
    #[arg(long)]
    pub context_dir: Option<PathBuf>,

    /// Don't attach the global context to this plan
    #[arg(long, conflicts_with = "global_context_file")]
    pub no_global_context: bool,

    /// Attach this file as the plan's global context instead of the stored one
    #[arg(long)]
    pub global_context_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Files or directories to load
    pub paths: Vec<PathBuf>,

    /// Attach a note
    #[arg(long)]
    pub note: Option<String>,

    /// Load definitions only instead of full file contents
    #[arg(long)]
    pub defs_only: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the default plan config
    Show,

    /// Update the default plan config
    Set {
        /// none, basic, plus, semi or full
        #[arg(long)]
        auto_mode: Option<AutoMode>,

        /// Load the working directory into new plans automatically
        #[arg(long)]
        auto_load_context: Option<bool>,

        /// Model pack for new plans
        #[arg(long)]
        model_pack: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_context_alias() {
        let cli = Cli::try_parse_from(["planr", "gc", "set", "notes.md"]).unwrap();
        match cli.command {
            Commands::GlobalContext(GlobalContextCommand {
                action: Some(GlobalContextAction::Set { file }),
            }) => assert_eq!(file, Some(PathBuf::from("notes.md"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bare_global_context_parses() {
        let cli = Cli::try_parse_from(["planr", "global-context"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::GlobalContext(GlobalContextCommand { action: None })
        ));
    }

    #[test]
    fn test_new_alias_and_name() {
        let cli = Cli::try_parse_from(["planr", "n", "-n", "foo", "--repl"]).unwrap();
        assert!(cli.repl);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.name.as_deref(), Some("foo"));
                assert!(!args.no_global_context);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_context_flags_conflict() {
        let result = Cli::try_parse_from([
            "planr",
            "new",
            "--no-global-context",
            "--global-context-file",
            "notes.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_set_parses_auto_mode() {
        let cli = Cli::try_parse_from([
            "planr",
            "config",
            "set",
            "--auto-mode",
            "full-auto",
            "--auto-load-context",
            "false",
        ])
        .unwrap();
        match cli.command {
            Commands::Config(ConfigCommand {
                action:
                    ConfigAction::Set {
                        auto_mode,
                        auto_load_context,
                        model_pack,
                    },
            }) => {
                assert_eq!(auto_mode, Some(AutoMode::Full));
                assert_eq!(auto_load_context, Some(false));
                assert!(model_pack.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
