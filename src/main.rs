//! CLI entry point for modal-keys
//!
//! Inspects and edits the settings blob, and simulates key dispatch
//! against an in-memory document.

use clap::{Args, Parser, Subcommand};
use colored::*;
use modal_keys::config::{default_settings_path, SettingsManager};
use modal_keys::context::{target_selectors, ClassDocument};
use modal_keys::core::dispatch::{DispatchOutcome, RecordingHost};
use modal_keys::core::matcher::format_key_event;
use modal_keys::core::parser::parse_key_binding;
use modal_keys::core::{validate_shortcut, Action, ConflictDetector, KeyEvent, Modifiers};
use modal_keys::plugin::ModalKeys;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "modal-keys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file (default: <config dir>/modal-keys/data.json)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EventArgs {
    /// Physical key code, e.g. KeyN, ArrowDown, Escape
    code: String,

    #[arg(long)]
    ctrl: bool,
    #[arg(long)]
    alt: bool,
    #[arg(long)]
    shift: bool,
    #[arg(long)]
    meta: bool,
}

impl EventArgs {
    fn to_event(&self) -> KeyEvent {
        KeyEvent::new(
            &self.code,
            Modifiers {
                ctrl: self.ctrl,
                alt: self.alt,
                shift: self.shift,
                meta: self.meta,
            },
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show configured shortcuts and target selectors
    Show,

    /// Parse a shortcut string
    Parse {
        /// Shortcut, e.g. "Ctrl+KeyN"
        shortcut: String,
    },

    /// Format a keypress as a canonical shortcut string
    Format(EventArgs),

    /// Simulate a keydown against a document containing the given classes
    Simulate {
        #[command(flatten)]
        event: EventArgs,

        /// Class present in the document (repeatable)
        #[arg(short, long = "present")]
        present: Vec<String>,
    },

    /// Lint shortcuts and report conflicts between actions
    Check,

    /// Upgrade an old settings file in place (a backup is kept)
    Migrate,

    /// Set one shortcut slot
    Set {
        action: Action,
        index: usize,
        shortcut: String,
    },

    /// Record a keypress into a shortcut slot
    Record {
        action: Action,
        index: usize,
        #[command(flatten)]
        event: EventArgs,
    },

    /// Clear one shortcut slot
    Clear { action: Action, index: usize },

    /// Add an empty shortcut slot
    Add { action: Action },

    /// Remove one shortcut slot
    Remove { action: Action, index: usize },

    /// Replace the target selectors (one per line)
    Targets { text: String },

    /// Restore default settings
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    modal_keys::logging::init(cli.verbose);

    match cli.command {
        Commands::Parse { shortcut } => parse_shortcut(&shortcut),
        Commands::Format(event) => println!("{}", format_key_event(&event.to_event())),
        Commands::Migrate => {
            let path = resolve_settings_path(cli.settings)?;
            migrate(&SettingsManager::new(path)?)?;
        }
        command => {
            let path = resolve_settings_path(cli.settings)?;
            let mut plugin = ModalKeys::load(SettingsManager::new(path)?)?;
            run_settings_command(&mut plugin, command)?;
        }
    }

    Ok(())
}

/// Expand `~` in an explicit path, or fall back to the platform default
fn resolve_settings_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let Some(path) = explicit else {
        return Ok(default_settings_path()?);
    };

    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(Path::new(expanded.as_ref()).to_path_buf())
}

fn run_settings_command(plugin: &mut ModalKeys, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Show => show_settings(plugin),
        Commands::Simulate { event, present } => simulate(plugin, &event.to_event(), &present),
        Commands::Check => check_settings(plugin),
        Commands::Set { action, index, shortcut } => {
            ensure_slot(plugin.update(|s| s.set_shortcut(action, index, &shortcut))?, action, index)?;
            show_action(plugin, action);
        }
        Commands::Record { action, index, event } => {
            let recorded = plugin.update(|s| s.record_shortcut(action, index, &event.to_event()))?;
            match recorded {
                Some(shortcut) => println!("{} Recorded {}", "✓".green(), shortcut.cyan()),
                None => anyhow::bail!(
                    "nothing recorded: slot {} of {} does not exist or the key is a bare modifier",
                    index,
                    action
                ),
            }
        }
        Commands::Clear { action, index } => {
            ensure_slot(plugin.update(|s| s.clear_shortcut(action, index))?, action, index)?;
            show_action(plugin, action);
        }
        Commands::Add { action } => {
            if !plugin.update(|s| s.add_slot(action))? {
                println!("{} {} already has an empty slot", "⚠".yellow(), action);
            }
            show_action(plugin, action);
        }
        Commands::Remove { action, index } => {
            let removed = plugin.update(|s| s.remove_shortcut(action, index))?;
            ensure_slot(removed.is_some(), action, index)?;
            show_action(plugin, action);
        }
        Commands::Targets { text } => {
            // Allow "\n" typed literally on the command line
            let text = text.replace("\\n", "\n");
            plugin.update(|s| s.set_target_classes(&text))?;
            show_settings(plugin);
        }
        Commands::Reset => {
            plugin.reset()?;
            println!("{} Settings restored to defaults", "✓".green());
        }
        Commands::Parse { .. } | Commands::Format(_) | Commands::Migrate => {}
    }

    Ok(())
}

/// Load once through the migrator and say what it did to the file
fn migrate(manager: &SettingsManager) -> anyhow::Result<()> {
    let report = manager.load_report()?;
    let path = manager.settings_path().display();

    if report.migrated {
        println!("{} Migrated settings at {} to the current format", "✓".green(), path);
    } else if report.rewritten && report.backup.is_some() {
        println!("{} Cleaned shortcut lists in {}", "✓".green(), path);
    } else if report.rewritten {
        println!("{} Wrote default settings to {}", "✓".green(), path);
    } else {
        println!("{} Settings at {} are already in the current format", "✓".green(), path);
    }

    if let Some(backup) = &report.backup {
        println!("  Backup: {}", backup.display().to_string().dimmed());
    }

    Ok(())
}

fn ensure_slot(found: bool, action: Action, index: usize) -> anyhow::Result<()> {
    if !found {
        anyhow::bail!("{} has no slot {}", action, index);
    }
    Ok(())
}

fn parse_shortcut(shortcut: &str) {
    match parse_key_binding(shortcut) {
        Some(binding) => {
            let mods = binding.modifiers.names();
            println!("{} {}", "✓".green(), binding.to_string().cyan().bold());
            println!(
                "  modifiers: {}",
                if mods.is_empty() { "none".dimmed().to_string() } else { mods.join(", ") }
            );
            println!("  key code:  {}", binding.key);
        }
        None => println!("{} {}", "✗".red(), "no binding (empty or no key)".bold()),
    }

    if let Err(e) = validate_shortcut(shortcut) {
        if !e.is_informational() {
            println!("{} {}", "⚠".yellow(), e);
        }
    }
}

fn show_action(plugin: &ModalKeys, action: Action) {
    let shortcuts = plugin.settings().shortcuts(action);
    println!(
        "{} {}",
        format!("{:<9}", action.to_string()).bold(),
        format!("→ {}", action.semantic_key()).dimmed()
    );
    for (idx, shortcut) in shortcuts.iter().enumerate() {
        let shown = if shortcut.trim().is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            shortcut.cyan().to_string()
        };
        println!("  {} {}", format!("{}.", idx).dimmed(), shown);
    }
}

fn show_settings(plugin: &ModalKeys) {
    println!(
        "{}",
        format!("Settings from: {}\n", plugin.manager().settings_path().display()).bold()
    );

    for action in Action::ALL {
        show_action(plugin, action);
    }

    println!("\n{}", "Target selectors".bold());
    for selector in target_selectors(plugin.settings()) {
        println!("  {}", selector.magenta());
    }
}

fn simulate(plugin: &ModalKeys, event: &KeyEvent, present: &[String]) {
    let document = ClassDocument::with_classes(present.iter().cloned());
    let mut host = RecordingHost::default();

    println!("{} Keydown {}", "→".cyan(), format_key_event(event).bold());

    match plugin.on_key_down(&document, &mut host, event) {
        DispatchOutcome::Remapped(action) => {
            for (target, synthetic) in &host.dispatched {
                println!(
                    "{} {} → {} (dispatched to {:?})",
                    "✓".green(),
                    action.to_string().bold(),
                    synthetic.key.cyan(),
                    target
                );
            }
            println!("  original event suppressed");
        }
        DispatchOutcome::Passed => {
            println!("{} passed through untouched", "·".dimmed());
        }
    }
}

/// Lint every shortcut and report cross-action conflicts
fn check_settings(plugin: &ModalKeys) {
    let settings = plugin.settings();
    let mut warnings = 0;

    for action in Action::ALL {
        for (idx, shortcut) in settings.shortcuts(action).iter().enumerate() {
            if let Err(e) = validate_shortcut(shortcut) {
                if !e.is_informational() {
                    warnings += 1;
                    println!("{} {} {}: {}", "⚠".yellow(), action, idx, e);
                }
            }
        }
    }

    if target_selectors(settings).is_empty() {
        warnings += 1;
        println!("{} no target selectors: remapping is never active", "⚠".yellow());
    }

    let conflicts = ConflictDetector::from_settings(settings).find_conflicts();

    if conflicts.is_empty() && warnings == 0 {
        println!("{} {}", "✓".green().bold(), "No problems detected!".bold());
        return;
    }

    for (i, conflict) in conflicts.iter().enumerate() {
        let shadowed = conflict
            .shadowed
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} fires {}, never {}",
            format!("Conflict {}", i + 1).yellow().bold(),
            conflict.binding.to_string().cyan(),
            conflict.winner.to_string().green(),
            shadowed.red()
        );
    }

    if !conflicts.is_empty() {
        println!("\n{}", "⚠ Shadowed shortcuts will never fire!".yellow());
        std::process::exit(1);
    }
}
