//! CLI entry point for custom-bangs
//!
//! Plays the role of the options page and the popup: lists, edits,
//! imports and exports the bangs in the settings file.
//!
//! Bangs and their URLs are addressed by their 1-based position in natural
//! order, as shown by `list`. Identifiers are minted per session and are
//! not stable across invocations.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use custom_bangs::config::{
    describe_backup, expand_path, ConfigManager, DefaultDataset, SettingsStore, DEFAULT_SETTINGS_PATH,
};
use custom_bangs::core::validator::{validate_bang, ValidationLevel};
use custom_bangs::core::{BangEntry, BangId, UrlId};
use custom_bangs::ui::{Controller, Notice, NoticeStatus, PopupList};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "custom-bangs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Apply the change and show the result without saving it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bangs as the options page shows them
    List {
        /// Only show bangs whose keyword or URLs contain this text
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort by keyword for this listing
        #[arg(long, conflicts_with = "natural")]
        sort_alpha: bool,

        /// Keep natural order for this listing
        #[arg(long)]
        natural: bool,
    },

    /// Show the saved bangs as the popup does
    Popup {
        /// Search text
        search: Option<String>,
    },

    /// Add a placeholder bang at the top of the list
    Add,

    /// Remove a bang
    Remove {
        /// Position shown by `list`
        index: usize,
    },

    /// Edit a bang's keyword or URLs
    Edit {
        /// Position shown by `list`
        index: usize,

        /// New keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Replace a URL: `N=TEMPLATE` where N is the URL's position
        #[arg(long = "url", value_parser = parse_url_assignment)]
        urls: Vec<(usize, String)>,

        /// Append a URL template
        #[arg(long)]
        add_url: Vec<String>,

        /// Remove the URL at this position
        #[arg(long)]
        remove_url: Vec<usize>,
    },

    /// Import bangs from an exported file and append them
    Import {
        /// Exported JSON document
        file: PathBuf,
    },

    /// Export bangs (to custombangs.json when given a directory)
    Export {
        /// Target file or directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Replace all bangs with the defaults
    Reset,

    /// Validate bangs and report duplicate keywords
    Check,

    /// Set the sort option
    Sort {
        #[arg(value_enum)]
        mode: SortMode,
    },

    /// List settings backups
    Backups,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortMode {
    /// Alphabetical by keyword
    On,
    /// Natural order
    Off,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    custom_bangs::logging::init(cli.verbose);

    let settings_path = expand_path(&cli.settings)?;
    let manager = ConfigManager::new(settings_path)
        .with_context(|| format!("Cannot use settings file {}", cli.settings.display()))?;

    match &cli.command {
        Commands::Popup { search } => return show_popup(&manager, search.as_deref()),
        Commands::Backups => return list_backups(&manager),
        _ => {}
    }

    let mut controller = Controller::new(manager, DefaultDataset::load()?)?;

    match cli.command {
        Commands::List {
            search,
            sort_alpha,
            natural,
        } => {
            if sort_alpha || natural {
                controller.set_sort_by_alpha(sort_alpha);
            }
            controller.set_search(search.as_deref().unwrap_or(""));
            list_bangs(&controller);
        }
        Commands::Add => {
            let (_, notice) = controller.add();
            print_notice(&notice);
            commit(&mut controller, cli.dry_run)?;
        }
        Commands::Remove { index } => {
            let id = resolve_bang(&controller, index)?;
            let keyword = keyword_of(&controller, &id);
            controller.remove(&id)?;
            println!("{} Removed !{}", "✓".green(), keyword);
            commit(&mut controller, cli.dry_run)?;
        }
        Commands::Edit {
            index,
            keyword,
            urls,
            add_url,
            remove_url,
        } => {
            let id = resolve_bang(&controller, index)?;
            edit_bang(&mut controller, &id, keyword, urls, add_url, remove_url)?;
            commit(&mut controller, cli.dry_run)?;
        }
        Commands::Import { file } => {
            let notice = controller.import_file(&expand_path(&file)?);
            print_notice(&notice);
            if notice.is_error() {
                std::process::exit(1);
            }
            commit(&mut controller, cli.dry_run)?;
        }
        Commands::Export { path } => {
            let written = controller.export_to(&expand_path(&path)?)?;
            println!(
                "{} Exported {} bangs to {}",
                "✓".green(),
                controller.bang_count(),
                written.display()
            );
        }
        Commands::Reset => {
            controller.reset_to_default();
            println!("{} Reset to {} default bangs", "✓".green(), controller.bang_count());
            commit(&mut controller, cli.dry_run)?;
        }
        Commands::Check => check_bangs(&controller),
        Commands::Sort { mode } => {
            controller.set_sort_by_alpha(matches!(mode, SortMode::On));
            commit(&mut controller, cli.dry_run)?;
        }
        // Read-only views, handled before the session is loaded
        Commands::Popup { .. } | Commands::Backups => {}
    }

    Ok(())
}

/// Parses `N=TEMPLATE` for `edit --url`
fn parse_url_assignment(raw: &str) -> Result<(usize, String), String> {
    let (position, template) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected N=TEMPLATE, got `{}`", raw))?;
    let position = position
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid URL position `{}`: {}", position, e))?;
    Ok((position, template.to_string()))
}

/// Saves the session unless this is a dry run
fn commit<S: SettingsStore>(controller: &mut Controller<S>, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        println!("{} Dry run, nothing saved", "!".yellow());
        return Ok(());
    }

    if !controller.has_unsaved_changes() {
        println!("{} Nothing changed", "✓".green());
        return Ok(());
    }

    controller.save()?;
    println!("{} Saved {} bangs", "✓".green(), controller.bang_count());
    Ok(())
}

fn print_notice(notice: &Notice) {
    let title = match notice.status {
        NoticeStatus::Info => notice.title.cyan(),
        NoticeStatus::Success => notice.title.green(),
        NoticeStatus::Error => notice.title.red().bold(),
    };

    match &notice.description {
        Some(description) => println!("{}: {}", title, description),
        None => println!("{}", title),
    }
}

fn resolve_bang<S: SettingsStore>(controller: &Controller<S>, index: usize) -> anyhow::Result<BangId> {
    index
        .checked_sub(1)
        .and_then(|i| controller.bangs().ids().get(i).copied())
        .ok_or_else(|| anyhow!("No bang at position {} (there are {})", index, controller.bang_count()))
}

fn resolve_url(entry: &BangEntry, position: usize) -> anyhow::Result<UrlId> {
    position
        .checked_sub(1)
        .and_then(|i| entry.urls.keys().nth(i).copied())
        .ok_or_else(|| anyhow!("!{} has no URL at position {}", entry.keyword, position))
}

fn keyword_of<S: SettingsStore>(controller: &Controller<S>, id: &BangId) -> String {
    controller
        .bangs()
        .get(id)
        .map(|entry| entry.keyword.clone())
        .unwrap_or_default()
}

fn edit_bang<S: SettingsStore>(
    controller: &mut Controller<S>,
    id: &BangId,
    keyword: Option<String>,
    urls: Vec<(usize, String)>,
    add_url: Vec<String>,
    remove_url: Vec<usize>,
) -> anyhow::Result<()> {
    // Positions refer to the URLs as they were before this edit
    let (replacements, removals) = {
        let entry = controller
            .bangs()
            .get(id)
            .ok_or_else(|| anyhow!("Bang {} disappeared", id))?;

        let replacements = urls
            .into_iter()
            .map(|(position, template)| resolve_url(entry, position).map(|url_id| (url_id, template)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let removals = remove_url
            .into_iter()
            .map(|position| resolve_url(entry, position))
            .collect::<anyhow::Result<Vec<_>>>()?;
        (replacements, removals)
    };

    if let Some(keyword) = keyword {
        controller.set_keyword(id, &keyword)?;
    }
    for (url_id, template) in replacements {
        controller.set_url(id, &url_id, &template)?;
    }
    for template in add_url {
        let url_id = controller.add_url(id)?;
        controller.set_url(id, &url_id, &template)?;
    }
    for url_id in removals {
        controller.remove_url(id, &url_id)?;
    }

    let entry = controller
        .bangs()
        .get(id)
        .ok_or_else(|| anyhow!("Bang {} disappeared", id))?;
    validate_bang(entry).map_err(|e| anyhow!("{}: {}", "Edit rejected".red(), e))?;
    println!("{} {}", "✓".green(), entry);
    Ok(())
}

fn list_bangs<S: SettingsStore>(controller: &Controller<S>) {
    let positions: HashMap<BangId, usize> = controller
        .bangs()
        .ids()
        .into_iter()
        .enumerate()
        .map(|(i, id)| (id, i + 1))
        .collect();

    let rows = controller.rows();
    for (id, entry) in &rows {
        let position = positions.get(*id).copied().unwrap_or_default();
        println!(
            "{} {} → {}",
            format!("{:>3}.", position).dimmed(),
            format!("!{}", entry.keyword).cyan().bold(),
            entry.url_list().join(", ")
        );
    }

    println!(
        "\n{} Showing {} of {} bangs{}",
        "✓".green(),
        rows.len(),
        controller.bang_count(),
        if controller.options().sort_by_alpha {
            " (alphabetical)"
        } else {
            ""
        }
    );

    if controller.is_first_run() {
        println!("{}", "Defaults shown; nothing has been saved yet".yellow());
    }
}

fn show_popup(manager: &ConfigManager, search: Option<&str>) -> anyhow::Result<()> {
    let popup = PopupList::load(manager)?;
    if popup.is_empty() {
        println!("{}", "No bangs saved yet".yellow());
        return Ok(());
    }

    for row in popup.rows(search.unwrap_or("")) {
        match row.first_url {
            Some(url) => println!("{} {}", format!("!{}", row.keyword).bold(), url.dimmed()),
            None => println!("{}", format!("!{}", row.keyword).bold()),
        }
    }
    Ok(())
}

fn list_backups(manager: &ConfigManager) -> anyhow::Result<()> {
    let backups = manager.list_backups()?;
    if backups.is_empty() {
        println!("No backups in {}", manager.backup_dir().display());
        return Ok(());
    }

    // Newest first
    for backup in backups.iter().rev() {
        println!("{}  {}", describe_backup(backup).cyan(), backup.display());
    }
    Ok(())
}

fn check_bangs<S: SettingsStore>(controller: &Controller<S>) {
    let report = controller.validate();
    let conflicts = controller.conflicts();

    println!("{} Checked {} bangs\n", "→".cyan(), controller.bang_count());

    for issue in report.at_level(ValidationLevel::Error) {
        println!("{} !{}: {}", "✗".red().bold(), issue.keyword, issue.message);
    }
    for issue in report.at_level(ValidationLevel::Warning) {
        println!("{} !{}: {}", "⚠".yellow(), issue.keyword, issue.message);
    }

    if !conflicts.is_empty() {
        println!(
            "\n{} {} keyword{} used more than once",
            "⚠".yellow(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" }
        );
    }

    if report.is_clean() && conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No problems found".bold());
    }

    if report.has_errors() {
        println!("\n{}", "⚠ Invalid bangs will not work when searching!".yellow());
        std::process::exit(1);
    }
}
