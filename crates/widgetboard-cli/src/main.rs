//! Widgetboard CLI - render, check and edit dashboard manifests.

mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use widgetboard::{visible_snapshot, Category, Dashboard, Manifest, ManifestError, WidgetType};

#[derive(Parser)]
#[command(name = "widgetboard")]
#[command(about = "Categorized security dashboard CLI")]
#[command(version)]
struct Cli {
    /// Manifest file (.yaml, .yml or .toml); the built-in dashboard when omitted
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard
    Show {
        /// Only show widgets matching this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the manifest
    Check,

    /// Print the built-in manifest
    DefaultManifest {
        /// Manifest format
        #[arg(short, long, value_enum, default_value_t = ManifestFormat::Yaml)]
        format: ManifestFormat,
    },

    /// Add widgets to a section, then render
    Add {
        /// Target section id
        #[arg(short, long)]
        section: String,

        /// Custom widget type id (cloud-accounts, risk-assessment, ...)
        #[arg(short = 't', long = "type")]
        widget_type: Option<String>,

        /// Builder input as key=value, repeatable
        #[arg(short, long = "input", value_parser = parse_key_value)]
        inputs: Vec<(String, String)>,

        /// Panel tab (CSPM, CWPP, Image, Ticket); defaults to the section's own
        #[arg(long)]
        tab: Option<Category>,

        /// Index of a predefined widget on the active tab, repeatable
        #[arg(short, long)]
        predefined: Vec<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Remove a widget, then render
    Remove {
        /// Section id
        #[arg(short, long)]
        section: String,

        /// Widget id
        #[arg(short, long)]
        widget: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ManifestFormat {
    Yaml,
    Toml,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("unknown widget type '{0}'")]
    UnknownWidgetType(String),

    #[error("widget type '{ty}' is not offered on the {tab} tab")]
    TypeNotOffered { ty: WidgetType, tab: Category },

    #[error("widget type '{ty}' has no input '{key}'")]
    UnknownInput { ty: WidgetType, key: String },

    #[error("no predefined widget {index} on the {tab} tab")]
    UnknownPredefined { index: usize, tab: Category },

    #[error("nothing to add: pass --type or --predefined")]
    NothingToAdd,

    #[error("no widget '{widget}' in section '{section}'")]
    UnknownWidget { section: String, widget: String },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Show { search, format } => {
            let mut dashboard = Dashboard::from_manifest(&load_manifest(cli.manifest.as_deref())?);
            if let Some(query) = search {
                dashboard.set_search_query(query);
            }
            print!("{}", render(&dashboard, format)?);
        }
        Commands::Check => check(cli.manifest.as_deref())?,
        Commands::DefaultManifest { format } => {
            let manifest = Manifest::default();
            let text = match format {
                ManifestFormat::Yaml => manifest.to_yaml()?,
                ManifestFormat::Toml => manifest.to_toml()?,
            };
            print!("{text}");
        }
        Commands::Add {
            section,
            widget_type,
            inputs,
            tab,
            predefined,
            format,
        } => {
            let mut dashboard = Dashboard::from_manifest(&load_manifest(cli.manifest.as_deref())?);
            let ids = add(
                &mut dashboard,
                &section,
                tab,
                widget_type.as_deref(),
                &inputs,
                &predefined,
            )?;
            for id in &ids {
                eprintln!("added {id}");
            }
            print!("{}", render(&dashboard, format)?);
        }
        Commands::Remove {
            section,
            widget,
            format,
        } => {
            let mut dashboard = Dashboard::from_manifest(&load_manifest(cli.manifest.as_deref())?);
            if !dashboard.remove_widget(&section, &widget) {
                return Err(CliError::UnknownWidget { section, widget });
            }
            print!("{}", render(&dashboard, format)?);
        }
    }
    Ok(())
}

fn load_manifest(path: Option<&Path>) -> Result<Manifest, CliError> {
    path.map_or_else(|| Ok(Manifest::default()), |p| Ok(Manifest::load(p)?))
}

fn check(path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => println!("Checking manifest: {}", p.display()),
        None => println!("Checking built-in manifest"),
    }
    let manifest = load_manifest(path)?;
    for issue in manifest.validate() {
        eprintln!("  {issue}");
    }
    let manifest = manifest.into_validated()?;

    let data = manifest.dashboard_data();
    println!("Manifest valid!");
    println!("  Title: {}", manifest.title);
    println!("  Sections: {}", data.sections.len());
    println!("  Widgets: {}", data.total_widgets());
    println!("  Predefined: {}", manifest.predefined.len());
    Ok(())
}

fn add(
    dashboard: &mut Dashboard,
    section: &str,
    tab: Option<Category>,
    widget_type: Option<&str>,
    inputs: &[(String, String)],
    predefined: &[usize],
) -> Result<Vec<String>, CliError> {
    if dashboard.snapshot().section(section).is_none() {
        return Err(CliError::UnknownSection(section.to_string()));
    }
    if widget_type.is_none() && predefined.is_empty() {
        return Err(CliError::NothingToAdd);
    }

    dashboard.open_add_widget(section);
    let panel = dashboard.panel_mut();
    if let Some(tab) = tab {
        panel.select_tab(tab);
    }
    let tab = panel.tab();

    for &index in predefined {
        if panel.is_toggled(tab, index) {
            continue;
        }
        if !panel.toggle_predefined(tab, index) {
            return Err(CliError::UnknownPredefined { index, tab });
        }
    }

    if let Some(id) = widget_type {
        let ty = WidgetType::from_id(id).ok_or_else(|| CliError::UnknownWidgetType(id.to_string()))?;
        let builder = panel.builder_mut();
        if !builder.select_type(ty) {
            return Err(CliError::TypeNotOffered { ty, tab });
        }
        for (key, value) in inputs {
            if !builder.set_input(key, value.as_str()) {
                return Err(CliError::UnknownInput {
                    ty,
                    key: key.clone(),
                });
            }
        }
    }

    Ok(dashboard.confirm_add_widget())
}

fn render(dashboard: &Dashboard, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(dashboard.render_text()),
        OutputFormat::Json => {
            let sections = visible_snapshot(&dashboard.visible_sections());
            let mut json = serde_json::to_string_pretty(&sections)?;
            json.push('\n');
            Ok(json)
        }
    }
}
