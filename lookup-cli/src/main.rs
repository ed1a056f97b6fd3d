//! Lookup CLI
//!
//! Command-line interface for inspecting JSON object graphs with the lookup
//! descriptor builder.

mod host;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lookup_core::{
    search, BuilderSettings, Descriptor, InspectionContext, SearchOption, SearchRequest,
    SnoopableObject,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "lookup")]
#[command(about = "Runtime object inspection for host object graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the descriptor tree of an object graph
    Inspect {
        /// JSON object graph
        file: PathBuf,

        /// Dot-separated member path to start from (list elements are `[n]`)
        #[arg(short, long)]
        path: Option<String>,

        /// Levels of members to expand
        #[arg(short, long, default_value = "1")]
        depth: usize,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Filter the top-level objects and the selected object's members
    Search {
        /// JSON object graph
        file: PathBuf,

        /// Case-insensitive text to look for
        query: String,

        /// Name or label of the selected object (default: first object)
        #[arg(short, long)]
        select: Option<String>,

        /// Which list drives the search
        #[arg(short, long, value_enum, default_value = "objects")]
        mode: Mode,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Objects,
    Selection,
}

impl From<Mode> for SearchOption {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Objects => SearchOption::Objects,
            Mode::Selection => SearchOption::Selection,
        }
    }
}

#[derive(Args)]
struct SettingsArgs {
    /// Settings file (TOML, camelCase keys)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Show events
    #[arg(long)]
    include_events: bool,

    /// Show void and parameterized members as unsupported
    #[arg(long)]
    include_unsupported: bool,

    /// Show non-public members
    #[arg(long)]
    include_private: bool,

    /// Show static members
    #[arg(long)]
    include_static: bool,

    /// Show fields
    #[arg(long)]
    include_fields: bool,

    /// Run extensions
    #[arg(long)]
    include_extensions: bool,

    /// Measure member evaluation time
    #[arg(long)]
    include_timing: bool,

    /// Enable every flag
    #[arg(long)]
    all: bool,
}

impl SettingsArgs {
    /// File settings first, command-line flags switch on top
    fn resolve(&self) -> Result<BuilderSettings> {
        let mut settings = match &self.settings {
            Some(path) => BuilderSettings::from_file(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => BuilderSettings::default(),
        };
        if self.all {
            return Ok(BuilderSettings::all());
        }
        settings.include_events |= self.include_events;
        settings.include_unsupported |= self.include_unsupported;
        settings.include_private |= self.include_private;
        settings.include_static |= self.include_static;
        settings.include_fields |= self.include_fields;
        settings.include_extensions |= self.include_extensions;
        settings.include_timing |= self.include_timing;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lookup=info".parse()?),
        )
        .init();
    install_panic_hook();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            file,
            path,
            depth,
            settings,
        } => {
            cmd_inspect(&file, path.as_deref(), depth, &settings.resolve()?)?;
        }
        Commands::Search {
            file,
            query,
            select,
            mode,
            json,
            settings,
        } => {
            cmd_search(&file, &query, select.as_deref(), mode, json, &settings.resolve()?)?;
        }
    }

    Ok(())
}

/// Member panics are captured and shown as failure descriptors; route the
/// hook's message to the log instead of interleaving it with the tree
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!("Captured panic: {}", info);
    }));
}

fn open(file: &Path) -> Result<(InspectionContext, Arc<SnoopableObject>)> {
    let root = host::load_graph(file)?;
    let name = file
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "graph".to_string());
    let context = InspectionContext::new(name)
        .with_document(root.clone())
        .with_descriptors(host::descriptor_map());
    let object = context.snoop(root);
    Ok((context, object))
}

/// Print the descriptor tree
fn cmd_inspect(file: &Path, path: Option<&str>, depth: usize, settings: &BuilderSettings) -> Result<()> {
    let (context, root) = open(file)?;
    tracing::debug!("Inspecting {} with {:?}", context.name(), settings);

    let object = match path {
        Some(path) => render::navigate(&context, settings, root, path)?,
        None => root,
    };
    print!("{}", render::render_tree(&context, settings, &object, depth));
    Ok(())
}

#[derive(Serialize)]
struct SearchReport {
    objects: Vec<String>,
    members: Vec<MemberLine>,
}

#[derive(Serialize)]
struct MemberLine {
    name: Option<String>,
    value: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl From<&Descriptor> for MemberLine {
    fn from(descriptor: &Descriptor) -> Self {
        Self {
            name: descriptor.name().map(str::to_string),
            value: descriptor.label().to_string(),
            type_name: descriptor.type_name().to_string(),
        }
    }
}

/// Run the search engine over the graph's top-level objects
fn cmd_search(
    file: &Path,
    query: &str,
    select: Option<&str>,
    mode: Mode,
    json: bool,
    settings: &BuilderSettings,
) -> Result<()> {
    let (context, root) = open(file)?;

    // A top-level list is the object list, anything else is a single object
    let objects: Vec<Arc<SnoopableObject>> = match root.value().items() {
        Some(items) => items.into_iter().map(|item| context.snoop(item)).collect(),
        None => vec![root],
    };
    let selected = select_object(&objects, select)?;
    let members: Vec<Descriptor> = selected
        .as_ref()
        .map(|object| object.members(&context, settings).to_vec())
        .unwrap_or_default();

    let request = SearchRequest {
        query,
        objects: &objects,
        members: &members,
        selected: selected.as_ref(),
    };
    let results = search(&request, mode.into());
    tracing::info!(
        "{} of {} objects, {} of {} members match",
        results.objects.len(),
        objects.len(),
        results.members.len(),
        members.len()
    );

    let report = SearchReport {
        objects: results.objects.iter().map(|o| o.label()).collect(),
        members: results
            .members
            .iter()
            .filter(|d| !d.is_separator())
            .map(MemberLine::from)
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Objects:");
    for label in &report.objects {
        println!("  {}", label);
    }
    println!("\nMembers:");
    for descriptor in results.members.iter().filter(|d| !d.is_separator()) {
        println!("  {}", render::format_descriptor(descriptor));
    }
    Ok(())
}

fn select_object(
    objects: &[Arc<SnoopableObject>],
    select: Option<&str>,
) -> Result<Option<Arc<SnoopableObject>>> {
    let Some(wanted) = select else {
        return Ok(objects.first().cloned());
    };
    objects
        .iter()
        .find(|o| o.name().as_deref() == Some(wanted) || o.label() == wanted)
        .cloned()
        .map(Some)
        .with_context(|| format!("No object named '{}'", wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;

    #[test]
    fn test_quiet_panic_hook_keeps_panics_catchable() {
        let previous = panic::take_hook();
        install_panic_hook();
        let caught = panic::catch_unwind(|| {
            panic!("member exploded");
        });
        panic::set_hook(previous);
        assert!(caught.is_err());
    }

    #[test]
    fn test_settings_flags_layer_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.toml");
        std::fs::write(&path, "includeFields = true\n").unwrap();

        let cli = Cli::try_parse_from([
            "lookup",
            "inspect",
            "graph.json",
            "--settings",
            path.to_str().unwrap(),
            "--include-timing",
        ])
        .unwrap();
        let Commands::Inspect { settings, .. } = cli.command else {
            panic!("expected inspect");
        };
        let settings = settings.resolve().unwrap();
        assert!(settings.include_fields);
        assert!(settings.include_timing);
        assert!(!settings.include_events);
    }
}
