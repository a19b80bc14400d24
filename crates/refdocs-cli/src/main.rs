use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use refdocs_core::config::{self, CONFIG_FILE_NAME, DocsConfig};
use refdocs_core::parse::{self, spec::ApiSpec};
use refdocs_core::resolve::toc::table_of_contents;
use refdocs_core::samples::{collect_samples, providers_from_config};
use refdocs_core::{BuildOptions, Definitions, build_definitions_with_options};

#[derive(Parser)]
#[command(name = "refdocs", about = "Resolved definition model for API reference docs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate API specs and build the definition model
    Validate {
        /// Paths to the API spec files (YAML or JSON)
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the resolved definition model
    Inspect {
        /// Paths to the API spec files (YAML or JSON)
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new refdocs configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input, config } => cmd_validate(input, config),

        Commands::Inspect {
            input,
            config,
            format,
        } => cmd_inspect(input, config, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "refdocs", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config from `path`, or from the current directory when unset.
fn load_config(path: Option<PathBuf>) -> Result<DocsConfig> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    match config::load_config(&path)? {
        Some(cfg) => Ok(cfg),
        None if explicit => anyhow::bail!("config file {} not found", path.display()),
        None => Ok(DocsConfig::default()),
    }
}

fn load_spec(path: &Path) -> Result<ApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed)
}

fn load_model(input: Vec<PathBuf>, cfg: &DocsConfig) -> Result<(Vec<ApiSpec>, Definitions)> {
    let paths = if input.is_empty() {
        cfg.specs.iter().map(PathBuf::from).collect()
    } else {
        input
    };

    let specs = paths
        .iter()
        .map(|p| load_spec(p))
        .collect::<Result<Vec<_>>>()?;
    info!("loaded {} spec documents", specs.len());

    let definitions = build_definitions_with_options(&specs, &BuildOptions::from(cfg))?;
    Ok((specs, definitions))
}

fn cmd_validate(input: Vec<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_config(config)?;
    let (specs, definitions) = load_model(input, &cfg)?;

    for spec in &specs {
        eprintln!(
            "Valid {} spec: {}",
            spec.version().unwrap_or("<missing>"),
            spec.info.title
        );
        eprintln!("  Definitions: {}", spec.definition_count());
    }

    let all: Vec<_> = definitions.all().collect();
    eprintln!("  Resources: {}", all.len());
    eprintln!("  Kinds: {}", definitions.kinds().count());
    eprintln!(
        "  Old versions: {}",
        all.iter().filter(|d| d.is_old_version).count()
    );
    eprintln!("  Inlined: {}", all.iter().filter(|d| d.is_inlined).count());
    eprintln!("  In TOC: {}", all.iter().filter(|d| d.in_toc).count());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: Vec<PathBuf>, config: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let cfg = load_config(config)?;
    let (_, definitions) = load_model(input, &cfg)?;

    let summary = build_inspect_summary(&definitions, &cfg);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(definitions: &Definitions, cfg: &DocsConfig) -> serde_json::Value {
    let providers = providers_from_config(&cfg.samples);

    let entries: Vec<serde_json::Value> = definitions
        .all()
        .map(|d| {
            let fields: Vec<serde_json::Value> = d
                .sorted_fields()
                .into_iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.name,
                        "type": f.md_type(definitions, cfg.link_style),
                        "patch_strategy": f.patch_strategy,
                        "patch_merge_key": f.patch_merge_key,
                    })
                })
                .collect();
            serde_json::json!({
                "key": d.key(),
                "anchor": d.anchor(cfg.link_style),
                "group": d.group_display_name(),
                "resource": d.resource,
                "in_toc": d.in_toc,
                "is_inlined": d.is_inlined,
                "is_old_version": d.is_old_version,
                "inline": d.inline,
                "appears_in": d.appears_in,
                "other_versions": d.other_versions,
                "fields": fields,
                "samples": collect_samples(d, &providers),
            })
        })
        .collect();

    let kinds: serde_json::Map<String, serde_json::Value> = definitions
        .kinds()
        .map(|kind| (kind.to_string(), serde_json::json!(definitions.by_kind(kind))))
        .collect();

    serde_json::json!({
        "toc": table_of_contents(definitions, &cfg.resource_categories),
        "kinds": kinds,
        "definitions": entries,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
