use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use directus_typegen_core::{NameTransform, build_schema, render_schema};
use directus_typegen_source::{SnapshotSource, TypegenConfig};
use tracing::info;

/// CLI-specific naming enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliNaming {
    Database,
    Camelcase,
    Pascalcase,
}

impl From<CliNaming> for NameTransform {
    fn from(naming: CliNaming) -> Self {
        match naming {
            CliNaming::Database => Self::Database,
            CliNaming::Camelcase => Self::CamelCase,
            CliNaming::Pascalcase => Self::PascalCase,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "directus-typegen")]
#[command(about = "Generate TypeScript declarations from a Directus schema snapshot")]
struct Cli {
    /// Log debug details (dropped fields and collections) to stderr.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors.
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a .d.ts declaration file from a snapshot.
    Generate(GenerateArgs),
    /// Print the normalized schema as JSON.
    Inspect(InspectArgs),
    /// Write a configuration file with default values.
    InitConfig(InitConfigArgs),
}

/// Options shared by commands that build a schema.
#[derive(Debug, Args)]
struct SchemaArgs {
    /// Snapshot bundle file or snapshot directory.
    #[arg(long)]
    input: PathBuf,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Collection naming strategy (overrides the config file).
    #[arg(long)]
    naming: Option<CliNaming>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output file (defaults to the config `output`, then stdout).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Name of the user collections root interface.
    #[arg(long)]
    root_name: Option<String>,
    /// Module augmented by the first declaration block.
    #[arg(long)]
    module_name: Option<String>,
    /// Number of indentation characters per level.
    #[arg(long)]
    indent_amount: Option<usize>,
    /// Indentation character.
    #[arg(long)]
    indent_char: Option<char>,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[command(flatten)]
    schema: SchemaArgs,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Path of the configuration file to create.
    #[arg(long, default_value = "directus-typegen.yml")]
    output: PathBuf,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Inspect(args) => run_inspect(args),
        Command::InitConfig(args) => run_init_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), String> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DIRECTUS_TYPEGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| format!("failed to initialize tracing subscriber: {err}"))
}

fn load_config(args: &SchemaArgs) -> Result<TypegenConfig, String> {
    let mut config = match &args.config {
        Some(path) => TypegenConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => TypegenConfig::default(),
    };
    if let Some(naming) = args.naming {
        config.naming = naming.into();
    }
    Ok(config)
}

fn load_snapshot(path: &Path) -> Result<directus_typegen_core::DataModel, String> {
    SnapshotSource::detect(path)
        .load()
        .map_err(|err| format!("Failed to load snapshot '{}': {err}", path.display()))
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let mut config = load_config(&args.schema)?;
    if let Some(root_name) = args.root_name {
        config.root_name = root_name;
    }
    if let Some(module_name) = args.module_name {
        config.module_name = module_name;
    }
    if let Some(amount) = args.indent_amount {
        config.indent.amount = amount;
    }
    if let Some(character) = args.indent_char {
        config.indent.character = character;
    }

    let model = load_snapshot(&args.schema.input)?;
    let schema = build_schema(&model, &config.builder_options());
    let output = render_schema(&schema, &config.render_options());

    match args.output.or(config.output) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            fs::write(&path, output)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            info!(path = %path.display(), collections = schema.len(), "Wrote declarations");
            eprintln!(
                "Generated types for {} collection(s) into '{}'.",
                schema.len(),
                path.display()
            );
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let config = load_config(&args.schema)?;
    let model = load_snapshot(&args.schema.input)?;
    let schema = build_schema(&model, &config.builder_options());

    let raw = serde_json::to_string_pretty(&schema)
        .map_err(|err| format!("Failed to serialize schema: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        ));
    }

    TypegenConfig::default()
        .save(&args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;
    println!("Wrote default configuration to '{}'.", args.output.display());
    Ok(())
}
