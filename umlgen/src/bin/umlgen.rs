//! Command line front end.
//!
//! Usage:
//!   umlgen model.xml --out build/php [--base App] [--preferences prefs.xml] [--check]

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use umlgen::preferences::EnumStyleName;
use umlgen::{FsSink, Generator, Preferences, parse_model_file, validate_model};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnumStyleArg {
    Native,
    SplEnum,
}

impl From<EnumStyleArg> for EnumStyleName {
    fn from(arg: EnumStyleArg) -> Self {
        match arg {
            EnumStyleArg::Native => Self::Native,
            EnumStyleArg::SplEnum => Self::SplEnum,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "umlgen", version)]
#[command(about = "Generate PHP sources from a UML model")]
struct Args {
    /// Model document
    model: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Element to generate (id or name); defaults to the whole model
    #[arg(short, long)]
    base: Option<String>,

    /// Preferences file
    #[arg(short, long)]
    preferences: Option<PathBuf>,

    /// Indent with tabs
    #[arg(long, conflicts_with = "indent")]
    tabs: bool,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,

    /// Class file name suffix
    #[arg(long)]
    class_suffix: Option<String>,

    /// Interface file name suffix
    #[arg(long)]
    interface_suffix: Option<String>,

    /// Omit doc blocks
    #[arg(long)]
    no_docs: bool,

    /// Emit parameter type hints
    #[arg(long)]
    strict_types: bool,

    /// Emit return type declarations
    #[arg(long)]
    return_types: bool,

    /// Enumeration style
    #[arg(long, value_enum)]
    enum_style: Option<EnumStyleArg>,

    /// Validate the model before generating
    #[arg(long)]
    check: bool,
}

impl Args {
    fn overrides(&self) -> Preferences {
        Preferences {
            use_tab: self.tabs.then_some(true),
            indent_spaces: self.indent,
            class_suffix: self.class_suffix.clone(),
            interface_suffix: self.interface_suffix.clone(),
            docs: self.no_docs.then_some(false),
            strict_types: self.strict_types.then_some(true),
            return_types: self.return_types.then_some(true),
            enum_style: self.enum_style.map(EnumStyleName::from),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umlgen=info,umlgen_codegen=info".into()),
        )
        .init();

    let args = Args::parse();

    let preferences = match &args.preferences {
        Some(path) => Preferences::from_file(path)
            .with_context(|| format!("failed to load preferences {}", path.display()))?,
        None => Preferences::default(),
    };
    let config = preferences.merge(args.overrides()).into_config();

    let model = parse_model_file(&args.model)
        .with_context(|| format!("failed to parse model {}", args.model.display()))?;

    if args.check {
        validate_model(&model).context("model validation failed")?;
        info!("model {} is valid", model.element(model.root()).name);
    }

    let base = match &args.base {
        Some(key) => match model.lookup(key).or_else(|| model.find_by_name(key)) {
            Some(id) => id,
            None => bail!("unknown base element '{key}'"),
        },
        None => model.root(),
    };

    let mut sink = FsSink::new(&args.out);
    Generator::new(&model, &config)
        .generate(base, &mut sink)
        .with_context(|| format!("failed to generate into {}", args.out.display()))?;

    info!("generation finished");
    Ok(())
}
