use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use log::{debug, info};
use psdesc_core::{
    DecodeOptions, DescriptorError, InspectError, InspectOptions, Inspection, ListLayout,
    inspect_file, render_descriptor,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("PSDESC_BUILD_COMMIT"),
    ", ",
    env!("PSDESC_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "psdesc")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode and inspect Photoshop-style descriptor structures.",
    long_about = None,
    after_help = "Examples:\n  psdesc descriptor render effects.bin --stdout\n  psdesc descriptor render lfx2.bin --versioned -o effects.txt\n  psdesc descriptor dump layer.bin --offset 12 --format json --pretty --stdout"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw descriptor streams.
    Descriptor {
        #[command(subcommand)]
        command: DescriptorCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DescriptorCommands {
    /// Decode a descriptor and render it as indented text or a JSON report.
    #[command(alias = "dump")]
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Path to a file holding a descriptor stream
    input: PathBuf,

    /// Output path
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write output to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Byte offset of the descriptor within the input
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// Expect a 32-bit version word (16) before the descriptor
    #[arg(long)]
    versioned: bool,

    /// Maximum nesting depth of descriptors, lists and references
    #[arg(long, default_value_t = DecodeOptions::default().max_depth)]
    max_depth: usize,

    /// Maximum number of bytes the decoder may consume
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Decode list elements without keys (tag and value only)
    #[arg(long)]
    unkeyed_lists: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Descriptor { command } => match command {
            DescriptorCommands::Render(args) => cmd_descriptor_render(args),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<InspectError> for CliError {
    fn from(err: InspectError) -> Self {
        let hint = match &err {
            InspectError::Io(_) => None,
            InspectError::OffsetOutOfRange { .. } => {
                Some("choose an --offset inside the input".to_string())
            }
            InspectError::Descriptor(inner) => descriptor_hint(inner),
        };
        CliError::new(format!("descriptor decoding failed: {}", err), hint)
    }
}

fn descriptor_hint(err: &DescriptorError) -> Option<String> {
    let hint = match err {
        DescriptorError::StreamTruncated { .. } => {
            "the input ends inside the descriptor; check --offset and --versioned"
        }
        DescriptorError::UnknownTypeTag { .. } => {
            "the stream may not start at a descriptor; check --offset, --versioned and --unkeyed-lists"
        }
        DescriptorError::RecursionLimitExceeded { .. } => "raise --max-depth for deeper trees",
        DescriptorError::ByteLimitExceeded { .. } => "raise --max-bytes or omit it",
        DescriptorError::UnsupportedVersion { .. } => {
            "the version word did not match; retry without --versioned"
        }
    };
    Some(hint.to_string())
}

fn cmd_descriptor_render(args: RenderArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let output = if args.stdout {
        None
    } else {
        Some(args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };
    if let Some(output_path) = output.as_ref() {
        ensure_output_differs(output_path, &input_abs)?;
    }

    let options = InspectOptions {
        offset: args.offset,
        versioned: args.versioned,
        decode: DecodeOptions {
            max_depth: args.max_depth,
            max_bytes: args.max_bytes,
            list_layout: if args.unkeyed_lists {
                ListLayout::Unkeyed
            } else {
                ListLayout::Keyed
            },
        },
    };
    debug!("render options: {:?}", options);

    let inspection = inspect_file(&resolved_input, &options)?;
    info!(
        "decoded '{}': {} items, {} entities, depth {}",
        inspection.summary.class_id,
        inspection.summary.items,
        inspection.summary.entities_total,
        inspection.summary.depth
    );
    let rendered = format_output(&inspection, args.format, args.pretty, args.compact)?;

    let Some(output) = output else {
        print!("{}", rendered);
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, rendered)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    if !args.quiet {
        eprintln!("OK: output written -> {}", output.display());
    }
    Ok(())
}

fn ensure_output_differs(output_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let output_dir = output_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", output_path.display()))?;
    if let Some(output_dir) = output_dir {
        let output_target = output_dir.join(
            output_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid output path"))?,
        );
        if output_target == input_abs {
            return Err(CliError::new(
                format!(
                    "output path must differ from input: {}",
                    output_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn format_output(
    inspection: &Inspection,
    format: OutputFormat,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => {
            if pretty || compact {
                return Err(CliError::new(
                    "--pretty and --compact apply to JSON output only",
                    Some("add --format json".to_string()),
                ));
            }
            Ok(render_descriptor(&inspection.descriptor, 0))
        }
        OutputFormat::Json if pretty => serde_json::to_string_pretty(inspection)
            .context("JSON serialization failed")
            .map_err(Into::into),
        OutputFormat::Json => serde_json::to_string(inspection)
            .context("JSON serialization failed")
            .map_err(Into::into),
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file holding a raw descriptor stream".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file holding a raw descriptor stream".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single descriptor file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
