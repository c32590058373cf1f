//! trackqa CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compare;
mod draw;

#[derive(Parser)]
#[command(name = "trackqa")]
#[command(about = "trackqa - track-QA post-processing and visualization")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the QA plots of one results production
    Draw {
        /// Directory holding AnalysisResults.root
        /// (and AnalysisResults_trees.root for tree mode)
        #[arg(short, long)]
        input: PathBuf,

        /// Operating mode: 'full' or 'tree'
        #[arg(short, long, default_value = "full")]
        mode: String,

        /// Export the rendered canvases instead of discarding them
        #[arg(short, long)]
        save: bool,

        /// Export root directory
        #[arg(long, default_value = "Save")]
        out_dir: PathBuf,

        /// Export format (svg; png/pdf when compiled in)
        #[arg(long, default_value = "svg")]
        format: String,

        /// Theme preset (trackqa, alice, minimal)
        #[arg(long, default_value = "trackqa")]
        theme: String,

        /// YAML style overrides
        #[arg(long)]
        style_config: Option<PathBuf>,
    },

    /// Compare cut-variation productions of one data set
    Compare {
        /// Data-set name below the results directory
        #[arg(short, long)]
        dataset: String,

        /// Results root directory
        #[arg(long, default_value = "Results")]
        results: PathBuf,

        /// Cut-variation keywords to expand
        #[arg(short = 'c', long = "cut-var", num_args = 1.., required = true)]
        cut_var: Vec<String>,

        /// Overlay the 1D projections across variations, with ratios
        #[arg(long)]
        overlay: bool,

        /// Export the rendered canvases instead of discarding them
        #[arg(short, long)]
        save: bool,

        /// Export root directory
        #[arg(long, default_value = "Save")]
        out_dir: PathBuf,

        /// Export format (svg; png/pdf when compiled in)
        #[arg(long, default_value = "svg")]
        format: String,

        /// Theme preset (trackqa, alice, minimal)
        #[arg(long, default_value = "trackqa")]
        theme: String,

        /// YAML style overrides
        #[arg(long)]
        style_config: Option<PathBuf>,
    },

    /// Expand cut-variation keywords into the matching configuration names
    Cuts {
        /// Keywords ('selections' and 'vs' are special)
        #[arg(short, long, num_args = 1.., required = true)]
        keywords: Vec<String>,

        /// Output file for the expanded list (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Draw { input, mode, save, out_dir, format, theme, style_config } => {
            let mode = qa_core::Mode::parse(&mode)
                .ok_or_else(|| anyhow::anyhow!("unknown mode '{mode}' (expected full or tree)"))?;
            let args = draw::DrawArgs {
                input,
                mode,
                save,
                out_dir,
                format: parse_format(&format)?,
                config: resolve_style(&theme, style_config.as_ref())?,
            };
            draw::run(&args)
        }
        Commands::Compare {
            dataset,
            results,
            cut_var,
            overlay,
            save,
            out_dir,
            format,
            theme,
            style_config,
        } => {
            let args = compare::CompareArgs {
                dataset,
                results,
                cut_keywords: cut_var,
                overlay,
                save,
                out_dir,
                format: parse_format(&format)?,
                config: resolve_style(&theme, style_config.as_ref())?,
            };
            compare::run(&args)
        }
        Commands::Cuts { keywords, output } => cmd_cuts(&keywords, output.as_ref()),
        Commands::Version => {
            println!("trackqa {}", qa_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_cuts(keywords: &[String], output: Option<&PathBuf>) -> Result<()> {
    let expanded = qa_core::cuts::expand_keywords(keywords)?;
    tracing::info!(keywords = ?keywords, matches = expanded.len(), "expanded cut variations");
    write_json(output, serde_json::json!(expanded))
}

fn parse_format(format: &str) -> Result<qa_render::output::ExportFormat> {
    qa_render::output::ExportFormat::parse(format).map_err(Into::into)
}

/// Resolve the plot style: an explicit YAML file wins over the theme preset.
fn resolve_style(
    theme: &str,
    style_config: Option<&PathBuf>,
) -> Result<qa_render::config::VizConfig> {
    match style_config {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)?;
            Ok(qa_render::config::resolve_config(Some(&yaml))?)
        }
        None => Ok(qa_render::theme::BuiltinTheme::parse(theme).base_config()),
    }
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
