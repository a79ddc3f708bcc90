//! skemi corpus - Build, extend, check and list topic corpora
//!
//! `build` turns a labeled dataset into the `{ "topics": [...] }` document
//! that `skemi match` reads, using the configured tokenization so corpus and
//! queries stay compatible. `add` appends one sample to a dataset and can
//! rebuild the corpus right away.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{Report, emit_robot, robot_ok};
use crate::corpus::{CorpusWarning, LabeledSample, add_sample, build_corpus, load_dataset};
use crate::error::{Result, SkemiError};

#[derive(Args, Debug)]
pub struct CorpusArgs {
    #[command(subcommand)]
    pub command: CorpusCommand,
}

#[derive(Subcommand, Debug)]
pub enum CorpusCommand {
    /// Build a corpus from a `[{"text", "label"}]` dataset
    Build {
        /// Labeled dataset (JSON array)
        #[arg(long)]
        dataset: PathBuf,

        /// Where to write the corpus document
        #[arg(long, short)]
        output: PathBuf,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Append a labeled sample to a dataset, optionally rebuilding the corpus
    Add {
        /// Dataset file (created when missing)
        #[arg(long)]
        dataset: PathBuf,

        /// Sample text
        #[arg(long)]
        text: String,

        /// Topic label
        #[arg(long)]
        label: String,

        /// Rebuild the corpus from the updated dataset
        #[arg(long, requires = "output")]
        rebuild: bool,

        /// Corpus written by --rebuild (replaced if present)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Load a corpus and report malformed entries
    Check {
        /// Corpus file or http(s) URL (overrides config)
        #[arg(long)]
        corpus: Option<String>,

        /// Fail when any entry had to be skipped
        #[arg(long)]
        strict: bool,
    },

    /// List topic names in corpus order
    List {
        /// Corpus file or http(s) URL (overrides config)
        #[arg(long)]
        corpus: Option<String>,
    },
}

impl CorpusCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Build { .. } => "corpus build",
            Self::Add { .. } => "corpus add",
            Self::Check { .. } => "corpus check",
            Self::List { .. } => "corpus list",
        }
    }
}

pub fn run(ctx: &AppContext, args: &CorpusArgs) -> Result<()> {
    match &args.command {
        CorpusCommand::Build {
            dataset,
            output,
            force,
        } => build(ctx, dataset, output, *force),
        CorpusCommand::Add {
            dataset,
            text,
            label,
            rebuild,
            output,
        } => add(
            ctx,
            dataset,
            LabeledSample::new(text.as_str(), label.as_str()),
            output.as_deref().filter(|_| *rebuild),
        ),
        CorpusCommand::Check { corpus, strict } => check(ctx, corpus.as_deref(), *strict),
        CorpusCommand::List { corpus } => list(ctx, corpus.as_deref()),
    }
}

#[derive(Serialize)]
struct BuildReport<'a> {
    dataset: String,
    output: String,
    samples: usize,
    topics: Vec<&'a str>,
}

fn build(ctx: &AppContext, dataset: &Path, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(SkemiError::Config(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )));
    }

    let samples = load_dataset(dataset)?;
    let corpus = build_corpus(&samples, &ctx.embedder())?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, corpus.to_json_pretty()?)?;

    let report = BuildReport {
        dataset: dataset.display().to_string(),
        output: output.display().to_string(),
        samples: samples.len(),
        topics: corpus.names().collect(),
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok("corpus build", report));
    }

    println!(
        "{} Built {} topics from {} samples -> {}",
        "✓".green().bold(),
        report.topics.len(),
        report.samples,
        report.output.cyan()
    );
    Ok(())
}

#[derive(Serialize)]
struct AddReport<'a> {
    dataset: String,
    samples: usize,
    label: &'a str,
    rebuilt: Option<RebuildReport<'a>>,
}

#[derive(Serialize)]
struct RebuildReport<'a> {
    output: String,
    topics: Vec<&'a str>,
}

/// `rebuild_into` is the corpus path when `--rebuild` was given. The sample
/// stays in the dataset even if the rebuild fails.
fn add(
    ctx: &AppContext,
    dataset: &Path,
    sample: LabeledSample,
    rebuild_into: Option<&Path>,
) -> Result<()> {
    let label = sample.label.clone();
    let count = add_sample(dataset, sample)?;

    let corpus = match rebuild_into {
        Some(output) => {
            let corpus = build_corpus(&load_dataset(dataset)?, &ctx.embedder())?;
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output, corpus.to_json_pretty()?)?;
            Some((output, corpus))
        }
        None => None,
    };

    let report = AddReport {
        dataset: dataset.display().to_string(),
        samples: count,
        label: &label,
        rebuilt: corpus.as_ref().map(|(output, corpus)| RebuildReport {
            output: output.display().to_string(),
            topics: corpus.names().collect(),
        }),
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok("corpus add", report));
    }

    println!(
        "{} Added sample for {} ({} samples in {})",
        "✓".green().bold(),
        report.label.cyan(),
        report.samples,
        report.dataset
    );
    if let Some(rebuilt) = &report.rebuilt {
        println!(
            "{} Rebuilt {} topics -> {}",
            "✓".green().bold(),
            rebuilt.topics.len(),
            rebuilt.output.cyan()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport<'a> {
    source: String,
    topics: usize,
    skipped: &'a [CorpusWarning],
}

fn check(ctx: &AppContext, corpus: Option<&str>, strict: bool) -> Result<()> {
    let source = ctx.corpus_source(corpus);
    let loaded = ctx.load_corpus(corpus)?;
    let report = CheckReport {
        source: source.to_string(),
        topics: loaded.corpus.len(),
        skipped: &loaded.warnings,
    };

    let rejected = strict && !loaded.warnings.is_empty();

    // A rejected check reports through the error envelope only.
    if ctx.robot_mode {
        if !rejected {
            emit_robot(&robot_ok("corpus check", &report).with_warnings(&loaded.warnings))?;
        }
    } else {
        let mut out = Report::new();
        out.title("Corpus check")
            .field("Source", &report.source)
            .field("Topics", report.topics)
            .field("Skipped", report.skipped.len());
        if !report.skipped.is_empty() {
            out.blank().section("Skipped entries");
            for warning in report.skipped {
                out.item(warning.to_string());
            }
        }
        out.print();
    }

    if rejected {
        return Err(SkemiError::InvalidCorpus(format!(
            "{} malformed entries in {source}",
            loaded.warnings.len()
        )));
    }
    Ok(())
}

fn list(ctx: &AppContext, corpus: Option<&str>) -> Result<()> {
    let loaded = ctx.load_corpus(corpus)?;
    let names: Vec<&str> = loaded.corpus.names().collect();

    if ctx.robot_mode {
        return emit_robot(&robot_ok("corpus list", &names).with_warnings(&loaded.warnings));
    }

    if names.is_empty() {
        println!("{}", "Corpus has no topics.".dimmed());
        return Ok(());
    }
    for (index, name) in names.iter().enumerate() {
        println!("{:>3}  {name}", index + 1);
    }
    Ok(())
}
