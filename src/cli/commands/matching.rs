//! skemi match - Find the closest topic for each query

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{Report, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::TopicMatch;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Query texts, each matched independently
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Corpus file or http(s) URL (overrides config)
    #[arg(long)]
    pub corpus: Option<String>,

    /// List the N best topics per query instead of only the closest
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct ScoredTopic<'a> {
    name: &'a str,
    score: f64,
}

impl<'a> From<&TopicMatch<'a>> for ScoredTopic<'a> {
    fn from(m: &TopicMatch<'a>) -> Self {
        Self {
            name: &m.topic.name,
            score: m.score,
        }
    }
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    /// Closest topic, `None` for "no match".
    topic: Option<&'a str>,
    matches: Vec<ScoredTopic<'a>>,
}

pub fn run(ctx: &AppContext, args: &MatchArgs) -> Result<()> {
    let loaded = ctx.load_corpus(args.corpus.as_deref())?;
    let topics = loaded.corpus.topics();
    let matcher = ctx.matcher();
    let top = args.top.unwrap_or(ctx.config.matching.top_k).max(1);
    debug!(queries = args.texts.len(), topics = topics.len(), top, "matching");

    let reports: Vec<QueryReport<'_>> = if top == 1 {
        matcher
            .match_batch(&args.texts, topics)
            .iter()
            .zip(&args.texts)
            .map(|(outcome, query)| {
                let matches: Vec<ScoredTopic<'_>> =
                    outcome.best.iter().map(ScoredTopic::from).collect();
                QueryReport {
                    query,
                    topic: matches.first().map(|m| m.name),
                    matches,
                }
            })
            .collect()
    } else {
        args.texts
            .iter()
            .map(|query| {
                let matches: Vec<ScoredTopic<'_>> = matcher
                    .rank_topics(query, topics, top)
                    .iter()
                    .map(ScoredTopic::from)
                    .collect();
                QueryReport {
                    query,
                    topic: matches.first().map(|m| m.name),
                    matches,
                }
            })
            .collect()
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok("match", &reports).with_warnings(&loaded.warnings));
    }

    let mut out = Report::new();
    for report in &reports {
        out.section(format!("\u{201c}{}\u{201d}", report.query));
        if report.matches.is_empty() {
            out.note("no match");
        }
        for m in &report.matches {
            out.score(m.name, m.score);
        }
        out.blank();
    }
    out.print();
    Ok(())
}
