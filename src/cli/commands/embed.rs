//! skemi embed - Show the hash embedding of a text

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{Report, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::{EmbeddingVector, Tokenization};

#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Text to embed
    pub text: String,
}

#[derive(Serialize)]
struct EmbedReport<'a> {
    text: &'a str,
    tokenization: Tokenization,
    tokens: Vec<String>,
    dimensions: usize,
    norm: f64,
    vector: &'a EmbeddingVector,
}

pub fn run(ctx: &AppContext, args: &EmbedArgs) -> Result<()> {
    let embedder = ctx.embedder();
    let tokens = embedder.tokenize(&args.text);
    let embedding = embedder.embed(&args.text);

    if ctx.robot_mode {
        return emit_robot(&robot_ok(
            "embed",
            EmbedReport {
                text: &args.text,
                tokenization: embedder.tokenization(),
                tokens,
                dimensions: embedding.len(),
                norm: embedding.norm(),
                vector: &embedding,
            },
        ));
    }

    let mut report = Report::new();
    report
        .title("Embedding")
        .field("Tokenization", embedder.tokenization())
        .field("Tokens", tokens.join(" "))
        .field("Dimensions", embedding.len())
        .field("Norm", format!("{:.6}", embedding.norm()))
        .blank();

    if embedding.is_zero() {
        report.note("(no tokens: zero vector)");
    } else {
        report.section("Buckets");
        for (bucket, weight) in embedding.nonzero_buckets() {
            report.item(format!("{bucket:>3}  {weight:.6}"));
        }
    }
    report.print();
    Ok(())
}
