use std::path::PathBuf;

use clap::Parser;

use skemi::cli::commands::corpus::CorpusCommand;
use skemi::cli::{Cli, Commands};

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["skemi"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv).command
}

#[test]
fn parse_match_multiple_queries() {
    match parse(&["match", "light energy", "magnets", "--corpus", "topics.json"]) {
        Commands::Match(args) => {
            assert_eq!(args.texts, vec!["light energy", "magnets"]);
            assert_eq!(args.corpus.as_deref(), Some("topics.json"));
            assert!(args.top.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_match_top() {
    match parse(&["match", "--top", "3", "stars"]) {
        Commands::Match(args) => {
            assert_eq!(args.top, Some(3));
            assert_eq!(args.texts, vec!["stars"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn match_requires_a_query() {
    assert!(Cli::try_parse_from(["skemi", "match"]).is_err());
}

#[test]
fn parse_embed_empty_text() {
    match parse(&["embed", ""]) {
        Commands::Embed(args) => assert!(args.text.is_empty()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_corpus_build() {
    match parse(&[
        "corpus",
        "build",
        "--dataset",
        "data.json",
        "-o",
        "out/topics.json",
        "--force",
    ]) {
        Commands::Corpus(args) => match args.command {
            CorpusCommand::Build {
                dataset,
                output,
                force,
            } => {
                assert_eq!(dataset, PathBuf::from("data.json"));
                assert_eq!(output, PathBuf::from("out/topics.json"));
                assert!(force);
            }
            other => panic!("unexpected corpus command: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_corpus_check_strict() {
    match parse(&["corpus", "check", "--strict"]) {
        Commands::Corpus(args) => match args.command {
            CorpusCommand::Check { corpus, strict } => {
                assert!(corpus.is_none());
                assert!(strict);
            }
            other => panic!("unexpected corpus command: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from(["skemi", "corpus", "list", "--robot", "-vv"]);
    assert!(cli.robot);
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Commands::Corpus(_)));
}

#[test]
fn global_config_flag() {
    let cli = Cli::parse_from(["skemi", "--config", "alt.toml", "config"]);
    assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    assert!(matches!(cli.command, Commands::Config(_)));
}

#[test]
fn parse_corpus_add_with_rebuild() {
    match parse(&[
        "corpus",
        "add",
        "--dataset",
        "Train/dataset.json",
        "--text",
        "Plants need sunlight",
        "--label",
        "Photosynthesis",
        "--rebuild",
        "-o",
        "Train/VectorData.json",
    ]) {
        Commands::Corpus(args) => match args.command {
            CorpusCommand::Add {
                dataset,
                text,
                label,
                rebuild,
                output,
            } => {
                assert_eq!(dataset, PathBuf::from("Train/dataset.json"));
                assert_eq!(text, "Plants need sunlight");
                assert_eq!(label, "Photosynthesis");
                assert!(rebuild);
                assert_eq!(output, Some(PathBuf::from("Train/VectorData.json")));
            }
            other => panic!("unexpected corpus command: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn corpus_add_rebuild_requires_output() {
    let result = Cli::try_parse_from([
        "skemi", "corpus", "add", "--dataset", "d.json", "--text", "t", "--label", "l",
        "--rebuild",
    ]);
    assert!(result.is_err());
}
