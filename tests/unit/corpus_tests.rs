use std::path::PathBuf;
use std::time::Duration;

use httpmock::prelude::*;
use skemi::SkemiError;
use skemi::corpus::{
    CorpusLoader, CorpusSource, EntryProblem, LabeledSample, TopicCorpus, build_corpus,
    load_dataset,
};
use skemi::search::{HashEmbedder, find_closest_topic};
use skemi::test_utils::fixtures::CorpusFixture;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn malformed_fixture_keeps_valid_entries() {
    let loaded = CorpusLoader::default()
        .load(&CorpusSource::File(fixture_path(
            "tests/fixtures/corpus/malformed.json",
        )))
        .unwrap();

    let names: Vec<&str> = loaded.corpus.names().collect();
    assert_eq!(names, vec!["Geometry", "Astronomy"]);

    let problems: Vec<(usize, EntryProblem)> = loaded
        .warnings
        .iter()
        .map(|w| (w.index, w.problem.clone()))
        .collect();
    assert_eq!(
        problems,
        vec![
            (0, EntryProblem::WrongLength { actual: 3 }),
            (2, EntryProblem::NonNumeric { position: 0 }),
            (3, EntryProblem::MissingName),
        ]
    );
    assert_eq!(
        loaded.warnings[0].to_string(),
        "topic #0 (Truncated): vector has 3 components, expected 100"
    );
}

#[test]
fn invalid_json_is_unavailable() {
    let fixture = CorpusFixture::new();
    let path = fixture.write("broken.json", "{ \"topics\": [");
    let err = CorpusLoader::default()
        .load(&CorpusSource::File(path))
        .unwrap_err();
    assert!(matches!(err, SkemiError::CorpusUnavailable(_)));
    assert_eq!(err.code(), "corpus_unavailable");
}

#[test]
fn document_without_topics_is_invalid() {
    let fixture = CorpusFixture::new();
    let path = fixture.write("other.json", "{ \"subjects\": [] }");
    let err = CorpusLoader::default()
        .load(&CorpusSource::File(path))
        .unwrap_err();
    assert!(matches!(err, SkemiError::InvalidCorpus(_)));
}

#[test]
fn empty_topics_array_loads_empty_corpus() {
    let loaded = TopicCorpus::from_json_str("{ \"topics\": [] }").unwrap();
    assert!(loaded.corpus.is_empty());
    assert!(loaded.warnings.is_empty());
    assert!(find_closest_topic("anything", loaded.corpus.topics()).is_none());
}

#[test]
fn loads_corpus_over_http() {
    let fixture = CorpusFixture::new();
    let path = fixture.write_corpus(
        "topics.json",
        &[
            ("Electricity", "current voltage circuit resistance"),
            ("Geography", "rivers mountains climate maps"),
        ],
    );
    let body = std::fs::read_to_string(path).unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/Train/VectorData.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let source = CorpusSource::parse(&server.url("/Train/VectorData.json"));
    assert!(matches!(source, CorpusSource::Url(_)));
    let loaded = CorpusLoader::new(Duration::from_secs(5))
        .load(&source)
        .unwrap();

    mock.assert();
    assert_eq!(loaded.corpus.len(), 2);
    let best = find_closest_topic("an electric circuit with a resistance", loaded.corpus.topics());
    assert_eq!(best.map(|t| t.name.as_str()), Some("Electricity"));
}

#[test]
fn http_error_status_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing.json");
        then.status(404);
    });

    let source = CorpusSource::parse(&server.url("/missing.json"));
    let err = CorpusLoader::default().load(&source).unwrap_err();
    assert!(matches!(err, SkemiError::CorpusUnavailable(_)));
}

#[test]
fn build_from_dataset_fixture() {
    let samples = load_dataset(&fixture_path("tests/fixtures/datasets/study.json")).unwrap();
    assert_eq!(samples.len(), 6);

    let corpus = build_corpus(&samples, &HashEmbedder::default()).unwrap();
    let names: Vec<&str> = corpus.names().collect();
    assert_eq!(names, vec!["Photosynthesis", "Magnetism", "Astronomy"]);

    for topic in corpus.topics() {
        let norm: f64 = topic.vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9, "{} has norm {norm}", topic.name);
    }

    let best = find_closest_topic("A magnet and its magnetic field", corpus.topics());
    assert_eq!(best.map(|t| t.name.as_str()), Some("Magnetism"));
}

#[test]
fn built_corpus_survives_write_and_load() {
    let fixture = CorpusFixture::new();
    let samples = vec![
        LabeledSample::new("Triangles have three sides", "Geometry"),
        LabeledSample::new("Acids turn litmus red", "Chemistry"),
    ];
    let corpus = build_corpus(&samples, &HashEmbedder::default()).unwrap();
    let path = fixture.write("built/topics.json", &corpus.to_json_pretty().unwrap());

    let loaded = CorpusLoader::default()
        .load(&CorpusSource::File(path))
        .unwrap();
    assert!(loaded.warnings.is_empty());
    for (read, built) in loaded.corpus.topics().iter().zip(corpus.topics()) {
        assert_eq!(read.name, built.name);
        let drift = read
            .vector
            .iter()
            .zip(&built.vector)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(drift < 1e-12);
    }
}

#[test]
fn missing_dataset_is_dataset_error() {
    let err = load_dataset(&fixture_path("tests/fixtures/datasets/absent.json")).unwrap_err();
    assert_eq!(err.code(), "invalid_dataset");
}
