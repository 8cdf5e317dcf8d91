use std::{fs, path::Path};

use news_patterns::data::corpus::{
    assemble, load_rows, stratified_sample, write_corpus, CorpusRow,
};

fn write(root: &Path, rel: &str, body: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn assembles_pairs_in_file_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "articles/tech/002.txt", b"Second article");
    write(root, "articles/tech/001.txt", b"Caf\xe9 opens");
    write(root, "articles/tech/notes.md", b"ignored");
    write(root, "summaries/tech/001.txt", b"Cafe summary");
    write(root, "summaries/tech/002.txt", b"Second summary");

    let records = assemble(
        &root.join("articles"),
        &root.join("summaries"),
        &["tech".to_string()],
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].articles, "Caf\u{e9} opens");
    assert_eq!(records[0].summaries, "Cafe summary");
    assert_eq!(records[1].categories, "tech");

    let csv_path = root.join("out/corpus.csv");
    write_corpus(&records, &csv_path).unwrap();
    let rows = load_rows(&csv_path, "ARTICLES", "CATEGORIES").unwrap();
    assert_eq!(
        rows[1],
        CorpusRow {
            text: "Second article".into(),
            category: "tech".into(),
        }
    );
}

#[test]
fn rejects_unbalanced_category() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "articles/sport/001.txt", b"one");
    write(root, "articles/sport/002.txt", b"two");
    write(root, "summaries/sport/001.txt", b"one");

    let err = assemble(
        &root.join("articles"),
        &root.join("summaries"),
        &["sport".to_string()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("sport"));
}

#[test]
fn missing_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.csv");
    fs::write(&path, "articles,categories\nhello,tech\n").unwrap();
    assert!(load_rows(&path, "PREPROCESSED_TEXT", "CATEGORIES").is_err());
}

#[test]
fn stratified_sample_is_seeded_and_per_category() {
    let rows: Vec<CorpusRow> = (0..20)
        .map(|i| CorpusRow {
            text: format!("text {i}"),
            category: if i < 10 { "business" } else { "sport" }.into(),
        })
        .collect();
    let a = stratified_sample(&rows, 0.3, 42);
    let b = stratified_sample(&rows, 0.3, 42);
    assert_eq!(a, b);
    assert_eq!(a.iter().filter(|r| r.category == "business").count(), 3);
    assert_eq!(a.iter().filter(|r| r.category == "sport").count(), 3);
    assert_eq!(stratified_sample(&rows, 1.0, 7).len(), 20);
}

#[test]
fn sample_sizes_round_halves_to_even() {
    let rows: Vec<CorpusRow> = (0..32)
        .map(|i| CorpusRow {
            text: format!("text {i}"),
            category: if i < 25 { "business" } else { "tech" }.into(),
        })
        .collect();
    let sampled = stratified_sample(&rows, 0.1, 42);
    assert_eq!(sampled.iter().filter(|r| r.category == "business").count(), 2);
    assert_eq!(sampled.iter().filter(|r| r.category == "tech").count(), 1);

    let halves = stratified_sample(&rows, 0.5, 42);
    assert_eq!(halves.iter().filter(|r| r.category == "tech").count(), 4);
}
