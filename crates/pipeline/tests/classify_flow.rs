//! End-to-end run over a directory of authored fixtures: scan, classify,
//! file into buckets, report.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use triage_classifier::{default_rules, Category};
use triage_pipeline::{
    classify_directory, write_report, ClassifyOptions, CopyStatus, OnExists,
};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn write_docx(path: &Path, body_text: &str) {
    let document = format!(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body><w:p><w:r><w:t>{body_text}</w:t></w:r></w:p></w:body></w:document>"
    );
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap();
}

fn options(input: &Path, output: &Path) -> ClassifyOptions {
    let mut options = ClassifyOptions::new(input, output);
    options.concurrency = 2;
    options
}

#[tokio::test]
async fn test_directory_run_files_and_reports() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    let output = temp.path().join("classified");
    fs::create_dir(&input).unwrap();

    write_docx(&input.join("note.docx"), "Suite à la demande CAPS-2021-045");
    write_docx(&input.join("phrase.docx"), "Expression de besoin du projet X");
    write_docx(&input.join("plain.docx"), "Compte rendu de la réunion");
    fs::write(input.join("eb_note.docx"), b"not a zip archive").unwrap();

    let outcomes = classify_directory(
        Arc::new(default_rules().clone()),
        Arc::new(options(&input, &output)),
    )
    .await
    .unwrap();

    let summary: Vec<(&str, Category)> = outcomes
        .iter()
        .map(|o| (o.filename.as_str(), o.classification.category))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("eb_note.docx", Category::Edb),
            ("note.docx", Category::Ndc),
            ("phrase.docx", Category::Edb),
            ("plain.docx", Category::Others),
        ]
    );

    assert!(output.join("edb").join("eb_note.docx").is_file());
    assert!(output.join("edb").join("phrase.docx").is_file());
    assert!(output.join("ndc").join("note.docx").is_file());
    assert!(output.join("others").join("plain.docx").is_file());

    let reasons: Vec<String> = outcomes
        .iter()
        .map(|o| o.classification.reason())
        .collect();
    assert!(reasons[0].starts_with("filename_contains:eb AND content_unreadable"));
    assert_eq!(reasons[1], "pattern:CAPS-2021-045 source:first_page");
    assert_eq!(reasons[2], "contains_first_page:'expression de besoin'");
    assert_eq!(reasons[3], "");

    let report = temp.path().join("report.csv");
    write_report(&report, &outcomes).unwrap();
    let text = fs::read_to_string(&report).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().nth(2).unwrap().contains("NDC"));
}

#[tokio::test]
async fn test_second_run_skips_existing_copies() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    let output = temp.path().join("classified");
    fs::create_dir(&input).unwrap();
    write_docx(&input.join("plain.docx"), "rien de notable");

    let rules = Arc::new(default_rules().clone());
    let opts = Arc::new(options(&input, &output));

    let first = classify_directory(Arc::clone(&rules), Arc::clone(&opts))
        .await
        .unwrap();
    assert_eq!(first[0].copy_status, CopyStatus::Copied);

    let second = classify_directory(rules, opts).await.unwrap();
    assert_eq!(second[0].copy_status, CopyStatus::SkippedExisting);
}

#[tokio::test]
async fn test_overwrite_policy_and_debug_dump() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    let output = temp.path().join("classified");
    fs::create_dir(&input).unwrap();
    write_docx(&input.join("phrase.docx"), "Expression de besoins validée");

    let rules = Arc::new(default_rules().clone());
    let mut opts = options(&input, &output);
    opts.on_exists = OnExists::Overwrite;
    opts.debug_first_pages = true;
    let opts = Arc::new(opts);

    classify_directory(Arc::clone(&rules), Arc::clone(&opts))
        .await
        .unwrap();
    let second = classify_directory(rules, opts).await.unwrap();
    assert_eq!(second[0].copy_status, CopyStatus::Overwritten);

    let dump = output.join("_debug_first_pages").join("phrase.txt");
    assert_eq!(
        fs::read_to_string(dump).unwrap(),
        "Expression de besoins validée"
    );
}
