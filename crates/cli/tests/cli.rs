use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
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

fn doctriage() -> Command {
    Command::cargo_bin("doctriage").unwrap()
}

#[test]
fn classify_files_documents_and_writes_report() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_docx(&input.join("demande.docx"), "Expression de besoin du service");
    write_docx(&input.join("note.docx"), "Suite au dossier CAPS-2021-045");

    doctriage()
        .arg("classify")
        .arg(&input)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("classified 2 document(s)"));

    let out = temp.path().join("classified");
    assert!(out.join("edb").join("demande.docx").is_file());
    assert!(out.join("ndc").join("note.docx").is_file());

    let report = fs::read_to_string(temp.path().join("classify_report.csv")).unwrap();
    assert_eq!(report.lines().count(), 3);
    assert!(report.contains("pattern:CAPS-2021-045 source:first_page"));
}

#[test]
fn classify_honors_rule_set_override() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_docx(&input.join("note.docx"), "Suite au dossier ACME-2021-045");

    let rules = temp.path().join("rules.toml");
    fs::write(&rules, "client_tokens = [\"ACME\"]\n").unwrap();

    doctriage()
        .arg("classify")
        .arg(&input)
        .arg("--quiet")
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success();

    let out = temp.path().join("classified");
    assert!(out.join("ndc").join("note.docx").is_file());
}

#[test]
fn invalid_rule_set_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    let rules = temp.path().join("rules.toml");
    fs::write(&rules, "client_tokens = []\n").unwrap();

    doctriage()
        .arg("classify")
        .arg(&input)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .failure();
}

#[test]
fn inventory_then_dedupe_chain() {
    let temp = tempdir().unwrap();
    let raw = temp.path().join("raw");
    fs::create_dir(&raw).unwrap();
    fs::write(raw.join("rapport.pdf"), b"pdf").unwrap();
    fs::write(raw.join("rapport.docx"), b"docx").unwrap();
    fs::write(raw.join("notes.txt"), b"txt").unwrap();

    doctriage()
        .arg("inventory")
        .arg(&raw)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 2 file(s)"));

    let clean = temp.path().join("clean_extension");
    assert!(clean.join("rapport.pdf").is_file());
    assert!(!clean.join("notes.txt").exists());

    doctriage()
        .arg("dedupe")
        .arg(&clean)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("copied 1 file(s)"));

    let dedupe = temp.path().join("dedupe");
    assert!(dedupe.join("rapport.docx").is_file());
    assert!(!dedupe.join("rapport.pdf").exists());
}

#[test]
fn dedupe_dry_run_copies_nothing() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("clean_extension");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.docx"), b"x").unwrap();

    doctriage()
        .arg("dedupe")
        .arg(&source)
        .arg("--quiet")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run: 1 file(s)"));

    assert!(!temp.path().join("dedupe").exists());
    assert!(temp.path().join("dedupe_report.csv").is_file());
}
