//! End-to-end checks of the decision procedure over extracted first pages.

use pretty_assertions::assert_eq;
use triage_classifier::{
    default_rules, extract_first_page, normalize, Category, Readability, RuleSet, Signal,
};
use triage_doctree::{Block, DocumentTree, Paragraph, Table};

fn paragraph(text: &str) -> Block {
    Block::Paragraph(Paragraph {
        text: text.to_string(),
        ..Default::default()
    })
}

#[test]
fn normalizer_is_idempotent_and_order_independent() {
    assert_eq!(normalize("ÉXPRESSION"), normalize("expression"));
    let once = normalize("Énoncé des BESOINS métier");
    assert_eq!(normalize(&once), once);
}

#[test]
fn marker_in_filename_wins_over_filename_code() {
    // no first-page code: rule 2 fires before the NDC-in-filename rule 5
    let out = default_rules().classify(
        "contenu sans code",
        "Projet_EDB_CAPS_2020_132.docx",
        &Readability::Readable,
    );
    assert_eq!(out.category, Category::Edb);
    assert_eq!(out.reason(), "filename_contains:edb");
}

#[test]
fn first_page_code_beats_every_filename_signal() {
    let out = default_rules().classify(
        "Cadrage CAPS-2020-132 du projet",
        "Projet_EDB_v2.docx",
        &Readability::Readable,
    );
    assert_eq!(out.category, Category::Ndc);
    assert_eq!(out.reason(), "pattern:CAPS-2020-132 source:first_page");
}

#[test]
fn unreadable_fallback_uses_fragment_rule() {
    let out = default_rules().classify(
        "",
        "notes_eb_internes.docx",
        &Readability::unreadable("container error: invalid Zip archive"),
    );
    assert_eq!(out.category, Category::Edb);
    assert!(out.reason().starts_with("filename_contains:eb AND content_unreadable"));
    assert!(out.reason().contains("invalid Zip archive"));
}

#[test]
fn scenario_a_filename_code_with_unreadable_body() {
    let out = default_rules().classify(
        "",
        "Note_CAPS_2021-045.docx",
        &Readability::unreadable("missing document part: word/document.xml"),
    );
    assert_eq!(out.category, Category::Ndc);
    assert!(matches!(
        out.trace.signal,
        Signal::CodeInFilename { ref literal } if literal == "CAPS_2021-045"
    ));
    assert!(out.reason().contains("source:filename"));
    assert!(out.reason().contains("content_unreadable"));
}

#[test]
fn scenario_b_first_page_phrase() {
    let tree = DocumentTree {
        header: Vec::new(),
        footer: Vec::new(),
        body: vec![
            paragraph("Direction des services"),
            paragraph("Expression de besoins fonctionnels pour l'outil de suivi"),
        ],
    };
    let rules = default_rules();
    let page = extract_first_page(&tree, rules.char_limit());

    let out = rules.classify(&page.text, "demande.docx", &Readability::Readable);
    assert_eq!(out.category, Category::Edb);
    assert_eq!(out.reason(), "contains_first_page:'expression de besoin'");
}

#[test]
fn scenario_c_first_page_code_preempts_fragment_rule() {
    let tree = DocumentTree {
        header: vec!["CAPS 2022 018".to_string()],
        footer: Vec::new(),
        body: vec![paragraph("Note de cadrage")],
    };
    let rules = default_rules();
    let page = extract_first_page(&tree, rules.char_limit());

    let out = rules.classify(&page.text, "projet_eb_2022.docx", &Readability::Readable);
    assert_eq!(out.category, Category::Ndc);
    assert!(matches!(out.trace.signal, Signal::CodeInFirstPage { .. }));
}

#[test]
fn extraction_feeds_table_and_frame_text_to_the_rules() {
    let tree = DocumentTree {
        header: Vec::new(),
        footer: Vec::new(),
        body: vec![Block::Table(Table {
            cells: vec!["Référence".to_string(), "CAPS_2023_007".to_string()],
            frames: Vec::new(),
        })],
    };
    let rules = default_rules();
    let page = extract_first_page(&tree, rules.char_limit());

    let out = rules.classify(&page.text, "tableau.docx", &Readability::Readable);
    assert_eq!(out.category, Category::Ndc);
}

#[test]
fn content_after_page_break_never_reaches_the_rules() {
    let tree = DocumentTree {
        header: Vec::new(),
        footer: Vec::new(),
        body: vec![
            Block::Paragraph(Paragraph {
                text: "Page de garde".to_string(),
                page_break: true,
                frames: Vec::new(),
            }),
            paragraph("CAPS 2020 132 en page deux"),
        ],
    };
    let rules = default_rules();
    let page = extract_first_page(&tree, rules.char_limit());

    let out = rules.classify(&page.text, "dossier.docx", &Readability::Readable);
    assert_eq!(out.category, Category::Others);
    assert_eq!(out.reason(), "");
}

#[test]
fn alternate_rule_set_is_honored_end_to_end() {
    let rules = RuleSet {
        client_tokens: vec!["CAPS".to_string(), "ODRA".to_string()],
        char_limit: 64,
        ..Default::default()
    }
    .compile()
    .unwrap();

    let tree = DocumentTree {
        header: Vec::new(),
        footer: Vec::new(),
        body: vec![paragraph("ODRA-2024-003 cadrage")],
    };
    let page = extract_first_page(&tree, rules.char_limit());
    let out = rules.classify(&page.text, "note.docx", &Readability::Readable);
    assert_eq!(out.category, Category::Ndc);
}
