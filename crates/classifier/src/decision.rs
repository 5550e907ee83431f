use crate::config::CompiledRules;
use crate::trace::{Category, Classification, Readability, Signal, Trace};

impl CompiledRules {
    /// Classify one document from its first-page text, filename and
    /// readability flag.
    ///
    /// Pure and stateless: same inputs, same outcome. Rules run in strict
    /// priority order, first match wins; every first-page-dependent rule is
    /// skipped when the body is unreadable, and the unreadability cause is
    /// carried into the trace whatever rule fires.
    pub fn classify(
        &self,
        first_page: &str,
        filename: &str,
        readability: &Readability,
    ) -> Classification {
        let (category, signal) = self.evaluate(first_page, filename, readability);
        let unreadable_cause = match readability {
            Readability::Readable => None,
            Readability::Unreadable { cause } => Some(cause.clone()),
        };

        log::debug!("{filename}: {} ({:?})", category.as_str(), signal);
        Classification {
            category,
            trace: Trace {
                signal,
                unreadable_cause,
            },
        }
    }

    /// The priority ladder: rules 1-7, first match wins
    fn evaluate(
        &self,
        first_page: &str,
        filename: &str,
        readability: &Readability,
    ) -> (Category, Signal) {
        let filename_lower = filename.to_lowercase();
        let first_page_code = if readability.is_readable() {
            self.code.find(first_page)
        } else {
            None
        };

        // 1) code on the first page
        if let Some(hit) = &first_page_code {
            return (
                Category::Ndc,
                Signal::CodeInFirstPage {
                    literal: hit.literal.clone(),
                },
            );
        }

        // 2) filename carries the marker
        if filename_lower.contains(&self.marker) {
            return (
                Category::Edb,
                Signal::MarkerInFilename {
                    marker: self.marker.clone(),
                },
            );
        }

        // 3) filename carries a literal phrase or the abbreviation
        if let Some(phrase) = self.phrases.find_phrase(filename) {
            return (
                Category::Edb,
                Signal::PhraseInFilename {
                    phrase: phrase.to_string(),
                },
            );
        }
        if let Some(literal) = self.phrases.find_abbreviation(filename) {
            return (Category::Edb, Signal::AbbreviationInFilename { literal });
        }

        // 4) short fragment, provided no code was seen on the first page
        if filename_lower.contains(&self.fragment)
            && (!readability.is_readable() || first_page_code.is_none())
        {
            return (
                Category::Edb,
                Signal::FragmentWithoutCode {
                    fragment: self.fragment.clone(),
                    unreadable: !readability.is_readable(),
                },
            );
        }

        // 5) code in the filename
        if let Some(hit) = self.code.find(filename) {
            return (
                Category::Ndc,
                Signal::CodeInFilename {
                    literal: hit.literal,
                },
            );
        }

        // 6) literal phrase on the first page
        if readability.is_readable() {
            if let Some(phrase) = self.phrases.find_phrase(first_page) {
                return (
                    Category::Edb,
                    Signal::PhraseInFirstPage {
                        phrase: phrase.to_string(),
                    },
                );
            }
        }

        // 7) nothing matched
        (Category::Others, Signal::NoSignal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use pretty_assertions::assert_eq;

    fn rules() -> CompiledRules {
        RuleSet::default().compile().unwrap()
    }

    #[test]
    fn test_rule_order_first_page_code_beats_filename_marker() {
        let out = rules().classify(
            "Note de cadrage CAPS 2021-045",
            "Projet_EDB_v2.docx",
            &Readability::Readable,
        );
        assert_eq!(out.category, Category::Ndc);
        assert!(matches!(out.trace.signal, Signal::CodeInFirstPage { .. }));
    }

    #[test]
    fn test_marker_beats_filename_code() {
        let out = rules().classify("", "EDB_CAPS_2020_132.docx", &Readability::Readable);
        assert_eq!(out.category, Category::Edb);
        assert!(matches!(out.trace.signal, Signal::MarkerInFilename { .. }));
    }

    #[test]
    fn test_fragment_skipped_when_unread_code_rule_applies() {
        // "eb" fragment present, but a code sits in the first page: rule 1
        // catches it before rule 4 is ever reached
        let out = rules().classify(
            "CAPS_2022_001",
            "projet_eb_2022.docx",
            &Readability::Readable,
        );
        assert_eq!(out.category, Category::Ndc);
        assert!(matches!(out.trace.signal, Signal::CodeInFirstPage { .. }));
    }

    #[test]
    fn test_fragment_with_unreadable_body() {
        let out = rules().classify(
            "",
            "webinaire.docx",
            &Readability::unreadable("container error: invalid Zip archive"),
        );
        assert_eq!(out.category, Category::Edb);
        assert!(matches!(
            out.trace.signal,
            Signal::FragmentWithoutCode {
                unreadable: true,
                ..
            }
        ));
        assert!(out.reason().contains("content_unreadable"));
    }

    #[test]
    fn test_filename_code_when_unreadable() {
        let out = rules().classify(
            "",
            "Note_CAPS_2021-045.docx",
            &Readability::unreadable("missing document part: word/document.xml"),
        );
        assert_eq!(out.category, Category::Ndc);
        assert!(matches!(out.trace.signal, Signal::CodeInFilename { .. }));
        assert!(out.reason().contains("source:filename"));
        assert!(out.reason().contains("content_unreadable"));
    }

    #[test]
    fn test_first_page_phrase_last_resort_before_others() {
        let out = rules().classify(
            "Expression de besoins fonctionnels du service",
            "demande.docx",
            &Readability::Readable,
        );
        assert_eq!(out.category, Category::Edb);
        assert!(matches!(out.trace.signal, Signal::PhraseInFirstPage { .. }));
    }

    #[test]
    fn test_first_page_rules_skipped_when_unreadable() {
        // the phrase is in the (stale) first-page argument, but an unreadable
        // body means first-page rules must not fire
        let out = rules().classify(
            "expression de besoins",
            "document.docx",
            &Readability::unreadable("io"),
        );
        assert_eq!(out.category, Category::Others);
        assert_eq!(out.reason(), "content_unreadable:io");
    }

    #[test]
    fn test_others_with_empty_reason() {
        let out = rules().classify("rien de spécial", "notes.docx", &Readability::Readable);
        assert_eq!(out.category, Category::Others);
        assert_eq!(out.reason(), "");
    }

    #[test]
    fn test_substituted_rule_set() {
        let compiled = RuleSet {
            client_tokens: vec!["ODRA".to_string()],
            edb_marker: "req".to_string(),
            ..Default::default()
        }
        .compile()
        .unwrap();

        let out = compiled.classify("ODRA 2024 17", "note.docx", &Readability::Readable);
        assert_eq!(out.category, Category::Ndc);

        let out = compiled.classify("", "cahier_req_v1.docx", &Readability::Readable);
        assert_eq!(out.category, Category::Edb);
    }
}
