use regex::Regex;

use crate::error::Result;
use crate::normalize::normalize;

/// Free separators between abbreviation tokens: whitespace and punctuation
/// (underscore included via connector punctuation).
const TOKEN_SEPARATORS: &str = "[\\s\\p{P}]*";

/// The abbreviation must not sit inside a letter/digit run. `\b` would treat
/// underscore as a word character and reject `_`-separated filenames, so the
/// bounds are explicit classes, as in the structured-code matcher.
const BOUNDARY_BEFORE: &str = "(?:^|[^\\p{L}\\p{N}])";
const BOUNDARY_AFTER: &str = "(?:$|[^\\p{L}\\p{N}])";

/// Phrase and abbreviation detection for requirement-expression documents.
///
/// Both checks are accent/case-insensitive through [`normalize`]; the
/// matched literal is reported for the reason trace.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    /// Phrases, stored normalized
    phrases: Vec<String>,
    abbreviation: Regex,
}

impl PhraseMatcher {
    pub fn new(phrases: &[String]) -> Result<Self> {
        // Truncated root "expr" or any of its continuations, an optional
        // linking "de", the noun in singular or plural, free separators
        // between every token, letter/digit-bounded at both ends.
        let pattern = format!(
            "{before}(expr(?:essions?)?{sep}(?:de{sep})?besoins?){after}",
            before = BOUNDARY_BEFORE,
            after = BOUNDARY_AFTER,
            sep = TOKEN_SEPARATORS
        );
        Ok(Self {
            phrases: phrases.iter().map(|p| normalize(p)).collect(),
            abbreviation: Regex::new(&pattern)?,
        })
    }

    /// Literal phrase present as a substring of the normalized text.
    /// Returns the normalized phrase that hit.
    pub fn find_phrase(&self, text: &str) -> Option<&str> {
        let haystack = normalize(text);
        self.phrases
            .iter()
            .find(|phrase| haystack.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// Abbreviation pattern over a normalized filename.
    /// Returns the literal span of the normalized name that matched.
    pub fn find_abbreviation(&self, filename: &str) -> Option<String> {
        let haystack = normalize(filename);
        self.abbreviation
            .captures(&haystack)
            .map(|caps| caps[1].to_string())
    }
}
