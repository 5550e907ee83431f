use regex::Regex;

use crate::error::{ClassifierError, Result};

/// Separators tolerated between code segments: space, underscore, ASCII
/// hyphen, non-breaking hyphen, figure dash, en dash, em dash. Zero-or-more,
/// so tightly packed codes still match.
const SEPARATOR_CLASS: &str = "[ _\\-\u{2011}\u{2012}\u{2013}\u{2014}]*";

/// A code must not begin right after a letter or digit. Underscore is a
/// filename separator here, not part of a word run.
const PREFIX_GUARD: &str = "(?:^|[^\\p{L}\\p{N}])";

/// A structured-code hit, carrying the literal matched substring for the
/// reason trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMatch {
    pub literal: String,
}

/// Tolerant recognizer for client framing codes:
/// `<client-token> <sep>* <4 alphanumerics> <sep>* <code-segment>`.
///
/// Client tokens tolerate interior whitespace ("CAP S" for "CAPS"); the code
/// segment may continue through hyphen/underscore-joined sub-segments and has
/// no trailing anchor, so suffix decorations stay inside the match. Matching
/// is case-insensitive and never accent-stripped. A match must not start
/// right after a letter or digit, so codes inside unrelated alphanumeric
/// runs are ignored while underscore-glued prefixes ("Note_CAPS...") still
/// match; the regex crate has no look-behind, so the constraint is expressed
/// as a consumed prefix class with the code itself in a capture group.
#[derive(Debug, Clone)]
pub struct CodeMatcher {
    regex: Regex,
}

impl CodeMatcher {
    pub fn new(client_tokens: &[String]) -> Result<Self> {
        if client_tokens.is_empty() {
            return Err(ClassifierError::InvalidRuleSet(
                "client token set is empty".to_string(),
            ));
        }
        let clients = client_tokens
            .iter()
            .map(|token| spaced_token_pattern(token))
            .collect::<Result<Vec<_>>>()?
            .join("|");
        let pattern = format!(
            "(?i){guard}((?:{clients}){sep}[0-9A-Za-z]{{4}}{sep}[0-9A-Za-z]+(?:[-_][0-9A-Za-z]+)*)",
            guard = PREFIX_GUARD,
            sep = SEPARATOR_CLASS,
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Find a code anywhere in `text`, reporting the literal substring
    pub fn find(&self, text: &str) -> Option<CodeMatch> {
        self.regex.captures(text).map(|caps| CodeMatch {
            literal: caps[1].to_string(),
        })
    }
}

/// Pattern for one client token with optional whitespace between letters
fn spaced_token_pattern(token: &str) -> Result<String> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ClassifierError::InvalidRuleSet(format!(
            "client token {token:?} must be non-empty ASCII alphanumeric"
        )));
    }
    let letters: Vec<String> = token.chars().map(|c| c.to_string()).collect();
    Ok(letters.join("\\s*"))
}
