use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::code_matcher::CodeMatcher;
use crate::error::{ClassifierError, Result};
use crate::phrase_matcher::PhraseMatcher;

/// Default budget for the first-page approximation, in characters
pub const DEFAULT_CHAR_LIMIT: usize = 12_000;

/// The complete rule set, built once at startup.
///
/// Everything the decision procedure compares against lives here rather than
/// in process-wide constants, so tests can substitute alternate rule sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleSet {
    /// Accepted client organization tokens anchoring the structured code
    pub client_tokens: Vec<String>,

    /// Literal requirement-expression phrases (accent/case-insensitive)
    pub edb_phrases: Vec<String>,

    /// Filename marker for the requirements category (rule 2)
    pub edb_marker: String,

    /// Short filename fragment for the requirements category (rule 4)
    pub edb_fragment: String,

    /// First-page character budget
    pub char_limit: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            client_tokens: vec!["CAPS".to_string()],
            edb_phrases: vec![
                "expression de besoin".to_string(),
                "expression de besoins".to_string(),
                "expressions de besoins".to_string(),
            ],
            edb_marker: "edb".to_string(),
            edb_fragment: "eb".to_string(),
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }
}

impl RuleSet {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.client_tokens.is_empty() {
            return Err(ClassifierError::InvalidRuleSet(
                "client_tokens must not be empty".to_string(),
            ));
        }
        if self.edb_marker.is_empty() {
            return Err(ClassifierError::InvalidRuleSet(
                "edb_marker must not be empty".to_string(),
            ));
        }
        if self.edb_fragment.is_empty() {
            return Err(ClassifierError::InvalidRuleSet(
                "edb_fragment must not be empty".to_string(),
            ));
        }
        if self.edb_phrases.iter().any(String::is_empty) {
            return Err(ClassifierError::InvalidRuleSet(
                "edb_phrases must not contain empty phrases".to_string(),
            ));
        }
        if self.char_limit == 0 {
            return Err(ClassifierError::InvalidRuleSet(
                "char_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Compile the matchers once; fails on an invalid rule set
    pub fn compile(self) -> Result<CompiledRules> {
        self.validate()?;
        let code = CodeMatcher::new(&self.client_tokens)?;
        let phrases = PhraseMatcher::new(&self.edb_phrases)?;
        Ok(CompiledRules {
            marker: self.edb_marker.to_lowercase(),
            fragment: self.edb_fragment.to_lowercase(),
            rules: self,
            code,
            phrases,
        })
    }
}

/// A validated rule set with its matchers compiled.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub(crate) rules: RuleSet,
    pub(crate) code: CodeMatcher,
    pub(crate) phrases: PhraseMatcher,
    pub(crate) marker: String,
    pub(crate) fragment: String,
}

impl CompiledRules {
    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    pub fn char_limit(&self) -> usize {
        self.rules.char_limit
    }

    pub fn code_matcher(&self) -> &CodeMatcher {
        &self.code
    }

    pub fn phrase_matcher(&self) -> &PhraseMatcher {
        &self.phrases
    }
}

/// Compiled default rule set, shared process-wide
pub fn default_rules() -> &'static CompiledRules {
    static DEFAULT: Lazy<CompiledRules> = Lazy::new(|| {
        RuleSet::default()
            .compile()
            .expect("default rule set compiles")
    });
    &DEFAULT
}
