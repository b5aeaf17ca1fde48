//! Rule-based response selection
//!
//! Walks the ordered rule list and returns the first match's canned answer.
//! When nothing matches, one of the generic fallback prompts is drawn with the
//! caller's random number generator, which keeps the choice reproducible
//! under a seeded generator.

use super::rules::{default_rules, Rule, DEFAULT_FALLBACKS};
use crate::error::{Error, Result};
use rand::Rng;

/// Outcome of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The chosen answer
    pub response: &'a str,
    /// Name of the rule that fired, `None` for a fallback prompt
    pub rule: Option<&'a str>,
}

/// Maps a free-text query to a canned educational answer
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    rules: Vec<Rule>,
    fallbacks: Vec<String>,
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallbacks: DEFAULT_FALLBACKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ResponseSelector {
    /// Create a selector from a custom rule table.
    ///
    /// Fails when the fallback set is empty or any response is blank, since
    /// selection must always produce non-empty text.
    pub fn new(rules: Vec<Rule>, fallbacks: Vec<String>) -> Result<Self> {
        if fallbacks.is_empty() {
            return Err(Error::Config("fallback response set is empty".to_string()));
        }
        if fallbacks.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::Config("fallback responses must not be blank".to_string()));
        }
        if let Some(rule) = rules.iter().find(|r| r.response.trim().is_empty()) {
            return Err(Error::Config(format!("rule '{}' has a blank response", rule.name)));
        }

        Ok(Self { rules, fallbacks })
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Generic prompts used when no rule matches
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// First rule whose trigger is satisfied by `query`
    pub fn match_rule(&self, query: &str) -> Option<&Rule> {
        let normalized = query.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    /// Select a response, drawing from the fallback set with `rng` when no
    /// rule matches. Never fails.
    pub fn select<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> Selection<'_> {
        if let Some(rule) = self.match_rule(query) {
            return Selection {
                response: &rule.response,
                rule: Some(&rule.name),
            };
        }

        let index = rng.gen_range(0..self.fallbacks.len());
        Selection {
            response: &self.fallbacks[index],
            rule: None,
        }
    }

    /// Convenience wrapper returning an owned response
    pub fn select_response<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> String {
        self.select(query, rng).response.to_string()
    }
}
