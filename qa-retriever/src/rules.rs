//! Keyword rules evaluated before retrieval.
//!
//! A rule fires when any of its triggers is a substring of the trimmed,
//! lowercased message. Rules are checked in order; the first hit wins.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub triggers: Vec<String>,
    pub reply: String,
}

impl Rule {
    pub fn new(triggers: &[&str], reply: impl Into<String>) -> Self {
        Self {
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            reply: reply.into(),
        }
    }

    /// Lowercase and trim triggers; blank triggers would match everything.
    fn normalized(self) -> Self {
        Self {
            triggers: self
                .triggers
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            reply: self.reply,
        }
    }
}

/// Ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_rules(vec![
            Rule::new(&["hi", "hello", "hey"], "Hello. How can I help you today?"),
            Rule::new(
                &["how are you", "how r u", "how are you doing"],
                "I don’t have feelings, but I’m working.",
            ),
            Rule::new(
                &["your name", "what is your name", "who are you"],
                "I’m an AI chatbot built with a simple retriever.",
            ),
            Rule::new(
                &["what can you do", "capabilities", "features"],
                "I answer basic questions from my dataset and simple rule-based intents.",
            ),
            Rule::new(
                &["tell me about this project", "about this project", "project details"],
                "Retrieval uses TF-IDF over a small Q/A set.",
            ),
            Rule::new(&["thank you", "thanks", "ty"], "You're welcome."),
            Rule::new(&["bye", "goodbye", "see you"], "Goodbye. Have a nice day."),
        ])
    }
}

impl RuleSet {
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into_iter().map(Rule::normalized).collect(),
        }
    }

    /// Load rules from a JSON array of `{"triggers": [..], "reply": ".."}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let rules: Vec<Rule> = serde_json::from_str(&raw)?;
        info!(
            target: "qa_retriever::rules",
            path = %path.display(),
            rules = rules.len(),
            "loaded keyword rules"
        );
        Ok(Self::from_rules(rules))
    }

    /// Built-in rules, or the file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reply of the first rule triggered by `message`.
    pub fn matches(&self, message: &str) -> Option<&str> {
        let low = message.trim().to_lowercase();
        self.rules
            .iter()
            .find(|r| r.triggers.iter().any(|t| low.contains(t.as_str())))
            .map(|r| r.reply.as_str())
    }
}
