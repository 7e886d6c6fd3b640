//! Chat pipeline: keyword rules first, then retrieval, then fallbacks.

use crate::{
    index::{NoMatchReason, Retrieval},
    knowledge_base::KnowledgeBase,
    rules::RuleSet,
};

pub const DATASET_NOT_LOADED: &str =
    "Dataset not loaded. Add data/conversations.json and redeploy or call /api/reload.";

pub const DONT_KNOW: &str =
    "I don't know that yet. Try rephrasing or add more Q/A pairs to the dataset.";

/// Which stage produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Rule,
    Retrieval,
    DatasetUnavailable,
    BelowThreshold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Similarity score, present only for retrieval answers.
    pub score: Option<f32>,
    pub source: ReplySource,
}

impl Reply {
    fn fixed(text: &str, source: ReplySource) -> Self {
        Self {
            text: text.to_string(),
            score: None,
            source,
        }
    }
}

/// Produce the reply for `message`. Callers reject blank messages upfront.
pub fn respond(kb: &KnowledgeBase, rules: &RuleSet, threshold: f32, message: &str) -> Reply {
    if let Some(reply) = rules.matches(message) {
        return Reply::fixed(reply, ReplySource::Rule);
    }

    match kb.retrieve(message.trim(), threshold) {
        Retrieval::Matched { index, score } => match kb.answer(index) {
            Some(answer) => Reply {
                text: answer.to_string(),
                score: Some(score),
                source: ReplySource::Retrieval,
            },
            // Unreachable while rows and answers stay aligned.
            None => Reply::fixed(DONT_KNOW, ReplySource::BelowThreshold),
        },
        Retrieval::NoMatch(NoMatchReason::DatasetUnavailable) => {
            Reply::fixed(DATASET_NOT_LOADED, ReplySource::DatasetUnavailable)
        }
        Retrieval::NoMatch(NoMatchReason::BelowThreshold { .. }) => {
            Reply::fixed(DONT_KNOW, ReplySource::BelowThreshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        corpus::{Corpus, QaPair},
        tokenizer::Analyzer,
    };

    fn kb(pairs: &[(&str, &str)]) -> KnowledgeBase {
        let corpus = Corpus::new(pairs.iter().map(|(q, a)| QaPair::new(*q, *a)).collect());
        KnowledgeBase::build(corpus, Analyzer::default())
    }

    #[test]
    fn return_policy_example() {
        let kb = kb(&[("what is your return policy", "30 days")]);
        let rules = RuleSet::default();

        let hit = respond(&kb, &rules, 0.20, "whats the return policy");
        assert_eq!(hit.text, "30 days");
        assert_eq!(hit.source, ReplySource::Retrieval);
        assert!(hit.score.unwrap() > 0.0);

        let miss = respond(&kb, &rules, 0.20, "what is the weather");
        assert_eq!(miss.text, DONT_KNOW);
        assert_eq!(miss.score, None);
    }

    #[test]
    fn exact_question_returns_its_answer() {
        let pairs = [
            ("what is your return policy", "30 days"),
            ("where is the store located", "Main street 5"),
            ("who are you", "A demo assistant"),
        ];
        let kb = kb(&pairs);
        // No rules so "who are you" reaches retrieval.
        let rules = RuleSet::from_rules(Vec::new());
        for (q, a) in pairs {
            let reply = respond(&kb, &rules, 0.25, q);
            assert_eq!(reply.text, a);
            assert!(reply.score.unwrap() > 0.999);
        }
    }

    #[test]
    fn questions_differing_only_in_stop_words_keep_their_answers() {
        let pairs = [
            ("when is the sale", "Next Monday"),
            ("where is the sale", "In the main hall"),
        ];
        let kb = kb(&pairs);
        let rules = RuleSet::from_rules(Vec::new());
        for (q, a) in pairs {
            let reply = respond(&kb, &rules, 0.20, q);
            assert_eq!(reply.text, a, "question {q:?}");
            assert_eq!(reply.source, ReplySource::Retrieval);
        }
    }

    #[test]
    fn rules_take_precedence_over_retrieval() {
        let kb = kb(&[("thanks", "from the dataset")]);
        let reply = respond(&kb, &RuleSet::default(), 0.20, "thanks");
        assert_eq!(reply.text, "You're welcome.");
        assert_eq!(reply.source, ReplySource::Rule);
        assert_eq!(reply.score, None);
    }

    #[test]
    fn empty_dataset_reports_not_loaded() {
        let reply = respond(
            &KnowledgeBase::default(),
            &RuleSet::default(),
            0.20,
            "return policy",
        );
        assert_eq!(reply.text, DATASET_NOT_LOADED);
        assert_eq!(reply.source, ReplySource::DatasetUnavailable);
    }

    #[test]
    fn rules_still_work_without_dataset() {
        let reply = respond(&KnowledgeBase::default(), &RuleSet::default(), 0.20, "bye");
        assert_eq!(reply.source, ReplySource::Rule);
    }
}
