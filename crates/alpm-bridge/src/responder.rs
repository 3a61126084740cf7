//! Answering questions from configuration
//!
//! A [`Responder`] is what a question callback calls: it narrows the question,
//! writes the configured decision into the foreign record, and reports what
//! it wrote.

use crate::question::{Narrowed, QuestionAny, QuestionType};
use alpm_bridge_config::AnswersConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// The decision written into a question record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// `install` field of an install-ignorepkg question
    InstallIgnored(bool),
    /// `replace` field of a replace-pkg question
    Replace(bool),
    /// `use_index` field of a select-provider question
    SelectProvider(i32),
    /// `answer` field of any other question
    Default(bool),
}

/// Fixed answers for every question type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responder {
    install_ignored: bool,
    replace: bool,
    provider_index: i32,
    default_answer: bool,
}

impl Responder {
    pub fn new(answers: &AnswersConfig) -> Self {
        Self {
            install_ignored: answers.install_ignored(),
            replace: answers.replace(),
            provider_index: answers.provider_index(),
            default_answer: answers.default_answer(),
        }
    }

    /// Answer `question` in place
    ///
    /// The provider index is clamped to the provider list; an empty list
    /// gets index 0.
    pub fn answer(&self, question: &mut QuestionAny<'_>) -> Decision {
        let other = match question.classify() {
            Narrowed::InstallIgnorepkg(mut q) => {
                q.set_install(self.install_ignored);
                return record(
                    QuestionType::InstallIgnorepkg,
                    Decision::InstallIgnored(self.install_ignored),
                );
            }
            Narrowed::Replace(mut q) => {
                q.set_replace(self.replace);
                return record(QuestionType::ReplacePkg, Decision::Replace(self.replace));
            }
            Narrowed::SelectProvider(mut q) => {
                let count = q.providers().len();
                let index = self.provider_for(count);
                q.set_use_index(index);
                return record(QuestionType::SelectProvider, Decision::SelectProvider(index));
            }
            Narrowed::Other(ty) => ty,
        };

        question.set_answer(self.default_answer);
        record(other, Decision::Default(self.default_answer))
    }

    fn provider_for(&self, count: usize) -> i32 {
        if count == 0 {
            return 0;
        }
        let last = i32::try_from(count - 1).unwrap_or(i32::MAX);
        if self.provider_index > last {
            warn!(
                "provider index {} out of range for {} providers, using {}",
                self.provider_index, count, last
            );
            return last;
        }
        self.provider_index.max(0)
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(&AnswersConfig::default())
    }
}

impl From<&AnswersConfig> for Responder {
    fn from(answers: &AnswersConfig) -> Self {
        Self::new(answers)
    }
}

fn record(ty: QuestionType, decision: Decision) -> Decision {
    debug!("answered {} question: {:?}", ty, decision);
    decision
}
