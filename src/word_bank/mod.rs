//! Word bank: topics, their words, and the per-round word draw
//!
//! The catalog is loaded once through [`WordBankCache`] and then shared
//! read-only; [`WordBank`] handles are cheap clones of the same data.

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::debug;

mod catalog;
mod source;

pub use catalog::{Catalog, Topic, TopicData};
pub use source::{WordBankCache, WordBankSource};

/// Read-only query surface over a loaded catalog
#[derive(Debug, Clone)]
pub struct WordBank {
    catalog: Arc<Catalog>,
    topics: Arc<[Topic]>,
}

impl WordBank {
    pub fn from_catalog(catalog: Arc<Catalog>) -> Self {
        let topics = catalog.topic_list().into();
        Self { catalog, topics }
    }

    /// Parse a document directly, bypassing any cache
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(Self::from_catalog(Arc::new(Catalog::parse(text)?)))
    }

    /// Topics in catalog order
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn first_topic(&self) -> Option<&Topic> {
        self.topics.first()
    }

    pub fn contains_topic(&self, topic_id: &str) -> bool {
        self.catalog.topics.contains_key(topic_id)
    }

    /// Words of a topic; empty for unknown ids
    pub fn words_for_topic(&self, topic_id: &str) -> &[String] {
        self.catalog
            .topics
            .get(topic_id)
            .map(|data| data.words.as_slice())
            .unwrap_or(&[])
    }

    /// Draw a word using the thread-local RNG
    pub fn select_word_from_topic(&self, topic_id: &str, last_word: Option<&str>) -> String {
        self.select_word_with_rng(topic_id, last_word, &mut rand::thread_rng())
    }

    /// Draw a word uniformly from the topic
    ///
    /// With more than one word in the topic, every occurrence of `last_word`
    /// is excluded first. Unknown or empty topics yield an empty string.
    pub fn select_word_with_rng<R: Rng + ?Sized>(
        &self,
        topic_id: &str,
        last_word: Option<&str>,
        rng: &mut R,
    ) -> String {
        let words = self.words_for_topic(topic_id);
        if words.is_empty() {
            debug!(topic = %topic_id, "No words to draw from");
            return String::new();
        }

        let mut pool: Vec<&String> = match last_word {
            Some(last) if !last.is_empty() && words.len() > 1 => {
                words.iter().filter(|w| w.as_str() != last).collect()
            }
            _ => Vec::new(),
        };
        // Nothing excluded, or every entry was the last word
        if pool.is_empty() {
            pool = words.iter().collect();
        }

        pool.choose(rng).map(|w| (*w).clone()).unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn shares_catalog_with(&self, other: &WordBank) -> bool {
        Arc::ptr_eq(&self.catalog, &other.catalog)
    }
}
