//! Parsed word bank document

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Topic as shown to the player picking one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
}

/// One topic entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicData {
    pub title: String,
    /// Kept verbatim: duplicates and order survive parsing
    #[serde(default)]
    pub words: Vec<String>,
}

/// Whole word bank, topics in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub topics: IndexMap<String, TopicData>,
}

impl Catalog {
    /// Parse a YAML (or JSON) document of the form
    /// `{topics: {<id>: {title, words: [...]}}}`
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse word bank document")
    }

    /// `{id, title}` pairs in document order
    pub fn topic_list(&self) -> Vec<Topic> {
        self.topics
            .iter()
            .map(|(id, data)| Topic {
                id: id.clone(),
                title: data.title.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
topics:
  transportation:
    title: "Medios de transporte"
    words:
      - "coche"
      - "bicicleta"
  daily-life:
    title: "Objetos de la vida diaria"
    words: ["mesa", "silla", "mesa"]
  empty:
    title: "Nada"
"#;

    #[test]
    fn test_parse_yaml_keeps_document_order() {
        let catalog = Catalog::parse(YAML).unwrap();
        let ids: Vec<_> = catalog.topic_list().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["transportation", "daily-life", "empty"]);
    }

    #[test]
    fn test_parse_keeps_duplicate_words() {
        let catalog = Catalog::parse(YAML).unwrap();
        assert_eq!(catalog.topics["daily-life"].words, vec!["mesa", "silla", "mesa"]);
    }

    #[test]
    fn test_parse_missing_words_defaults_to_empty() {
        let catalog = Catalog::parse(YAML).unwrap();
        assert!(catalog.topics["empty"].words.is_empty());
        assert_eq!(catalog.topics["empty"].title, "Nada");
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{"topics": {"food": {"title": "Comida", "words": ["pan", "manzana"]}}}"#;
        let catalog = Catalog::parse(json).unwrap();
        assert_eq!(
            catalog.topic_list(),
            vec![Topic { id: "food".to_string(), title: "Comida".to_string() }]
        );
        assert_eq!(catalog.topics["food"].words, vec!["pan", "manzana"]);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(Catalog::parse("words: [a, b]").is_err());
        assert!(Catalog::parse("topics: [a, b]").is_err());
    }
}
