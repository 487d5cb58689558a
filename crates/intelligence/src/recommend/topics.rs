//! Hand-curated topic adjacency used for the related-topic signal.
//!
//! The table is keyed by the current article's topic and is deliberately not
//! symmetric: `Healthcare` lists `Lifestyle`, but `General` is only reachable
//! from the finance/legal cluster and `Lifestyle`.

/// Topic → topics considered related to it.
const RELATED_TOPICS: &[(&str, &[&str])] = &[
    ("Legal", &["Finance", "Investment", "General"]),
    ("Finance", &["Legal", "Investment", "General"]),
    ("Investment", &["Legal", "Finance", "General"]),
    ("Lifestyle", &["Healthcare", "Education", "General"]),
    ("Healthcare", &["Lifestyle", "Education"]),
    ("Education", &["Lifestyle", "Healthcare"]),
    ("General", &["Legal", "Finance", "Investment", "Lifestyle"]),
];

/// Topics related to `topic`. Unknown topics have none.
pub fn related_topics(topic: &str) -> &'static [&'static str] {
    RELATED_TOPICS
        .iter()
        .find(|(key, _)| *key == topic)
        .map(|(_, related)| *related)
        .unwrap_or(&[])
}

/// Returns true when `candidate` appears in the adjacency list of `current`.
///
/// A topic is never related to itself; exact matches are scored separately.
pub fn is_related_topic(current: &str, candidate: &str) -> bool {
    related_topics(current).contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_adjacency() {
        assert!(is_related_topic("Legal", "Finance"));
        assert!(is_related_topic("Lifestyle", "Education"));
        assert!(is_related_topic("General", "Lifestyle"));
    }

    #[test]
    fn test_table_is_asymmetric() {
        // Healthcare does not list General, but Lifestyle does.
        assert!(!is_related_topic("Healthcare", "General"));
        assert!(is_related_topic("Lifestyle", "General"));
        // General lists Legal, and Legal lists General.
        assert!(is_related_topic("General", "Legal"));
        // Education is not reachable from General.
        assert!(!is_related_topic("General", "Education"));
        assert!(is_related_topic("Education", "Lifestyle"));
    }

    #[test]
    fn test_not_reflexive() {
        for (topic, _) in RELATED_TOPICS {
            assert!(!is_related_topic(topic, topic), "{topic} relates to itself");
        }
    }

    #[test]
    fn test_unknown_topic_has_no_relations() {
        assert!(related_topics("Golf").is_empty());
        assert!(!is_related_topic("Golf", "Lifestyle"));
        // Matching is exact and case-sensitive.
        assert!(!is_related_topic("legal", "Finance"));
    }
}
