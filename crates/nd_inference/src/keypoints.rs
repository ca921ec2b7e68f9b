use crate::config::EngineConfig;
use crate::text;

/// A candidate sentence and its keyword score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    pub sentence: String,
    pub score: usize,
}

/// Ranks source sentences by how many summary words and signal words they
/// contain and returns the best few, highest score first.
pub fn extract_key_points(text: &str, summary: &str, config: &EngineConfig) -> Vec<String> {
    let mut scored = score_sentences(text, summary, config);
    // stable: equal scores keep document order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
        .into_iter()
        .take(config.max_key_points)
        .filter(|s| s.score > 0)
        .map(|s| s.sentence)
        .collect()
}

pub fn score_sentences(text: &str, summary: &str, config: &EngineConfig) -> Vec<ScoredSentence> {
    let summary_words = text::significant_words(summary);
    let signal_words: Vec<String> = config.signal_words.iter().map(|w| w.to_lowercase()).collect();

    text::split_sentences(text, config.min_key_point_chars)
        .into_iter()
        .map(|sentence| {
            let lower = sentence.to_lowercase();
            let hits = |words: &[String]| words.iter().filter(|w| lower.contains(w.as_str())).count();
            ScoredSentence {
                sentence: sentence.to_string(),
                score: hits(&summary_words) + hits(&signal_words),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The economy grew significantly. A new policy was announced today. \
        Officials are reviewing budget details. This is a routine update.";
    const SUMMARY: &str = "The economy grew significantly. A new policy was announced today.";

    #[test]
    fn test_announced_sentence_ranks_first() {
        let config = EngineConfig::default();
        let points = extract_key_points(ARTICLE, SUMMARY, &config);
        assert_eq!(
            points,
            vec!["A new policy was announced today", "The economy grew significantly"]
        );
    }

    #[test]
    fn test_scores() {
        let scored = score_sentences(ARTICLE, SUMMARY, &EngineConfig::default());
        let scores: Vec<usize> = scored.iter().map(|s| s.score).collect();
        // policy, announced, today + signal words announced, new
        assert_eq!(scores, vec![4, 5, 0, 0]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let text = "Revenue reached one million dollars in March. Costs rose by two million dollars in April.";
        let points = extract_key_points(text, "", &EngineConfig::default());
        assert_eq!(
            points,
            vec![
                "Revenue reached one million dollars in March",
                "Costs rose by two million dollars in April"
            ]
        );
    }

    #[test]
    fn test_keyword_counts_once_per_sentence() {
        let scored = score_sentences("million million million million dollars", "", &EngineConfig::default());
        assert_eq!(scored[0].score, 1);
    }

    #[test]
    fn test_at_most_four_points() {
        let text = (1..=6)
            .map(|i| format!("Company {} announced record quarterly results", i))
            .collect::<Vec<_>>()
            .join(". ");
        let points = extract_key_points(&text, "", &EngineConfig::default());
        assert_eq!(points.len(), 4);
        assert!(points[0].starts_with("Company 1"));
    }

    #[test]
    fn test_short_fragments_are_ignored() {
        assert!(extract_key_points("New record. Big news.", "record", &EngineConfig::default()).is_empty());
        assert!(extract_key_points("", "", &EngineConfig::default()).is_empty());
    }
}
