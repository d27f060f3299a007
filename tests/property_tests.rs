//! Property-based tests using proptest

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use topicscope::projection::params::{iteration_budget, neighbor_count, perplexity};
use topicscope::text::ngrams::rank_ngrams;
use topicscope::text::normalize::{strip_diacritics, Normalizer};
use topicscope::topics::ablation::ablate;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_strip_diacritics_is_idempotent(text in "[a-zA-Z0-9áéíóúüñÁÉÍÓÚÜÑçàèô ,.]{0,40}") {
        let once = strip_diacritics(&text).unwrap();
        prop_assert_eq!(strip_diacritics(&once).unwrap(), once.clone());
        prop_assert!(once.is_ascii());
    }

    #[test]
    fn test_normalized_text_has_no_digits_or_punctuation(
        texts in prop::collection::vec("[a-zA-Z0-9áéíóúñ ,.!?¿¡'()-]{0,60}", 1..6)
    ) {
        let normalizer = Normalizer::new("spanish", false).unwrap();
        let corpus = normalizer.normalize(&texts).unwrap();
        prop_assert_eq!(corpus.documents.len(), texts.len());
        for doc in &corpus.documents {
            prop_assert!(!doc.cleaned.chars().any(|c| c.is_ascii_digit() || c.is_ascii_punctuation()));
            prop_assert!(doc.tokens.iter().all(|t| t.chars().count() > 2));
        }
    }

    #[test]
    fn test_ngram_ranking_is_sorted_and_bounded(
        tokens in prop::collection::vec("[a-d]", 1..40),
        n in 1usize..4,
        k in 1usize..8
    ) {
        let record = rank_ngrams(&tokens, n, k).unwrap();
        prop_assert!(record.ranked.len() <= k);
        let counts = record.counts();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        let windows = tokens.len().saturating_sub(n - 1);
        prop_assert!(counts.iter().sum::<usize>() <= windows);
        prop_assert!(record.ranked.iter().all(|(gram, _)| gram.len() == n));
    }

    #[test]
    fn test_ablation_invariants(
        per_topic in prop::collection::btree_map(
            0i64..8,
            prop::collection::vec("[a-f]{1,2}", 0..6),
            0..6
        )
    ) {
        let result = ablate(&per_topic);

        // Duplicates are exactly the words seen in two or more topics
        let mut topics_by_word: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
        for (id, words) in &per_topic {
            for w in words {
                topics_by_word.entry(w.as_str()).or_default().insert(*id);
            }
        }
        let expected: BTreeSet<String> = topics_by_word
            .iter()
            .filter(|(_, ids)| ids.len() >= 2)
            .map(|(w, _)| w.to_string())
            .collect();
        prop_assert_eq!(&result.duplicates, &expected);

        // Exclusive lists are subsequences of the originals with no shared words
        let mut owner: BTreeMap<&str, i64> = BTreeMap::new();
        for (id, words) in &result.exclusive {
            let original = &per_topic[id];
            let mut cursor = original.iter();
            for w in words {
                prop_assert!(cursor.any(|o| o == w));
                prop_assert!(!result.duplicates.contains(w));
                if let Some(other) = owner.insert(w.as_str(), *id) {
                    prop_assert_eq!(other, *id);
                }
            }
        }

        // Ablating again changes nothing
        let again = ablate(&result.exclusive);
        prop_assert!(again.duplicates.is_empty());
        prop_assert_eq!(again.exclusive, result.exclusive);
    }

    #[test]
    fn test_projection_neighborhood_below_sample_count(n in 3usize..100_000) {
        let k = neighbor_count(n).unwrap();
        let p = perplexity(n).unwrap();
        prop_assert!(k < n && k <= 50);
        prop_assert!(p < n && p >= 2 && p <= 50);
        prop_assert!(iteration_budget(n).unwrap() >= 750);
    }
}
