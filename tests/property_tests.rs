use dupesweep::resolve::{parse_command, GroupCommand};
use dupesweep::scanner::{hash_bytes, Hasher};
use proptest::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

proptest! {
    /// Files with identical byte content always produce equal digests,
    /// whether streamed from disk or hashed in memory.
    #[test]
    fn prop_identical_content_equal_digests(content in proptest::collection::vec(any::<u8>(), 0..8192)) {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        File::create(&a).unwrap().write_all(&content).unwrap();
        File::create(&b).unwrap().write_all(&content).unwrap();

        let hasher = Hasher::new();
        let digest_a = hasher.hash_file(&a).unwrap();
        let digest_b = hasher.hash_file(&b).unwrap();

        prop_assert_eq!(digest_a, digest_b);
        prop_assert_eq!(digest_a, hash_bytes(&content));
    }

    /// Differing content produces differing digests.
    #[test]
    fn prop_different_content_different_digests(
        a in proptest::collection::vec(any::<u8>(), 0..4096),
        b in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(hash_bytes(&a), hash_bytes(&b));
    }

    /// Parsed index commands never contain an index outside the group, and
    /// never contain repeats.
    #[test]
    fn prop_parsed_indices_in_bounds(
        indices in proptest::collection::vec(0usize..200, 1..10),
        group_len in 1usize..200,
    ) {
        let line = indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        match parse_command(&line, group_len) {
            Ok(GroupCommand::Indices(parsed)) => {
                for index in &parsed {
                    prop_assert!(*index < group_len);
                }
                let mut deduped = parsed.clone();
                deduped.sort_unstable();
                deduped.dedup();
                prop_assert_eq!(deduped.len(), parsed.len());
            }
            Ok(other) => prop_assert!(false, "unexpected command {:?}", other),
            Err(_) => {
                // Rejection is only allowed when some index was out of range.
                prop_assert!(indices.iter().any(|i| *i >= group_len));
            }
        }
    }

    /// Word commands are case-insensitive however they are capitalized.
    #[test]
    fn prop_word_tokens_case_insensitive(upper_mask in proptest::collection::vec(any::<bool>(), 4)) {
        let mix = |word: &str| -> String {
            word.chars()
                .zip(upper_mask.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect()
        };

        prop_assert_eq!(parse_command(&mix("skip"), 5).unwrap(), GroupCommand::Skip);
        prop_assert_eq!(parse_command(&mix("all"), 5).unwrap(), GroupCommand::AllButFirst);
    }
}
