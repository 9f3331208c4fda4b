//! Property-based tests for rust_logger_facade using proptest

use proptest::prelude::*;
use rust_logger_facade::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::Fatal),
    ]
}

fn constant_extractor(fields: Fields) -> Arc<dyn FieldExtractor> {
    Arc::new(move |_: &Context| -> Option<Fields> { Some(fields.clone()) })
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Enabled matches the numeric ordering of levels
    #[test]
    fn test_enabled_matches_numeric_order(threshold in any_level(), candidate in any_level()) {
        prop_assert_eq!(
            threshold.enabled(candidate),
            candidate as u8 >= threshold as u8
        );
    }

    /// Canonical names parse back to the same level
    #[test]
    fn test_level_name_roundtrip(level in any_level()) {
        prop_assert_eq!(Level::parse(level.as_str()), level);
        prop_assert_eq!(Level::parse(&level.to_string().to_uppercase()), level);
    }

    /// Parsing never fails and unknown names become Info
    #[test]
    fn test_parse_fails_open(s in "[a-z]{0,12}") {
        let level = Level::parse(&s);
        let known = ["debug", "info", "warn", "warning", "error", "fatal"];
        if !known.contains(&s.as_str()) {
            prop_assert_eq!(level, Level::Info);
        }
    }

    /// Numeric decode agrees with the enum discriminants
    #[test]
    fn test_from_u8(value in any::<u8>()) {
        let level = Level::from_u8(value);
        if value <= 4 {
            prop_assert_eq!(level as u8, value);
        } else {
            prop_assert_eq!(level, Level::Info);
        }
    }
}

// ============================================================================
// Extraction Tests
// ============================================================================

proptest! {
    /// Merging keeps every key and the last extractor's value per key
    #[test]
    fn test_extraction_last_write_wins(
        maps in prop::collection::vec(
            prop::collection::hash_map("[a-c]", 0i64..100, 0..3),
            1..5,
        )
    ) {
        let extractors: Vec<_> = maps
            .iter()
            .map(|m| {
                let fields: Fields = m
                    .iter()
                    .map(|(k, v)| (k.clone(), FieldValue::Int(*v)))
                    .collect();
                constant_extractor(fields)
            })
            .collect();

        let merged = extract_fields(&Context::new(), &extractors);

        let mut expected = Fields::new();
        for m in &maps {
            for (k, v) in m {
                expected.insert(k.clone(), FieldValue::Int(*v));
            }
        }
        prop_assert_eq!(merged, expected);
    }

    /// Extraction is deterministic and the empty list means the defaults
    #[test]
    fn test_default_fallback(request in "[a-z0-9]{0,8}", user in "[a-z0-9]{0,8}") {
        let ctx = Context::new().with_request_id(request.clone()).with_user_id(user.clone());

        let fallback = extract_fields(&ctx, &[]);
        prop_assert_eq!(&fallback, &extract_fields(&ctx, &default_extractors()));
        prop_assert_eq!(fallback.contains_key("request_id"), !request.is_empty());
        prop_assert_eq!(fallback.contains_key("user_id"), !user.is_empty());
        prop_assert!(!fallback.contains_key("trace_id"));
    }

    /// A child context never changes what its parent reports
    #[test]
    fn test_context_parent_unchanged(parent_id in "[a-z]{1,8}", child_id in "[a-z]{1,8}") {
        let parent = Context::new().with_trace_id(parent_id.clone());
        let child = parent.with_trace_id(child_id.clone());

        prop_assert_eq!(parent.trace_id(), parent_id.as_str());
        prop_assert_eq!(child.trace_id(), child_id.as_str());
    }
}
