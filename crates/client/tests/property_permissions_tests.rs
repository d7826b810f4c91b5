//! Property-based tests for permission normalisation and page math.
//!
//! # Test Coverage
//! - Stripping the `bu:{uuid}:` prefix recovers the bare slug
//! - Normalisation is idempotent, duplicate-free and never yields empty slugs
//! - Prefixes with a non-UUID middle segment are left alone
//! - `Page::total_pages` equals `ceil(total / page_size)` and is at least 1

use proptest::prelude::*;
use provisio_client::Page;
use provisio_client::permissions::{
    normalize_permissions, normalize_slug, strip_business_unit_prefix,
};
use uuid::Uuid;

/// Strategy for `resource:action` slugs.
fn slug_strategy() -> impl Strategy<Value = String> {
    let resource = prop_oneof![
        Just("deployments"),
        Just("plugins"),
        Just("roles"),
        Just("audit"),
        Just("cost"),
    ];
    let action = "[a-z]{3,10}";
    (resource, action).prop_map(|(r, a)| format!("{}:{}", r, a))
}

/// Strategy for slugs as users type them: random case, padding, optional prefix.
fn raw_slug_strategy() -> impl Strategy<Value = String> {
    (
        slug_strategy(),
        any::<bool>(),
        any::<bool>(),
        any::<[u8; 16]>(),
    )
        .prop_map(|(slug, upper, prefixed, bytes)| {
            let slug = if upper { slug.to_uppercase() } else { slug };
            if prefixed {
                format!(" bu:{}:{} ", Uuid::from_bytes(bytes), slug)
            } else {
                slug
            }
        })
}

proptest! {
    #[test]
    fn prop_prefix_strip_recovers_slug(slug in slug_strategy(), bytes in any::<[u8; 16]>()) {
        let prefixed = format!("bu:{}:{}", Uuid::from_bytes(bytes), slug);
        prop_assert_eq!(strip_business_unit_prefix(&prefixed), slug.as_str());
    }

    #[test]
    fn prop_non_uuid_prefix_is_kept(slug in slug_strategy(), junk in "[g-z]{4,12}") {
        let prefixed = format!("bu:{}:{}", junk, slug);
        prop_assert_eq!(strip_business_unit_prefix(&prefixed), prefixed.as_str());
    }

    #[test]
    fn prop_normalize_is_idempotent(raw in prop::collection::vec(raw_slug_strategy(), 0..20)) {
        let once = normalize_permissions(&raw);
        let twice = normalize_permissions(&once);
        prop_assert_eq!(&once, &twice);

        for slug in &once {
            prop_assert!(!slug.is_empty());
            prop_assert!(!slug.starts_with("bu:"));
            prop_assert_eq!(slug, &slug.to_lowercase());
        }
    }

    #[test]
    fn prop_normalize_dedupes_preserving_first_seen(
        raw in prop::collection::vec(raw_slug_strategy(), 1..20)
    ) {
        let normalized = normalize_permissions(&raw);

        let mut expected: Vec<String> = Vec::new();
        for slug in raw.iter().map(|s| normalize_slug(s)) {
            if !expected.contains(&slug) {
                expected.push(slug);
            }
        }
        prop_assert_eq!(normalized, expected);
    }

    #[test]
    fn prop_total_pages_is_ceiling(total in 0u64..10_000, page_size in 1u32..=100) {
        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "items": [],
            "total": total,
            "page": 1,
            "page_size": page_size
        }))
        .unwrap();

        let expected = total.div_ceil(u64::from(page_size)).max(1);
        prop_assert_eq!(u64::from(page.total_pages()), expected);
        prop_assert_eq!(page.has_next(), expected > 1);
    }
}
