//! Built-in reference data.

use std::collections::{BTreeMap, BTreeSet};

use super::{Combination, CombinationKey, CompatibilityProfile, Ingredient, KnowledgeBase};

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ingredients() -> BTreeMap<String, Ingredient> {
    let mut map = BTreeMap::new();

    map.insert(
        "niacinamide".to_string(),
        Ingredient {
            benefits: texts(&[
                "Reduces pore appearance",
                "Controls oil production",
                "Brightens skin tone",
                "Anti-inflammatory",
            ]),
            suitable_for: "All skin types, especially oily and acne-prone".to_string(),
            concentration: "5-10% is most effective".to_string(),
            ph_range: Some("5.0-7.0".to_string()),
            when_to_use: "Morning or evening".to_string(),
            compatibility: CompatibilityProfile {
                good_with: names(&[
                    "hyaluronic acid",
                    "ceramides",
                    "peptides",
                    "retinol",
                    "vitamin c",
                ]),
                avoid_with: names(&["high ph products"]),
                notes: "Can be used with Vitamin C - the myth about incompatibility has been debunked!"
                    .to_string(),
            },
        },
    );

    map.insert(
        "vitamin c".to_string(),
        Ingredient {
            benefits: texts(&[
                "Antioxidant protection",
                "Brightening",
                "Collagen synthesis",
                "Anti-aging",
            ]),
            suitable_for: "Most skin types".to_string(),
            concentration: "10-20% L-ascorbic acid".to_string(),
            ph_range: Some("3.0-4.0".to_string()),
            when_to_use: "Morning (with sunscreen)".to_string(),
            compatibility: CompatibilityProfile {
                good_with: names(&[
                    "vitamin e",
                    "ferulic acid",
                    "niacinamide",
                    "hyaluronic acid",
                ]),
                avoid_with: names(&["retinol", "benzoyl peroxide"]),
                notes: "Works great with niacinamide despite old myths! Keep retinol for a separate routine."
                    .to_string(),
            },
        },
    );

    map.insert(
        "retinol".to_string(),
        Ingredient {
            benefits: texts(&[
                "Speeds up cell turnover",
                "Softens fine lines",
                "Unclogs pores",
                "Evens texture",
            ]),
            suitable_for: "Most skin types; start slowly on sensitive skin".to_string(),
            concentration: "0.25-1% (start low)".to_string(),
            ph_range: None,
            when_to_use: "Evening only (always wear sunscreen the next day)".to_string(),
            compatibility: CompatibilityProfile {
                good_with: names(&["niacinamide", "hyaluronic acid", "ceramides", "peptides"]),
                avoid_with: names(&["vitamin c", "benzoyl peroxide", "aha", "bha"]),
                notes: "Buffer with a moisturizer if irritation appears.".to_string(),
            },
        },
    );

    map
}

fn combinations() -> BTreeMap<CombinationKey, Combination> {
    let entries = [
        (
            ["niacinamide", "vitamin c"],
            Combination {
                compatible: true,
                explanation: "MYTH BUSTED! Niacinamide and Vitamin C CAN be used together. \
                              Modern formulations are stable and the two brighten skin through \
                              different pathways."
                    .to_string(),
                how_to_use: "Apply Vitamin C first, then niacinamide.".to_string(),
                benefits: "Brightening, pore reduction, antioxidant protection".to_string(),
            },
        ),
        (
            ["retinol", "niacinamide"],
            Combination {
                compatible: true,
                explanation: "Niacinamide can help reduce retinol irritation.".to_string(),
                how_to_use: "Use retinol at night, niacinamide can be used any time.".to_string(),
                benefits: "Anti-aging with less irritation".to_string(),
            },
        ),
        (
            ["retinol", "vitamin c"],
            Combination {
                compatible: false,
                explanation: "Both are potent actives that work best at different pH levels; \
                              layering them in one routine raises the risk of irritation."
                    .to_string(),
                how_to_use: "Use Vitamin C in the morning and retinol at night.".to_string(),
                benefits: "Round-the-clock antioxidant and anti-aging care when split AM/PM"
                    .to_string(),
            },
        ),
    ];

    entries
        .into_iter()
        .map(|(members, combination)| (CombinationKey::from_names(members), combination))
        .collect()
}

pub(super) fn reference_data() -> KnowledgeBase {
    KnowledgeBase {
        ingredients: ingredients(),
        combinations: combinations(),
    }
}
