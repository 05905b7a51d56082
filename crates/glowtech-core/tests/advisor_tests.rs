//! End-to-end advisor behaviour: classification, knowledge lookup, and
//! catalog delegation wired together from config.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use glowtech_config::UnknownCombinationPolicy;
use glowtech_core::advisor::{NO_PRODUCTS_REPLY, UNCLASSIFIED_REPLY};
use glowtech_core::{
    Advisor, AdvisorError, KnowledgeBase, Product, QueryClassification, QueryClassifier,
};
use glowtech_test_utils::{ScriptedSearch, SearchCall, TestConfigBuilder, TestKnowledgeFile};

fn advisor_with(search: &ScriptedSearch) -> Advisor {
    Advisor::new(
        QueryClassifier::default(),
        KnowledgeBase::builtin(),
        Box::new(search.clone()),
    )
}

fn catalog_products() -> Vec<Product> {
    vec![
        Product::new("CeraVe", "Hydrating Cleanser"),
        Product::new("Somethinc", "Niacinamide + Moisture Beet Serum"),
        Product::new("The Ordinary", "Niacinamide 10% + Zinc 1%"),
    ]
}

#[test_log::test(tokio::test)]
async fn compatibility_question_does_not_search() {
    let search = ScriptedSearch::returning(catalog_products());
    let advisor = advisor_with(&search);

    let reply = advisor
        .handle_message("Can I use niacinamide with vitamin c?")
        .await;

    assert!(reply.contains("Compatible"));
    assert!(reply.contains("NIACINAMIDE + VITAMIN C"));
    assert!(search.calls().is_empty());
}

#[test_log::test(tokio::test)]
async fn brand_query_searches_by_brand_and_keeps_order() {
    let search = ScriptedSearch::returning(catalog_products());
    let advisor = advisor_with(&search);

    let reply = advisor.handle_message("does cerave have a good cleanser").await;

    assert_eq!(search.calls(), vec![SearchCall::Brand("cerave".to_string())]);
    assert_eq!(
        reply,
        "1. CeraVe - Hydrating Cleanser\n\
         2. Somethinc - Niacinamide + Moisture Beet Serum\n\
         3. The Ordinary - Niacinamide 10% + Zinc 1%"
    );
}

#[test_log::test(tokio::test)]
async fn ingredient_takes_priority_over_brand() {
    let search = ScriptedSearch::returning(catalog_products());
    let advisor = advisor_with(&search);

    advisor
        .handle_message("Is the Ordinary niacinamide any good?")
        .await;

    assert_eq!(
        search.calls(),
        vec![SearchCall::Ingredient("niacinamide".to_string())]
    );
}

#[test_log::test(tokio::test)]
async fn single_ingredient_with_trigger_becomes_product_query() {
    let search = ScriptedSearch::empty();
    let advisor = advisor_with(&search);

    let classification = advisor.classify("can I use niacinamide daily");
    assert_eq!(
        classification,
        QueryClassification::Product {
            ingredient: Some("niacinamide".to_string()),
            brand: None,
        }
    );

    let reply = advisor.handle_message("can I use niacinamide daily").await;
    assert_eq!(reply, NO_PRODUCTS_REPLY);
    assert_eq!(
        search.calls(),
        vec![SearchCall::Ingredient("niacinamide".to_string())]
    );
}

#[test_log::test(tokio::test)]
async fn catalog_failure_is_reported_as_no_products() {
    let search = ScriptedSearch::failing();
    let advisor = advisor_with(&search);

    let reply = advisor.handle_message("somethinc retinol").await;

    assert_eq!(reply, NO_PRODUCTS_REPLY);
    assert_eq!(search.calls().len(), 1);
}

#[test_log::test(tokio::test)]
async fn unrelated_message_gets_fallback() {
    let search = ScriptedSearch::returning(catalog_products());
    let advisor = advisor_with(&search);

    let reply = advisor.handle_message("what's the weather today").await;

    assert_eq!(reply, UNCLASSIFIED_REPLY);
    assert!(search.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn replies_are_stable_across_calls() {
    glowtech_test_utils::tracing_setup::init_test_tracing();
    let search = ScriptedSearch::returning(catalog_products());
    let advisor = Arc::new(advisor_with(&search));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let advisor = Arc::clone(&advisor);
        handles.push(tokio::spawn(async move {
            advisor.handle_message("cerave products with retinol").await
        }));
    }

    let mut replies = Vec::new();
    for handle in handles {
        replies.push(handle.await.unwrap());
    }
    assert!(replies.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(search.calls().len(), 8);
}

#[test_log::test(tokio::test)]
async fn config_extends_vocabulary_and_catalog() {
    let config = TestConfigBuilder::new()
        .add_brand("skintific")
        .product(
            "Skintific",
            "5X Ceramide Barrier Moisturize Gel",
            &["ceramides"],
        )
        .build();
    let advisor = Advisor::from_config(&config).await.unwrap();

    let reply = advisor.handle_message("Skintific moisturizer?").await;

    assert_eq!(reply, "1. Skintific - 5X Ceramide Barrier Moisturize Gel");
}

#[test_log::test(tokio::test)]
async fn config_max_results_limits_listing() {
    let config = TestConfigBuilder::new().max_results(1).build();
    let advisor = Advisor::from_config(&config).await.unwrap();

    let reply = advisor.handle_message("the ordinary").await;

    assert_eq!(reply, "1. The Ordinary - Niacinamide 10% + Zinc 1%");
}

const CUSTOM_KNOWLEDGE: &str = r#"
[ingredients.aha]
benefits = ["Exfoliates"]
suitable_for = "Normal to oily skin"
concentration = "5-10%"
when_to_use = "Evening"

[ingredients.aha.compatibility]
avoid_with = ["retinol"]

[ingredients.retinol]
benefits = ["Cell turnover"]
suitable_for = "Most skin types"
concentration = "0.25-1%"
when_to_use = "Evening"

[ingredients.retinol.compatibility]
avoid_with = ["aha"]

[combinations."aha + retinol"]
compatible = false
explanation = "Both exfoliate; together they over-strip the skin barrier."
how_to_use = "Alternate nights."
benefits = "Smoother texture when alternated"
"#;

#[test_log::test(tokio::test)]
async fn knowledge_file_replaces_builtin_data() {
    let file = TestKnowledgeFile::with_toml(CUSTOM_KNOWLEDGE).await;
    let config = TestConfigBuilder::new()
        .add_ingredient("aha")
        .knowledge_path(&file.path)
        .build();
    let advisor = Advisor::from_config(&config).await.unwrap();

    let reply = advisor.handle_message("Can I use AHA with retinol?").await;
    assert!(reply.contains("AHA + RETINOL"));
    assert!(reply.contains("Not Recommended"));

    // The built-in pair is gone with the replaced knowledge base.
    let reply = advisor
        .handle_message("Can I use niacinamide with vitamin c?")
        .await;
    assert_eq!(reply, UNCLASSIFIED_REPLY);
}

#[test_log::test(tokio::test)]
async fn acknowledge_policy_from_config() {
    let file = TestKnowledgeFile::with_toml(CUSTOM_KNOWLEDGE).await;
    let config = TestConfigBuilder::new()
        .knowledge_path(&file.path)
        .unknown_combination(UnknownCombinationPolicy::Acknowledge)
        .build();
    let advisor = Advisor::from_config(&config).await.unwrap();

    let reply = advisor
        .handle_message("niacinamide together with vitamin c?")
        .await;
    assert_eq!(
        reply,
        "I don't have compatibility information for NIACINAMIDE + VITAMIN C yet."
    );
}

#[test_log::test(tokio::test)]
async fn invalid_knowledge_file_is_rejected() {
    let file = TestKnowledgeFile::with_toml(&CUSTOM_KNOWLEDGE.replace(
        "[ingredients.aha.compatibility]\navoid_with = [\"retinol\"]",
        "[ingredients.aha.compatibility]\navoid_with = [\"retinol\"]\ngood_with = [\"retinol\"]",
    ))
    .await;
    let config = TestConfigBuilder::new().knowledge_path(&file.path).build();

    let result = Advisor::from_config(&config).await;
    assert!(matches!(result, Err(AdvisorError::Knowledge(_))));
}

#[test]
fn every_builtin_key_round_trips() {
    let kb = KnowledgeBase::builtin();
    for (key, _) in kb.combinations() {
        let mut parts: Vec<&str> = key.as_str().split(" + ").collect();
        parts.sort();
        assert_eq!(parts.join(" + "), key.as_str());
        assert!(kb.combination(key.as_str()).is_some());
    }
}
