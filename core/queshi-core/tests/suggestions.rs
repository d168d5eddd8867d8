use std::path::PathBuf;

use proptest::prelude::*;

use queshi_core::{load, Catalog, Recipe, TagSet, Vocabulary, DEFAULT_SUGGESTION_LIMIT};

fn fixture_vocabulary() -> Vocabulary {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dishes.json");
    Vocabulary::build(&load(Some(path.as_path())).expect("load fixture").catalog)
}

#[test]
fn vocabulary_is_sorted_and_distinct() {
    let vocab = fixture_vocabulary();
    assert_eq!(
        vocab.tags(),
        &["下酒", "下饭", "凉爽", "家常", "招牌", "清淡", "烧烤", "甜", "辣"]
    );
}

#[test]
fn string_and_list_tags_merge() {
    let catalog = Catalog::new(vec![
        Recipe::new("a", Some(TagSet::from_text("辣,下饭"))),
        Recipe::new("b", Some(TagSet::from_items(["下饭", "家常"]))),
    ]);
    assert_eq!(Vocabulary::build(&catalog).tags(), &["下饭", "家常", "辣"]);
}

#[test]
fn empty_query_shows_first_entries() {
    let vocab = fixture_vocabulary();
    assert_eq!(vocab.suggest("", 3), vec!["下酒", "下饭", "凉爽"]);
    assert_eq!(vocab.suggest("", DEFAULT_SUGGESTION_LIMIT).len(), 9);
}

#[test]
fn substring_anywhere_in_tag_matches() {
    let vocab = fixture_vocabulary();
    assert_eq!(vocab.suggest("下", 10), vec!["下酒", "下饭"]);
    assert_eq!(vocab.suggest("饭", 10), vec!["下饭"]);
    assert!(vocab.suggest("xyz_not_present", 10).is_empty());
}

#[test]
fn vocabulary_serializes_as_plain_array() {
    let vocab = Vocabulary::build(&Catalog::new(vec![Recipe::new(
        "a",
        Some(TagSet::from_items(["y", "x"])),
    )]));
    assert_eq!(serde_json::to_string(&vocab).unwrap(), r#"["x","y"]"#);
}

proptest! {
    #[test]
    fn suggestions_respect_limit_and_order(
        tags in prop::collection::vec("[a-zA-Z]{1,6}", 0..30),
        query in "[a-zA-Z]{0,2}",
        limit in 0usize..15,
    ) {
        let catalog = Catalog::new(vec![Recipe::new("all", Some(TagSet::from_items(&tags)))]);
        let vocab = Vocabulary::build(&catalog);
        let suggestions = vocab.suggest(&query, limit);

        prop_assert!(suggestions.len() <= limit);
        let needle = query.to_lowercase();
        for s in &suggestions {
            prop_assert!(s.to_lowercase().contains(&needle));
        }
        prop_assert!(suggestions.windows(2).all(|w| w[0] < w[1]));

        let expected: Vec<&str> = vocab
            .tags()
            .iter()
            .map(String::as_str)
            .filter(|t| t.to_lowercase().contains(&needle))
            .take(limit)
            .collect();
        prop_assert_eq!(suggestions, expected);
    }
}
