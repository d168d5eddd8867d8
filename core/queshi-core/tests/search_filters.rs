use std::path::PathBuf;

use proptest::prelude::*;
use regex::Regex;

use queshi_core::search::filter_cached;
use queshi_core::{
    filter_catalog, load, search_by_tag, Catalog, Query, Recipe, SearchOptions, TagSet,
};

fn fixture_catalog() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dishes.json");
    load(Some(path.as_path())).expect("load fixture").catalog
}

fn names<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
    recipes.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn finds_tag_across_string_and_list_sources() {
    let catalog = fixture_catalog();
    assert_eq!(
        names(&search_by_tag(&catalog, "下饭")),
        vec!["油炸豆腐", "麻婆豆腐", "地狱辣炒饭"]
    );
}

#[test]
fn surrounding_whitespace_in_query_is_ignored() {
    let catalog = fixture_catalog();
    assert_eq!(names(&search_by_tag(&catalog, "  辣 ")), vec!["麻婆豆腐", "地狱辣炒饭"]);
}

#[test]
fn unknown_tag_and_empty_catalog_give_empty_results() {
    assert!(search_by_tag(&fixture_catalog(), "不存在").is_empty());
    assert!(search_by_tag(&Catalog::empty(), "辣").is_empty());
}

#[test]
fn null_tag_record_never_matches() {
    let catalog = fixture_catalog();
    for tag in ["白饭", "", "null", "None"] {
        assert!(!search_by_tag(&catalog, tag).iter().any(|r| r.name == "白饭"));
    }
}

#[test]
fn search_is_idempotent() {
    let catalog = fixture_catalog();
    let first = search_by_tag(&catalog, "下酒");
    let second = search_by_tag(&catalog, "下酒");
    assert_eq!(first, second);
    assert_eq!(names(&first), vec!["烤八目鳗", "桂花酿"]);
}

#[test]
fn combined_tags_and_name_pattern() {
    let catalog = fixture_catalog();
    let query = Query::new()
        .with_tags(vec!["招牌".to_string()])
        .with_name_patterns(vec![Regex::new("鱼$").unwrap()]);

    let found = filter_catalog(&catalog, &query, &SearchOptions { jobs: Some(1) }).expect("search");
    assert_eq!(names(&found), vec!["雀酒蒸鱼"]);
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["辣", "甜", "下饭", "家常", "汤", "Spicy", "spicy"])
        .prop_map(str::to_string)
}

fn raw_tags_strategy() -> impl Strategy<Value = Option<TagSet>> {
    prop_oneof![
        Just(None),
        prop::collection::vec(tag_strategy(), 0..4)
            .prop_map(|tags| Some(TagSet::from_text(&tags.join(" ,， ")))),
        prop::collection::vec(tag_strategy(), 0..4)
            .prop_map(|tags| Some(TagSet::from_items(tags.iter().map(|t| format!("  {t} "))))),
    ]
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(raw_tags_strategy(), 0..12).prop_map(|all_tags| {
        Catalog::new(
            all_tags
                .into_iter()
                .enumerate()
                .map(|(i, tags)| Recipe::new(format!("dish-{i}"), tags))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn search_partitions_the_catalog(catalog in catalog_strategy(), tag in tag_strategy()) {
        let found = search_by_tag(&catalog, &tag);

        for recipe in &found {
            prop_assert!(recipe.tags.as_ref().is_some_and(|t| t.contains(&tag)));
        }
        for recipe in catalog.iter() {
            let member = found.iter().any(|f| std::ptr::eq(*f, recipe));
            prop_assert_eq!(member, recipe.has_tag(&tag));
        }

        let positions: Vec<usize> = found
            .iter()
            .map(|f| catalog.iter().position(|r| std::ptr::eq(r, *f)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn normalized_tokens_are_trimmed_and_non_empty(catalog in catalog_strategy()) {
        for tags in catalog.iter().filter_map(|r| r.tags.as_ref()) {
            for token in tags.iter() {
                prop_assert!(!token.is_empty());
                prop_assert_eq!(token, token.trim());
            }
        }
    }

    #[test]
    fn parallel_and_sequential_filters_agree(catalog in catalog_strategy(), tag in tag_strategy()) {
        let query = Query::for_tag(&tag);
        let parallel = filter_catalog(&catalog, &query, &SearchOptions { jobs: Some(2) }).unwrap();
        prop_assert_eq!(parallel, filter_cached(&catalog, &query));
    }
}
