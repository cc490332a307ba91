use docsearch::{RawRecord, SymbolIndex};

use crate::helpers::test_utils::{keys, load_fixture_index};

#[test]
fn test_fixture_loads_every_record() {
    let index = load_fixture_index();

    assert_eq!(index.len(), 21);
    assert_eq!(index.distinct_keys(), 18);
    assert_eq!(index.target_count(), 30);
    assert_eq!(index.duplicate_keys(), vec!["scene", "shape", "swcanvas"]);
}

#[test]
fn test_lookup_results_are_sorted() {
    let index = load_fixture_index();
    let hits = index.lookup("s");

    assert_eq!(
        keys(&hits),
        vec![
            "scale", "scene", "scene", "shape", "shape", "shareable", "size", "spread", "square",
            "stroke", "strokecap", "strokecolor", "strokedash", "strokefill", "strokejoin",
            "strokewidth", "success", "sw", "swcanvas", "swcanvas", "sync",
        ]
    );

    for pair in hits.windows(2) {
        assert!(pair[0].key <= pair[1].key);
        if pair[0].key == pair[1].key {
            assert!(pair[0].ordinal < pair[1].ordinal);
        }
    }
}

#[test]
fn test_every_key_finds_its_entry() {
    let index = load_fixture_index();

    for entry in index.entries() {
        let hits = index.lookup(&entry.key);
        assert!(
            hits.iter().any(|hit| hit.ordinal == entry.ordinal),
            "lookup('{}') lost entry #{}",
            entry.key,
            entry.ordinal
        );
    }
}

#[test]
fn test_duplicate_keys_keep_their_targets() {
    let index = load_fixture_index();
    let scenes = index.lookup("scene");

    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].targets[0].url, "../classtvg_1_1Scene.html");
    assert_eq!(scenes[0].targets[0].scope, "tvg");
    assert_eq!(scenes[1].targets[0].url, "../group__ThorVGCapi__Scene.html");
    assert_eq!(scenes[1].targets[0].scope, "");
}

#[test]
fn test_overloads_stay_in_input_order() {
    let index = load_fixture_index();
    let stroke = index.find_exact("stroke");

    assert_eq!(stroke.len(), 1);
    let scopes: Vec<&str> = stroke[0].targets.iter().map(|t| t.scope.as_str()).collect();
    assert_eq!(scopes.len(), 6);
    assert_eq!(scopes[0], "tvg::Shape::stroke(float width) noexcept");
    assert_eq!(
        scopes[2],
        "tvg::Shape::stroke(std::unique_ptr&lt; Fill &gt; f) noexcept"
    );
    assert_eq!(scopes[5], "tvg::Shape::stroke(StrokeJoin join) noexcept");
}

#[test]
fn test_label_keeps_generator_casing() {
    let index = load_fixture_index();
    let hits = index.lookup("STROKEC");

    assert_eq!(keys(&hits), vec!["strokecap", "strokecolor"]);
    assert_eq!(hits[0].label, "strokeCap");
    assert_eq!(hits[1].label, "strokeColor");
}

#[test]
fn test_resolve_round_trips_urls() {
    let index = load_fixture_index();
    let hits = index.lookup("size");

    let urls: Vec<&str> = hits[0]
        .targets
        .iter()
        .map(|t| SymbolIndex::resolve(hits[0], t).unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "../classtvg_1_1Picture.html#a065e47b46c791ee4d93ed3252d581a40",
            "../classtvg_1_1Picture.html#af80639ef3460a5cf06278fdc03c13aad",
        ]
    );
}

#[test]
fn test_empty_and_unmatched_queries() {
    let index = load_fixture_index();

    assert!(index.lookup("").is_empty());
    assert!(index.lookup("x").is_empty());
    assert!(index.lookup("strokewidthx").is_empty());
    assert!(index.lookup("a").is_empty());
}

#[test]
fn test_pair_records_scenario() {
    let index = SymbolIndex::load(vec![
        RawRecord::from_pairs("scale", [("scale", "Paint.html#a1")]),
        RawRecord::from_pairs("scene", [("Scene", "Scene.html")]),
    ])
    .unwrap();

    assert_eq!(keys(&index.lookup("sc")), vec!["scale", "scene"]);
    assert_eq!(keys(&index.lookup("sce")), vec!["scene"]);
    assert!(index.lookup("x").is_empty());
}
