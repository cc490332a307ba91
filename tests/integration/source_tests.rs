use anyhow::Result;
use tempfile::TempDir;

use docsearch::{load_path, load_sources, IndexError, SourceFormat};

use crate::helpers::test_utils::{fixture_path, keys};

#[test]
fn test_load_split_tables() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let search_dir = temp_dir.path().join("search");
    std::fs::create_dir_all(&search_dir)?;

    std::fs::copy(fixture_path("search/all_e.js"), search_dir.join("all_e.js"))?;
    std::fs::write(
        search_dir.join("all_0.js"),
        "var searchData=\n[\n  ['accessor',['accessor',['../classtvg_1_1Accessor.html',1,'tvg']]],\n  ['scene',['scene',['../classtvg_1_1Scene.html#a1',1,'tvg::Scene']]]\n];\n",
    )?;
    // Not a search table, must be ignored by the pattern
    std::fs::write(search_dir.join("search.css"), "body {}")?;

    let pattern = search_dir.join("all_*.js").to_string_lossy().into_owned();
    let index = load_sources(&[pattern], SourceFormat::Auto)?;

    assert_eq!(index.len(), 23);
    assert_eq!(keys(&index.lookup("a")), vec!["accessor"]);

    // all_0.js is read first, so its scene comes first among equal keys
    let scenes = index.lookup("scene");
    assert_eq!(scenes.len(), 3);
    assert_eq!(scenes[0].targets[0].url, "../classtvg_1_1Scene.html#a1");
    assert_eq!(scenes[0].ordinal, 1);

    Ok(())
}

#[test]
fn test_json_and_doxygen_sources_mix() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let json_path = temp_dir.path().join("extra.json");
    std::fs::write(
        &json_path,
        r#"[["scanline", ["scanline", "Rle.html#a9"]]]"#,
    )?;

    let patterns = vec![
        fixture_path("search/all_e.js").to_string_lossy().into_owned(),
        json_path.to_string_lossy().into_owned(),
    ];
    let index = load_sources(&patterns, SourceFormat::Auto)?;

    assert_eq!(keys(&index.lookup("sca")), vec!["scale", "scanline"]);
    Ok(())
}

#[test]
fn test_malformed_record_rejects_whole_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("all_1.js");
    std::fs::write(
        &path,
        "var searchData=[\n  ['good',['Good',['good.html',1,'']]],\n  ['bad',['Bad']]\n];",
    )?;

    let err = load_path(&path, SourceFormat::Auto).unwrap_err();
    match err {
        IndexError::MalformedIndex { record, reason } => {
            assert_eq!(record, 1);
            assert!(reason.contains("'bad' has no targets"));
        }
        other => panic!("expected malformed index, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_parse_error_names_file_and_position() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("all_2.js");
    std::fs::write(&path, "var searchData=\n[\n  ['broken',['Broken',['b.html',1,'']]\n];")?;

    let err = load_path(&path, SourceFormat::Auto).unwrap_err();
    match &err {
        IndexError::Parse { path: at, line, .. } => {
            assert_eq!(at, &path);
            assert_eq!(*line, 4);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(err.to_string().contains("all_2.js"));

    Ok(())
}

#[test]
fn test_deeply_nested_table_is_a_parse_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("all_3.js");
    let depth = 200_000;
    std::fs::write(
        &path,
        format!("var searchData={}{};", "[".repeat(depth), "]".repeat(depth)),
    )?;

    let err = load_path(&path, SourceFormat::Auto).unwrap_err();
    match err {
        IndexError::Parse { line, message, .. } => {
            assert_eq!(line, 1);
            assert!(message.contains("nesting too deep"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_json_pair_with_bad_fields_is_malformed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("symbols.json");
    std::fs::write(
        &path,
        r#"[["scale", ["scale", "Paint.html#a1"]], [null, ["Scene", "Scene.html"]]]"#,
    )?;

    match load_path(&path, SourceFormat::Auto).unwrap_err() {
        IndexError::MalformedIndex { record, .. } => assert_eq!(record, 1),
        other => panic!("expected malformed index, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_explicit_format_overrides_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("symbols.txt");
    std::fs::write(&path, "[['sync',['sync',['Canvas.html#ad',1,'tvg::Canvas']]]]")?;

    assert!(matches!(
        load_path(&path, SourceFormat::Auto),
        Err(IndexError::UnsupportedFormat { .. })
    ));

    let index = load_path(&path, SourceFormat::Doxygen)?;
    assert_eq!(index.len(), 1);
    Ok(())
}

#[test]
fn test_invalid_pattern() {
    let err = load_sources(&["search/[".to_string()], SourceFormat::Auto).unwrap_err();
    assert!(matches!(err, IndexError::Pattern { .. }));
}
