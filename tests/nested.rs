//! Nested archives, feed root detection and the traversal ceiling.

mod common;

use std::fs;

use common::*;
use gtfszip::{Error, SourceOptions};
use tempfile::TempDir;

fn feed_zip() -> Vec<u8> {
    zip_bytes(&[
        ("data/stops.txt", STOPS),
        ("data/routes.txt", ROUTES),
        ("data/about.html", b"<p>about</p>"),
        ("license.txt", b"CC-BY"),
    ])
}

#[test]
fn nested_address_matches_direct_address() {
    let dir = TempDir::new().unwrap();
    let inner = feed_zip();
    let inner_path = write_archive(dir.path(), "inner.zip", inner.as_slice());
    let outer_path = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[("inner.zip", inner.as_slice()), ("stops.txt", b"decoy")]),
    );
    let source = source(SourceOptions::default());

    let nested = source.load(&address(&outer_path, "inner.zip#data")).unwrap();
    let direct = source.load(&address(&inner_path, "data")).unwrap();

    assert_eq!(dir_listing(nested.path()), dir_listing(direct.path()));
    assert_eq!(nested.source_filenames(), direct.source_filenames());
    assert_eq!(fs::read(nested.path().join("stops.txt")).unwrap(), STOPS);
    assert_eq!(nested.archive_path(), outer_path.as_path());
}

#[test]
fn nested_archive_in_subdirectory() {
    let dir = TempDir::new().unwrap();
    let outer = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[("feeds/", b""), ("feeds/inner.zip", feed_zip().as_slice())]),
    );

    let loaded = source(SourceOptions::default())
        .load(&address(&outer, "feeds/inner.zip#data"))
        .unwrap();
    assert_eq!(dir_listing(loaded.path()), ["routes.txt", "stops.txt"]);
}

#[test]
fn nested_archive_root_without_inner_fragment() {
    let dir = TempDir::new().unwrap();
    let inner = zip_bytes(&[("stops.txt", STOPS), ("readme", b"r")]);
    let outer = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[("inner.zip", inner.as_slice())]),
    );

    let loaded = source(SourceOptions::default())
        .load(&address(&outer, "inner.zip"))
        .unwrap();
    assert_eq!(dir_listing(loaded.path()), ["stops.txt"]);
    assert_eq!(loaded.source_filenames(), ["stops.txt", "readme"]);
}

#[test]
fn missing_inner_target_fails() {
    let dir = TempDir::new().unwrap();
    let outer = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[("inner.zip", feed_zip().as_slice())]),
    );

    let err = source(SourceOptions::default())
        .load(&address(&outer, "inner.zip#nope"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSource(_)));
}

#[test]
fn auto_detect_finds_root_at_any_depth() {
    let dir = TempDir::new().unwrap();
    let level1 = zip_bytes(&[("wrapper/feed.zip", feed_zip().as_slice()), ("notes.txt", b"n")]);
    let level2 = zip_bytes(&[("level1.zip", level1.as_slice())]);
    let top = write_archive(dir.path(), "top.zip", level2.as_slice());

    let source = auto_source();
    assert_eq!(
        source.find_roots(&top).unwrap(),
        ["level1.zip#wrapper/feed.zip#data"]
    );

    let loaded = source.load(&address(&top, "")).unwrap();
    assert_eq!(dir_listing(loaded.path()), ["routes.txt", "stops.txt"]);
    assert_eq!(
        loaded.source_filenames(),
        ["stops.txt", "routes.txt", "about.html"]
    );
}

#[test]
fn auto_detect_overrides_unique_mismatched_target() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(
        dir.path(),
        "feed.zip",
        &zip_bytes(&[
            ("gtfs/stops.txt", STOPS),
            ("gtfs/routes.txt", ROUTES),
            ("docs/stops.txt", b"partial"),
        ]),
    );

    let loaded = auto_source().load(&address(&archive, "docs")).unwrap();
    assert_eq!(fs::read(loaded.path().join("stops.txt")).unwrap(), STOPS);
    assert_eq!(dir_listing(loaded.path()), ["routes.txt", "stops.txt"]);
}

#[test]
fn auto_detect_without_candidates_uses_request() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path(), "feed.zip", &zip_bytes(&[("sub/stops.txt", STOPS)]));

    let loaded = auto_source().load(&address(&archive, "sub")).unwrap();
    assert_eq!(dir_listing(loaded.path()), ["stops.txt"]);
}

#[test]
fn ambiguous_roots_require_fragment() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(
        dir.path(),
        "feeds.zip",
        &zip_bytes(&[
            ("a/stops.txt", b"a stops"),
            ("a/routes.txt", ROUTES),
            ("b/stops.txt", b"b stops"),
            ("b/routes.txt", ROUTES),
        ]),
    );
    let source = auto_source();

    for fragment in ["", "c"] {
        let err = source.load(&address(&archive, fragment)).unwrap_err();
        match err {
            Error::AmbiguousRoot { candidates } => assert_eq!(candidates, ["a", "b"]),
            other => panic!("expected ambiguous root, got {other:?}"),
        }
    }

    let loaded = source.load(&address(&archive, "b")).unwrap();
    assert_eq!(fs::read(loaded.path().join("stops.txt")).unwrap(), b"b stops");
}

#[test]
fn ambiguity_inside_nested_archive() {
    let dir = TempDir::new().unwrap();
    let inner = zip_bytes(&[
        ("a/stops.txt", STOPS),
        ("a/routes.txt", ROUTES),
        ("b/stops.txt", STOPS),
        ("b/routes.txt", ROUTES),
    ]);
    let outer = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[("inner.zip", inner.as_slice())]),
    );
    let source = auto_source();

    assert!(matches!(
        source.load(&address(&outer, "")),
        Err(Error::AmbiguousRoot { .. })
    ));
    let loaded = source.load(&address(&outer, "inner.zip#a")).unwrap();
    assert_eq!(dir_listing(loaded.path()), ["routes.txt", "stops.txt"]);
}

#[test]
fn index_is_stable_and_keys_nested_paths() {
    let dir = TempDir::new().unwrap();
    let outer = write_archive(
        dir.path(),
        "outer.zip",
        &zip_bytes(&[
            ("inner.zip", feed_zip().as_slice()),
            ("top.txt", b"t"),
            ("empty/", b""),
        ]),
    );
    let source = auto_source();

    let first = source.index(&outer).unwrap();
    let second = source.index(&outer).unwrap();
    assert_eq!(first, second);

    let keys: Vec<&str> = first.iter().map(|(dir, _)| dir).collect();
    assert_eq!(keys, ["", "empty", "inner.zip#", "inner.zip#data"]);
    assert!(first.get("").unwrap().contains("top.txt"));
    assert!(first.get("empty").unwrap().is_empty());
    assert!(first.get("inner.zip#").unwrap().contains("license.txt"));
    assert_eq!(first.get("inner.zip#data").unwrap().len(), 3);
}

/// Wraps `bytes` as `layer.zip` inside a new archive with `padding` filler entries, `depth` times.
fn self_nested(bytes: Vec<u8>, depth: usize, padding: usize) -> Vec<u8> {
    (0..depth).fold(bytes, |inner, _| {
        let fillers: Vec<(String, Vec<u8>)> = (0..padding)
            .map(|i| (format!("f{i}.txt"), vec![b'x'; 4]))
            .collect();
        let mut entries: Vec<(&str, &[u8])> = vec![("layer.zip", inner.as_slice())];
        entries.extend(fillers.iter().map(|(n, d)| (n.as_str(), d.as_slice())));
        zip_bytes(&entries)
    })
}

#[test]
fn traversal_ceiling_aborts_deep_nesting() {
    let dir = TempDir::new().unwrap();
    let bomb = self_nested(zip_bytes(&[("stops.txt", STOPS)]), 8, 20);
    let archive = write_archive(dir.path(), "bomb.zip", &bomb);

    // 8 levels of 21 entries plus the innermost file
    let roomy = source(SourceOptions::default().entry_count_limit(200));
    assert!(roomy.index(&archive).is_ok());

    let tight = source(
        SourceOptions::default()
            .auto_detect_root(true)
            .entry_count_limit(100),
    );
    assert!(matches!(
        tight.index(&archive),
        Err(Error::TraversalLimitExceeded { limit: 100 })
    ));
    assert!(matches!(
        tight.load(&address(&archive, "")),
        Err(Error::TraversalLimitExceeded { limit: 100 })
    ));
}

#[test]
fn ceiling_is_shared_across_levels() {
    let dir = TempDir::new().unwrap();
    // Every level alone stays under the limit, the whole tree does not
    let bomb = self_nested(zip_bytes(&[("stops.txt", STOPS)]), 5, 8);
    let archive = write_archive(dir.path(), "bomb.zip", &bomb);

    let source = source(SourceOptions::default().entry_count_limit(20));
    assert!(matches!(
        source.find_roots(&archive),
        Err(Error::TraversalLimitExceeded { limit: 20 })
    ));
}

/// Runs `f` on a thread with room for very deep recursion.
fn with_deep_stack(f: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new()
        .stack_size(256 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn default_ceiling_is_reached_before_file_handles_run_out() {
    with_deep_stack(|| {
        let dir = TempDir::new().unwrap();
        // One entry per level; deeper than a 1024 descriptor limit allows if levels held files open
        let chain = self_nested(zip_bytes(&[("stops.txt", STOPS)]), 1100, 0);
        let archive = write_archive(dir.path(), "chain.zip", &chain);

        let source = source(SourceOptions::default());
        assert!(matches!(
            source.index(&archive),
            Err(Error::TraversalLimitExceeded { limit: 1000 })
        ));
    });
}

#[test]
fn deep_fragment_is_followed_to_the_end() {
    with_deep_stack(|| {
        let dir = TempDir::new().unwrap();
        let chain = self_nested(zip_bytes(&[("stops.txt", STOPS)]), 600, 0);
        let archive = write_archive(dir.path(), "chain.zip", &chain);
        let fragment = vec!["layer.zip"; 600].join("#");

        let loaded = source(SourceOptions::default())
            .load(&address(&archive, &fragment))
            .unwrap();
        assert_eq!(dir_listing(loaded.path()), ["stops.txt"]);
    });
}
