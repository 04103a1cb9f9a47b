use edmv::{OpFailure, classify_mv, resolve_destination};
use std::fs;
use tempfile::tempdir;

#[test]
fn second_and_third_collision() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("b.txt"), b"").unwrap();
    let first = resolve_destination(td.path(), "a.txt", "b.txt", true).unwrap();
    assert_eq!(first, "b (2).txt");

    fs::write(td.path().join(&first), b"").unwrap();
    let second = resolve_destination(td.path(), "c.txt", "b.txt", true).unwrap();
    assert_eq!(second, "b (3).txt");
}

#[test]
fn trailing_separator_builds_ancestors() {
    let td = tempdir().unwrap();
    let got = resolve_destination(td.path(), "x", "one/two/three/", true).unwrap();
    assert!(td.path().join("one/two/three").is_dir());
    assert_eq!(got, "one/two/three/x");
}

#[test]
fn directory_sources_keep_their_name() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("music/album")).unwrap();
    fs::create_dir(td.path().join("archive")).unwrap();
    let got = resolve_destination(td.path(), "music/album/", "archive", false).unwrap();
    assert_eq!(got, "archive/album");
}

#[test]
fn classifier_keeps_raw_text_for_unknown_failures() {
    let msg = "mv: cannot overwrite directory 'x' with non-directory";
    assert_eq!(
        classify_mv(Some(1), msg),
        Err(OpFailure::Unclassified(msg.to_string()))
    );
    assert_eq!(
        classify_mv(Some(1), "mv: cannot stat 'gone': No such file or directory"),
        Err(OpFailure::StatMissing)
    );
}
