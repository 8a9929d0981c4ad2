//! End-to-end tests for the lineblock binary and the public sync API

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lineblock() -> Command {
    Command::cargo_bin("lineblock").expect("lineblock binary")
}

#[test]
fn extract_then_insert_round_trips_a_snippet() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("guide.md");
    fs::write(
        &source,
        "# Guide\n\
         <!-- block extract fact.md -->\n\
         fact content\n\
         <!-- end extract -->\n",
    )
    .unwrap();
    let snippets = dir.path().join("snippets");
    fs::create_dir(&snippets).unwrap();

    lineblock()
        .args(["extract", "--source"])
        .arg(&source)
        .arg("--prefix")
        .arg(&snippets)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1 block(s)"));

    assert_eq!(
        fs::read_to_string(snippets.join("fact.md")).unwrap(),
        "fact content\n"
    );

    let target = dir.path().join("readme.md");
    fs::write(&target, "intro\n<!-- block insert fact.md -->\n").unwrap();

    lineblock()
        .args(["insert", "--source"])
        .arg(&target)
        .arg("--prefix")
        .arg(&snippets)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated file"));

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "intro\n\
         <!-- block insert fact.md -->\n\
         fact content\n\
         <!-- end insert -->\n"
    );
}

#[test]
fn insert_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("snip.md"), "body\n").unwrap();
    let target = dir.path().join("doc.md");
    fs::write(&target, "<!-- block insert snip.md -->\n").unwrap();

    for _ in 0..2 {
        lineblock()
            .args(["insert", "--source"])
            .arg(&target)
            .arg("--prefix")
            .arg(dir.path())
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<!-- block insert snip.md -->\nbody\n<!-- end insert -->\n"
    );
}

#[test]
fn clear_undoes_a_previous_insert() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("snip.md"), "body\n").unwrap();
    let target = dir.path().join("doc.md");
    fs::write(&target, "<!-- block insert snip.md -->\n").unwrap();

    lineblock()
        .args(["insert", "--source"])
        .arg(&target)
        .arg("--prefix")
        .arg(dir.path())
        .assert()
        .success();

    lineblock()
        .args(["insert", "--clear", "--source"])
        .arg(&target)
        .arg("--prefix")
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<!-- block insert snip.md -->\n"
    );
}

#[test]
fn sync_propagates_blocks_across_a_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lib.py"),
        "# block extract usage\nimport lib\n# end extract\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("readme.md"),
        "<!-- block insert usage -->\n<!-- end insert -->\n",
    )
    .unwrap();

    lineblock()
        .arg("sync")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 block(s) extracted"));

    assert_eq!(
        fs::read_to_string(dir.path().join("readme.md")).unwrap(),
        "<!-- block insert usage -->\nimport lib\n<!-- end insert -->\n"
    );
}

#[test]
fn orphaned_end_marker_fails_with_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("doc.md");
    fs::write(&target, "text\n<!-- end extract -->\n").unwrap();

    lineblock()
        .arg("sync")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Orphaned block end marker"));
}

#[test]
fn directory_options_on_a_file_target_fail() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("doc.md");
    fs::write(&target, "text\n").unwrap();

    lineblock()
        .args(["sync", "-p", "*.md"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incompatible options"));
}

#[test]
fn missing_source_path_fails() {
    let dir = TempDir::new().unwrap();

    lineblock()
        .arg("sync")
        .arg(dir.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn sync_api_reports_updates_once() {
    use lineblock_core::{SyncOptions, sync_path};

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("doc.md");
    fs::write(
        &file,
        "<!-- block extract demo -->\nbody\n<!-- end extract -->\n\
         <!-- block insert demo -->\n<!-- end insert -->\n",
    )
    .unwrap();

    let first = sync_path(&file, &SyncOptions::default()).unwrap();
    assert_eq!(first.files_updated.len(), 1);

    let second = sync_path(&file, &SyncOptions::default()).unwrap();
    assert!(second.files_updated.is_empty());
}

#[test]
fn splice_scenario_matches_expected_bytes() {
    use lineblock_content::{Block, BlockMap, InsertMode, splice_blocks};
    use std::path::PathBuf;

    let mut map = BlockMap::new();
    map.insert(Block {
        identity: "basic.md".to_string(),
        source: PathBuf::from("src.md"),
        start_line: 1,
        end_line: 5,
        indent: 0,
        content: vec![
            "line 1\n".to_string(),
            "line 2\n".to_string(),
            "line 3\n".to_string(),
        ],
    });

    let lines = vec![
        "before\n".to_string(),
        "<!-- block insert basic.md -->".to_string(),
    ];
    let outcome =
        splice_blocks(&PathBuf::from("doc.md"), &lines, &map, InsertMode::Apply).unwrap();

    assert_eq!(
        outcome.lines.concat(),
        "before\n<!-- block insert basic.md -->\nline 1\nline 2\nline 3\n<!-- end insert -->"
    );
}
