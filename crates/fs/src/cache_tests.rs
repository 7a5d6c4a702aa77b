use super::*;

use std::fs::{create_dir, write};

// Enumeration errors after a successful open (the early-stop branch in `scan`)
// cannot be triggered reliably from a temp dir, so that branch has no test here.

/// root/
///   .hidden
///   visible.txt
///   archive.tar.gz
///   subdir/
fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join(".hidden"), b"h").expect("write .hidden");
    write(root.join("visible.txt"), b"v").expect("write visible.txt");
    write(root.join("archive.tar.gz"), b"a").expect("write archive");
    create_dir(root.join("subdir")).expect("create subdir");
    tmp
}

fn names(snapshot: &DirectorySnapshot) -> Vec<String> {
    let mut names: Vec<_> = snapshot.iter().map(|e| e.name().to_owned()).collect();
    names.sort();
    names
}

#[test]
fn second_lookup_is_served_from_cache() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());

    let first = cache.snapshot(".").expect("scan base").clone();
    assert_eq!(cache.scan_count(), 1);

    let second = cache.snapshot(".").expect("cached base").clone();
    assert_eq!(cache.scan_count(), 1, "no rescan on hit");
    assert_eq!(first, second, "same entries in the same order");
}

#[test]
fn snapshot_is_stale_until_told_otherwise() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());
    cache.snapshot(".").expect("scan base");

    write(tmp.path().join("late.txt"), b"x").expect("write late file");
    let snap = cache.snapshot(".").expect("cached base");
    assert!(snap.find("late.txt").is_none());
}

#[test]
fn hidden_entries_are_skipped() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join(".hidden"), b"h").expect("write .hidden");
    write(tmp.path().join("visible.txt"), b"v").expect("write visible.txt");

    let mut cache = DirectoryCache::new(tmp.path());
    let snap = cache.snapshot(".").expect("scan");
    assert_eq!(names(snap), vec!["visible.txt"]);
}

#[test]
fn entries_are_classified_with_metadata() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());
    let snap = cache.snapshot(".").expect("scan");

    assert_eq!(names(snap), vec!["archive.tar.gz", "subdir", "visible.txt"]);

    let archive = snap.find("archive.tar.gz").expect("archive entry");
    assert_eq!(archive.extension(), "tar.gz");
    assert!(archive.is_file());
    assert!(archive.modified_time() > 0);

    assert!(snap.find("subdir").expect("subdir entry").is_dir());
    assert_eq!(cache.probe_status(), ProbeStatus::Works);
}

#[test]
fn unavailable_probe_uses_extensionless_heuristic() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    create_dir(tmp.path().join("subdir")).expect("create subdir");
    write(tmp.path().join("readme.txt"), b"r").expect("write readme");

    let mut cache = DirectoryCache::with_probe(tmp.path(), ProbeStatus::Unavailable);
    let snap = cache.snapshot(".").expect("scan");

    let subdir = snap.find("subdir").expect("subdir entry");
    assert_eq!(subdir.kind(), EntryType::Directory);
    assert_eq!(subdir.modified_time(), 0);

    let readme = snap.find("readme.txt").expect("readme entry");
    assert_eq!(readme.kind(), EntryType::File);
    assert_eq!(readme.modified_time(), 0);

    let stats = cache.stats();
    assert_eq!(stats.metadata_queries, 0);
    assert_eq!(stats.dir_probes, 1, "only the extensionless name is probed");
    assert_eq!(cache.probe_status(), ProbeStatus::Unavailable);
}

#[test]
fn missing_directory_is_not_cached() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());

    let err = cache.snapshot("nope").expect_err("missing dir");
    assert!(matches!(err, CacheError::NotFound { ref path, .. } if path == "nope"));
    assert!(cache.is_empty());
    assert_eq!(cache.scan_count(), 0);

    // A file is not a directory either.
    assert!(cache.snapshot("visible.txt").is_err());

    // Once the directory appears, the next lookup scans it.
    create_dir(tmp.path().join("nope")).expect("create dir");
    assert!(cache.snapshot("nope").expect("scan").is_empty());
    assert_eq!(cache.scan_count(), 1);
}

#[test]
fn keys_are_exact_and_kept_in_discovery_order() {
    let tmp = fixture();
    let abs = tmp.path().to_str().expect("utf-8 temp path").to_owned();
    let mut cache = DirectoryCache::new(tmp.path());

    cache.snapshot(".").expect("scan base");
    cache.snapshot("subdir").expect("scan subdir");
    cache.snapshot(&abs).expect("scan absolute");
    // "./" names the same directory but is a distinct key.
    cache.snapshot("./").expect("scan ./");

    let keys: Vec<_> = cache.dirs().map(|d| d.path().to_owned()).collect();
    assert_eq!(keys, vec![".".to_owned(), "subdir".to_owned(), abs.clone(), "./".to_owned()]);
    assert_eq!(cache.scan_count(), 4);
    assert_eq!(cache.get(&abs).map(|d| d.len()), Some(3));
}

#[test]
fn subdirectory_entries_resolve_against_their_parent() {
    let tmp = fixture();
    create_dir(tmp.path().join("subdir").join("nested")).expect("create nested");
    write(tmp.path().join("subdir").join("map.dat"), b"m").expect("write map");

    let mut cache = DirectoryCache::with_probe(tmp.path(), ProbeStatus::Unavailable);
    let snap = cache.snapshot("subdir/").expect("scan subdir");

    assert!(snap.find("nested").expect("nested").is_dir());
    assert!(snap.find("map.dat").expect("map").is_file());
}

#[test]
fn written_and_removed_files_update_base_snapshot() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());
    cache.snapshot(".").expect("scan base");

    cache.note_file_written("new.txt");
    let snap = cache.snapshot(".").expect("cached base").clone();
    assert_eq!(cache.scan_count(), 1);

    let entry = snap.find("new.txt").expect("new entry");
    assert_eq!(entry.kind(), EntryType::File);
    assert_eq!(entry.extension(), "txt");
    assert!(entry.modified_time() > 0);
    assert_eq!(snap.entries()[0].name(), "new.txt", "new entries go first");

    cache.note_file_removed("new.txt");
    let snap = cache.snapshot(".").expect("cached base");
    assert!(snap.find("new.txt").is_none());
    assert_eq!(cache.scan_count(), 1);
}

#[test]
fn rewriting_existing_entry_refreshes_time_without_duplicating() {
    let tmp = fixture();
    let mut cache = DirectoryCache::with_probe(tmp.path(), ProbeStatus::Unavailable);
    cache.snapshot(".").expect("scan base");
    let before = cache.get(".").expect("base").len();

    assert_eq!(
        cache.get(".").and_then(|d| d.find("visible.txt")).map(|e| e.modified_time()),
        Some(0)
    );

    cache.note_file_written("visible.txt");

    let base = cache.get(".").expect("base");
    assert_eq!(base.len(), before);
    let hits = base.iter().filter(|e| e.name() == "visible.txt").count();
    assert_eq!(hits, 1);
    assert!(base.find("visible.txt").expect("entry").modified_time() > 0);
}

#[test]
fn maintenance_is_noop_before_base_scan() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());

    cache.note_file_written("new.txt");
    cache.note_file_removed("visible.txt");
    assert!(cache.is_empty());
    assert_eq!(cache.scan_count(), 0);

    // Scanning another directory does not make it the base directory.
    cache.snapshot("subdir").expect("scan subdir");
    cache.note_file_written("new.txt");
    assert!(cache.get("subdir").expect("subdir").find("new.txt").is_none());
}

#[test]
fn removing_unknown_name_is_noop() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());
    let before = cache.snapshot(".").expect("scan base").clone();

    cache.note_file_removed("does-not-exist.sav");
    assert_eq!(cache.get("."), Some(&before));
}

#[test]
fn written_hidden_names_are_not_stored() {
    let tmp = fixture();
    let mut cache = DirectoryCache::new(tmp.path());
    let before = cache.snapshot(".").expect("scan base").clone();

    cache.note_file_written(".hidden2");
    cache.note_file_written(".hidden");

    let after = cache.snapshot(".").expect("cached base");
    assert_eq!(after, &before);
    assert!(after.iter().all(|e| !e.name().starts_with('.')));
}
