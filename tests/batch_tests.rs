use dupesweep::duplicates::DuplicateFinder;
use dupesweep::resolve::{apply_keep_first, deletion_candidates, print_report};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

fn scan(root: &Path) -> Vec<dupesweep::duplicates::DuplicateGroup> {
    let finder = DuplicateFinder::with_defaults();
    let (groups, _) = finder.find_duplicates(root).unwrap();
    groups
}

#[test]
fn test_dry_run_deletes_nothing_and_rescans_identically() {
    // Scenario: report-only mode leaves the tree untouched, so a second
    // scan yields the identical duplicate set.
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"copy");
    write_file(dir.path(), "b.txt", b"copy");
    write_file(dir.path(), "c.txt", b"copy");
    write_file(dir.path(), "solo.txt", b"unique");

    let first = scan(dir.path());
    assert_eq!(first.len(), 1);

    let mut out = Vec::new();
    print_report(&first, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("marked for deletion"));

    let second = scan(dir.path());
    assert_eq!(second.len(), first.len());
    assert_eq!(second[0].digest, first[0].digest);
    assert_eq!(second[0].paths(), first[0].paths());
}

#[test]
fn test_candidates_are_all_but_first_per_group() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", b"one");
    write_file(dir.path(), "b.txt", b"one");
    write_file(dir.path(), "c.txt", b"two two");
    write_file(dir.path(), "d.txt", b"two two");

    let groups = scan(dir.path());
    let candidates = deletion_candidates(&groups);

    assert_eq!(candidates.len(), 2);
    assert!(!candidates.contains(&a));
}

#[test]
fn test_apply_keeps_first_occurrence_of_each_group() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", b"group one");
    let b = write_file(dir.path(), "b.txt", b"group one");
    let c = write_file(dir.path(), "c.txt", b"group two!");
    let d = write_file(dir.path(), "d.txt", b"group two!");
    let solo = write_file(dir.path(), "solo.txt", b"unique");

    let groups = scan(dir.path());
    assert_eq!(groups.len(), 2);

    let mut out = Vec::new();
    let report = apply_keep_first(&groups, &mut out, false, None).unwrap();

    assert_eq!(report.deleted, 2);
    assert_eq!(report.failed, 0);
    assert!(a.exists());
    assert!(!b.exists());
    assert!(c.exists());
    assert!(!d.exists());
    assert!(solo.exists());
}

#[test]
fn test_apply_then_rescan_finds_nothing() {
    let dir = tempdir().unwrap();
    for i in 0..3 {
        write_file(dir.path(), &format!("f{i}.txt"), b"same same");
    }

    let groups = scan(dir.path());
    let mut out = Vec::new();
    apply_keep_first(&groups, &mut out, false, None).unwrap();

    assert!(scan(dir.path()).is_empty());
}

#[test]
fn test_report_on_clean_tree() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "only.txt", b"nothing to see");

    let groups = scan(dir.path());
    let mut out = Vec::new();
    print_report(&groups, &mut out).unwrap();

    assert!(String::from_utf8(out)
        .unwrap()
        .contains("No duplicate files found"));
}

#[test]
fn test_paranoid_apply_spares_modified_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"original");
    let b = write_file(dir.path(), "b.txt", b"original");

    let groups = scan(dir.path());
    assert_eq!(groups.len(), 1);

    // b.txt changes after the scan; paranoid mode must notice.
    File::create(&b).unwrap().write_all(b"modified").unwrap();

    let mut out = Vec::new();
    let report = apply_keep_first(&groups, &mut out, true, None).unwrap();

    assert_eq!(report.deleted, 0);
    assert_eq!(report.failed, 1);
    assert!(b.exists());
}
