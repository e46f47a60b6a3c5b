/// End-to-end pipeline tests.
///
/// Each test writes a listing to a real temporary file, then drives the
/// whole chain (detect → parse → aggregate → analyse → render) through the
/// public API exactly the way the CLI does.
use metasleuth_core::analysis::{find_outliers, AnalysisConfig};
use metasleuth_core::parser::{ingest, InputFormat};
use metasleuth_core::report::{Report, ReportFormat};
use std::fs;
use std::io::BufReader;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_listing(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn body_row(path: &str, inode: &str) -> String {
    format!("0|{path}|{inode}|r/rrw-r--r--|1000|1000|512|1700000000|1700000000|1700000000|1700000000\n")
}

/// Run the full pipeline over a file and return the text report.
fn run_text(path: &Path, threshold: f64) -> String {
    let file = fs::File::open(path).unwrap();
    let ingested = ingest(BufReader::new(file)).unwrap();
    let config = AnalysisConfig::new(threshold).unwrap();
    let dirs = find_outliers(&ingested.index, &config);
    let report = Report {
        threshold,
        input_format: ingested.format,
        stats: &ingested.stats,
        directories: &dirs,
    };
    let mut out = Vec::new();
    report.write(ReportFormat::Text, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// A small `fls -arp` style listing with headers, deleted entries, dot
/// entries, and one planted file.
const FLS_LISTING: &str = "\
d/d 11:\tlost+found
d/d 2:\t.
d/d 2:\t..
r/r 100:\thome/user/a.txt
r/r 105:\thome/user/b.txt
r/r 110:\thome/user/c.txt
r/r 900:\thome/user/implant.so
r/r * 901:\thome/user/wiped.so
r/r 0:\thome/user/ghost
d/d 100:\thome/user/.
d/d 50:\thome/user/..
r/r 7:\tetc/only-file
";

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn fls_listing_flags_only_the_planted_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_listing(tmp.path(), "fls.txt", FLS_LISTING);

    let out = run_text(&path, 1.0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5, "banner, divider, blank, header, one finding:\n{out}");
    assert!(lines[3].ends_with("-- Path: home/user"));
    assert!(lines[3].contains("Avg:        303 "));
    assert!(lines[4].contains("File Meta Addr:        900"));
    assert!(lines[4].ends_with("File:   implant.so"));
}

#[test]
fn fls_listing_excludes_deleted_zero_and_dot_entries() {
    let tmp = TempDir::new().unwrap();
    let path = write_listing(tmp.path(), "fls.txt", FLS_LISTING);

    let ingested = ingest(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(ingested.format, InputFormat::Fls);

    let user = ingested.index.group("home/user").unwrap();
    let names: Vec<&str> = user.files.keys().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "implant.so"]);

    for (_, group) in &ingested.index {
        assert!(group.files.keys().all(|n| n.as_str() != "." && n.as_str() != ".."));
        assert!(group.files.values().all(|&a| a != 0));
    }
    assert_eq!(ingested.stats.deleted, 1);
    assert_eq!(ingested.stats.zero_address, 1);
    assert_eq!(ingested.stats.self_or_parent, 4);
}

/// `etc` holds a single file and must never be reported, even at 0.
#[test]
fn single_file_directory_never_reported() {
    let tmp = TempDir::new().unwrap();
    let path = write_listing(tmp.path(), "fls.txt", FLS_LISTING);
    let out = run_text(&path, 0.0);
    assert!(!out.contains("Path: etc"));
}

#[test]
fn body_file_is_detected_and_parsed() {
    let tmp = TempDir::new().unwrap();
    let mut listing = String::new();
    for (name, inode) in [("a", "10-128-1"), ("b", "20-128-1"), ("c", "30-128-1")] {
        listing.push_str(&body_row(&format!("/srv/{name}"), inode));
    }
    let path = write_listing(tmp.path(), "body.txt", &listing);

    let out = run_text(&path, 1.0);
    assert!(out.contains("-- Path: /srv"));
    assert!(out.contains("File:   a\n"));
    assert!(out.contains("File:   c\n"));
    assert!(!out.contains("File:   b\n"));

    let out = run_text(&path, 2.0);
    assert_eq!(out.lines().count(), 2, "threshold 2.0 flags nothing");
}

/// The later row for a repeated path decides the address used.
#[test]
fn repeated_path_uses_last_address() {
    let tmp = TempDir::new().unwrap();
    let listing = [
        body_row("/x/a", "5000"),
        body_row("/x/b", "10"),
        body_row("/x/c", "12"),
        body_row("/x/a", "11"),
    ]
    .concat();
    let path = write_listing(tmp.path(), "body.txt", &listing);

    let ingested = ingest(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(ingested.index.group("/x").unwrap().files.get("a").copied(), Some(11));

    let dirs = find_outliers(&ingested.index, &AnalysisConfig::default());
    assert_eq!(dirs[0].stats.mean, 11.0);
}

#[test]
fn output_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let path = write_listing(tmp.path(), "fls.txt", FLS_LISTING);
    assert_eq!(run_text(&path, 0.5), run_text(&path, 0.5));
}

#[test]
fn missing_input_is_an_io_error_naming_the_path() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.txt");
    let err = metasleuth_core::parser::ingest_path(&missing).unwrap_err();
    assert!(matches!(err, metasleuth_core::MetaSleuthError::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}
