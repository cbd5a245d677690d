//! Command line tests against a fake rclone.
//!
//! The fake is a small POSIX shell script implementing just enough of
//! `lsjson`, `check` and `copyto` on local directories. Any copy whose
//! source path contains `fail` is rejected.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

const FAKE_RCLONE: &str = r#"#!/bin/sh
sub="$1"
shift
a=""
b=""
excludes=$(mktemp)
trap 'rm -f "$excludes"' EXIT
for arg in "$@"; do
  case "$arg" in
    --exclude=*) p="${arg#--exclude=}"; p="${p#/}"; printf '%s\n' "${p%/}" >> "$excludes" ;;
    -*) ;;
    *) if [ -z "$a" ]; then a="$arg"; else b="$arg"; fi ;;
  esac
done

case "$sub" in
  lsjson)
    [ -d "$a" ] || { echo "ERROR : directory not found" >&2; exit 3; }
    cd "$a" || exit 3
    printf '['
    find . -type f | sed 's|^\./||' | sort | {
      sep=''
      while IFS= read -r p; do
        size=$(wc -c < "$p" | tr -d ' ')
        sum=$(cksum < "$p" | cut -d' ' -f1)
        printf '%s{"Path":"%s","Name":"%s","Size":%s,"IsDir":false,"Hashes":{"crc32":"%s"}}' \
          "$sep" "$p" "$(basename "$p")" "$size" "$sum"
        sep=','
      done
    }
    printf ']\n'
    ;;
  check)
    diff -r -X "$excludes" "$a" "$b" >/dev/null 2>&1
    ;;
  copyto)
    case "$a" in
      *fail*) echo "ERROR : simulated failure" >&2; exit 1 ;;
    esac
    mkdir -p "$(dirname "$b")" && cp "$a" "$b"
    ;;
  *)
    echo "unknown command $sub" >&2
    exit 9
    ;;
esac
"#;

/// Path of the fake rclone, written once per test binary
fn fake_rclone() -> &'static Path {
    static FAKE: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = FAKE.get_or_init(|| {
        let dir = TempDir::new().expect("create fake rclone dir");
        let path = dir.path().join("rclone");
        fs::write(&path, FAKE_RCLONE).expect("write fake rclone");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("make fake rclone executable");
        (dir, path)
    });
    path
}

struct Roots {
    _dir: TempDir,
    a: PathBuf,
    b: PathBuf,
}

impl Roots {
    fn new() -> Self {
        let dir = TempDir::new().expect("create roots tempdir");
        let a = dir.path().join("root1");
        let b = dir.path().join("root2");
        fs::create_dir_all(&a).expect("create root1");
        fs::create_dir_all(&b).expect("create root2");
        Self { _dir: dir, a, b }
    }

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(full, content).expect("write test file");
    }
}

fn duosync() -> Command {
    let mut cmd = Command::cargo_bin("duosync").expect("binary builds");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_sync(roots: &Roots, extra: &[&str]) -> assert_cmd::assert::Assert {
    duosync()
        .arg("sync")
        .arg(&roots.a)
        .arg(&roots.b)
        .arg("--rclone")
        .arg(fake_rclone())
        .arg("-q")
        .args(extra)
        .assert()
}

fn run_check(roots: &Roots) -> assert_cmd::assert::Assert {
    duosync()
        .arg("check")
        .arg(&roots.a)
        .arg(&roots.b)
        .arg("--rclone")
        .arg(fake_rclone())
        .assert()
}

#[test]
fn test_sync_copies_in_both_directions() {
    let roots = Roots::new();
    Roots::write(&roots.a, "a.txt", "from a");
    Roots::write(&roots.a, "nested/deep/c.txt", "nested");
    Roots::write(&roots.b, "b.txt", "from b");

    run_sync(&roots, &[])
        .success()
        .stdout(predicate::str::contains("A -> B: 2"))
        .stdout(predicate::str::contains("B -> A: 1"));

    assert_eq!(fs::read_to_string(roots.b.join("a.txt")).unwrap(), "from a");
    assert_eq!(
        fs::read_to_string(roots.b.join("nested/deep/c.txt")).unwrap(),
        "nested"
    );
    assert_eq!(fs::read_to_string(roots.a.join("b.txt")).unwrap(), "from b");

    run_check(&roots)
        .success()
        .stdout(predicate::str::contains("in sync"));
}

#[test]
fn test_second_sync_has_nothing_to_do() {
    let roots = Roots::new();
    Roots::write(&roots.a, "a.txt", "a");

    run_sync(&roots, &[]).success();
    run_sync(&roots, &[])
        .success()
        .stdout(predicate::str::contains("Nothing to sync."));
}

#[test]
fn test_check_fails_on_content_difference() {
    let roots = Roots::new();
    Roots::write(&roots.a, "x.txt", "one");
    Roots::write(&roots.b, "x.txt", "two");

    run_check(&roots)
        .code(1)
        .stdout(predicate::str::contains("differ"));
}

#[test]
fn test_verify_warns_about_content_difference() {
    let roots = Roots::new();
    Roots::write(&roots.a, "x.txt", "one");
    Roots::write(&roots.b, "x.txt", "two");

    run_sync(&roots, &["--verify"])
        .success()
        .stdout(predicate::str::contains("still differ"));
    assert_eq!(fs::read_to_string(roots.b.join("x.txt")).unwrap(), "two");
}

#[test]
fn test_dry_run_makes_no_changes() {
    let roots = Roots::new();
    Roots::write(&roots.a, "new.txt", "should-not-copy");

    run_sync(&roots, &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("COPY  A -> B  new.txt"))
        .stdout(predicate::str::contains("no changes were made"));

    assert!(!roots.b.join("new.txt").exists());
}

#[test]
fn test_copy_failure_exits_non_zero() {
    let roots = Roots::new();
    Roots::write(&roots.a, "will_fail.txt", "x");

    run_sync(&roots, &[])
        .code(1)
        .stdout(predicate::str::contains("Sync aborted:"))
        .stderr(predicate::str::contains("Could not copy file will_fail.txt"));

    assert!(!roots.b.join("will_fail.txt").exists());
}

#[test]
fn test_listing_failure_exits_non_zero() {
    let roots = Roots::new();
    Roots::write(&roots.a, "a.txt", "a");
    let missing = roots.b.join("does-not-exist");

    duosync()
        .arg("sync")
        .arg(&roots.a)
        .arg(&missing)
        .arg("--rclone")
        .arg(fake_rclone())
        .arg("-q")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not list files"));

    assert!(!missing.exists());
}

#[test]
fn test_exclude_keeps_files_out_of_sync() {
    let roots = Roots::new();
    Roots::write(&roots.a, "keep.txt", "k");
    Roots::write(&roots.a, "logs/run.log", "l");

    run_sync(&roots, &["--exclude", "*.log"]).success();

    assert!(roots.b.join("keep.txt").exists());
    assert!(!roots.b.join("logs/run.log").exists());
}

#[test]
fn test_directory_exclude_agrees_between_sync_and_check() {
    let roots = Roots::new();
    Roots::write(&roots.a, "keep.txt", "k");
    Roots::write(&roots.a, "cache/blob.bin", "a-side cache");
    Roots::write(&roots.b, "cache/other.bin", "b-side cache");

    run_sync(&roots, &["--exclude", "cache/"])
        .success()
        .stdout(predicate::str::contains("A -> B: 1"))
        .stdout(predicate::str::contains("B -> A: 0"));

    assert!(roots.b.join("keep.txt").exists());
    assert!(!roots.b.join("cache/blob.bin").exists());
    assert!(!roots.a.join("cache/other.bin").exists());

    duosync()
        .arg("check")
        .arg(&roots.a)
        .arg(&roots.b)
        .arg("--rclone")
        .arg(fake_rclone())
        .args(["--exclude", "cache/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync"));

    run_check(&roots).code(1);
}

#[test]
fn test_ls_json_lists_files() {
    let roots = Roots::new();
    Roots::write(&roots.a, "dir/one.txt", "1");
    Roots::write(&roots.a, "two.txt", "22");

    let output = duosync()
        .arg("ls")
        .arg(&roots.a)
        .arg("--json")
        .arg("--rclone")
        .arg(fake_rclone())
        .output()
        .expect("run ls");
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("ls --json prints JSON");
    let paths: Vec<&str> = entries
        .iter()
        .map(|e| e["path"].as_str().expect("path field"))
        .collect();
    assert_eq!(paths, vec!["dir/one.txt", "two.txt"]);
    assert_eq!(entries[1]["size"], 2);
}

#[test]
fn test_missing_root_is_usage_error() {
    let dir = TempDir::new().expect("create tempdir");

    duosync()
        .current_dir(dir.path())
        .args(["sync", "only-one-root"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("root_b is missing"));
}

#[test]
fn test_roots_and_command_from_config_file() {
    let roots = Roots::new();
    Roots::write(&roots.b, "from_b.txt", "b");
    let config_dir = TempDir::new().expect("create config dir");
    let config_path = config_dir.path().join("duosync.toml");
    fs::write(
        &config_path,
        format!(
            "root_a = {:?}\nroot_b = {:?}\nrclone = {:?}\n",
            roots.a.display().to_string(),
            roots.b.display().to_string(),
            fake_rclone().display().to_string()
        ),
    )
    .expect("write config");

    duosync()
        .arg("--config")
        .arg(&config_path)
        .args(["sync", "-q"])
        .assert()
        .success();

    assert!(roots.a.join("from_b.txt").exists());
}
