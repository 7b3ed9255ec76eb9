//! Record-replay round-trip integration test.
//!
//! 1. Exercise the fs and runner ports through a recording context backed by
//!    the real system.
//! 2. Replay the cassette it wrote with `ServiceContext::replaying()`.
//! 3. Assert identical outputs, then replay again to check determinism.

#![cfg(unix)]

use std::path::Path;

use fmtsync::cassette::format::Cassette;
use fmtsync::context::ServiceContext;
use fmtsync::ports::Invocation;

/// Output snapshot of one pass over the ports.
#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    content: String,
    matches: Vec<String>,
    stdout: String,
    failed_exit: Option<i32>,
}

fn exercise_ports(ctx: &ServiceContext, dir: &Path) -> Snapshot {
    let content = ctx.fs.read_to_string(&dir.join("index.rst")).unwrap();
    let pattern = format!("{}/*.rst", dir.display());
    let matches = ctx.fs.glob(&pattern).unwrap();
    let stdout = ctx.runner.run(&Invocation::new("echo", ["formatted"])).stdout;
    let failed_exit = ctx.runner.run(&Invocation::new("sh", ["-c", "exit 3"])).exit_code;
    Snapshot {
        content,
        matches,
        stdout,
        failed_exit,
    }
}

#[test]
fn record_then_replay_produces_identical_outputs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.rst"), "Index\n=====\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a candidate\n").unwrap();
    let cassette_path = dir.path().join("cassettes").join("roundtrip.cassette.yaml");

    // --- Phase 1: record against the live system ---
    let recorded = {
        let ctx = ServiceContext::recording(&cassette_path);
        exercise_ports(&ctx, dir.path())
    };
    assert_eq!(recorded.content, "Index\n=====\n");
    assert_eq!(recorded.matches.len(), 1);
    assert_eq!(recorded.stdout, "formatted\n");
    assert_eq!(recorded.failed_exit, Some(3));

    let cassette = Cassette::load(&cassette_path).unwrap();
    let methods: Vec<(&str, &str)> =
        cassette.interactions.iter().map(|i| (i.port.as_str(), i.method.as_str())).collect();
    assert_eq!(
        methods,
        vec![("fs", "read_to_string"), ("fs", "glob"), ("runner", "run"), ("runner", "run")]
    );

    // --- Phase 2: replay and compare ---
    // Remove the file so a replay that reached the disk would fail.
    std::fs::remove_file(dir.path().join("index.rst")).unwrap();
    let ctx1 = ServiceContext::replaying(&cassette_path).unwrap();
    let replayed = exercise_ports(&ctx1, dir.path());
    assert_eq!(replayed, recorded);

    // --- Phase 3: replay a second time for determinism ---
    let ctx2 = ServiceContext::replaying(&cassette_path).unwrap();
    assert_eq!(exercise_ports(&ctx2, dir.path()), replayed);
}

#[test]
#[should_panic(expected = "Cassette exhausted")]
fn replay_panics_on_unrecorded_call() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("empty.cassette.yaml");
    {
        let ctx = ServiceContext::recording(&cassette_path);
        ctx.runner.run(&Invocation::new("true", Vec::<String>::new()));
    }

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let _ = ctx.git.push();
}
