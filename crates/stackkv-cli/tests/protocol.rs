//! End-to-end protocol tests: scripts in, replies out.

use std::fs::File;
use std::io::{BufReader, Write};

use tempfile::NamedTempFile;

use stackkv_cli::{run, ProtocolConfig, RunSummary, Session};
use stackkv_core::Store;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn replies(script: &str) -> Vec<String> {
    let mut session = Session::default();
    let mut out = Vec::new();
    run(script.as_bytes(), &mut out, &mut session).unwrap();
    String::from_utf8(out).unwrap().lines().map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// Data commands
// ---------------------------------------------------------------------------

#[test]
fn test_set_get_unset() {
    let out = replies("SET ex 10\nGET ex\nUNSET ex\nGET ex\nEND\n");
    assert_eq!(out, vec!["10", "NULL"]);
}

#[test]
fn test_num_equal_to() {
    let out = replies(
        "SET a 10\nSET b 10\nNUMEQUALTO 10\nNUMEQUALTO 20\nSET b 30\nNUMEQUALTO 10\nEND\n",
    );
    assert_eq!(out, vec!["2", "0", "1"]);
}

// ---------------------------------------------------------------------------
// Transaction commands
// ---------------------------------------------------------------------------

#[test]
fn test_nested_rollback() {
    let out = replies(
        "BEGIN\nSET a 10\nGET a\nBEGIN\nSET a 20\nGET a\nROLLBACK\nGET a\nROLLBACK\nGET a\nEND\n",
    );
    assert_eq!(out, vec!["10", "20", "10", "NULL"]);
}

#[test]
fn test_commit_closes_all_transactions() {
    let out = replies("BEGIN\nSET a 30\nBEGIN\nSET a 40\nCOMMIT\nGET a\nROLLBACK\nEND\n");
    assert_eq!(out, vec!["40", "NO TRANSACTION"]);
}

#[test]
fn test_unset_inside_transactions() {
    let out = replies(
        "SET a 50\nBEGIN\nGET a\nSET a 60\nBEGIN\nUNSET a\nGET a\nROLLBACK\nGET a\nCOMMIT\nGET a\nEND\n",
    );
    assert_eq!(out, vec!["50", "NULL", "60", "60"]);
}

#[test]
fn test_counts_follow_rollback() {
    let out = replies(
        "SET a 10\nBEGIN\nNUMEQUALTO 10\nBEGIN\nUNSET a\nNUMEQUALTO 10\nROLLBACK\nNUMEQUALTO 10\nCOMMIT\nEND\n",
    );
    assert_eq!(out, vec!["1", "0", "1"]);
}

#[test]
fn test_rollback_of_unset_never_set_key() {
    let mut session = Session::default();
    let mut out = Vec::new();
    run("BEGIN\nUNSET bar\nROLLBACK\nGET bar\n".as_bytes(), &mut out, &mut session).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "NULL\n");

    let snap = session.store().inspect();
    assert!(!snap.frame_index.contains_key("bar"));
    assert!(snap.value_counts.is_empty());
    assert!(snap.verify().is_ok());
}

#[test]
fn test_no_transaction_outside_begin() {
    let out = replies("COMMIT\nROLLBACK\nEND\n");
    assert_eq!(out, vec!["NO TRANSACTION", "NO TRANSACTION"]);
}

// ---------------------------------------------------------------------------
// Script files
// ---------------------------------------------------------------------------

#[test]
fn test_script_file() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "SET foo 3").unwrap();
    writeln!(script, "BEGIN").unwrap();
    writeln!(script, "set foo 4").unwrap();
    writeln!(script, "get foo").unwrap();
    writeln!(script, "ROLLBACK").unwrap();
    writeln!(script, "GET foo").unwrap();
    writeln!(script, "END").unwrap();
    script.flush().unwrap();

    let file = File::open(script.path()).unwrap();
    let mut session = Session::new(Store::new(), ProtocolConfig::default());
    let mut out = Vec::new();
    let summary = run(BufReader::new(file), &mut out, &mut session).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "4\n3\n");
    assert_eq!(summary, RunSummary { commands: 7, errors: 0, ended: true });
    assert_eq!(session.store().committed_value("foo"), Some("3"));
}

#[test]
fn test_state_survives_across_runs_in_one_session() {
    let mut session = Session::default();
    let mut out = Vec::new();
    run("SET a 1\nBEGIN\nSET a 2\n".as_bytes(), &mut out, &mut session).unwrap();
    run("GET a\nCOMMIT\nGET a\n".as_bytes(), &mut out, &mut session).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "2\n2\n");
    assert_eq!(session.store().depth(), 0);
}
