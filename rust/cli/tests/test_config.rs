use hucoach_cli::config::{self, ValueSource};
use hucoach_cli::run;
use hucoach_engine::evaluator::EvaluatorKind;
use serde_json::Value;
use serial_test::serial;

fn clear_env() {
    unsafe {
        std::env::remove_var("HUCOACH_CONFIG");
        std::env::remove_var("HUCOACH_SEED");
        std::env::remove_var("HUCOACH_EVAL");
    }
}

fn cfg_json() -> (i32, Value, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["hucoach", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn defaults_are_reported_with_their_source() {
    clear_env();
    let (code, json, err) = cfg_json();
    assert_eq!(code, 0, "stderr: {err}");
    assert_eq!(json["init_stack"]["value"], 200);
    assert_eq!(json["sb"]["value"], 1);
    assert_eq!(json["bb"]["value"], 2);
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["evaluator"]["value"], "standard");
    for key in ["init_stack", "sb", "bb", "seed", "evaluator"] {
        assert_eq!(json[key]["source"], "default", "{key}");
    }
}

#[test]
#[serial]
fn env_beats_file_beats_default() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hucoach.toml");
    std::fs::write(
        &path,
        "init_stack = 50\nsb = 2\nbb = 4\nseed = 456\nevaluator = \"highcard\"\n",
    )
    .unwrap();
    unsafe {
        std::env::set_var("HUCOACH_CONFIG", &path);
    }

    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["init_stack"]["value"], 50);
    assert_eq!(json["bb"]["source"], "file");
    assert_eq!(json["seed"]["value"], 456);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["evaluator"]["value"], "highcard");

    unsafe {
        std::env::set_var("HUCOACH_SEED", "9");
        std::env::set_var("HUCOACH_EVAL", "standard");
    }
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(9));
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.config.evaluator, EvaluatorKind::Standard);
    assert_eq!(resolved.sources.evaluator, ValueSource::Env);
    assert_eq!(resolved.sources.init_stack, ValueSource::File);
    assert_eq!(resolved.config.hand_config().bb, 4);
    clear_env();
}

#[test]
#[serial]
fn configured_seed_drives_deal() {
    clear_env();
    unsafe {
        std::env::set_var("HUCOACH_SEED", "31");
    }
    let mut from_env = Vec::new();
    let mut err = Vec::new();
    assert_eq!(run(["hucoach", "deal"], &mut from_env, &mut err), 0);
    clear_env();

    let mut from_flag = Vec::new();
    assert_eq!(run(["hucoach", "deal", "--seed", "31"], &mut from_flag, &mut err), 0);
    assert_eq!(from_env, from_flag);
}

#[test]
#[serial]
fn invalid_values_fail_every_command() {
    clear_env();
    unsafe {
        std::env::set_var("HUCOACH_EVAL", "montecarlo");
    }
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("Invalid configuration"));
    assert!(err.contains("HUCOACH_EVAL"));

    let mut out = Vec::new();
    let mut err = Vec::new();
    assert_eq!(run(["hucoach", "deal", "--seed", "1"], &mut out, &mut err), 2);
    assert!(String::from_utf8_lossy(&err).contains("Configuration error"));
    clear_env();

    unsafe {
        std::env::set_var("HUCOACH_SEED", "abc");
    }
    assert_eq!(cfg_json().0, 2);
    clear_env();
}

#[test]
#[serial]
fn file_blinds_are_validated() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "sb = 5\nbb = 5\n").unwrap();
    unsafe {
        std::env::set_var("HUCOACH_CONFIG", &path);
    }
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("small blind 5 must be below big blind 5"));
    clear_env();
}
