//! End-to-end tests: scripts replayed through the relay handlers.

use std::fs;

use par_connector::cli::load_config;
use par_connector::config::ConnectorConfig;
use par_connector::replay::{self, ReplaySummary};
use serde_json::Value;

async fn replay_script(script: &str, config: &ConnectorConfig) -> (ReplaySummary, Vec<Value>) {
    let inputs = replay::parse_script(script).unwrap();
    let mut out = Vec::new();
    let summary = replay::run(inputs, config, &mut out).await.unwrap();

    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (summary, lines)
}

#[tokio::test(start_paused = true)]
async fn test_replay_feature_dev_session() {
    let script = r#"
{"ui": {"input": "add-tab", "tabId": "t1"}}
{"ui": {"input": "set-category", "tabId": "t1", "category": "featuredev"}}
{"ui": {"input": "mark-ready"}}
{"wait_ms": 1}
{"ui": {"input": "event", "tabId": "t1", "event": {"event": "open-diff", "filePath": "src/lib.rs", "deleted": false, "messageId": "m1"}}}
{"ui": {"input": "event", "tabId": "t1", "event": {"event": "help"}}}
{"wait_ms": 1}
{"host": "{\"sender\":\"featureDevChat\",\"type\":\"updatePlaceholder\",\"tabID\":\"t1\"}"}
{"host": "not json"}
{"wait_ms": 1}
{"focus": true}
{"wait_ms": 1}
"#;
    let (summary, lines) = replay_script(script, &ConnectorConfig::default()).await;

    assert_eq!(summary.inputs, 12);
    assert_eq!(summary.host_commands, 3);
    assert_eq!(summary.ui_updates, 1);

    let commands: Vec<&str> = lines[..3]
        .iter()
        .map(|line| line["host"]["command"].as_str().unwrap())
        .collect();
    assert_eq!(commands, vec!["ui-is-ready", "open-diff", "ui-focus"]);

    let open_diff = &lines[1]["host"];
    assert_eq!(open_diff["tabID"], "t1");
    assert_eq!(open_diff["tabType"], "featuredev");
    assert_eq!(open_diff["filePath"], "src/lib.rs");

    let update = &lines[3]["ui"];
    assert_eq!(update["kind"], "host_message");
    assert_eq!(update["category"], "featuredev");
    assert_eq!(update["message"]["type"], "updatePlaceholder");
}

#[tokio::test(start_paused = true)]
async fn test_replay_deferred_prompt_goes_out_after_ready() {
    let script = r#"
{"ui": {"input": "add-tab", "tabId": "t1"}}
{"ui": {"input": "request-generative-answer", "tabId": "t1", "prompt": {"prompt": "hello", "command": "/help"}}}
{"ui": {"input": "mark-ready"}}
{"wait_ms": 2500}
"#;
    let (_, lines) = replay_script(script, &ConnectorConfig::default()).await;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["host"]["command"], "ui-is-ready");
    assert_eq!(lines[1]["host"]["command"], "chat-prompt");
    assert_eq!(lines[1]["host"]["chatMessage"], "hello");
    assert_eq!(lines[1]["host"]["chatCommand"], "/help");
    assert_eq!(lines[1]["host"]["tabType"], "cwc");
}

#[tokio::test(start_paused = true)]
async fn test_replay_reports_timeout() {
    let config = ConnectorConfig::from_yaml(
        "readiness:\n  retry_delay_ms: 10\n  max_retry_delay_ms: 10\n  max_attempts: 2\n",
    )
    .unwrap();
    let script = r#"
{"ui": {"input": "add-tab", "tabId": "t1"}}
{"ui": {"input": "request-generative-answer", "tabId": "t1", "prompt": {"prompt": "hello"}}}
{"wait_ms": 100}
"#;
    let (summary, lines) = replay_script(script, &config).await;

    assert_eq!(summary.host_commands, 0);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["ui"]["kind"], "generative_answer_timeout");
    assert_eq!(lines[0]["ui"]["tab_id"], "t1");
    assert_eq!(lines[0]["ui"]["attempts"], 2);
}

#[tokio::test(start_paused = true)]
async fn test_replay_with_custom_sender_tags_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "senders:\n  chat: panelChat\n  feature_dev: devChat\n  code_transform: transformChat\n  commons: core\n",
    )
    .unwrap();
    let config = load_config(Some(&path)).unwrap();

    let script = r#"
{"ui": {"input": "mark-ready"}}
{"wait_ms": 1}
{"host": "{\"sender\":\"panelChat\",\"type\":\"chatMessage\"}"}
{"host": "{\"sender\":\"CWChat\",\"type\":\"chatMessage\"}"}
{"wait_ms": 1}
"#;
    let (summary, lines) = replay_script(script, &config).await;

    assert_eq!(summary.ui_updates, 1);
    let update = lines.last().unwrap();
    assert_eq!(update["ui"]["category"], "cwc");
}

#[tokio::test]
async fn test_replay_without_waits_keeps_every_host_payload() {
    let script = r#"
{"ui": {"input": "mark-ready"}}
{"host": "{\"sender\":\"CWChat\",\"type\":\"chatMessage\"}"}
{"host": "{\"sender\":\"CWChat\",\"type\":\"chatMessage\"}"}
{"host": "{\"sender\":\"CWChat\",\"type\":\"chatMessage\"}"}
"#;
    for _ in 0..50 {
        let (summary, _) = replay_script(script, &ConnectorConfig::default()).await;
        assert_eq!(summary.host_commands, 1);
        assert_eq!(summary.ui_updates, 3);
    }
}

#[tokio::test]
async fn test_replay_without_waits_follows_script_order() {
    let script = r#"
{"focus": false}
{"ui": {"input": "add-tab", "tabId": "t1"}}
{"ui": {"input": "set-category", "tabId": "t1", "category": "cwc"}}
{"ui": {"input": "mark-ready"}}
{"ui": {"input": "event", "tabId": "t1", "event": {"event": "help"}}}
{"focus": true}
"#;
    for _ in 0..50 {
        let (summary, lines) = replay_script(script, &ConnectorConfig::default()).await;
        assert_eq!(summary.host_commands, 4);

        let commands: Vec<&str> = lines
            .iter()
            .map(|line| line["host"]["command"].as_str().unwrap())
            .collect();
        assert_eq!(commands, vec!["ui-is-ready", "ui-focus", "help", "ui-focus"]);
        assert_eq!(lines[1]["host"]["type"], "webview_blur");
        assert_eq!(lines[3]["host"]["type"], "webview_focus");
    }
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "readiness:\n  max_attempts: 0\n").unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("max_attempts"));
}
