//! Tests for tab lifecycle, selection, categories and host message demux.

mod common;

use common::{CHAT, CODE_TRANSFORM, COMMONS, FEATURE_DEV, open_tab, recording_router};
use par_connector::protocol::{HostCommand, TabCategory};
use par_connector::{RegistryError, TabId};

// ----------------------------------------------------------------------------
// Tabs
// ----------------------------------------------------------------------------

#[test]
fn test_new_tab_is_unknown_and_selected() {
    let (mut router, log, _rx) = recording_router();
    router.add_tab("t1".into()).unwrap();

    let tab = router.registry().get_tab(&"t1".into()).unwrap();
    assert_eq!(tab.category, TabCategory::Unknown);
    assert!(tab.is_selected);
    assert!(log.is_empty());
}

#[test]
fn test_duplicate_add_keeps_existing_tab() {
    let (mut router, _log, _rx) = recording_router();
    open_tab(&mut router, "t1", TabCategory::FeatureDev);

    let err = router.add_tab("t1".into()).unwrap_err();
    assert_eq!(err, RegistryError::AlreadyExists(TabId::new("t1")));
    assert_eq!(router.registry().len(), 1);
    assert_eq!(
        router.registry().category_of(&"t1".into()),
        Some(TabCategory::FeatureDev)
    );
}

#[test]
fn test_select_same_tab_twice_returns_itself() {
    let (mut router, log, _rx) = recording_router();
    router.add_tab("t1".into()).unwrap();
    router.add_tab("t2".into()).unwrap();

    assert_eq!(router.set_selected(&"t1".into()), Some(TabId::new("t2")));
    assert_eq!(router.set_selected(&"t1".into()), Some(TabId::new("t1")));

    let selected: Vec<_> = router
        .registry()
        .tabs()
        .iter()
        .filter(|t| t.is_selected)
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(selected, vec!["t1"]);

    let calls = log.calls();
    assert_eq!(calls.len(), 1, "re-selection notified the chat handler");
    assert_eq!(calls[0].handler, CHAT);
    assert_eq!(calls[0].method, "tab_changed");
    assert_eq!(calls[0].detail, "t2");
}

#[test]
fn test_chat_observes_selection_of_any_category() {
    let (mut router, log, _rx) = recording_router();
    open_tab(&mut router, "fd", TabCategory::FeatureDev);
    open_tab(&mut router, "gt", TabCategory::CodeTransform);

    router.set_selected(&"fd".into());

    assert_eq!(log.methods(), vec![(CHAT, "tab_changed")]);
    assert_eq!(log.calls()[0].tab_id.as_deref(), Some("fd"));
}

#[test]
fn test_remove_notifies_category_handler() {
    let (mut router, log, _rx) = recording_router();
    open_tab(&mut router, "c", TabCategory::Chat);
    open_tab(&mut router, "f", TabCategory::FeatureDev);
    open_tab(&mut router, "g", TabCategory::CodeTransform);
    open_tab(&mut router, "u", TabCategory::Unknown);

    for id in ["c", "f", "g", "u"] {
        router.remove_tab(&id.into());
    }

    assert_eq!(
        log.methods(),
        vec![
            (CHAT, "tab_removed"),
            (FEATURE_DEV, "tab_removed"),
            (CODE_TRANSFORM, "tab_removed"),
        ]
    );
    assert!(router.registry().is_empty());
}

#[test]
fn test_remove_unregistered_tab_invokes_nothing() {
    let (mut router, log, mut rx) = recording_router();
    open_tab(&mut router, "t1", TabCategory::Chat);

    router.remove_tab(&"ghost".into());

    assert!(log.is_empty());
    assert!(rx.try_recv().is_err());
    assert_eq!(router.registry().len(), 1);
}

#[test]
fn test_category_sticks_once_set() {
    let (mut router, _log, _rx) = recording_router();
    router.add_tab("t1".into()).unwrap();

    assert!(router.set_category(&"t1".into(), TabCategory::CodeTransform));
    assert!(!router.set_category(&"t1".into(), TabCategory::Chat));
    assert!(!router.set_category(&"t1".into(), TabCategory::Unknown));

    assert_eq!(
        router.registry().category_of(&"t1".into()),
        Some(TabCategory::CodeTransform)
    );
}

#[test]
fn test_request_answer_only_feature_dev_and_transform() {
    let (mut router, log, _rx) = recording_router();
    for (id, category) in [
        ("c", TabCategory::Chat),
        ("f", TabCategory::FeatureDev),
        ("g", TabCategory::CodeTransform),
        ("u", TabCategory::Unknown),
    ] {
        open_tab(&mut router, id, category);
        router.request_answer(&id.into(), &common::prompt("go"));
    }

    assert_eq!(
        log.methods(),
        vec![(FEATURE_DEV, "request_answer"), (CODE_TRANSFORM, "request_answer")]
    );
}

// ----------------------------------------------------------------------------
// Host messages
// ----------------------------------------------------------------------------

#[test]
fn test_host_message_routed_by_sender() {
    let (mut router, log, _rx) = recording_router();

    router.receive_host_message(r#"{"sender":"featureDevChat","type":"updatePlaceholder"}"#);
    router.receive_host_message(r#"{"sender":"gumbyChat","type":"transformResult"}"#);
    router.receive_host_message(r#"{"sender":"amazonqCore","type":"authNeeded"}"#);
    router.receive_host_message(r#"{"sender":"CWChat","type":"chatMessage","tabID":"t9"}"#);

    assert_eq!(
        log.methods(),
        vec![
            (FEATURE_DEV, "handle_host_message"),
            (CODE_TRANSFORM, "handle_host_message"),
            (COMMONS, "handle_host_message"),
            (CHAT, "handle_host_message"),
        ]
    );
    assert_eq!(log.calls()[0].detail, "updatePlaceholder");
}

#[test]
fn test_host_message_does_not_need_ready_on_router() {
    // Subscription timing belongs to the service; the router itself routes
    // whatever it is handed.
    let (mut router, log, _rx) = recording_router();
    assert!(!router.is_ready());
    router.receive_host_message(r#"{"sender":"CWChat"}"#);
    assert_eq!(log.methods(), vec![(CHAT, "handle_host_message")]);
}

#[test]
fn test_malformed_host_payloads_are_swallowed() {
    let (mut router, log, mut rx) = recording_router();

    for raw in [
        "",
        "   ",
        "not json",
        "{\"sender\":",
        "[1,2,3]",
        "\"CWChat\"",
        "{\"type\":\"chatMessage\"}",
        "{\"sender\":42}",
    ] {
        router.receive_host_message(raw);
    }

    assert!(log.is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_unmatched_sender_dropped() {
    let (mut router, log, _rx) = recording_router();
    router.receive_host_message(r#"{"sender":"someoneElse","type":"x"}"#);
    router.receive_host_message(r#"{"sender":"cwchat","type":"x"}"#);
    assert!(log.is_empty());
}

// ----------------------------------------------------------------------------
// Readiness and focus
// ----------------------------------------------------------------------------

#[test]
fn test_mark_ready_is_idempotent() {
    let (mut router, _log, mut rx) = recording_router();

    assert!(router.mark_ready());
    assert!(!router.mark_ready());

    assert_eq!(rx.try_recv().unwrap(), HostCommand::UiIsReady);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_focus_wire_format() {
    let (mut router, _log, mut rx) = recording_router();
    router.focus_changed(true);

    let value = serde_json::to_value(rx.try_recv().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"command": "ui-focus", "type": "webview_focus", "tabType": "cwc"})
    );
}
