use ghfilter::event::Event;
use ghfilter::filter::Condition;

fn payload_event(json: &str) -> Event {
    Event::default()
        .with_payload(json)
        .expect("valid JSON payload")
}

/// Assert the condition matches exactly the event at `want` (or none)
fn assert_matches_only(condition: &Condition, events: &[Event], want: Option<usize>) {
    for (idx, event) in events.iter().enumerate() {
        let matched = condition.matches(event);
        if Some(idx) == want {
            assert!(matched, "condition incorrectly missed\nevent: {event:?}\ncondition: {condition:?}");
        } else {
            assert!(!matched, "condition incorrectly matched\nevent: {event:?}\ncondition: {condition:?}");
        }
    }
}

#[test]
fn test_empty_condition_matches_any_event() {
    let condition = Condition::default();
    let events = [
        Event::default(),
        Event::new("PushEvent").with_public(true),
        payload_event(r#"{"action":"opened"}"#).with_organization(1),
    ];
    for event in &events {
        assert!(condition.matches(event));
    }
}

#[test]
fn test_type_is_exact_and_case_sensitive() {
    let events = [Event::new("IssuesEvent"), Event::new("IssuesCommentEvent")];

    assert_matches_only(&Condition::new().with_type("NonExistentEvent"), &events, None);
    assert_matches_only(&Condition::new().with_type("IssuesEvent"), &events, Some(0));
    assert_matches_only(&Condition::new().with_type("IssuesCommentEvent"), &events, Some(1));
    assert_matches_only(&Condition::new().with_type("issuesevent"), &events, None);
}

#[test]
fn test_payload_action() {
    let events = [
        payload_event(r#"{"action":"opened"}"#),
        payload_event(r#"{"action":"created"}"#),
    ];

    assert_matches_only(&Condition::new().with_payload_action("opened"), &events, Some(0));
    assert_matches_only(&Condition::new().with_payload_action("created"), &events, Some(1));
}

#[test]
fn test_payload_action_is_case_insensitive() {
    let condition = Condition::new().with_payload_action("OPENED");
    assert!(condition.matches(&payload_event(r#"{"action":"opened"}"#)));
    assert!(condition.matches(&payload_event(r#"{"action":"Opened"}"#)));
    assert!(!condition.matches(&payload_event(r#"{"action":"closed"}"#)));
}

#[test]
fn test_payload_issue_label_membership() {
    let condition = Condition::new().with_payload_issue_label("lbl");
    assert!(condition.matches(&payload_event(r#"{"issue":{"labels":["LBL","x"]}}"#)));
    assert!(condition.matches(&payload_event(r#"{"issue":{"labels":["x","Lbl"]}}"#)));
    assert!(!condition.matches(&payload_event(r#"{"issue":{"labels":[]}}"#)));
    assert!(!condition.matches(&payload_event(r#"{"issue":{"labels":["lbl2"]}}"#)));
}

#[test]
fn test_payload_issue_label_objects() {
    let condition = Condition::new().with_payload_issue_label("Bug");
    let event = payload_event(
        r#"{"action":"labeled","issue":{"number":3,"labels":[{"id":1,"name":"bug","color":"d73a4a"}]}}"#,
    );
    assert!(condition.matches(&event));
}

#[test]
fn test_payload_issue_milestone_title() {
    let condition = Condition::new().with_payload_issue_milestone_title("v1.0");
    assert!(condition.matches(&payload_event(
        r#"{"issue":{"milestone":{"title":"V1.0","number":1}}}"#
    )));
    assert!(!condition.matches(&payload_event(
        r#"{"issue":{"milestone":{"title":"v2.0"}}}"#
    )));
}

#[test]
fn test_payload_issue_title_regexp_uses_search() {
    let condition = Condition::new().with_payload_issue_title_regexp(r"(?i)will\s+match");
    assert!(condition.matches(&payload_event(
        r#"{"issue":{"title":"This will Match"}}"#
    )));
    assert!(!condition.matches(&payload_event(
        r#"{"issue":{"title":"This will Not Match"}}"#
    )));
}

#[test]
fn test_payload_issue_body_regexp() {
    let condition = Condition::new().with_payload_issue_body_regexp(r"^steps to reproduce");
    assert!(condition.matches(&payload_event(
        r#"{"issue":{"body":"steps to reproduce: run it"}}"#
    )));
    assert!(!condition.matches(&payload_event(
        r#"{"issue":{"body":"see steps to reproduce"}}"#
    )));
}

#[test]
fn test_public() {
    let events = [
        Event::default().with_public(true),
        Event::default().with_public(false),
    ];

    assert_matches_only(&Condition::new().with_public(true), &events, Some(0));
    assert_matches_only(&Condition::new().with_public(false), &events, Some(1));
}

#[test]
fn test_unknown_visibility_reads_as_private() {
    assert!(Condition::new().with_public(false).matches(&Event::default()));
    assert!(!Condition::new().with_public(true).matches(&Event::default()));
}

#[test]
fn test_public_is_ignored_without_compare_flag() {
    let condition = Condition {
        public: true,
        ..Condition::default()
    };
    assert!(condition.matches(&Event::default().with_public(false)));
}

#[test]
fn test_organization_id() {
    let events = [
        Event::default(),
        Event::default().with_organization(1),
        Event::default().with_organization(2),
    ];

    assert_matches_only(&Condition::new().with_organization_id(1), &events, Some(1));
}

#[test]
fn test_repository_id() {
    let events = [
        Event::default(),
        Event::default().with_repository(1),
        Event::default().with_repository(2),
    ];

    assert_matches_only(&Condition::new().with_repository_id(2), &events, Some(2));
}

#[test]
fn test_negation_inverts_present_data() {
    let present = [
        (
            Condition::new().with_type("IssuesEvent"),
            Event::new("PushEvent"),
        ),
        (
            Condition::new().with_payload_action("opened"),
            payload_event(r#"{"action":"closed"}"#),
        ),
        (
            Condition::new().with_payload_issue_label("bug"),
            payload_event(r#"{"issue":{"labels":["bug"]}}"#),
        ),
        (
            Condition::new().with_payload_issue_milestone_title("v1"),
            payload_event(r#"{"issue":{"milestone":{"title":"v2"}}}"#),
        ),
        (
            Condition::new().with_payload_issue_title_regexp("crash"),
            payload_event(r#"{"issue":{"title":"crash on boot"}}"#),
        ),
        (
            Condition::new().with_payload_issue_body_regexp("crash"),
            payload_event(r#"{"issue":{"body":"all good"}}"#),
        ),
        (
            Condition::new().with_public(true),
            Event::default().with_public(false),
        ),
        (
            Condition::new().with_organization_id(4),
            Event::default().with_organization(4),
        ),
        (
            Condition::new().with_repository_id(4),
            Event::default().with_repository(5),
        ),
    ];

    for (condition, event) in present {
        let plain = condition.matches(&event);
        let negated = condition.clone().negated().matches(&event);
        assert_eq!(negated, !plain, "negation law broken for {condition:?}");
    }
}

#[test]
fn test_negation_does_not_invert_missing_payload() {
    let no_payload = Event::new("IssuesEvent");
    let conditions = [
        Condition::new().with_payload_action("opened"),
        Condition::new().with_payload_issue_label("bug"),
        Condition::new().with_payload_issue_milestone_title("v1"),
        Condition::new().with_payload_issue_title_regexp("x"),
        Condition::new().with_payload_issue_body_regexp("x"),
    ];

    for condition in conditions {
        assert!(!condition.matches(&no_payload), "{condition:?}");
        assert!(!condition.clone().negated().matches(&no_payload), "{condition:?}");
    }
}

#[test]
fn test_negation_does_not_invert_missing_or_malformed_path() {
    let cases = [
        (
            Condition::new().with_payload_action("opened"),
            r#"{"ref":"refs/heads/main"}"#,
        ),
        (
            Condition::new().with_payload_action("opened"),
            r#"{"action":null}"#,
        ),
        (
            Condition::new().with_payload_issue_label("bug"),
            r#"{"issue":{"labels":[1,2]}}"#,
        ),
        (
            Condition::new().with_payload_issue_milestone_title("v1"),
            r#"{"issue":{"milestone":null}}"#,
        ),
        (
            Condition::new().with_payload_issue_title_regexp("x"),
            r#"{"issue":"not an object"}"#,
        ),
        (
            Condition::new().with_payload_issue_body_regexp("x"),
            r#"[]"#,
        ),
    ];

    for (condition, payload) in cases {
        let event = payload_event(payload);
        assert!(!condition.matches(&event), "{condition:?} on {payload}");
        assert!(
            !condition.clone().negated().matches(&event),
            "negated {condition:?} on {payload}"
        );
    }
}

#[test]
fn test_malformed_regexp_never_matches() {
    let event = payload_event(r#"{"issue":{"title":"anything","body":"anything"}}"#);
    for condition in [
        Condition::new().with_payload_issue_title_regexp("(unclosed"),
        Condition::new().with_payload_issue_body_regexp("[z-a]"),
    ] {
        assert!(!condition.matches(&event));
        assert!(!condition.clone().negated().matches(&event));
    }
}

#[test]
fn test_all_sub_checks_together() {
    let event = Event::new("IssuesEvent")
        .with_payload(
            r#"{
                "action": "opened",
                "issue": {
                    "title": "Panic when parsing config",
                    "body": "thread 'main' panicked at src/config.rs",
                    "labels": [{"name": "bug"}, {"name": "P1"}],
                    "milestone": {"title": "1.2.0"}
                }
            }"#,
        )
        .unwrap()
        .with_public(true)
        .with_organization(10)
        .with_repository(20);

    let condition = Condition::new()
        .with_type("IssuesEvent")
        .with_payload_action("Opened")
        .with_payload_issue_label("p1")
        .with_payload_issue_milestone_title("1.2.0")
        .with_payload_issue_title_regexp(r"(?i)panic")
        .with_payload_issue_body_regexp(r"panicked at \S+\.rs")
        .with_public(true)
        .with_organization_id(10)
        .with_repository_id(20);

    assert!(condition.matches(&event));
    assert!(!condition.clone().negated().matches(&event));
    assert!(!condition.with_repository_id(21).matches(&event));
}
