use agentsim::core::conversation::Author;
use agentsim::core::{ControllerOptions, ControllerState, IgnoreReason, ReplyDelay};
use agentsim::{Config, ConversationController, HeuristicTable, ModeFlags, SubmitOutcome};
use std::time::Duration;

fn controller_with(modes: ModeFlags, options: ControllerOptions) -> ConversationController {
    ConversationController::new(HeuristicTable::builtin(), modes, options)
}

fn controller() -> ConversationController {
    controller_with(ModeFlags::default(), ControllerOptions::default())
}

#[test]
fn whitespace_submit_leaves_state_unchanged() {
    let mut ctl = controller();
    assert_eq!(
        ctl.submit("   "),
        SubmitOutcome::Ignored(IgnoreReason::EmptyInput)
    );
    assert!(ctl.conversation().is_empty());
    assert_eq!(ctl.state(), ControllerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn submit_while_pending_is_dropped() {
    let mut ctl = controller();
    assert!(ctl.submit("plan the quarter").is_accepted());
    assert_eq!(ctl.state(), ControllerState::Pending);
    let len_after_submit = ctl.conversation().len();

    assert_eq!(
        ctl.submit("another thing"),
        SubmitOutcome::Ignored(IgnoreReason::ReplyPending)
    );
    assert_eq!(ctl.conversation().len(), len_after_submit);

    let reply = ctl.next_reply().await.unwrap();
    assert_eq!(reply.author(), Author::Agent);
    assert_eq!(ctl.conversation().len(), len_after_submit + 1);

    // The dropped message never shows up.
    assert!(
        ctl.conversation()
            .messages()
            .iter()
            .all(|m| m.content() != "another thing")
    );
    assert!(ctl.submit("another thing").is_accepted());
}

#[tokio::test(start_paused = true)]
async fn accepted_delay_is_within_default_range() {
    let mut ctl = controller();
    let SubmitOutcome::Accepted { delay, .. } = ctl.submit("hello") else {
        panic!("expected accepted submission");
    };
    assert!(delay >= Duration::from_millis(550));
    assert!(delay <= Duration::from_millis(950));
}

#[tokio::test(start_paused = true)]
async fn reply_arrives_only_after_delay() {
    let mut ctl = controller_with(
        ModeFlags::default(),
        ControllerOptions {
            delay: ReplyDelay::fixed(Duration::from_millis(700)),
            ..ControllerOptions::default()
        },
    );
    assert!(ctl.submit("draft an email").is_accepted());

    let early = tokio::time::timeout(Duration::from_millis(600), ctl.next_reply()).await;
    assert!(early.is_err());
    assert!(ctl.is_pending());
    assert_eq!(ctl.conversation().len(), 1);

    let reply = ctl.next_reply().await.unwrap();
    assert_eq!(reply.hint(), Some("heuristic: writing"));
    assert!(!ctl.is_pending());
}

#[tokio::test(start_paused = true)]
async fn agent_messages_follow_their_user_messages() {
    let mut ctl = controller();
    for input in ["plan a launch", "compare vendors", "fix this bug"] {
        assert!(ctl.submit(input).is_accepted());
        ctl.next_reply().await.unwrap();
    }

    let authors: Vec<Author> = ctl
        .conversation()
        .messages()
        .iter()
        .map(|m| m.author())
        .collect();
    assert_eq!(
        authors,
        [
            Author::User,
            Author::Agent,
            Author::User,
            Author::Agent,
            Author::User,
            Author::Agent,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn recent_signals_come_from_earlier_turns_only() {
    let mut ctl = controller();
    assert!(ctl.submit("first question").is_accepted());
    let first = ctl.next_reply().await.unwrap();
    assert!(!first.content().contains("Recent signals"));

    assert!(ctl.submit("second question").is_accepted());
    let second = ctl.next_reply().await.unwrap();
    assert!(second.content().contains("Recent signals:\n- first question"));
    assert!(!second.content().contains("- second question"));
}

#[tokio::test(start_paused = true)]
async fn all_modes_off_appends_empty_agent_message_by_default() {
    let mut ctl = controller_with(ModeFlags::none(), ControllerOptions::default());
    assert!(ctl.submit("plan").is_accepted());
    let reply = ctl.next_reply().await.unwrap();
    assert_eq!(reply.author(), Author::Agent);
    assert!(reply.content().is_empty());
}

#[tokio::test(start_paused = true)]
async fn mode_changes_apply_to_next_submission() {
    let mut ctl = controller();
    ctl.set_modes(ModeFlags::none());
    ctl.set_mode(agentsim::ModeKind::Planning, true);

    assert!(ctl.submit("plan a launch").is_accepted());
    let reply = ctl.next_reply().await.unwrap();
    assert!(reply.content().starts_with("Plan:\n1. "));
    assert!(!reply.content().contains("Analysis:"));
}

#[tokio::test(start_paused = true)]
async fn dropping_controller_mid_delay_is_safe() {
    let mut ctl = controller();
    assert!(ctl.submit("plan").is_accepted());
    drop(ctl);
    tokio::time::sleep(Duration::from_secs(2)).await;
}

#[tokio::test(start_paused = true)]
async fn controller_from_config_uses_custom_rules_and_greeting() {
    let config: Config = toml::from_str(
        r#"
        [reply]
        delay_min_ms = 0
        delay_max_ms = 0
        greeting = "hi"

        [[heuristics.rules]]
        id = "launch"
        keywords = ["Launch"]
        narrative = "Launches need a date."
        steps = ["Pick the date"]
        "#,
    )
    .unwrap();

    let mut ctl = ConversationController::from_config(&config);
    assert_eq!(ctl.conversation().messages()[0].author(), Author::System);

    let SubmitOutcome::Accepted { delay, .. } = ctl.submit("launch plan") else {
        panic!("expected accepted submission");
    };
    assert_eq!(delay, Duration::ZERO);
    let reply = ctl.next_reply().await.unwrap();
    assert_eq!(reply.hint(), Some("heuristic: launch"));
    assert!(reply.content().contains("1. Pick the date"));
}
