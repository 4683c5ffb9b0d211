use agentsim::core::ControllerOptions;
use agentsim::core::conversation::Author;
use agentsim::transport::{ask_once, run_repl};
use agentsim::{ConversationController, HeuristicTable, ModeFlags};
use std::time::Duration;
use tokio::io::BufReader;

fn controller() -> ConversationController {
    ConversationController::new(
        HeuristicTable::builtin(),
        ModeFlags::default(),
        ControllerOptions {
            greeting: Some("Welcome aboard.".into()),
            ..ControllerOptions::default()
        },
    )
}

fn authors(ctl: &ConversationController) -> Vec<Author> {
    ctl.conversation()
        .messages()
        .iter()
        .map(|m| m.author())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn end_of_input_waits_for_pending_reply() {
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(&mut ctl, "Design a launch plan\n".as_bytes(), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Welcome aboard."));
    assert!(text.contains("thinking…"));
    assert!(text.contains("1. Clarify success metrics and guardrails"));
    assert_eq!(authors(&ctl), [Author::System, Author::User, Author::Agent]);
    assert!(!ctl.is_pending());
}

#[tokio::test(start_paused = true)]
async fn chat_typed_while_pending_is_dropped() {
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(&mut ctl, "plan a launch\nwrite the email\n".as_bytes(), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("this one was dropped"));
    assert_eq!(authors(&ctl), [Author::System, Author::User, Author::Agent]);
}

#[tokio::test(start_paused = true)]
async fn input_after_reply_is_accepted() {
    let reader = tokio_test::io::Builder::new()
        .read(b"plan a launch\n")
        .wait(Duration::from_secs(2))
        .read(b"write the email\n")
        .build();
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(&mut ctl, BufReader::new(reader), &mut out)
        .await
        .unwrap();

    assert_eq!(
        authors(&ctl),
        [
            Author::System,
            Author::User,
            Author::Agent,
            Author::User,
            Author::Agent,
        ]
    );
    let last = ctl.conversation().last().unwrap();
    assert_eq!(last.hint(), Some("heuristic: writing"));
}

#[tokio::test(start_paused = true)]
async fn quit_cancels_pending_reply() {
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(&mut ctl, "plan a launch\n/quit\nnever read\n".as_bytes(), &mut out)
        .await
        .unwrap();

    assert_eq!(authors(&ctl), [Author::System, Author::User]);
    assert!(!ctl.is_pending());
}

#[tokio::test(start_paused = true)]
async fn toggle_command_changes_modes() {
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(
        &mut ctl,
        "/toggle analysis\n/toggle summary\nplan a launch\n".as_bytes(),
        &mut out,
    )
    .await
    .unwrap();

    assert!(!ctl.modes().analysis);
    assert!(!ctl.modes().summary);
    let reply = ctl.conversation().last().unwrap();
    assert!(reply.content().starts_with("Plan:"));
}

#[tokio::test(start_paused = true)]
async fn export_prints_json_transcript() {
    let mut ctl = controller();
    let mut out = Vec::new();

    run_repl(&mut ctl, "/export\n".as_bytes(), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"author\": \"system\""));
    assert!(text.contains("\"content\": \"Welcome aboard.\""));
}

#[tokio::test(start_paused = true)]
async fn ask_once_returns_reply() {
    let mut ctl = controller();
    let reply = ask_once(&mut ctl, "debug the crash").await.unwrap();
    assert_eq!(reply.hint(), Some("heuristic: engineering"));

    assert!(ask_once(&mut ctl, "   ").await.is_none());
}
