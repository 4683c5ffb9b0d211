use crate::core::controller::{ConversationController, IgnoreReason, SubmitOutcome};
use crate::core::conversation::Message;
use crate::core::modes::ModeKind;
use crate::error::Result;
use crate::ui::{render, style};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
/modes                      show which reply segments are on
/toggle <mode>              flip analysis, planning or summary
/history                    list the conversation so far
/export                     print the conversation as JSON
/rules                      list the heuristic table
/quit, /exit                leave";

/// A single line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Chat(String),
    Modes,
    Toggle(ModeKind),
    History,
    Export,
    Rules,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Chat(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "quit" | "exit" => ReplCommand::Quit,
        "modes" => ReplCommand::Modes,
        "toggle" => match parts.next() {
            Some(name) => {
                ModeKind::parse(name).map_or_else(|e| ReplCommand::Invalid(e.to_string()), ReplCommand::Toggle)
            }
            None => ReplCommand::Invalid("usage: /toggle <analysis|planning|summary>".into()),
        },
        "history" => ReplCommand::History,
        "export" => ReplCommand::Export,
        "rules" => ReplCommand::Rules,
        "help" => ReplCommand::Help,
        other => ReplCommand::Invalid(format!("unknown command '/{other}', try /help")),
    }
}

enum Flow {
    Continue,
    Quit,
}

fn handle_line<W: Write>(
    controller: &mut ConversationController,
    line: &str,
    out: &mut W,
) -> Result<Flow> {
    match parse_line(line) {
        ReplCommand::Chat(text) => match controller.submit(&text) {
            SubmitOutcome::Accepted { .. } => writeln!(out, "{}", style::dim("thinking…"))?,
            SubmitOutcome::Ignored(IgnoreReason::ReplyPending) => writeln!(
                out,
                "{}",
                style::yellow("Still working on your last message; this one was dropped.")
            )?,
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput) => {}
        },
        ReplCommand::Modes => writeln!(out, "{}", render::modes(controller.modes()))?,
        ReplCommand::Toggle(kind) => {
            controller.toggle_mode(kind);
            writeln!(out, "{}", render::modes(controller.modes()))?;
        }
        ReplCommand::History => writeln!(out, "{}", render::history(controller.conversation()))?,
        ReplCommand::Export => writeln!(out, "{}", controller.conversation().to_json_pretty()?)?,
        ReplCommand::Rules => writeln!(out, "{}", render::rules(controller.table()))?,
        ReplCommand::Help => writeln!(out, "{HELP}")?,
        ReplCommand::Quit => return Ok(Flow::Quit),
        ReplCommand::Invalid(reason) => writeln!(out, "{}", style::yellow(reason))?,
    }
    Ok(Flow::Continue)
}

fn print_reply<W: Write>(reply: Option<Message>, out: &mut W) -> Result<()> {
    if let Some(reply) = reply {
        writeln!(out, "\n{}\n", render::message(&reply))?;
    }
    Ok(())
}

/// Interactive chat over any line source.
///
/// Lines typed while a reply is pending are still read, so commands keep
/// working and chat input is reported as dropped. A pending reply is
/// cancelled on `/quit`; on end of input it is awaited and printed first.
pub async fn run_repl<R, W>(
    controller: &mut ConversationController,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", style::header("agentsim interactive mode"))?;
    writeln!(out, "{}\n", style::dim("Type /help for commands, /quit to exit."))?;
    for message in controller.conversation().messages() {
        writeln!(out, "{}\n", render::message(message))?;
    }
    writeln!(out, "{}", render::modes(controller.modes()))?;

    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        if !controller.is_pending() {
            if !input_open {
                break;
            }
            match lines.next_line().await? {
                Some(line) => {
                    if let Flow::Quit = handle_line(controller, &line, out)? {
                        break;
                    }
                }
                None => input_open = false,
            }
            continue;
        }

        if !input_open {
            let reply = controller.next_reply().await;
            print_reply(reply, out)?;
            continue;
        }

        tokio::select! {
            reply = controller.next_reply() => print_reply(reply, out)?,
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Flow::Quit = handle_line(controller, &line, out)? {
                        break;
                    }
                }
                None => input_open = false,
            },
        }
    }

    controller.shutdown();
    out.flush()?;
    Ok(())
}

/// Submit one message and wait for the reply.
pub async fn ask_once(controller: &mut ConversationController, message: &str) -> Option<Message> {
    if !controller.submit(message).is_accepted() {
        return None;
    }
    controller.next_reply().await
}
