use super::style;
use crate::core::conversation::{Author, Conversation, Message};
use crate::core::heuristics::HeuristicTable;
use crate::core::modes::{ModeFlags, ModeKind};
use crate::utils::text::truncate_with_ellipsis;
use std::fmt::Write;
use strum::IntoEnumIterator;

const HISTORY_PREVIEW_CHARS: usize = 72;

fn author_label(author: Author) -> String {
    match author {
        Author::User => style::cyan("you"),
        Author::Agent => style::accent("agent"),
        Author::System => style::dim("system"),
    }
}

/// Full message as shown in the chat stream.
pub fn message(message: &Message) -> String {
    let mut out = format!("{} ›", author_label(message.author()));
    if let Some(hint) = message.hint() {
        let _ = write!(out, " {}", style::dim(format!("({hint})")));
    }
    if message.content().is_empty() {
        let _ = write!(out, "\n{}", style::dim("(empty reply)"));
    } else {
        let _ = write!(out, "\n{}", message.content());
    }
    out
}

/// One line per message, content shortened.
pub fn history(conversation: &Conversation) -> String {
    if conversation.is_empty() {
        return style::dim("(no messages yet)");
    }
    conversation
        .messages()
        .iter()
        .enumerate()
        .map(|(index, m)| {
            let preview = truncate_with_ellipsis(&m.content().replace('\n', " "), HISTORY_PREVIEW_CHARS);
            format!(
                "{:>3}. {} {} {}",
                index + 1,
                style::dim(m.created_at().format("%H:%M:%S")),
                author_label(m.author()),
                preview
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn modes(flags: ModeFlags) -> String {
    ModeKind::iter()
        .map(|kind| {
            if flags.get(kind) {
                format!("{} {}", style::value("●"), kind)
            } else {
                format!("{} {}", style::dim("○"), style::dim(kind))
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn rules(table: &HeuristicTable) -> String {
    let mut out = String::new();
    for (index, rule) in table.rules().iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {} {}",
            style::accent(format!("{}.", index + 1)),
            style::header(&rule.id),
            style::dim(format!("[{}]", rule.keywords.join(", ")))
        );
        for step in &rule.steps {
            let _ = writeln!(out, "     - {step}");
        }
    }
    let _ = write!(
        out,
        "{} {} {}",
        style::accent("*"),
        style::header(&table.fallback().id),
        style::dim("(fallback)")
    );
    out
}
