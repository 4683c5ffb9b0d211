use crate::cli::commands::{Cli, Commands};
use agentsim::transport::{ask_once, run_repl};
use agentsim::ui::render;
use agentsim::{Config, ConversationController};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::BufReader;
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let mut controller = ConversationController::from_config(&config);
    controller.set_modes(cli.modes.apply(config.modes));
    info!(
        modes = %controller.modes(),
        rules = controller.table().rules().len(),
        "controller ready"
    );

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let mut stdout = std::io::stdout();
            run_repl(&mut controller, BufReader::new(tokio::io::stdin()), &mut stdout)
                .await
                .context("interactive session failed")?;
        }
        Commands::Ask { message } => {
            let message = message.join(" ");
            let Some(reply) = ask_once(&mut controller, &message).await else {
                anyhow::bail!("message was empty, nothing to ask");
            };
            println!("{}", reply.content());
        }
        Commands::Rules => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", render::rules(controller.table()))?;
        }
    }

    Ok(())
}
