//! # nexus-cli
//!
//! Terminal front end for the TelcoNexus assistant: retrieval inspection,
//! one-shot and interactive answering, and the use-case, metrics and
//! architecture listings.

pub mod cli;
pub mod render;

use std::sync::Arc;

use anyhow::Result;
use nexus_rag::{Assistant, Catalog, GeminiGenerator, KeywordRetriever, Retriever, Transcript};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::cli::{ChatInput, Cli, Commands, join_words};

const GREETING: &str = "TelcoNexus Internal Assistant. Ask about runbooks, policies or \
network architecture. Type /reset to start over or /exit to quit.";

/// Execute the parsed command, writing results to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Retrieve { query } => {
            let corpus = cli.load_corpus()?;
            let chunks = KeywordRetriever::default().retrieve(&join_words(query), &corpus);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chunks)?);
            } else {
                print!("{}", render::chunks(&chunks));
            }
        }
        Commands::Ask { question } => {
            let assistant = build_assistant(&cli)?;
            let answer = assistant.answer(&join_words(question), &[]).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print!("{}", render::answer(&answer));
            }
        }
        Commands::Chat => chat(&build_assistant(&cli)?).await?,
        Commands::UseCases { .. } => {
            let catalog = Catalog::telco_default();
            let rows = catalog.use_cases((&cli.command).into());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render::use_cases(&rows));
            }
        }
        Commands::Metrics => {
            let catalog = Catalog::telco_default();
            if cli.json {
                let overview = serde_json::json!({
                    "metrics": catalog.metrics(),
                    "activity": catalog.activity(),
                    "coverage": catalog.coverage(),
                });
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print!("{}", render::metrics(catalog.metrics()));
                print!("\n{}", render::activity(catalog.activity()));
                print!("\n{}", render::coverage(catalog.coverage()));
            }
        }
        Commands::Architecture => {
            let catalog = Catalog::telco_default();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(catalog.architecture())?);
            } else {
                print!("{}", render::architecture(catalog.architecture()));
            }
        }
    }
    Ok(())
}

fn build_assistant(cli: &Cli) -> Result<Assistant> {
    let generator = GeminiGenerator::from_env()?;
    let config = cli.assistant_config()?;
    info!(model = %config.model, "assistant ready");
    Ok(Assistant::builder()
        .config(config)
        .corpus(Arc::new(cli.load_corpus()?))
        .generator(Arc::new(generator))
        .build()?)
}

async fn chat(assistant: &Assistant) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut transcript = Transcript::with_greeting(GREETING);
    println!("{GREETING}\n");

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let question = match ChatInput::parse(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => break,
            ChatInput::Reset => {
                transcript.reset();
                println!("Session reset.\n\n{GREETING}\n");
                continue;
            }
            ChatInput::Question(question) => question,
        };
        if let Err(e) = editor.add_history_entry(question) {
            debug!(error = %e, "failed to record history entry");
        }

        let answer = assistant.answer(question, transcript.history()).await;
        transcript.push_user(question);
        transcript.push_answer(&answer);
        println!("\n{}", render::answer(&answer));
    }

    info!(messages = transcript.len(), "chat session ended");
    Ok(())
}
