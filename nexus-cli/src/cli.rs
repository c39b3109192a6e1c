//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nexus_rag::{AssistantConfig, Corpus, Domain, Status, UseCaseFilter};

/// TelcoNexus internal assistant.
#[derive(Parser, Debug)]
#[command(name = "telconexus", version, about = "TelcoNexus RAG operator assistant")]
pub struct Cli {
    /// Model identifier used for generation
    #[arg(long, global = true, default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Sampling temperature
    #[arg(long, global = true, default_value_t = 0.2)]
    pub temperature: f32,

    /// Upper bound on a single generation call, in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// JSON file replacing the built-in knowledge base
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the knowledge-base chunks selected for a query (no network)
    Retrieve {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Answer a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive chat session
    Chat,
    /// List catalog use cases
    UseCases {
        /// Network, IT, Customer or Security
        #[arg(long)]
        domain: Option<Domain>,
        /// Production, Development or Concept
        #[arg(long)]
        status: Option<Status>,
    },
    /// Show overview metrics, hourly activity and knowledge-base coverage
    Metrics,
    /// Describe the retrieval pipeline architecture
    Architecture,
}

/// One line typed into the chat loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatInput<'a> {
    Empty,
    Exit,
    Reset,
    Question(&'a str),
}

impl<'a> ChatInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => ChatInput::Empty,
            "/exit" | "/quit" => ChatInput::Exit,
            "/reset" => ChatInput::Reset,
            question => ChatInput::Question(question),
        }
    }
}

impl Cli {
    pub fn assistant_config(&self) -> anyhow::Result<AssistantConfig> {
        Ok(AssistantConfig::builder()
            .model(&self.model)
            .temperature(self.temperature)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?)
    }

    /// The corpus from `--corpus`, or the built-in knowledge base.
    pub fn load_corpus(&self) -> anyhow::Result<Corpus> {
        match &self.corpus {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read corpus file {}", path.display()))?;
                Ok(Corpus::from_json(&json)?)
            }
            None => Ok(Corpus::telco_default()),
        }
    }
}

/// Join multi-word positional arguments back into one string.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

impl From<&Commands> for UseCaseFilter {
    fn from(command: &Commands) -> Self {
        match command {
            Commands::UseCases { domain, status } => {
                UseCaseFilter { domain: *domain, status: *status }
            }
            _ => UseCaseFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "telconexus",
            "--temperature",
            "0.0",
            "ask",
            "hss",
            "5003",
            "error",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.temperature, 0.0);
        match &cli.command {
            Commands::Ask { question } => assert_eq!(join_words(question), "hss 5003 error"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_use_case_filters() {
        let cli = Cli::try_parse_from([
            "telconexus",
            "use-cases",
            "--domain",
            "network",
            "--status",
            "concept",
        ])
        .unwrap();
        let filter = UseCaseFilter::from(&cli.command);
        assert_eq!(filter.domain, Some(Domain::Network));
        assert_eq!(filter.status, Some(Status::Concept));
    }

    #[test]
    fn parses_architecture_command() {
        let cli = Cli::try_parse_from(["telconexus", "architecture", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Architecture));
    }

    #[test]
    fn chat_input_recognizes_commands() {
        assert_eq!(ChatInput::parse("   "), ChatInput::Empty);
        assert_eq!(ChatInput::parse("/exit"), ChatInput::Exit);
        assert_eq!(ChatInput::parse(" /reset "), ChatInput::Reset);
        assert_eq!(ChatInput::parse(" hss 5003 "), ChatInput::Question("hss 5003"));
        assert_eq!(ChatInput::parse("/resetting"), ChatInput::Question("/resetting"));
    }

    #[test]
    fn rejects_unknown_domain() {
        assert!(Cli::try_parse_from(["telconexus", "use-cases", "--domain", "legal"]).is_err());
    }

    #[test]
    fn invalid_temperature_fails_config() {
        let cli = Cli::try_parse_from(["telconexus", "--temperature", "9", "metrics"]).unwrap();
        assert!(cli.assistant_config().is_err());
    }

    #[test]
    fn missing_corpus_file_names_the_path() {
        let cli = Cli::try_parse_from([
            "telconexus",
            "--corpus",
            "/nonexistent/telconexus-corpus.json",
            "retrieve",
            "hss",
        ])
        .unwrap();
        let err = cli.load_corpus().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/telconexus-corpus.json"), "{err}");
    }

    #[test]
    fn default_corpus_when_flag_absent() {
        let cli = Cli::try_parse_from(["telconexus", "retrieve", "hss"]).unwrap();
        assert_eq!(cli.load_corpus().unwrap(), Corpus::telco_default());
    }
}
