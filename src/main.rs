use anyhow::{Context, Result};
use clap::Parser;
use devhelper::agent::ToolCallingAgent;
use devhelper::config::{self, DevHelperConfig};
use devhelper::llm::OpenAIClient;
use devhelper::logging::{self, LogLevel};
use devhelper::session::run_session;
use devhelper::tools::security::{ConsoleGate, ProjectRoot};
use devhelper::tools::FileTools;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "devhelper",
    version,
    about = "Ask questions about a local project; an LLM agent reads (and, with your approval, changes) its files"
)]
struct Cli {
    /// First question to ask; prompts for one when omitted
    #[arg(value_name = "QUESTION", trailing_var_arg = true)]
    question: Vec<String>,

    /// Project root all tool paths resolve against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file, instead of searching the default locations
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Model name
    #[arg(long, short = 'm', env = "DEVHELPER_MODEL")]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "DEVHELPER_BASE_URL")]
    base_url: Option<String>,

    /// Only offer tools that never change the project
    #[arg(long)]
    read_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// More logging; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut DevHelperConfig) {
        if let Some(ref model) = self.model {
            config.provider.model.clone_from(model);
        }
        if let Some(ref base_url) = self.base_url {
            config.provider.base_url.clone_from(base_url);
        }
        if self.read_only {
            config.read_only = true;
        }

        let mut level = self.log_level.unwrap_or(config.logging.level);
        for _ in 0..self.verbose {
            level = level.more_verbose();
        }
        config.logging.level = level;
    }

    fn initial_question(&self) -> Option<String> {
        (!self.question.is_empty()).then(|| self.question.join(" "))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_from(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    logging::init_logging(&config.logging)?;

    let root = ProjectRoot::new(&cli.root)
        .with_context(|| format!("cannot use '{}' as project root", cli.root.display()))?;
    info!(root = %root.path().display(), read_only = config.read_only, "starting");

    let tools = config.tool_registry(FileTools::new(root, ConsoleGate::stdio()))?;

    let provider = config.provider.to_provider_config(config.logging.log_requests);
    if provider.api_key.is_none() {
        warn!(
            env = config.provider.api_key_env.as_deref().unwrap_or("<none>"),
            "no API key found; requests are sent without authorization"
        );
    }
    let client = OpenAIClient::new(&provider)?;
    let mut agent = ToolCallingAgent::with_config(client, tools, config.agent_config());

    run_session(
        &mut agent,
        cli.initial_question(),
        &mut io::stdin(),
        &mut io::stdout(),
    )?;

    Ok(())
}
