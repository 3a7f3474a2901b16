//! CLI entrypoint for DishMuse
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use dishmuse_application::{
    BehaviorConfig, ConversationLogger, FilterVisionLabelsUseCase, GeneratePlatingImagesUseCase,
    HandleTurnUseCase, ImageGenerator, NoConversationLogger, NoImageGenerator,
};
use dishmuse_domain::{
    ControlHints, OutputFormat, PromptComposer, Severity, SystemPromptTemplate, TurnRequest,
    requests_shopping_list,
};
use dishmuse_infrastructure::{
    AnthropicChatModel, ConfigLoader, FileConfig, FireflyImageGenerator, InMemorySessionStore,
    JsonlConversationLogger,
};
use dishmuse_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, ProgressReporter, ReplConfig, StdioServer,
    formatter_for,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stderr keeps stdout free for JSON lines
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => anyhow::bail!("Invalid configuration: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting DishMuse with model {}", config.model.model);

    // === Dependency Injection ===
    let model = Arc::new(
        AnthropicChatModel::from_config(&config.model).context("Chat model unavailable")?,
    );
    let store = Arc::new(InMemorySessionStore::new());
    let composer = PromptComposer::new(&load_template(&config)?, &config.assistant.name);
    let behavior = BehaviorConfig::from_timeout_seconds(config.model.timeout_seconds)
        .with_max_history_messages(config.session.max_history_turns);

    let conversation_logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log
    {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let handle_turn = Arc::new(
        HandleTurnUseCase::new(model.clone(), store, composer, behavior.clone())
            .with_conversation_logger(conversation_logger.clone()),
    );
    let vision = Arc::new(
        FilterVisionLabelsUseCase::new(model, behavior)
            .with_model_override(config.vision_model())
            .with_conversation_logger(conversation_logger),
    );

    match cli.command() {
        Command::Chat { in_store } => {
            let generator: Arc<dyn ImageGenerator> = if config.images.enabled {
                Arc::new(FireflyImageGenerator::from_config(&config.images))
            } else {
                Arc::new(NoImageGenerator)
            };
            let images = Arc::new(
                GeneratePlatingImagesUseCase::new(generator)
                    .with_max_images(config.images.max_images),
            );

            let repl_config = ReplConfig {
                show_progress: !cli.quiet,
                prefer_in_store_only: in_store,
                ..ReplConfig::default()
            };
            let mut repl = ChatRepl::new(handle_turn, vision, images).with_config(repl_config);
            repl.run().await?;
        }
        Command::ServeStdio => {
            info!("Serving JSON lines on stdin/stdout");
            StdioServer::new(handle_turn, vision).run().await?;
        }
        Command::Ask {
            text,
            session,
            in_store,
            shopping_list,
        } => {
            let format = cli
                .output
                .map(OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default();

            let hints = ControlHints {
                prefer_in_store_only: in_store,
                force_grocery_stage: shopping_list || requests_shopping_list(&text),
                action: None,
            };
            let mut request = TurnRequest::text(text).with_hints(hints);
            if let Some(key) = session {
                request = request.with_session_key(key);
            }

            let progress = ProgressReporter::with_visibility(!cli.quiet);
            progress.start("Thinking...");
            let result = handle_turn.execute(request).await;
            progress.finish();

            match result {
                Ok(response) => println!("{}", formatter_for(format).render(&response)),
                Err(e) => {
                    eprintln!("{}", ConsoleFormatter::format_error(e.user_message()));
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// The canonical template, or the override file named in `[assistant]`.
fn load_template(config: &FileConfig) -> Result<SystemPromptTemplate> {
    match &config.assistant.system_prompt_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read system prompt {}", path.display()))?;
            let version = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string());
            Ok(SystemPromptTemplate::from_text(version, text))
        }
        None => Ok(SystemPromptTemplate::canonical()),
    }
}
