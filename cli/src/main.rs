//! CLI entrypoint for pcai
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;
mod repl;

use anyhow::{Context, Result, anyhow, bail};
use args::{Cli, Command};
use clap::Parser;
use colored::Colorize;
use output::{ConsoleFormatter, spinner};
use pcai_application::{
    ChatSession, NoTools, RoutedChatOrchestrator, RoutedChatRequest, ToolExecutorPort,
};
use pcai_domain::{Provider, ProviderHealthCache};
use pcai_infrastructure::config::FileLoggingConfig;
use pcai_infrastructure::{
    ConfigLoader, FileConfig, FilePromptLoader, OpenAiCompatibleGateway, Severity, ToolCatalog,
    ToolRegistry,
};
use repl::ChatRepl;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Held until exit so buffered file logs are flushed.
    let _log_guard = init_logging(cli.verbose, &config.logging)?;

    info!("Starting pcai");

    check_config(&config)?;

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatibleGateway::new());
    let health = Arc::new(ProviderHealthCache::new(config.routing.health_ttl()));
    let tools = build_tools(&config, cli.no_tools)?;
    let prompts = Arc::new(FilePromptLoader::new(config.prompts.dir.clone()));

    let provider = select_provider(&config, cli.provider.as_deref())?;
    // An interactive session has no per-request override, so narrow the chain instead.
    let chain = match (&cli.command, &provider) {
        (Command::Chat, Some(p)) => vec![p.clone()],
        _ => config.to_providers(),
    };

    let mut orchestrator = RoutedChatOrchestrator::new(gateway.clone(), tools, gateway, health)
        .with_providers(chain)
        .with_prompts(prompts);
    if let Some(router) = config.router_provider() {
        orchestrator = orchestrator.with_router(router);
    }
    let orchestrator = Arc::new(orchestrator);

    let params = config.to_routing_params();
    let bypass_router = cli.no_router || !config.router.enabled;

    match &cli.command {
        Command::Ask { message } => {
            let mut request = RoutedChatRequest::new(message.join(" "), cli.mode)
                .with_params(params)
                .with_bypass_router(bypass_router);
            if let Some(provider) = provider {
                request = request.with_provider(provider);
            }
            if let Some(model) = &cli.model {
                request = request.with_model(model.clone());
            }
            if cli.no_json_enforce {
                request = request.with_enforce_json(false);
            }

            let progress = spinner("Thinking...", !cli.quiet && !cli.json);
            let result = orchestrator.execute(request).await;
            progress.finish_and_clear();
            let response = result?;

            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&response)?);
            } else {
                println!("{}", response.response);
                eprintln!("{}", ConsoleFormatter::status_line(&response));
            }
        }
        Command::Chat => {
            let mut session = ChatSession::new(orchestrator, cli.mode, params)
                .with_model(cli.model.clone())
                .with_bypass_router(bypass_router);
            if cli.no_json_enforce {
                session = session.with_enforce_json(false);
            }
            ChatRepl::new(session)
                .with_progress(!cli.quiet)
                .run()
                .await?;
        }
    }

    Ok(())
}

/// Initialize tracing: stderr always, plus a log file when configured.
///
/// `-v` flags win over `RUST_LOG`, which wins over `[logging] level`.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = logging.level.as_deref().unwrap_or("warn");
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("logging.file has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print configuration issues; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("{}", issue.to_string().yellow()),
            Severity::Error => eprintln!("{}", issue.to_string().red()),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn build_tools(config: &FileConfig, no_tools: bool) -> Result<Arc<dyn ToolExecutorPort>> {
    if no_tools {
        info!("Tools disabled");
        return Ok(Arc::new(NoTools));
    }

    let catalog = config.tools.catalog_path();
    let definitions = ToolCatalog::load(&catalog)
        .with_context(|| "Tool catalog unavailable (use --no-tools to run without tools)")?;

    let mut registry = ToolRegistry::new(definitions).with_timeout(config.tools.timeout());
    for (name, command) in &config.tools.commands {
        registry = registry.register(name.clone(), command.to_tool());
    }
    for name in registry.unbound_tools() {
        debug!(tool = name, "No handler bound; calls will report NOT_FOUND");
    }

    Ok(Arc::new(registry))
}

fn select_provider(config: &FileConfig, id: Option<&str>) -> Result<Option<Provider>> {
    let Some(id) = id else {
        return Ok(None);
    };
    config
        .to_providers()
        .into_iter()
        .find(|p| p.id == id)
        .map(Some)
        .ok_or_else(|| anyhow!("Unknown provider '{}'", id))
}
