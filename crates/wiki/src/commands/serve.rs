//! `wiki serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use wiki_config::{CliSettings, Config};
use wiki_server::{run_server, server_config_from_wiki_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long, env = "WIKI_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding page records (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory with view.html and edit.html (overrides config).
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Page `/` redirects to (overrides config).
    #[arg(long)]
    root_title: Option<String>,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Load config with CLI overrides
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        // Print startup info
        output.highlight(&format!(
            "Starting wiki on http://{}:{}/",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }
        output.info(&format!(
            "Data directory: {}",
            config.wiki_resolved.data_dir.display()
        ));
        match &config.wiki_resolved.templates_dir {
            Some(dir) => output.info(&format!("Templates: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }
        output.info(&format!(
            "Front page: {}",
            config.wiki_resolved.root_title
        ));

        // Build server config and run
        let server_config = server_config_from_wiki_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Collect the config overrides given on the command line.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
            templates_dir: self.templates_dir.clone(),
            root_title: self.root_title.clone(),
        }
    }
}
