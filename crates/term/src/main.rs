//! Vitrine terminal frontend.
//!
//! One-shot subcommands for listing, creating and deleting products, plus an
//! interactive `browse` session driving the same controllers a graphical
//! frontend would.

mod browse;
mod cli;
mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;
use vitrine_client::{CatalogApi, HttpCatalog};
use vitrine_config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = load_config(&cli)?;
	let base = config.api_base()?;
	info!(base = %base, "vitrine starting");

	let http = HttpCatalog::new(&base).context("could not build HTTP client")?;
	let api: Arc<dyn CatalogApi> = Arc::new(http.with_timeout(config.timeout()));
	let locale = cli.locale;

	match cli.command {
		Command::List { filters, pages } => commands::list(api, &config, locale, filters.to_filters(), pages).await,
		Command::Create(args) => commands::create(api.as_ref(), &config, locale, &args).await,
		Command::Delete { id, yes } => commands::delete(api.as_ref(), &config, locale, id, yes).await,
		Command::Categories => commands::categories(api.as_ref(), &config, locale).await,
		Command::Suppliers { search } => {
			commands::suppliers(api.as_ref(), &config, locale, search.as_deref()).await
		}
		Command::Query { action } => {
			commands::query(&action);
			Ok(())
		}
		Command::Browse { query } => browse::run(api, &config, locale, &query).await,
	}
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
	let mut config = Config::load(cli.config.as_deref()).context("could not load configuration")?;
	if let Some(base_url) = &cli.base_url {
		config.api.base_url = base_url.clone();
		config.validate()?;
	}
	Ok(config)
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let default_filter = if verbose { "vitrine=debug,info" } else { "vitrine=info,warn" };

	// VITRINE_LOG_DIR sends logs to a per-process file instead of stderr.
	if let Some(log_dir) = std::env::var("VITRINE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("vitrine.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry().with(filter).with(file_layer).init();
			info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
