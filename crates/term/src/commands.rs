//! One-shot subcommands.

use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use vitrine_app::{CatalogSession, Locale, Notice, ProductForm, SubmitOutcome};
use vitrine_cache::Completion;
use vitrine_client::{CallOptions, CatalogApi, ClientError};
use vitrine_config::Config;
use vitrine_primitives::{FilterSet, ProductId};

use crate::cli::{CreateArgs, QueryAction};
use crate::render;

/// Converts a client error into a user-facing message for `anyhow`.
pub fn describe(err: &ClientError, locale: Locale) -> String {
	Notice::localized(err, locale).map_or_else(|| err.to_string(), |notice| notice.message)
}

/// Returns true for an affirmative answer to a `[y/N]` prompt.
pub fn is_yes(answer: &str) -> bool {
	matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
	let mut stdout = tokio::io::stdout();
	stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await?;
	stdout.flush().await?;

	let mut answer = String::new();
	BufReader::new(tokio::io::stdin()).read_line(&mut answer).await?;
	Ok(is_yes(&answer))
}

pub async fn list(
	api: Arc<dyn CatalogApi>,
	config: &Config,
	locale: Locale,
	filters: FilterSet,
	pages: u32,
) -> anyhow::Result<()> {
	let mut session = CatalogSession::new(api, config.catalog.page_limit)
		.with_timeout(config.timeout())
		.with_locale(locale);
	session.set_filters(filters);

	let mut fetched = 0;
	loop {
		if session.next_completion().await == Completion::Stale {
			continue;
		}
		if let Some(failure) = session.snapshot().and_then(|snap| snap.error.cloned()) {
			bail!("{}", failure.message);
		}
		fetched += 1;
		if fetched >= pages || !session.load_more() {
			break;
		}
	}

	println!("{}", render::product_header());
	for product in session.items() {
		println!("{}", render::product_row(product));
	}
	if let Some(snapshot) = session.snapshot() {
		println!("{}", render::list_footer(&snapshot));
	}
	Ok(())
}

pub async fn create(api: &dyn CatalogApi, config: &Config, locale: Locale, args: &CreateArgs) -> anyhow::Result<()> {
	let mut form = ProductForm::with_input(args.to_input()).with_locale(locale);
	let opts = CallOptions::new().timeout(config.timeout());
	match form.submit(api, &opts).await {
		SubmitOutcome::Created(product) => {
			println!("Created product {} ({})", product.id, product.sku);
			Ok(())
		}
		SubmitOutcome::Invalid | SubmitOutcome::Rejected(_) => {
			for line in render::form_error_lines(form.errors()) {
				eprintln!("{line}");
			}
			bail!("product was not created")
		}
	}
}

pub async fn delete(api: &dyn CatalogApi, config: &Config, locale: Locale, id: ProductId, yes: bool) -> anyhow::Result<()> {
	if !yes && !confirm(&format!("Delete product {id}?")).await? {
		println!("Delete cancelled.");
		return Ok(());
	}

	let opts = CallOptions::new().timeout(config.timeout());
	match api.delete_product(id, &opts).await {
		Ok(()) => {
			println!("Deleted product {id}");
			Ok(())
		}
		Err(err) => bail!("could not delete product {id}: {}", describe(&err, locale)),
	}
}

pub async fn categories(api: &dyn CatalogApi, config: &Config, locale: Locale) -> anyhow::Result<()> {
	let opts = CallOptions::new().timeout(config.timeout());
	let categories = api
		.list_categories(&opts)
		.await
		.map_err(|err| anyhow::anyhow!(describe(&err, locale)))
		.context("could not load categories")?;
	for category in &categories {
		println!("{}", render::category_row(category));
	}
	Ok(())
}

pub async fn suppliers(
	api: &dyn CatalogApi,
	config: &Config,
	locale: Locale,
	search: Option<&str>,
) -> anyhow::Result<()> {
	let opts = CallOptions::new().timeout(config.timeout());
	let suppliers = api
		.list_suppliers(search, &opts)
		.await
		.map_err(|err| anyhow::anyhow!(describe(&err, locale)))
		.context("could not load suppliers")?;
	for supplier in &suppliers {
		println!("{}", render::supplier_row(supplier));
	}
	Ok(())
}

pub fn query(action: &QueryAction) {
	match action {
		QueryAction::Encode { filters } => println!("{}", vitrine_query::encode(&filters.to_filters())),
		QueryAction::Decode { query } => {
			let (filters, request) = vitrine_query::decode_request(query);
			for line in render::filter_lines(&filters) {
				println!("{line}");
			}
			if let Some(request) = request {
				println!("page: {} (limit {})", request.page, request.limit);
			}
			println!("normalized: {}", vitrine_query::encode(&filters));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_explicit_yes_confirms() {
		for answer in ["y", "Y\n", " yes ", "YES"] {
			assert!(is_yes(answer), "{answer:?}");
		}
		for answer in ["", "\n", "n", "no", "yep", "delete"] {
			assert!(!is_yes(answer), "{answer:?}");
		}
	}

	#[test]
	fn test_describe_uses_locale() {
		assert_eq!(
			describe(&ClientError::Timeout, Locale::Persian),
			Locale::Persian.messages().timeout
		);
		assert_eq!(describe(&ClientError::Aborted, Locale::English), "request aborted");
	}
}
