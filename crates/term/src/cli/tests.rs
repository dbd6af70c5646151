use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Cli {
	Cli::try_parse_from(std::iter::once("vitrine").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_list_flags_build_filters() {
	let cli = parse(&[
		"list",
		"--search",
		" lamp ",
		"--status",
		"Inactive",
		"--status",
		"Active",
		"--min-price",
		"2.5",
		"--end-date",
		"2024-03-01",
		"--pages",
		"3",
	]);
	let Command::List { filters, pages } = cli.command else {
		panic!("expected list");
	};
	assert_eq!(pages, 3);
	assert_eq!(
		vitrine_query::encode(&filters.to_filters()),
		"search=lamp&status=Inactive&status=Active&minPrice=2.5&endDate=2024-03-01"
	);
}

#[test]
fn test_flags_override_query() {
	let args = FilterArgs {
		query: Some("?search=desk&category=Office&maxStock=9".into()),
		search: Some("chair".into()),
		max_stock: Some(4),
		..FilterArgs::default()
	};
	assert_eq!(
		vitrine_query::encode(&args.to_filters()),
		"search=chair&category=Office&maxStock=4"
	);
}

#[test]
fn test_rejects_unknown_status_and_zero_pages() {
	let bad_status = Cli::try_parse_from(["vitrine", "list", "--status", "active"]);
	assert!(bad_status.is_err());
	let zero_pages = Cli::try_parse_from(["vitrine", "list", "--pages", "0"]);
	assert!(zero_pages.is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
	let cli = parse(&["categories", "--base-url", "http://shop.test/api", "-v"]);
	assert!(cli.verbose);
	assert_eq!(cli.base_url.as_deref(), Some("http://shop.test/api"));
	assert!(matches!(cli.command, Command::Categories));
}

#[test]
fn test_create_defaults_to_active() {
	let cli = parse(&[
		"create", "--name", "Desk lamp", "--sku", "LMP-0042", "--category", "Lighting", "--price", "24.5", "--stock",
		"10",
	]);
	let Command::Create(args) = cli.command else {
		panic!("expected create");
	};
	let input = args.to_input();
	assert_eq!(input.status, Some(ProductStatus::Active));
	assert_eq!(input.stock_quantity, "10");
	assert!(input.cost_price.is_empty());
}

#[test]
fn test_rejects_negative_and_non_finite_prices() {
	for arg in ["--min-price=-5", "--max-price=NaN", "--max-price=inf"] {
		assert!(Cli::try_parse_from(["vitrine", "list", arg]).is_err(), "{arg} was accepted");
	}
	let cli = parse(&["query", "encode", "--min-price=0", "--max-price", "12.5"]);
	let Command::Query {
		action: QueryAction::Encode { filters },
	} = cli.command
	else {
		panic!("expected query encode");
	};
	assert_eq!(vitrine_query::encode(&filters.to_filters()), "minPrice=0&maxPrice=12.5");
}

#[test]
fn test_delete_asks_unless_yes() {
	let cli = parse(&["delete", "17"]);
	assert!(matches!(cli.command, Command::Delete { id: 17, yes: false }));
	let cli = parse(&["delete", "-y", "17"]);
	assert!(matches!(cli.command, Command::Delete { id: 17, yes: true }));
}

#[test]
fn test_locale_flag() {
	assert_eq!(parse(&["categories"]).locale, Locale::English);
	assert_eq!(parse(&["categories", "--locale", "fa"]).locale, Locale::Persian);
	assert!(Cli::try_parse_from(["vitrine", "categories", "--locale", "de"]).is_err());
}
