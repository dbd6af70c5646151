mod common;

use std::sync::Arc;

use common::{Call, FakeCatalog};
use pretty_assertions::assert_eq;
use vitrine_app::{CatalogSession, ErrorKind, Locale, ProductForm, SubmitOutcome};
use vitrine_client::CallOptions;
use vitrine_form::{Field, ProductInput};
use vitrine_primitives::{ErrorBody, FieldIssue, FilterSet};

fn lamp() -> ProductInput {
	ProductInput {
		product_name: "Desk lamp".into(),
		sku: "LMP-0042".into(),
		category: "Lighting".into(),
		price: "24.50".into(),
		stock_quantity: "10".into(),
		..ProductInput::default()
	}
}

#[tokio::test]
async fn test_zero_price_never_reaches_the_network() {
	let api = FakeCatalog::default();
	let mut form = ProductForm::with_input(ProductInput {
		price: "0".into(),
		..lamp()
	});

	let outcome = form.submit(&api, &CallOptions::new()).await;
	assert_eq!(outcome, SubmitOutcome::Invalid);
	assert!(form.errors().field(Field::Price).is_some());
	assert_eq!(form.errors().banner(), None);
	assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_server_field_error_attaches_without_banner() {
	let api = FakeCatalog::default();
	api.reject_next_create(ErrorBody {
		errors: vec![FieldIssue {
			kind: "field".into(),
			msg: "duplicate SKU".into(),
			path: Some("sku".into()),
			value: None,
			location: Some("body".into()),
		}],
		message: None,
	});
	let mut form = ProductForm::with_input(lamp());

	let outcome = form.submit(&api, &CallOptions::new()).await;
	assert_eq!(outcome, SubmitOutcome::Rejected(ErrorKind::ApiField));
	assert_eq!(form.errors().field(Field::Sku), Some("duplicate SKU"));
	assert_eq!(form.errors().banner(), None);
	assert_eq!(form.input, lamp());
}

#[tokio::test]
async fn test_server_global_error_becomes_banner() {
	let api = FakeCatalog::default();
	api.reject_next_create(ErrorBody {
		errors: Vec::new(),
		message: Some("Catalog is read-only".into()),
	});
	let mut form = ProductForm::with_input(lamp());

	let outcome = form.submit(&api, &CallOptions::new()).await;
	assert_eq!(outcome, SubmitOutcome::Rejected(ErrorKind::ApiGlobal));
	assert_eq!(form.errors().banner().as_deref(), Some("Catalog is read-only"));
}

async fn loaded_session(api: &Arc<FakeCatalog>) -> CatalogSession {
	let mut session = CatalogSession::new(api.clone(), 20);
	session.set_filters(FilterSet::default());
	session.next_completion().await;
	assert_eq!(session.items().len(), 2);
	session
}

#[tokio::test]
async fn test_session_create_refetches_first_page() {
	let api = Arc::new(FakeCatalog::with_products("Desk", 2));
	let mut session = loaded_session(&api).await;

	let mut form = ProductForm::with_input(lamp());
	let SubmitOutcome::Created(created) = session.create(&mut form).await else {
		panic!("expected the product to be created");
	};
	assert_eq!(created.id, 3);
	assert_eq!(form.input, ProductInput::default());
	assert!(form.errors().is_empty());

	assert!(session.items().is_empty());
	session.next_completion().await;
	assert_eq!(session.items().len(), 3);
	assert_eq!(api.list_calls(), vec![(String::new(), 1), (String::new(), 1)]);
	assert_eq!(
		api.calls().iter().filter(|c| matches!(c, Call::Create(_))).count(),
		1
	);
}

#[tokio::test]
async fn test_session_create_keeps_list_when_not_created() {
	let api = Arc::new(FakeCatalog::with_products("Desk", 2));
	let mut session = loaded_session(&api).await;

	let mut invalid = ProductForm::with_input(ProductInput {
		price: "0".into(),
		..lamp()
	});
	assert_eq!(session.create(&mut invalid).await, SubmitOutcome::Invalid);

	api.reject_next_create(ErrorBody {
		errors: Vec::new(),
		message: Some("Catalog is read-only".into()),
	});
	let mut rejected = ProductForm::with_input(lamp());
	assert_eq!(
		session.create(&mut rejected).await,
		SubmitOutcome::Rejected(ErrorKind::ApiGlobal)
	);

	assert_eq!(session.items().len(), 2);
	assert!(!session.snapshot().unwrap().state.is_fetching());
	assert_eq!(session.apply_completions(), 0);
	assert_eq!(api.list_calls(), vec![(String::new(), 1)]);
}

#[tokio::test]
async fn test_persian_form_reports_persian_errors() {
	let api = FakeCatalog::default();
	let mut form = ProductForm::with_input(ProductInput {
		price: "0".into(),
		..lamp()
	})
	.with_locale(Locale::Persian);

	assert_eq!(form.submit(&api, &CallOptions::new()).await, SubmitOutcome::Invalid);
	assert_eq!(form.errors().field(Field::Price), Some("قیمت باید حداقل ۰.۰۱ باشد"));

	form.reset();
	assert_eq!(form.locale(), Locale::Persian);
	assert!(form.errors().is_empty());
}
