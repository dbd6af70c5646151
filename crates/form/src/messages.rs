//! User-facing message catalogs.
//!
//! Every string a user can see for a rejected form or failed request lives
//! here, once per [`Locale`]. The Persian catalog carries the product form's
//! own wording; English is the default.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
	#[default]
	English,
	Persian,
}

impl Locale {
	pub const ALL: [Self; 2] = [Self::English, Self::Persian];

	/// BCP 47 tag used on the command line and in config.
	pub const fn tag(self) -> &'static str {
		match self {
			Self::English => "en",
			Self::Persian => "fa",
		}
	}

	pub const fn messages(self) -> &'static Messages {
		match self {
			Self::English => &ENGLISH,
			Self::Persian => &PERSIAN,
		}
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale {0:?} (expected one of: en, fa)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
	type Err = UnknownLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|locale| locale.tag().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownLocale(s.to_owned()))
	}
}

/// One locale's messages.
#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
	pub name_too_short: &'static str,
	pub sku_format: &'static str,
	pub category_required: &'static str,
	pub description_too_long: &'static str,
	pub price_required: &'static str,
	pub price_invalid: &'static str,
	pub price_too_low: &'static str,
	pub price_too_high: &'static str,
	pub cost_price_invalid: &'static str,
	pub cost_price_not_below_price: &'static str,
	pub stock_required: &'static str,
	pub stock_invalid: &'static str,
	pub reorder_level_invalid: &'static str,
	pub reorder_level_not_below_stock: &'static str,
	pub status_invalid: &'static str,
	pub unknown_error: &'static str,
	pub timeout: &'static str,
	pub network: &'static str,
}

pub const ENGLISH: Messages = Messages {
	name_too_short: "Name must be at least 3 characters.",
	sku_format: "SKU must have the form XXX-#### (e.g. ABC-1234).",
	category_required: "Category is required.",
	description_too_long: "Description cannot exceed 500 characters.",
	price_required: "Enter a price.",
	price_invalid: "Price must be a number.",
	price_too_low: "Price must be at least 0.01.",
	price_too_high: "Price cannot exceed 999999.99.",
	cost_price_invalid: "Cost price is invalid.",
	cost_price_not_below_price: "Cost price must be less than the sale price.",
	stock_required: "Enter a stock quantity.",
	stock_invalid: "Stock quantity must be a whole number of at least 0.",
	reorder_level_invalid: "Reorder level is invalid.",
	reorder_level_not_below_stock: "Reorder level must be less than the stock quantity.",
	status_invalid: "Choose a status.",
	unknown_error: "An unknown error occurred.",
	timeout: "The request timed out. Please try again.",
	network: "Could not reach the server. Check your connection and try again.",
};

pub const PERSIAN: Messages = Messages {
	name_too_short: "نام باید حداقل ۳ کاراکتر باشد",
	sku_format: "SKU باید در فرمت XXX-#### باشد (مثال: ABC-1234)",
	category_required: "دسته بندی الزامی است",
	description_too_long: "توضیحات نمی‌تواند بیشتر از ۵۰۰ کاراکتر باشد",
	price_required: "قیمت را وارد کنید",
	price_invalid: "قیمت نامعتبر است",
	price_too_low: "قیمت باید حداقل ۰.۰۱ باشد",
	price_too_high: "قیمت نمی‌تواند بیشتر از ۹۹۹۹۹۹.۹۹ باشد",
	cost_price_invalid: "قیمت تمام شده نامعتبر است",
	cost_price_not_below_price: "قیمت تمام شده باید کمتر از قیمت فروش باشد",
	stock_required: "موجودی را وارد کنید",
	stock_invalid: "موجودی باید حداقل ۰ باشد",
	reorder_level_invalid: "سطح سفارش مجدد نامعتبر است",
	reorder_level_not_below_stock: "سطح سفارش مجدد باید کمتر از موجودی باشد",
	status_invalid: "وضعیت نامعتبر است",
	unknown_error: "خطای ناشناخته‌ای رخ داد",
	timeout: "زمان درخواست به پایان رسید. لطفا دوباره تلاش کنید",
	network: "اتصال به سرور برقرار نشد. اتصال خود را بررسی کنید و دوباره تلاش کنید",
};

/// Shown when the server rejected a submission without saying why.
pub const UNKNOWN_ERROR: &str = ENGLISH.unknown_error;
pub const TIMEOUT_MESSAGE: &str = ENGLISH.timeout;
pub const NETWORK_MESSAGE: &str = ENGLISH.network;
