//! # Validation Module
//!
//! Form validation for products, expenses and customers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  ProductForm (raw text, exactly as the form submits it)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_product(&form) ── every rule runs, nothing short-circuits    │
//! │           │                                                             │
//! │           ├── errors? → FieldErrors { field → message }                │
//! │           │              command does not proceed                      │
//! │           │                                                             │
//! │           └── clean?  → ProductDraft (typed: Money, i64)               │
//! │                          the only thing Inventory::create accepts      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is pure: it never touches ledger state.
//!
//! ## Usage
//! ```rust
//! use shopkeep_core::validation::{parse_product, ProductForm};
//!
//! let form = ProductForm {
//!     name: "Widget".into(),
//!     cost_price: "100".into(),
//!     selling_price: "150".into(),
//!     discounted_price: "120".into(),
//!     stock: "10".into(),
//! };
//! let draft = parse_product(&form).unwrap();
//! assert_eq!(draft.stock(), 10);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{FieldErrors, ValidationError};
use crate::money::Money;
use crate::types::{Customer, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, FieldErrors>;

// =============================================================================
// Field Limits & Parsers
// =============================================================================

/// Largest stock count a product form accepts.
pub const MAX_STOCK: i64 = 1_000_000;

/// Largest price or expense amount a form accepts (10 000 000.00).
///
/// `MAX_AMOUNT × MAX_STOCK` is 10^15 minor units, so thousands of products
/// at the limit still total well inside `i64`.
pub const MAX_AMOUNT: Money = Money::from_major(10_000_000);

/// Parses a stock count: a whole number in `0..=MAX_STOCK`.
fn parse_stock(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(stock_in_range)
}

fn stock_in_range(stock: &i64) -> bool {
    (0..=MAX_STOCK).contains(stock)
}

/// Positive and no larger than [`MAX_AMOUNT`].
fn amount_in_range(amount: Money) -> bool {
    amount.is_positive() && amount <= MAX_AMOUNT
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Product
// =============================================================================

/// Product form as submitted (all fields are raw text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub cost_price: String,
    pub selling_price: String,
    pub discounted_price: String,
    pub stock: String,
}

impl ProductForm {
    /// Pre-fills the edit form from an existing product.
    ///
    /// The stock field shows the *current* stock; saving the form re-stocks
    /// the product to whatever the field holds.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            cost_price: product.cost_price.to_string(),
            selling_price: product.selling_price.to_string(),
            discounted_price: product.discounted_price.to_string(),
            stock: product.stock.to_string(),
        }
    }
}

/// A product that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    cost_price: Money,
    selling_price: Money,
    discounted_price: Money,
    stock: i64,
}

impl ProductDraft {
    /// Builds a draft from typed values, applying the same rules as the form.
    pub fn new(
        name: &str,
        cost_price: Money,
        selling_price: Money,
        discounted_price: Money,
        stock: i64,
    ) -> ValidationResult<Self> {
        let errors = product_rules(
            name,
            Some(cost_price),
            Some(selling_price),
            Some(discounted_price),
            Some(stock).filter(stock_in_range),
        );
        errors.into_result(|| ProductDraft {
            name: name.trim().to_string(),
            cost_price,
            selling_price,
            discounted_price,
            stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost_price(&self) -> Money {
        self.cost_price
    }

    pub fn selling_price(&self) -> Money {
        self.selling_price
    }

    pub fn discounted_price(&self) -> Money {
        self.discounted_price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }
}

/// Applies the product rules. `None` means missing or unparseable.
///
/// ## Rules
/// - name: non-blank after trimming
/// - costPrice: a number in `(0, MAX_AMOUNT]`
/// - sellingPrice: a number in `(0, MAX_AMOUNT]`, and > costPrice
/// - discountedPrice: a number in `(0, MAX_AMOUNT]`, and > costPrice
///   (it may exceed sellingPrice; that is accepted as-is)
/// - stock: an integer in `0..=MAX_STOCK`
///
/// The price comparisons run whenever both sides parsed, and their message
/// replaces the "valid price" one for that field.
fn product_rules(
    name: &str,
    cost: Option<Money>,
    selling: Option<Money>,
    discounted: Option<Money>,
    stock: Option<i64>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        errors.insert("name", ValidationError::required("Product name is required"));
    }

    if !cost.is_some_and(amount_in_range) {
        errors.insert("costPrice", ValidationError::required("Valid cost price is required"));
    }

    if !selling.is_some_and(amount_in_range) {
        errors.insert(
            "sellingPrice",
            ValidationError::required("Valid selling price is required"),
        );
    }

    if !discounted.is_some_and(amount_in_range) {
        errors.insert(
            "discountedPrice",
            ValidationError::required("Valid discounted price is required"),
        );
    }

    if let Some(cost) = cost {
        if selling.is_some_and(|s| s <= cost) {
            errors.insert(
                "sellingPrice",
                ValidationError::must_exceed_cost("Selling price must be higher than cost price"),
            );
        }
        if discounted.is_some_and(|d| d <= cost) {
            errors.insert(
                "discountedPrice",
                ValidationError::must_exceed_cost(
                    "Discounted price must be higher than cost price",
                ),
            );
        }
    }

    if stock.is_none() {
        errors.insert("stock", ValidationError::required("Valid stock is required"));
    }

    errors
}

/// Validates a product form. An empty mapping means valid.
pub fn validate_product(form: &ProductForm) -> FieldErrors {
    product_rules(
        &form.name,
        Money::parse(&form.cost_price),
        Money::parse(&form.selling_price),
        Money::parse(&form.discounted_price),
        parse_stock(&form.stock),
    )
}

/// Validates a product form and returns the typed draft.
pub fn parse_product(form: &ProductForm) -> ValidationResult<ProductDraft> {
    let errors = validate_product(form);
    if !errors.is_empty() {
        return Err(errors);
    }

    // Every field parsed above; rebuild through the typed constructor.
    ProductDraft::new(
        &form.name,
        Money::parse(&form.cost_price).unwrap_or_default(),
        Money::parse(&form.selling_price).unwrap_or_default(),
        Money::parse(&form.discounted_price).unwrap_or_default(),
        parse_stock(&form.stock).unwrap_or(-1),
    )
}

// =============================================================================
// Expense
// =============================================================================

/// Expense form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

/// An expense that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    category: String,
    amount: Money,
    description: Option<String>,
}

impl ExpenseDraft {
    /// The "quick expense" path: no form, but the same two rules still hold
    /// (non-blank category, amount > 0).
    pub fn quick(category: &str, amount: Money) -> ValidationResult<Self> {
        let errors = expense_rules(category, Some(amount));
        errors.into_result(|| ExpenseDraft {
            category: category.trim().to_string(),
            amount,
            description: None,
        })
    }

    /// Attaches a description; blank text clears it.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Money, Option<String>) {
        (self.category, self.amount, self.description)
    }
}

fn expense_rules(category: &str, amount: Option<Money>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if category.trim().is_empty() {
        errors.insert("category", ValidationError::required("Category is required"));
    }

    if !amount.is_some_and(amount_in_range) {
        errors.insert("amount", ValidationError::required("Valid amount is required"));
    }

    errors
}

/// Validates an expense form. The description is never checked.
pub fn validate_expense(form: &ExpenseForm) -> FieldErrors {
    expense_rules(&form.category, Money::parse(&form.amount))
}

/// Validates an expense form and returns the typed draft.
pub fn parse_expense(form: &ExpenseForm) -> ValidationResult<ExpenseDraft> {
    let errors = validate_expense(form);
    if !errors.is_empty() {
        return Err(errors);
    }

    let amount = Money::parse(&form.amount).unwrap_or_default();
    Ok(ExpenseDraft::quick(&form.category, amount)?.with_description(&form.description))
}

// =============================================================================
// Customer
// =============================================================================

/// Customer form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerForm {
    pub fn from_customer(customer: &Customer) -> Self {
        CustomerForm {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// A customer that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    name: String,
    email: String,
    phone: String,
}

impl CustomerDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// `local@domain.tld` shape: no whitespace, a non-empty local part, and a
/// dot inside the domain with text on both sides.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len()),
        _ => false,
    }
}

/// Validates a customer form. An empty mapping means valid.
pub fn validate_customer(form: &CustomerForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name", ValidationError::required("Name is required"));
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email", ValidationError::required("Email is required"));
    } else if !looks_like_email(email) {
        errors.insert("email", ValidationError::invalid_format("Valid email is required"));
    }

    if form.phone.trim().is_empty() {
        errors.insert("phone", ValidationError::required("Phone is required"));
    }

    errors
}

/// Validates a customer form and returns the typed draft.
pub fn parse_customer(form: &CustomerForm) -> ValidationResult<CustomerDraft> {
    validate_customer(form).into_result(|| CustomerDraft {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, cost: &str, sell: &str, disc: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: name.into(),
            cost_price: cost.into(),
            selling_price: sell.into(),
            discounted_price: disc.into(),
            stock: stock.into(),
        }
    }

    fn message(errors: &FieldErrors, field: &str) -> String {
        errors.get(field).map(ToString::to_string).unwrap_or_default()
    }

    #[test]
    fn test_valid_product() {
        let errors = validate_product(&form("Widget", "100", "150", "120", "10"));
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate_product(&ProductForm::default());
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["costPrice", "discountedPrice", "name", "sellingPrice", "stock"]
        );
        assert_eq!(message(&errors, "name"), "Product name is required");
        assert_eq!(message(&errors, "stock"), "Valid stock is required");
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = validate_product(&form("   ", "100", "150", "120", "10"));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_prices_must_exceed_cost() {
        let errors = validate_product(&form("Widget", "100", "100", "90", "10"));
        assert_eq!(
            message(&errors, "sellingPrice"),
            "Selling price must be higher than cost price"
        );
        assert_eq!(
            message(&errors, "discountedPrice"),
            "Discounted price must be higher than cost price"
        );
        assert!(matches!(
            errors.get("sellingPrice"),
            Some(ValidationError::MustExceedCost(_))
        ));
    }

    #[test]
    fn test_discounted_price_may_exceed_selling_price() {
        let errors = validate_product(&form("Widget", "100", "150", "200", "10"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_non_positive_prices_rejected() {
        let errors = validate_product(&form("Widget", "0", "-5", "abc", "10"));
        assert_eq!(message(&errors, "costPrice"), "Valid cost price is required");
        // -5 parses and is not above cost 0, so the comparison message wins.
        assert_eq!(
            message(&errors, "sellingPrice"),
            "Selling price must be higher than cost price"
        );
        assert_eq!(
            message(&errors, "discountedPrice"),
            "Valid discounted price is required"
        );
    }

    #[test]
    fn test_stock_must_be_whole_and_non_negative() {
        assert!(validate_product(&form("W", "1", "2", "2", "0")).is_empty());
        assert!(validate_product(&form("W", "1", "2", "2", "-1")).contains("stock"));
        assert!(validate_product(&form("W", "1", "2", "2", "2.5")).contains("stock"));
        assert!(validate_product(&form("W", "1", "2", "2", "")).contains("stock"));
    }

    #[test]
    fn test_stock_and_prices_have_upper_limits() {
        let errors = validate_product(&form("Widget", "100", "150", "120", "100000000000000000"));
        assert_eq!(message(&errors, "stock"), "Valid stock is required");
        assert_eq!(errors.len(), 1);

        let errors = validate_product(&form("Widget", "100", "10000000.01", "120", "10"));
        assert_eq!(
            message(&errors, "sellingPrice"),
            "Valid selling price is required"
        );

        let errors = validate_product(&form("Widget", "92233720368547758", "150", "120", "10"));
        assert!(errors.contains("costPrice"));

        // the limits themselves are accepted
        assert!(validate_product(&form("W", "9999999", "10000000", "10000000", "1000000")).is_empty());
        assert!(validate_product(&form("W", "1", "2", "2", "1000001")).contains("stock"));

        let err = ProductDraft::new(
            "Widget",
            Money::from_major(100),
            Money::from_major(150),
            Money::from_major(120),
            MAX_STOCK + 1,
        )
        .unwrap_err();
        assert!(err.contains("stock"));
    }

    #[test]
    fn test_parse_product_yields_typed_draft() {
        let draft = parse_product(&form("  Widget ", "100", "150.50", "120", "10")).unwrap();
        assert_eq!(draft.name(), "Widget");
        assert_eq!(draft.cost_price(), Money::from_major(100));
        assert_eq!(draft.selling_price(), Money::from_minor(15_050));
        assert_eq!(draft.discounted_price(), Money::from_major(120));
        assert_eq!(draft.stock(), 10);

        assert!(parse_product(&form("", "100", "150", "120", "10")).is_err());
    }

    #[test]
    fn test_product_draft_new_applies_rules() {
        let err = ProductDraft::new(
            "Widget",
            Money::from_major(100),
            Money::from_major(90),
            Money::from_major(120),
            -3,
        )
        .unwrap_err();
        assert!(err.contains("sellingPrice"));
        assert!(err.contains("stock"));
    }

    #[test]
    fn test_form_prefill_round_trips() {
        let draft = parse_product(&form("Widget", "100", "150", "120", "10")).unwrap();
        let product = Product {
            id: 1,
            name: draft.name().to_string(),
            cost_price: draft.cost_price(),
            selling_price: draft.selling_price(),
            discounted_price: draft.discounted_price(),
            stock: 7,
            original_stock: 10,
        };
        let prefilled = ProductForm::from_product(&product);
        assert_eq!(prefilled.stock, "7");
        assert!(validate_product(&prefilled).is_empty());
    }

    #[test]
    fn test_expense_rules() {
        let ok = ExpenseForm {
            category: "Food".into(),
            amount: "10000".into(),
            description: String::new(),
        };
        assert!(validate_expense(&ok).is_empty());

        let bad = ExpenseForm {
            category: " ".into(),
            amount: "0".into(),
            description: "anything goes here".into(),
        };
        let errors = validate_expense(&bad);
        assert_eq!(message(&errors, "category"), "Category is required");
        assert_eq!(message(&errors, "amount"), "Valid amount is required");
        assert!(!errors.contains("description"));
    }

    #[test]
    fn test_parse_expense_trims_description() {
        let draft = parse_expense(&ExpenseForm {
            category: "Rent".into(),
            amount: "250.5".into(),
            description: "   ".into(),
        })
        .unwrap();
        assert_eq!(draft.category(), "Rent");
        assert_eq!(draft.amount(), Money::from_minor(25_050));
        assert_eq!(draft.description(), None);
    }

    #[test]
    fn test_quick_expense_still_enforces_rules() {
        assert!(ExpenseDraft::quick("Food", Money::from_major(5)).is_ok());
        assert!(ExpenseDraft::quick("", Money::from_major(5)).is_err());
        assert!(ExpenseDraft::quick("Food", Money::zero()).is_err());
        assert!(ExpenseDraft::quick("Food", Money::from_major(-5)).is_err());
        assert!(ExpenseDraft::quick("Food", MAX_AMOUNT).is_ok());
        assert!(ExpenseDraft::quick("Food", MAX_AMOUNT + Money::from_minor(1)).is_err());
    }

    #[test]
    fn test_customer_rules() {
        let ok = CustomerForm {
            name: "Dilnoza".into(),
            email: "dilnoza@example.uz".into(),
            phone: "+998 90 123 45 67".into(),
        };
        assert!(validate_customer(&ok).is_empty());

        let errors = validate_customer(&CustomerForm::default());
        assert_eq!(message(&errors, "name"), "Name is required");
        assert_eq!(message(&errors, "email"), "Email is required");
        assert_eq!(message(&errors, "phone"), "Phone is required");
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@shop.example.com"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("plainaddress"));
    }
}
