//! End-to-end extraction scenarios against the public API.

use ledgerscan::{
    CancelFlag, ExtractConfig, InMemoryDocument, PositionedFragment, StatementExtractor,
    TransactionType,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

fn frag(text: &str, x: f32, y: f32) -> PositionedFragment {
    PositionedFragment::new(text, x, y)
}

fn statement_page() -> Vec<PositionedFragment> {
    vec![
        frag("Date", 40.0, 700.0),
        frag("Description", 120.0, 700.0),
        frag("Cash In", 380.0, 700.0),
        frag("Cash Out", 470.0, 700.0),
        frag("18/04/2025", 40.0, 650.0),
        frag("Welsh 3000s Registration", 120.0, 650.0),
        frag("1610.00", 380.0, 650.0),
        frag("15/04/2025", 40.0, 620.0),
        frag("Transport - Minibus Hire", 120.0, 620.0),
        frag("320.50", 470.0, 620.0),
    ]
}

#[test]
fn extracts_income_and_expense_from_headed_page() {
    let document = InMemoryDocument::new(vec![statement_page()]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.pages_processed, 1);
    assert_eq!(result.transactions.len(), 2);

    let income = &result.transactions[0];
    assert_eq!(income.date_display(), "18/04/2025");
    assert_eq!(income.description, "Welsh 3000s Registration");
    assert_eq!(income.amount, Decimal::from_str("1610.00").unwrap());
    assert_eq!(income.kind, TransactionType::Income);
    assert_eq!(income.confidence, 0.9);
    assert_eq!(income.page, 1);

    let expense = &result.transactions[1];
    assert_eq!(expense.amount, Decimal::from_str("320.50").unwrap());
    assert_eq!(expense.kind, TransactionType::Expense);
}

#[test]
fn headerless_page_infers_amount_columns_from_clusters() {
    // No "Cash In"/"Cash Out" headers; two currency clusters. The
    // right-most cluster is cash-out, the second-from-right cash-in.
    let page = vec![
        frag("Date", 40.0, 700.0),
        frag("18/04/2025", 40.0, 650.0),
        frag("Registration income", 120.0, 650.0),
        frag("1610.00", 380.0, 650.0),
        frag("15/04/2025", 40.0, 620.0),
        frag("Minibus hire", 120.0, 620.0),
        frag("320.50", 470.0, 620.0),
    ];
    let document = InMemoryDocument::new(vec![page]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.transactions.len(), 2);
    assert_eq!(result.transactions[0].kind, TransactionType::Income);
    assert_eq!(result.transactions[1].kind, TransactionType::Expense);
}

#[test]
fn page_two_reuses_page_one_structure() {
    let page2 = vec![
        frag("19/04/2025", 40.0, 650.0),
        frag("Campsite fees", 120.0, 650.0),
        frag("95.00", 470.0, 650.0),
    ];
    let document = InMemoryDocument::new(vec![statement_page(), page2]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.pages_processed, 2);
    assert_eq!(result.transactions.len(), 3);

    let carried = &result.transactions[2];
    assert_eq!(carried.page, 2);
    assert_eq!(carried.kind, TransactionType::Expense);
    assert_eq!(carried.amount, Decimal::from_str("95.00").unwrap());
}

#[test]
fn duplicate_rows_collapse_to_one() {
    // The same expense appears on both pages (overlapping scans).
    let page2 = vec![
        frag("15/04/2025", 40.0, 650.0),
        frag("Transport - Minibus Hire", 120.0, 650.0),
        frag("320.50", 470.0, 650.0),
    ];
    let document = InMemoryDocument::new(vec![statement_page(), page2]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.transactions.len(), 2);
}

#[test]
fn page_without_dates_yields_empty_result() {
    let page = vec![
        frag("Club newsletter", 40.0, 700.0),
        frag("No transactions this month", 40.0, 650.0),
    ];
    let document = InMemoryDocument::new(vec![page]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.pages_processed, 1);
    assert!(result.transactions.is_empty());
}

#[test]
fn noisy_tokens_are_normalized() {
    let page = vec![
        frag("Date", 40.0, 700.0),
        frag("Description", 120.0, 700.0),
        frag("Cash Out", 470.0, 700.0),
        frag("O5/O7/2O25", 40.0, 650.0),
        frag("First aid kit restock", 120.0, 650.0),
        frag("£1,234.56", 470.0, 650.0),
    ];
    let document = InMemoryDocument::new(vec![page]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    assert_eq!(result.transactions.len(), 1);
    let tx = &result.transactions[0];
    assert_eq!(tx.date_display(), "05/07/2025");
    assert_eq!(tx.amount, Decimal::from_str("1234.56").unwrap());
    assert_eq!(tx.category, "Equipment");
}

#[test]
fn cancellation_returns_accumulated_prefix() {
    let document = InMemoryDocument::new(vec![statement_page(), statement_page()]);
    let cancel = CancelFlag::new();
    cancel.cancel();

    let result = StatementExtractor::new()
        .extract_with_cancel(&document, &cancel)
        .unwrap();
    assert_eq!(result.pages_processed, 0);
    assert!(result.transactions.is_empty());
}

#[test]
fn max_pages_bounds_processing() {
    let pages = (0..5).map(|_| statement_page()).collect();
    let config = ExtractConfig {
        max_pages: 2,
        ..ExtractConfig::default()
    };
    let result = StatementExtractor::new()
        .with_config(config)
        .extract(&InMemoryDocument::new(pages))
        .unwrap();
    assert_eq!(result.pages_processed, 2);
}

#[test]
fn transactions_serialize_to_json() {
    let document = InMemoryDocument::new(vec![statement_page()]);
    let result = StatementExtractor::new().extract(&document).unwrap();

    let json = serde_json::to_string(&result.transactions[0]).unwrap();
    assert!(json.contains("\"kind\":\"income\""));
    assert!(json.contains("\"page\":1"));
}
