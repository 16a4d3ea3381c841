//! Integration tests for required-field validation on checkout.

use shopfront_integration_tests::{checkout_fixture, has_error_class, open};
use shopfront_page::Page;

const ALERT: &str = "Please fill in all required fields.";

fn fill(page: &mut Page, selector: &str, value: &str) {
    let node = page.select_one(selector).expect("Missing field");
    page.set_value(node, value).expect("Failed to set value");
}

fn fill_all(page: &mut Page) {
    fill(page, "#name", "Ada Lovelace");
    fill(page, "#email", "ada@example.com");
    fill(page, "#address", "12 Analytical Row");
}

// ============================================================================
// Blocked submissions
// ============================================================================

#[test]
fn test_empty_form_is_blocked_with_one_alert() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    page.click_selector("#place-order").expect("Failed to click");

    assert!(page.window().submissions().is_empty());
    assert_eq!(page.window().alerts(), [ALERT]);
    for field in ["#name", "#email", "#address"] {
        assert!(has_error_class(&page, field), "{field} should be marked");
    }
    assert!(!has_error_class(&page, "#company"));
    assert!(!has_error_class(&page, "#coupon"));
}

#[test]
fn test_whitespace_only_counts_as_empty() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    fill_all(&mut page);
    fill(&mut page, "#address", " \t\n ");

    let event = page.submit_selector("#checkout").expect("Failed to submit");
    assert!(event.default_prevented());
    assert!(has_error_class(&page, "#address"));
    assert!(!has_error_class(&page, "#name"));
    assert!(!has_error_class(&page, "#email"));
}

#[test]
fn test_each_blocked_attempt_alerts_once() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    page.submit_selector("#checkout").expect("Failed to submit");
    page.submit_selector("#checkout").expect("Failed to submit");
    assert_eq!(page.window().alerts().len(), 2);
}

// ============================================================================
// Successful submissions
// ============================================================================

#[test]
fn test_complete_form_submits() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    fill_all(&mut page);
    page.click_selector("#place-order").expect("Failed to click");

    let form = page.select_one("#checkout").expect("Missing form");
    assert_eq!(page.window().submissions(), [form]);
    assert!(page.window().alerts().is_empty());
}

#[test]
fn test_fixing_fields_clears_markers() {
    let (mut page, handle) = open(&checkout_fixture()).expect("Failed to open checkout");
    fill(&mut page, "#name", "Ada Lovelace");
    page.submit_selector("#checkout").expect("Failed to submit");
    assert!(has_error_class(&page, "#email"));

    fill_all(&mut page);
    page.submit_selector("#checkout").expect("Failed to submit");

    for field in ["#name", "#email", "#address"] {
        assert!(!has_error_class(&page, field), "{field} should be cleared");
    }
    let email = page.select_one("#email").expect("Missing field");
    assert!(handle.model().field_validity(email).is_some_and(|v| v.is_valid()));
    assert_eq!(page.window().submissions().len(), 1);
}
