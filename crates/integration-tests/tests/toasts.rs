//! Integration tests for toast notifications and flash messages.

use shopfront_integration_tests::{cart_fixture, listing_fixture, open};
use shopfront_page::{Page, show_toast};

fn toast_nodes(page: &Page) -> usize {
    page.select_all(".fixed.top-4.right-4").expect("Invalid selector").len()
}

// ============================================================================
// show_toast
// ============================================================================

#[test]
fn test_success_toast_is_green_and_expires() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    let toast = show_toast(&mut page, "Saved!", None).expect("Failed to show toast");

    let doc = page.document();
    assert!(doc.has_class(toast.node(), "bg-green-500"));
    assert_eq!(doc.text_content(toast.node()), "Saved!");
    assert_eq!(doc.parent(toast.node()), Some(doc.body()));

    page.advance_time(2999).expect("Failed to advance");
    assert!(toast.is_visible(&page));
    page.advance_time(1).expect("Failed to advance");
    assert!(!toast.is_visible(&page));
}

#[test]
fn test_error_toast_is_red_with_same_timing() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    let toast = show_toast(&mut page, "Payment failed", Some("error")).expect("Failed to show toast");

    assert!(page.document().has_class(toast.node(), "bg-red-500"));
    assert_eq!(toast.removal().due_at(), 3000);
}

#[test]
fn test_unknown_type_is_blue() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    let toast = show_toast(&mut page, "Heads up", Some("notice")).expect("Failed to show toast");
    assert!(page.document().has_class(toast.node(), "bg-blue-500"));
}

#[test]
fn test_toasts_stack_and_expire_in_order() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    let first = show_toast(&mut page, "One", None).expect("Failed to show toast");
    page.advance_time(500).expect("Failed to advance");
    let second = show_toast(&mut page, "One", None).expect("Failed to show toast");
    assert_eq!(toast_nodes(&page), 2);

    page.advance_time(2500).expect("Failed to advance");
    assert!(!first.is_visible(&page));
    assert!(second.is_visible(&page));

    page.flush().expect("Failed to flush");
    assert_eq!(toast_nodes(&page), 0);
    assert_eq!(page.now_ms(), 3500);
}

#[test]
fn test_dismiss_removes_now() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    let toast = show_toast(&mut page, "Saved!", None).expect("Failed to show toast");

    assert!(toast.dismiss(&mut page).expect("Failed to dismiss"));
    assert_eq!(toast_nodes(&page), 0);
    assert!(page.pending_timers().is_empty());
}

// ============================================================================
// Flash messages
// ============================================================================

#[test]
fn test_flash_message_becomes_toast() {
    let (mut page, handle) = open(&cart_fixture()).expect("Failed to open cart");

    assert!(page.select_all("[data-flash]").expect("Invalid selector").is_empty());
    let toasts = handle.flash_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(page.document().text_content(toasts[0].node()), "Added to cart");
    assert!(page.document().has_class(toasts[0].node(), "bg-green-500"));

    page.advance_time(3000).expect("Failed to advance");
    assert_eq!(toast_nodes(&page), 0);
}
