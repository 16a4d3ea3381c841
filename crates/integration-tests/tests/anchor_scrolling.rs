//! Integration tests for in-page anchor scrolling.

use shopfront_integration_tests::{checkout_fixture, listing_fixture, open};
use shopfront_page::{ScrollBehavior, ScrollBlock};

#[test]
fn test_anchor_scrolls_smoothly_to_section() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    let event = page.click_selector("#to-shipping").expect("Failed to click");

    let shipping = page.select_one("#shipping").expect("Missing section");
    let scroll = page.window().scrolls().first().copied().expect("No scroll recorded");
    assert_eq!(scroll.target, shipping);
    assert_eq!(scroll.behavior, ScrollBehavior::Smooth);
    assert_eq!(scroll.block, ScrollBlock::Start);
    assert!(event.default_prevented());
    assert!(page.window().navigations().is_empty());
}

#[test]
fn test_anchor_to_missing_section_is_silent() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    let event = page.click_selector("#to-payment").expect("Failed to click");

    assert!(event.default_prevented());
    assert!(page.window().scrolls().is_empty());
    assert!(page.window().navigations().is_empty());
}

#[test]
fn test_back_to_top_and_product_links() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    page.click_selector("#back-to-top").expect("Failed to click");
    page.click_selector("#red-hat h3").expect("Failed to click");

    let top = page.select_one("#top").expect("Missing header");
    assert_eq!(page.window().scrolls().len(), 1);
    assert_eq!(page.window().scrolls()[0].target, top);
    assert_eq!(
        page.window().navigations(),
        ["https://shop.test/products/red-hat"]
    );
}

#[test]
fn test_repeated_clicks_scroll_each_time() {
    let (mut page, _) = open(&checkout_fixture()).expect("Failed to open checkout");
    page.click_selector("#to-shipping").expect("Failed to click");
    page.click_selector("#to-shipping").expect("Failed to click");
    assert_eq!(page.window().scrolls().len(), 2);
}
