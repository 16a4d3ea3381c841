//! Integration tests for the live product search filter.

use proptest::prelude::*;
use shopfront_integration_tests::{LISTING_TITLES, display_of, listing_fixture, open};
use shopfront_page::{ElementSpec, Page, PageFixture};

const CARDS: [&str; 3] = ["#red-shirt", "#blue-jeans", "#red-hat"];

fn search(page: &mut Page, text: &str) {
    let input = page.select_one("#search-input").expect("Missing search input");
    page.type_text(input, text).expect("Failed to type");
}

fn visible(page: &Page) -> Vec<&'static str> {
    CARDS
        .into_iter()
        .filter(|card| display_of(page, card).as_deref() == Some("block"))
        .collect()
}

#[test]
fn test_typing_red_shows_red_products() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    search(&mut page, "red");

    assert_eq!(visible(&page), ["#red-shirt", "#red-hat"]);
    assert_eq!(display_of(&page, "#blue-jeans").as_deref(), Some("none"));
}

#[test]
fn test_clearing_restores_all_products() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    search(&mut page, "red");
    let input = page.select_one("#search-input").expect("Missing search input");
    page.clear(input).expect("Failed to clear");

    assert_eq!(visible(&page), CARDS);
}

#[test]
fn test_filter_updates_on_every_keystroke() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    search(&mut page, "b");
    assert_eq!(visible(&page), ["#blue-jeans"]);

    search(&mut page, "x");
    assert!(visible(&page).is_empty());
}

#[test]
fn test_price_text_is_not_searched() {
    let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
    search(&mut page, "$25");
    assert!(visible(&page).is_empty());
}

#[test]
fn test_listing_without_search_input() {
    let fixture = PageFixture::default().with_body(vec![
        ElementSpec::new("div")
            .class("product-card")
            .id("solo")
            .child(ElementSpec::new("h3").text("Solo"))
            .into(),
    ]);
    let (page, handle) = open(&fixture).expect("Failed to open page");

    assert_eq!(handle.listener_count(), 1, "only the load listener");
    assert_eq!(display_of(&page, "#solo"), None);
}

proptest! {
    #[test]
    fn prop_cards_visible_iff_title_contains_term(term in "[a-zA-Z]{0,4}") {
        let (mut page, _) = open(&listing_fixture()).expect("Failed to open listing");
        search(&mut page, &term);
        let input = page.select_one("#search-input").expect("Missing search input");
        page.key_up(input, "Shift").expect("Failed to key up");

        let needle = term.to_lowercase();
        for (card, title) in CARDS.iter().zip(LISTING_TITLES) {
            let expected = if title.to_lowercase().contains(&needle) { "block" } else { "none" };
            let display = display_of(&page, card);
            prop_assert_eq!(display.as_deref(), Some(expected));
        }
    }
}
