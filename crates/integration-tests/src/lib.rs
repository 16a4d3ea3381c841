//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `quantity_steppers` - Cart line quantity controls
//! - `anchor_scrolling` - In-page navigation
//! - `checkout_validation` - Required fields on checkout forms
//! - `product_search` - Live filtering of product listings
//! - `toasts` - Toast notifications and flash messages
//! - `controller_lifecycle` - Install, attach, detach, and configuration
//!
//! The helpers below build the storefront pages the tests drive: a product
//! listing, a cart, and a checkout form, laid out the way the storefront
//! templates render them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};
use shopfront_core::DEFAULT_ERROR_CLASS;
use shopfront_page::{
    ControllerHandle, ElementSpec, NodeSpec, Page, PageConfig, PageFixture, Result, controller,
};

/// Product titles on the default listing page, in document order.
pub const LISTING_TITLES: [&str; 3] = ["Red Shirt", "Blue Jeans", "Red Hat"];

/// A product card with an `h3` title and a price line.
#[must_use]
pub fn product_card(handle: &str, title: &str, price: &str) -> NodeSpec {
    ElementSpec::new("div")
        .class("product-card rounded-lg")
        .id(handle)
        .child(
            ElementSpec::new("a")
                .attr("href", &format!("/products/{handle}"))
                .child(ElementSpec::new("h3").class("font-semibold").text(title)),
        )
        .child(ElementSpec::new("p").class("price").text(price))
        .into()
}

/// A cart line with decrease and increase buttons around a quantity input.
#[must_use]
pub fn cart_line(handle: &str, quantity: &str) -> NodeSpec {
    ElementSpec::new("div")
        .class("cart-line flex")
        .id(&format!("line-{handle}"))
        .child(
            ElementSpec::new("button")
                .class("quantity-btn decrease")
                .id(&format!("{handle}-minus"))
                .attr("type", "button")
                .text("-"),
        )
        .child(
            ElementSpec::new("input")
                .class("quantity-input")
                .id(&format!("{handle}-qty"))
                .attr("type", "number")
                .attr("name", &format!("quantity[{handle}]"))
                .value(quantity),
        )
        .child(
            ElementSpec::new("button")
                .class("quantity-btn increase")
                .id(&format!("{handle}-plus"))
                .attr("type", "button")
                .text("+"),
        )
        .into()
}

/// Product listing with a search box, a "back to top" anchor, and
/// [`LISTING_TITLES`] as cards.
#[must_use]
pub fn listing_fixture() -> PageFixture {
    let [shirt, jeans, hat] = LISTING_TITLES;
    PageFixture::new("https://shop.test/collections/all").with_body(vec![
        ElementSpec::new("header")
            .id("top")
            .child(ElementSpec::new("input").id("search-input").attr("type", "search"))
            .into(),
        ElementSpec::new("section")
            .id("products")
            .child(product_card("red-shirt", shirt, "$25.00"))
            .child(product_card("blue-jeans", jeans, "$60.00"))
            .child(product_card("red-hat", hat, "$18.00"))
            .into(),
        ElementSpec::new("a").id("back-to-top").attr("href", "#top").into(),
    ])
}

/// Cart form with two lines, a flash message, and a checkout button.
#[must_use]
pub fn cart_fixture() -> PageFixture {
    PageFixture::new("https://shop.test/cart").with_body(vec![
        ElementSpec::new("div")
            .class("flash")
            .attr("data-flash", "success")
            .text("Added to cart")
            .into(),
        ElementSpec::new("form")
            .id("cart")
            .attr("action", "/cart/update")
            .child(cart_line("mug", "1"))
            .child(cart_line("tee", "3"))
            .child(ElementSpec::new("button").id("update-cart").text("Update cart"))
            .into(),
    ])
}

/// Checkout form, described as JSON the way the CLI receives pages.
#[must_use]
pub fn checkout_json() -> Value {
    json!({
        "url": "https://shop.test/checkout",
        "body": [
            {"tag": "nav", "children": [
                {"tag": "a", "id": "to-shipping", "attrs": {"href": "#shipping"}, "text": "Shipping"},
                {"tag": "a", "id": "to-payment", "attrs": {"href": "#payment"}, "text": "Payment"}
            ]},
            {"tag": "form", "id": "checkout", "attrs": {"action": "/checkout"}, "children": [
                {"tag": "fieldset", "id": "shipping", "children": [
                    {"tag": "input", "id": "name", "attrs": {"name": "name", "required": ""}},
                    {"tag": "input", "id": "email", "attrs": {"name": "email", "type": "email", "required": ""}},
                    {"tag": "textarea", "id": "address", "attrs": {"name": "address", "required": ""}},
                    {"tag": "input", "id": "company", "attrs": {"name": "company"}}
                ]},
                {"tag": "fieldset", "id": "payment-details", "children": [
                    {"tag": "input", "id": "coupon", "attrs": {"name": "coupon"}}
                ]},
                {"tag": "button", "id": "place-order", "attrs": {"type": "submit"}, "text": "Place order"}
            ]}
        ]
    })
}

/// # Panics
///
/// Panics if [`checkout_json`] does not describe a page.
#[must_use]
pub fn checkout_fixture() -> PageFixture {
    match serde_json::from_value(checkout_json()) {
        Ok(fixture) => fixture,
        Err(e) => panic!("checkout fixture is malformed: {e}"),
    }
}

/// Build `fixture`, install the behaviors at the document root with
/// `config`, and load the page.
///
/// # Errors
///
/// Returns an error if the fixture or configuration is invalid.
pub fn open_with(fixture: &PageFixture, config: PageConfig) -> Result<(Page, ControllerHandle)> {
    let mut page = Page::from_fixture(fixture)?;
    let root = page.document().root();
    let handle = controller::install(&mut page, root, config)?;
    page.load()?;
    Ok((page, handle))
}

/// [`open_with`] using the default configuration.
///
/// # Errors
///
/// Returns an error if the fixture is invalid.
pub fn open(fixture: &PageFixture) -> Result<(Page, ControllerHandle)> {
    open_with(fixture, PageConfig::default())
}

/// Inline `display` of the first element matching `selector`.
#[must_use]
pub fn display_of(page: &Page, selector: &str) -> Option<String> {
    let node = page.select_one(selector).ok()?;
    page.document().display(node).map(str::to_owned)
}

/// Whether the first element matching `selector` carries `class`.
#[must_use]
pub fn has_class(page: &Page, selector: &str, class: &str) -> bool {
    page.select_one(selector)
        .is_ok_and(|node| page.document().has_class(node, class))
}

/// Whether the first element matching `selector` is marked invalid with the
/// default error class.
#[must_use]
pub fn has_error_class(page: &Page, selector: &str) -> bool {
    has_class(page, selector, DEFAULT_ERROR_CLASS)
}
