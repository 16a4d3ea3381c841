//! HTML serialization of the document tree.

use shopfront_core::NodeId;

use super::Document;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(super) fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    if let Some(text) = doc.text(node) {
        escape_into(text, false, out);
        return;
    }
    let Some(element) = doc.element(node) else {
        // Document node: serialize its children.
        for child in doc.children(node) {
            write_node(doc, *child, out);
        }
        return;
    };

    out.push('<');
    out.push_str(element.tag());
    if !element.classes().is_empty() {
        write_attr("class", &element.classes().join(" "), out);
    }
    for (name, value) in &element.attrs {
        // Form controls show their current value, not the initial attribute.
        if name == "value" && is_form_control(element.tag()) {
            continue;
        }
        write_attr(name, value, out);
    }
    if is_form_control(element.tag()) && element.tag() != "textarea" && !element.value.is_empty() {
        write_attr("value", &element.value, out);
    }
    if let Some(display) = &element.display {
        write_attr("style", &format!("display: {display}"), out);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag()) {
        return;
    }
    if element.tag() == "textarea" {
        escape_into(&element.value, false, out);
    } else {
        for child in doc.children(node) {
            write_node(doc, *child, out);
        }
    }
    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}

fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
