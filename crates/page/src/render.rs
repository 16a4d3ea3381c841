//! Apply view-model patches to the document.

use shopfront_core::{NodeId, Patch};

use crate::dom::Document;
use crate::error::Result;

/// Apply `patches` in order.
///
/// Patches for nodes that have been detached since the update was computed
/// still apply; the document keeps detached nodes addressable.
///
/// # Errors
///
/// Returns an error if a patch targets a node that is not an element.
pub fn apply_patches(doc: &mut Document, patches: &[Patch]) -> Result<()> {
    for patch in patches {
        apply_patch(doc, patch)?;
    }
    Ok(())
}

fn apply_patch(doc: &mut Document, patch: &Patch) -> Result<()> {
    match patch {
        Patch::SetValue { node, value } => doc.set_value(*node, value),
        Patch::SetDisplay { node, display } => doc.set_display(*node, Some(display.as_css())),
        Patch::SetClass {
            node,
            class,
            present,
        } => set_class(doc, *node, class, *present),
    }
}

fn set_class(doc: &mut Document, node: NodeId, class: &str, present: bool) -> Result<()> {
    if present {
        doc.add_class(node, class)
    } else {
        doc.remove_class(node, class)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::DisplayMode;

    use super::*;
    use crate::dom::{ElementSpec, PageFixture};
    use crate::error::PageError;

    #[test]
    fn test_apply_patches() {
        let mut doc = PageFixture::default()
            .with_body(vec![ElementSpec::new("input").class("field").value("1").into()])
            .build()
            .unwrap();
        let input = doc.children(doc.body())[0];

        apply_patches(
            &mut doc,
            &[
                Patch::SetValue {
                    node: input,
                    value: "2".to_string(),
                },
                Patch::SetDisplay {
                    node: input,
                    display: DisplayMode::None,
                },
                Patch::SetClass {
                    node: input,
                    class: "border-red-500".to_string(),
                    present: true,
                },
                Patch::SetClass {
                    node: input,
                    class: "field".to_string(),
                    present: false,
                },
            ],
        )
        .unwrap();

        assert_eq!(doc.value(input), Some("2"));
        assert_eq!(doc.display(input), Some("none"));
        assert!(doc.has_class(input, "border-red-500"));
        assert!(!doc.has_class(input, "field"));
    }

    #[test]
    fn test_apply_patch_to_text_node_fails() {
        let mut doc = PageFixture::default().with_body(vec!["text".into()]).build().unwrap();
        let text = doc.children(doc.body())[0];
        let result = apply_patches(
            &mut doc,
            &[Patch::SetValue {
                node: text,
                value: "x".to_string(),
            }],
        );
        assert!(matches!(result, Err(PageError::NotAnElement(_))));
    }
}
