//! Conversion from parsed XML into the mutable element tree

use super::Element;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Convert the root element of a parsed document, pinning the namespace
/// declarations the writer needs back on the `<svg>` node (roxmltree strips
/// them from the attribute list).
pub(super) fn convert_root(tree: &roxmltree::Document) -> Element {
    let converted = convert(tree.root_element());
    let mut root = Element::new(converted.tag.clone())
        .with_attr("xmlns", SVG_NS)
        .with_attr("xmlns:xlink", XLINK_NS);
    for (key, value) in converted.attrs() {
        root.set_attr(key, value);
    }
    root.text = converted.text;
    root.children = converted.children;
    root
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        let name = match attr.namespace() {
            Some(XLINK_NS) => format!("xlink:{}", attr.name()),
            _ => attr.name().to_string(),
        };
        element.set_attr(name, attr.value());
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(convert(child));
        } else if child.is_text() {
            let text = child.text().unwrap_or("").trim();
            if !text.is_empty() {
                element.text = Some(text.to_string());
            }
        }
    }
    element
}
