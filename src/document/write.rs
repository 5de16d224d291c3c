//! Serialization of the element tree back to SVG text

use super::Element;

/// Serialize a document with a standalone XML declaration and two-space
/// indentation.
pub(super) fn write_document(root: &Element) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.tag);
    for (key, value) in element.attrs() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }

    if element.children.is_empty() && element.text.is_none() {
        out.push_str("/>\n");
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&escape(text, false));
    }
    if element.children.is_empty() {
        out.push_str(&format!("</{}>\n", element.tag));
        return;
    }

    out.push('\n');
    for child in &element.children {
        write_element(out, child, depth + 1);
    }
    out.push_str(&indent);
    out.push_str(&format!("</{}>\n", element.tag));
}

fn escape(value: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
