//! Mutable map document
//!
//! The document accessor: an in-memory element tree parsed from SVG text and
//! serialized back after each mutation. All layout and roster code reads and
//! writes document nodes exclusively through this module. Lookup is by the
//! `id` attribute; candidate code does its own case-folding on top.

mod parse;
mod write;

use std::path::Path;

use thiserror::Error;

/// Errors raised by document access and persistence
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read or write map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid SVG document: {0}")]
    Parse(#[from] roxmltree::Error),

    /// A distinguished element group the operation depends on is absent
    #[error("missing element group '{id}'")]
    MissingGroup { id: String },

    #[error("attribute '{attr}' on '{element}' is not a number: '{value}'")]
    InvalidNumber {
        element: String,
        attr: String,
        value: String,
    },

    #[error("map dimensions must be positive")]
    InvalidDimension,

    #[error("document already contains the election overlay")]
    AlreadyPrepared,
}

/// One element node: tag, ordered attributes, optional text, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Read an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Write an attribute, replacing an existing value or appending a new
    /// one while preserving attribute order.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Builder-style [`set_attr`](Self::set_attr)
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The `id` attribute, if any
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Iterate over attributes in document order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Depth-first search for a descendant with the given id
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first search for a descendant with the given id, mutable
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }
}

/// A parsed map document rooted at an `<svg>` element.
#[derive(Debug, Clone)]
pub struct MapDocument {
    root: Element,
}

impl MapDocument {
    /// Parse a document from SVG text.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let tree = roxmltree::Document::parse(text)?;
        Ok(Self {
            root: parse::convert_root(&tree),
        })
    }

    /// Read and parse a document from a file.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialize the document back to SVG text.
    pub fn to_svg(&self) -> String {
        write::write_document(&self.root)
    }

    /// Serialize and write the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Locate a distinguished group by id.
    pub fn group(&self, id: &str) -> Result<&Element, DocumentError> {
        self.root.find(id).ok_or_else(|| DocumentError::MissingGroup {
            id: id.to_string(),
        })
    }

    /// Locate a distinguished group by id, mutable.
    pub fn group_mut(&mut self, id: &str) -> Result<&mut Element, DocumentError> {
        self.root
            .find_mut(id)
            .ok_or_else(|| DocumentError::MissingGroup {
                id: id.to_string(),
            })
    }

    fn dimension(&self, attr: &str) -> Result<i64, DocumentError> {
        let value = self.root.attr(attr).unwrap_or("");
        value
            .parse()
            .map_err(|_| DocumentError::InvalidNumber {
                element: "svg".to_string(),
                attr: attr.to_string(),
                value: value.to_string(),
            })
    }

    /// Map width in pixels
    pub fn width(&self) -> Result<i64, DocumentError> {
        self.dimension("width")
    }

    /// Map height in pixels
    pub fn height(&self) -> Result<i64, DocumentError> {
        self.dimension("height")
    }

    pub fn set_width(&mut self, value: i64) -> Result<(), DocumentError> {
        if value <= 0 {
            return Err(DocumentError::InvalidDimension);
        }
        self.root.set_attr("width", value.to_string());
        Ok(())
    }

    pub fn set_height(&mut self, value: i64) -> Result<(), DocumentError> {
        if value <= 0 {
            return Err(DocumentError::InvalidDimension);
        }
        self.root.set_attr("height", value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
  <g id="regions">
    <path id="north" fill="#d0d0d0" d="M0 0h10v10H0z"/>
    <path id="south" fill="#d0d0d0" d="M0 10h10v10H0z"/>
  </g>
</svg>"##;

    #[test]
    fn test_parse_and_lookup() {
        let doc = MapDocument::parse(DOC).unwrap();
        assert_eq!(doc.width().unwrap(), 400);
        assert_eq!(doc.height().unwrap(), 300);

        let regions = doc.group("regions").unwrap();
        assert_eq!(regions.children.len(), 2);
        assert_eq!(doc.root().find("south").unwrap().attr("fill"), Some("#d0d0d0"));
    }

    #[test]
    fn test_missing_group() {
        let doc = MapDocument::parse(DOC).unwrap();
        assert!(matches!(
            doc.group("bar"),
            Err(DocumentError::MissingGroup { .. })
        ));
    }

    #[test]
    fn test_attribute_mutation_round_trips() {
        let mut doc = MapDocument::parse(DOC).unwrap();
        doc.group_mut("regions")
            .unwrap()
            .find_mut("north")
            .unwrap()
            .set_attr("fill", "#ff0000");

        let reparsed = MapDocument::parse(&doc.to_svg()).unwrap();
        assert_eq!(
            reparsed.root().find("north").unwrap().attr("fill"),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_set_attr_preserves_order() {
        let mut el = Element::new("rect")
            .with_attr("id", "a")
            .with_attr("x", "0")
            .with_attr("fill", "#000000");
        el.set_attr("x", "10");
        let keys: Vec<&str> = el.attrs().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["id", "x", "fill"]);
        assert_eq!(el.attr("x"), Some("10"));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut doc = MapDocument::parse(DOC).unwrap();
        assert!(matches!(
            doc.set_height(0),
            Err(DocumentError::InvalidDimension)
        ));
        assert!(doc.set_height(500).is_ok());
        assert_eq!(doc.height().unwrap(), 500);
    }

    #[test]
    fn test_non_numeric_dimension() {
        let doc = MapDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="wide" height="300"/>"#,
        )
        .unwrap();
        assert!(matches!(
            doc.width(),
            Err(DocumentError::InvalidNumber { .. })
        ));
    }
}
