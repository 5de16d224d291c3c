//! Region accessor
//!
//! Attribute-level access to the map body: a region's fill color, its
//! optional numeric label, and the list of region identifiers. Regions are
//! addressed by their exact element id.

use log::warn;
use thiserror::Error;

use crate::color::{Color, ColorParseError};
use crate::config::MapConfig;
use crate::document::{DocumentError, MapDocument};

/// Errors raised by region lookups and mutations
#[derive(Debug, Error)]
pub enum RegionError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Enumerate all region identifiers in document order.
pub fn regions(doc: &MapDocument, config: &MapConfig) -> Result<Vec<String>, RegionError> {
    let group = doc.group(&config.ids.regions)?;
    Ok(group
        .children
        .iter()
        .filter_map(|child| child.id().map(str::to_string))
        .collect())
}

/// Fill color of a region, or `None` if no region has that id.
pub fn region_color(
    doc: &MapDocument,
    config: &MapConfig,
    id: &str,
) -> Result<Option<Color>, RegionError> {
    let group = doc.group(&config.ids.regions)?;
    match group.children.iter().find(|child| child.id() == Some(id)) {
        Some(node) => {
            let fill = node.attr("fill").unwrap_or("");
            Ok(Some(fill.parse()?))
        }
        None => Ok(None),
    }
}

/// Repaint a region. A missing region is a no-op.
pub fn set_region_color(
    doc: &mut MapDocument,
    config: &MapConfig,
    id: &str,
    color: Color,
) -> Result<(), RegionError> {
    let group = doc.group_mut(&config.ids.regions)?;
    match group
        .children
        .iter_mut()
        .find(|child| child.id() == Some(id))
    {
        Some(node) => node.set_attr("fill", color.to_string()),
        None => warn!("no region '{}' to recolor", id),
    }
    Ok(())
}

/// Numeric label of a region, or `None` if the region has no label.
///
/// A label whose text starts with an alphabetic region abbreviation
/// (e.g. `VT 3`) has the abbreviation stripped.
pub fn region_number(
    doc: &MapDocument,
    config: &MapConfig,
    id: &str,
) -> Result<Option<String>, RegionError> {
    let group = doc.group(&config.ids.numbers)?;
    let node = group.children.iter().find(|child| child.id() == Some(id));
    Ok(node.and_then(|n| n.text.as_deref()).map(strip_abbreviation))
}

fn strip_abbreviation(text: &str) -> String {
    let prefix: Vec<char> = text.chars().take(2).collect();
    if prefix.len() == 2 && prefix.iter().all(|c| c.is_alphabetic()) {
        text[2..].trim().to_string()
    } else {
        text.trim().to_string()
    }
}

/// Set a region's numeric label, optionally recoloring it. A missing label
/// node is a no-op.
pub fn set_region_number(
    doc: &mut MapDocument,
    config: &MapConfig,
    id: &str,
    number: i64,
    color: Option<Color>,
) -> Result<(), RegionError> {
    let group = doc.group_mut(&config.ids.numbers)?;
    match group
        .children
        .iter_mut()
        .find(|child| child.id() == Some(id))
    {
        Some(node) => {
            node.text = Some(number.to_string());
            if let Some(color) = color {
                node.set_attr("fill", color.to_string());
            }
        }
        None => warn!("no number label for region '{}'", id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MapDocument {
        MapDocument::parse(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
  <g id="regions">
    <path id="north" fill="#d0d0d0" d="M0 0h10v10H0z"/>
    <path id="south" fill="#aa0000" d="M0 10h10v10H0z"/>
  </g>
  <g id="numbers">
    <text id="north" fill="#000000">NO 12</text>
    <text id="south" fill="#000000">7</text>
  </g>
</svg>"##,
        )
        .unwrap()
    }

    #[test]
    fn test_region_listing() {
        let doc = fixture();
        let config = MapConfig::default();
        assert_eq!(regions(&doc, &config).unwrap(), vec!["north", "south"]);
    }

    #[test]
    fn test_color_round_trip() {
        let mut doc = fixture();
        let config = MapConfig::default();
        assert_eq!(
            region_color(&doc, &config, "south").unwrap(),
            Some(Color::new(0xaa0000))
        );
        set_region_color(&mut doc, &config, "south", Color::new(0x123456)).unwrap();
        assert_eq!(
            region_color(&doc, &config, "south").unwrap(),
            Some(Color::new(0x123456))
        );
        assert_eq!(region_color(&doc, &config, "missing").unwrap(), None);
    }

    #[test]
    fn test_number_strips_abbreviation() {
        let doc = fixture();
        let config = MapConfig::default();
        assert_eq!(
            region_number(&doc, &config, "north").unwrap().as_deref(),
            Some("12")
        );
        assert_eq!(
            region_number(&doc, &config, "south").unwrap().as_deref(),
            Some("7")
        );
    }

    #[test]
    fn test_set_number_and_color() {
        let mut doc = fixture();
        let config = MapConfig::default();
        set_region_number(&mut doc, &config, "south", 9, Some(Color::new(0xffffff))).unwrap();
        assert_eq!(
            region_number(&doc, &config, "south").unwrap().as_deref(),
            Some("9")
        );
        let label = doc.root().find(&config.ids.numbers).unwrap().children[1].clone();
        assert_eq!(label.attr("fill"), Some("#ffffff"));
    }

    #[test]
    fn test_missing_region_is_noop() {
        let mut doc = fixture();
        let config = MapConfig::default();
        let before = doc.to_svg();
        set_region_color(&mut doc, &config, "nowhere", Color::new(0x123456)).unwrap();
        assert_eq!(doc.to_svg(), before);
    }
}
