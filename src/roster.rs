//! Candidate registry
//!
//! Owns the four parallel candidate lists (name labels, color swatches,
//! portrait/border pairs, vote labels) and their cardinality invariant:
//! names, squares and vote labels must hold one node per candidate, the
//! picture list exactly two. The invariant is checked before every
//! structural write and on every structural read; a violation means the
//! document was corrupted between mutations and is surfaced as
//! [`RosterError::ListMismatch`].

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::{debug, warn};
use thiserror::Error;

use crate::color::{Color, ColorParseError};
use crate::config::MapConfig;
use crate::document::{DocumentError, Element, MapDocument};
use crate::layout::{self, LayoutMode};
use crate::region::{self, RegionError};
use crate::transform::{update_offset, OffsetError};

/// Errors raised by roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("candidate '{name}' already exists")]
    DuplicateCandidate { name: String },

    #[error("candidate roster is at its maximum of {max}")]
    CapacityExceeded { max: usize },

    #[error("rosters of {threshold} or more candidates need the condensed layout, which is not available")]
    UnsupportedLayoutMode { threshold: usize },

    /// The four parallel lists disagree on how many candidates exist.
    /// Fatal: the document was corrupted by something outside the registry.
    #[error("candidate lists are inconsistent: {names} names, {squares} squares, {pictures} picture nodes, {votes} vote labels")]
    ListMismatch {
        names: usize,
        squares: usize,
        pictures: usize,
        votes: usize,
    },

    /// A candidate is present in some lists but absent from others.
    /// The same corruption class as [`RosterError::ListMismatch`].
    #[error("candidate '{name}' is present in only some of the candidate lists")]
    PartialCandidate { name: String },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Offset(#[from] OffsetError),

    #[error(transparent)]
    Color(#[from] ColorParseError),

    #[error(transparent)]
    Region(#[from] RegionError),
}

/// How a candidate's portrait image is referenced
#[derive(Debug, Clone)]
pub enum Portrait {
    /// Reference an image by href, resolved relative to the map file
    Href(String),
    /// Read the file and embed its content as a base64 data URI
    Embed(PathBuf),
}

/// A candidate resolved either by name or directly by color
#[derive(Debug, Clone, Copy)]
pub enum CandidateRef<'a> {
    Name(&'a str),
    Color(Color),
}

/// Number of candidates, after verifying the four-list cardinality
/// invariant.
pub fn count(doc: &MapDocument, config: &MapConfig) -> Result<usize, RosterError> {
    let names = doc.group(&config.ids.name_list)?.children.len();
    let squares = doc.group(&config.ids.square_list)?.children.len();
    let pictures = doc.group(&config.ids.picture_list)?.children.len();
    let votes = doc.group(&config.ids.vote_list)?.children.len();
    if squares != names || votes != names || pictures != 2 * names {
        return Err(RosterError::ListMismatch {
            names,
            squares,
            pictures,
            votes,
        });
    }
    Ok(names)
}

/// Append a candidate to the roster.
///
/// Validation (duplicate name, list consistency, capacity, layout mode)
/// happens before any node is touched, so a failed add leaves the document
/// byte-identical. The new candidate starts with zero votes and takes the
/// next row in each list; the portrait and vote groups are recentered for
/// the grown roster.
pub fn add(
    doc: &mut MapDocument,
    config: &MapConfig,
    name: &str,
    color: Color,
    portrait: Option<&Portrait>,
) -> Result<(), RosterError> {
    let key = name.to_lowercase();

    let name_list = doc.group(&config.ids.name_list)?;
    if name_list
        .children
        .iter()
        .any(|child| child.id().is_some_and(|id| id.eq_ignore_ascii_case(&key)))
    {
        return Err(RosterError::DuplicateCandidate {
            name: name.to_string(),
        });
    }

    let n = count(doc, config)?;
    if n >= config.roster.max_candidates {
        return Err(RosterError::CapacityExceeded {
            max: config.roster.max_candidates,
        });
    }
    if layout::mode_for(n, config) == LayoutMode::Condensed {
        return Err(RosterError::UnsupportedLayoutMode {
            threshold: config.roster.switch_threshold,
        });
    }

    let href = portrait_href(portrait, config)?;
    let index = n;
    let slot_x = layout::slot_x(index, config).to_string();
    debug!("adding candidate '{}' at row {}", name, index);

    let label = Element::new("text")
        .with_attr("id", key.as_str())
        .with_attr("x", "0")
        .with_attr("y", layout::name_row_y(index, config).to_string())
        .with_attr("font-size", config.names.font_size.to_string())
        .with_text(name);
    doc.group_mut(&config.ids.name_list)?.children.push(label);

    let square = Element::new("rect")
        .with_attr("id", key.as_str())
        .with_attr("x", "0")
        .with_attr("y", layout::square_row_y(index, config).to_string())
        .with_attr("width", config.squares.width.to_string())
        .with_attr("height", config.squares.height.to_string())
        .with_attr("fill", color.to_string())
        .with_attr("stroke", config.squares.stroke.to_string())
        .with_attr("stroke-width", config.squares.stroke_width.to_string());
    doc.group_mut(&config.ids.square_list)?.children.push(square);

    let picture = Element::new("image")
        .with_attr("id", format!("{key}-pic"))
        .with_attr("x", slot_x.as_str())
        .with_attr("y", "0")
        .with_attr("width", config.portraits.width.to_string())
        .with_attr("height", config.portraits.height.to_string())
        .with_attr("xlink:href", href);
    let border = Element::new("rect")
        .with_attr("id", format!("{key}-border"))
        .with_attr("x", slot_x.as_str())
        .with_attr("y", "0")
        .with_attr("width", config.portraits.width.to_string())
        .with_attr("height", config.portraits.height.to_string())
        .with_attr("fill", "none")
        .with_attr("stroke", color.to_string())
        .with_attr("stroke-width", config.portraits.stroke_width.to_string());
    let pictures = doc.group_mut(&config.ids.picture_list)?;
    pictures.children.push(picture);
    pictures.children.push(border);

    let votes = Element::new("text")
        .with_attr("id", format!("{key}-votes"))
        .with_attr("x", slot_x.as_str())
        .with_attr("fill", color.to_string())
        .with_attr("stroke", config.votes.stroke.to_string())
        .with_attr("stroke-width", config.votes.stroke_width.to_string())
        .with_attr("text-anchor", config.votes.anchor.clone())
        .with_text("0");
    doc.group_mut(&config.ids.vote_list)?.children.push(votes);

    recenter_groups(doc, config, n + 1)
}

/// Remove a candidate from the roster.
///
/// Removal is atomic: the candidate is located in all four lists before
/// anything is touched. Absent from every list is a no-op; present in some
/// lists but not all fails with [`RosterError::PartialCandidate`] and
/// leaves the document untouched. Map regions painted with the candidate's
/// color keep their fill.
pub fn remove(doc: &mut MapDocument, config: &MapConfig, name: &str) -> Result<(), RosterError> {
    let key = name.to_lowercase();
    count(doc, config)?;

    let name_at = position_of(doc.group(&config.ids.name_list)?, &key);
    let square_at = position_of(doc.group(&config.ids.square_list)?, &key);
    let pictures = doc.group(&config.ids.picture_list)?;
    let picture_at = position_of(pictures, &format!("{key}-pic"));
    let border_at = position_of(pictures, &format!("{key}-border"));
    let vote_at = position_of(doc.group(&config.ids.vote_list)?, &format!("{key}-votes"));

    if [name_at, square_at, picture_at, border_at, vote_at]
        .iter()
        .all(Option::is_none)
    {
        warn!("no candidate '{}' to remove", name);
        return Ok(());
    }
    let (Some(name_at), Some(square_at), Some(picture_at), Some(border_at), Some(vote_at)) =
        (name_at, square_at, picture_at, border_at, vote_at)
    else {
        return Err(RosterError::PartialCandidate {
            name: name.to_string(),
        });
    };
    debug!("removing candidate '{}'", name);

    doc.group_mut(&config.ids.name_list)?.children.remove(name_at);
    doc.group_mut(&config.ids.square_list)?
        .children
        .remove(square_at);
    let pictures = doc.group_mut(&config.ids.picture_list)?;
    // higher index first so the lower one stays valid
    pictures.children.remove(picture_at.max(border_at));
    pictures.children.remove(picture_at.min(border_at));
    doc.group_mut(&config.ids.vote_list)?.children.remove(vote_at);

    repack(doc, config)
}

fn position_of(list: &Element, key: &str) -> Option<usize> {
    list.children
        .iter()
        .position(|child| child.id().is_some_and(|id| id.eq_ignore_ascii_case(key)))
}

/// Recompute every remaining candidate's position from its new index and
/// recenter the shared groups. Dense re-pack, no gaps.
fn repack(doc: &mut MapDocument, config: &MapConfig) -> Result<(), RosterError> {
    let n = count(doc, config)?;

    let names = doc.group_mut(&config.ids.name_list)?;
    for (index, node) in names.children.iter_mut().enumerate() {
        node.set_attr("y", layout::name_row_y(index, config).to_string());
    }

    let squares = doc.group_mut(&config.ids.square_list)?;
    for (index, node) in squares.children.iter_mut().enumerate() {
        node.set_attr("y", layout::square_row_y(index, config).to_string());
    }

    // picture list advances one slot per image/border pair
    let pictures = doc.group_mut(&config.ids.picture_list)?;
    for (position, node) in pictures.children.iter_mut().enumerate() {
        node.set_attr("x", layout::slot_x(position / 2, config).to_string());
    }

    let votes = doc.group_mut(&config.ids.vote_list)?;
    for (index, node) in votes.children.iter_mut().enumerate() {
        node.set_attr("x", layout::slot_x(index, config).to_string());
    }

    recenter_groups(doc, config, n)
}

/// Rewrite the x offsets of the portrait and vote-label groups for the
/// given roster size.
fn recenter_groups(
    doc: &mut MapDocument,
    config: &MapConfig,
    roster_size: usize,
) -> Result<(), RosterError> {
    let width = doc.width()?;
    let offsets = layout::group_offsets(roster_size, width, config);
    debug!(
        "recentering groups for {} candidates: pictures at x={}, votes at x={}",
        roster_size, offsets.pictures_x, offsets.votes_x
    );
    for (id, x) in [
        (&config.ids.picture_list, offsets.pictures_x),
        (&config.ids.vote_list, offsets.votes_x),
    ] {
        let group = doc.group_mut(id)?;
        let current = group.attr("transform").unwrap_or("").to_string();
        group.set_attr("transform", update_offset(&current, Some(x), None)?);
    }
    Ok(())
}

/// All candidates as `(display name, color)` in document order.
///
/// The color is read from the swatch fill, the one attribute the roster
/// maintains for it.
pub fn list(doc: &MapDocument, config: &MapConfig) -> Result<Vec<(String, Color)>, RosterError> {
    count(doc, config)?;
    let names = doc.group(&config.ids.name_list)?;
    let squares = doc.group(&config.ids.square_list)?;
    names
        .children
        .iter()
        .zip(&squares.children)
        .map(|(label, square)| {
            let display = label.text.clone().unwrap_or_default();
            let color = square.attr("fill").unwrap_or("").parse()?;
            Ok((display, color))
        })
        .collect()
}

/// Region identifiers currently filled with a candidate's color.
///
/// Resolved by color equality alone; there is no stored region-to-candidate
/// link, so repainting a region silently changes its owner. An unknown
/// candidate name yields no regions.
pub fn regions_of(
    doc: &MapDocument,
    config: &MapConfig,
    who: CandidateRef<'_>,
) -> Result<Vec<String>, RosterError> {
    let color = match who {
        CandidateRef::Color(color) => Some(color),
        CandidateRef::Name(name) => swatch_color(doc, config, name)?,
    };
    let Some(color) = color else {
        return Ok(Vec::new());
    };

    let mut held = Vec::new();
    for id in region::regions(doc, config)? {
        if region::region_color(doc, config, &id)? == Some(color) {
            held.push(id);
        }
    }
    Ok(held)
}

fn swatch_color(
    doc: &MapDocument,
    config: &MapConfig,
    name: &str,
) -> Result<Option<Color>, RosterError> {
    let squares = doc.group(&config.ids.square_list)?;
    match squares
        .children
        .iter()
        .find(|child| child.id().is_some_and(|id| id.eq_ignore_ascii_case(name)))
    {
        Some(square) => Ok(Some(square.attr("fill").unwrap_or("").parse()?)),
        None => Ok(None),
    }
}

/// Set a candidate's vote-count label, optionally recoloring it. Unknown
/// candidates are a no-op.
pub fn set_votes(
    doc: &mut MapDocument,
    config: &MapConfig,
    name: &str,
    votes: u64,
    color: Option<Color>,
) -> Result<(), RosterError> {
    let id = format!("{}-votes", name.to_lowercase());
    let list = doc.group_mut(&config.ids.vote_list)?;
    match list
        .children
        .iter_mut()
        .find(|child| child.id().is_some_and(|node| node.eq_ignore_ascii_case(&id)))
    {
        Some(node) => {
            node.text = Some(votes.to_string());
            if let Some(color) = color {
                node.set_attr("fill", color.to_string());
            }
        }
        None => warn!("no vote label for candidate '{}'", name),
    }
    Ok(())
}

/// Change a candidate's display color: swatch fill, portrait border stroke,
/// vote-label fill and, if present, the candidate's bar segment.
///
/// Map regions previously painted with the old color are deliberately left
/// alone; the color is a display attribute of the roster entry, not a live
/// binding to region fills.
pub fn set_color(
    doc: &mut MapDocument,
    config: &MapConfig,
    name: &str,
    color: Color,
) -> Result<(), RosterError> {
    let key = name.to_lowercase();
    let fill = color.to_string();

    let targets = [
        (&config.ids.square_list, key.clone(), "fill"),
        (&config.ids.picture_list, format!("{key}-border"), "stroke"),
        (&config.ids.vote_list, format!("{key}-votes"), "fill"),
        (&config.ids.bar, format!("{key}-bar"), "fill"),
    ];
    for (group_id, node_id, attr) in targets {
        let group = doc.group_mut(group_id)?;
        match group
            .children
            .iter_mut()
            .find(|child| child.id().is_some_and(|id| id.eq_ignore_ascii_case(&node_id)))
        {
            Some(node) => node.set_attr(attr, fill.clone()),
            None => warn!("no '{}' node to recolor for candidate '{}'", node_id, name),
        }
    }
    Ok(())
}

fn portrait_href(portrait: Option<&Portrait>, config: &MapConfig) -> Result<String, RosterError> {
    match portrait {
        None => Ok(config.portraits.default_href.clone()),
        Some(Portrait::Href(href)) => Ok(href.clone()),
        Some(Portrait::Embed(path)) => {
            let bytes = std::fs::read(path).map_err(DocumentError::Io)?;
            let mime = match path.extension().and_then(|ext| ext.to_str()) {
                Some("png") => "image/png",
                Some("jpg") | Some("jpeg") => "image/jpeg",
                Some("svg") => "image/svg+xml",
                _ => "application/octet-stream",
            };
            Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
        }
    }
}
