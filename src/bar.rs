//! Proportional vote bar
//!
//! Renders a snapshot of the vote tally as colored segments partitioning a
//! fixed-width bar, with a numeric label centered in each segment. The
//! renderer takes an explicit snapshot rather than reading the candidate
//! registry, so a render can show any tally the caller wants.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;
use crate::config::MapConfig;
use crate::document::{DocumentError, Element, MapDocument};

/// Errors raised by bar rendering
#[derive(Debug, Error)]
pub enum BarError {
    #[error("total votes must be positive")]
    InvalidTotal,

    #[error("candidate votes sum to {sum}, exceeding the total of {total}")]
    VoteSumExceedsTotal { sum: i64, total: u64 },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One candidate's line in a bar snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct BarEntry {
    pub name: String,
    pub color: Color,
    pub votes: i64,
}

/// What to do with the indicator triangles on this render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndicatorColor {
    /// Leave the triangles as they are
    #[default]
    Unchanged,
    /// Restore the configured neutral color
    Reset,
    /// Recolor both triangles
    Set(Color),
}

impl<'de> Deserialize<'de> for IndicatorColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        if text == "reset" {
            return Ok(IndicatorColor::Reset);
        }
        text.parse()
            .map(IndicatorColor::Set)
            .map_err(serde::de::Error::custom)
    }
}

/// A complete tally to draw. Not persisted; supplied fresh on every render.
#[derive(Debug, Clone, Deserialize)]
pub struct BarSnapshot {
    /// Total number of votes the full bar width represents
    pub total: u64,
    /// Candidates in caller order; ties in the ranked output keep this order
    #[serde(default)]
    pub entries: Vec<BarEntry>,
    #[serde(default)]
    pub indicator: IndicatorColor,
}

/// Redraw the proportional bar from a snapshot.
///
/// Validates before touching the document, so a failed render leaves the
/// previously drawn segments in place. Clearing preserves the three
/// baseline nodes (`blank-bar`, `triup`, `tridown`); candidates are ranked
/// by descending vote count with a stable sort, partitioned left to right
/// with `floor(bar_width * votes / total)` pixel segments, and each segment
/// gets its vote count centered inside it. Negative vote counts contribute
/// zero width but keep their (negative) label text.
pub fn render(
    doc: &mut MapDocument,
    config: &MapConfig,
    snapshot: &BarSnapshot,
) -> Result<(), BarError> {
    if snapshot.total == 0 {
        return Err(BarError::InvalidTotal);
    }
    let sum: i64 = snapshot.entries.iter().map(|entry| entry.votes).sum();
    if sum > snapshot.total as i64 {
        return Err(BarError::VoteSumExceedsTotal {
            sum,
            total: snapshot.total,
        });
    }

    let mut ranked: Vec<&BarEntry> = snapshot.entries.iter().collect();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));

    let bar = doc.group_mut(&config.ids.bar)?;
    bar.children
        .retain(|child| matches!(child.id(), Some("blank-bar" | "triup" | "tridown")));

    match snapshot.indicator {
        IndicatorColor::Unchanged => {}
        IndicatorColor::Reset => recolor_triangles(bar, config.bar.color),
        IndicatorColor::Set(color) => recolor_triangles(bar, color),
    }

    let label_y = config.bar.height / 2 + (config.bar.label_font_size * 4 / 5) / 2;
    let mut cursor: i64 = 0;
    for entry in ranked {
        let counted = entry.votes.max(0) as u64;
        let width = (config.bar.width as u64 * counted / snapshot.total) as i64;
        let key = entry.name.to_lowercase();
        debug!("bar segment '{}': {} votes, {}px", key, entry.votes, width);

        bar.children.push(
            Element::new("rect")
                .with_attr("id", format!("{key}-bar"))
                .with_attr("x", cursor.to_string())
                .with_attr("y", "0")
                .with_attr("width", width.to_string())
                .with_attr("height", config.bar.height.to_string())
                .with_attr("fill", entry.color.to_string()),
        );
        bar.children.push(
            Element::new("text")
                .with_attr("id", format!("{key}-numb"))
                .with_attr("x", (cursor + width / 2).to_string())
                .with_attr("y", label_y.to_string())
                .with_attr("font-family", config.bar.label_font_family.clone())
                .with_attr("font-size", config.bar.label_font_size.to_string())
                .with_attr("font-weight", config.bar.label_font_weight.clone())
                .with_attr("text-anchor", config.bar.label_anchor.clone())
                .with_attr("fill", config.bar.label_color.to_string())
                .with_text(entry.votes.to_string()),
        );
        cursor += width;
    }
    Ok(())
}

fn recolor_triangles(bar: &mut Element, color: Color) {
    for id in ["triup", "tridown"] {
        if let Some(triangle) = bar
            .children
            .iter_mut()
            .find(|child| child.id() == Some(id))
        {
            triangle.set_attr("fill", color.to_string());
        }
    }
}
