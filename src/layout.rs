//! Candidate list layout
//!
//! Every coordinate is a pure function of the candidate's index, the roster
//! size and the configured constants. Nothing positional is stored outside
//! the document's transform attributes, so positions can always be
//! recomputed after a mutation instead of drifting.

use crate::config::MapConfig;

/// Layout strategy selected from the roster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single linear row per list, used below the switch threshold
    Linear,
    /// Multi-row layout required at or above the switch threshold.
    /// Selected but not yet available; the registry refuses to grow a
    /// roster into it.
    Condensed,
}

/// Pick the layout mode for a roster of the given size.
pub fn mode_for(roster_size: usize, config: &MapConfig) -> LayoutMode {
    if roster_size >= config.roster.switch_threshold {
        LayoutMode::Condensed
    } else {
        LayoutMode::Linear
    }
}

/// Y coordinate of the name label at `index`
pub fn name_row_y(index: usize, config: &MapConfig) -> i64 {
    index as i64 * config.names.row_height
}

/// Y coordinate of the color swatch at `index`
pub fn square_row_y(index: usize, config: &MapConfig) -> i64 {
    index as i64 * config.squares.row_height
}

/// X coordinate of the portrait slot at `index`, shared by the portrait,
/// its border and the vote label
pub fn slot_x(index: usize, config: &MapConfig) -> i64 {
    index as i64 * (config.portraits.width + config.portraits.gap)
}

/// X offsets of the portrait and vote-label groups, centering the portrait
/// row on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOffsets {
    pub pictures_x: i64,
    pub votes_x: i64,
}

/// Recompute the shared group offsets for a roster of `roster_size`
/// candidates on a map `map_width` pixels wide.
pub fn group_offsets(roster_size: usize, map_width: i64, config: &MapConfig) -> GroupOffsets {
    let n = roster_size as i64;
    let portrait_width = config.portraits.width;
    let row_width = if n == 0 {
        0
    } else {
        portrait_width * n + config.portraits.gap * (n - 1)
    };
    let pictures_x = ((map_width as f64) / 2.0 - (row_width as f64) / 2.0).floor() as i64;
    let votes_x = pictures_x + ((portrait_width as f64) / 2.0).floor() as i64;
    GroupOffsets {
        pictures_x,
        votes_x,
    }
}
