//! Top-level error type

use thiserror::Error;

use crate::bar::BarError;
use crate::color::ColorParseError;
use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::region::RegionError;
use crate::roster::RosterError;
use crate::transform::OffsetError;

/// Any error an [`ElectionMap`](crate::ElectionMap) operation can produce
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Bar(#[from] BarError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Offset(#[from] OffsetError),

    #[error(transparent)]
    Color(#[from] ColorParseError),
}
