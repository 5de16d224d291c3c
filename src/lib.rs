//! votemap - election map manipulation
//!
//! This library edits SVG election maps: a variable-length roster of
//! candidates rendered as four parallel lists (name labels, color swatches,
//! portraits, vote counts) plus a proportional vote bar, layered on top of
//! a plain region map.
//!
//! # Example
//!
//! ```rust
//! use votemap::{Color, ElectionMap, MapConfig};
//!
//! let base = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
//!   <g id="regions"><path id="north" fill="#d0d0d0" d="M0 0h10v10H0z"/></g>
//!   <g id="numbers"/>
//! </svg>"##;
//!
//! let mut map = ElectionMap::from_svg(base, MapConfig::default()).unwrap();
//! map.prepare().unwrap();
//! map.add_candidate("Alice", Color::new(0xff0000), None).unwrap();
//! assert_eq!(map.candidates().unwrap().len(), 1);
//! ```

pub mod bar;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod region;
pub mod roster;
pub mod transform;

use std::path::Path;

use log::debug;

pub use bar::{BarEntry, BarError, BarSnapshot, IndicatorColor};
pub use color::{Color, ColorParseError};
pub use config::{ConfigError, MapConfig};
pub use document::{DocumentError, Element, MapDocument};
pub use error::MapError;
pub use layout::LayoutMode;
pub use region::RegionError;
pub use roster::{CandidateRef, Portrait, RosterError};
pub use transform::OffsetError;

/// An election map: one exclusively owned document plus the configuration
/// resolved for it.
///
/// Every mutating operation reads the current document state, computes the
/// new state and writes it back before returning; nothing is cached across
/// calls. Exclusive ownership (`&mut self`) rules out overlapping
/// read-modify-write sequences on the same document.
pub struct ElectionMap {
    doc: MapDocument,
    config: MapConfig,
}

impl ElectionMap {
    /// Wrap an already parsed document.
    pub fn new(doc: MapDocument, config: MapConfig) -> Self {
        Self { doc, config }
    }

    /// Parse a map from SVG text.
    pub fn from_svg(text: &str, config: MapConfig) -> Result<Self, MapError> {
        Ok(Self::new(MapDocument::parse(text)?, config))
    }

    /// Read a map from a file with the default configuration.
    pub fn open(path: &Path) -> Result<Self, MapError> {
        Self::open_with_config(path, MapConfig::default())
    }

    /// Read a map from a file.
    pub fn open_with_config(path: &Path, config: MapConfig) -> Result<Self, MapError> {
        Ok(Self::new(MapDocument::open(path)?, config))
    }

    /// Serialize and write the map to a file.
    pub fn save(&self, path: &Path) -> Result<(), MapError> {
        Ok(self.doc.save(path)?)
    }

    /// Serialize the map to SVG text.
    pub fn to_svg(&self) -> String {
        self.doc.to_svg()
    }

    pub fn document(&self) -> &MapDocument {
        &self.doc
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Install the election overlay onto a plain region map: grow the
    /// document, shift the map body down, and add the title, the bar group
    /// with its three baseline nodes, and the four empty candidate list
    /// groups.
    ///
    /// Fails with [`DocumentError::AlreadyPrepared`] if the overlay is
    /// already present.
    pub fn prepare(&mut self) -> Result<(), MapError> {
        let config = &self.config;
        if self.doc.root().find(&config.ids.bar).is_some() {
            return Err(DocumentError::AlreadyPrepared.into());
        }

        let chrome_extent = config.chrome.extent(&config.bar, &config.triangles);
        let body_height = self.doc.height()?;
        let width = self.doc.width()?;
        let pictures_y = chrome_extent + body_height + config.portraits.top_margin;
        let votes_y = pictures_y + config.portraits.height + config.votes.drop;
        debug!(
            "installing overlay: chrome {}px, pictures at y={}",
            chrome_extent, pictures_y
        );
        self.doc
            .set_height(votes_y + config.votes.bottom_margin)?;

        // make room for the chrome above the map body
        for child in self.doc.root_mut().children.iter_mut() {
            if child.tag != "title" {
                child.set_attr("transform", format!("translate(0 {chrome_extent})"));
            }
        }

        let title = Element::new("text")
            .with_attr("id", "title")
            .with_attr("x", (width / 2).to_string())
            .with_attr("y", config.chrome.top_to_title.to_string())
            .with_attr("font-family", config.title.font_family.clone())
            .with_attr("font-size", config.title.font_size.to_string())
            .with_attr("font-weight", config.title.font_weight.clone())
            .with_attr("text-anchor", config.title.anchor.clone())
            .with_attr("fill", "#000000")
            .with_text(" ");

        let bar_x = (width - config.bar.width) / 2;
        let bar_y = config.chrome.top_to_title + config.chrome.title_to_bar;
        let mut bar = Element::new("g")
            .with_attr("id", config.ids.bar.clone())
            .with_attr("transform", format!("translate({bar_x} {bar_y})"));
        bar.children.push(
            Element::new("rect")
                .with_attr("id", "blank-bar")
                .with_attr("x", "0")
                .with_attr("y", "0")
                .with_attr("width", config.bar.width.to_string())
                .with_attr("height", config.bar.height.to_string())
                .with_attr("fill", config.bar.color.to_string()),
        );
        let (bw, bh) = (config.bar.width, config.bar.height);
        let (tw, th, td) = (
            config.triangles.width,
            config.triangles.height,
            config.triangles.drop,
        );
        bar.children.push(
            Element::new("polygon")
                .with_attr("id", "triup")
                .with_attr(
                    "points",
                    format!(
                        "{},{} {},{} {},{}",
                        bw / 2,
                        -td,
                        bw / 2 + tw / 2,
                        -td - th,
                        bw / 2 - tw / 2,
                        -td - th
                    ),
                )
                .with_attr("fill", config.bar.color.to_string()),
        );
        bar.children.push(
            Element::new("polygon")
                .with_attr("id", "tridown")
                .with_attr(
                    "points",
                    format!(
                        "{},{} {},{} {},{}",
                        bw / 2,
                        td + bh,
                        bw / 2 + tw / 2,
                        td + bh + th,
                        bw / 2 - tw / 2,
                        td + bh + th
                    ),
                )
                .with_attr("fill", config.bar.color.to_string()),
        );

        let names = Element::new("g")
            .with_attr("id", config.ids.name_list.clone())
            .with_attr(
                "transform",
                format!("translate({} {})", config.names.origin.0, config.names.origin.1),
            )
            .with_attr("font-family", config.names.font_family.clone())
            .with_attr("font-size", config.names.font_size.to_string())
            .with_attr("font-weight", config.names.font_weight.clone());
        let squares = Element::new("g")
            .with_attr("id", config.ids.square_list.clone())
            .with_attr(
                "transform",
                format!(
                    "translate({} {})",
                    config.squares.origin.0, config.squares.origin.1
                ),
            );
        let pictures = Element::new("g")
            .with_attr("id", config.ids.picture_list.clone())
            .with_attr("transform", format!("translate(0 {pictures_y})"));
        let votes = Element::new("g")
            .with_attr("id", config.ids.vote_list.clone())
            .with_attr("transform", format!("translate(0 {votes_y})"))
            .with_attr("font-family", config.votes.font_family.clone())
            .with_attr("font-size", config.votes.font_size.to_string())
            .with_attr("font-weight", config.votes.font_weight.clone());

        let root = self.doc.root_mut();
        root.children.push(title);
        root.children.push(bar);
        root.children.push(names);
        root.children.push(squares);
        root.children.push(pictures);
        root.children.push(votes);
        Ok(())
    }

    /// Set or clear the map title. A `None` text blanks the title; a `None`
    /// color leaves the fill unchanged.
    pub fn set_title(&mut self, text: Option<&str>, color: Option<Color>) -> Result<(), MapError> {
        let title = self.doc.group_mut("title")?;
        title.text = Some(text.unwrap_or(" ").to_string());
        if let Some(color) = color {
            title.set_attr("fill", color.to_string());
        }
        Ok(())
    }

    /// Append a candidate to the roster. See [`roster::add`].
    pub fn add_candidate(
        &mut self,
        name: &str,
        color: Color,
        portrait: Option<Portrait>,
    ) -> Result<(), MapError> {
        Ok(roster::add(
            &mut self.doc,
            &self.config,
            name,
            color,
            portrait.as_ref(),
        )?)
    }

    /// Remove a candidate from the roster. See [`roster::remove`].
    pub fn remove_candidate(&mut self, name: &str) -> Result<(), MapError> {
        Ok(roster::remove(&mut self.doc, &self.config, name)?)
    }

    /// All candidates as `(display name, color)` in display order.
    pub fn candidates(&self) -> Result<Vec<(String, Color)>, MapError> {
        Ok(roster::list(&self.doc, &self.config)?)
    }

    /// Region identifiers currently held by a candidate, resolved by color
    /// equality.
    pub fn candidate_regions(&self, who: CandidateRef<'_>) -> Result<Vec<String>, MapError> {
        Ok(roster::regions_of(&self.doc, &self.config, who)?)
    }

    /// Set a candidate's vote-count label.
    pub fn set_candidate_votes(
        &mut self,
        name: &str,
        votes: u64,
        color: Option<Color>,
    ) -> Result<(), MapError> {
        Ok(roster::set_votes(
            &mut self.doc,
            &self.config,
            name,
            votes,
            color,
        )?)
    }

    /// Change a candidate's display color without repainting their regions.
    pub fn set_candidate_color(&mut self, name: &str, color: Color) -> Result<(), MapError> {
        Ok(roster::set_color(&mut self.doc, &self.config, name, color)?)
    }

    /// Redraw the proportional vote bar from a snapshot.
    pub fn render_bar(&mut self, snapshot: &BarSnapshot) -> Result<(), MapError> {
        Ok(bar::render(&mut self.doc, &self.config, snapshot)?)
    }

    /// Enumerate region identifiers.
    pub fn regions(&self) -> Result<Vec<String>, MapError> {
        Ok(region::regions(&self.doc, &self.config)?)
    }

    /// Fill color of a region, if it exists.
    pub fn region_color(&self, id: &str) -> Result<Option<Color>, MapError> {
        Ok(region::region_color(&self.doc, &self.config, id)?)
    }

    /// Repaint a region.
    pub fn set_region_color(&mut self, id: &str, color: Color) -> Result<(), MapError> {
        Ok(region::set_region_color(
            &mut self.doc,
            &self.config,
            id,
            color,
        )?)
    }

    /// Numeric label of a region, if it has one.
    pub fn region_number(&self, id: &str) -> Result<Option<String>, MapError> {
        Ok(region::region_number(&self.doc, &self.config, id)?)
    }

    /// Set a region's numeric label.
    pub fn set_region_number(
        &mut self,
        id: &str,
        number: i64,
        color: Option<Color>,
    ) -> Result<(), MapError> {
        Ok(region::set_region_number(
            &mut self.doc,
            &self.config,
            id,
            number,
            color,
        )?)
    }
}
