//! Integration tests for the proportional vote bar

use pretty_assertions::assert_eq;

use votemap::{
    BarEntry, BarError, BarSnapshot, Color, ElectionMap, IndicatorColor, MapConfig, MapError,
};

const BASE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
  <g id="regions">
    <path id="north" fill="#d0d0d0" d="M0 0h10v10H0z"/>
  </g>
  <g id="numbers"/>
</svg>"##;

fn prepared_with_bar_width(width: i64) -> ElectionMap {
    let mut config = MapConfig::default();
    config.bar.width = width;
    let mut map = ElectionMap::from_svg(BASE, config).unwrap();
    map.prepare().unwrap();
    map
}

fn entry(name: &str, color: u32, votes: i64) -> BarEntry {
    BarEntry {
        name: name.to_string(),
        color: Color::new(color),
        votes,
    }
}

fn segment_attr(map: &ElectionMap, id: &str, attr: &str) -> String {
    map.document()
        .root()
        .find(id)
        .unwrap_or_else(|| panic!("missing '{}'", id))
        .attr(attr)
        .unwrap_or_default()
        .to_string()
}

#[test]
fn test_ranked_partition_widths_and_order() {
    let mut map = prepared_with_bar_width(200);
    let snapshot = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 30), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&snapshot).unwrap();

    // B leads with 140px from x=0, A follows with 60px at x=140
    assert_eq!(segment_attr(&map, "b-bar", "x"), "0");
    assert_eq!(segment_attr(&map, "b-bar", "width"), "140");
    assert_eq!(segment_attr(&map, "a-bar", "x"), "140");
    assert_eq!(segment_attr(&map, "a-bar", "width"), "60");

    // ranked order is also the document order of the segments
    let bar = map.document().group("bar").unwrap();
    let ids: Vec<&str> = bar.children.iter().filter_map(|c| c.id()).collect();
    assert_eq!(
        ids,
        vec!["blank-bar", "triup", "tridown", "b-bar", "b-numb", "a-bar", "a-numb"]
    );
}

#[test]
fn test_labels_center_in_their_segments() {
    let mut map = prepared_with_bar_width(200);
    let snapshot = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 30), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&snapshot).unwrap();

    assert_eq!(segment_attr(&map, "b-numb", "x"), "70");
    assert_eq!(segment_attr(&map, "a-numb", "x"), "170");
    // bar height 30, label size 20: baseline at 15 + 8
    assert_eq!(segment_attr(&map, "b-numb", "y"), "23");
    let label = map.document().root().find("b-numb").unwrap();
    assert_eq!(label.text.as_deref(), Some("70"));
}

#[test]
fn test_rendering_twice_is_idempotent() {
    let mut map = prepared_with_bar_width(200);
    let snapshot = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 30), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&snapshot).unwrap();
    let first = map.to_svg();
    map.render_bar(&snapshot).unwrap();
    assert_eq!(map.to_svg(), first);
}

#[test]
fn test_ties_keep_input_order() {
    let mut map = prepared_with_bar_width(300);
    let snapshot = BarSnapshot {
        total: 90,
        entries: vec![
            entry("First", 0x111111, 30),
            entry("Second", 0x222222, 30),
            entry("Third", 0x333333, 30),
        ],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&snapshot).unwrap();

    let bar = map.document().group("bar").unwrap();
    let ids: Vec<&str> = bar
        .children
        .iter()
        .filter_map(|c| c.id())
        .filter(|id| id.ends_with("-bar") && *id != "blank-bar")
        .collect();
    assert_eq!(ids, vec!["first-bar", "second-bar", "third-bar"]);
}

#[test]
fn test_vote_sum_exceeding_total_leaves_previous_bar() {
    let mut map = prepared_with_bar_width(200);
    let good = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 30), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&good).unwrap();
    let before = map.to_svg();

    let bad = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 31), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    let err = map.render_bar(&bad).unwrap_err();
    assert!(matches!(
        err,
        MapError::Bar(BarError::VoteSumExceedsTotal {
            sum: 101,
            total: 100
        })
    ));
    assert_eq!(map.to_svg(), before);
}

#[test]
fn test_zero_total_is_rejected() {
    let mut map = prepared_with_bar_width(200);
    let snapshot = BarSnapshot {
        total: 0,
        entries: vec![],
        indicator: IndicatorColor::Unchanged,
    };
    assert!(matches!(
        map.render_bar(&snapshot).unwrap_err(),
        MapError::Bar(BarError::InvalidTotal)
    ));
}

#[test]
fn test_negative_votes_clamp_to_zero_width() {
    let mut map = prepared_with_bar_width(200);
    let snapshot = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, -5), entry("B", 0x0000ff, 70)],
        indicator: IndicatorColor::Unchanged,
    };
    map.render_bar(&snapshot).unwrap();

    assert_eq!(segment_attr(&map, "a-bar", "width"), "0");
    // the label still shows the snapshot's value
    let label = map.document().root().find("a-numb").unwrap();
    assert_eq!(label.text.as_deref(), Some("-5"));
}

#[test]
fn test_indicator_override_and_reset() {
    let mut map = prepared_with_bar_width(200);
    let recolor = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 60)],
        indicator: IndicatorColor::Set(Color::new(0xff0000)),
    };
    map.render_bar(&recolor).unwrap();
    assert_eq!(segment_attr(&map, "triup", "fill"), "#ff0000");
    assert_eq!(segment_attr(&map, "tridown", "fill"), "#ff0000");

    let reset = BarSnapshot {
        total: 100,
        entries: vec![entry("A", 0xff0000, 60)],
        indicator: IndicatorColor::Reset,
    };
    map.render_bar(&reset).unwrap();
    // back to the configured neutral color
    assert_eq!(segment_attr(&map, "triup", "fill"), "#c8c8c8");
    assert_eq!(segment_attr(&map, "tridown", "fill"), "#c8c8c8");
}

#[test]
fn test_baseline_nodes_survive_redraws() {
    let mut map = prepared_with_bar_width(200);
    for votes in [10, 40, 90] {
        let snapshot = BarSnapshot {
            total: 100,
            entries: vec![entry("A", 0xff0000, votes)],
            indicator: IndicatorColor::Unchanged,
        };
        map.render_bar(&snapshot).unwrap();
    }
    let bar = map.document().group("bar").unwrap();
    for id in ["blank-bar", "triup", "tridown"] {
        assert!(bar.children.iter().any(|c| c.id() == Some(id)));
    }
    // exactly one segment/label pair remains
    let segments = bar
        .children
        .iter()
        .filter(|c| c.id().is_some_and(|id| id.ends_with("-numb")))
        .count();
    assert_eq!(segments, 1);
}

#[test]
fn test_snapshot_parses_from_toml() {
    let snapshot: BarSnapshot = toml::from_str(
        r##"
        total = 538
        indicator = "reset"

        [[entries]]
        name = "Alice"
        color = "#ff0000"
        votes = 270

        [[entries]]
        name = "Bob"
        color = "#0000ff"
        votes = 268
        "##,
    )
    .unwrap();
    assert_eq!(snapshot.total, 538);
    assert_eq!(snapshot.entries.len(), 2);
    assert_eq!(snapshot.indicator, IndicatorColor::Reset);
    assert_eq!(snapshot.entries[0].color, Color::new(0xff0000));
}
