//! Radial relationship layout: themes on the right hemisphere, schools on the left,
//! links drawn as quadratic curves through the center.

use crate::core::models::{Link, Node, NodeGroup, RadialGraph};
use std::f64::consts::PI;

/// Guide ring radius as a fraction of the smaller canvas side
pub const INNER_RADIUS_RATIO: f64 = 0.22;
/// Node ring radius as a fraction of the smaller canvas side
pub const OUTER_RADIUS_RATIO: f64 = 0.32;
/// Distance between a node and its label
pub const LABEL_OFFSET: f64 = 10.0;

const GREEN: &str = "#10b981";
const RED: &str = "#ef4444";
const LINK_NEUTRAL: &str = "#cbd5e1";
const SCHOOL_NEUTRAL: &str = "#94a3b8";
const THEME_FILL: &str = "#0f172a";

/// A node placed on the ring
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Node id, also the label text
    pub id: String,
    /// Theme or school
    pub group: NodeGroup,
    /// Angle in radians (0 = east, clockwise in screen space)
    pub angle: f64,
    /// X offset from the center
    pub x: f64,
    /// Y offset from the center
    pub y: f64,
    /// Circle radius
    pub radius: f64,
    /// Circle fill color
    pub fill: &'static str,
    /// SVG transform of the label relative to the node
    pub label_transform: String,
    /// `start` on the right side, `end` on the left side
    pub anchor: &'static str,
    /// Label font size in pixels
    pub font_size: u32,
    /// Label font weight
    pub font_weight: u32,
    /// Indices into [`RadialLayout::links`] of the links touching this node
    pub links: Vec<usize>,
}

impl PlacedNode {
    /// Touching link indices, space separated, for the hover script
    #[must_use]
    pub fn link_list(&self) -> String {
        self.links
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A link routed through the center
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLink {
    /// School id
    pub source: String,
    /// Theme id
    pub target: String,
    /// SVG path data
    pub path: String,
    /// Stroke width in pixels
    pub stroke_width: f64,
    /// Stroke color
    pub stroke: &'static str,
    /// Resting opacity
    pub opacity: f64,
}

/// Complete layout for one canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Canvas center
    pub center: (f64, f64),
    /// Guide ring radius
    pub inner_radius: f64,
    /// Node ring radius
    pub outer_radius: f64,
    /// Placed nodes, in dataset order
    pub nodes: Vec<PlacedNode>,
    /// Placed links, in dataset order
    pub links: Vec<PlacedLink>,
}

/// Position of item `index` among `count` along a spread, in `0..=1`.
/// A lone item sits at the midpoint.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spread(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.5
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Angle of the `index`-th theme: from -π/3.5 through π/1.75 of arc
#[must_use]
pub fn theme_angle(index: usize, count: usize) -> f64 {
    -PI / 3.5 + spread(index, count) * PI / 1.75
}

/// Angle of the `index`-th school (by descending sentiment): from π/2+0.5 to 3π/2-0.5
#[must_use]
pub fn school_angle(index: usize, count: usize) -> f64 {
    let start = PI / 2.0 + 0.5;
    let end = 3.0 * PI / 2.0 - 0.5;
    start + spread(index, count) * (end - start)
}

/// Stroke width for a link carrying `value` comments
#[must_use]
pub fn link_width(value: f64) -> f64 {
    ((value + 1.0).ln() * 0.6).max(0.5)
}

/// Stroke color for a link's mean sentiment
#[must_use]
pub fn link_color(sentiment: f64) -> &'static str {
    if sentiment > 0.2 {
        GREEN
    } else if sentiment < -0.2 {
        RED
    } else {
        LINK_NEUTRAL
    }
}

/// Resting opacity for a link; exactly neutral links fade out further
#[must_use]
#[allow(clippy::float_cmp)]
pub fn link_opacity(sentiment: f64) -> f64 {
    if sentiment == 0.0 {
        0.2
    } else {
        0.5
    }
}

/// Circle fill for a node
#[must_use]
pub fn node_fill(node: &Node) -> &'static str {
    match node.group {
        NodeGroup::Theme => THEME_FILL,
        _ if node.net_sentiment > 0.1 => GREEN,
        _ if node.net_sentiment < -0.1 => RED,
        _ => SCHOOL_NEUTRAL,
    }
}

/// Label transform and anchor for a node at `angle`; labels on the left are flipped upright
#[must_use]
pub fn label_placement(angle: f64) -> (String, &'static str) {
    let deg = angle.to_degrees();
    if deg.abs() > 90.0 {
        (
            format!("rotate({:.3}) translate(-{LABEL_OFFSET}, 0)", deg - 180.0),
            "end",
        )
    } else {
        (
            format!("rotate({deg:.3}) translate({LABEL_OFFSET}, 0)"),
            "start",
        )
    }
}

impl RadialLayout {
    /// Lay out the graph on a `width` × `height` canvas
    #[must_use]
    pub fn compute(graph: &RadialGraph, width: f64, height: f64) -> Self {
        let min_dim = width.min(height);
        let inner_radius = min_dim * INNER_RADIUS_RATIO;
        let outer_radius = min_dim * OUTER_RADIUS_RATIO;

        let themes: Vec<&Node> = graph
            .nodes
            .iter()
            .filter(|n| n.group == NodeGroup::Theme)
            .collect();
        let mut schools: Vec<&Node> = graph
            .nodes
            .iter()
            .filter(|n| n.group == NodeGroup::School)
            .collect();
        schools.sort_by(|a, b| b.net_sentiment.total_cmp(&a.net_sentiment));

        let angle_of = |node: &Node| -> Option<f64> {
            match node.group {
                NodeGroup::Theme => themes
                    .iter()
                    .position(|t| std::ptr::eq(*t, node))
                    .map(|i| theme_angle(i, themes.len())),
                NodeGroup::School => schools
                    .iter()
                    .position(|s| std::ptr::eq(*s, node))
                    .map(|i| school_angle(i, schools.len())),
                NodeGroup::Other => None,
            }
        };

        let mut nodes: Vec<PlacedNode> = graph
            .nodes
            .iter()
            .filter_map(|node| {
                let angle = angle_of(node)?;
                let is_theme = node.group == NodeGroup::Theme;
                let (label_transform, anchor) = label_placement(angle);
                Some(PlacedNode {
                    id: node.id.clone(),
                    group: node.group,
                    angle,
                    x: outer_radius * angle.cos(),
                    y: outer_radius * angle.sin(),
                    radius: if is_theme { 5.0 } else { 3.0 },
                    fill: node_fill(node),
                    label_transform,
                    anchor,
                    font_size: if is_theme { 12 } else { 10 },
                    font_weight: if is_theme { 700 } else { 400 },
                    links: Vec::new(),
                })
            })
            .collect();

        let links: Vec<PlacedLink> = graph
            .links
            .iter()
            .filter_map(|link| place_link(link, &nodes))
            .collect();
        for node in &mut nodes {
            node.links = links
                .iter()
                .enumerate()
                .filter(|(_, l)| l.source == node.id || l.target == node.id)
                .map(|(i, _)| i)
                .collect();
        }

        Self {
            width,
            height,
            center: (width / 2.0, height / 2.0),
            inner_radius,
            outer_radius,
            nodes,
            links,
        }
    }

    /// Find a placed node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn place_link(link: &Link, nodes: &[PlacedNode]) -> Option<PlacedLink> {
    let source = nodes.iter().find(|n| n.id == link.source)?;
    let target = nodes.iter().find(|n| n.id == link.target)?;
    Some(PlacedLink {
        source: link.source.clone(),
        target: link.target.clone(),
        path: format!(
            "M{:.3},{:.3}Q0,0,{:.3},{:.3}",
            source.x, source.y, target.x, target.y
        ),
        stroke_width: link_width(link.value),
        stroke: link_color(link.sentiment),
        opacity: link_opacity(link.sentiment),
    })
}
