//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts element styles to Taffy styles, runs layout computation over one
//! element subtree, and extracts results back to ComputedLayout.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, LengthPercentage, LengthPercentageAuto, NodeId,
    Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::config;
use crate::engine::{parent_element, with_element, Direction, ElementFlags, ElementId, ElementStyle};
use crate::types::Dimension;

use super::types::{ComputedLayout, LayoutRect};

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Px(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_lpa(dim: Dimension) -> LengthPercentageAuto {
    match dim {
        Dimension::Auto => LengthPercentageAuto::Length(0.0),
        Dimension::Px(n) => LengthPercentageAuto::Length(n),
        Dimension::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_style(style: &ElementStyle, flags: ElementFlags) -> Style {
    let display = if flags.contains(ElementFlags::HIDDEN) {
        Display::None
    } else {
        Display::Flex
    };

    Style {
        display,
        position: if style.absolute {
            TaffyPosition::Absolute
        } else {
            TaffyPosition::Relative
        },
        inset: Rect {
            left: if style.absolute {
                LengthPercentageAuto::Length(style.left)
            } else {
                LengthPercentageAuto::Auto
            },
            top: if style.absolute {
                LengthPercentageAuto::Length(style.top)
            } else {
                LengthPercentageAuto::Auto
            },
            right: LengthPercentageAuto::Auto,
            bottom: LengthPercentageAuto::Auto,
        },
        flex_direction: match style.direction {
            Direction::Column => TaffyFlexDirection::Column,
            Direction::Row => TaffyFlexDirection::Row,
        },
        flex_wrap: if style.wrap {
            TaffyFlexWrap::Wrap
        } else {
            TaffyFlexWrap::NoWrap
        },
        flex_grow: style.flex_grow,
        size: Size {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },
        margin: Rect {
            left: to_taffy_lpa(style.margin_left),
            right: LengthPercentageAuto::Length(0.0),
            top: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(0.0),
        },
        gap: Size {
            width: LengthPercentage::Length(style.gap),
            height: LengthPercentage::Length(style.gap),
        },
        ..Default::default()
    }
}

// =============================================================================
// INTRINSIC SIZES
// =============================================================================

/// Intrinsic size of a childless element, by tag.
fn intrinsic_size(tag: &str) -> Size<f32> {
    let (width, height) = match tag {
        "label" => (100.0, 20.0),
        "button" => (80.0, 32.0),
        "checkbox" => (120.0, 24.0),
        "input" => (160.0, 32.0),
        _ => (0.0, 0.0),
    };
    Size { width, height }
}

fn measure_element(
    tag: &str,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let intrinsic = intrinsic_size(tag);
    let width = match available_space.width {
        AvailableSpace::Definite(w) => intrinsic.width.min(w),
        _ => intrinsic.width,
    };
    Size {
        width: known_dimensions.width.unwrap_or(width),
        height: known_dimensions.height.unwrap_or(intrinsic.height),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for the element subtree rooted at `root`.
///
/// # Arguments
///
/// * `root` - Root element of the subtree
/// * `available_width` - Width available to the root, in pixels
/// * `available_height` - Height available to the root; `None` sizes to content
///
/// # Returns
///
/// Positions (relative to the parent element) and sizes for every element
/// reached. Elements under a hidden element are absent.
pub fn compute_layout(root: ElementId, available_width: f32, available_height: Option<f32>) -> ComputedLayout {
    let mut result = ComputedLayout::new();
    let mut tree: TaffyTree<&'static str> = TaffyTree::new();
    let mut nodes: Vec<(ElementId, NodeId)> = Vec::new();

    let Some(root_node) = build_node(&mut tree, root, &mut nodes) else {
        return result;
    };

    // An auto-width root fills the available width, like a page body.
    if let Ok(style) = tree.style(root_node) {
        if style.size.width == TaffyDimension::Auto {
            let mut style = style.clone();
            style.size.width = TaffyDimension::Length(available_width);
            let _ = tree.set_style(root_node, style);
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(available_width),
        height: available_height.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite),
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut &'static str>,
                          _style: &Style| {
        match context {
            Some(tag) => measure_element(tag, known_dimensions, available_space),
            None => Size::ZERO,
        }
    };

    if let Err(err) = tree.compute_layout_with_measure(root_node, available, &mut measure_fn) {
        tracing::warn!("layout failed for element {}: {}", root, err);
        return result;
    }

    for (element, node) in nodes {
        if let Ok(layout) = tree.layout(node) {
            result.insert(
                element,
                LayoutRect {
                    x: layout.location.x,
                    y: layout.location.y,
                    width: layout.size.width,
                    height: layout.size.height,
                },
            );
        }
    }

    result
}

fn build_node(
    tree: &mut TaffyTree<&'static str>,
    element: ElementId,
    nodes: &mut Vec<(ElementId, NodeId)>,
) -> Option<NodeId> {
    let (tag, style, flags, children) =
        with_element(element, |e| (e.tag, build_style(&e.style, e.flags), e.flags, e.children.clone()))?;

    let node = if children.is_empty() {
        tree.new_leaf_with_context(style, tag).ok()?
    } else {
        tree.new_leaf(style).ok()?
    };
    nodes.push((element, node));

    if flags.contains(ElementFlags::HIDDEN) {
        return Some(node);
    }

    for child in children {
        if let Some(child_node) = build_node(tree, child, nodes) {
            let _ = tree.add_child(node, child_node);
        }
    }

    Some(node)
}

/// Rendered width of an element on the current viewport.
///
/// Lays out the element's whole tree (from its topmost ancestor) against the
/// viewport width. Detached or hidden elements measure 0.
pub fn rendered_width(element: ElementId) -> f32 {
    let mut root = element;
    while let Some(parent) = parent_element(root) {
        root = parent;
    }
    let layout = compute_layout(root, config::viewport_width(), Some(config::viewport_height()));
    layout.get(element).map_or(0.0, |rect| rect.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{append_child, create_element, reset_elements, set_flag, update_style};

    #[test]
    fn test_row_wraps_when_full() {
        reset_elements();

        let row = create_element("div");
        update_style(row, |s| {
            s.direction = Direction::Row;
            s.wrap = true;
            s.width = Dimension::Px(200.0);
        });
        let items: Vec<_> = (0..3)
            .map(|_| {
                let item = create_element("div");
                update_style(item, |s| {
                    s.width = Dimension::Px(80.0);
                    s.height = Dimension::Px(20.0);
                });
                append_child(row, item);
                item
            })
            .collect();

        let layout = compute_layout(row, 200.0, None);
        let a = layout.get(items[0]).unwrap();
        let b = layout.get(items[1]).unwrap();
        let c = layout.get(items[2]).unwrap();

        assert_eq!(a.y, 0.0);
        assert_eq!(b.y, 0.0);
        assert_eq!(b.x, 80.0);
        // Third item wraps to a new line
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, 20.0);
    }

    #[test]
    fn test_hidden_takes_no_space() {
        reset_elements();

        let column = create_element("div");
        update_style(column, |s| s.width = Dimension::Px(300.0));
        let hidden = create_element("div");
        update_style(hidden, |s| s.height = Dimension::Px(50.0));
        set_flag(hidden, ElementFlags::HIDDEN, true);
        let shown = create_element("div");
        update_style(shown, |s| s.height = Dimension::Px(50.0));
        append_child(column, hidden);
        append_child(column, shown);

        let layout = compute_layout(column, 300.0, None);
        assert_eq!(layout.get(shown).unwrap().y, 0.0);
        assert_eq!(layout.get(column).unwrap().height, 50.0);
    }

    #[test]
    fn test_percent_width() {
        reset_elements();

        let parent = create_element("div");
        update_style(parent, |s| {
            s.direction = Direction::Row;
            s.width = Dimension::Px(400.0);
        });
        let child = create_element("div");
        update_style(child, |s| s.width = Dimension::Percent(25.0));
        append_child(parent, child);

        let layout = compute_layout(parent, 400.0, None);
        assert_eq!(layout.get(child).unwrap().width, 100.0);
    }
}
