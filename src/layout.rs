//! Responsive sizing of the ten-cell grid.

use crate::config::{CELL_ASPECT, NARROW_BREAKPOINT_PX, SLOT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Whether the grid may overflow vertically.
    pub scroll: bool,
}

impl GridLayout {
    /// CSS `grid-template-columns` value.
    pub fn template_columns(&self) -> String {
        format!("repeat({}, {}px)", self.columns, self.cell_width)
    }
}

/// Narrow viewports size cells by width alone and scroll.
pub fn allows_vertical_scroll(viewport_width: f64) -> bool {
    viewport_width < NARROW_BREAKPOINT_PX
}

/// Largest whole-pixel cell width that fits all slots, trying 1..=10 columns.
///
/// Without scrolling, cells keep a 16:9 shape and every row must fit in
/// `height`. With scrolling only `width` constrains the cells.
pub fn compute_grid_layout(width: f64, height: f64, gap: f64, allow_scroll: bool) -> GridLayout {
    let mut best = GridLayout {
        columns: 1,
        rows: SLOT_COUNT,
        cell_width: 0.0,
        cell_height: 0.0,
        scroll: allow_scroll,
    };

    for columns in 1..=SLOT_COUNT {
        let rows = SLOT_COUNT.div_ceil(columns);
        let by_width = (width - gap * (columns - 1) as f64) / columns as f64;
        let candidate = if allow_scroll {
            by_width
        } else {
            let row_height = (height - gap * (rows - 1) as f64) / rows as f64;
            by_width.min(row_height * CELL_ASPECT)
        }
        .floor();

        if candidate > 0.0 && candidate >= best.cell_width {
            best = GridLayout {
                columns,
                rows,
                cell_width: candidate,
                cell_height: (candidate / CELL_ASPECT).floor(),
                scroll: allow_scroll,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits(width: f64, height: f64, gap: f64, columns: usize, cell: f64) -> bool {
        let rows = SLOT_COUNT.div_ceil(columns) as f64;
        let c = columns as f64;
        c * cell + (c - 1.0) * gap <= width && rows * (cell / CELL_ASPECT) + (rows - 1.0) * gap <= height
    }

    #[test]
    fn wide_viewport_uses_largest_fitting_cell() {
        let layout = compute_grid_layout(1000.0, 500.0, 8.0, false);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.cell_width, 244.0);
        assert!(fits(1000.0, 500.0, 8.0, layout.columns, layout.cell_width));

        for columns in 1..=SLOT_COUNT {
            assert!(
                !fits(1000.0, 500.0, 8.0, columns, layout.cell_width + 1.0),
                "{} columns fit a wider cell",
                columns
            );
        }
    }

    #[test]
    fn short_viewport_is_height_bound() {
        let layout = compute_grid_layout(1600.0, 300.0, 8.0, false);
        assert!(fits(1600.0, 300.0, 8.0, layout.columns, layout.cell_width));
        assert!(layout.rows <= 2);
    }

    #[test]
    fn scrolling_layout_is_width_driven() {
        let layout = compute_grid_layout(400.0, 200.0, 8.0, true);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.cell_width, 400.0);
        assert!(layout.scroll);
    }

    #[test]
    fn empty_container_gives_zero_width() {
        let layout = compute_grid_layout(0.0, 0.0, 8.0, false);
        assert_eq!(layout.cell_width, 0.0);
    }

    #[test]
    fn breakpoint() {
        assert!(allows_vertical_scroll(NARROW_BREAKPOINT_PX - 1.0));
        assert!(!allows_vertical_scroll(NARROW_BREAKPOINT_PX));
    }
}
