//! Dataset styling by chart type and line type
//!
//! Everything that varies with the `(chart_type, line_type)` combination
//! lives in the tables below; the builder only looks rows up.

use ae_core::{ChartType, EntityKind, LineType};

/// How a dataset's stroke is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePaint {
    /// The entity color
    Flat,
    /// The kind gradient, falling back to the entity color
    Gradient,
}

/// How the area under a dataset is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPaint {
    /// The entity color as is
    Solid,
    /// The entity color with the kind's fill alpha
    Tinted,
    /// The kind gradient, falling back to the tinted color
    Gradient,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line,
    Bar,
}

/// Curve shape of one kind of line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindLine {
    pub tension: f64,
    /// `Some("before")` draws steps instead of a curve
    pub stepped: Option<&'static str>,
    /// Alpha substituted into the entity color for tinted fills
    pub fill_alpha: &'static str,
}

/// Resolved style for one `(chart_type, line_type)` combination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStyle {
    pub shape: Shape,
    pub border_width: u32,
    /// Tag datasets with their kind's stack group
    pub stacked: bool,
    pub stroke: StrokePaint,
    pub fill: FillPaint,
    /// Whether the area under a line is filled
    pub fills_area: bool,
    pub point_hover_radius: u32,
}

impl DatasetStyle {
    pub fn is_bar(&self) -> bool {
        self.shape == Shape::Bar
    }
}

struct ChartRow {
    chart_type: ChartType,
    shape: Shape,
    border_width: u32,
    stacked: bool,
    point_hover_radius: u32,
}

struct LineRow {
    line_type: LineType,
    stroke: StrokePaint,
    fill: FillPaint,
    fills_area: bool,
}

const CHART_ROWS: &[ChartRow] = &[
    ChartRow {
        chart_type: ChartType::Line,
        shape: Shape::Line,
        border_width: 2,
        stacked: false,
        point_hover_radius: 4,
    },
    ChartRow {
        chart_type: ChartType::StackedLine,
        shape: Shape::Line,
        border_width: 2,
        stacked: true,
        point_hover_radius: 0,
    },
    ChartRow {
        chart_type: ChartType::StackedBar,
        shape: Shape::Bar,
        border_width: 1,
        stacked: true,
        point_hover_radius: 0,
    },
];

const LINE_ROWS: &[LineRow] = &[
    LineRow {
        line_type: LineType::Normal,
        stroke: StrokePaint::Flat,
        fill: FillPaint::Tinted,
        fills_area: true,
    },
    LineRow {
        line_type: LineType::Gradient,
        stroke: StrokePaint::Gradient,
        fill: FillPaint::Gradient,
        fills_area: true,
    },
    LineRow {
        line_type: LineType::GradientNoFill,
        stroke: StrokePaint::Gradient,
        fill: FillPaint::Transparent,
        fills_area: false,
    },
    LineRow {
        line_type: LineType::NoFill,
        stroke: StrokePaint::Flat,
        fill: FillPaint::Transparent,
        fills_area: false,
    },
];

/// Bars ignore the line type
const BAR_LINE: LineRow = LineRow {
    line_type: LineType::Normal,
    stroke: StrokePaint::Flat,
    fill: FillPaint::Solid,
    fills_area: false,
};

pub fn dataset_style(chart_type: ChartType, line_type: LineType) -> DatasetStyle {
    let chart = CHART_ROWS
        .iter()
        .find(|row| row.chart_type == chart_type)
        .unwrap_or(&CHART_ROWS[0]);
    let line = match chart.shape {
        Shape::Bar => &BAR_LINE,
        Shape::Line => LINE_ROWS
            .iter()
            .find(|row| row.line_type == line_type)
            .unwrap_or(&LINE_ROWS[0]),
    };

    DatasetStyle {
        shape: chart.shape,
        border_width: chart.border_width,
        stacked: chart.stacked,
        stroke: line.stroke,
        fill: line.fill,
        fills_area: line.fills_area,
        point_hover_radius: chart.point_hover_radius,
    }
}

/// Power is a smooth curve, energy a step-before line
pub fn kind_line(kind: EntityKind) -> KindLine {
    match kind {
        EntityKind::Power => KindLine {
            tension: 0.4,
            stepped: None,
            fill_alpha: "0.1",
        },
        EntityKind::Energy => KindLine {
            tension: 0.0,
            stepped: Some("before"),
            fill_alpha: "0.2",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_TYPES: [ChartType; 3] =
        [ChartType::Line, ChartType::StackedBar, ChartType::StackedLine];
    const LINE_TYPES: [LineType; 4] = [
        LineType::Normal,
        LineType::Gradient,
        LineType::GradientNoFill,
        LineType::NoFill,
    ];

    #[test]
    fn test_every_combination_has_a_row() {
        for chart_type in CHART_TYPES {
            assert!(CHART_ROWS.iter().any(|row| row.chart_type == chart_type));
        }
        for line_type in LINE_TYPES {
            assert!(LINE_ROWS.iter().any(|row| row.line_type == line_type));
        }
    }

    #[test]
    fn test_bars_ignore_line_type() {
        for line_type in LINE_TYPES {
            let style = dataset_style(ChartType::StackedBar, line_type);
            assert!(style.is_bar());
            assert_eq!(style.border_width, 1);
            assert!(style.stacked);
            assert_eq!(style.stroke, StrokePaint::Flat);
            assert_eq!(style.fill, FillPaint::Solid);
        }
    }

    #[test]
    fn test_line_fill_rules() {
        for chart_type in [ChartType::Line, ChartType::StackedLine] {
            let normal = dataset_style(chart_type, LineType::Normal);
            assert!(normal.fills_area);
            assert_eq!(normal.fill, FillPaint::Tinted);

            let gradient = dataset_style(chart_type, LineType::Gradient);
            assert!(gradient.fills_area);
            assert_eq!(
                (gradient.stroke, gradient.fill),
                (StrokePaint::Gradient, FillPaint::Gradient)
            );

            let gradient_no_fill = dataset_style(chart_type, LineType::GradientNoFill);
            assert!(!gradient_no_fill.fills_area);
            assert_eq!(
                (gradient_no_fill.stroke, gradient_no_fill.fill),
                (StrokePaint::Gradient, FillPaint::Transparent)
            );

            let no_fill = dataset_style(chart_type, LineType::NoFill);
            assert!(!no_fill.fills_area);
            assert_eq!(
                (no_fill.stroke, no_fill.fill),
                (StrokePaint::Flat, FillPaint::Transparent)
            );
        }
    }

    #[test]
    fn test_stacked_line_hides_hover_points() {
        assert_eq!(dataset_style(ChartType::Line, LineType::Normal).point_hover_radius, 4);
        assert_eq!(
            dataset_style(ChartType::StackedLine, LineType::Normal).point_hover_radius,
            0
        );
        assert!(!dataset_style(ChartType::Line, LineType::Normal).stacked);
        assert!(dataset_style(ChartType::StackedLine, LineType::Normal).stacked);
    }

    #[test]
    fn test_kind_lines() {
        assert_eq!(kind_line(EntityKind::Power).tension, 0.4);
        assert_eq!(kind_line(EntityKind::Power).stepped, None);
        assert_eq!(kind_line(EntityKind::Energy).tension, 0.0);
        assert_eq!(kind_line(EntityKind::Energy).stepped, Some("before"));
    }
}
