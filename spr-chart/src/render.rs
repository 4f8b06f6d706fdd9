use crate::error::{render_error, ChartError, Result};
use crate::layout::{
    annotations, axes_to_pixel, stroke_offsets, title_lines, x_range, x_tick_dates, y_label_count,
    y_range, y_tick_label, Align, Annotation, ChartConfig, BAND_LEGEND_TITLE, BUDGET_COLOR, BUDGET_LABEL, TEXT_COLOR, TREND_COLOR,
    TREND_LABEL, Y_AXIS_LABEL,
};
use chrono::NaiveDate;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use spr_analysis::irradiance::IrradianceBand;
use spr_analysis::Analysis;
use spr_utils::dates::format_month_year;
use std::ops::Range;
use std::path::Path;

const FONT: &str = "sans-serif";

fn band_color(band: IrradianceBand) -> RGBColor {
    let (r, g, b) = band.rgb();
    RGBColor(r, g, b)
}

fn anchor(align: Align) -> HPos {
    match align {
        Align::Left => HPos::Left,
        Align::Center => HPos::Center,
        Align::Right => HPos::Right,
    }
}

/// Corners of a diamond marker centered on the origin.
fn diamond(radius: i32) -> Vec<(i32, i32)> {
    vec![(0, -radius), (radius, 0), (0, radius), (-radius, 0)]
}

/// Render the PR evolution chart to a PNG file.
pub fn render_chart(analysis: &Analysis, config: &ChartConfig, output: &Path) -> Result<()> {
    config.validate()?;
    let size = config.pixel_size();
    let root = BitMapBackend::new(output, size).into_drawing_area();
    draw_figure(&root, analysis, config)?;
    root.present().map_err(render_error("write image"))?;
    info!("Chart written to {} ({}x{} px)", output.display(), size.0, size.1);
    Ok(())
}

/// Draw the whole figure onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &Analysis,
    config: &ChartConfig,
) -> Result<()> {
    let days = analysis.days();
    let (start, end) = match (analysis.start_date(), analysis.end_date()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ChartError::NoData),
    };

    root.fill(&WHITE).map_err(render_error("fill background"))?;
    let (title_area, plot_area) = root.split_vertically(config.px(42.0));
    draw_title(&title_area, &start, &end, config)?;

    let dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();
    let x_ticks = x_tick_dates(&dates);
    debug!("x ticks: {:?}", x_ticks);
    let max_pr = days.iter().map(|day| day.pr).fold(f64::MIN, f64::max);

    let x_spec = RangedDate::from(x_range(start, end)).with_key_points(x_ticks.clone());
    let y_spec = y_range(max_pr);
    let y_labels = y_label_count(y_spec.end);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin_left(config.px(8.0))
        .margin_right(config.px(16.0))
        .margin_bottom(config.px(8.0))
        .x_label_area_size(config.px(24.0))
        .y_label_area_size(config.px(48.0))
        .build_cartesian_2d(x_spec, y_spec)
        .map_err(render_error("build chart"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_ticks.len() + 1)
        .y_labels(y_labels)
        .x_label_formatter(&|date: &NaiveDate| format_month_year(date))
        .y_label_formatter(&|value: &f64| y_tick_label(*value))
        .y_desc(Y_AXIS_LABEL)
        .label_style((FONT, config.pt(10.0)))
        .axis_desc_style((FONT, config.pt(10.0)))
        .axis_style(BLACK.stroke_width(config.px(0.8)))
        .draw()
        .map_err(render_error("configure mesh"))?;

    let radius = config.px(2.0) as i32;
    chart
        .draw_series(days.iter().map(|day| {
            EmptyElement::at((day.date, day.pr))
                + Polygon::new(diamond(radius), band_color(day.band).filled())
        }))
        .map_err(render_error("draw daily points"))?;

    let legend_length = config.px(20.0) as i32;
    let budget_style = BUDGET_COLOR.stroke_width(config.px(3.0));
    chart
        .draw_series(LineSeries::new(
            days.iter().map(|day| (day.date, day.budget_pr)),
            budget_style,
        ))
        .map_err(render_error("draw budget line"))?
        .label(BUDGET_LABEL)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_length, y)], budget_style));

    let trend_style = TREND_COLOR.stroke_width(config.px(2.0));
    chart
        .draw_series(LineSeries::new(
            days.iter()
                .filter_map(|day| day.moving_average_pr.map(|pr| (day.date, pr))),
            trend_style,
        ))
        .map_err(render_error("draw moving average"))?
        .label(TREND_LABEL)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_length, y)], trend_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .legend_area_size(config.px(28.0))
        .margin(config.px(6.0))
        .label_font((FONT, config.pt(8.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(render_error("draw series legend"))?;

    let area = chart.plotting_area().get_pixel_range();
    draw_band_legend(root, &area, config)?;
    for note in annotations(&analysis.summary()) {
        draw_annotation(root, &area, &note, config)?;
    }
    Ok(())
}

fn draw_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    start: &NaiveDate,
    end: &NaiveDate,
    config: &ChartConfig,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let center = (width / 2) as i32;
    let style = (FONT, config.pt(12.0))
        .into_font()
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let line_height = (height / 3) as i32;
    for (i, line) in title_lines(start, end).iter().enumerate() {
        let y = line_height * (i as i32 + 1);
        area.draw(&Text::new(line.as_str(), (center, y), style.clone()))
            .map_err(render_error("draw title"))?;
    }
    Ok(())
}

fn draw_annotation<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &(Range<i32>, Range<i32>),
    note: &Annotation,
    config: &ChartConfig,
) -> Result<()> {
    let mut font = (FONT, config.pt(10.0)).into_font();
    if note.bold {
        font = font.style(FontStyle::Bold);
    }
    let style = font
        .color(&note.color)
        .pos(Pos::new(anchor(note.align), VPos::Center));
    let (fx, fy) = note.position;
    let (x, y) = axes_to_pixel(area, fx, fy);
    for dx in stroke_offsets(note.bold, config) {
        root.draw(&Text::new(note.text.as_str(), (x + dx, y), style.clone()))
            .map_err(render_error("draw annotation"))?;
    }
    Ok(())
}

/// Boxed key of the irradiation band colors, centered on the right edge.
fn draw_band_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &(Range<i32>, Range<i32>),
    config: &ChartConfig,
) -> Result<()> {
    let px = |points: f64| config.px(points) as i32;
    let row_height = px(12.0);
    let width = px(118.0);
    let height = row_height * (IrradianceBand::LEGEND.len() as i32 + 1) + px(6.0);

    let right = area.0.end - px(6.0);
    let left = right - width;
    let top = (area.1.start + area.1.end) / 2 - height / 2;
    let corners = [(left, top), (right, top + height)];

    root.draw(&Rectangle::new(corners, WHITE.mix(0.8).filled()))
        .map_err(render_error("draw band legend"))?;
    root.draw(&Rectangle::new(corners, BLACK.mix(0.3).stroke_width(1)))
        .map_err(render_error("draw band legend"))?;

    let font = (FONT, config.pt(8.0)).into_font();
    let title_style = font
        .clone()
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let first_row = top + px(3.0) + row_height / 2;
    root.draw(&Text::new(
        BAND_LEGEND_TITLE,
        ((left + right) / 2, first_row),
        title_style,
    ))
    .map_err(render_error("draw band legend"))?;

    let label_style = font
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let marker_x = left + px(12.0);
    for (i, band) in IrradianceBand::LEGEND.iter().enumerate() {
        let y = first_row + row_height * (i as i32 + 1);
        root.draw(
            &(EmptyElement::at((marker_x, y))
                + Polygon::new(diamond(px(3.0)), band_color(*band).filled())),
        )
        .map_err(render_error("draw band legend"))?;
        root.draw(&Text::new(
            band.label(),
            (marker_x + px(10.0), y),
            label_style.clone(),
        ))
        .map_err(render_error("draw band legend"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use spr_analysis::budget::BudgetPolicy;
    use spr_analysis::analyze;
    use spr_data::{DailyPerformance, Dataset};

    fn sample_analysis(len: i64) -> Analysis {
        let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap();
        let days = (0..len)
            .map(|i| {
                let pr = 60.0 + (i % 25) as f64;
                let ghi = (i % 8) as f64;
                DailyPerformance::new(start + Duration::days(i), pr, ghi)
            })
            .collect();
        analyze(&Dataset::new(days).unwrap(), &BudgetPolicy::default())
    }

    fn draw_to_svg(analysis: &Analysis) -> Result<String> {
        let config = ChartConfig {
            dpi: 72,
            ..ChartConfig::default()
        };
        let (width, height) = config.pixel_size();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            draw_figure(&root, analysis, &config)?;
            root.present().map_err(render_error("write image"))?;
        }
        Ok(svg)
    }

    #[test]
    fn test_draw_figure() {
        let svg = draw_to_svg(&sample_analysis(400)).unwrap();
        assert!(svg.contains("Performance Evolution Ratio"));
        assert!(svg.contains("From 2019-07 to 2020-08"));
        assert!(svg.contains(BUDGET_LABEL));
        assert!(svg.contains(TREND_LABEL));
        assert!(svg.contains("Average PR last 365-d"));
        assert!(svg.contains("Jul/19"));
    }

    #[test]
    fn test_draw_single_day() {
        let svg = draw_to_svg(&sample_analysis(1)).unwrap();
        assert!(svg.contains("Points above Target Budget PR 0/1 0.0%"));
    }

    #[test]
    fn test_empty_analysis_has_no_data() {
        assert!(matches!(
            draw_to_svg(&Analysis::default()),
            Err(ChartError::NoData)
        ));
    }

    #[test]
    fn test_render_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plot.png");
        let config = ChartConfig {
            dpi: 50,
            ..ChartConfig::default()
        };
        render_chart(&sample_analysis(60), &config, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_anchor() {
        assert!(matches!(anchor(Align::Right), HPos::Right));
        assert!(matches!(anchor(Align::Center), HPos::Center));
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(band_color(IrradianceBand::BelowTwo), RGBColor(0, 0, 128));
        assert_eq!(band_color(IrradianceBand::FourToSix), RGBColor(255, 165, 0));
    }

    #[test]
    fn test_diamond_is_symmetric() {
        let points = diamond(4);
        assert_eq!(points.len(), 4);
        assert_eq!(points.iter().map(|p| p.0).sum::<i32>(), 0);
        assert_eq!(points.iter().map(|p| p.1).sum::<i32>(), 0);
    }
}
