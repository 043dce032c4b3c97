use std::io::Cursor;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::{debug, info};

use super::font::resolve_font_family;
use super::{ReportError, ReportLabels, ReportOptions};
use crate::convergence::ConvergenceReport;

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const TARGET_COLOR: RGBColor = RGBColor(214, 39, 40);
const GRID_COLOR: RGBColor = RGBColor(120, 120, 120);

/// 추세 차트와 오차 분석표를 한 장의 PNG로 그린다.
///
/// 픽셀 크기는 인치 × dpi 이며, 선 두께와 글자 크기는 dpi/100 배로 키운다.
pub fn render_png(
    report: &ConvergenceReport,
    options: &ReportOptions,
    labels: &ReportLabels,
) -> Result<Vec<u8>, ReportError> {
    let (width, height) = options.pixel_size()?;
    let scale = options.dpi as f64 / 100.0;
    let font = resolve_font_family(&options.font_preferences);
    debug!(width, height, points = report.series.len(), "rendering report");

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_report(&root, report, labels, font.as_deref(), scale)
            .map_err(|e| ReportError::Draw(e.to_string()))?;
        root.present()
            .map_err(|e| ReportError::Draw(e.to_string()))?;
    }
    let png = encode_png(width, height, buf)?;
    info!(bytes = png.len(), "report rendered");
    Ok(png)
}

fn px(base: f64, scale: f64) -> u32 {
    (base * scale).round().max(1.0) as u32
}

fn font_desc(family: &str, size: f64) -> FontDesc<'_> {
    FontDesc::new(FontFamily::from(family), size, FontStyle::Normal)
}

fn draw_report<DB>(
    root: &DrawingArea<DB, Shift>,
    report: &ConvergenceReport,
    labels: &ReportLabels,
    font: Option<&str>,
    scale: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;
    let (_, height) = root.dim_in_pixel();
    // 글꼴이 없으면 표는 생략하고 차트만 그린다.
    let table_h = match font {
        Some(_) => (px(26.0, scale) * (report.rows.len() as u32 + 2)).min(height / 2),
        None => 0,
    };
    let (chart_area, table_area) = root.split_vertically((height - table_h) as i32);
    draw_chart(&chart_area, report, labels, font, scale)?;
    if let Some(family) = font {
        draw_table(&table_area, report, labels, family, scale)?;
    }
    Ok(())
}

fn draw_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    report: &ConvergenceReport,
    labels: &ReportLabels,
    font: Option<&str>,
    scale: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let n = report.series.len().max(1);
    let x_start = 0.5;
    let x_end = n as f64 + 0.5;

    let mut builder = ChartBuilder::on(area);
    builder.margin(px(20.0, scale));
    if let Some(family) = font {
        builder
            .caption(labels.title.as_str(), font_desc(family, 22.0 * scale))
            .set_label_area_size(LabelAreaPosition::Left, px(80.0, scale))
            .set_label_area_size(LabelAreaPosition::Bottom, px(50.0, scale));
    }
    let mut chart =
        builder.build_cartesian_2d(x_start..x_end, report.bounds.min..report.bounds.max)?;

    // 글꼴이 없으면 눈금/라벨 없이 선과 점만 그린다.
    if let Some(family) = font {
        let x_fmt = |v: &f64| {
            if (v - v.round()).abs() < 1e-6 {
                format!("{v:.0}")
            } else {
                String::new()
            }
        };
        let y_fmt = |v: &f64| format!("{v:.2}");
        chart
            .configure_mesh()
            .light_line_style(GRID_COLOR.mix(0.15))
            .x_labels(n + 1)
            .x_label_formatter(&x_fmt)
            .y_labels(8)
            .y_label_formatter(&y_fmt)
            .label_style(font_desc(family, 14.0 * scale))
            .axis_desc_style(font_desc(family, 15.0 * scale))
            .x_desc(labels.x_axis.as_str())
            .y_desc(format!("{} [{}]", labels.y_axis, report.unit.symbol()))
            .draw()?;
    }

    let stroke = px(2.0, scale);
    let points: Vec<(f64, f64)> = report
        .series
        .iter()
        .enumerate()
        .map(|(i, &v)| ((i + 1) as f64, v))
        .collect();

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            SERIES_COLOR.stroke_width(stroke),
        ))?
        .label(labels.series.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 24, y)], SERIES_COLOR.stroke_width(stroke))
        });
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, px(4.0, scale), SERIES_COLOR.filled())),
    )?;

    if report.draws_target_line() {
        chart
            .draw_series(LineSeries::new(
                vec![(x_start, report.target), (x_end, report.target)],
                TARGET_COLOR.stroke_width(stroke),
            ))?
            .label(format!("{} ({:.2})", labels.target, report.target))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], TARGET_COLOR.stroke_width(stroke))
            });
    }

    if let Some(family) = font {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(font_desc(family, 13.0 * scale))
            .draw()?;
    }
    Ok(())
}

fn draw_table<DB>(
    area: &DrawingArea<DB, Shift>,
    report: &ConvergenceReport,
    labels: &ReportLabels,
    family: &str,
    scale: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let (width, _) = area.dim_in_pixel();
    let row_h = px(26.0, scale) as i32;
    let left = px(30.0, scale) as i32;
    let right = width as i32 - left;
    let col_w = (right - left) / 5;
    let style = TextStyle::from(font_desc(family, 14.0 * scale)).color(&BLACK);

    let unit = report.unit.symbol();
    let header = [
        labels.col_index.clone(),
        format!("{} [{unit}]", labels.col_measured),
        format!("{} [{unit}]", labels.col_target),
        format!("{} [{unit}]", labels.col_gap),
        format!("{} [%]", labels.col_error),
    ];

    let mut y = row_h / 2;
    for (i, cell) in header.iter().enumerate() {
        area.draw(&Text::new(
            cell.as_str(),
            (left + col_w * i as i32, y),
            style.clone(),
        ))?;
    }
    y += row_h;
    area.draw(&PathElement::new(
        vec![(left, y - row_h / 4), (right, y - row_h / 4)],
        BLACK.stroke_width(px(1.0, scale)),
    ))?;

    for row in &report.rows {
        let cells = [
            row.index.to_string(),
            format!("{:.2}", row.measured),
            format!("{:.2}", row.target),
            format!("{:.2}", row.gap),
            format!("{:.2}", row.error_pct),
        ];
        for (i, cell) in cells.iter().enumerate() {
            area.draw(&Text::new(
                cell.as_str(),
                (left + col_w * i as i32, y),
                style.clone(),
            ))?;
        }
        y += row_h;
    }
    Ok(())
}

fn encode_png(width: u32, height: u32, buf: Vec<u8>) -> Result<Vec<u8>, ReportError> {
    let image = image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| ReportError::Encode("픽셀 버퍼 크기가 이미지 크기와 다릅니다".into()))?;
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image).write_to(&mut out, image::ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}
