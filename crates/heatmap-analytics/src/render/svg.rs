//! 수익률 그리드 SVG 히트맵 렌더러.
//!
//! 레이아웃:
//!
//! ```text
//!            {title}
//!       ┌──────────────────────┐ ┌─┐ 12.0
//!  2000 │ cells (Jan..Dec)     │ │ │
//!  ...  │                      │ │ │  0.0  Monthly Return (%)
//!  2024 │                      │ │ │
//!       └──────────────────────┘ └─┘ -12.0
//!         Jan Feb ... Dec
//!              Month
//! ```

use heatmap_core::{Month, ReturnGrid};

use crate::color::{DivergingScale, RD_YL_GN};

/// SVG 렌더링 옵션.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// 차트 제목
    pub title: String,
    /// X축 레이블
    pub x_label: String,
    /// Y축 레이블
    pub y_label: String,
    /// 컬러바 레이블
    pub colorbar_label: String,
    /// 셀 너비 (px)
    pub cell_width: f64,
    /// 셀 높이 (px)
    pub cell_height: f64,
    /// 셀 주석 표시 여부
    pub annotate: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            title: "Monthly % Change Heatmap".to_string(),
            x_label: "Month".to_string(),
            y_label: "Year".to_string(),
            colorbar_label: "Monthly Return (%)".to_string(),
            cell_width: 56.0,
            cell_height: 22.0,
            annotate: true,
        }
    }
}

impl SvgOptions {
    /// 종목 기본 제목 (`{SYMBOL} Monthly % Change Heatmap`).
    pub fn for_symbol(symbol: &str) -> Self {
        Self {
            title: format!("{} Monthly % Change Heatmap", symbol),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

const LEFT_PAD: f64 = 70.0;
const TOP_PAD: f64 = 44.0;
const BOTTOM_PAD: f64 = 52.0;
const COLORBAR_GAP: f64 = 18.0;
const COLORBAR_WIDTH: f64 = 16.0;
const RIGHT_PAD: f64 = 88.0;
const COLORBAR_TICKS: usize = 5;

/// SVG 히트맵 렌더러.
#[derive(Debug, Clone, Default)]
pub struct HeatmapRenderer {
    options: SvgOptions,
}

impl HeatmapRenderer {
    pub fn new(options: SvgOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    /// 그리드를 독립 SVG 문서로 렌더링합니다.
    ///
    /// 값이 없는 셀은 빈 칸으로 남깁니다.
    pub fn render(&self, grid: &ReturnGrid) -> String {
        let opts = &self.options;
        let scale = DivergingScale::from_grid(grid);

        let rows = grid.row_count().max(1) as f64;
        let plot_w = opts.cell_width * ReturnGrid::COLUMNS as f64;
        let plot_h = opts.cell_height * rows;
        let width = LEFT_PAD + plot_w + COLORBAR_GAP + COLORBAR_WIDTH + RIGHT_PAD;
        let height = TOP_PAD + plot_h + BOTTOM_PAD;

        let mut svg = svg_header(width, height);

        // 제목
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="24" text-anchor="middle" class="title">{title}</text>"##,
            x = LEFT_PAD + plot_w / 2.0,
            title = escape(&opts.title)
        ));

        for (row_idx, row) in grid.rows().iter().enumerate() {
            let y = TOP_PAD + row_idx as f64 * opts.cell_height;

            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" text-anchor="end" dominant-baseline="middle">{year}</text>"##,
                x = LEFT_PAD - 6.0,
                y = y + opts.cell_height / 2.0,
                year = row.year
            ));

            for month in Month::ALL {
                let Some(value) = row.get(month) else {
                    continue;
                };
                let x = LEFT_PAD + month.index() as f64 * opts.cell_width;

                svg.push_str(&format!(
                    r##"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}" stroke="#ffffff" stroke-width="0.5"><title>{month} {year}: {value:.2}%</title></rect>"##,
                    w = opts.cell_width,
                    h = opts.cell_height,
                    fill = scale.color(value).hex(),
                    year = row.year,
                ));

                if opts.annotate {
                    svg.push_str(&format!(
                        r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" dominant-baseline="middle" class="annot" fill="{color}">{value:.1}</text>"##,
                        x = x + opts.cell_width / 2.0,
                        y = y + opts.cell_height / 2.0,
                        color = scale.text_color(value).hex(),
                    ));
                }
            }
        }

        // 월 레이블 (회전 없음)
        for month in Month::ALL {
            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{label}</text>"##,
                x = LEFT_PAD + (month.index() as f64 + 0.5) * opts.cell_width,
                y = TOP_PAD + plot_h + 16.0,
                label = month.label()
            ));
        }

        // 축 레이블
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" class="axis">{label}</text>"##,
            x = LEFT_PAD + plot_w / 2.0,
            y = TOP_PAD + plot_h + 40.0,
            label = escape(&opts.x_label)
        ));
        svg.push_str(&format!(
            r##"<text x="16" y="{y:.1}" text-anchor="middle" class="axis" transform="rotate(-90 16 {y:.1})">{label}</text>"##,
            y = TOP_PAD + plot_h / 2.0,
            label = escape(&opts.y_label)
        ));

        self.draw_colorbar(&mut svg, &scale, LEFT_PAD + plot_w + COLORBAR_GAP, plot_h);

        svg.push_str(svg_footer());
        svg
    }

    fn draw_colorbar(&self, svg: &mut String, scale: &DivergingScale, x: f64, plot_h: f64) {
        // 위쪽이 최대 이익
        svg.push_str(
            r##"<defs><linearGradient id="colorbar" x1="0" y1="1" x2="0" y2="0">"##,
        );
        let last = RD_YL_GN.len() - 1;
        for (i, color) in RD_YL_GN.iter().enumerate() {
            svg.push_str(&format!(
                r##"<stop offset="{offset:.3}" stop-color="{color}"/>"##,
                offset = i as f64 / last as f64,
                color = color.hex()
            ));
        }
        svg.push_str("</linearGradient></defs>");

        svg.push_str(&format!(
            r##"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="url(#colorbar)" stroke="#cccccc" stroke-width="0.5"/>"##,
            y = TOP_PAD,
            w = COLORBAR_WIDTH,
            h = plot_h
        ));

        let vrange = scale.vrange();
        for i in 0..COLORBAR_TICKS {
            let frac = i as f64 / (COLORBAR_TICKS - 1) as f64;
            let value = vrange - 2.0 * vrange * frac;
            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" dominant-baseline="middle">{value:.1}</text>"##,
                x = x + COLORBAR_WIDTH + 4.0,
                y = TOP_PAD + plot_h * frac,
                // -0.0 방지
                value = value + 0.0
            ));
        }

        let label_x = x + COLORBAR_WIDTH + 60.0;
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" class="axis" transform="rotate(90 {x:.1} {y:.1})">{label}</text>"##,
            x = label_x,
            y = TOP_PAD + plot_h / 2.0,
            label = escape(&self.options.colorbar_label)
        ));
    }
}

fn svg_header(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:#333}}.title{{font-size:15px;font-weight:bold}}.axis{{font-size:12px}}.annot{{font-size:10px}}</style>"#,
        w = width,
        h = height
    )
}

fn svg_footer() -> &'static str {
    "</svg>"
}

/// SVG/HTML 텍스트 노드용 이스케이프.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_core::GridRow;

    fn grid() -> ReturnGrid {
        let mut row = GridRow::empty(2024);
        row.values[Month::Feb.index()] = Some(10.0);
        row.values[Month::Mar.index()] = Some(-10.0);
        ReturnGrid::from_rows(vec![row])
    }

    #[test]
    fn test_render_contains_cells_and_labels() {
        let svg = HeatmapRenderer::new(SvgOptions::for_symbol("SPY")).render(&grid());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("SPY Monthly % Change Heatmap"));
        assert!(svg.contains(">2024</text>"));
        assert!(svg.contains(">10.0</text>"));
        assert!(svg.contains(">-10.0</text>"));
        assert!(svg.contains("Monthly Return (%)"));
        assert!(svg.contains(">Year</text>"));
        assert!(svg.contains(">Month</text>"));
        for month in Month::ALL {
            assert!(svg.contains(&format!(">{}</text>", month.label())));
        }
    }

    #[test]
    fn test_missing_cells_are_blank() {
        let svg = HeatmapRenderer::default().render(&grid());
        // 값이 있는 두 셀만 그림 (컬러바 사각형 제외)
        assert_eq!(svg.matches("<title>").count(), 2);
        assert!(svg.contains("Feb 2024: 10.00%"));
        assert!(!svg.contains("Jan 2024"));
    }

    #[test]
    fn test_extreme_colors() {
        let svg = HeatmapRenderer::default().render(&grid());
        assert!(svg.contains(r##"fill="#006837""##));
        assert!(svg.contains(r##"fill="#a50026""##));
    }

    #[test]
    fn test_empty_grid_renders() {
        let svg = HeatmapRenderer::default().render(&ReturnGrid::default());
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = HeatmapRenderer::new(SvgOptions::default().with_title("A<B & C"))
            .render(&grid());
        assert!(svg.contains("A&lt;B &amp; C"));
    }
}
