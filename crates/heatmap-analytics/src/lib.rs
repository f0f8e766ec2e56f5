//! 월별 수익률 분석 및 히트맵 렌더링.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 월말 리샘플링과 월별 수익률 계산 ([`ReturnCalculator`])
//! - 연도 × 월 피벗 ([`build_grid`])
//! - 0 중심 발산형 색상 스케일 ([`DivergingScale`])
//! - SVG / HTML / 텍스트 / CSV 렌더러 ([`render`])
//! - 전체 파이프라인 ([`ReturnsPipeline`])

pub mod color;
pub mod pipeline;
pub mod pivot;
pub mod render;
pub mod returns;

pub use color::{DivergingScale, Rgb, RD_YL_GN};
pub use pipeline::{HeatmapReport, ReturnsPipeline};
pub use pivot::build_grid;
pub use render::{
    escape, grid_to_csv, heatmap_section, html_page, render_text_table,
    HeatmapRenderer, SvgOptions,
};
pub use returns::{monthly_returns, ReturnCalculator};
