//! 히트맵 렌더러.
//!
//! 모든 렌더러는 그리드에 대한 순수 함수입니다.

pub mod html;
pub mod svg;
pub mod table;
pub mod text;

pub use html::{heatmap_section, html_page};
pub use svg::{escape, HeatmapRenderer, SvgOptions};
pub use table::grid_to_csv;
pub use text::render_text_table;
