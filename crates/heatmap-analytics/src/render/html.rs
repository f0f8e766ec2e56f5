//! 히트맵 HTML 페이지 뼈대.
//!
//! 대시보드 서버와 CLI `export --format html`이 같은 레이아웃을 사용합니다.

use super::svg::escape;

const STYLE: &str = r#"<style>
body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 1100px; color: #262626; }
h1 { margin-bottom: 0.25rem; }
.description { color: #555; margin-top: 0; }
form { display: flex; gap: 0.75rem; align-items: end; margin: 1.25rem 0; flex-wrap: wrap; }
label { display: flex; flex-direction: column; font-size: 0.85rem; gap: 0.25rem; }
input, select, button { font-size: 1rem; padding: 0.3rem 0.5rem; }
.heatmap { overflow-x: auto; }
.error { border: 1px solid #d73027; background: #fdecea; color: #a50026; padding: 0.75rem 1rem; border-radius: 4px; }
.error p { margin: 0.25rem 0 0; }
details { margin-top: 1.5rem; }
table { border-collapse: collapse; font-variant-numeric: tabular-nums; }
th, td { padding: 0.2rem 0.8rem; border-bottom: 1px solid #eee; text-align: right; }
</style>"#;

/// 제목/설명이 포함된 독립 HTML 문서를 만듭니다.
///
/// `title`과 `description`은 이스케이프되며 `body`는 그대로 삽입됩니다.
/// 제목 앞에는 📊 아이콘이 붙습니다.
pub fn html_page(title: &str, description: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{style}
</head>
<body>
<h1>📊 {title}</h1>
<p class="description">{description}</p>
{body}
</body>
</html>
"#,
        title = escape(title),
        description = escape(description),
        style = STYLE,
        body = body
    )
}

/// 히트맵 SVG를 감싸는 섹션.
pub fn heatmap_section(svg: &str) -> String {
    format!(r#"<section class="heatmap">{}</section>"#, svg)
}
