//! 대시보드 페이지.
//!
//! `GET /?symbol=SPY&start=2000-01-01`
//!
//! 요청마다 가격을 새로 가져와 히트맵을 그립니다. 페이지 구성:
//! 제목, 설명, 종목/시작일 입력 폼, SVG 히트맵, 접을 수 있는 원시 가격 표.
//! 에러는 페이지 안의 에러 박스로 표시하며 HTTP 상태 코드는 JSON API와 같습니다.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use tracing::info;

use heatmap_analytics::{
    escape, heatmap_section, html_page, HeatmapRenderer, HeatmapReport, ReturnsPipeline,
    SvgOptions,
};
use heatmap_core::{FillPolicy, HeatmapError};

use super::query::HeatmapQuery;
use crate::error::status_for;
use crate::state::AppState;

/// 대시보드 페이지 핸들러.
///
/// GET /
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> (StatusCode, Html<String>) {
    let form = FormValues::from_query(&query, &state);

    let outcome = match query.resolve(&state.dashboard) {
        Ok(resolved) => {
            ReturnsPipeline::new(resolved.fill_policy)
                .run(state.provider.as_ref(), &resolved.symbol, resolved.start)
                .await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            info!(
                symbol = %report.symbol,
                records = report.records.len(),
                "Dashboard rendered"
            );
            (StatusCode::OK, Html(render_page(&state, &form, Ok(&report))))
        }
        Err(err) => {
            let status = status_for(&err);
            tracing::warn!(code = err.code(), error = %err, "Dashboard request failed");
            (status, Html(render_page(&state, &form, Err(&err))))
        }
    }
}

/// 폼에 다시 채울 입력값.
struct FormValues {
    symbol: String,
    start: String,
    fill: FillPolicy,
}

impl FormValues {
    fn from_query(query: &HeatmapQuery, state: &AppState) -> Self {
        let pick = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            symbol: pick(&query.symbol)
                .map(|s| s.to_uppercase())
                .unwrap_or_else(|| state.dashboard.default_symbol.clone()),
            start: pick(&query.start)
                .unwrap_or_else(|| state.dashboard.default_start.format("%Y-%m-%d").to_string()),
            fill: pick(&query.fill)
                .and_then(|f| f.parse().ok())
                .unwrap_or(state.dashboard.fill_policy),
        }
    }
}

fn render_page(
    state: &AppState,
    form: &FormValues,
    outcome: Result<&HeatmapReport, &HeatmapError>,
) -> String {
    let dashboard = &state.dashboard;
    let title = dashboard.title_for(&form.symbol);
    let description = dashboard.description_for(&form.symbol);

    let content = match outcome {
        Ok(report) => {
            let svg = HeatmapRenderer::new(SvgOptions::for_symbol(&report.symbol))
                .render(&report.grid);
            format!(
                "{}{}",
                heatmap_section(&svg),
                price_table(report, dashboard.price_table_rows)
            )
        }
        Err(err) => format!(
            r#"<div class="error"><strong>{code}</strong><p>{message}</p></div>"#,
            code = err.code(),
            message = escape(&err.to_string())
        ),
    };

    let fill_option = |policy: FillPolicy, label: &str| {
        format!(
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = policy,
            selected = if form.fill == policy { " selected" } else { "" },
            label = label
        )
    };

    let body = format!(
        r#"<form method="get" action="/">
<label>Symbol <input name="symbol" value="{symbol}" required></label>
<label>Start <input type="date" name="start" value="{start}"></label>
<label>Missing months <select name="fill">{skip}{ffill}</select></label>
<button type="submit">Update</button>
</form>
{content}"#,
        symbol = escape(&form.symbol),
        start = escape(&form.start),
        ffill = fill_option(FillPolicy::ForwardFill, "Forward fill"),
        skip = fill_option(FillPolicy::Skip, "Skip"),
        content = content
    );

    html_page(&title, &description, &body)
}

/// 원시 일별 종가 표 (최신순, 최대 `max_rows`행).
fn price_table(report: &HeatmapReport, max_rows: usize) -> String {
    let total = report.series.len();
    let shown = total.min(max_rows);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<details><summary>Raw daily prices ({shown} of {total} rows, most recent first)</summary><table><thead><tr><th>Date</th><th>Close</th></tr></thead><tbody>"#
    );
    for point in report.series.points().iter().rev().take(max_rows) {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.2}</td></tr>",
            point.date, point.close
        );
    }
    html.push_str("</tbody></table></details>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn get_page(uri: &str) -> (StatusCode, String) {
        let app = Router::new()
            .route("/", get(dashboard_page))
            .with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_default_page() {
        let (status, html) = get_page("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("📊 SPY Historical Returns"));
        assert!(html.contains("Bloomberg-style heatmap of SPY monthly returns"));
        assert!(html.contains(r#"value="2000-01-01""#));
        assert!(html.contains("<svg"));
        assert!(html.contains("Monthly Return (%)"));
        assert!(html.contains("<details>"));
    }

    #[tokio::test]
    async fn test_price_table_most_recent_first() {
        let (_, html) = get_page("/?symbol=qqq&start=2021-01-01").await;

        assert!(html.contains("QQQ Historical Returns"));
        let first_row = html.find("<tr><td>2021-12-31</td>").unwrap();
        let later_row = html.find("<tr><td>2021-12-30</td>").unwrap();
        assert!(first_row < later_row);
    }

    #[tokio::test]
    async fn test_error_box_for_unknown_symbol() {
        let (status, html) = get_page("/?symbol=UNKNOWN").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains(r#"class="error""#));
        assert!(html.contains("DATA_UNAVAILABLE"));
        // 폼은 입력값 그대로 다시 표시
        assert!(html.contains(r#"value="UNKNOWN""#));
        assert!(!html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_escaped() {
        let (status, html) = get_page("/?symbol=%3Cscript%3E").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;SCRIPT&gt;"));
    }

    #[tokio::test]
    async fn test_fill_policy_is_selected() {
        let (_, html) = get_page("/").await;
        assert!(html.contains(r#"<option value="skip" selected>"#));

        let (status, html) = get_page("/?fill=ffill").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<option value="forward_fill" selected>"#));
        assert!(html.contains(r#"<option value="skip">"#));
    }
}
