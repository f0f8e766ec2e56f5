//! CSV 파일 기반 가격 제공자.
//!
//! `{data_dir}/{SYMBOL}.csv` 형식의 파일에서 일별 종가를 읽습니다.
//! 파일은 `date,close` 헤더를 가지며 `heatmap prices -o` 명령이 같은 형식으로 저장합니다.
//!
//! ```text
//! date,close
//! 2024-01-02,472.65
//! 2024-01-03,468.79
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use heatmap_core::{
    normalize_symbol, HeatmapResult, PricePoint, PriceProvider, PriceSeries,
};

use crate::error::{DataError, Result};

/// CSV 한 행.
#[derive(Debug, Deserialize, Serialize)]
struct PriceRow {
    date: NaiveDate,
    close: Decimal,
}

/// 로컬 CSV 디렉토리에서 가격을 읽는 제공자 (오프라인 사용).
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    data_dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 심볼에 해당하는 파일 경로.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub async fn load(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        let path = self.path_for(&symbol);
        debug!(path = %path.display(), "Reading price file");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    DataError::NotFound(format!("가격 파일 없음: {}", path.display()))
                }
                _ => DataError::from(e),
            })?;

        let series = parse_price_csv(&symbol, &bytes)?.since(start);
        if series.is_empty() {
            return Err(DataError::Empty(format!("{} ({} 이후)", symbol, start)));
        }

        info!(symbol = %symbol, rows = series.len(), "Loaded daily closes from CSV");
        Ok(series)
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch(&self, symbol: &str, start: NaiveDate) -> HeatmapResult<PriceSeries> {
        Ok(self.load(symbol, start).await?)
    }
}

/// `date,close` CSV 바이트를 가격 시계열로 파싱합니다.
fn parse_price_csv(symbol: &str, bytes: &[u8]) -> Result<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut points = Vec::new();
    for (line, record) in reader.deserialize::<PriceRow>().enumerate() {
        let row = record.map_err(|e| DataError::Parse(format!("{}행: {}", line + 2, e)))?;
        points.push(PricePoint::new(row.date, row.close));
    }

    Ok(PriceSeries::from_unsorted(symbol, points))
}

/// 가격 시계열을 `date,close` CSV로 씁니다.
pub fn write_prices<W: std::io::Write>(writer: W, series: &PriceSeries) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for point in series.points() {
        writer.serialize(PriceRow {
            date: point.date,
            close: point.close,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// 가격 시계열을 `date,close` CSV 파일로 저장합니다.
///
/// 상위 디렉토리가 없으면 생성합니다.
pub fn write_price_csv(path: impl AsRef<Path>, series: &PriceSeries) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_prices(std::io::BufWriter::new(file), series)?;

    debug!(path = %path.display(), rows = series.len(), "Saved price CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("heatmap-csv-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_price_csv_sorts_and_dedupes() {
        let csv = b"date,close\n2024-01-03,101.5\n2024-01-02,100\n2024-01-03,102\n2024-01-04,0\n";
        let series = parse_price_csv("SPY", csv).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].date, date(2024, 1, 2));
        assert_eq!(series.points()[1].close, dec!(102));
    }

    #[test]
    fn test_parse_price_csv_bad_row() {
        let csv = b"date,close\n2024-01-02,abc\n";
        let err = parse_price_csv("SPY", csv).unwrap_err();
        assert!(matches!(err, DataError::Parse(ref m) if m.starts_with("2행")));
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let dir = temp_dir("roundtrip");
        let series = PriceSeries::new(
            "QQQ",
            vec![
                PricePoint::new(date(2023, 12, 29), dec!(409.52)),
                PricePoint::new(date(2024, 1, 31), dec!(423.14)),
            ],
        )
        .unwrap();

        let provider = CsvPriceProvider::new(&dir);
        write_price_csv(provider.path_for("QQQ"), &series).unwrap();

        let loaded = provider.fetch("qqq", date(2024, 1, 1)).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.points()[0].close, dec!(423.14));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_prices_to_buffer() {
        let series = PriceSeries::new(
            "SPY",
            vec![PricePoint::new(date(2024, 1, 2), dec!(472.65))],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_prices(&mut buf, &series).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "date,close\n2024-01-02,472.65\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_data_unavailable() {
        let provider = CsvPriceProvider::new(temp_dir("missing"));
        let err = provider.fetch("NOPE", date(2000, 1, 1)).await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_nothing_after_start_is_empty() {
        let dir = temp_dir("late-start");
        std::fs::write(dir.join("SPY.csv"), "date,close\n2020-01-02,300\n").unwrap();

        let provider = CsvPriceProvider::new(&dir);
        let err = provider.load("SPY", date(2021, 1, 1)).await.unwrap_err();
        assert!(matches!(err, DataError::Empty(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
