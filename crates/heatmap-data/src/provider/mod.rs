//! 가격 데이터 제공자 구현.

pub mod csv_file;
pub mod yahoo;

pub use csv_file::{write_price_csv, write_prices, CsvPriceProvider};
pub use yahoo::YahooChartProvider;
