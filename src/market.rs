use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

/// Quick-access tickers shown on the dashboard.
pub const POPULAR_TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Chart window. Mirrors the period picker on the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Period {
    pub const ALL: [Period; 4] =
        [Period::OneMonth, Period::ThreeMonths, Period::SixMonths, Period::OneYear];

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
        }
    }

    pub fn days(&self) -> usize {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
        }
    }

    pub fn next(&self) -> Period {
        match self {
            Period::OneMonth => Period::ThreeMonths,
            Period::ThreeMonths => Period::SixMonths,
            Period::SixMonths => Period::OneYear,
            Period::OneYear => Period::OneMonth,
        }
    }
}

pub fn company_name(ticker: &str) -> String {
    match ticker {
        "AAPL" => "Apple Inc.".to_string(),
        "MSFT" => "Microsoft Corporation".to_string(),
        "GOOGL" => "Alphabet Inc.".to_string(),
        "AMZN" => "Amazon.com Inc.".to_string(),
        "META" => "Meta Platforms, Inc.".to_string(),
        "TSLA" => "Tesla, Inc.".to_string(),
        "NVDA" => "NVIDIA Corporation".to_string(),
        other => format!("{other} Inc."),
    }
}

#[derive(Debug, Clone)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Fabricated daily closes: a base level, a slight upward drift, and noise.
/// Stands in for a market-data backend that does not exist.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub ticker: String,
    pub period: Period,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn generate<R: Rng>(ticker: &str, period: Period, rng: &mut R) -> Self {
        let days = period.days();
        let base = 150.0 + rng.gen::<f64>() * 50.0;
        let volatility = 2.0;
        let trend = 0.05;
        let today = Local::now().date_naive();

        let points = (0..days)
            .map(|i| {
                let date = today - Duration::days((days - i) as i64);
                let drift = base * trend * i as f64 / days as f64;
                let noise = (rng.gen::<f64>() - 0.5) * volatility;
                PricePoint { date, close: base + drift + noise }
            })
            .collect();

        Self { ticker: ticker.to_string(), period, points }
    }

    pub fn min_close(&self) -> f64 {
        self.points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min)
    }

    pub fn max_close(&self) -> f64 {
        self.points.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Key statistics for the detail screen, generated in the same numeric
/// ranges the mock backend used.
#[derive(Debug, Clone)]
pub struct StockStats {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub market_cap: String,
    pub pe_ratio: f64,
    pub volume: String,
    pub avg_volume: String,
    pub day_range: String,
    pub year_range: String,
}

impl StockStats {
    pub fn generate<R: Rng>(ticker: &str, rng: &mut R) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: company_name(ticker),
            price: rng.gen::<f64>() * 200.0 + 50.0,
            change: rng.gen::<f64>() * 10.0 - 5.0,
            percent_change: rng.gen::<f64>() * 5.0 - 2.5,
            market_cap: format!("${:.2}B", rng.gen::<f64>() * 1000.0 + 50.0),
            pe_ratio: rng.gen::<f64>() * 30.0 + 10.0,
            volume: format!("{:.1}M", rng.gen::<f64>() * 10.0 + 1.0),
            avg_volume: format!("{:.1}M", rng.gen::<f64>() * 15.0 + 5.0),
            day_range: format!(
                "${:.2} - ${:.2}",
                rng.gen::<f64>() * 160.0 + 40.0,
                rng.gen::<f64>() * 40.0 + 200.0
            ),
            year_range: format!(
                "${:.2} - ${:.2}",
                rng.gen::<f64>() * 100.0 + 40.0,
                rng.gen::<f64>() * 100.0 + 140.0
            ),
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Coin-flip sentiment for the "AI analysis" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Bullish,
    Bearish,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
        }
    }
}

pub fn analysis_signal<R: Rng>(rng: &mut R) -> Signal {
    if rng.gen::<f64>() > 0.5 {
        Signal::Bullish
    } else {
        Signal::Bearish
    }
}

#[derive(Debug, Clone)]
pub struct IndexQuote {
    pub name: &'static str,
    pub percent_change: f64,
}

pub fn market_snapshot<R: Rng>(rng: &mut R) -> Vec<IndexQuote> {
    ["S&P 500", "NASDAQ", "DOW"]
        .into_iter()
        .map(|name| IndexQuote { name, percent_change: rng.gen_range(-1.5..1.5) })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Mover {
    pub ticker: &'static str,
    pub percent_change: f64,
}

/// Top gainers and losers for the market-overview tab.
pub fn top_movers<R: Rng>(rng: &mut R) -> (Vec<Mover>, Vec<Mover>) {
    let mut gainers: Vec<Mover> = ["NVDA", "AMD", "PYPL"]
        .into_iter()
        .map(|ticker| Mover { ticker, percent_change: rng.gen_range(0.5..5.0) })
        .collect();
    let mut losers: Vec<Mover> = ["META", "JPM", "DIS"]
        .into_iter()
        .map(|ticker| Mover { ticker, percent_change: -rng.gen_range(0.5..5.0) })
        .collect();
    gainers.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));
    losers.sort_by(|a, b| a.percent_change.total_cmp(&b.percent_change));
    (gainers, losers)
}

#[derive(Debug, Clone)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
}

/// Placeholder articles until a news feed exists.
pub fn news_items(name: &str, ticker: &str) -> Vec<NewsItem> {
    (0..3)
        .map(|_| NewsItem {
            headline: format!("News headline about {name} and market updates"),
            summary: format!(
                "Brief summary of news article with relevant information for investors \
                 considering positions in {ticker}..."
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn series_length_follows_period() {
        let mut rng = StdRng::seed_from_u64(7);
        for period in Period::ALL {
            let series = PriceSeries::generate("AAPL", period, &mut rng);
            assert_eq!(series.points.len(), period.days());
        }
    }

    #[test]
    fn series_dates_ascend_and_end_yesterday_or_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = PriceSeries::generate("MSFT", Period::OneMonth, &mut rng);
        let today = Local::now().date_naive();
        for pair in series.points.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        // Tolerate a date flip between generation and assertion
        let last = series.points.last().unwrap().date;
        assert!(last == today - Duration::days(1) || last == today - Duration::days(2));
    }

    #[test]
    fn series_closes_stay_positive_and_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let series = PriceSeries::generate("TSLA", Period::OneYear, &mut rng);
        assert!(series.min_close() > 100.0);
        // base <= 200, drift <= 5%, noise <= 1.0
        assert!(series.max_close() < 212.0);
    }

    #[test]
    fn stats_fall_in_generator_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let stats = StockStats::generate("AAPL", &mut rng);
        assert_eq!(stats.name, "Apple Inc.");
        assert!((50.0..250.0).contains(&stats.price));
        assert!((-5.0..5.0).contains(&stats.change));
        assert!((-2.5..2.5).contains(&stats.percent_change));
        assert!((10.0..40.0).contains(&stats.pe_ratio));
        assert!(stats.market_cap.starts_with('$') && stats.market_cap.ends_with('B'));
        assert!(stats.volume.ends_with('M'));
    }

    #[test]
    fn unknown_ticker_gets_fallback_name() {
        assert_eq!(company_name("ZZZZ"), "ZZZZ Inc.");
    }

    #[test]
    fn movers_have_expected_signs_and_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let (gainers, losers) = top_movers(&mut rng);
        assert_eq!(gainers.len(), 3);
        assert_eq!(losers.len(), 3);
        assert!(gainers.iter().all(|m| m.percent_change > 0.0));
        assert!(losers.iter().all(|m| m.percent_change < 0.0));
        assert!(gainers[0].percent_change >= gainers[2].percent_change);
        assert!(losers[0].percent_change <= losers[2].percent_change);
    }

    #[test]
    fn period_cycle_wraps() {
        assert_eq!(Period::OneYear.next(), Period::OneMonth);
        assert_eq!(Period::OneMonth.next(), Period::ThreeMonths);
    }
}
