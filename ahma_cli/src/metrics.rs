use ahma_core::{sanitize, AhmaSeries};
use serde::Serialize;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossDirection {
    /// Price moved above the AHMA line
    Bullish,
    /// Price moved below the AHMA line
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crossover {
    pub index: usize,
    pub direction: CrossDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub latest_price: Option<Point>,
    pub latest_hma: Option<Point>,
    pub latest_ahma: Option<Point>,
    pub slope: Option<f64>,
    pub spread_pct: Option<f64>,
    pub last_crossover: Option<Crossover>,
}

fn present_points(series: &[Option<f64>]) -> impl DoubleEndedIterator<Item = Point> + '_ {
    series
        .iter()
        .enumerate()
        .filter_map(|(index, v)| v.map(|value| Point { index, value }))
}

/// `(index, price, ahma)` at every index where both are available
fn price_gaps<'a>(
    prices: &'a [Option<f64>],
    ahma: &'a [Option<f64>],
) -> impl DoubleEndedIterator<Item = (usize, f64, f64)> + 'a {
    prices
        .iter()
        .zip(ahma)
        .enumerate()
        .filter_map(|(i, (p, a))| Some((i, (*p)?, (*a)?)))
}

fn last_crossover(prices: &[Option<f64>], ahma: &[Option<f64>]) -> Option<Crossover> {
    let mut side: Option<CrossDirection> = None;
    let mut last = None;

    for (index, price, line) in price_gaps(prices, ahma) {
        let current = if price > line {
            CrossDirection::Bullish
        } else if price < line {
            CrossDirection::Bearish
        } else {
            continue;
        };
        if side.is_some_and(|s| s != current) {
            last = Some(Crossover {
                index,
                direction: current,
            });
        }
        side = Some(current);
    }

    last
}

/// Derive the display metrics for a computed series
pub fn summarize(prices: &[f64], series: &AhmaSeries) -> Summary {
    let prices = sanitize(prices);

    let mut ahma_points = present_points(&series.ahma).rev();
    let latest_ahma = ahma_points.next();
    let slope = latest_ahma
        .zip(ahma_points.next())
        .map(|(last, prev)| last.value - prev.value);

    let spread_pct = price_gaps(&prices, &series.ahma)
        .next_back()
        .filter(|(_, _, line)| *line != 0.0)
        .map(|(_, price, line)| (price - line) / line * 100.0);

    let summary = Summary {
        latest_price: present_points(&prices).next_back(),
        latest_hma: present_points(&series.hma).next_back(),
        latest_ahma,
        slope,
        spread_pct,
        last_crossover: last_crossover(&prices, &series.ahma),
    };
    summary
}
