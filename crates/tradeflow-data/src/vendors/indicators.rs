//! Technical indicator math shared by the vendor adapters
//!
//! Both price vendors expose `get_indicators` over the same close-series
//! math; only the price source differs.

use crate::error::{DataError, Result};
use ta::Next;
use ta::indicators::{
    BollingerBands, ExponentialMovingAverage, RelativeStrengthIndex, SimpleMovingAverage,
};

/// Extra history fetched before the indicator window so moving averages
/// have settled by the first emitted value
pub(crate) const INDICATOR_WARMUP_DAYS: u32 = 120;

/// Technical indicators computable from the close series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    Bollinger,
}

/// Parse indicator specs like "rsi", "sma_50", or "close_50_sma": any
/// underscore-separated token may name the indicator, any numeric token
/// sets the period (default 14).
pub(crate) fn parse_indicator(spec: &str) -> Result<(IndicatorKind, usize)> {
    let mut kind = None;
    let mut period = 14usize;
    for token in spec.to_lowercase().split('_') {
        match token {
            "sma" => kind = Some(IndicatorKind::Sma),
            "ema" => kind = Some(IndicatorKind::Ema),
            "rsi" => kind = Some(IndicatorKind::Rsi),
            "macd" => kind = Some(IndicatorKind::Macd),
            "boll" | "bbands" => kind = Some(IndicatorKind::Bollinger),
            other => {
                if let Ok(value) = other.parse::<usize>() {
                    period = value;
                }
            }
        }
    }
    let kind = kind.ok_or_else(|| {
        DataError::InvalidArgument(format!("unsupported indicator '{spec}'"))
    })?;
    if period == 0 {
        return Err(DataError::InvalidArgument(format!(
            "indicator period must be positive in '{spec}'"
        )));
    }
    Ok((kind, period))
}

/// Run one indicator over the close series, one output per input
pub(crate) fn compute_indicator(
    kind: IndicatorKind,
    period: usize,
    closes: &[f64],
) -> Result<Vec<f64>> {
    fn indicator_error(e: impl std::fmt::Display) -> DataError {
        DataError::InvalidArgument(format!("indicator setup failed: {e}"))
    }

    let values = match kind {
        IndicatorKind::Sma => {
            let mut sma = SimpleMovingAverage::new(period).map_err(indicator_error)?;
            closes.iter().map(|&close| sma.next(close)).collect()
        }
        IndicatorKind::Ema => {
            let mut ema = ExponentialMovingAverage::new(period).map_err(indicator_error)?;
            closes.iter().map(|&close| ema.next(close)).collect()
        }
        IndicatorKind::Rsi => {
            let mut rsi = RelativeStrengthIndex::new(period).map_err(indicator_error)?;
            closes.iter().map(|&close| rsi.next(close)).collect()
        }
        IndicatorKind::Macd => {
            // MACD line as the 12/26 EMA difference
            let mut ema12 = ExponentialMovingAverage::new(12).map_err(indicator_error)?;
            let mut ema26 = ExponentialMovingAverage::new(26).map_err(indicator_error)?;
            closes
                .iter()
                .map(|&close| ema12.next(close) - ema26.next(close))
                .collect()
        }
        IndicatorKind::Bollinger => {
            let mut bands = BollingerBands::new(period, 2.0).map_err(indicator_error)?;
            closes
                .iter()
                .map(|&close| bands.next(close).average)
                .collect()
        }
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indicator_specs() {
        assert_eq!(parse_indicator("rsi").unwrap(), (IndicatorKind::Rsi, 14));
        assert_eq!(parse_indicator("sma_50").unwrap(), (IndicatorKind::Sma, 50));
        assert_eq!(
            parse_indicator("close_50_sma").unwrap(),
            (IndicatorKind::Sma, 50)
        );
        assert_eq!(parse_indicator("MACD").unwrap(), (IndicatorKind::Macd, 14));
        assert_eq!(
            parse_indicator("boll_20").unwrap(),
            (IndicatorKind::Bollinger, 20)
        );
        assert!(parse_indicator("vwap").is_err());
        assert!(parse_indicator("sma_0").is_err());
    }

    #[test]
    fn test_compute_sma_settles_on_constant_series() {
        let closes = vec![10.0; 30];
        let values = compute_indicator(IndicatorKind::Sma, 5, &closes).unwrap();
        assert_eq!(values.len(), closes.len());
        assert!((values[29] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_macd_zero_on_constant_series() {
        let closes = vec![42.0; 60];
        let values = compute_indicator(IndicatorKind::Macd, 14, &closes).unwrap();
        assert!(values[59].abs() < 1e-9);
    }

    #[test]
    fn test_compute_rsi_bounded() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i)).collect();
        let values = compute_indicator(IndicatorKind::Rsi, 14, &closes).unwrap();
        assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
    }
}
