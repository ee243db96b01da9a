//! Unit conversion and display formatting.
//!
//! Part dimensions are always millimeters; all area and length math in the
//! engine is done in meters.

/// Millimeters per meter.
pub const MM_PER_M: f64 = 1000.0;

/// Convert millimeters to meters.
#[inline]
pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// Convert meters to millimeters.
#[inline]
pub fn m_to_mm(m: f64) -> f64 {
    m * MM_PER_M
}

/// Area in m² of a rectangle given in mm.
#[inline]
pub fn area_m2(width_mm: f64, height_mm: f64) -> f64 {
    mm_to_m(width_mm) * mm_to_m(height_mm)
}

/// Perimeter in m of a rectangle given in mm.
#[inline]
pub fn perimeter_m(width_mm: f64, height_mm: f64) -> f64 {
    2.0 * (width_mm + height_mm) / MM_PER_M
}

/// Currency display style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Place the symbol after the amount ("12,00 €") instead of before ("€12.00").
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::eur_de()
    }
}

impl CurrencyFormat {
    /// German euro formatting: `1.234,56 €`.
    pub fn eur_de() -> Self {
        Self {
            symbol: "€".to_string(),
            decimal_separator: ',',
            group_separator: '.',
            symbol_after: true,
        }
    }

    /// English style with a leading symbol: `€1,234.56`.
    pub fn prefixed(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            decimal_separator: '.',
            group_separator: ',',
            symbol_after: false,
        }
    }

    /// Format an amount with two decimals.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{} {}", amount, self.symbol);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
        let number = format!(
            "{}{}{}{}",
            sign,
            group_digits(whole, self.group_separator),
            self.decimal_separator,
            frac
        );

        if self.symbol_after {
            format!("{} {}", number, self.symbol)
        } else {
            format!("{}{}", self.symbol, number)
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Format an amount in the default currency style.
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}

/// Format an area in m² with three decimals.
pub fn format_area(area_m2: f64) -> String {
    format!("{:.3} m²", area_m2)
}

/// Format a 0..1 ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    #[test]
    fn test_mm_m_conversion() {
        assert!(approx_eq(mm_to_m(2800.0), 2.8));
        assert!(approx_eq(m_to_mm(2.07), 2070.0));
        assert!(approx_eq(area_m2(1000.0, 500.0), 0.5));
        assert!(approx_eq(perimeter_m(1000.0, 500.0), 3.0));
    }

    #[test]
    fn test_format_currency_de() {
        insta::assert_snapshot!(format_currency(22.0), @"22,00 €");
        insta::assert_snapshot!(format_currency(1234.567), @"1.234,57 €");
        insta::assert_snapshot!(format_currency(1234567.0), @"1.234.567,00 €");
        insta::assert_snapshot!(format_currency(-5.5), @"-5,50 €");
    }

    #[test]
    fn test_format_currency_prefixed() {
        let fmt = CurrencyFormat::prefixed("$");
        assert_eq!(fmt.format(1999.5), "$1,999.50");
        assert_eq!(fmt.format(0.0), "$0.00");
        assert_eq!(fmt.format(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_beyond_u64() {
        insta::assert_snapshot!(format_currency(1e20), @"100.000.000.000.000.000.000,00 €");
        insta::assert_snapshot!(format_currency(-1e20), @"-100.000.000.000.000.000.000,00 €");
    }

    #[test]
    fn test_format_area_and_percent() {
        assert_eq!(format_area(4.9266), "4.927 m²");
        assert_eq!(format_percent(0.8333), "83.3%");
    }
}
