//! Number, byte and time formatting for the dashboard.

use statdash_core::Timestamp;

/// Decimal and digit-grouping separators for the user's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal: char,
    pub group:   char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self { decimal: '.', group: ',' }
    }
}

impl NumberLocale {
    /// Detect from `LC_ALL`, `LC_NUMERIC` then `LANG`, first non-empty wins.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty())
            .map(|tag| Self::from_tag(&tag))
            .unwrap_or_default()
    }

    /// Separators for a POSIX locale tag such as `de_DE.UTF-8` or `fr_CA`.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match lang.as_str() {
            "de" | "nl" | "es" | "it" | "pt" | "da" | "tr" | "id" | "el" => Self { decimal: ',', group: '.' },
            "fr" | "ru" | "pl" | "cs" | "sk" | "sv" | "nb" | "nn" | "no" | "fi" | "uk" | "hu" => {
                Self { decimal: ',', group: '\u{a0}' }
            }
            _ => Self::default(),
        }
    }

    /// `value` with exactly `decimals` fractional digits and grouped thousands.
    pub fn format_fixed(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "–".to_string();
        }

        let raw = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (raw.as_str(), None),
        };

        let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
        // "-0.00" reads oddly; only show the sign for a non-zero result.
        if value.is_sign_negative() && raw.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        if let Some(frac) = frac_part {
            out.push(self.decimal);
            out.push_str(frac);
        }
        out
    }

    /// Integer with grouped thousands.
    pub fn format_count(&self, value: u64) -> String {
        self.group_digits(&value.to_string())
    }

    fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.group);
            }
            out.push(ch);
        }
        out
    }
}

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units and two decimals, e.g. `"1.24 MB"`.
pub fn format_bytes(bytes: f64, locale: &NumberLocale) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }

    let exp = (bytes.log(1024.0).floor().max(0.0) as usize).min(UNITS.len() - 1);
    let value = bytes / 1024_f64.powi(exp as i32);
    format!("{} {}", locale.format_fixed(value, 2), UNITS[exp])
}

/// Bytes-per-second rate, e.g. `"12.50 KB/s"`.
pub fn format_byte_rate(bytes_per_sec: f64, locale: &NumberLocale) -> String {
    format!("{}/s", format_bytes(bytes_per_sec, locale))
}

/// Requests-per-second rate with one decimal, e.g. `"6.0/s"`.
pub fn format_request_rate(per_sec: f64, locale: &NumberLocale) -> String {
    format!("{}/s", locale.format_fixed(per_sec, 1))
}

/// Local wall-clock time as `HH:MM:SS`.
pub fn format_clock(ts: Timestamp) -> String {
    ts.to_local()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// Compact duration: `"3d 4h"`, `"2h 5m"`, `"7m"`.
pub fn format_uptime(secs: u64) -> String {
    let mins  = secs / 60;
    let hours = mins / 60;
    let days  = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins % 60)
    } else {
        format!("{}m", mins.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: NumberLocale = NumberLocale { decimal: '.', group: ',' };
    const DE: NumberLocale = NumberLocale { decimal: ',', group: '.' };

    #[test]
    fn bytes_zero() {
        assert_eq!(format_bytes(0.0, &EN), "0 B");
        assert_eq!(format_bytes(-3.0, &EN), "0 B");
        assert_eq!(format_bytes(f64::NAN, &EN), "0 B");
    }

    #[test]
    fn bytes_units() {
        assert_eq!(format_bytes(512.0, &EN), "512.00 B");
        assert_eq!(format_bytes(1024.0, &EN), "1.00 KB");
        assert_eq!(format_bytes(1536.0, &EN), "1.50 KB");
        assert_eq!(format_bytes(5.0 * 1024.0 * 1024.0, &EN), "5.00 MB");
        assert_eq!(format_bytes(3.0 * 1024_f64.powi(3), &EN), "3.00 GB");
    }

    #[test]
    fn bytes_beyond_terabytes_stay_in_tb() {
        assert_eq!(format_bytes(2048.0 * 1024_f64.powi(4), &EN), "2,048.00 TB");
    }

    #[test]
    fn fractional_bytes_stay_in_b() {
        assert_eq!(format_bytes(0.4, &EN), "0.40 B");
    }

    #[test]
    fn german_separators() {
        assert_eq!(format_bytes(1536.0, &DE), "1,50 KB");
        assert_eq!(format_bytes(1000.0, &DE), "1.000,00 B");
        assert_eq!(DE.format_count(1_234_567), "1.234.567");
    }

    #[test]
    fn rates() {
        assert_eq!(format_request_rate(6.0, &EN), "6.0/s");
        assert_eq!(format_byte_rate(2048.0, &EN), "2.00 KB/s");
    }

    #[test]
    fn fixed_handles_sign_and_rounding() {
        assert_eq!(EN.format_fixed(-1234.5, 1), "-1,234.5");
        assert_eq!(EN.format_fixed(-0.001, 2), "0.00");
        assert_eq!(EN.format_fixed(999.999, 2), "1,000.00");
        assert_eq!(EN.format_fixed(42.0, 0), "42");
    }

    #[test]
    fn locale_tags() {
        assert_eq!(NumberLocale::from_tag("de_DE.UTF-8"), DE);
        assert_eq!(NumberLocale::from_tag("en_US.UTF-8"), EN);
        assert_eq!(NumberLocale::from_tag("C"), EN);
        assert_eq!(NumberLocale::from_tag("fr_FR").decimal, ',');
        assert_eq!(NumberLocale::from_tag("pt-BR").group, '.');
    }

    #[test]
    fn counts() {
        assert_eq!(EN.format_count(0), "0");
        assert_eq!(EN.format_count(999), "999");
        assert_eq!(EN.format_count(1000), "1,000");
    }

    #[test]
    fn clock_shape() {
        let s = format_clock(Timestamp::from_millis(1_700_000_000_000));
        assert_eq!(s.len(), 8);
        assert_eq!(s.as_bytes()[2], b':');
        assert_eq!(s.as_bytes()[5], b':');
    }

    #[test]
    fn uptime() {
        assert_eq!(format_uptime(0), "1m");
        assert_eq!(format_uptime(3 * 60), "3m");
        assert_eq!(format_uptime(2 * 3600 + 5 * 60), "2h 5m");
        assert_eq!(format_uptime(3 * 86_400 + 4 * 3600), "3d 4h");
    }
}
