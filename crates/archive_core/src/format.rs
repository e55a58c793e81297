//! crates/archive_core/src/format.rs
//!
//! Display tables and formatters shared by the view renderer.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// JMA seismic intensity scale code to its display label.
pub fn format_intensity(scale: i32) -> &'static str {
    match scale {
        i32::MIN..=0 => "-",
        1..=9 => "1未満",
        10..=19 => "1",
        20..=29 => "2",
        30..=39 => "3",
        40..=44 => "4",
        45..=49 => "5弱",
        50..=54 => "5強",
        55..=59 => "6弱",
        60..=69 => "6強",
        _ => "7",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Mid,
    High,
}

impl IntensityLevel {
    pub fn from_scale(scale: i32) -> Self {
        if scale >= 45 {
            IntensityLevel::High
        } else if scale >= 30 {
            IntensityLevel::Mid
        } else {
            IntensityLevel::Low
        }
    }
}

/// WMO weather code to an icon and short description.
pub fn weather_icon(code: i32) -> &'static str {
    match code {
        0 => "☀️ 晴れ",
        1..=3 => "🌤️ 晴れ/曇り",
        4..=48 => "🌫️ 霧",
        49..=67 => "🌧️ 雨",
        68..=77 => "❄️ 雪",
        78..=82 => "🚿 俄か雨",
        83..=99 => "⛈️ 雷雨",
        _ => "☁️ 曇り",
    }
}

pub fn tsunami_label(code: &str) -> String {
    match code {
        "None" => "なし",
        "Unknown" => "不明",
        "Checking" => "調査中",
        "NonEffective" => "若干の海面変動（被害の心配なし）",
        "Watch" => "津波注意報",
        "Warning" => "津波予報（若干の海面変動）",
        other => other,
    }
    .to_string()
}

/// Shortest decimal form, so `21.5` stays `21.5` and `20.0` becomes `20`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{}", celsius)
}

pub fn format_magnitude(magnitude: f64) -> String {
    if magnitude == -1.0 {
        "不明".to_string()
    } else {
        format!("M{:.1}", magnitude)
    }
}

pub fn format_depth(depth: f64) -> String {
    if depth == -1.0 {
        "不明".to_string()
    } else {
        format!("{}km", depth)
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月曜日",
        Weekday::Tue => "火曜日",
        Weekday::Wed => "水曜日",
        Weekday::Thu => "木曜日",
        Weekday::Fri => "金曜日",
        Weekday::Sat => "土曜日",
        Weekday::Sun => "日曜日",
    }
}

/// `2025年3月1日土曜日`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日{}",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date.weekday())
    )
}

/// Header clock text: `2025年3月1日土曜日 09:05:07`.
pub fn format_clock(now: NaiveDateTime) -> String {
    format!(
        "{} {:02}:{:02}:{:02}",
        format_long_date(now.date()),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Article detail date line: `2025年3月1日`.
pub fn format_publish_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

fn parse_feed_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y/%m/%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y/%m/%d %H:%M:%S%.f"))
        .ok()
}

/// `HH:MM` of a feed timestamp; the raw text when it does not parse.
pub fn format_feed_clock(raw: &str) -> String {
    parse_feed_time(raw)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `YYYY/MM/DD HH:MM` of a feed timestamp; the raw text when it does not parse.
pub fn format_feed_datetime(raw: &str) -> String {
    parse_feed_time(raw)
        .map(|t| t.format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_boundaries() {
        assert_eq!(format_intensity(-1), "-");
        assert_eq!(format_intensity(5), "1未満");
        assert_eq!(format_intensity(10), "1");
        assert_eq!(format_intensity(44), "4");
        assert_eq!(format_intensity(45), "5弱");
        assert_eq!(format_intensity(55), "6弱");
        assert_eq!(format_intensity(70), "7");
        assert_eq!(IntensityLevel::from_scale(29), IntensityLevel::Low);
        assert_eq!(IntensityLevel::from_scale(30), IntensityLevel::Mid);
        assert_eq!(IntensityLevel::from_scale(45), IntensityLevel::High);
    }

    #[test]
    fn weather_icon_ranges() {
        assert_eq!(weather_icon(0), "☀️ 晴れ");
        for code in 1..=3 {
            assert_eq!(weather_icon(code), "🌤️ 晴れ/曇り");
        }
        assert_eq!(weather_icon(45), "🌫️ 霧");
        assert_eq!(weather_icon(61), "🌧️ 雨");
        assert_eq!(weather_icon(95), "⛈️ 雷雨");
        assert_eq!(weather_icon(120), "☁️ 曇り");
    }

    #[test]
    fn temperatures_and_quake_values() {
        assert_eq!(format_temperature(21.5), "21.5");
        assert_eq!(format_temperature(20.0), "20");
        assert_eq!(format_magnitude(-1.0), "不明");
        assert_eq!(format_magnitude(7.3), "M7.3");
        assert_eq!(format_depth(10.0), "10km");
        assert_eq!(tsunami_label("Watch"), "津波注意報");
        assert_eq!(tsunami_label("Other"), "Other");
    }

    #[test]
    fn clock_and_feed_times() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(format_clock(now), "2025年3月1日土曜日 09:05:07");
        assert_eq!(format_feed_clock("2024/01/01 16:10:00"), "16:10");
        assert_eq!(format_feed_datetime("2024/01/01 16:10:00"), "2024/01/01 16:10");
        assert_eq!(format_feed_clock("garbled"), "garbled");
    }
}
