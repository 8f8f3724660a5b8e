use chrono::NaiveDateTime;

/// Storage format for appointment timestamps, e.g. `2025-03-01 09:30:00`.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_ts(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TS_FORMAT)
        .map_err(|_| anyhow::anyhow!("Invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", s))
}

pub fn format_ts(dt: NaiveDateTime) -> String {
    dt.format(TS_FORMAT).to_string()
}
