// src/settings/mod.rs
pub mod io;

use chrono::FixedOffset;
use std::path::PathBuf;
use tracing::warn;

use crate::sheets::auth::Scope;
use crate::sheets::range::DEFAULT_SHEET_TITLE;
use crate::sheets::timestamp::{DisplayZone, TimeNormalizer};
use io::SearchRoots;

pub const DEFAULT_TZ_FIX_MINUTES: i64 = 180;
/// Corrections beyond one day are treated as misconfiguration.
pub const MAX_TZ_FIX_MINUTES: i64 = 24 * 60;

/// Process-wide configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub sheet_gid: Option<i64>,
    pub tz_fix_minutes: i64,
    pub tz_fix_enabled: bool,
    pub read_only: bool,
    /// Zone for naive timestamps and `HH:MM` display; `Local` follows the
    /// machine's rules for each timestamp, DST included.
    pub display_zone: DisplayZone,
    pub roots: SearchRoots,
    /// The `.env.local` that was loaded, if any.
    pub env_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env(roots: SearchRoots, env_file: Option<PathBuf>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), roots, env_file)
    }

    pub fn from_lookup<F>(lookup: F, roots: SearchRoots, env_file: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sheet_gid = get("GOOGLE_SHEET_GID").and_then(|raw| match raw.parse::<i64>() {
            Ok(gid) => Some(gid),
            Err(_) => {
                warn!("GOOGLE_SHEET_GID '{}' is not numeric, ignoring", raw);
                None
            }
        });

        let tz_fix_minutes = get("GOOGLE_SHEET_TZ_FIX_MINUTES")
            .and_then(|raw| parse_or_warn::<i64>("GOOGLE_SHEET_TZ_FIX_MINUTES", &raw))
            .filter(|minutes| {
                let in_range = (-MAX_TZ_FIX_MINUTES..=MAX_TZ_FIX_MINUTES).contains(minutes);
                if !in_range {
                    warn!(
                        "GOOGLE_SHEET_TZ_FIX_MINUTES {} is outside ±{}, using default",
                        minutes, MAX_TZ_FIX_MINUTES
                    );
                }
                in_range
            })
            .unwrap_or(DEFAULT_TZ_FIX_MINUTES);

        let display_zone = get("BTMONITOR_DISPLAY_UTC_OFFSET_MINUTES")
            .and_then(|raw| parse_or_warn::<i32>("BTMONITOR_DISPLAY_UTC_OFFSET_MINUTES", &raw))
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .map_or(DisplayZone::Local, DisplayZone::Fixed);

        Self {
            spreadsheet_id: get("GOOGLE_SHEET_ID"),
            range: get("GOOGLE_SHEET_RANGE").unwrap_or_else(|| format!("{}!A2:H", DEFAULT_SHEET_TITLE)),
            sheet_gid,
            tz_fix_minutes,
            tz_fix_enabled: get("BTMONITOR_TZ_FIX").map_or(true, |v| parse_flag(&v)),
            read_only: get("BTMONITOR_READ_ONLY").map_or(false, |v| parse_flag(&v)),
            display_zone,
            roots,
            env_file,
        }
    }

    pub fn scope(&self) -> Scope {
        if self.read_only {
            Scope::ReadOnly
        } else {
            Scope::ReadWrite
        }
    }

    pub fn time_normalizer(&self) -> TimeNormalizer {
        let fix = self.tz_fix_enabled.then_some(self.tz_fix_minutes);
        TimeNormalizer::new(fix, self.display_zone)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        warn!("{} '{}' is not a valid number, using default", key, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned(), SearchRoots::default(), None)
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.spreadsheet_id, None);
        assert_eq!(cfg.range, "Página2!A2:H");
        assert_eq!(cfg.sheet_gid, None);
        assert_eq!(cfg.tz_fix_minutes, 180);
        assert!(cfg.tz_fix_enabled);
        assert!(!cfg.read_only);
        assert_eq!(cfg.scope(), Scope::ReadWrite);
        assert_eq!(cfg.display_zone, DisplayZone::Local);
    }

    #[test]
    fn test_explicit_values() {
        let cfg = config(&[
            ("GOOGLE_SHEET_ID", " abc123 "),
            ("GOOGLE_SHEET_RANGE", "Orders!A2:H"),
            ("GOOGLE_SHEET_GID", "42"),
            ("GOOGLE_SHEET_TZ_FIX_MINUTES", "-60"),
            ("BTMONITOR_TZ_FIX", "off"),
            ("BTMONITOR_READ_ONLY", "true"),
            ("BTMONITOR_DISPLAY_UTC_OFFSET_MINUTES", "-180"),
        ]);
        assert_eq!(cfg.spreadsheet_id.as_deref(), Some("abc123"));
        assert_eq!(cfg.range, "Orders!A2:H");
        assert_eq!(cfg.sheet_gid, Some(42));
        assert_eq!(cfg.tz_fix_minutes, -60);
        assert!(!cfg.tz_fix_enabled);
        assert_eq!(cfg.scope(), Scope::ReadOnly);
        assert_eq!(cfg.display_zone, DisplayZone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap()));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let cfg = config(&[
            ("GOOGLE_SHEET_ID", "   "),
            ("GOOGLE_SHEET_RANGE", ""),
            ("GOOGLE_SHEET_GID", "abc"),
            ("GOOGLE_SHEET_TZ_FIX_MINUTES", "three hours"),
        ]);
        assert_eq!(cfg.spreadsheet_id, None);
        assert_eq!(cfg.range, "Página2!A2:H");
        assert_eq!(cfg.sheet_gid, None);
        assert_eq!(cfg.tz_fix_minutes, DEFAULT_TZ_FIX_MINUTES);
    }

    #[test]
    fn test_out_of_range_fix_falls_back() {
        for raw in ["1441", "-1441", "9223372036854775807", "-9223372036854775808"] {
            let cfg = config(&[("GOOGLE_SHEET_TZ_FIX_MINUTES", raw)]);
            assert_eq!(cfg.tz_fix_minutes, DEFAULT_TZ_FIX_MINUTES, "raw {:?}", raw);
        }
        let cfg = config(&[("GOOGLE_SHEET_TZ_FIX_MINUTES", "-1440")]);
        assert_eq!(cfg.tz_fix_minutes, -1440);
    }

    #[test]
    fn test_invalid_display_offset_follows_local_zone() {
        for raw in ["abc", "100000", "2147483647"] {
            let cfg = config(&[("BTMONITOR_DISPLAY_UTC_OFFSET_MINUTES", raw)]);
            assert_eq!(cfg.display_zone, DisplayZone::Local, "raw {:?}", raw);
        }
    }
}
