use std::env;

use chrono::NaiveTime;
use dotenvy::dotenv;

use crate::engine::shift::DefaultShift;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    /// Fallback shift when an employee has neither history nor own timings.
    pub default_shift_start: NaiveTime,
    pub default_shift_end: NaiveTime,

    // Rate limiting
    pub rate_ingest_per_min: u32,
    pub rate_report_per_min: u32,
    pub rate_admin_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            default_shift_start: shift_time("DEFAULT_SHIFT_START", "10:00"),
            default_shift_end: shift_time("DEFAULT_SHIFT_END", "19:00"),

            rate_ingest_per_min: env::var("RATE_INGEST_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_report_per_min: env::var("RATE_REPORT_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_admin_per_min: env::var("RATE_ADMIN_PER_MIN")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap(),
        }
    }

    pub fn default_shift(&self) -> DefaultShift {
        DefaultShift { start: self.default_shift_start, end: self.default_shift_end }
    }
}

fn shift_time(key: &str, default: &str) -> NaiveTime {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .unwrap_or_else(|_| panic!("{key} must be HH:MM, got {raw}"))
}
