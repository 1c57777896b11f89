use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

use crate::numbers::NumberRange;

pub const DEFAULT_DB_PATH: &str = "data/lottery.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub number_range: NumberRange,
}

/// Reads the service configuration from the environment. A `.env` file in the
/// working directory is loaded first when present.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    let database_url =
        env::var("LOTTERY_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let bind_addr = env::var("LOTTERY_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .context("LOTTERY_BIND_ADDR is not a valid socket address")?;

    let min = read_number("LOTTERY_MIN_NUMBER", NumberRange::default().min())?;
    let max = read_number("LOTTERY_MAX_NUMBER", NumberRange::default().max())?;
    let number_range = validate_range(min, max)?;

    Ok(Config {
        database_url,
        bind_addr,
        number_range,
    })
}

pub fn server_url() -> String {
    dotenvy::dotenv().ok();
    env::var("LOTTERY_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
}

fn read_number(key: &str, default: u32) -> Result<u32> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .with_context(|| format!("{key} must be a non-negative integer, got {value:?}")),
        Err(_) => Ok(default),
    }
}

pub fn validate_range(min: u32, max: u32) -> Result<NumberRange> {
    NumberRange::new(min, max).context("invalid LOTTERY_MIN_NUMBER / LOTTERY_MAX_NUMBER")
}
