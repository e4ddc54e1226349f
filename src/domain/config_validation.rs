//! Configuration validation.
//!
//! Every key is optional. A key that is present must hold a usable value.

use std::net::SocketAddr;

use crate::domain::error::SimError;
use crate::domain::scheduler::MIN_INTERVAL;
use crate::domain::universe::parse_listings;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), SimError> {
    validate_interval(config)?;
    validate_initial_cash(config)?;
    validate_stocks(config)?;
    validate_autostart(config)?;
    Ok(())
}

pub fn validate_web_config(config: &dyn ConfigPort) -> Result<(), SimError> {
    validate_listen(config)
}

fn invalid(section: &str, key: &str, reason: &str) -> SimError {
    SimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a present key as a finite number, reporting it as invalid otherwise.
fn parse_number(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, SimError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(section, key, &format!("{raw:?} is not a number"))),
    }
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(value) = parse_number(config, "simulation", "interval_secs")? {
        if value < MIN_INTERVAL.as_secs_f64() {
            return Err(invalid(
                "simulation",
                "interval_secs",
                "interval_secs must be at least 0.001",
            ));
        }
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(value) = parse_number(config, "simulation", "initial_cash")? {
        if value < 0.0 {
            return Err(invalid(
                "simulation",
                "initial_cash",
                "initial_cash must be non-negative",
            ));
        }
    }
    Ok(())
}

fn validate_stocks(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(raw) = config.get_string("simulation", "stocks") {
        parse_listings(&raw).map_err(|e| invalid("simulation", "stocks", &e.to_string()))?;
    }
    Ok(())
}

fn validate_autostart(config: &dyn ConfigPort) -> Result<(), SimError> {
    if config.has_key("simulation", "autostart") {
        let as_true = config.get_bool("simulation", "autostart", true);
        let as_false = config.get_bool("simulation", "autostart", false);
        if as_true != as_false {
            return Err(invalid(
                "simulation",
                "autostart",
                "autostart must be true/false, yes/no or 1/0",
            ));
        }
    }
    Ok(())
}

fn validate_listen(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(raw) = config.get_string("web", "listen") {
        raw.trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid("web", "listen", &e.to_string()))?;
    }
    Ok(())
}
