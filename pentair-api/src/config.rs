//! Runtime configuration for the bridge. Deserialized from a TOML
//! table; every field but the pin assignments has a default matching
//! the field's documented value.

use serde_derive::Deserialize;

fn default_baud_rate() -> u32 {
    9600
}

fn default_poll_interval_ms() -> u64 {
    30_000
}

fn default_tick_ms() -> u64 {
    100
}

fn default_to_bus_capacity() -> usize {
    6
}

fn default_to_integration_capacity() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// GPIO receiving bytes from the RS-485 transceiver.
    pub rx_pin: u32,

    /// GPIO sending bytes to the RS-485 transceiver.
    pub tx_pin: u32,

    /// GPIO that asserts the transceiver's driver-enable line.
    pub direction_pin: u32,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_to_bus_capacity")]
    pub to_bus_capacity: usize,

    #[serde(default = "default_to_integration_capacity")]
    pub to_integration_capacity: usize,
}

impl Config {
    pub fn from_toml_str(text: &str) -> crate::error::Result<Self> {
        toml::from_str(text)
            .map_err(|e| crate::error::Error::ConfigError(format!("{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn fills_in_defaults() {
        let cfg = Config::from_toml_str(
            "rx_pin = 16\ntx_pin = 17\ndirection_pin = 4\n",
        )
        .unwrap();

        assert_eq!(cfg.rx_pin, 16);
        assert_eq!(cfg.baud_rate, 9600);
        assert_eq!(cfg.poll_interval_ms, 30_000);
        assert_eq!(cfg.tick_ms, 100);
        assert_eq!(cfg.to_bus_capacity, 6);
        assert_eq!(cfg.to_integration_capacity, 10);
    }

    #[test]
    fn rejects_missing_required_pin() {
        assert!(Config::from_toml_str("rx_pin = 16\ntx_pin = 17\n").is_err());
    }

    #[test]
    fn honors_explicit_overrides() {
        let cfg = Config::from_toml_str(
            "rx_pin = 1\ntx_pin = 2\ndirection_pin = 3\nbaud_rate = 19200\ntick_ms = 50\n",
        )
        .unwrap();

        assert_eq!(cfg.baud_rate, 19200);
        assert_eq!(cfg.tick_ms, 50);
    }
}
