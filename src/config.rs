use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Process settings read from the environment (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub chain_file: PathBuf,
    pub dump_file: PathBuf,
    pub save_interval: Duration,
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            chain_file: PathBuf::from("blockchain.json"),
            dump_file: PathBuf::from("transaction_dump.json"),
            save_interval: Duration::from_secs(3600),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            host: lookup("HOST").unwrap_or(d.host),
            port: parse_or(lookup("PORT"), d.port),
            chain_file: lookup("LEDGER_CHAIN_FILE")
                .map(PathBuf::from)
                .unwrap_or(d.chain_file),
            dump_file: lookup("LEDGER_DUMP_FILE")
                .map(PathBuf::from)
                .unwrap_or(d.dump_file),
            save_interval: parsed("LEDGER_SAVE_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.save_interval),
            shutdown_timeout: parsed("LEDGER_SHUTDOWN_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.shutdown_timeout),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.chain_file.to_str(), Some("blockchain.json"));
        assert_eq!(cfg.save_interval, Duration::from_secs(3600));
        assert_eq!(cfg.shutdown_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let cfg = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("LEDGER_CHAIN_FILE", "/tmp/chain.json"),
            ("LEDGER_SAVE_INTERVAL_SECS", "soon"),
            ("LEDGER_SHUTDOWN_TIMEOUT_SECS", " 3 "),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.chain_file.to_str(), Some("/tmp/chain.json"));
        assert_eq!(cfg.save_interval, Duration::from_secs(3600));
        assert_eq!(cfg.shutdown_timeout, Duration::from_secs(3));
    }
}
