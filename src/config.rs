use serde::{Deserialize, Serialize};

use crate::{Heuristic, Result, SolverError};

/// Expansions allowed before a search gives up.
pub const DEFAULT_NODE_LIMIT: usize = 50_000;

/// How a single search is run.
///
/// Missing fields take their defaults when deserialised, so `{}` is the
/// default configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    pub node_limit: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            heuristic: Heuristic::default(),
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }
}

impl SolverConfig {
    pub fn new(heuristic: Heuristic, node_limit: usize) -> Result<SolverConfig> {
        SolverConfig {
            heuristic,
            node_limit,
        }
        .validate()
    }

    /// Like [`SolverConfig::new`], with the heuristic given by name.
    pub fn named(heuristic: &str, node_limit: usize) -> Result<SolverConfig> {
        SolverConfig::new(heuristic.parse()?, node_limit)
    }

    pub fn from_json(json: &str) -> Result<SolverConfig> {
        let config: SolverConfig = serde_json::from_str(json)
            .map_err(|e| SolverError::invalid_configuration(e.to_string()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<SolverConfig> {
        if self.node_limit == 0 {
            return Err(SolverError::invalid_configuration(
                "node limit must be positive",
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.heuristic, Heuristic::Manhattan);
        assert_eq!(config.node_limit, DEFAULT_NODE_LIMIT);
        assert_eq!(SolverConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn parses_json() {
        let config =
            SolverConfig::from_json(r#"{ "heuristic": "misplaced", "node_limit": 100000 }"#)
                .unwrap();
        assert_eq!(config, SolverConfig::new(Heuristic::Misplaced, 100_000).unwrap());

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"heuristic":"misplaced","node_limit":100000}"#);
    }

    #[test]
    fn rejects_bad_configuration() {
        let cases = [
            r#"{ "heuristic": "euclidean" }"#,
            r#"{ "node_limit": 0 }"#,
            r#"{ "node_limit": -3 }"#,
            r#"{ "heuristics": "manhattan" }"#,
            "not json",
        ];

        for json in cases {
            let err = SolverConfig::from_json(json).unwrap_err();
            assert!(
                matches!(err, SolverError::InvalidConfiguration { .. }),
                "{} gave {:?}",
                json,
                err
            );
        }

        assert!(SolverConfig::named("manhattan", 0).is_err());
        assert!(SolverConfig::named("bogus", 10).is_err());
        assert_eq!(
            SolverConfig::named("misplaced", 10).unwrap().heuristic,
            Heuristic::Misplaced
        );
    }
}
