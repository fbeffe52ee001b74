use serde::Deserialize;

use super::domain::Domain;

/// Typed, read-only view of a parsed protocol description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Protocol {
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// The `version` block. Numbers are kept as the strings written in the
/// source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub minor: Option<String>,
}

impl Protocol {
    /// Finds a domain by name.
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.domain == name)
    }

    /// Summary counts over all domains.
    pub fn stats(&self) -> ProtocolStats {
        self.domains.iter().fold(
            ProtocolStats {
                domains: self.domains.len(),
                ..ProtocolStats::default()
            },
            |mut acc, d| {
                acc.types += d.types.len();
                acc.commands += d.commands.len();
                acc.events += d.events.len();
                acc
            },
        )
    }
}

/// Declaration counts for a protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtocolStats {
    pub domains: usize,
    pub types: usize,
    pub commands: usize,
    pub events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Protocol {
        serde_json::from_value(json!({
            "version": {"major": "1", "minor": "3"},
            "domains": [
                {
                    "domain": "Runtime",
                    "types": [{"id": "RemoteObject", "type": "object"}],
                    "commands": [{"name": "evaluate"}, {"name": "enable"}],
                    "events": [{"name": "consoleAPICalled"}]
                },
                {
                    "domain": "Debugger",
                    "commands": [{"name": "pause"}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn version_keeps_strings() {
        let p = sample();
        assert_eq!(p.version.major.as_deref(), Some("1"));
        assert_eq!(p.version.minor.as_deref(), Some("3"));
    }

    #[test]
    fn stats_sum_over_domains() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            ProtocolStats {
                domains: 2,
                types: 1,
                commands: 3,
                events: 1,
            }
        );
    }

    #[test]
    fn domain_lookup() {
        let p = sample();
        assert!(p.domain("Debugger").is_some());
        assert!(p.domain("Network").is_none());
    }

    #[test]
    fn empty_document_defaults() {
        let p: Protocol = serde_json::from_value(json!({"version": {}, "domains": []})).unwrap();
        assert_eq!(p.stats(), ProtocolStats::default());
        assert!(p.version.major.is_none());
    }
}
