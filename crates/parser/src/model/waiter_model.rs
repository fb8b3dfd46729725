//! Waiter model document (`waiters-2.json`) type definitions

use indexmap::IndexMap;
use sdk_stubs_builder_common::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// Waiters of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterModel {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub waiters: IndexMap<String, WaiterConfig>,
}

/// Polling configuration of one waiter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterConfig {
    pub operation: String,

    /// Seconds between attempts
    pub delay: u32,

    pub max_attempts: u32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub acceptors: Vec<serde_json::Value>,
}

impl WaiterModel {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse waiter model JSON: {}", e)))
    }

    pub fn get_waiter(&self, name: &str) -> Option<&WaiterConfig> {
        self.waiters.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waiter_model() {
        let json = r#"{
            "version": 2,
            "waiters": {
                "QueueExists": {
                    "delay": 5,
                    "operation": "GetQueueUrl",
                    "maxAttempts": 40,
                    "acceptors": [
                        { "expected": 200, "matcher": "status", "state": "success" }
                    ]
                }
            }
        }"#;

        let model = WaiterModel::from_json(json).unwrap();
        let waiter = model.get_waiter("QueueExists").unwrap();
        assert_eq!(waiter.operation, "GetQueueUrl");
        assert_eq!(waiter.delay, 5);
        assert_eq!(waiter.max_attempts, 40);
        assert_eq!(waiter.acceptors.len(), 1);
        assert!(model.get_waiter("Missing").is_none());
    }
}
