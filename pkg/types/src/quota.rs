use serde::{Deserialize, Deserializer, Serialize};

/// Storage quota object as returned by the cluster API.
///
/// A read-only snapshot: the dashboard never creates or mutates quotas, it
/// re-fetches them on every page view. Field aliases match the vendor's wire
/// names (`used_effective_capacity` etc.); everything the vendor adds beyond
/// these fields is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quota {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub state: QuotaState,
    #[serde(default)]
    pub hard_limit: Option<u64>,
    #[serde(default)]
    pub soft_limit: Option<u64>,
    #[serde(default, alias = "used_effective_capacity")]
    pub used_effective: u64,
    #[serde(default, alias = "used_logical_capacity")]
    pub used_logical: u64,
    #[serde(default)]
    pub hard_limit_inodes: Option<u64>,
    #[serde(default)]
    pub soft_limit_inodes: Option<u64>,
    /// Seconds a soft-limit overrun is tolerated before it hardens.
    #[serde(default)]
    pub grace_period: Option<u64>,
}

/// Lifecycle state of a quota on the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuotaState {
    Created,
    Active,
    Deleted,
    /// Anything the vendor adds that we don't know about yet.
    #[default]
    Unknown,
}

impl QuotaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaState::Created => "Created",
            QuotaState::Active => "Active",
            QuotaState::Deleted => "Deleted",
            QuotaState::Unknown => "Unknown",
        }
    }
}

// The cluster is inconsistent about casing ("ACTIVE" vs "Active"), so state
// parsing is case-insensitive.
impl<'de> Deserialize<'de> for QuotaState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "created" => QuotaState::Created,
            "active" => QuotaState::Active,
            "deleted" => QuotaState::Deleted,
            _ => QuotaState::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_from_vendor_json() {
        let raw = serde_json::json!({
            "name": "research-lab",
            "path": "/projects/research",
            "guid": "b2f1c9e4-0000-4000-8000-7d1a22c0ffee",
            "state": "ACTIVE",
            "hard_limit": 1099511627776u64,
            "soft_limit": 879609302220u64,
            "used_effective_capacity": 549755813888u64,
            "used_logical_capacity": 1649267441664u64,
            "grace_period": 604800,
            "cluster": "ignored-extra-field"
        });

        let quota: Quota = serde_json::from_value(raw).unwrap();
        assert_eq!(quota.name, "research-lab");
        assert_eq!(quota.state, QuotaState::Active);
        assert_eq!(quota.used_effective, 549755813888);
        assert_eq!(quota.used_logical, 1649267441664);
        assert_eq!(quota.grace_period, Some(604800));
    }

    #[test]
    fn test_quota_state_unknown_casing_and_values() {
        let q: Quota =
            serde_json::from_value(serde_json::json!({"name": "a", "path": "/a", "state": "Deleted"}))
                .unwrap();
        assert_eq!(q.state, QuotaState::Deleted);

        let q: Quota = serde_json::from_value(
            serde_json::json!({"name": "a", "path": "/a", "state": "PENDING_DELETE"}),
        )
        .unwrap();
        assert_eq!(q.state, QuotaState::Unknown);
    }

    #[test]
    fn test_quota_missing_limits_default_to_none() {
        let q: Quota =
            serde_json::from_value(serde_json::json!({"name": "a", "path": "/a"})).unwrap();
        assert_eq!(q.hard_limit, None);
        assert_eq!(q.soft_limit, None);
        assert_eq!(q.used_effective, 0);
        assert_eq!(q.state, QuotaState::Unknown);
    }
}
