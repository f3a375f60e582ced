use serde::{Deserialize, Serialize};

/// Identity snapshot for a dashboard user as reported by the cluster's
/// directory service. Fetched fresh per request, never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGroupInfo {
    #[serde(default)]
    pub username: String,
    /// Display name, may be empty.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: Option<u32>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub gids: Vec<u32>,
    /// The first-listed Unix group; basis for quota matching.
    #[serde(default, alias = "leading_group_name")]
    pub leading_group: Option<String>,
    #[serde(default, alias = "quotas")]
    pub quota_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_vendor_json() {
        let raw = serde_json::json!({
            "username": "rwalsh",
            "name": "R. Walsh",
            "uid": 20313,
            "groups": ["research", "storage-admins"],
            "gids": [5001, 5002],
            "leading_group_name": "research",
            "vippool_permissions": "ignored"
        });

        let user: UserGroupInfo = serde_json::from_value(raw).unwrap();
        assert_eq!(user.username, "rwalsh");
        assert_eq!(user.groups.len(), 2);
        assert_eq!(user.leading_group.as_deref(), Some("research"));
        assert!(user.quota_ids.is_empty());
    }
}
