use tracing::{info, warn};

use pkg_types::config::Config;
use pkg_types::lookup::Lookup;
use pkg_types::quota::Quota;
use pkg_types::user::UserGroupInfo;

use crate::capacity::reduce_capacity;
use crate::client::VastClient;
use crate::groups::unix_groups;

/// Everything the dashboard page needs for one user.
#[derive(Debug, Clone)]
pub struct QuotaReport {
    pub quota: Quota,
    pub groups: Vec<String>,
    /// Optional enrichment; `None` when the cluster has no breakdown for
    /// the quota path or the fetch failed.
    pub breakdown: Option<pkg_types::capacity::CapacityBreakdown>,
}

/// First quota whose name contains the group as a case-insensitive
/// substring. First match wins, with no tie-breaking: a group that is a
/// substring of several quota names resolves arbitrarily, in cluster order.
pub fn match_quota<'a>(group: &str, quotas: &'a [Quota]) -> Option<&'a Quota> {
    let needle = group.to_lowercase();
    quotas
        .iter()
        .find(|quota| quota.name.to_lowercase().contains(&needle))
}

/// Order a directory-service identity into a group list for matching: the
/// leading group first, then the rest, with the universal `users` group and
/// the username itself dropped (same filter as the remote-shell path).
pub fn directory_groups(user: UserGroupInfo, username: &str) -> Vec<String> {
    let mut groups = user.groups;
    if let Some(lead) = user.leading_group {
        groups.retain(|g| *g != lead);
        groups.insert(0, lead);
    }
    groups.retain(|g| g != "users" && g != username);
    groups
}

/// Resolve the quota report for a dashboard user: Unix groups, then the
/// quota matching the primary group, then the capacity breakdown for its
/// path. Expected absences come back as `NotFound`; only a transport-level
/// fault on the quota list is tagged `Unavailable`. Neither is an error.
pub async fn quota_for_user(
    client: &VastClient,
    config: &Config,
    username: &str,
) -> Lookup<QuotaReport> {
    let mut groups = unix_groups(&config.ssh, username).await;
    if groups.is_empty() {
        // Remote shell came back empty; try the cluster's directory service.
        match client.query_user(username).await {
            Ok(Some(user)) => groups = directory_groups(user, username),
            Ok(None) => info!("user {} unknown to cluster directory", username),
            Err(e) => warn!("directory query for {} failed: {:#}", username, e),
        }
    }
    let Some(primary) = groups.first().cloned() else {
        info!("no groups resolved for {}", username);
        return Lookup::NotFound;
    };

    let quotas = match client.list_quotas().await {
        Ok(quotas) => quotas,
        Err(e) => {
            warn!("quota list fetch failed: {:#}", e);
            return Lookup::Unavailable;
        }
    };

    let Some(quota) = match_quota(&primary, &quotas).cloned() else {
        info!("no quota name contains group {} (of {})", primary, username);
        return Lookup::NotFound;
    };
    info!(
        "matched quota {} at {} for group {}",
        quota.name, quota.path, primary
    );

    // Breakdown is best-effort; a failed fetch never fails the page.
    let breakdown = match client.capacity(&quota.path).await {
        Ok(payload) => reduce_capacity(&quota.path, &payload),
        Err(e) => {
            warn!("capacity fetch for {} failed: {:#}", quota.path, e);
            None
        }
    };

    Lookup::Found(QuotaReport {
        quota,
        groups,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::quota::QuotaState;

    fn make_quota(name: &str) -> Quota {
        Quota {
            name: name.to_string(),
            path: format!("/projects/{}", name.to_lowercase()),
            guid: String::new(),
            state: QuotaState::Active,
            hard_limit: Some(1 << 40),
            soft_limit: None,
            used_effective: 0,
            used_logical: 0,
            hard_limit_inodes: None,
            soft_limit_inodes: None,
            grace_period: None,
        }
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let quotas = vec![make_quota("Research-Lab-01"), make_quota("Archive")];
        let hit = match_quota("research", &quotas).unwrap();
        assert_eq!(hit.name, "Research-Lab-01");
    }

    #[test]
    fn test_no_match_for_near_miss() {
        let quotas = vec![make_quota("Research-Lab-01")];
        assert!(match_quota("resrch", &quotas).is_none());
    }

    #[test]
    fn test_first_match_wins_in_cluster_order() {
        let quotas = vec![
            make_quota("bio-archive"),
            make_quota("bio"),
            make_quota("bio-scratch"),
        ];
        let hit = match_quota("bio", &quotas).unwrap();
        assert_eq!(hit.name, "bio-archive");
    }

    #[test]
    fn test_empty_quota_list() {
        assert!(match_quota("research", &[]).is_none());
    }

    #[test]
    fn test_directory_groups_leading_group_first() {
        let user = UserGroupInfo {
            username: "jdoe".to_string(),
            groups: vec![
                "alpha".to_string(),
                "research".to_string(),
                "users".to_string(),
            ],
            leading_group: Some("research".to_string()),
            ..Default::default()
        };
        assert_eq!(directory_groups(user, "jdoe"), vec!["research", "alpha"]);
    }

    #[test]
    fn test_directory_groups_filters_like_the_shell_path() {
        let user = UserGroupInfo {
            username: "jdoe".to_string(),
            groups: vec!["jdoe".to_string(), "users".to_string()],
            leading_group: None,
            ..Default::default()
        };
        assert!(directory_groups(user, "jdoe").is_empty());
    }
}
