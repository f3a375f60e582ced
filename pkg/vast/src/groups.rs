use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

use pkg_types::config::SshConfig;

/// Resolve a user's Unix groups by running `groups <user>` on the admin
/// host over SSH.
///
/// Every failure mode (spawn error, timeout, non-zero exit, unparsable
/// output) yields an empty list. Callers cannot distinguish them; "lookup
/// failed" and "no groups" are the same outcome.
pub async fn unix_groups(cfg: &SshConfig, username: &str) -> Vec<String> {
    let target = format!("{}@{}", cfg.username, cfg.host);
    let mut cmd = Command::new("ssh");
    cmd.arg("-i")
        .arg(&cfg.key_file)
        .arg("-o")
        .arg("BatchMode=yes")
        .arg("-o")
        .arg("StrictHostKeyChecking=no")
        .arg(&target)
        .arg("groups")
        .arg(username);

    let output = match timeout(Duration::from_secs(cfg.timeout_secs), cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("group lookup for {} failed to spawn ssh: {}", username, e);
            return Vec::new();
        }
        Err(_) => {
            warn!(
                "group lookup for {} timed out after {}s",
                username, cfg.timeout_secs
            );
            return Vec::new();
        }
    };

    if !output.status.success() {
        warn!(
            "group lookup for {} exited with {}: {}",
            username,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Vec::new();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let groups = parse_groups(stdout.trim(), username);
    info!("resolved {} groups for {}", groups.len(), username);
    groups
}

/// Parse `groups` output.
///
/// Expected form is `<name> : <g1> <g2> ...`; with no separator the whole
/// output is taken as the group list. The universal `users` group and the
/// username itself are dropped; order is otherwise preserved, and the first
/// surviving entry is the user's primary group.
pub fn parse_groups(output: &str, username: &str) -> Vec<String> {
    let list = match output.split_once(':') {
        Some((_, rest)) => rest,
        None => output,
    };
    list.split_whitespace()
        .filter(|g| *g != "users" && *g != username)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_separator() {
        let out = "rwalsh : rwalsh users research storage-admins";
        assert_eq!(
            parse_groups(out, "rwalsh"),
            vec!["research".to_string(), "storage-admins".to_string()]
        );
    }

    #[test]
    fn test_parse_without_separator_takes_whole_output() {
        assert_eq!(
            parse_groups("research storage-admins", "rwalsh"),
            vec!["research".to_string(), "storage-admins".to_string()]
        );
    }

    #[test]
    fn test_users_and_username_are_excluded() {
        assert_eq!(parse_groups("jdoe : jdoe users", "jdoe"), Vec::<String>::new());
    }

    #[test]
    fn test_order_is_preserved() {
        let out = "jdoe : zeta alpha jdoe midway";
        assert_eq!(parse_groups(out, "jdoe"), vec!["zeta", "alpha", "midway"]);
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(parse_groups("", "jdoe"), Vec::<String>::new());
    }
}
