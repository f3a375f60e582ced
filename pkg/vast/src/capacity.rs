use serde_json::Value;

use pkg_types::capacity::{CapacityBreakdown, RootUsage, SubdirUsage};
use pkg_types::format::{drr, percentage};

/// Reduce the cluster's nested capacity payload into a display-ready
/// breakdown for `root_path`.
///
/// The payload carries either a `root_data` triple (usable, unique, logical
/// bytes) or a `details` list of `[path, {"data": triple}]` pairs, or both.
/// An exact `root_path` match inside `details` wins over `root_data`; with
/// neither present there is no breakdown (`None`), which callers treat as
/// optional enrichment rather than an error.
pub fn reduce_capacity(root_path: &str, payload: &Value) -> Option<CapacityBreakdown> {
    let details = payload.get("details").and_then(Value::as_array);

    let root_triple = details
        .and_then(|list| {
            list.iter().find_map(|entry| {
                let (path, data) = detail_entry(entry)?;
                (path == root_path).then_some(data)
            })
        })
        .or_else(|| payload.get("root_data").and_then(parse_triple))?;

    let (usable, unique, logical) = root_triple;
    let root = RootUsage {
        path: root_path.to_string(),
        usable_bytes: usable,
        unique_bytes: unique,
        logical_bytes: logical,
        drr: drr(logical, usable),
    };

    let mut subdirs = Vec::new();
    for entry in details.into_iter().flatten() {
        let Some((path, (usable, unique, logical))) = detail_entry(entry) else {
            continue;
        };
        if path == root_path {
            continue;
        }
        subdirs.push(SubdirUsage {
            path: relative_path(root_path, path),
            usable_bytes: usable,
            unique_bytes: unique,
            logical_bytes: logical,
            drr: drr(logical, usable),
            percentage: percentage(usable, root.usable_bytes),
        });
    }
    subdirs.sort_by(|a, b| a.path.cmp(&b.path));

    Some(CapacityBreakdown { root, subdirs })
}

/// Strip the quota root prefix; an entry that reduces to nothing is the
/// root's own directory, rendered as ".".
fn relative_path(root_path: &str, path: &str) -> String {
    let rel = path
        .strip_prefix(root_path)
        .unwrap_or(path)
        .trim_start_matches('/');
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel.to_string()
    }
}

/// One `details` entry: `[path, {"data": [usable, unique, logical]}]`.
fn detail_entry(entry: &Value) -> Option<(&str, (u64, u64, u64))> {
    let pair = entry.as_array()?;
    let path = pair.first()?.as_str()?;
    let data = pair.get(1)?.get("data")?;
    Some((path, parse_triple(data)?))
}

fn parse_triple(data: &Value) -> Option<(u64, u64, u64)> {
    let triple = data.as_array()?;
    Some((
        triple.first()?.as_u64()?,
        triple.get(1)?.as_u64()?,
        triple.get(2)?.as_u64()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "/projects/research";

    fn payload_with_details() -> Value {
        json!({
            "details": [
                ["/projects/research/b", {"data": [200, 150, 400]}],
                ["/projects/research", {"data": [1000, 800, 2000]}],
                ["/projects/research/a", {"data": [300, 250, 300]}],
                ["/projects/research/c", {"data": [0, 0, 0]}],
            ]
        })
    }

    #[test]
    fn test_exact_detail_match_wins_over_root_data() {
        let mut payload = payload_with_details();
        payload["root_data"] = json!([5, 5, 5]);

        let breakdown = reduce_capacity(ROOT, &payload).unwrap();
        assert_eq!(breakdown.root.usable_bytes, 1000);
        assert_eq!(breakdown.root.logical_bytes, 2000);
        assert_eq!(breakdown.root.drr, 2.0);
    }

    #[test]
    fn test_root_data_fallback() {
        let payload = json!({"root_data": [500, 400, 1500]});
        let breakdown = reduce_capacity(ROOT, &payload).unwrap();
        assert_eq!(breakdown.root.usable_bytes, 500);
        assert_eq!(breakdown.root.drr, 3.0);
        assert!(breakdown.subdirs.is_empty());
    }

    #[test]
    fn test_no_breakdown_available() {
        assert_eq!(reduce_capacity(ROOT, &json!({})), None);
        assert_eq!(reduce_capacity(ROOT, &json!({"details": []})), None);
    }

    #[test]
    fn test_subdirs_sorted_by_relative_path() {
        let breakdown = reduce_capacity(ROOT, &payload_with_details()).unwrap();
        let paths: Vec<&str> = breakdown.subdirs.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_percentages_are_shares_of_root_usable() {
        let breakdown = reduce_capacity(ROOT, &payload_with_details()).unwrap();
        let a = &breakdown.subdirs[0];
        let b = &breakdown.subdirs[1];
        assert_eq!(a.percentage, 30.0);
        assert_eq!(b.percentage, 20.0);
        let total: f64 = breakdown.subdirs.iter().map(|s| s.percentage).sum();
        assert!(total <= 100.0);
    }

    #[test]
    fn test_zero_usable_subdir_has_zero_drr() {
        let breakdown = reduce_capacity(ROOT, &payload_with_details()).unwrap();
        let c = &breakdown.subdirs[2];
        assert_eq!(c.drr, 0.0);
        assert_eq!(c.percentage, 0.0);
    }

    #[test]
    fn test_zero_usable_root_zeroes_percentages() {
        let payload = json!({
            "details": [
                ["/projects/research", {"data": [0, 0, 0]}],
                ["/projects/research/a", {"data": [300, 250, 300]}],
            ]
        });
        let breakdown = reduce_capacity(ROOT, &payload).unwrap();
        assert_eq!(breakdown.root.drr, 0.0);
        assert_eq!(breakdown.subdirs[0].percentage, 0.0);
    }

    #[test]
    fn test_entry_outside_root_keeps_own_path() {
        let payload = json!({
            "root_data": [100, 80, 120],
            "details": [
                ["/scratch/other", {"data": [10, 8, 12]}],
            ]
        });
        let breakdown = reduce_capacity(ROOT, &payload).unwrap();
        assert_eq!(breakdown.subdirs[0].path, "scratch/other");
    }

    #[test]
    fn test_malformed_detail_entries_are_skipped() {
        let payload = json!({
            "root_data": [100, 80, 120],
            "details": [
                "not-a-pair",
                ["/projects/research/ok"],
                ["/projects/research/good", {"data": [10, 8, 12]}],
            ]
        });
        let breakdown = reduce_capacity(ROOT, &payload).unwrap();
        assert_eq!(breakdown.subdirs.len(), 1);
        assert_eq!(breakdown.subdirs[0].path, "good");
    }
}
