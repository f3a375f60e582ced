use serde::{Deserialize, Serialize};

/// Usage figures for the quota root itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootUsage {
    pub path: String,
    /// Physical bytes consumed after dedup/compression.
    pub usable_bytes: u64,
    pub unique_bytes: u64,
    /// Bytes as presented to clients before any reduction.
    pub logical_bytes: u64,
    /// Data reduction ratio: logical / usable. 0.0 when usable is 0.
    pub drr: f64,
}

/// One subdirectory row of the capacity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdirUsage {
    /// Path relative to the quota root; `"."` when the entry is the root's
    /// own directory component.
    pub path: String,
    pub usable_bytes: u64,
    pub unique_bytes: u64,
    pub logical_bytes: u64,
    pub drr: f64,
    /// Share of the root's usable bytes, 0–100+. Not a share of an
    /// independent 100% total.
    pub percentage: f64,
}

/// Capacity breakdown for a quota path: the root record plus subdirectory
/// records sorted lexicographically by relative path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityBreakdown {
    pub root: RootUsage,
    pub subdirs: Vec<SubdirUsage>,
}
