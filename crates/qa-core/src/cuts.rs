//! The cut-variation catalog and its keyword expansion.
//!
//! A cut variation is a named configuration of track-selection thresholds;
//! each one has its own results container. Users select variations with short
//! keywords that are expanded against the full catalog by substring matching.

use crate::error::{Error, Result};

/// Every cut-variation configuration produced by the upstream task.
pub const ALL_VARIATIONS: &[&str] = &[
    "maxChi2PerClusterITS30",
    "maxChi2PerClusterITS42",
    "maxChi2PerClusterTPC2",
    "maxChi2PerClusterTPC3",
    "maxChi2PerClusterTPC5",
    "maxChi2PerClusterTPC6",
    "maxDcaZ1",
    "maxDcaZ3",
    "maxDcaXY0_5",
    "maxDcaXY1",
    "maxDcaXY1_5",
    "maxDcaXY2_5",
    "maxDcaXY3",
    "minNCrossedRowsOverFindableClustersTPC0_6",
    "minNCrossedRowsOverFindableClustersTPC0_7",
    "minNCrossedRowsOverFindableClustersTPC0_9",
    "minNCrossedRowsOverFindableClustersTPC1_0",
    "minNCrossedRowsTPC110",
    "minNCrossedRowsTPC60",
    "minNCrossedRowsTPC80",
    "globalTrackWoPtEta",
    "globalTrackWoDCA",
    "globalTrack",
    "itsPattern0",
    "itsPattern1",
    "itsPattern3",
    "minTPCNClsFound1",
    "minTPCNClsFound2",
    "minTPCNClsFound3",
];

/// The three global track-selection configurations.
pub const GLOBAL_SELECTIONS: &[&str] = &["globalTrackWoPtEta", "globalTrackWoDCA", "globalTrack"];

/// Reference configuration used by `vs`-style comparisons.
pub const REFERENCE: &str = "globalTrackWoPtEta";

/// Expand a short keyword list into the matching cut-variation names.
///
/// Two keywords are special:
/// - `selections` selects exactly the three global track selections;
/// - `vs` prepends [`REFERENCE`] and then expands the *second* keyword.
///
/// Everything else expands the first keyword by `contains` filtering over
/// [`ALL_VARIATIONS`]. The result preserves catalog order and is not
/// deduplicated (a variation matched twice is processed twice downstream,
/// where the canvas book collapses repeated titles).
pub fn expand_keywords(keywords: &[String]) -> Result<Vec<String>> {
    if keywords.is_empty() {
        return Err(Error::Validation("no cut-variation keywords given".into()));
    }

    let mut out: Vec<String> = Vec::new();

    if keywords.iter().any(|k| k == "selections") {
        out.extend(GLOBAL_SELECTIONS.iter().map(|s| s.to_string()));
    }

    if keywords.iter().any(|k| k == "vs") {
        out.push(REFERENCE.to_string());
        if let Some(pattern) = keywords.get(1) {
            out.extend(matching(pattern));
        }
    } else if let Some(pattern) = keywords.first() {
        out.extend(matching(pattern));
    }

    Ok(out)
}

fn matching(pattern: &str) -> impl Iterator<Item = String> + '_ {
    ALL_VARIATIONS.iter().filter(move |n| n.contains(pattern)).map(|n| n.to_string())
}
