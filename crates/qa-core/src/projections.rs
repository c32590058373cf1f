//! Sparse-histogram projection tables for the comparison surface.
//!
//! The cut-variation containers store most quantities as N-dimensional sparse
//! histograms. Which 2D faces are worth looking at per quantity is fixed
//! domain knowledge, encoded here as a substring-keyed table of
//! (x-axis, y-axis) index pairs.

/// One projection-table entry: quantities whose name contains `pattern` get
/// a 2D projection per `(x, y)` axis-index pair.
pub struct ProjectionRule {
    /// Substring matched against the stored object name.
    pub pattern: &'static str,
    /// Axis-index pairs `(x, y)` to project onto.
    pub pairs: &'static [(usize, usize)],
}

/// The cut-variation projection table.
///
/// Entries are tested in order and *every* matching entry contributes its
/// pairs. `Sigma1Pt` deliberately comes last so the resolution quantities
/// with a dedicated entry are not double-projected, and TRD variants are
/// excluded by [`projection_pairs`].
pub const PROJECTION_TABLE: &[ProjectionRule] = &[
    ProjectionRule { pattern: "xyz", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "alpha", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "signed1Pt", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "dcaXY", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "dcaZ", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "itsNCls", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "itsChi2NCl", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "itsHits", pairs: &[(2, 0)] },
    ProjectionRule { pattern: "tpcNClsFindable", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "tpcNClsFound", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "tpcNClsShared", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "tpcNClsCrossedRows", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "tpcFractionSharedCls", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "tpcCrossedRowsOverFindableCls", pairs: &[(2, 0)] },
    ProjectionRule { pattern: "tpcChi2NCl", pairs: &[(2, 0), (2, 1)] },
    ProjectionRule { pattern: "Sigma1Pt", pairs: &[(1, 0)] },
];

/// pT slice ranges (GeV/c) for the eta-phi occupancy maps.
pub const ETA_PHI_PT_SLICES: &[(f64, f64)] =
    &[(1.0, 5.0), (5.0, 15.0), (15.0, 30.0), (30.0, 100.0), (0.0, 200.0)];

/// All 2D projection pairs configured for a stored object name.
///
/// Returns an empty list for unmatched names (the caller falls through
/// silently) and for the TRD resolution variants, which get no 2D treatment
/// in the comparison.
pub fn projection_pairs(name: &str) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for rule in PROJECTION_TABLE {
        if !name.contains(rule.pattern) {
            continue;
        }
        if rule.pattern == "Sigma1Pt" && name.contains("TRD") {
            continue;
        }
        pairs.extend_from_slice(rule.pairs);
    }
    pairs
}
