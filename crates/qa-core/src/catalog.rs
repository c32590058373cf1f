//! The QA quantity catalog.
//!
//! The upstream analysis task writes its histograms into a fixed set of named
//! subdirectories below [`TASK_DIR`]. This module is the static description of
//! that layout: which logical groups exist, their on-disk directory names, and
//! which quantities each group holds per operating mode. The catalog only
//! drives traversal order; it carries no histogram data itself.

/// Name of the top-level container directory written by the upstream task.
///
/// Cut-variation containers append the variation name to this
/// (e.g. `track-jet-qamaxDcaZ1`).
pub const TASK_DIR: &str = "track-jet-qa";

/// Logical directory group inside the results container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Track kinematics (pt, eta, phi and their correlations).
    Kine,
    /// Track parameters at the point of closest approach.
    TrackPar,
    /// ITS cluster and chi2 quantities.
    Its,
    /// TPC cluster, crossed-row and chi2 quantities.
    Tpc,
    /// Collision-level event properties.
    EventProp,
    /// Multiplicity estimators.
    Mult,
    /// Track-by-event correlations (resolution vs multiplicity).
    TrackEventPar,
    /// Centrality estimators.
    Centrality,
}

impl Group {
    /// All groups, in traversal order.
    pub const ALL: [Group; 8] = [
        Group::Kine,
        Group::TrackPar,
        Group::Its,
        Group::Tpc,
        Group::EventProp,
        Group::Mult,
        Group::TrackEventPar,
        Group::Centrality,
    ];

    /// On-disk subdirectory name, also used as the display name.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Group::Kine => "Kine",
            Group::TrackPar => "TrackPar",
            Group::Its => "ITS",
            Group::Tpc => "TPC",
            Group::EventProp => "EventProp",
            Group::Mult => "Mult",
            Group::TrackEventPar => "TrackEventPar",
            Group::Centrality => "Centrality",
        }
    }
}

/// Operating mode of the `draw` traversal.
///
/// `Full` walks the plain results container; `Tree` walks the tree-production
/// container for the track-level groups and switches to the plain container
/// for [`Group::EventProp`] (the tree production stores event properties only
/// there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plain results container, reduced multiplicity lists.
    Full,
    /// Tree-production container, track-level groups only.
    Tree,
}

impl Mode {
    /// Parse a mode from its command-line spelling.
    pub fn parse(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "full" => Some(Mode::Full),
            "tree" => Some(Mode::Tree),
            _ => None,
        }
    }
}

/// Groups walked in the given mode, in order.
pub fn groups(mode: Mode) -> &'static [Group] {
    match mode {
        // EventProp has to be last: the traversal switches containers there.
        Mode::Tree =>
            &[Group::Kine, Group::TrackPar, Group::Its, Group::Tpc, Group::EventProp],
        Mode::Full => &[
            Group::Kine,
            Group::TrackPar,
            Group::Its,
            Group::Tpc,
            Group::EventProp,
            Group::Mult,
            Group::TrackEventPar,
        ],
    }
}

const KINE: &[&str] = &["pt", "pt_TRD", "eta", "phi", "etaVSphi", "EtaPhiPt"];

const TRACK_PAR: &[&str] = &[
    "x",
    "y",
    "z",
    "alpha",
    "signed1Pt",
    "snp",
    "tgl",
    "flags",
    "dcaXY",
    "dcaZ",
    "length",
    "Sigma1Pt",
    "Sigma1Pt_Layer1",
    "Sigma1Pt_Layer2",
    "Sigma1Pt_Layers12",
    "Sigma1Pt_Layer4",
    "Sigma1Pt_Layer5",
    "Sigma1Pt_Layer6",
    "Sigma1Pt_Layers45",
    "Sigma1Pt_Layers56",
    "Sigma1Pt_Layers46",
    "Sigma1Pt_Layers456",
];

const ITS: &[&str] = &["itsNCls", "itsChi2NCl", "itsHits"];

const TPC: &[&str] = &[
    "tpcNClsFindable",
    "tpcNClsFound",
    "tpcNClsShared",
    "tpcNClsCrossedRows",
    "tpcFractionSharedCls",
    "tpcCrossedRowsOverFindableCls",
    "tpcChi2NCl",
];

const EVENT_PROP: &[&str] = &["collisionVtxZ", "collisionVtxZnoSel", "collisionVtxZSel8"];

const MULT: &[&str] = &["NTracksPV", "FT0M", "FT0A", "FT0C", "MultCorrelations"];
// Only these are filled in the plain results production.
const MULT_FULL: &[&str] = &["FT0M", "MultCorrelations"];

const TRACK_EVENT_PAR: &[&str] =
    &["Sigma1PtFT0Mcent", "Sigma1PtFT0Mmult", "Sigma1PtNTracksPV", "MultCorrelations"];
const TRACK_EVENT_PAR_FULL: &[&str] = &["MultCorrelations"];

const CENTRALITY: &[&str] = &["FT0M", "FT0A", "FT0C"];

/// Quantity names stored in `group` for the given mode.
pub fn quantities(group: Group, mode: Mode) -> &'static [&'static str] {
    match (group, mode) {
        (Group::Kine, _) => KINE,
        (Group::TrackPar, _) => TRACK_PAR,
        (Group::Its, _) => ITS,
        (Group::Tpc, _) => TPC,
        (Group::EventProp, _) => EVENT_PROP,
        (Group::Mult, Mode::Full) => MULT_FULL,
        (Group::Mult, Mode::Tree) => MULT,
        (Group::TrackEventPar, Mode::Full) => TRACK_EVENT_PAR_FULL,
        (Group::TrackEventPar, Mode::Tree) => TRACK_EVENT_PAR,
        (Group::Centrality, _) => CENTRALITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_total_and_stable() {
        // Every group has a display name, and it does not depend on the mode.
        for g in Group::ALL {
            assert!(!g.dir_name().is_empty());
        }
        let full: Vec<&str> = groups(Mode::Full).iter().map(|g| g.dir_name()).collect();
        let tree: Vec<&str> = groups(Mode::Tree).iter().map(|g| g.dir_name()).collect();
        assert_eq!(full[..tree.len()], tree[..], "tree mode is a prefix of full mode");
        assert_eq!(tree, vec!["Kine", "TrackPar", "ITS", "TPC", "EventProp"]);
    }

    #[test]
    fn event_prop_is_last_in_tree_mode() {
        assert_eq!(*groups(Mode::Tree).last().unwrap(), Group::EventProp);
    }

    #[test]
    fn no_duplicate_quantities_within_a_group() {
        for mode in [Mode::Full, Mode::Tree] {
            for g in Group::ALL {
                let q = quantities(g, mode);
                let mut seen = std::collections::HashSet::new();
                for name in q {
                    assert!(seen.insert(*name), "duplicate {name} in {}", g.dir_name());
                }
            }
        }
    }

    #[test]
    fn full_mode_reduces_multiplicity_lists() {
        assert_eq!(quantities(Group::Mult, Mode::Full), &["FT0M", "MultCorrelations"]);
        assert_eq!(quantities(Group::TrackEventPar, Mode::Full), &["MultCorrelations"]);
        assert_eq!(quantities(Group::Mult, Mode::Tree).len(), 5);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(Mode::parse("Full"), Some(Mode::Full));
        assert_eq!(Mode::parse("tree"), Some(Mode::Tree));
        assert_eq!(Mode::parse("bogus"), None);
    }
}
