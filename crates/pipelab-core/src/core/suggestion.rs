use indexmap::IndexSet;
use serde::Serialize;

/// Research topics recognised in free-text goals.
///
/// Variants are listed in table order. When several topics match a goal their
/// module groups are concatenated in this order, so the first topic to list a
/// module decides where it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalTopic {
    DeNovoDesign,
    Antibody,
    Docking,
    Stability,
    Evolution,
    StructurePrediction,
    VariantEffect,
}

impl GoalTopic {
    pub const TABLE: [GoalTopic; 7] = [
        GoalTopic::DeNovoDesign,
        GoalTopic::Antibody,
        GoalTopic::Docking,
        GoalTopic::Stability,
        GoalTopic::Evolution,
        GoalTopic::StructurePrediction,
        GoalTopic::VariantEffect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GoalTopic::DeNovoDesign => "de novo design",
            GoalTopic::Antibody => "antibody engineering",
            GoalTopic::Docking => "docking",
            GoalTopic::Stability => "stability",
            GoalTopic::Evolution => "evolution",
            GoalTopic::StructurePrediction => "structure prediction",
            GoalTopic::VariantEffect => "variant effect",
        }
    }

    /// Lowercase substrings that trigger this topic.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            GoalTopic::DeNovoDesign => &["de novo", "denovo", "novel", "new protein", "binder", "design a"],
            GoalTopic::Antibody => &["antibod", "nanobod", "cdr", "immun"],
            GoalTopic::Docking => &["dock", "ligand", "small molecule", "drug", "binding pose"],
            GoalTopic::Stability => &["stability", "stabiliz", "stabilis", "thermostab", "ddg"],
            GoalTopic::Evolution => &["evolution", "homolog", "conservation", "phylogen", "ancestral"],
            GoalTopic::StructurePrediction => &["structure", "fold", "predict"],
            GoalTopic::VariantEffect => &["variant", "mutation", "fitness"],
        }
    }

    /// Module identifiers suggested for this topic, in pipeline order.
    pub fn modules(self) -> &'static [&'static str] {
        match self {
            GoalTopic::DeNovoDesign => &["rfdiffusion", "proteinmpnn", "esmfold", "structure-qc"],
            GoalTopic::Antibody => &["anarci", "igfold", "proteinmpnn", "esmfold"],
            GoalTopic::Docking => &["esmfold", "diffdock", "autodock-vina"],
            GoalTopic::Stability => &["esmfold", "foldx", "gromacs-md"],
            GoalTopic::Evolution => &["mmseqs2", "iqtree"],
            GoalTopic::StructurePrediction => &["mmseqs2", "alphafold2", "structure-qc"],
            GoalTopic::VariantEffect => &["esm1v", "foldx"],
        }
    }

    pub fn matches(self, normalized_goal: &str) -> bool {
        self.keywords().iter().any(|kw| normalized_goal.contains(kw))
    }
}

/// Topics whose keywords occur in `goal` (case-insensitive), in table order.
pub fn matched_topics(goal: &str) -> Vec<GoalTopic> {
    let normalized = goal.to_lowercase();
    if normalized.trim().is_empty() {
        return Vec::new();
    }
    GoalTopic::TABLE
        .into_iter()
        .filter(|topic| topic.matches(&normalized))
        .collect()
}

/// Candidate module identifiers for a free-text goal.
///
/// Groups of every matching topic are concatenated in table order and
/// deduplicated keeping the first occurrence. No match yields an empty list.
pub fn suggest(goal: &str) -> Vec<String> {
    let ordered: IndexSet<&'static str> = matched_topics(goal)
        .into_iter()
        .flat_map(|topic| topic.modules().iter().copied())
        .collect();
    ordered.into_iter().map(str::to_string).collect()
}
