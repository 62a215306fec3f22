use serde::{Deserialize, Serialize};

/// Johnson solids that are not built from other solids by a uniform rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Elementary {
    Sphenocorona,
    AugmentedSphenocorona,
    Sphenomegacorona,
    Hebesphenomegacorona,
    Disphenocingulum,
    Bilunabirotunda,
    TriangularHebesphenorotunda,
}

impl Elementary {
    pub const ALL: [Elementary; 7] = [
        Self::Sphenocorona,
        Self::AugmentedSphenocorona,
        Self::Sphenomegacorona,
        Self::Hebesphenomegacorona,
        Self::Disphenocingulum,
        Self::Bilunabirotunda,
        Self::TriangularHebesphenorotunda,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sphenocorona => "sphenocorona",
            Self::AugmentedSphenocorona => "augmented sphenocorona",
            Self::Sphenomegacorona => "sphenomegacorona",
            Self::Hebesphenomegacorona => "hebesphenomegacorona",
            Self::Disphenocingulum => "disphenocingulum",
            Self::Bilunabirotunda => "bilunabirotunda",
            Self::TriangularHebesphenorotunda => "triangular hebesphenorotunda",
        }
    }

    #[must_use]
    pub fn get_all() -> Vec<Elementary> {
        Self::ALL.to_vec()
    }
}
