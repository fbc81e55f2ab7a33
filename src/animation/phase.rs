/// Reveal phases, in the only order a run may visit them.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Blank,
    Halftone,
    Color,
    Refinement,
    Complete,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Blank,
        Phase::Halftone,
        Phase::Color,
        Phase::Refinement,
        Phase::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Halftone => "halftone",
            Self::Color => "color",
            Self::Refinement => "refinement",
            Self::Complete => "complete",
        }
    }

    /// Successor phase; `None` once terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Blank => Some(Self::Halftone),
            Self::Halftone => Some(Self::Color),
            Self::Color => Some(Self::Refinement),
            Self::Refinement => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Complete
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
