//! The breathing technique catalog.
//!
//! A static lookup table of named techniques. Each technique is a non-empty,
//! cyclic sequence of phases: after the last phase the cycle restarts at the
//! first, so phase lookup is defined for any index.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Identifier for a breathing technique.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechniqueId {
    /// Simple 4-count inhale and 6-count exhale.
    Simple,
    /// Equal 4-count inhale, hold, exhale, and hold.
    #[value(name = "box")]
    Box,
    /// Inhale for 4, hold for 7, exhale for 8.
    #[value(name = "4-7-8")]
    #[serde(rename = "4-7-8")]
    FourSevenEight,
}

impl TechniqueId {
    /// All technique identifiers, in catalog order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Simple, Self::Box, Self::FourSevenEight]
    }

    /// The technique definition for this identifier.
    #[must_use]
    pub const fn technique(self) -> &'static Technique {
        match self {
            Self::Simple => &SIMPLE,
            Self::Box => &BOX,
            Self::FourSevenEight => &FOUR_SEVEN_EIGHT,
        }
    }
}

impl fmt::Display for TechniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.technique().name)
    }
}

/// Animation endpoint for the breathing circle during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualTarget {
    /// Circle scale factor in (0, 1].
    pub scale: f64,
    /// Circle opacity in [0, 1].
    pub opacity: f64,
}

impl VisualTarget {
    /// The inactive appearance shown between sessions.
    pub const INACTIVE: Self = Self {
        scale: 0.5,
        opacity: 0.3,
    };

    const EXPANDED: Self = Self {
        scale: 1.0,
        opacity: 0.7,
    };
}

/// One step of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Instruction shown to the user.
    pub label: &'static str,
    /// Phase length in whole seconds.
    pub seconds: u64,
    /// Where the breathing circle animates to during this phase.
    pub visual: VisualTarget,
}

impl Phase {
    const fn new(label: &'static str, seconds: u64, visual: VisualTarget) -> Self {
        Self {
            label,
            seconds,
            visual,
        }
    }

    /// Phase length as a [`Duration`].
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }
}

/// A named breathing technique: an ordered, cyclic sequence of phases.
#[derive(Debug, Clone, Serialize)]
pub struct Technique {
    /// Identifier used on the command line and in config files.
    pub id: TechniqueId,
    /// Display name.
    pub name: &'static str,
    /// One-line description shown in listings.
    pub description: &'static str,
    /// The phase sequence. Never empty.
    pub phases: &'static [Phase],
}

impl Technique {
    /// Look up the phase at a cyclic index.
    ///
    /// Defined for every index: the sequence wraps around, so
    /// `phase_at(i) == phase_at(i + phases.len())`.
    #[must_use]
    pub const fn phase_at(&self, index: usize) -> &Phase {
        &self.phases[index % self.phases.len()]
    }

    /// Total length of one full cycle through the phases.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        Duration::from_secs(self.phases.iter().map(|p| p.seconds).sum())
    }
}

static SIMPLE: Technique = Technique {
    id: TechniqueId::Simple,
    name: "Simple",
    description: "Simple 4-count inhale and 6-count exhale.",
    phases: &[
        Phase::new("Breathe In", 4, VisualTarget::EXPANDED),
        Phase::new("Breathe Out", 6, VisualTarget::INACTIVE),
    ],
};

static BOX: Technique = Technique {
    id: TechniqueId::Box,
    name: "Box Breathing",
    description: "Equal 4-count inhale, hold, exhale, and hold.",
    phases: &[
        Phase::new("Breathe In", 4, VisualTarget::EXPANDED),
        Phase::new("Hold", 4, VisualTarget::EXPANDED),
        Phase::new("Breathe Out", 4, VisualTarget::INACTIVE),
        Phase::new("Hold", 4, VisualTarget::INACTIVE),
    ],
};

static FOUR_SEVEN_EIGHT: Technique = Technique {
    id: TechniqueId::FourSevenEight,
    name: "4-7-8",
    description: "Inhale for 4, hold for 7, exhale for 8.",
    phases: &[
        Phase::new("Breathe In", 4, VisualTarget::EXPANDED),
        Phase::new("Hold", 7, VisualTarget::EXPANDED),
        Phase::new("Breathe Out", 8, VisualTarget::INACTIVE),
    ],
};

/// All techniques in the catalog, in display order.
#[must_use]
pub fn all_techniques() -> Vec<&'static Technique> {
    TechniqueId::all().iter().map(|id| id.technique()).collect()
}
