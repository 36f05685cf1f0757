//! Level decision

/// Highest actuation level
pub const MAX_LEVEL: u8 = 4;

/// Discrete actuator intensity, 0 (off) to [`MAX_LEVEL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationLevel(u8);

impl ActuationLevel {
    pub const OFF: Self = Self(0);
    pub const MAX: Self = Self(MAX_LEVEL);

    /// Level for a winning class index, clamped to [`MAX_LEVEL`]
    pub fn from_index(index: usize) -> Self {
        Self(index.min(MAX_LEVEL as usize) as u8)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// Index of the highest score
///
/// The first occurrence wins on ties. Returns `None` for an empty slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;

    let mut best = 0;
    let mut best_score = *first;
    for (i, &s) in rest.iter().enumerate() {
        if s > best_score {
            best = i + 1;
            best_score = s;
        }
    }

    Some(best)
}
