use core::fmt;

// -----------------------------------------------------------------------------
// ValidationStage

/// The validation state machine carried by [`TypeMetaInfo`] and [`TypeInfo`].
///
/// ```text
/// Unvalidated -> PreAnalyzed -> Analyzed -> (PostAnalyzed) -> (PreProcessed)
///             -> Processed -> (PostProcessed) -> Validated
/// ```
///
/// Stages in parentheses may be skipped. `Invalidated` is terminal and
/// reachable from every stage except `Validated`.
///
/// Moving out of order is a bug in the initialization pipeline, not a
/// recoverable condition, so [`ValidationStage::advance`] panics.
///
/// [`TypeMetaInfo`]: crate::info::TypeMetaInfo
/// [`TypeInfo`]: crate::info::TypeInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationStage {
    #[default]
    Unvalidated,
    PreAnalyzed,
    Analyzed,
    PostAnalyzed,
    PreProcessed,
    Processed,
    PostProcessed,
    Validated,
    Invalidated,
}

impl ValidationStage {
    #[inline]
    const fn rank(self) -> u8 {
        match self {
            Self::Unvalidated => 0,
            Self::PreAnalyzed => 1,
            Self::Analyzed => 2,
            Self::PostAnalyzed => 3,
            Self::PreProcessed => 4,
            Self::Processed => 5,
            Self::PostProcessed => 6,
            Self::Validated => 7,
            Self::Invalidated => u8::MAX,
        }
    }

    #[inline]
    const fn is_optional(self) -> bool {
        matches!(
            self,
            Self::PostAnalyzed | Self::PreProcessed | Self::PostProcessed
        )
    }

    #[inline]
    const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Unvalidated,
            1 => Self::PreAnalyzed,
            2 => Self::Analyzed,
            3 => Self::PostAnalyzed,
            4 => Self::PreProcessed,
            5 => Self::Processed,
            6 => Self::PostProcessed,
            7 => Self::Validated,
            _ => Self::Invalidated,
        }
    }

    /// Returns `true` for `Validated` and `Invalidated`.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Validated | Self::Invalidated)
    }

    /// Returns `true` if the stage has at least reached `other`.
    ///
    /// `Invalidated` has not reached any stage.
    #[inline]
    pub const fn has_reached(self, other: Self) -> bool {
        !matches!(self, Self::Invalidated) && self.rank() >= other.rank()
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub const fn can_advance(self, next: Self) -> bool {
        if let Self::Invalidated = next {
            return !self.is_terminal();
        }
        if self.is_terminal() || next.rank() <= self.rank() {
            return false;
        }
        // Every stage strictly between the two must be optional.
        let mut rank = self.rank() + 1;
        while rank < next.rank() {
            if !Self::from_rank(rank).is_optional() {
                return false;
            }
            rank += 1;
        }
        true
    }

    /// Moves the stage forward.
    ///
    /// # Panic
    /// - Illegal transition.
    #[track_caller]
    pub fn advance(&mut self, next: Self) {
        if !self.can_advance(next) {
            illegal_transition(*self, next);
        }
        *self = next;
    }

    /// Moves to `Invalidated`.
    ///
    /// # Panic
    /// - Already `Validated` or `Invalidated`.
    #[track_caller]
    #[inline]
    pub fn invalidate(&mut self) {
        self.advance(Self::Invalidated);
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn illegal_transition(from: ValidationStage, to: ValidationStage) -> ! {
    panic!("illegal validation stage transition: {from} -> {to}");
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationStage::{self, *};

    #[test]
    fn full_path() {
        let mut stage = ValidationStage::default();
        for next in [
            PreAnalyzed,
            Analyzed,
            PostAnalyzed,
            PreProcessed,
            Processed,
            PostProcessed,
            Validated,
        ] {
            stage.advance(next);
        }
        assert_eq!(stage, Validated);
    }

    #[test]
    fn optional_stages_can_be_skipped() {
        assert!(Analyzed.can_advance(Processed));
        assert!(Analyzed.can_advance(PreProcessed));
        assert!(Processed.can_advance(Validated));
        assert!(PostAnalyzed.can_advance(Processed));
    }

    #[test]
    fn required_stages_cannot_be_skipped() {
        assert!(!Unvalidated.can_advance(Analyzed));
        assert!(!PreAnalyzed.can_advance(Processed));
        assert!(!Analyzed.can_advance(Validated));
        assert!(!Processed.can_advance(Analyzed));
        assert!(!Processed.can_advance(Processed));
    }

    #[test]
    fn invalidation() {
        for stage in [Unvalidated, PreAnalyzed, Analyzed, Processed, PostProcessed] {
            assert!(stage.can_advance(Invalidated));
        }
        assert!(!Validated.can_advance(Invalidated));
        assert!(!Invalidated.can_advance(Invalidated));
        assert!(!Invalidated.can_advance(Validated));
        assert!(!Invalidated.has_reached(Unvalidated));
    }

    #[test]
    #[should_panic(expected = "illegal validation stage transition")]
    fn out_of_order_panics() {
        let mut stage = PreAnalyzed;
        stage.advance(Validated);
    }
}
