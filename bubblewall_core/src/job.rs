// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation job kinds and their replacement rules.
//!
//! At most one job runs at a time. When a new job is queued it may
//! *supersede* jobs of other kinds that are still waiting (they are dropped
//! from the queue) and *preempt* the running job (its cancellation flag is
//! raised and it stops at the next frame boundary).
//!
//! | New job | Drops pending | Cancels running |
//! |---|---|---|
//! | `Reset` | `Reset`, `Maximize`, `Expand` | `Expand` |
//! | `Maximize` | `Expand` | `Expand` |
//! | `Minimize` | `Expand` | `Expand` |
//! | `Expand` | `Expand` | none |
//! | `BackgroundTransition` | `BackgroundTransition` | none |
//! | `TouchPulse`, `Redraw` | none | none |

/// The kind of an animation job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Rebuild the bubble set for new bounds.
    Reset,
    /// Latch every bubble at its maximum radius.
    Maximize,
    /// Latch every bubble at its minimized radius.
    Minimize,
    /// Eased growth from the current radii to the maximum.
    Expand,
    /// Squash animation of one touched bubble.
    TouchPulse,
    /// Brightness fade after a theme change.
    BackgroundTransition,
    /// One frame of the current state.
    Redraw,
}

impl JobKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Reset,
        Self::Maximize,
        Self::Minimize,
        Self::Expand,
        Self::TouchPulse,
        Self::BackgroundTransition,
        Self::Redraw,
    ];

    /// Whether queueing `self` drops a pending job of kind `pending`.
    #[must_use]
    pub const fn supersedes(self, pending: Self) -> bool {
        match self {
            Self::Reset => matches!(pending, Self::Reset | Self::Maximize | Self::Expand),
            Self::Maximize | Self::Minimize | Self::Expand => matches!(pending, Self::Expand),
            Self::BackgroundTransition => matches!(pending, Self::BackgroundTransition),
            Self::TouchPulse | Self::Redraw => false,
        }
    }

    /// Whether queueing `self` cancels a running job of kind `running`.
    #[must_use]
    pub const fn preempts(self, running: Self) -> bool {
        matches!(running, Self::Expand)
            && matches!(self, Self::Reset | Self::Maximize | Self::Minimize)
    }

    /// Whether jobs of this kind poll their cancellation flag.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Expand)
    }

    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Maximize => "maximize",
            Self::Minimize => "minimize",
            Self::Expand => "expand",
            Self::TouchPulse => "touch",
            Self::BackgroundTransition => "background",
            Self::Redraw => "redraw",
        }
    }

    /// Compact encoding for recordings.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Reset => 0,
            Self::Maximize => 1,
            Self::Minimize => 2,
            Self::Expand => 3,
            Self::TouchPulse => 4,
            Self::BackgroundTransition => 5,
            Self::Redraw => 6,
        }
    }

    /// Inverse of [`to_u8`](Self::to_u8).
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Reset),
            1 => Some(Self::Maximize),
            2 => Some(Self::Minimize),
            3 => Some(Self::Expand),
            4 => Some(Self::TouchPulse),
            5 => Some(Self::BackgroundTransition),
            6 => Some(Self::Redraw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_expand_is_preempted() {
        for new in JobKind::ALL {
            for running in JobKind::ALL {
                if new.preempts(running) {
                    assert_eq!(running, JobKind::Expand);
                    assert!(running.is_cancellable());
                }
            }
        }
        assert!(JobKind::Minimize.preempts(JobKind::Expand));
        assert!(!JobKind::Expand.preempts(JobKind::Expand));
        assert!(!JobKind::Minimize.preempts(JobKind::BackgroundTransition));
    }

    #[test]
    fn input_jobs_never_supersede() {
        for pending in JobKind::ALL {
            assert!(!JobKind::TouchPulse.supersedes(pending));
            assert!(!JobKind::Redraw.supersedes(pending));
        }
    }

    #[test]
    fn minimize_drops_pending_expand_only() {
        let dropped: [bool; 7] = JobKind::ALL.map(|k| JobKind::Minimize.supersedes(k));
        assert_eq!(dropped, [false, false, false, true, false, false, false]);
    }

    #[test]
    fn u8_encoding_round_trips() {
        for kind in JobKind::ALL {
            assert_eq!(JobKind::from_u8(kind.to_u8()), Some(kind));
        }
        assert_eq!(JobKind::from_u8(7), None);
    }
}
