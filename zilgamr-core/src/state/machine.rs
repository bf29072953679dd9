//! Phase definition

use super::events::Event;
use crate::config::SweepConfig;

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on: servo not homed, splash not shown
    Boot,
    /// Between cycles
    Idle,
    /// Sweeping; `angle` is the next logical angle to sample
    Sweeping { angle: i16 },
    /// Range exhausted, scan log pending
    Reporting,
}

impl Phase {
    /// Check if a sweep step is pending
    pub fn is_sweeping(&self) -> bool {
        matches!(self, Phase::Sweeping { .. })
    }

    /// Logical angle of the pending step, if sweeping
    pub fn angle(&self) -> Option<i16> {
        match self {
            Phase::Sweeping { angle } => Some(*angle),
            _ => None,
        }
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event, sweep: &SweepConfig) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Boot, BootComplete) => Idle,

            (Idle, CycleStart) => {
                if sweep.step_count() == 0 {
                    Reporting
                } else {
                    Sweeping {
                        angle: sweep.start_angle,
                    }
                }
            }

            (Sweeping { angle }, StepComplete) => {
                let next = angle as i32 + sweep.step_deg as i32;
                if next > sweep.end_angle as i32 {
                    Reporting
                } else {
                    Sweeping { angle: next as i16 }
                }
            }

            (Sweeping { .. }, RangeExhausted) => Reporting,

            (Reporting, ReportComplete) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}
