//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Servo homed and splash screen shown
    BootComplete,
    /// Backdrop drawn, start sweeping
    CycleStart,
    /// One angular step finished
    StepComplete,
    /// Sweep cut short, report what was collected
    RangeExhausted,
    /// Scan log sent and store cleared
    ReportComplete,
}
