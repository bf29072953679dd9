//! Sweep controller
//!
//! Owns the sensor, servo, display, serial port and delay, and walks the
//! phase machine: boot once, then sweep, report and pause forever.
//!
//! Every hardware call blocks. A failed step is not retried; the phase has
//! already moved on to the next angle when the error is returned.

use embedded_hal::delay::DelayNs;
use embedded_io::Write;

use crate::config::{ScreenGeometry, SweepConfig, SAMPLE_CAPACITY};
use crate::error::SweepError;
use crate::geometry::{self, ScreenPoint};
use crate::report;
use crate::scan::{Sample, SampleStore};
use crate::state::{Event, Phase};
use crate::traits::{Actuator, RadarDisplay, RadarDisplayExt, RangeSensor};

/// What happened during one sweep step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepStep {
    /// Logical angle and measured distance
    pub sample: Sample,
    /// Command sent to the servo
    pub servo_angle: u8,
    /// Tip of the sweep needle
    pub sweep_end: ScreenPoint,
    /// Detection marker, if one was drawn
    pub marker: Option<ScreenPoint>,
    /// False once the store is full
    pub stored: bool,
}

/// Totals for one finished cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSummary {
    /// 1-based cycle number
    pub cycle: u32,
    pub steps: u16,
    pub stored: u16,
    pub dropped: u16,
    pub detections: u16,
    pub lines_reported: u16,
    /// Operations that returned an error
    pub faults: u16,
}

/// Drives the radar
pub struct SweepController<S, A, R, W, D, const N: usize = SAMPLE_CAPACITY> {
    sensor: S,
    actuator: A,
    display: R,
    serial: W,
    delay: D,
    /// Samples of the current cycle
    store: SampleStore<N>,
    phase: Phase,
    sweep: SweepConfig,
    geometry: ScreenGeometry,
    /// Completed cycles
    cycles: u32,
    /// Running totals of the current cycle
    current: CycleSummary,
}

impl<S, A, R, W, D, const N: usize> SweepController<S, A, R, W, D, N>
where
    S: RangeSensor,
    A: Actuator,
    R: RadarDisplay,
    W: Write,
    D: DelayNs,
{
    /// Create a controller with the default sweep and screen layout
    pub fn new(sensor: S, actuator: A, display: R, serial: W, delay: D) -> Self {
        Self::with_config(
            sensor,
            actuator,
            display,
            serial,
            delay,
            SweepConfig::DEFAULT,
            ScreenGeometry::DEFAULT,
        )
    }

    pub fn with_config(
        sensor: S,
        actuator: A,
        display: R,
        serial: W,
        delay: D,
        sweep: SweepConfig,
        geometry: ScreenGeometry,
    ) -> Self {
        Self {
            sensor,
            actuator,
            display,
            serial,
            delay,
            store: SampleStore::new(),
            phase: Phase::Boot,
            sweep,
            geometry,
            cycles: 0,
            current: CycleSummary::default(),
        }
    }

    /// Centre the servo and show the splash screen
    ///
    /// The controller is idle afterwards even if a step of the sequence
    /// failed.
    pub fn boot(&mut self) -> Result<(), SweepError> {
        if self.phase != Phase::Boot {
            return Ok(());
        }

        let result = self.boot_sequence();
        self.transition(Event::BootComplete);
        result
    }

    fn boot_sequence(&mut self) -> Result<(), SweepError> {
        self.actuator.set_angle(self.sweep.servo_home)?;
        self.display
            .draw_startup_banner()
            .map_err(|_| SweepError::Display)?;
        self.delay.delay_ms(self.sweep.banner_dwell_ms);
        self.display.clear().map_err(|_| SweepError::Display)
    }

    /// Draw the radar backdrop and start a sweep at the first angle
    ///
    /// Does nothing unless idle.
    pub fn begin_cycle(&mut self) -> Result<(), SweepError> {
        if self.phase != Phase::Idle {
            return Ok(());
        }

        self.current = CycleSummary {
            cycle: self.cycles + 1,
            ..CycleSummary::default()
        };
        self.transition(Event::CycleStart);

        let result = self
            .display
            .draw_backdrop()
            .map_err(|_| SweepError::Display);
        self.count_fault(result)
    }

    /// Sample the next angle
    ///
    /// Returns `None` once the sweep range is exhausted.
    pub fn step(&mut self) -> Result<Option<SweepStep>, SweepError> {
        let result = self.sample_next();
        self.count_fault(result)
    }

    fn sample_next(&mut self) -> Result<Option<SweepStep>, SweepError> {
        let Some(angle) = self.phase.angle() else {
            return Ok(None);
        };
        self.transition(Event::StepComplete);
        self.current.steps += 1;

        let servo_angle = geometry::servo_angle(angle, &self.sweep);
        self.actuator.set_angle(servo_angle)?;
        self.delay.delay_ms(self.sweep.servo_settle_ms);

        let distance = self.sensor.measure_distance()?;

        self.display
            .flash_sweep_line(angle, &mut self.delay, self.sweep.trace_dwell_ms)
            .map_err(|_| SweepError::Display)?;

        let marker = geometry::detection_point(&self.geometry, angle, distance);
        if marker.is_some() {
            self.display
                .draw_detection(angle, distance)
                .map_err(|_| SweepError::Display)?;
            self.current.detections += 1;
        }

        let sample = Sample::new(angle, distance);
        let stored = self.store.append(sample);
        if !stored {
            self.current.dropped += 1;
        }

        Ok(Some(SweepStep {
            sample,
            servo_angle,
            sweep_end: geometry::sweep_endpoint(&self.geometry, angle),
            marker,
            stored,
        }))
    }

    /// Send the scan log
    ///
    /// Cuts a running sweep short. Returns the number of serial lines
    /// written; zero when there is nothing to report.
    pub fn report(&mut self) -> Result<usize, SweepError> {
        if self.phase.is_sweeping() {
            self.transition(Event::RangeExhausted);
        }
        if self.phase != Phase::Reporting {
            return Ok(0);
        }

        let result = report::report(
            &mut self.display,
            &mut self.serial,
            self.store.as_slice(),
            self.sweep.screen_log,
        );
        let lines = self.count_fault(result)?;
        self.current.lines_reported = lines as u16;
        Ok(lines)
    }

    /// Pause, empty the store and return to idle
    pub fn finish_cycle(&mut self) -> CycleSummary {
        self.delay.delay_ms(self.sweep.cycle_pause_ms);

        let mut summary = self.current;
        summary.stored = self.store.len() as u16;
        self.store.reset();

        if self.phase == Phase::Reporting {
            self.cycles += 1;
        }
        self.transition(Event::ReportComplete);
        summary
    }

    /// Run one complete cycle: backdrop, sweep, report, pause
    ///
    /// Faults do not end the cycle early. A failed step is skipped and the
    /// sweep carries on; every failure is counted in
    /// [`CycleSummary::faults`].
    pub fn run_cycle(&mut self) -> CycleSummary {
        self.begin_cycle().ok();
        while !matches!(self.step(), Ok(None)) {}
        self.report().ok();
        self.finish_cycle()
    }

    fn count_fault<T>(&mut self, result: Result<T, SweepError>) -> Result<T, SweepError> {
        if result.is_err() {
            self.current.faults += 1;
        }
        result
    }

    fn transition(&mut self, event: Event) {
        self.phase = self.phase.transition(event, &self.sweep);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Samples collected so far in this cycle
    pub fn samples(&self) -> &SampleStore<N> {
        &self.store
    }

    pub fn sweep_config(&self) -> &SweepConfig {
        &self.sweep
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn display(&self) -> &R {
        &self.display
    }

    pub fn serial(&self) -> &W {
        &self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Distance;
    use crate::traits::{ActuatorError, Ink, SensorError};
    use core::convert::Infallible;
    use zilgamr_protocol::ScanLine;

    /// Sensor that replays a fixed list of readings, wrapping around
    struct MockSensor {
        readings: &'static [u16],
        next: usize,
        fail: bool,
        /// Fail only the n-th measurement (0-based)
        fail_at: Option<usize>,
        calls: usize,
    }

    impl MockSensor {
        fn constant(cm: &'static [u16]) -> Self {
            Self {
                readings: cm,
                next: 0,
                fail: false,
                fail_at: None,
                calls: 0,
            }
        }
    }

    impl RangeSensor for MockSensor {
        fn measure_distance(&mut self) -> Result<Distance, SensorError> {
            let call = self.calls;
            self.calls += 1;
            if self.fail || self.fail_at == Some(call) {
                return Err(SensorError::Pin);
            }
            let cm = self.readings[self.next % self.readings.len()];
            self.next += 1;
            Ok(Distance::from_cm(cm))
        }
    }

    #[derive(Default)]
    struct MockServo {
        commands: heapless::Vec<u8, 512>,
    }

    impl Actuator for MockServo {
        fn set_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
            self.commands.push(degrees).map_err(|_| ActuatorError::Pwm)
        }
    }

    #[derive(Default)]
    struct MockDisplay {
        banners: usize,
        clears: usize,
        grids: usize,
        labels: usize,
        traces: usize,
        erases: usize,
        detections: usize,
        headers: usize,
        last_trace: Option<i16>,
    }

    impl RadarDisplay for MockDisplay {
        type Error = ();

        fn draw_startup_banner(&mut self) -> Result<(), ()> {
            self.banners += 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), ()> {
            self.clears += 1;
            Ok(())
        }

        fn draw_grid(&mut self) -> Result<(), ()> {
            self.grids += 1;
            Ok(())
        }

        fn draw_range_labels(&mut self) -> Result<(), ()> {
            self.labels += 1;
            Ok(())
        }

        fn draw_sweep_line(&mut self, angle: i16, ink: Ink) -> Result<(), ()> {
            match ink {
                Ink::Trace => {
                    self.traces += 1;
                    self.last_trace = Some(angle);
                }
                Ink::Erase => self.erases += 1,
            }
            Ok(())
        }

        fn draw_detection(&mut self, _angle: i16, distance: Distance) -> Result<(), ()> {
            assert!(distance.is_visible());
            self.detections += 1;
            Ok(())
        }

        fn draw_scan_header(&mut self) -> Result<(), ()> {
            self.headers += 1;
            Ok(())
        }

        fn draw_scan_log(&mut self, _samples: &[Sample]) -> Result<(), ()> {
            Ok(())
        }
    }

    struct MockSerial {
        bytes: heapless::Vec<u8, 8192>,
    }

    impl embedded_io::ErrorType for MockSerial {
        type Error = Infallible;
    }

    impl Write for MockSerial {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.bytes.extend_from_slice(buf).unwrap();
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl MockSerial {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.bytes).unwrap()
        }
    }

    /// Delay that only adds up the requested time
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl MockDelay {
        fn total_ms(&self) -> u64 {
            self.total_ns / 1_000_000
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ns += ms as u64 * 1_000_000;
        }
    }

    type TestController = SweepController<MockSensor, MockServo, MockDisplay, MockSerial, MockDelay>;

    fn controller(readings: &'static [u16]) -> TestController {
        SweepController::new(
            MockSensor::constant(readings),
            MockServo::default(),
            MockDisplay::default(),
            MockSerial {
                bytes: heapless::Vec::new(),
            },
            MockDelay::default(),
        )
    }

    #[test]
    fn test_boot_sequence() {
        let mut radar = controller(&[999]);
        radar.boot().unwrap();

        assert_eq!(radar.phase(), Phase::Idle);
        assert_eq!(radar.actuator.commands.as_slice(), &[90]);
        assert_eq!(radar.display.banners, 1);
        assert_eq!(radar.display.clears, 1);
        assert_eq!(radar.delay.total_ms(), 2000);

        // Booting twice is a no-op
        radar.boot().unwrap();
        assert_eq!(radar.display.banners, 1);
    }

    #[test]
    fn test_failed_boot_still_sweeps() {
        let mut radar = controller(&[999]);
        radar.actuator.commands.extend_from_slice(&[0; 512]).unwrap();

        assert_eq!(radar.boot(), Err(SweepError::Actuator(ActuatorError::Pwm)));
        assert_eq!(radar.phase(), Phase::Idle);
        assert_eq!(radar.display.banners, 0);
    }

    #[test]
    fn test_no_echo_sweep() {
        let mut radar = controller(&[999]);
        radar.boot().unwrap();
        let summary = radar.run_cycle();

        assert_eq!(summary.cycle, 1);
        assert_eq!(summary.steps, 136);
        assert_eq!(summary.stored, 91);
        assert_eq!(summary.dropped, 45);
        assert_eq!(summary.detections, 0);
        assert_eq!(summary.lines_reported, 91);
        assert_eq!(radar.display.detections, 0);

        let text = radar.serial.text();
        assert_eq!(text.lines().count(), 91);
        assert!(text.lines().all(|l| l.ends_with("Dist: 999")));
    }

    #[test]
    fn test_close_object_sweep() {
        let mut radar = controller(&[50]);
        radar.boot().unwrap();
        let summary = radar.run_cycle();

        // Markers are drawn for every step, stored or not
        assert_eq!(summary.detections, 136);
        assert_eq!(radar.display.detections, 136);
        assert_eq!(summary.stored, 91);
    }

    #[test]
    fn test_first_step() {
        let mut radar = controller(&[50]);
        radar.boot().unwrap();
        radar.begin_cycle().unwrap();

        assert_eq!(radar.display.grids, 1);
        assert_eq!(radar.display.labels, 1);

        let step = radar.step().unwrap().unwrap();
        assert_eq!(step.sample, Sample::new(-180, Distance::from_cm(50)));
        assert_eq!(step.servo_angle, 0);
        assert_eq!(step.sweep_end, ScreenPoint::new(-25, 118));
        // 80 - 57.5 rounds away from zero
        assert_eq!(step.marker, Some(ScreenPoint::new(23, 118)));
        assert!(step.stored);
        assert_eq!(radar.phase(), Phase::Sweeping { angle: -178 });
        assert_eq!(radar.display.last_trace, Some(-180));
        assert_eq!(radar.display.traces, radar.display.erases);
    }

    #[test]
    fn test_logged_angles_are_logical() {
        let mut radar = controller(&[12, 999, 0]);
        radar.boot().unwrap();
        radar.run_cycle();

        let mut lines = radar.serial.text().lines();
        assert_eq!(
            ScanLine::parse(lines.next().unwrap()).unwrap(),
            ScanLine::new(-180, 12)
        );
        assert_eq!(
            ScanLine::parse(lines.next().unwrap()).unwrap(),
            ScanLine::new(-178, 999)
        );
        assert_eq!(
            ScanLine::parse(lines.next().unwrap()).unwrap(),
            ScanLine::new(-176, 0)
        );
        // 91st stored sample is at -180 + 90 * 2
        assert_eq!(ScanLine::parse(lines.last().unwrap()).unwrap().angle, 0);
    }

    #[test]
    fn test_servo_commands_cover_full_travel() {
        let mut radar = controller(&[999]);
        radar.boot().unwrap();
        radar.run_cycle();

        let commands = radar.actuator.commands.as_slice();
        assert_eq!(commands.len(), 1 + 136);
        assert_eq!(commands[1], 0);
        assert_eq!(commands[2], 1);
        assert_eq!(commands[3], 3);
        assert_eq!(*commands.last().unwrap(), 180);
        assert!(commands[1..].windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_cycle_timing() {
        let mut radar = controller(&[999]);
        radar.boot().unwrap();
        radar.run_cycle();

        // boot + 136 * (settle + dwell) + pause
        assert_eq!(radar.delay.total_ms(), 2000 + 136 * 50 + 1000);
    }

    #[test]
    fn test_cycles_repeat() {
        let mut radar = controller(&[30, 999]);
        radar.boot().unwrap();

        let first = radar.run_cycle();
        assert!(radar.samples().is_empty());
        assert_eq!(radar.phase(), Phase::Idle);

        let second = radar.run_cycle();
        assert_eq!(second.cycle, 2);
        assert_eq!(radar.cycles(), 2);
        assert_eq!(first.stored, second.stored);
        assert_eq!(first.detections, second.detections);

        let text = radar.serial.text();
        let half = text.len() / 2;
        assert_eq!(&text[..half], &text[half..]);

        // Backdrop redrawn each cycle, screen cleared before each report
        assert_eq!(radar.display.grids, 2);
        assert_eq!(radar.display.headers, 2);
        assert_eq!(radar.display.clears, 1 + 2);

        radar.begin_cycle().unwrap();
        assert_eq!(radar.phase(), Phase::Sweeping { angle: -180 });
    }

    #[test]
    fn test_report_cuts_sweep_short() {
        let mut radar = controller(&[40]);
        radar.boot().unwrap();
        radar.begin_cycle().unwrap();
        for _ in 0..3 {
            radar.step().unwrap();
        }

        assert_eq!(radar.report().unwrap(), 3);
        assert_eq!(radar.phase(), Phase::Reporting);
        assert_eq!(radar.step().unwrap(), None);

        let summary = radar.finish_cycle();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.stored, 3);
        assert_eq!(radar.phase(), Phase::Idle);
    }

    #[test]
    fn test_sensor_fault_skips_step() {
        let mut radar = controller(&[20]);
        radar.boot().unwrap();
        radar.begin_cycle().unwrap();

        radar.sensor.fail = true;
        assert_eq!(radar.step(), Err(SweepError::Sensor(SensorError::Pin)));
        assert_eq!(radar.phase(), Phase::Sweeping { angle: -178 });
        assert!(radar.samples().is_empty());

        radar.sensor.fail = false;
        let step = radar.step().unwrap().unwrap();
        assert_eq!(step.sample.angle, -178);
    }

    #[test]
    fn test_step_fault_does_not_end_cycle() {
        let mut radar = controller(&[999]);
        radar.sensor.fail_at = Some(3);
        radar.boot().unwrap();

        let first = radar.run_cycle();
        assert_eq!(first.steps, 136);
        assert_eq!(first.faults, 1);
        // 135 samples for 136 steps: 91 kept, 44 dropped
        assert_eq!(first.stored, 91);
        assert_eq!(first.dropped, 44);
        assert_eq!(first.lines_reported, 91);
        assert_eq!(radar.phase(), Phase::Idle);
        assert_eq!(radar.cycles(), 1);

        // The next cycle starts from a fresh backdrop at -180
        let second = radar.run_cycle();
        assert_eq!(second.cycle, 2);
        assert_eq!(second.faults, 0);
        assert_eq!(second.steps, 136);
        assert_eq!(second.stored + second.dropped, second.steps);
        assert_eq!(radar.display.grids, 2);
    }

    #[test]
    fn test_idle_controller_does_nothing() {
        let mut radar = controller(&[20]);
        assert_eq!(radar.step().unwrap(), None);
        assert_eq!(radar.report().unwrap(), 0);
        // Cannot start before boot
        radar.begin_cycle().unwrap();
        assert_eq!(radar.phase(), Phase::Boot);
    }
}
