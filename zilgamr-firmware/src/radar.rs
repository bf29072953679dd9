//! Radar loop
//!
//! Boots once, then sweeps, reports and pauses forever. Every call blocks;
//! nothing else runs on the executor. Faults are logged and the loop moves
//! on.

use defmt::*;
use embedded_hal::delay::DelayNs;
use embedded_io::Write;

use zilgamr_core::traits::{Actuator, RadarDisplay, RangeSensor};
use zilgamr_core::SweepController;

pub fn run<S, A, R, W, D>(mut radar: SweepController<S, A, R, W, D>) -> !
where
    S: RangeSensor,
    A: Actuator,
    R: RadarDisplay,
    W: Write,
    D: DelayNs,
{
    info!("Homing servo, showing banner");
    if let Err(e) = radar.boot() {
        warn!("Boot sequence failed: {}", e);
    }

    loop {
        if let Err(e) = radar.begin_cycle() {
            warn!("Backdrop draw failed: {}", e);
        }
        info!("Sweep {} started", radar.cycles() + 1);

        loop {
            match radar.step() {
                Ok(Some(step)) => {
                    debug!(
                        "angle={} servo={} dist={}cm",
                        step.sample.angle,
                        step.servo_angle,
                        step.sample.distance.cm()
                    );
                    if let Some(marker) = step.marker {
                        trace!("detection at ({}, {})", marker.x, marker.y);
                    }
                    if !step.stored {
                        trace!("store full, sample dropped");
                    }
                }
                Ok(None) => break,
                Err(e) => warn!("Step failed: {}", e),
            }
        }

        match radar.report() {
            Ok(lines) => debug!("Scan log: {} lines", lines),
            Err(e) => warn!("Report failed: {}", e),
        }

        let summary = radar.finish_cycle();
        info!(
            "Cycle {} done: {} steps, {} stored, {} dropped, {} detections, {} faults",
            summary.cycle,
            summary.steps,
            summary.stored,
            summary.dropped,
            summary.detections,
            summary.faults
        );
    }
}
