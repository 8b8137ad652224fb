//! Fire control task
//!
//! Runs the fire-control tick at a fixed rate: samples the input pins,
//! advances the controllers, writes both ESCs and drives the indicator.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Instant, Ticker};

use volley_core::config::ShotCount;
use volley_core::control::{FireControl, TickOutput};
use volley_core::safety::{InterlockEvent, InterlockMonitor};
use volley_core::traits::MotorCommand;
use volley_drivers::input::GpioInputs;
use volley_drivers::motor::EscPair;

/// Control tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// ESC outputs as wired on the board
pub type Motors = EscPair<PwmOutput<'static>, PwmOutput<'static>>;

/// Fire control task
///
/// Owns the whole control path; nothing else touches the pins or ESCs.
#[embassy_executor::task]
pub async fn control_task(
    mut control: FireControl,
    mut inputs: GpioInputs<Input<'static>>,
    mut motors: Motors,
    mut indicator: Output<'static>,
) {
    info!("Control task started");

    let mut interlock = InterlockMonitor::new();
    let mut last = TickOutput::default();
    let mut sink_errors: u32 = 0;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        // Millisecond clock wraps after ~49 days; the core handles rollover
        let now = Instant::now().as_millis() as u32;

        let output = match control.step(&mut inputs, &mut motors, now) {
            Ok(output) => output,
            Err(e) => {
                sink_errors = sink_errors.saturating_add(1);
                warn!("ESC write failed: {:?} ({} total)", e, sink_errors);
                // Commands were still decided; keep tracking state
                *control.last_output()
            }
        };

        indicator.set_level(output.indicator.into());

        match interlock.update(output.interlock) {
            Some(InterlockEvent::Opened(fault)) => {
                warn!(
                    "Interlock open: {:?} (fault #{})",
                    fault,
                    interlock.fault_count()
                );
            }
            Some(InterlockEvent::Closed) => info!("Interlock closed"),
            None => {}
        }

        log_changes(&last, &output);
        last = output;

        ticker.next().await;
    }
}

/// Log queue loads and command transitions between two ticks
fn log_changes(prev: &TickOutput, next: &TickOutput) {
    if prev.remaining.is_empty() && !next.remaining.is_empty() {
        match next.remaining {
            ShotCount::Finite(n) => debug!("Burst loaded: {} shots", n),
            ShotCount::Unbounded => debug!("Burst loaded: full auto"),
        }
    }

    if prev.flywheel != next.flywheel {
        debug!("Flywheel: {:?} -> {:?}", prev.flywheel, next.flywheel);
    }

    if prev.pusher != next.pusher {
        trace!("Pusher: {:?} -> {:?}", prev.pusher, next.pusher);
        if next.pusher == MotorCommand::Return {
            trace!("Pusher backing off to home");
        }
    }
}
