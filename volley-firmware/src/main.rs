//! Volley - Blaster Fire-Control Firmware
//!
//! Main firmware binary for RP2040-based flywheel blasters. Reads the
//! trigger, interlock and pusher switches, runs the fire-control tick every
//! millisecond and drives the flywheel and pusher ESCs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use volley_core::control::FireControl;
use volley_core::traits::Actuator;
use volley_drivers::input::GpioInputs;
use volley_drivers::motor::{Esc, EscPair};

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Volley firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // blaster.toml was validated by build.rs, so this only fails if the
    // generated constants and the core validation disagree
    let fire_config = unwrap!(config::fire_config());
    info!(
        "Configuration loaded: {} burst modes, initial mode {}, spool {}ms, min run {}ms",
        fire_config.mode_count(),
        fire_config.initial_mode,
        fire_config.timing.spool_ms,
        fire_config.timing.min_run_ms
    );
    let control = unwrap!(FireControl::new(fire_config));

    // Setup switch inputs, all wired to ground with internal pull-ups
    // Pin assignments are board-specific; order follows Channel::index
    let inputs = GpioInputs::new([
        Input::new(p.PIN_2, Pull::Up), // trigger
        Input::new(p.PIN_3, Pull::Up), // magazine
        Input::new(p.PIN_4, Pull::Up), // eject port
        Input::new(p.PIN_5, Pull::Up), // pusher home
        Input::new(p.PIN_6, Pull::Up), // chamber left
        Input::new(p.PIN_7, Pull::Up), // chamber right
        Input::new(p.PIN_8, Pull::Up), // rev (ready)
    ]);
    // GPIO9/GPIO10 are routed to the flywheel tach outputs but not read yet

    info!("Switch inputs initialized");

    // Setup ESC outputs: 50 Hz frame, pulse width set by the ESC driver
    // Pin assignments are board-specific (flywheel ESC: GPIO14, pusher ESC: GPIO16)
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = config::PWM_DIVIDER.into();
    pwm_config.top = config::PWM_TOP;
    pwm_config.compare_a = 0;

    let (flywheel_out, _) =
        Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm_config.clone()).split();
    let (pusher_out, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config).split();

    let flywheel = unwrap!(Esc::new(
        Actuator::Flywheel,
        unwrap!(flywheel_out),
        config::FLYWHEEL_ESC,
        config::FLYWHEEL_PROFILE,
    ));
    let pusher = unwrap!(Esc::new(
        Actuator::Pusher,
        unwrap!(pusher_out),
        config::PUSHER_ESC,
        config::PUSHER_PROFILE,
    ));

    let mut motors = EscPair::new(flywheel, pusher);
    if let Err(e) = motors.arm() {
        warn!("ESC arming failed: {:?}", e);
    }

    info!("ESC outputs armed");

    // On-board LED mirrors the pusher home switch
    let indicator = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner
        .spawn(tasks::control_task(control, inputs, motors, indicator))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
