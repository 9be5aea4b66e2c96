//! dicemux - Multiplexed LED Dice Firmware
//!
//! Main firmware binary for RP2040-based dice boards. Up to five dice
//! share four segment lines; each die has a select line that doubles as a
//! push-button input.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use dicemux_core::config::TimerSelect;
use dicemux_core::DiceDriver;
use dicemux_hal_rp2040::{AlarmTimer, DicePort, MuxTimerBackend, SegmentPin, SelectPin, SysTickTimer};

mod channels;
mod config;
mod mux;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("dicemux firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let settings = config::load_settings();

    // Board wiring: segment lines on GPIO2-5, die selects on GPIO6-10
    let port = DicePort::new(
        [
            SegmentPin::new(p.PIN_2),
            SegmentPin::new(p.PIN_3),
            SegmentPin::new(p.PIN_4),
            SegmentPin::new(p.PIN_5),
        ],
        [
            SelectPin::new(p.PIN_6),
            SelectPin::new(p.PIN_7),
            SelectPin::new(p.PIN_8),
            SelectPin::new(p.PIN_9),
            SelectPin::new(p.PIN_10),
        ],
    );

    // Table must be in its start-up state before the first interrupt
    let mut driver = DiceDriver::new(&mux::TABLE);
    driver.apply(&settings);

    let timer = match settings.timer {
        TimerSelect::FreeRunning => MuxTimerBackend::Alarm(AlarmTimer::new()),
        TimerSelect::OneShot => match cortex_m::Peripherals::take() {
            Some(core) => MuxTimerBackend::SysTick(SysTickTimer::new(
                core.SYST,
                embassy_rp::clocks::clk_sys_freq(),
            )),
            None => {
                warn!("SysTick unavailable, using the TIMER alarm");
                MuxTimerBackend::Alarm(AlarmTimer::new())
            }
        },
    };
    mux::start(port, timer);

    channels::DRIVER.lock().await.replace(driver);

    tasks::self_test().await;

    // Spawn tasks
    spawner.spawn(tasks::roll_task(settings.roll)).unwrap();
    spawner
        .spawn(tasks::switch_task(settings.switch_poll_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
