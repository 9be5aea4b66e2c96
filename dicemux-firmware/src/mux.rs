//! Multiplex interrupt glue
//!
//! The die table is a plain static of atomics shared with the driver.
//! Everything else the interrupt touches lives in [`MUX`], which only the
//! interrupt handlers and [`start`] ever lock.

use core::cell::RefCell;

use cortex_m_rt::exception;
use critical_section::Mutex;
use defmt::*;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};

use dicemux_core::{DieTable, Multiplexer};
use dicemux_hal_rp2040::{DicePort, MuxTimerBackend};

type DiceMux = Multiplexer<DicePort, MuxTimerBackend>;

/// Die state shared between the driver and the interrupt
pub static TABLE: DieTable = DieTable::new();

static MUX: Mutex<RefCell<Option<DiceMux>>> = Mutex::new(RefCell::new(None));

/// Hand the port and timer to the interrupt and start multiplexing
pub fn start(port: DicePort, timer: MuxTimerBackend) {
    let alarm = matches!(timer, MuxTimerBackend::Alarm(_));

    critical_section::with(|cs| {
        let mut mux = Multiplexer::new(port, timer);
        mux.start();
        MUX.borrow_ref_mut(cs).replace(mux);
    });

    if alarm {
        interrupt::TIMER_IRQ_1.set_priority(Priority::P1);
        // SAFETY: the handler state was installed above
        unsafe { interrupt::TIMER_IRQ_1.enable() };
    }
    info!("Multiplexing started ({})", if alarm { "alarm" } else { "systick" });
}

fn service() {
    critical_section::with(|cs| {
        if let Some(mux) = MUX.borrow_ref_mut(cs).as_mut() {
            mux.on_interrupt(&TABLE);
        }
    });
}

#[interrupt]
fn TIMER_IRQ_1() {
    service();
}

#[exception]
fn SysTick() {
    service();
}
