extern crate clap;
use crossbeam_channel::bounded;
use ctrlc; // exit using cntrl-c
use env_logger;
use log::{error, info, warn};

use rint_core::constants::{lines, UNHANDLED_QUEUE_DEPTH};
use rint_core::controller::{IntController, IntHandler};
use rint_core::sim::SimBank;

use std::cell::Cell;

// Simulated frame timing: channel A raises start-of-frame at 60 Hz
const FRAME_MICROS: u64 = 16_667;
const LINES_PER_FRAME: u32 = 8;

/// Counts invocations, standing in for a device-specific handler body.
struct TickHandler {
    label: &'static str,
    ticks: Cell<u64>,
}

impl TickHandler {
    fn new(label: &'static str) -> Self {
        TickHandler {
            label,
            ticks: Cell::new(0),
        }
    }
}

impl IntHandler for TickHandler {
    fn on_interrupt(&self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

/// Configures command-line interface using clap
fn get_cli_config<'a>() -> clap::ArgMatches<'a> {
    let description =
        "Host harness for the SBC interrupt controller, run against the simulated register bank";
    clap::App::new("Interrupt Controller Harness (RINT)")
        .version("0.1")
        .about(description)
        .arg(
            clap::Arg::with_name("frames")
                .long("frames")
                .takes_value(true)
                .help("Stop after simulating this many video frames (default: run until Ctrl-C)"),
        )
        .arg(
            clap::Arg::with_name("storm")
                .long("storm")
                .help("Also latch a line with no registered handler every frame"),
        )
        .get_matches()
}

fn main() {
    env_logger::init();

    // Set up Ctrl-C handler with channel communication
    let (signal_sender, signal_receiver) = bounded(1);
    let handler_result = ctrlc::set_handler(move || {
        if signal_sender.is_full() {
            std::process::exit(-1); // Emergency exit if channel blocked
        }
        let _send_result = signal_sender.send(());
    });

    if let Err(e) = handler_result {
        error!("Signal handler failed: {:?}", e);
        return;
    }

    let cli_matches = get_cli_config();
    let frame_limit: Option<u64> = match cli_matches.value_of("frames") {
        Some(raw) => match raw.parse() {
            Ok(count) => Some(count),
            Err(_) => {
                error!("Invalid frame count: {}", raw);
                return;
            }
        },
        None => None,
    };
    let storm = cli_matches.is_present("storm");

    // Diagnostics line for pending bits nobody handles
    let mut queue_instance: heapless::spsc::Queue<u8, UNHANDLED_QUEUE_DEPTH> =
        heapless::spsc::Queue::new();
    let (unhandled_tx, mut unhandled_rx) = queue_instance.split();

    let sof = TickHandler::new("start-of-frame");
    let sol = TickHandler::new("start-of-line");

    // Bring up the controller over the simulated bank, the way firmware
    // brings it up over the memory-mapped one
    let mut controller = IntController::new(SimBank::new());
    controller.init();
    controller.attach_diagnostics(unhandled_tx);

    controller.register(lines::INT_SOF_A, Some(&sof));
    controller.register(lines::INT_SOL_A, Some(&sol));
    controller.enable(lines::INT_SOF_A);
    controller.enable(lines::INT_SOL_A);

    // Main simulation loop: latch hardware events, then dispatch the way the
    // trap vector would
    let mut frame: u64 = 0;
    loop {
        if !signal_receiver.is_empty() {
            break;
        }
        if let Some(limit) = frame_limit {
            if frame >= limit {
                break;
            }
        }

        controller.bank_mut().latch(lines::INT_SOF_A);
        if frame % u64::from(LINES_PER_FRAME) == 0 {
            controller.bank_mut().latch(lines::INT_SOL_A);
        }
        if storm {
            // Nobody handles collisions; the bit stays latched and shows up
            // on the diagnostics queue every scan
            controller.bank_mut().latch(lines::INT_COL_A);
        }

        controller.dispatch_channel_a();

        while let Some(n) = unhandled_rx.dequeue() {
            warn!("unserviced interrupt 0x{:02x} left pending", n);
        }

        frame += 1;
        std::thread::sleep(std::time::Duration::from_micros(FRAME_MICROS));
    }

    for handler in [&sof, &sol].iter() {
        info!(
            "{}: {} interrupts serviced over {} frames",
            handler.label,
            handler.ticks.get(),
            frame
        );
    }
}
