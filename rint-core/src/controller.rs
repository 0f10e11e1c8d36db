use crate::bank::{int_group, int_mask, Plane, RegBank};
use crate::constants::{channels, reset, GROUPS, MAX_HANDLERS, UNHANDLED_QUEUE_DEPTH};

use heapless::spsc::Producer;
use log::{debug, warn};

/// An installed interrupt handler: invoked with no arguments and no return
/// value while the dispatching trap is live, so bodies must be short and must
/// not block.
pub trait IntHandler {
    fn on_interrupt(&self);
}

/// The interrupt controller context: the register bank plus the table of
/// installed handlers.
///
/// One instance owns the whole controller; production firmware builds it over
/// `bank::MmioBank`, tests and the host harness over `sim::SimBank`. Nothing
/// here blocks or suspends: every operation is a bounded number of register
/// accesses, plus synchronous handler calls during dispatch.
pub struct IntController<'a, B: RegBank> {
    bank: B,
    handlers: [Option<&'a dyn IntHandler>; MAX_HANDLERS],
    unhandled_tx: Option<Producer<'a, u8, UNHANDLED_QUEUE_DEPTH>>,
}

impl<'a, B: RegBank> IntController<'a, B> {
    /// Creates a controller with an empty handler table. Call `init` before
    /// enabling anything; a warm restart leaves the register file in an
    /// unknown state.
    pub fn new(bank: B) -> Self {
        IntController {
            bank,
            handlers: [None; MAX_HANDLERS],
            unhandled_tx: None,
        }
    }

    /// Attach a diagnostics queue. Dispatch enqueues the identifier of every
    /// pending interrupt it finds with no installed handler; the foreground
    /// drains the consumer end. A full queue drops entries rather than stall
    /// the dispatcher.
    pub fn attach_diagnostics(&mut self, tx: Producer<'a, u8, UNHANDLED_QUEUE_DEPTH>) {
        self.unhandled_tx = Some(tx);
    }

    /// Hardware-side access to the register bank, for simulation and
    /// bring-up.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Initialize the interrupt registers.
    ///
    /// Clears the handler table and re-asserts the documented reset state:
    /// EDGE all ones, MASK all ones (everything disabled). The controller is
    /// normally already there after a cold reset, but a warm restart can
    /// leave stale values, so PENDING is also cleared here to retire any bit
    /// latched before or during init.
    pub fn init(&mut self) {
        for slot in self.handlers.iter_mut() {
            *slot = None;
        }

        for group in 0..GROUPS {
            self.bank.write(Plane::Edge, group, reset::EDGE_RESET);
            self.bank.write(Plane::Mask, group, reset::MASK_RESET);
            self.bank.write(Plane::Pending, group, reset::PENDING_CLEAR_ALL);
        }

        debug!("interrupt controller initialized, all lines masked");
    }

    /// Disable an interrupt by setting its mask bit.
    ///
    /// `n` is the interrupt identifier: n[7..4] = group, n[3..0] = line. The
    /// group must be within the configured range; this is not checked.
    pub fn disable(&mut self, n: u8) {
        let group = int_group(n);
        let mask = int_mask(n);
        let word = self.bank.read(Plane::Mask, group);
        self.bank.write(Plane::Mask, group, word | mask);
    }

    /// Enable an interrupt by clearing its mask bit.
    ///
    /// A masked line can still latch its pending bit; enabling a line whose
    /// bit is already latched lets the processor take the interrupt at once.
    pub fn enable(&mut self, n: u8) {
        let group = int_group(n);
        let mask = int_mask(n);
        let word = self.bank.read(Plane::Mask, group);
        self.bank.write(Plane::Mask, group, word & !mask);
    }

    /// Register a handler for interrupt `n`, returning the previously
    /// installed one so callers can chain or restore it. `None` uninstalls.
    ///
    /// Identifiers at or beyond the handler table are a silent no-op that
    /// returns `None`, matching the hardware limit. Callers swapping the
    /// handler of a live line should `disable(n)` around the swap so a
    /// dispatch never races the update.
    pub fn register(
        &mut self,
        n: u8,
        handler: Option<&'a dyn IntHandler>,
    ) -> Option<&'a dyn IntHandler> {
        let slot = usize::from(n);
        if slot < MAX_HANDLERS {
            let previous = self.handlers[slot];
            self.handlers[slot] = handler;
            previous
        } else {
            None
        }
    }

    /// True if interrupt `n` has an event latched, whether or not it is
    /// masked.
    pub fn pending(&self, n: u8) -> bool {
        self.bank.read(Plane::Pending, int_group(n)) & int_mask(n) != 0
    }

    /// Acknowledge interrupt `n`, clearing its pending bit. The plane is
    /// write-1-to-clear, so acknowledging a bit that is not latched has no
    /// effect, and no other bit is disturbed.
    pub fn acknowledge(&mut self, n: u8) {
        self.bank.write(Plane::Pending, int_group(n), int_mask(n));
    }

    /// Dispatcher for channel A interrupts (group 0, bits 0-7).
    pub fn dispatch_channel_a(&mut self) {
        self.dispatch_range(
            channels::CHANNEL_GROUP,
            channels::CHANNEL_A_BASE,
            channels::CHANNEL_WIDTH,
        );
    }

    /// Dispatcher for channel B interrupts (group 0, bits 8-15).
    pub fn dispatch_channel_b(&mut self) {
        self.dispatch_range(
            channels::CHANNEL_GROUP,
            channels::CHANNEL_B_BASE,
            channels::CHANNEL_WIDTH,
        );
    }

    /// Scan-and-invoke for one fixed bit range of a group, invoked from the
    /// platform trap vector for that channel.
    ///
    /// PENDING is read exactly once and the scan works on that snapshot: a
    /// bit that re-latches while a handler runs is not serviced twice in the
    /// same scan, it re-triggers the trap and gets a fresh dispatch. Bits are
    /// scanned ascending, so lower identifiers are serviced first. Each
    /// serviced bit is acknowledged only after its handler returns,
    /// preserving level-to-edge re-arming. A pending bit with no installed
    /// handler is deliberately left latched so the condition stays visible;
    /// see the diagnostics queue.
    pub fn dispatch_range(&mut self, group: usize, base: u8, width: u8) {
        let snapshot = (self.bank.read(Plane::Pending, group) >> base) & range_mask(width);
        if snapshot == 0 {
            return;
        }

        let mut mask: u16 = 1;
        for line in 0..width {
            if snapshot & mask != 0 {
                let n = ((group as u8) << 4) | (base + line);
                match self.handlers.get(usize::from(n)).copied().flatten() {
                    Some(handler) => {
                        handler.on_interrupt();
                        self.acknowledge(n);
                    }
                    None => {
                        // Left latched on purpose: an unserviced source stays
                        // observable instead of being discarded. A noisy line
                        // with no handler will re-appear on every scan until
                        // someone registers or disables it.
                        warn!("no handler installed for pending interrupt 0x{:02x}", n);
                        if let Some(tx) = &mut self.unhandled_tx {
                            let _ = tx.enqueue(n);
                        }
                    }
                }
            }
            mask <<= 1;
        }
    }
}

fn range_mask(width: u8) -> u16 {
    if width >= 16 {
        0xFFFF
    } else {
        (1 << width) - 1
    }
}
