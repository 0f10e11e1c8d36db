use crate::bank::{int_group, int_mask, Plane, RegBank};
use crate::constants::{reset, GROUPS};

/// In-memory register file with the exact bit semantics of the hardware,
/// including write-1-to-clear on the PENDING plane. Used by host-side tests
/// and the bring-up harness in place of the memory-mapped bank.
pub struct SimBank {
    edge: [u16; GROUPS],
    mask: [u16; GROUPS],
    pending: [u16; GROUPS],
}

impl SimBank {
    /// Creates a bank in the documented post-reset state.
    pub fn new() -> Self {
        SimBank {
            edge: [reset::EDGE_RESET; GROUPS],
            mask: [reset::MASK_RESET; GROUPS],
            pending: [0; GROUPS],
        }
    }

    /// Creates a bank in an arbitrary state, for modelling a warm restart
    /// where nothing about the register file can be assumed.
    pub fn warm(edge: [u16; GROUPS], mask: [u16; GROUPS], pending: [u16; GROUPS]) -> Self {
        SimBank {
            edge,
            mask,
            pending,
        }
    }

    /// Hardware-side event: latch the pending bit for interrupt `n`. This is
    /// what a device raising its line does; software can only clear bits.
    pub fn latch(&mut self, n: u8) {
        self.pending[int_group(n)] |= int_mask(n);
    }
}

impl RegBank for SimBank {
    fn read(&self, plane: Plane, group: usize) -> u16 {
        match plane {
            Plane::Edge => self.edge[group],
            Plane::Mask => self.mask[group],
            Plane::Pending => self.pending[group],
        }
    }

    fn write(&mut self, plane: Plane, group: usize, value: u16) {
        match plane {
            Plane::Edge => self.edge[group] = value,
            Plane::Mask => self.mask[group] = value,
            // Write-1-to-clear: set bits retire latched events, zero bits are
            // inert.
            Plane::Pending => self.pending[group] &= !value,
        }
    }
}
