use core::ptr;

/// The three parallel register planes of the interrupt controller. Each plane
/// holds one 16-bit word per group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Plane {
    /// Edge-polarity configuration
    Edge,
    /// 1 = delivery suppressed, 0 = enabled
    Mask,
    /// 1 = event latched; write-1-to-clear
    Pending,
}

/// Hardware port for the interrupt register file.
///
/// Every call is a single ordered register access with hardware side effects;
/// implementations must not cache, merge or reorder accesses. Group indices
/// are not validated: callers must stay within the configured group range
/// (`constants::GROUPS`). This is hardware addressing, not a managed
/// collection.
pub trait RegBank {
    fn read(&self, plane: Plane, group: usize) -> u16;
    fn write(&mut self, plane: Plane, group: usize, value: u16);
}

/// Return the group number for an interrupt identifier.
///
/// For the m68k boards this is just the high nibble of the number.
pub fn int_group(n: u8) -> usize {
    ((n >> 4) & 0x0F) as usize
}

/// Return the register bit for an interrupt identifier.
///
/// For the m68k boards this is just the bit selected by the low nibble.
pub fn int_mask(n: u8) -> u16 {
    1 << (n & 0x0F)
}

/// Memory-mapped binding of the register file, used by production firmware.
/// Each plane is `constants::GROUPS` consecutive 16-bit registers starting at
/// the given base.
pub struct MmioBank {
    edge: *mut u16,
    mask: *mut u16,
    pending: *mut u16,
}

impl MmioBank {
    /// # Safety
    ///
    /// Each base must point to `constants::GROUPS` consecutive 16-bit
    /// registers that stay mapped for the lifetime of the bank, and nothing
    /// else may access them while the bank is live.
    pub const unsafe fn new(edge: *mut u16, mask: *mut u16, pending: *mut u16) -> Self {
        MmioBank {
            edge,
            mask,
            pending,
        }
    }

    fn base(&self, plane: Plane) -> *mut u16 {
        match plane {
            Plane::Edge => self.edge,
            Plane::Mask => self.mask,
            Plane::Pending => self.pending,
        }
    }
}

impl RegBank for MmioBank {
    fn read(&self, plane: Plane, group: usize) -> u16 {
        // Safety: in range per the construction contract; volatile keeps the
        // access ordered and un-elided.
        unsafe { ptr::read_volatile(self.base(plane).add(group)) }
    }

    fn write(&mut self, plane: Plane, group: usize, value: u16) {
        // Safety: same contract as read.
        unsafe { ptr::write_volatile(self.base(plane).add(group), value) }
    }
}
