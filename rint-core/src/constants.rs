// Geometry of the interrupt controller register file
pub const GROUPS: usize = 3;
pub const LINES_PER_GROUP: usize = 16;

// Capacity of the handler table: three groups of sixteen lines
pub const MAX_HANDLERS: usize = GROUPS * LINES_PER_GROUP;

// Depth of the unhandled-interrupt diagnostic queue
pub const UNHANDLED_QUEUE_DEPTH: usize = 8;

pub mod reset {
    // Documented post-reset state of the controller. init() re-asserts these
    // because a warm restart cannot assume them.
    pub const EDGE_RESET: u16 = 0xFFFF;
    pub const MASK_RESET: u16 = 0xFFFF; // all lines start disabled

    // PENDING is write-1-to-clear; writing all ones retires every latched bit
    pub const PENDING_CLEAR_ALL: u16 = 0xFFFF;
}

pub mod lines {
    // Interrupt identifiers for the reference board: n[7..4] = group,
    // n[3..0] = line within the group.

    // Group 0: video channels A (bits 0-7) and B (bits 8-15)
    pub const INT_SOF_A: u8 = 0x00; // Channel A start of frame
    pub const INT_SOL_A: u8 = 0x01; // Channel A start of line
    pub const INT_COL_A: u8 = 0x02; // Channel A sprite collision
    pub const INT_SOF_B: u8 = 0x08; // Channel B start of frame
    pub const INT_SOL_B: u8 = 0x09; // Channel B start of line
    pub const INT_COL_B: u8 = 0x0A; // Channel B sprite collision

    // Group 1: onboard devices
    pub const INT_KBD_PS2: u8 = 0x10;
    pub const INT_MOUSE: u8 = 0x12;
    pub const INT_COM1: u8 = 0x14;
    pub const INT_COM2: u8 = 0x15;
    pub const INT_TIMER0: u8 = 0x18;
    pub const INT_RTC: u8 = 0x1F;

    // Group 2: expansion and storage
    pub const INT_SDC_INSERT: u8 = 0x20;
    pub const INT_SDC: u8 = 0x21;
    pub const INT_IDE: u8 = 0x22;
}

pub mod channels {
    // The two dispatch channels exposed by the trap vectors are the 8-bit
    // halves of group 0.
    pub const CHANNEL_GROUP: usize = 0;
    pub const CHANNEL_A_BASE: u8 = 0;
    pub const CHANNEL_B_BASE: u8 = 8;
    pub const CHANNEL_WIDTH: u8 = 8;
}
