// ---- SPFD54124B register bit defines -------------------------------------------------------

// NVCTR: display inversion control
pub const NVCTR_NLA: u8 = 1 << 2; // inversion in normal full color mode: 0=line 1=frame
pub const NVCTR_NLB: u8 = 1 << 1; // inversion in idle mode
pub const NVCTR_NLC: u8 = 1 << 0; // inversion in full color partial mode

// MADCTR: memory access control
pub const _MADCTR_RGB: u8 = 1 << 3; // color filter order: 0=RGB 1=BGR
pub const _MADCTR_ML: u8 = 1 << 4; // vertical refresh order: 0=top to bottom 1=bottom to top
pub const MADCTR_MV: u8 = 1 << 5; // row/column exchange
pub const MADCTR_MX: u8 = 1 << 6; // column address order
pub const MADCTR_MY: u8 = 1 << 7; // row address order
