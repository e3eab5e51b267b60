//! Command codes of the SPFD54124B controller

// ---- start up -------------------------------------------------------------------------------
/// Software reset
pub const SWRESET: u8 = 0x01;
/// Interface pixel format, followed by one color mode byte
pub const COLMOD: u8 = 0x3A;

// ---- switching on ---------------------------------------------------------------------------
/// Sleep out
pub const SLPOUT: u8 = 0x11;
/// Display on
pub const DISPON: u8 = 0x29;

// ---- display parameters ---------------------------------------------------------------------
/// Display inversion control, followed by one NVCTR byte
pub const NVCTR: u8 = 0xB4;
/// Memory access control, followed by one MADCTR byte
pub const MADCTR: u8 = 0x36;

// ---- memory access --------------------------------------------------------------------------
/// Column address set, followed by start and end column (16 bit each)
pub const CASET: u8 = 0x2A;
/// Row address set, followed by start and end row (16 bit each)
pub const RASET: u8 = 0x2B;
/// Memory write, all following data words are pixel data
pub const RAMWR: u8 = 0x2C;
