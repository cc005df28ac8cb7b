//! Packed BCD conversion used by every time, calendar and alarm register.
//!
//! Neither direction validates its input. Decimal values of 100 or more are
//! truncated into the byte, and a packed byte with a nibble above 9 decodes to a
//! value outside 0..=99.

/// Swap format from decimal (0..=99) to packed BCD
pub fn decimal_to_bcd(decimal: u8) -> u8 {
    ((decimal / 10) << 4) | (decimal % 10)
}

/// Swap format from packed BCD to decimal
pub fn bcd_to_decimal(bcd: u8) -> u8 {
    ((bcd >> 4) & 0x0F) * 10 + (bcd & 0x0F)
}
