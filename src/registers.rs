/// Register definitions
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    SECONDS = 0x00,
    MINUTES = 0x01,
    HOURS = 0x02,
    DAY = 0x03,
    DATE = 0x04,
    MONTH = 0x05,
    YEAR = 0x06,
    ALRM1_SECONDS = 0x07,
    ALRM1_MINUTES = 0x08,
    ALRM1_HOURS = 0x09,
    ALRM1_DAY_DATE = 0x0A,
    ALRM2_MINUTES = 0x0B,
    ALRM2_HOURS = 0x0C,
    ALRM2_DAY_DATE = 0x0D,
    CONTROL = 0x0E,
    STATUS = 0x0F,
    /// Factory trimmed, no accessor is provided for it
    AGING_OFFSET = 0x10,
    MSB_TEMP = 0x11,
    LSB_TEMP = 0x12,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// Number of registers in the register file
pub const REGISTER_COUNT: usize = 19;

/// AM/PM flag of an hours register, set for PM. Only meaningful in 12-hour mode.
pub const AM_PM: u8 = 1 << 5;
/// 12/24-hour flag of an hours register, set for 12-hour mode
pub const MODE: u8 = 1 << 6;
/// Day/date selector of an alarm day/date register, set to match the day of the week
pub const DY_DT: u8 = 1 << 6;
/// Alarm rate flag (AxMy), bit 7 of every alarm register
pub const ALRM_MASK: u8 = 1 << 7;
/// Century flag, bit 7 of the month register
pub const CENTURY: u8 = 1 << 7;

// Field widths of the BCD values once the flag bits are stripped
pub(crate) const SECONDS_MASK: u8 = 0x7F;
pub(crate) const MINUTES_MASK: u8 = 0x7F;
pub(crate) const HOURS_24_MASK: u8 = 0x3F;
pub(crate) const HOURS_12_MASK: u8 = 0x1F;
pub(crate) const DAY_MASK: u8 = 0x07;
pub(crate) const ALARM_DAY_MASK: u8 = 0x0F;
pub(crate) const DATE_MASK: u8 = 0x3F;
pub(crate) const MONTH_MASK: u8 = 0x1F;

/// Control register bit masks
pub mod control {
    /// Alarm 1 interrupt enable
    pub const A1IE: u8 = 1 << 0;
    /// Alarm 2 interrupt enable
    pub const A2IE: u8 = 1 << 1;
    /// Interrupt control: INT when set, square wave when clear
    pub const INTCN: u8 = 1 << 2;
    /// Square-wave rate select
    pub const RS1: u8 = 1 << 3;
    /// Square-wave rate select
    pub const RS2: u8 = 1 << 4;
    /// Force a temperature conversion, cleared by the chip when done
    pub const CONV: u8 = 1 << 5;
    /// Battery-backed square-wave enable
    pub const BBSQW: u8 = 1 << 6;
    /// Oscillator disable on battery (active high)
    pub const EOSC: u8 = 1 << 7;
}

/// Status register bit masks
pub mod status {
    /// Alarm 1 flag
    pub const A1F: u8 = 1 << 0;
    /// Alarm 2 flag
    pub const A2F: u8 = 1 << 1;
    /// Busy executing a TCXO function
    pub const BSY: u8 = 1 << 2;
    /// 32kHz output enable
    pub const EN32KHZ: u8 = 1 << 3;
    /// Oscillator stop flag
    pub const OSF: u8 = 1 << 7;
}
