//! Decimal value types and their register-group layouts.
//!
//! Every encoder converts decimal to BCD first and then packs the flag bits; every
//! decoder strips the flag bits first and then converts BCD to decimal. Values
//! are not range checked, they are only masked to the width of their register
//! field so a bad value can never leak into a neighbouring flag bit.

use crate::bcd::{bcd_to_decimal, decimal_to_bcd};
use crate::registers::{
    ALARM_DAY_MASK, ALRM_MASK, AM_PM, DATE_MASK, DAY_MASK, DY_DT, HOURS_12_MASK, HOURS_24_MASK,
    MINUTES_MASK, MODE, MONTH_MASK, SECONDS_MASK,
};

///Time information
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub seconds: u8,
    pub minutes: u8,
    /// 1..=12 in 12-hour mode, 0..=23 in 24-hour mode
    pub hours: u8,
    /// `true` for PM, only meaningful when `mode` is set
    pub am_pm: bool,
    /// `true` for 12-hour mode
    pub mode: bool,
}

impl Time {
    /// Hour of the day in 24-hour form regardless of `mode`.
    /// 12 AM is hour 0 and 12 PM is hour 12.
    pub fn hours_24(&self) -> u8 {
        if self.mode {
            let hour = self.hours % 12;
            if self.am_pm {
                hour + 12
            } else {
                hour
            }
        } else {
            self.hours
        }
    }

    pub(crate) fn encode(&self) -> [u8; 3] {
        [
            decimal_to_bcd(self.seconds) & SECONDS_MASK,
            decimal_to_bcd(self.minutes) & MINUTES_MASK,
            encode_hours(self.hours, self.mode, self.am_pm),
        ]
    }

    pub(crate) fn decode(bytes: &[u8; 3]) -> Self {
        let (hours, mode, am_pm) = decode_hours(bytes[2]);
        Time {
            seconds: bcd_to_decimal(bytes[0] & SECONDS_MASK),
            minutes: bcd_to_decimal(bytes[1] & MINUTES_MASK),
            hours,
            am_pm,
            mode,
        }
    }
}

///Calendar information
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calendar {
    /// Day of the week, 1..=7
    pub day: u8,
    /// Day of the month, 1..=31
    pub date: u8,
    /// 1..=12
    pub month: u8,
    /// Years since 2000, 0..=99
    pub year: u8,
}

impl Calendar {
    pub(crate) fn encode(&self) -> [u8; 4] {
        [
            decimal_to_bcd(self.day) & DAY_MASK,
            decimal_to_bcd(self.date) & DATE_MASK,
            decimal_to_bcd(self.month) & MONTH_MASK,
            decimal_to_bcd(self.year),
        ]
    }

    pub(crate) fn decode(bytes: &[u8; 4]) -> Self {
        Calendar {
            day: bcd_to_decimal(bytes[0] & DAY_MASK),
            date: bcd_to_decimal(bytes[1] & DATE_MASK),
            // century flag is not part of the month
            month: bcd_to_decimal(bytes[2] & MONTH_MASK),
            year: bcd_to_decimal(bytes[3]),
        }
    }
}

/// Selects one of the two alarms of the chip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmNumber {
    /// Seconds, minutes, hours and day/date registers
    Alarm1,
    /// Minutes, hours and day/date registers, no seconds
    Alarm2,
}

///Alarm information
///
/// The rate flags `am1`..`am4` select which fields must match for the alarm to
/// fire, see the datasheet alarm mask table. `seconds` and `am1` are not used by
/// [`AlarmNumber::Alarm2`] and read back as zero. Only one of `day` and `date`
/// is stored, selected by `dy_dt`; the other one reads back as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day: u8,
    pub date: u8,
    pub am1: bool,
    pub am2: bool,
    pub am3: bool,
    pub am4: bool,
    /// `true` for PM, only meaningful when `mode` is set
    pub am_pm: bool,
    /// `true` for 12-hour mode
    pub mode: bool,
    /// `true` to match the day of the week, `false` to match the date
    pub dy_dt: bool,
}

impl Alarm {
    /// Alarm 1 block: seconds, minutes, hours, day/date
    pub(crate) fn encode_alarm1(&self) -> [u8; 4] {
        let [minutes, hours, day_date] = self.encode_alarm2();
        [
            with_rate_flag(decimal_to_bcd(self.seconds) & SECONDS_MASK, self.am1),
            minutes,
            hours,
            day_date,
        ]
    }

    /// Alarm 2 block: minutes, hours, day/date
    pub(crate) fn encode_alarm2(&self) -> [u8; 3] {
        let day_date = if self.dy_dt {
            (decimal_to_bcd(self.day) & ALARM_DAY_MASK) | DY_DT
        } else {
            decimal_to_bcd(self.date) & DATE_MASK
        };
        [
            with_rate_flag(decimal_to_bcd(self.minutes) & MINUTES_MASK, self.am2),
            with_rate_flag(encode_hours(self.hours, self.mode, self.am_pm), self.am3),
            with_rate_flag(day_date, self.am4),
        ]
    }

    pub(crate) fn decode_alarm1(bytes: &[u8; 4]) -> Self {
        let mut alarm = Self::decode_alarm2(&[bytes[1], bytes[2], bytes[3]]);
        alarm.seconds = bcd_to_decimal(bytes[0] & SECONDS_MASK);
        alarm.am1 = (bytes[0] & ALRM_MASK) != 0;
        alarm
    }

    pub(crate) fn decode_alarm2(bytes: &[u8; 3]) -> Self {
        let (hours, mode, am_pm) = decode_hours(bytes[1] & !ALRM_MASK);
        let dy_dt = (bytes[2] & DY_DT) != 0;
        let (day, date) = if dy_dt {
            (bcd_to_decimal(bytes[2] & ALARM_DAY_MASK), 0)
        } else {
            (0, bcd_to_decimal(bytes[2] & DATE_MASK))
        };
        Alarm {
            seconds: 0,
            minutes: bcd_to_decimal(bytes[0] & MINUTES_MASK),
            hours,
            day,
            date,
            am1: false,
            am2: (bytes[0] & ALRM_MASK) != 0,
            am3: (bytes[1] & ALRM_MASK) != 0,
            am4: (bytes[2] & ALRM_MASK) != 0,
            am_pm,
            mode,
            dy_dt,
        }
    }
}

/// Raw control and status registers, bit meanings in [`crate::control`] and
/// [`crate::status`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlStatus {
    pub control: u8,
    pub status: u8,
}

fn with_rate_flag(byte: u8, flag: bool) -> u8 {
    if flag {
        byte | ALRM_MASK
    } else {
        byte
    }
}

fn encode_hours(hours: u8, mode: bool, am_pm: bool) -> u8 {
    if mode {
        let byte = (decimal_to_bcd(hours) & HOURS_12_MASK) | MODE;
        if am_pm {
            byte | AM_PM
        } else {
            byte
        }
    } else {
        // bit 5 is the 20-hours digit here
        decimal_to_bcd(hours) & HOURS_24_MASK
    }
}

/// Returns (hours, mode, am_pm)
fn decode_hours(byte: u8) -> (u8, bool, bool) {
    if (byte & MODE) != 0 {
        //In case 12-hour format
        (
            bcd_to_decimal(byte & HOURS_12_MASK),
            true,
            (byte & AM_PM) != 0,
        )
    } else {
        (bcd_to_decimal(byte & HOURS_24_MASK), false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_round_trip_24_hour_mode() {
        for hour in 0..=23 {
            let byte = encode_hours(hour, false, false);
            assert_eq!(byte & MODE, 0);
            assert_eq!(decode_hours(byte), (hour, false, false));
        }
    }

    #[test]
    fn hours_round_trip_12_hour_mode() {
        for hour in 1..=12 {
            for &pm in &[false, true] {
                let byte = encode_hours(hour, true, pm);
                assert_ne!(byte & MODE, 0);
                assert_eq!(decode_hours(byte), (hour, true, pm));
            }
        }
    }

    #[test]
    fn hours_layout() {
        assert_eq!(encode_hours(23, false, false), 0x23);
        // 12-hour flag, PM flag, 11
        assert_eq!(encode_hours(11, true, true), 0x71);
        assert_eq!(encode_hours(12, true, false), 0x52);
    }

    #[test]
    fn hours_24_normalization() {
        let mut time = Time {
            hours: 12,
            mode: true,
            ..Time::default()
        };
        assert_eq!(time.hours_24(), 0);
        time.am_pm = true;
        assert_eq!(time.hours_24(), 12);
        time.hours = 7;
        assert_eq!(time.hours_24(), 19);
        time.am_pm = false;
        assert_eq!(time.hours_24(), 7);
        let time = Time {
            hours: 17,
            ..Time::default()
        };
        assert_eq!(time.hours_24(), 17);
    }

    #[test]
    fn time_layout() {
        let time = Time {
            seconds: 45,
            minutes: 30,
            hours: 9,
            am_pm: true,
            mode: true,
        };
        let bytes = time.encode();
        assert_eq!(bytes, [0x45, 0x30, 0x69]);
        assert_eq!(Time::decode(&bytes), time);
    }

    #[test]
    fn out_of_range_time_does_not_set_flag_bits() {
        let time = Time {
            seconds: 99,
            minutes: 0,
            hours: 99,
            am_pm: false,
            mode: false,
        };
        let bytes = time.encode();
        assert_eq!(bytes[0] & 0x80, 0);
        assert_eq!(bytes[2] & MODE, 0);
    }

    #[test]
    fn calendar_ignores_century_flag() {
        let calendar = Calendar::decode(&[0x06, 0x31, 0x92, 0x24]);
        assert_eq!(
            calendar,
            Calendar {
                day: 6,
                date: 31,
                month: 12,
                year: 24,
            }
        );
        assert_eq!(calendar.encode(), [0x06, 0x31, 0x12, 0x24]);
    }

    fn alarm_with_flags(am1: bool, am2: bool, am3: bool, am4: bool) -> Alarm {
        Alarm {
            seconds: 15,
            minutes: 42,
            hours: 7,
            day: 0,
            date: 28,
            am1,
            am2,
            am3,
            am4,
            am_pm: false,
            mode: false,
            dy_dt: false,
        }
    }

    #[test]
    fn alarm1_rate_flags_round_trip() {
        for bits in 0..16_u8 {
            let alarm = alarm_with_flags(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
            );
            let decoded = Alarm::decode_alarm1(&alarm.encode_alarm1());
            assert_eq!(decoded, alarm);
        }
    }

    #[test]
    fn alarm2_rate_flags_round_trip() {
        for bits in 0..16_u8 {
            let alarm = alarm_with_flags(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
            );
            let bytes = alarm.encode_alarm2();
            let decoded = Alarm::decode_alarm2(&bytes);
            assert_eq!(decoded.am1, false);
            assert_eq!(decoded.seconds, 0);
            assert_eq!(decoded.am2, alarm.am2);
            assert_eq!(decoded.am3, alarm.am3);
            assert_eq!(decoded.am4, alarm.am4);
            assert_eq!(decoded.minutes, alarm.minutes);
            assert_eq!(decoded.hours, alarm.hours);
            assert_eq!(decoded.date, alarm.date);
        }
    }

    #[test]
    fn alarm2_block_has_no_seconds() {
        let alarm = alarm_with_flags(true, false, false, false);
        // seconds and am1 are dropped, the block starts at minutes
        assert_eq!(alarm.encode_alarm2(), [0x42, 0x07, 0x28]);
        assert_eq!(alarm.encode_alarm1(), [0x95, 0x42, 0x07, 0x28]);
    }

    #[test]
    fn alarm_day_selector() {
        let alarm = Alarm {
            day: 3,
            date: 17,
            dy_dt: true,
            ..Alarm::default()
        };
        let decoded = Alarm::decode_alarm1(&alarm.encode_alarm1());
        assert!(decoded.dy_dt);
        assert_eq!(decoded.day, 3);
        assert_eq!(decoded.date, 0);

        let alarm = Alarm { dy_dt: false, ..alarm };
        let decoded = Alarm::decode_alarm1(&alarm.encode_alarm1());
        assert!(!decoded.dy_dt);
        assert_eq!(decoded.day, 0);
        assert_eq!(decoded.date, 17);
    }

    #[test]
    fn alarm_12_hour_with_rate_flag() {
        let alarm = Alarm {
            hours: 12,
            am_pm: true,
            mode: true,
            am3: true,
            ..Alarm::default()
        };
        let bytes = alarm.encode_alarm2();
        assert_eq!(bytes[1], 0x80 | 0x40 | 0x20 | 0x12);
        let decoded = Alarm::decode_alarm2(&bytes);
        assert_eq!(decoded.hours, 12);
        assert!(decoded.mode);
        assert!(decoded.am_pm);
        assert!(decoded.am3);
    }
}
