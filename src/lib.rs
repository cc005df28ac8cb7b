//! MAX31328 real time clock platform agnostic driver
//!
//! # About
//!
//!The MAX31328 is a low-cost, extremely accurate, I2C real-time clock (RTC) with an integrated
//!temperature-compensated crystal oscillator. The RTC maintains seconds, minutes, hours, day, date, month,
//!and year information. The date at the end of the month is automatically adjusted for months with fewer
//!than 31 days, including corrections for leap year. The clock operates in either the 24-hour or 12-hour
//!format with an AM/PM indicator. Two programmable time-of-day alarms are provided, and the internal
//!temperature sensor is readable over the bus. The chip driver is based on [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
//!
//!Datasheet: [MAX31328](https://www.analog.com/media/en/technical-documentation/data-sheets/MAX31328.pdf)
//!
//! ## Driver features:
//! - Reading/setting time and calendar data
//! - 12-hour (AM/PM) or 24-hour format
//! - Reading/setting both alarms, including the alarm rate flags
//! - Raw access to the control and status registers
//! - Reading the raw temperature, forcing a temperature conversion
//! - Seconds since the Unix epoch from the current time and calendar
//!
//! ## Concurrency
//!
//! Every method is one or two blocking bus transactions. The driver keeps no state
//! between calls, so it never caches register contents. [`MAX31328::get_epoch`]
//! reads the time and the calendar in two transactions; if something else can
//! write the clock in between (another bus master, another driver instance on a
//! shared bus) hold an external lock around the call, or use
//! [`MAX31328::get_time_calendar`] which reads both in a single burst.
//!
//! ## Example
//!
//! ```
//! # use embedded_hal_mock::i2c::{Mock, Transaction};
//! use max31328::{Time, MAX31328};
//! # let i2c = Mock::new(&[Transaction::write(0x68, vec![0x00, 0x00, 0x30, 0x52])]);
//!
//! let mut rtc = MAX31328::new(i2c);
//! // 12:30:00 AM, 12-hour mode
//! let time = Time {
//!     seconds: 0,
//!     minutes: 30,
//!     hours: 12,
//!     am_pm: false,
//!     mode: true,
//! };
//! rtc.set_time(time).unwrap();
//! # rtc.destroy().done();
//! ```

#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;
use fugit::ExtU32;
use hal::blocking::i2c;
use log::{debug, trace};

mod bcd;
mod epoch;
mod fields;
mod registers;

pub use bcd::{bcd_to_decimal, decimal_to_bcd};
pub use epoch::{days_from_civil, epoch_seconds, BASE_YEAR};
pub use fields::{Alarm, AlarmNumber, Calendar, ControlStatus, Time};
pub use registers::{
    control, status, Register, ALRM_MASK, AM_PM, CENTURY, DY_DT, MODE, REGISTER_COUNT,
};

/// Fixed 7-bit bus address of the device
pub const DEVICE_ADDRESS: u8 = 0x68;

// Forced conversion completes in about 200 ms
const CONVERSION_POLL_MS: u32 = 10;
const CONVERSION_POLLS: u32 = 30;

// Longest block written at once is alarm 1
const MAX_WRITE_LEN: usize = 4;

/// MAX31328 error
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max31328Error<E> {
    /// The bus transaction failed, the bus error is passed through unchanged
    I2c(E),
    /// A temperature conversion was requested while the chip reported BSY
    Busy,
    /// A forced temperature conversion did not complete in time
    Timeout,
}

/// For timing `max31328` uses [fugit](https://lib.rs/crates/fugit) crate which only provides `Duration` and `Instant` types.
/// It does not provide any clock or timer traits.
/// Therefore `max31328` has its own `Delay` trait that provides the timing needed while waiting for a
/// temperature conversion. User must implement this trait for the timer by itself.
pub trait Delay<const TIMER_HZ: u32> {
    /// An error that might happen during waiting
    type Error;

    /// Start countdown with a `duration`
    fn start(&mut self, duration: fugit::TimerDurationU32<TIMER_HZ>) -> Result<(), Self::Error>;

    /// Wait until countdown `duration` has expired.
    /// Must return `nb::Error::WouldBlock` if countdown `duration` is not yet over.
    /// Must return `OK(())` as soon as countdown `duration` has expired.
    fn wait(&mut self) -> nb::Result<(), Self::Error>;
}

///MAX31328 RTC driver
pub struct MAX31328<I2C> {
    i2c: I2C,
}

/// Convert a raw temperature, as returned by [`MAX31328::get_temperature`], to degrees Celsius.
///
/// The value is a 10-bit two's complement number left-justified in 16 bits, with a
/// resolution of 0.25 degrees.
pub fn raw_to_celsius(raw: u16) -> f32 {
    f32::from((raw as i16) >> 6) * 0.25
}

impl<I2C, E> MAX31328<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    ///Creates new instance MAX31328 RTC
    pub fn new(i2c: I2C) -> Self {
        MAX31328 { i2c }
    }

    ///Delete MAX31328 RTC instance and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    fn read_regs(&mut self, start: Register, buf: &mut [u8]) -> Result<(), Max31328Error<E>> {
        trace!("read {} byte(s) from {:#04x}", buf.len(), start.addr());
        self.i2c
            .write_read(DEVICE_ADDRESS, &[start.addr()], buf)
            .map_err(|e| {
                debug!("read from {:#04x} failed", start.addr());
                Max31328Error::I2c(e)
            })
    }

    fn write_regs(&mut self, start: Register, data: &[u8]) -> Result<(), Max31328Error<E>> {
        trace!("write {} byte(s) to {:#04x}", data.len(), start.addr());
        let mut bytes = [0_u8; MAX_WRITE_LEN + 1];
        bytes[0] = start.addr();
        bytes[1..=data.len()].copy_from_slice(data);
        self.i2c
            .write(DEVICE_ADDRESS, &bytes[..=data.len()])
            .map_err(|e| {
                debug!("write to {:#04x} failed", start.addr());
                Max31328Error::I2c(e)
            })
    }

    fn read_reg(&mut self, reg: Register) -> Result<u8, Max31328Error<E>> {
        let mut byte = [0_u8];
        self.read_regs(reg, &mut byte)?;
        Ok(byte[0])
    }

    ///Set the time. Fields are decimal, the driver converts them to BCD.
    pub fn set_time(&mut self, time: Time) -> Result<(), Max31328Error<E>> {
        self.write_regs(Register::SECONDS, &time.encode())
    }

    ///Set the calendar. Fields are decimal, the driver converts them to BCD.
    pub fn set_calendar(&mut self, calendar: Calendar) -> Result<(), Max31328Error<E>> {
        self.write_regs(Register::DAY, &calendar.encode())
    }

    ///Set either alarm. `seconds` and `am1` are not written for [`AlarmNumber::Alarm2`].
    pub fn set_alarm(&mut self, alarm: Alarm, which: AlarmNumber) -> Result<(), Max31328Error<E>> {
        match which {
            AlarmNumber::Alarm1 => self.write_regs(Register::ALRM1_SECONDS, &alarm.encode_alarm1()),
            AlarmNumber::Alarm2 => self.write_regs(Register::ALRM2_MINUTES, &alarm.encode_alarm2()),
        }
    }

    ///Write the control and status registers verbatim
    pub fn set_cntl_stat_reg(&mut self, data: ControlStatus) -> Result<(), Max31328Error<E>> {
        self.write_regs(Register::CONTROL, &[data.control, data.status])
    }

    ///Return current information about seconds, minutes and hours
    pub fn get_time(&mut self) -> Result<Time, Max31328Error<E>> {
        let mut bytes = [0_u8; 3];
        self.read_regs(Register::SECONDS, &mut bytes)?;
        Ok(Time::decode(&bytes))
    }

    ///Return current information about day of the week, date, month and year
    pub fn get_calendar(&mut self) -> Result<Calendar, Max31328Error<E>> {
        let mut bytes = [0_u8; 4];
        self.read_regs(Register::DAY, &mut bytes)?;
        Ok(Calendar::decode(&bytes))
    }

    ///Return time and calendar read in one burst, so they can not tear
    pub fn get_time_calendar(&mut self) -> Result<(Time, Calendar), Max31328Error<E>> {
        let mut bytes = [0_u8; 7];
        self.read_regs(Register::SECONDS, &mut bytes)?;
        let time = Time::decode(&[bytes[0], bytes[1], bytes[2]]);
        let calendar = Calendar::decode(&[bytes[3], bytes[4], bytes[5], bytes[6]]);
        Ok((time, calendar))
    }

    ///Return either alarm
    pub fn get_alarm(&mut self, which: AlarmNumber) -> Result<Alarm, Max31328Error<E>> {
        match which {
            AlarmNumber::Alarm1 => {
                let mut bytes = [0_u8; 4];
                self.read_regs(Register::ALRM1_SECONDS, &mut bytes)?;
                Ok(Alarm::decode_alarm1(&bytes))
            }
            AlarmNumber::Alarm2 => {
                let mut bytes = [0_u8; 3];
                self.read_regs(Register::ALRM2_MINUTES, &mut bytes)?;
                Ok(Alarm::decode_alarm2(&bytes))
            }
        }
    }

    ///Return the raw control and status registers
    pub fn get_cntl_stat_reg(&mut self) -> Result<ControlStatus, Max31328Error<E>> {
        let mut bytes = [0_u8; 2];
        self.read_regs(Register::CONTROL, &mut bytes)?;
        Ok(ControlStatus {
            control: bytes[0],
            status: bytes[1],
        })
    }

    ///Return the raw temperature: MSB register in the high byte, LSB register in the low byte.
    ///See [`raw_to_celsius`] for the unit conversion.
    pub fn get_temperature(&mut self) -> Result<u16, Max31328Error<E>> {
        let mut bytes = [0_u8; 2];
        self.read_regs(Register::MSB_TEMP, &mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    ///Return seconds since 1970-01-01T00:00:00, the chip's years counted from 2000.
    ///
    ///Time and calendar are read in two separate transactions, see the crate
    ///level notes on concurrency.
    pub fn get_epoch(&mut self) -> Result<i64, Max31328Error<E>> {
        let time = self.get_time()?;
        let calendar = self.get_calendar()?;
        Ok(epoch_seconds(&time, &calendar))
    }

    ///Whether the oscillator has stopped since OSF was last cleared
    pub fn oscillator_stopped(&mut self) -> Result<bool, Max31328Error<E>> {
        Ok((self.read_reg(Register::STATUS)? & status::OSF) != 0)
    }

    ///Clear the status flags in `flags` (any of A1F, A2F, OSF), leaving the other status bits untouched
    pub fn clear_status_flags(&mut self, flags: u8) -> Result<(), Max31328Error<E>> {
        let current = self.read_reg(Register::STATUS)?;
        self.write_regs(Register::STATUS, &[current & !flags])
    }

    ///Force a temperature conversion and return the fresh raw temperature.
    ///
    ///The CONV bit is set without touching the rest of the control register, then
    ///polled every 10 ms with `timer` until the chip clears it.
    pub fn convert_temperature<D, const TIMER_HZ: u32>(
        &mut self,
        timer: &mut D,
    ) -> Result<u16, Max31328Error<E>>
    where
        D: Delay<TIMER_HZ>,
    {
        if (self.read_reg(Register::STATUS)? & status::BSY) != 0 {
            return Err(Max31328Error::Busy);
        }
        let cntl = self.read_reg(Register::CONTROL)?;
        self.write_regs(Register::CONTROL, &[cntl | control::CONV])?;

        for _ in 0..CONVERSION_POLLS {
            timer.start(CONVERSION_POLL_MS.millis()).ok();
            nb::block!(timer.wait()).ok();
            if (self.read_reg(Register::CONTROL)? & control::CONV) == 0 {
                return self.get_temperature();
            }
        }
        debug!("temperature conversion timed out");
        Err(Max31328Error::Timeout)
    }
}
