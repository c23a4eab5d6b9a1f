//! MS-DOS date/time fields used by zip headers

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use std::time::SystemTime;

/// Packed MS-DOS date and time
///
/// Covers 1980-01-01 through 2107-12-31 with a resolution of two seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosDateTime {
    /// Packed date (`year-1980 << 9 | month << 5 | day`)
    pub date: u16,
    /// Packed time (`hour << 11 | minute << 5 | second / 2`)
    pub time: u16,
}

impl DosDateTime {
    /// 1980-01-01 00:00:00, the earliest representable value
    pub const EPOCH: DosDateTime = DosDateTime {
        date: (1 << 5) | 1,
        time: 0,
    };

    /// 2107-12-31 23:59:58, the latest representable value
    pub const MAX: DosDateTime = DosDateTime {
        date: (127 << 9) | (12 << 5) | 31,
        time: (23 << 11) | (59 << 5) | 29,
    };

    /// Pack a calendar date/time, clamping values outside the DOS range
    pub fn from_naive(value: NaiveDateTime) -> Self {
        match value.year() {
            ..=1979 => Self::EPOCH,
            2108.. => Self::MAX,
            year => Self {
                date: (((year - 1980) as u16) << 9) | ((value.month() as u16) << 5) | value.day() as u16,
                time: ((value.hour() as u16) << 11)
                    | ((value.minute() as u16) << 5)
                    | (value.second() as u16 / 2),
            },
        }
    }

    /// Pack a filesystem timestamp in local time, as zip tools do
    pub fn from_system_time(value: SystemTime) -> Self {
        Self::from_naive(DateTime::<Local>::from(value).naive_local())
    }

    /// Unpack into a calendar date/time, `None` if the fields are out of range
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        let year = i32::from(self.date >> 9) + 1980;
        let month = u32::from((self.date >> 5) & 0x0F);
        let day = u32::from(self.date & 0x1F);
        let hour = u32::from(self.time >> 11);
        let minute = u32::from((self.time >> 5) & 0x3F);
        let second = u32::from(self.time & 0x1F) * 2;

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }
}

impl Default for DosDateTime {
    fn default() -> Self {
        Self::EPOCH
    }
}
