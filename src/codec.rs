//! Text form of a [`WeekAvailability`]: seven colon separated hex numbers,
//! Sunday first, e.g. `0:c000:0:13:888:4560:15a0`.
//!
//! Each number holds the 16 slots of one day with slot 0 as the most
//! significant bit. The writer emits lowercase hex without leading zeros, the
//! reader also accepts zero-padded and uppercase segments.

use crate::availability::{DaySlots, WeekAvailability, DAYS_PER_WEEK, SLOTS_PER_DAY};
use std::{fmt, str::FromStr};

const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected 7 parts, got {0}")]
    PartCount(usize),
    #[error("day {day}: '{segment}' is not a hexadecimal number")]
    InvalidHex { day: usize, segment: String },
    #[error("day {day}: '{segment}' does not fit into 16 slots")]
    Overflow { day: usize, segment: String },
}

pub fn encode(week: &WeekAvailability) -> String {
    week.to_string()
}

pub fn decode(line: &str) -> Result<WeekAvailability, FormatError> {
    let segments: Vec<&str> = line.split(SEPARATOR).collect();
    if segments.len() != DAYS_PER_WEEK {
        return Err(FormatError::PartCount(segments.len()));
    }

    let mut days = [DaySlots::default(); DAYS_PER_WEEK];
    for (day, (slots, segment)) in days.iter_mut().zip(segments).enumerate() {
        *slots = bits_to_day(parse_segment(day, segment)?);
    }
    Ok(WeekAvailability::from(days))
}

fn parse_segment(day: usize, segment: &str) -> Result<u16, FormatError> {
    // from_str_radix would also take a leading sign
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHex {
            day,
            segment: segment.into(),
        });
    }
    u16::from_str_radix(segment, 16).map_err(|_| FormatError::Overflow {
        day,
        segment: segment.into(),
    })
}

fn day_to_bits(day: &DaySlots) -> u16 {
    day.slots()
        .iter()
        .fold(0u16, |bits, &busy| (bits << 1) | u16::from(busy))
}

fn bits_to_day(bits: u16) -> DaySlots {
    let mut slots = [false; SLOTS_PER_DAY];
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = bits & (1 << (SLOTS_PER_DAY - 1 - index)) != 0;
    }
    DaySlots::from(slots)
}

impl fmt::Display for WeekAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, day) in self.days().iter().enumerate() {
            if index > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{:x}", day_to_bits(day))?;
        }
        Ok(())
    }
}

impl FromStr for WeekAvailability {
    type Err = FormatError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        decode(line)
    }
}
