use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::ops::BitOrAssign;

pub const DAYS_PER_WEEK: usize = 7;
pub const SLOTS_PER_DAY: usize = 16;

/// Minutes after midnight at which slot 0 starts (4:30pm).
const FIRST_SLOT_MINUTES: i64 = 16 * 60 + 30;
const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("day index {0} is out of range, expected 0..7")]
    Day(usize),
    #[error("slot index {0} is out of range, expected 0..16")]
    Slot(usize),
}

/// Day of the week, 0 = Sunday ... 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct DayIndex(usize);

/// Half-hour slot of the evening window, 0 = earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SlotIndex(usize);

const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl DayIndex {
    pub fn all() -> impl Iterator<Item = Self> {
        (0..DAYS_PER_WEEK).map(Self)
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.0]
    }
}

impl SlotIndex {
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOTS_PER_DAY).map(Self)
    }

    pub fn start_time(self) -> NaiveTime {
        let minutes = FIRST_SLOT_MINUTES + SLOT_MINUTES * self.0 as i64;
        NaiveTime::default() + Duration::minutes(minutes)
    }
}

impl TryFrom<usize> for DayIndex {
    type Error = RangeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < DAYS_PER_WEEK {
            Ok(Self(index))
        } else {
            Err(RangeError::Day(index))
        }
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = RangeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < SLOTS_PER_DAY {
            Ok(Self(index))
        } else {
            Err(RangeError::Slot(index))
        }
    }
}

impl From<DayIndex> for usize {
    fn from(day: DayIndex) -> Self {
        day.0
    }
}

impl From<SlotIndex> for usize {
    fn from(slot: SlotIndex) -> Self {
        slot.0
    }
}

/// One day of half-hour slots; `true` means busy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySlots([bool; SLOTS_PER_DAY]);

impl DaySlots {
    pub fn slots(&self) -> &[bool; SLOTS_PER_DAY] {
        &self.0
    }

    pub fn is_busy(&self, slot: SlotIndex) -> bool {
        self.0[slot.0]
    }

    fn toggle(&mut self, slot: SlotIndex) {
        self.0[slot.0] = !self.0[slot.0];
    }
}

impl From<[bool; SLOTS_PER_DAY]> for DaySlots {
    fn from(slots: [bool; SLOTS_PER_DAY]) -> Self {
        Self(slots)
    }
}

impl BitOrAssign<&DaySlots> for DaySlots {
    fn bitor_assign(&mut self, other: &DaySlots) {
        for (slot, busy) in self.0.iter_mut().zip(other.0) {
            *slot |= busy;
        }
    }
}

/// A full week of slots, Sunday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekAvailability([DaySlots; DAYS_PER_WEEK]);

impl WeekAvailability {
    /// Every slot free. Used when a player is first registered.
    pub fn new_free() -> Self {
        Self::default()
    }

    pub fn days(&self) -> &[DaySlots; DAYS_PER_WEEK] {
        &self.0
    }

    pub fn is_busy(&self, day: DayIndex, slot: SlotIndex) -> bool {
        self.0[day.0].is_busy(slot)
    }

    pub fn toggle_slot(&mut self, day: DayIndex, slot: SlotIndex) {
        self.0[day.0].toggle(slot);
    }

    pub fn busy_count(&self) -> usize {
        self.0
            .iter()
            .map(|day| day.0.iter().filter(|&&busy| busy).count())
            .sum()
    }
}

impl From<[DaySlots; DAYS_PER_WEEK]> for WeekAvailability {
    fn from(days: [DaySlots; DAYS_PER_WEEK]) -> Self {
        Self(days)
    }
}

impl BitOrAssign<&WeekAvailability> for WeekAvailability {
    fn bitor_assign(&mut self, other: &WeekAvailability) {
        for (day, other_day) in self.0.iter_mut().zip(other.0.iter()) {
            *day |= other_day;
        }
    }
}
