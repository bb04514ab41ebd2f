//! Weekday names and weekday sets, the vocabulary of task recurrences

use std::fmt::{Display, Formatter};
use std::iter::FromIterator;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A day of the week.
///
/// Recurrences are stored as full English names with their initial capital
/// (`"Sunday"` through `"Saturday"`), and matching against them is
/// case-sensitive. That is the exact vocabulary [`FromStr`] accepts and
/// [`Display`] produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Every weekday, Sunday first.
    ///
    /// This is the canonical order recurrence sets are listed in, wherever they
    /// are displayed or serialized
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// The full English name, e.g. `"Wednesday"`
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// The three-letter abbreviation, e.g. `"Wed"`
    pub fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }

    /// Days elapsed since the last Sunday, from 0 to 6
    pub fn days_from_sunday(&self) -> u32 {
        *self as u32
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weekday {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for day in &Weekday::ALL {
            if day.name() == s {
                return Ok(*day);
            }
        }
        Err(Error::UnknownWeekday(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => chrono::Weekday::Sun,
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }
}

/// Used to support serde
impl Serialize for Weekday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

bitflags! {
    /// The set of weekdays a task repeats on.
    ///
    /// On the wire this is an array of weekday names (`["Monday", "Friday"]`),
    /// always listed Sunday-first; duplicates in incoming data fold into a
    /// single membership. An empty set is valid for the model (such a task is
    /// simply never due), although save operations require at least one day
    pub struct WeekdaySet: u8 {
        const SUNDAY = 1;
        const MONDAY = 1 << 1;
        const TUESDAY = 1 << 2;
        const WEDNESDAY = 1 << 3;
        const THURSDAY = 1 << 4;
        const FRIDAY = 1 << 5;
        const SATURDAY = 1 << 6;
    }
}

impl WeekdaySet {
    /// Whether `day` is part of this set
    pub fn contains_day(&self, day: Weekday) -> bool {
        self.contains(WeekdaySet::from(day))
    }

    /// Add `day` to this set
    pub fn insert_day(&mut self, day: Weekday) {
        self.insert(WeekdaySet::from(day));
    }

    /// Remove `day` from this set
    pub fn remove_day(&mut self, day: Weekday) {
        self.remove(WeekdaySet::from(day));
    }

    /// The days of this set, Sunday first
    pub fn days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .filter(|day| self.contains_day(**day))
            .copied()
            .collect()
    }
}

impl From<Weekday> for WeekdaySet {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => WeekdaySet::SUNDAY,
            Weekday::Monday => WeekdaySet::MONDAY,
            Weekday::Tuesday => WeekdaySet::TUESDAY,
            Weekday::Wednesday => WeekdaySet::WEDNESDAY,
            Weekday::Thursday => WeekdaySet::THURSDAY,
            Weekday::Friday => WeekdaySet::FRIDAY,
            Weekday::Saturday => WeekdaySet::SATURDAY,
        }
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for day in iter {
            set.insert_day(day);
        }
        set
    }
}

impl Display for WeekdaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        let names: Vec<&str> = self.days().iter().map(|day| day.abbrev()).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Used to support serde. The wire format is an array of weekday names
impl Serialize for WeekdaySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;

        let days = self.days();
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(day.name())?;
        }
        seq.end()
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D>(deserializer: D) -> Result<WeekdaySet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut set = WeekdaySet::empty();
        for name in &names {
            let day: Weekday = name.parse().map_err(serde::de::Error::custom)?;
            set.insert_day(day);
        }
        Ok(set)
    }
}
