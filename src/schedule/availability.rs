use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::AsRefStr;
use tracing::debug;

use super::time::TimeSlot;

/// Repeat rule attached to a day entry. Anything unrecognized is treated as
/// a one-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepeatKind {
    Weekly,
    Biweekly,
    #[default]
    Custom,
}

impl RepeatKind {
    /// Whether slots under this rule count toward the weekly-hour total.
    pub fn recurs_weekly(self) -> bool {
        matches!(self, RepeatKind::Weekly | RepeatKind::Biweekly)
    }
}

impl<'de> Deserialize<'de> for RepeatKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "weekly" => RepeatKind::Weekly,
            "biweekly" => RepeatKind::Biweekly,
            _ => RepeatKind::Custom,
        })
    }
}

/// `{repeatType, slots}` value shape, the newer of the two stored forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurringEntry {
    pub repeat_type: RepeatKind,
    pub slots: Vec<TimeSlot>,
}

/// One value of the raw record: a bare slot list (implicitly one-off) or a
/// `{repeatType, slots}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDayEntry {
    Slots(Vec<TimeSlot>),
    Recurring(RecurringEntry),
}

impl RawDayEntry {
    fn parts(&self) -> (RepeatKind, &[TimeSlot]) {
        match self {
            RawDayEntry::Slots(slots) => (RepeatKind::Custom, slots),
            RawDayEntry::Recurring(entry) => (entry.repeat_type, &entry.slots),
        }
    }
}

/// Availability exactly as the document store hands it over: day keys in
/// document order, values in either historical shape. Key order matters
/// (deduplication keeps the first entry per weekday), so this is an ordered
/// pair list rather than a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAvailabilityRecord {
    pub entries: Vec<(String, RawDayEntry)>,
}

impl RawAvailabilityRecord {
    pub fn new(entries: Vec<(String, RawDayEntry)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RawAvailabilityRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawAvailabilityRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = RawAvailabilityRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of day keys to availability entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(pair) = access.next_entry()? {
                    entries.push(pair);
                }
                Ok(RawAvailabilityRecord { entries })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Canonical weekly availability after normalization. The raw shapes never
/// leave this module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyAvailability {
    days: HashMap<Weekday, Vec<TimeSlot>>,
}

impl WeeklyAvailability {
    pub fn insert(&mut self, day: Weekday, slots: Vec<TimeSlot>) {
        self.days.insert(day, slots);
    }

    /// Slots for one weekday; empty slice when the day is free.
    pub fn day(&self, day: Weekday) -> &[TimeSlot] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[TimeSlot])> {
        self.days.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains_key(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedAvailability {
    pub weekly: WeeklyAvailability,
    /// Recurring (weekly/biweekly) hours per week, rounded to the nearest
    /// whole hour.
    pub total_weekly_hours: u32,
}

const DATE_KEY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Day keys are weekday names first; calendar dates fall back to a lookup.
fn resolve_weekday(key: &str) -> Option<Weekday> {
    let trimmed = key.trim();
    if let Ok(day) = trimmed.parse::<Weekday>() {
        return Some(day);
    }
    DATE_KEY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.weekday())
}

/// Collapse a raw record onto one canonical week.
///
/// The first entry per weekday (document order) wins; later entries for the
/// same weekday contribute nothing to the map or the hour total, so a pile
/// of individual calendar dates folds onto one weekly pattern instead of
/// double-counting recurring shifts. Only weekly/biweekly slots count toward
/// `total_weekly_hours`; one-off slots stay in the map for overlap checks
/// but total zero hours. Slots that fail to parse are dropped and the rest
/// of the record still normalizes.
pub fn normalize(raw: &RawAvailabilityRecord) -> NormalizedAvailability {
    let mut weekly = WeeklyAvailability::default();
    let mut seen: HashSet<Weekday> = HashSet::new();
    let mut total_hours = 0.0_f64;

    for (key, entry) in &raw.entries {
        let Some(day) = resolve_weekday(key) else {
            debug!(%key, "skipping availability entry with unresolvable day key");
            continue;
        };
        if !seen.insert(day) {
            continue;
        }

        let (repeat, slots) = entry.parts();
        let mut kept = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot.minute_range() {
                Ok(range) => {
                    if repeat.recurs_weekly() {
                        total_hours += f64::from(range.duration_minutes()) / 60.0;
                    }
                    kept.push(slot.clone());
                }
                Err(err) => {
                    debug!(%key, repeat = repeat.as_ref(), error = %err, "dropping unparseable slot");
                }
            }
        }

        if !kept.is_empty() {
            weekly.insert(day, kept);
        }
    }

    NormalizedAvailability {
        weekly,
        total_weekly_hours: total_hours.round() as u32,
    }
}
