use std::{
    fmt::Display,
    ops::Deref,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use anyhow::anyhow;
use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

static WEEK_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}-[0-9]{2}$").expect("week label pattern should compile")
});

/// Label of a reporting period written as `YYYY/MM/DD-DD`: the start date followed by the
/// day the period ends on. Labels are fixed width, so ordering them as strings orders them
/// chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WeekLabel(Arc<str>);

impl WeekLabel {
    pub fn new_opt(value: &str) -> Option<WeekLabel> {
        if WEEK_LABEL.is_match(value) {
            Some(WeekLabel(value.into()))
        } else {
            None
        }
    }

    /// First day of the period. `None` when the label names a date that doesn't exist.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0[..10], "%Y/%m/%d").ok()
    }

    /// Last day of the period. An end day smaller than the start day falls into the next
    /// month.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let end_day = self.0[11..].parse::<u32>().ok()?;
        let start = self.start_date()?;
        if end_day < start.day() {
            start
                .with_day(1)?
                .checked_add_months(Months::new(1))?
                .with_day(end_day)
        } else {
            start.with_day(end_day)
        }
    }
}

impl Display for WeekLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for WeekLabel {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for WeekLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeekLabel::new_opt(s.trim()).ok_or_else(|| anyhow!("Can't parse {s} into week label"))
    }
}

impl<'de> Deserialize<'de> for WeekLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        WeekLabel::new_opt(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid week label `{value}`")))
    }
}
