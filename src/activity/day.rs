use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize};

/// Working day of a week. Serialized in its canonical Latin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

/// Every spelling a day marker can take, in the order markers are tried.
pub const DAY_SPELLINGS: [(&str, Day); 10] = [
    ("Mon", Day::Mon),
    ("Tue", Day::Tue),
    ("Wed", Day::Wed),
    ("Thu", Day::Thu),
    ("Fri", Day::Fri),
    ("月", Day::Mon),
    ("火", Day::Tue),
    ("水", Day::Wed),
    ("木", Day::Thu),
    ("金", Day::Fri),
];

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }

    /// Looks up a day by any of its spellings.
    pub fn from_spelling(spelling: &str) -> Option<Day> {
        DAY_SPELLINGS
            .iter()
            .find(|(candidate, _)| *candidate == spelling)
            .map(|(_, day)| *day)
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Day {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::from_spelling(s.trim()).ok_or_else(|| anyhow!("Unknown day {s}"))
    }
}

// Structured input may use either alphabet, so deserialization goes through the spellings.
impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Day::from_spelling(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown day `{value}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Day, DAY_SPELLINGS};

    #[test]
    fn spellings_normalize_to_canonical_form() {
        assert_eq!(Day::from_spelling("月"), Some(Day::Mon));
        assert_eq!(Day::from_spelling("金"), Some(Day::Fri));
        assert_eq!(Day::from_spelling("Wed"), Some(Day::Wed));
        assert_eq!(Day::from_spelling("Sat"), None);
        assert_eq!(Day::from_spelling("mon"), None);
    }

    #[test]
    fn every_day_has_two_spellings() {
        for day in Day::ALL {
            let count = DAY_SPELLINGS.iter().filter(|(_, d)| *d == day).count();
            assert_eq!(count, 2, "{day}");
        }
    }

    #[test]
    fn serializes_as_latin_token() {
        assert_eq!(serde_json::to_string(&Day::Thu).unwrap(), "\"Thu\"");
        let day: Day = serde_json::from_str("\"木\"").unwrap();
        assert_eq!(day, Day::Thu);
        assert!(serde_json::from_str::<Day>("\"Sun\"").is_err());
    }
}
