use std::sync::Arc;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use super::{day::Day, week::WeekLabel};

/// One decoded fact: how much activity a category had on a day of a week. This is the flat
/// table the rest of the application works with.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize, Clone)]
pub struct ActivityRecord {
    pub week: WeekLabel,
    pub category: Arc<str>,
    pub day: Day,
    pub activity: u32,
}

/// Raw activity strings of a single week keyed by category. Keeps the order categories were
/// first written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCategoryLog {
    entries: Vec<(Arc<str>, String)>,
}

impl RawCategoryLog {
    /// Stores `value` for `category`. Returns `true` if an earlier value got replaced, in which
    /// case the category keeps its original position.
    pub fn insert(&mut self, category: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(name, _)| &**name == category) {
            Some(entry) => {
                entry.1 = value;
                true
            }
            None => {
                self.entries.push((category.into(), value));
                false
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| &**name == category)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &str)> {
        self.entries.iter().map(|(name, value)| (name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed but not yet decoded log: week label to the raw activity strings of that week.
/// Iteration follows the order weeks were first declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawWeekLog {
    weeks: Vec<(WeekLabel, RawCategoryLog)>,
}

impl RawWeekLog {
    /// Starts `week` with no categories. Returns `true` if the week existed before, in which
    /// case its previous categories are dropped but its position is kept.
    pub fn reset_week(&mut self, week: WeekLabel) -> bool {
        match self.weeks.iter_mut().find(|(label, _)| *label == week) {
            Some(entry) => {
                entry.1 = RawCategoryLog::default();
                true
            }
            None => {
                self.weeks.push((week, RawCategoryLog::default()));
                false
            }
        }
    }

    pub fn week_mut(&mut self, week: &WeekLabel) -> Option<&mut RawCategoryLog> {
        self.weeks
            .iter_mut()
            .find(|(label, _)| label == week)
            .map(|(_, categories)| categories)
    }

    pub fn week(&self, week: &str) -> Option<&RawCategoryLog> {
        self.weeks
            .iter()
            .find(|(label, _)| &**label == week)
            .map(|(_, categories)| categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WeekLabel, &RawCategoryLog)> {
        self.weeks.iter().map(|(label, categories)| (label, categories))
    }

    pub fn labels(&self) -> impl Iterator<Item = &WeekLabel> {
        self.weeks.iter().map(|(label, _)| label)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl Serialize for RawCategoryLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, value) in &self.entries {
            map.serialize_entry(&**category, value)?;
        }
        map.end()
    }
}

impl Serialize for RawWeekLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.weeks.len()))?;
        for (week, categories) in &self.weeks {
            map.serialize_entry(week, categories)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityRecord, RawWeekLog};
    use crate::activity::{day::Day, week::WeekLabel};

    fn week(label: &str) -> WeekLabel {
        WeekLabel::new_opt(label).unwrap()
    }

    #[test]
    fn reset_week_keeps_position_and_clears_categories() {
        let mut log = RawWeekLog::default();
        assert!(!log.reset_week(week("2024/11/25-29")));
        log.week_mut(&week("2024/11/25-29"))
            .unwrap()
            .insert("GitHub", "月..".into());
        assert!(!log.reset_week(week("2024/12/02-06")));
        assert!(log.reset_week(week("2024/11/25-29")));

        let labels = log.labels().map(|v| v.to_string()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["2024/11/25-29", "2024/12/02-06"]);
        assert!(log.week("2024/11/25-29").unwrap().is_empty());
    }

    #[test]
    fn category_overwrite_keeps_first_position() {
        let mut log = RawWeekLog::default();
        log.reset_week(week("2024/11/25-29"));
        let categories = log.week_mut(&week("2024/11/25-29")).unwrap();
        assert!(!categories.insert("GitHub", "月.".into()));
        assert!(!categories.insert("JIRA", "火.".into()));
        assert!(categories.insert("GitHub", "水...".into()));

        let names = categories.iter().map(|(n, _)| n.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["GitHub", "JIRA"]);
        assert_eq!(categories.get("GitHub"), Some("水..."));
    }

    #[test]
    fn serializes_as_nested_object() {
        let mut log = RawWeekLog::default();
        log.reset_week(week("2024/12/02-06"));
        log.week_mut(&week("2024/12/02-06"))
            .unwrap()
            .insert("slack", "月.".into());
        log.reset_week(week("2024/11/25-29"));
        assert_eq!(
            serde_json::to_string(&log).unwrap(),
            r#"{"2024/12/02-06":{"slack":"月."},"2024/11/25-29":{}}"#
        );
    }

    #[test]
    fn record_has_exactly_four_columns() {
        let record = ActivityRecord {
            week: week("2024/11/25-29"),
            category: "GitHub".into(),
            day: Day::Mon,
            activity: 5,
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        let keys = object.keys().map(|k| k.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["week", "category", "day", "activity"]);
        assert_eq!(object["activity"], 5);
        assert_eq!(object["day"], "Mon");
    }
}
