pub mod analysis;
pub mod heatmap;
pub mod pivot;

use crate::activity::{entities::ActivityRecord, week::WeekLabel};

/// Week labels present in `records`, oldest first.
pub fn week_labels(records: &[ActivityRecord]) -> Vec<WeekLabel> {
    let mut labels = records.iter().map(|r| r.week.clone()).collect::<Vec<_>>();
    labels.sort();
    labels.dedup();
    labels
}

/// Picks the requested week, or the latest one when nothing was requested.
pub fn select_week(records: &[ActivityRecord], requested: Option<&WeekLabel>) -> Option<WeekLabel> {
    let labels = week_labels(records);
    match requested {
        Some(week) => labels.into_iter().find(|v| v == week),
        None => labels.into_iter().next_back(),
    }
}

/// Records of a single week, in their original order.
pub fn records_for_week(records: &[ActivityRecord], week: &WeekLabel) -> Vec<ActivityRecord> {
    records.iter().filter(|r| r.week == *week).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::{records_for_week, select_week, week_labels};
    use crate::activity::{
        load::{load_activity, InputFormat},
        table::DecodeMode,
        week::WeekLabel,
    };

    const LOG: &str = "# 2024/12/02-06\n* a: 月.\n# 2024/11/25-29\n* a: 火..\n* b: 水...";

    #[test]
    fn selects_latest_week_by_default() {
        let records = load_activity(LOG, InputFormat::Log, DecodeMode::First)
            .unwrap()
            .records;
        let labels = week_labels(&records)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["2024/11/25-29", "2024/12/02-06"]);

        let latest = select_week(&records, None).unwrap();
        assert_eq!(&*latest, "2024/12/02-06");

        let requested = WeekLabel::new_opt("2024/11/25-29").unwrap();
        let week = select_week(&records, Some(&requested)).unwrap();
        assert_eq!(records_for_week(&records, &week).len(), 2);

        let missing = WeekLabel::new_opt("2025/01/06-10").unwrap();
        assert!(select_week(&records, Some(&missing)).is_none());
        assert!(select_week(&[], None).is_none());
    }
}
