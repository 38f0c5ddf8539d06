use std::sync::Arc;

use crate::{
    activity::{day::Day, entities::ActivityRecord},
    utils::percentage::{count_percentage, Percentage},
};

#[derive(Debug)]
pub struct CategoryUsage {
    pub category: Arc<str>,
    pub activity: u64,
    /// Activity per day, in the order the days were recorded.
    pub days: Vec<(Day, u64)>,
}

impl CategoryUsage {
    fn new(category: Arc<str>) -> Self {
        Self {
            category,
            activity: 0,
            days: vec![],
        }
    }
}

#[derive(Debug)]
pub struct DayUsage {
    pub day: Day,
    pub activity: u64,
    /// Activity per category, in the order the categories were recorded.
    pub categories: Vec<(Arc<str>, u64)>,
}

impl DayUsage {
    pub fn new(day: Day) -> Self {
        Self {
            day,
            activity: 0,
            categories: vec![],
        }
    }
}

fn add_to<K: PartialEq>(entries: &mut Vec<(K, u64)>, key: K, value: u64) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 += value,
        None => entries.push((key, value)),
    }
}

/// Returns categories of a week with their activity + total activity of the week. Categories
/// keep the order of the log.
pub fn analyze_categories(
    records: &[ActivityRecord],
    min_percentage: Percentage,
) -> (Vec<CategoryUsage>, u64) {
    let mut usages = Vec::<CategoryUsage>::new();
    let mut total = 0u64;

    for v in records {
        total += v.activity as u64;
        let index = match usages.iter().position(|u| u.category == v.category) {
            Some(index) => index,
            None => {
                usages.push(CategoryUsage::new(v.category.clone()));
                usages.len() - 1
            }
        };
        let usage = &mut usages[index];
        usage.activity += v.activity as u64;
        add_to(&mut usage.days, v.day, v.activity as u64);
    }

    let usages = usages
        .into_iter()
        .filter(|v| count_percentage(v.activity, total) >= min_percentage)
        .collect::<Vec<_>>();
    (usages, total)
}

/// Returns weekdays with their activity + total activity of the week. Days without any record
/// are left out.
pub fn analyze_days(records: &[ActivityRecord], min_percentage: Percentage) -> (Vec<DayUsage>, u64) {
    let mut usages = Day::ALL.map(DayUsage::new);
    let mut total = 0u64;

    let mut seen = [false; Day::ALL.len()];
    for v in records {
        total += v.activity as u64;
        let index = v.day as usize;
        seen[index] = true;
        let usage = &mut usages[index];
        usage.activity += v.activity as u64;
        add_to(&mut usage.categories, v.category.clone(), v.activity as u64);
    }

    let usages = usages
        .into_iter()
        .zip(seen)
        .filter(|(_, seen)| *seen)
        .map(|(usage, _)| usage)
        .filter(|v| count_percentage(v.activity, total) >= min_percentage)
        .collect::<Vec<_>>();
    (usages, total)
}

#[cfg(test)]
mod tests {
    use super::{analyze_categories, analyze_days};
    use crate::{
        activity::{
            day::Day,
            load::{load_activity, InputFormat},
            table::DecodeMode,
        },
        utils::percentage::Percentage,
    };

    const WEEK: &str = "
# 2024/11/25-29
* GitHub: 月.....火...水.木...金........
* JIRA: 月..火.............水.....木金.
* Confluence: 月.火水木..金
* slack: 月...火....水.....木.金...
* teams: 月..火.水....木.金.....
";

    #[test]
    fn categories_keep_log_order() {
        let records = load_activity(WEEK, InputFormat::Log, DecodeMode::Sequential)
            .unwrap()
            .records;
        let (usages, total) = analyze_categories(&records, Percentage::zero());
        let names = usages
            .iter()
            .map(|u| (u.category.to_string(), u.activity))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                ("GitHub".to_string(), 20),
                ("JIRA".to_string(), 21),
                ("Confluence".to_string(), 3),
                ("slack".to_string(), 16),
                ("teams".to_string(), 13),
            ]
        );
        assert_eq!(total, 73);
        assert_eq!(usages[0].days[0], (Day::Mon, 5));
    }

    #[test]
    fn small_categories_are_filtered() {
        let records = load_activity(WEEK, InputFormat::Log, DecodeMode::Sequential)
            .unwrap()
            .records;
        let (usages, total) = analyze_categories(&records, Percentage::new_opt(10.).unwrap());
        assert_eq!(total, 73);
        assert!(usages.iter().all(|u| &*u.category != "Confluence"));
        assert_eq!(usages.len(), 4);
    }

    #[test]
    fn days_in_weekday_order() {
        let records = load_activity(WEEK, InputFormat::Log, DecodeMode::First)
            .unwrap()
            .records;
        let (usages, total) = analyze_days(&records, Percentage::zero());
        assert_eq!(total, 5 + 2 + 1 + 3 + 2);
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].day, Day::Mon);
        assert_eq!(usages[0].categories.len(), 5);
    }

    #[test]
    fn empty_week() {
        let (categories, total) = analyze_categories(&[], Percentage::zero());
        assert!(categories.is_empty());
        assert_eq!(total, 0);
        let (days, _) = analyze_days(&[], Percentage::zero());
        assert!(days.is_empty());
    }
}
