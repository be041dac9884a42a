#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use tally::db::db::Db;
    use tally::db::store::Store;
    use tally::libs::aggregation::{
        aggregate_by_category, aggregate_by_category_and_date, filter_by_date_range, select_categories,
        total_duration,
    };
    use tally::libs::colors::{assign_colors, PALETTE};
    use tally::libs::interval::IntervalRecord;
    use tally::libs::time_math::ClockTime;
    use test_context::{test_context, TestContext};

    /// A week of tracked time spread over three categories.
    struct StatsTestContext {
        db: Db,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let db = Db::open_in_memory().unwrap();
            let rows = [
                ("Standup", 1, "09:00:00", "09:15:00", "Work"),
                ("Coding", 1, "09:15:00", "12:00:00", "Work"),
                ("Run", 1, "18:00:00", "18:45:00", "Sport"),
                ("Coding", 2, "10:00:00", "13:30:00", "Work"),
                ("Errands", 2, "14:00:00", "15:00:00", ""),
                ("Release", 3, "22:00:00", "01:00:00", "Work"),
                ("Swim", 8, "07:00:00", "08:00:00", "Sport"),
            ];
            for (name, d, start, end, category) in rows {
                let record = IntervalRecord::new(
                    name,
                    day(d),
                    start.parse::<ClockTime>().unwrap(),
                    end.parse::<ClockTime>().unwrap(),
                    category,
                );
                db.intervals().upsert(record).unwrap();
            }
            StatsTestContext { db }
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_totals_per_category_for_a_week(ctx: &mut StatsTestContext) {
        let all = ctx.db.intervals().list_all().unwrap();
        let week = filter_by_date_range(&all, day(1), day(7));
        assert_eq!(week.len(), 6);

        let result = aggregate_by_category(&week);
        assert!(result.is_complete());
        let keys: Vec<&str> = result.value.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["Work", "Sport", ""]);

        let work = &result.value[0];
        assert_eq!(work.intervals, 4);
        assert_eq!(work.formatted_time, "09:30:00");
        assert_eq!(total_duration(&result.value), "11:15:00");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_store_range_matches_in_memory_filter(ctx: &mut StatsTestContext) {
        let all = ctx.db.intervals().list_all().unwrap();
        let from_store = ctx.db.intervals().list_range(day(2), day(8)).unwrap();
        assert_eq!(from_store, filter_by_date_range(&all, day(2), day(8)));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_daily_trend_for_category(ctx: &mut StatsTestContext) {
        let all = ctx.db.intervals().list_all().unwrap();

        let trend = aggregate_by_category_and_date(&all, "Work", "Uncategorized").value;
        let days: Vec<(&str, u64)> = trend.iter().map(|(d, s)| (d.as_str(), *s)).collect();
        assert_eq!(days, vec![("2024-04-01", 3 * 3600), ("2024-04-02", 12_600), ("2024-04-03", 3 * 3600)]);

        let uncategorized = aggregate_by_category_and_date(&all, "Uncategorized", "Uncategorized").value;
        assert_eq!(uncategorized.get("2024-04-02"), Some(&3600));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_selection_and_colors(ctx: &mut StatsTestContext) {
        let all = ctx.db.intervals().list_all().unwrap();
        let buckets = aggregate_by_category(&all).value;

        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        let colors = assign_colors(&keys);
        assert_eq!(colors["Work"], PALETTE[0]);
        assert_eq!(colors[""], PALETTE[2]);

        let selected: HashSet<String> = ["Sport".to_string(), "Uncategorized".to_string()].into();
        let kept = select_categories(buckets, &selected, "Uncategorized");
        let kept: Vec<&str> = kept.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(kept, vec!["Sport", ""]);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_malformed_duration_is_skipped(ctx: &mut StatsTestContext) {
        ctx.db
            .conn
            .execute("UPDATE intervals SET duration = 'soon' WHERE name = 'Run'", [])
            .unwrap();
        let all = ctx.db.intervals().list_all().unwrap();

        let result = aggregate_by_category(&all);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].name, "Run");
        let sport = result.value.iter().find(|b| b.key == "Sport").unwrap();
        assert_eq!(sport.intervals, 1);
        assert_eq!(sport.formatted_time, "01:00:00");
    }
}
