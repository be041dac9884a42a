#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use tally::db::db::Db;
    use tally::db::store::Store;
    use tally::db::timer::{start_timer, stop_timer};
    use tally::libs::error::StoreError;
    use tally::libs::interval::IntervalRecord;
    use tally::libs::time_math::ClockTime;
    use tally::libs::timer::{display_duration, TimerSession};
    use test_context::{test_context, TestContext};

    struct TimerTestContext {
        db: Db,
        first: i64,
        second: i64,
    }

    impl TestContext for TimerTestContext {
        fn setup() -> Self {
            let db = Db::open_in_memory().unwrap();
            let first = saved(&db, "Writing");
            let second = saved(&db, "Email");
            TimerTestContext { db, first, second }
        }
    }

    fn saved(db: &Db, name: &str) -> i64 {
        let record = IntervalRecord::new(
            name,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            ClockTime::MIDNIGHT,
            ClockTime::MIDNIGHT,
            "",
        );
        db.intervals().upsert(record).unwrap().id.unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 3, h, m, s).unwrap()
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_start_and_stop(ctx: &mut TimerTestContext) {
        let start = start_timer(&ctx.db, ctx.first, at(9, 0, 0)).unwrap();
        assert!(start.stopped.is_none());
        assert_eq!(start.started.start_time, "09:00:00");
        assert_eq!(start.started.end_time, "09:00:00");

        let session = ctx.db.timer().current().unwrap().unwrap();
        assert_eq!(session.interval_id, ctx.first);

        let stopped = stop_timer(&ctx.db, at(10, 25, 10)).unwrap().unwrap();
        assert_eq!(stopped.end_time, "10:25:10");
        assert_eq!(stopped.duration, "01:25:10");
        assert!(ctx.db.timer().current().unwrap().is_none());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_stop_without_timer(ctx: &mut TimerTestContext) {
        assert!(stop_timer(&ctx.db, at(12, 0, 0)).unwrap().is_none());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_starting_another_stops_the_running_one(ctx: &mut TimerTestContext) {
        start_timer(&ctx.db, ctx.first, at(9, 0, 0)).unwrap();
        let switch = start_timer(&ctx.db, ctx.second, at(9, 40, 0)).unwrap();

        let previous = switch.stopped.unwrap();
        assert_eq!(previous.id, Some(ctx.first));
        assert_eq!(previous.duration, "00:40:00");

        let session = ctx.db.timer().current().unwrap().unwrap();
        assert_eq!(session.interval_id, ctx.second);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_live_duration_only_while_running(ctx: &mut TimerTestContext) {
        start_timer(&ctx.db, ctx.first, at(9, 0, 0)).unwrap();
        let session = ctx.db.timer().current().unwrap();
        let running = ctx.db.intervals().get_by_id(ctx.first).unwrap().unwrap();
        let idle = ctx.db.intervals().get_by_id(ctx.second).unwrap().unwrap();

        assert_eq!(display_duration(&running, session.as_ref(), at(9, 5, 30)), "00:05:30");
        assert_eq!(display_duration(&idle, session.as_ref(), at(9, 5, 30)), "00:00:00");
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_deleting_running_interval_clears_timer(ctx: &mut TimerTestContext) {
        start_timer(&ctx.db, ctx.first, at(9, 0, 0)).unwrap();
        ctx.db.intervals().delete_by_id(ctx.first).unwrap();
        assert!(ctx.db.timer().current().unwrap().is_none());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_session_for_missing_interval(ctx: &mut TimerTestContext) {
        ctx.db.timer().start(&TimerSession::new(999, at(8, 0, 0))).unwrap();
        assert!(matches!(stop_timer(&ctx.db, at(9, 0, 0)), Err(StoreError::NotFound(999))));
        assert!(ctx.db.timer().current().unwrap().is_none());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_start_unknown_interval(ctx: &mut TimerTestContext) {
        assert!(matches!(start_timer(&ctx.db, 999, at(8, 0, 0)), Err(StoreError::NotFound(999))));
        assert!(ctx.db.timer().current().unwrap().is_none());
    }
}
