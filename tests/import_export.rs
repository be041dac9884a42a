#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tally::commands::import::import_records;
    use tally::db::db::Db;
    use tally::db::store::Store;
    use tally::libs::aggregation::aggregate_by_category;
    use tally::libs::category::CategoryRecord;
    use tally::libs::export::{ExportBundle, ExportData, ExportFormat, Exporter, StatsExport};
    use tally::libs::interval::IntervalRecord;
    use tally::libs::schema::{read_document, Snapshot};
    use tally::libs::time_math::ClockTime;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TransferTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TransferTestContext {
        fn setup() -> Self {
            let db = Db::open_in_memory().unwrap();
            for (name, d, start, end, category) in [
                ("Planning", 6, "09:00:00", "10:00:00", "Work"),
                ("Late fix", 6, "23:30:00", "00:30:00", "Work"),
                ("Guitar", 7, "19:00:00", "19:30:00", "Music"),
            ] {
                let record = IntervalRecord::new(
                    name,
                    NaiveDate::from_ymd_opt(2024, 2, d).unwrap(),
                    start.parse::<ClockTime>().unwrap(),
                    end.parse::<ClockTime>().unwrap(),
                    category,
                );
                db.intervals().upsert(record).unwrap();
            }
            db.categories().upsert(CategoryRecord::new("Work")).unwrap();
            db.categories().upsert(CategoryRecord::new("Music")).unwrap();

            TransferTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                db,
            }
        }
    }

    fn bundle(db: &Db) -> ExportBundle {
        let intervals = db.intervals().list_all().unwrap();
        let buckets = aggregate_by_category(&intervals).value;
        let stats = StatsExport::new(
            NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
            &buckets,
            "Uncategorized",
        );
        ExportBundle {
            snapshot: Snapshot::new(intervals, db.categories().list_all().unwrap()),
            stats,
        }
    }

    #[test_context(TransferTestContext)]
    #[test]
    fn test_json_export_reimports(ctx: &mut TransferTestContext) {
        let path = ctx.temp_dir.path().join("backup.json");
        let written = Exporter::new(ExportFormat::Json, Some(path.clone()))
            .export(ExportData::Intervals, &bundle(&ctx.db))
            .unwrap();
        assert_eq!(written, vec![path.clone()]);

        let json = std::fs::read_to_string(&path).unwrap();
        let (upgrade, categories) = read_document(&json).unwrap();
        assert!(upgrade.rejected.is_empty());
        assert_eq!(upgrade.records.len(), 3);
        assert_eq!(categories.len(), 2);

        let target = Db::open_in_memory().unwrap();
        let summary = import_records(&target, upgrade, categories, "Uncategorized").unwrap();
        assert_eq!(summary.intervals, 3);
        assert_eq!(summary.categories, 2);

        let original: Vec<(String, String)> = ctx
            .db
            .intervals()
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| (r.name, r.duration))
            .collect();
        let imported: Vec<(String, String)> = target
            .intervals()
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| (r.name, r.duration))
            .collect();
        assert_eq!(imported, original);
    }

    #[test_context(TransferTestContext)]
    #[test]
    fn test_import_into_existing_data(ctx: &mut TransferTestContext) {
        let json = r#"{
            "version": 2,
            "exportedAt": "2024-02-08T10:00:00+00:00",
            "categories": [{"name": "work"}, {"name": ""}],
            "intervals": [
                {"id": 1, "name": "Review", "date": "2024-02-08", "startTime": "10:00:00",
                 "endTime": "11:00:00", "duration": "99:00:00", "isDifDays": true, "category": "WORK"},
                {"name": "Broken", "date": "2024-02-08", "startTime": "noon", "endTime": "13:00:00",
                 "duration": "", "isDifDays": false, "category": ""}
            ]
        }"#;
        let (upgrade, categories) = read_document(json).unwrap();
        assert_eq!(upgrade.rejected.len(), 1);
        assert_eq!(upgrade.rejected[0].name.as_deref(), Some("Broken"));

        let summary = import_records(&ctx.db, upgrade, categories, "Uncategorized").unwrap();
        assert_eq!(summary.intervals, 1);
        assert_eq!(summary.categories, 0);
        assert_eq!(summary.existing_categories, vec!["Work".to_string()]);
        assert_eq!(summary.rejected_categories.len(), 1);

        let review = ctx
            .db
            .intervals()
            .list_all()
            .unwrap()
            .into_iter()
            .find(|r| r.name == "Review")
            .unwrap();
        assert_eq!(review.category, "Work");
        assert_eq!(review.duration, "01:00:00");
        assert!(!review.is_dif_days);
        assert_ne!(review.id, Some(1));
    }

    #[test]
    fn test_import_respects_uncategorized_label() {
        let json = r#"{
            "version": 2,
            "exportedAt": "2024-02-08T10:00:00+00:00",
            "categories": [{"name": "Uncategorized"}],
            "intervals": [
                {"name": "Nap", "date": "2024-02-08", "startTime": "13:00:00", "endTime": "13:20:00",
                 "duration": "00:20:00", "isDifDays": false, "category": "uncategorized"}
            ]
        }"#;
        let (upgrade, categories) = read_document(json).unwrap();
        let db = Db::open_in_memory().unwrap();
        let summary = import_records(&db, upgrade, categories, "Uncategorized").unwrap();

        assert_eq!(summary.rejected_categories.len(), 1);
        assert_eq!(summary.categories, 0);
        assert!(db.categories().list_all().unwrap().is_empty());
        assert_eq!(db.intervals().list_all().unwrap()[0].category, "");
    }

    #[test]
    fn test_legacy_array_import() {
        let json = r#"[
            {"id": "a1", "name": "Old", "startTime": "2023-11-02T08:00:00Z", "endTime": "2023-11-02T09:30:00Z",
             "description": "dropped", "createdAt": "2023-11-02T09:30:00Z"},
            {"id": "b2", "name": "Older", "date": "2023-11-03T12:00:00.000Z", "startTime": "08:00:00",
             "endTime": "08:20:00", "duration": "00:20:00", "isDifDays": false, "category": "Misc"}
        ]"#;
        let (upgrade, categories) = read_document(json).unwrap();
        assert!(categories.is_empty());
        assert!(upgrade.rejected.is_empty());
        assert_eq!(upgrade.records[0].duration, "01:30:00");
        assert_eq!(upgrade.records[0].category, "");
        assert_eq!(upgrade.records[1].category, "Misc");

        let db = Db::open_in_memory().unwrap();
        let summary = import_records(&db, upgrade, categories, "Uncategorized").unwrap();
        assert_eq!(summary.intervals, 2);
        assert_eq!(summary.categories, 1);
        assert!(db.categories().find_by_name("misc").unwrap().is_some());
    }

    #[test_context(TransferTestContext)]
    #[test]
    fn test_csv_export_all_writes_two_files(ctx: &mut TransferTestContext) {
        let path = ctx.temp_dir.path().join("report.csv");
        let written = Exporter::new(ExportFormat::Csv, Some(path))
            .export(ExportData::All, &bundle(&ctx.db))
            .unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("report_intervals.csv"));
        assert!(written[1].ends_with("report_stats.csv"));

        let mut intervals = csv::Reader::from_path(&written[0]).unwrap();
        let rows: Vec<csv::StringRecord> = intervals.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][1], "Late fix");
        assert_eq!(&rows[1][5], "01:00:00");
        assert_eq!(&rows[1][6], "true");

        let mut stats = csv::Reader::from_path(&written[1]).unwrap();
        let rows: Vec<csv::StringRecord> = stats.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][0], "Work");
        assert_eq!(&rows[0][4], "02:00:00");
        let total = rows.last().unwrap();
        assert_eq!(&total[0], "Total");
        assert_eq!(&total[4], "02:30:00");
    }

    #[test_context(TransferTestContext)]
    #[test]
    fn test_excel_export(ctx: &mut TransferTestContext) {
        let path = ctx.temp_dir.path().join("report.xlsx");
        Exporter::new(ExportFormat::Excel, Some(path.clone()))
            .export(ExportData::All, &bundle(&ctx.db))
            .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
