//! Property-based tests for the log analyzers
//!
//! Core features tested:
//! 1. Line matchers are total over arbitrary input
//! 2. Captured ids and states survive extraction unchanged
//! 3. Record order and count follow the file
//! 4. Re-analysis replaces, never accumulates
//! 5. Summary statistics agree with the records

use miwear::analyzer::{AppIdAnalyzer, ScreenStateAnalyzer};
use miwear::app_ids;
use miwear::matcher::{AppCreationMatcher, LineMatcher, ScreenStateMatcher};
use miwear::stats::{format_duration, AppIdSummary};
use proptest::prelude::*;
use std::io::Cursor;

fn timestamp() -> impl Strategy<Value = String> {
    (1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60)
        .prop_map(|(mo, d, h, mi, s)| format!("{:02}/{:02} {:02}:{:02}:{:02}", mo, d, h, mi, s))
}

fn app_line(ts: &str, app_id: u64, page_id: u64) -> String {
    format!(
        "[{}] [59] [ap] [pagemanager] on_ui_create: create view 0x18ac02b0:{{{}, {}}}",
        ts, app_id, page_id
    )
}

fn screen_line(ts: &str, from: &str, to: &str, source: &str) -> String {
    format!(
        "[{}] [59] [ap] [MiWearScreen] async_apply_screen_state_change: Screen state: {}-->{}, source: {}",
        ts, from, to, source
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_matchers_never_panic(line in ".*") {
        let _ = AppCreationMatcher.match_line(&line);
        let _ = ScreenStateMatcher.match_line(&line);
    }

    #[test]
    fn prop_noise_lines_never_match(line in "[a-zA-Z0-9 :,]*") {
        // No brackets means no timestamp, so nothing can match
        prop_assert!(AppCreationMatcher.match_line(&line).is_none());
        prop_assert!(ScreenStateMatcher.match_line(&line).is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_app_ids_extracted_exactly(
        ts in timestamp(),
        app_id in 0u64..200_000,
        page_id in 0u64..100_000,
    ) {
        let record = AppCreationMatcher
            .match_line(&app_line(&ts, app_id, page_id))
            .unwrap();

        prop_assert_eq!(&record.timestamp, &ts);
        prop_assert_eq!(record.app_id, app_id);
        prop_assert_eq!(record.page_id, page_id);
        prop_assert_eq!(record.app_name, app_ids::app_name(app_id));
    }

    #[test]
    fn prop_screen_fields_extracted_exactly(
        ts in timestamp(),
        from in "[A-Z_]{1,8}",
        to in "[A-Z_]{1,8}",
        source in "[A-Za-z0-9_]{1,12}",
    ) {
        let record = ScreenStateMatcher
            .match_line(&screen_line(&ts, &from, &to, &source))
            .unwrap();

        prop_assert_eq!(record.from_state, from);
        prop_assert_eq!(record.to_state, to);
        prop_assert_eq!(record.source, source);
    }

    #[test]
    fn prop_record_count_and_order_follow_file(
        ids in prop::collection::vec(0u64..0x60, 0..40),
        noise in prop::collection::vec("[a-z ]{0,20}", 0..40),
    ) {
        let mut log = String::new();
        for (i, id) in ids.iter().enumerate() {
            if let Some(n) = noise.get(i) {
                log.push_str(n);
                log.push('\n');
            }
            log.push_str(&app_line("01/02 04:23:33", *id, i as u64));
            log.push('\n');
        }

        let mut analyzer = AppIdAnalyzer::default();
        let records = analyzer.analyze_reader(Cursor::new(log)).unwrap();

        prop_assert_eq!(records.len(), ids.len());
        for (i, (record, id)) in records.iter().zip(&ids).enumerate() {
            prop_assert_eq!(record.app_id, *id);
            prop_assert_eq!(record.page_id, i as u64);
        }
    }

    #[test]
    fn prop_reanalysis_is_idempotent(
        states in prop::collection::vec(prop::bool::ANY, 0..20),
    ) {
        let log: String = states
            .iter()
            .map(|on| {
                let (from, to) = if *on { ("OFF", "ON") } else { ("ON", "OFF") };
                screen_line("03/04 10:00:00", from, to, "KEY") + "\n"
            })
            .collect();

        let mut analyzer = ScreenStateAnalyzer::default();
        let first = analyzer.analyze_reader(Cursor::new(log.clone())).unwrap().to_vec();
        let second = analyzer.analyze_reader(Cursor::new(log)).unwrap().to_vec();
        prop_assert_eq!(first, second);

        let summary = analyzer.summarize();
        prop_assert_eq!(summary.total, states.len());
        prop_assert_eq!(summary.on_count() + summary.off_count(), states.len());
    }

    #[test]
    fn prop_unrun_apps_complement_run_apps(
        ids in prop::collection::vec(0u64..0x70, 0..60),
    ) {
        let records: Vec<_> = ids
            .iter()
            .filter_map(|id| AppCreationMatcher.match_line(&app_line("01/02 04:23:33", *id, 0)))
            .collect();
        let summary = AppIdSummary::from_records(&records);

        let known_run = summary.counts.keys().filter(|id| app_ids::is_known(**id)).count();
        prop_assert_eq!(summary.unrun_apps().len(), app_ids::len() - known_run);
        prop_assert_eq!(summary.counts.values().sum::<usize>(), records.len());
        for id in summary.unknown_app_ids() {
            prop_assert!(!app_ids::is_known(id));
        }
    }

    #[test]
    fn prop_duration_zero_for_same_timestamp(ts in timestamp()) {
        prop_assert_eq!(format_duration(&ts, &ts), "00:00:00");
    }
}
