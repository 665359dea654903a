//! Property tests for cleaning-operation invariants.

use std::io::Write;

use dataprep_engine::{CleanOptions, DataSession};
use proptest::prelude::{ProptestConfig, any, proptest};

fn load_rows(rows: &[(Option<i32>, Option<i32>)]) -> DataSession {
    let mut content = String::from("a,b\n");
    for (a, b) in rows {
        let a = a.map(|v| v.to_string()).unwrap_or_default();
        let b = b.map(|v| v.to_string()).unwrap_or_default();
        content.push_str(&format!("{a},{b}\n"));
    }
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    let mut session = DataSession::new();
    session.load_path(file.path()).expect("load dataset");
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn row_count_never_grows(rows in proptest::collection::vec(
        (any::<Option<i32>>(), any::<Option<i32>>()), 1..40,
    )) {
        // Avoid the all-blank rows the reader skips.
        let rows: Vec<_> = rows
            .into_iter()
            .map(|(a, b)| if a.is_none() && b.is_none() { (Some(0), b) } else { (a, b) })
            .collect();
        let mut session = load_rows(&rows);
        let before = session.info().expect("info").shape;
        let after_nulls = session
            .clean(&CleanOptions { drop_nulls: true, ..CleanOptions::default() })
            .expect("drop nulls")
            .shape;
        let after_dupes = session
            .clean(&CleanOptions { drop_duplicates: true, ..CleanOptions::default() })
            .expect("drop duplicates")
            .shape;
        assert!(after_nulls.0 <= before.0);
        assert!(after_dupes.0 <= after_nulls.0);
        assert_eq!(after_dupes.1, before.1);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn dropped_null_rows_leave_no_missing(rows in proptest::collection::vec(
        (any::<Option<i32>>(), any::<Option<i32>>()), 1..40,
    )) {
        let rows: Vec<_> = rows
            .into_iter()
            .map(|(a, b)| if a.is_none() && b.is_none() { (a, Some(1)) } else { (a, b) })
            .collect();
        let mut session = load_rows(&rows);
        let info = session
            .clean(&CleanOptions { drop_nulls: true, ..CleanOptions::default() })
            .expect("drop nulls");
        assert_eq!(info.missing.values().sum::<usize>(), 0);
        let expected = rows
            .iter()
            .filter(|(a, b)| a.is_some() && b.is_some())
            .count();
        assert_eq!(info.shape.0, expected);
    }
}
