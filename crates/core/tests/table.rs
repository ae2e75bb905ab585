use chrono::NaiveDate;
use playreviews_core::normalize::NormalizedReview;
use playreviews_core::table::{Column, Table};
use pretty_assertions::assert_eq;

fn review(rating: u8) -> NormalizedReview {
    NormalizedReview {
        name: "someone".to_string(),
        date: NaiveDate::from_ymd_opt(2021, 3, 12).unwrap(),
        rating,
        review: "text".to_string(),
    }
}

#[test]
fn ratings_column_shrinks_to_i8() {
    let rows = [review(5), review(1), review(3)];
    let mut table = Table::from_reviews(&rows);
    table.shrink();
    assert_eq!(
        table.column("rating"),
        Some(&Column::I8(vec![5, 1, 3]))
    );
}

#[test]
fn shrinking_never_changes_integer_values() {
    let samples: Vec<Vec<i64>> = vec![
        vec![1, 2, 3, 4, 5],
        vec![-100, 0, 100],
        vec![300, -300],
        vec![70_000, -70_000],
        vec![5_000_000_000, 1],
        vec![0],
    ];
    for values in samples {
        let mut table = Table::new();
        table.push_column("x", Column::I64(values.clone()));
        table.shrink();
        let narrowed = table.column("x").unwrap().as_i64().unwrap();
        assert_eq!(narrowed, values);
    }
}

#[test]
fn bounds_are_exclusive_like_the_iinfo_ladder() {
    // 127 == i8::MAX fails the strict `max < i8::MAX` test and lands in i16.
    let mut table = Table::new();
    table.push_column("x", Column::I64(vec![0, 127]));
    table.shrink();
    assert!(matches!(table.column("x"), Some(Column::I16(_))));

    let mut table = Table::new();
    table.push_column("x", Column::I64(vec![0, 126]));
    table.shrink();
    assert!(matches!(table.column("x"), Some(Column::I8(_))));
}

#[test]
fn wide_ranges_pick_the_matching_rung() {
    let cases: Vec<(Vec<i64>, fn(&Column) -> bool)> = vec![
        (vec![1, 100], |c| matches!(c, Column::I8(_))),
        (vec![1, 30_000], |c| matches!(c, Column::I16(_))),
        (vec![1, 2_000_000], |c| matches!(c, Column::I32(_))),
        (vec![1, i64::MAX], |c| matches!(c, Column::I64(_))),
    ];
    for (values, check) in cases {
        let mut table = Table::new();
        table.push_column("x", Column::I64(values));
        table.shrink();
        assert!(check(table.column("x").unwrap()));
    }
}

#[test]
fn float_columns_narrow_when_the_range_fits() {
    let mut table = Table::new();
    table.push_column("x", Column::F64(vec![1.5, -2.25, 1e30]));
    table.shrink();
    assert!(matches!(table.column("x"), Some(Column::F32(_))));

    let mut table = Table::new();
    table.push_column("x", Column::F64(vec![1e300]));
    table.shrink();
    assert!(matches!(table.column("x"), Some(Column::F64(_))));
}

#[test]
fn serialized_table_carries_dtype_tags() {
    let rows = [review(5), review(2)];
    let mut table = Table::from_reviews(&rows);
    table.shrink();

    let json = serde_json::to_value(&table).unwrap();
    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 4);

    let names: Vec<&str> = columns
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["name", "date", "rating", "review"]);

    let rating = &columns[2];
    assert_eq!(rating["dtype"], "i8");
    assert_eq!(rating["values"][0], 5);

    let date = &columns[1];
    assert_eq!(date["dtype"], "date");
    assert_eq!(date["values"][0], "2021-03-12");
}

#[test]
fn empty_table_has_zero_rows() {
    let mut table = Table::from_reviews(&[]);
    table.shrink();
    assert_eq!(table.num_rows(), 0);
    assert!(table.column("rating").unwrap().is_empty());
}
