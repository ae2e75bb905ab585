use chrono::NaiveDate;
use playreviews_core::locale::Locale;
use playreviews_core::normalize::{
    normalize, normalize_all, parse_rating, parse_review_date, NormalizeError,
};
use playreviews_core::scrape::extract::RawReview;
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn all_five_rating_labels_parse() {
    let locale = Locale::pt_br();
    for n in 1u8..=5 {
        let label = format!("Avaliado com {} de 5 estrelas", n);
        assert_eq!(parse_rating(&label, &locale).unwrap(), n);
    }
}

#[test]
fn unrecognized_rating_label_is_an_error_not_a_crash() {
    let locale = Locale::pt_br();
    for label in [
        "Rated 5 out of 5 stars",          // wrong locale
        "Avaliado com 6 de 5 estrelas",    // out of the closed set
        "avaliado com 5 de 5 estrelas",    // case differs: no fuzzy match
        "",
    ] {
        let err = parse_rating(label, &locale).unwrap_err();
        assert_eq!(err, NormalizeError::UnrecognizedRating(label.to_string()));
    }
}

#[test]
fn well_formed_dates_round_trip() {
    let locale = Locale::pt_br();
    let cases = [
        ("12 de março de 2021", date(2021, 3, 12)),
        ("01 de janeiro de 2020", date(2020, 1, 1)),
        ("15 de julho de 2020", date(2020, 7, 15)),
        ("28 de novembro de 2021", date(2021, 11, 28)),
        ("31 de dezembro de 1999", date(1999, 12, 31)),
        ("09 de fevereiro de 2016", date(2016, 2, 9)),
    ];
    for (raw, expected) in cases {
        assert_eq!(parse_review_date(raw, &locale).unwrap(), expected, "{raw}");
    }
}

#[test]
fn every_month_name_resolves() {
    let locale = Locale::pt_br();
    let months = [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
        "setembro", "outubro", "novembro", "dezembro",
    ];
    for (i, month) in months.iter().enumerate() {
        let raw = format!("10 de {} de 2021", month);
        let expected = date(2021, i as u32 + 1, 10);
        assert_eq!(parse_review_date(&raw, &locale).unwrap(), expected);
    }
}

#[test]
fn unknown_month_is_reported_by_name() {
    let locale = Locale::pt_br();
    let err = parse_review_date("12 de frimaire de 2021", &locale).unwrap_err();
    assert_eq!(err, NormalizeError::UnknownMonth("frimaire".to_string()));
}

#[test]
fn short_or_garbled_dates_are_malformed() {
    let locale = Locale::pt_br();
    assert!(matches!(
        parse_review_date("12/03/2021", &locale),
        Err(NormalizeError::MalformedDate(_))
    ));
    assert!(matches!(
        parse_review_date("", &locale),
        Err(NormalizeError::MalformedDate(_))
    ));
    assert!(matches!(
        parse_review_date("xx de março de 2021", &locale),
        Err(NormalizeError::MalformedDate(_))
    ));
}

#[test]
fn impossible_calendar_dates_are_rejected() {
    let locale = Locale::pt_br();
    let err = parse_review_date("31 de fevereiro de 2021", &locale).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::InvalidDate {
            year: 2021,
            month: 2,
            day: 31
        }
    );
}

#[test]
fn normalize_carries_name_and_review_through() {
    let locale = Locale::pt_br();
    let raw = RawReview {
        name: "Ana Souza".to_string(),
        raw_date: "12 de março de 2021".to_string(),
        raw_rating: "Avaliado com 4 de 5 estrelas".to_string(),
        review: "Muito bom.".to_string(),
    };
    let row = normalize(raw, &locale).unwrap();
    assert_eq!(row.name, "Ana Souza");
    assert_eq!(row.date, date(2021, 3, 12));
    assert_eq!(row.rating, 4);
    assert_eq!(row.review, "Muito bom.");
}

#[test]
fn normalize_all_preserves_order_and_stops_at_first_bad_record() {
    let locale = Locale::pt_br();
    let good = |rating: u8, day: &str| RawReview {
        name: format!("user-{rating}"),
        raw_date: format!("{day} de maio de 2021"),
        raw_rating: format!("Avaliado com {rating} de 5 estrelas"),
        review: "ok".to_string(),
    };

    let rows = normalize_all(vec![good(5, "01"), good(1, "02"), good(3, "03")], &locale).unwrap();
    let ratings: Vec<u8> = rows.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![5, 1, 3]);

    let mut with_bad = vec![good(5, "01")];
    with_bad.push(RawReview {
        raw_rating: "três estrelas".to_string(),
        ..good(3, "02")
    });
    assert!(normalize_all(with_bad, &locale).is_err());
}
