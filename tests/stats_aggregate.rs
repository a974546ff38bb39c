use pollution_chart::models::{Parameter, ParameterSpec, Record};
use pollution_chart::stats::{aggregate_by_category, summaries};
use pollution_chart::style::Rgb;

fn spec_p1_p2() -> ParameterSpec {
    ParameterSpec::new(vec![
        Parameter::new("P1", Rgb::new(3, 4, 94)),
        Parameter::new("P2", Rgb::new(0, 119, 182)),
    ])
    .unwrap()
}

fn scenario() -> Vec<Record> {
    vec![
        Record::new("A").with("P1", 10.0).with("P2", 20.0),
        Record::new("A").with("P1", 30.0),
        Record::new("B").with("P1", 5.0),
    ]
}

#[test]
fn means_exclude_missing_values() {
    let rows = aggregate_by_category(&scenario(), &spec_p1_p2());
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].category, "A");
    assert_eq!(rows[0].means, vec![Some(20.0), Some(20.0)]);

    assert_eq!(rows[1].category, "B");
    assert_eq!(rows[1].mean(0), Some(5.0));
    assert_eq!(rows[1].mean(1), None, "no B record has P2: undefined, not zero");
}

#[test]
fn one_row_per_distinct_category_in_first_seen_order() {
    let records = vec![
        Record::new("Uttar Pradesh").with("P1", 1.0),
        Record::new("Bihar"),
        Record::new("Uttar Pradesh").with("P2", 2.0),
        Record::new("West Bengal").with("P1", 3.0),
        Record::new("Bihar").with("P1", 4.0),
    ];
    let rows = aggregate_by_category(&records, &spec_p1_p2());
    let cats: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(cats, vec!["Uttar Pradesh", "Bihar", "West Bengal"]);
}

#[test]
fn mean_does_not_depend_on_record_order() {
    let mut records = vec![
        Record::new("A").with("P1", 1.5),
        Record::new("A").with("P1", 2.25),
        Record::new("A"),
        Record::new("A").with("P1", 8.0),
    ];
    let forward = aggregate_by_category(&records, &spec_p1_p2());
    records.reverse();
    let backward = aggregate_by_category(&records, &spec_p1_p2());

    let expected = (1.5 + 2.25 + 8.0) / 3.0;
    assert!((forward[0].mean(0).unwrap() - expected).abs() < 1e-12);
    assert!((backward[0].mean(0).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn values_outside_the_spec_are_ignored() {
    let records = vec![Record::new("A").with("P1", 1.0).with("Other", 99.0)];
    let rows = aggregate_by_category(&records, &spec_p1_p2());
    assert_eq!(rows[0].means.len(), 2);
    assert_eq!(rows[0].means, vec![Some(1.0), None]);
}

#[test]
fn empty_input_gives_no_rows() {
    assert!(aggregate_by_category(&[], &spec_p1_p2()).is_empty());
}

#[test]
fn summaries_count_defined_and_missing() {
    let got = summaries(&scenario(), &spec_p1_p2());
    assert_eq!(got.len(), 4);

    let a_p2 = &got[1];
    assert_eq!((a_p2.category.as_str(), a_p2.parameter.as_str()), ("A", "P2"));
    assert_eq!(a_p2.count, 1);
    assert_eq!(a_p2.missing, 1);
    assert_eq!(a_p2.mean, Some(20.0));

    let b_p2 = &got[3];
    assert_eq!((b_p2.category.as_str(), b_p2.parameter.as_str()), ("B", "P2"));
    assert_eq!(b_p2.count, 0);
    assert_eq!(b_p2.missing, 1);
    assert_eq!(b_p2.mean, None);
}

#[test]
fn huge_values_keep_a_finite_mean() {
    let records = vec![
        Record::new("A").with("P1", 1e308).with("P2", f64::MAX),
        Record::new("A").with("P1", 1e308).with("P2", -f64::MAX),
    ];
    let rows = aggregate_by_category(&records, &spec_p1_p2());
    assert_eq!(rows[0].mean(0), Some(1e308));
    let p2 = rows[0].mean(1).unwrap();
    assert!(p2.is_finite());
    assert!(p2.abs() < 1e300);
}
