use pollution_chart::ChartError;
use pollution_chart::models::{Parameter, ParameterSpec, Record, parse_param_list};
use pollution_chart::style::{RIVER_BLUES, Rgb};
use serde_json::json;

#[test]
fn default_spec_is_the_river_set_in_order() {
    let spec = ParameterSpec::river_pollution();
    let names: Vec<&str> = spec.names().collect();
    assert_eq!(names, vec!["TempMean", "DOMean", "PHMean", "BODMean"]);
    for (i, p) in spec.iter() {
        assert_eq!(p.color, RIVER_BLUES[i]);
    }
    assert_eq!(spec.position("PHMean"), Some(2));
}

#[test]
fn malformed_specs_fail_fast() {
    assert_eq!(ParameterSpec::new(vec![]), Err(ChartError::EmptyParameterSpec));

    let dup = ParameterSpec::new(vec![
        Parameter::new("DOMean", Rgb::new(0, 0, 0)),
        Parameter::new("DOMean", Rgb::new(1, 1, 1)),
    ]);
    assert_eq!(dup, Err(ChartError::DuplicateParameter("DOMean".into())));

    let blank = ParameterSpec::new(vec![Parameter::new("  ", Rgb::new(0, 0, 0))]);
    assert_eq!(blank, Err(ChartError::BlankParameterName(0)));
}

#[test]
fn param_list_parsing() {
    let spec = parse_param_list("TempMean=#03045e; BODMean=#ade8f4").unwrap();
    assert_eq!(spec.len(), 2);
    assert_eq!(spec.get(1).unwrap().color, RIVER_BLUES[3]);

    // Colors are optional.
    let spec = parse_param_list("A,B").unwrap();
    assert_ne!(spec.get(0).unwrap().color, spec.get(1).unwrap().color);

    assert!(matches!(
        parse_param_list("A=#zzzzzz"),
        Err(ChartError::InvalidColor(_))
    ));
    assert_eq!(parse_param_list(" , "), Err(ChartError::EmptyParameterSpec));
    assert!(parse_param_list("A,A").is_err());
}

#[test]
fn json_rows_coerce_numbers_and_drop_junk() {
    let row = json!({
        "STATE": "Bihar",
        "TempMean": 25.5,
        "DOMean": "7.25",
        "PHMean": null,
        "BODMean": "n/a"
    });
    let r = Record::from_json_fields(1, "STATE", row.as_object().unwrap()).unwrap();
    assert_eq!(r.category, "Bihar");
    assert_eq!(r.value("TempMean"), Some(25.5));
    assert_eq!(r.value("DOMean"), Some(7.25));
    assert_eq!(r.value("PHMean"), None);
    assert_eq!(r.value("BODMean"), None);
}

#[test]
fn rows_without_category_are_rejected() {
    let row = json!({ "TempMean": 25.5 });
    let err = Record::from_json_fields(3, "STATE", row.as_object().unwrap()).unwrap_err();
    assert_eq!(
        err,
        ChartError::MissingCategory {
            row: 3,
            field: "STATE".into()
        }
    );

    let err = Record::from_csv_fields(2, "STATE", [("STATE", " "), ("TempMean", "1")]);
    assert!(err.is_err());
}

#[test]
fn non_finite_values_are_not_stored() {
    let r = Record::new("A").with("P1", f64::NAN).with("P2", f64::INFINITY);
    assert!(r.values.is_empty());
}
