use pollution_chart::models::{Parameter, ParameterSpec, Record};
use pollution_chart::style::{GRIDLINE, Rgb};
use pollution_chart::viz::types::TextAnchor;
use pollution_chart::{Chart, ChartLayout};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn spec_p1_p2() -> ParameterSpec {
    ParameterSpec::new(vec![
        Parameter::new("P1", Rgb::new(3, 4, 94)),
        Parameter::new("P2", Rgb::new(0, 119, 182)),
    ])
    .unwrap()
}

fn scenario_chart() -> Chart {
    let mut chart = Chart::new(spec_p1_p2(), ChartLayout::default());
    chart
        .set_data(&[
            Record::new("A").with("P1", 10.0).with("P2", 20.0),
            Record::new("A").with("P1", 30.0),
            Record::new("B").with("P1", 5.0),
        ])
        .unwrap();
    chart
}

#[test]
fn empty_input_draws_nothing() {
    let mut chart = Chart::new(ParameterSpec::river_pollution(), ChartLayout::default());
    chart.set_data(&[]).unwrap();
    let plan = chart.plan();
    assert!(plan.is_empty());
    assert_eq!(plan.bars.len(), 0);
    assert_eq!(plan.x_ticks.len() + plan.y_ticks.len(), 0);
    assert!(chart.scales().is_none());
    assert_eq!((plan.width, plan.height), (900, 500));
}

#[test]
fn one_bar_per_category_and_parameter() {
    let chart = scenario_chart();
    let plan = chart.plan();
    assert_eq!(plan.bars.len(), 4);
    assert_eq!(plan.x_ticks.len(), 2);
    assert_eq!(plan.axes.len(), 2);
    for (i, bar) in plan.bars.iter().enumerate() {
        assert_eq!(bar.id.0, i);
        let param = chart.spec().get(bar.param_index).unwrap();
        assert_eq!(bar.param_name, param.name);
        assert_eq!(bar.color, param.color);
    }
}

#[test]
fn bar_geometry_in_canvas_pixels() {
    let chart = scenario_chart();
    let plan = chart.plan();

    // Plot area 770x380 at (100, 40); two bands of 308px starting 38.5px into each 385px slot.
    let a_p1 = plan.find_bar("A", "P1").unwrap();
    assert!(approx(a_p1.rect.x, 138.5));
    assert!(approx(a_p1.rect.width, 152.0));
    assert!(approx(a_p1.rect.y, 40.0));
    assert!(approx(a_p1.rect.height, 380.0));
    assert_eq!(a_p1.value, Some(20.0));

    let a_p2 = plan.find_bar("A", "P2").unwrap();
    assert!(approx(a_p2.rect.x, 138.5 + 154.0));

    let b_p1 = plan.find_bar("B", "P1").unwrap();
    assert!(approx(b_p1.rect.x, 523.5));
    assert!(approx(b_p1.rect.height, 95.0));

    let b_p2 = plan.find_bar("B", "P2").unwrap();
    assert_eq!(b_p2.value, None);
    assert_eq!(b_p2.rect.height, 0.0);
    assert!(approx(b_p2.rect.y, 420.0), "zero-height bar sits on the x axis");
}

#[test]
fn gridline_per_y_tick_spanning_the_plot() {
    let chart = scenario_chart();
    let plan = chart.plan();
    assert_eq!(plan.y_ticks.len(), 11);
    assert_eq!(plan.gridlines.len(), plan.y_ticks.len());
    for (grid, tick) in plan.gridlines.iter().zip(&plan.y_ticks) {
        assert_eq!(grid.color, GRIDLINE);
        assert!(approx(grid.from.x, 100.0));
        assert!(approx(grid.to.x, 870.0));
        assert!(approx(grid.from.y, tick.at.y));
        assert_eq!(tick.anchor, TextAnchor::End);
    }
    let labels: Vec<&str> = plan.y_ticks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(labels.first(), Some(&"0"));
    assert_eq!(labels.last(), Some(&"20"));
}

#[test]
fn category_labels_are_rotated_and_centered_on_bands() {
    let chart = scenario_chart();
    let plan = chart.plan();
    let a = &plan.x_ticks[0];
    assert_eq!(a.text, "A");
    assert!(a.rotated);
    assert_eq!(a.anchor, TextAnchor::End);
    assert!(approx(a.at.x, 100.0 + 38.5 + 154.0));
    assert!(a.at.y > 420.0);
}

#[test]
fn legend_follows_parameter_order() {
    let mut chart = Chart::new(ParameterSpec::river_pollution(), ChartLayout::default());
    chart.set_data(&[Record::new("Bihar").with("TempMean", 25.0)]).unwrap();
    let plan = chart.plan();
    assert_eq!(plan.legend.len(), 4);
    for (i, entry) in plan.legend.iter().enumerate() {
        let param = chart.spec().get(i).unwrap();
        assert_eq!(entry.param_index, i);
        assert_eq!(entry.label.text, param.name);
        assert_eq!(entry.color, param.color);
        assert!(approx(entry.swatch.x, 765.0));
        assert!(approx(entry.swatch.y, 10.0 + 20.0 * i as f64));
        assert!(approx(entry.swatch.width, 15.0));
    }
}

#[test]
fn new_data_replaces_the_previous_drawing() {
    let mut chart = scenario_chart();
    chart.hover("A", "P1");
    assert!(chart.controller().tooltip().is_visible());

    chart
        .set_data(&[Record::new("C").with("P2", 3.0)])
        .unwrap();
    assert_eq!(chart.rows().len(), 1);
    assert_eq!(chart.plan().bars.len(), 2);
    assert!(chart.plan().find_bar("A", "P1").is_none());
    assert!(!chart.controller().tooltip().is_visible());

    chart.set_data(&[]).unwrap();
    assert!(chart.plan().is_empty());
}

#[test]
fn ganga_state_names_fit_by_shrinking_the_font() {
    let mut chart = Chart::new(ParameterSpec::river_pollution(), ChartLayout::default());
    chart
        .set_data(&[
            Record::new("Uttarakhand").with("TempMean", 14.0),
            Record::new("Uttar Pradesh").with("TempMean", 24.0),
            Record::new("Bihar").with("TempMean", 26.0),
            Record::new("West Bengal").with("TempMean", 28.0),
        ])
        .unwrap();
    let labels: Vec<(&str, u32)> = chart
        .plan()
        .x_ticks
        .iter()
        .map(|t| (t.text.as_str(), t.font_px))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Uttarakhand", 10),
            ("Uttar Pradesh", 9),
            ("Bihar", 12),
            ("West Bengal", 10),
        ]
    );
}

#[test]
fn long_state_names_are_truncated_to_the_bottom_margin() {
    let mut chart = Chart::new(ParameterSpec::river_pollution(), ChartLayout::default());
    chart
        .set_data(&[Record::new("A state name far too long for the margin").with("DOMean", 6.0)])
        .unwrap();
    let label = &chart.plan().x_ticks[0];
    assert!(label.text.ends_with('…'));
    assert_eq!(label.font_px, 9);
}
