use sheetsift_core::{FilterCriteria, Session, SiftError};
use sheetsift_sheet::Table;
use sheetsift_viz::{chart_for, ChartKind, VizError};

fn session() -> Session {
    let table = Table::from_rows(vec![
        vec!["city", "temp"],
        vec!["Oslo", "4"],
        vec!["Rome", "18"],
        vec!["Oslo", "-2"],
        vec!["Lima", "22"],
        vec!["", "n/a"],
    ])
    .expect("table");
    Session::new(table).expect("session")
}

#[test]
fn test_bar_chart_follows_filtered_view() {
    let mut session = session();
    let chart = chart_for(&session, "city", ChartKind::Bar).expect("chart");
    assert_eq!(chart.data.labels, vec!["Oslo", "Rome", "Lima"]);
    assert_eq!(chart.data.datasets[0].data, vec![2.0, 1.0, 1.0]);

    session
        .set_criteria(FilterCriteria {
            global_search: "oslo".into(),
            ..Default::default()
        })
        .expect("criteria");
    let chart = chart_for(&session, "city", ChartKind::Bar).expect("chart");
    assert_eq!(chart.data.labels, vec!["Oslo"]);
}

#[test]
fn test_histogram_chart() {
    let session = session();
    let chart = chart_for(&session, "temp", ChartKind::Histogram).expect("chart");
    assert_eq!(chart.data.labels.len(), 10);
    assert_eq!(chart.data.labels[0], "-2.0-0.4");
    let total: f64 = chart.data.datasets[0].data.iter().sum();
    assert_eq!(total, 4.0);
}

#[test]
fn test_chart_errors() {
    let session = session();
    assert!(matches!(
        chart_for(&session, "city", ChartKind::Histogram),
        Err(VizError::Sift(SiftError::NotNumeric(_)))
    ));
    assert!(matches!(
        chart_for(&session, "country", ChartKind::Pie),
        Err(VizError::Sift(SiftError::ColumnNotFound(_)))
    ));

    let mut session = session;
    session
        .set_criteria(FilterCriteria {
            global_search: "n/a".into(),
            ..Default::default()
        })
        .expect("criteria");
    assert!(matches!(
        chart_for(&session, "city", ChartKind::Line),
        Err(VizError::NoData(_))
    ));
}
