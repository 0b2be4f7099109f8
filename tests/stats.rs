use plotmap::model::{Plot, PlotStatus};
use plotmap::stats::PlotStats;

fn plot(number: &str, status: PlotStatus) -> Plot {
    Plot {
        id: format!("id-{number}"),
        plot_number: number.into(),
        owner_name: None,
        owner_phone: None,
        owner_email: None,
        area_sqm: None,
        status,
        coordinates: None,
        notes: None,
    }
}

#[test]
fn test_counts_per_status() {
    let plots = vec![
        plot("1", PlotStatus::Occupied),
        plot("2", PlotStatus::Vacant),
        plot("3", PlotStatus::ForSale),
    ];
    let stats = PlotStats::collect(&plots);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.occupied, 1);
    assert_eq!(stats.vacant, 1);
    assert_eq!(stats.for_sale, 1);
    assert_eq!(stats.other, 0);
}

#[test]
fn test_status_counts_sum_to_total() {
    let plots = vec![
        plot("1", PlotStatus::Occupied),
        plot("2", PlotStatus::Occupied),
        plot("3", PlotStatus::Vacant),
        plot("4", PlotStatus::Other),
        plot("5", PlotStatus::Other),
        plot("6", PlotStatus::ForSale),
    ];
    let stats = PlotStats::collect(&plots);
    assert_eq!(
        stats.occupied + stats.vacant + stats.for_sale + stats.other,
        stats.total
    );
    assert_eq!(stats.other, 2);
}

#[test]
fn test_empty_list() {
    assert_eq!(PlotStats::collect(&[]), PlotStats::default());
}
