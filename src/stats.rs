use crate::model::{Plot, PlotStatus};

/// Per-status plot counts shown in the statistics panel.
///
/// Recomputed on demand from the in-memory plot list; O(n) per collection
/// is fine for the expected list sizes (tens to low hundreds of plots).
/// Invariant: `occupied + vacant + for_sale + other == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotStats {
    pub total: usize,
    pub occupied: usize,
    pub vacant: usize,
    pub for_sale: usize,
    pub other: usize,
}

impl PlotStats {
    pub fn collect(plots: &[Plot]) -> Self {
        let mut stats = PlotStats { total: plots.len(), ..Default::default() };
        for plot in plots {
            match plot.status {
                PlotStatus::Occupied => stats.occupied += 1,
                PlotStatus::Vacant => stats.vacant += 1,
                PlotStatus::ForSale => stats.for_sale += 1,
                PlotStatus::Other => stats.other += 1,
            }
        }
        stats
    }
}
