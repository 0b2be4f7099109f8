use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// PlotStatus
// ────────────────────────────────────────────────────────────────────────────

/// Occupancy status of a land plot.
///
/// The backend stores the status as a free-form string; the three named
/// states are the only ones the UI distinguishes. Anything else (including
/// future additions to the table) deserializes to [`PlotStatus::Other`]
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    Occupied,
    Vacant,
    ForSale,
    #[serde(other)]
    Other,
}

impl Default for PlotStatus {
    fn default() -> Self {
        PlotStatus::Other
    }
}

impl PlotStatus {
    /// Human-readable status label, in the interface language (Russian).
    pub fn label_ru(self) -> &'static str {
        match self {
            PlotStatus::Occupied => "Занят",
            PlotStatus::Vacant => "Свободен",
            PlotStatus::ForSale => "Продается",
            PlotStatus::Other => "Неизвестно",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plot
// ────────────────────────────────────────────────────────────────────────────

/// Polygon geometry of a plot as stored in the remote table.
///
/// `points` holds space-separated `x,y` pairs in the fixed 500×400 map
/// coordinate space, e.g. `"50,50 150,50 150,120 50,120"`. The string is
/// used verbatim; no validation of point count or convexity is performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotCoordinates {
    #[serde(default)]
    pub points: Option<String>,
}

impl PlotCoordinates {
    /// Parse the `points` string into coordinate pairs.
    ///
    /// Malformed pairs are skipped silently; an absent or empty string
    /// yields an empty vector.
    pub fn parse_points(&self) -> Vec<(f32, f32)> {
        let Some(points) = self.points.as_deref() else {
            return Vec::new();
        };
        points
            .split_whitespace()
            .filter_map(|pair| {
                let (x, y) = pair.split_once(',')?;
                Some((x.trim().parse::<f32>().ok()?, y.trim().parse::<f32>().ok()?))
            })
            .collect()
    }
}

/// A single land plot record, read-only from this application's perspective.
///
/// Records are owned by the remote store and arrive ordered by
/// `plot_number` ascending (lexicographic on the label — the backend's
/// string ordering is preserved, never re-sorted numerically).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plot {
    pub id: String,
    /// Display label; also the sole sort key.
    pub plot_number: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub owner_email: Option<String>,
    /// Area in square meters.
    #[serde(default)]
    pub area_sqm: Option<f64>,
    #[serde(default)]
    pub status: PlotStatus,
    #[serde(default)]
    pub coordinates: Option<PlotCoordinates>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Plot {
    /// The plot's polygon, if it has renderable geometry.
    ///
    /// Returns `None` when the coordinates structure or its `points` field
    /// is absent, or when the string parses to no point. Such plots are
    /// skipped from rendering and can never be hovered or selected.
    pub fn polygon(&self) -> Option<Vec<(f32, f32)>> {
        let pts = self.coordinates.as_ref()?.parse_points();
        if pts.is_empty() { None } else { Some(pts) }
    }
}
