use serde::{Deserialize, Serialize};

/// Identifier of a well as used by production and injection records.
///
/// This is the completion identifier (e.g. `"SCH-012:UI"`), not the legal
/// well name, because history tables key off completions.
pub type WellId = String;

/// Master data for one well completion.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Well {
    /// Completion identifier, unique within a catalog.
    pub id: WellId,
    /// Legal well name shown in lists and used for text search.
    pub name: String,
    /// Easting in projected map units.
    pub x: f64,
    /// Northing in projected map units.
    pub y: f64,
    /// Type tag from the well type table (e.g. `"PRODUCTOR"`), empty if unknown.
    pub well_type: String,
    /// Reservoir tag (e.g. `"HOLLIN"`), empty if unknown.
    pub reservoir: String,
}

impl Well {
    /// True if the point lies inside the box spanned by the two corners.
    ///
    /// Corners may be given in any order; the box edges are inclusive.
    pub fn is_within(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        (min_x..=max_x).contains(&self.x) && (min_y..=max_y).contains(&self.y)
    }
}
