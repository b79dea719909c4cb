// crates/carte-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a loaded map.
///
/// Returned by [`MapSession::stats`](crate::MapSession::stats); the counts
/// reflect the cities after aggregation, whether or not they got a marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStats {
    pub cities: usize,
    pub residents: usize,
    pub markers: usize,
    pub unplottable: usize,
}
