//! Refining domain model and the pure derivations behind each view.

pub mod app_state;
pub mod comparison;
pub mod entities;
pub mod fallback;
pub mod optimizer;
pub mod stations;

pub use app_state::AppState;
pub use comparison::{method_highlights, BestFor};
pub use entities::{
    rating_label, CommodityId, Ore, Provenance, RefineryMethod, RefiningData, SourceProvenance,
    YieldBonus, NO_STATION_ID,
};
pub use fallback::{fallback_methods, fallback_ores};
pub use optimizer::{filter_ores, rank_methods, ranking_title, toggle_selection, MethodSort};
pub use stations::{format_bonus, StationMatrix};
