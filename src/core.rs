pub mod analysis;
pub mod error;
pub mod extrema_type;
pub mod loading_level;
pub mod planner;
pub mod point;
pub mod price_level;
pub mod series;
pub mod statistics;
