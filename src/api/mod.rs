mod chart_card;
mod dashboard;
mod map_card;
mod map_card_config;

pub use chart_card::ChartCard;
pub use dashboard::{Dashboard, MetricsSource};
pub use map_card::MapCard;
pub use map_card_config::MapCardConfig;
