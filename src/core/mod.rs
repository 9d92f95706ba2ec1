pub mod factor;
pub mod player;
pub mod ranked_player;
pub mod ranking_report;

pub use factor::FactorKey;
pub use player::{NewPlayer, Player, PlayerUpdate};
pub use ranked_player::{RankedPlayer, ScoreKey, Scores};
pub use ranking_report::{RankingReport, RankingSummary};
