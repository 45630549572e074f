pub mod repositories;
pub mod state;

pub use repositories::{
    SeaOrmBookRepository, SeaOrmReviewRepository, SeaOrmStatsRepository, SeaOrmUserRepository,
};
pub use state::AppState;
