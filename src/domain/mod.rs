pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::{
    BookInput, BookPopularity, BookRepository, DailyReviewCount, NewUser, ReviewInput,
    ReviewRepository, StatsRepository, UserRepository,
};
