//! Query and mutation services, one per entity.

mod posts;
mod tags;
mod users;

pub use posts::PostService;
pub use tags::TagService;
pub use users::UserService;
