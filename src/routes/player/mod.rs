mod handler;
mod model;

pub use handler::player_info;
pub use model::PlayerQuery;
