mod handler;
mod model;

pub use handler::{clan_info, clan_members, clan_wars};
pub use model::{WarType, WarsQuery};
