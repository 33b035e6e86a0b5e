mod handler;
mod model;

pub use handler::{clan_overview, home, member_detail, members, refresh, wars};
pub use model::{
    ClanCard, ClanView, CurrentWarCard, HomeView, MemberQuery, MemberRow, MembersView, PlayerCard,
    SortKey, SortOrder, WarLogCard, WarsView, donation_ratio, format_war_time, member_rows,
    war_win_rate,
};
