use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Clan, ClanMember, CurrentWar, Player, WarLogEntry};

pub const CLAN_LOAD_FAILED: &str = "Failed to load clan data. Please try again later.";
pub const WAR_LOAD_FAILED: &str = "Failed to load war data. Please try again later.";
pub const PLAYER_LOAD_FAILED: &str = "Failed to load player data. Please try again later.";
pub const INVALID_DATE: &str = "Invalid Date";

// 上游时间格式，例如 20240102T150405.000Z
const API_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.fZ";
const DISPLAY_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// 捐兵比：收到为 0 时，有捐出显示 ∞，否则显示 0
pub fn donation_ratio(donations: u32, received: u32) -> String {
    if received > 0 {
        let ratio = donations as f64 / received as f64;
        format!("{:.2}", (ratio * 100.0).round() / 100.0)
    } else if donations > 0 {
        "∞".to_string()
    } else {
        "0".to_string()
    }
}

/// 部落战胜率（百分比，保留一位小数），没有战绩时为 None
pub fn war_win_rate(wins: u32, ties: u32, losses: u32) -> Option<f64> {
    let total = u64::from(wins) + u64::from(ties) + u64::from(losses);
    if total == 0 {
        return None;
    }
    Some((wins as f64 / total as f64 * 1000.0).round() / 10.0)
}

pub fn parse_api_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, API_TIME_FORMAT)
        .map(|time| time.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|time| time.with_timezone(&Utc))
        })
}

/// 解析失败时返回固定文案，不让整个页面失败
pub fn format_war_time(value: &str) -> String {
    match parse_api_time(value) {
        Some(time) => time.format(DISPLAY_TIME_FORMAT).to_string(),
        None => {
            tracing::warn!("Error parsing date: {}", value);
            INVALID_DATE.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Role,
    TownHallLevel,
    Trophies,
    Donations,
}

impl SortKey {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortKey::Name),
            "role" => Some(SortKey::Role),
            "townHallLevel" => Some(SortKey::TownHallLevel),
            "trophies" => Some(SortKey::Trophies),
            "donations" => Some(SortKey::Donations),
            _ => None,
        }
    }

    fn compare(self, a: &MemberRow, b: &MemberRow) -> Ordering {
        match self {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::Role => compare_text(&a.role, &b.role),
            SortKey::TownHallLevel => a.town_hall_level.cmp(&b.town_hall_level),
            SortKey::Trophies => a.trophies.cmp(&b.trophies),
            SortKey::Donations => a.donations.cmp(&b.donations),
        }
    }
}

// 先忽略大小写比较，相同再按原文比较
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl MemberQuery {
    /// 缺省按名字排序；无法识别的字段保持上游顺序
    pub fn sort_key(&self) -> Option<SortKey> {
        match self.sort_by.as_deref() {
            None => Some(SortKey::Name),
            Some(key) => SortKey::from_param(key),
        }
    }

    pub fn order(&self) -> SortOrder {
        match self.order.as_deref() {
            Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub town_hall_level: u32,
    pub trophies: u32,
    pub donations: u32,
    pub donations_received: u32,
    pub donation_ratio: String,
}

impl From<&ClanMember> for MemberRow {
    fn from(member: &ClanMember) -> Self {
        MemberRow {
            id: member.id(),
            name: member.name.clone(),
            role: member.role.clone(),
            town_hall_level: member.town_hall_level,
            trophies: member.trophies,
            donations: member.donations,
            donations_received: member.donations_received,
            donation_ratio: donation_ratio(member.donations, member.donations_received),
        }
    }
}

/// 按名字或职位搜索（不区分大小写），再排序
pub fn member_rows(members: &[ClanMember], query: &MemberQuery) -> Vec<MemberRow> {
    let term = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mut rows: Vec<MemberRow> = members
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&term) || m.role.to_lowercase().contains(&term))
        .map(MemberRow::from)
        .collect();

    if let Some(key) = query.sort_key() {
        let order = query.order();
        rows.sort_by(|a, b| match order {
            SortOrder::Asc => key.compare(a, b),
            SortOrder::Desc => key.compare(a, b).reverse(),
        });
    }

    rows
}

#[derive(Debug, Serialize)]
pub struct MembersView {
    pub total: usize,
    pub members: Vec<MemberRow>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub name: String,
    pub description: Option<String>,
}

impl From<&Clan> for HomeView {
    fn from(clan: &Clan) -> Self {
        HomeView {
            name: clan.name.clone(),
            description: clan.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClanCard {
    pub tag: String,
    pub name: String,
    pub description: Option<String>,
    pub clan_level: Option<u32>,
    pub clan_points: Option<u32>,
    pub members: Option<u32>,
    pub war_wins: u32,
    pub war_ties: u32,
    pub war_losses: u32,
    pub war_win_streak: u32,
    pub war_win_rate: Option<f64>,
    pub war_league: Option<String>,
    pub location: Option<String>,
    pub labels: Vec<String>,
}

impl From<&Clan> for ClanCard {
    fn from(clan: &Clan) -> Self {
        let war_wins = clan.war_wins.unwrap_or(0);
        let war_ties = clan.war_ties.unwrap_or(0);
        let war_losses = clan.war_losses.unwrap_or(0);

        ClanCard {
            tag: clan.tag.clone(),
            name: clan.name.clone(),
            description: clan.description.clone(),
            clan_level: clan.clan_level,
            clan_points: clan.clan_points,
            members: clan.members,
            war_wins,
            war_ties,
            war_losses,
            war_win_streak: clan.war_win_streak.unwrap_or(0),
            war_win_rate: war_win_rate(war_wins, war_ties, war_losses),
            war_league: clan.war_league.as_ref().map(|l| l.name.clone()),
            location: clan.location.as_ref().map(|l| l.name.clone()),
            labels: clan
                .labels
                .iter()
                .flatten()
                .map(|label| label.name.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClanView {
    pub clan: ClanCard,
    pub members: Vec<MemberRow>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CurrentWarCard {
    pub state: String,
    pub opponent: Option<String>,
    pub end_time: Option<String>,
}

impl From<&CurrentWar> for CurrentWarCard {
    fn from(war: &CurrentWar) -> Self {
        CurrentWarCard {
            state: war.state.clone(),
            opponent: war.opponent.as_ref().and_then(|o| o.name.clone()),
            end_time: war.end_time.as_deref().map(format_war_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarLogCard {
    pub opponent: Option<String>,
    pub result: &'static str,
    pub won: bool,
    pub team_size: Option<u32>,
    pub end_time: String,
}

impl From<&WarLogEntry> for WarLogCard {
    fn from(entry: &WarLogEntry) -> Self {
        let won = entry.is_win();
        WarLogCard {
            opponent: entry.opponent.name.clone(),
            result: if won { "Win" } else { "Lose" },
            won,
            team_size: entry.team_size,
            end_time: format_war_time(&entry.end_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarsView {
    pub current_war: CurrentWarCard,
    pub war_log: Vec<WarLogCard>,
}

#[derive(Debug, Serialize)]
pub struct PlayerCard {
    pub tag: String,
    pub name: String,
    pub role: Option<String>,
    pub town_hall_level: Option<u32>,
    pub trophies: u32,
    pub donations: u32,
    pub donations_received: u32,
    pub donation_ratio: String,
    pub war_stars: u32,
}

impl From<&Player> for PlayerCard {
    fn from(player: &Player) -> Self {
        PlayerCard {
            tag: player.tag.clone(),
            name: player.name.clone(),
            role: player.role.clone(),
            town_hall_level: player.town_hall_level,
            trophies: player.trophies,
            donations: player.donations,
            donations_received: player.donations_received,
            donation_ratio: donation_ratio(player.donations, player.donations_received),
            war_stars: player.war_stars,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {}
