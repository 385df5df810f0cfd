use std::cmp::Reverse;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::i18n::Language;
use crate::mirror::View;
use crate::model::LeaderboardPlayer;
use crate::render::{escape_html, format_number};

/// Period buttons above the table. The sheet has no per-period data yet, so
/// every filter shows the same all-time standings.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LeaderboardFilter {
    #[default]
    AllTime,
    ThisMonth,
    ThisWeek,
}

impl LeaderboardFilter {
    fn label_key(self) -> &'static str {
        match self {
            LeaderboardFilter::AllTime => "leaderboard.allTime",
            LeaderboardFilter::ThisMonth => "leaderboard.thisMonth",
            LeaderboardFilter::ThisWeek => "leaderboard.thisWeek",
        }
    }
}

/// Players ordered by points, highest first. Players on equal points keep
/// the order the sheet returned them in.
pub fn ranked(players: &[LeaderboardPlayer]) -> Vec<&LeaderboardPlayer> {
    players.iter().sorted_by_key(|p| Reverse(p.points)).collect()
}

fn placeholder_row(state: &str, text: &str) -> String {
    format!(r#"<tr data-state="{state}"><td colspan="4" class="placeholder">{text}</td></tr>"#)
}

/// Rows for the public leaderboard table body.
pub fn leaderboard_rows(view: View<'_, LeaderboardPlayer>) -> String {
    match view {
        View::Loading => placeholder_row("loading", "Loading leaderboard..."),
        View::Failed(_) => placeholder_row("error", "Error loading leaderboard. Please try again later."),
        View::Ready([]) => placeholder_row("empty", "No players yet. Check back soon!"),
        View::Ready(players) => ranked(players)
            .into_iter()
            .enumerate()
            .map(|(i, p)| leaderboard_row(p, i + 1))
            .join("\n"),
    }
}

pub fn leaderboard_row(player: &LeaderboardPlayer, rank: usize) -> String {
    let (row_class, badge_class) = match rank {
        1 => ("rank-1", "rank-badge gold"),
        2 => ("rank-2", "rank-badge silver"),
        3 => ("rank-3", "rank-badge bronze"),
        _ => ("", "rank-badge"),
    };
    let crown = if rank == 1 {
        r#"<div class="player-avatar icon-crown"></div>"#
    } else {
        ""
    };
    let name = if player.name.trim().is_empty() {
        "Unknown"
    } else {
        player.name.as_str()
    };
    format!(
        concat!(
            r#"<tr class="{row_class}" data-player-id="{id}">"#,
            r#"<td><span class="{badge_class}">{rank}</span></td>"#,
            r#"<td><div class="player-info">{crown}<span class="player-name">{name}</span></div></td>"#,
            r#"<td class="wins">{wins}</td>"#,
            r#"<td class="points">{points}</td>"#,
            r#"</tr>"#,
        ),
        row_class = row_class,
        id = escape_html(&player.id),
        badge_class = badge_class,
        rank = rank,
        crown = crown,
        name = escape_html(name),
        wins = format_number(i64::from(player.wins)),
        points = format_number(player.points),
    )
}

/// The period buttons, with the active one marked.
pub fn filter_buttons(active: LeaderboardFilter, lang: Language) -> String {
    use strum::VariantArray;

    LeaderboardFilter::VARIANTS
        .iter()
        .map(|&filter| {
            let class = if filter == active {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            format!(
                r#"<button class="{class}" data-filter="{filter}">{}</button>"#,
                lang.t(filter.label_key())
            )
        })
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn player(id: &str, name: &str, points: i64) -> LeaderboardPlayer {
        LeaderboardPlayer {
            id: id.into(),
            name: name.into(),
            wins: 0,
            points,
        }
    }

    fn table(rows: &str) -> Html {
        Html::parse_fragment(&format!("<table><tbody>{rows}</tbody></table>"))
    }

    fn texts(html: &Html, css: &str) -> Vec<String> {
        let selector = Selector::parse(css).unwrap();
        html.select(&selector)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn ties_keep_insertion_order() {
        let players = vec![player("a", "A", 10), player("b", "B", 10), player("c", "C", 20)];
        let ids: Vec<&str> = ranked(&players).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn rows_follow_ranking_with_medals() {
        let mut players = vec![
            player("a", "Ash", 10),
            player("b", "", 40),
            player("c", "Cole", 25),
            player("d", "Dune", 5),
        ];
        players[1].wins = 1200;
        let html = table(&leaderboard_rows(View::Ready(&players)));

        assert_eq!(texts(&html, ".player-name"), vec!["Unknown", "Cole", "Ash", "Dune"]);
        assert_eq!(texts(&html, ".rank-badge.gold"), vec!["1"]);
        assert_eq!(texts(&html, ".rank-badge.silver"), vec!["2"]);
        assert_eq!(texts(&html, ".rank-badge.bronze"), vec!["3"]);
        assert_eq!(texts(&html, "tr.rank-1 .icon-crown").len(), 1);
        assert_eq!(texts(&html, ".icon-crown").len(), 1);
        assert_eq!(texts(&html, "tr.rank-1 .wins"), vec!["1,200"]);
    }

    #[test]
    fn placeholders() {
        let empty = table(&leaderboard_rows(View::Ready(&[])));
        assert_eq!(texts(&empty, r#"tr[data-state="empty"]"#), vec!["No players yet. Check back soon!"]);

        let loading = table(&leaderboard_rows(View::Loading));
        assert_eq!(texts(&loading, r#"tr[data-state="loading"]"#).len(), 1);

        let failed = table(&leaderboard_rows(View::Failed("503")));
        assert_eq!(texts(&failed, r#"tr[data-state="error"]"#).len(), 1);
    }

    #[test]
    fn marks_active_filter() {
        let html = Html::parse_fragment(&filter_buttons(LeaderboardFilter::ThisWeek, Language::En));
        assert_eq!(texts(&html, "button.filter-btn").len(), 3);
        assert_eq!(texts(&html, "button.active"), vec!["THIS WEEK"]);
        assert_eq!("this-month".parse::<LeaderboardFilter>().unwrap(), LeaderboardFilter::ThisMonth);
    }
}
