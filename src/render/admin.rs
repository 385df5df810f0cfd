use itertools::Itertools;

use crate::mirror::View;
use crate::model::{Event, LeaderboardPlayer, Registration};
use crate::render::leaderboard::ranked;
use crate::render::{escape_html, format_number, short_date};

/// Left-hand event list of the admin panel.
pub fn events_list(view: View<'_, Event>, selected: Option<u32>) -> String {
    match view {
        View::Loading => {
            r#"<div class="no-data" data-state="loading"><div class="loading-spinner"></div><p>Loading events...</p></div>"#
                .to_string()
        }
        View::Failed(_) => {
            r#"<div class="no-data error" data-state="error">Error loading events. Please check Google Sheets setup.</div>"#
                .to_string()
        }
        View::Ready([]) => {
            r#"<div class="no-data" data-state="empty">No events yet. Click "Add New Event" to create one.</div>"#
                .to_string()
        }
        View::Ready(events) => events
            .iter()
            .map(|e| event_list_item(e, selected == Some(e.id)))
            .join("\n"),
    }
}

fn event_list_item(event: &Event, active: bool) -> String {
    format!(
        concat!(
            r#"<div class="event-list-item{active}" data-event-id="{id}">"#,
            r#"<h4>{name}</h4>"#,
            r#"<p><strong>Date:</strong> {date}</p>"#,
            r#"<p><strong>Prize:</strong> {prize}</p>"#,
            r#"<p><strong>Status:</strong> {status}</p>"#,
            r#"<div class="event-list-actions">"#,
            r#"<button class="btn btn-secondary" data-action="edit" data-event-id="{id}">EDIT</button>"#,
            r#"<button class="btn-delete" data-action="delete" data-event-id="{id}">DELETE</button>"#,
            r#"</div></div>"#,
        ),
        active = if active { " active" } else { "" },
        id = event.id,
        name = escape_html(&event.name),
        date = short_date(&event.date),
        prize = escape_html(&event.prize),
        status = event.status.to_string().to_uppercase(),
    )
}

/// Heading above the registrations list.
pub fn selected_event_name(event: &Event) -> String {
    format!("Registrations for: {}", escape_html(&event.name))
}

/// Shown in the registrations pane when nothing is selected.
pub fn no_selection() -> String {
    r#"<div class="no-data" data-state="idle">Select an event from the left</div>"#.to_string()
}

pub fn registrations_loading() -> String {
    r#"<div class="no-data" data-state="loading"><div class="loading-spinner"></div><p>Loading registrations...</p></div>"#
        .to_string()
}

pub fn registrations_error() -> String {
    r#"<div class="no-data error" data-state="error"><p>Error loading registrations.</p><p>Check Google Sheets setup.</p></div>"#
        .to_string()
}

/// Registrations of the selected event, in sheet order.
pub fn registrations_list(registrations: &[&Registration]) -> String {
    if registrations.is_empty() {
        return concat!(
            r#"<div class="no-data" data-state="empty">"#,
            r#"<p>No registrations yet for this event.</p>"#,
            r#"<p>Players will appear here when they register on the events page.</p>"#,
            r#"</div>"#,
        )
        .to_string();
    }
    registrations
        .iter()
        .map(|r| {
            format!(
                r#"<div class="player-item"><div class="player-name">{}</div><div class="player-time">{}</div></div>"#,
                escape_html(&r.username),
                short_date(&r.timestamp)
            )
        })
        .join("\n")
}

/// A stats counter; `None` renders as `-`.
pub fn counter(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Admin view of the leaderboard, ranked, with edit/delete affordances.
pub fn players_list(view: View<'_, LeaderboardPlayer>) -> String {
    match view {
        View::Loading => {
            r#"<div class="no-data" data-state="loading"><div class="loading-spinner"></div><p>Loading players...</p></div>"#
                .to_string()
        }
        View::Failed(_) => {
            r#"<div class="no-data error" data-state="error">Error loading players. Please check Google Sheets setup.</div>"#
                .to_string()
        }
        View::Ready([]) => {
            r#"<div class="no-data" data-state="empty">No players yet. Click "Add New Player" to create one.</div>"#
                .to_string()
        }
        View::Ready(players) => ranked(players)
            .into_iter()
            .map(|p| {
                format!(
                    concat!(
                        r#"<div class="player-list-item" data-player-id="{id}">"#,
                        r#"<h4>{name}</h4>"#,
                        r#"<p><strong>Wins:</strong> {wins}</p>"#,
                        r#"<p><strong>Points:</strong> {points}</p>"#,
                        r#"<div class="player-list-actions">"#,
                        r#"<button class="btn btn-secondary" data-action="edit" data-player-id="{id}">EDIT</button>"#,
                        r#"<button class="btn-delete" data-action="delete" data-player-id="{id}">DELETE</button>"#,
                        r#"</div></div>"#,
                    ),
                    id = escape_html(&p.id),
                    name = escape_html(&p.name),
                    wins = format_number(i64::from(p.wins)),
                    points = format_number(p.points),
                )
            })
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventStatus;
    use chrono::{TimeZone, Utc};
    use scraper::{Html, Selector};

    fn event(id: u32, name: &str) -> Event {
        Event {
            id,
            name: name.into(),
            date: Utc.with_ymd_and_hms(2025, 6, 6, 19, 0, 0).unwrap(),
            description: String::new(),
            prize: "Role".into(),
            status: EventStatus::Live,
            tag: None,
        }
    }

    fn texts(markup: &str, css: &str) -> Vec<String> {
        let html = Html::parse_fragment(markup);
        let selector = Selector::parse(css).unwrap();
        html.select(&selector)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn marks_selected_event() {
        let events = vec![event(1, "Spring Cup"), event(2, "Night Siege")];
        let markup = events_list(View::Ready(&events), Some(2));
        assert_eq!(texts(&markup, ".event-list-item.active h4"), vec!["Night Siege"]);
        assert_eq!(texts(&markup, ".event-list-item h4").len(), 2);
        assert!(markup.contains("<strong>Status:</strong> LIVE"));
        assert!(markup.contains("<strong>Date:</strong> Jun 6, 07:00 PM"));
    }

    #[test]
    fn empty_list_prompts_to_create() {
        let markup = events_list(View::Ready(&[]), None);
        assert_eq!(texts(&markup, r#"[data-state="empty"]"#).len(), 1);
    }

    #[test]
    fn lists_registrations() {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 9, 5, 0).unwrap();
        let registration = Registration {
            timestamp: date,
            event: "Spring Cup".into(),
            username: "kestrel".into(),
            event_date: date,
        };
        let markup = registrations_list(&[&registration]);
        assert_eq!(texts(&markup, ".player-name"), vec!["kestrel"]);
        assert_eq!(texts(&markup, ".player-time"), vec!["Jun 1, 09:05 AM"]);
        assert_eq!(texts(&registrations_list(&[]), r#"[data-state="empty"]"#).len(), 1);
    }

    #[test]
    fn counters() {
        assert_eq!(counter(Some(12)), "12");
        assert_eq!(counter(None), "-");
    }

    #[test]
    fn players_are_ranked() {
        let players = vec![
            LeaderboardPlayer {
                id: "1".into(),
                name: "Low".into(),
                wins: 0,
                points: 5,
            },
            LeaderboardPlayer {
                id: "2".into(),
                name: "High".into(),
                wins: 2,
                points: 5000,
            },
        ];
        let markup = players_list(View::Ready(&players));
        assert_eq!(texts(&markup, ".player-list-item h4"), vec!["High", "Low"]);
        assert!(markup.contains("<strong>Points:</strong> 5,000"));
    }
}
