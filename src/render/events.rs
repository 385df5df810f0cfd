use itertools::Itertools;

use crate::i18n::Language;
use crate::mirror::View;
use crate::model::{Event, EventStatus};
use crate::render::{escape_html, long_date};

fn status_label(status: EventStatus, lang: Language) -> &'static str {
    match status {
        EventStatus::Live => lang.t("events.live"),
        EventStatus::Upcoming => lang.t("events.upcoming"),
    }
}

/// The public events grid.
pub fn events_grid(view: View<'_, Event>, lang: Language) -> String {
    match view {
        View::Loading => format!(
            r#"<div class="no-events" data-state="loading"><div class="loading-spinner"></div><p>{}</p></div>"#,
            lang.t("events.loading")
        ),
        View::Failed(message) => format!(
            r#"<div class="no-events error" data-state="error"><h3>{}</h3><p>{}</p></div>"#,
            lang.t("events.loadError"),
            escape_html(message)
        ),
        View::Ready([]) => format!(
            r#"<div class="no-events" data-state="empty"><div class="icon-trophy"></div><h3>{}</h3><p>{}</p></div>"#,
            lang.t("events.noEvents"),
            lang.t("events.noEventsDesc")
        ),
        View::Ready(events) => events.iter().map(|e| event_card(e, lang)).join("\n"),
    }
}

pub fn event_card(event: &Event, lang: Language) -> String {
    let tag = event
        .tag
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| format!(r#"<span class="event-tag">{}</span>"#, escape_html(t)))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<div class="event-card" data-event-id="{id}">"#,
            r#"<span class="event-status {status}">{status_label}</span>{tag}"#,
            r#"<h3>{name}</h3>"#,
            r#"<span class="event-date"><span class="icon-calendar"></span> {date}</span>"#,
            r#"<p class="event-description">{description}</p>"#,
            r#"<div class="event-prize"><span class="icon-trophy"></span> {prize}</div>"#,
            r#"<div class="event-actions">"#,
            r#"<button class="btn btn-secondary" data-action="details" data-event-id="{id}">{details}</button>"#,
            r#"<button class="btn btn-primary" data-action="enter" data-event-id="{id}">{enter}</button>"#,
            r#"</div></div>"#,
        ),
        id = event.id,
        status = event.status,
        status_label = status_label(event.status, lang),
        tag = tag,
        name = escape_html(&event.name),
        date = long_date(&event.date),
        description = escape_html(&event.description),
        prize = escape_html(&event.prize),
        details = lang.t("events.details"),
        enter = lang.t("events.enter"),
    )
}

/// Body of the details dialog.
pub fn event_details(event: &Event, lang: Language) -> String {
    format!(
        concat!(
            r#"<h2>{name}</h2>"#,
            r#"<span class="event-status {status}">{status_label}</span>"#,
            r#"<div class="event-details">"#,
            r#"<p><strong>Date:</strong> {date}</p>"#,
            r#"<p><strong>Prize:</strong> {prize}</p>"#,
            r#"<p><strong>Description:</strong></p>"#,
            r#"<p class="event-description">{description}</p>"#,
            r#"</div>"#,
            r#"<button class="btn btn-primary" data-action="enter" data-event-id="{id}">{enter}</button>"#,
        ),
        name = escape_html(&event.name),
        status = event.status,
        status_label = status_label(event.status, lang),
        date = long_date(&event.date),
        prize = escape_html(&event.prize),
        description = escape_html(&event.description),
        id = event.id,
        enter = lang.t("events.enterEvent").to_uppercase(),
    )
}

/// Header of the registration dialog.
pub fn enter_event_info(event: &Event, lang: Language) -> String {
    format!(
        r#"<div class="enter-event-info" data-event-id="{}"><h3>{}</h3><p>{}</p></div>"#,
        event.id,
        escape_html(&event.name),
        lang.t("events.discordUsername"),
    )
}
