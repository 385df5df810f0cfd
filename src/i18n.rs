use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use tracing::warn;

use crate::storage::Storage;

/// Storage key holding the selected UI language.
pub const LANGUAGE_KEY: &str = "language";

/// UI languages offered by the language toggle.
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
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Load the persisted language, falling back to English.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(LANGUAGE_KEY) {
            None => Self::default(),
            Some(code) => code.parse().unwrap_or_else(|_| {
                warn!(%code, "unknown stored language");
                Self::default()
            }),
        }
    }

    pub fn store(self, storage: &dyn Storage) {
        storage.set(LANGUAGE_KEY, self.as_ref());
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }

    /// Caption of the toggle button: the language a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self.toggled() {
            Language::En => "EN",
            Language::Ru => "RU",
        }
    }

    /// Look up a dotted key such as `events.noEvents`. Unknown keys come
    /// back unchanged so a missing entry is visible on the page.
    pub fn t<'a>(self, key: &'a str) -> &'a str {
        let table = match self {
            Language::En => EN,
            Language::Ru => RU,
        };
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }
}

/// Flip the persisted language and return the new one.
pub fn toggle_language(storage: &dyn Storage) -> Language {
    let next = Language::load(storage).toggled();
    next.store(storage);
    next
}

const EN: &[(&str, &str)] = &[
    ("nav.home", "HOME"),
    ("nav.events", "EVENTS"),
    ("nav.howToJoin", "HOW TO JOIN"),
    ("nav.leaderboard", "LEADERBOARD"),
    ("events.title", "UPCOMING EVENTS"),
    ("events.subtitle", "Join events and prove your skills"),
    ("events.activeUpcoming", "Active & Upcoming Events"),
    ("events.noEvents", "NO EVENTS AVAILABLE"),
    ("events.noEventsDesc", "Check back soon for upcoming events"),
    ("events.loading", "Loading events..."),
    ("events.loadError", "Error loading events. Please try again later."),
    ("events.details", "DETAILS"),
    ("events.enter", "ENTER"),
    ("events.live", "LIVE"),
    ("events.upcoming", "UPCOMING"),
    ("events.enterEvent", "Enter Event"),
    ("events.discordUsername", "Discord Username"),
    ("events.register", "REGISTER"),
    ("leaderboard.title", "GLOBAL LEADERBOARD"),
    ("leaderboard.subtitle", "Top commanders ranked by event performance"),
    ("leaderboard.allTime", "ALL TIME"),
    ("leaderboard.thisMonth", "THIS MONTH"),
    ("leaderboard.thisWeek", "THIS WEEK"),
    ("leaderboard.rank", "RANK"),
    ("leaderboard.player", "PLAYER"),
    ("leaderboard.wins", "WINS"),
    ("leaderboard.points", "POINTS"),
    ("footer.copyright", "© 2024 Warnament Leaderboard. All rights reserved."),
];

const RU: &[(&str, &str)] = &[
    ("nav.home", "ГЛАВНАЯ"),
    ("nav.events", "СОБЫТИЯ"),
    ("nav.howToJoin", "КАК ПРИСОЕДИНИТЬСЯ"),
    ("nav.leaderboard", "ТАБЛИЦА ЛИДЕРОВ"),
    ("events.title", "ПРЕДСТОЯЩИЕ СОБЫТИЯ"),
    ("events.subtitle", "Присоединяйтесь к событиям и покажите свои навыки"),
    ("events.activeUpcoming", "Активные и Предстоящие События"),
    ("events.noEvents", "НЕТ ДОСТУПНЫХ СОБЫТИЙ"),
    ("events.noEventsDesc", "Вернитесь позже для предстоящих событий"),
    ("events.loading", "Загрузка событий..."),
    ("events.loadError", "Ошибка загрузки событий. Попробуйте позже."),
    ("events.details", "ПОДРОБНЕЕ"),
    ("events.enter", "ВОЙТИ"),
    ("events.live", "В ЭФИРЕ"),
    ("events.upcoming", "СКОРО"),
    ("events.enterEvent", "Войти в Событие"),
    ("events.discordUsername", "Имя пользователя Discord"),
    ("events.register", "ЗАРЕГИСТРИРОВАТЬСЯ"),
    ("leaderboard.title", "ГЛОБАЛЬНАЯ ТАБЛИЦА ЛИДЕРОВ"),
    ("leaderboard.subtitle", "Лучшие командиры по результатам событий"),
    ("leaderboard.allTime", "ВСЁ ВРЕМЯ"),
    ("leaderboard.thisMonth", "ЭТОТ МЕСЯЦ"),
    ("leaderboard.thisWeek", "ЭТА НЕДЕЛЯ"),
    ("leaderboard.rank", "РАНГ"),
    ("leaderboard.player", "ИГРОК"),
    ("leaderboard.wins", "ПОБЕДЫ"),
    ("leaderboard.points", "ОЧКИ"),
    ("footer.copyright", "© 2024 Таблица лидеров Warnament. Все права защищены."),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn looks_up_both_tables() {
        assert_eq!(Language::En.t("events.live"), "LIVE");
        assert_eq!(Language::Ru.t("events.live"), "В ЭФИРЕ");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Language::Ru.t("events.nope"), "events.nope");
    }

    #[test]
    fn toggle_persists_choice() {
        let storage = MemoryStorage::new();
        assert_eq!(Language::load(&storage), Language::En);
        assert_eq!(Language::En.toggle_label(), "RU");

        assert_eq!(toggle_language(&storage), Language::Ru);
        assert_eq!(storage.get(LANGUAGE_KEY).as_deref(), Some("ru"));
        assert_eq!(toggle_language(&storage), Language::En);
    }

    #[test]
    fn garbage_in_storage_means_english() {
        let storage = MemoryStorage::new();
        storage.set(LANGUAGE_KEY, "klingon");
        assert_eq!(Language::load(&storage), Language::En);
    }

    #[test]
    fn tables_have_matching_keys() {
        for (key, _) in EN {
            assert!(RU.iter().any(|(k, _)| k == key), "missing ru entry for {key}");
        }
        assert_eq!(EN.len(), RU.len());
    }
}
