use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::lenient_id;

/// A row of the leaderboard sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardPlayer {
    #[serde(deserialize_with = "lenient_id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub points: i64,
}

/// Identifier for a newly created player, derived from the creation time.
pub fn next_player_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_counters_default_to_zero() {
        let player: LeaderboardPlayer =
            serde_json::from_str(r#"{"id": 1712000000000, "name": "Vex"}"#).unwrap();
        assert_eq!(player.id, "1712000000000");
        assert_eq!(player.wins, 0);
        assert_eq!(player.points, 0);
    }

    #[test]
    fn player_id_uses_millis() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(next_player_id(now), "1704067200000");
    }
}
