use reqwest::Url;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::LeaderboardPlayer;
use crate::session::Credential;
use crate::sheets::{self, Accepted, ReadAction, WriteAction};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerWrite<'a> {
    action: WriteAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<&'a LeaderboardPlayer>,
    player_id: &'a str,
    admin_password: &'a str,
}

#[instrument(skip(client))]
pub(crate) async fn list_leaderboard(
    client: &reqwest::Client,
    endpoint: &Url,
) -> Result<Vec<LeaderboardPlayer>> {
    let players: Vec<LeaderboardPlayer> =
        sheets::get_collection(client, endpoint, ReadAction::GetLeaderboard).await?;
    debug!(count = players.len(), "parsed leaderboard");
    Ok(players)
}

#[instrument(skip(client, player, credential), fields(player_id = %player.id))]
pub(crate) async fn save_player(
    client: &reqwest::Client,
    endpoint: &Url,
    action: WriteAction,
    player: &LeaderboardPlayer,
    credential: &Credential,
) -> Result<Accepted> {
    let payload = PlayerWrite {
        action,
        player: Some(player),
        player_id: &player.id,
        admin_password: credential.expose(),
    };
    sheets::post_json(client, endpoint, &payload).await
}

#[instrument(skip(client, credential))]
pub(crate) async fn delete_player(
    client: &reqwest::Client,
    endpoint: &Url,
    player_id: &str,
    credential: &Credential,
) -> Result<Accepted> {
    let payload = PlayerWrite {
        action: WriteAction::DeletePlayer,
        player: None,
        player_id,
        admin_password: credential.expose(),
    };
    sheets::post_json(client, endpoint, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_carries_player_and_id() {
        let player = LeaderboardPlayer {
            id: "1712000000000".into(),
            name: "Vex".into(),
            wins: 3,
            points: 1200,
        };
        let credential = Credential::new("s3cret");
        let payload = PlayerWrite {
            action: WriteAction::CreatePlayer,
            player: Some(&player),
            player_id: &player.id,
            admin_password: credential.expose(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["action"], "createPlayer");
        assert_eq!(value["playerId"], "1712000000000");
        assert_eq!(value["player"]["points"], 1200);
    }
}
