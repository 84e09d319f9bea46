//! SQLite-backed ability storage.

use async_trait::async_trait;
use chroniclr_domain::{Ability, AbilityId, CharacterId, GameId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{AbilityRepo, RepoError};

pub struct SqliteAbilityRepo {
    pool: SqlitePool,
}

impl SqliteAbilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_ability(row: SqliteRow) -> Result<Ability, RepoError> {
    let id = Uuid::parse_str(row.get::<String, _>("id").as_str())
        .map_err(RepoError::serialization)?;
    let game_id = Uuid::parse_str(row.get::<String, _>("game_id").as_str())
        .map_err(RepoError::serialization)?;
    let character_id = Uuid::parse_str(row.get::<String, _>("character_id").as_str())
        .map_err(RepoError::serialization)?;

    Ok(Ability {
        id: AbilityId::from_uuid(id),
        game_id: GameId::from_uuid(game_id),
        character_id: CharacterId::from_uuid(character_id),
        name: row.get("name"),
        cooldown_max: row.get("cooldown_max"),
        current_cooldown: row.get("current_cooldown"),
    })
}

#[async_trait]
impl AbilityRepo for SqliteAbilityRepo {
    async fn save(&self, ability: &Ability) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO abilities
                (id, game_id, character_id, name, cooldown_max, current_cooldown)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                cooldown_max = excluded.cooldown_max,
                current_cooldown = excluded.current_cooldown
            "#,
        )
        .bind(ability.id.to_string())
        .bind(ability.game_id.to_string())
        .bind(ability.character_id.to_string())
        .bind(&ability.name)
        .bind(ability.cooldown_max)
        .bind(ability.current_cooldown)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("abilities.save", e))?;
        Ok(())
    }

    async fn list_on_cooldown(&self, game_id: GameId) -> Result<Vec<Ability>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, game_id, character_id, name, cooldown_max, current_cooldown \
             FROM abilities WHERE game_id = ? AND current_cooldown > 0",
        )
        .bind(game_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("abilities.list_on_cooldown", e))?;

        rows.into_iter().map(row_to_ability).collect()
    }

    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM abilities WHERE game_id = ?")
            .bind(game_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("abilities.delete_for_game", e))?;
        Ok(())
    }
}
