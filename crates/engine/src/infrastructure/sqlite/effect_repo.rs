//! SQLite-backed status effect storage.

use async_trait::async_trait;
use chroniclr_domain::{CharacterId, GameId, StatusEffect, StatusEffectId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{RepoError, StatusEffectRepo};

pub struct SqliteStatusEffectRepo {
    pool: SqlitePool,
}

impl SqliteStatusEffectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_effect(row: SqliteRow) -> Result<StatusEffect, RepoError> {
    let id = Uuid::parse_str(row.get::<String, _>("id").as_str())
        .map_err(RepoError::serialization)?;
    let game_id = Uuid::parse_str(row.get::<String, _>("game_id").as_str())
        .map_err(RepoError::serialization)?;
    let character_id = Uuid::parse_str(row.get::<String, _>("character_id").as_str())
        .map_err(RepoError::serialization)?;

    Ok(StatusEffect {
        id: StatusEffectId::from_uuid(id),
        game_id: GameId::from_uuid(game_id),
        character_id: CharacterId::from_uuid(character_id),
        name: row.get("name"),
        description: row.get("description"),
        duration_rounds: row.get("duration_rounds"),
    })
}

#[async_trait]
impl StatusEffectRepo for SqliteStatusEffectRepo {
    async fn save(&self, effect: &StatusEffect) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO status_effects
                (id, game_id, character_id, name, description, duration_rounds)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                duration_rounds = excluded.duration_rounds
            "#,
        )
        .bind(effect.id.to_string())
        .bind(effect.game_id.to_string())
        .bind(effect.character_id.to_string())
        .bind(&effect.name)
        .bind(&effect.description)
        .bind(effect.duration_rounds)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("status_effects.save", e))?;
        Ok(())
    }

    async fn delete(&self, id: StatusEffectId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM status_effects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("status_effects.delete", e))?;
        Ok(())
    }

    async fn list_timed_for_game(&self, game_id: GameId) -> Result<Vec<StatusEffect>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, game_id, character_id, name, description, duration_rounds \
             FROM status_effects WHERE game_id = ? AND duration_rounds IS NOT NULL",
        )
        .bind(game_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("status_effects.list_timed_for_game", e))?;

        rows.into_iter().map(row_to_effect).collect()
    }

    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM status_effects WHERE game_id = ?")
            .bind(game_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("status_effects.delete_for_game", e))?;
        Ok(())
    }
}
