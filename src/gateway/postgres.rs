//! Translation cache in PostgreSQL using pgvector

use anyhow::Result;
use async_trait::async_trait;
use pgvector::Vector;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::info;

use super::cache::{CachedTranslation, TranslationCache};

pub struct PgTranslationCache {
    pool: PgPool,
}

impl PgTranslationCache {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS translations_cache (
                id BIGSERIAL PRIMARY KEY,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                embedding vector NOT NULL,
                target_text TEXT NOT NULL,
                source_text TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            "#,
        )
        .execute(&pool)
        .await?;

        info!("Connected translation cache to PostgreSQL");
        Ok(Self { pool })
    }
}

#[async_trait]
impl TranslationCache for PgTranslationCache {
    async fn lookup(
        &self,
        source_language: &str,
        target_language: &str,
        embedding: &[f32],
        max_distance: f32,
    ) -> Result<Option<String>, anyhow::Error> {
        let row = sqlx::query(
            r#"
            SELECT target_text
            FROM translations_cache
            WHERE source_language = $1
            AND target_language = $2
            AND embedding <=> $3 <= $4
            ORDER BY embedding <=> $3
            LIMIT 1
            "#,
        )
        .bind(source_language)
        .bind(target_language)
        .bind(Vector::from(embedding.to_vec()))
        .bind(f64::from(max_distance))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(|row| row.try_get::<String, _>("target_text"))
            .transpose()?)
    }

    async fn store(&self, entry: CachedTranslation) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO translations_cache (source_language, target_language, embedding, target_text, source_text)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&entry.source_language)
        .bind(&entry.target_language)
        .bind(Vector::from(entry.embedding))
        .bind(&entry.target_text)
        .bind(&entry.source_text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
