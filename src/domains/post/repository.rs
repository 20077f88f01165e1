use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::model::{BlogPost, CreatePostRequest, UpdatePostRequest};
use crate::db::RepositoryError;

#[async_trait]
pub trait PostRepository: Send + Sync {
  async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepositoryError>;
  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<BlogPost>, RepositoryError>;
  async fn list_by_author(&self, author_id: i32) -> Result<Vec<BlogPost>, RepositoryError>;
  async fn create(&self, req: &CreatePostRequest) -> Result<BlogPost, RepositoryError>;
  async fn update(&self, id: i32, changes: &UpdatePostRequest) -> Result<Option<BlogPost>, RepositoryError>;
  async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

pub struct SqlxPostRepository {
  pub pool: PgPool,
}

impl SqlxPostRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
  async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepositoryError> {
    Ok(find_by_id_with_executor(&self.pool, id).await?)
  }

  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<BlogPost>, RepositoryError> {
    Ok(list_with_executor(&self.pool, skip, limit).await?)
  }

  async fn list_by_author(&self, author_id: i32) -> Result<Vec<BlogPost>, RepositoryError> {
    Ok(list_by_author_with_executor(&self.pool, author_id).await?)
  }

  async fn create(&self, req: &CreatePostRequest) -> Result<BlogPost, RepositoryError> {
    Ok(create_with_executor(&self.pool, req).await?)
  }

  async fn update(&self, id: i32, changes: &UpdatePostRequest) -> Result<Option<BlogPost>, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let Some(mut post) = find_for_update_with_executor(&mut *tx, id).await? else {
      return Ok(None);
    };

    changes.apply_to(&mut post);
    let post = save_with_executor(&mut *tx, &post).await?;

    tx.commit().await?;
    Ok(Some(post))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    Ok(delete_with_executor(&self.pool, id).await?)
  }
}

pub async fn find_by_id_with_executor<'e, E>(executor: E, id: i32) -> Result<Option<BlogPost>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      SELECT id, title, content, author_id, created_at, updated_at
      FROM blog_posts
      WHERE id = $1
    "#,
  )
  .bind(id)
  .fetch_optional(executor)
  .await
}

pub async fn find_for_update_with_executor<'e, E>(executor: E, id: i32) -> Result<Option<BlogPost>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      SELECT id, title, content, author_id, created_at, updated_at
      FROM blog_posts
      WHERE id = $1
      FOR UPDATE
    "#,
  )
  .bind(id)
  .fetch_optional(executor)
  .await
}

pub async fn list_with_executor<'e, E>(executor: E, skip: i64, limit: i64) -> Result<Vec<BlogPost>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      SELECT id, title, content, author_id, created_at, updated_at
      FROM blog_posts
      ORDER BY id
      OFFSET $1
      LIMIT $2
    "#,
  )
  .bind(skip)
  .bind(limit)
  .fetch_all(executor)
  .await
}

pub async fn list_by_author_with_executor<'e, E>(executor: E, author_id: i32) -> Result<Vec<BlogPost>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      SELECT id, title, content, author_id, created_at, updated_at
      FROM blog_posts
      WHERE author_id = $1
      ORDER BY id
    "#,
  )
  .bind(author_id)
  .fetch_all(executor)
  .await
}

pub async fn create_with_executor<'e, E>(executor: E, req: &CreatePostRequest) -> Result<BlogPost, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      INSERT INTO blog_posts (title, content, author_id)
      VALUES ($1, $2, $3)
      RETURNING id, title, content, author_id, created_at, updated_at
    "#,
  )
  .bind(&req.title)
  .bind(&req.content)
  .bind(req.author_id)
  .fetch_one(executor)
  .await
}

pub async fn save_with_executor<'e, E>(executor: E, post: &BlogPost) -> Result<BlogPost, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, BlogPost>(
    r#"
      UPDATE blog_posts
      SET title = $2, content = $3, updated_at = NOW()
      WHERE id = $1
      RETURNING id, title, content, author_id, created_at, updated_at
    "#,
  )
  .bind(post.id)
  .bind(&post.title)
  .bind(&post.content)
  .fetch_one(executor)
  .await
}

pub async fn delete_with_executor<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
    .bind(id)
    .execute(executor)
    .await?;

  Ok(result.rows_affected() > 0)
}
