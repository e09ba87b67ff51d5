//! SQLite repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::todo_tasks,
};
use crate::todo::adapters::feed::TaskFeed;
use crate::todo::domain::{Priority, Task};
use crate::todo::ports::{
    TaskListWatch, TaskRepository, TaskStoreError, TaskStoreResult, TaskWatch,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

/// SQLite connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite-backed task repository.
///
/// Diesel work runs on the blocking thread pool; after every mutation the
/// full table snapshot is re-read and broadcast to the live subscriptions.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
    feed: Arc<TaskFeed>,
}

impl SqliteTaskRepository {
    /// Opens (or creates) the database at `database_url` and ensures the
    /// task table exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the pool cannot be
    /// built or the schema cannot be created.
    pub fn open(database_url: &str) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(TaskStoreError::persistence)?;
        let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
        ensure_schema(&mut connection)?;
        drop(connection);
        Ok(Self {
            pool,
            feed: Arc::new(TaskFeed::new()),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }

    /// Runs a mutation, re-reads the table, and re-emits live queries.
    async fn mutate<F>(&self, f: F) -> TaskStoreResult<()>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<()> + Send + 'static,
    {
        let snapshot = self
            .run_blocking(move |connection| {
                f(connection)?;
                load_snapshot(connection)
            })
            .await?;
        self.feed.broadcast(&snapshot)
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let record = task.clone();
        self.mutate(move |connection| {
            if record.id() == 0 {
                let new_row = NewTaskRow {
                    title: record.title().to_owned(),
                    description: record.description().to_owned(),
                    priority: record.priority().as_str().to_owned(),
                };
                diesel::insert_or_ignore_into(todo_tasks::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?;
            } else {
                diesel::insert_or_ignore_into(todo_tasks::table)
                    .values((
                        todo_tasks::id.eq(record.id()),
                        todo_tasks::title.eq(record.title()),
                        todo_tasks::description.eq(record.description()),
                        todo_tasks::priority.eq(record.priority().as_str()),
                    ))
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?;
            }
            Ok(())
        })
        .await
    }

    async fn replace(&self, task: &Task) -> TaskStoreResult<()> {
        let record = task.clone();
        self.mutate(move |connection| {
            diesel::update(todo_tasks::table.filter(todo_tasks::id.eq(record.id())))
                .set((
                    todo_tasks::title.eq(record.title()),
                    todo_tasks::description.eq(record.description()),
                    todo_tasks::priority.eq(record.priority().as_str()),
                ))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, task: &Task) -> TaskStoreResult<()> {
        let record = task.clone();
        self.mutate(move |connection| {
            diesel::delete(
                todo_tasks::table
                    .filter(todo_tasks::id.eq(record.id()))
                    .filter(todo_tasks::title.eq(record.title()))
                    .filter(todo_tasks::description.eq(record.description()))
                    .filter(todo_tasks::priority.eq(record.priority().as_str())),
            )
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete_all(&self) -> TaskStoreResult<()> {
        self.mutate(|connection| {
            diesel::delete(todo_tasks::table)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn watch_all(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.run_blocking(load_snapshot).await?;
        Ok(self.feed.subscribe_all(&snapshot))
    }

    async fn watch_task(&self, id: i64) -> TaskStoreResult<TaskWatch> {
        let snapshot = self.run_blocking(load_snapshot).await?;
        self.feed.subscribe_point(id, &snapshot)
    }

    async fn watch_search(&self, pattern: &str) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.run_blocking(load_snapshot).await?;
        self.feed.subscribe_search(pattern, &snapshot)
    }

    async fn watch_sorted_ascending(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.run_blocking(load_snapshot).await?;
        Ok(self.feed.subscribe_ascending(&snapshot))
    }

    async fn watch_sorted_descending(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.run_blocking(load_snapshot).await?;
        Ok(self.feed.subscribe_descending(&snapshot))
    }
}

fn ensure_schema(connection: &mut SqliteConnection) -> TaskStoreResult<()> {
    diesel::sql_query(concat!(
        "CREATE TABLE IF NOT EXISTS todo_tasks (",
        "id INTEGER PRIMARY KEY AUTOINCREMENT, ",
        "title TEXT NOT NULL, ",
        "description TEXT NOT NULL, ",
        "priority TEXT NOT NULL)",
    ))
    .execute(connection)
    .map_err(TaskStoreError::persistence)?;
    Ok(())
}

/// Full table contents in ascending id order.
fn load_snapshot(connection: &mut SqliteConnection) -> TaskStoreResult<Vec<Task>> {
    let rows = todo_tasks::table
        .order(todo_tasks::id.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
        .map_err(TaskStoreError::persistence)?;
    rows.into_iter().map(row_to_task).collect()
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TaskStoreError::persistence)?;
    Ok(Task::persisted(row.id, row.title, row.description, priority))
}
