//! End-to-end flows through the coordinator with the durable adapters.
//!
//! These tests wire [`TaskListCoordinator`] to the SQLite repository and the
//! file preference store, then walk realistic user journeys: create a task
//! through the edit form, search for it, change the sort preference, and
//! confirm everything survives a restart.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use rstest::{fixture, rstest};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tickoff::todo::adapters::fs::FilePreferenceStore;
use tickoff::todo::adapters::sqlite::SqliteTaskRepository;
use tickoff::todo::domain::{PendingAction, Priority, SearchBarState, Task};
use tickoff::todo::services::TaskListCoordinator;

type FlowCoordinator = TaskListCoordinator<SqliteTaskRepository, FilePreferenceStore>;

struct AppDirs {
    _root: TempDir,
    database_url: String,
    preference_path: String,
}

#[fixture]
fn app_dirs() -> AppDirs {
    let root = tempfile::tempdir().expect("temp dir");
    let database_url = root
        .path()
        .join("tasks.db")
        .to_string_lossy()
        .into_owned();
    let preference_path = root
        .path()
        .join("preferences")
        .to_string_lossy()
        .into_owned();
    AppDirs {
        _root: root,
        database_url,
        preference_path,
    }
}

async fn start(dirs: &AppDirs) -> FlowCoordinator {
    let repository =
        Arc::new(SqliteTaskRepository::open(&dirs.database_url).expect("open repository"));
    let preferences =
        Arc::new(FilePreferenceStore::open(&dirs.preference_path).expect("open preferences"));
    TaskListCoordinator::new(repository, preferences).await
}

/// Applies store emissions until the predicate holds, or panics after five
/// seconds.
async fn settle_until<F>(coordinator: &mut FlowCoordinator, predicate: F)
where
    F: Fn(&FlowCoordinator) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !predicate(coordinator) {
            coordinator.next_change().await;
        }
    })
    .await
    .expect("coordinator did not reach the expected state in time");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_search_and_sort_journey(app_dirs: AppDirs) {
    let mut coordinator = start(&app_dirs).await;
    settle_until(&mut coordinator, |c| {
        c.all_tasks().is_ready() && c.sort_state().is_ready()
    })
    .await;

    // Fill the form and submit.
    coordinator.set_title("Buy milk");
    coordinator.set_description("Two litres");
    coordinator.set_priority(Priority::High);
    assert!(coordinator.validate_buffer());
    coordinator.execute_pending_action(PendingAction::Add);

    settle_until(&mut coordinator, |c| {
        c.all_tasks().value().is_some_and(|tasks| tasks.len() == 1)
    })
    .await;

    // A second task so search has something to exclude.
    coordinator.set_title("Buy eggs");
    coordinator.set_description("A dozen");
    coordinator.set_priority(Priority::Low);
    coordinator.execute_pending_action(PendingAction::Add);
    settle_until(&mut coordinator, |c| {
        c.all_tasks().value().is_some_and(|tasks| tasks.len() == 2)
    })
    .await;

    coordinator.search("milk").await;
    assert_eq!(coordinator.search_mode(), SearchBarState::Triggered);
    settle_until(&mut coordinator, |c| c.searched_tasks().is_ready()).await;
    let visible: Vec<&str> = coordinator
        .visible_tasks()
        .value()
        .expect("ready results")
        .iter()
        .map(Task::title)
        .collect();
    assert_eq!(visible, vec!["Buy milk"]);

    // Closing the search bar goes back to the preference-driven list.
    coordinator.set_search_mode(SearchBarState::Closed);
    coordinator.persist_sort_preference(Priority::High);
    settle_until(&mut coordinator, |c| {
        c.sort_state().value() == Some(&Priority::High)
            && c.visible_tasks().value().is_some_and(|tasks| tasks.len() == 2)
    })
    .await;
    let sorted: Vec<&str> = coordinator
        .visible_tasks()
        .value()
        .expect("ready list")
        .iter()
        .map(Task::title)
        .collect();
    assert_eq!(sorted, vec!["Buy milk", "Buy eggs"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_and_preference_survive_a_restart(app_dirs: AppDirs) {
    {
        let mut coordinator = start(&app_dirs).await;
        settle_until(&mut coordinator, |c| {
            c.all_tasks().is_ready() && c.sort_state().is_ready()
        })
        .await;

        coordinator.set_title("Water plants");
        coordinator.set_description("Back garden");
        coordinator.set_priority(Priority::Medium);
        coordinator.execute_pending_action(PendingAction::Add);
        coordinator.persist_sort_preference(Priority::Low);

        settle_until(&mut coordinator, |c| {
            c.all_tasks().value().is_some_and(|tasks| tasks.len() == 1)
                && c.sort_state().value() == Some(&Priority::Low)
        })
        .await;
    }

    let mut restarted = start(&app_dirs).await;
    settle_until(&mut restarted, |c| {
        c.all_tasks().is_ready() && c.sort_state().is_ready()
    })
    .await;

    assert_eq!(
        restarted.all_tasks().value().map(Vec::as_slice),
        Some(
            [Task::persisted(
                1,
                "Water plants",
                "Back garden",
                Priority::Medium
            )]
            .as_slice()
        )
    );
    assert_eq!(restarted.sort_state().value(), Some(&Priority::Low));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_an_existing_task_end_to_end(app_dirs: AppDirs) {
    let mut coordinator = start(&app_dirs).await;
    settle_until(&mut coordinator, |c| c.all_tasks().is_ready()).await;

    coordinator.set_title("Old title");
    coordinator.set_description("Old body");
    coordinator.set_priority(Priority::Low);
    coordinator.execute_pending_action(PendingAction::Add);
    settle_until(&mut coordinator, |c| {
        c.all_tasks().value().is_some_and(|tasks| tasks.len() == 1)
    })
    .await;

    coordinator.select_task(1).await;
    settle_until(&mut coordinator, |c| c.buffer().id() == 1).await;
    assert_eq!(coordinator.buffer().title(), "Old title");

    coordinator.set_title("New title");
    coordinator.execute_pending_action(PendingAction::Update);

    let expected = Task::persisted(1, "New title", "Old body", Priority::Low);
    settle_until(&mut coordinator, |c| {
        c.all_tasks()
            .value()
            .is_some_and(|tasks| tasks.as_slice() == std::slice::from_ref(&expected))
    })
    .await;
}
