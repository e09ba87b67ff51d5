//! Contract tests for the in-memory task repository.

use crate::todo::adapters::memory::InMemoryTaskRepository;
use crate::todo::domain::{Priority, Task};
use crate::todo::ports::TaskRepository;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn unpersisted(title: &str, description: &str, priority: Priority) -> Task {
    Task::new(title, description, priority)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_sequential_identifiers(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("first", "a", Priority::Low))
        .await
        .expect("insert should succeed");
    repository
        .insert(&unpersisted("second", "b", Priority::High))
        .await
        .expect("insert should succeed");

    let receiver = repository.watch_all().await.expect("subscribe");
    let tasks = receiver.borrow().clone();
    let ids: Vec<i64> = tasks.iter().map(Task::id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(tasks.first().map(Task::title), Some("first"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_ignores_identifier_conflicts(repository: InMemoryTaskRepository) {
    let original = Task::persisted(5, "keep me", "original", Priority::Low);
    repository.insert(&original).await.expect("insert");
    repository
        .insert(&Task::persisted(5, "intruder", "conflict", Priority::High))
        .await
        .expect("conflicting insert is ignored, not an error");

    let receiver = repository.watch_all().await.expect("subscribe");
    assert_eq!(receiver.borrow().clone(), vec![original]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replace_overwrites_by_id_and_ignores_missing_rows(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("before", "old", Priority::Low))
        .await
        .expect("insert");

    let updated = Task::persisted(1, "after", "new", Priority::High);
    repository.replace(&updated).await.expect("replace");
    repository
        .replace(&Task::persisted(99, "ghost", "missing", Priority::Low))
        .await
        .expect("replacing a missing row is a no-op");

    let receiver = repository.watch_all().await.expect("subscribe");
    assert_eq!(receiver.borrow().clone(), vec![updated]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_requires_a_full_row_match(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("target", "exact", Priority::Medium))
        .await
        .expect("insert");

    // Same id, different title: the stored row must survive.
    repository
        .delete(&Task::persisted(1, "wrong title", "exact", Priority::Medium))
        .await
        .expect("delete");
    let receiver = repository.watch_all().await.expect("subscribe");
    assert_eq!(receiver.borrow().len(), 1);

    repository
        .delete(&Task::persisted(1, "target", "exact", Priority::Medium))
        .await
        .expect("delete");
    assert_eq!(receiver.borrow().len(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_clears_the_table(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("one", "a", Priority::Low))
        .await
        .expect("insert");
    repository
        .insert(&unpersisted("two", "b", Priority::High))
        .await
        .expect("insert");

    repository.delete_all().await.expect("delete all");

    let receiver = repository.watch_all().await.expect("subscribe");
    assert!(receiver.borrow().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn watch_all_emits_after_every_mutation(repository: InMemoryTaskRepository) {
    let mut receiver = repository.watch_all().await.expect("subscribe");
    assert!(receiver.borrow().is_empty());

    repository
        .insert(&unpersisted("live", "update", Priority::Low))
        .await
        .expect("insert");

    receiver.changed().await.expect("emission after insert");
    assert_eq!(receiver.borrow_and_update().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn watch_task_follows_the_row_lifecycle(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("tracked", "row", Priority::Low))
        .await
        .expect("insert");

    let mut receiver = repository.watch_task(1).await.expect("subscribe");
    assert_eq!(
        receiver.borrow_and_update().as_ref().map(Task::title),
        Some("tracked")
    );

    repository.delete_all().await.expect("delete all");
    receiver.changed().await.expect("emission after delete");
    assert!(receiver.borrow_and_update().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn watch_search_matches_title_or_description(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("Buy milk", "dairy run", Priority::Low))
        .await
        .expect("insert");
    repository
        .insert(&unpersisted("Buy eggs", "also dairy-adjacent", Priority::Low))
        .await
        .expect("insert");

    let receiver = repository.watch_search("%milk%").await.expect("subscribe");
    let titles: Vec<String> = receiver
        .borrow()
        .iter()
        .map(|task| task.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Buy milk".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sorted_watches_order_by_priority_rank(repository: InMemoryTaskRepository) {
    repository
        .insert(&unpersisted("h", "high", Priority::High))
        .await
        .expect("insert");
    repository
        .insert(&unpersisted("l", "low", Priority::Low))
        .await
        .expect("insert");
    repository
        .insert(&unpersisted("m", "medium", Priority::Medium))
        .await
        .expect("insert");

    let ascending = repository
        .watch_sorted_ascending()
        .await
        .expect("subscribe");
    let ranks: Vec<Priority> = ascending.borrow().iter().map(Task::priority).collect();
    assert_eq!(ranks, vec![Priority::Low, Priority::Medium, Priority::High]);

    let descending = repository
        .watch_sorted_descending()
        .await
        .expect("subscribe");
    let reversed: Vec<Priority> = descending.borrow().iter().map(Task::priority).collect();
    assert_eq!(reversed, vec![Priority::High, Priority::Medium, Priority::Low]);
}
