//! Task list coordinator: the reactive state owner the presentation layer
//! binds to.
//!
//! The coordinator is the single logical owner of all mutable view state.
//! Store reads are long-lived watch subscriptions whose emissions are
//! funnelled onto one internal channel; [`TaskListCoordinator::next_change`]
//! applies exactly one emission at a time, so all state mutation happens
//! through sequential dispatch. Store writes are fire-and-forget spawned
//! tasks: the coordinator never awaits their completion and never feeds
//! their outcome back into view state (failures are logged, not displayed).

use crate::todo::domain::{
    EditBuffer, NEW_TASK_ID, PendingAction, Priority, QueryError, QueryState, SearchBarState, Task,
};
use crate::todo::ports::{PreferenceStore, TaskRepository};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// One emission from a live store subscription.
enum StoreEvent {
    /// Full task list in natural id order.
    All(Vec<Task>),
    /// Task list ordered by ascending priority rank.
    Ascending(Vec<Task>),
    /// Task list ordered by descending priority rank.
    Descending(Vec<Task>),
    /// Search results for the subscription with the given generation.
    Search {
        /// Generation counter distinguishing superseded searches.
        generation: u64,
        /// Matching tasks.
        tasks: Vec<Task>,
    },
    /// Raw persisted sort-state string.
    SortState(String),
    /// Current value of the selected task's point subscription.
    Selected(Option<Task>),
}

/// Forwards watch emissions (current value first) onto the event channel.
///
/// The spawned task ends when the watch sender or the event channel is
/// dropped; aborting the returned handle cancels the subscription.
fn forward<T, F>(
    mut source: watch::Receiver<T>,
    events: mpsc::UnboundedSender<StoreEvent>,
    wrap: F,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> StoreEvent + Send + 'static,
{
    tokio::spawn(async move {
        let initial = source.borrow().clone();
        if events.send(wrap(initial)).is_err() {
            return;
        }
        while source.changed().await.is_ok() {
            let value = source.borrow_and_update().clone();
            if events.send(wrap(value)).is_err() {
                break;
            }
        }
    })
}

/// Reactive coordinator for the task list and the create/edit form.
///
/// Presentation layers read snapshot accessors and emit intents; after each
/// `await` of [`TaskListCoordinator::next_change`] the snapshot reflects one
/// more store emission.
pub struct TaskListCoordinator<R, P>
where
    R: TaskRepository + 'static,
    P: PreferenceStore + 'static,
{
    repository: Arc<R>,
    preferences: Arc<P>,
    events_tx: mpsc::UnboundedSender<StoreEvent>,
    events_rx: mpsc::UnboundedReceiver<StoreEvent>,

    action: PendingAction,
    buffer: EditBuffer,
    search_mode: SearchBarState,
    search_text: String,
    all_tasks: QueryState<Vec<Task>>,
    ascending: QueryState<Vec<Task>>,
    descending: QueryState<Vec<Task>>,
    searched: QueryState<Vec<Task>>,
    sort_state: QueryState<Priority>,
    selected: Option<Task>,

    search_generation: u64,
    search_task: Option<JoinHandle<()>>,
    selection_task: Option<JoinHandle<()>>,
    subscriptions: Vec<JoinHandle<()>>,
}

impl<R, P> TaskListCoordinator<R, P>
where
    R: TaskRepository + 'static,
    P: PreferenceStore + 'static,
{
    /// Creates the coordinator and starts the lifetime subscriptions: full
    /// list, both sorted lists, and the persisted sort preference.
    pub async fn new(repository: Arc<R>, preferences: Arc<P>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut coordinator = Self {
            repository,
            preferences,
            events_tx,
            events_rx,
            action: PendingAction::NoAction,
            buffer: EditBuffer::default(),
            search_mode: SearchBarState::Closed,
            search_text: String::new(),
            all_tasks: QueryState::Idle,
            ascending: QueryState::Idle,
            descending: QueryState::Idle,
            searched: QueryState::Idle,
            sort_state: QueryState::Idle,
            selected: None,
            search_generation: 0,
            search_task: None,
            selection_task: None,
            subscriptions: Vec::new(),
        };
        coordinator.load_all().await;
        coordinator.load_sorted().await;
        coordinator.load_sort_preference().await;
        coordinator
    }

    async fn load_all(&mut self) {
        self.all_tasks = QueryState::Loading;
        match self.repository.watch_all().await {
            Ok(receiver) => {
                self.subscriptions
                    .push(forward(receiver, self.events_tx.clone(), StoreEvent::All));
            }
            Err(err) => self.all_tasks = QueryState::Failed(QueryError::new(err)),
        }
    }

    async fn load_sorted(&mut self) {
        self.ascending = QueryState::Loading;
        match self.repository.watch_sorted_ascending().await {
            Ok(receiver) => {
                self.subscriptions.push(forward(
                    receiver,
                    self.events_tx.clone(),
                    StoreEvent::Ascending,
                ));
            }
            Err(err) => self.ascending = QueryState::Failed(QueryError::new(err)),
        }

        self.descending = QueryState::Loading;
        match self.repository.watch_sorted_descending().await {
            Ok(receiver) => {
                self.subscriptions.push(forward(
                    receiver,
                    self.events_tx.clone(),
                    StoreEvent::Descending,
                ));
            }
            Err(err) => self.descending = QueryState::Failed(QueryError::new(err)),
        }
    }

    async fn load_sort_preference(&mut self) {
        self.sort_state = QueryState::Loading;
        match self.preferences.watch_sort_state().await {
            Ok(receiver) => {
                self.subscriptions.push(forward(
                    receiver,
                    self.events_tx.clone(),
                    StoreEvent::SortState,
                ));
            }
            Err(err) => self.sort_state = QueryState::Failed(QueryError::new(err)),
        }
    }

    /// Waits for the next store emission and applies it to view state.
    ///
    /// The coordinator holds its own event sender, so the channel stays
    /// open for its whole lifetime; this pends until an emission arrives.
    pub async fn next_change(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::All(tasks) => self.all_tasks = QueryState::Ready(tasks),
            StoreEvent::Ascending(tasks) => self.ascending = QueryState::Ready(tasks),
            StoreEvent::Descending(tasks) => self.descending = QueryState::Ready(tasks),
            StoreEvent::Search { generation, tasks } => {
                // Emissions from a superseded search subscription are stale.
                if generation == self.search_generation {
                    self.searched = QueryState::Ready(tasks);
                }
            }
            StoreEvent::SortState(raw) => {
                self.sort_state = match Priority::try_from(raw.as_str()) {
                    Ok(priority) => QueryState::Ready(priority),
                    Err(err) => QueryState::Failed(QueryError::new(err)),
                };
            }
            StoreEvent::Selected(task) => {
                match &task {
                    Some(found) => self.buffer.load(found),
                    None => self.buffer.reset(),
                }
                self.selected = task;
            }
        }
    }

    /// Selects the task to edit, or resets the form for a new task when
    /// `id` is [`NEW_TASK_ID`].
    ///
    /// Selecting an existing task subscribes to its live value and copies
    /// it into the edit buffer once it arrives; a previous selection
    /// subscription is cancelled.
    pub async fn select_task(&mut self, id: i64) {
        if let Some(handle) = self.selection_task.take() {
            handle.abort();
        }
        if id == NEW_TASK_ID {
            self.selected = None;
            self.buffer.reset();
            return;
        }
        match self.repository.watch_task(id).await {
            Ok(receiver) => {
                self.selection_task = Some(forward(
                    receiver,
                    self.events_tx.clone(),
                    StoreEvent::Selected,
                ));
            }
            Err(err) => {
                tracing::warn!(task_id = id, error = %err, "task selection subscription failed");
            }
        }
    }

    /// Subscribes to live results for `query` (as a substring match) and
    /// switches the list to showing them.
    ///
    /// A previous search subscription is cancelled; its late emissions are
    /// discarded.
    pub async fn search(&mut self, query: &str) {
        if let Some(handle) = self.search_task.take() {
            handle.abort();
        }
        self.search_generation += 1;
        self.searched = QueryState::Loading;
        let pattern = format!("%{query}%");
        match self.repository.watch_search(&pattern).await {
            Ok(receiver) => {
                let generation = self.search_generation;
                self.search_task = Some(forward(
                    receiver,
                    self.events_tx.clone(),
                    move |tasks| StoreEvent::Search { generation, tasks },
                ));
            }
            Err(err) => self.searched = QueryState::Failed(QueryError::new(err)),
        }
        self.search_mode = SearchBarState::Triggered;
    }

    /// Dispatches a store mutation for `action` and unconditionally resets
    /// the pending action, without waiting for the write to finish.
    ///
    /// Add and Undo insert a fresh task from the buffer (and close the
    /// search bar); Update replaces by the buffer's id; Delete removes the
    /// buffer's full row; `DeleteAll` clears the table.
    pub fn execute_pending_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Add | PendingAction::Undo => {
                self.spawn_insert(self.buffer.as_new_task());
                self.search_mode = SearchBarState::Closed;
            }
            PendingAction::Update => self.spawn_replace(self.buffer.as_existing_task()),
            PendingAction::Delete => self.spawn_delete(self.buffer.as_existing_task()),
            PendingAction::DeleteAll => self.spawn_delete_all(),
            PendingAction::NoAction => {}
        }
        self.action = PendingAction::NoAction;
    }

    fn spawn_insert(&self, task: Task) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(err) = repository.insert(&task).await {
                tracing::warn!(error = %err, "task insert failed");
            }
        });
    }

    fn spawn_replace(&self, task: Task) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(err) = repository.replace(&task).await {
                tracing::warn!(error = %err, "task update failed");
            }
        });
    }

    fn spawn_delete(&self, task: Task) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(err) = repository.delete(&task).await {
                tracing::warn!(error = %err, "task delete failed");
            }
        });
    }

    fn spawn_delete_all(&self) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(err) = repository.delete_all().await {
                tracing::warn!(error = %err, "delete-all failed");
            }
        });
    }

    /// Fire-and-forget write of the chosen sort preference.
    pub fn persist_sort_preference(&self, priority: Priority) {
        let preferences = Arc::clone(&self.preferences);
        tokio::spawn(async move {
            if let Err(err) = preferences.persist_sort_state(priority).await {
                tracing::warn!(error = %err, "sort preference write failed");
            }
        });
    }

    /// Records the next intended store mutation without executing it.
    pub const fn set_pending_action(&mut self, action: PendingAction) {
        self.action = action;
    }

    /// Sets the buffered title; silently ignored at the length cap.
    pub fn set_title(&mut self, title: &str) {
        self.buffer.set_title(title);
    }

    /// Sets the buffered description.
    pub fn set_description(&mut self, description: &str) {
        self.buffer.set_description(description);
    }

    /// Sets the buffered priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.buffer.set_priority(priority);
    }

    /// True when the buffer may leave the edit form on add/update.
    #[must_use]
    pub fn validate_buffer(&self) -> bool {
        self.buffer.is_complete()
    }

    /// Sets the search bar mode directly.
    pub const fn set_search_mode(&mut self, mode: SearchBarState) {
        self.search_mode = mode;
    }

    /// Sets the search bar text directly.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_owned();
    }

    /// The task list the presentation layer should currently show:
    /// search results while a search is triggered, otherwise the list
    /// selected by the sort preference.
    #[must_use]
    pub fn visible_tasks(&self) -> &QueryState<Vec<Task>> {
        if matches!(self.search_mode, SearchBarState::Triggered) {
            return &self.searched;
        }
        match self.sort_state.value() {
            Some(Priority::Low) => &self.ascending,
            Some(Priority::High) => &self.descending,
            _ => &self.all_tasks,
        }
    }

    /// Current pending action.
    #[must_use]
    pub const fn pending_action(&self) -> PendingAction {
        self.action
    }

    /// Pending-edit buffer snapshot.
    #[must_use]
    pub const fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Current search bar mode.
    #[must_use]
    pub const fn search_mode(&self) -> SearchBarState {
        self.search_mode
    }

    /// Current search bar text.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Envelope around the full task list in natural order.
    #[must_use]
    pub const fn all_tasks(&self) -> &QueryState<Vec<Task>> {
        &self.all_tasks
    }

    /// Envelope around the ascending-priority list.
    #[must_use]
    pub const fn ascending_tasks(&self) -> &QueryState<Vec<Task>> {
        &self.ascending
    }

    /// Envelope around the descending-priority list.
    #[must_use]
    pub const fn descending_tasks(&self) -> &QueryState<Vec<Task>> {
        &self.descending
    }

    /// Envelope around the live search results.
    #[must_use]
    pub const fn searched_tasks(&self) -> &QueryState<Vec<Task>> {
        &self.searched
    }

    /// Envelope around the loaded sort preference.
    #[must_use]
    pub const fn sort_state(&self) -> &QueryState<Priority> {
        &self.sort_state
    }

    /// Currently selected task, if any.
    #[must_use]
    pub const fn selected_task(&self) -> Option<&Task> {
        self.selected.as_ref()
    }
}

impl<R, P> Drop for TaskListCoordinator<R, P>
where
    R: TaskRepository + 'static,
    P: PreferenceStore + 'static,
{
    fn drop(&mut self) {
        for handle in self.subscriptions.drain(..) {
            handle.abort();
        }
        if let Some(handle) = self.search_task.take() {
            handle.abort();
        }
        if let Some(handle) = self.selection_task.take() {
            handle.abort();
        }
    }
}
