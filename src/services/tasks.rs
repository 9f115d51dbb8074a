//! [`TaskService`]: the second illustrative hosted [`Behavior`] (§4.9) — a
//! task-tracker over task lists and tasks keyed by `(list_id,
//! claude_task_id)`.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc}; // §3.2

// Layer 3: Internal module imports
use crate::actor::{ActorContext, Behavior};
use crate::error::Error;
use crate::message::Message;

/// `pending ∨ in_progress` is "active" (§4.9 SPEC addition); `completed` and
/// deletions are terminal at the storage layer (delete removes the row
/// outright rather than tombstoning it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone)]
pub struct TaskListMeta {
    pub list_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: u64,
    pub list_id: String,
    pub claude_task_id: String,
    pub subject: String,
    pub status: TaskStatus,
    pub owner: String,
    pub blocked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub blocked: usize,
    pub available: usize,
    pub active: usize,
    pub completed_today: usize,
}

/// The sealed request sum the task service accepts (§4.9). [`TaskRequest::Unknown`]
/// models a request tag the service doesn't recognize — §4.9 requires one
/// to surface as `Err(UnknownMessage)` even though every other variant here
/// is matched exhaustively at compile time.
#[derive(Debug, Clone)]
pub enum TaskRequest {
    RegisterList { list_id: String, name: String },
    GetList { list_id: String },
    ListLists,
    UnregisterList { list_id: String },
    UpsertTask {
        list_id: String,
        claude_task_id: String,
        subject: String,
        status: TaskStatus,
        owner: String,
        blocked_by: Vec<String>,
    },
    GetTask { list_id: String, claude_task_id: String },
    ListTasks { list_id: String },
    DeleteTask { list_id: String, claude_task_id: String },
    UpdateStatus {
        list_id: String,
        claude_task_id: String,
        status: TaskStatus,
    },
    UpdateOwner {
        list_id: String,
        claude_task_id: String,
        owner: String,
    },
    Sync { list_id: String, claude_task_id: String },
    Prune { list_id: Option<String>, older_than: Duration },
    Stats {
        list_id: Option<String>,
        owner: Option<String>,
    },
    Unknown(String),
}

impl Message for TaskRequest {
    const MESSAGE_TYPE: &'static str = "task_request";
}

#[derive(Debug, Clone)]
pub enum TaskResponse {
    ListRegistered,
    ListInfo(TaskListMeta),
    Lists(Vec<TaskListMeta>),
    ListUnregistered,
    TaskUpserted(TaskRecord),
    TaskInfo(TaskRecord),
    Tasks(Vec<TaskRecord>),
    TaskDeleted,
    StatusUpdated,
    OwnerUpdated,
    Synced,
    Pruned { removed: usize },
    Stats(TaskStats),
}

/// "Available" means `pending ∧ owner="" ∧ blocked_by=∅` (§4.9, verbatim).
fn is_available(task: &TaskRecord) -> bool {
    task.status == TaskStatus::Pending && task.owner.is_empty() && task.blocked_by.is_empty()
}

/// A pending task with a non-empty `blocked_by` is "blocked" — the
/// complement of "available" within the pending set that isn't merely
/// unowned.
fn is_blocked(task: &TaskRecord) -> bool {
    task.status == TaskStatus::Pending && !task.blocked_by.is_empty()
}

fn is_active(task: &TaskRecord) -> bool {
    matches!(task.status, TaskStatus::Pending | TaskStatus::InProgress)
}

pub struct TaskService {
    next_id: u64,
    lists: HashMap<String, TaskListMeta>,
    tasks: HashMap<(String, String), TaskRecord>,
}

impl TaskService {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            lists: HashMap::new(),
            tasks: HashMap::new(),
        }
    }

    fn matching_tasks(&self, list_id: Option<&str>, owner: Option<&str>) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.values().filter(move |t| {
            list_id.map(|l| t.list_id == l).unwrap_or(true) && owner.map(|o| t.owner == o).unwrap_or(true)
        })
    }
}

impl Default for TaskService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for TaskService {
    type Message = TaskRequest;
    type Response = TaskResponse;

    async fn receive(
        &mut self,
        message: Self::Message,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<Self::Response, Error> {
        match message {
            TaskRequest::RegisterList { list_id, name } => {
                self.lists.insert(
                    list_id.clone(),
                    TaskListMeta {
                        list_id,
                        name,
                        created_at: Utc::now(),
                    },
                );
                Ok(TaskResponse::ListRegistered)
            }

            TaskRequest::GetList { list_id } => self
                .lists
                .get(&list_id)
                .cloned()
                .map(TaskResponse::ListInfo)
                .ok_or_else(|| Error::not_found(format!("task list '{list_id}'"))),

            TaskRequest::ListLists => {
                let mut lists: Vec<TaskListMeta> = self.lists.values().cloned().collect();
                lists.sort_by(|a, b| a.list_id.cmp(&b.list_id));
                Ok(TaskResponse::Lists(lists))
            }

            TaskRequest::UnregisterList { list_id } => {
                self.lists.remove(&list_id);
                self.tasks.retain(|(l, _), _| l != &list_id);
                Ok(TaskResponse::ListUnregistered)
            }

            TaskRequest::UpsertTask {
                list_id,
                claude_task_id,
                subject,
                status,
                owner,
                blocked_by,
            } => {
                let key = (list_id.clone(), claude_task_id.clone());
                let now = Utc::now();
                let record = if let Some(existing) = self.tasks.get(&key) {
                    TaskRecord {
                        id: existing.id,
                        list_id,
                        claude_task_id,
                        subject,
                        status,
                        owner,
                        blocked_by,
                        created_at: existing.created_at,
                        updated_at: now,
                        last_synced_at: existing.last_synced_at,
                    }
                } else {
                    let id = self.next_id;
                    self.next_id += 1;
                    TaskRecord {
                        id,
                        list_id,
                        claude_task_id,
                        subject,
                        status,
                        owner,
                        blocked_by,
                        created_at: now,
                        updated_at: now,
                        last_synced_at: None,
                    }
                };
                self.tasks.insert(key, record.clone());
                Ok(TaskResponse::TaskUpserted(record))
            }

            TaskRequest::GetTask { list_id, claude_task_id } => self
                .tasks
                .get(&(list_id, claude_task_id))
                .cloned()
                .map(TaskResponse::TaskInfo)
                .ok_or_else(|| Error::not_found("task")),

            TaskRequest::ListTasks { list_id } => {
                let mut tasks: Vec<TaskRecord> = self
                    .tasks
                    .values()
                    .filter(|t| t.list_id == list_id)
                    .cloned()
                    .collect();
                tasks.sort_by_key(|t| t.id);
                Ok(TaskResponse::Tasks(tasks))
            }

            TaskRequest::DeleteTask { list_id, claude_task_id } => {
                self.tasks.remove(&(list_id, claude_task_id));
                Ok(TaskResponse::TaskDeleted)
            }

            TaskRequest::UpdateStatus {
                list_id,
                claude_task_id,
                status,
            } => {
                let task = self
                    .tasks
                    .get_mut(&(list_id, claude_task_id))
                    .ok_or_else(|| Error::not_found("task"))?;
                task.status = status;
                task.updated_at = Utc::now();
                Ok(TaskResponse::StatusUpdated)
            }

            TaskRequest::UpdateOwner {
                list_id,
                claude_task_id,
                owner,
            } => {
                let task = self
                    .tasks
                    .get_mut(&(list_id, claude_task_id))
                    .ok_or_else(|| Error::not_found("task"))?;
                task.owner = owner;
                task.updated_at = Utc::now();
                Ok(TaskResponse::OwnerUpdated)
            }

            TaskRequest::Sync { list_id, claude_task_id } => {
                let task = self
                    .tasks
                    .get_mut(&(list_id, claude_task_id))
                    .ok_or_else(|| Error::not_found("task"))?;
                task.last_synced_at = Some(Utc::now());
                Ok(TaskResponse::Synced)
            }

            TaskRequest::Prune { list_id, older_than } => {
                let cutoff = Utc::now() - older_than;
                let before = self.tasks.len();
                self.tasks.retain(|(l, _), task| {
                    let in_scope = list_id.as_deref().map(|scope| scope == l).unwrap_or(true);
                    !(in_scope && task.status == TaskStatus::Completed && task.updated_at < cutoff)
                });
                Ok(TaskResponse::Pruned {
                    removed: before - self.tasks.len(),
                })
            }

            TaskRequest::Stats { list_id, owner } => {
                let mut stats = TaskStats::default();
                let today = Utc::now().date_naive();
                for task in self.matching_tasks(list_id.as_deref(), owner.as_deref()) {
                    match task.status {
                        TaskStatus::Pending => stats.pending += 1,
                        TaskStatus::InProgress => stats.in_progress += 1,
                        TaskStatus::Completed => {
                            stats.completed += 1;
                            if task.updated_at.date_naive() == today {
                                stats.completed_today += 1;
                            }
                        }
                    }
                    if is_blocked(task) {
                        stats.blocked += 1;
                    }
                    if is_available(task) {
                        stats.available += 1;
                    }
                    if is_active(task) {
                        stats.active += 1;
                    }
                }
                Ok(TaskResponse::Stats(stats))
            }

            TaskRequest::Unknown(tag) => Err(Error::UnknownMessage(tag)),
        }
    }
}
