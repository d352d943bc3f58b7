use serde::{Deserialize, Serialize};

/// Separator used when several task descriptions become one refinement request.
pub const TASK_REQUEST_SEPARATOR: &str = ". ";

/// One improvement suggestion for a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub is_completed: bool,
}

/// Keep only tasks that still need doing, in their original order.
pub fn outstanding_tasks(tasks: Vec<Task>) -> Vec<Task> {
    tasks.into_iter().filter(|task| !task.is_completed).collect()
}

/// Join the descriptions of the selected tasks into a single request.
///
/// Order follows `tasks`, not `selected_ids`; unknown ids are ignored.
pub fn combine_task_requests(tasks: &[Task], selected_ids: &[String]) -> String {
    tasks
        .iter()
        .filter(|task| selected_ids.iter().any(|id| *id == task.id))
        .map(|task| task.description.as_str())
        .collect::<Vec<_>>()
        .join(TASK_REQUEST_SEPARATOR)
}
