//! Task endpoints

use super::{expect_success, Client};
use crate::error::{Error, Result};
use crate::http::{read_error_body, read_json, ResponseOutcome};
use crate::types::{RebootedTask, Task, TaskId};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Priority used by `reschedule_task` when none is given
pub const DEFAULT_RESCHEDULE_PRIORITY: u32 = 1;

#[derive(Deserialize)]
struct TaskPage {
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

/// `tasks/sample` has answered both wrapped and as a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum SampleTasks {
    Wrapped { tasks: Option<Vec<Task>> },
    Bare(Vec<Task>),
}

#[derive(Deserialize)]
struct TaskView {
    task: Task,
}

#[derive(Deserialize)]
struct StatusReply {
    #[serde(default)]
    status: String,
}

#[derive(Deserialize)]
struct SuccessReply {
    #[serde(default)]
    success: bool,
}

impl Client {
    /// Fetch one page of tasks.
    ///
    /// A missing or `null` task list decodes as an empty page.
    pub async fn list_tasks(&self, limit: u32, offset: u32) -> Result<Vec<Task>> {
        let path = format!("tasks/list/{limit}/{offset}");
        let response = self.http.execute(Method::GET, &path).await.into_success()?;
        let page: TaskPage = read_json(response).await?;
        let tasks = page.tasks.unwrap_or_default();
        debug!(limit, offset, count = tasks.len(), "listed task page");
        Ok(tasks)
    }

    /// All tasks created for a sample
    pub async fn list_tasks_for_sample(&self, sample_id: i64) -> Result<Vec<Task>> {
        let path = format!("tasks/sample/{sample_id}");
        let response = self.http.execute(Method::GET, &path).await.into_success()?;
        match read_json(response).await? {
            SampleTasks::Wrapped { tasks } => Ok(tasks.unwrap_or_default()),
            SampleTasks::Bare(tasks) => Ok(tasks),
        }
    }

    /// Details of a single task
    pub async fn view_task(&self, task_id: TaskId) -> Result<Task> {
        let outcome = self
            .http
            .execute(Method::GET, &format!("tasks/view/{task_id}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::not_found("task"))
        })?;
        let view: TaskView = read_json(response).await?;
        Ok(view.task)
    }

    /// Queue a task for another analysis run.
    ///
    /// `priority` defaults to [`DEFAULT_RESCHEDULE_PRIORITY`].
    pub async fn reschedule_task(&self, task_id: TaskId, priority: Option<u32>) -> Result<()> {
        let priority = priority.unwrap_or(DEFAULT_RESCHEDULE_PRIORITY);
        let outcome = self
            .http
            .execute(Method::GET, &format!("tasks/reschedule/{task_id}/{priority}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::not_found("task"))
        })?;

        let reply: StatusReply = read_json(response).await?;
        if reply.status != "OK" {
            return Err(Error::api(format!("bad returned status: {}", reply.status)));
        }
        Ok(())
    }

    /// Remove a task and its results from the server
    pub async fn delete_task(&self, task_id: TaskId) -> Result<()> {
        let outcome = self
            .http
            .execute(Method::GET, &format!("tasks/delete/{task_id}"))
            .await;

        match outcome {
            ResponseOutcome::Success(_) => Ok(()),
            ResponseOutcome::Status(response) if response.status() == StatusCode::NOT_FOUND => {
                Err(Error::not_found("task"))
            }
            ResponseOutcome::Status(response)
                if response.status() == StatusCode::INTERNAL_SERVER_ERROR =>
            {
                let body = read_error_body(response).await;
                Err(Error::api(format!("unable to delete the task, body: {body}")))
            }
            other => other.into_success().map(|_| ()),
        }
    }

    /// Regenerate the report of a finished task
    pub async fn rereport_task(&self, task_id: TaskId) -> Result<()> {
        let outcome = self
            .http
            .execute(Method::GET, &format!("tasks/rereport/{task_id}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::not_found("task"))
        })?;

        let reply: SuccessReply = read_json(response).await?;
        if !reply.success {
            return Err(Error::api("cuckoo returned non success"));
        }
        Ok(())
    }

    /// Create a reboot task from an existing analysis
    pub async fn reboot_task(&self, task_id: TaskId) -> Result<RebootedTask> {
        let outcome = self
            .http
            .execute(Method::GET, &format!("tasks/reboot/{task_id}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::api("error creating reboot task"))
        })?;
        read_json(response).await
    }
}
