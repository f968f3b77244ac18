//! End-to-end list and task workflow tests across all services.

use crate::in_memory::helpers::{Backend, TestListService, backend, register_and_login};
use rstest::rstest;
use taskdeck::{
    domain::{TaskListId, TaskPriority, TaskStatus, UserId},
    ports::{TaskFilter, UserRepository},
    services::{CreateTaskListRequest, CreateTaskRequest, ErrorKind},
};

fn list_request(title: &str) -> CreateTaskListRequest {
    CreateTaskListRequest {
        title: title.to_owned(),
        description: None,
    }
}

fn task_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::default(),
        assigned_to: None,
        due_date: None,
    }
}

/// Asserts the list reports the expected completion share.
///
/// # Errors
///
/// Returns an error if the list cannot be read or the figure differs.
async fn ensure_completion(
    lists: &TestListService,
    list_id: TaskListId,
    owner: UserId,
    expected: f64,
) -> Result<(), eyre::Report> {
    let overview = lists.get(list_id, owner).await?;
    eyre::ensure!(
        overview.completion_percentage == expected,
        "expected completion {expected}, got {}",
        overview.completion_percentage
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_travels_from_creation_to_completion(backend: Backend) {
    let (ada, _) = register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");
    let (bob, _) = register_and_login(&backend.auth, "bob@example.com", "bob")
        .await
        .expect("registration and login should succeed");

    let list = backend
        .lists
        .create(ada.id, list_request("Spring cleaning"))
        .await
        .expect("list creation should succeed");
    assert_eq!(list.completion_percentage, 0.0);

    let task = backend
        .tasks
        .create(list.id, ada.id, task_request("Clear the attic"))
        .await
        .expect("task creation should succeed");
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.assigned_to, None);

    let assigned = backend
        .tasks
        .assign(task.id, ada.id, bob.id)
        .await
        .expect("assignment should succeed");
    assert_eq!(assigned.assigned_to, Some(bob.id));

    backend
        .tasks
        .update_status(task.id, bob.id, TaskStatus::InProgress)
        .await
        .expect("assignee should start the task");
    let completed = backend
        .tasks
        .update_status(task.id, bob.id, TaskStatus::Completed)
        .await
        .expect("assignee should complete the task");
    assert!(completed.completed_at.is_some());

    ensure_completion(&backend.lists, list.id, ada.id, 100.0)
        .await
        .expect("list should report full completion");

    let done = backend
        .tasks
        .list_by_list(
            list.id,
            ada.id,
            TaskFilter {
                status: Some(TaskStatus::Completed),
                priority: None,
            },
        )
        .await
        .expect("listing should succeed");
    let titles: Vec<&str> = done.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["Clear the attic"]);

    let bobs_work = backend
        .tasks
        .list_assigned_to(bob.id)
        .await
        .expect("assignee listing should succeed");
    assert_eq!(bobs_work.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_tracks_partial_progress(backend: Backend) {
    let (ada, _) = register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");
    let list = backend
        .lists
        .create(ada.id, list_request("Reading"))
        .await
        .expect("list creation should succeed");
    let mut task_ids = Vec::new();
    for title in ["Chapter one", "Chapter two", "Chapter three"] {
        let task = backend
            .tasks
            .create(list.id, ada.id, task_request(title))
            .await
            .expect("task creation should succeed");
        task_ids.push(task.id);
    }

    for task_id in task_ids.iter().take(2) {
        backend
            .tasks
            .update_status(*task_id, ada.id, TaskStatus::Completed)
            .await
            .expect("status change should succeed");
    }

    ensure_completion(&backend.lists, list.id, ada.id, 66.67)
        .await
        .expect("list should report partial completion");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_account_cascades_through_its_lists(backend: Backend) {
    let (ada, _) = register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");
    let (bob, _) = register_and_login(&backend.auth, "bob@example.com", "bob")
        .await
        .expect("registration and login should succeed");

    let adas_list = backend
        .lists
        .create(ada.id, list_request("Handover"))
        .await
        .expect("list creation should succeed");
    backend
        .tasks
        .create(adas_list.id, ada.id, task_request("Write the runbook"))
        .await
        .expect("task creation should succeed");

    let bobs_list = backend
        .lists
        .create(bob.id, list_request("Reviews"))
        .await
        .expect("list creation should succeed");
    let mut request = task_request("Review the runbook");
    request.assigned_to = Some(ada.id);
    let bobs_task = backend
        .tasks
        .create(bobs_list.id, bob.id, request)
        .await
        .expect("task creation should succeed");

    let removed = backend
        .users
        .delete(ada.id)
        .await
        .expect("account deletion should succeed");
    assert!(removed);

    let err = backend
        .lists
        .get(adas_list.id, ada.id)
        .await
        .expect_err("the deleted owner's list should be gone");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let survivor = backend
        .tasks
        .get(bobs_task.id, bob.id)
        .await
        .expect("the other owner's task should survive");
    assert_eq!(survivor.assigned_to, None);
}
