//! Row round-trip and referential-action tests for the `PostgreSQL`
//! repositories.

use crate::postgres::helpers::{
    FrozenClock, PgContext, base_instant, list_for, pg_context, task_at, user, with_contact,
};
use chrono::Duration;
use rstest::rstest;
use taskdeck::domain::{NewTask, Task, TaskListId, TaskPriority, TaskStatus, User, UserId};
use taskdeck::ports::{StorageError, TaskListRepository, TaskRepository, UserRepository};

#[rstest]
fn user_rows_round_trip_through_the_schema(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create should succeed");

    let fetched = context
        .rt
        .block_on(context.repos.users.find_by_id(ada.id()))
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(fetched, ada);

    let by_email = context
        .rt
        .block_on(context.repos.users.find_by_email("ada@example.com"))
        .expect("lookup should succeed");
    assert_eq!(by_email.as_ref().map(User::id), Some(ada.id()));

    let by_username = context
        .rt
        .block_on(context.repos.users.find_by_username("ada"))
        .expect("lookup should succeed");
    assert_eq!(by_username.as_ref().map(User::id), Some(ada.id()));

    let missing = context
        .rt
        .block_on(context.repos.users.find_by_id(UserId::new()))
        .expect("lookup should succeed");
    assert_eq!(missing, None);

    context.cleanup();
}

#[rstest]
fn user_update_rewrites_the_row(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create should succeed");

    let moved = with_contact(&ada, "ada@kings.example.com", "adaking");
    context
        .rt
        .block_on(context.repos.users.update(&moved))
        .expect("update should succeed");

    let fetched = context
        .rt
        .block_on(context.repos.users.find_by_id(ada.id()))
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(fetched, moved);

    let ghost = user("ghost@example.com", "ghost");
    let result = context.rt.block_on(context.repos.users.update(&ghost));
    assert!(matches!(
        result,
        Err(StorageError::NotFound { entity: "user", .. })
    ));

    context.cleanup();
}

#[rstest]
fn task_rows_round_trip_through_the_schema(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    let bob = user("bob@example.com", "bob");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create ada");
    context
        .rt
        .block_on(context.repos.users.create(&bob))
        .expect("create bob");
    let list = list_for(ada.id(), "Errands");
    context
        .rt
        .block_on(context.repos.lists.create(&list))
        .expect("create list");

    let task = Task::new(
        NewTask {
            list_id: list.id(),
            title: "Fix the gate".to_owned(),
            description: Some("The hinge is rusted through".to_owned()),
            priority: TaskPriority::Urgent,
            assigned_to: Some(bob.id()),
            due_date: Some(base_instant() + Duration::days(1)),
        },
        &FrozenClock::new(base_instant()),
    )
    .expect("valid task");
    context
        .rt
        .block_on(context.repos.tasks.create(&task))
        .expect("create should succeed");

    let fetched = context
        .rt
        .block_on(context.repos.tasks.find_by_id(task.id()))
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched, task);

    let mut completed = fetched;
    completed.change_status(
        TaskStatus::Completed,
        &FrozenClock::new(base_instant() + Duration::seconds(5)),
    );
    context
        .rt
        .block_on(context.repos.tasks.update(&completed))
        .expect("update should succeed");

    let refetched = context
        .rt
        .block_on(context.repos.tasks.find_by_id(task.id()))
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(refetched, completed);
    assert_eq!(refetched.status(), TaskStatus::Completed);
    assert_eq!(
        refetched.completed_at(),
        Some(base_instant() + Duration::seconds(5))
    );

    context.cleanup();
}

#[rstest]
fn task_update_reports_missing_task(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let orphan = task_at(TaskListId::new(), "Nowhere", base_instant());
    let result = context.rt.block_on(context.repos.tasks.update(&orphan));
    assert!(matches!(
        result,
        Err(StorageError::NotFound { entity: "task", .. })
    ));

    context.cleanup();
}

#[rstest]
fn user_delete_cascades_lists_and_clears_assignments(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    let bob = user("bob@example.com", "bob");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create ada");
    context
        .rt
        .block_on(context.repos.users.create(&bob))
        .expect("create bob");

    let ada_list = list_for(ada.id(), "Ada's list");
    let bob_list = list_for(bob.id(), "Bob's list");
    context
        .rt
        .block_on(context.repos.lists.create(&ada_list))
        .expect("create list");
    context
        .rt
        .block_on(context.repos.lists.create(&bob_list))
        .expect("create list");

    let ada_task = task_at(ada_list.id(), "Only Ada's", base_instant());
    let mut bob_task = task_at(bob_list.id(), "Assigned to Ada", base_instant());
    bob_task.assign_to(ada.id(), &FrozenClock::new(base_instant()));
    context
        .rt
        .block_on(context.repos.tasks.create(&ada_task))
        .expect("create task");
    context
        .rt
        .block_on(context.repos.tasks.create(&bob_task))
        .expect("create task");

    let deleted = context
        .rt
        .block_on(context.repos.users.delete(ada.id()))
        .expect("delete should succeed");
    assert!(deleted);

    let gone_list = context
        .rt
        .block_on(context.repos.lists.find_by_id(ada_list.id()))
        .expect("lookup should succeed");
    assert_eq!(gone_list, None);
    let gone_task = context
        .rt
        .block_on(context.repos.tasks.find_by_id(ada_task.id()))
        .expect("lookup should succeed");
    assert_eq!(gone_task, None);

    let surviving = context
        .rt
        .block_on(context.repos.tasks.find_by_id(bob_task.id()))
        .expect("lookup should succeed")
        .expect("task should survive");
    assert_eq!(surviving.assigned_to(), None);

    context.cleanup();
}

#[rstest]
fn list_delete_removes_contained_tasks(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create ada");
    let list = list_for(ada.id(), "Errands");
    context
        .rt
        .block_on(context.repos.lists.create(&list))
        .expect("create list");
    let task = task_at(list.id(), "Buy milk", base_instant());
    context
        .rt
        .block_on(context.repos.tasks.create(&task))
        .expect("create task");

    let deleted = context
        .rt
        .block_on(context.repos.lists.delete(list.id()))
        .expect("delete should succeed");
    assert!(deleted);

    let gone = context
        .rt
        .block_on(context.repos.tasks.find_by_id(task.id()))
        .expect("lookup should succeed");
    assert_eq!(gone, None);

    let again = context
        .rt
        .block_on(context.repos.lists.delete(list.id()))
        .expect("second delete should succeed");
    assert!(!again);

    context.cleanup();
}
