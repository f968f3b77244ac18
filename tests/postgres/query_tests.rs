//! Filtered listing and count tests for the `PostgreSQL` task repository.

use crate::postgres::helpers::{
    FrozenClock, PgContext, base_instant, list_for, pg_context, task_at, user,
};
use chrono::Duration;
use rstest::rstest;
use taskdeck::domain::{Task, TaskPriority, TaskStatus};
use taskdeck::ports::{TaskFilter, TaskListRepository, TaskRepository, UserRepository};

#[rstest]
fn find_by_list_filters_and_orders_by_creation(pg_context: Option<PgContext>) {
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

    let mut urgent_done = task_at(list.id(), "Urgent done", base_instant());
    urgent_done.change_priority(TaskPriority::Urgent, &FrozenClock::new(base_instant()));
    urgent_done.change_status(TaskStatus::Completed, &FrozenClock::new(base_instant()));
    let mut urgent_open = task_at(
        list.id(),
        "Urgent open",
        base_instant() + Duration::seconds(1),
    );
    urgent_open.change_priority(
        TaskPriority::Urgent,
        &FrozenClock::new(base_instant() + Duration::seconds(1)),
    );
    let low_open = task_at(list.id(), "Low open", base_instant() + Duration::seconds(2));
    context
        .rt
        .block_on(context.repos.tasks.create(&urgent_done))
        .expect("create task");
    context
        .rt
        .block_on(context.repos.tasks.create(&urgent_open))
        .expect("create task");
    context
        .rt
        .block_on(context.repos.tasks.create(&low_open))
        .expect("create task");

    let all = context
        .rt
        .block_on(
            context
                .repos
                .tasks
                .find_by_list(list.id(), &TaskFilter::default()),
        )
        .expect("lookup should succeed");
    let titles: Vec<&str> = all.iter().map(Task::title).collect();
    assert_eq!(titles, ["Urgent done", "Urgent open", "Low open"]);

    let completed = context
        .rt
        .block_on(context.repos.tasks.find_by_list(
            list.id(),
            &TaskFilter {
                status: Some(TaskStatus::Completed),
                priority: None,
            },
        ))
        .expect("lookup should succeed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed.first().map(Task::id), Some(urgent_done.id()));

    let urgent_pending = context
        .rt
        .block_on(context.repos.tasks.find_by_list(
            list.id(),
            &TaskFilter {
                status: Some(TaskStatus::Pending),
                priority: Some(TaskPriority::Urgent),
            },
        ))
        .expect("lookup should succeed");
    assert_eq!(urgent_pending.len(), 1);
    assert_eq!(urgent_pending.first().map(Task::id), Some(urgent_open.id()));

    context.cleanup();
}

#[rstest]
fn find_by_assignee_spans_lists(pg_context: Option<PgContext>) {
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

    let first = list_for(ada.id(), "First");
    let second = list_for(bob.id(), "Second");
    context
        .rt
        .block_on(context.repos.lists.create(&first))
        .expect("create list");
    context
        .rt
        .block_on(context.repos.lists.create(&second))
        .expect("create list");

    let mut in_first = task_at(first.id(), "One", base_instant());
    in_first.assign_to(bob.id(), &FrozenClock::new(base_instant()));
    let mut in_second = task_at(second.id(), "Two", base_instant() + Duration::seconds(1));
    in_second.assign_to(bob.id(), &FrozenClock::new(base_instant()));
    let unassigned = task_at(first.id(), "Three", base_instant() + Duration::seconds(2));
    context
        .rt
        .block_on(context.repos.tasks.create(&in_first))
        .expect("create task");
    context
        .rt
        .block_on(context.repos.tasks.create(&in_second))
        .expect("create task");
    context
        .rt
        .block_on(context.repos.tasks.create(&unassigned))
        .expect("create task");

    let assigned = context
        .rt
        .block_on(context.repos.tasks.find_by_assignee(bob.id()))
        .expect("lookup should succeed");

    assert_eq!(assigned.len(), 2);
    assert!(
        assigned
            .iter()
            .all(|task| task.assigned_to() == Some(bob.id()))
    );

    context.cleanup();
}

#[rstest]
fn count_by_list_and_status_counts_matching_tasks(pg_context: Option<PgContext>) {
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

    let mut done = task_at(list.id(), "Done", base_instant());
    done.change_status(TaskStatus::Completed, &FrozenClock::new(base_instant()));
    context
        .rt
        .block_on(context.repos.tasks.create(&done))
        .expect("create task");
    let open = task_at(list.id(), "Open", base_instant() + Duration::seconds(1));
    context
        .rt
        .block_on(context.repos.tasks.create(&open))
        .expect("create task");

    let completed = context
        .rt
        .block_on(
            context
                .repos
                .tasks
                .count_by_list_and_status(list.id(), TaskStatus::Completed),
        )
        .expect("count should succeed");
    let pending = context
        .rt
        .block_on(
            context
                .repos
                .tasks
                .count_by_list_and_status(list.id(), TaskStatus::Pending),
        )
        .expect("count should succeed");

    assert_eq!(completed, 1);
    assert_eq!(pending, 1);

    context.cleanup();
}
