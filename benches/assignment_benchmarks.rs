use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use workforce_core::constants::{TaskPriority, TaskStatus};
use workforce_core::models::{Employee, EmployeeWorkload, NewEmployee, NewTask};
use workforce_core::services::{choose_assignee, rank_by_active_tasks, ImportantTaskSelector, RankOrder};
use workforce_core::store::{EmployeeRepository, InMemoryStore, TaskRepository};

fn workload(id: i64, active: i64, total: i64) -> EmployeeWorkload {
    let now = Utc::now().naive_utc();
    EmployeeWorkload {
        employee: Employee {
            id,
            first_name: "Bench".to_string(),
            middle_name: None,
            last_name: "Employee".to_string(),
            position: "Engineer".to_string(),
            experience: 5,
            tasks_completed: 0,
            created_at: now,
            updated_at: now,
        },
        active_tasks_count: active,
        total_tasks_count: total,
    }
}

fn new_task(name: String, parent: Option<i64>, assignee: Option<i64>, status: TaskStatus) -> NewTask {
    NewTask {
        name,
        description: None,
        priority: TaskPriority::Medium,
        deadline: Utc::now().date_naive() + Duration::days(7),
        status,
        completion_time: None,
        parent_task_id: parent,
        assigned_employee_id: assignee,
    }
}

/// 50 employees, 100 blocking tasks, each with one in-progress subtask
async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    let mut employee_ids = Vec::new();
    for index in 0..50 {
        let employee = store
            .create_employee(NewEmployee {
                first_name: "Bench".to_string(),
                middle_name: None,
                last_name: format!("Employee{}", char::from(b'a' + (index % 26) as u8)),
                position: "Engineer".to_string(),
                experience: 5,
                tasks_completed: 0,
            })
            .await
            .unwrap();
        employee_ids.push(employee.id);
    }
    for index in 0..100 {
        let parent = store
            .create_task(new_task(format!("blocking-{index}"), None, None, TaskStatus::ToAssign))
            .await
            .unwrap();
        let assignee = employee_ids[index % employee_ids.len()];
        store
            .create_task(new_task(
                format!("subtask-{index}"),
                Some(parent.id),
                Some(assignee),
                TaskStatus::InProgress,
            ))
            .await
            .unwrap();
    }
    store
}

fn benchmark_choose_assignee(c: &mut Criterion) {
    let least = workload(1, 0, 3);
    let parent = workload(2, 2, 4);
    c.bench_function("choose_assignee", |b| {
        b.iter(|| choose_assignee(black_box(&least), black_box(&parent), black_box(2)))
    });
}

fn benchmark_rank_by_active_tasks(c: &mut Criterion) {
    let workloads: Vec<EmployeeWorkload> = (0..1_000)
        .map(|id| workload(id, (id * 7919) % 13, 20))
        .collect();
    c.bench_function("rank_by_active_tasks_1000", |b| {
        b.iter_batched(
            || workloads.clone(),
            |w| rank_by_active_tasks(w, RankOrder::MostBusyFirst),
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_important_task_selector(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    c.bench_function("important_task_selector_in_memory", |b| {
        b.iter_batched(
            || rt.block_on(seeded_store()),
            |store| rt.block_on(async { ImportantTaskSelector::new(&store).run().await.unwrap() }),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    benchmark_choose_assignee,
    benchmark_rank_by_active_tasks,
    benchmark_important_task_selector
);
criterion_main!(benches);
