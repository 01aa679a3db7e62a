//! Shared fixture: users, tasks, projects and comments wired together
#![allow(dead_code)]

use std::sync::Arc;

use elif_relations::{
    BelongsTo, Collection, HasMany, ModelRegistry, ModelRelations, Record, RecordId, Related,
};
use serde_json::json;

pub struct World {
    pub registry: ModelRegistry,
    pub users: Arc<Collection>,
    pub tasks: Arc<Collection>,
    pub projects: Arc<Collection>,
    pub comments: Arc<Collection>,
}

impl World {
    /// users 0..3 with `project_id = id % 3`, tasks 0..6 with `user_id = id % 2`
    /// (task 0 has none), projects 0..2 owned by user 0, comments 0..12 with
    /// `task_id = id % 3`
    pub fn new() -> Self {
        init_tracing();

        let registry = ModelRegistry::new();
        let users = Collection::new(&registry.model("User"));
        let tasks = Collection::new(&registry.model("Task"));
        let projects = Collection::new(&registry.model("Project"));
        let comments = Collection::new(&registry.model("Comment"));

        registry
            .model("Task")
            .declare(
                ModelRelations::new()
                    .belongs_to("user", BelongsTo::direct(&users))
                    .belongs_to(
                        "project",
                        BelongsTo::computed(|task: &Arc<Record>| {
                            let user = task.rel("user")?.require_one("user")?;
                            Ok(user.rel("project")?.into_one())
                        }),
                    )
                    .has_many("comments", HasMany::foreign_key(&comments, "task_id")),
            )
            .expect("Task relations");

        registry
            .model("User")
            .declare(
                ModelRelations::new()
                    .belongs_to("project", BelongsTo::direct(&projects))
                    .has_many("tasks", HasMany::foreign_key(&tasks, "user_id"))
                    .has_many("owned_projects", HasMany::foreign_key(&projects, "owner_id")),
            )
            .expect("User relations");

        registry
            .model("Project")
            .declare(
                ModelRelations::new()
                    .belongs_to("owner", BelongsTo::direct(&users))
                    .has_many(
                        "tasks",
                        HasMany::filter(&tasks, |task, project| {
                            // a task without a user has no project to compare
                            if task.rel("user")?.is_none() {
                                return Ok(false);
                            }
                            Ok(task.rel("project")?.is(project))
                        }),
                    )
                    .has_many("users", HasMany::foreign_key(&users, "project_id")),
            )
            .expect("Project relations");

        registry
            .model("Comment")
            .declare(ModelRelations::new().belongs_to("task", BelongsTo::direct(&tasks)))
            .expect("Comment relations");

        users
            .add_all((0..3).map(|i| json!({"id": i, "project_id": i % 3})))
            .unwrap();
        tasks.add(json!({"id": 0})).unwrap();
        tasks
            .add_all((1..6).map(|i| json!({"id": i, "user_id": i % 2})))
            .unwrap();
        projects
            .add_all((0..2).map(|i| json!({"id": i, "owner_id": 0})))
            .unwrap();
        comments
            .add_all((0..12).map(|i| json!({"id": i, "task_id": i % 3})))
            .unwrap();

        Self {
            registry,
            users,
            tasks,
            projects,
            comments,
        }
    }

    pub fn user(&self, id: i64) -> Arc<Record> {
        self.users.get(&RecordId::from(id)).expect("user")
    }

    pub fn task(&self, id: i64) -> Arc<Record> {
        self.tasks.get(&RecordId::from(id)).expect("task")
    }

    pub fn project(&self, id: i64) -> Arc<Record> {
        self.projects.get(&RecordId::from(id)).expect("project")
    }

    pub fn comment(&self, id: i64) -> Arc<Record> {
        self.comments.get(&RecordId::from(id)).expect("comment")
    }
}

/// Integer ids of a resolution result, in order
pub fn ids(related: &Related) -> Vec<i64> {
    related.ids().iter().filter_map(RecordId::as_i64).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
