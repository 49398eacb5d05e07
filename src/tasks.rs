use crate::errors::ValidationError;
use crate::models::{Task, TaskSummary};
use chrono::NaiveDate;
use tracing::debug;

pub const DEFAULT_TASK_CATEGORY: &str = "Личное";

#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    selected_date: NaiveDate,
    next_id: u64,
}

impl TaskList {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            selected_date,
            next_id: 0,
        }
    }

    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut list = Self::new(today);
        for (title, category) in [
            ("Утренняя зарядка", "Здоровье"),
            ("Прочитать 20 страниц", "Развитие"),
            ("Записать три благодарности", "Личное"),
        ] {
            list.push(title.to_string(), category.to_string());
        }
        list
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Adds a task on the selected date.
    pub fn add(&mut self, title: &str, category: Option<&str>) -> Result<Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let category = category
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_TASK_CATEGORY);

        let task = self.push(title.to_string(), category.to_string());
        debug!(id = task.id, date = %task.date, "task added");
        Ok(task)
    }

    fn push(&mut self, title: String, category: String) -> Task {
        self.next_id += 1;
        let task = Task {
            id: self.next_id,
            title,
            completed: false,
            date: self.selected_date,
            category,
        };
        self.tasks.push(task.clone());
        task
    }

    /// Flips completion; `None` when no task has this id.
    pub fn toggle(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible(&self) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.date == self.selected_date)
    }

    pub fn completed_count(&self) -> usize {
        self.visible().filter(|task| task.completed).count()
    }

    pub fn summary(&self) -> TaskSummary {
        let tasks: Vec<Task> = self.visible().cloned().collect();
        TaskSummary {
            selected_date: self.selected_date,
            completed: tasks.iter().filter(|task| task.completed).count(),
            total: tasks.len(),
            tasks,
        }
    }
}
