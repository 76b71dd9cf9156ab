//! Filtering logic

use super::App;
use crate::types::*;
use tracing::debug;

/// Indices of the todos visible under `filter`, in list order.
pub fn filter_todos(todos: &[Todo], filter: TodoFilter) -> Vec<usize> {
    todos
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, _)| i)
        .collect()
}

impl App {
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter_todos(&self.todos, self.filter);
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        if self.filter == filter {
            return;
        }
        debug!(filter = filter.label(), "Filter changed");
        self.filter = filter;
        self.apply_filters();
        self.save_settings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;

    fn sample() -> Vec<Todo> {
        vec![
            todo(1, "write", false),
            todo(2, "read", true),
            todo(3, "sleep", false),
            todo(4, "eat", true),
        ]
    }

    #[test]
    fn all_keeps_everything_in_order() {
        assert_eq!(filter_todos(&sample(), TodoFilter::All), vec![0, 1, 2, 3]);
    }

    #[test]
    fn active_and_completed_partition_the_list() {
        let todos = sample();
        let active = filter_todos(&todos, TodoFilter::Active);
        let completed = filter_todos(&todos, TodoFilter::Completed);

        assert_eq!(active, vec![0, 2]);
        assert_eq!(completed, vec![1, 3]);
        assert_eq!(active.len() + completed.len(), todos.len());
    }

    #[test]
    fn empty_list_yields_nothing() {
        for filter in TodoFilter::ALL {
            assert!(filter_todos(&[], filter).is_empty());
        }
    }

    #[test]
    fn visible_todos_follow_filter_changes() {
        let mut app = test_app(sample());
        app.filter = TodoFilter::Completed;
        app.apply_filters();

        let titles: Vec<&str> = app
            .filtered_indices
            .iter()
            .map(|&i| app.todos[i].title.as_str())
            .collect();
        assert_eq!(titles, vec!["read", "eat"]);
    }

    #[test]
    fn set_filter_recomputes_indices() {
        let mut app = test_app(sample());
        let dir = tempfile::tempdir().unwrap();
        app.data_dir = dir.path().to_path_buf();

        app.set_filter(TodoFilter::Active);
        assert_eq!(app.filtered_indices, vec![0, 2]);
        assert_eq!(app.filter, TodoFilter::Active);
    }
}
