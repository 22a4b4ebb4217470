use crate::catalog::{
    visible_courses, CategoryOption, Course, CourseCollection, CourseId, LikeChange, LikedSet,
    ALL_CATEGORY,
};
use crate::config::CatalogConfig;
use crate::fetch::{spawn_fetch, CourseSource, FetchHandle, FetchOutcome};
use crate::notify::{Notifier, ToastQueue, LIKED_MESSAGE, UNLIKED_MESSAGE};
use std::sync::Arc;
use std::time::Instant;

/// Which control row receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    Cards,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Filter => Self::Cards,
            Self::Cards => Self::Filter,
        }
    }
}

/// Where the one-shot fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Mounting,
    Loading,
    Loaded,
    Errored,
}

/// State owned by the card grid: liked courses and the keyboard cursor.
#[derive(Debug, Clone)]
pub struct CardsState {
    pub liked: LikedSet,
    pub selected: usize,
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub focus: Focus,
    pub phase: Phase,

    pub loading: bool,
    pub courses: Option<CourseCollection>,
    pub category: String,

    // Filter bar
    pub categories: Vec<CategoryOption>,
    pub filter_focus: usize,

    // Created when the grid first mounts
    pub cards: Option<CardsState>,

    pub toasts: ToastQueue,
    pub spinner_frame: usize,
    pub status_msg: String,

    // Cards per grid row, follows the terminal width
    pub grid_columns: usize,

    fetch: Option<FetchHandle>,
}

impl App {
    pub fn new(config: &CatalogConfig) -> Self {
        let categories = config.categories.clone();
        let category = categories
            .first()
            .map(|c| c.title.clone())
            .unwrap_or_else(|| ALL_CATEGORY.to_string());

        Self {
            should_quit: false,
            show_help: false,
            focus: Focus::Cards,
            phase: Phase::Mounting,

            loading: true,
            courses: None,
            category,

            categories,
            filter_focus: 0,

            cards: None,

            toasts: ToastQueue::new(config.toast_duration()),
            spinner_frame: 0,
            status_msg: String::new(),

            grid_columns: 1,

            fetch: None,
        }
    }

    /// Issue the catalog fetch. Only the first call does anything.
    pub fn start_loading(&mut self, source: Arc<dyn CourseSource>) {
        if self.phase != Phase::Mounting {
            tracing::debug!("fetch already issued, ignoring");
            return;
        }
        self.loading = true;
        self.phase = Phase::Loading;
        self.status_msg = "Loading courses...".to_string();
        self.fetch = Some(spawn_fetch(source));
    }

    /// Pick up the fetch result if it has arrived.
    pub fn poll_fetch(&mut self) {
        let outcome = match self.fetch.as_mut() {
            Some(handle) => handle.try_take(),
            None => return,
        };
        if let Some(outcome) = outcome {
            self.fetch = None;
            self.finish_loading(outcome);
        }
    }

    /// Wait for the in-flight fetch and apply it.
    #[cfg(test)]
    pub async fn settle_fetch(&mut self) {
        if let Some(mut handle) = self.fetch.take() {
            let outcome = handle.settled().await;
            self.finish_loading(outcome);
        }
    }

    /// Apply a settled fetch. Loading ends on success and failure alike.
    pub fn finish_loading(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(collection) => {
                self.status_msg = if collection.is_empty() {
                    "No courses available".to_string()
                } else {
                    format!("{} courses loaded", collection.len())
                };
                self.courses = Some(collection);
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "showing empty catalog");
                self.toasts.error(e.user_message());
                self.status_msg = "No courses available".to_string();
                self.phase = Phase::Errored;
            }
        }
        self.loading = false;
        if self.cards.is_none() {
            self.cards = Some(CardsState {
                liked: LikedSet::new(),
                selected: 0,
            });
        }
    }

    /// Courses the grid shows for the current category.
    pub fn visible_courses(&self) -> Vec<&Course> {
        visible_courses(self.courses.as_ref(), &self.category)
    }

    pub fn set_category(&mut self, title: &str) {
        if self.category == title {
            return;
        }
        tracing::debug!(from = %self.category, to = %title, "category changed");
        self.category = title.to_string();
        if let Some(pos) = self.categories.iter().position(|c| c.title == title) {
            self.filter_focus = pos;
        }

        let visible = self.visible_courses().len();
        if let Some(cards) = self.cards.as_mut() {
            cards.selected = cards.selected.min(visible.saturating_sub(1));
        }
        if !self.loading {
            self.status_msg = format!("{} courses in \"{}\"", visible, self.category);
        }
    }

    /// Activate the filter control at `index`. Out-of-range indices are ignored.
    pub fn select_category_index(&mut self, index: usize) -> bool {
        match self.categories.get(index) {
            Some(option) => {
                let title = option.title.clone();
                self.filter_focus = index;
                self.set_category(&title);
                true
            }
            None => false,
        }
    }

    pub fn activate_filter_focus(&mut self) {
        self.select_category_index(self.filter_focus);
    }

    pub fn filter_next(&mut self) {
        if self.filter_focus + 1 < self.categories.len() {
            self.filter_focus += 1;
        }
    }

    pub fn filter_prev(&mut self) {
        self.filter_focus = self.filter_focus.saturating_sub(1);
    }

    pub fn card_next(&mut self) {
        let visible = self.visible_courses().len();
        if let Some(cards) = self.cards.as_mut() {
            if cards.selected + 1 < visible {
                cards.selected += 1;
            }
        }
    }

    pub fn card_prev(&mut self) {
        if let Some(cards) = self.cards.as_mut() {
            cards.selected = cards.selected.saturating_sub(1);
        }
    }

    /// Move one grid row down, landing on the last card if the row is short.
    pub fn card_down(&mut self) {
        let visible = self.visible_courses().len();
        let step = self.grid_columns.max(1);
        if let Some(cards) = self.cards.as_mut() {
            let row_start = (cards.selected / step + 1) * step;
            if row_start < visible {
                cards.selected = (cards.selected + step).min(visible - 1);
            }
        }
    }

    pub fn card_up(&mut self) {
        let step = self.grid_columns.max(1);
        if let Some(cards) = self.cards.as_mut() {
            if cards.selected >= step {
                cards.selected -= step;
            }
        }
    }

    pub fn update_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    pub fn selected_card(&self) -> usize {
        self.cards.as_ref().map_or(0, |c| c.selected)
    }

    pub fn is_liked(&self, id: &CourseId) -> bool {
        self.cards.as_ref().is_some_and(|c| c.liked.contains(id))
    }

    /// Toggle the like on the card under the cursor.
    pub fn toggle_selected_like(&mut self) {
        let id = self
            .visible_courses()
            .get(self.selected_card())
            .map(|c| c.id.clone());
        if let Some(id) = id {
            self.toggle_like(&id);
        }
    }

    /// Flip `id` in the liked set and announce the change.
    pub fn toggle_like(&mut self, id: &CourseId) {
        let Some(cards) = self.cards.as_mut() else {
            return;
        };
        match cards.liked.toggle(id) {
            LikeChange::Removed => self.toasts.warning(UNLIKED_MESSAGE),
            LikeChange::Added => self.toasts.success(LIKED_MESSAGE),
        }
    }

    /// Advance animations and drop stale toasts.
    pub fn tick(&mut self, now: Instant) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        let before = self.toasts.len();
        self.toasts.expire(now);
        if self.toasts.len() < before {
            tracing::debug!(expired = before - self.toasts.len(), "toasts expired");
        }
    }
}
