use crate::feed::FeedError;
use crate::fetch::{DataSource, Dataset};
use crate::roster::{unique_categories, unique_genders, Division};
use crate::scoring::ScoringConfig;
use crate::standings::{compute_results, ClimberResult, Filters};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub dataset: Option<Dataset>,
    pub results: Vec<ClimberResult>,
    pub filters: Filters,
    pub scoring: ScoringConfig,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub needs_refresh: bool,
    pub should_quit: bool,
    pub is_loading: bool,
    pub spinner_frame: usize,
    /// User chose mock data with `m`; live fetches are paused
    pub use_mock: bool,
    pub mock_toggle: bool,
    pub auto_refresh_interval: u64,
    pub colors: ThemeColors,
}

impl App {
    /// Create an App with no data in loading state.
    /// Used for launching the TUI before the first fetch completes.
    pub fn new_loading(
        scoring: ScoringConfig,
        filters: Filters,
        mock_toggle: bool,
        auto_refresh_interval: u64,
        colors: ThemeColors,
    ) -> Self {
        Self {
            dataset: None,
            results: Vec::new(),
            filters,
            scoring,
            table_state: ratatui::widgets::TableState::default(),
            input_mode: InputMode::Normal,
            flash_message: None,
            last_refresh: Instant::now(),
            needs_refresh: false,
            should_quit: false,
            is_loading: true,
            spinner_frame: 0,
            use_mock: false,
            mock_toggle,
            auto_refresh_interval,
            colors,
        }
    }

    pub fn divisions(&self) -> &[Division] {
        self.dataset
            .as_ref()
            .map(|d| d.divisions.as_slice())
            .unwrap_or(&[])
    }

    pub fn notice(&self) -> Option<&str> {
        self.dataset.as_ref().and_then(|d| d.notice.as_deref())
    }

    pub fn source(&self) -> Option<DataSource> {
        self.dataset.as_ref().map(|d| d.source)
    }

    pub fn next_row(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= self.results.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) => self.results.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Re-run scoring and filtering against the current dataset
    pub fn recompute(&mut self) {
        self.results = match &self.dataset {
            Some(dataset) => compute_results(&dataset.climbers, &self.filters, &self.scoring),
            None => Vec::new(),
        };

        // Preserve selection if possible
        if self.results.is_empty() {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= self.results.len() {
                self.table_state.select(Some(self.results.len() - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }
    }

    /// Install a freshly built dataset, replacing the previous one whole
    pub fn update_dataset(&mut self, dataset: Dataset) {
        let source = dataset.source;
        let climbers = dataset.climbers.len();
        self.dataset = Some(dataset);
        self.recompute();
        self.last_refresh = Instant::now();

        let msg = match (source, self.notice()) {
            (DataSource::Live, _) => format!("Refreshed ({} climbers)", climbers),
            (DataSource::Mock, Some(_)) => "Refresh failed, showing mock data".to_string(),
            (DataSource::Mock, None) => format!("Mock data loaded ({} climbers)", climbers),
        };
        self.show_flash(msg);
    }

    /// Start on mock data as if the user had pressed `m`.
    ///
    /// The toggle is enabled so `m` can always switch back to live data.
    pub fn start_with_mock(&mut self) {
        self.mock_toggle = true;
        self.use_mock = true;
        self.needs_refresh = false;
        self.update_dataset(crate::fetch::mock_dataset());
        self.is_loading = false;
    }

    /// Install the outcome of a background fetch.
    ///
    /// A failed fetch installs the fallback mock dataset with its notice, so
    /// the leaderboard is never left empty or labelled live when it is stale.
    /// Outcomes that land after the user switched to mock data are dropped.
    pub fn finish_fetch(&mut self, outcome: Result<Dataset, FeedError>) {
        self.is_loading = false;
        if self.use_mock {
            return;
        }
        match outcome {
            Ok(dataset) => self.update_dataset(dataset),
            Err(e) => self.update_dataset(crate::fetch::fallback_dataset(&e)),
        }
    }

    /// Cycle the gender filter: all -> each gender in turn -> all
    pub fn cycle_gender(&mut self) {
        let options = unique_genders(self.divisions());
        self.filters.gender = next_option(self.filters.gender.as_deref(), &options);
        self.table_state.select(None);
        self.recompute();
        self.show_flash(format!("Showing {}", self.filters.heading()));
    }

    /// Cycle the category filter: all -> each category in turn -> all
    pub fn cycle_category(&mut self) {
        let options = unique_categories(self.divisions());
        self.filters.category = next_option(self.filters.category.as_deref(), &options);
        self.table_state.select(None);
        self.recompute();
        self.show_flash(format!("Showing {}", self.filters.heading()));
    }

    pub fn clear_filters(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        self.filters = Filters::none();
        self.table_state.select(None);
        self.recompute();
        self.show_flash("Filters cleared".to_string());
    }

    /// Handle a manual refresh request. Returns whether a fetch was queued.
    pub fn request_refresh(&mut self) -> bool {
        if self.is_loading {
            self.show_flash("Refresh already in progress".to_string());
            return false;
        }
        if self.use_mock {
            self.show_flash("Showing mock data; press m for live data".to_string());
            return false;
        }
        self.needs_refresh = true;
        self.show_flash("Refreshing...".to_string());
        true
    }

    /// Switch between mock and live data when the toggle is enabled.
    ///
    /// Turning mock on installs a new mock dataset immediately. Turning it off
    /// queues a live fetch.
    pub fn toggle_mock(&mut self) {
        if !self.mock_toggle {
            self.show_flash("Mock data toggle is disabled (set mock_toggle in config)".to_string());
            return;
        }

        self.use_mock = !self.use_mock;
        if self.use_mock {
            self.needs_refresh = false;
            self.update_dataset(crate::fetch::mock_dataset());
        } else {
            self.needs_refresh = true;
            self.show_flash("Switching to live data...".to_string());
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Advance the loading spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

fn next_option(current: Option<&str>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}
