use chrono::NaiveDate;
use tracing::debug;

use crate::models::ExpenseRecord;
use crate::table::{filter, DateRange, SortDirection, SortField, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadState {
    Loading,
    Ready,
}

/// What the main area shows, derived from `(load completed, held length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewState {
    Loading,
    Empty,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    StartDate,
    EndDate,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::StartDate => write!(f, "FROM"),
            Self::EndDate => write!(f, "TO"),
        }
    }
}

/// All state of the expense view, owned by the running view.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Loaded data
    pub(crate) load_state: LoadState,
    pub(crate) reload_requested: bool,
    pub(crate) expenses: Vec<ExpenseRecord>,

    // Sorting and filtering
    pub(crate) sort: SortState,
    pub(crate) range: DateRange,
    pub(crate) header_index: usize,

    // Cursor into the filtered view
    pub(crate) row_index: usize,
    pub(crate) row_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,

            load_state: LoadState::Loading,
            reload_requested: false,
            expenses: Vec::new(),

            sort: SortState::default(),
            range: DateRange::default(),
            header_index: 0,

            row_index: 0,
            row_scroll: 0,

            visible_rows: 20,
        }
    }

    pub(crate) fn view_state(&self) -> ViewState {
        match self.load_state {
            LoadState::Loading => ViewState::Loading,
            LoadState::Ready if self.expenses.is_empty() => ViewState::Empty,
            LoadState::Ready => ViewState::Ready,
        }
    }

    /// Start a fresh load cycle.
    pub(crate) fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
        self.status_message.clear();
    }

    /// Replace the held collection with a load result.
    ///
    /// The new collection arrives in source order, so any previous sort is forgotten.
    /// Date bounds are kept.
    pub(crate) fn finish_load(&mut self, expenses: Vec<ExpenseRecord>) {
        self.expenses = expenses;
        self.load_state = LoadState::Ready;
        self.sort = SortState::default();
        self.row_index = 0;
        self.row_scroll = 0;
        debug!("Holding {} expenses", self.expenses.len());
    }

    /// The filtered view: held records inside the current date range, in held order.
    pub(crate) fn visible_expenses(&self) -> Vec<&ExpenseRecord> {
        filter(&self.expenses, self.range.start, self.range.end)
    }

    /// Sort the held collection by `field`, replacing it. Returns the direction applied.
    pub(crate) fn sort_by(
        &mut self,
        field: SortField,
        requested: Option<SortDirection>,
    ) -> SortDirection {
        let held = std::mem::take(&mut self.expenses);
        let (sorted, direction) = self.sort.sort_by(held, field, requested);
        self.expenses = sorted;
        self.header_index = SortField::all()
            .iter()
            .position(|f| *f == field)
            .unwrap_or(self.header_index);
        debug!("Sorted {} expenses by {field} {direction}", self.expenses.len());
        self.set_status(format!("Sorted by {field} {}", direction.arrow()));
        direction
    }

    pub(crate) fn header_field(&self) -> SortField {
        let fields = SortField::all();
        fields[self.header_index.min(fields.len() - 1)]
    }

    pub(crate) fn set_start_date(&mut self, start: Option<NaiveDate>) {
        self.set_range(DateRange::new(start, self.range.end));
    }

    pub(crate) fn set_end_date(&mut self, end: Option<NaiveDate>) {
        self.set_range(DateRange::new(self.range.start, end));
    }

    pub(crate) fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.row_index = 0;
        self.row_scroll = 0;
        debug!("Date range set to {range}");
        if range.is_inverted() {
            self.set_status("Start date is after end date");
        } else if self.view_state() == ViewState::Ready {
            let shown = self.visible_expenses().len();
            self.set_status(format!("Showing {shown} expenses, {range}"));
        } else {
            self.set_status(format!("Date range: {range}"));
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
