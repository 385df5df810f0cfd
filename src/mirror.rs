/// Why a snapshot is being loaded. Only [`LoadMode::Silent`] loads are
/// allowed to skip rendering and to raise "new item" notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// First load when the page opens.
    Initial,
    /// Explicit reload: a filter click, or the forced re-read after a write.
    Manual,
    /// Background poll.
    Silent,
}

impl LoadMode {
    pub fn is_silent(self) -> bool {
        self == LoadMode::Silent
    }
}

/// What the caller should do after feeding a snapshot to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    pub render: bool,
    pub notify: bool,
    /// How many more records the new snapshot has than the old one.
    pub added: usize,
}

/// What the renderer gets to see.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a, T> {
    /// Nothing loaded yet.
    Loading,
    /// The first non-silent load failed and nothing has loaded since.
    Failed(&'a str),
    /// Last good snapshot, possibly empty.
    Ready(&'a [T]),
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

/// Last successfully fetched snapshot of a sheet.
#[derive(Debug, Clone)]
pub struct Mirror<T> {
    records: Vec<T>,
    has_loaded_once: bool,
    first_load_error: Option<String>,
}

impl<T> Default for Mirror<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            has_loaded_once: false,
            first_load_error: None,
        }
    }
}

impl<T: PartialEq> Mirror<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn has_loaded_once(&self) -> bool {
        self.has_loaded_once
    }

    pub fn view(&self) -> View<'_, T> {
        match (&self.first_load_error, self.has_loaded_once) {
            (_, true) => View::Ready(&self.records),
            (Some(message), false) => View::Failed(message),
            (None, false) => View::Loading,
        }
    }

    /// Compare `records` with the current snapshot (in order) and replace it
    /// wholesale if the load calls for it.
    pub fn apply_snapshot(&mut self, records: Vec<T>, mode: LoadMode) -> Applied {
        let unchanged = self.has_loaded_once && self.records == records;
        if unchanged && mode.is_silent() {
            return Applied::default();
        }

        let added = records.len().saturating_sub(self.records.len());
        // A mirror that never loaded has no previous count to grow from.
        let notify = mode.is_silent() && self.has_loaded_once && !unchanged && added > 0;

        self.records = records;
        self.has_loaded_once = true;
        self.first_load_error = None;

        Applied {
            render: true,
            notify,
            added,
        }
    }

    /// Note a failed fetch. Records are kept; only a non-silent load that
    /// fails before anything ever loaded switches the view to an error.
    /// Returns whether the view changed.
    pub fn record_failure(&mut self, mode: LoadMode, message: &str) -> bool {
        if self.has_loaded_once || mode.is_silent() {
            return false;
        }
        self.first_load_error = Some(message.to_string());
        true
    }
}
