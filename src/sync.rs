use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::i18n::Language;
use crate::mirror::{Applied, LoadMode, Mirror, View};
use crate::view::{Notice, Notifier, Sink, Target};

/// One synchronized list on a page: where its rows come from and how they
/// are drawn.
#[async_trait]
pub trait Feed: Send + Sync {
    type Record: Clone + PartialEq + Send + Sync;

    /// Short name used in logs.
    const NAME: &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Record>>;

    /// Markup for every container this feed owns.
    fn render(&self, view: View<'_, Self::Record>, lang: Language) -> Vec<(Target, String)>;

    /// Text of the notice raised when a background poll finds new rows.
    fn announce(&self, added: usize) -> String;
}

/// Page controller for one feed: owns the mirror and pushes every change
/// through the renderer into the sink.
///
/// Refreshes may overlap. Whichever fetch resolves last overwrites the
/// mirror, even if it was issued first.
pub struct Synchronizer<F: Feed> {
    feed: F,
    mirror: Mutex<Mirror<F::Record>>,
    language: RwLock<Language>,
    sink: std::sync::Arc<dyn Sink>,
    notifier: std::sync::Arc<dyn Notifier>,
}

impl<F: Feed> Synchronizer<F> {
    pub fn new(
        feed: F,
        sink: std::sync::Arc<dyn Sink>,
        notifier: std::sync::Arc<dyn Notifier>,
        language: Language,
    ) -> Self {
        Self {
            feed,
            mirror: Mutex::new(Mirror::new()),
            language: RwLock::new(language),
            sink,
            notifier,
        }
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn language(&self) -> Language {
        *self.language.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Mirror<F::Record>> {
        self.mirror.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the current snapshot.
    pub fn with_records<R>(&self, f: impl FnOnce(&[F::Record]) -> R) -> R {
        f(self.lock().records())
    }

    pub fn snapshot(&self) -> Vec<F::Record> {
        self.lock().records().to_vec()
    }

    pub fn has_loaded_once(&self) -> bool {
        self.lock().has_loaded_once()
    }

    /// Fetch, diff against the mirror, and render/notify as the load mode
    /// calls for. A failed fetch leaves the mirror as it was.
    #[instrument(skip(self), fields(feed = F::NAME))]
    pub async fn refresh(&self, mode: LoadMode) -> Result<Applied> {
        match self.feed.fetch().await {
            Ok(records) => {
                let applied = {
                    let mut mirror = self.lock();
                    let applied = mirror.apply_snapshot(records, mode);
                    if applied.render {
                        self.draw(&mirror);
                    }
                    applied
                };
                if applied.notify {
                    self.notifier
                        .notify(Notice::success(self.feed.announce(applied.added)));
                }
                debug!(?applied, "refresh applied");
                Ok(applied)
            }
            Err(e) => {
                if mode.is_silent() {
                    debug!(error = %e, "background refresh failed");
                } else {
                    warn!(error = %e, "refresh failed");
                }
                let mut mirror = self.lock();
                if mirror.record_failure(mode, &e.to_string()) {
                    self.draw(&mirror);
                }
                Err(e)
            }
        }
    }

    /// Redraw from the current mirror without fetching.
    pub fn rerender(&self) {
        let mirror = self.lock();
        self.draw(&mirror);
    }

    /// Switch language and redraw.
    pub fn set_language(&self, language: Language) {
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;
        self.rerender();
    }

    fn draw(&self, mirror: &Mirror<F::Record>) {
        for (target, markup) in self.feed.render(mirror.view(), self.language()) {
            self.sink.write(target, &markup);
        }
    }
}
