//! One lookup cycle, from submitted text to a rendered (or cleared) sink.
//!
//! Cycles are not serialized: a new submission can start while an older one is
//! still fetching. Each cycle takes a monotonically increasing token and only
//! writes to the sink if that token is still the latest one issued, so the most
//! recent submission always determines what is shown.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::aggregate::{average_base_stat, average_move_power};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::fetcher::{Fetcher, fetch_as};
use crate::locale::LocalePolicy;
use crate::moves::resolve_sampled_moves;
use crate::pokemon::{Entity, Pokemon};
use crate::presenter::{ClearReason, PresentationSink};
use crate::region::resolve_region;
use crate::view::ViewModel;

/// Highest identifier used for random lookups.
pub const MAX_ENTITY_ID: u32 = 1025;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Validating,
    Fetching,
    Enriching,
    Done,
    Errored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Rendered(ViewModel),
    Errored(AppError),
    /// A newer submission was issued before this one settled; nothing was written.
    Superseded,
}

struct Cycle {
    token: u64,
    state: QueryState,
}

impl Cycle {
    fn new(token: u64) -> Self {
        Self {
            token,
            state: QueryState::Idle,
        }
    }

    fn advance(&mut self, next: QueryState) {
        tracing::debug!(
            token = self.token,
            "Query state {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }
}

/// Trims and lowercases a query; `None` when nothing is left.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

pub fn random_query() -> String {
    rand::random_range(1..=MAX_ENTITY_ID).to_string()
}

pub struct Orchestrator<S: PresentationSink> {
    fetcher: Arc<dyn Fetcher>,
    config: Arc<Config>,
    policy: LocalePolicy,
    sink: Mutex<S>,
    latest: AtomicU64,
}

impl<S: PresentationSink> Orchestrator<S> {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: Arc<Config>, sink: S) -> Self {
        let policy = LocalePolicy::new(&config.pokeapi.locales);
        Self {
            fetcher,
            config,
            policy,
            sink: Mutex::new(sink),
            latest: AtomicU64::new(0),
        }
    }

    /// Read access to the sink, e.g. to snapshot what is currently shown.
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("Presentation lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        f(&guard)
    }

    /// Runs one full cycle for `raw_query`. Button presses and Enter both land here.
    pub async fn submit(&self, raw_query: &str) -> CycleOutcome {
        self.submit_observed(raw_query, |_| ()).await.0
    }

    /// Like [`submit`](Self::submit), and also runs `observe` on the sink under the
    /// same lock as the cycle's own write. The observation is `None` when the
    /// cycle was superseded.
    pub async fn submit_observed<R>(
        &self,
        raw_query: &str,
        observe: impl Fn(&S) -> R,
    ) -> (CycleOutcome, Option<R>) {
        let mut cycle = Cycle::new(self.latest.fetch_add(1, Ordering::SeqCst) + 1);

        cycle.advance(QueryState::Validating);
        let Some(query) = normalize_query(raw_query) else {
            return self.fail(&mut cycle, AppError::EmptyQuery, observe);
        };

        cycle.advance(QueryState::Fetching);
        let entity = match self.fetch_entity(&query).await {
            Ok(entity) => entity,
            Err(e) => return self.fail(&mut cycle, e, observe),
        };

        cycle.advance(QueryState::Enriching);
        let view = match self.enrich(entity).await {
            Ok(view) => view,
            Err(e) => return self.fail(&mut cycle, e, observe),
        };

        cycle.advance(QueryState::Done);
        let observed = self.publish(&cycle, |sink| {
            sink.render(&view);
            observe(&*sink)
        });
        match observed {
            Some(observed) => {
                tracing::info!("Rendered {} (ID: {})", view.name, view.id);
                (CycleOutcome::Rendered(view), Some(observed))
            }
            None => (CycleOutcome::Superseded, None),
        }
    }

    async fn fetch_entity(&self, query: &str) -> Result<Entity> {
        let url = self.config.entity_url(query);
        let pokemon: Pokemon = fetch_as(self.fetcher.as_ref(), &url).await?;
        tracing::debug!("Fetched entity: {} (ID: {})", pokemon.name, pokemon.id);
        Ok(Entity::from(pokemon))
    }

    async fn enrich(&self, entity: Entity) -> Result<ViewModel> {
        let fetcher = self.fetcher.as_ref();
        let (region, moves) = tokio::join!(
            resolve_region(fetcher, &entity.species_url),
            resolve_sampled_moves(fetcher, &entity.move_urls, &self.policy),
        );
        let moves = moves?;

        let average_base_stat = average_base_stat(&entity.stats)?;
        let average_move_power = average_move_power(&moves);
        Ok(ViewModel::assemble(
            entity,
            region,
            moves,
            average_move_power,
            average_base_stat,
        ))
    }

    fn fail<R>(
        &self,
        cycle: &mut Cycle,
        err: AppError,
        observe: impl Fn(&S) -> R,
    ) -> (CycleOutcome, Option<R>) {
        tracing::error!(token = cycle.token, "Lookup failed: {}", err);
        cycle.advance(QueryState::Errored);

        let reason = match err {
            AppError::EmptyQuery => ClearReason::MissingInput,
            _ => ClearReason::NotFound,
        };
        let observed = self.publish(cycle, |sink| {
            sink.clear(reason);
            observe(&*sink)
        });
        match observed {
            Some(observed) => (CycleOutcome::Errored(err), Some(observed)),
            None => (CycleOutcome::Superseded, None),
        }
    }

    /// Applies `write` only if `cycle` is still the latest submission.
    fn publish<R>(&self, cycle: &Cycle, write: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut guard = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("Presentation lock poisoned, recovering");
                poisoned.into_inner()
            }
        };

        let latest = self.latest.load(Ordering::SeqCst);
        if cycle.token != latest {
            tracing::debug!(
                token = cycle.token,
                latest,
                "Discarding result of superseded cycle"
            );
            return None;
        }
        Some(write(&mut guard))
    }
}
