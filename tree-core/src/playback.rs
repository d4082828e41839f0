//! Tick-driven playback of tree construction and traversal animations.
//!
//! [`PlaybackController`] owns the current tree snapshot and the animation
//! progress. It never schedules anything itself: the host asks
//! [`PlaybackController::pending_tick`] what to schedule next and hands the
//! tick back through [`PlaybackController::fire`] when it is due. A typical
//! host loop looks like:
//!
//! 1. Forward user requests ([`start_build_str`], [`start_traversal`],
//!    [`set_kind`], [`set_tree`], [`reset`]).
//! 2. If [`pending_tick`] returns a tick and its delay has elapsed, call
//!    [`fire`] with it.
//! 3. Lay out and draw [`snapshot`].
//!
//! Every accepted request and every applied tick advances an internal epoch,
//! so a tick obtained before a reset is recognized as stale and ignored.
//!
//! [`start_build_str`]: PlaybackController::start_build_str
//! [`start_traversal`]: PlaybackController::start_traversal
//! [`set_kind`]: PlaybackController::set_kind
//! [`set_tree`]: PlaybackController::set_tree
//! [`reset`]: PlaybackController::reset
//! [`pending_tick`]: PlaybackController::pending_tick
//! [`fire`]: PlaybackController::fire
//! [`snapshot`]: PlaybackController::snapshot

use crate::{
    bst::{self, IdAllocator},
    config::PlaybackConfig,
    error::PlaybackError,
    input,
    traversal::{self, TraversalKind},
    tree::Subtree,
    types::NodeId,
};
use std::{collections::VecDeque, sync::Arc};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Inserting one queued value per tick.
    Building,
    /// Queue drained; the last inserted node stays highlighted for one tick.
    SettlingAfterBuild,
    /// Revealing one node of the traversal order per tick.
    TraversalRunning,
}

/// A tick the host should deliver after `delay` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTick {
    pub epoch: u64,
    pub delay: f64,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Inserted { id: NodeId, value: i64 },
    /// The value was already in the tree; nothing changed.
    Duplicate { value: i64 },
    /// The last insertion's highlight was cleared.
    Settled,
    Revealed { id: NodeId, step: usize },
    /// The traversal order is exhausted.
    Finished,
    /// Nothing is running.
    Idle,
    /// The tick was scheduled before the latest request and was dropped.
    Stale,
}

/// Read-only view of the controller for renderers.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub tree: Option<&'a Subtree>,
    pub state: PlaybackState,
    pub kind: TraversalKind,
    pub order: &'a [NodeId],
    pub visited: &'a [NodeId],
    pub step: Option<usize>,
    pub queue: &'a VecDeque<i64>,
}

/// Owns the active tree and drives build and traversal animations.
///
/// At most one of building and traversing is in progress at a time.
/// Rejected requests return an error and leave the controller untouched.
#[derive(Debug, Default)]
pub struct PlaybackController {
    tree: Option<Subtree>,
    state: PlaybackState,
    queue: VecDeque<i64>,
    ids: IdAllocator,
    kind: TraversalKind,
    order: Vec<NodeId>,
    visited: Vec<NodeId>,
    step: Option<usize>,
    epoch: u64,
    cfg: PlaybackConfig,
}

impl PlaybackController {
    pub fn new(cfg: PlaybackConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.cfg
    }

    /// Replaces the tick cadence. Already pending ticks keep their delay.
    pub fn set_config(&mut self, cfg: PlaybackConfig) {
        self.cfg = cfg;
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn tree(&self) -> Option<&Subtree> {
        self.tree.as_ref()
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// The node revealed by the latest traversal tick, while running.
    pub fn current(&self) -> Option<NodeId> {
        match self.state {
            PlaybackState::TraversalRunning => self.visited.last().copied(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tree: self.tree.as_ref(),
            state: self.state,
            kind: self.kind,
            order: &self.order,
            visited: &self.visited,
            step: self.step,
            queue: &self.queue,
        }
    }

    /// Starts building a fresh search tree from `values`, one per tick.
    ///
    /// The previous tree, traversal progress and id numbering are discarded.
    ///
    /// ### Errors
    /// - [`PlaybackError::BuildInProgress`] while another build runs.
    /// - [`PlaybackError::NoValues`] for an empty list.
    pub fn start_build(&mut self, values: Vec<i64>) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Building {
            log::warn!("ignoring build request: a build is already running");
            return Err(PlaybackError::BuildInProgress);
        }
        if values.is_empty() {
            log::warn!("ignoring build request without values");
            return Err(PlaybackError::NoValues);
        }

        log::info!("building tree from {} values", values.len());
        self.clear_progress();
        self.tree = None;
        self.ids.reset();
        self.queue = values.into();
        self.state = PlaybackState::Building;
        self.epoch += 1;
        Ok(())
    }

    /// Parses `text` with [`input::parse_values`] and starts a build.
    ///
    /// ### Returns
    /// The number of values queued.
    pub fn start_build_str(&mut self, text: &str) -> Result<usize, PlaybackError> {
        if self.state == PlaybackState::Building {
            log::warn!("ignoring build request: a build is already running");
            return Err(PlaybackError::BuildInProgress);
        }
        let values = input::parse_values(text).inspect_err(|e| log::warn!("rejected input: {e}"))?;
        let count = values.len();
        self.start_build(values)?;
        Ok(count)
    }

    /// Starts revealing the active tree in `kind` order, one node per tick.
    ///
    /// Restarts a running traversal. Any "just inserted" highlight is
    /// cleared first.
    ///
    /// ### Errors
    /// - [`PlaybackError::TraversalDuringBuild`] while building.
    /// - [`PlaybackError::EmptyTree`] without a tree.
    /// - [`PlaybackError::NotBinary`] for ternary or general trees.
    pub fn start_traversal(&mut self, kind: TraversalKind) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Building {
            log::warn!("ignoring {kind} traversal: a build is running");
            return Err(PlaybackError::TraversalDuringBuild(kind));
        }
        let Some(tree) = &self.tree else {
            log::warn!("ignoring {kind} traversal: no tree");
            return Err(PlaybackError::EmptyTree);
        };
        if !tree.is_binary() {
            log::warn!("ignoring {kind} traversal: tree is not binary");
            return Err(PlaybackError::NotBinary);
        }

        let tree = bst::clear_flags(tree);
        self.order = traversal::traversal_order(Some(&tree), kind);
        self.tree = Some(tree);
        self.kind = kind;
        self.visited.clear();
        self.step = Some(0);
        self.state = PlaybackState::TraversalRunning;
        self.epoch += 1;
        log::info!("starting {kind} traversal over {} nodes", self.order.len());
        Ok(())
    }

    /// Selects the traversal kind, abandoning any running animation.
    pub fn set_kind(&mut self, kind: TraversalKind) {
        if kind == self.kind {
            return;
        }
        log::debug!("traversal kind {} -> {kind}", self.kind);
        self.interrupt();
        self.kind = kind;
    }

    /// Makes `tree` the active tree, abandoning any running animation.
    pub fn set_tree(&mut self, tree: Option<Subtree>) {
        self.interrupt();
        self.tree = tree;
        self.ids.reset();
    }

    /// Clears the tree and all playback progress.
    pub fn reset(&mut self) {
        log::info!("playback reset");
        self.interrupt();
        self.tree = None;
        self.ids.reset();
    }

    /// The tick the host should schedule next, or `None` when idle.
    pub fn pending_tick(&self) -> Option<PendingTick> {
        let delay = match self.state {
            PlaybackState::Idle => return None,
            PlaybackState::Building => self.cfg.build_interval,
            PlaybackState::SettlingAfterBuild => self.cfg.settle_delay,
            PlaybackState::TraversalRunning => self.cfg.traversal_interval,
        };
        Some(PendingTick {
            epoch: self.epoch,
            delay,
        })
    }

    /// Applies `tick` unless a request or another tick came after it was
    /// handed out.
    pub fn fire(&mut self, tick: PendingTick) -> TickOutcome {
        if tick.epoch != self.epoch {
            log::debug!("dropping stale tick (epoch {} != {})", tick.epoch, self.epoch);
            return TickOutcome::Stale;
        }
        self.tick()
    }

    /// Advances the active timeline by one step.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = match self.state {
            PlaybackState::Idle => return TickOutcome::Idle,
            PlaybackState::Building => self.build_step(),
            PlaybackState::SettlingAfterBuild => {
                self.tree = self.tree.as_ref().map(bst::clear_flags);
                self.state = PlaybackState::Idle;
                TickOutcome::Settled
            }
            PlaybackState::TraversalRunning => self.traversal_step(),
        };
        self.epoch += 1;
        log::debug!("tick -> {outcome:?} ({:?})", self.state);
        outcome
    }

    fn build_step(&mut self) -> TickOutcome {
        let Some(value) = self.queue.pop_front() else {
            self.state = PlaybackState::SettlingAfterBuild;
            return TickOutcome::Idle;
        };

        let cleared = self.tree.as_ref().map(bst::clear_flags);
        let next = bst::insert(cleared.as_ref(), value, &mut self.ids);
        let duplicate = cleared.as_ref().is_some_and(|c| Arc::ptr_eq(c, &next));
        let inserted = next.new_ids().first().copied();
        self.tree = Some(next);

        if self.queue.is_empty() {
            self.state = PlaybackState::SettlingAfterBuild;
        }

        match inserted {
            Some(id) if !duplicate => TickOutcome::Inserted { id, value },
            _ => TickOutcome::Duplicate { value },
        }
    }

    fn traversal_step(&mut self) -> TickOutcome {
        match self.step {
            Some(step) if step < self.order.len() => {
                let id = self.order[step];
                self.visited.push(id);
                self.step = Some(step + 1);
                TickOutcome::Revealed { id, step }
            }
            _ => {
                self.step = None;
                self.state = PlaybackState::Idle;
                TickOutcome::Finished
            }
        }
    }

    /// Stops whatever is running and clears traversal progress.
    ///
    /// An interrupted build also drops its queue and partial tree; a build
    /// that is only settling keeps its tree with highlights cleared.
    fn interrupt(&mut self) {
        match self.state {
            PlaybackState::Building => {
                self.queue.clear();
                self.tree = None;
                self.ids.reset();
            }
            PlaybackState::SettlingAfterBuild => {
                self.tree = self.tree.as_ref().map(bst::clear_flags);
            }
            PlaybackState::Idle | PlaybackState::TraversalRunning => {}
        }
        self.clear_progress();
        self.state = PlaybackState::Idle;
        self.epoch += 1;
    }

    fn clear_progress(&mut self) {
        self.order.clear();
        self.visited.clear();
        self.step = None;
    }
}
