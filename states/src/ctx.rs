use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

use crate::graph::TopologyError;
use crate::runtime::{Update, spawn_task};
use crate::{
    Command, CommandSnapshot, Compute, Dep, Error, Graph, State, StateRuntime, StateSyncStatus,
    TaskHandle, TaskId, Updater,
};

pub(crate) struct Slot<T: ?Sized> {
    pub(crate) value: Box<T>,
    pub(crate) status: StateSyncStatus,
}

impl<T: ?Sized> Slot<T> {
    fn new(value: Box<T>) -> Self {
        Self {
            value,
            status: StateSyncStatus::Init,
        }
    }
}

/// Owner of every state, compute and command of a session.
///
/// The expected frame loop is:
/// 1. `sync_computes()` applies results posted by commands since the last frame
/// 2. `run_computed()` brings computes up to date before drawing
/// 3. the UI reads states/computes and mutates states via `update()`
/// 4. `run_computed()` again for the frame's mutations
/// 5. `flush_commands()` starts commands enqueued during the frame
///
/// Dropping the context cancels every running command.
pub struct StateCtx {
    runtime: StateRuntime,

    states: BTreeMap<TypeId, Slot<dyn State>>,
    computes: BTreeMap<TypeId, Slot<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    graph: Graph<TypeId>,
    // registration order, rearranged topologically on every `record_compute`
    compute_order: Vec<TypeId>,

    pending_commands: Vec<TypeId>,
    tasks: BTreeMap<TypeId, TaskHandle>,
    task_generation: u64,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("pending_commands", &self.pending_commands.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            runtime: StateRuntime::new(),
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            graph: Graph::new(),
            compute_order: Vec::new(),
            pending_commands: Vec::new(),
            tasks: BTreeMap::new(),
            task_generation: 0,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let value: Box<dyn State> = Box::new(state);
        self.states.insert(TypeId::of::<T>(), Slot::new(value));
    }

    /// Register a compute and wire its dependencies into the graph.
    ///
    /// A dependency cycle is logged and leaves the previous evaluation order in place.
    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let deps: BTreeSet<TypeId> = compute.deps().iter().copied().collect();
        // re-recording the same compute must not duplicate its edges
        self.graph.remove_routes_to(id);
        for dep in deps {
            self.graph.route_to(dep, id, ());
        }
        let value: Box<dyn Compute> = Box::new(compute);
        self.computes.insert(id, Slot::new(value));
        if !self.compute_order.contains(&id) {
            self.compute_order.push(id);
        }

        if let Err(err) = self.verify_deps() {
            error!("Failed to order computes after recording {}: {err}", type_name::<T>());
        }
    }

    /// Check the dependency graph and refresh the compute evaluation order.
    pub fn verify_deps(&mut self) -> Result<(), TopologyError<TypeId>> {
        let sorted = self.graph.topology_sort()?;
        let mut order: Vec<TypeId> = sorted
            .into_iter()
            .filter(|id| self.computes.contains_key(id))
            .collect();
        for id in &self.compute_order {
            if !order.contains(id) {
                order.push(*id);
            }
        }
        self.compute_order = order;
        Ok(())
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::state"))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`Self::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access to a state. The state is marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`Self::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let slot = self
            .states
            .get_mut(&TypeId::of::<T>())
            .unwrap_or_else(|| panic!("State not registered: {}", type_name::<T>()));
        slot.status = StateSyncStatus::Dirty;
        slot.value
            .as_any_mut()
            .downcast_mut::<T>()
            .unwrap_or_else(|| panic!("State type mismatch: {}", type_name::<T>()))
    }

    /// Apply `f` to a state and mark it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn try_cached<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), "StateCtx::cached"))
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.try_cached::<T>().ok()
    }

    /// # Panics
    /// Panics if `T` was never registered with [`Self::record_compute`].
    pub fn compute<T: Compute>(&self) -> &T {
        self.try_cached::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    pub fn runtime(&self) -> &StateRuntime {
        &self.runtime
    }

    pub fn status_of<T: Any>(&self) -> Option<StateSyncStatus> {
        let id = TypeId::of::<T>();
        self.states
            .get(&id)
            .map(|slot| slot.status)
            .or_else(|| self.computes.get(&id).map(|slot| slot.status))
    }

    /// Apply every update posted through [`Updater`] since the last call.
    ///
    /// Returns the ids that changed; they are marked dirty.
    pub fn sync_computes(&mut self) -> Vec<TypeId> {
        let updates: Vec<Update> = self.runtime.drain().collect();
        let mut touched = Vec::with_capacity(updates.len());

        for update in updates {
            let id = update.id();
            let name = update.name();
            let applied = match update {
                Update::Assign { value, .. } => {
                    if let Some(slot) = self.computes.get_mut(&id) {
                        slot.value.assign_box(value);
                        slot.status = StateSyncStatus::Dirty;
                        true
                    } else if let Some(slot) = self.states.get_mut(&id) {
                        slot.value.assign_box(value);
                        slot.status = StateSyncStatus::Dirty;
                        true
                    } else {
                        false
                    }
                }
                Update::Mutate { apply, .. } => match self.states.get_mut(&id) {
                    Some(slot) => {
                        apply(slot.value.as_any_mut());
                        slot.status = StateSyncStatus::Dirty;
                        true
                    }
                    None => false,
                },
            };

            if applied {
                touched.push(id);
            } else {
                warn!("Dropping update for unregistered {name}");
            }
        }

        touched
    }

    /// Recompute, in dependency order, every compute whose inputs changed.
    ///
    /// A compute runs at most once per call. Results it publishes are applied
    /// immediately so downstream computes see them in the same pass.
    ///
    /// Returns `true` if any state or compute changed since the last call.
    pub fn run_computed(&mut self) -> bool {
        self.sync_computes();

        let mut changed: BTreeSet<TypeId> = BTreeSet::new();
        for (id, slot) in self.states.iter_mut() {
            if slot.status.needs_sync() {
                changed.insert(*id);
                slot.status = StateSyncStatus::Clean;
            }
        }
        for (id, slot) in self.computes.iter_mut() {
            if slot.status.needs_sync() {
                changed.insert(*id);
                slot.status = StateSyncStatus::Clean;
            }
        }

        for id in self.compute_order.clone() {
            let Some(slot) = self.computes.get(&id) else {
                continue;
            };
            let should_run =
                changed.contains(&id) || slot.value.deps().iter().any(|dep| changed.contains(dep));
            if !should_run {
                continue;
            }

            slot.value
                .compute(Dep::new(&self.states, &self.computes), self.runtime.updater());

            for touched in self.sync_computes() {
                if touched == id {
                    changed.insert(id);
                    if let Some(slot) = self.computes.get_mut(&id) {
                        slot.status = StateSyncStatus::Clean;
                    }
                }
            }
        }

        !changed.is_empty()
    }

    /// Queue a command; it starts on the next [`Self::flush_commands`].
    pub fn enqueue_command<T: Command>(&mut self) {
        self.pending_commands.push(TypeId::of::<T>());
    }

    /// Start every queued command.
    ///
    /// Starting a command cancels the previous run of the same command type.
    pub fn flush_commands(&mut self) {
        let pending = std::mem::take(&mut self.pending_commands);
        if pending.is_empty() {
            return;
        }

        let snap = self.snapshot();
        let mut snap = Some(snap);
        let total = pending.len();
        for (index, id) in pending.into_iter().enumerate() {
            let Some(command) = self.commands.get(&id) else {
                warn!("Dispatching unregistered command, ignoring");
                continue;
            };

            // The last command takes the snapshot, the others get their own copy.
            let command_snap = if index + 1 == total {
                snap.take().unwrap_or_default()
            } else {
                self.snapshot()
            };

            self.task_generation += 1;
            let token = CancellationToken::new();
            let future = command.run(command_snap, self.runtime.updater(), token.clone());
            debug!("Starting {command:?} (generation {})", self.task_generation);

            if spawn_task(future) {
                let handle = TaskHandle::new(TaskId::new(id, self.task_generation), token);
                if let Some(previous) = self.tasks.insert(id, handle) {
                    previous.cancel();
                }
            }
        }
    }

    /// Enqueue and immediately start a command.
    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    pub fn task_of<T: Command>(&self) -> Option<&TaskHandle> {
        self.tasks.get(&TypeId::of::<T>())
    }

    /// Cancel every running command.
    pub fn cancel_all(&mut self) {
        for (_, handle) in std::mem::take(&mut self.tasks) {
            handle.cancel();
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, slot) in &self.states {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::time::Duration;

    use crate::{
        Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, StateCtx,
        StateSyncStatus, Updater, assign_impl, state_assign_impl,
    };
    use tokio_util::sync::CancellationToken;

    #[derive(Debug, Default, Clone)]
    struct Counter {
        value: i32,
    }

    impl State for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(self.clone()))
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct Unrelated {
        flag: bool,
    }

    impl State for Unrelated {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct Doubled {
        value: i32,
        runs: u32,
    }

    impl Compute for Doubled {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::none().state::<Counter>()
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            updater.set(Self {
                value: deps.state::<Counter>().value * 2,
                runs: self.runs + 1,
            });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct PlusOne {
        value: i32,
    }

    impl Compute for PlusOne {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::none().compute::<Doubled>()
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            updater.set(Self {
                value: deps.compute::<Doubled>().value + 1,
            });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct BumpCounter;

    impl Command for BumpCounter {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            let start = snap.state::<Counter>().map(|c| c.value).unwrap_or_default();
            Box::pin(async move {
                tokio::task::yield_now().await;
                if !cancel.is_cancelled() {
                    updater.mutate::<Counter>(move |counter| counter.value = start + 10);
                }
            })
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());
        ctx.add_state(Unrelated::default());
        // Registered out of order on purpose.
        ctx.record_compute(PlusOne::default());
        ctx.record_compute(Doubled::default());
        ctx
    }

    #[test]
    fn computes_follow_dependency_order() {
        let mut ctx = ctx();
        ctx.update::<Counter>(|c| c.value = 4);
        ctx.run_computed();

        assert_eq!(ctx.compute::<Doubled>().value, 8);
        assert_eq!(ctx.compute::<PlusOne>().value, 9);
    }

    #[test]
    fn unrelated_state_does_not_trigger_compute() {
        let mut ctx = ctx();
        ctx.run_computed();
        let runs = ctx.compute::<Doubled>().runs;

        ctx.update::<Unrelated>(|u| u.flag = true);
        ctx.run_computed();
        assert_eq!(ctx.compute::<Doubled>().runs, runs);

        ctx.update::<Counter>(|c| c.value = 1);
        ctx.run_computed();
        assert_eq!(ctx.compute::<Doubled>().runs, runs + 1);
    }

    #[test]
    fn run_computed_leaves_everything_clean() {
        let mut ctx = ctx();
        ctx.update::<Counter>(|c| c.value = 2);
        ctx.run_computed();

        assert_eq!(ctx.status_of::<Counter>(), Some(StateSyncStatus::Clean));
        assert_eq!(ctx.status_of::<Doubled>(), Some(StateSyncStatus::Clean));
    }

    #[test]
    fn run_computed_reports_changes() {
        let mut ctx = ctx();
        assert!(ctx.run_computed());
        assert!(!ctx.run_computed());

        ctx.update::<Counter>(|c| c.value = 3);
        assert!(ctx.run_computed());
        assert!(!ctx.run_computed());
    }

    #[test]
    fn missing_state_is_an_error() {
        let ctx = StateCtx::new();
        assert!(ctx.try_state::<Counter>().is_err());
        assert!(ctx.cached::<Doubled>().is_none());
    }

    #[tokio::test]
    async fn command_result_applies_on_sync() {
        let mut ctx = ctx();
        ctx.record_command(BumpCounter);
        ctx.update::<Counter>(|c| c.value = 1);

        ctx.dispatch::<BumpCounter>();
        tokio::time::sleep(Duration::from_millis(20)).await;
        ctx.run_computed();

        assert_eq!(ctx.state::<Counter>().value, 11);
        assert_eq!(ctx.compute::<Doubled>().value, 22);
    }

    #[tokio::test]
    async fn dropping_ctx_cancels_running_commands() {
        let mut ctx = ctx();
        ctx.record_command(BumpCounter);
        ctx.dispatch::<BumpCounter>();

        let handle = ctx.task_of::<BumpCounter>().cloned().expect("task started");
        drop(ctx);

        assert!(handle.is_cancelled());
        // Let the task observe cancellation; nothing to apply to and nothing may panic.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
