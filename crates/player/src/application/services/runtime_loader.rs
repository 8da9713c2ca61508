//! Runtime loading and teardown
//!
//! A load session clears the mount surface, creates a fresh drawing surface,
//! injects the variant's loader script, and once the script has run calls the
//! runtime's instantiation entrypoint with the variant's configuration bundle.
//!
//! Everything a session attaches to the page is kept in its `Session` record,
//! and `teardown` is the single release path used by stop, variant switch and
//! unmount. Each session carries a generation number; progress reports and
//! resolutions from an older generation are ignored, and an instance resolved
//! for a torn-down or timed-out session is shut down instead of installed.
//!
//! An instantiation cannot be cancelled. Work nobody waits for any more is
//! handed to the `SpawnPort` and driven to completion so a late instance is
//! always seen, and shut down.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_util::future::{select, Either};
use turbo_racing_domain::{
    BuildSettings, InstantiationError, LoadError, LoadState, RuntimeConfig, RuntimeVariant,
};

use super::callback::Callback;
use crate::ports::outbound::{
    InjectedScript, ProgressCallback, RuntimeHostPort, RuntimeInstance, RuntimeSurface,
    ScriptFuture, SleepPort, SpawnPort,
};

type SessionWork = Pin<Box<dyn Future<Output = LoadState>>>;

/// Drives one load session and yields its final state
///
/// Resolves to the loader's state at the time the session settled (failed
/// sessions resolve as soon as they fail). Dropping an unfinished task does
/// not cancel the session: the rest of the work is detached onto the
/// platform spawner.
pub struct LoadTask {
    work: Option<SessionWork>,
    spawner: Rc<dyn SpawnPort>,
}

impl LoadTask {
    fn new(spawner: Rc<dyn SpawnPort>, work: impl Future<Output = LoadState> + 'static) -> Self {
        Self {
            work: Some(Box::pin(work)),
            spawner,
        }
    }
}

impl Future for LoadTask {
    type Output = LoadState;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<LoadState> {
        // Polled again after completion: stay pending
        let Some(work) = self.work.as_mut() else {
            return Poll::Pending;
        };
        let state = match work.as_mut().poll(cx) {
            Poll::Ready(state) => state,
            Poll::Pending => return Poll::Pending,
        };
        self.work = None;
        Poll::Ready(state)
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if let Some(work) = self.work.take() {
            self.spawner.spawn_local(Box::pin(async move {
                work.await;
            }));
        }
    }
}

/// Resources owned by the active session
struct Session {
    generation: u64,
    variant: RuntimeVariant,
    script: Option<Box<dyn InjectedScript>>,
    handle: Option<Box<dyn RuntimeInstance>>,
}

struct LoaderState {
    state: LoadState,
    generation: u64,
    session: Option<Session>,
}

struct LoaderInner {
    host: Rc<dyn RuntimeHostPort>,
    sleep: Rc<dyn SleepPort>,
    spawner: Rc<dyn SpawnPort>,
    build: BuildSettings,
    load_timeout_ms: Option<u64>,
    state: RefCell<LoaderState>,
    on_change: Callback<LoadState>,
}

/// Loads the external runtime into the mount surface
#[derive(Clone)]
pub struct RuntimeLoader {
    inner: Rc<LoaderInner>,
}

impl RuntimeLoader {
    pub fn new(
        host: Rc<dyn RuntimeHostPort>,
        sleep: Rc<dyn SleepPort>,
        spawner: Rc<dyn SpawnPort>,
        build: BuildSettings,
        load_timeout_ms: Option<u64>,
    ) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                host,
                sleep,
                spawner,
                build,
                load_timeout_ms,
                state: RefCell::new(LoaderState {
                    state: LoadState::NotStarted,
                    generation: 0,
                    session: None,
                }),
                on_change: Callback::default(),
            }),
        }
    }

    pub fn state(&self) -> LoadState {
        self.inner.state.borrow().state.clone()
    }

    /// Whether a runtime instance is currently installed
    pub fn has_handle(&self) -> bool {
        self.inner
            .state
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| s.handle.is_some())
    }

    /// Whether any session resources are attached
    pub fn has_session(&self) -> bool {
        self.inner.state.borrow().session.is_some()
    }

    /// Variant of the active session
    pub fn active_variant(&self) -> Option<RuntimeVariant> {
        self.inner.state.borrow().session.as_ref().map(|s| s.variant)
    }

    /// Called with every state change, in order
    pub fn set_on_change(&self, callback: impl FnMut(&LoadState) + 'static) {
        self.inner.on_change.set(callback);
    }

    /// Start a load session for `variant`
    ///
    /// Any previous session is torn down first, so at most one session is ever
    /// attached to the mount surface.
    pub fn start(&self, variant: RuntimeVariant) -> LoadTask {
        self.teardown();

        let generation = {
            let mut st = self.inner.state.borrow_mut();
            st.generation += 1;
            st.session = Some(Session {
                generation: st.generation,
                variant,
                script: None,
                handle: None,
            });
            st.generation
        };
        tracing::info!(%variant, generation, "Starting runtime load");

        self.inner.host.clear_mount();
        self.publish(LoadState::loading());

        let surface = match self.inner.host.create_surface() {
            Ok(surface) => surface,
            Err(e) => {
                let error = LoadError::from(InstantiationError::SurfaceUnavailable(e.0));
                return self.fail_now(generation, error);
            }
        };

        let src = self.inner.build.loader_url(variant);
        let injection = match self.inner.host.inject_script(&src) {
            Ok(injection) => injection,
            Err(e) => return self.fail_now(generation, LoadError::from(e)),
        };
        self.with_session(generation, |s| s.script = Some(injection.node));
        let script_loaded = injection.loaded;

        let config = self.inner.build.runtime_config(variant);
        let work = self.clone().run_session(generation, script_loaded, surface, config);

        let this = self.clone();
        let sleep = Rc::clone(&self.inner.sleep);
        let timeout_ms = self.inner.load_timeout_ms;
        LoadTask::new(Rc::clone(&self.inner.spawner), async move {
            let Some(ms) = timeout_ms else {
                let outcome = work.await;
                this.settle(generation, outcome);
                return this.state();
            };
            match select(Box::pin(work), sleep.sleep_ms(ms)).await {
                Either::Left((outcome, _)) => this.settle(generation, outcome),
                Either::Right(((), abandoned)) => {
                    this.expire(generation, LoadError::TimedOut { timeout_ms: ms });
                    let late = this.clone();
                    this.inner.spawner.spawn_local(Box::pin(async move {
                        let outcome = abandoned.await;
                        late.settle(generation, outcome);
                    }));
                }
            }
            this.state()
        })
    }

    async fn run_session(
        self,
        generation: u64,
        script_loaded: ScriptFuture,
        surface: Box<dyn RuntimeSurface>,
        config: RuntimeConfig,
    ) -> Result<Option<Box<dyn RuntimeInstance>>, LoadError> {
        script_loaded.await?;
        if !self.is_current(generation) {
            // Torn down while the script loaded; nothing to instantiate into
            return Ok(None);
        }
        tracing::debug!(generation, "Loader script ready, instantiating runtime");
        let progress_target = self.clone();
        let on_progress: ProgressCallback = Box::new(move |fraction: f64| {
            progress_target.report_progress(generation, fraction)
        });
        let instance = surface.instantiate(&config, on_progress).await?;
        Ok(Some(instance))
    }

    /// Release the active session's resources
    ///
    /// Shuts the runtime down when the handle supports it (errors are logged,
    /// never returned), removes the loader script, and clears the mount
    /// surface. Idempotent and safe without a session.
    pub fn stop(&self) {
        self.teardown();
    }

    fn teardown(&self) {
        let session = {
            let mut st = self.inner.state.borrow_mut();
            st.generation += 1;
            st.session.take()
        };

        if let Some(session) = session {
            tracing::info!(
                variant = %session.variant,
                generation = session.generation,
                "Tearing down runtime session"
            );
            if let Some(handle) = session.handle {
                shutdown_instance(handle.as_ref());
            }
            if let Some(script) = session.script {
                script.remove();
            }
        }
        self.inner.host.clear_mount();
        self.publish(LoadState::NotStarted);
    }

    fn is_current(&self, generation: u64) -> bool {
        let st = self.inner.state.borrow();
        st.generation == generation && st.session.is_some()
    }

    fn with_session(&self, generation: u64, f: impl FnOnce(&mut Session)) {
        let mut st = self.inner.state.borrow_mut();
        if let Some(session) = st.session.as_mut().filter(|s| s.generation == generation) {
            f(session);
        }
    }

    fn report_progress(&self, generation: u64, fraction: f64) {
        let next = {
            let st = self.inner.state.borrow();
            if st.generation != generation {
                return;
            }
            st.state.advance(fraction)
        };
        if let Some(next) = next {
            self.publish(next);
        }
    }

    fn fail_now(&self, generation: u64, error: LoadError) -> LoadTask {
        self.settle(generation, Err(error));
        let state = self.state();
        LoadTask::new(Rc::clone(&self.inner.spawner), async move { state })
    }

    /// Fail a session that did not settle in time
    ///
    /// The session keeps its page resources until the next teardown, but its
    /// generation is retired: later progress is ignored and a late instance
    /// goes through the stale path of `settle`.
    fn expire(&self, generation: u64, error: LoadError) {
        {
            let mut st = self.inner.state.borrow_mut();
            if st.generation != generation || st.session.is_none() {
                return;
            }
            st.generation += 1;
        }
        tracing::error!(generation, "Runtime load failed: {}", error.detail());
        self.publish(LoadState::Failed(error.banner_message()));
    }

    /// Apply a session's outcome if the session is still the active one
    fn settle(&self, generation: u64, outcome: Result<Option<Box<dyn RuntimeInstance>>, LoadError>) {
        if !self.is_current(generation) {
            match outcome {
                Ok(Some(stale)) => {
                    tracing::warn!(generation, "Discarding runtime resolved after teardown");
                    shutdown_instance(stale.as_ref());
                }
                _ => tracing::debug!(generation, "Ignoring outcome of stale load session"),
            }
            return;
        }

        match outcome {
            Ok(Some(handle)) => {
                self.with_session(generation, |s| s.handle = Some(handle));
                tracing::info!(generation, "Runtime ready");
                self.publish(LoadState::Ready);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::error!(generation, "Runtime load failed: {}", error.detail());
                self.publish(LoadState::Failed(error.banner_message()));
            }
        }
    }

    fn publish(&self, next: LoadState) {
        {
            let mut st = self.inner.state.borrow_mut();
            if st.state == next {
                return;
            }
            st.state = next.clone();
        }
        self.inner.on_change.emit(&next);
    }
}

/// Best-effort shutdown; an unresponsive runtime must not block the caller
fn shutdown_instance(handle: &dyn RuntimeInstance) {
    if !handle.can_shutdown() {
        return;
    }
    if let Err(e) = handle.shutdown() {
        tracing::error!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{FakeInstance, FakeRuntimeHost, FakeSleep, FakeSpawner};
    use futures_util::FutureExt;

    struct Harness {
        host: FakeRuntimeHost,
        sleep: FakeSleep,
        spawner: FakeSpawner,
        loader: RuntimeLoader,
        states: Rc<RefCell<Vec<LoadState>>>,
    }

    fn harness(timeout: Option<u64>) -> Harness {
        let host = FakeRuntimeHost::new();
        let sleep = FakeSleep::new();
        let spawner = FakeSpawner::new();
        let loader = RuntimeLoader::new(
            Rc::new(host.clone()),
            Rc::new(sleep.clone()),
            Rc::new(spawner.clone()),
            BuildSettings::default(),
            timeout,
        );
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        loader.set_on_change(move |s| sink.borrow_mut().push(s.clone()));
        Harness {
            host,
            sleep,
            spawner,
            loader,
            states,
        }
    }

    #[tokio::test]
    async fn test_primary_load_reports_progress_then_ready() {
        let h = harness(None);
        let instance = FakeInstance::new(true);
        h.host.script_loads_ok();
        h.host.instantiate_with(vec![0.3, 1.0], Ok(instance.clone()));

        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(final_state, LoadState::Ready);
        assert_eq!(
            *h.states.borrow(),
            vec![
                LoadState::Loading(0.0),
                LoadState::Loading(0.3),
                LoadState::Loading(1.0),
                LoadState::Ready
            ]
        );
        assert!(h.loader.has_handle());
        assert_eq!(h.host.instantiated_with().len(), 1);
        assert_eq!(
            h.host.instantiated_with()[0].data_url,
            "/Build/WebGL Builds.data.br"
        );
        assert_eq!(
            h.host.scripts_injected(),
            vec!["/Build/WebGL Builds.loader.js".to_string()]
        );
    }

    #[tokio::test]
    async fn test_touch_variant_uses_touch_build() {
        let h = harness(None);
        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(FakeInstance::new(true)));

        h.loader.start(RuntimeVariant::TouchDemo).await;

        assert_eq!(
            h.host.scripts_injected(),
            vec!["/Build/WebGL Builds Touch.loader.js".to_string()]
        );
        assert_eq!(
            h.host.instantiated_with()[0].product_name,
            "Turbo racing Touch DEMO"
        );
    }

    #[tokio::test]
    async fn test_script_error_fails_without_handle() {
        let h = harness(None);
        h.host.script_fails();

        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(final_state, LoadState::Failed("script load error".to_string()));
        assert!(!h.loader.has_handle());
        assert!(h.host.instantiated_with().is_empty());
    }

    #[tokio::test]
    async fn test_instantiation_rejection_fails_with_distinct_message() {
        let h = harness(None);
        h.host.script_loads_ok();
        h.host.instantiate_with(
            vec![0.5],
            Err(InstantiationError::Rejected("out of memory".to_string())),
        );

        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(
            final_state,
            LoadState::Failed("runtime instantiation failed".to_string())
        );
        assert!(!h.loader.has_handle());
    }

    #[tokio::test]
    async fn test_missing_entrypoint_is_an_instantiation_failure() {
        let h = harness(None);
        h.host.script_loads_ok();
        h.host.entrypoint_missing();

        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(
            final_state,
            LoadState::Failed("runtime instantiation failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_unavailable_surface_fails_immediately() {
        let h = harness(None);
        h.host.surface_unavailable();

        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(
            final_state,
            LoadState::Failed("runtime instantiation failed".to_string())
        );
        assert!(h.host.scripts_injected().is_empty());
    }

    #[tokio::test]
    async fn test_progress_never_decreases() {
        let h = harness(None);
        h.host.script_loads_ok();
        h.host
            .instantiate_with(vec![0.2, 0.6, 0.4, 0.6, 0.9], Ok(FakeInstance::new(false)));

        h.loader.start(RuntimeVariant::Primary).await;

        let progress: Vec<f64> = h
            .states
            .borrow()
            .iter()
            .filter_map(LoadState::progress)
            .collect();
        assert_eq!(progress, vec![0.0, 0.2, 0.6, 0.9]);
    }

    #[tokio::test]
    async fn test_stop_shuts_down_and_clears_resources() {
        let h = harness(None);
        let instance = FakeInstance::new(true);
        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(instance.clone()));
        h.loader.start(RuntimeVariant::Primary).await;
        assert_eq!(h.host.attached_scripts(), 1);
        assert_eq!(h.host.surfaces_attached(), 1);

        h.loader.stop();

        assert_eq!(instance.shutdown_calls(), 1);
        assert_eq!(h.loader.state(), LoadState::NotStarted);
        assert!(!h.loader.has_handle());
        assert_eq!(h.host.attached_scripts(), 0);
        assert_eq!(h.host.surfaces_attached(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_error_is_absorbed() {
        let h = harness(None);
        let instance = FakeInstance::failing_shutdown();
        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(instance.clone()));
        h.loader.start(RuntimeVariant::Primary).await;

        h.loader.stop();

        assert_eq!(instance.shutdown_calls(), 1);
        assert_eq!(h.host.attached_scripts(), 0);
        assert_eq!(h.loader.state(), LoadState::NotStarted);
    }

    #[test]
    fn test_teardown_is_idempotent_and_safe_when_never_started() {
        let h = harness(None);

        h.loader.stop();
        h.loader.stop();

        assert_eq!(h.loader.state(), LoadState::NotStarted);
        assert_eq!(h.host.attached_scripts(), 0);
        assert_eq!(h.host.surfaces_attached(), 0);
        assert!(h.states.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let h = harness(None);
        h.host.script_loads_ok();
        let pending = h.host.instantiate_pending();

        let mut task = h.loader.start(RuntimeVariant::Primary);
        assert!((&mut task).now_or_never().is_none());
        assert_eq!(h.loader.state(), LoadState::Loading(0.0));

        h.loader.stop();
        let late = FakeInstance::new(true);
        pending.progress(0.8);
        pending.resolve(Ok(late.clone()));
        let final_state = task.await;

        assert_eq!(final_state, LoadState::NotStarted);
        assert!(!h.loader.has_handle());
        assert_eq!(late.shutdown_calls(), 1);
        assert!(!h.states.borrow().contains(&LoadState::Ready));
        assert!(!h.states.borrow().contains(&LoadState::Loading(0.8)));
    }

    #[tokio::test]
    async fn test_stale_resolution_does_not_touch_new_session() {
        let h = harness(None);
        h.host.script_loads_ok();
        let first = h.host.instantiate_pending();
        let mut first_task = h.loader.start(RuntimeVariant::Primary);
        assert!((&mut first_task).now_or_never().is_none());

        h.host.script_loads_ok();
        let second = h.host.instantiate_pending();
        let mut second_task = h.loader.start(RuntimeVariant::TouchDemo);
        assert!((&mut second_task).now_or_never().is_none());

        first.resolve(Ok(FakeInstance::new(true)));
        first_task.await;
        assert_eq!(h.loader.state(), LoadState::Loading(0.0));
        assert_eq!(h.host.attached_scripts(), 1);

        second.resolve(Ok(FakeInstance::new(true)));
        assert_eq!(second_task.await, LoadState::Ready);
        assert_eq!(h.loader.active_variant(), Some(RuntimeVariant::TouchDemo));
    }

    #[tokio::test]
    async fn test_restart_tears_down_previous_session() {
        let h = harness(None);
        let first = FakeInstance::new(true);
        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(first.clone()));
        h.loader.start(RuntimeVariant::Primary).await;

        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(FakeInstance::new(true)));
        h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(first.shutdown_calls(), 1);
        assert_eq!(h.host.attached_scripts(), 1);
        assert_eq!(h.host.surfaces_attached(), 1);
    }

    #[tokio::test]
    async fn test_hung_load_times_out() {
        let h = harness(Some(30_000));
        h.host.script_loads_ok();
        let _pending = h.host.instantiate_pending();

        let mut task = h.loader.start(RuntimeVariant::Primary);
        assert!((&mut task).now_or_never().is_none());
        h.sleep.fire_all();
        let final_state = task.await;

        assert_eq!(final_state, LoadState::Failed("load timed out".to_string()));
        assert_eq!(h.sleep.requested(), vec![30_000]);
        assert!(!h.loader.has_handle());
        assert!(h.loader.has_session());
    }

    #[tokio::test]
    async fn test_runtime_resolving_after_timeout_is_shut_down() {
        let h = harness(Some(30_000));
        h.host.script_loads_ok();
        let pending = h.host.instantiate_pending();
        let mut task = h.loader.start(RuntimeVariant::Primary);
        assert!((&mut task).now_or_never().is_none());
        h.sleep.fire_all();
        assert_eq!(task.await, LoadState::Failed("load timed out".to_string()));
        assert_eq!(h.spawner.detached(), 1);

        let late = FakeInstance::new(true);
        pending.progress(0.7);
        pending.resolve(Ok(late.clone()));
        h.spawner.run_until_stalled();

        assert_eq!(late.shutdown_calls(), 1);
        assert_eq!(h.spawner.detached(), 0);
        assert!(!h.loader.has_handle());
        assert_eq!(h.loader.state(), LoadState::Failed("load timed out".to_string()));
        assert!(!h.states.borrow().contains(&LoadState::Loading(0.7)));

        h.loader.stop();
        assert_eq!(late.shutdown_calls(), 1);
        assert_eq!(h.host.attached_scripts(), 0);
    }

    #[tokio::test]
    async fn test_dropped_task_keeps_driving_the_session() {
        let h = harness(None);
        h.host.script_loads_ok();
        let pending = h.host.instantiate_pending();
        let mut task = h.loader.start(RuntimeVariant::Primary);
        assert!((&mut task).now_or_never().is_none());

        drop(task);
        assert_eq!(h.spawner.detached(), 1);
        pending.progress(0.5);
        h.spawner.run_until_stalled();
        assert_eq!(h.loader.state(), LoadState::Loading(0.5));

        pending.resolve(Ok(FakeInstance::new(true)));
        h.spawner.run_until_stalled();

        assert_eq!(h.loader.state(), LoadState::Ready);
        assert!(h.loader.has_handle());
        assert_eq!(h.spawner.detached(), 0);
    }

    #[test]
    fn test_finished_task_detaches_nothing() {
        let h = harness(None);
        h.host.surface_unavailable();

        let task = h.loader.start(RuntimeVariant::Primary);
        assert_eq!(
            task.now_or_never(),
            Some(LoadState::Failed("runtime instantiation failed".to_string()))
        );

        assert_eq!(h.spawner.detached(), 0);
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let h = harness(None);
        h.host.script_fails();
        h.loader.start(RuntimeVariant::Primary).await;

        h.host.script_loads_ok();
        h.host.instantiate_with(vec![], Ok(FakeInstance::new(true)));
        let final_state = h.loader.start(RuntimeVariant::Primary).await;

        assert_eq!(final_state, LoadState::Ready);
        assert_eq!(h.host.attached_scripts(), 1);
    }
}
