use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures_channel::oneshot;
use futures_util::future;
use turbo_racing_domain::{InstantiationError, LoadScriptError, RuntimeConfig, ShutdownError};

use crate::application::config::DEFAULT_ENTRYPOINT;
use crate::ports::outbound::{
    InjectedScript, InstanceFuture, ProgressCallback, RuntimeHostPort, RuntimeInstance,
    RuntimeSurface, ScriptInjection, SurfaceError,
};

type Outcome = Result<FakeInstance, InstantiationError>;

struct InstanceState {
    can_shutdown: bool,
    fail_shutdown: bool,
    shutdown_calls: Cell<u32>,
}

/// Runtime instance that counts shutdown calls
#[derive(Clone)]
pub struct FakeInstance {
    state: Rc<InstanceState>,
}

impl FakeInstance {
    pub fn new(can_shutdown: bool) -> Self {
        Self::build(can_shutdown, false)
    }

    /// An instance whose shutdown throws
    pub fn failing_shutdown() -> Self {
        Self::build(true, true)
    }

    fn build(can_shutdown: bool, fail_shutdown: bool) -> Self {
        Self {
            state: Rc::new(InstanceState {
                can_shutdown,
                fail_shutdown,
                shutdown_calls: Cell::new(0),
            }),
        }
    }

    pub fn shutdown_calls(&self) -> u32 {
        self.state.shutdown_calls.get()
    }
}

impl RuntimeInstance for FakeInstance {
    fn can_shutdown(&self) -> bool {
        self.state.can_shutdown
    }

    fn shutdown(&self) -> Result<(), ShutdownError> {
        self.state.shutdown_calls.set(self.state.shutdown_calls.get() + 1);
        if self.state.fail_shutdown {
            return Err(ShutdownError("Quit threw".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct PendingState {
    on_progress: RefCell<Option<ProgressCallback>>,
    sender: RefCell<Option<oneshot::Sender<Outcome>>>,
}

/// Test-side handle of an instantiation the test resolves by hand
#[derive(Clone)]
pub struct PendingInstantiation {
    state: Rc<PendingState>,
}

impl PendingInstantiation {
    /// Report progress through the callback the loader passed in
    pub fn progress(&self, fraction: f64) {
        let taken = self.state.on_progress.borrow_mut().take();
        if let Some(mut on_progress) = taken {
            on_progress(fraction);
            *self.state.on_progress.borrow_mut() = Some(on_progress);
        }
    }

    pub fn resolve(&self, outcome: Outcome) {
        if let Some(sender) = self.state.sender.borrow_mut().take() {
            let _ = sender.send(outcome);
        }
    }
}

enum Plan {
    Immediate { steps: Vec<f64>, outcome: Outcome },
    Pending {
        handle: PendingInstantiation,
        receiver: oneshot::Receiver<Outcome>,
    },
}

struct AttachedScript {
    src: String,
    removed: Rc<Cell<bool>>,
}

#[derive(Default)]
struct HostState {
    surfaces: Cell<usize>,
    surface_failures: Cell<usize>,
    scripts: RefCell<Vec<AttachedScript>>,
    script_outcomes: RefCell<VecDeque<bool>>,
    plans: RefCell<VecDeque<Plan>>,
    configs: RefCell<Vec<RuntimeConfig>>,
}

/// Mount surface with scripted loader-script and instantiation outcomes
///
/// Outcomes are queued and consumed in order. With nothing queued a script
/// loads and instantiation succeeds with a shutdown-capable instance.
#[derive(Clone, Default)]
pub struct FakeRuntimeHost {
    state: Rc<HostState>,
}

impl FakeRuntimeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_loads_ok(&self) {
        self.state.script_outcomes.borrow_mut().push_back(true);
    }

    pub fn script_fails(&self) {
        self.state.script_outcomes.borrow_mut().push_back(false);
    }

    /// Next instantiation reports `steps` synchronously, then settles
    pub fn instantiate_with(&self, steps: Vec<f64>, outcome: Outcome) {
        self.state
            .plans
            .borrow_mut()
            .push_back(Plan::Immediate { steps, outcome });
    }

    /// Next instantiation stays pending until the returned handle resolves it
    pub fn instantiate_pending(&self) -> PendingInstantiation {
        let (sender, receiver) = oneshot::channel();
        let handle = PendingInstantiation {
            state: Rc::new(PendingState {
                on_progress: RefCell::new(None),
                sender: RefCell::new(Some(sender)),
            }),
        };
        self.state.plans.borrow_mut().push_back(Plan::Pending {
            handle: handle.clone(),
            receiver,
        });
        handle
    }

    /// Loader script runs without installing the entrypoint
    pub fn entrypoint_missing(&self) {
        self.instantiate_with(
            Vec::new(),
            Err(InstantiationError::EntrypointMissing {
                entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            }),
        );
    }

    /// Next surface creation fails
    pub fn surface_unavailable(&self) {
        let failures = &self.state.surface_failures;
        failures.set(failures.get() + 1);
    }

    pub fn scripts_injected(&self) -> Vec<String> {
        self.state
            .scripts
            .borrow()
            .iter()
            .map(|s| s.src.clone())
            .collect()
    }

    /// Scripts injected and not yet removed
    pub fn attached_scripts(&self) -> usize {
        self.state
            .scripts
            .borrow()
            .iter()
            .filter(|s| !s.removed.get())
            .count()
    }

    /// Drawing surfaces currently inside the mount surface
    pub fn surfaces_attached(&self) -> usize {
        self.state.surfaces.get()
    }

    pub fn instantiated_with(&self) -> Vec<RuntimeConfig> {
        self.state.configs.borrow().clone()
    }
}

impl RuntimeHostPort for FakeRuntimeHost {
    fn clear_mount(&self) {
        self.state.surfaces.set(0);
    }

    fn create_surface(&self) -> Result<Box<dyn RuntimeSurface>, SurfaceError> {
        let failures = self.state.surface_failures.get();
        if failures > 0 {
            self.state.surface_failures.set(failures - 1);
            return Err(SurfaceError("mount element missing".to_string()));
        }
        self.state.surfaces.set(self.state.surfaces.get() + 1);
        Ok(Box::new(FakeSurface {
            host: Rc::clone(&self.state),
        }))
    }

    fn inject_script(&self, src: &str) -> Result<ScriptInjection, LoadScriptError> {
        let removed = Rc::new(Cell::new(false));
        self.state.scripts.borrow_mut().push(AttachedScript {
            src: src.to_string(),
            removed: Rc::clone(&removed),
        });
        let loads = self
            .state
            .script_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(true);
        let result = if loads {
            Ok(())
        } else {
            Err(LoadScriptError {
                src: src.to_string(),
            })
        };
        Ok(ScriptInjection {
            node: Box::new(FakeScript { removed }),
            loaded: Box::pin(future::ready(result)),
        })
    }
}

struct FakeScript {
    removed: Rc<Cell<bool>>,
}

impl InjectedScript for FakeScript {
    fn remove(&self) {
        self.removed.set(true);
    }
}

struct FakeSurface {
    host: Rc<HostState>,
}

impl RuntimeSurface for FakeSurface {
    fn instantiate(
        &self,
        config: &RuntimeConfig,
        mut on_progress: ProgressCallback,
    ) -> InstanceFuture {
        self.host.configs.borrow_mut().push(config.clone());
        let plan = self.host.plans.borrow_mut().pop_front();
        match plan {
            Some(Plan::Immediate { steps, outcome }) => {
                for step in steps {
                    on_progress(step);
                }
                Box::pin(future::ready(boxed(outcome)))
            }
            Some(Plan::Pending { handle, receiver }) => {
                *handle.state.on_progress.borrow_mut() = Some(on_progress);
                Box::pin(async move {
                    match receiver.await {
                        Ok(outcome) => boxed(outcome),
                        // Handle dropped unresolved: the runtime never answers
                        Err(_) => future::pending().await,
                    }
                })
            }
            None => Box::pin(future::ready(boxed(Ok(FakeInstance::new(true))))),
        }
    }
}

fn boxed(outcome: Outcome) -> Result<Box<dyn RuntimeInstance>, InstantiationError> {
    outcome.map(|instance| Box::new(instance) as Box<dyn RuntimeInstance>)
}
