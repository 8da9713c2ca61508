use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::Context;

use futures_channel::oneshot;
use futures_util::future;
use turbo_racing_domain::{FullscreenVendor, Viewport};

use super::{FakeFullscreen, FakeRuntimeHost, FakeViewport};
use crate::ports::outbound::{PageChromePort, SleepPort, SpawnPort};
use crate::state::Platform;

/// Page chrome that remembers whether it is hidden
#[derive(Clone, Default)]
pub struct FakeChrome {
    hidden: Rc<Cell<bool>>,
}

impl FakeChrome {
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }
}

impl PageChromePort for FakeChrome {
    fn set_chrome_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }
}

#[derive(Default)]
struct SleepState {
    requested: RefCell<Vec<u64>>,
    timers: RefCell<Vec<oneshot::Sender<()>>>,
}

/// Timers that only elapse when the test says so
#[derive(Clone, Default)]
pub struct FakeSleep {
    state: Rc<SleepState>,
}

impl FakeSleep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations of every sleep requested so far
    pub fn requested(&self) -> Vec<u64> {
        self.state.requested.borrow().clone()
    }

    /// Elapse every pending timer
    pub fn fire_all(&self) {
        let timers: Vec<_> = self.state.timers.borrow_mut().drain(..).collect();
        for timer in timers {
            let _ = timer.send(());
        }
    }
}

impl SleepPort for FakeSleep {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        let (sender, receiver) = oneshot::channel();
        self.state.requested.borrow_mut().push(ms);
        self.state.timers.borrow_mut().push(sender);
        Box::pin(async move {
            if receiver.await.is_err() {
                future::pending::<()>().await;
            }
        })
    }
}

type DetachedTask = Pin<Box<dyn Future<Output = ()>>>;

/// Holds detached tasks until the test drives them
#[derive(Clone, Default)]
pub struct FakeSpawner {
    tasks: Rc<RefCell<Vec<DetachedTask>>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks spawned and not yet finished
    pub fn detached(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Poll every detached task until a pass makes no task finish
    pub fn run_until_stalled(&self) {
        let waker = futures_util::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        loop {
            let polling: Vec<DetachedTask> = self.tasks.borrow_mut().drain(..).collect();
            let polled = polling.len();
            let mut pending = Vec::with_capacity(polled);
            for mut task in polling {
                if task.as_mut().poll(&mut cx).is_pending() {
                    pending.push(task);
                }
            }
            let finished = polled - pending.len();

            let mut tasks = self.tasks.borrow_mut();
            let spawned: Vec<DetachedTask> = tasks.drain(..).collect();
            let idle = finished == 0 && spawned.is_empty();
            *tasks = pending;
            tasks.extend(spawned);
            if idle {
                break;
            }
        }
    }
}

impl SpawnPort for FakeSpawner {
    fn spawn_local(&self, task: Pin<Box<dyn Future<Output = ()> + 'static>>) {
        self.tasks.borrow_mut().push(task);
    }
}

/// One fake per port, wired into a `Platform`
pub struct FakePlatform {
    pub viewport: FakeViewport,
    pub fullscreen: FakeFullscreen,
    pub host: FakeRuntimeHost,
    pub chrome: FakeChrome,
    pub sleep: FakeSleep,
    pub spawner: FakeSpawner,
}

impl FakePlatform {
    /// Desktop browser with every fullscreen vendor API
    pub fn desktop(user_agent: &str) -> Self {
        Self::with_viewport(FakeViewport::new(
            Some(user_agent),
            Viewport::new(1280.0, 720.0),
        ))
    }

    /// Mobile browser with the given window; every vendor API is present
    /// until the test removes them
    pub fn mobile(user_agent: &str, viewport: Viewport) -> Self {
        Self::with_viewport(FakeViewport::new(Some(user_agent), viewport))
    }

    fn with_viewport(viewport: FakeViewport) -> Self {
        Self {
            viewport,
            fullscreen: FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER),
            host: FakeRuntimeHost::new(),
            chrome: FakeChrome::default(),
            sleep: FakeSleep::new(),
            spawner: FakeSpawner::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform::new(
            self.viewport.clone(),
            self.fullscreen.clone(),
            self.host.clone(),
            self.chrome.clone(),
            self.sleep.clone(),
            self.spawner.clone(),
        )
    }
}
