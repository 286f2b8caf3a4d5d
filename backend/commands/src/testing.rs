//! In-memory collaborators shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use mowa_browser::SearchEngine;
use mowa_core::{
    Browser, CaptureError, Notify, SpeechCapture, SystemControl, SystemError, WeatherClient,
    WeatherReport,
};

use crate::dispatch::{CommandDispatcher, Services};
use crate::registry::CommandTable;
use crate::types::{ActionContext, Flow, Handler, NullaryAction, UnaryAction};
use crate::{builtin_table, BuiltinOptions};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

struct Noop;

#[async_trait]
impl NullaryAction for Noop {
    async fn run(&self, _ctx: &mut ActionContext<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

#[async_trait]
impl UnaryAction for Noop {
    async fn run(&self, _ctx: &mut ActionContext<'_>, _param: &str) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

pub fn noop_nullary() -> Handler {
    Handler::Nullary(Arc::new(Noop))
}

pub fn noop_unary() -> Handler {
    Handler::Unary(Arc::new(Noop))
}

/// Records every invocation.
#[derive(Clone, Default)]
pub struct CountingAction {
    calls: Arc<Mutex<usize>>,
    params: Arc<Mutex<Vec<String>>>,
}

impl CountingAction {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn params(&self) -> Vec<String> {
        self.params.lock().unwrap().clone()
    }
}

#[async_trait]
impl NullaryAction for CountingAction {
    async fn run(&self, _ctx: &mut ActionContext<'_>) -> Result<Flow> {
        *self.calls.lock().unwrap() += 1;
        Ok(Flow::Continue)
    }
}

#[async_trait]
impl UnaryAction for CountingAction {
    async fn run(&self, _ctx: &mut ActionContext<'_>, param: &str) -> Result<Flow> {
        *self.calls.lock().unwrap() += 1;
        self.params.lock().unwrap().push(param.to_string());
        Ok(Flow::Continue)
    }
}

pub struct FailingAction;

#[async_trait]
impl NullaryAction for FailingAction {
    async fn run(&self, _ctx: &mut ActionContext<'_>) -> Result<Flow> {
        Err(anyhow!("collaborator failed"))
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    spoken: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notify for RecordingNotifier {
    async fn speak(&self, text: &str) -> Result<()> {
        if self.fail {
            bail!("speech synthesis unavailable");
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeWeather {
    reports: Mutex<HashMap<String, WeatherReport>>,
}

impl FakeWeather {
    pub fn set(&self, city: &str, report: WeatherReport) {
        self.reports.lock().unwrap().insert(city.to_string(), report);
    }
}

#[async_trait]
impl WeatherClient for FakeWeather {
    async fn get_weather(&self, city: &str) -> Option<WeatherReport> {
        self.reports.lock().unwrap().get(city).cloned()
    }
}

#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Browser for RecordingBrowser {
    async fn open_url(&self, url: &str) -> Result<()> {
        if self.fail {
            bail!("no browser available");
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSystem {
    mute_calls: Mutex<Vec<bool>>,
    launched: Mutex<Vec<String>>,
    unsupported: bool,
    fail_launch: bool,
}

impl RecordingSystem {
    pub fn mute_calls(&self) -> Vec<bool> {
        self.mute_calls.lock().unwrap().clone()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemControl for RecordingSystem {
    async fn set_muted(&self, muted: bool) -> Result<(), SystemError> {
        if self.unsupported {
            return Err(SystemError::Unsupported { os: "plan9".into() });
        }
        self.mute_calls.lock().unwrap().push(muted);
        Ok(())
    }

    async fn launch(&self, target: &str) -> Result<(), SystemError> {
        if self.fail_launch {
            return Err(SystemError::CommandFailed {
                command: "sh".into(),
                message: format!("{target}: not found"),
            });
        }
        self.launched.lock().unwrap().push(target.to_string());
        Ok(())
    }
}

/// Replays a fixed sequence of capture results, then reports closed input.
pub struct ScriptedCapture {
    script: VecDeque<Result<String, CaptureError>>,
}

impl ScriptedCapture {
    pub fn new(script: Vec<Result<String, CaptureError>>) -> Self {
        Self { script: script.into() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn listen(&mut self) -> Result<String, CaptureError> {
        self.script.pop_front().unwrap_or(Err(CaptureError::Closed))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub fn test_options() -> BuiltinOptions {
    BuiltinOptions::new(SearchEngine::default(), "test-music", "test-clock")
}

pub fn builtin_test_table() -> CommandTable {
    builtin_table(&test_options()).unwrap()
}

pub struct Harness {
    pub notifier: Arc<RecordingNotifier>,
    pub weather: Arc<FakeWeather>,
    pub browser: Arc<RecordingBrowser>,
    pub system: Arc<RecordingSystem>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(RecordingNotifier::default(), RecordingBrowser::default(), RecordingSystem::default())
    }

    pub fn with_failing_browser() -> Self {
        let browser = RecordingBrowser { fail: true, ..Default::default() };
        Self::build(RecordingNotifier::default(), browser, RecordingSystem::default())
    }

    pub fn with_unsupported_mute() -> Self {
        let system = RecordingSystem { unsupported: true, ..Default::default() };
        Self::build(RecordingNotifier::default(), RecordingBrowser::default(), system)
    }

    pub fn with_failing_launcher() -> Self {
        let system = RecordingSystem { fail_launch: true, ..Default::default() };
        Self::build(RecordingNotifier::default(), RecordingBrowser::default(), system)
    }

    /// Every `speak` call fails.
    pub fn with_failing_notifier() -> Self {
        let notifier = RecordingNotifier { fail: true, ..Default::default() };
        Self::build(notifier, RecordingBrowser::default(), RecordingSystem::default())
    }

    fn build(notifier: RecordingNotifier, browser: RecordingBrowser, system: RecordingSystem) -> Self {
        Self {
            notifier: Arc::new(notifier),
            weather: Arc::new(FakeWeather::default()),
            browser: Arc::new(browser),
            system: Arc::new(system),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            notifier: self.notifier.clone(),
            weather: self.weather.clone(),
            browser: self.browser.clone(),
            system: self.system.clone(),
        }
    }

    /// A dispatcher over the built-in table wired to this harness.
    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(builtin_test_table(), self.services())
    }
}
