//! Recording fakes for the engine boundary.
use crate::config::ModelDefaults;
use crate::engine::{EditEngine, EngineProvider, EngineRequest};
use crate::error::EngineError;
use crate::files::FileContentMap;
use std::cell::RefCell;
use std::rc::Rc;

/// What a provider was asked to build: model, key, allow_edits.
pub type RecordedRequest = (String, Option<String>, bool);

type CallLog = Rc<RefCell<Vec<(String, FileContentMap)>>>;

#[derive(Default)]
pub struct FakeProvider {
    requests: RefCell<Vec<RecordedRequest>>,
    calls: CallLog,
    fail_on: Option<String>,
    setup_error: Option<fn() -> EngineError>,
}

impl FakeProvider {
    /// Engines from this provider fail when given `prompt`.
    pub fn failing_on(prompt: &str) -> Self {
        Self {
            fail_on: Some(prompt.to_string()),
            ..Self::default()
        }
    }

    /// Every `build` fails with the error from `make`.
    pub fn rejecting(make: fn() -> EngineError) -> Self {
        Self {
            setup_error: Some(make),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls(&self) -> Vec<(String, FileContentMap)> {
        self.calls.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }
}

impl EngineProvider for FakeProvider {
    fn build(&self, request: &EngineRequest<'_>) -> Result<Box<dyn EditEngine>, EngineError> {
        self.requests.borrow_mut().push((
            request.model.to_string(),
            request.api_key.map(str::to_string),
            request.allow_edits,
        ));
        if let Some(make) = self.setup_error {
            return Err(make());
        }
        Ok(Box::new(RecordingEngine {
            calls: Rc::clone(&self.calls),
            fail_on: self.fail_on.clone(),
        }))
    }
}

struct RecordingEngine {
    calls: CallLog,
    fail_on: Option<String>,
}

impl EditEngine for RecordingEngine {
    fn execute_prompt(&self, prompt: &str, files: &FileContentMap) -> Result<(), EngineError> {
        self.calls
            .borrow_mut()
            .push((prompt.to_string(), files.clone()));
        if self.fail_on.as_deref() == Some(prompt) {
            return Err(EngineError::ExecutionFailed {
                code: "ENG-test".to_string(),
                message: format!("engine rejected {prompt}"),
                source: None,
            });
        }
        Ok(())
    }
}

pub fn model_defaults(name: &str) -> ModelDefaults {
    ModelDefaults {
        name: Some(name.to_string()),
        api_key: None,
    }
}
