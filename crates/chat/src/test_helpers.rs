//! Shared test helpers for orchestrator tests.

use std::path::Path;
use std::sync::Mutex;
use waguide_core::error::ProviderError;
use waguide_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use waguide_guidance::loader::resolve_path;
use waguide_guidance::{SHARED_GUIDANCE, Topic};

/// A mock provider that answers every call with the same scripted result
/// and records each request it receives.
pub struct ScriptedProvider {
    reply: Result<Option<String>, ProviderError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    /// Reply with `content` as the first choice's message content.
    pub fn replying(content: &str) -> Self {
        Self::with_reply(Ok(Some(content.to_string())))
    }

    /// Reply with a first choice whose content is null.
    pub fn no_content() -> Self {
        Self::with_reply(Ok(None))
    }

    /// Fail every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<Option<String>, ProviderError>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ProviderRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let content = self.reply.clone()?;
        Ok(ProviderResponse {
            content,
            model: "mock-model".into(),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}

/// A temporary guidance root populated with small documents.
pub struct GuidanceFixture {
    dir: tempfile::TempDir,
}

impl GuidanceFixture {
    /// Every topic document plus the shared document.
    pub fn complete() -> Self {
        let fixture = Self::empty();
        fixture.write_topics();
        fixture.write_shared();
        fixture
    }

    /// Topic documents only.
    pub fn topics_only() -> Self {
        let fixture = Self::empty();
        fixture.write_topics();
        fixture
    }

    /// The shared document only.
    pub fn shared_only() -> Self {
        let fixture = Self::empty();
        fixture.write_shared();
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write_topics(&self) {
        for topic in Topic::ALL {
            for entry in topic.guidance() {
                self.write(&resolve_path(entry, self.path()), &format!("\n{topic} guidance text\n"));
            }
        }
    }

    fn write_shared(&self) {
        for entry in SHARED_GUIDANCE {
            self.write(&resolve_path(entry, self.path()), "  shared guidance text  ");
        }
    }

    fn write(&self, path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }
}
