/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockTranslator::working()` - Succeeds, looking translations up in a
 *   mapping table and echoing unmapped text unchanged
 * - `MockTranslator::failing()` - Always fails with an API error
 * - `MockTranslator::failing_for(text)` - Fails only for one specific input
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Translate via the mapping table; unmapped text is echoed unchanged
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails only when the input equals the given text
    FailingFor(String),
}

/// Mock backend for testing engine and controller behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Translation table consulted in `Working` mode
    mapping: HashMap<String, String>,
    /// Number of translate calls made, shared across clones
    call_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            mapping: HashMap::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that echoes unmapped text
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for one specific input
    pub fn failing_for(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailingFor(text.into()))
    }

    /// Add a source-to-translation pair to the mapping table
    pub fn with_mapping(mut self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.mapping.insert(source.into(), translated.into());
        self
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the shared call counter, usable after the mock is boxed
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            mapping: self.mapping.clone(),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(self
                .mapping
                .get(text)
                .cloned()
                .unwrap_or_else(|| text.to_string())),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::FailingFor(target) => {
                if text == target {
                    Err(ProviderError::ApiError {
                        status_code: 500,
                        message: format!("Simulated failure for '{}'", target),
                    })
                } else {
                    Ok(self
                        .mapping
                        .get(text)
                        .cloned()
                        .unwrap_or_else(|| text.to_string()))
                }
            }
        }
    }
}
