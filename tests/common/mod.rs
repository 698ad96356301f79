//! Common test utilities for integration tests
//!
//! Provides a scripted text generator that records every prompt it receives.

#![allow(dead_code)]

use ahp_diagnoser::domain::ports::{GenerationError, TextGenerator};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Deterministic generator: picks a reply by the first rule whose needle
/// appears in the prompt, falling back to `default`.
pub struct ScriptedGenerator {
    rules: Vec<(String, Result<String, GenerationError>)>,
    default: Result<String, GenerationError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            rules: Vec::new(),
            default: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: GenerationError) -> Self {
        Self {
            rules: Vec::new(),
            default: Err(err),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply `text` whenever the prompt contains `needle`.
    pub fn when(mut self, needle: &str, reply: Result<String, GenerationError>) -> Self {
        self.rules.push((needle.to_string(), reply));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map_or_else(|| self.default.clone(), |(_, reply)| reply.clone())
    }
}
