//! Shared test doubles for workflow integration tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use docflow::oracle::ClassificationPrompt;
use docflow::{AdequacyOracle, ClassificationOracle, JudgmentRequest, Verdict};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Classification oracle returning a fixed label, or failing
pub struct StubClassifier {
    answer: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<ClassificationPrompt>>,
}

impl StubClassifier {
    pub fn answering(label: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(label.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<ClassificationPrompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassificationOracle for StubClassifier {
    async fn classify(&self, prompt: &ClassificationPrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());
        self.answer
            .clone()
            .ok_or_else(|| anyhow!("request timed out"))
    }
}

/// Adequacy oracle with per-item scripted behaviour; unscripted items pass
#[derive(Default)]
pub struct StubJudge {
    inadequate: HashSet<String>,
    broken: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubJudge {
    pub fn approving() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(items: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            inadequate: items.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    pub fn failing_on(items: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            broken: items.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn judged_items(&self) -> Vec<String> {
        let mut items = self.calls.lock().unwrap().clone();
        items.sort();
        items
    }
}

#[async_trait]
impl AdequacyOracle for StubJudge {
    async fn judge(&self, request: &JudgmentRequest) -> Result<Verdict> {
        self.calls.lock().unwrap().push(request.item_name.clone());
        if self.broken.contains(&request.item_name) {
            return Err(anyhow!("quota exceeded"));
        }
        let adequate = !self.inadequate.contains(&request.item_name);
        Ok(Verdict {
            adequate,
            rationale: if adequate {
                "충분함".to_string()
            } else {
                "내용 부족".to_string()
            },
        })
    }
}

pub fn sections(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn sales_visit_sections() -> HashMap<String, String> {
    sections(&[
        ("Customer Overview", "A제약, 영업본부 김부장"),
        ("Project Overview", "2분기 신규 도입 프로젝트"),
        ("Visit & Discussion Content", "5/12 방문, 도입 일정 협의"),
        ("Future Plan & Schedule", "6월 중 견적 제출"),
        ("Cooperation & Shared Items", "마케팅팀 자료 협조 요청"),
    ])
}
