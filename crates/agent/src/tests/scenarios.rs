//! End-to-end scenarios for the answering loop, driven by scripted
//! collaborator doubles.

use crate::{RihlaAgent, MAX_ATTEMPTS};
use rihla_core::{AppError, AppResult};
use rihla_index::{EmbeddingProvider, FlatIndex, Passage, PassageStore};
use rihla_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use rihla_prompt::{
    index_unavailable_message, no_information_message, unsupported_language_message, Language,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const GRADER_PREFIXES: [&str; 2] = ["You are a grader", "أنت مُقيّم"];
const REWRITER_PREFIXES: [&str; 2] = ["You are a query rewriter", "أنت مُعيد"];

/// Pull the document text out of a rendered grading prompt, so markers are
/// matched against the candidate alone and never against the question.
fn graded_document(prompt: &str) -> Option<&str> {
    for (open, close) in [("Document: ", "\nQuestion:"), ("الوثيقة: ", "\nالسؤال:")] {
        if let Some(start) = prompt.find(open) {
            let rest = &prompt[start + open.len()..];
            if let Some(end) = rest.find(close) {
                return Some(&rest[..end]);
            }
        }
    }
    None
}

/// Scripted LLM double.
///
/// Classifies each prompt by its template prefix: grading prompts answer
/// "yes" when the prompt contains `relevant_marker` (error when it contains
/// `fail_marker`), rewrite prompts pop the next scripted rewrite, everything
/// else returns `answer`.
struct ScriptedLlm {
    prompts: Mutex<Vec<String>>,
    rewrites: Mutex<VecDeque<String>>,
    relevant_marker: Option<String>,
    fail_marker: Option<String>,
    answer: String,
}

impl ScriptedLlm {
    fn new(answer: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            rewrites: Mutex::new(VecDeque::new()),
            relevant_marker: None,
            fail_marker: None,
            answer: answer.to_string(),
        }
    }

    fn with_relevant_marker(mut self, marker: &str) -> Self {
        self.relevant_marker = Some(marker.to_string());
        self
    }

    fn with_fail_marker(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    fn with_rewrites(self, rewrites: &[&str]) -> Self {
        *self.rewrites.lock().unwrap() = rewrites.iter().map(|s| s.to_string()).collect();
        self
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn prompts_with_prefix(&self, prefixes: &[&str]) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| prefixes.iter().any(|prefix| p.starts_with(prefix)))
            .collect()
    }

    fn generation_prompts(&self) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| {
                !GRADER_PREFIXES.iter().any(|prefix| p.starts_with(prefix))
                    && !REWRITER_PREFIXES.iter().any(|prefix| p.starts_with(prefix))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let content = if GRADER_PREFIXES
            .iter()
            .any(|prefix| request.prompt.starts_with(prefix))
        {
            let document = graded_document(&request.prompt).unwrap_or("");

            if let Some(ref marker) = self.fail_marker {
                if document.contains(marker) {
                    return Err(AppError::Llm("scripted grading failure".to_string()));
                }
            }

            match self.relevant_marker {
                Some(ref marker) if document.contains(marker) => "yes".to_string(),
                _ => "no".to_string(),
            }
        } else if REWRITER_PREFIXES
            .iter()
            .any(|prefix| request.prompt.starts_with(prefix))
        {
            self.rewrites
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::Llm("no scripted rewrite left".to_string()))?
        } else {
            self.answer.clone()
        };

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
            done: true,
        })
    }
}

/// Encoder double returning a fixed vector and counting calls.
#[derive(Debug)]
struct FixedEncoder {
    vector: Vec<f32>,
    calls: AtomicUsize,
}

impl FixedEncoder {
    fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FixedEncoder {
    fn provider_name(&self) -> &str {
        "fixed"
    }

    fn model_name(&self) -> &str {
        "fixed-test"
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(vec![self.vector.clone(); texts.len()])
    }
}

/// Ten passages with one-hot embeddings; a query of descending weights
/// retrieves them in index order.
fn ten_passage_store(texts: &[&str]) -> PassageStore {
    assert_eq!(texts.len(), 10);

    let mut index = FlatIndex::new(10).unwrap();
    let passages = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let mut row = vec![0.0f32; 10];
            row[i] = 1.0;
            index.add(&row).unwrap();
            Passage {
                text: text.to_string(),
                metadata: HashMap::new(),
            }
        })
        .collect();

    PassageStore::from_parts(passages, index, "fixed-test").unwrap()
}

fn descending_query() -> Vec<f32> {
    (0..10).map(|i| 1.0 - 0.05 * i as f32).collect()
}

fn english_agent(llm: Arc<ScriptedLlm>, encoder: Arc<FixedEncoder>, store: PassageStore) -> RihlaAgent {
    let mut stores = HashMap::new();
    stores.insert(Language::English, Arc::new(store));
    RihlaAgent::new(llm, encoder, stores, "test-model")
}

fn plain_texts() -> Vec<&'static str> {
    vec![
        "The Atlas mountains cross Morocco.",
        "Petra was carved into rose-red sandstone.",
        "Couscous is a staple across North Africa.",
        "Petra's treasury appears at the end of the Siq.",
        "The Nabataeans built Petra as a caravan hub.",
        "The Nile flows north through Egypt.",
        "Carthage lies near modern Tunis.",
        "Date palms grow across the region's oases.",
        "Petra is Jordan's most visited site.",
        "The souks of Fes are a maze of workshops.",
    ]
}

#[tokio::test]
async fn unavailable_index_returns_apology_without_collaborator_calls() {
    let llm = Arc::new(ScriptedLlm::new("unused"));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));

    // No store loaded for any language
    let agent = RihlaAgent::new(llm.clone(), encoder.clone(), HashMap::new(), "test-model");

    let answer = agent.ask("What is Petra?").await;

    assert_eq!(answer, index_unavailable_message(Language::English));
    assert_eq!(encoder.calls(), 0);
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn empty_artifact_pair_degrades_to_apology() {
    use rihla_index::{artifact_paths, PassageFile};

    let temp = tempfile::TempDir::new().unwrap();
    let (vec_path, json_path) = artifact_paths(temp.path(), "english");
    std::fs::write(&vec_path, Vec::<u8>::new()).unwrap();
    let file = PassageFile {
        model: "fixed-test".to_string(),
        dimensions: 10,
        built_at: None,
        passages: vec![],
    };
    std::fs::write(&json_path, serde_json::to_string(&file).unwrap()).unwrap();

    // Zero-passage pair fails to load, so the language has no store
    assert!(PassageStore::load(&vec_path, &json_path).is_err());

    let llm = Arc::new(ScriptedLlm::new("unused"));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = RihlaAgent::new(llm.clone(), encoder.clone(), HashMap::new(), "test-model");

    let answer = agent.ask("anything").await;

    assert_eq!(answer, index_unavailable_message(Language::English));
    assert_eq!(encoder.calls(), 0);
}

#[tokio::test]
async fn relevant_subset_is_generated_from_in_order() {
    let texts = plain_texts();
    let llm = Arc::new(ScriptedLlm::new("Petra is an ancient Nabataean city in Jordan.")
        .with_relevant_marker("Petra"));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = english_agent(llm.clone(), encoder.clone(), ten_passage_store(&texts));

    let answer = agent.ask("What is Petra?").await;

    assert_eq!(answer, "Petra is an ancient Nabataean city in Jordan.");

    // Grading saw all ten candidates
    assert_eq!(llm.prompts_with_prefix(&GRADER_PREFIXES).len(), 10);

    // Exactly one generation call, with exactly the four relevant texts,
    // double-newline separated, in retrieval order
    let generations = llm.generation_prompts();
    assert_eq!(generations.len(), 1);
    let expected_context = [texts[1], texts[3], texts[4], texts[8]].join("\n\n");
    assert!(generations[0].contains(&expected_context));

    // A single retrieval round
    assert_eq!(encoder.calls(), 1);
}

#[tokio::test]
async fn never_relevant_question_exhausts_after_three_rounds() {
    let llm = Arc::new(
        ScriptedLlm::new("unused").with_rewrites(&["rose city jordan", "nabataean capital"]),
    );
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = english_agent(llm.clone(), encoder.clone(), ten_passage_store(&plain_texts()));

    let answer = agent.ask("tell me about the thing").await;

    assert_eq!(answer, no_information_message(Language::English));

    // Exactly MAX_ATTEMPTS retrieval rounds, MAX_ATTEMPTS - 1 rewrites,
    // and no generation
    assert_eq!(encoder.calls(), MAX_ATTEMPTS);
    assert_eq!(
        llm.prompts_with_prefix(&REWRITER_PREFIXES).len(),
        MAX_ATTEMPTS - 1
    );
    assert!(llm.generation_prompts().is_empty());
}

#[tokio::test]
async fn unsupported_language_short_circuits() {
    let llm = Arc::new(ScriptedLlm::new("unused"));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = english_agent(llm.clone(), encoder.clone(), ten_passage_store(&plain_texts()));

    let answer = agent.ask("ペトラとは何ですか").await;

    assert_eq!(answer, unsupported_language_message());
    assert_eq!(encoder.calls(), 0);
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn duplicate_rewrite_terminates_on_next_check() {
    // The rewriter echoes the original question back
    let llm = Arc::new(ScriptedLlm::new("unused").with_rewrites(&["same old question"]));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = english_agent(llm.clone(), encoder.clone(), ten_passage_store(&plain_texts()));

    let answer = agent.ask("same old question").await;

    assert_eq!(answer, no_information_message(Language::English));

    // Two retrieval rounds (original + echoed rewrite), one rewrite call,
    // then the duplicate check stops the loop without another LLM call
    assert_eq!(encoder.calls(), 2);
    assert_eq!(llm.prompts_with_prefix(&REWRITER_PREFIXES).len(), 1);
}

#[tokio::test]
async fn grading_failure_drops_only_that_candidate() {
    let mut texts = plain_texts();
    texts[1] = "BROKEN Petra passage that the grader cannot judge.";

    let llm = Arc::new(
        ScriptedLlm::new("Petra answer.")
            .with_relevant_marker("Petra")
            .with_fail_marker("BROKEN"),
    );
    let encoder = Arc::new(FixedEncoder::new(descending_query()));
    let agent = english_agent(llm.clone(), encoder.clone(), ten_passage_store(&texts));

    let answer = agent.ask("What is Petra?").await;

    assert_eq!(answer, "Petra answer.");

    let generations = llm.generation_prompts();
    assert_eq!(generations.len(), 1);
    assert!(!generations[0].contains("BROKEN"));

    // The failing candidate was dropped; the other Petra passages survived
    let expected_context = [texts[3], texts[4], texts[8]].join("\n\n");
    assert!(generations[0].contains(&expected_context));
}

#[tokio::test]
async fn asking_twice_is_idempotent() {
    let texts = plain_texts();

    let make_agent = || {
        let llm =
            Arc::new(ScriptedLlm::new("Petra is in Jordan.").with_relevant_marker("Petra"));
        let encoder = Arc::new(FixedEncoder::new(descending_query()));
        english_agent(llm, encoder, ten_passage_store(&texts))
    };

    let first = make_agent().ask("What is Petra?").await;
    let second = make_agent().ask("What is Petra?").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn arabic_question_uses_arabic_pipeline() {
    let arabic_texts = vec![
        "تقع جبال الأطلس في المغرب.",
        "البتراء مدينة منحوتة في الصخر الوردي.",
        "الكسكس طبق شائع في شمال أفريقيا.",
        "تظهر خزنة البتراء في نهاية السيق.",
        "بنى الأنباط مدينة البتراء كمركز للقوافل.",
        "يجري نهر النيل شمالاً عبر مصر.",
        "تقع قرطاج قرب تونس العاصمة.",
        "تنمو أشجار النخيل في الواحات.",
        "البتراء أكثر المواقع زيارة في الأردن.",
        "أسواق فاس متاهة من الورش.",
    ];

    let llm = Arc::new(
        ScriptedLlm::new("البتراء مدينة أثرية في الأردن.").with_relevant_marker("البتراء"),
    );
    let encoder = Arc::new(FixedEncoder::new(descending_query()));

    let mut stores = HashMap::new();
    stores.insert(
        Language::Arabic,
        Arc::new(ten_passage_store(&arabic_texts)),
    );
    let agent = RihlaAgent::new(llm.clone(), encoder.clone(), stores, "test-model");

    let answer = agent.ask("ما هي البتراء؟").await;

    assert_eq!(answer, "البتراء مدينة أثرية في الأردن.");
    assert_eq!(llm.prompts_with_prefix(&GRADER_PREFIXES).len(), 10);
    assert_eq!(llm.generation_prompts().len(), 1);
}

#[tokio::test]
async fn english_question_with_only_arabic_store_gets_apology() {
    let llm = Arc::new(ScriptedLlm::new("unused"));
    let encoder = Arc::new(FixedEncoder::new(descending_query()));

    let mut stores = HashMap::new();
    stores.insert(
        Language::Arabic,
        Arc::new(ten_passage_store(&[
            "أ", "ب", "ت", "ث", "ج", "ح", "خ", "د", "ذ", "ر",
        ])),
    );
    let agent = RihlaAgent::new(llm.clone(), encoder.clone(), stores, "test-model");

    let answer = agent.ask("What is Petra?").await;

    assert_eq!(answer, index_unavailable_message(Language::English));
    assert_eq!(encoder.calls(), 0);
}
