//! Mini-game content and scoring rules.
//!
//! Presentation lives in the web crate; everything that decides a win lives
//! here so it can be tested natively.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::maze::MazeConfig;
use crate::metadata::{CertificationClaim, GameMetadata};

const DEFAULT_MINIGAME_DATA: &str =
    include_str!("../../voyager-web/static/assets/data/minigames.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub hint_text: String,
}

impl QuizConfig {
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(self.correct_answer.trim())
    }

    #[must_use]
    pub fn score(&self, answer: &str) -> (bool, GameMetadata) {
        (
            self.is_correct(answer),
            GameMetadata::Quiz {
                answer: answer.trim().to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapModule {
    pub id: String,
    pub name: String,
    pub scenario: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub modules: Vec<SapModule>,
    pub required_correct_to_win: u32,
}

impl MatchConfig {
    /// Score pairings of `(scenario module id, chosen module id)`.
    #[must_use]
    pub fn score(&self, pairings: &[(String, String)]) -> (bool, GameMetadata) {
        let correct = self
            .modules
            .iter()
            .filter(|module| {
                pairings
                    .iter()
                    .any(|(scenario, chosen)| *scenario == module.id && *chosen == module.id)
            })
            .count();
        let correct = u32::try_from(correct).unwrap_or(u32::MAX);
        (
            correct >= self.required_correct_to_win,
            GameMetadata::Match {
                correct,
                required: self.required_correct_to_win,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub steps: Vec<String>,
}

impl FlowConfig {
    /// Win iff the attempt lists every step in the configured order.
    #[must_use]
    pub fn score(&self, attempt: &[String]) -> (bool, GameMetadata) {
        (
            attempt == self.steps.as_slice(),
            GameMetadata::Flow {
                attempt: attempt.to_vec(),
            },
        )
    }

    /// Steps in a random order for display.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut steps = self.steps.clone();
        for i in (1..steps.len()).rev() {
            let j = rng.gen_range(0..=i);
            steps.swap(i, j);
        }
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapConfig {
    pub timer_seconds: u32,
    pub points_correct: u32,
    pub points_wrong: u32,
    pub win_threshold: u32,
    pub sap_terms: Vec<String>,
    pub dummy_terms: Vec<String>,
}

/// Running score for the fast-tap round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapScore(pub u32);

impl TapConfig {
    #[must_use]
    pub fn is_sap_term(&self, term: &str) -> bool {
        self.sap_terms.iter().any(|t| t == term)
    }

    /// Apply one tap. Wrong taps subtract but never below zero.
    #[must_use]
    pub fn tap(&self, score: TapScore, term: &str, claimed_sap: bool) -> TapScore {
        if self.is_sap_term(term) == claimed_sap {
            TapScore(score.0.saturating_add(self.points_correct))
        } else {
            TapScore(score.0.saturating_sub(self.points_wrong))
        }
    }

    #[must_use]
    pub fn finish(&self, score: TapScore) -> (bool, GameMetadata) {
        (
            score.0 >= self.win_threshold,
            GameMetadata::Tap { score: score.0 },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOption {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelQuestion {
    pub id: String,
    pub title: String,
    pub options: Vec<WheelOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub questions: Vec<WheelQuestion>,
}

impl WheelConfig {
    /// Pick a question and the option the wheel lands on.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&WheelQuestion, &WheelOption)> {
        if self.questions.is_empty() {
            return None;
        }
        let question = &self.questions[rng.gen_range(0..self.questions.len())];
        if question.options.is_empty() {
            return None;
        }
        let option = &question.options[rng.gen_range(0..question.options.len())];
        Some((question, option))
    }

    /// Every spin is a win; the landed option is recorded.
    #[must_use]
    pub fn score(question: &WheelQuestion, option: &WheelOption) -> (bool, GameMetadata) {
        (
            true,
            GameMetadata::Wheel {
                question_id: question.id.clone(),
                option_id: option.id.clone(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationDomain {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationConfig {
    pub domains: Vec<CertificationDomain>,
    #[serde(default)]
    pub reward_base_url: Option<String>,
}

impl CertificationConfig {
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&CertificationDomain> {
        self.domains.iter().find(|domain| domain.name == name)
    }

    /// Claim a voucher. Always a win once a listed voucher is chosen.
    #[must_use]
    pub fn claim(&self, domain: &str, voucher: &str) -> Option<(bool, GameMetadata)> {
        let listed = self
            .domain(domain)
            .is_some_and(|d| d.options.iter().any(|option| option == voucher));
        if !listed {
            return None;
        }
        let reward_link = self
            .reward_base_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), slug(voucher)));
        Some((
            true,
            GameMetadata::Certification(CertificationClaim {
                domain: domain.to_string(),
                voucher: voucher.to_string(),
                reward_link,
            }),
        ))
    }
}

/// Field ids for the purchase order header.
pub const VENDOR_FIELD: &str = "vendor";
pub const CURRENCY_FIELD: &str = "currency";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    pub qty: String,
    /// Set when the quantity is one of the planted mistakes.
    #[serde(default)]
    pub error_id: Option<String>,
}

impl OrderLine {
    /// Id reported when the quantity is flagged.
    #[must_use]
    pub fn field_id(&self) -> &str {
        self.error_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub po_number: String,
    #[serde(default)]
    pub vendor: Option<String>,
    pub currency_shown: String,
    pub currency_expected: String,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpotScenario {
    pub id: String,
    pub errors: Vec<String>,
    pub document: PurchaseOrder,
}

impl ErrorSpotScenario {
    /// Win iff the flagged set is exactly the planted mistakes.
    #[must_use]
    pub fn score(&self, flagged: &BTreeSet<String>) -> (bool, GameMetadata) {
        let planted: BTreeSet<&str> = self.errors.iter().map(String::as_str).collect();
        let found = flagged.iter().filter(|f| planted.contains(f.as_str())).count();
        let false_flags = flagged.len() - found;
        let to_u32 = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        (
            found == planted.len() && false_flags == 0,
            GameMetadata::ErrorSpot {
                scenario_id: self.id.clone(),
                found: to_u32(found),
                total: to_u32(planted.len()),
                false_flags: to_u32(false_flags),
            },
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpotConfig {
    pub scenarios: Vec<ErrorSpotScenario>,
}

impl ErrorSpotConfig {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ErrorSpotScenario> {
        if self.scenarios.is_empty() {
            return None;
        }
        self.scenarios.get(rng.gen_range(0..self.scenarios.len()))
    }
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Content for every mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameConfig {
    pub quiz: QuizConfig,
    #[serde(rename = "match")]
    pub module_match: MatchConfig,
    pub flow: FlowConfig,
    pub tap: TapConfig,
    pub wheel: WheelConfig,
    pub certification: CertificationConfig,
    pub maze: MazeConfig,
    #[serde(default, rename = "errorSpot")]
    pub error_spot: ErrorSpotConfig,
}

impl MiniGameConfig {
    /// # Errors
    ///
    /// Returns the JSON error for a malformed document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the content embedded with the web assets.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, serde_json::Error> {
        Self::from_json(DEFAULT_MINIGAME_DATA)
    }
}
