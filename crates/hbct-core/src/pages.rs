//! # Pages
//!
//! The page/mode selector and the Results view model.
//!
//! | Page | Form | Writes |
//! |------|------|--------|
//! | Home | none | nothing |
//! | Self-Efficacy | confidence slider | `SelfEfficacyAnswer` |
//! | Stages of Change | single choice | `StageOfChange` |
//! | Physical Activity | two sliders | `ExerciseAnswer` |
//! | Results | none | nothing (read only) |

use crate::engine::{Advisory, derive_recommendations};
use crate::{AssessmentState, Category, HbctError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application title.
pub const APP_TITLE: &str = "Health Behavior Change Tracker";

// =============================================================================
// PAGE SELECTOR
// =============================================================================

/// One page of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    SelfEfficacy,
    StagesOfChange,
    PhysicalActivity,
    Results,
}

impl Page {
    /// All pages in menu order.
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::SelfEfficacy,
        Page::StagesOfChange,
        Page::PhysicalActivity,
        Page::Results,
    ];

    /// Label shown in the page selector.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::SelfEfficacy => "Self-Efficacy",
            Page::StagesOfChange => "Stages of Change",
            Page::PhysicalActivity => "Physical Activity",
            Page::Results => "Results",
        }
    }

    /// Heading shown at the top of the page.
    #[must_use]
    pub fn header(&self) -> &'static str {
        match self {
            Page::Home => "Welcome to the Health Behavior Change Tracker",
            Page::SelfEfficacy => "Self-Efficacy Assessment",
            Page::StagesOfChange => "Stages of Change Assessment",
            Page::PhysicalActivity => "Physical Activity Assessment (Exercise Vital Sign)",
            Page::Results => "Health Behavior Change Results",
        }
    }

    /// Introductory paragraph, if the page has one.
    #[must_use]
    pub fn intro(&self) -> Option<&'static str> {
        match self {
            Page::Home => Some(
                "This app helps you measure your health behavior change using theories of \
                 self-efficacy (Bandura, 1986) and stages of change (Prochaska et al., 1992). \
                 It also assesses your physical activity using the Exercise Vital Sign (EVS). \
                 The app will provide personalized recommendations based on your responses.",
            ),
            Page::SelfEfficacy => Some(
                "Self-efficacy refers to an individual's belief in their ability to succeed in \
                 specific situations or accomplish a task. This assessment will help measure your \
                 confidence in making health behavior changes.",
            ),
            Page::StagesOfChange => Some(
                "According to Prochaska et al. (1992), behavior change occurs in stages. This \
                 assessment will help identify your current stage of change for health behaviors.",
            ),
            Page::PhysicalActivity => Some(
                "The Exercise Vital Sign (EVS) is a set of questions that help assess the \
                 frequency and duration of moderate to strenuous exercise you engage in each week.",
            ),
            Page::Results => None,
        }
    }

    /// The category whose form this page shows, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match self {
            Page::SelfEfficacy => Some(Category::SelfEfficacy),
            Page::StagesOfChange => Some(Category::StageOfChange),
            Page::PhysicalActivity => Some(Category::PhysicalActivity),
            Page::Home | Page::Results => None,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and drop separators so "stages-of-change" matches "Stages of Change".
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Page {
    type Err = HbctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Page::ALL
            .into_iter()
            .find(|page| normalize_label(page.label()) == wanted)
            .ok_or_else(|| HbctError::UnknownPage(s.trim().to_string()))
    }
}

// =============================================================================
// RESULTS VIEW
// =============================================================================

/// Echo line for an answered category, `None` if unanswered.
#[must_use]
pub fn answer_summary(state: &AssessmentState, category: Category) -> Option<String> {
    match category {
        Category::SelfEfficacy => state
            .self_efficacy()
            .map(|answer| format!("Self-Efficacy Score: {}", answer.score())),
        Category::StageOfChange => state
            .stage()
            .map(|stage| format!("Stage of Change: {}", stage)),
        Category::PhysicalActivity => state.exercise().map(|answer| {
            format!(
                "Physical Activity: {} days per week, {} minutes per session.",
                answer.frequency_days_per_week, answer.duration_minutes_per_session
            )
        }),
    }
}

/// Everything the Results page shows for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsView {
    /// One line per category: the echoed answer, or its completion prompt.
    pub summary: Vec<String>,
    /// Whether every category is answered.
    pub complete: bool,
    /// Recommendation list. Empty unless `complete`.
    pub recommendations: Vec<Advisory>,
}

impl ResultsView {
    /// Build the view from the current session.
    #[must_use]
    pub fn from_state(state: &AssessmentState) -> Self {
        let summary = Category::ALL
            .into_iter()
            .map(|category| {
                answer_summary(state, category).unwrap_or_else(|| {
                    Advisory::CompleteAssessment(category).text().to_string()
                })
            })
            .collect();

        let complete = state.is_complete();
        let recommendations = if complete {
            derive_recommendations(state)
        } else {
            Vec::new()
        };

        Self {
            summary,
            complete,
            recommendations,
        }
    }

    /// Recommendation lines as plain text.
    #[must_use]
    pub fn recommendation_lines(&self) -> Vec<String> {
        self.recommendations
            .iter()
            .map(|advisory| advisory.text().to_string())
            .collect()
    }
}

impl std::fmt::Display for ResultsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = Page::Results.header();
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "=".repeat(header.len()))?;
        for line in &self.summary {
            writeln!(f, "{}", line)?;
        }

        if self.complete {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for advisory in &self.recommendations {
                if advisory.is_bullet() {
                    writeln!(f, "- {}", advisory)?;
                } else {
                    writeln!(f, "{}", advisory)?;
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
