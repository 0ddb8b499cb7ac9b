//! Roast preference quiz.
//!
//! A linear flow over a fixed question sequence; every option maps to one of
//! three roast levels. Completion tallies the answers and picks the level
//! with the strictly highest count; on a tie the earlier level in
//! light/medium/dark order wins, matching the site's long-standing behavior.

use std::fmt;

/// Roast levels, in tally order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roast {
    Light,
    Medium,
    Dark,
}

impl Roast {
    pub const ALL: [Roast; 3] = [Roast::Light, Roast::Medium, Roast::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Roast::Light => "light",
            Roast::Medium => "medium",
            Roast::Dark => "dark",
        }
    }
}

impl fmt::Display for Roast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable answer.
#[derive(Debug, Clone, Copy)]
pub struct QuizOption {
    pub text: &'static str,
    pub value: Roast,
}

/// One question with its options.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [QuizOption],
}

pub static QUESTIONS: [Question; 4] = [
    Question {
        id: "flavor",
        prompt: "What flavor profile do you prefer?",
        options: &[
            QuizOption { text: "Bright & Fruity", value: Roast::Light },
            QuizOption { text: "Balanced & Smooth", value: Roast::Medium },
            QuizOption { text: "Bold & Rich", value: Roast::Dark },
        ],
    },
    Question {
        id: "body",
        prompt: "How do you like your coffee's body?",
        options: &[
            QuizOption { text: "Light & Tea-like", value: Roast::Light },
            QuizOption { text: "Medium & Syrupy", value: Roast::Medium },
            QuizOption { text: "Heavy & Creamy", value: Roast::Dark },
        ],
    },
    Question {
        id: "acidity",
        prompt: "What's your preference for acidity?",
        options: &[
            QuizOption { text: "High - Bright & Tangy", value: Roast::Light },
            QuizOption { text: "Medium - Balanced", value: Roast::Medium },
            QuizOption { text: "Low - Smooth", value: Roast::Dark },
        ],
    },
    Question {
        id: "time",
        prompt: "When do you usually drink coffee?",
        options: &[
            QuizOption { text: "Morning - Need energy", value: Roast::Light },
            QuizOption { text: "Afternoon - Stay focused", value: Roast::Medium },
            QuizOption { text: "After meals - Relaxing", value: Roast::Dark },
        ],
    },
];

/// A fixed result profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub roast: Roast,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: [&'static str; 4],
    pub brew_methods: [&'static str; 3],
}

pub static PROFILES: [Profile; 3] = [
    Profile {
        roast: Roast::Light,
        name: "Light Roast",
        description: "Bright, complex, and aromatic with pronounced origin \
                      characteristics. Perfect for those who appreciate nuanced \
                      flavors and high acidity.",
        characteristics: [
            "Fruity & Floral notes",
            "High caffeine content",
            "Light brown color",
            "Pronounced acidity",
        ],
        brew_methods: ["Pour Over", "Aeropress", "Cold Brew"],
    },
    Profile {
        roast: Roast::Medium,
        name: "Medium Roast",
        description: "The perfect balance between origin flavors and roast \
                      character. Versatile and approachable for most coffee \
                      drinkers.",
        characteristics: [
            "Balanced flavor profile",
            "Moderate acidity",
            "Medium brown color",
            "Caramel sweetness",
        ],
        brew_methods: ["Drip Coffee", "French Press", "Moka Pot"],
    },
    Profile {
        roast: Roast::Dark,
        name: "Dark Roast",
        description: "Bold, full-bodied with rich chocolate and caramel notes. \
                      Lower acidity makes it smooth and easy on the stomach.",
        characteristics: [
            "Bold & Smoky notes",
            "Low acidity",
            "Dark brown to black",
            "Full body",
        ],
        brew_methods: ["Espresso", "French Press", "South Indian Filter"],
    },
];

/// The profile for a roast level.
pub fn profile_for(roast: Roast) -> &'static Profile {
    match roast {
        Roast::Light => &PROFILES[0],
        Roast::Medium => &PROFILES[1],
        Roast::Dark => &PROFILES[2],
    }
}

// ============================================================================
// Quiz state
// ============================================================================

/// One quiz run. Answers accumulate in question order; the current question
/// index is always `answers.len()`.
#[derive(Debug, Clone, Default)]
pub struct Quiz {
    answers: Vec<Roast>,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTIONS.len()
    }

    /// 1-based position and total, for the progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        (
            (self.answers.len() + 1).min(QUESTIONS.len()),
            QUESTIONS.len(),
        )
    }

    /// Rounded progress percentage of the question being shown.
    pub fn progress_percent(&self) -> u32 {
        let (position, total) = self.progress();
        ((position * 100) as f64 / total as f64).round() as u32
    }

    pub fn answers(&self) -> &[Roast] {
        &self.answers
    }

    /// Answer the current question by option index. Returns false when the
    /// quiz is complete or the index is out of range.
    pub fn choose(&mut self, option: usize) -> bool {
        let Some(question) = self.current() else {
            return false;
        };
        let Some(picked) = question.options.get(option) else {
            return false;
        };
        self.answers.push(picked.value);
        true
    }

    /// Answer the current question with a roast value directly.
    pub fn answer(&mut self, roast: Roast) -> bool {
        if self.is_complete() {
            return false;
        }
        self.answers.push(roast);
        true
    }

    /// Step back one question, removing its answer.
    pub fn back(&mut self) -> bool {
        self.answers.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// Answer counts in light/medium/dark order.
    pub fn tally(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for answer in &self.answers {
            match answer {
                Roast::Light => counts[0] += 1,
                Roast::Medium => counts[1] += 1,
                Roast::Dark => counts[2] += 1,
            }
        }
        counts
    }

    /// The result profile, available once every question is answered.
    ///
    /// Strictly-highest count wins; ties keep the earlier roast level.
    pub fn result(&self) -> Option<&'static Profile> {
        if !self.is_complete() {
            return None;
        }
        let counts = self.tally();
        let mut winner = Roast::ALL[0];
        let mut best = counts[0];
        for (roast, count) in Roast::ALL.into_iter().zip(counts).skip(1) {
            if count > best {
                winner = roast;
                best = count;
            }
        }
        Some(profile_for(winner))
    }
}
