//! Shell integration hooks: footer year and the newsletter form.
//!
//! Hooks run after every splice. They are idempotent, so re-running them on
//! unchanged content is harmless.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Delay simulating the subscribe round trip.
const SUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

/// How long the confirmation stays up before the form resets.
const CONFIRM_HOLD: Duration = Duration::from_secs(3);

/// Current calendar year (UTC), from the civil-from-days algorithm.
pub fn current_year() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64;
    year_from_unix(secs)
}

fn year_from_unix(secs: i64) -> i32 {
    let days = secs.div_euclid(86_400);
    // Howard Hinnant's civil_from_days, year component only
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (if m <= 2 { y + 1 } else { y }) as i32
}

/// Count newsletter forms in a mounted region.
pub fn count_newsletter_forms(mounted: &str) -> usize {
    mounted.matches("newsletter-form").count()
}

// ============================================================================
// Newsletter form state machine
// ============================================================================

/// Submission phases of one newsletter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterPhase {
    Idle,
    Subscribing,
    Subscribed,
}

/// One newsletter form instance.
///
/// Driven by [`submit`](NewsletterForm::submit) and elapsed-time ticks; the
/// form refuses re-entry while a submission is in flight and resets itself
/// after the confirmation hold.
#[derive(Debug, Clone)]
pub struct NewsletterForm {
    phase: NewsletterPhase,
    /// Time left in the current timed phase
    remaining: Duration,
    email: String,
}

impl Default for NewsletterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsletterForm {
    pub fn new() -> Self {
        Self {
            phase: NewsletterPhase::Idle,
            remaining: Duration::ZERO,
            email: String::new(),
        }
    }

    pub fn phase(&self) -> NewsletterPhase {
        self.phase
    }

    /// The email field's current value.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: &str) {
        if self.phase == NewsletterPhase::Idle {
            self.email = email.to_string();
        }
    }

    /// Submit the form. Ignored unless idle with a non-empty email.
    pub fn submit(&mut self) -> bool {
        if self.phase != NewsletterPhase::Idle || self.email.trim().is_empty() {
            return false;
        }
        self.phase = NewsletterPhase::Subscribing;
        self.remaining = SUBSCRIBE_DELAY;
        true
    }

    /// Advance the form's timers by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut elapsed = elapsed;
        loop {
            match self.phase {
                NewsletterPhase::Idle => return,
                NewsletterPhase::Subscribing => {
                    if elapsed < self.remaining {
                        self.remaining -= elapsed;
                        return;
                    }
                    elapsed -= self.remaining;
                    // Confirmation clears the email field right away
                    self.phase = NewsletterPhase::Subscribed;
                    self.remaining = CONFIRM_HOLD;
                    self.email.clear();
                }
                NewsletterPhase::Subscribed => {
                    if elapsed < self.remaining {
                        self.remaining -= elapsed;
                        return;
                    }
                    self.phase = NewsletterPhase::Idle;
                    self.remaining = Duration::ZERO;
                    return;
                }
            }
        }
    }

    /// Button label for the current phase.
    pub fn button_label(&self) -> &'static str {
        match self.phase {
            NewsletterPhase::Idle => "Subscribe",
            NewsletterPhase::Subscribing => "Subscribing...",
            NewsletterPhase::Subscribed => "Subscribed!",
        }
    }

    /// Whether the submit button accepts input.
    pub fn button_enabled(&self) -> bool {
        self.phase == NewsletterPhase::Idle
    }
}
