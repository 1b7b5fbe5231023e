// 🥊 Scoring Panel - live-match counters
// Two competitors per panel, a score and a penalty counter each. Counters
// are clamped at zero; there is no match lifecycle and no winner
// determination, and panels are not linked to the athlete registry.

use serde::{Deserialize, Serialize};

// ============================================================================
// COMPETITOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub score: u32,
    pub penalties: u32,
}

impl Competitor {
    pub fn new(name: &str) -> Self {
        Competitor {
            name: name.to_string(),
            score: 0,
            penalties: 0,
        }
    }
}

/// Which side of the panel a competitor fights on. Aka is red, shiro is
/// white, per kumite convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorSlot {
    Aka,
    Shiro,
}

/// Which counter an adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    Score,
    Penalties,
}

// ============================================================================
// SCORE PANEL
// ============================================================================

/// Scoring state for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePanel {
    pub match_id: String,
    pub aka: Competitor,
    pub shiro: Competitor,
}

impl ScorePanel {
    pub fn new(match_id: &str) -> Self {
        ScorePanel {
            match_id: match_id.to_string(),
            aka: Competitor::new("Competitor 1"),
            shiro: Competitor::new("Competitor 2"),
        }
    }

    pub fn with_names(match_id: &str, aka: &str, shiro: &str) -> Self {
        ScorePanel {
            match_id: match_id.to_string(),
            aka: Competitor::new(aka),
            shiro: Competitor::new(shiro),
        }
    }

    pub fn competitor(&self, slot: CompetitorSlot) -> &Competitor {
        match slot {
            CompetitorSlot::Aka => &self.aka,
            CompetitorSlot::Shiro => &self.shiro,
        }
    }

    /// Apply a delta to one counter: the counter becomes max(0, old + delta).
    pub fn adjust(&mut self, slot: CompetitorSlot, kind: CounterKind, delta: i32) {
        let competitor = match slot {
            CompetitorSlot::Aka => &mut self.aka,
            CompetitorSlot::Shiro => &mut self.shiro,
        };

        let counter = match kind {
            CounterKind::Score => &mut competitor.score,
            CounterKind::Penalties => &mut competitor.penalties,
        };

        *counter = clamp_add(*counter, delta);
    }

    pub fn adjust_score(&mut self, slot: CompetitorSlot, delta: i32) {
        self.adjust(slot, CounterKind::Score, delta);
    }

    pub fn adjust_penalties(&mut self, slot: CompetitorSlot, delta: i32) {
        self.adjust(slot, CounterKind::Penalties, delta);
    }

    /// Both competitors back to zero
    pub fn reset(&mut self) {
        for competitor in [&mut self.aka, &mut self.shiro] {
            competitor.score = 0;
            competitor.penalties = 0;
        }
    }
}

// max(0, old + delta) without signed overflow on the way
fn clamp_add(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_zeroed() {
        let panel = ScorePanel::new("match-1");

        assert_eq!(panel.aka.score, 0);
        assert_eq!(panel.aka.penalties, 0);
        assert_eq!(panel.shiro.score, 0);
        assert_eq!(panel.shiro.penalties, 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut panel = ScorePanel::new("match-1");

        panel.adjust_score(CompetitorSlot::Aka, 1);
        panel.adjust_score(CompetitorSlot::Aka, 1);
        panel.adjust_score(CompetitorSlot::Aka, -1);
        assert_eq!(panel.aka.score, 1);

        panel.adjust_penalties(CompetitorSlot::Shiro, 1);
        assert_eq!(panel.shiro.penalties, 1);
        // The other side is untouched
        assert_eq!(panel.aka.penalties, 0);
        assert_eq!(panel.shiro.score, 0);
    }

    #[test]
    fn test_counters_never_go_below_zero() {
        let mut panel = ScorePanel::new("match-1");

        panel.adjust_score(CompetitorSlot::Aka, -1);
        assert_eq!(panel.aka.score, 0);

        panel.adjust_score(CompetitorSlot::Aka, 3);
        panel.adjust_score(CompetitorSlot::Aka, -10);
        assert_eq!(panel.aka.score, 0);

        panel.adjust_penalties(CompetitorSlot::Shiro, i32::MIN);
        assert_eq!(panel.shiro.penalties, 0);
    }

    #[test]
    fn test_clamp_for_delta_sequences() {
        // Any sequence of deltas keeps the counter at max(0, running value)
        let deltas = [5, -2, -9, 4, -1, 1, -100, 7];
        let mut panel = ScorePanel::new("match-1");
        let mut expected: i64 = 0;

        for d in deltas {
            panel.adjust_score(CompetitorSlot::Aka, d);
            expected = (expected + d as i64).max(0);
            assert_eq!(panel.aka.score as i64, expected);
        }
    }

    #[test]
    fn test_reset() {
        let mut panel = ScorePanel::with_names("match-1", "John Doe", "David Lee");

        panel.adjust_score(CompetitorSlot::Aka, 4);
        panel.adjust_penalties(CompetitorSlot::Shiro, 2);
        panel.reset();

        assert_eq!(panel.aka.score, 0);
        assert_eq!(panel.shiro.penalties, 0);
        // Names survive a reset
        assert_eq!(panel.aka.name, "John Doe");
    }

    #[test]
    fn test_slot_lookup() {
        let panel = ScorePanel::with_names("match-1", "Aka Fighter", "Shiro Fighter");

        assert_eq!(panel.competitor(CompetitorSlot::Aka).name, "Aka Fighter");
        assert_eq!(
            panel.competitor(CompetitorSlot::Shiro).name,
            "Shiro Fighter"
        );
    }
}
