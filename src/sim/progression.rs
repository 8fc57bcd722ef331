//! Score milestones
//!
//! Score is the only thing that changes level and difficulty. Each milestone
//! fires once, on the frame the score equals its value.

use super::level::LevelId;
use super::state::{GameEvent, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneEffect {
    /// Announce the starting level
    Intro,
    /// Switch levels when currently on `from`
    LevelUp {
        from: LevelId,
        to: LevelId,
        max_spawn: u32,
        spawn_spread: Option<i32>,
        scroll_speed: i32,
    },
    /// Retune the current level
    Tune {
        min_spawn: Option<u32>,
        scroll_speed: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub score: u64,
    pub effect: MilestoneEffect,
}

/// Sorted by score
pub const MILESTONES: [Milestone; 9] = [
    Milestone {
        score: 0,
        effect: MilestoneEffect::Intro,
    },
    Milestone {
        score: 3000,
        effect: MilestoneEffect::LevelUp {
            from: LevelId::One,
            to: LevelId::Two,
            max_spawn: 2,
            spawn_spread: None,
            scroll_speed: 5,
        },
    },
    Milestone {
        score: 6000,
        effect: MilestoneEffect::LevelUp {
            from: LevelId::Two,
            to: LevelId::Three,
            max_spawn: 4,
            spawn_spread: Some(700),
            scroll_speed: 4,
        },
    },
    Milestone {
        score: 7000,
        effect: MilestoneEffect::Tune {
            min_spawn: None,
            scroll_speed: 5,
        },
    },
    Milestone {
        score: 8000,
        effect: MilestoneEffect::Tune {
            min_spawn: Some(1),
            scroll_speed: 6,
        },
    },
    Milestone {
        score: 9000,
        effect: MilestoneEffect::Tune {
            min_spawn: Some(2),
            scroll_speed: 7,
        },
    },
    Milestone {
        score: 10000,
        effect: MilestoneEffect::Tune {
            min_spawn: Some(3),
            scroll_speed: 8,
        },
    },
    Milestone {
        score: 11000,
        effect: MilestoneEffect::Tune {
            min_spawn: None,
            scroll_speed: 9,
        },
    },
    Milestone {
        score: 12000,
        effect: MilestoneEffect::Tune {
            min_spawn: Some(4),
            scroll_speed: 10,
        },
    },
];

/// Fire the next milestone if the score has reached it. At most one fires per call.
pub fn apply_milestones(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    let Some(milestone) = MILESTONES.get(session.next_milestone) else {
        return;
    };
    if session.score != milestone.score {
        return;
    }
    session.next_milestone += 1;

    match milestone.effect {
        MilestoneEffect::Intro => {
            events.push(GameEvent::LevelIntro(session.level));
        }
        MilestoneEffect::LevelUp {
            from,
            to,
            max_spawn,
            spawn_spread,
            scroll_speed,
        } => {
            if session.level != from {
                return;
            }
            session.level = to;
            // New level starts on an empty field
            session.obstacles.clear();
            session.spawn_timer = 0;
            session.scroll_y = 0;
            session.tunables.max_spawn = max_spawn;
            if let Some(spread) = spawn_spread {
                session.tunables.spawn_spread = spread;
            }
            session.tunables.scroll_speed = scroll_speed;
            log::info!(
                "Level up at score {}: {} ({})",
                session.score,
                to.descriptor().title,
                to.descriptor().name
            );
            events.push(GameEvent::LevelUp(to));
        }
        MilestoneEffect::Tune {
            min_spawn,
            scroll_speed,
        } => {
            if let Some(min) = min_spawn {
                session.tunables.min_spawn = min;
            }
            session.tunables.scroll_speed = scroll_speed;
            log::debug!(
                "Difficulty step at score {}: speed {}, min spawn {}",
                session.score,
                scroll_speed,
                session.tunables.min_spawn
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    fn at_score(score: u64, next: usize, level: LevelId) -> GameSession {
        let mut s = GameSession::new(3, Difficulty::Mid);
        s.score = score;
        s.next_milestone = next;
        s.level = level;
        s
    }

    #[test]
    fn test_milestones_sorted() {
        assert!(MILESTONES.windows(2).all(|w| w[0].score < w[1].score));
    }

    #[test]
    fn test_intro_fires_once() {
        let mut s = at_score(0, 0, LevelId::One);
        let mut events = Vec::new();
        apply_milestones(&mut s, &mut events);
        apply_milestones(&mut s, &mut events);
        assert_eq!(events, vec![GameEvent::LevelIntro(LevelId::One)]);
    }

    #[test]
    fn test_level_two_transition() {
        let mut s = at_score(3000, 1, LevelId::One);
        let mut events = Vec::new();
        apply_milestones(&mut s, &mut events);
        assert_eq!(s.level, LevelId::Two);
        assert_eq!(s.tunables.max_spawn, 2);
        assert_eq!(s.tunables.scroll_speed, 5);
        assert_eq!(events, vec![GameEvent::LevelUp(LevelId::Two)]);

        // Same score again (e.g. after pause/resume) must not re-fire
        events.clear();
        apply_milestones(&mut s, &mut events);
        assert!(events.is_empty());
        assert_eq!(s.next_milestone, 2);
    }

    #[test]
    fn test_level_three_transition() {
        let mut s = at_score(6000, 2, LevelId::Two);
        let mut events = Vec::new();
        apply_milestones(&mut s, &mut events);
        assert_eq!(s.level, LevelId::Three);
        assert_eq!(s.tunables.spawn_spread, 700);
        assert_eq!(s.tunables.max_spawn, 4);
        assert_eq!(s.tunables.scroll_speed, 4);
    }

    #[test]
    fn test_level_up_requires_source_level() {
        let mut s = at_score(6000, 2, LevelId::One);
        let mut events = Vec::new();
        apply_milestones(&mut s, &mut events);
        assert_eq!(s.level, LevelId::One);
        assert!(events.is_empty());
        assert_eq!(s.next_milestone, 3);
    }

    #[test]
    fn test_tuning_steps() {
        let expected = [
            (7000, 0, 5),
            (8000, 1, 6),
            (9000, 2, 7),
            (10000, 3, 8),
            (11000, 3, 9),
            (12000, 4, 10),
        ];
        let mut s = at_score(0, 3, LevelId::Three);
        for (score, min_spawn, speed) in expected {
            s.score = score;
            apply_milestones(&mut s, &mut Vec::new());
            assert_eq!(s.tunables.min_spawn, min_spawn, "score {score}");
            assert_eq!(s.tunables.scroll_speed, speed, "score {score}");
        }
        assert_eq!(s.next_milestone, MILESTONES.len());
    }

    #[test]
    fn test_between_milestones_is_noop() {
        let mut s = at_score(4500, 2, LevelId::Two);
        let before = s.tunables;
        let mut events = Vec::new();
        apply_milestones(&mut s, &mut events);
        assert_eq!(s.tunables, before);
        assert_eq!(s.next_milestone, 2);
    }
}
