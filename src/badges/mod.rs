use std::collections::HashSet;
use crate::profile::{Badge, BadgeRarity, UserProfile};
use crate::sessions::{self, PerformanceObservation};

/// Observations in the rolling accuracy window.
pub const ACCURACY_WINDOW: usize = 10;

struct BadgeSpec {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    rarity: BadgeRarity,
}

impl BadgeSpec {
    fn award(&self, now: i64) -> Badge {
        Badge {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            unlocked_at: now,
            rarity: self.rarity,
        }
    }
}

const fn spec(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    rarity: BadgeRarity,
) -> BadgeSpec {
    BadgeSpec { id, name, description, icon, rarity }
}

/// (exact streak length, badge)
static STREAK_BADGES: [(u32, BadgeSpec); 4] = [
    (3, spec("streak_3", "¡Primera Racha!", "3 días seguidos", "🔥", BadgeRarity::Common)),
    (7, spec("streak_7", "¡Una Semana!", "7 días seguidos", "📅", BadgeRarity::Rare)),
    (14, spec("streak_14", "¡Dos Semanas!", "14 días seguidos", "⭐", BadgeRarity::Epic)),
    (30, spec("streak_30", "¡Campeón!", "30 días seguidos", "👑", BadgeRarity::Legendary)),
];

static PERFECT_10: BadgeSpec =
    spec("perfect_10", "¡Perfecto!", "10 respuestas perfectas", "💯", BadgeRarity::Epic);
static ACCURACY_90: BadgeSpec =
    spec("accuracy_90", "¡Casi Perfecto!", "90% de precisión", "🎯", BadgeRarity::Rare);

/// (exact count of fast correct answers, badge)
static SPEED_BADGES: [(usize, BadgeSpec); 2] = [
    (5, spec("speed_5", "¡Rápido!", "5 respuestas rápidas", "⚡", BadgeRarity::Common)),
    (20, spec("speed_20", "¡Súper Rápido!", "20 respuestas rápidas", "🚀", BadgeRarity::Rare)),
];

/// (exact number of problems solved, badge)
static PERSISTENCE_BADGES: [(usize, BadgeSpec); 3] = [
    (50, spec("problems_50", "¡Persistente!", "50 problemas resueltos", "💪", BadgeRarity::Common)),
    (100, spec("problems_100", "¡Dedicado!", "100 problemas resueltos", "🏆", BadgeRarity::Rare)),
    (500, spec("problems_500", "¡Maestro!", "500 problemas resueltos", "🎓", BadgeRarity::Legendary)),
];

/// Badges earned by the current profile/history that the profile does not
/// hold yet, stamped with `now`.
///
/// Count-based families fire only when the count equals a milestone exactly:
/// a streak that jumps from 2 to 4 never earns `streak_3`.
pub fn evaluate(profile: &UserProfile, history: &[PerformanceObservation], now: i64) -> Vec<Badge> {
    let mut earned: Vec<&BadgeSpec> = Vec::new();

    let streak = profile.streak.current;
    earned.extend(STREAK_BADGES.iter().filter(|(days, _)| *days == streak).map(|(_, b)| b));

    if let Some(accuracy) = sessions::recent_success_rate(history, ACCURACY_WINDOW) {
        if accuracy >= 1.0 {
            earned.push(&PERFECT_10);
        } else if accuracy >= 0.9 {
            earned.push(&ACCURACY_90);
        }
    }

    let fast = sessions::fast_correct_count(history);
    earned.extend(SPEED_BADGES.iter().filter(|(count, _)| *count == fast).map(|(_, b)| b));

    let solved = history.len();
    earned.extend(PERSISTENCE_BADGES.iter().filter(|(count, _)| *count == solved).map(|(_, b)| b));

    let held: HashSet<&str> = profile.badges.iter().map(|b| b.id.as_str()).collect();
    let awarded: Vec<Badge> = earned
        .into_iter()
        .filter(|b| !held.contains(b.id))
        .map(|b| b.award(now))
        .collect();

    for badge in &awarded {
        tracing::info!(badge = %badge.id, rarity = ?badge.rarity, "Badge earned");
    }
    awarded
}

/// Append newly awarded badges, skipping any id already held.
pub fn award(profile: &mut UserProfile, badges: &[Badge]) {
    for badge in badges {
        if !profile.has_badge(&badge.id) {
            profile.badges.push(badge.clone());
        }
    }
}
