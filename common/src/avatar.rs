//! Avatar phase model.
//!
//! The avatar has six body parts in a fixed order. Each wrong guess inflates
//! the next part, so the number of visible parts is always
//! `MAX_ATTEMPTS - attempts_left`. The model only tracks phases; the client
//! binds each transition to meshes, materials and effects.

/// Attempts a fresh game starts with. One body part per attempt.
pub const MAX_ATTEMPTS: u8 = 6;

/// Opacity of a body part that has not been inflated yet.
pub const GHOST_OPACITY: f32 = 0.15;

/// Body part slots in inflation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BodyPartSlot {
    Head = 0,
    Body = 1,
    LeftArm = 2,
    RightArm = 3,
    LeftLeg = 4,
    RightLeg = 5,
}

impl BodyPartSlot {
    pub const ALL: [Self; MAX_ATTEMPTS as usize] = [
        Self::Head,
        Self::Body,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftLeg,
        Self::RightLeg,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Body => "Body",
            Self::LeftArm => "Left arm",
            Self::RightArm => "Right arm",
            Self::LeftLeg => "Left leg",
            Self::RightLeg => "Right leg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartPhase {
    #[default]
    Ghost,
    /// Inflating; settles to `Solid` when the appear animation completes.
    Appearing,
    Solid,
}

impl PartPhase {
    pub fn is_shown(self) -> bool {
        !matches!(self, Self::Ghost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionTier {
    Worried,
    Nervous,
    Happy,
}

impl ExpressionTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Worried => "worried",
            Self::Nervous => "nervous",
            Self::Happy => "happy",
        }
    }
}

/// Eye pose for an expression tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression {
    pub tier: ExpressionTier,
    pub eye_scale: f32,
    pub eye_offset_y: f32,
}

pub fn expression_for(attempts_left: u8) -> Expression {
    match attempts_left {
        0..=2 => Expression {
            tier: ExpressionTier::Worried,
            eye_scale: 0.7,
            eye_offset_y: 0.02,
        },
        3..=4 => Expression {
            tier: ExpressionTier::Nervous,
            eye_scale: 0.85,
            eye_offset_y: 0.06,
        },
        _ => Expression {
            tier: ExpressionTier::Happy,
            eye_scale: 1.0,
            eye_offset_y: 0.08,
        },
    }
}

/// True while the player is one or two mistakes away from losing.
pub fn danger_glow(attempts_left: u8) -> bool {
    (1..=2).contains(&attempts_left)
}

/// Remaining attempts normalized to `[0, 1]`.
pub fn mood_percent(attempts_left: u8) -> f32 {
    f32::from(attempts_left.min(MAX_ATTEMPTS)) / f32::from(MAX_ATTEMPTS)
}

/// What changed during one [`AvatarModel::apply`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarTransition {
    pub appeared: Vec<BodyPartSlot>,
    pub hidden: Vec<BodyPartSlot>,
    pub pump_stroke: bool,
    pub floating_away: bool,
    pub expression: Expression,
}

impl AvatarTransition {
    pub fn changed_parts(&self) -> bool {
        !self.appeared.is_empty() || !self.hidden.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarModel {
    phases: [PartPhase; MAX_ATTEMPTS as usize],
    attempts_left: u8,
    floating_away: bool,
}

impl Default for AvatarModel {
    fn default() -> Self {
        Self {
            phases: [PartPhase::Ghost; MAX_ATTEMPTS as usize],
            attempts_left: MAX_ATTEMPTS,
            floating_away: false,
        }
    }
}

impl AvatarModel {
    /// Converges the part phases onto `attempts_left`. Values above
    /// [`MAX_ATTEMPTS`] are clamped.
    pub fn apply(&mut self, attempts_left: u8) -> AvatarTransition {
        let attempts_left = attempts_left.min(MAX_ATTEMPTS);
        let parts_to_show = usize::from(MAX_ATTEMPTS - attempts_left);

        let mut appeared = Vec::new();
        let mut hidden = Vec::new();
        for slot in BodyPartSlot::ALL {
            let phase = &mut self.phases[slot.ordinal()];
            if slot.ordinal() < parts_to_show {
                if *phase == PartPhase::Ghost {
                    *phase = PartPhase::Appearing;
                    appeared.push(slot);
                }
            } else if phase.is_shown() {
                *phase = PartPhase::Ghost;
                hidden.push(slot);
            }
        }

        self.attempts_left = attempts_left;
        self.floating_away = attempts_left == 0;

        AvatarTransition {
            pump_stroke: !appeared.is_empty(),
            appeared,
            hidden,
            floating_away: self.floating_away,
            expression: expression_for(attempts_left),
        }
    }

    /// Completes an appear animation. Returns false when the part was not
    /// appearing, e.g. because a reset hid it mid-animation.
    pub fn settle(&mut self, slot: BodyPartSlot) -> bool {
        let phase = &mut self.phases[slot.ordinal()];
        if *phase != PartPhase::Appearing {
            return false;
        }
        *phase = PartPhase::Solid;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self, slot: BodyPartSlot) -> PartPhase {
        self.phases[slot.ordinal()]
    }

    pub fn shown_count(&self) -> usize {
        self.phases.iter().filter(|phase| phase.is_shown()).count()
    }

    pub fn attempts_left(&self) -> u8 {
        self.attempts_left
    }

    pub fn is_floating_away(&self) -> bool {
        self.floating_away
    }

    pub fn expression(&self) -> Expression {
        expression_for(self.attempts_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_only_promotes_appearing_parts() {
        let mut model = AvatarModel::default();
        assert!(!model.settle(BodyPartSlot::Head));

        model.apply(5);
        assert_eq!(model.phase(BodyPartSlot::Head), PartPhase::Appearing);
        assert!(model.settle(BodyPartSlot::Head));
        assert_eq!(model.phase(BodyPartSlot::Head), PartPhase::Solid);
        assert!(!model.settle(BodyPartSlot::Head));
    }

    #[test]
    fn attempts_above_max_are_clamped() {
        let mut model = AvatarModel::default();
        model.apply(3);
        let transition = model.apply(200);
        assert_eq!(transition.hidden.len(), 3);
        assert_eq!(model.attempts_left(), MAX_ATTEMPTS);
        assert_eq!(model.shown_count(), 0);
    }

    #[test]
    fn expression_tiers_have_no_hysteresis() {
        assert_eq!(expression_for(6).tier, ExpressionTier::Happy);
        assert_eq!(expression_for(5).tier, ExpressionTier::Happy);
        assert_eq!(expression_for(4).tier, ExpressionTier::Nervous);
        assert_eq!(expression_for(3).tier, ExpressionTier::Nervous);
        assert_eq!(expression_for(2).tier, ExpressionTier::Worried);
        assert_eq!(expression_for(0).tier, ExpressionTier::Worried);
        assert_eq!(expression_for(3), expression_for(3));
    }

    #[test]
    fn danger_glow_excludes_game_over() {
        assert!(!danger_glow(0));
        assert!(danger_glow(1));
        assert!(danger_glow(2));
        assert!(!danger_glow(3));
    }

    #[test]
    fn slot_ordinals_follow_inflation_order() {
        for (index, slot) in BodyPartSlot::ALL.iter().enumerate() {
            assert_eq!(slot.ordinal(), index);
            assert_eq!(BodyPartSlot::from_ordinal(index), Some(*slot));
        }
        assert_eq!(BodyPartSlot::from_ordinal(6), None);
    }
}
