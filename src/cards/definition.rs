//! Card definitions.
//!
//! A `Card` is an immutable catalog template plus a transient boost
//! overlay. Combat values are explicit optional fields rather than
//! free-form attributes: a card without `attack` simply never attacks.
//!
//! ## Boost overlay
//!
//! While a staking boost is active, `boost` holds the pre-boost values and
//! the visible `attack`/`defense`/`special_effect` hold the boosted ones.
//! When `boost` is `None` the visible values are the template values.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template (e.g. `"card-1"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Card rarity, from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All rarities, most common first.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];
}

/// Card classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Defense,
    Utility,
}

/// What a special effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Extra damage to the opposing side.
    Damage,
    /// Extra healing for the casting side.
    Heal,
}

/// A secondary damage or heal applied after attack and defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub kind: EffectKind,
    pub magnitude: u32,
}

impl SpecialEffect {
    #[must_use]
    pub const fn damage(magnitude: u32) -> Self {
        Self { kind: EffectKind::Damage, magnitude }
    }

    #[must_use]
    pub const fn heal(magnitude: u32) -> Self {
        Self { kind: EffectKind::Heal, magnitude }
    }
}

/// Pre-boost values kept for exact restoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoostOverlay {
    pub original_attack: Option<u32>,
    pub original_defense: Option<u32>,
    pub original_special: Option<SpecialEffect>,
}

/// A playable card.
///
/// ## Example
///
/// ```
/// use mondo_battle::cards::{Card, CardType, Rarity};
///
/// let bolt = Card::new("card-1", "Lightning Strike", Rarity::Common, CardType::Attack, 2)
///     .with_attack(5);
///
/// assert_eq!(bolt.attack_value(), 5);
/// assert_eq!(bolt.defense_value(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub card_type: CardType,

    /// Mana required to play the card.
    pub mana: u32,

    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub special_effect: Option<SpecialEffect>,

    /// Present only while a boost is active on this card.
    pub boost: Option<BoostOverlay>,
}

impl Card {
    /// Create a card with no combat values.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        card_type: CardType,
        mana: u32,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            description: String::new(),
            rarity,
            card_type,
            mana,
            attack: None,
            defense: None,
            special_effect: None,
            boost: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = Some(attack);
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = Some(defense);
        self
    }

    #[must_use]
    pub fn with_special(mut self, effect: SpecialEffect) -> Self {
        self.special_effect = Some(effect);
        self
    }

    /// Attack value, 0 when unset.
    #[must_use]
    pub fn attack_value(&self) -> u32 {
        self.attack.unwrap_or(0)
    }

    /// Defense value, 0 when unset.
    #[must_use]
    pub fn defense_value(&self) -> u32 {
        self.defense.unwrap_or(0)
    }

    /// Is a boost overlay active?
    #[must_use]
    pub fn is_boosted(&self) -> bool {
        self.boost.is_some()
    }

    /// Can a side holding `mana` play this card?
    #[must_use]
    pub fn is_affordable(&self, mana: u32) -> bool {
        self.mana <= mana
    }
}
