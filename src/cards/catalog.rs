//! Static card catalog.
//!
//! The `CardCatalog` stores every card template known to the client.
//! Hands are built by cloning templates out of it; the catalog itself is
//! never mutated during a match.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardType, Rarity};

/// Registry of card templates, in registration order.
///
/// ## Example
///
/// ```
/// use mondo_battle::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::standard();
/// let bolt = catalog.get(&CardId::new("card-1")).unwrap();
/// assert_eq!(bolt.name, "Lightning Strike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The client's built-in catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let templates = [
            Card::new("card-1", "Lightning Strike", Rarity::Common, CardType::Attack, 2)
                .with_description("Deal 5 damage to target player")
                .with_attack(5),
            Card::new("card-2", "Mystic Shield", Rarity::Common, CardType::Defense, 2)
                .with_description("Prevent the next 4 damage")
                .with_defense(4),
            Card::new("card-3", "Mana Surge", Rarity::Rare, CardType::Utility, 1)
                .with_description("Gain 3 mana crystals"),
            Card::new("card-4", "Dragon's Breath", Rarity::Epic, CardType::Attack, 6)
                .with_description("Deal 8 damage to all enemies")
                .with_attack(8),
            Card::new("card-5", "Divine Intervention", Rarity::Rare, CardType::Defense, 4)
                .with_description("Restore 10 health points")
                .with_defense(10),
            Card::new("card-6", "MONDO Chainlink", Rarity::Legendary, CardType::Utility, 5)
                .with_description("Connect to another player's blockchain"),
            Card::new("card-7", "Crypto Crusher", Rarity::Epic, CardType::Attack, 5)
                .with_description("Deal damage equal to your MONDO tokens")
                .with_attack(7),
            Card::new("card-8", "Blockchain Barrier", Rarity::Legendary, CardType::Defense, 7)
                .with_description("Create an immutable shield")
                .with_defense(12),
        ];
        for card in templates {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card template.
    ///
    /// A template with an id already present replaces the old one.
    pub fn register(&mut self, card: Card) {
        match self.index.get(&card.id) {
            Some(&pos) => self.cards[pos] = card,
            None => {
                self.index.insert(card.id.clone(), self.cards.len());
                self.cards.push(card);
            }
        }
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find templates of one rarity.
    pub fn find_by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.rarity == rarity)
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }

    /// Clone the listed templates into a hand, skipping unknown ids.
    #[must_use]
    pub fn hand_of(&self, ids: &[CardId]) -> Vec<Card> {
        ids.iter().filter_map(|id| self.get(id)).cloned().collect()
    }

    /// The starter hand every new profile receives: the first three templates.
    #[must_use]
    pub fn starter_hand(&self) -> Vec<Card> {
        self.cards.iter().take(3).cloned().collect()
    }
}
