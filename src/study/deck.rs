//! Flashcard deck navigation.

use crate::content::Flashcard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            flipped: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Zero-based position of the current card.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Advance, wrapping to the first card. Shows the term side.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.cards.len();
        self.flipped = false;
    }

    /// Step back, wrapping to the last card. Shows the term side.
    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
        self.flipped = false;
    }
}
