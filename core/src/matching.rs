use hashbrown::HashMap;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Matched,
    Missed,
    AlreadyMatched,
}

/// The "which day is this bottle?" guessing game.
///
/// Shares the store with the scratch cards but records matches under its own namespace.
#[derive(Debug)]
pub struct MatchGame<K> {
    answers: HashMap<CardId, u8>,
    range: GuessRange,
    matched: ProgressBook<K>,
}

impl<K: KeyValueStore> MatchGame<K> {
    pub fn new(
        store: K,
        range: GuessRange,
        answers: impl IntoIterator<Item = (CardId, u8)>,
    ) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            range,
            matched: ProgressBook::load(store, ProgressKind::Matched),
        }
    }

    pub fn range(&self) -> GuessRange {
        self.range
    }

    pub fn is_matched(&self, id: &CardId) -> bool {
        self.matched.contains(id)
    }

    pub fn matched_count(&self) -> usize {
        self.answers
            .keys()
            .filter(|id| self.matched.contains(id))
            .count()
    }

    pub fn parse_guess(&self, input: &str) -> Result<u8> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| ScratchError::NotANumber)?;
        if !self.range.contains(value) {
            return Err(ScratchError::GuessOutOfRange {
                min: self.range.min,
                max: self.range.max,
            });
        }
        Ok(value as u8)
    }

    pub fn guess(&mut self, id: &CardId, input: &str) -> Result<GuessOutcome> {
        let &answer = self
            .answers
            .get(id)
            .ok_or_else(|| ScratchError::UnknownCard(id.clone()))?;
        if self.matched.contains(id) {
            return Ok(GuessOutcome::AlreadyMatched);
        }

        let value = self.parse_guess(input)?;
        if value == answer {
            self.matched.mark(id);
            log::debug!("bottle {} matched", id);
            Ok(GuessOutcome::Matched)
        } else {
            log::trace!("bottle {} missed with {}", id, value);
            Ok(GuessOutcome::Missed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(store: &MemoryStore) -> MatchGame<MemoryStore> {
        let answers = (1..=12u8).map(|day| (CardId::from(day), 13 - day));
        MatchGame::new(store.clone(), GuessRange::default(), answers)
    }

    #[test]
    fn correct_guess_matches_and_persists() {
        let store = MemoryStore::new();
        let mut game = game(&store);
        let id = CardId::from(1u8);

        assert_eq!(game.guess(&id, "3"), Ok(GuessOutcome::Missed));
        assert_eq!(game.guess(&id, " 12 "), Ok(GuessOutcome::Matched));
        assert_eq!(game.guess(&id, "12"), Ok(GuessOutcome::AlreadyMatched));

        assert_eq!(
            store.raw(ProgressKind::Matched.key()).as_deref(),
            Some(r#"{"1":true}"#)
        );
        assert!(store.raw(ProgressKind::Scratched.key()).is_none());
        assert_eq!(game.matched_count(), 1);
    }

    #[test]
    fn invalid_input_is_reported_not_thrown() {
        let store = MemoryStore::new();
        let mut game = game(&store);
        let id = CardId::from(2u8);

        assert_eq!(game.guess(&id, "eleven"), Err(ScratchError::NotANumber));
        assert_eq!(game.guess(&id, ""), Err(ScratchError::NotANumber));
        assert_eq!(
            game.guess(&id, "0"),
            Err(ScratchError::GuessOutOfRange { min: 1, max: 12 })
        );
        assert_eq!(
            game.guess(&id, "300"),
            Err(ScratchError::GuessOutOfRange { min: 1, max: 12 })
        );
        assert!(!game.is_matched(&id));
    }

    #[test]
    fn unknown_bottle_is_rejected() {
        let store = MemoryStore::new();
        let mut game = game(&store);

        assert_eq!(
            game.guess(&CardId::from("x"), "1"),
            Err(ScratchError::UnknownCard(CardId::from("x")))
        );
    }

    #[test]
    fn matches_survive_reload() {
        let store = MemoryStore::new();
        game(&store).guess(&CardId::from(4u8), "9").unwrap();

        let reloaded = game(&store);

        assert!(reloaded.is_matched(&CardId::from(4u8)));
        assert!(!reloaded.is_matched(&CardId::from(5u8)));
    }
}
