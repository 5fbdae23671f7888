use hashbrown::HashMap;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// Fired once per card; the detail view for the card should open.
    Revealed(CardId),
}

/// Registry of every scratch card on the page plus the persisted reveal progress.
///
/// Event adapters feed normalized strokes in; the board applies the one-shot reveal transition,
/// persists it synchronously and reports it back.
#[derive(Debug)]
pub struct ScratchBoard<S, K> {
    config: ScratchConfig,
    cards: HashMap<CardId, Card<S>>,
    order: Vec<CardId>,
    progress: ProgressBook<K>,
}

impl<S: CoverSurface, K: KeyValueStore> ScratchBoard<S, K> {
    /// Reads the persisted progress once and seeds every listed card from it.
    pub fn new(config: ScratchConfig, store: K, ids: impl IntoIterator<Item = CardId>) -> Self {
        let config = config.sanitized();
        let progress = ProgressBook::load(store, ProgressKind::Scratched);
        let mut cards = HashMap::new();
        let mut order = Vec::new();

        for id in ids {
            if cards.contains_key(&id) {
                log::warn!("card {} listed twice, ignoring the duplicate", id);
                continue;
            }
            let card = if progress.contains(&id) {
                Card::revealed(id.clone(), config)
            } else {
                Card::covered(id.clone(), config)
            };
            cards.insert(id.clone(), card);
            order.push(id);
        }

        Self {
            config,
            cards,
            order,
            progress,
        }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn card(&self, id: &CardId) -> Option<&Card<S>> {
        self.cards.get(id)
    }

    /// Cards in the order they were listed.
    pub fn cards(&self) -> impl Iterator<Item = &Card<S>> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    pub fn is_revealed(&self, id: &CardId) -> bool {
        self.cards.get(id).is_some_and(Card::is_revealed)
    }

    pub fn progress(&self) -> &RevealProgress {
        self.progress.progress()
    }

    pub fn attach_surface(
        &mut self,
        id: &CardId,
        surface: S,
        display: LogicalSize,
        ratio: f64,
    ) -> Result<()> {
        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| ScratchError::UnknownCard(id.clone()))?;
        card.attach_surface(surface, display, ratio)
    }

    pub fn stroke_start(&mut self, id: &CardId, point: Point) -> Option<BoardEvent> {
        log::trace!("card {} stroke start at ({}, {})", id, point.x, point.y);
        self.apply(id, |card| card.stroke_start(point))
    }

    pub fn stroke_move(&mut self, id: &CardId, point: Point) -> Option<BoardEvent> {
        log::trace!("card {} stroke move to ({}, {})", id, point.x, point.y);
        self.apply(id, |card| card.stroke_move(point))
    }

    pub fn stroke_end(&mut self, id: &CardId) -> Option<BoardEvent> {
        log::trace!("card {} stroke end", id);
        self.apply(id, Card::stroke_end)
    }

    pub fn stroke_cancel(&mut self, id: &CardId) -> Option<BoardEvent> {
        log::trace!("card {} stroke cancel", id);
        self.apply(id, Card::stroke_cancel)
    }

    pub fn check_reveal(&mut self, id: &CardId) -> Option<BoardEvent> {
        self.apply(id, Card::check_reveal)
    }

    pub fn resize(&mut self, id: &CardId, display: LogicalSize) -> Result<bool> {
        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| ScratchError::UnknownCard(id.clone()))?;
        card.resize(display)
    }

    /// Resizes every covered card that `measure` can size; failures are logged and skipped.
    pub fn resize_all(&mut self, mut measure: impl FnMut(&CardId) -> Option<LogicalSize>) -> usize {
        let mut resized = 0;
        for id in &self.order {
            let Some(card) = self.cards.get_mut(id) else {
                continue;
            };
            if !card.is_interactive() {
                continue;
            }
            let Some(display) = measure(id) else {
                continue;
            };
            match card.resize(display) {
                Ok(true) => resized += 1,
                Ok(false) => {}
                Err(err) => log::error!("card {} could not be resized: {}", id, err),
            }
        }
        resized
    }

    /// Clears every persisted key and puts all cards back under a cover.
    ///
    /// Cards lose their surfaces; the page is expected to rebuild them (the browser reloads).
    pub fn reset_progress(&mut self) -> Result<()> {
        let result = crate::reset_progress(self.progress.store());
        self.progress.forget();
        for (id, card) in self.cards.iter_mut() {
            *card = Card::covered(id.clone(), self.config);
        }
        result
    }

    fn apply(
        &mut self,
        id: &CardId,
        op: impl FnOnce(&mut Card<S>) -> StrokeOutcome,
    ) -> Option<BoardEvent> {
        let Some(card) = self.cards.get_mut(id) else {
            log::warn!("input for unknown card {}", id);
            return None;
        };
        match op(card) {
            StrokeOutcome::Revealed => {
                self.progress.mark(id);
                Some(BoardEvent::Revealed(id.clone()))
            }
            StrokeOutcome::Erased | StrokeOutcome::NoChange => None,
        }
    }
}
