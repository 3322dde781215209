/// Selection and scroll position in the result card list
pub struct CardListState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    /// Cards that fit in the result area, updated on every draw
    pub visible_cards: usize,
}

impl Default for CardListState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_cards: 5,
        }
    }
}

impl CardListState {
    /// New result set: select the first card, if any
    pub fn reset(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_cards.saturating_sub(1).max(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_cards.saturating_sub(1).max(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_cards > 0 && index >= self.scroll_offset + self.visible_cards {
            self.scroll_offset = index - self.visible_cards + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_selects_first_card() {
        let mut list = CardListState::default();
        list.reset(16);
        assert_eq!(list.selected, Some(0));
        list.reset(0);
        assert_eq!(list.selected, None);
    }

    #[test]
    fn next_stops_at_last_card() {
        let mut list = CardListState::default();
        list.reset(2);
        list.select_next(2);
        list.select_next(2);
        assert_eq!(list.selected, Some(1));
    }

    #[test]
    fn scrolling_keeps_selection_visible() {
        let mut list = CardListState {
            visible_cards: 3,
            ..Default::default()
        };
        list.reset(16);
        for _ in 0..5 {
            list.select_next(16);
        }
        assert_eq!(list.selected, Some(5));
        assert_eq!(list.scroll_offset, 3);

        list.select_first();
        assert_eq!(list.scroll_offset, 0);

        list.select_last(16);
        assert_eq!(list.selected, Some(15));
        assert_eq!(list.scroll_offset, 13);
    }

    #[test]
    fn paging_moves_by_visible_cards() {
        let mut list = CardListState {
            visible_cards: 4,
            ..Default::default()
        };
        list.reset(16);
        list.page_down(16);
        assert_eq!(list.selected, Some(3));
        list.page_up();
        assert_eq!(list.selected, Some(0));
    }
}
