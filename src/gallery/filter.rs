/// Card visibility filters
///
/// Filters only toggle `Card::visible` on the cards currently rendered;
/// the record sequence is never touched. The category and search filters
/// do not combine: each one re-evaluates every card on its own, so the
/// last one applied wins.
use super::render::ALL_CATEGORIES;
use super::tree::ViewTree;

/// Show the cards of `category` ("All" shows everything) and highlight
/// the first button with that value.
pub fn filter_by_category(tree: &mut ViewTree, category: &str) {
    let index = tree
        .category_bar
        .as_ref()
        .and_then(|bar| bar.buttons.iter().position(|b| b.category == category));

    highlight_button(tree, index);
    apply_category(tree, category);
}

/// Handle a click on the category button at `index`.
///
/// Does nothing if there is no such button.
pub fn press_category_button(tree: &mut ViewTree, index: usize) {
    let Some(category) = tree
        .category_bar
        .as_ref()
        .and_then(|bar| bar.buttons.get(index))
        .map(|b| b.category.clone())
    else {
        return;
    };

    highlight_button(tree, Some(index));
    apply_category(tree, &category);
}

/// Show the cards whose title or category contains `query`, ignoring case.
///
/// An empty query leaves every card as it is.
pub fn filter_by_search(tree: &mut ViewTree, query: &str) {
    if query.is_empty() {
        return;
    }
    let Some(grid) = &mut tree.grid else {
        return;
    };

    let query = query.to_lowercase();
    for card in &mut grid.cards {
        card.visible = card.record.title.to_lowercase().contains(&query)
            || card.record.category.to_lowercase().contains(&query);
    }

    tracing::debug!(
        "Search '{}' matched {} cards",
        query,
        grid.cards.iter().filter(|c| c.visible).count()
    );
}

fn highlight_button(tree: &mut ViewTree, index: Option<usize>) {
    if let Some(bar) = &mut tree.category_bar {
        for (i, button) in bar.buttons.iter_mut().enumerate() {
            button.active = Some(i) == index;
        }
    }
}

fn apply_category(tree: &mut ViewTree, category: &str) {
    let Some(grid) = &mut tree.grid else {
        return;
    };

    for card in &mut grid.cards {
        card.visible = category == ALL_CATEGORIES || card.record.category == category;
    }

    tracing::debug!("Category '{}' selected", category);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::render::{render_category_buttons, render_grid};
    use crate::gallery::tree::ElementId;
    use crate::state::data::ImageRecord;

    fn rendered() -> ViewTree {
        let records = vec![
            ImageRecord::new("1.jpg", "Sunset Beach", "Nature"),
            ImageRecord::new("2.jpg", "Dragon Quest", "Game"),
            ImageRecord::new("3.jpg", "Forest", "Nature"),
            ImageRecord::new("4.jpg", "Star Ship", "Sci-Fi"),
        ];
        let mut tree = ViewTree::full();
        render_grid(&mut tree, &records);
        render_category_buttons(&mut tree, &records);
        tree
    }

    fn visible_titles(tree: &ViewTree) -> Vec<String> {
        tree.grid
            .as_ref()
            .unwrap()
            .visible_records()
            .map(|r| r.title.clone())
            .collect()
    }

    fn active_buttons(tree: &ViewTree) -> Vec<String> {
        tree.category_bar
            .as_ref()
            .unwrap()
            .buttons
            .iter()
            .filter(|b| b.active)
            .map(|b| b.category.clone())
            .collect()
    }

    #[test]
    fn test_category_shows_exact_matches() {
        let mut tree = rendered();
        filter_by_category(&mut tree, "Nature");

        assert_eq!(visible_titles(&tree), ["Sunset Beach", "Forest"]);
        assert_eq!(active_buttons(&tree), ["Nature"]);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let mut tree = rendered();
        filter_by_category(&mut tree, "nature");
        assert!(visible_titles(&tree).is_empty());
    }

    #[test]
    fn test_all_shows_everything() {
        let mut tree = rendered();
        filter_by_category(&mut tree, "Game");
        filter_by_category(&mut tree, "All");

        assert_eq!(visible_titles(&tree).len(), 4);
        assert_eq!(active_buttons(&tree), ["All"]);
    }

    #[test]
    fn test_pressing_a_button_moves_the_highlight() {
        let mut tree = rendered();
        press_category_button(&mut tree, 2);
        assert_eq!(active_buttons(&tree), ["Game"]);
        assert_eq!(visible_titles(&tree), ["Dragon Quest"]);

        press_category_button(&mut tree, 3);
        assert_eq!(active_buttons(&tree), ["Sci-Fi"]);
        assert_eq!(visible_titles(&tree), ["Star Ship"]);
    }

    #[test]
    fn test_pressing_a_missing_button_does_nothing() {
        let mut tree = rendered();
        let before = tree.clone();
        press_category_button(&mut tree, 42);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_search_matches_title_or_category_ignoring_case() {
        let mut tree = rendered();
        filter_by_search(&mut tree, "NAT");
        assert_eq!(visible_titles(&tree), ["Sunset Beach", "Forest"]);

        filter_by_search(&mut tree, "ship");
        assert_eq!(visible_titles(&tree), ["Star Ship"]);
    }

    #[test]
    fn test_empty_search_changes_nothing() {
        let mut tree = rendered();
        filter_by_category(&mut tree, "Game");
        let before = tree.clone();

        filter_by_search(&mut tree, "");
        assert_eq!(tree, before);
    }

    #[test]
    fn test_last_filter_wins() {
        let mut tree = rendered();
        filter_by_category(&mut tree, "Game");
        filter_by_search(&mut tree, "forest");
        assert_eq!(visible_titles(&tree), ["Forest"]);

        filter_by_category(&mut tree, "Sci-Fi");
        assert_eq!(visible_titles(&tree), ["Star Ship"]);
    }

    #[test]
    fn test_filters_without_grid_are_noops() {
        let mut tree = ViewTree::with_elements(&[ElementId::Search]);
        filter_by_category(&mut tree, "Game");
        filter_by_search(&mut tree, "x");
        assert_eq!(tree, ViewTree::with_elements(&[ElementId::Search]));
    }

    #[test]
    fn test_category_without_buttons_still_filters() {
        let records = vec![
            ImageRecord::new("1.jpg", "A", "Cats"),
            ImageRecord::new("2.jpg", "B", "Dogs"),
        ];
        let mut tree = ViewTree::with_elements(&[ElementId::GalleryGrid]);
        render_grid(&mut tree, &records);

        filter_by_category(&mut tree, "Dogs");
        assert_eq!(visible_titles(&tree), ["B"]);
    }
}
