/// Projects the record sequence onto the page elements
///
/// Both operations fully replace their previous output, so calling them
/// twice with the same records gives the same tree.
use super::tree::{Card, CategoryButton, ViewTree};
use crate::state::data::ImageRecord;

/// Value of the button that shows every card
pub const ALL_CATEGORIES: &str = "All";

/// "All" followed by each distinct category in first-seen order
pub fn categories(records: &[ImageRecord]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for record in records {
        if !categories[1..].contains(&record.category) {
            categories.push(record.category.clone());
        }
    }
    categories
}

/// Draw one visible card per record, in order.
///
/// Returns false when the page has no gallery grid.
pub fn render_grid(tree: &mut ViewTree, records: &[ImageRecord]) -> bool {
    let Some(grid) = &mut tree.grid else {
        return false;
    };

    grid.cards = records
        .iter()
        .map(|record| Card {
            record: record.clone(),
            visible: true,
        })
        .collect();

    tracing::debug!("Rendered {} cards", grid.cards.len());
    true
}

/// Draw the category buttons, none of them active.
///
/// Returns false when the page has no category button container.
pub fn render_category_buttons(tree: &mut ViewTree, records: &[ImageRecord]) -> bool {
    let Some(bar) = &mut tree.category_bar else {
        return false;
    };

    bar.buttons = categories(records)
        .into_iter()
        .map(|category| CategoryButton {
            category,
            active: false,
        })
        .collect();

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::tree::ElementId;

    fn records() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new("1.jpg", "Sunset", "Nature"),
            ImageRecord::new("2.jpg", "Dragon", "Game"),
            ImageRecord::new("3.jpg", "Forest", "Nature"),
            ImageRecord::new("4.jpg", "Ship", "Sci-Fi"),
        ]
    }

    #[test]
    fn test_one_card_per_record_in_order() {
        let mut tree = ViewTree::full();
        assert!(render_grid(&mut tree, &records()));

        let grid = tree.grid.unwrap();
        let titles: Vec<_> = grid.cards.iter().map(|c| c.record.title.as_str()).collect();
        assert_eq!(titles, ["Sunset", "Dragon", "Forest", "Ship"]);
        assert!(grid.cards.iter().all(|c| c.visible));
    }

    #[test]
    fn test_rerender_replaces_and_resets_visibility() {
        let mut tree = ViewTree::full();
        render_grid(&mut tree, &records());
        tree.grid.as_mut().unwrap().cards[0].visible = false;

        render_grid(&mut tree, &records()[..2]);

        let grid = tree.grid.as_ref().unwrap();
        assert_eq!(grid.cards.len(), 2);
        assert!(grid.cards.iter().all(|c| c.visible));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut once = ViewTree::full();
        render_grid(&mut once, &records());
        render_category_buttons(&mut once, &records());

        let mut twice = once.clone();
        render_grid(&mut twice, &records());
        render_category_buttons(&mut twice, &records());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(categories(&records()), ["All", "Nature", "Game", "Sci-Fi"]);
        assert_eq!(categories(&[]), ["All"]);
    }

    #[test]
    fn test_record_category_named_all_gets_its_own_button() {
        let records = vec![ImageRecord::new("1.jpg", "x", "All")];
        assert_eq!(categories(&records), ["All", "All"]);
    }

    #[test]
    fn test_category_buttons_start_inactive() {
        let mut tree = ViewTree::full();
        assert!(render_category_buttons(&mut tree, &records()));

        let bar = tree.category_bar.unwrap();
        let values: Vec<_> = bar.buttons.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(values, ["All", "Nature", "Game", "Sci-Fi"]);
        assert!(bar.buttons.iter().all(|b| !b.active));
    }

    #[test]
    fn test_missing_elements_are_noops() {
        let mut tree = ViewTree::with_elements(&[ElementId::Search]);
        assert!(!render_grid(&mut tree, &records()));
        assert!(!render_category_buttons(&mut tree, &records()));
        assert_eq!(tree, ViewTree::with_elements(&[ElementId::Search]));
    }
}
