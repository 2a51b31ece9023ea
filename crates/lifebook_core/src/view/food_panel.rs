//! Food flow panel: one card per recommended food.
//!
//! On any food-list change notification the panel clears and fully
//! re-renders; with personal-scale data the rebuild is cheaper than
//! incremental diffing would be worth.

use crate::manager::{ModelManager, SubscriptionId};
use crate::model::food::{Food, FoodList};
use std::cell::RefCell;
use std::rc::Rc;

/// Renders the food list as cards sorted by `(category, name)`.
pub struct FoodFlowPanel {
    cards: Rc<RefCell<Vec<String>>>,
    subscription: SubscriptionId,
}

impl FoodFlowPanel {
    /// Renders the current food list and subscribes for re-renders.
    pub fn attach(manager: &mut ModelManager) -> Self {
        let cards = Rc::new(RefCell::new(render_cards(manager.food_list())));
        let sink = Rc::clone(&cards);
        let subscription = manager.subscribe_foods(Box::new(move |foods| {
            let mut current = sink.borrow_mut();
            current.clear();
            *current = render_cards(foods);
        }));

        Self {
            cards,
            subscription,
        }
    }

    /// Current render, one string per card.
    pub fn cards(&self) -> Vec<String> {
        self.cards.borrow().clone()
    }

    /// Unsubscribes from the manager; the panel stops receiving updates.
    pub fn detach(self, manager: &mut ModelManager) {
        manager.unsubscribe_foods(self.subscription);
    }
}

fn render_cards(foods: &FoodList) -> Vec<String> {
    foods.sorted_for_render().into_iter().map(render_card).collect()
}

fn render_card(food: &Food) -> String {
    format!(
        "[{}] {} | {} kcal | GI {} | sugar {} g",
        food.category, food.name, food.calories, food.glycemic_index, food.sugar_grams
    )
}
