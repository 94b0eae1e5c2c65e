//! Warehouse stock screen
//!
//! List with optional category filter, add dialog, edit dialog. Invalid
//! add submissions are dropped without a message; deletion is immediate.

use tracing::{debug, warn};

use crate::store::{
    Category, EntityId, NewWarehouseItem, WarehouseItem, WarehouseItemUpdate, WarehouseStore,
};
use crate::util::PhotoSlot;

use super::parse_count;

/// Draft for the add-item dialog
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    /// Raw text from the quantity input, parsed at submit
    pub quantity: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::ALL[0],
            quantity: String::new(),
            photo: None,
            photo_slot: PhotoSlot::new(),
        }
    }
}

/// State of the edit-item dialog
pub struct ItemEdit {
    pub id: EntityId,
    pub name: String,
    pub category: Category,
    pub quantity: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

/// Warehouse screen controller
pub struct WarehouseView {
    store: WarehouseStore,
    pub draft: ItemDraft,
    pub editing: Option<ItemEdit>,
    filter: Option<Category>,
}

impl WarehouseView {
    pub fn new(store: WarehouseStore) -> Self {
        Self {
            store,
            draft: ItemDraft::default(),
            editing: None,
            filter: None,
        }
    }

    /// Items to render, honoring the category filter
    pub fn rows(&self) -> Vec<WarehouseItem> {
        match self.filter {
            Some(category) => self.store.list_in_category(category),
            None => self.store.list(),
        }
    }

    /// Select a category filter; `None` shows all items
    pub fn set_filter(&mut self, filter: Option<Category>) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Option<Category> {
        self.filter
    }

    /// Submit the add dialog
    ///
    /// Requires a non-empty name and a quantity above zero; anything else is
    /// dropped without surfacing an error. Returns whether the item was
    /// added.
    pub fn submit_new(&mut self) -> bool {
        self.fold_photo_into_draft();

        let quantity = parse_count(&self.draft.quantity);
        if self.draft.name.is_empty() || quantity == 0 {
            debug!(name = %self.draft.name, quantity, "Dropped invalid warehouse submission");
            return false;
        }

        let draft = std::mem::take(&mut self.draft);
        self.store.add(NewWarehouseItem {
            name: draft.name,
            category: draft.category,
            quantity,
            photo: draft.photo,
        });
        true
    }

    /// Open the edit dialog for an item; `false` when it no longer exists
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        match self.store.get(id) {
            Some(item) => {
                self.editing = Some(ItemEdit {
                    id: item.id,
                    name: item.name,
                    category: item.category,
                    quantity: item.quantity.to_string(),
                    photo: item.photo,
                    photo_slot: PhotoSlot::new(),
                });
                true
            }
            None => false,
        }
    }

    /// Submit the edit dialog; requires only an open editing target
    pub fn submit_edit(&mut self) -> bool {
        let Some(mut edit) = self.editing.take() else {
            return false;
        };

        if let Some(loaded) = edit.photo_slot.take() {
            match loaded {
                Ok(uri) => edit.photo = Some(uri),
                Err(error) => warn!(%error, "Photo load failed, keeping previous photo"),
            }
        }

        self.store.update(
            edit.id,
            WarehouseItemUpdate {
                name: Some(edit.name),
                category: Some(edit.category),
                quantity: Some(parse_count(&edit.quantity)),
                photo: Some(edit.photo),
            },
        )
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Delete immediately, no confirmation
    pub fn delete(&mut self, id: EntityId) -> bool {
        self.store.delete(id)
    }

    fn fold_photo_into_draft(&mut self) {
        if let Some(loaded) = self.draft.photo_slot.take() {
            match loaded {
                Ok(uri) => self.draft.photo = Some(uri),
                Err(error) => warn!(%error, "Photo load failed, submitting without photo"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreCore;

    fn view() -> WarehouseView {
        WarehouseView::new(WarehouseStore::new(StoreCore::new()))
    }

    fn fill_lamp(view: &mut WarehouseView) {
        view.draft.name = "Lamp".to_string();
        view.draft.category = Category::Lighting;
        view.draft.quantity = "10".to_string();
    }

    #[test]
    fn valid_submission_adds_and_resets_the_draft() {
        let mut view = view();
        fill_lamp(&mut view);

        assert!(view.submit_new());
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].name, "Lamp");
        assert!(view.draft.name.is_empty());
        assert!(view.draft.quantity.is_empty());
        assert_eq!(view.draft.category, Category::Furniture);
    }

    #[test]
    fn empty_name_is_silently_dropped() {
        let mut view = view();
        view.draft.quantity = "5".to_string();

        assert!(!view.submit_new());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn zero_quantity_is_silently_dropped() {
        let mut view = view();
        fill_lamp(&mut view);
        view.draft.quantity = "0".to_string();

        assert!(!view.submit_new());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn malformed_quantity_is_silently_dropped() {
        let mut view = view();
        fill_lamp(&mut view);
        view.draft.quantity = "ten".to_string();

        assert!(!view.submit_new());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn filter_narrows_rows() {
        let mut view = view();
        fill_lamp(&mut view);
        view.submit_new();
        view.draft.name = "Sofa".to_string();
        view.draft.category = Category::Furniture;
        view.draft.quantity = "2".to_string();
        view.submit_new();

        view.set_filter(Some(Category::Lighting));
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].name, "Lamp");

        view.set_filter(None);
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn edit_requires_only_an_open_target() {
        let mut view = view();
        fill_lamp(&mut view);
        view.submit_new();

        assert!(view.begin_edit(1));
        let edit = view.editing.as_mut().unwrap();
        edit.name = String::new();
        edit.quantity = "0".to_string();

        // Unlike add, edit applies with no field validation
        assert!(view.submit_edit());
        let row = &view.rows()[0];
        assert_eq!(row.name, "");
        assert_eq!(row.quantity, 0);
    }

    #[test]
    fn submit_edit_without_target_is_a_no_op() {
        let mut view = view();
        assert!(!view.submit_edit());
    }

    #[test]
    fn begin_edit_on_missing_item_fails() {
        let mut view = view();
        assert!(!view.begin_edit(9));
        assert!(view.editing.is_none());
    }

    #[test]
    fn delete_is_immediate() {
        let mut view = view();
        fill_lamp(&mut view);
        view.submit_new();

        assert!(view.delete(1));
        assert!(view.rows().is_empty());
    }
}
