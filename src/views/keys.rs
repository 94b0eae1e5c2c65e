//! Key management screen
//!
//! Rows are joined with the owning house's name; a key whose house was
//! deleted renders without one. Adding requires a selected house, nothing
//! else; invalid submissions are dropped silently.

use tracing::{debug, warn};

use crate::store::{EntityId, House, HouseStore, Key, KeyStore, KeyUpdate, NewKey};
use crate::util::PhotoSlot;

/// Draft for the add-key dialog
#[derive(Default)]
pub struct KeyDraft {
    /// Selected house; `None` until the user picks one
    pub house_id: Option<EntityId>,
    pub key_number: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

/// State of the edit-key dialog
pub struct KeyEdit {
    pub id: EntityId,
    pub house_id: EntityId,
    pub key_number: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

/// One rendered row: the key plus its resolved house name
#[derive(Debug, Clone)]
pub struct KeyRow {
    pub key: Key,
    /// `None` when the referenced house no longer exists
    pub house_name: Option<String>,
}

/// Keys screen controller
pub struct KeysView {
    keys: KeyStore,
    houses: HouseStore,
    pub draft: KeyDraft,
    pub editing: Option<KeyEdit>,
}

impl KeysView {
    pub fn new(keys: KeyStore, houses: HouseStore) -> Self {
        Self {
            keys,
            houses,
            draft: KeyDraft::default(),
            editing: None,
        }
    }

    /// Keys to render, joined with their house names
    pub fn rows(&self) -> Vec<KeyRow> {
        self.keys
            .list()
            .into_iter()
            .map(|key| {
                let house_name = self.keys.resolve_house_name(&key);
                KeyRow { key, house_name }
            })
            .collect()
    }

    /// Houses offered in the add dialog's selector
    pub fn house_choices(&self) -> Vec<House> {
        self.houses.list()
    }

    /// Submit the add dialog
    ///
    /// Requires a selected house; the key number is not validated. Invalid
    /// submissions are dropped without surfacing an error.
    pub fn submit_new(&mut self) -> bool {
        self.fold_photo_into_draft();

        let Some(house_id) = self.draft.house_id else {
            debug!("Dropped key submission without a selected house");
            return false;
        };

        let draft = std::mem::take(&mut self.draft);
        self.keys.add(NewKey {
            house_id,
            key_number: draft.key_number,
            photo: draft.photo,
        });
        true
    }

    /// Open the edit dialog for a key; `false` when it no longer exists
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        match self.keys.get(id) {
            Some(key) => {
                self.editing = Some(KeyEdit {
                    id: key.id,
                    house_id: key.house_id,
                    key_number: key.key_number,
                    photo: key.photo,
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

        self.keys.update(
            edit.id,
            KeyUpdate {
                house_id: Some(edit.house_id),
                key_number: Some(edit.key_number),
                photo: Some(edit.photo),
            },
        )
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Delete immediately, no confirmation
    pub fn delete(&mut self, id: EntityId) -> bool {
        self.keys.delete(id)
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
    use crate::config::HouseDeletePolicy;
    use crate::store::{NewHouse, StoreCore};

    fn setup() -> (KeysView, HouseStore) {
        let core = StoreCore::new();
        let houses = HouseStore::new(core.clone(), HouseDeletePolicy::Detach);
        let view = KeysView::new(KeyStore::new(core), houses.clone());
        (view, houses)
    }

    fn villa(houses: &HouseStore) -> EntityId {
        houses
            .add(NewHouse {
                name: "Villa A".to_string(),
                progress: 0,
                address: "1 Main St".to_string(),
                photo: None,
            })
            .id
    }

    #[test]
    fn add_requires_a_selected_house() {
        let (mut view, _houses) = setup();
        view.draft.key_number = "K-01".to_string();

        assert!(!view.submit_new());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn key_number_is_not_validated() {
        let (mut view, houses) = setup();
        view.draft.house_id = Some(villa(&houses));

        assert!(view.submit_new());
        assert_eq!(view.rows()[0].key.key_number, "");
    }

    #[test]
    fn rows_join_house_names_and_tolerate_dangling_references() {
        let (mut view, houses) = setup();
        let house_id = villa(&houses);
        view.draft.house_id = Some(house_id);
        view.draft.key_number = "K-01".to_string();
        view.submit_new();

        let rows = view.rows();
        assert_eq!(rows[0].house_name.as_deref(), Some("Villa A"));

        houses.delete(house_id).unwrap();
        let rows = view.rows();
        assert_eq!(rows[0].key.house_id, house_id);
        assert_eq!(rows[0].house_name, None);
    }

    #[test]
    fn edit_can_move_a_key_to_another_house() {
        let (mut view, houses) = setup();
        let first = villa(&houses);
        let second = houses
            .add(NewHouse {
                name: "Villa B".to_string(),
                progress: 50,
                address: "2 Side St".to_string(),
                photo: None,
            })
            .id;

        view.draft.house_id = Some(first);
        view.draft.key_number = "K-01".to_string();
        view.submit_new();

        assert!(view.begin_edit(1));
        view.editing.as_mut().unwrap().house_id = second;
        assert!(view.submit_edit());
        assert_eq!(view.rows()[0].house_name.as_deref(), Some("Villa B"));
    }

    #[test]
    fn delete_is_immediate() {
        let (mut view, houses) = setup();
        view.draft.house_id = Some(villa(&houses));
        view.submit_new();

        assert!(view.delete(1));
        assert!(view.rows().is_empty());
        assert!(!view.delete(1));
    }
}
