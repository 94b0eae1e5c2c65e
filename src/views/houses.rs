//! Houses screen
//!
//! The one screen that surfaces validation errors: add and edit both
//! require a name and an address. Deletion goes through an interactive
//! confirmation step.

use tracing::warn;

use crate::store::{EntityId, House, HouseStore, HouseUpdate, NewHouse, StoreError};
use crate::util::PhotoSlot;

use super::{parse_progress, ValidationError};

/// Draft for the add-house dialog
#[derive(Default)]
pub struct HouseDraft {
    pub name: String,
    /// Raw text from the progress input, clamped at submit
    pub progress: String,
    pub address: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

/// State of the edit-house dialog
pub struct HouseEdit {
    pub id: EntityId,
    pub name: String,
    pub progress: String,
    pub address: String,
    pub photo: Option<String>,
    pub photo_slot: PhotoSlot,
}

/// Houses screen controller
pub struct HousesView {
    store: HouseStore,
    pub draft: HouseDraft,
    pub editing: Option<HouseEdit>,
    /// Validation message shown in the open dialog, if any
    error: Option<ValidationError>,
    /// House awaiting delete confirmation
    pending_delete: Option<EntityId>,
}

impl HousesView {
    pub fn new(store: HouseStore) -> Self {
        Self {
            store,
            draft: HouseDraft::default(),
            editing: None,
            error: None,
            pending_delete: None,
        }
    }

    /// Houses to render
    pub fn rows(&self) -> Vec<House> {
        self.store.list()
    }

    /// The currently surfaced validation error, if any
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Submit the add dialog
    ///
    /// A missing name or address blocks the write and surfaces an error;
    /// success clears it and resets the draft.
    pub fn submit_new(&mut self) -> Result<House, ValidationError> {
        self.fold_photo_into_draft();

        if self.draft.name.is_empty() || self.draft.address.is_empty() {
            let error = ValidationError::MissingHouseFields;
            self.error = Some(error.clone());
            return Err(error);
        }

        let draft = std::mem::take(&mut self.draft);
        let house = self.store.add(NewHouse {
            name: draft.name,
            progress: parse_progress(&draft.progress),
            address: draft.address,
            photo: draft.photo,
        });
        self.error = None;
        Ok(house)
    }

    /// Open the edit dialog for a house; `false` when it no longer exists
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        match self.store.get(id) {
            Some(house) => {
                self.editing = Some(HouseEdit {
                    id: house.id,
                    name: house.name,
                    progress: house.progress.to_string(),
                    address: house.address,
                    photo: house.photo,
                    photo_slot: PhotoSlot::new(),
                });
                true
            }
            None => false,
        }
    }

    /// Submit the edit dialog, with the same name/address validation as add
    pub fn submit_edit(&mut self) -> Result<(), ValidationError> {
        let Some(mut edit) = self.editing.take() else {
            return Ok(());
        };

        if let Some(loaded) = edit.photo_slot.take() {
            match loaded {
                Ok(uri) => edit.photo = Some(uri),
                Err(error) => warn!(%error, "Photo load failed, keeping previous photo"),
            }
        }

        if edit.name.is_empty() || edit.address.is_empty() {
            let error = ValidationError::MissingHouseFields;
            self.error = Some(error.clone());
            // Dialog stays open for correction
            self.editing = Some(edit);
            return Err(error);
        }

        self.store.update(
            edit.id,
            HouseUpdate {
                name: Some(edit.name),
                progress: Some(parse_progress(&edit.progress)),
                address: Some(edit.address),
                photo: Some(edit.photo),
            },
        );
        self.error = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.error = None;
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: EntityId) {
        self.pending_delete = Some(id);
    }

    /// The house id awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    /// Confirm the pending deletion
    ///
    /// Returns `Ok(false)` when nothing was pending or the house is already
    /// gone; `Err` only under the deny policy while keys are attached.
    pub fn confirm_delete(&mut self) -> Result<bool, StoreError> {
        match self.pending_delete.take() {
            Some(id) => self.store.delete(id),
            None => Ok(false),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
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
