use slotmap::new_key_type;

// Keys are scoped to the `Model` arena that issued them; a key from one model means
// nothing in another, even when both were read from the same file.
new_key_type! {
    /// Handle to an atom stored in a [`super::model::Model`].
    pub struct AtomId;
    /// Handle to a residue stored in a [`super::model::Model`].
    pub struct ResidueId;
    /// Handle to a chain stored in a [`super::model::Model`].
    pub struct ChainId;
}
