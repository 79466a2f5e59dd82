use slotmap::new_key_type;

// Stable arena keys; a key is only meaningful for the system that issued it.
new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}
