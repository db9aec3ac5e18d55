use arcium_anchor::prelude::*;

// Computation definition offset for the sealing encrypted instruction
pub const COMP_DEF_OFFSET_SEAL_BALLOT: u32 = comp_def_offset("seal_ballot");
