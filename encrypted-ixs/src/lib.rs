use arcis_imports::*;

#[encrypted]
mod circuits {
    use arcis_imports::*;

    /// A single voter's ballot: the chosen character id.
    /// 1 = Goku, 2 = Vegeta, 3 = Gohan, 4 = Frieza
    pub struct UserBallot {
        choice: u32,
    }

    /// Seals a voter's encrypted ballot for on-chain storage.
    ///
    /// The ballot arrives encrypted under the voter's shared secret with the
    /// cluster. Passing it through the cluster validates the ciphertext, and
    /// the output is re-encrypted to the same owner so that only the
    /// submitting voter can recover the choice later.
    ///
    /// The choice is not range-checked: any u32 the client encrypts is
    /// sealed and stored verbatim. Mapping ids to characters is a client
    /// convention.
    ///
    /// # Arguments
    /// * `ballot_ctxt` - The voter's encrypted choice
    ///
    /// # Returns
    /// The same ballot, freshly encrypted to the submitting owner
    #[instruction]
    pub fn seal_ballot(ballot_ctxt: Enc<Shared, UserBallot>) -> Enc<Shared, UserBallot> {
        let ballot = ballot_ctxt.to_arcis();
        ballot_ctxt.owner.from_arcis(ballot)
    }
}
