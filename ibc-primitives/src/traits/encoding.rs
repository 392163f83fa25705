use borsh::BorshSerialize;

/// Canonical byte encoding of values that get committed to the store and
/// proven to a counterparty.
pub trait ToVec {
    fn to_vec(&self) -> Vec<u8>;
}

impl<T: BorshSerialize> ToVec for T {
    fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // writing into a `Vec` cannot fail
        let _ = self.serialize(&mut buf);
        buf
    }
}
