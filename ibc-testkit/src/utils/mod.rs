use ibc_tao::primitives::{Signer, Timestamp};

/// Returns a `Timestamp` representation of beginning of year 2023.
///
/// Test chains start from this instant by default so that two chains built
/// one after the other agree on the time, whatever the wall clock says.
pub fn year_2023() -> Timestamp {
    // Sun Jan 01 2023 00:00:00 GMT+0000
    Timestamp::from_unix_timestamp(1_672_531_200, 0).expect("should be a valid time")
}

/// Signer used by the relayer and the fixtures.
pub fn dummy_signer() -> Signer {
    Signer::new("cosmos000000000000000000000000000000000000000")
}
