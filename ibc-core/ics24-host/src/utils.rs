use core::time::Duration;

/// Number of blocks the host must produce to cover `delay_period_time`,
/// given the longest time it expects a block to take.
///
/// Rounds up: a delay that is not a whole multiple of the block time still
/// waits for the partial block. A zero block time yields no block delay.
pub fn calculate_block_delay(
    delay_period_time: &Duration,
    max_expected_time_per_block: &Duration,
) -> u64 {
    let block_time = max_expected_time_per_block.as_nanos();
    if block_time == 0 {
        return 0;
    }

    let delay = delay_period_time.as_nanos();
    let blocks = delay / block_time + u128::from(delay % block_time != 0);

    u64::try_from(blocks).unwrap_or(u64::MAX)
}
