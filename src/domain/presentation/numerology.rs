//! Life-path number.

/// Sums the decimal digits of `n`.
fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Life-path number for a user: the digit sum of `age + name length`,
/// reduced again until it is a single digit or one of the master numbers
/// 11 and 22.
///
/// Name length counts characters. A negative total is reduced by its
/// magnitude.
pub fn life_path(age: i32, name: &str) -> u32 {
    let name_len = i64::try_from(name.chars().count()).unwrap_or(i64::MAX);
    let raw = i64::from(age).saturating_add(name_len);
    let mut sum = digit_sum(raw.unsigned_abs());
    while sum > 9 && sum != 11 && sum != 22 {
        sum = digit_sum(sum);
    }
    // A digit sum of a u64 is at most 180, so this never truncates.
    sum as u32
}
