use std::fmt;

pub fn iterable_to_str<I, D>(iterable: I) -> String
where
    I: IntoIterator<Item = D>,
    D: fmt::Display,
{
    let mut iterator = iterable.into_iter();

    let head = match iterator.next() {
        None => return String::from("[]"),
        Some(x) => format!("[{}", x),
    };
    let body = iterator.fold(head, |a, v| format!("{}, {}", a, v));
    format!("{}]", body)
}

/// `s` repeated `n` times; empty when `n` is not positive
pub fn fill_str(s: &str, n: i32) -> String {
    match usize::try_from(n) {
        Ok(count) => s.repeat(count),
        Err(_) => String::new(),
    }
}

/// Integer division rounding towards negative infinity (`divisor` must be positive)
pub fn floor_div(dividend: i64, divisor: i64) -> i64 {
    dividend.div_euclid(divisor)
}

/// Narrow to i32, clamping at its bounds.
pub fn saturate(n: i64) -> i32 {
    // clamped into the i32 range first
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
