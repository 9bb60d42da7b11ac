//! Comma-separated con/disjunction lists.

/// Join items into an Oxford-comma list with the given conjunction:
///
/// ```text
/// a
/// a and b          a or b
/// a, b, and c      a, b, or c
/// ```
///
/// Items are placed verbatim, so an item that itself contains a comma (a
/// compound discipline name, say) cannot shift where the conjunction lands.
pub fn oxford_join<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {} {}", first.as_ref(), conjunction, second.as_ref()),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}, {} {}", head, conjunction, last.as_ref())
        }
    }
}
