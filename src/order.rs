//! Natural label ordering.
//!
//! Layout keeps input order, so callers sort before laying out. File names
//! usually carry sequence numbers, which byte order gets wrong
//! (`img10` before `img2`). [`natural_cmp`] compares digit runs by value and
//! letters without regard to case.
//!
//! ```
//! use zensheet::order::natural_cmp;
//! use core::cmp::Ordering;
//!
//! assert_eq!(natural_cmp("img2.png", "img10.png"), Ordering::Less);
//! assert_eq!(natural_cmp("B.png", "a.png"), Ordering::Greater);
//! ```

use core::cmp::Ordering;
use core::iter::Peekable;
use core::str::Chars;

use alloc::vec::Vec;

use crate::sheet::SheetItem;

/// Compare two labels: digit runs by numeric value, other characters
/// case-insensitively. Labels equal under those rules fall back to plain
/// string order, so the result is total and deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    folded_cmp(a, b).then_with(|| a.cmp(b))
}

/// Stable sort of `items` by [`natural_cmp`] on their labels.
pub fn sort_natural(items: &mut [SheetItem]) {
    items.sort_by(|a, b| natural_cmp(&a.label, &b.label));
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&l), Some(&r)) => (l, r),
        };

        let ord = if l.is_ascii_digit() && r.is_ascii_digit() {
            digit_run_cmp(&mut left, &mut right)
        } else {
            left.next();
            right.next();
            l.to_lowercase().cmp(r.to_lowercase())
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Consume one digit run from each side and compare by value. Leading zeros
/// are ignored; runs of any length compare without overflow.
fn digit_run_cmp(left: &mut Peekable<Chars<'_>>, right: &mut Peekable<Chars<'_>>) -> Ordering {
    let l = significant_digits(left);
    let r = significant_digits(right);
    l.len().cmp(&r.len()).then_with(|| l.cmp(&r))
}

fn significant_digits(chars: &mut Peekable<Chars<'_>>) -> Vec<u8> {
    let mut digits = Vec::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        chars.next();
        if c == '0' && digits.is_empty() {
            continue;
        }
        digits.push(c as u8);
    }
    digits
}
