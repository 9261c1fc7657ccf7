//! 자연 정렬 비교 (숫자 인식, 대소문자 무시)
//!
//! `file2` < `file10` 처럼 연속된 숫자를 하나의 값으로 비교합니다.

use std::cmp::Ordering;

/// 두 문자열을 자연 정렬 순서로 비교
///
/// 대소문자를 무시하고 비교한 뒤, 완전히 같으면 원래 문자열로 다시 비교해
/// 전순서(total order)를 보장합니다.
///
/// # Examples
/// ```
/// use opensave::utils::natural::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
/// assert_eq!(natural_cmp("B", "a"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let al = a.to_lowercase();
    let bl = b.to_lowercase();
    match natural_cmp_lower(&al, &bl) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}

fn natural_cmp_lower(a: &str, b: &str) -> Ordering {
    let ac: Vec<char> = a.chars().collect();
    let bc: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0usize, 0usize);

    while i < ac.len() && j < bc.len() {
        if ac[i].is_ascii_digit() && bc[j].is_ascii_digit() {
            let a_end = scan_digits(&ac, i);
            let b_end = scan_digits(&bc, j);

            let ord = compare_digit_runs(&ac[i..a_end], &bc[j..b_end]);
            if ord != Ordering::Equal {
                return ord;
            }
            // 같은 값이면 선행 0이 적은 쪽이 먼저
            let ord = (a_end - i).cmp(&(b_end - j));
            if ord != Ordering::Equal {
                return ord;
            }
            i = a_end;
            j = b_end;
            continue;
        }

        let ord = ac[i].cmp(&bc[j]);
        if ord != Ordering::Equal {
            return ord;
        }
        i += 1;
        j += 1;
    }

    (ac.len() - i).cmp(&(bc.len() - j))
}

fn scan_digits(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// 선행 0을 제거한 뒤 자릿수 → 사전순으로 비교 (오버플로 없음)
fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}

fn trim_leading_zeros(digits: &[char]) -> &[char] {
    let first = digits
        .iter()
        .position(|&c| c != '0')
        .unwrap_or(digits.len());
    &digits[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_runs_compare_by_value() {
        assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(natural_cmp("file10", "file9"), Ordering::Greater);
        assert_eq!(natural_cmp("v1.10", "v1.9"), Ordering::Greater);
    }

    #[test]
    fn test_case_insensitive_first() {
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("a.txt", "B.txt"), Ordering::Less);
    }

    #[test]
    fn test_case_only_difference_is_deterministic() {
        assert_ne!(natural_cmp("A", "a"), Ordering::Equal);
        assert_eq!(natural_cmp("A", "a"), natural_cmp("A", "a"));
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("img_2", "img_02"), Ordering::Less);
        assert_eq!(natural_cmp("img_002", "img_10"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("x99999999999999999999999", "x100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_korean_names() {
        assert_eq!(natural_cmp("문서2", "문서10"), Ordering::Less);
    }
}
