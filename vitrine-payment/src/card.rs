//! Card field checks and input masks for the unlock form.

fn card_digits(input: &str) -> Option<Vec<u32>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect()
}

/// Luhn checksum over 13 to 19 digits. Spaces and dashes are ignored.
pub fn validate_card_number(input: &str) -> bool {
    let Some(digits) = card_digits(input) else {
        return false;
    };
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// `MM/YY` (or `MM/YYYY`) that is not before `current = (year, month)`.
/// A card expiring this month is still valid.
pub fn validate_expiry_date(input: &str, current: (i32, u32)) -> bool {
    let Some((month, year)) = input.trim().split_once('/') else {
        return false;
    };
    let (month, year) = (month.trim(), year.trim());
    if month.is_empty() || !month.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Ok(month) = month.parse::<u32>() else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let year = match year.len() {
        2 | 4 if year.chars().all(|c| c.is_ascii_digit()) => match year.parse::<i32>() {
            Ok(y) if year.len() == 2 => 2000 + y,
            Ok(y) => y,
            Err(_) => return false,
        },
        _ => return false,
    };

    (year, month) >= current
}

/// Three or four digits.
pub fn validate_cvv(input: &str) -> bool {
    let cvv = input.trim();
    (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit())
}

/// Mask for the card number field: digits only, at most 16, grouped by four.
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).take(16).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mask for the expiry field: `MMYY` typed becomes `MM/YY`.
pub fn format_expiry_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_accepts_test_visa() {
        assert!(validate_card_number("4111 1111 1111 1111"));
        assert!(validate_card_number("4111-1111-1111-1111"));
        assert!(validate_card_number("5555555555554444"));
    }

    #[test]
    fn luhn_rejects_bad_checksum() {
        assert!(!validate_card_number("4111 1111 1111 1112"));
    }

    #[test]
    fn card_number_rejects_letters_and_bad_length() {
        assert!(!validate_card_number("4111 1111 1111 111a"));
        assert!(!validate_card_number("4111"));
        assert!(!validate_card_number(""));
        assert!(!validate_card_number("41111111111111111111111"));
    }

    #[test]
    fn expiry_current_month_is_valid() {
        assert!(validate_expiry_date("10/26", (2026, 10)));
        assert!(validate_expiry_date("10/2026", (2026, 10)));
    }

    #[test]
    fn expiry_previous_month_is_invalid() {
        assert!(!validate_expiry_date("09/26", (2026, 10)));
        assert!(!validate_expiry_date("12/25", (2026, 1)));
    }

    #[test]
    fn expiry_future_is_valid() {
        assert!(validate_expiry_date("01/27", (2026, 12)));
        assert!(validate_expiry_date("11/26", (2026, 10)));
    }

    #[test]
    fn expiry_rejects_bad_month_and_format() {
        assert!(!validate_expiry_date("13/30", (2026, 1)));
        assert!(!validate_expiry_date("00/30", (2026, 1)));
        assert!(!validate_expiry_date("1230", (2026, 1)));
        assert!(!validate_expiry_date("12/3", (2026, 1)));
        assert!(!validate_expiry_date("ab/30", (2026, 1)));
    }

    #[test]
    fn cvv_lengths() {
        assert!(validate_cvv("123"));
        assert!(validate_cvv("1234"));
        assert!(!validate_cvv("12"));
        assert!(!validate_cvv("12345"));
        assert!(!validate_cvv("12a"));
    }

    #[test]
    fn card_number_mask() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-11"), "4111 11");
        assert_eq!(format_card_number("41111111111111119999"), "4111 1111 1111 1111");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn expiry_mask() {
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("12"), "12");
        assert_eq!(format_expiry_date("123"), "12/3");
        assert_eq!(format_expiry_date("12/345"), "12/34");
    }
}
