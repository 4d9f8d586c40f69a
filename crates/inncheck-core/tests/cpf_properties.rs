use inncheck_core::cpf::{self, check_digit, IdentifierFeedback};
use inncheck_core::{Cpf, ValidationError};
use proptest::prelude::*;

fn with_check_digits(prefix: &[u8]) -> Vec<u8> {
    let mut digits = prefix.to_vec();
    digits.push(check_digit(&digits));
    digits.push(check_digit(&digits));
    digits
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn varied_prefix() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..10, 9).prop_filter("not a repdigit", |p| {
        p.iter().any(|&d| d != p[0])
    })
}

#[test]
fn test_known_identifiers() {
    assert!(cpf::validate("52998224725"));
    assert!(!cpf::validate("52998224726"));
    assert!(!cpf::validate("11111111111"));
    assert!(!cpf::validate("5299822472"));
    assert_eq!(cpf::feedback("52998"), IdentifierFeedback::Incomplete);
    assert_eq!(cpf::feedback("52998224726"), IdentifierFeedback::Invalid);
    assert_eq!(cpf::feedback("52998224725"), IdentifierFeedback::Valid);
}

proptest! {
    #[test]
    fn prop_generated_identifiers_validate(prefix in varied_prefix()) {
        let id = to_string(&with_check_digits(&prefix));
        prop_assert!(cpf::validate(&id));
        prop_assert_eq!(cpf::feedback(&id), IdentifierFeedback::Valid);
        let parsed = Cpf::parse(&id).unwrap();
        prop_assert_eq!(parsed.as_str(), id.as_str());
    }

    #[test]
    fn prop_formatting_is_ignored(prefix in varied_prefix()) {
        let id = to_string(&with_check_digits(&prefix));
        let formatted = format!("{}.{}.{}-{}", &id[..3], &id[3..6], &id[6..9], &id[9..]);
        prop_assert!(cpf::validate(&formatted));
    }

    #[test]
    fn prop_altered_check_digit_fails(
        prefix in varied_prefix(),
        position in 9usize..11,
        delta in 1u8..10,
    ) {
        let mut digits = with_check_digits(&prefix);
        digits[position] = (digits[position] + delta) % 10;
        let id = to_string(&digits);
        prop_assert!(!cpf::validate(&id));
        prop_assert_eq!(cpf::feedback(&id), IdentifierFeedback::Invalid);
    }

    #[test]
    fn prop_repdigits_fail(d in 0u8..10) {
        let id = to_string(&[d; 11]);
        prop_assert!(!cpf::validate(&id));
        prop_assert_eq!(Cpf::parse(&id), Err(ValidationError::RepeatedDigits));
    }

    #[test]
    fn prop_wrong_length_fails(digits in prop::collection::vec(0u8..10, 0..20)) {
        prop_assume!(digits.len() != 11);
        prop_assert!(!cpf::validate(&to_string(&digits)));
    }

    #[test]
    fn prop_short_input_is_incomplete(digits in prop::collection::vec(0u8..10, 1..11)) {
        prop_assert_eq!(cpf::feedback(&to_string(&digits)), IdentifierFeedback::Incomplete);
    }
}
