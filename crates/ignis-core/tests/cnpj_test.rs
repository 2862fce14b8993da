use ignis_core::cnpj::{self, Cnpj};

/// Builds a valid CNPJ from a 12-digit base by appending the computed check digits.
fn with_check_digits(base: [u8; 12]) -> String {
    let (d1, d2) = cnpj::check_digits(&base);
    base.iter()
        .chain([d1, d2].iter())
        .map(|d| char::from(b'0' + d))
        .collect()
}

fn bump_last_digit(s: &str) -> String {
    let mut bytes = s.as_bytes().to_vec();
    let last = bytes.len() - 1;
    bytes[last] = b'0' + ((bytes[last] - b'0') + 1) % 10;
    String::from_utf8(bytes).expect("ascii")
}

#[test]
fn known_identifier_is_accepted_with_and_without_mask() {
    assert!(cnpj::validate("11222333000181"));
    assert!(cnpj::validate("11.222.333/0001-81"));
    assert!(cnpj::validate("  11.222.333/0001-81\n"));
}

#[test]
fn synthetic_identifier_flips_when_last_digit_changes() {
    let valid = with_check_digits([4, 5, 7, 2, 3, 1, 0, 9, 0, 0, 0, 1]);
    assert!(cnpj::validate(&valid), "{valid} should be valid");
    let broken = bump_last_digit(&valid);
    assert!(!cnpj::validate(&broken), "{broken} should be rejected");
}

#[test]
fn first_check_digit_is_verified_independently() {
    let valid = with_check_digits([9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1]);
    let mut bytes = valid.into_bytes();
    bytes[12] = b'0' + ((bytes[12] - b'0') + 1) % 10;
    assert!(!cnpj::validate(&String::from_utf8(bytes).expect("ascii")));
}

#[test]
fn uniform_digits_are_rejected() {
    for d in 0..=9u8 {
        let s: String = std::iter::repeat_n(char::from(b'0' + d), 14).collect();
        assert!(!cnpj::validate(&s), "{s} must be rejected");
    }
    assert!(!cnpj::validate("11111111111111"));
}

#[test]
fn wrong_length_is_rejected() {
    assert!(!cnpj::validate(""));
    assert!(!cnpj::validate("123"));
    assert!(!cnpj::validate("112223330001811"));
    assert!(!cnpj::validate("CNPJ_00004"));
    assert!(!cnpj::validate("..//--"));
}

#[test]
fn parse_formats_with_mask() {
    let c: Cnpj = "11222333000181".parse().expect("valid");
    assert_eq!(c.to_string(), "11.222.333/0001-81");
    assert_eq!(c.digits(), "11222333000181");
    assert_eq!(cnpj::format("11222333000181").as_deref(), Some("11.222.333/0001-81"));
    assert!(cnpj::format("11222333000182").is_none());
    assert!(Cnpj::parse("abc").is_err());
}

#[test]
fn request_id_trims_and_uppercases() {
    assert_eq!(cnpj::request_id("  cnpj_00004 "), "CNPJ_00004");
}
