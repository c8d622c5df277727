//! Identifier codec through the public facade

use rownode::{decode, encode, GlobalIdentifier, IdentifierError, ResolutionError, Value};

#[test]
fn known_token() {
    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    assert_eq!(token, "WyJXaWRnZXQiLDQyXQ==");
    let decoded = decode(&token).unwrap();
    assert_eq!(decoded, GlobalIdentifier::new("Widget", vec![Value::Int(42)]));
}

#[test]
fn composite_key_keeps_order() {
    let keys = vec![Value::Int(1), Value::String("b".into()), Value::Null];
    let decoded = decode(&encode("Membership", &keys).unwrap()).unwrap();
    assert_eq!(decoded.type_tag(), "Membership");
    assert_eq!(decoded.key_values(), keys.as_slice());
}

#[test]
fn encoding_is_deterministic() {
    let keys = vec![Value::String("x".into()), Value::Bool(true)];
    assert_eq!(encode("T", &keys).unwrap(), encode("T", &keys).unwrap());
}

#[test]
fn empty_key_tuple_decodes() {
    let decoded = decode(&encode("Widget", &[]).unwrap()).unwrap();
    assert!(decoded.key_values().is_empty());
}

#[test]
fn malformed_tokens_are_rejected() {
    for token in ["", "@@@", "bm90IGpzb24=", "eyJhIjoxfQ==", "W10=", "WzQyXQ=="] {
        let err = decode(token).unwrap_err();
        assert!(
            matches!(err, IdentifierError::Malformed { .. }),
            "token {:?} gave {:?}",
            token,
            err
        );
        assert!(matches!(
            ResolutionError::from(err),
            ResolutionError::MalformedIdentifier { .. }
        ));
    }
}

#[test]
fn non_finite_keys_cannot_be_encoded() {
    let err = encode("Widget", &[Value::Float(f64::NAN)]).unwrap_err();
    assert_eq!(err, IdentifierError::NonFiniteKey { index: 0 });
}
