use macaque::ast::{BlockStatement, Identifier};
use macaque::environment::Environment;
use macaque::value::{Function, Hash, Object, ObjectKind, FALSE, NULL, TRUE};
use std::rc::Rc;

#[test]
fn string_hash_keys_depend_on_content_only() {
    let hello1 = Object::String("Hello World".into());
    let hello2 = Object::String("Hello World".into());
    let diff1 = Object::String("My name is johnny".into());
    let diff2 = Object::String("My name is johnny".into());

    assert_eq!(hello1.hash_key().unwrap(), hello2.hash_key().unwrap());
    assert_eq!(diff1.hash_key().unwrap(), diff2.hash_key().unwrap());
    assert_ne!(hello1.hash_key().unwrap(), diff1.hash_key().unwrap());
}

#[test]
fn integer_and_boolean_hash_keys() {
    assert_eq!(
        Object::Integer(1).hash_key().unwrap(),
        Object::Integer(1).hash_key().unwrap()
    );
    assert_ne!(
        Object::Integer(1).hash_key().unwrap(),
        Object::Integer(2).hash_key().unwrap()
    );
    assert_eq!(TRUE.hash_key().unwrap(), Object::Boolean(true).hash_key().unwrap());
    assert_ne!(TRUE.hash_key().unwrap(), FALSE.hash_key().unwrap());
}

#[test]
fn keys_of_different_kinds_never_collide() {
    // true hashes to 1 and "" could hash to anything; the kind tag keeps
    // them apart even on a numeric collision.
    let one = Object::Integer(1).hash_key().unwrap();
    let yes = TRUE.hash_key().unwrap();
    assert_eq!(one.value, yes.value);
    assert_ne!(one, yes);
}

#[test]
fn aggregates_are_not_hashable() {
    let array = Object::Array(Rc::new(vec![Object::Integer(1)]));
    let error = array.hash_key().unwrap_err();
    assert_eq!(error.to_string(), "unusable as hash key: ARRAY");

    let hash = Object::Hash(Rc::new(Hash::new()));
    let error = hash.hash_key().unwrap_err();
    assert_eq!(error.to_string(), "unusable as hash key: HASH");

    assert!(NULL.hash_key().is_err());
}

#[test]
fn first_insertion_under_a_key_wins() {
    let mut hash = Hash::new();
    let key = Object::String("a".into());
    hash.insert(key.hash_key().unwrap(), key.clone(), Object::Integer(1));
    hash.insert(key.hash_key().unwrap(), key.clone(), Object::Integer(2));

    assert_eq!(hash.len(), 1);
    assert_eq!(hash.get(&key.hash_key().unwrap()), Some(&Object::Integer(1)));
}

#[test]
fn hash_preserves_insertion_order() {
    let mut hash = Hash::new();
    for name in ["one", "two", "three"] {
        let key = Object::String(name.into());
        hash.insert(key.hash_key().unwrap(), key, NULL);
    }
    let keys: Vec<String> = hash.pairs().map(|pair| pair.key.to_string()).collect();
    assert_eq!(keys, vec!["one", "two", "three"]);
}

#[test]
fn missing_keys_are_absent_not_errors() {
    let hash = Hash::new();
    let key = Object::String("nope".into()).hash_key().unwrap();
    assert_eq!(hash.get(&key), None);
    assert!(hash.is_empty());
}

#[test]
fn truthiness_is_null_and_false_only() {
    assert!(!NULL.is_truthy());
    assert!(!FALSE.is_truthy());
    assert!(TRUE.is_truthy());
    assert!(Object::Integer(0).is_truthy());
    assert!(Object::String("".into()).is_truthy());
    assert!(Object::Array(Rc::new(Vec::new())).is_truthy());
}

#[test]
fn equality_is_by_value_for_data() {
    assert_eq!(Object::Integer(5), Object::Integer(5));
    assert_ne!(Object::Integer(5), Object::Integer(6));
    assert_eq!(TRUE, Object::Boolean(true));
    assert_eq!(NULL, Object::Null);
    assert_ne!(Object::Integer(1), TRUE);
    assert_eq!(
        Object::Array(Rc::new(vec![Object::Integer(1)])),
        Object::Array(Rc::new(vec![Object::Integer(1)]))
    );
}

#[test]
fn functions_compare_by_identity() {
    let make = || {
        Rc::new(Function {
            parameters: vec![Identifier::new("x")],
            body: Rc::new(BlockStatement::default()),
            env: Environment::new(),
        })
    };
    let f = make();
    assert_eq!(Object::Function(Rc::clone(&f)), Object::Function(f));
    assert_ne!(Object::Function(make()), Object::Function(make()));
}

#[test]
fn inspect_forms() {
    assert_eq!(Object::Integer(-7).to_string(), "-7");
    assert_eq!(TRUE.to_string(), "true");
    assert_eq!(NULL.to_string(), "null");
    assert_eq!(Object::String("hi".into()).to_string(), "hi");
    assert_eq!(
        Object::Array(Rc::new(vec![Object::Integer(1), TRUE])).to_string(),
        "[1, true]"
    );
    assert_eq!(
        Object::Error("type mismatch: INTEGER + BOOLEAN".into()).to_string(),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );

    let mut hash = Hash::new();
    let key = Object::String("a".into());
    hash.insert(key.hash_key().unwrap(), key, Object::Integer(1));
    assert_eq!(Object::Hash(Rc::new(hash)).to_string(), "{a: 1}");
}

#[test]
fn kind_names_match_the_error_vocabulary() {
    assert_eq!(ObjectKind::Integer.to_string(), "INTEGER");
    assert_eq!(ObjectKind::String.to_string(), "STRING");
    assert_eq!(ObjectKind::ReturnValue.to_string(), "RETURN_VALUE");
    assert_eq!(ObjectKind::Builtin.to_string(), "BUILTIN");
    assert_eq!(Object::Integer(0).kind(), ObjectKind::Integer);
}
