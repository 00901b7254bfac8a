use lpad_kernel::{SAFE_ALPHABET, new_project_id, safe_nanoid};

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);
    assert!(id.chars().all(|ch| SAFE_ALPHABET.contains(&ch)), "unexpected character in {id}");
}

#[test]
fn custom_length() {
    assert_eq!(safe_nanoid!(20).len(), 20);
}

#[test]
fn project_ids_are_valid_and_distinct() {
    let first = new_project_id().unwrap();
    let second = new_project_id().unwrap();

    assert_eq!(first.as_str().len(), 12);
    assert_ne!(first, second);
}
