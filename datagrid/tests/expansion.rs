use datagrid::{Expansion, RowId};

#[test]
fn test_expansion_toggle() {
    let one = RowId::from(1);
    let two = RowId::from(2);
    let expansion = Expansion::new().toggle(&two).toggle(&one);
    assert!(expansion.is_expanded(&one));
    assert_eq!(expansion.ids(), vec![one.clone(), two.clone()]);

    let expansion = expansion.toggle(&one);
    assert!(!expansion.is_expanded(&one));
    assert!(expansion.is_expanded(&two));
    assert_eq!(expansion.len(), 1);
}

#[test]
fn test_toggle_leaves_original_untouched() {
    let one = RowId::from("a");
    let original = Expansion::new();
    let toggled = original.toggle(&one);
    assert!(original.is_empty());
    assert!(toggled.is_expanded(&one));
}
