//! Transitive closure of class derivation.

use std::collections::BTreeSet;

use crate::core::error::{Error, Result};
use crate::core::model::Class;
use crate::core::object_list::ObjectList;

/// Collect the identifiers of every class that derives from `class`, directly
/// or indirectly.
///
/// The result is deduplicated and sorted so templates that emit it produce the
/// same text on every run. A leaf class yields an empty list. Fails with
/// [`Error::NotFound`] on a dangling `derived_ids` entry and with
/// [`Error::CycleDetected`] if the derivation graph loops.
pub fn get_all_derived(class: &Class, classes: &ObjectList<Class>) -> Result<Vec<String>> {
    let mut found = BTreeSet::new();
    let mut path = Vec::new();
    collect(class, classes, &mut found, &mut path)?;
    Ok(found.into_iter().collect())
}

fn collect<'a>(
    class: &'a Class,
    classes: &'a ObjectList<Class>,
    found: &mut BTreeSet<String>,
    path: &mut Vec<&'a str>,
) -> Result<()> {
    path.push(&class.id);

    for id in &class.derived_ids {
        if path.contains(&id.as_str()) {
            return Err(Error::CycleDetected { id: id.clone() });
        }

        let derived = classes.get(id)?;
        // Already expanded through another branch
        if found.insert(id.clone()) {
            collect(derived, classes, found, path)?;
        }
    }

    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ObjectList<Class> {
        ObjectList::new(&[
            Class::new("A").with_derived(["B", "C"]),
            Class::new("B").with_derived(["D"]),
            Class::new("C"),
            Class::new("D"),
        ])
    }

    #[test]
    fn test_transitive_closure_is_sorted() {
        let classes = model();
        let a = classes.get("A").unwrap();
        assert_eq!(get_all_derived(a, &classes).unwrap(), ["B", "C", "D"]);
    }

    #[test]
    fn test_leaf_class_has_no_derived() {
        let classes = model();
        let c = classes.get("C").unwrap();
        assert!(get_all_derived(c, &classes).unwrap().is_empty());
    }

    #[test]
    fn test_diamond_is_deduplicated() {
        let classes = ObjectList::new(&[
            Class::new("Root").with_derived(["Left", "Right"]),
            Class::new("Left").with_derived(["Bottom"]),
            Class::new("Right").with_derived(["Bottom"]),
            Class::new("Bottom").with_derived(["Z"]),
            Class::new("Z"),
        ]);
        let root = classes.get("Root").unwrap();
        assert_eq!(
            get_all_derived(root, &classes).unwrap(),
            ["Bottom", "Left", "Right", "Z"]
        );
    }

    #[test]
    fn test_matches_reachable_set() {
        let classes = ObjectList::new(&[
            Class::new("e").with_derived(["a"]),
            Class::new("a").with_derived(["d", "b"]),
            Class::new("d").with_derived(["c"]),
            Class::new("b"),
            Class::new("c"),
            Class::new("unrelated").with_derived(["b"]),
        ]);

        let e = classes.get("e").unwrap();
        assert_eq!(get_all_derived(e, &classes).unwrap(), ["a", "b", "c", "d"]);
        let d = classes.get("d").unwrap();
        assert_eq!(get_all_derived(d, &classes).unwrap(), ["c"]);
    }

    #[test]
    fn test_dangling_id_is_not_found() {
        let classes = ObjectList::new(&[Class::new("A").with_derived(["Ghost"])]);
        let a = classes.get("A").unwrap();
        let err = get_all_derived(a, &classes).unwrap_err();
        assert!(matches!(err, Error::NotFound { ref id, .. } if id == "Ghost"));
    }

    #[test]
    fn test_cycle_is_detected() {
        let classes = ObjectList::new(&[
            Class::new("A").with_derived(["B"]),
            Class::new("B").with_derived(["C"]),
            Class::new("C").with_derived(["A"]),
        ]);
        let b = classes.get("B").unwrap();
        let err = get_all_derived(b, &classes).unwrap_err();
        assert!(matches!(err, Error::CycleDetected { ref id } if id == "B"));
    }

    #[test]
    fn test_self_derivation_is_a_cycle() {
        let classes = ObjectList::new(&[Class::new("A").with_derived(["A"])]);
        let a = classes.get("A").unwrap();
        assert!(matches!(
            get_all_derived(a, &classes),
            Err(Error::CycleDetected { .. })
        ));
    }
}
