use indexmap::IndexMap;
use log::{info, warn};
use thiserror::Error;

pub mod layout;
pub mod painter;
pub mod scene_graph;

/// Rejected edits. The display text doubles as the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Please enter both parent and child names.")]
    Validation,

    #[error("Parent-child relationship not found.")]
    NotFound { parent: String, child: String },
}

/// Attributes recorded for one person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub spouse: String,
    pub children: Vec<String>,
    pub birthdate: String,
    pub gender: String,
}

impl Person {
    pub fn new(spouse: &str, birthdate: &str, gender: &str) -> Self {
        Self {
            spouse: spouse.to_string(),
            children: Vec::new(),
            birthdate: birthdate.to_string(),
            gender: gender.to_string(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Multi-line summary drawn under the person's node.
    pub fn detail_text(&self) -> String {
        format!(
            "Spouse: {}\nChildren: {}\nBirthdate: {}\nGender: {}",
            self.spouse,
            self.children.join(", "),
            self.birthdate,
            self.gender
        )
    }
}

/// Optional attributes supplied alongside a new relationship. They only
/// apply when the parent record is created by the same call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonDetails<'a> {
    pub spouse: &'a str,
    pub birthdate: &'a str,
    pub gender: &'a str,
}

/// Insertion-ordered mapping from person name to attributes.
///
/// Only top-level keys are treated as parents; a name that appears solely in
/// a children list has no record of its own. No cross-record consistency is
/// enforced.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    people: IndexMap<String, Person>,
    revision: u64,
}

impl FamilyTree {
    /// The three records the application starts with.
    pub fn example() -> Self {
        let mut people = IndexMap::new();
        people.insert(
            "John".to_string(),
            Person::new("Jane", "1970-01-01", "Male").with_children(["Mary", "Tom"]),
        );
        people.insert(
            "Mary".to_string(),
            Person::new("", "1975-03-15", "Female").with_children(["Peter", "Alice"]),
        );
        people.insert(
            "Tom".to_string(),
            Person::new("", "1978-11-20", "Male").with_children(["Jack", "Jill"]),
        );
        Self {
            people,
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Person)> {
        self.people
            .iter()
            .map(|(name, person)| (name.as_str(), person))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.people.keys().map(String::as_str)
    }

    /// Bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append `child` to `parent`'s children, creating the parent record from
    /// `details` when it does not exist yet. Existing records keep their
    /// attributes.
    pub fn add_relationship(
        &mut self,
        parent: &str,
        child: &str,
        details: PersonDetails<'_>,
    ) -> Result<(), TreeError> {
        let (parent, child) = required_names(parent, child)?;

        let record = self.people.entry(parent.to_string()).or_insert_with(|| {
            info!("Creating record for {parent}");
            Person::new(details.spouse, details.birthdate, details.gender)
        });
        record.children.push(child.to_string());
        self.revision += 1;

        info!("Added {child} as a child of {parent}");
        Ok(())
    }

    /// Remove the first occurrence of `child` from `parent`'s children.
    pub fn remove_relationship(&mut self, parent: &str, child: &str) -> Result<(), TreeError> {
        let (parent, child) = required_names(parent, child)?;

        let position = self
            .people
            .get(parent)
            .and_then(|record| record.children.iter().position(|name| name == child));

        match position {
            Some(index) => {
                if let Some(record) = self.people.get_mut(parent) {
                    record.children.remove(index);
                }
                self.revision += 1;
                info!("Removed {child} from the children of {parent}");
                Ok(())
            }
            None => Err(TreeError::NotFound {
                parent: parent.to_string(),
                child: child.to_string(),
            }),
        }
    }
}

/// Blank-looking names are rejected, but accepted names are used verbatim.
fn required_names<'a>(parent: &'a str, child: &'a str) -> Result<(&'a str, &'a str), TreeError> {
    if parent.trim().is_empty() || child.trim().is_empty() {
        warn!("Rejected edit with a missing parent or child name");
        return Err(TreeError::Validation);
    }
    Ok((parent, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn children_of<'a>(tree: &'a FamilyTree, name: &str) -> Vec<&'a str> {
        tree.get(name)
            .map(|person| person.children.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn example_tree_is_seeded_in_order() {
        let tree = FamilyTree::example();
        assert_eq!(tree.names().collect::<Vec<_>>(), vec!["John", "Mary", "Tom"]);
        let john = tree.get("John").unwrap();
        assert_eq!(john.spouse, "Jane");
        assert_eq!(john.birthdate, "1970-01-01");
        assert_eq!(john.gender, "Male");
        assert_eq!(children_of(&tree, "Tom"), vec!["Jack", "Jill"]);
    }

    #[test]
    fn adding_unknown_parent_creates_record() {
        let mut tree = FamilyTree::example();
        let details = PersonDetails {
            spouse: "Eve",
            birthdate: "1990-05-05",
            gender: "Female",
        };
        tree.add_relationship("Anna", "Ben", details).unwrap();

        assert_eq!(tree.len(), 4);
        let anna = tree.get("Anna").unwrap();
        assert_eq!(anna.children, vec!["Ben".to_string()]);
        assert_eq!(anna.spouse, "Eve");
        assert_eq!(anna.birthdate, "1990-05-05");
        assert_eq!(anna.gender, "Female");
        assert_eq!(tree.names().last(), Some("Anna"));
    }

    #[test]
    fn omitted_details_default_to_empty() {
        let mut tree = FamilyTree::default();
        tree.add_relationship("Anna", "Ben", PersonDetails::default())
            .unwrap();
        assert_eq!(
            tree.get("Anna"),
            Some(&Person::default().with_children(["Ben"]))
        );
    }

    #[test]
    fn adding_to_existing_parent_keeps_attributes() {
        let mut tree = FamilyTree::example();
        let before = tree.get("John").cloned().unwrap();
        let details = PersonDetails {
            spouse: "Someone Else",
            birthdate: "2000-01-01",
            gender: "Female",
        };
        tree.add_relationship("John", "Luke", details).unwrap();

        let after = tree.get("John").unwrap();
        assert_eq!(after.spouse, before.spouse);
        assert_eq!(after.birthdate, before.birthdate);
        assert_eq!(after.gender, before.gender);
        assert_eq!(after.children.len(), before.children.len() + 1);
        assert_eq!(after.children.last().map(String::as_str), Some("Luke"));
    }

    #[test]
    fn duplicate_children_are_kept() {
        let mut tree = FamilyTree::example();
        tree.add_relationship("John", "Mary", PersonDetails::default())
            .unwrap();
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom", "Mary"]);
    }

    #[rstest]
    #[case("", "Luke")]
    #[case("John", "")]
    #[case("   ", "Luke")]
    #[case("John", "\t")]
    fn add_rejects_missing_names(#[case] parent: &str, #[case] child: &str) {
        let mut tree = FamilyTree::example();
        let result = tree.add_relationship(parent, child, PersonDetails::default());
        assert_eq!(result, Err(TreeError::Validation));
        assert_eq!(tree.len(), 3);
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);
        assert_eq!(tree.revision(), 0);
    }

    #[rstest]
    #[case("", "Mary")]
    #[case("John", " ")]
    fn remove_rejects_missing_names(#[case] parent: &str, #[case] child: &str) {
        let mut tree = FamilyTree::example();
        assert_eq!(
            tree.remove_relationship(parent, child),
            Err(TreeError::Validation)
        );
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);
    }

    #[test]
    fn supplied_values_are_stored_verbatim() {
        let mut tree = FamilyTree::example();
        let details = PersonDetails {
            spouse: " Eve ",
            birthdate: " 1990-05-05",
            gender: "Female ",
        };
        tree.add_relationship("Anna", " Ben", details).unwrap();

        let anna = tree.get("Anna").unwrap();
        assert_eq!(anna.spouse, " Eve ");
        assert_eq!(anna.birthdate, " 1990-05-05");
        assert_eq!(anna.gender, "Female ");
        assert_eq!(anna.children, vec![" Ben".to_string()]);
    }

    #[test]
    fn padded_names_are_distinct_keys() {
        let mut tree = FamilyTree::example();
        tree.add_relationship("John ", "Luke", PersonDetails::default())
            .unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);

        let result = tree.remove_relationship("John", " Mary");
        assert!(matches!(result, Err(TreeError::NotFound { .. })));
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);
    }

    #[test]
    fn remove_takes_first_occurrence_only() {
        let mut tree = FamilyTree::default();
        for child in ["A", "B", "A"] {
            tree.add_relationship("P", child, PersonDetails::default())
                .unwrap();
        }
        tree.remove_relationship("P", "A").unwrap();
        assert_eq!(children_of(&tree, "P"), vec!["B", "A"]);
    }

    #[test]
    fn remove_missing_child_is_not_found() {
        let mut tree = FamilyTree::example();
        let result = tree.remove_relationship("John", "Nonexistent");
        assert_eq!(
            result,
            Err(TreeError::NotFound {
                parent: "John".to_string(),
                child: "Nonexistent".to_string(),
            })
        );
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);
        assert_eq!(tree.revision(), 0);
    }

    #[test]
    fn remove_from_missing_parent_is_not_found() {
        let mut tree = FamilyTree::example();
        let result = tree.remove_relationship("Nobody", "Mary");
        assert!(matches!(result, Err(TreeError::NotFound { .. })));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn add_then_remove_restores_children() {
        let mut tree = FamilyTree::example();
        tree.add_relationship("John", "Luke", PersonDetails::default())
            .unwrap();
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom", "Luke"]);
        tree.remove_relationship("John", "Luke").unwrap();
        assert_eq!(children_of(&tree, "John"), vec!["Mary", "Tom"]);
        assert_eq!(tree.revision(), 2);
    }

    #[test]
    fn error_messages_match_dialog_text() {
        assert_eq!(
            TreeError::Validation.to_string(),
            "Please enter both parent and child names."
        );
        let not_found = TreeError::NotFound {
            parent: "John".into(),
            child: "Nonexistent".into(),
        };
        assert_eq!(not_found.to_string(), "Parent-child relationship not found.");
    }

    #[test]
    fn detail_text_lists_fields_in_order() {
        let tree = FamilyTree::example();
        assert_eq!(
            tree.get("John").unwrap().detail_text(),
            "Spouse: Jane\nChildren: Mary, Tom\nBirthdate: 1970-01-01\nGender: Male"
        );
    }
}
