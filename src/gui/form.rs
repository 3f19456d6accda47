use log::warn;

use crate::tree::{FamilyTree, PersonDetails, TreeError};

pub const ADDED_MESSAGE: &str = "Member added successfully.";
pub const REMOVED_MESSAGE: &str = "Member removed successfully.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Parent,
    Child,
    Spouse,
    Birthdate,
    Gender,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Parent,
        FormField::Child,
        FormField::Spouse,
        FormField::Birthdate,
        FormField::Gender,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Parent => "Parent:",
            Self::Child => "Child:",
            Self::Spouse => "Spouse:",
            Self::Birthdate => "Birthdate:",
            Self::Gender => "Gender:",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::Parent => "Enter parent's name",
            Self::Child => "Enter child's name",
            Self::Spouse => "Enter spouse's name",
            Self::Birthdate => "Enter birthdate (YYYY-MM-DD)",
            Self::Gender => "Enter gender (Male/Female)",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Birthdate => Some("YYYY-MM-DD"),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberAction {
    Add,
    Remove,
}

/// Result of a form action, shown in the acknowledgement dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    pub succeeded: bool,
}

impl ActionOutcome {
    fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            succeeded: true,
        }
    }
}

/// Current text of the five input fields. Values persist across actions.
#[derive(Clone, Debug, Default)]
pub struct MemberForm {
    pub parent: String,
    pub child: String,
    pub spouse: String,
    pub birthdate: String,
    pub gender: String,
}

impl MemberForm {
    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Parent => &mut self.parent,
            FormField::Child => &mut self.child,
            FormField::Spouse => &mut self.spouse,
            FormField::Birthdate => &mut self.birthdate,
            FormField::Gender => &mut self.gender,
        }
    }

    fn details(&self) -> PersonDetails<'_> {
        PersonDetails {
            spouse: &self.spouse,
            birthdate: &self.birthdate,
            gender: &self.gender,
        }
    }

    /// Apply `action` to the tree. Store errors end here as a failed outcome.
    pub fn submit(&self, action: MemberAction, tree: &mut FamilyTree) -> ActionOutcome {
        let result = match action {
            MemberAction::Add => tree
                .add_relationship(&self.parent, &self.child, self.details())
                .map(|()| ADDED_MESSAGE),
            MemberAction::Remove => tree
                .remove_relationship(&self.parent, &self.child)
                .map(|()| REMOVED_MESSAGE),
        };

        match result {
            Ok(message) => ActionOutcome::success(message),
            Err(err) => {
                if let TreeError::NotFound { parent, child } = &err {
                    warn!("No relationship between {parent} and {child}");
                }
                ActionOutcome {
                    message: err.to_string(),
                    succeeded: false,
                }
            }
        }
    }
}
