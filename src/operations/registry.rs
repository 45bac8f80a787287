//! Operation registry for the console menu.
//!
//! The registry is a fixed, ordered list. Menu numbers are 1-based positions
//! in that list.

use super::Operation;
use crate::api::Lookup;

/// The ordered menu of demo operations.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: Vec<Operation>,
}

impl OperationRegistry {
    /// Create the registry with every operation in menu order.
    pub fn new() -> Self {
        use Lookup::*;
        use Operation::*;

        let operations = vec![
            CreateAttachment,
            GetAttachment,
            GetAttachmentsForIssue,
            GetAttachmentArchiveForIssue,
            GetById(Cause),
            GetAll(Cause),
            GetById(Class),
            GetAll(Class),
            GetById(Department),
            GetAll(Department),
            CreateIssue,
            UpdateIssue,
            GetIssue,
            GetIssueList,
            SearchIssues,
            GetById(IssueType),
            GetAll(IssueType),
            GetById(IssueSubType),
            GetAll(IssueSubType),
            GetById(IssueSubType2),
            GetAll(IssueSubType2),
            GetById(IssueSubType3),
            GetAll(IssueSubType3),
            GetById(IssueSubType4),
            GetAll(IssueSubType4),
            GetLocation,
            GetAllLocations,
            CreateLocation,
            UpdateLocation,
            GetById(MenuItem),
            GetAll(MenuItem),
            CreateNote,
            GetNote,
            GetNotesForIssue,
            GetOrganization,
            GetAllOrganizations,
            CreateOrganization,
            UpdateOrganization,
            GetById(Priority),
            GetAll(Priority),
            GetById(Project),
            GetAll(Project),
            GetById(ServiceLevel),
            GetAll(ServiceLevel),
            GetById(ServiceLevelAgreement),
            GetAll(ServiceLevelAgreement),
            GetById(ServiceLevelSeverity),
            GetAll(ServiceLevelSeverity),
            GetById(ServiceLevelTerm),
            GetAll(ServiceLevelTerm),
            GetById(Substatus),
            GetAll(Substatus),
            GetById(TimeZone),
            GetAll(TimeZone),
            CreateUser,
            UpdateUser,
            UpdateUserPassword,
            InactivateUser,
            GetUser,
            GetAllUsers,
            GetById(UserDefinedFieldType),
            GetAll(UserDefinedFieldType),
            GetById(UserType),
            GetAll(UserType),
        ];

        Self { operations }
    }

    #[cfg(test)]
    pub(crate) fn from_operations(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Get the operation at a 1-based menu number.
    pub fn get(&self, number: usize) -> Option<Operation> {
        number
            .checked_sub(1)
            .and_then(|index| self.operations.get(index))
            .copied()
    }

    /// Find an operation by its label, ignoring case.
    pub fn find(&self, label: &str) -> Option<Operation> {
        let label = label.trim();
        self.operations
            .iter()
            .find(|op| op.label().eq_ignore_ascii_case(label))
            .copied()
    }

    /// Resolve a menu number or a label.
    pub fn resolve(&self, selector: &str) -> Option<Operation> {
        match selector.trim().parse::<usize>() {
            Ok(number) => self.get(number),
            Err(_) => self.find(selector),
        }
    }

    /// Iterate over `(menu number, operation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Operation)> + '_ {
        self.operations
            .iter()
            .enumerate()
            .map(|(index, op)| (index + 1, *op))
    }

    /// The menu lines, e.g. `  1:  CreateAttachment`.
    pub fn menu_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(number, op)| format!("{:>3}:  {}", number, op.label()))
            .collect()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
