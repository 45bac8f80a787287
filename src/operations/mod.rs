//! The demo operations offered by the console.
//!
//! This module provides:
//! - [`Operation`], one variant per API call the console can demonstrate
//! - [`OperationRegistry`], the ordered menu of operations
//! - the fixture data each operation sends
//! - [`OperationRunner`], which executes an operation and renders the result

pub mod fixtures;
mod registry;
mod runner;

pub use registry::OperationRegistry;
pub use runner::{build_request, OperationRunner};

use crate::api::Lookup;

/// A single demonstrable API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAttachment,
    GetAttachment,
    GetAttachmentsForIssue,
    GetAttachmentArchiveForIssue,

    /// Fetch one reference-data record by its numeric ID.
    GetById(Lookup),
    /// List every record of a reference-data type.
    GetAll(Lookup),

    CreateIssue,
    UpdateIssue,
    GetIssue,
    GetIssueList,
    SearchIssues,

    GetLocation,
    GetAllLocations,
    CreateLocation,
    UpdateLocation,

    CreateNote,
    GetNote,
    GetNotesForIssue,

    GetOrganization,
    GetAllOrganizations,
    CreateOrganization,
    UpdateOrganization,

    CreateUser,
    UpdateUser,
    UpdateUserPassword,
    InactivateUser,
    GetUser,
    GetAllUsers,
}

impl Operation {
    /// The name shown in the menu and in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CreateAttachment => "CreateAttachment",
            Operation::GetAttachment => "GetAttachmentForAttachmentID",
            Operation::GetAttachmentsForIssue => "GetAttachmentsForIssueNumber",
            Operation::GetAttachmentArchiveForIssue => {
                "GetAttachmentsInCompressedArchiveForIssueNumber"
            }
            Operation::GetById(lookup) => by_id_label(*lookup),
            Operation::GetAll(lookup) => all_label(*lookup),
            Operation::CreateIssue => "CreateIssue",
            Operation::UpdateIssue => "UpdateIssue",
            Operation::GetIssue => "GetIssueForIssueNumber",
            Operation::GetIssueList => "GetIssuesForIssueNumberList",
            Operation::SearchIssues => "SearchIssues",
            Operation::GetLocation => "GetLocationForLocationID",
            Operation::GetAllLocations => "GetAllLocations",
            Operation::CreateLocation => "CreateLocation",
            Operation::UpdateLocation => "UpdateLocation",
            Operation::CreateNote => "CreateNote",
            Operation::GetNote => "GetNoteForNoteID",
            Operation::GetNotesForIssue => "GetNotesForIssueNumber",
            Operation::GetOrganization => "GetOrganizationForOrganizationID",
            Operation::GetAllOrganizations => "GetAllOrganizations",
            Operation::CreateOrganization => "CreateOrganization",
            Operation::UpdateOrganization => "UpdateOrganization",
            Operation::CreateUser => "CreateUser",
            Operation::UpdateUser => "UpdateUser",
            Operation::UpdateUserPassword => "UpdateUserPassword",
            Operation::InactivateUser => "InactivateUser",
            Operation::GetUser => "GetUserForUserID",
            Operation::GetAllUsers => "GetAllUsers",
        }
    }
}

fn by_id_label(lookup: Lookup) -> &'static str {
    match lookup {
        Lookup::Cause => "GetCauseForCauseID",
        Lookup::Class => "GetClassForClassID",
        Lookup::Department => "GetDepartmentForDepartmentID",
        Lookup::IssueType => "GetIssueTypeForIssueTypeID",
        Lookup::IssueSubType => "GetIssueSubTypeForIssueSubTypeID",
        Lookup::IssueSubType2 => "GetIssueSubType2ForIssueSubType2ID",
        Lookup::IssueSubType3 => "GetIssueSubType3ForIssueSubType3ID",
        Lookup::IssueSubType4 => "GetIssueSubType4ForIssueSubType4ID",
        Lookup::MenuItem => "GetMenuItemForMenuItemID",
        Lookup::Priority => "GetPriorityForPriorityID",
        Lookup::Project => "GetProjectForProjectID",
        Lookup::ServiceLevel => "GetServiceLevelForServiceLevelID",
        Lookup::ServiceLevelAgreement => "GetServiceLevelAgreementForServiceLevelAgreementID",
        Lookup::ServiceLevelSeverity => "GetServiceLevelSeverityForSeverityID",
        Lookup::ServiceLevelTerm => "GetServiceLevelTermForServiceLevelTermID",
        Lookup::Substatus => "GetSubstatusForSubstatusID",
        Lookup::TimeZone => "GetTimeZoneForTimeZoneID",
        Lookup::UserDefinedFieldType => "GetUserDefinedFieldTypeForUserDefinedFieldTypeID",
        Lookup::UserType => "GetUserTypeForUserTypeID",
    }
}

fn all_label(lookup: Lookup) -> &'static str {
    match lookup {
        Lookup::Cause => "GetAllCauses",
        Lookup::Class => "GetAllClasses",
        Lookup::Department => "GetAllDepartments",
        Lookup::IssueType => "GetAllIssueTypes",
        Lookup::IssueSubType => "GetAllIssueSubTypes",
        Lookup::IssueSubType2 => "GetAllIssueSubTypes2",
        Lookup::IssueSubType3 => "GetAllIssueSubTypes3",
        Lookup::IssueSubType4 => "GetAllIssueSubTypes4",
        Lookup::MenuItem => "GetAllMenuItems",
        Lookup::Priority => "GetAllPriorities",
        Lookup::Project => "GetAllProjects",
        Lookup::ServiceLevel => "GetAllServiceLevels",
        Lookup::ServiceLevelAgreement => "GetAllServiceLevelAgreements",
        Lookup::ServiceLevelSeverity => "GetAllServiceLevelSeverities",
        Lookup::ServiceLevelTerm => "GetAllServiceLevelTerms",
        Lookup::Substatus => "GetAllSubstatuses",
        Lookup::TimeZone => "GetAllTimeZones",
        Lookup::UserDefinedFieldType => "GetAllUserDefinedFieldTypes",
        Lookup::UserType => "GetAllUserTypes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_labels() {
        assert_eq!(
            Operation::GetById(Lookup::Cause).label(),
            "GetCauseForCauseID"
        );
        assert_eq!(
            Operation::GetAll(Lookup::IssueSubType2).label(),
            "GetAllIssueSubTypes2"
        );
    }

    #[test]
    fn test_lookup_labels_are_distinct() {
        for lookup in Lookup::ALL {
            assert_ne!(
                Operation::GetById(lookup).label(),
                Operation::GetAll(lookup).label()
            );
        }
    }
}
