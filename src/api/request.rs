//! Request values for every Issuetrak API operation.
//!
//! A [`Request`] is a method, a path relative to the versioned API root, an
//! optional JSON body and a handful of flags. Constructors exist for each
//! operation the API exposes; the client turns them into HTTP calls.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::Result;
use super::types::{
    CreateAttachment, CreateIssue, CreateLocation, CreateNote, CreateOrganization, CreateUser,
    InactivateUser, SearchIssue, UpdateIssue, UpdateLocation, UpdateOrganization, UpdateUser,
    UpdateUserPassword,
};

/// Reference data that can be fetched by numeric ID or listed in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Cause,
    Class,
    Department,
    IssueType,
    IssueSubType,
    IssueSubType2,
    IssueSubType3,
    IssueSubType4,
    MenuItem,
    Priority,
    Project,
    ServiceLevel,
    ServiceLevelAgreement,
    ServiceLevelSeverity,
    ServiceLevelTerm,
    Substatus,
    TimeZone,
    UserDefinedFieldType,
    UserType,
}

impl Lookup {
    /// Every lookup, in menu order.
    pub const ALL: [Lookup; 19] = [
        Lookup::Cause,
        Lookup::Class,
        Lookup::Department,
        Lookup::IssueType,
        Lookup::IssueSubType,
        Lookup::IssueSubType2,
        Lookup::IssueSubType3,
        Lookup::IssueSubType4,
        Lookup::MenuItem,
        Lookup::Priority,
        Lookup::Project,
        Lookup::ServiceLevel,
        Lookup::ServiceLevelAgreement,
        Lookup::ServiceLevelSeverity,
        Lookup::ServiceLevelTerm,
        Lookup::Substatus,
        Lookup::TimeZone,
        Lookup::UserDefinedFieldType,
        Lookup::UserType,
    ];

    /// The collection segment of the resource path.
    pub fn collection(&self) -> &'static str {
        match self {
            Lookup::Cause => "causes",
            Lookup::Class => "classes",
            Lookup::Department => "departments",
            Lookup::IssueType => "issuetypes",
            Lookup::IssueSubType => "issuesubtypes",
            Lookup::IssueSubType2 => "issuesubtypes2",
            Lookup::IssueSubType3 => "issuesubtypes3",
            Lookup::IssueSubType4 => "issuesubtypes4",
            Lookup::MenuItem => "menuitems",
            Lookup::Priority => "priorities",
            Lookup::Project => "projects",
            Lookup::ServiceLevel => "servicelevels",
            Lookup::ServiceLevelAgreement => "servicelevelagreements",
            Lookup::ServiceLevelSeverity => "servicelevelseverities",
            Lookup::ServiceLevelTerm => "servicelevelterms",
            Lookup::Substatus => "substatuses",
            Lookup::TimeZone => "timezones",
            Lookup::UserDefinedFieldType => "userdefinedfieldtypes",
            Lookup::UserType => "usertypes",
        }
    }
}

/// A single call against the Issuetrak API.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
    include_request_logging: bool,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            include_request_logging: false,
        }
    }

    fn with_body<T: Serialize>(method: Method, path: impl Into<String>, body: &T) -> Result<Self> {
        let mut request = Self::new(method, path);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Ask the client to log the full request and response at info level.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.include_request_logging = enabled;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to `{base_url}/api/v{version}/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn include_request_logging(&self) -> bool {
        self.include_request_logging
    }

    /// Whether repeating the request cannot change server state.
    pub fn is_idempotent(&self) -> bool {
        self.method == Method::GET
    }

    // Reference data

    pub fn get_by_id(lookup: Lookup, id: i32) -> Self {
        Self::new(Method::GET, format!("{}/{}", lookup.collection(), id))
    }

    pub fn get_all(lookup: Lookup) -> Self {
        Self::new(Method::GET, lookup.collection())
    }

    // Attachments

    pub fn create_attachment(attachment: &CreateAttachment) -> Result<Self> {
        Self::with_body(Method::POST, "attachments", attachment)
    }

    pub fn get_attachment(attachment_id: i32) -> Self {
        Self::new(Method::GET, format!("attachments/{}", attachment_id))
    }

    pub fn get_attachments_for_issue(issue_number: i32) -> Self {
        Self::new(Method::GET, format!("attachments/issue/{}", issue_number))
    }

    /// All attachments of an issue bundled into one compressed archive.
    pub fn get_attachment_archive_for_issue(issue_number: i32) -> Self {
        Self::new(
            Method::GET,
            format!("attachments/issue/{}/archive", issue_number),
        )
    }

    // Issues

    pub fn create_issue(issue: &CreateIssue) -> Result<Self> {
        Self::with_body(Method::POST, "issues", issue)
    }

    pub fn update_issue(issue: &UpdateIssue) -> Result<Self> {
        Self::with_body(Method::PUT, "issues", issue)
    }

    pub fn get_issue(issue_number: i32, include_notes: bool) -> Self {
        Self::new(
            Method::GET,
            format!("issues/{}/{}", include_notes, issue_number),
        )
    }

    pub fn get_issues(issue_numbers: &[i32], include_notes: bool) -> Self {
        let numbers = issue_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");

        Self::new(Method::GET, format!("issues/{}/list", include_notes))
            .query("issueNumbers", numbers)
    }

    pub fn search_issues(search: &SearchIssue) -> Result<Self> {
        Self::with_body(Method::POST, "issues/search", search)
    }

    // Locations are keyed by free-form text, so the ID is percent-encoded.

    pub fn get_location(location_id: &str) -> Self {
        Self::new(
            Method::GET,
            format!("locations/{}", urlencoding::encode(location_id)),
        )
    }

    pub fn get_all_locations() -> Self {
        Self::new(Method::GET, "locations")
    }

    pub fn create_location(location: &CreateLocation) -> Result<Self> {
        Self::with_body(Method::POST, "locations", location)
    }

    pub fn update_location(location: &UpdateLocation) -> Result<Self> {
        Self::with_body(Method::PUT, "locations", location)
    }

    // Notes

    pub fn create_note(note: &CreateNote) -> Result<Self> {
        Self::with_body(Method::POST, "notes", note)
    }

    pub fn get_note(note_id: i32) -> Self {
        Self::new(Method::GET, format!("notes/{}", note_id))
    }

    pub fn get_notes_for_issue(issue_number: i32) -> Self {
        Self::new(Method::GET, format!("notes/issue/{}", issue_number))
    }

    // Organizations

    pub fn get_organization(organization_id: i32) -> Self {
        Self::new(Method::GET, format!("organizations/{}", organization_id))
    }

    pub fn get_all_organizations() -> Self {
        Self::new(Method::GET, "organizations")
    }

    pub fn create_organization(organization: &CreateOrganization) -> Result<Self> {
        Self::with_body(Method::POST, "organizations", organization)
    }

    pub fn update_organization(organization: &UpdateOrganization) -> Result<Self> {
        Self::with_body(Method::PUT, "organizations", organization)
    }

    // Users

    pub fn create_user(user: &CreateUser) -> Result<Self> {
        Self::with_body(Method::POST, "users", user)
    }

    pub fn update_user(user: &UpdateUser) -> Result<Self> {
        Self::with_body(Method::PUT, "users", user)
    }

    pub fn update_user_password(password: &UpdateUserPassword) -> Result<Self> {
        Self::with_body(Method::PUT, "users/password", password)
    }

    pub fn inactivate_user(user: &InactivateUser) -> Result<Self> {
        Self::with_body(Method::PUT, "users/inactivate", user)
    }

    pub fn get_user(user_id: &str, retrieve_photo: bool) -> Self {
        Self::new(
            Method::GET,
            format!("users/{}", urlencoding::encode(user_id)),
        )
        .query("canRetrieveUserPhoto", retrieve_photo)
    }

    pub fn get_all_users() -> Self {
        Self::new(Method::GET, "users")
    }
}
