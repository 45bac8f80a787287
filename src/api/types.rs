//! Issuetrak API request types.
//!
//! These model the bodies of the create, update and search endpoints. Field
//! names follow the PascalCase convention of the Issuetrak API, with the
//! `ID` suffix spelled out in full.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Serialize raw bytes as base64 text.
fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(bytes))
}

/// A new issue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateIssue {
    pub should_suppress_email_for_create_operation: bool,
    pub entered_by: String,
    pub submitted_by: String,
    pub submitted_date: DateTime<Local>,
    pub subject: String,
    pub description: String,
    #[serde(rename = "IssueTypeID")]
    pub issue_type_id: i32,
    #[serde(rename = "IssueSubTypeID", skip_serializing_if = "Option::is_none")]
    pub issue_sub_type_id: Option<i32>,
    #[serde(rename = "PriorityID")]
    pub priority_id: i32,
    #[serde(rename = "OrganizationID")]
    pub organization_id: i32,
}

/// Changes to an existing issue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateIssue {
    pub issue_number: i32,
    pub submitted_by: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    #[serde(rename = "IssueTypeID")]
    pub issue_type_id: i32,
    #[serde(rename = "PriorityID")]
    pub priority_id: i32,
    #[serde(rename = "OrganizationID")]
    pub organization_id: i32,
}

/// An issue search: paging, ordering and one or more query sets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchIssue {
    pub can_include_notes: bool,
    pub page_index: u32,
    pub page_size: u32,
    pub query_ordering_definitions: Vec<SearchQueryOrdering>,
    pub query_set_definitions: Vec<SearchQuerySet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderingDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchQueryOrdering {
    pub field_name: String,
    pub query_ordering_direction: OrderingDirection,
}

/// How expressions, or whole query sets, combine with their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryOperator {
    And,
    Or,
}

/// Comparison applied by a single search expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpressionOperation {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchQuerySet {
    pub query_set_index: u32,
    pub query_set_operator: QueryOperator,
    pub query_set_expressions: Vec<SearchQueryExpression>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchQueryExpression {
    pub field_name: String,
    pub field_filter_value1: Option<String>,
    pub field_filter_value2: Option<String>,
    pub query_expression_operation: ExpressionOperation,
    pub query_expression_operator: QueryOperator,
}

/// A note attached to an issue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNote {
    pub created_by: String,
    pub created_date: DateTime<Local>,
    pub is_private: bool,
    pub is_rich_text: bool,
    pub issue_number: i32,
    pub note_text: String,
    pub should_suppress_email_for_create_operation: bool,
}

/// A file attached to an issue. The content travels as base64.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAttachment {
    pub created_by: String,
    pub created_date: DateTime<Local>,
    pub file_name: String,
    #[serde(serialize_with = "serialize_base64")]
    pub file_content: Vec<u8>,
    pub file_size_in_bytes: usize,
    pub issue_number: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLocation {
    #[serde(rename = "LocationID")]
    pub location_id: String,
    #[serde(rename = "LocationName")]
    pub location_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateLocation {
    #[serde(rename = "LocationID")]
    pub location_id: String,
    #[serde(rename = "LocationName")]
    pub location_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrganization {
    #[serde(rename = "OrganizationName")]
    pub organization_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrganization {
    #[serde(rename = "OrganizationID")]
    pub organization_id: i32,
    #[serde(rename = "OrganizationName")]
    pub organization_name: String,
}

/// Account details shared by user creation and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    #[serde(rename = "UserTypeID")]
    pub user_type_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub email_address: String,
    pub phone: String,
    pub pager: String,
    #[serde(rename = "OrganizationID")]
    pub organization_id: i32,
    #[serde(rename = "DepartmentID")]
    pub department_id: Option<i32>,
    #[serde(rename = "LocationID")]
    pub location_id: Option<String>,
    pub is_active: bool,
    pub should_show_debug: bool,
    pub is_sys_admin: bool,
    pub created_by: String,
    pub created_date: DateTime<Local>,
    pub modified_by: String,
    pub modified_date: DateTime<Local>,
    pub last_login_date: Option<DateTime<Local>>,
    pub cannot_login: bool,
    pub has_no_authentication: bool,
    pub last_password_change: Option<DateTime<Local>>,
    pub login_attempts: Option<i32>,
    #[serde(rename = "UserDefined1ID")]
    pub user_defined1_id: Option<i32>,
    pub user_defined1: Option<String>,
    #[serde(rename = "UserDefined2ID")]
    pub user_defined2_id: Option<i32>,
    pub user_defined2: Option<String>,
    #[serde(rename = "UserDefined3ID")]
    pub user_defined3_id: Option<i32>,
    pub user_defined3: Option<String>,
    pub user_defined_date: Option<DateTime<Local>>,
    #[serde(rename = "TimeZoneID")]
    pub time_zone_id: i32,
    pub does_time_zone_use_daylight_savings: bool,
    #[serde(rename = "HomePageID")]
    pub home_page_id: i32,
    pub dashboard_reload: Option<i32>,
    pub should_dashboard_show_timer: Option<bool>,
    pub dashboard_default_class: Option<i32>,
    pub dashboard_default_months: Option<i32>,
    pub redirect_to: String,
    pub list_format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUser {
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "UserNumber")]
    pub user_number: i32,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserPassword {
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InactivateUser {
    #[serde(rename = "UserID")]
    pub user_id: String,
}
