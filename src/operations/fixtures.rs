//! Fixed test data sent by the demo operations.
//!
//! Builders take the current time so callers (and tests) control every
//! timestamp in a request body.

use chrono::{DateTime, Local};

use crate::api::types::{
    CreateAttachment, CreateIssue, CreateLocation, CreateNote, CreateOrganization, CreateUser,
    ExpressionOperation, InactivateUser, OrderingDirection, QueryOperator, SearchIssue,
    SearchQueryExpression, SearchQueryOrdering, SearchQuerySet, UpdateIssue, UpdateLocation,
    UpdateOrganization, UpdateUser, UpdateUserPassword, UserProfile,
};
use crate::api::Lookup;

pub const ISSUE_NUMBER: i32 = 1;
pub const UPDATE_ISSUE_NUMBER: i32 = 2;
pub const NOTE_ISSUE_NUMBER: i32 = 122;
pub const ATTACHMENT_ID: i32 = 26;
pub const NOTE_ID: i32 = 1;
pub const LOCATION_ID: &str = "HQ";
pub const NEW_LOCATION_ID: &str = "HQ-2";
pub const ORGANIZATION_ID: i32 = 106;
pub const ORGANIZATION_NAME: &str = "My Organization";
pub const USER_TYPE_ID: i32 = 1;
pub const END_USER_TYPE_ID: i32 = 2;
pub const USER_ID: &str = "APIUser";
pub const UPDATE_USER_ID: &str = "InactiveUser";
pub const UPDATE_USER_NUMBER: i32 = 14;
pub const PASSWORD_USER_ID: &str = "Test-End-User-0";
pub const TIME_ZONE_ID: i32 = 26;
pub const LIST_FORMAT: &str = "Standard";
pub const REDIRECT_URL: &str = "CSIssue_Submit.asp";

pub const ATTACHMENT_FILE_NAME: &str = "Test-Attachment-File.txt";
/// Size of the generated attachment body.
pub const ATTACHMENT_SIZE: usize = 5_000_000;

/// Timestamp used to make generated user IDs and passwords unique.
const STAMP_FORMAT: &str = "%m-%d-%Y-%I%M%S";

/// The record ID each reference-data lookup is queried with.
pub fn lookup_id(lookup: Lookup) -> i32 {
    match lookup {
        Lookup::Cause => 5,
        Lookup::IssueType => 5,
        Lookup::IssueSubType => 21,
        Lookup::IssueSubType2 | Lookup::IssueSubType3 | Lookup::IssueSubType4 => 3,
        Lookup::Substatus => 13,
        Lookup::TimeZone => TIME_ZONE_ID,
        Lookup::UserType => USER_TYPE_ID,
        Lookup::Class
        | Lookup::Department
        | Lookup::MenuItem
        | Lookup::Priority
        | Lookup::Project
        | Lookup::ServiceLevel
        | Lookup::ServiceLevelAgreement
        | Lookup::ServiceLevelSeverity
        | Lookup::ServiceLevelTerm
        | Lookup::UserDefinedFieldType => 1,
    }
}

/// Whether listing a lookup asks the server to log the request.
pub fn logs_get_all(lookup: Lookup) -> bool {
    matches!(
        lookup,
        Lookup::Department
            | Lookup::IssueType
            | Lookup::IssueSubType
            | Lookup::IssueSubType2
            | Lookup::IssueSubType3
            | Lookup::IssueSubType4
            | Lookup::MenuItem
    )
}

pub fn attachment(now: DateTime<Local>) -> CreateAttachment {
    let file_content = vec![b'A'; ATTACHMENT_SIZE];
    CreateAttachment {
        created_by: "Admin".to_string(),
        created_date: now,
        file_name: ATTACHMENT_FILE_NAME.to_string(),
        file_size_in_bytes: file_content.len(),
        file_content,
        issue_number: ISSUE_NUMBER,
    }
}

pub fn create_issue(now: DateTime<Local>) -> CreateIssue {
    CreateIssue {
        should_suppress_email_for_create_operation: true,
        entered_by: USER_ID.to_string(),
        submitted_by: USER_ID.to_string(),
        submitted_date: now,
        subject: "Test Subject".to_string(),
        description: "Issue Description".to_string(),
        issue_type_id: 1,
        issue_sub_type_id: None,
        priority_id: 1,
        organization_id: 1,
    }
}

/// The issue created by the `create-issue` mode, entered by `username`.
pub fn quick_issue(username: &str, now: DateTime<Local>) -> CreateIssue {
    CreateIssue {
        should_suppress_email_for_create_operation: false,
        entered_by: username.to_string(),
        submitted_by: "admin".to_string(),
        submitted_date: now,
        subject: "something".to_string(),
        description: "Testing api ..".to_string(),
        issue_type_id: 1,
        issue_sub_type_id: Some(4),
        priority_id: 4,
        organization_id: 1,
    }
}

pub fn update_issue() -> UpdateIssue {
    UpdateIssue {
        issue_number: UPDATE_ISSUE_NUMBER,
        submitted_by: USER_ID.to_string(),
        subject: "Updated Subject".to_string(),
        description: "Updated Description".to_string(),
        status: "Open".to_string(),
        issue_type_id: 1,
        priority_id: 1,
        organization_id: 1,
    }
}

/// One AND query set with two filters, ordered by issue number.
pub fn search_issue() -> SearchIssue {
    SearchIssue {
        can_include_notes: false,
        page_index: 0,
        page_size: 10,
        query_ordering_definitions: vec![SearchQueryOrdering {
            field_name: "IssueNumber".to_string(),
            query_ordering_direction: OrderingDirection::Asc,
        }],
        query_set_definitions: vec![SearchQuerySet {
            query_set_index: 1,
            query_set_operator: QueryOperator::And,
            query_set_expressions: vec![
                SearchQueryExpression {
                    field_name: "IssueNumber".to_string(),
                    field_filter_value1: Some(NOTE_ISSUE_NUMBER.to_string()),
                    field_filter_value2: None,
                    query_expression_operation: ExpressionOperation::NotEqual,
                    query_expression_operator: QueryOperator::And,
                },
                SearchQueryExpression {
                    field_name: "Description".to_string(),
                    field_filter_value1: Some("volatility".to_string()),
                    field_filter_value2: None,
                    query_expression_operation: ExpressionOperation::Contains,
                    query_expression_operator: QueryOperator::And,
                },
            ],
        }],
    }
}

pub fn note(now: DateTime<Local>) -> CreateNote {
    CreateNote {
        created_by: USER_ID.to_string(),
        created_date: now,
        is_private: false,
        is_rich_text: false,
        issue_number: NOTE_ISSUE_NUMBER,
        note_text: "Test Note Text".to_string(),
        should_suppress_email_for_create_operation: true,
    }
}

pub fn create_location() -> CreateLocation {
    CreateLocation {
        location_id: NEW_LOCATION_ID.to_string(),
        location_name: NEW_LOCATION_ID.to_string(),
    }
}

pub fn update_location() -> UpdateLocation {
    UpdateLocation {
        location_id: LOCATION_ID.to_string(),
        location_name: LOCATION_ID.to_string(),
    }
}

pub fn create_organization() -> CreateOrganization {
    CreateOrganization {
        organization_name: ORGANIZATION_NAME.to_string(),
    }
}

pub fn update_organization() -> UpdateOrganization {
    UpdateOrganization {
        organization_id: ORGANIZATION_ID,
        organization_name: ORGANIZATION_NAME.to_string(),
    }
}

fn profile(now: DateTime<Local>) -> UserProfile {
    UserProfile {
        user_type_id: USER_TYPE_ID,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        display_name: "Test.User".to_string(),
        address1: "Test Address 1".to_string(),
        address2: "Test Address 2".to_string(),
        city: "Test City".to_string(),
        state: "Test State".to_string(),
        zip_code: "12345-6789".to_string(),
        country: "United States".to_string(),
        email_address: "test.user@test.com".to_string(),
        phone: "757-555-1111".to_string(),
        pager: "757-555-2222".to_string(),
        organization_id: 1,
        department_id: None,
        location_id: None,
        is_active: true,
        should_show_debug: false,
        is_sys_admin: false,
        created_by: USER_ID.to_string(),
        created_date: now,
        modified_by: USER_ID.to_string(),
        modified_date: now,
        last_login_date: None,
        cannot_login: false,
        has_no_authentication: false,
        last_password_change: None,
        login_attempts: Some(0),
        user_defined1_id: None,
        user_defined1: None,
        user_defined2_id: None,
        user_defined2: None,
        user_defined3_id: None,
        user_defined3: None,
        user_defined_date: None,
        time_zone_id: TIME_ZONE_ID,
        does_time_zone_use_daylight_savings: true,
        home_page_id: 1,
        dashboard_reload: None,
        should_dashboard_show_timer: None,
        dashboard_default_class: None,
        dashboard_default_months: None,
        redirect_to: REDIRECT_URL.to_string(),
        list_format: LIST_FORMAT.to_string(),
    }
}

/// A new user whose ID is unique to the second it was generated.
pub fn create_user(now: DateTime<Local>) -> CreateUser {
    CreateUser {
        user_id: format!("TestUser{}", now.format(STAMP_FORMAT)),
        password: "Test.Password.1234".to_string(),
        profile: profile(now),
    }
}

/// Turns the inactive test account into a login-less end user.
pub fn update_user(now: DateTime<Local>) -> UpdateUser {
    UpdateUser {
        user_id: UPDATE_USER_ID.to_string(),
        user_number: UPDATE_USER_NUMBER,
        profile: UserProfile {
            user_type_id: END_USER_TYPE_ID,
            first_name: "Test.Inactive".to_string(),
            display_name: "Inactive.User-UPDATE".to_string(),
            cannot_login: true,
            has_no_authentication: true,
            login_attempts: None,
            ..profile(now)
        },
    }
}

pub fn update_user_password(now: DateTime<Local>) -> UpdateUserPassword {
    UpdateUserPassword {
        user_id: PASSWORD_USER_ID.to_string(),
        password: format!("New.Password.{}", now.format(STAMP_FORMAT)),
    }
}

pub fn inactivate_user() -> InactivateUser {
    InactivateUser {
        user_id: UPDATE_USER_ID.to_string(),
    }
}
