//! Executes operations against the API and renders the outcome.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{error, info, instrument};

use super::{fixtures, Operation};
use crate::api::error::Result as ApiResult;
use crate::api::{IssuetrakClient, Request};
use crate::error::AppError;
use crate::render::{ResponseRenderer, SystemViewer, Viewer};

/// Build the request an operation sends, stamping bodies with `now`.
pub fn build_request(operation: Operation, now: DateTime<Local>) -> ApiResult<Request> {
    let request = match operation {
        Operation::CreateAttachment => Request::create_attachment(&fixtures::attachment(now))?,
        Operation::GetAttachment => Request::get_attachment(fixtures::ATTACHMENT_ID),
        Operation::GetAttachmentsForIssue => {
            Request::get_attachments_for_issue(fixtures::ISSUE_NUMBER)
        }
        Operation::GetAttachmentArchiveForIssue => {
            Request::get_attachment_archive_for_issue(fixtures::ISSUE_NUMBER)
        }

        Operation::GetById(lookup) => Request::get_by_id(lookup, fixtures::lookup_id(lookup)),
        Operation::GetAll(lookup) => {
            Request::get_all(lookup).with_request_logging(fixtures::logs_get_all(lookup))
        }

        Operation::CreateIssue => {
            Request::create_issue(&fixtures::create_issue(now))?.with_request_logging(true)
        }
        Operation::UpdateIssue => Request::update_issue(&fixtures::update_issue())?,
        Operation::GetIssue => Request::get_issue(fixtures::ISSUE_NUMBER, true),
        Operation::GetIssueList => Request::get_issues(&[fixtures::ISSUE_NUMBER], true),
        Operation::SearchIssues => Request::search_issues(&fixtures::search_issue())?,

        Operation::GetLocation => Request::get_location(fixtures::LOCATION_ID),
        Operation::GetAllLocations => Request::get_all_locations().with_request_logging(true),
        Operation::CreateLocation => {
            Request::create_location(&fixtures::create_location())?.with_request_logging(true)
        }
        Operation::UpdateLocation => {
            Request::update_location(&fixtures::update_location())?.with_request_logging(true)
        }

        Operation::CreateNote => Request::create_note(&fixtures::note(now))?,
        Operation::GetNote => Request::get_note(fixtures::NOTE_ID),
        Operation::GetNotesForIssue => {
            Request::get_notes_for_issue(fixtures::ISSUE_NUMBER).with_request_logging(true)
        }

        Operation::GetOrganization => Request::get_organization(fixtures::ORGANIZATION_ID),
        Operation::GetAllOrganizations => {
            Request::get_all_organizations().with_request_logging(true)
        }
        Operation::CreateOrganization => {
            Request::create_organization(&fixtures::create_organization())?
                .with_request_logging(true)
        }
        Operation::UpdateOrganization => {
            Request::update_organization(&fixtures::update_organization())?
                .with_request_logging(true)
        }

        Operation::CreateUser => Request::create_user(&fixtures::create_user(now))?,
        Operation::UpdateUser => Request::update_user(&fixtures::update_user(now))?,
        Operation::UpdateUserPassword => {
            Request::update_user_password(&fixtures::update_user_password(now))?
        }
        Operation::InactivateUser => Request::inactivate_user(&fixtures::inactivate_user())?,
        Operation::GetUser => Request::get_user(fixtures::USER_ID, true),
        Operation::GetAllUsers => Request::get_all_users(),
    };

    Ok(request)
}

/// Runs operations one at a time and renders each result.
pub struct OperationRunner<V: Viewer = SystemViewer> {
    client: IssuetrakClient,
    renderer: ResponseRenderer<V>,
}

impl<V: Viewer> OperationRunner<V> {
    pub fn new(client: IssuetrakClient, renderer: ResponseRenderer<V>) -> Self {
        Self { client, renderer }
    }

    /// Send the operation's request and render whatever comes back.
    ///
    /// A request that fails without any response is rendered as well, so
    /// this only errors when the request cannot be built or nothing can be
    /// written.
    #[instrument(skip_all, fields(operation = operation.label()))]
    pub async fn run(&mut self, operation: Operation) -> Result<PathBuf, AppError> {
        let request = build_request(operation, Local::now())?;

        let path = match self.client.send(&request).await {
            Ok(response) => {
                info!(status = response.status.as_u16(), "Operation completed");
                self.renderer.render(operation.label(), &response)?
            }
            Err(e) => {
                error!("Operation failed: {}", e);
                self.renderer.render_failure(operation.label(), &e)?
            }
        };

        Ok(path)
    }

    pub fn renderer(&self) -> &ResponseRenderer<V> {
        &self.renderer
    }

    /// Delete the files rendered so far.
    pub fn shutdown(&mut self) {
        self.renderer.cleanup();
    }
}
