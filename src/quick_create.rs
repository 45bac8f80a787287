//! One-shot issue creation.
//!
//! Creates a single issue entered by the configured user and reports the
//! outcome on the console.

use std::io::Write;

use chrono::Local;
use tracing::{error, info, instrument};

use crate::api::{IssuetrakClient, Request};
use crate::error::Result;
use crate::operations::fixtures;

/// Create the quick-create issue and print the outcome to `output`.
///
/// Server errors and transport failures are printed, not returned. Only
/// console output failures and request construction errors propagate.
#[instrument(skip(client, output))]
pub async fn create_issue<W: Write>(
    client: &IssuetrakClient,
    username: &str,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Creating Issue")?;
    output.flush()?;

    let request = Request::create_issue(&fixtures::quick_issue(username, Local::now()))?;

    match client.send(&request).await {
        Ok(response) if response.is_success() => {
            let text = response.text.unwrap_or_default();
            info!(issue = %text, "Issue created");
            writeln!(output, "Successful. ID is {}", text)?;
        }
        Ok(response) => {
            error!(status = response.status.as_u16(), "Issue creation rejected");
            writeln!(output, "Error: {}", response.reason_phrase())?;
            writeln!(output, "{}", response.text.unwrap_or_default())?;
        }
        Err(e) => {
            error!("Issue creation failed: {}", e);
            writeln!(output, "The following Exception was raised : {}", e)?;
        }
    }

    Ok(())
}
